use anyhow::{anyhow, bail, Context};
use gallery_core::scene::AudioAnchor;
use gallery_core::CameraState;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx)
        .map_err(|e| anyhow!("{} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

fn create_panner(
    audio_ctx: &web::AudioContext,
    anchor: &AudioAnchor,
) -> anyhow::Result<web::PannerNode> {
    let panner = web::PannerNode::new(audio_ctx)
        .map_err(|e| anyhow!("{} PannerNode error: {:?}", anchor.name, e))?;
    panner.set_panning_model(web::PanningModelType::Hrtf);
    panner.set_distance_model(web::DistanceModelType::Inverse);
    panner.set_ref_distance(anchor.ref_distance as f64);
    panner.position_x().set_value(anchor.position.x);
    panner.position_y().set_value(anchor.position.y);
    panner.position_z().set_value(anchor.position.z);
    Ok(panner)
}

/// One looping sound: its decoded buffer (once fetched) and the node it
/// plays into. Playback starts when both the buffer and the unlock exist.
struct Track {
    label: &'static str,
    output: web::GainNode,
    buffer: RefCell<Option<web::AudioBuffer>>,
    started: Cell<bool>,
}

impl Track {
    fn new(label: &'static str, output: web::GainNode) -> Rc<Self> {
        Rc::new(Self {
            label,
            output,
            buffer: RefCell::new(None),
            started: Cell::new(false),
        })
    }

    fn try_start(&self, audio_ctx: &web::AudioContext) {
        if self.started.get() {
            return;
        }
        let buffer = self.buffer.borrow();
        let Some(buffer) = buffer.as_ref() else {
            return;
        };
        match audio_ctx.create_buffer_source() {
            Ok(src) => {
                src.set_buffer(Some(buffer));
                src.set_loop(true);
                _ = src.connect_with_audio_node(&self.output);
                if let Err(e) = src.start() {
                    log::error!("[audio] {} failed to start: {:?}", self.label, e);
                    return;
                }
                self.started.set(true);
                log::debug!("[audio] {} playing", self.label);
            }
            Err(e) => log::error!("[audio] {} source error: {:?}", self.label, e),
        }
    }
}

/// Background music plus the positional ambient loops.
///
/// Everything is silent until [`AudioDirector::unlock`] runs inside a user
/// gesture; browsers refuse to start an `AudioContext` before that.
pub struct AudioDirector {
    ctx: web::AudioContext,
    music_gain: web::GainNode,
    music: Rc<Track>,
    ambients: Vec<Rc<Track>>,
    unlocked: Rc<Cell<bool>>,
}

impl AudioDirector {
    pub fn new(music_src: &'static str, anchors: &[AudioAnchor]) -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow!("{:?}", e))?;
        let destination = ctx.destination();

        let music_gain = create_gain(&ctx, 0.0, "Music")?;
        _ = music_gain.connect_with_audio_node(&destination);
        let music = Track::new("music", music_gain.clone());

        let mut ambients = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            let gain = create_gain(&ctx, anchor.volume, anchor.name)?;
            let panner = create_panner(&ctx, anchor)?;
            _ = gain.connect_with_audio_node(&panner);
            _ = panner.connect_with_audio_node(&destination);
            ambients.push(Track::new(anchor.name, gain));
        }

        let director = Self {
            ctx,
            music_gain,
            music,
            ambients,
            unlocked: Rc::new(Cell::new(false)),
        };
        director.fetch(music_src, &director.music);
        for (anchor, track) in anchors.iter().zip(&director.ambients) {
            director.fetch(anchor.src, track);
        }
        Ok(director)
    }

    fn fetch(&self, src: &'static str, track: &Rc<Track>) {
        let ctx = self.ctx.clone();
        let track = Rc::clone(track);
        let unlocked = Rc::clone(&self.unlocked);
        spawn_local(async move {
            match fetch_audio_buffer(&ctx, src).await {
                Ok(buffer) => {
                    log::info!("[audio] decoded {} ({:.1}s)", src, buffer.duration());
                    *track.buffer.borrow_mut() = Some(buffer);
                    if unlocked.get() {
                        track.try_start(&ctx);
                    }
                }
                Err(e) => log::error!("[audio] {} unavailable: {:?}", src, e),
            }
        });
    }

    /// Resume the context and start every loop whose buffer is ready. Safe
    /// to call more than once.
    pub fn unlock(&self) {
        if self.unlocked.replace(true) {
            return;
        }
        _ = self.ctx.resume();
        self.music.try_start(&self.ctx);
        for track in &self.ambients {
            track.try_start(&self.ctx);
        }
        log::info!("[audio] unlocked");
    }

    pub fn set_music_volume(&self, volume: f32) {
        self.music_gain.gain().set_value(volume);
    }

    /// Place the WebAudio listener at the camera, facing where it looks.
    #[allow(deprecated)]
    pub fn sync_listener(&self, camera: &CameraState) {
        let listener = self.ctx.listener();
        let (eye, fwd) = (camera.position, camera.forward());
        listener.set_position(eye.x as f64, eye.y as f64, eye.z as f64);
        _ = listener.set_orientation(fwd.x as f64, fwd.y as f64, fwd.z as f64, 0.0, 1.0, 0.0);
    }
}

async fn fetch_audio_buffer(
    ctx: &web::AudioContext,
    src: &str,
) -> anyhow::Result<web::AudioBuffer> {
    let window = web::window().context("no window")?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(src))
        .await
        .map_err(|e| anyhow!("fetch: {:?}", e))?
        .dyn_into()
        .map_err(|_| anyhow!("fetch did not return a Response"))?;
    if !resp.ok() {
        bail!("HTTP {}", resp.status());
    }
    let bytes = resp.array_buffer().map_err(|e| anyhow!("{:?}", e))?;
    let bytes: js_sys::ArrayBuffer = JsFuture::from(bytes)
        .await
        .map_err(|e| anyhow!("read body: {:?}", e))?
        .dyn_into()
        .map_err(|_| anyhow!("body is not an ArrayBuffer"))?;
    let decoded = ctx
        .decode_audio_data(&bytes)
        .map_err(|e| anyhow!("{:?}", e))?;
    JsFuture::from(decoded)
        .await
        .map_err(|e| anyhow!("decode: {:?}", e))?
        .dyn_into()
        .map_err(|_| anyhow!("decoded value is not an AudioBuffer"))
}
