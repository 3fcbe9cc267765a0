#![cfg(target_arch = "wasm32")]
use anyhow::{anyhow, Context};
use gallery_core::audio::AudioGate;
use gallery_core::config::debug_requested;
use gallery_core::{scene, GalleryConfig, SceneDesc, SessionState};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod constants;
mod device;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod ui;

use constants::{CANVAS_ID, MOBILE_START_BTN_ID};
use ui::Wiring;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let level = if debug_requested(&dom::location_search()) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    console_log::init_with_level(level).ok();
    log::info!("gallery-web starting");

    if let Err(e) = init() {
        fail(&e);
    }
    Ok(())
}

fn fail(e: &anyhow::Error) {
    log::error!("[init] {:?}", e);
    if let Some(document) = dom::window_document() {
        overlay::show_error(&document, &format!("{:#}", e));
    }
}

fn init() -> anyhow::Result<()> {
    let window = web::window().context("no window")?;
    let document = window.document().context("no document")?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .with_context(|| format!("missing #{CANVAS_ID}"))?
        .dyn_into()
        .map_err(|e| anyhow!("#{CANVAS_ID} is not a canvas: {:?}", e))?;
    dom::sync_canvas_backing_size(&canvas);

    let signals = device::read_signals(&window);
    let profile = gallery_core::device::detect(&signals);
    log::info!(
        "[device] {} (viewport {}x{}, touch points {})",
        profile.label(),
        signals.viewport_width,
        signals.viewport_height,
        signals.max_touch_points
    );
    device::update_indicator(&document, profile);
    device::wire_resize(&canvas, profile);

    let config = GalleryConfig::from_query(profile, &dom::location_search());
    let scene = scene::build(profile.mobile)?;
    let mut session = SessionState::new(profile, config);
    let audio = match audio::AudioDirector::new(scene.music_src, &scene.audio_anchors) {
        Ok(director) => Some(Rc::new(director)),
        Err(e) => {
            log::warn!("[audio] disabled: {:?}", e);
            session.audio = AudioGate::Unavailable;
            None
        }
    };
    let wiring = Wiring {
        document: document.clone(),
        canvas,
        session: Rc::new(RefCell::new(session)),
        audio,
        epoch: Instant::now(),
    };

    if !profile.mobile {
        overlay::hide_mobile_start_screen(&document);
        spawn_gallery(wiring, scene);
        return Ok(());
    }

    overlay::hide_blocker(&document);
    if !overlay::show_mobile_start_screen(&document) {
        log::warn!("[init] start screen unavailable; starting immediately");
        spawn_gallery(wiring, scene);
        return Ok(());
    }
    // the start tap is the gesture that unlocks audio
    let pending = Rc::new(RefCell::new(Some(scene)));
    dom::add_click_listener(&document, MOBILE_START_BTN_ID, move |_| {
        let Some(scene) = pending.borrow_mut().take() else {
            return;
        };
        overlay::hide_mobile_start_screen(&wiring.document);
        {
            let mut session = wiring.session.borrow_mut();
            wiring.unlock_audio(&mut session);
        }
        spawn_gallery(wiring.clone(), scene);
    });
    Ok(())
}

fn spawn_gallery(wiring: Wiring, scene: SceneDesc) {
    spawn_local(async move {
        if let Err(e) = start_gallery(wiring, scene).await {
            fail(&e);
        }
    });
}

async fn start_gallery(w: Wiring, scene: SceneDesc) -> anyhow::Result<()> {
    let sign = match assets::render_welcome_sign() {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("[render] welcome sign skipped: {:?}", e);
            None
        }
    };
    let gpu = render::GpuState::new(&w.canvas, &scene, sign.as_ref())
        .await
        .context("WebGPU initialisation failed")?;

    w.session
        .borrow_mut()
        .attach_scene(scene.paintings.clone(), dom::canvas_aspect(&w.canvas));

    if w.session.borrow().profile.mobile {
        overlay::ensure_mobile_controls(&w.document);
        events::wire_touch(&w);
    } else {
        events::wire_keyboard(&w);
        events::wire_pointer(&w);
    }
    events::wire_close_buttons(&w);

    let paintings = assets::PaintingQueue::default();
    assets::request_paintings(&scene.paintings, &paintings);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        wiring: w,
        gpu,
        paintings,
        quality: scene.quality,
        commands: Vec::new(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
