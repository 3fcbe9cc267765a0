use crate::assets::PaintingQueue;
use crate::dom;
use crate::render::GpuState;
use crate::ui::Wiring;
use gallery_core::scene::{self, RenderQuality};
use gallery_core::{SessionState, UiCommand};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub wiring: Wiring,
    pub gpu: GpuState,
    pub paintings: PaintingQueue,
    pub quality: RenderQuality,
    pub commands: Vec<UiCommand>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = self.wiring.now_ms();
        let session_rc = self.wiring.session.clone();
        let mut session = session_rc.borrow_mut();

        self.install_loaded_paintings(&mut session);

        let (width, height) = (self.wiring.canvas.width(), self.wiring.canvas.height());
        self.gpu.resize_if_needed(width, height);
        session.set_aspect(dom::canvas_aspect(&self.wiring.canvas));

        self.commands.clear();
        let outcome = session.frame(now, &mut self.commands);
        self.wiring.dispatch(&mut session, &self.commands);

        let Some(camera) = session.camera.as_ref() else {
            return;
        };
        if let Some(audio) = &self.wiring.audio {
            if let Some(volume) = outcome.music_volume {
                audio.set_music_volume(volume);
            }
            audio.sync_listener(camera);
        }
        self.gpu.render(camera);
    }

    /// Upload paintings whose images finished decoding since the last frame.
    fn install_loaded_paintings(&mut self, session: &mut SessionState) {
        if self.paintings.is_empty() {
            return;
        }
        for (index, image) in self.paintings.drain() {
            let Some(painting) = session.mark_loaded(index) else {
                continue;
            };
            self.gpu
                .add_primitive(&scene::painting_primitive(painting), Some(&image));
            if self.quality.painting_lights
                && !self.gpu.add_spot_light(&scene::painting_spotlight(painting))
            {
                log::warn!("[render] no spotlight slot left for {}", painting.record.id);
            }
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
