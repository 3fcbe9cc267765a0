use crate::constants::{INFO_BTN_ID, INFO_PANEL_ID, JOYSTICK_BASE_ID, POPUP_IMAGE_ID};
use crate::ui::Wiring;
use crate::{dom, input, overlay};
use web_sys as web;

/// Mobile scheme: canvas look and pinch, virtual joystick, info button.
pub fn wire_touch(w: &Wiring) {
    wire_canvas_gestures(w);
    wire_joystick(w);
    wire_info_button(w);
    wire_panel_tap(w);
    wire_popup_tap(w);
}

fn wire_canvas_gestures(w: &Wiring) {
    let canvas: web::EventTarget = w.canvas.clone().into();

    let wc = w.clone();
    dom::add_active_listener(&canvas, "touchstart", move |ev: web::TouchEvent| {
        ev.prevent_default();
        let touches = input::touch_points(&ev.target_touches());
        let mut session = wc.session.borrow_mut();
        // no-op once the start tap has unlocked audio
        wc.unlock_audio(&mut session);
        if let Some(t) = session.navigator.touch_mut() {
            t.touch_start(&touches);
        }
    });

    let wc = w.clone();
    dom::add_active_listener(&canvas, "touchmove", move |ev: web::TouchEvent| {
        ev.prevent_default();
        let touches = input::touch_points(&ev.target_touches());
        let mut guard = wc.session.borrow_mut();
        let s = &mut *guard;
        if let Some(t) = s.navigator.touch_mut() {
            t.touch_move(s.camera.as_mut(), &touches, &s.config.navigation);
        }
    });

    for kind in ["touchend", "touchcancel"] {
        let wc = w.clone();
        dom::add_active_listener(&canvas, kind, move |ev: web::TouchEvent| {
            let remaining = input::touch_points(&ev.target_touches());
            let mut session = wc.session.borrow_mut();
            if let Some(t) = session.navigator.touch_mut() {
                t.touch_end(&remaining);
            }
        });
    }
}

fn wire_joystick(w: &Wiring) {
    let Some(base) = w.document.get_element_by_id(JOYSTICK_BASE_ID) else {
        log::warn!("[input] joystick missing; touch movement disabled");
        return;
    };
    let target: web::EventTarget = base.clone().into();

    for kind in ["touchstart", "touchmove"] {
        let wc = w.clone();
        let base = base.clone();
        dom::add_active_listener(&target, kind, move |ev: web::TouchEvent| {
            ev.stop_propagation();
            ev.prevent_default();
            let Some((dx, dy)) = input::joystick_offset(&ev, &base) else {
                return;
            };
            let mut guard = wc.session.borrow_mut();
            let s = &mut *guard;
            let cfg = &s.config.navigation;
            if let Some(t) = s.navigator.touch_mut() {
                let knob = t.joystick_move(dx, dy, cfg);
                let active =
                    input::knob_is_active(knob, cfg.joystick_max_throw_px, cfg.joystick_dead_zone);
                overlay::set_knob(&wc.document, knob.0, knob.1, active);
            }
        });
    }

    for kind in ["touchend", "touchcancel"] {
        let wc = w.clone();
        dom::add_active_listener(&target, kind, move |ev: web::TouchEvent| {
            ev.stop_propagation();
            let mut session = wc.session.borrow_mut();
            if let Some(t) = session.navigator.touch_mut() {
                t.joystick_release();
            }
            overlay::set_knob(&wc.document, 0.0, 0.0, false);
        });
    }
}

fn wire_info_button(w: &Wiring) {
    let Some(button) = w.document.get_element_by_id(INFO_BTN_ID) else {
        return;
    };
    let target: web::EventTarget = button.into();

    let wc = w.clone();
    dom::add_active_listener(&target, "touchstart", move |ev: web::TouchEvent| {
        ev.stop_propagation();
        ev.prevent_default();
        request_info(&wc);
    });

    let wc = w.clone();
    dom::add_listener(&target, "click", move |ev: web::MouseEvent| {
        ev.stop_propagation();
        request_info(&wc);
    });
}

fn request_info(w: &Wiring) {
    let now = w.now_ms();
    let mut session = w.session.borrow_mut();
    let mut out = Vec::new();
    session.interaction.request_info(now, &mut out);
    w.dispatch(&mut session, &out);
}

/// Tapping the open panel shows the full-size image.
fn wire_panel_tap(w: &Wiring) {
    let document = w.document.clone();
    let wc = w.clone();
    dom::add_click_listener(&document, INFO_PANEL_ID, move |ev| {
        ev.stop_propagation();
        let mut session = wc.session.borrow_mut();
        let mut out = Vec::new();
        session.interaction.tap_panel(&mut out);
        wc.dispatch(&mut session, &out);
    });
}

fn wire_popup_tap(w: &Wiring) {
    let document = w.document.clone();
    let wc = w.clone();
    dom::add_click_listener(&document, POPUP_IMAGE_ID, move |ev| {
        ev.stop_propagation();
        super::close(&wc);
    });
}
