use crate::constants::{
    BLOCKER_ID, INFO_PANEL_ID, INSTRUCTIONS_ID, MAX_MOUSE_JUMP_PX, POPUP_IMAGE_ID,
};
use crate::ui::Wiring;
use crate::{dom, input, overlay};
use gallery_core::interaction::ClickTarget;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Desktop scheme: pointer lock, mouse look, wheel zoom and click-to-open.
pub fn wire_pointer(w: &Wiring) {
    let has_gate = wire_lock_request(w);
    wire_lock_change(w);
    wire_mousemove(w);
    wire_wheel(w);
    wire_click(w, has_gate);
}

/// Clicking the instructions (or the blocker behind them) starts audio and
/// requests pointer lock. Returns false when the page has neither element.
fn wire_lock_request(w: &Wiring) -> bool {
    let gate = [INSTRUCTIONS_ID, BLOCKER_ID]
        .into_iter()
        .find(|id| w.document.get_element_by_id(id).is_some());
    let Some(gate) = gate else {
        return false;
    };
    let document = w.document.clone();
    let w = w.clone();
    dom::add_click_listener(&document, gate, move |ev| {
        ev.stop_propagation();
        request_lock(&w);
    });
    true
}

fn request_lock(w: &Wiring) {
    {
        let mut session = w.session.borrow_mut();
        w.unlock_audio(&mut session);
    }
    w.canvas.request_pointer_lock();
}

fn wire_lock_change(w: &Wiring) {
    let w = w.clone();
    let document = w.document.clone();
    dom::add_listener(document.as_ref(), "pointerlockchange", move |_: web::Event| {
        let locked = w
            .document
            .pointer_lock_element()
            .is_some_and(|el| el.is_same_node(Some(w.canvas.as_ref())));
        let mut session = w.session.borrow_mut();
        if let Some(input) = session.navigator.desktop_mut() {
            input.set_locked(locked);
        }
        let mut out = Vec::new();
        if locked {
            overlay::hide_blocker(&w.document);
            session.interaction.on_pointer_locked(&mut out);
        } else if !session.interaction.popup_open() {
            overlay::show_blocker(&w.document);
        }
        w.dispatch(&mut session, &out);
    });
}

fn wire_mousemove(w: &Wiring) {
    let w = w.clone();
    let document = w.document.clone();
    dom::add_listener(document.as_ref(), "mousemove", move |ev: web::MouseEvent| {
        let mut guard = w.session.borrow_mut();
        let s = &mut *guard;
        let Some(input) = s.navigator.desktop() else {
            return;
        };
        let delta = input::sanitize_movement(
            ev.movement_x() as f32,
            ev.movement_y() as f32,
            MAX_MOUSE_JUMP_PX,
        );
        if let Some((dx, dy)) = delta {
            input.look(s.camera.as_mut(), dx, dy, &s.config.navigation);
        }
    });
}

fn wire_wheel(w: &Wiring) {
    let Some(window) = web::window() else {
        return;
    };
    let w = w.clone();
    dom::add_active_listener(window.as_ref(), "wheel", move |ev: web::WheelEvent| {
        let mut guard = w.session.borrow_mut();
        let s = &mut *guard;
        let ui_open = s.interaction.ui_open();
        let Some(input) = s.navigator.desktop() else {
            return;
        };
        let delta_y = ev.delta_y() as f32;
        if input.wheel(s.camera.as_mut(), delta_y, ui_open, &s.config.navigation) {
            ev.prevent_default();
        }
    });
}

/// Clicks anywhere except on the info panel: a background click closes an
/// open popup, or opens the centered painting while locked.
fn wire_click(w: &Wiring, has_gate: bool) {
    let Some(window) = web::window() else {
        return;
    };
    let w = w.clone();
    dom::add_listener(window.as_ref(), "click", move |ev: web::MouseEvent| {
        if target_inside(&w.document, &ev, INFO_PANEL_ID) {
            return;
        }
        let mut session = w.session.borrow_mut();
        let locked = session.navigator.desktop().is_some_and(|d| d.is_locked());
        if !locked && !has_gate && !session.interaction.popup_open() {
            drop(session);
            request_lock(&w);
            return;
        }
        let target = if target_inside(&w.document, &ev, POPUP_IMAGE_ID) {
            ClickTarget::PopupImage
        } else {
            ClickTarget::Background
        };
        let mut out = Vec::new();
        session.interaction.click(locked, target, &mut out);
        w.dispatch(&mut session, &out);
    });
}

fn target_inside(document: &web::Document, ev: &web::MouseEvent, id: &str) -> bool {
    let Some(node) = ev.target().and_then(|t| t.dyn_into::<web::Node>().ok()) else {
        return false;
    };
    document
        .get_element_by_id(id)
        .is_some_and(|el| el.contains(Some(&node)))
}
