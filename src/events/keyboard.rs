use crate::dom;
use crate::ui::Wiring;
use web_sys as web;

/// WASD and arrow keys by physical key code. Arrow keys are swallowed while
/// the pointer is locked so the page does not scroll.
pub fn wire_keyboard(w: &Wiring) {
    let Some(window) = web::window() else {
        return;
    };
    let w_down = w.clone();
    dom::add_listener(window.as_ref(), "keydown", move |ev: web::KeyboardEvent| {
        let mut session = w_down.session.borrow_mut();
        let Some(input) = session.navigator.desktop_mut() else {
            return;
        };
        if input.key_down(&ev.code()) && input.is_locked() {
            ev.prevent_default();
        }
    });
    let w_up = w.clone();
    dom::add_listener(window.as_ref(), "keyup", move |ev: web::KeyboardEvent| {
        let mut session = w_up.session.borrow_mut();
        if let Some(input) = session.navigator.desktop_mut() {
            input.key_up(&ev.code());
        }
    });
}
