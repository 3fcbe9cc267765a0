pub mod keyboard;
pub mod pointer;
pub mod touch;

use crate::constants::{CLOSE_PANEL_BTN_ID, POPUP_CLOSE_BTN_ID};
use crate::dom;
use crate::ui::Wiring;

pub use keyboard::wire_keyboard;
pub use pointer::wire_pointer;
pub use touch::wire_touch;

/// Close buttons behave the same under both control schemes.
pub fn wire_close_buttons(w: &Wiring) {
    for id in [CLOSE_PANEL_BTN_ID, POPUP_CLOSE_BTN_ID] {
        let document = w.document.clone();
        let w = w.clone();
        dom::add_click_listener(&document, id, move |ev| {
            ev.stop_propagation();
            close(&w);
        });
    }
}

pub(crate) fn close(w: &Wiring) {
    let mut session = w.session.borrow_mut();
    let mut out = Vec::new();
    session.interaction.close(&mut out);
    w.dispatch(&mut session, &out);
}
