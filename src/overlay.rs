use crate::constants::*;
use crate::dom;
use gallery_core::catalog::PlacedPainting;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// ---------------- Desktop pointer-lock gate ----------------

#[inline]
pub fn show_blocker(document: &web::Document) {
    dom::set_display(document, BLOCKER_ID, "block");
    dom::set_display(document, INSTRUCTIONS_ID, "");
}

#[inline]
pub fn hide_blocker(document: &web::Document) {
    dom::set_display(document, BLOCKER_ID, "none");
    dom::set_display(document, INSTRUCTIONS_ID, "none");
}

// ---------------- Info panel and popup ----------------

pub fn show_panel(document: &web::Document, painting: &PlacedPainting) {
    dom::set_text(document, PAINTING_TITLE_ID, painting.record.title);
    dom::set_text(document, PAINTING_DESCRIPTION_ID, painting.record.description);
    set_popup_image(document, painting);
    dom::set_display(document, INFO_PANEL_ID, "block");
}

#[inline]
pub fn hide_panel(document: &web::Document) {
    dom::set_display(document, INFO_PANEL_ID, "none");
}

/// Desktop centres the popup in a flex container and hides its close button
/// (a click anywhere closes it); touch devices keep the button.
pub fn show_popup(document: &web::Document, painting: &PlacedPainting, mobile: bool) {
    set_popup_image(document, painting);
    dom::set_display(
        document,
        POPUP_CONTAINER_ID,
        if mobile { "block" } else { "flex" },
    );
    dom::set_display(document, INFO_PANEL_ID, "none");
    if !mobile {
        dom::set_display(document, POPUP_CLOSE_BTN_ID, "none");
    }
}

pub fn hide_popup(document: &web::Document) {
    dom::set_display(document, POPUP_CONTAINER_ID, "none");
    dom::set_display(document, POPUP_CLOSE_BTN_ID, "");
}

fn set_popup_image(document: &web::Document, painting: &PlacedPainting) {
    if let Some(img) = document.get_element_by_id(POPUP_IMAGE_ID) {
        _ = img.set_attribute("src", painting.record.image_src);
        _ = img.set_attribute("alt", painting.record.title);
    }
}

// ---------------- Transient message ----------------

/// Replace any visible message with `text` and remove it after `duration_ms`.
pub fn show_temp_message(document: &web::Document, text: &str, duration_ms: f64) {
    if let Some(existing) = document.get_element_by_id(TEMP_MESSAGE_ID) {
        existing.remove();
    }
    let Some(el) = create_styled(document, "div", TEMP_MESSAGE_ID, TEMP_MESSAGE_STYLE) else {
        return;
    };
    el.set_text_content(Some(text));
    append_to_body(document, &el);

    let Some(window) = web::window() else {
        return;
    };
    let remove = Closure::once_into_js(move || el.remove());
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        remove.unchecked_ref(),
        duration_ms as i32,
    );
}

// ---------------- Touch start screen and controls ----------------

/// Show the start screen, building it when the page has none. The returned
/// flag is false when the screen could not be created.
pub fn show_mobile_start_screen(document: &web::Document) -> bool {
    if document.get_element_by_id(MOBILE_LOADING_SCREEN_ID).is_none() {
        let Some(screen) = create_styled(
            document,
            "div",
            MOBILE_LOADING_SCREEN_ID,
            MOBILE_LOADING_SCREEN_STYLE,
        ) else {
            return false;
        };
        let Ok(inner) = document.create_element("div") else {
            return false;
        };
        _ = inner.set_attribute("style", "text-align:center;max-width:400px;");
        if let Ok(h) = document.create_element("h2") {
            h.set_text_content(Some(MOBILE_TITLE));
            _ = inner.append_child(&h);
        }
        if let Ok(p) = document.create_element("p") {
            p.set_text_content(Some(MOBILE_INTRO));
            _ = p.set_attribute("style", "margin-bottom:30px;line-height:1.6;opacity:0.9;");
            _ = inner.append_child(&p);
        }
        if let Some(btn) = create_styled(
            document,
            "button",
            MOBILE_START_BTN_ID,
            MOBILE_START_BTN_STYLE,
        ) {
            btn.set_text_content(Some(MOBILE_START_LABEL));
            _ = inner.append_child(&btn);
        }
        _ = screen.append_child(&inner);
        append_to_body(document, &screen);
    }
    dom::set_display(document, MOBILE_LOADING_SCREEN_ID, "flex");
    true
}

#[inline]
pub fn hide_mobile_start_screen(document: &web::Document) {
    dom::set_display(document, MOBILE_LOADING_SCREEN_ID, "none");
}

/// Make sure the joystick and info button exist, then show them.
pub fn ensure_mobile_controls(document: &web::Document) {
    if document.get_element_by_id(MOBILE_CONTROLS_ID).is_none() {
        if let Some(container) =
            create_styled(document, "div", MOBILE_CONTROLS_ID, MOBILE_CONTROLS_STYLE)
        {
            if let Some(base) =
                create_styled(document, "div", JOYSTICK_BASE_ID, JOYSTICK_BASE_STYLE)
            {
                if let Some(knob) =
                    create_styled(document, "div", JOYSTICK_KNOB_ID, JOYSTICK_KNOB_STYLE)
                {
                    _ = base.append_child(&knob);
                }
                _ = container.append_child(&base);
            }
            if let Some(info) = create_styled(document, "button", INFO_BTN_ID, INFO_BTN_STYLE) {
                info.set_text_content(Some(INFO_BTN_LABEL));
                _ = container.append_child(&info);
            }
            append_to_body(document, &container);
        }
    }
    dom::set_display(document, MOBILE_CONTROLS_ID, "flex");
}

pub fn set_knob(document: &web::Document, dx: f32, dy: f32, active: bool) {
    if let Some(knob) = dom::html_element(document, JOYSTICK_KNOB_ID) {
        let style = knob.style();
        _ = style.set_property("transform", &knob_transform(dx, dy));
        _ = style.set_property(
            "background",
            if active { KNOB_ACTIVE_COLOR } else { KNOB_IDLE_COLOR },
        );
    }
}

// ---------------- Fatal error ----------------

/// Full-screen error with a reload button. Reuses the page's own error
/// elements when present.
pub fn show_error(document: &web::Document, message: &str) {
    if document.get_element_by_id(ERROR_SCREEN_ID).is_none() {
        let Some(screen) = create_styled(document, "div", ERROR_SCREEN_ID, ERROR_SCREEN_STYLE)
        else {
            return;
        };
        if let Ok(h) = document.create_element("h3") {
            h.set_text_content(Some(FATAL_ERROR_TITLE));
            _ = screen.append_child(&h);
        }
        if let Some(p) = create_styled(document, "p", ERROR_MESSAGE_ID, "") {
            _ = screen.append_child(&p);
        }
        if let Some(btn) = create_styled(
            document,
            "button",
            ERROR_RELOAD_BTN_ID,
            ERROR_RELOAD_BTN_STYLE,
        ) {
            btn.set_text_content(Some(RELOAD_LABEL));
            _ = screen.append_child(&btn);
        }
        append_to_body(document, &screen);
    }
    dom::set_text(document, ERROR_MESSAGE_ID, message);
    dom::set_display(document, ERROR_SCREEN_ID, "block");
    dom::add_click_listener(document, ERROR_RELOAD_BTN_ID, |_| dom::reload_page());
}

fn create_styled(
    document: &web::Document,
    tag: &str,
    id: &str,
    style: &str,
) -> Option<web::Element> {
    let el = document.create_element(tag).ok()?;
    el.set_id(id);
    if !style.is_empty() {
        _ = el.set_attribute("style", style);
    }
    Some(el)
}

fn append_to_body(document: &web::Document, el: &web::Element) {
    if let Some(body) = document.body() {
        _ = body.append_child(el);
    }
}
