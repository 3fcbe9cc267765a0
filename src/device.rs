use crate::constants::{indicator_color, MOBILE_INDICATOR_ID};
use crate::dom;
use gallery_core::device::{ModeOverride, ResizeOutcome, ResizeWatcher};
use gallery_core::{DeviceProfile, DeviceSignals};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Snapshot the browser facts the detector classifies on.
pub fn read_signals(window: &web::Window) -> DeviceSignals {
    let number = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let navigator = window.navigator();
    let has_touch_start = js_sys::Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart"))
        .unwrap_or(false);
    DeviceSignals {
        viewport_width: number(window.inner_width()),
        viewport_height: number(window.inner_height()),
        user_agent: navigator.user_agent().unwrap_or_default(),
        has_touch_start,
        max_touch_points: navigator.max_touch_points().max(0) as u32,
        mode_override: ModeOverride::from_query(&dom::location_search()),
    }
}

pub fn update_indicator(document: &web::Document, profile: DeviceProfile) {
    if let Some(el) = dom::html_element(document, MOBILE_INDICATOR_ID) {
        el.set_text_content(Some(profile.label()));
        let style = el.style();
        _ = style.set_property("background", indicator_color(profile.mobile));
        _ = style.set_property("display", "block");
    }
}

/// Keep the canvas backing store in sync with its CSS size and reload the
/// page when the device classification flips.
pub fn wire_resize(canvas: &web::HtmlCanvasElement, initial: DeviceProfile) {
    let Some(window) = web::window() else {
        return;
    };
    let watcher = Rc::new(RefCell::new(ResizeWatcher::new(initial)));
    let canvas = canvas.clone();
    dom::add_listener(window.as_ref(), "resize", move |_: web::Event| {
        let Some(window) = web::window() else {
            return;
        };
        let signals = read_signals(&window);
        match watcher.borrow_mut().on_resize(&signals) {
            ResizeOutcome::ModeChanged { from, to } => {
                log::info!("[device] mode changed {} -> {}, reloading", from.label(), to.label());
                dom::reload_page();
            }
            ResizeOutcome::Unchanged => dom::sync_canvas_backing_size(&canvas),
        }
    });
}
