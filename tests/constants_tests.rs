// Host-side tests for the browser constants and their helpers.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use std::collections::HashSet;

#[test]
fn dom_ids_are_unique_and_non_empty() {
    let mut seen = HashSet::new();
    for &id in ALL_DOM_IDS {
        assert!(!id.is_empty());
        assert!(!id.contains(char::is_whitespace), "bad id {id:?}");
        assert!(seen.insert(id), "duplicate id {id}");
    }
    assert!(seen.contains(CANVAS_ID));
    assert!(seen.contains(JOYSTICK_KNOB_ID));
    assert!(seen.contains(ERROR_RELOAD_BTN_ID));
}

#[test]
fn small_images_keep_their_size() {
    assert_eq!(texture_extent(800, 600, MAX_TEXTURE_DIM), (800, 600));
    assert_eq!(texture_extent(2048, 2048, 2048), (2048, 2048));
}

#[test]
fn oversized_images_fit_inside_the_limit() {
    assert_eq!(texture_extent(4096, 2048, 2048), (2048, 1024));
    assert_eq!(texture_extent(1000, 5000, 2048), (410, 2048));
}

#[test]
fn extreme_aspect_never_collapses_to_zero() {
    let (w, h) = texture_extent(100_000, 10, 2048);
    assert_eq!(w, 2048);
    assert_eq!(h, 1);
}

#[test]
fn zero_sized_images_become_one_pixel() {
    assert_eq!(texture_extent(0, 0, 2048), (1, 1));
    assert_eq!(texture_extent(0, 50, 2048), (1, 50));
}

#[test]
fn knob_transform_formats_one_decimal() {
    assert_eq!(knob_transform(0.0, 0.0), "translate(0.0px, 0.0px)");
    assert_eq!(knob_transform(12.34, -40.0), "translate(12.3px, -40.0px)");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn mouse_jump_limit_is_positive() {
    assert!(MAX_MOUSE_JUMP_PX > 0.0);
    assert!(SIGN_LINE_OFFSET_PX > 0.0);
}

#[test]
fn welcome_sign_is_black_on_white() {
    assert_eq!(SIGN_BACKGROUND, "#ffffff");
    assert_eq!(SIGN_TEXT_COLOR, "#000000");
}

#[test]
fn device_badge_has_a_colour_for_each_mode() {
    assert_eq!(indicator_color(true), INDICATOR_MOBILE_COLOR);
    assert_eq!(indicator_color(false), INDICATOR_DESKTOP_COLOR);
    assert_ne!(indicator_color(true), indicator_color(false));
}
