// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn offset_is_zero_at_the_centre() {
    let (dx, dy) = offset_from_center((150.0, 250.0), 100.0, 200.0, 100.0, 100.0);
    assert_eq!((dx, dy), (0.0, 0.0));
}

#[test]
fn offset_is_signed_relative_to_centre() {
    let (dx, dy) = offset_from_center((110.0, 290.0), 100.0, 200.0, 100.0, 100.0);
    assert_eq!(dx, -40.0);
    assert_eq!(dy, 40.0);
}

#[test]
fn knob_inside_dead_zone_is_idle() {
    assert!(!knob_is_active((0.0, 0.0), 40.0, 0.1));
    assert!(!knob_is_active((3.0, -3.0), 40.0, 0.1));
}

#[test]
fn knob_outside_dead_zone_on_either_axis_is_active() {
    assert!(knob_is_active((10.0, 0.0), 40.0, 0.1));
    assert!(knob_is_active((0.0, -10.0), 40.0, 0.1));
}

#[test]
fn knob_with_no_throw_is_never_active() {
    assert!(!knob_is_active((30.0, 30.0), 0.0, 0.1));
}

#[test]
fn ordinary_mouse_motion_passes_through() {
    assert_eq!(sanitize_movement(4.0, -7.5, 300.0), Some((4.0, -7.5)));
    assert_eq!(sanitize_movement(300.0, 0.0, 300.0), Some((300.0, 0.0)));
}

#[test]
fn spurious_jumps_are_dropped() {
    assert_eq!(sanitize_movement(301.0, 0.0, 300.0), None);
    assert_eq!(sanitize_movement(0.0, -900.0, 300.0), None);
    assert_eq!(sanitize_movement(f32::NAN, 0.0, 300.0), None);
}
