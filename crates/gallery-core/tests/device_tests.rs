// Device classification and resize handling.

use gallery_core::device::{detect, DeviceSignals, ModeOverride, ResizeOutcome, ResizeWatcher};
use gallery_core::{ControlVariant, DeviceProfile};

const DESKTOP_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/128.0 Safari/537.36";
const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Mobile";

fn signals(width: f64, ua: &str) -> DeviceSignals {
    DeviceSignals {
        viewport_width: width,
        viewport_height: 900.0,
        user_agent: ua.to_string(),
        ..DeviceSignals::default()
    }
}

#[test]
fn wide_desktop_browser_is_desktop() {
    let p = detect(&signals(1440.0, DESKTOP_UA));
    assert!(!p.mobile);
    assert_eq!(p.control_variant(), ControlVariant::Desktop);
    assert_eq!(p.label(), "DESKTOP");
}

#[test]
fn mobile_user_agent_wins_on_a_wide_viewport() {
    let p = detect(&signals(1280.0, ANDROID_UA));
    assert!(p.mobile);
    assert_eq!(p.control_variant(), ControlVariant::Touch);
}

#[test]
fn viewport_width_boundary_is_inclusive() {
    assert!(detect(&signals(768.0, DESKTOP_UA)).mobile);
    assert!(!detect(&signals(769.0, DESKTOP_UA)).mobile);
}

#[test]
fn explicit_override_beats_every_other_signal() {
    let mut s = signals(375.0, ANDROID_UA);
    s.has_touch_start = true;
    s.max_touch_points = 5;
    s.mode_override = Some(ModeOverride::Desktop);
    assert!(!detect(&s).mobile);

    let mut s = signals(1920.0, DESKTOP_UA);
    s.mode_override = Some(ModeOverride::Mobile);
    assert!(detect(&s).mobile);
}

#[test]
fn touch_flags_alone_do_not_select_mobile() {
    let mut s = signals(1440.0, DESKTOP_UA);
    s.has_touch_start = true;
    s.max_touch_points = 10;
    assert!(!detect(&s).mobile);
}

#[test]
fn override_is_read_from_the_query_string() {
    assert_eq!(
        ModeOverride::from_query("?debug=1&mode=mobile"),
        Some(ModeOverride::Mobile)
    );
    assert_eq!(ModeOverride::from_query("?mode=tablet"), None);
    assert_eq!(ModeOverride::from_query(""), None);
}

#[test]
fn resize_reports_mode_flip_once() {
    let mut w = ResizeWatcher::new(DeviceProfile::DESKTOP);
    assert_eq!(
        w.on_resize(&signals(1200.0, DESKTOP_UA)),
        ResizeOutcome::Unchanged
    );
    assert_eq!(
        w.on_resize(&signals(600.0, DESKTOP_UA)),
        ResizeOutcome::ModeChanged {
            from: DeviceProfile::DESKTOP,
            to: DeviceProfile::MOBILE,
        }
    );
    assert_eq!(
        w.on_resize(&signals(500.0, DESKTOP_UA)),
        ResizeOutcome::Unchanged
    );
}
