// Background-music fade stepping.

use gallery_core::audio::{fade_step_volume, AudioGate, MusicFader};
use gallery_core::config::FadeConfig;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn step_volume_is_linear_clamped_and_exact_at_the_end() {
    assert!(approx(fade_step_volume(0.0, 0.3, 15, 30, 0.3), 0.15));
    assert!(approx(fade_step_volume(0.3, 0.0, 10, 30, 0.3), 0.2));
    assert_eq!(fade_step_volume(0.0, 0.3, 30, 30, 0.3), 0.3);
    assert_eq!(fade_step_volume(0.3, 0.0, 30, 30, 0.3), 0.0);
    // a start above the ceiling is clamped on intermediate steps
    assert_eq!(fade_step_volume(1.0, 0.3, 1, 30, 0.3), 0.3);
}

#[test]
fn fader_starts_silent_and_idle() {
    let mut f = MusicFader::new(FadeConfig::default());
    assert_eq!(f.volume(), 0.0);
    assert_eq!(f.tick(10_000.0), None);
}

#[test]
fn fade_in_reaches_target_after_one_second() {
    let mut f = MusicFader::new(FadeConfig::default());
    f.fade_in(1000.0);
    assert_eq!(f.target(), 0.3);
    assert_eq!(f.tick(1000.0), None);
    assert_eq!(f.tick(1010.0), None);

    let v = f.tick(1034.0).unwrap();
    assert!(approx(v, 0.01), "{v}");

    let mut prev = v;
    for t in (1050..2000).step_by(17) {
        if let Some(v) = f.tick(t as f64) {
            assert!(v > prev);
            prev = v;
        }
    }
    assert_eq!(f.tick(2000.0), Some(0.3));
    assert_eq!(f.tick(3000.0), None);
}

#[test]
fn slow_frames_catch_up_in_one_tick() {
    let mut f = MusicFader::new(FadeConfig::default());
    f.fade_in(0.0);
    assert!(approx(f.tick(500.0).unwrap(), 0.15));
    assert_eq!(f.tick(5000.0), Some(0.3));
}

#[test]
fn new_fade_cancels_the_running_one_from_current_volume() {
    let mut f = MusicFader::new(FadeConfig::default());
    f.fade_in(0.0);
    f.tick(500.0);
    f.fade_out(500.0);
    assert_eq!(f.target(), 0.0);
    let v = f.tick(1000.0).unwrap();
    assert!(approx(v, 0.075), "{v}");
    assert_eq!(f.tick(1500.0), Some(0.0));
    assert_eq!(f.tick(5000.0), None);
}

#[test]
fn fading_to_the_current_volume_reports_no_change() {
    let mut f = MusicFader::new(FadeConfig::default());
    f.fade_out(0.0);
    assert_eq!(f.tick(2000.0), None);
    assert_eq!(f.volume(), 0.0);
}

#[test]
fn only_the_first_gesture_unlocks() {
    let mut gate = AudioGate::default();
    assert_eq!(gate, AudioGate::Locked);
    assert!(gate.on_gesture());
    assert_eq!(gate, AudioGate::Unlocked);
    assert!(!gate.on_gesture());
    assert!(gate.is_available());
}

#[test]
fn unavailable_audio_never_unlocks() {
    let mut gate = AudioGate::Unavailable;
    assert!(!gate.on_gesture());
    assert!(!gate.on_gesture());
    assert_eq!(gate, AudioGate::Unavailable);
    assert!(!gate.is_available());
}
