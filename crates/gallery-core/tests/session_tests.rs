// Session frame stepping and the asset completion queue.

use gallery_core::catalog::{catalog, place};
use gallery_core::audio::AudioGate;
use gallery_core::interaction::ClickTarget;
use gallery_core::{
    CameraState, CompletionQueue, DeviceProfile, GalleryConfig, InteractionPhase, SessionState,
    UiCommand,
};

fn session(profile: DeviceProfile) -> SessionState {
    let mut s = SessionState::new(profile, GalleryConfig::for_profile(profile));
    s.attach_scene(place(catalog()).unwrap(), 16.0 / 9.0);
    s
}

fn load_all(s: &mut SessionState) {
    for i in 0..6 {
        assert!(s.mark_loaded(i).is_some());
    }
}

/// Two units in front of the third painting, looking straight at it.
fn face_third_painting(s: &mut SessionState) {
    let p = s.painting(2).unwrap().clone();
    let cam = s.camera.as_mut().unwrap();
    cam.position = p.position + p.normal() * 2.0;
    cam.look_at(p.position);
}

#[test]
fn queue_drains_in_push_order_and_is_shared_by_clones() {
    let q: CompletionQueue<u32> = CompletionQueue::default();
    let producer = q.clone();
    producer.push(1);
    producer.push(2);
    assert!(!q.is_empty());
    assert_eq!(q.drain(), vec![1, 2]);
    assert!(q.is_empty());
    assert!(q.drain().is_empty());
}

#[test]
fn frame_without_camera_is_a_no_op() {
    let profile = DeviceProfile::MOBILE;
    let mut s = SessionState::new(profile, GalleryConfig::for_profile(profile));
    let mut out = Vec::new();
    let outcome = s.frame(0.0, &mut out);
    assert!(!outcome.moved && !outcome.fov_changed);
    assert!(out.is_empty());
    assert!(s.camera.is_none());
}

#[test]
fn loads_are_append_only_and_deduplicated() {
    let mut s = session(DeviceProfile::DESKTOP);
    assert!(s.mark_loaded(4).is_some());
    assert!(s.mark_loaded(1).is_some());
    assert!(s.mark_loaded(4).is_none());
    assert!(s.mark_loaded(42).is_none());
    assert_eq!(s.loaded_indices(), &[4, 1]);
    let ids: Vec<_> = s.loaded_paintings().map(|p| p.index).collect();
    assert_eq!(ids, [1, 4]);
}

#[test]
fn start_pose_sees_no_painting() {
    let mut s = session(DeviceProfile::MOBILE);
    load_all(&mut s);
    let mut out = Vec::new();
    s.frame(0.0, &mut out);
    assert_eq!(s.interaction.phase(), InteractionPhase::Idle);
    assert_eq!(s.interaction.centered(), None);
    assert!(out.is_empty());
}

#[test]
fn facing_the_third_slot_centers_its_painting() {
    let mut s = session(DeviceProfile::MOBILE);
    load_all(&mut s);
    face_third_painting(&mut s);
    let mut out = Vec::new();
    s.frame(0.0, &mut out);
    assert_eq!(
        s.interaction.phase(),
        InteractionPhase::Centered { painting: 2 }
    );
}

#[test]
fn unloaded_paintings_are_invisible_to_the_raycast() {
    let mut s = session(DeviceProfile::MOBILE);
    s.mark_loaded(0);
    face_third_painting(&mut s);
    let mut out = Vec::new();
    s.frame(0.0, &mut out);
    assert_eq!(s.interaction.phase(), InteractionPhase::Idle);

    s.mark_loaded(2);
    s.frame(16.0, &mut out);
    assert_eq!(s.interaction.centered(), Some(2));
}

#[test]
fn desktop_raycasts_only_while_locked() {
    let mut s = session(DeviceProfile::DESKTOP);
    load_all(&mut s);
    face_third_painting(&mut s);
    let mut out = Vec::new();
    s.frame(0.0, &mut out);
    assert_eq!(s.interaction.phase(), InteractionPhase::Idle);

    s.navigator.desktop_mut().unwrap().set_locked(true);
    s.frame(16.0, &mut out);
    assert_eq!(out, [UiCommand::ShowPanel(2), UiCommand::FadeMusicOut]);
    s.apply_music_commands(&out, 16.0);
    assert_eq!(s.fader.target(), 0.0);
}

#[test]
fn popup_freezes_desktop_movement() {
    let mut s = session(DeviceProfile::DESKTOP);
    load_all(&mut s);
    face_third_painting(&mut s);
    let desk = s.navigator.desktop_mut().unwrap();
    desk.set_locked(true);
    desk.key_down("KeyS");
    let mut out = Vec::new();
    assert!(s.frame(0.0, &mut out).moved);

    s.interaction.click(true, ClickTarget::Background, &mut out);
    assert!(s.interaction.popup_open());
    let before = s.camera.as_ref().map(|c| c.position);
    assert!(!s.frame(16.0, &mut out).moved);
    assert_eq!(s.camera.as_ref().map(|c| c.position), before);
}

#[test]
fn fov_eases_towards_target_each_frame() {
    let mut s = session(DeviceProfile::MOBILE);
    s.camera.as_mut().unwrap().target_fov_deg = 40.0;
    let mut out = Vec::new();
    assert!(s.frame(0.0, &mut out).fov_changed);
    let fov = s.camera.as_ref().map(|c: &CameraState| c.fov_deg).unwrap();
    assert!(fov < 75.0 && fov > 40.0);
}

#[test]
fn frame_reports_music_fade_progress() {
    let mut s = session(DeviceProfile::MOBILE);
    s.fader.fade_in(0.0);
    let mut out = Vec::new();
    let v = s.frame(500.0, &mut out).music_volume.unwrap();
    assert!((v - 0.15).abs() < 1e-5);
}

#[test]
fn first_gesture_fades_music_in_once() {
    let mut s = session(DeviceProfile::DESKTOP);
    assert!(s.unlock_audio(0.0));
    assert_eq!(s.fader.target(), 0.3);
    assert!(!s.unlock_audio(100.0));
    let mut out = Vec::new();
    let v = s.frame(500.0, &mut out).music_volume.unwrap();
    assert!((v - 0.15).abs() < 1e-5);
}

#[test]
fn session_without_audio_stays_silent() {
    let mut s = session(DeviceProfile::MOBILE);
    s.audio = AudioGate::Unavailable;
    assert!(!s.unlock_audio(0.0));
    s.apply_music_commands(&[UiCommand::FadeMusicIn], 0.0);
    let mut out = Vec::new();
    assert_eq!(s.frame(2000.0, &mut out).music_volume, None);
    assert_eq!(s.fader.volume(), 0.0);
}
