// Gaze raycast and the panel/popup state machine.

use gallery_core::catalog::{catalog, place, PlacedPainting};
use gallery_core::config::InteractionConfig;
use gallery_core::interaction::{
    cast, nearest_hit, ray_painting, ClickTarget, InteractionState, RayHit,
};
use gallery_core::{ControlVariant, InteractionPhase, Notice, UiCommand};
use glam::Vec3;

fn placed() -> Vec<PlacedPainting> {
    place(catalog()).unwrap()
}

fn hit(painting: usize, distance: f32) -> Option<RayHit> {
    Some(RayHit { painting, distance })
}

fn desktop() -> InteractionState {
    InteractionState::new(InteractionConfig::for_variant(ControlVariant::Desktop))
}

fn mobile() -> InteractionState {
    InteractionState::new(InteractionConfig::for_variant(ControlVariant::Touch))
}

/// A spot two units in front of painting `i`.
fn in_front_of(paintings: &[PlacedPainting], i: usize) -> Vec3 {
    paintings[i].position + paintings[i].normal() * 2.0
}

#[test]
fn ray_hits_the_front_face_only() {
    let paintings = placed();
    let p = &paintings[2];
    let origin = in_front_of(&paintings, 2);
    let d = ray_painting(origin, -p.normal(), p).unwrap();
    assert!((d - 2.0).abs() < 1e-4);

    let behind = p.position - p.normal() * 2.0;
    assert_eq!(ray_painting(behind, p.normal(), p), None);
}

#[test]
fn ray_outside_the_canvas_misses() {
    let paintings = placed();
    let p = &paintings[2];
    // 4 wide: x in [-10, -6]
    let origin = Vec3::new(-5.9, 2.5, -20.0);
    assert_eq!(ray_painting(origin, Vec3::NEG_Z, p), None);
    let origin = Vec3::new(-8.0, 2.5 + 1.36, -20.0);
    assert_eq!(ray_painting(origin, Vec3::NEG_Z, p), None);
    let origin = Vec3::new(-6.1, 2.5 + 1.3, -20.0);
    assert!(ray_painting(origin, Vec3::NEG_Z, p).is_some());
}

#[test]
fn nearest_hit_wins_over_occluded_paintings() {
    let paintings = placed();
    let mut front = paintings[2].clone();
    front.index = 9;
    front.position.z += 3.0;
    let both = [paintings[2].clone(), front];
    let origin = Vec3::new(-8.0, 2.5, -15.0);
    let hits = cast(origin, Vec3::NEG_Z, both.iter());
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].painting, 9);
    assert!(hits[0].distance < hits[1].distance);
    assert_eq!(nearest_hit(origin, Vec3::NEG_Z, both.iter()).map(|h| h.painting), Some(9));
}

#[test]
fn zero_direction_hits_nothing() {
    let paintings = placed();
    assert!(cast(Vec3::ZERO, Vec3::ZERO, paintings.iter()).is_empty());
}

#[test]
fn centered_iff_hit_is_closer_than_threshold() {
    let paintings = placed();
    let mut s = mobile();
    let mut out = Vec::new();
    let cam = in_front_of(&paintings, 2);

    s.update(hit(2, 14.9), cam, &paintings, 0.0, &mut out);
    assert_eq!(s.phase(), InteractionPhase::Centered { painting: 2 });
    s.update(hit(2, 15.0), cam, &paintings, 0.0, &mut out);
    assert_eq!(s.phase(), InteractionPhase::Idle);
    s.update(None, cam, &paintings, 0.0, &mut out);
    assert_eq!(s.phase(), InteractionPhase::Idle);
    assert!(out.is_empty());
}

#[test]
fn desktop_panel_follows_the_gaze_and_ducks_music() {
    let paintings = placed();
    let cam = in_front_of(&paintings, 2);
    let mut s = desktop();
    let mut out = Vec::new();

    s.update(hit(2, 5.0), cam, &paintings, 0.0, &mut out);
    assert_eq!(out, [UiCommand::ShowPanel(2), UiCommand::FadeMusicOut]);
    assert!(s.panel_open());

    out.clear();
    s.update(hit(3, 4.0), cam, &paintings, 16.0, &mut out);
    assert_eq!(out, [UiCommand::ShowPanel(3)]);

    out.clear();
    s.update(hit(3, 10.0), cam, &paintings, 32.0, &mut out);
    assert_eq!(out, [UiCommand::HidePanel, UiCommand::FadeMusicIn]);
    assert_eq!(s.phase(), InteractionPhase::Idle);
}

#[test]
fn desktop_click_opens_popup_and_second_click_closes() {
    let paintings = placed();
    let cam = in_front_of(&paintings, 2);
    let mut s = desktop();
    let mut out = Vec::new();
    s.update(hit(2, 5.0), cam, &paintings, 0.0, &mut out);

    out.clear();
    s.click(true, ClickTarget::Background, &mut out);
    assert_eq!(
        out,
        [
            UiCommand::HidePanel,
            UiCommand::ShowPopup(2),
            UiCommand::ReleasePointer
        ]
    );
    assert!(s.popup_open());
    assert!(s.navigation_suspended());

    out.clear();
    s.click(false, ClickTarget::Background, &mut out);
    assert_eq!(
        out,
        [
            UiCommand::HidePanel,
            UiCommand::HidePopup,
            UiCommand::RequestPointer,
            UiCommand::FadeMusicIn
        ]
    );
    assert_eq!(s.phase(), InteractionPhase::Idle);
}

#[test]
fn clicking_the_popup_image_keeps_it_open() {
    let paintings = placed();
    let mut s = desktop();
    let mut out = Vec::new();
    s.update(hit(2, 5.0), in_front_of(&paintings, 2), &paintings, 0.0, &mut out);
    s.click(true, ClickTarget::Background, &mut out);
    assert!(s.popup_open());

    out.clear();
    s.click(false, ClickTarget::PopupImage, &mut out);
    assert!(out.is_empty());
    assert!(s.popup_open());

    s.click(false, ClickTarget::Background, &mut out);
    assert_eq!(s.phase(), InteractionPhase::Idle);
}

#[test]
fn desktop_click_without_lock_or_target_does_nothing() {
    let paintings = placed();
    let mut s = desktop();
    let mut out = Vec::new();
    s.click(true, ClickTarget::Background, &mut out);
    assert!(out.is_empty());

    s.update(hit(2, 5.0), in_front_of(&paintings, 2), &paintings, 0.0, &mut out);
    out.clear();
    s.click(false, ClickTarget::Background, &mut out);
    assert!(out.is_empty());
    assert!(s.panel_open());
}

#[test]
fn pointer_lock_hides_open_overlays() {
    let paintings = placed();
    let mut s = desktop();
    let mut out = Vec::new();
    s.update(hit(2, 5.0), in_front_of(&paintings, 2), &paintings, 0.0, &mut out);
    out.clear();
    s.on_pointer_locked(&mut out);
    assert_eq!(
        out,
        [
            UiCommand::HidePanel,
            UiCommand::HidePopup,
            UiCommand::FadeMusicIn
        ]
    );
    assert_eq!(s.phase(), InteractionPhase::Idle);
}

#[test]
fn mobile_info_tap_opens_panel_then_dwell_opens_popup() {
    let paintings = placed();
    let cam = in_front_of(&paintings, 2);
    let mut s = mobile();
    let mut out = Vec::new();
    s.update(hit(2, 2.0), cam, &paintings, 0.0, &mut out);
    assert!(out.is_empty());

    s.request_info(100.0, &mut out);
    assert_eq!(out, [UiCommand::ShowPanel(2), UiCommand::FadeMusicOut]);

    out.clear();
    s.update(hit(2, 2.0), cam, &paintings, 3099.0, &mut out);
    assert!(out.is_empty());
    assert!(s.panel_open());

    s.update(hit(2, 2.0), cam, &paintings, 3100.0, &mut out);
    assert_eq!(out, [UiCommand::HidePanel, UiCommand::ShowPopup(2)]);
    assert!(s.popup_open());
    // walking away must stay possible on touch devices
    assert!(!s.navigation_suspended());
}

#[test]
fn mobile_tap_on_panel_skips_the_dwell() {
    let paintings = placed();
    let cam = in_front_of(&paintings, 2);
    let mut s = mobile();
    let mut out = Vec::new();
    s.update(hit(2, 2.0), cam, &paintings, 0.0, &mut out);
    s.request_info(0.0, &mut out);
    out.clear();
    s.tap_panel(&mut out);
    assert_eq!(out, [UiCommand::HidePanel, UiCommand::ShowPopup(2)]);
}

#[test]
fn mobile_info_tap_explains_missing_target() {
    let paintings = placed();
    let cam = Vec3::ZERO;
    let mut s = mobile();
    let mut out = Vec::new();

    s.update(hit(1, 30.0), cam, &paintings, 0.0, &mut out);
    s.request_info(0.0, &mut out);
    assert_eq!(out, [UiCommand::Notice(Notice::MoveCloser)]);

    out.clear();
    s.update(None, cam, &paintings, 0.0, &mut out);
    s.request_info(0.0, &mut out);
    assert_eq!(out, [UiCommand::Notice(Notice::NothingInView)]);
    assert_eq!(s.phase(), InteractionPhase::Idle);
}

#[test]
fn mobile_auto_closes_beyond_twenty_units() {
    let paintings = placed();
    let target = paintings[2].position;
    let mut s = mobile();
    let mut out = Vec::new();
    s.update(hit(2, 2.0), in_front_of(&paintings, 2), &paintings, 0.0, &mut out);
    s.request_info(0.0, &mut out);
    out.clear();
    s.update(None, target + Vec3::Z * 19.9, &paintings, 10.0, &mut out);
    assert!(out.is_empty());
    s.update(None, target + Vec3::Z * 20.1, &paintings, 20.0, &mut out);
    assert_eq!(
        out,
        [
            UiCommand::HidePanel,
            UiCommand::HidePopup,
            UiCommand::Notice(Notice::MovedAway),
            UiCommand::FadeMusicIn
        ]
    );
    assert_eq!(s.phase(), InteractionPhase::Idle);
}

#[test]
fn explicit_close_returns_to_idle() {
    let paintings = placed();
    let mut s = mobile();
    let mut out = Vec::new();
    s.update(hit(2, 2.0), in_front_of(&paintings, 2), &paintings, 0.0, &mut out);
    s.request_info(0.0, &mut out);
    s.tap_panel(&mut out);
    out.clear();
    s.close(&mut out);
    assert_eq!(
        out,
        [
            UiCommand::HidePanel,
            UiCommand::HidePopup,
            UiCommand::FadeMusicIn
        ]
    );
    assert_eq!(s.phase(), InteractionPhase::Idle);
}
