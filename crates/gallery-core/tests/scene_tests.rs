// Static scene description.

use gallery_core::constants::MAX_SPOT_LIGHTS;
use gallery_core::scene::{
    build, painting_primitive, painting_spotlight, validate_primitive, validate_spot, Primitive,
    Shading, Shape, TextureSlot,
};
use gallery_core::SceneError;
use glam::Vec3;

fn find<'a>(prims: &'a [Primitive], label: &str) -> &'a Primitive {
    prims
        .iter()
        .find(|p| p.label == label)
        .unwrap_or_else(|| panic!("missing primitive {label}"))
}

#[test]
fn desktop_scene_has_room_walls_lights_and_anchors() {
    let scene = build(false).unwrap();
    // floor, ceiling, couch, 5 steps, welcome sign, 10 walls
    assert_eq!(scene.primitives.len(), 19);
    assert_eq!(scene.spots.len(), 6);
    assert!(scene.spots.len() + scene.paintings.len() <= MAX_SPOT_LIGHTS);
    assert_eq!(scene.paintings.len(), 6);

    let names: Vec<_> = scene.audio_anchors.iter().map(|a| a.name).collect();
    assert_eq!(names, ["entrance", "left-wing", "right-wing", "back-area"]);
    for a in &scene.audio_anchors {
        assert_eq!(a.ref_distance, 5.0);
        assert_eq!(a.volume, 0.2);
        assert!(a.src.starts_with("assets/audio/") && a.src.ends_with("-ambience.mp3"));
    }
    assert_eq!(scene.music_src, "assets/audio/ethereal-bg.mp3");
    assert_eq!(scene.fog.near, 0.0);
    assert_eq!(scene.fog.far, 75.0);
    assert_eq!(scene.fog.color, scene.background);
}

#[test]
fn quality_depends_on_device() {
    let desktop = build(false).unwrap();
    assert_eq!(desktop.quality.msaa_samples, 4);
    assert!(desktop.quality.shadows && desktop.directional.cast_shadow);
    assert!(desktop.quality.painting_lights);

    let mobile = build(true).unwrap();
    assert_eq!(mobile.quality.msaa_samples, 1);
    assert!(!mobile.quality.shadows && !mobile.directional.cast_shadow);
    assert!(!mobile.quality.high_performance);
    assert!(!mobile.quality.painting_lights);
}

#[test]
fn builds_are_independent_values() {
    let mut a = build(false).unwrap();
    let b = build(false).unwrap();
    a.primitives.clear();
    assert_eq!(b.primitives.len(), 19);
}

#[test]
fn steps_climb_towards_the_entrance() {
    let scene = build(false).unwrap();
    for i in 0..5 {
        let s = find(&scene.primitives, &format!("step-{i}"));
        let fi = i as f32;
        assert!((s.position - Vec3::new(0.0, 0.1 + 0.2 * fi, 5.0 - 0.5 * fi)).length() < 1e-6);
        assert_eq!(
            s.shape,
            Shape::Cuboid {
                size: Vec3::new(6.0, 0.2, 0.5)
            }
        );
    }
}

#[test]
fn floor_faces_up_and_sign_is_unlit() {
    let scene = build(false).unwrap();
    let floor = find(&scene.primitives, "floor");
    assert!((floor.rotation * Vec3::Z - Vec3::Y).length() < 1e-6);
    assert!(floor.double_sided);

    let sign = find(&scene.primitives, "welcome-sign");
    assert_eq!(sign.texture, TextureSlot::WelcomeSign);
    assert_eq!(sign.shading, Shading::Unlit);
    assert_eq!(sign.position, Vec3::new(0.0, 4.0, 2.5));
}

#[test]
fn walls_are_black_and_full_height() {
    let scene = build(false).unwrap();
    let back = find(&scene.primitives, "back-display");
    assert_eq!(back.color, [0.0, 0.0, 0.0]);
    assert_eq!(
        back.shape,
        Shape::Cuboid {
            size: Vec3::new(40.0, 6.0, 0.2)
        }
    );
    assert_eq!(back.position, Vec3::new(0.0, 3.0, -25.0));
}

#[test]
fn painting_primitive_is_textured_and_unlit() {
    let scene = build(false).unwrap();
    let p = &scene.paintings[3];
    let prim = painting_primitive(p);
    assert_eq!(prim.texture, TextureSlot::Painting(3));
    assert_eq!(prim.shading, Shading::Unlit);
    assert_eq!(
        prim.shape,
        Shape::Plane {
            width: 4.0,
            height: 3.3
        }
    );
    assert!(validate_primitive(&prim).is_ok());
}

#[test]
fn painting_spotlight_points_down_at_the_canvas() {
    let scene = build(false).unwrap();
    let light = painting_spotlight(&scene.paintings[0]);
    assert!((light.direction() - Vec3::NEG_Y).length() < 1e-6);
    assert_eq!(light.range, 5.0);
    assert_eq!(light.decay, 1.2);
    assert!(validate_spot(&light).is_ok());
}

#[test]
fn invalid_geometry_is_reported_with_its_label() {
    let mut prim = painting_primitive(&build(false).unwrap().paintings[0]);
    prim.shape = Shape::Plane {
        width: 0.0,
        height: 4.0,
    };
    assert_eq!(
        validate_primitive(&prim),
        Err(SceneError::DegenerateGeometry {
            label: "painting:painting1".into(),
            dims: [0.0, 4.0, 1.0],
        })
    );

    prim.shape = Shape::Plane {
        width: 3.0,
        height: 4.0,
    };
    prim.position.x = f32::NAN;
    assert!(matches!(
        validate_primitive(&prim),
        Err(SceneError::InvalidTransform { .. })
    ));
}

#[test]
fn invalid_spot_is_rejected() {
    let mut light = painting_spotlight(&build(false).unwrap().paintings[0]);
    light.angle = 0.0;
    assert!(matches!(
        validate_spot(&light),
        Err(SceneError::InvalidLight { .. })
    ));
}
