// Painting catalog contents and wall placement.

use std::f32::consts::{FRAC_PI_2, PI};

use gallery_core::catalog::{catalog, place, slot_transform, PaintingRecord, SLOT_COUNT};
use gallery_core::CatalogError;
use glam::Vec3;

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn catalog_lists_six_paintings_in_order() {
    let titles: Vec<_> = catalog().iter().map(|r| r.title).collect();
    assert_eq!(
        titles,
        [
            "Eternal Flame",
            "Forest Whispers",
            "Silent Anchorage",
            "Guardians of the Frontier",
            "Raga of the Flame",
            "The Silent Buddha",
        ]
    );
    for (i, r) in catalog().iter().enumerate() {
        assert_eq!(r.id, format!("painting{}", i + 1));
        assert_eq!(r.image_src, format!("assets/paintings/painting{}.jpeg", i + 1));
        assert!(r.width > 0.0 && r.height > 0.0);
        assert!(!r.description.is_empty());
    }
}

#[test]
fn placement_follows_the_wall_slots() {
    let placed = place(catalog()).unwrap();
    assert_eq!(placed.len(), SLOT_COUNT);

    let expected = [
        (Vec3::new(-12.0 + 1.5 + 0.01, 2.5, 2.5), PI),
        (Vec3::new(-21.0 + 2.0 + 0.01, 2.5, -15.0), FRAC_PI_2),
        (Vec3::new(-8.0, 2.5, -26.5 + 2.0 + 0.01), 0.0),
        (Vec3::new(8.0, 2.5, -26.5 + 2.0 + 0.01), 0.0),
        (Vec3::new(21.0 - 1.5 - 0.01, 2.5, -15.0), -FRAC_PI_2),
        (Vec3::new(12.0 - 1.7 - 0.01, 2.5, 2.5), -PI),
    ];
    for (p, (pos, rot)) in placed.iter().zip(expected) {
        assert!(approx_vec(p.position, pos), "{}: {:?}", p.record.id, p.position);
        assert_eq!(p.rotation_y, rot);
    }
}

#[test]
fn third_painting_faces_into_the_back_hall() {
    let placed = place(catalog()).unwrap();
    let p = &placed[2];
    assert_eq!(p.index, 2);
    assert!(approx_vec(p.position, Vec3::new(-8.0, 2.5, -24.49)));
    assert!(approx_vec(p.normal(), Vec3::Z));
}

#[test]
fn side_wall_paintings_face_the_corridor() {
    let placed = place(catalog()).unwrap();
    assert!(approx_vec(placed[1].normal(), Vec3::X));
    assert!(approx_vec(placed[4].normal(), Vec3::NEG_X));
    assert!(approx_vec(placed[0].normal(), Vec3::NEG_Z));
}

#[test]
fn records_beyond_the_sixth_are_not_hung() {
    let mut records = catalog().to_vec();
    records.push(PaintingRecord {
        id: "painting7",
        title: "Extra",
        description: "",
        image_src: "assets/paintings/painting7.jpeg",
        width: 2.0,
        height: 2.0,
    });
    let placed = place(&records).unwrap();
    assert_eq!(placed.len(), 6);
    assert!(placed.iter().all(|p| p.index < 6));
    assert_eq!(slot_transform(6, 2.0), None);
}

#[test]
fn degenerate_sizes_are_rejected() {
    let mut records = catalog().to_vec();
    records[3].height = 0.0;
    assert_eq!(
        place(&records),
        Err(CatalogError::InvalidSize {
            id: "painting4".into(),
            width: 4.0,
            height: 0.0,
        })
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut records = catalog().to_vec();
    records[5].id = "painting1";
    assert_eq!(
        place(&records),
        Err(CatalogError::DuplicateId("painting1".into()))
    );
}

#[test]
fn accent_light_hangs_above_the_canvas() {
    let placed = place(catalog()).unwrap();
    let p = &placed[1];
    let l = p.light_position();
    assert!(approx_vec(l, p.position + Vec3::new(0.0, 2.5 / 2.0 + 0.3, 0.0)));
}
