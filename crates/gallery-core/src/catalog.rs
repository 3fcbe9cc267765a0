//! The six artworks on display and the hand-authored wall slots they hang in.

use std::f32::consts::{FRAC_PI_2, PI};

use fnv::FnvHashSet;
use glam::{Quat, Vec3};

use crate::constants::{PAINTING_CENTER_Y, PAINTING_LIGHT_LIFT, PAINTING_WALL_INSET};
use crate::error::CatalogError;

#[derive(Clone, Debug, PartialEq)]
pub struct PaintingRecord {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub image_src: &'static str,
    /// World units.
    pub width: f32,
    pub height: f32,
}

pub const SLOT_COUNT: usize = 6;

static CATALOG: [PaintingRecord; SLOT_COUNT] = [
    PaintingRecord {
        id: "painting1",
        title: "Eternal Flame",
        description: "A portrait of Swami Vivekananda, standing resolute by the sea, draped in saffron robes. This piece captures his unwavering spirit and timeless message of strength, clarity, and awakening\u{2014}a beacon for seekers across generations.",
        image_src: "assets/paintings/painting1.jpeg",
        width: 3.0,
        height: 4.0,
    },
    PaintingRecord {
        id: "painting2",
        title: "Forest Whispers",
        description: "A romantic ode painted in earthy tones, this artwork captures an intimate moment beneath a tree's quiet canopy. Infused with elegance and mystique, it evokes the timeless rhythm of love and nature entwined in harmony.",
        image_src: "assets/paintings/painting2.jpeg",
        width: 4.0,
        height: 2.5,
    },
    PaintingRecord {
        id: "painting3",
        title: "Silent Anchorage",
        description: "Bathed in dusky hues, this evocative seascape captures a lone boat moored at twilight. With its delicate interplay of light and shadow, the painting speaks of stillness, journeys paused, and the quiet poetry of waiting.",
        image_src: "assets/paintings/painting3.jpeg",
        width: 4.0,
        height: 2.7,
    },
    PaintingRecord {
        id: "painting4",
        title: "Guardians of the Frontier",
        description: "This bold and commanding piece captures three mounted warriors in mid-watch, eyes cast over a distant horizon. With detailed armor, proud steeds, and an air of unwavering vigilance, the painting pays tribute to the strength, unity, and enduring spirit of those who stand guard at the edges of history.",
        image_src: "assets/paintings/painting4.jpeg",
        width: 4.0,
        height: 3.3,
    },
    PaintingRecord {
        id: "painting5",
        title: "Raga of the Flame",
        description: "Immersed in sacred rhythm, this evocative painting portrays a woman lost in the spiritual ecstasy of her music. Surrounded by the warm glow of oil lamps and adorned in traditional attire, she becomes one with the melody\u{2014}an embodiment of devotion, passion, and inner fire.",
        image_src: "assets/paintings/painting5.jpeg",
        width: 3.0,
        height: 4.0,
    },
    PaintingRecord {
        id: "painting6",
        title: "The Silent Buddha",
        description: "A tranquil depiction of the Buddha beneath a radiant full moon, this piece radiates peace and reflection. Surrounded by still waters and silent skies, it invites the viewer into a meditative moment\u{2014}where nature, spirit, and silence become one.",
        image_src: "assets/paintings/painting6.jpeg",
        width: 3.4,
        height: 4.0,
    },
];

pub fn catalog() -> &'static [PaintingRecord] {
    &CATALOG
}

/// A record hung on the wall. Created by [`place`] and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedPainting {
    /// Position of the record in the list given to [`place`].
    pub index: usize,
    pub record: PaintingRecord,
    /// Centre of the canvas.
    pub position: Vec3,
    /// Rotation about +Y applied to a canvas that faces +Z.
    pub rotation_y: f32,
}

impl PlacedPainting {
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.rotation_y)
    }

    /// Direction the visible face points towards.
    pub fn normal(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    /// Canvas-local +X in world space.
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// Where the warm accent light hangs: above the top edge, aimed at the centre.
    pub fn light_position(&self) -> Vec3 {
        self.position + Vec3::Y * (self.record.height * 0.5 + PAINTING_LIGHT_LIFT)
    }
}

/// Wall slot for the n-th record: centre and facing angle. The offsets push
/// each canvas half its width away from the adjoining wall plus a small inset.
pub fn slot_transform(slot: usize, width: f32) -> Option<(Vec3, f32)> {
    let y = PAINTING_CENTER_Y;
    let half = width * 0.5;
    let eps = PAINTING_WALL_INSET;
    let t = match slot {
        0 => (Vec3::new(-12.0 + half + eps, y, 2.5), PI),
        1 => (Vec3::new(-21.0 + half + eps, y, -15.0), FRAC_PI_2),
        2 => (Vec3::new(-8.0, y, -26.5 + half + eps), 0.0),
        3 => (Vec3::new(8.0, y, -26.5 + half + eps), 0.0),
        4 => (Vec3::new(21.0 - half - eps, y, -15.0), -FRAC_PI_2),
        5 => (Vec3::new(12.0 - half - eps, y, 2.5), -PI),
        _ => return None,
    };
    Some(t)
}

pub fn validate(records: &[PaintingRecord]) -> Result<(), CatalogError> {
    let mut seen = FnvHashSet::default();
    for r in records {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if !ok(r.width) || !ok(r.height) {
            return Err(CatalogError::InvalidSize {
                id: r.id.to_string(),
                width: r.width,
                height: r.height,
            });
        }
        if !seen.insert(r.id) {
            return Err(CatalogError::DuplicateId(r.id.to_string()));
        }
    }
    Ok(())
}

/// Assign wall slots in order. Records beyond the sixth have no slot and are
/// left out.
pub fn place(records: &[PaintingRecord]) -> Result<Vec<PlacedPainting>, CatalogError> {
    validate(records)?;
    if records.len() > SLOT_COUNT {
        log::warn!(
            "[catalog] {} records but only {} wall slots; extra records are not hung",
            records.len(),
            SLOT_COUNT
        );
    }
    Ok(records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            slot_transform(index, record.width).map(|(position, rotation_y)| PlacedPainting {
                index,
                record: record.clone(),
                position,
                rotation_y,
            })
        })
        .collect())
}
