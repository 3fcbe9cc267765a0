//! Declarative description of the gallery world.
//!
//! `build` is pure: it returns plain data (primitives, lights, fog, audio
//! anchors) that the renderer and the audio director turn into GPU and
//! WebAudio resources. Paintings are not part of the static primitive list;
//! they are added one by one as their images finish loading.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6, PI};

use glam::{Mat4, Quat, Vec3};

use crate::catalog::{self, PlacedPainting};
use crate::constants::*;
use crate::error::SceneError;

pub const WELCOME_LINES: [&str; 2] = ["Welcome to Mom's", "Art Gallery"];
pub const WELCOME_CANVAS_PX: (u32, u32) = (512, 128);
pub const MUSIC_SRC: &str = "assets/audio/ethereal-bg.mp3";

/// sRGB hex colour to linear RGB, the space lighting is computed in.
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    let [r, g, b] = hex_to_srgb(hex);
    [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b)]
}

pub fn hex_to_srgb(hex: u32) -> [f32; 3] {
    let c = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [c(16), c(8), c(0)]
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Unit meshes scaled by the model matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned box centred on the origin.
    Cuboid { size: Vec3 },
    /// Quad in the XY plane facing +Z.
    Plane { width: f32, height: f32 },
}

impl Shape {
    pub fn scale(&self) -> Vec3 {
        match *self {
            Shape::Cuboid { size } => size,
            Shape::Plane { width, height } => Vec3::new(width, height, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureSlot {
    None,
    WelcomeSign,
    Painting(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shading {
    /// Diffuse response to ambient, directional and spot lights.
    Lit,
    /// Colour or texture shown as-is (fog still applies).
    Unlit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub label: String,
    pub shape: Shape,
    pub position: Vec3,
    pub rotation: Quat,
    /// Linear RGB, multiplied with the texture when one is bound.
    pub color: [f32; 3],
    pub texture: TextureSlot,
    pub shading: Shading,
    pub double_sided: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Primitive {
    fn solid(label: &str, shape: Shape, position: Vec3, hex: u32) -> Self {
        Self {
            label: label.to_string(),
            shape,
            position,
            rotation: Quat::IDENTITY,
            color: hex_to_linear(hex),
            texture: TextureSlot::None,
            shading: Shading::Lit,
            double_sided: false,
            cast_shadow: true,
            receive_shadow: true,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.shape.scale(), self.rotation, self.position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub target: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
    pub cast_shadow: bool,
}

impl DirectionalLight {
    /// Unit vector from the lit surface towards the light.
    pub fn to_light(&self) -> Vec3 {
        (self.position - self.target).normalize_or_zero()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpotLight {
    pub label: String,
    pub position: Vec3,
    pub target: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
    /// Cut-off distance; zero means unbounded.
    pub range: f32,
    /// Half-angle of the cone, radians.
    pub angle: f32,
    /// Fraction of the cone over which the edge softens, 0..=1.
    pub penumbra: f32,
    pub decay: f32,
}

impl SpotLight {
    fn area(label: &str, position: Vec3, angle: f32) -> Self {
        Self {
            label: label.to_string(),
            position,
            // spotlights without an explicit target aim at the world origin
            target: Vec3::ZERO,
            color: hex_to_linear(0xffffff),
            intensity: 1.0,
            range: 0.0,
            angle,
            penumbra: 0.2,
            decay: 2.0,
        }
    }

    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Cosines of the outer cone edge and of where the penumbra begins.
    pub fn cone_cosines(&self) -> (f32, f32) {
        let outer = self.angle.cos();
        let inner = (self.angle * (1.0 - self.penumbra)).cos();
        (outer, inner)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AudioAnchor {
    pub name: &'static str,
    pub src: &'static str,
    pub position: Vec3,
    pub ref_distance: f32,
    pub volume: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: [f32; 3],
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderQuality {
    pub msaa_samples: u32,
    pub shadows: bool,
    pub high_performance: bool,
    /// Warm accent light per painting.
    pub painting_lights: bool,
}

impl RenderQuality {
    pub fn for_device(mobile: bool) -> Self {
        if mobile {
            Self {
                msaa_samples: 1,
                shadows: false,
                high_performance: false,
                painting_lights: false,
            }
        } else {
            Self {
                msaa_samples: DESKTOP_MSAA_SAMPLES,
                shadows: true,
                high_performance: true,
                painting_lights: true,
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneDesc {
    pub background: [f32; 3],
    pub fog: Fog,
    pub primitives: Vec<Primitive>,
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub spots: Vec<SpotLight>,
    pub audio_anchors: Vec<AudioAnchor>,
    pub music_src: &'static str,
    /// Every catalog record with its wall slot; none are drawn until loaded.
    pub paintings: Vec<PlacedPainting>,
    pub quality: RenderQuality,
}

pub fn build(mobile: bool) -> Result<SceneDesc, SceneError> {
    let quality = RenderQuality::for_device(mobile);
    let mut primitives = Vec::new();
    room(&mut primitives);
    walls(&mut primitives);

    let night = hex_to_linear(NIGHT_LIGHT_HEX);
    let ambient = AmbientLight {
        color: night,
        intensity: 0.6,
    };
    let directional = DirectionalLight {
        position: Vec3::new(10.0, 10.0, 5.0),
        target: Vec3::ZERO,
        color: night,
        intensity: 0.8,
        cast_shadow: quality.shadows,
    };
    let spots = vec![
        SpotLight::area("entrance", Vec3::new(0.0, 4.0, 2.0), FRAC_PI_4),
        SpotLight::area("left-wing-1", Vec3::new(-8.0, 4.0, -6.0), FRAC_PI_6),
        SpotLight::area("left-wing-2", Vec3::new(-15.0, 4.0, -10.0), FRAC_PI_6),
        SpotLight::area("right-wing-1", Vec3::new(8.0, 4.0, -6.0), FRAC_PI_6),
        SpotLight::area("right-wing-2", Vec3::new(15.0, 4.0, -10.0), FRAC_PI_6),
        SpotLight::area("back-area", Vec3::new(0.0, 4.0, -16.0), PI / 5.0),
    ];

    for p in &primitives {
        validate_primitive(p)?;
    }
    for s in &spots {
        validate_spot(s)?;
    }
    let paintings = catalog::place(catalog::catalog())?;

    let sky = hex_to_linear(SKY_COLOR_HEX);
    Ok(SceneDesc {
        background: sky,
        fog: Fog {
            color: sky,
            near: FOG_NEAR,
            far: FOG_FAR,
        },
        primitives,
        ambient,
        directional,
        spots,
        audio_anchors: audio_anchors(),
        music_src: MUSIC_SRC,
        paintings,
        quality,
    })
}

fn room(out: &mut Vec<Primitive>) {
    let mut floor = Primitive::solid(
        "floor",
        Shape::Plane {
            width: 70.0,
            height: 70.0,
        },
        Vec3::ZERO,
        0x808080,
    );
    floor.rotation = Quat::from_rotation_x(-FRAC_PI_2);
    floor.double_sided = true;
    floor.cast_shadow = false;
    out.push(floor);

    let mut ceiling = Primitive::solid(
        "ceiling",
        Shape::Plane {
            width: 50.0,
            height: 50.0,
        },
        Vec3::new(0.0, WALL_HEIGHT, 0.0),
        0x000000,
    );
    ceiling.rotation = Quat::from_rotation_x(FRAC_PI_2);
    ceiling.double_sided = true;
    ceiling.cast_shadow = false;
    out.push(ceiling);

    out.push(Primitive::solid(
        "couch",
        Shape::Cuboid {
            size: Vec3::new(3.0, 0.5, 1.2),
        },
        Vec3::new(0.0, 0.5, 0.0),
        0x222222,
    ));

    for i in 0..5 {
        let fi = i as f32;
        out.push(Primitive::solid(
            &format!("step-{i}"),
            Shape::Cuboid {
                size: Vec3::new(6.0, 0.2, 0.5),
            },
            Vec3::new(0.0, 0.1 + 0.2 * fi, 5.0 - 0.5 * fi),
            0xffffff,
        ));
    }

    out.push(Primitive {
        texture: TextureSlot::WelcomeSign,
        shading: Shading::Unlit,
        cast_shadow: false,
        receive_shadow: false,
        ..Primitive::solid(
            "welcome-sign",
            Shape::Plane {
                width: 4.0,
                height: 1.0,
            },
            Vec3::new(0.0, 4.0, 2.5),
            0xffffff,
        )
    });
}

fn walls(out: &mut Vec<Primitive>) {
    let h = WALL_HEIGHT;
    let t = WALL_THICKNESS;
    let y = h * 0.5;
    // (label, size, centre)
    let layout: [(&str, Vec3, Vec3); 10] = [
        ("entrance-left", Vec3::new(15.0, h, t), Vec3::new(-10.5, y, 3.0)),
        ("entrance-right", Vec3::new(15.0, h, t), Vec3::new(10.5, y, 3.0)),
        ("central-back-left", Vec3::new(8.0, h, t), Vec3::new(-6.0, y, -5.0)),
        ("central-back-right", Vec3::new(8.0, h, t), Vec3::new(6.0, y, -5.0)),
        ("left-corridor", Vec3::new(t, h, 28.0), Vec3::new(-20.0, y, -11.0)),
        ("right-corridor", Vec3::new(t, h, 28.0), Vec3::new(20.0, y, -11.0)),
        ("back-display", Vec3::new(40.0, h, t), Vec3::new(0.0, y, -25.0)),
        ("left-inner", Vec3::new(t, h, 15.0), Vec3::new(-12.0, y, -15.0)),
        ("right-inner", Vec3::new(t, h, 10.0), Vec3::new(12.0, y, -15.0)),
        ("back-inner", Vec3::new(15.0, h, t), Vec3::new(0.0, y, -20.0)),
    ];
    for (label, size, centre) in layout {
        out.push(Primitive::solid(
            label,
            Shape::Cuboid { size },
            centre,
            0x000000,
        ));
    }
}

fn audio_anchors() -> Vec<AudioAnchor> {
    let anchor = |name: &'static str, src: &'static str, position: Vec3| AudioAnchor {
        name,
        src,
        position,
        ref_distance: AMBIENT_REF_DISTANCE,
        volume: AMBIENT_VOLUME,
    };
    vec![
        anchor(
            "entrance",
            "assets/audio/entrance-ambience.mp3",
            Vec3::new(0.0, 2.0, 2.0),
        ),
        anchor(
            "left-wing",
            "assets/audio/left-wing-ambience.mp3",
            Vec3::new(-10.0, 2.0, -10.0),
        ),
        anchor(
            "right-wing",
            "assets/audio/right-wing-ambience.mp3",
            Vec3::new(10.0, 2.0, -10.0),
        ),
        anchor(
            "back-area",
            "assets/audio/back-area-ambience.mp3",
            Vec3::new(0.0, 2.0, -18.0),
        ),
    ]
}

/// Textured, unlit canvas for a painting whose image has loaded.
pub fn painting_primitive(painting: &PlacedPainting) -> Primitive {
    Primitive {
        label: format!("painting:{}", painting.record.id),
        shape: Shape::Plane {
            width: painting.record.width,
            height: painting.record.height,
        },
        position: painting.position,
        rotation: painting.rotation(),
        color: [1.0, 1.0, 1.0],
        texture: TextureSlot::Painting(painting.index),
        shading: Shading::Unlit,
        double_sided: false,
        cast_shadow: false,
        receive_shadow: false,
    }
}

pub fn painting_spotlight(painting: &PlacedPainting) -> SpotLight {
    SpotLight {
        label: format!("light:{}", painting.record.id),
        position: painting.light_position(),
        target: painting.position,
        color: hex_to_linear(PAINTING_LIGHT_HEX),
        intensity: 1.2,
        range: 5.0,
        angle: FRAC_PI_4,
        penumbra: 0.4,
        decay: 1.2,
    }
}

pub fn validate_primitive(p: &Primitive) -> Result<(), SceneError> {
    let dims = match p.shape {
        Shape::Cuboid { size } => size.to_array(),
        Shape::Plane { width, height } => [width, height, 1.0],
    };
    if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
        return Err(SceneError::DegenerateGeometry {
            label: p.label.clone(),
            dims,
        });
    }
    if !p.position.is_finite() || !p.rotation.is_finite() {
        return Err(SceneError::InvalidTransform {
            label: p.label.clone(),
        });
    }
    Ok(())
}

pub fn validate_spot(s: &SpotLight) -> Result<(), SceneError> {
    let ok = s.position.is_finite()
        && s.target.is_finite()
        && s.direction() != Vec3::ZERO
        && s.intensity.is_finite()
        && s.intensity >= 0.0
        && s.range >= 0.0
        && s.angle > 0.0
        && s.angle <= FRAC_PI_2
        && (0.0..=1.0).contains(&s.penumbra);
    if ok {
        Ok(())
    } else {
        Err(SceneError::InvalidLight {
            label: s.label.clone(),
        })
    }
}
