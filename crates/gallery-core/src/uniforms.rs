//! GPU uniform layouts mirrored by `shaders/scene.wgsl`.
//!
//! Everything is packed in `vec4` lanes so the Rust and WGSL layouts agree
//! without explicit padding fields.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::camera::CameraState;
use crate::constants::{MAX_SPOT_LIGHTS, SHADOW_HALF_EXTENT};
use crate::scene::{DirectionalLight, Primitive, SceneDesc, Shading, SpotLight, TextureSlot};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable)]
pub struct SpotUniform {
    /// xyz position, w range (0 = unbounded)
    pub position_range: [f32; 4],
    /// xyz unit direction, w cosine of the outer cone
    pub direction_outer: [f32; 4],
    /// rgb colour × intensity, w cosine where the penumbra starts
    pub color_inner: [f32; 4],
    /// x decay exponent
    pub params: [f32; 4],
}

impl SpotUniform {
    pub fn from_light(light: &SpotLight) -> Self {
        let (outer, inner) = light.cone_cosines();
        let [r, g, b] = light.color.map(|c| c * light.intensity);
        let p = light.position;
        let d = light.direction();
        Self {
            position_range: [p.x, p.y, p.z, light.range],
            direction_outer: [d.x, d.y, d.z, outer],
            color_inner: [r, g, b, inner],
            params: [light.decay, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub light_view_proj: [[f32; 4]; 4],
    /// xyz camera position
    pub camera_pos: [f32; 4],
    /// rgb fog colour, w fog start
    pub fog_color_near: [f32; 4],
    /// x fog end, y shadows enabled, z active spot count
    pub fog_far_flags: [f32; 4],
    /// rgb ambient colour × intensity
    pub ambient: [f32; 4],
    /// rgb directional colour × intensity
    pub dir_color: [f32; 4],
    /// xyz unit vector towards the directional light
    pub dir_to_light: [f32; 4],
    pub spots: [SpotUniform; MAX_SPOT_LIGHTS],
}

impl Globals {
    pub fn from_scene(scene: &SceneDesc) -> Self {
        let fog = scene.fog;
        let amb = scene.ambient.color.map(|c| c * scene.ambient.intensity);
        let dir = &scene.directional;
        let dcol = dir.color.map(|c| c * dir.intensity);
        let to_light = dir.to_light();
        let mut g = Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            light_view_proj: shadow_view_proj(dir).to_cols_array_2d(),
            camera_pos: [0.0; 4],
            fog_color_near: [fog.color[0], fog.color[1], fog.color[2], fog.near],
            fog_far_flags: [fog.far, if dir.cast_shadow { 1.0 } else { 0.0 }, 0.0, 0.0],
            ambient: [amb[0], amb[1], amb[2], 0.0],
            dir_color: [dcol[0], dcol[1], dcol[2], 0.0],
            dir_to_light: [to_light.x, to_light.y, to_light.z, 0.0],
            spots: [SpotUniform::default(); MAX_SPOT_LIGHTS],
        };
        for s in &scene.spots {
            g.push_spot(s);
        }
        g
    }

    pub fn spot_count(&self) -> usize {
        self.fog_far_flags[2] as usize
    }

    /// Append a spotlight. Returns false once every slot is taken.
    pub fn push_spot(&mut self, light: &SpotLight) -> bool {
        let n = self.spot_count();
        if n >= MAX_SPOT_LIGHTS {
            log::warn!("[render] spotlight `{}` dropped: all {} slots used", light.label, MAX_SPOT_LIGHTS);
            return false;
        }
        self.spots[n] = SpotUniform::from_light(light);
        self.fog_far_flags[2] = (n + 1) as f32;
        true
    }

    pub fn set_camera(&mut self, camera: &CameraState) {
        self.view_proj = camera.view_proj().to_cols_array_2d();
        let p = camera.position;
        self.camera_pos = [p.x, p.y, p.z, 1.0];
    }
}

/// Orthographic light frustum covering the whole floor, looking along the
/// directional light towards its target.
pub fn shadow_view_proj(light: &DirectionalLight) -> Mat4 {
    let to_light = light.to_light();
    let eye = light.target + to_light * (SHADOW_HALF_EXTENT * 1.5);
    // the light direction is never vertical in this scene; fall back to Z just in case
    let up = if to_light.cross(Vec3::Y).length_squared() < 1e-6 {
        Vec3::Z
    } else {
        Vec3::Y
    };
    let view = Mat4::look_at_rh(eye, light.target, up);
    let e = SHADOW_HALF_EXTENT;
    let proj = Mat4::orthographic_rh(-e, e, -e, e, 0.5, SHADOW_HALF_EXTENT * 3.0);
    proj * view
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    /// rgb base colour (linear), w 1.0 when lit
    pub color: [f32; 4],
    /// x textured, y receives shadows
    pub flags: [f32; 4],
}

impl ModelUniform {
    pub fn from_primitive(p: &Primitive) -> Self {
        let model = p.model_matrix();
        let normal = model.inverse().transpose();
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        Self {
            model: model.to_cols_array_2d(),
            normal: normal.to_cols_array_2d(),
            color: [
                p.color[0],
                p.color[1],
                p.color[2],
                flag(p.shading == Shading::Lit),
            ],
            flags: [
                flag(p.texture != TextureSlot::None),
                flag(p.receive_shadow),
                0.0,
                0.0,
            ],
        }
    }
}
