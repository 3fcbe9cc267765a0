//! First-person camera: position plus yaw/pitch applied in YXZ order, with an
//! eased vertical field of view.

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::constants::{
    CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_START, CAMERA_START_LOOK_AT, FOV_EASE_FACTOR,
    FOV_SNAP_EPSILON,
};

#[derive(Clone, Debug, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    /// Rotation about world +Y, radians. Zero looks down -Z.
    pub yaw: f32,
    /// Rotation about the camera's local +X, radians, within ±π/2.
    pub pitch: f32,
    pub fov_deg: f32,
    pub target_fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraState {
    /// Standing outside the entrance steps, facing the welcome sign.
    pub fn start_pose(aspect: f32) -> Self {
        let mut cam = Self {
            position: CAMERA_START,
            yaw: 0.0,
            pitch: 0.0,
            fov_deg: CAMERA_FOV_DEG,
            target_fov_deg: CAMERA_FOV_DEG,
            aspect: sanitize_aspect(aspect),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        };
        cam.look_at(CAMERA_START_LOOK_AT);
        cam
    }

    pub fn look_at(&mut self, target: Vec3) {
        let dir = (target - self.position).normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        self.pitch = dir.y.clamp(-1.0, 1.0).asin();
        self.yaw = (-dir.x).atan2(-dir.z);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// World-space view direction, pitch included.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Camera-local +X in world space. Always horizontal since there is no roll.
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// View direction projected onto the floor plane.
    pub fn horizontal_forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Apply a relative pointer/touch motion in pixels.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw -= dx * sensitivity;
        self.pitch = (self.pitch - dy * sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect);
    }

    /// Move the field of view one easing step towards its target. Returns
    /// whether the projection changed.
    pub fn ease_fov(&mut self) -> bool {
        let next = ease_fov_step(self.fov_deg, self.target_fov_deg);
        let changed = next != self.fov_deg;
        self.fov_deg = next;
        changed
    }

    pub fn view_matrix(&self) -> Mat4 {
        // inverse of the camera's world transform; stays valid at ±90° pitch
        Mat4::from_rotation_translation(self.rotation(), self.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// One exponential easing step: close a fixed fraction of the gap, landing
/// exactly on the target once the gap is within the snap epsilon.
pub fn ease_fov_step(current: f32, target: f32) -> f32 {
    let gap = target - current;
    if gap.abs() <= FOV_SNAP_EPSILON {
        target
    } else {
        current + gap * FOV_EASE_FACTOR
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
