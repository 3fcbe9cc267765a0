//! Navigation input for both control schemes.
//!
//! Desktop (pointer lock + keys + wheel) and touch (drag look + pinch + virtual
//! joystick) each fill in a [`MovementIntent`]; [`step`] turns whichever
//! intent is active into a camera translation once per frame.

use crate::camera::CameraState;
use crate::config::{MovementBasis, NavigationConfig};
use crate::device::ControlVariant;
use glam::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementIntent {
    pub const NONE: MovementIntent = MovementIntent {
        forward: false,
        backward: false,
        left: false,
        right: false,
    };

    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    pub fn set(&mut self, key: MoveKey, pressed: bool) {
        match key {
            MoveKey::Forward => self.forward = pressed,
            MoveKey::Backward => self.backward = pressed,
            MoveKey::Left => self.left = pressed,
            MoveKey::Right => self.right = pressed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

/// Map a `KeyboardEvent.code` to a movement flag. Physical key codes keep
/// WASD working on non-QWERTY layouts.
pub fn move_key_for_code(code: &str) -> Option<MoveKey> {
    match code {
        "KeyW" | "ArrowUp" => Some(MoveKey::Forward),
        "KeyS" | "ArrowDown" => Some(MoveKey::Backward),
        "KeyA" | "ArrowLeft" => Some(MoveKey::Left),
        "KeyD" | "ArrowRight" => Some(MoveKey::Right),
        _ => None,
    }
}

/// Source of per-frame movement, implemented by each control scheme.
pub trait NavigationInput {
    fn intent(&self) -> MovementIntent;
    /// Whether translation and raycasting should run this frame.
    fn engaged(&self) -> bool;
}

#[derive(Clone, Debug, Default)]
pub struct DesktopInput {
    intent: MovementIntent,
    locked: bool,
}

impl DesktopInput {
    pub fn key_down(&mut self, code: &str) -> bool {
        self.key(code, true)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.key(code, false)
    }

    fn key(&mut self, code: &str, pressed: bool) -> bool {
        match move_key_for_code(code) {
            Some(k) => {
                self.intent.set(k, pressed);
                true
            }
            None => false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        if self.locked != locked {
            log::debug!("[nav] pointer lock {}", if locked { "acquired" } else { "released" });
        }
        self.locked = locked;
    }

    /// Relative mouse motion; ignored unless the pointer is locked.
    pub fn look(
        &self,
        camera: Option<&mut CameraState>,
        dx: f32,
        dy: f32,
        config: &NavigationConfig,
    ) -> bool {
        match camera {
            Some(cam) if self.locked => {
                cam.rotate_by_pixels(dx, dy, config.look_sensitivity);
                true
            }
            _ => false,
        }
    }

    /// Wheel zoom. Only while locked and with neither panel nor popup showing.
    pub fn wheel(
        &self,
        camera: Option<&mut CameraState>,
        delta_y: f32,
        ui_open: bool,
        config: &NavigationConfig,
    ) -> bool {
        match camera {
            Some(cam) if self.locked && !ui_open => {
                cam.target_fov_deg = wheel_target_fov(cam.target_fov_deg, delta_y, config);
                true
            }
            _ => false,
        }
    }
}

impl NavigationInput for DesktopInput {
    fn intent(&self) -> MovementIntent {
        self.intent
    }

    fn engaged(&self) -> bool {
        self.locked
    }
}

/// Touch position in CSS pixels.
pub type TouchPoint = (f32, f32);

#[derive(Clone, Debug, Default)]
pub struct TouchInput {
    intent: MovementIntent,
    look_anchor: Option<TouchPoint>,
    pinch_distance: Option<f32>,
}

impl TouchInput {
    pub fn touch_start(&mut self, touches: &[TouchPoint]) {
        match touches {
            [one] => {
                self.look_anchor = Some(*one);
                self.pinch_distance = None;
            }
            [a, b, ..] => {
                self.look_anchor = None;
                self.pinch_distance = Some(touch_distance(*a, *b));
            }
            [] => {}
        }
    }

    /// One finger rotates incrementally; two fingers pinch-zoom.
    pub fn touch_move(
        &mut self,
        camera: Option<&mut CameraState>,
        touches: &[TouchPoint],
        config: &NavigationConfig,
    ) -> bool {
        let Some(cam) = camera else {
            return false;
        };
        match touches {
            [one] => {
                let Some(prev) = self.look_anchor else {
                    return false;
                };
                cam.rotate_by_pixels(one.0 - prev.0, one.1 - prev.1, config.look_sensitivity);
                self.look_anchor = Some(*one);
                true
            }
            [a, b, ..] => {
                let d = touch_distance(*a, *b);
                let changed = match self.pinch_distance {
                    Some(prev) => {
                        cam.target_fov_deg = pinch_target_fov(cam.target_fov_deg, prev, d, config);
                        true
                    }
                    None => false,
                };
                self.pinch_distance = Some(d);
                changed
            }
            [] => false,
        }
    }

    /// Lifting a finger stops the current gesture; a new touchstart begins the next.
    pub fn touch_end(&mut self, remaining: &[TouchPoint]) {
        self.look_anchor = None;
        if remaining.len() < 2 {
            self.pinch_distance = None;
        }
    }

    /// Offset of the finger from the joystick centre. Returns the clamped knob
    /// offset for display.
    pub fn joystick_move(&mut self, dx: f32, dy: f32, config: &NavigationConfig) -> (f32, f32) {
        let knob = clamp_knob(dx, dy, config.joystick_max_throw_px);
        self.intent = joystick_intent(knob.0, knob.1, config);
        knob
    }

    pub fn joystick_release(&mut self) {
        self.intent = MovementIntent::NONE;
    }
}

impl NavigationInput for TouchInput {
    fn intent(&self) -> MovementIntent {
        self.intent
    }

    fn engaged(&self) -> bool {
        true
    }
}

/// The active control scheme. Owned by the session; event handlers reach the
/// concrete variant through `desktop_mut`/`touch_mut`.
#[derive(Clone, Debug)]
pub enum Navigator {
    Desktop(DesktopInput),
    Touch(TouchInput),
}

impl Navigator {
    pub fn for_variant(variant: ControlVariant) -> Self {
        match variant {
            ControlVariant::Desktop => Navigator::Desktop(DesktopInput::default()),
            ControlVariant::Touch => Navigator::Touch(TouchInput::default()),
        }
    }

    pub fn desktop(&self) -> Option<&DesktopInput> {
        match self {
            Navigator::Desktop(d) => Some(d),
            Navigator::Touch(_) => None,
        }
    }

    pub fn desktop_mut(&mut self) -> Option<&mut DesktopInput> {
        match self {
            Navigator::Desktop(d) => Some(d),
            Navigator::Touch(_) => None,
        }
    }

    pub fn touch_mut(&mut self) -> Option<&mut TouchInput> {
        match self {
            Navigator::Touch(t) => Some(t),
            Navigator::Desktop(_) => None,
        }
    }

    pub fn as_input(&self) -> &dyn NavigationInput {
        match self {
            Navigator::Desktop(d) => d,
            Navigator::Touch(t) => t,
        }
    }
}

impl NavigationInput for Navigator {
    fn intent(&self) -> MovementIntent {
        self.as_input().intent()
    }

    fn engaged(&self) -> bool {
        self.as_input().engaged()
    }
}

/// Translate the camera by one frame of `intent`. Opposite flags cancel.
pub fn apply_movement(
    camera: &mut CameraState,
    intent: MovementIntent,
    config: &NavigationConfig,
) -> bool {
    if !intent.any() {
        return false;
    }
    let (forward, right) = match config.basis {
        MovementBasis::Planar => (camera.horizontal_forward(), camera.right()),
        MovementBasis::View => {
            let f = camera.forward();
            // up x forward points left; negate for right. Degenerate at ±90° pitch.
            (f, -Vec3::Y.cross(f).normalize_or_zero())
        }
    };
    let axis = |pos: bool, neg: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
    let delta = forward * axis(intent.forward, intent.backward)
        + right * axis(intent.right, intent.left);
    if delta == Vec3::ZERO {
        return false;
    }
    camera.position += delta * config.move_speed;
    true
}

/// Per-frame navigation update. A missing camera (scene not built yet) or a
/// disengaged input is a no-op; the caller simply tries again next frame.
pub fn step(
    camera: Option<&mut CameraState>,
    input: &dyn NavigationInput,
    config: &NavigationConfig,
) -> bool {
    match camera {
        Some(cam) if input.engaged() => apply_movement(cam, input.intent(), config),
        _ => false,
    }
}

pub fn wheel_target_fov(target_fov: f32, delta_y: f32, config: &NavigationConfig) -> f32 {
    config.clamp_fov(target_fov + delta_y * config.wheel_factor)
}

/// Spreading the fingers (scale > 1) narrows the field of view.
pub fn pinch_target_fov(
    target_fov: f32,
    previous_distance: f32,
    distance: f32,
    config: &NavigationConfig,
) -> f32 {
    if previous_distance <= 0.0 || distance <= 0.0 {
        return target_fov;
    }
    let scale = distance / previous_distance;
    config.clamp_fov(target_fov / scale)
}

pub fn touch_distance(a: TouchPoint, b: TouchPoint) -> f32 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

pub fn clamp_knob(dx: f32, dy: f32, max_throw: f32) -> (f32, f32) {
    let d = dx.hypot(dy);
    if d > max_throw && d > 0.0 {
        (dx / d * max_throw, dy / d * max_throw)
    } else {
        (dx, dy)
    }
}

/// Screen-space knob offset (y down) to movement flags, per axis with a dead zone.
pub fn joystick_intent(knob_x: f32, knob_y: f32, config: &NavigationConfig) -> MovementIntent {
    let max = config.joystick_max_throw_px.max(f32::EPSILON);
    let (nx, ny) = (knob_x / max, knob_y / max);
    let dz = config.joystick_dead_zone;
    MovementIntent {
        forward: ny < -dz,
        backward: ny > dz,
        left: nx < -dz,
        right: nx > dz,
    }
}
