use glam::Vec3;

// Shared gallery tuning constants. Runtime-adjustable values are grouped into
// the config structs in `config.rs`; these are their defaults.

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0; // initial vertical field of view
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 1.8, 8.0); // just outside the entrance steps
pub const CAMERA_START_LOOK_AT: Vec3 = Vec3::new(0.0, 2.0, 2.5); // welcome sign

// Navigation
pub const MOVE_SPEED: f32 = 0.15; // world units per frame
pub const LOOK_SENSITIVITY: f32 = 0.002; // radians per pixel of pointer/touch motion
pub const WHEEL_FOV_FACTOR: f32 = 0.03; // degrees of FOV per wheel deltaY unit
pub const DESKTOP_FOV_RANGE: (f32, f32) = (30.0, 100.0);
pub const MOBILE_FOV_RANGE: (f32, f32) = (40.0, 90.0);
pub const FOV_EASE_FACTOR: f32 = 0.15; // fraction of the remaining gap closed per frame
pub const FOV_SNAP_EPSILON: f32 = 0.1; // below this gap the FOV lands on its target
pub const JOYSTICK_MAX_THROW_PX: f32 = 40.0;
pub const JOYSTICK_DEAD_ZONE: f32 = 0.3; // normalised, per axis

// Interaction
pub const DESKTOP_CENTER_DISTANCE: f32 = 10.0;
pub const MOBILE_CENTER_DISTANCE: f32 = 15.0;
pub const MOBILE_POPUP_DWELL_MS: f64 = 3000.0;
pub const MOBILE_AUTO_CLOSE_DISTANCE: f32 = 20.0;
pub const TEMP_MESSAGE_MS: f64 = 2000.0;

// Device detection
pub const MOBILE_MAX_VIEWPORT_WIDTH: f64 = 768.0;
pub const MOBILE_UA_TOKENS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

// Audio
pub const MUSIC_TARGET_VOLUME: f32 = 0.3;
pub const MUSIC_FADE_MS: f64 = 1000.0;
pub const MUSIC_FADE_STEPS: u32 = 30;
pub const AMBIENT_VOLUME: f32 = 0.2;
pub const AMBIENT_REF_DISTANCE: f32 = 5.0;

// Room layout
pub const WALL_HEIGHT: f32 = 6.0;
pub const WALL_THICKNESS: f32 = 0.2;
pub const PAINTING_CENTER_Y: f32 = 2.5;
pub const PAINTING_WALL_INSET: f32 = 0.01; // keeps canvases off the wall surface
pub const FOG_NEAR: f32 = 0.0;
pub const FOG_FAR: f32 = 75.0;
pub const SKY_COLOR_HEX: u32 = 0x87ceeb;
pub const NIGHT_LIGHT_HEX: u32 = 0x0e182a; // ambient + directional tint
pub const PAINTING_LIGHT_HEX: u32 = 0xfff2cc;
pub const PAINTING_LIGHT_LIFT: f32 = 0.3; // above the top edge of the canvas

// Renderer
pub const MAX_SPOT_LIGHTS: usize = 16;
pub const DESKTOP_MSAA_SAMPLES: u32 = 4;
pub const SHADOW_MAP_SIZE: u32 = 2048;
pub const SHADOW_HALF_EXTENT: f32 = 40.0; // orthographic shadow frustum covers the whole floor
