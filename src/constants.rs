/// DOM ids and browser-side tuning constants.
///
/// Every element except the canvas is optional; lookups are null-checked at
/// the call site and a missing element just disables that piece of UI.
pub const CANVAS_ID: &str = "app-canvas";

// Desktop pointer-lock gate
pub const BLOCKER_ID: &str = "blocker";
pub const INSTRUCTIONS_ID: &str = "instructions";

// Painting info panel
pub const INFO_PANEL_ID: &str = "info-panel";
pub const PAINTING_TITLE_ID: &str = "painting-title";
pub const PAINTING_DESCRIPTION_ID: &str = "painting-description";
pub const CLOSE_PANEL_BTN_ID: &str = "close-panel-btn";

// Full-image popup
pub const POPUP_CONTAINER_ID: &str = "popup-painting-container";
pub const POPUP_IMAGE_ID: &str = "popup-painting-image";
pub const POPUP_CLOSE_BTN_ID: &str = "popup-close-btn";

// Touch devices
pub const MOBILE_INDICATOR_ID: &str = "mobile-indicator";
pub const MOBILE_LOADING_SCREEN_ID: &str = "mobile-loading-screen";
pub const MOBILE_START_BTN_ID: &str = "mobile-start-btn";
pub const MOBILE_CONTROLS_ID: &str = "mobile-controls";
pub const JOYSTICK_BASE_ID: &str = "joystick-base";
pub const JOYSTICK_KNOB_ID: &str = "joystick-knob";
pub const INFO_BTN_ID: &str = "info-btn";

// Transient and fatal messages
pub const TEMP_MESSAGE_ID: &str = "temp-message";
pub const ERROR_SCREEN_ID: &str = "error-screen";
pub const ERROR_MESSAGE_ID: &str = "error-message";
pub const ERROR_RELOAD_BTN_ID: &str = "error-reload-btn";

#[cfg(test)]
pub const ALL_DOM_IDS: &[&str] = &[
    CANVAS_ID,
    BLOCKER_ID,
    INSTRUCTIONS_ID,
    INFO_PANEL_ID,
    PAINTING_TITLE_ID,
    PAINTING_DESCRIPTION_ID,
    CLOSE_PANEL_BTN_ID,
    POPUP_CONTAINER_ID,
    POPUP_IMAGE_ID,
    POPUP_CLOSE_BTN_ID,
    MOBILE_INDICATOR_ID,
    MOBILE_LOADING_SCREEN_ID,
    MOBILE_START_BTN_ID,
    MOBILE_CONTROLS_ID,
    JOYSTICK_BASE_ID,
    JOYSTICK_KNOB_ID,
    INFO_BTN_ID,
    TEMP_MESSAGE_ID,
    ERROR_SCREEN_ID,
    ERROR_MESSAGE_ID,
    ERROR_RELOAD_BTN_ID,
];

// Pointer-lock deltas larger than this are treated as glitches
pub const MAX_MOUSE_JUMP_PX: f32 = 300.0;

// Painting textures are downscaled so neither side exceeds this (GPU limit
// on low-end adapters).
pub const MAX_TEXTURE_DIM: u32 = 2048;

// Welcome sign raster
pub const SIGN_FONT: &str = "bold 44px sans-serif";
pub const SIGN_BACKGROUND: &str = "#ffffff";
pub const SIGN_TEXT_COLOR: &str = "#000000";
pub const SIGN_LINE_OFFSET_PX: f64 = 28.0;

pub const TEMP_MESSAGE_STYLE: &str = "position:fixed;bottom:200px;left:50%;transform:translateX(-50%);\
background:rgba(0,0,0,0.8);color:white;padding:10px 20px;border-radius:20px;font-size:14px;\
z-index:1001;max-width:80%;text-align:center;";

pub const ERROR_SCREEN_STYLE: &str = "position:fixed;top:50%;left:50%;transform:translate(-50%,-50%);\
background:#e74c3c;color:white;padding:20px;border-radius:10px;text-align:center;z-index:10000;\
max-width:80%;font-family:Arial,sans-serif;";

pub const ERROR_RELOAD_BTN_STYLE: &str = "background:white;color:#e74c3c;border:none;\
padding:10px 20px;border-radius:5px;cursor:pointer;margin-top:10px;";

// Touch UI, created on demand when the host page does not provide it
pub const MOBILE_LOADING_SCREEN_STYLE: &str = "position:fixed;top:0;left:0;width:100%;height:100%;\
display:flex;justify-content:center;align-items:center;color:white;font-family:Arial,sans-serif;\
z-index:9998;padding:20px;box-sizing:border-box;background:#222;";

pub const MOBILE_START_BTN_STYLE: &str = "background:rgba(255,255,255,0.2);\
border:2px solid rgba(255,255,255,0.5);color:white;padding:15px 30px;font-size:18px;\
border-radius:25px;cursor:pointer;";

pub const MOBILE_CONTROLS_STYLE: &str = "position:fixed;bottom:20px;left:20px;right:20px;\
display:flex;justify-content:space-between;align-items:flex-end;pointer-events:none;z-index:1000;";

pub const JOYSTICK_BASE_STYLE: &str = "width:120px;height:120px;background:rgba(255,255,255,0.1);\
border:2px solid rgba(255,255,255,0.3);border-radius:50%;position:relative;pointer-events:all;\
touch-action:none;";

pub const JOYSTICK_KNOB_STYLE: &str = "width:40px;height:40px;background:rgba(255,255,255,0.8);\
border-radius:50%;position:absolute;left:50%;top:50%;margin-left:-20px;margin-top:-20px;\
pointer-events:none;";

pub const INFO_BTN_STYLE: &str = "width:60px;height:60px;background:rgba(255,255,255,0.2);\
border:2px solid rgba(255,255,255,0.5);border-radius:50%;color:white;font-size:24px;\
pointer-events:all;cursor:pointer;";

pub const KNOB_IDLE_COLOR: &str = "rgba(255, 255, 255, 0.8)";
// Device badge, shown in both modes
pub const INDICATOR_MOBILE_COLOR: &str = "#e74c3c";
pub const INDICATOR_DESKTOP_COLOR: &str = "#27ae60";

pub const KNOB_ACTIVE_COLOR: &str = "rgba(0, 255, 0, 0.8)";

pub const MOBILE_TITLE: &str = "Mom's Art Gallery";
pub const MOBILE_INTRO: &str = "Touch and drag to look around. Use the joystick to move. \
Tap the info button near a painting to read about it.";
pub const MOBILE_START_LABEL: &str = "Start Gallery Tour";
pub const INFO_BTN_LABEL: &str = "\u{2139}";

pub const FATAL_ERROR_TITLE: &str = "Gallery Error";
pub const RELOAD_LABEL: &str = "Reload Page";

/// Largest size with the same aspect whose sides both fit in `max_dim`.
/// Images already small enough keep their size; zero sides become one.
pub fn texture_extent(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    let (w, h) = (width.max(1), height.max(1));
    let longest = w.max(h);
    if longest <= max_dim {
        return (w, h);
    }
    let scale = max_dim as f64 / longest as f64;
    let fit = |v: u32| ((v as f64 * scale).round() as u32).clamp(1, max_dim);
    (fit(w), fit(h))
}

pub fn indicator_color(mobile: bool) -> &'static str {
    if mobile {
        INDICATOR_MOBILE_COLOR
    } else {
        INDICATOR_DESKTOP_COLOR
    }
}

/// Joystick knob translation as an inline CSS transform.
pub fn knob_transform(dx: f32, dy: f32) -> String {
    format!("translate({:.1}px, {:.1}px)", dx, dy)
}
