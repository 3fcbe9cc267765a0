//! Runtime parameters grouped per subsystem.
//!
//! Each struct defaults to the desktop values from `constants.rs`; the
//! `for_variant` constructors pick the set matching the active control scheme.

use crate::constants::*;
use crate::device::{ControlVariant, DeviceProfile};

/// How a `MovementIntent` is turned into a translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementBasis {
    /// Along the horizontal projection of the view (walking; pitch ignored).
    Planar,
    /// Along the full world-space view direction (pitch included).
    View,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigationConfig {
    pub move_speed: f32,
    pub look_sensitivity: f32,
    pub fov_min: f32,
    pub fov_max: f32,
    pub wheel_factor: f32,
    pub basis: MovementBasis,
    pub joystick_max_throw_px: f32,
    pub joystick_dead_zone: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            look_sensitivity: LOOK_SENSITIVITY,
            fov_min: DESKTOP_FOV_RANGE.0,
            fov_max: DESKTOP_FOV_RANGE.1,
            wheel_factor: WHEEL_FOV_FACTOR,
            basis: MovementBasis::Planar,
            joystick_max_throw_px: JOYSTICK_MAX_THROW_PX,
            joystick_dead_zone: JOYSTICK_DEAD_ZONE,
        }
    }
}

impl NavigationConfig {
    pub fn for_variant(variant: ControlVariant) -> Self {
        match variant {
            ControlVariant::Desktop => Self::default(),
            ControlVariant::Touch => Self {
                fov_min: MOBILE_FOV_RANGE.0,
                fov_max: MOBILE_FOV_RANGE.1,
                basis: MovementBasis::View,
                ..Self::default()
            },
        }
    }

    pub fn clamp_fov(&self, fov_deg: f32) -> f32 {
        fov_deg.clamp(self.fov_min, self.fov_max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionConfig {
    /// A hit closer than this counts as "centered".
    pub center_distance: f32,
    /// Open the info panel as soon as a painting is centered.
    pub auto_panel: bool,
    /// Promote an open panel to the popup after this long, if set.
    pub popup_dwell_ms: Option<f64>,
    /// Close panel/popup once the camera is farther than this from the target.
    pub auto_close_distance: Option<f32>,
    /// Freeze camera translation while the popup is showing.
    pub suspend_navigation_in_popup: bool,
    /// The popup releases pointer lock and closing it requests it again.
    pub pointer_lock: bool,
    pub message_ms: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            center_distance: DESKTOP_CENTER_DISTANCE,
            auto_panel: true,
            popup_dwell_ms: None,
            auto_close_distance: None,
            suspend_navigation_in_popup: true,
            pointer_lock: true,
            message_ms: TEMP_MESSAGE_MS,
        }
    }
}

impl InteractionConfig {
    pub fn for_variant(variant: ControlVariant) -> Self {
        match variant {
            ControlVariant::Desktop => Self::default(),
            ControlVariant::Touch => Self {
                center_distance: MOBILE_CENTER_DISTANCE,
                auto_panel: false,
                popup_dwell_ms: Some(MOBILE_POPUP_DWELL_MS),
                auto_close_distance: Some(MOBILE_AUTO_CLOSE_DISTANCE),
                // walking away is how a mobile popup auto-closes
                suspend_navigation_in_popup: false,
                pointer_lock: false,
                message_ms: TEMP_MESSAGE_MS,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeConfig {
    pub target_volume: f32,
    pub duration_ms: f64,
    pub steps: u32,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            target_volume: MUSIC_TARGET_VOLUME,
            duration_ms: MUSIC_FADE_MS,
            steps: MUSIC_FADE_STEPS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalleryConfig {
    pub navigation: NavigationConfig,
    pub interaction: InteractionConfig,
    pub fade: FadeConfig,
    pub debug: bool,
}

impl GalleryConfig {
    pub fn for_profile(profile: DeviceProfile) -> Self {
        let variant = profile.control_variant();
        Self {
            navigation: NavigationConfig::for_variant(variant),
            interaction: InteractionConfig::for_variant(variant),
            fade: FadeConfig::default(),
            debug: false,
        }
    }

    /// Profile defaults plus the `debug` switch read from the query string.
    pub fn from_query(profile: DeviceProfile, query: &str) -> Self {
        Self {
            debug: debug_requested(query),
            ..Self::for_profile(profile)
        }
    }
}

pub fn debug_requested(query: &str) -> bool {
    matches!(query_param(query, "debug"), Some("1") | Some("true"))
}

/// Look up `key` in a `?a=b&c=d` style query string. The first occurrence wins;
/// a bare key yields an empty value. No percent-decoding is applied.
pub fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (k == key).then_some(v)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_param_finds_first_match() {
        assert_eq!(query_param("?mode=mobile&debug=1", "mode"), Some("mobile"));
        assert_eq!(query_param("?mode=mobile&debug=1", "debug"), Some("1"));
        assert_eq!(query_param("mode=a&mode=b", "mode"), Some("a"));
        assert_eq!(query_param("?debug", "debug"), Some(""));
        assert_eq!(query_param("", "mode"), None);
        assert_eq!(query_param("?modes=mobile", "mode"), None);
    }

    #[test]
    fn debug_flag_accepts_one_or_true() {
        assert!(debug_requested("?debug=1"));
        assert!(debug_requested("?x=2&debug=true"));
        assert!(!debug_requested("?debug=0"));
        assert!(!debug_requested(""));
    }
}
