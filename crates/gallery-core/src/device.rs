//! Device classification: decides between the desktop (pointer lock) and the
//! touch (drag + joystick) control schemes.

use crate::config::query_param;
use crate::constants::{MOBILE_MAX_VIEWPORT_WIDTH, MOBILE_UA_TOKENS};

/// Explicit mode requested through the `mode` query parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeOverride {
    Mobile,
    Desktop,
}

impl ModeOverride {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "mobile" => Some(ModeOverride::Mobile),
            "desktop" => Some(ModeOverride::Desktop),
            _ => None,
        }
    }

    /// Extract the override from a `location.search` string such as `?mode=mobile`.
    pub fn from_query(query: &str) -> Option<Self> {
        query_param(query, "mode").and_then(Self::parse)
    }
}

/// Raw environment readings gathered by the web layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeviceSignals {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub user_agent: String,
    pub has_touch_start: bool,
    pub max_touch_points: u32,
    pub mode_override: Option<ModeOverride>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlVariant {
    Desktop,
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceProfile {
    pub mobile: bool,
}

impl DeviceProfile {
    pub const DESKTOP: DeviceProfile = DeviceProfile { mobile: false };
    pub const MOBILE: DeviceProfile = DeviceProfile { mobile: true };

    pub fn control_variant(&self) -> ControlVariant {
        if self.mobile {
            ControlVariant::Touch
        } else {
            ControlVariant::Desktop
        }
    }

    /// Text shown in the mode indicator badge.
    pub fn label(&self) -> &'static str {
        if self.mobile {
            "MOBILE"
        } else {
            "DESKTOP"
        }
    }
}

pub fn user_agent_is_mobile(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_UA_TOKENS.iter().any(|token| ua.contains(token))
}

/// Classify the client. An explicit override always wins; otherwise a mobile
/// user agent or a narrow viewport selects the touch scheme. Touch capability
/// flags are informational only.
pub fn detect(signals: &DeviceSignals) -> DeviceProfile {
    let mobile = match signals.mode_override {
        Some(ModeOverride::Mobile) => true,
        Some(ModeOverride::Desktop) => false,
        None => {
            user_agent_is_mobile(&signals.user_agent)
                || signals.viewport_width <= MOBILE_MAX_VIEWPORT_WIDTH
        }
    };
    log::debug!(
        "[device] viewport={}x{} touchstart={} max_touch_points={} override={:?} -> mobile={}",
        signals.viewport_width,
        signals.viewport_height,
        signals.has_touch_start,
        signals.max_touch_points,
        signals.mode_override,
        mobile
    );
    DeviceProfile { mobile }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Same control scheme; only the viewport changed.
    Unchanged,
    /// The scheme flipped. The host restarts rather than reconfiguring live.
    ModeChanged {
        from: DeviceProfile,
        to: DeviceProfile,
    },
}

/// Tracks the active profile across window resizes.
#[derive(Clone, Debug)]
pub struct ResizeWatcher {
    current: DeviceProfile,
}

impl ResizeWatcher {
    pub fn new(initial: DeviceProfile) -> Self {
        Self { current: initial }
    }

    pub fn on_resize(&mut self, signals: &DeviceSignals) -> ResizeOutcome {
        let next = detect(signals);
        if next == self.current {
            return ResizeOutcome::Unchanged;
        }
        let from = self.current;
        self.current = next;
        ResizeOutcome::ModeChanged { from, to: next }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_parses_exact_values_only() {
        assert_eq!(ModeOverride::parse("mobile"), Some(ModeOverride::Mobile));
        assert_eq!(ModeOverride::parse("desktop"), Some(ModeOverride::Desktop));
        assert_eq!(ModeOverride::parse("Mobile"), None);
        assert_eq!(ModeOverride::parse(""), None);
    }

    #[test]
    fn user_agent_match_is_case_insensitive() {
        assert!(user_agent_is_mobile("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)"));
        assert!(user_agent_is_mobile("OPERA MINI/9"));
        assert!(!user_agent_is_mobile(
            "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/130.0"
        ));
    }
}
