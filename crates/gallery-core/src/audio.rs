//! Background-music volume fades, stepped from the frame clock.

use crate::config::FadeConfig;

/// Volume after `step` of `steps` on a linear ramp from `start` to `end`,
/// clamped to `[0, ceiling]`. The final step is exactly `end`.
pub fn fade_step_volume(start: f32, end: f32, step: u32, steps: u32, ceiling: f32) -> f32 {
    let steps = steps.max(1);
    if step >= steps {
        return end;
    }
    let t = step as f32 / steps as f32;
    (start + (end - start) * t).clamp(0.0, ceiling)
}

/// Whether the page can make sound. Browsers keep audio suspended until a
/// user gesture; a context that failed to start stays `Unavailable` and the
/// gallery runs silent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AudioGate {
    Unavailable,
    #[default]
    Locked,
    Unlocked,
}

impl AudioGate {
    /// True only for the gesture that unlocks sound.
    pub fn on_gesture(&mut self) -> bool {
        if *self != AudioGate::Locked {
            return false;
        }
        *self = AudioGate::Unlocked;
        true
    }

    pub fn is_available(self) -> bool {
        self != AudioGate::Unavailable
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ActiveFade {
    start: f32,
    end: f32,
    step: u32,
    started_at_ms: f64,
}

/// Linear fade in discrete steps. Starting a new fade abandons the current one
/// and ramps from whatever volume was reached.
#[derive(Clone, Debug)]
pub struct MusicFader {
    config: FadeConfig,
    volume: f32,
    fade: Option<ActiveFade>,
}

impl MusicFader {
    /// Starts silent.
    pub fn new(config: FadeConfig) -> Self {
        Self {
            config,
            volume: 0.0,
            fade: None,
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Target of the running fade, or the settled volume.
    pub fn target(&self) -> f32 {
        self.fade.map_or(self.volume, |f| f.end)
    }

    pub fn fade_in(&mut self, now_ms: f64) {
        self.fade_to(self.config.target_volume, now_ms);
    }

    pub fn fade_out(&mut self, now_ms: f64) {
        self.fade_to(0.0, now_ms);
    }

    pub fn fade_to(&mut self, end: f32, now_ms: f64) {
        self.fade = Some(ActiveFade {
            start: self.volume,
            end,
            step: 0,
            started_at_ms: now_ms,
        });
    }

    /// Apply every step due by `now_ms`. Returns the new volume if it changed.
    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        let mut fade = self.fade?;
        let steps = self.config.steps.max(1);
        let elapsed = now_ms - fade.started_at_ms;
        let due = if self.config.duration_ms > 0.0 {
            (elapsed * f64::from(steps) / self.config.duration_ms).floor()
        } else {
            f64::from(steps)
        };
        let due = if due.is_finite() && due > 0.0 {
            (due as u32).min(steps)
        } else {
            0
        };
        if due <= fade.step {
            return None;
        }
        fade.step = due;
        let before = self.volume;
        self.volume = fade_step_volume(
            fade.start,
            fade.end,
            fade.step,
            steps,
            self.config.target_volume,
        );
        self.fade = (fade.step < steps).then_some(fade);
        (self.volume != before).then_some(self.volume)
    }
}
