//! Per-tab session state: one owned value threaded through every subsystem
//! instead of page-level globals.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use fnv::FnvHashSet;

use crate::audio::{AudioGate, MusicFader};
use crate::camera::CameraState;
use crate::catalog::PlacedPainting;
use crate::config::GalleryConfig;
use crate::device::DeviceProfile;
use crate::interaction::{self, InteractionState, UiCommand};
use crate::navigation::{self, NavigationInput, Navigator};

/// Results produced by async tasks, drained once per frame on the main
/// thread. Cloning shares the same queue.
#[derive(Debug)]
pub struct CompletionQueue<T> {
    inner: Rc<RefCell<VecDeque<T>>>,
}

impl<T> Clone for CompletionQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for CompletionQueue<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
        }
    }
}

impl<T> CompletionQueue<T> {
    pub fn push(&self, item: T) {
        self.inner.borrow_mut().push_back(item);
    }

    /// Take everything queued so far. The borrow ends before the caller
    /// processes the items, so handlers may push again.
    pub fn drain(&self) -> Vec<T> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

/// What changed during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameOutcome {
    pub moved: bool,
    pub fov_changed: bool,
    /// New background-music gain, when the fade advanced.
    pub music_volume: Option<f32>,
}

#[derive(Debug)]
pub struct SessionState {
    pub profile: DeviceProfile,
    pub config: GalleryConfig,
    /// `None` until the scene is built (after the start gesture on mobile).
    pub camera: Option<CameraState>,
    pub navigator: Navigator,
    pub interaction: InteractionState,
    /// Every record with its wall slot.
    pub placed: Vec<PlacedPainting>,
    /// Catalog indices whose images decoded, in load order. Append-only.
    loaded: Vec<usize>,
    loaded_set: FnvHashSet<usize>,
    pub fader: MusicFader,
    pub audio: AudioGate,
}

impl SessionState {
    pub fn new(profile: DeviceProfile, config: GalleryConfig) -> Self {
        Self {
            profile,
            config,
            camera: None,
            navigator: Navigator::for_variant(profile.control_variant()),
            interaction: InteractionState::new(config.interaction),
            placed: Vec::new(),
            loaded: Vec::new(),
            loaded_set: FnvHashSet::default(),
            fader: MusicFader::new(config.fade),
            audio: AudioGate::default(),
        }
    }

    /// Called once the scene exists: installs the start pose and the slots.
    pub fn attach_scene(&mut self, placed: Vec<PlacedPainting>, aspect: f32) {
        self.placed = placed;
        self.camera = Some(CameraState::start_pose(aspect));
    }

    pub fn painting(&self, index: usize) -> Option<&PlacedPainting> {
        self.placed.iter().find(|p| p.index == index)
    }

    /// Record a decoded painting. Returns the placed painting the first time,
    /// `None` for unknown or repeated indices.
    pub fn mark_loaded(&mut self, index: usize) -> Option<&PlacedPainting> {
        let pos = self.placed.iter().position(|p| p.index == index)?;
        if !self.loaded_set.insert(index) {
            return None;
        }
        self.loaded.push(index);
        self.placed.get(pos)
    }

    pub fn loaded_indices(&self) -> &[usize] {
        &self.loaded
    }

    pub fn loaded_paintings(&self) -> impl Iterator<Item = &PlacedPainting> + '_ {
        self.placed
            .iter()
            .filter(move |p| self.loaded_set.contains(&p.index))
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if let Some(cam) = self.camera.as_mut() {
            cam.set_aspect(aspect);
        }
    }

    /// One animation frame of simulation: movement, FOV easing, gaze raycast
    /// and the music fade. UI side effects are appended to `out`.
    pub fn frame(&mut self, now_ms: f64, out: &mut Vec<UiCommand>) -> FrameOutcome {
        let mut outcome = FrameOutcome {
            music_volume: if self.audio.is_available() {
                self.fader.tick(now_ms)
            } else {
                None
            },
            ..FrameOutcome::default()
        };
        let Some(camera) = self.camera.as_mut() else {
            return outcome;
        };

        if !self.interaction.navigation_suspended() {
            outcome.moved = navigation::step(
                Some(&mut *camera),
                self.navigator.as_input(),
                &self.config.navigation,
            );
        }
        outcome.fov_changed = camera.ease_fov();

        if self.navigator.engaged() {
            let (origin, dir) = (camera.position, camera.forward());
            let hit = interaction::nearest_hit(
                origin,
                dir,
                self.placed
                    .iter()
                    .filter(|p| self.loaded_set.contains(&p.index)),
            );
            self.interaction
                .update(hit, origin, &self.placed, now_ms, out);
        }
        outcome
    }

    /// First user gesture with audio present: starts the music fade. Returns
    /// true when the caller should resume its audio output.
    pub fn unlock_audio(&mut self, now_ms: f64) -> bool {
        if !self.audio.on_gesture() {
            return false;
        }
        self.fader.fade_in(now_ms);
        true
    }

    /// Apply the audio half of a batch of UI commands.
    pub fn apply_music_commands(&mut self, commands: &[UiCommand], now_ms: f64) {
        if !self.audio.is_available() {
            return;
        }
        for c in commands {
            match c {
                UiCommand::FadeMusicOut => self.fader.fade_out(now_ms),
                UiCommand::FadeMusicIn => self.fader.fade_in(now_ms),
                _ => {}
            }
        }
    }
}
