//! Gaze raycast against the hung paintings and the info panel / popup state
//! machine it drives.
//!
//! The state machine never touches the page. Every transition is reported as
//! a list of [`UiCommand`]s that the web layer applies to the DOM and the
//! audio graph.

use glam::Vec3;
use smallvec::SmallVec;

use crate::catalog::PlacedPainting;
use crate::config::InteractionConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Catalog index of the painting.
    pub painting: usize,
    pub distance: f32,
}

/// Intersect a ray with the visible face of one painting. `dir` must be
/// normalised. Rays arriving from behind the canvas miss.
pub fn ray_painting(origin: Vec3, dir: Vec3, painting: &PlacedPainting) -> Option<f32> {
    let normal = painting.normal();
    let denom = dir.dot(normal);
    if denom >= -f32::EPSILON {
        return None;
    }
    let t = (painting.position - origin).dot(normal) / denom;
    if !t.is_finite() || t < 0.0 {
        return None;
    }
    let local = origin + dir * t - painting.position;
    let u = local.dot(painting.right());
    let v = local.y;
    let half_w = painting.record.width * 0.5;
    let half_h = painting.record.height * 0.5;
    (u.abs() <= half_w && v.abs() <= half_h).then_some(t)
}

/// All hits along the ray, nearest first.
pub fn cast<'a, I>(origin: Vec3, dir: Vec3, paintings: I) -> SmallVec<[RayHit; 8]>
where
    I: IntoIterator<Item = &'a PlacedPainting>,
{
    let dir = dir.normalize_or_zero();
    let mut hits: SmallVec<[RayHit; 8]> = SmallVec::new();
    if dir == Vec3::ZERO {
        return hits;
    }
    for p in paintings {
        if let Some(distance) = ray_painting(origin, dir, p) {
            hits.push(RayHit {
                painting: p.index,
                distance,
            });
        }
    }
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

pub fn nearest_hit<'a, I>(origin: Vec3, dir: Vec3, paintings: I) -> Option<RayHit>
where
    I: IntoIterator<Item = &'a PlacedPainting>,
{
    cast(origin, dir, paintings).first().copied()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractionPhase {
    Idle,
    Centered { painting: usize },
    PanelOpen { painting: usize, opened_at_ms: f64 },
    PopupOpen { painting: usize },
}

impl InteractionPhase {
    pub fn painting(&self) -> Option<usize> {
        match *self {
            InteractionPhase::Idle => None,
            InteractionPhase::Centered { painting }
            | InteractionPhase::PanelOpen { painting, .. }
            | InteractionPhase::PopupOpen { painting } => Some(painting),
        }
    }

    /// Panel or popup showing. Background music is ducked while reading.
    pub fn is_reading(&self) -> bool {
        matches!(
            self,
            InteractionPhase::PanelOpen { .. } | InteractionPhase::PopupOpen { .. }
        )
    }
}

/// Short-lived hint shown at the bottom of the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    MoveCloser,
    NothingInView,
    MovedAway,
}

impl Notice {
    pub fn text(&self) -> &'static str {
        match self {
            Notice::MoveCloser => "Move closer to the painting to view details",
            Notice::NothingInView => "No painting in view. Look around to find artworks!",
            Notice::MovedAway => "Moved away from painting",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UiCommand {
    ShowPanel(usize),
    HidePanel,
    ShowPopup(usize),
    HidePopup,
    FadeMusicOut,
    FadeMusicIn,
    ReleasePointer,
    RequestPointer,
    Notice(Notice),
}

/// Where a pointer-scheme click landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Background,
    PopupImage,
}

#[derive(Clone, Debug)]
pub struct InteractionState {
    phase: InteractionPhase,
    /// Painting centered during the latest update, if any.
    centered: Option<usize>,
    /// Nearest hit during the latest update, regardless of distance.
    last_hit: Option<RayHit>,
    config: InteractionConfig,
}

impl InteractionState {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            phase: InteractionPhase::Idle,
            centered: None,
            last_hit: None,
            config,
        }
    }

    pub fn phase(&self) -> InteractionPhase {
        self.phase
    }

    pub fn centered(&self) -> Option<usize> {
        self.centered
    }

    pub fn panel_open(&self) -> bool {
        matches!(self.phase, InteractionPhase::PanelOpen { .. })
    }

    pub fn popup_open(&self) -> bool {
        matches!(self.phase, InteractionPhase::PopupOpen { .. })
    }

    pub fn ui_open(&self) -> bool {
        self.phase.is_reading()
    }

    pub fn navigation_suspended(&self) -> bool {
        self.popup_open() && self.config.suspend_navigation_in_popup
    }

    fn transition(&mut self, next: InteractionPhase, out: &mut Vec<UiCommand>) {
        if next == self.phase {
            return;
        }
        log::debug!("[interaction] {:?} -> {:?}", self.phase, next);
        match (self.phase.is_reading(), next.is_reading()) {
            (false, true) => out.push(UiCommand::FadeMusicOut),
            (true, false) => out.push(UiCommand::FadeMusicIn),
            _ => {}
        }
        self.phase = next;
    }

    /// Per-frame update with the nearest gaze hit among loaded paintings.
    pub fn update(
        &mut self,
        hit: Option<RayHit>,
        camera_pos: Vec3,
        paintings: &[PlacedPainting],
        now_ms: f64,
        out: &mut Vec<UiCommand>,
    ) {
        self.last_hit = hit;
        self.centered = hit
            .filter(|h| h.distance < self.config.center_distance)
            .map(|h| h.painting);

        match self.phase {
            InteractionPhase::Idle | InteractionPhase::Centered { .. } => {
                let next = match self.centered {
                    Some(painting) if self.config.auto_panel => {
                        out.push(UiCommand::ShowPanel(painting));
                        InteractionPhase::PanelOpen {
                            painting,
                            opened_at_ms: now_ms,
                        }
                    }
                    Some(painting) => InteractionPhase::Centered { painting },
                    None => InteractionPhase::Idle,
                };
                self.transition(next, out);
            }
            InteractionPhase::PanelOpen {
                painting,
                opened_at_ms,
            } => {
                if self.moved_away(painting, camera_pos, paintings) {
                    self.auto_close(out);
                } else if self.config.auto_panel {
                    match self.centered {
                        Some(next) if next != painting => {
                            out.push(UiCommand::ShowPanel(next));
                            self.transition(
                                InteractionPhase::PanelOpen {
                                    painting: next,
                                    opened_at_ms: now_ms,
                                },
                                out,
                            );
                        }
                        Some(_) => {}
                        None => {
                            out.push(UiCommand::HidePanel);
                            self.transition(InteractionPhase::Idle, out);
                        }
                    }
                } else if let Some(dwell) = self.config.popup_dwell_ms {
                    if now_ms - opened_at_ms >= dwell {
                        self.open_popup(painting, out);
                    }
                }
            }
            InteractionPhase::PopupOpen { painting } => {
                if self.moved_away(painting, camera_pos, paintings) {
                    self.auto_close(out);
                }
            }
        }
    }

    fn moved_away(&self, painting: usize, camera_pos: Vec3, paintings: &[PlacedPainting]) -> bool {
        let Some(limit) = self.config.auto_close_distance else {
            return false;
        };
        paintings
            .iter()
            .find(|p| p.index == painting)
            .is_some_and(|p| p.position.distance(camera_pos) > limit)
    }

    fn auto_close(&mut self, out: &mut Vec<UiCommand>) {
        log::info!("[interaction] moved away from painting, closing");
        out.push(UiCommand::HidePanel);
        out.push(UiCommand::HidePopup);
        out.push(UiCommand::Notice(Notice::MovedAway));
        self.transition(InteractionPhase::Idle, out);
    }

    fn open_popup(&mut self, painting: usize, out: &mut Vec<UiCommand>) {
        out.push(UiCommand::HidePanel);
        out.push(UiCommand::ShowPopup(painting));
        if self.config.pointer_lock {
            out.push(UiCommand::ReleasePointer);
        }
        self.transition(InteractionPhase::PopupOpen { painting }, out);
    }

    /// Info button tap (touch scheme). Opens the panel for the centered
    /// painting, or explains why nothing opened.
    pub fn request_info(&mut self, now_ms: f64, out: &mut Vec<UiCommand>) {
        match (self.centered, self.last_hit) {
            (Some(painting), _) => {
                if self.popup_open() {
                    out.push(UiCommand::HidePopup);
                }
                out.push(UiCommand::ShowPanel(painting));
                self.transition(
                    InteractionPhase::PanelOpen {
                        painting,
                        opened_at_ms: now_ms,
                    },
                    out,
                );
            }
            (None, Some(_)) => out.push(UiCommand::Notice(Notice::MoveCloser)),
            (None, None) => out.push(UiCommand::Notice(Notice::NothingInView)),
        }
    }

    /// Click anywhere outside the info panel (pointer scheme). A background
    /// click dismisses an open popup; clicks on the image itself keep it.
    /// Otherwise a centered painting opens in the popup.
    pub fn click(&mut self, locked: bool, target: ClickTarget, out: &mut Vec<UiCommand>) {
        if self.popup_open() {
            if target == ClickTarget::Background {
                self.close(out);
            }
            return;
        }
        if !locked {
            return;
        }
        if let Some(painting) = self.centered {
            self.open_popup(painting, out);
        }
    }

    /// Explicit tap on the open info panel.
    pub fn tap_panel(&mut self, out: &mut Vec<UiCommand>) {
        if let InteractionPhase::PanelOpen { painting, .. } = self.phase {
            self.open_popup(painting, out);
        }
    }

    /// Close button, popup image tap or background click.
    pub fn close(&mut self, out: &mut Vec<UiCommand>) {
        let was_popup = self.popup_open();
        out.push(UiCommand::HidePanel);
        out.push(UiCommand::HidePopup);
        if was_popup && self.config.pointer_lock {
            out.push(UiCommand::RequestPointer);
        }
        self.transition(InteractionPhase::Idle, out);
    }

    /// Pointer lock acquired: the lock hides every overlay.
    pub fn on_pointer_locked(&mut self, out: &mut Vec<UiCommand>) {
        if self.phase.is_reading() {
            out.push(UiCommand::HidePanel);
            out.push(UiCommand::HidePopup);
            self.transition(InteractionPhase::Idle, out);
        }
    }
}
