use crate::audio::AudioDirector;
use crate::overlay;
use gallery_core::{SessionState, UiCommand};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Handles shared by every event handler and the frame loop.
#[derive(Clone)]
pub struct Wiring {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub session: Rc<RefCell<SessionState>>,
    /// `None` when WebAudio could not start; the gallery then runs silent.
    pub audio: Option<Rc<AudioDirector>>,
    pub epoch: Instant,
}

impl Wiring {
    /// Milliseconds since the gallery started; the clock every timed state
    /// (dwell, fades) runs on.
    pub fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Apply a batch of interaction commands: music fades go to the session's
    /// fader, the rest to the DOM.
    pub fn dispatch(&self, session: &mut SessionState, commands: &[UiCommand]) {
        if commands.is_empty() {
            return;
        }
        session.apply_music_commands(commands, self.now_ms());
        apply_commands(&self.document, &self.canvas, session, commands);
    }

    /// First user gesture: start audio and fade the music in. Later calls
    /// do nothing.
    pub fn unlock_audio(&self, session: &mut SessionState) {
        if !session.unlock_audio(self.now_ms()) {
            return;
        }
        if let Some(audio) = &self.audio {
            audio.unlock();
        }
    }
}

pub fn apply_commands(
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
    session: &SessionState,
    commands: &[UiCommand],
) {
    let mobile = session.profile.mobile;
    for command in commands {
        match *command {
            UiCommand::ShowPanel(index) => {
                if let Some(p) = session.painting(index) {
                    overlay::show_panel(document, p);
                }
            }
            UiCommand::HidePanel => overlay::hide_panel(document),
            UiCommand::ShowPopup(index) => {
                if let Some(p) = session.painting(index) {
                    overlay::show_popup(document, p, mobile);
                }
            }
            UiCommand::HidePopup => overlay::hide_popup(document),
            UiCommand::ReleasePointer => document.exit_pointer_lock(),
            UiCommand::RequestPointer => canvas.request_pointer_lock(),
            UiCommand::Notice(notice) => overlay::show_temp_message(
                document,
                notice.text(),
                session.config.interaction.message_ms,
            ),
            // applied to the fader by the caller
            UiCommand::FadeMusicOut | UiCommand::FadeMusicIn => {}
        }
    }
}
