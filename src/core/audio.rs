//! Background-music state: autoplay attempt, policy block, first-interaction
//! unlock, the play/pause toggle, and the hint line shown under the greeting.
//!
//! The controller never touches the media element. The web layer performs
//! `play()`/`pause()` and reports outcomes back here; the controller decides
//! what the UI should show.

use crate::once::OneShot;

pub const BLOCKED_HINT: &str = "Tap anywhere to start the music";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioState {
    #[default]
    Idle,
    AttemptingAutoplay,
    Playing,
    Paused,
    /// Autoplay was refused by platform policy and nothing has started playback since.
    Blocked,
}

/// Events forwarded from the media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    Play,
    Pause,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleIntent {
    Play,
    Pause,
}

/// Identifies one transient hint so a late timer cannot clear a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintTicket(u64);

#[derive(Debug)]
pub struct AudioController {
    state: AudioState,
    unlock: OneShot,
    blocked_hint_dismissed: bool,
    blocked_hint: String,
    transient: Option<(HintTicket, String)>,
    next_ticket: u64,
}

impl Default for AudioController {
    fn default() -> Self {
        Self::new(BLOCKED_HINT)
    }
}

impl AudioController {
    pub fn new(blocked_hint: impl Into<String>) -> Self {
        Self {
            state: AudioState::Idle,
            unlock: OneShot::new(),
            blocked_hint_dismissed: false,
            blocked_hint: blocked_hint.into(),
            transient: None,
            next_ticket: 0,
        }
    }

    pub fn state(&self) -> AudioState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == AudioState::Playing
    }

    pub fn is_blocked(&self) -> bool {
        self.state == AudioState::Blocked
    }

    /// Enter `AttemptingAutoplay`. Returns `false` (and changes nothing) once music has started.
    pub fn begin_autoplay(&mut self) -> bool {
        match self.state {
            AudioState::Idle | AudioState::Blocked => {
                self.state = AudioState::AttemptingAutoplay;
                true
            }
            _ => false,
        }
    }

    pub fn autoplay_result(&mut self, ok: bool) {
        if ok {
            self.state = AudioState::Playing;
        } else {
            tracing::info!("autoplay blocked; waiting for first interaction");
            self.state = AudioState::Blocked;
        }
    }

    /// Called from the first pointer-down anywhere on the page.
    ///
    /// Returns `true` when the caller should retry `play()`. The latch fires
    /// once per controller, so later interactions always get `false`. The
    /// persistent blocked hint is dismissed either way.
    pub fn take_unlock_attempt(&mut self) -> bool {
        if !self.unlock.fire() {
            return false;
        }
        self.blocked_hint_dismissed = true;
        if self.state == AudioState::Blocked {
            self.state = AudioState::AttemptingAutoplay;
            true
        } else {
            false
        }
    }

    /// Outcome of any explicit `play()` (unlock retry, toggle, celebration).
    pub fn play_result(&mut self, ok: bool) {
        if ok {
            self.state = AudioState::Playing;
        } else if self.state == AudioState::AttemptingAutoplay {
            self.state = AudioState::Blocked;
        }
    }

    /// Re-synchronize with the media element; it is the source of truth.
    pub fn on_media_event(&mut self, ev: MediaEvent) {
        self.state = match ev {
            MediaEvent::Play => AudioState::Playing,
            MediaEvent::Pause | MediaEvent::Ended => AudioState::Paused,
        };
    }

    pub fn toggle_intent(&self) -> ToggleIntent {
        if self.is_playing() {
            ToggleIntent::Pause
        } else {
            ToggleIntent::Play
        }
    }

    /// Show `text` until [`AudioController::expire_hint`] is called with the returned ticket.
    pub fn flash_hint(&mut self, text: impl Into<String>) -> HintTicket {
        self.next_ticket += 1;
        let ticket = HintTicket(self.next_ticket);
        self.transient = Some((ticket, text.into()));
        ticket
    }

    /// Drop the transient hint if `ticket` is still current. Returns whether anything changed.
    pub fn expire_hint(&mut self, ticket: HintTicket) -> bool {
        match &self.transient {
            Some((current, _)) if *current == ticket => {
                self.transient = None;
                true
            }
            _ => false,
        }
    }

    /// The hint line to render, if any.
    pub fn hint(&self) -> Option<&str> {
        if let Some((_, text)) = &self.transient {
            return Some(text);
        }
        if self.is_blocked() && !self.blocked_hint_dismissed {
            return Some(&self.blocked_hint);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoplay_success_goes_straight_to_playing() {
        let mut audio = AudioController::default();
        assert!(audio.begin_autoplay());
        assert_eq!(audio.state(), AudioState::AttemptingAutoplay);
        audio.autoplay_result(true);
        assert!(audio.is_playing());
        assert_eq!(audio.hint(), None);
        assert!(!audio.begin_autoplay());
        // Music already runs; the first tap has nothing to unlock.
        assert!(!audio.take_unlock_attempt());
    }

    #[test]
    fn blocked_autoplay_unlocks_once() {
        let mut audio = AudioController::default();
        audio.begin_autoplay();
        audio.autoplay_result(false);
        assert!(audio.is_blocked());
        assert_eq!(audio.hint(), Some(BLOCKED_HINT));

        assert!(audio.take_unlock_attempt());
        assert_eq!(audio.hint(), None);
        audio.play_result(true);
        assert!(audio.is_playing());

        audio.on_media_event(MediaEvent::Pause);
        assert!(!audio.take_unlock_attempt());
        assert_eq!(audio.state(), AudioState::Paused);
    }

    #[test]
    fn failed_unlock_keeps_blocked_but_hides_hint() {
        let mut audio = AudioController::default();
        audio.begin_autoplay();
        audio.autoplay_result(false);
        assert!(audio.take_unlock_attempt());
        audio.play_result(false);
        assert!(audio.is_blocked());
        assert_eq!(audio.hint(), None);
        assert!(!audio.take_unlock_attempt());
    }

    #[test]
    fn media_events_drive_the_indicator() {
        let mut audio = AudioController::default();
        assert_eq!(audio.toggle_intent(), ToggleIntent::Play);
        audio.on_media_event(MediaEvent::Play);
        assert_eq!(audio.toggle_intent(), ToggleIntent::Pause);
        audio.on_media_event(MediaEvent::Ended);
        assert!(!audio.is_playing());
        assert_eq!(audio.toggle_intent(), ToggleIntent::Play);
    }

    #[test]
    fn transient_hint_reverts_to_blocked_hint() {
        let mut audio = AudioController::default();
        audio.begin_autoplay();
        audio.autoplay_result(false);

        let first = audio.flash_hint("Link copied!");
        assert_eq!(audio.hint(), Some("Link copied!"));
        let second = audio.flash_hint("Copied again");
        assert!(!audio.expire_hint(first));
        assert_eq!(audio.hint(), Some("Copied again"));
        assert!(audio.expire_hint(second));
        assert_eq!(audio.hint(), Some(BLOCKED_HINT));
    }

    #[test]
    fn transient_hint_reverts_to_hidden_when_playing() {
        let mut audio = AudioController::default();
        audio.on_media_event(MediaEvent::Play);
        let t = audio.flash_hint("Music on");
        assert!(audio.expire_hint(t));
        assert_eq!(audio.hint(), None);
    }
}
