//! What happens when "Yes" is pressed: the overlay opens, music is nudged,
//! and two overlapping confetti bursts go off.

use crate::config::PageConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledBurst {
    pub delay_ms: u32,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed backdrop itself.
    Backdrop,
    /// Anything inside the overlay's content card.
    Content,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    open: bool,
}

impl Overlay {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn aria_hidden(&self) -> &'static str {
        if self.open {
            "false"
        } else {
            "true"
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Close only when the click landed on the backdrop. Returns whether it closed.
    pub fn click(&mut self, target: ClickTarget) -> bool {
        if target == ClickTarget::Backdrop && self.open {
            self.open = false;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone)]
pub struct Celebration {
    overlay: Overlay,
    bursts: [ScheduledBurst; 2],
}

impl Celebration {
    pub fn new(cfg: &PageConfig) -> Self {
        Self {
            overlay: Overlay::default(),
            bursts: [
                ScheduledBurst {
                    delay_ms: 0,
                    count: cfg.first_burst,
                },
                ScheduledBurst {
                    delay_ms: cfg.second_burst_delay_ms,
                    count: cfg.second_burst,
                },
            ],
        }
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }

    /// Open the overlay and return the bursts to launch, in order.
    ///
    /// Music is started by the caller without waiting on it; confetti never
    /// depends on playback succeeding.
    pub fn confirm(&mut self) -> [ScheduledBurst; 2] {
        self.overlay.open();
        tracing::info!("celebration confirmed");
        self.bursts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_opens_overlay_and_schedules_two_bursts() {
        let mut c = Celebration::new(&PageConfig::default());
        assert_eq!(c.overlay().aria_hidden(), "true");
        let bursts = c.confirm();
        assert!(c.overlay().is_open());
        assert_eq!(c.overlay().aria_hidden(), "false");
        assert_eq!(
            bursts,
            [
                ScheduledBurst {
                    delay_ms: 0,
                    count: 170
                },
                ScheduledBurst {
                    delay_ms: 240,
                    count: 120
                },
            ]
        );
        assert!(bursts[1].count < bursts[0].count);
    }

    #[test]
    fn only_backdrop_clicks_close() {
        let mut c = Celebration::new(&PageConfig::default());
        c.confirm();
        assert!(!c.overlay_mut().click(ClickTarget::Content));
        assert!(c.overlay().is_open());
        assert!(c.overlay_mut().click(ClickTarget::Backdrop));
        assert!(!c.overlay().is_open());
        assert!(!c.overlay_mut().click(ClickTarget::Backdrop));

        c.confirm();
        c.overlay_mut().close();
        assert!(!c.overlay().is_open());
    }
}
