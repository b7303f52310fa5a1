//! Photo carousel: one current slide out of `count`, moved by buttons, arrow
//! keys, dot indicators or a horizontal swipe. Index arithmetic wraps in both
//! directions.

use crate::fmt::fmt_f64_fixed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselCommand {
    Prev,
    Next,
    GoTo(usize),
}

impl CarouselCommand {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(CarouselCommand::Prev),
            "ArrowRight" => Some(CarouselCommand::Next),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    count: usize,
    current: usize,
}

impl Carousel {
    pub fn new(count: usize) -> Self {
        Self {
            count: count.max(1),
            current: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Jump to `index`, wrapping out-of-range values circularly.
    pub fn set_slide(&mut self, index: isize) -> usize {
        self.current = index.rem_euclid(self.count as isize) as usize;
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.set_slide(self.current as isize + 1)
    }

    pub fn prev(&mut self) -> usize {
        self.set_slide(self.current as isize - 1)
    }

    pub fn apply(&mut self, cmd: CarouselCommand) -> usize {
        match cmd {
            CarouselCommand::Prev => self.prev(),
            CarouselCommand::Next => self.next(),
            CarouselCommand::GoTo(i) => self.set_slide(i as isize),
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.current == index
    }
}

/// CSS transform for the slide track so `current` is in view.
pub fn track_transform(current: usize) -> String {
    format!(
        "translateX(-{}%)",
        fmt_f64_fixed(current as f64 * 100.0, 0)
    )
}

/// Turns a touch start/end pair into a command when the horizontal
/// displacement exceeds the threshold. Shorter gestures are treated as taps.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
        }
    }

    pub fn start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    pub fn end(&mut self, x: f64) -> Option<CarouselCommand> {
        let start = self.start_x.take()?;
        let dx = x - start;
        if dx.abs() <= self.threshold {
            return None;
        }
        Some(if dx < 0.0 {
            CarouselCommand::Next
        } else {
            CarouselCommand::Prev
        })
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_in_both_directions() {
        let mut c = Carousel::new(5);
        assert_eq!(c.set_slide(-1), 4);
        assert_eq!(c.next(), 0);
        assert_eq!(c.prev(), 4);
        assert_eq!(c.set_slide(12), 2);
        assert_eq!(c.apply(CarouselCommand::GoTo(7)), 2);
        assert!(c.is_active(2));
    }

    #[test]
    fn swipe_threshold_filters_short_gestures() {
        let mut swipe = SwipeTracker::new(40.0);
        swipe.start(200.0);
        assert_eq!(swipe.end(170.0), None);

        swipe.start(200.0);
        assert_eq!(swipe.end(159.0), Some(CarouselCommand::Next));

        swipe.start(200.0);
        assert_eq!(swipe.end(241.0), Some(CarouselCommand::Prev));

        // End without a start is ignored.
        assert_eq!(swipe.end(0.0), None);

        swipe.start(10.0);
        swipe.cancel();
        assert_eq!(swipe.end(300.0), None);
    }

    #[test]
    fn swipe_drives_the_carousel() {
        let mut c = Carousel::new(5);
        let mut swipe = SwipeTracker::new(40.0);

        swipe.start(100.0);
        if let Some(cmd) = swipe.end(130.0) {
            c.apply(cmd);
        }
        assert_eq!(c.current(), 0);

        swipe.start(100.0);
        if let Some(cmd) = swipe.end(141.0) {
            c.apply(cmd);
        }
        assert_eq!(c.current(), 4);
    }

    #[test]
    fn keys_and_transform() {
        assert_eq!(CarouselCommand::from_key("ArrowLeft"), Some(CarouselCommand::Prev));
        assert_eq!(CarouselCommand::from_key("ArrowRight"), Some(CarouselCommand::Next));
        assert_eq!(CarouselCommand::from_key("Enter"), None);
        assert_eq!(track_transform(0), "translateX(-0%)");
        assert_eq!(track_transform(3), "translateX(-300%)");
    }
}
