//! Confetti bursts.
//!
//! A burst is a batch of particles spawned together inside one transient
//! container. Each particle follows the same three-keyframe path (origin, a
//! point 68% through the animation, an offscreen end point while fading out)
//! with randomized size, color, drift, fall, spin and timing.

use crate::evasive::{Point, Size};
use crate::fmt::{deg, px};
use crate::prng::Prng;

pub const PALETTE: [&str; 6] = [
    "#ff4f79", "#ff8ca5", "#ffd166", "#7bd389", "#54c7ec", "#ffffff",
];

pub const EASING: &str = "cubic-bezier(0.12, 0.82, 0.28, 1)";
pub const MID_OFFSET: f64 = 0.68;

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSpec {
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
    pub origin: Point,
    pub drift_x: f64,
    pub fall_y: f64,
    pub rotate_deg: f64,
    pub duration_ms: f64,
    pub delay_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    pub transform: String,
    pub opacity: f64,
    /// `None` lets the browser distribute the frame evenly.
    pub offset: Option<f64>,
}

impl ParticleSpec {
    pub fn sample(rng: &mut Prng, viewport: Size) -> Self {
        let origin = Point {
            x: viewport.width / 2.0,
            y: viewport.height * 0.45,
        };
        let color = PALETTE[rng.gen_range_usize(0, PALETTE.len())];
        Self {
            width: rng.gen_range_f64(6.0, 12.0),
            height: rng.gen_range_f64(10.0, 18.0),
            color,
            origin,
            drift_x: (rng.next_f64_01() - 0.5) * viewport.width * 1.2,
            fall_y: rng.gen_range_f64(viewport.height * 0.35, viewport.height * 0.95),
            rotate_deg: rng.gen_range_f64(-760.0, 760.0),
            duration_ms: rng.gen_range_f64(950.0, 1900.0),
            delay_ms: rng.gen_range_f64(0.0, 180.0),
        }
    }

    fn transform_at(&self, path: f64, spin: f64) -> String {
        format!(
            "translate(-50%, -50%) translate({}, {}) rotate({})",
            px(self.drift_x * path),
            px(self.fall_y * path),
            deg(self.rotate_deg * spin)
        )
    }

    pub fn keyframes(&self) -> [Keyframe; 3] {
        [
            Keyframe {
                transform: "translate(-50%, -50%) translate(0, 0) rotate(0deg)".to_string(),
                opacity: 1.0,
                offset: None,
            },
            Keyframe {
                transform: self.transform_at(0.45, 0.55),
                opacity: 1.0,
                offset: Some(MID_OFFSET),
            },
            Keyframe {
                transform: self.transform_at(1.0, 1.0),
                opacity: 0.0,
                offset: None,
            },
        ]
    }

    /// Inline style for the particle element before the animation starts.
    pub fn style(&self) -> String {
        format!(
            "width: {}; height: {}; background-color: {}; left: {}; top: {};",
            px(self.width),
            px(self.height),
            self.color,
            px(self.origin.x),
            px(self.origin.y)
        )
    }
}

pub fn plan_burst(rng: &mut Prng, viewport: Size, count: usize) -> Vec<ParticleSpec> {
    (0..count).map(|_| ParticleSpec::sample(rng, viewport)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstEvent {
    ParticleRemoved,
    /// The last particle finished: remove it, then the container.
    ParticleAndContainerRemoved,
    /// Spurious finish after the burst already completed.
    Ignored,
}

/// Counts finished particles so the container goes away exactly once, after all of them.
#[derive(Debug, Clone)]
pub struct BurstTracker {
    total: usize,
    finished: usize,
}

impl BurstTracker {
    pub fn new(total: usize) -> Self {
        Self { total, finished: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.total - self.finished
    }

    pub fn is_complete(&self) -> bool {
        self.finished == self.total
    }

    pub fn particle_finished(&mut self) -> BurstEvent {
        if self.is_complete() {
            return BurstEvent::Ignored;
        }
        self.finished += 1;
        if self.is_complete() {
            BurstEvent::ParticleAndContainerRemoved
        } else {
            BurstEvent::ParticleRemoved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size {
        width: 1000.0,
        height: 800.0,
    };

    #[test]
    fn sampled_particles_respect_ranges() {
        let mut rng = Prng::new(99);
        for p in plan_burst(&mut rng, VIEWPORT, 500) {
            assert!((6.0..12.0).contains(&p.width));
            assert!((10.0..18.0).contains(&p.height));
            assert!(PALETTE.contains(&p.color));
            assert_eq!(p.origin, Point { x: 500.0, y: 360.0 });
            assert!(p.drift_x.abs() <= 600.0);
            assert!((280.0..760.0).contains(&p.fall_y));
            assert!((-760.0..760.0).contains(&p.rotate_deg));
            assert!((950.0..1900.0).contains(&p.duration_ms));
            assert!((0.0..180.0).contains(&p.delay_ms));
        }
    }

    #[test]
    fn keyframes_follow_the_three_point_path() {
        let p = ParticleSpec {
            width: 8.0,
            height: 12.0,
            color: PALETTE[0],
            origin: Point { x: 0.0, y: 0.0 },
            drift_x: 100.0,
            fall_y: 200.0,
            rotate_deg: -400.0,
            duration_ms: 1000.0,
            delay_ms: 0.0,
        };
        let [start, mid, end] = p.keyframes();
        assert_eq!(start.opacity, 1.0);
        assert_eq!(start.offset, None);
        assert_eq!(
            mid.transform,
            "translate(-50%, -50%) translate(45.00px, 90.00px) rotate(-220.00deg)"
        );
        assert_eq!(mid.offset, Some(MID_OFFSET));
        assert_eq!(mid.opacity, 1.0);
        assert_eq!(
            end.transform,
            "translate(-50%, -50%) translate(100.00px, 200.00px) rotate(-400.00deg)"
        );
        assert_eq!(end.opacity, 0.0);
        assert!(p.style().contains("background-color: #ff4f79;"));
    }

    #[test]
    fn burst_removes_container_once_after_all_particles() {
        let n = 170;
        let mut tracker = BurstTracker::new(n);
        let mut particle_removals = 0;
        let mut container_removals = 0;
        for i in 0..n {
            assert_eq!(container_removals, 0, "container removed early at {i}");
            match tracker.particle_finished() {
                BurstEvent::ParticleRemoved => particle_removals += 1,
                BurstEvent::ParticleAndContainerRemoved => {
                    particle_removals += 1;
                    container_removals += 1;
                }
                BurstEvent::Ignored => panic!("unexpected ignore"),
            }
        }
        assert_eq!(particle_removals, n);
        assert_eq!(container_removals, 1);
        assert_eq!(tracker.particle_finished(), BurstEvent::Ignored);
        assert_eq!(tracker.remaining(), 0);
    }

    #[test]
    fn empty_burst_is_already_complete() {
        let mut tracker = BurstTracker::new(0);
        assert!(tracker.is_complete());
        assert_eq!(tracker.particle_finished(), BurstEvent::Ignored);
    }
}
