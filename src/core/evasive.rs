//! Geometry for the runaway "No" button.

use crate::prng::Prng;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone)]
pub struct EvasiveControl {
    padding: f64,
    floating: bool,
}

impl EvasiveControl {
    pub fn new(padding: f64) -> Self {
        Self {
            padding: padding.max(0.0),
            floating: false,
        }
    }

    /// Has the control ever been moved off its place in the layout?
    pub fn is_floating(&self) -> bool {
        self.floating
    }

    /// Upper bound for one axis, floored at the padding when the viewport is too small.
    fn max_offset(&self, viewport: f64, element: f64) -> f64 {
        (viewport - element - self.padding).max(self.padding)
    }

    /// Pick a fresh position uniformly inside the padded viewport.
    pub fn relocate(&mut self, rng: &mut Prng, viewport: Size, element: Size) -> Point {
        let max_x = self.max_offset(viewport.width, element.width);
        let max_y = self.max_offset(viewport.height, element.height);
        self.floating = true;
        Point {
            x: rng.gen_range_f64(self.padding, max_x),
            y: rng.gen_range_f64(self.padding, max_y),
        }
    }

    /// Pull a floating control back inside a (possibly shrunk) viewport.
    /// Returns `None` while the control still sits in the normal layout.
    pub fn clamp_into(&self, viewport: Size, element: Size, current: Point) -> Option<Point> {
        if !self.floating {
            return None;
        }
        let p = self.padding;
        Some(Point {
            x: current.x.max(p).min(viewport.width - element.width - p),
            y: current.y.max(p).min(viewport.height - element.height - p),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relocation_stays_inside_padded_viewport() {
        let mut rng = Prng::new(42);
        let mut ctl = EvasiveControl::new(10.0);
        let element = Size::new(96.0, 44.0);
        for (w, h) in [(1280.0, 720.0), (375.0, 667.0), (116.0, 64.0), (200.0, 90.0)] {
            let viewport = Size::new(w, h);
            for _ in 0..2_000 {
                let pos = ctl.relocate(&mut rng, viewport, element);
                assert!(pos.x >= 10.0 && pos.x <= w - element.width - 10.0, "x={}", pos.x);
                assert!(pos.y >= 10.0 && pos.y <= h - element.height - 10.0, "y={}", pos.y);
            }
        }
        assert!(ctl.is_floating());
    }

    #[test]
    fn degenerate_viewport_pins_to_padding() {
        let mut rng = Prng::new(1);
        let mut ctl = EvasiveControl::new(10.0);
        let pos = ctl.relocate(&mut rng, Size::new(50.0, 20.0), Size::new(96.0, 44.0));
        assert_eq!(pos, Point { x: 10.0, y: 10.0 });
    }

    #[test]
    fn resize_clamps_only_after_first_move() {
        let mut rng = Prng::new(3);
        let mut ctl = EvasiveControl::new(10.0);
        let element = Size::new(100.0, 40.0);
        assert_eq!(
            ctl.clamp_into(Size::new(300.0, 300.0), element, Point { x: 900.0, y: 5.0 }),
            None
        );

        ctl.relocate(&mut rng, Size::new(1000.0, 800.0), element);
        let clamped = ctl
            .clamp_into(Size::new(300.0, 300.0), element, Point { x: 900.0, y: 5.0 })
            .expect("floating control is clamped");
        assert_eq!(clamped, Point { x: 190.0, y: 10.0 });

        let untouched = ctl
            .clamp_into(Size::new(300.0, 300.0), element, Point { x: 50.0, y: 60.0 })
            .expect("floating control is clamped");
        assert_eq!(untouched, Point { x: 50.0, y: 60.0 });
    }
}
