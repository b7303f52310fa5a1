use std::cell::Cell;

/// A latch that lets exactly one caller through.
///
/// Backs the "first interaction" subscriptions: the browser listener is also
/// registered with `once`, but the latch keeps the guarantee even if the same
/// handler is reachable from more than one event.
#[derive(Debug, Default)]
pub struct OneShot {
    fired: Cell<bool>,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time only.
    pub fn fire(&self) -> bool {
        !self.fired.replace(true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_fires_once() {
        let latch = OneShot::new();
        assert!(!latch.has_fired());
        assert!(latch.fire());
        assert!(!latch.fire());
        assert!(latch.has_fired());
    }
}
