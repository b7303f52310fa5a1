//! Background slideshow: two stacked layers that crossfade on a timer.
//!
//! A tick assigns the next photo to the hidden layer, makes it visible, hides
//! the other one, and swaps which layer counts as current. Ticks are
//! single-flight: one that arrives while a transition is still resolving or
//! fading is dropped, never queued. After each change the slot after next is
//! resolved eagerly so the following tick does not wait on probing.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use crate::assets::{ImageProbe, PhotoResolver, PhotoSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerId {
    A,
    B,
}

impl LayerId {
    pub fn other(self) -> Self {
        match self {
            LayerId::A => LayerId::B,
            LayerId::B => LayerId::A,
        }
    }

    pub fn index(self) -> usize {
        match self {
            LayerId::A => 0,
            LayerId::B => 1,
        }
    }
}

/// What the view should do for one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideChange {
    pub show: LayerId,
    pub hide: LayerId,
    pub photo: usize,
    pub source: PhotoSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced { photo: usize },
    Skipped,
}

#[derive(Debug)]
struct SlideState {
    current: LayerId,
    active_photo: usize,
}

/// Clears the busy flag when the transition ends, however it ends.
pub struct TransitionGuard<'a> {
    busy: &'a Cell<bool>,
}

impl Drop for TransitionGuard<'_> {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

#[derive(Debug)]
pub struct Slideshow {
    resolver: Rc<PhotoResolver>,
    state: RefCell<SlideState>,
    busy: Cell<bool>,
}

impl Slideshow {
    pub fn new(resolver: Rc<PhotoResolver>) -> Self {
        Self {
            resolver,
            state: RefCell::new(SlideState {
                current: LayerId::A,
                active_photo: 0,
            }),
            busy: Cell::new(false),
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.busy.get()
    }

    pub fn current_layer(&self) -> LayerId {
        self.state.borrow().current
    }

    pub fn active_photo(&self) -> usize {
        self.state.borrow().active_photo
    }

    /// Claim the single transition slot, or `None` if one is in flight.
    pub fn try_begin(&self) -> Option<TransitionGuard<'_>> {
        if self.busy.replace(true) {
            return None;
        }
        Some(TransitionGuard { busy: &self.busy })
    }

    /// Put photo 0 on the current layer at startup.
    pub async fn prime<P, F>(&self, probe: &P, apply: F) -> TickOutcome
    where
        P: ImageProbe,
        F: FnOnce(&SlideChange),
    {
        let Some(_guard) = self.try_begin() else {
            return TickOutcome::Skipped;
        };
        let source = self.resolver.resolve(0, probe).await;
        let show = self.current_layer();
        apply(&SlideChange {
            show,
            hide: show.other(),
            photo: 0,
            source,
        });
        self.state.borrow_mut().active_photo = 0;
        self.resolver.resolve(1, probe).await;
        TickOutcome::Advanced { photo: 0 }
    }

    /// One timer tick. `settle` is awaited (still inside the transition) after
    /// the change is applied, typically a sleep for the crossfade duration.
    pub async fn advance<P, F, S>(&self, probe: &P, apply: F, settle: S) -> TickOutcome
    where
        P: ImageProbe,
        F: FnOnce(&SlideChange),
        S: Future<Output = ()>,
    {
        let Some(_guard) = self.try_begin() else {
            tracing::debug!("slideshow tick dropped; transition in flight");
            return TickOutcome::Skipped;
        };

        let count = self.resolver.photo_count();
        let (next_photo, hidden) = {
            let st = self.state.borrow();
            ((st.active_photo + 1) % count, st.current.other())
        };

        let source = self.resolver.resolve(next_photo, probe).await;
        let change = SlideChange {
            show: hidden,
            hide: hidden.other(),
            photo: next_photo,
            source,
        };
        apply(&change);
        {
            let mut st = self.state.borrow_mut();
            st.current = hidden;
            st.active_photo = next_photo;
        }
        tracing::debug!(photo = next_photo, layer = ?hidden, "slideshow advanced");

        self.resolver.resolve((next_photo + 1) % count, probe).await;
        settle.await;

        TickOutcome::Advanced { photo: next_photo }
    }
}
