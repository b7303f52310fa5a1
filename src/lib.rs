//! # valentine
//!
//! Core logic for a single-page "Valentine proposal" site: display-name
//! sanitizing, photo slot resolution with placeholder fallback, the background
//! slideshow and photo carousel, confetti bursts, the runaway "No" button,
//! background-music unlocking and the share fallback chain.
//!
//! Nothing in this crate touches the DOM, so all of it builds and tests on the
//! host. The browser wiring lives in `crates/valentine_web`.
//!
//! ## Quick Start
//!
//! ```
//! use valentine::prelude::*;
//!
//! let ctl = PageController::new(PageConfig::default(), "?name=%3Cb%3ESam%3C%2Fb%3E", 42);
//! assert_eq!(ctl.name().as_str(), "Sam");
//!
//! let mut carousel = Carousel::new(5);
//! assert_eq!(carousel.set_slide(-1), 4);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): JSON loading of [`config::PageConfig`]
//!
//! ## Modules
//!
//! - [`name`]: query-parameter decoding and name sanitizing
//! - [`assets`]: photo probing, memoization and placeholders
//! - [`slideshow`] / [`carousel`]: photo sequencing
//! - [`confetti`] / [`celebration`]: the "Yes" flow
//! - [`audio`]: autoplay unlock and hint state
//! - [`evasive`]: runaway button geometry
//! - [`share`]: share sheet, clipboard and manual-copy fallback

#[path = "core/assets.rs"]
pub mod assets;

#[path = "core/audio.rs"]
pub mod audio;

#[path = "core/carousel.rs"]
pub mod carousel;

#[path = "core/celebration.rs"]
pub mod celebration;

#[path = "core/config.rs"]
pub mod config;

#[path = "core/confetti.rs"]
pub mod confetti;

#[path = "core/controller.rs"]
pub mod controller;

#[path = "core/error.rs"]
pub mod error;

#[path = "core/evasive.rs"]
pub mod evasive;

#[path = "core/fmt.rs"]
pub mod fmt;

#[path = "core/name.rs"]
pub mod name;

#[path = "core/once.rs"]
pub mod once;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/share.rs"]
pub mod share;

#[path = "core/slideshow.rs"]
pub mod slideshow;

/// Prelude module for convenient imports.
///
/// ```
/// use valentine::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assets::{
        first_loadable, placeholder_data_uri, AssetLayout, GalleryFallback, GallerySwap,
        ImageProbe, PhotoResolver, PhotoSource,
    };
    pub use crate::audio::{AudioController, AudioState, HintTicket, MediaEvent, ToggleIntent};
    pub use crate::carousel::{track_transform, Carousel, CarouselCommand, SwipeTracker};
    pub use crate::celebration::{Celebration, ClickTarget, Overlay, ScheduledBurst};
    pub use crate::config::{GalleryMode, PageConfig};
    pub use crate::confetti::{BurstEvent, BurstTracker, Keyframe, ParticleSpec};
    pub use crate::controller::PageController;
    pub use crate::error::{ConfigError, ShareError};
    pub use crate::evasive::{EvasiveControl, Point, Size};
    pub use crate::name::{resolve_display_name, sanitize_name, DisplayName};
    pub use crate::once::OneShot;
    pub use crate::prng::Prng;
    pub use crate::share::{share_with_fallback, SharePayload, ShareOutcome, ShareTarget};
    pub use crate::slideshow::{LayerId, SlideChange, Slideshow, TickOutcome};
}
