use std::cell::RefCell;
use std::rc::Rc;

use crate::assets::{GalleryFallback, PhotoResolver};
use crate::audio::AudioController;
use crate::carousel::{Carousel, SwipeTracker};
use crate::celebration::Celebration;
use crate::config::PageConfig;
use crate::confetti::{plan_burst, ParticleSpec};
use crate::evasive::{EvasiveControl, Point, Size};
use crate::name::{resolve_display_name, DisplayName};
use crate::prng::Prng;
use crate::share::SharePayload;
use crate::slideshow::Slideshow;

/// All mutable page state, built once at startup.
///
/// Everything runs on the page's single thread, so components use `RefCell`
/// and are shared by reference (the web layer holds the controller in an
/// `Rc`). Borrows are kept short and never span an `.await`.
#[derive(Debug)]
pub struct PageController {
    config: PageConfig,
    name: DisplayName,
    resolver: Rc<PhotoResolver>,
    pub slideshow: Slideshow,
    pub carousel: RefCell<Carousel>,
    pub swipe: RefCell<SwipeTracker>,
    pub audio: RefCell<AudioController>,
    pub evasive: RefCell<EvasiveControl>,
    pub celebration: RefCell<Celebration>,
    pub gallery: RefCell<GalleryFallback>,
    rng: RefCell<Prng>,
}

impl PageController {
    /// `search` is the page's `location.search`; `seed` feeds the visual jitter.
    pub fn new(config: PageConfig, search: &str, seed: u64) -> Self {
        let name = resolve_display_name(search, &config.fallback_name);
        let resolver = Rc::new(PhotoResolver::new(config.asset_layout()));
        let photo_count = resolver.photo_count();
        tracing::info!(name = %name, photo_count, "page controller ready");

        Self {
            name,
            slideshow: Slideshow::new(Rc::clone(&resolver)),
            resolver,
            carousel: RefCell::new(Carousel::new(photo_count)),
            swipe: RefCell::new(SwipeTracker::new(config.swipe_threshold_px)),
            audio: RefCell::new(AudioController::default()),
            evasive: RefCell::new(EvasiveControl::new(config.evasive_padding_px)),
            celebration: RefCell::new(Celebration::new(&config)),
            gallery: RefCell::new(GalleryFallback::new()),
            rng: RefCell::new(Prng::new(seed)),
            config,
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    pub fn resolver(&self) -> &Rc<PhotoResolver> {
        &self.resolver
    }

    pub fn photo_count(&self) -> usize {
        self.resolver.photo_count()
    }

    pub fn relocate_evasive(&self, viewport: Size, element: Size) -> Point {
        let mut rng = self.rng.borrow_mut();
        self.evasive
            .borrow_mut()
            .relocate(&mut rng, viewport, element)
    }

    pub fn plan_burst(&self, viewport: Size, count: usize) -> Vec<ParticleSpec> {
        plan_burst(&mut self.rng.borrow_mut(), viewport, count)
    }

    pub fn share_payload(&self, url: impl Into<String>) -> SharePayload {
        SharePayload::for_name(&self.name, url)
    }
}
