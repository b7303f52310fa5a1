//! Photo slot resolution.
//!
//! Each slot maps to `{dir}/{n}.{ext}` for a fixed extension preference
//! order. Candidates are probed one after another; the first that loads wins.
//! When none loads, the slot gets a generated SVG placeholder. Results are
//! memoized for the lifetime of the resolver.

use std::cell::{Cell, RefCell};
use std::future::poll_fn;
use std::rc::Rc;
use std::task::{Poll, Waker};

use hashbrown::{HashMap, HashSet};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const PLACEHOLDER_WIDTH: u32 = 800;
pub const PLACEHOLDER_HEIGHT: u32 = 600;

/// Something that can tell whether an image URL loads.
///
/// The browser implementation creates a detached `<img>` and waits for
/// `load`/`error`. Futures are polled on the page's single thread, so no
/// `Send` bound is required.
#[allow(async_fn_in_trait)]
pub trait ImageProbe {
    async fn probe(&self, url: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    Asset(String),
    Placeholder(String),
}

impl PhotoSource {
    pub fn url(&self) -> &str {
        match self {
            PhotoSource::Asset(u) | PhotoSource::Placeholder(u) => u,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PhotoSource::Placeholder(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLayout {
    dir: String,
    extensions: Vec<String>,
    photo_count: usize,
}

impl AssetLayout {
    pub fn new(dir: impl Into<String>, extensions: Vec<String>, photo_count: usize) -> Self {
        Self {
            dir: dir.into(),
            extensions,
            photo_count: photo_count.max(1),
        }
    }

    pub fn photo_count(&self) -> usize {
        self.photo_count
    }

    /// Candidate URLs for `slot`, in preference order. Slots are 0-based, files 1-based.
    pub fn candidates(&self, slot: usize) -> Vec<String> {
        let n = slot % self.photo_count + 1;
        self.extensions
            .iter()
            .map(|ext| format!("{}/{}.{}", self.dir, n, ext))
            .collect()
    }
}

/// Ordered retry combinator: probe `candidates` strictly in order and return
/// the first one that loads. Later candidates are never touched.
pub async fn first_loadable<P: ImageProbe>(candidates: &[String], probe: &P) -> Option<String> {
    for url in candidates {
        if probe.probe(url).await {
            tracing::debug!(%url, "photo candidate loaded");
            return Some(url.clone());
        }
        tracing::debug!(%url, "photo candidate missing");
    }
    None
}

/// Inline SVG placeholder labelled "Add photo {label_number}", as a data URI.
pub fn placeholder_data_uri(label_number: usize) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 {w} {h}'>\
<defs><linearGradient id='g' x1='0' y1='0' x2='1' y2='1'>\
<stop offset='0%' stop-color='#ffd6e0' /><stop offset='100%' stop-color='#ffc3d0' />\
</linearGradient></defs>\
<rect width='{w}' height='{h}' fill='url(#g)' />\
<text x='50%' y='50%' dominant-baseline='middle' text-anchor='middle' fill='#8e3a54' \
font-size='40' font-family='Trebuchet MS, sans-serif'>Add photo {label_number}</text>\
</svg>",
        w = PLACEHOLDER_WIDTH,
        h = PLACEHOLDER_HEIGHT,
    );
    format!(
        "data:image/svg+xml;charset=UTF-8,{}",
        utf8_percent_encode(&svg, URI_COMPONENT)
    )
}

/// Outcome shared by every caller waiting on one slot's probe run.
#[derive(Debug, Default)]
struct InFlight {
    result: RefCell<Option<PhotoSource>>,
    abandoned: Cell<bool>,
    waiters: RefCell<Vec<Waker>>,
}

impl InFlight {
    fn settle(&self, result: Option<PhotoSource>) {
        match result {
            Some(source) => *self.result.borrow_mut() = Some(source),
            None => self.abandoned.set(true),
        }
        for waker in self.waiters.borrow_mut().drain(..) {
            waker.wake();
        }
    }

    /// `None` when the probing caller went away before finishing.
    async fn wait(&self) -> Option<PhotoSource> {
        poll_fn(|cx| {
            if let Some(source) = self.result.borrow().as_ref() {
                return Poll::Ready(Some(source.clone()));
            }
            if self.abandoned.get() {
                return Poll::Ready(None);
            }
            self.waiters.borrow_mut().push(cx.waker().clone());
            Poll::Pending
        })
        .await
    }
}

#[derive(Debug)]
enum MemoEntry {
    Ready(PhotoSource),
    Pending(Rc<InFlight>),
}

/// Clears a pending entry whose probing future was dropped mid-way, so a
/// waiter can take over instead of hanging.
struct PendingGuard<'a> {
    memo: &'a RefCell<HashMap<usize, MemoEntry>>,
    slot: usize,
    flight: Rc<InFlight>,
    done: bool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.memo.borrow_mut().remove(&self.slot);
            self.flight.settle(None);
        }
    }
}

/// Memoizing slot resolver.
///
/// The slideshow and carousel share one resolver by `Rc`. Each slot is probed
/// at most once: a caller that asks for a slot whose probe run is still in
/// flight waits for that run and receives the same result instead of probing
/// again.
#[derive(Debug)]
pub struct PhotoResolver {
    layout: AssetLayout,
    memo: RefCell<HashMap<usize, MemoEntry>>,
}

impl PhotoResolver {
    pub fn new(layout: AssetLayout) -> Self {
        Self {
            layout,
            memo: RefCell::new(HashMap::new()),
        }
    }

    pub fn photo_count(&self) -> usize {
        self.layout.photo_count()
    }

    /// The finished result for `slot`, if any. In-flight slots report `None`.
    pub fn cached(&self, slot: usize) -> Option<PhotoSource> {
        let slot = slot % self.photo_count();
        match self.memo.borrow().get(&slot) {
            Some(MemoEntry::Ready(source)) => Some(source.clone()),
            _ => None,
        }
    }

    pub async fn resolve<P: ImageProbe>(&self, slot: usize, probe: &P) -> PhotoSource {
        let slot = slot % self.photo_count();
        loop {
            let pending = match self.memo.borrow().get(&slot) {
                Some(MemoEntry::Ready(source)) => return source.clone(),
                Some(MemoEntry::Pending(flight)) => Some(Rc::clone(flight)),
                None => None,
            };
            match pending {
                Some(flight) => {
                    if let Some(source) = flight.wait().await {
                        return source;
                    }
                }
                None => return self.probe_slot(slot, probe).await,
            }
        }
    }

    async fn probe_slot<P: ImageProbe>(&self, slot: usize, probe: &P) -> PhotoSource {
        let flight = Rc::new(InFlight::default());
        self.memo
            .borrow_mut()
            .insert(slot, MemoEntry::Pending(Rc::clone(&flight)));
        let mut guard = PendingGuard {
            memo: &self.memo,
            slot,
            flight,
            done: false,
        };

        let candidates = self.layout.candidates(slot);
        let source = match first_loadable(&candidates, probe).await {
            Some(url) => PhotoSource::Asset(url),
            None => {
                tracing::debug!(slot, "no photo found; using placeholder");
                PhotoSource::Placeholder(placeholder_data_uri(slot + 1))
            }
        };

        self.memo
            .borrow_mut()
            .insert(slot, MemoEntry::Ready(source.clone()));
        guard.done = true;
        guard.flight.settle(Some(source.clone()));
        source
    }
}

/// In-place swap for static gallery `<img>` elements whose source failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySwap {
    pub src: String,
    pub alt: String,
}

/// Hands out at most one placeholder swap per gallery element.
#[derive(Debug, Default)]
pub struct GalleryFallback {
    swapped: HashSet<usize>,
}

impl GalleryFallback {
    pub fn new() -> Self {
        Self::default()
    }

    /// `index` is the element's 0-based position in the gallery.
    pub fn take(&mut self, index: usize) -> Option<GallerySwap> {
        if !self.swapped.insert(index) {
            return None;
        }
        let n = index + 1;
        Some(GallerySwap {
            src: placeholder_data_uri(n),
            alt: format!("Placeholder image {n}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::future::Future;

    /// Loads exactly the URLs in `present`, recording every probe.
    struct FakeProbe {
        present: Vec<String>,
        seen: RefCell<Vec<String>>,
    }

    impl FakeProbe {
        fn new(present: &[&str]) -> Self {
            Self {
                present: present.iter().map(|s| s.to_string()).collect(),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl ImageProbe for FakeProbe {
        async fn probe(&self, url: &str) -> bool {
            self.seen.borrow_mut().push(url.to_string());
            self.present.iter().any(|p| p == url)
        }
    }

    fn layout() -> AssetLayout {
        AssetLayout::new(
            "assets/photos",
            ["jpg", "jpeg", "png", "webp"].iter().map(|s| s.to_string()).collect(),
            5,
        )
    }

    #[test]
    fn third_extension_wins_and_fourth_is_never_probed() {
        let probe = FakeProbe::new(&["assets/photos/2.png", "assets/photos/2.webp"]);
        let resolver = PhotoResolver::new(layout());
        let got = pollster::block_on(resolver.resolve(1, &probe));
        assert_eq!(got, PhotoSource::Asset("assets/photos/2.png".to_string()));
        assert_eq!(
            *probe.seen.borrow(),
            ["assets/photos/2.jpg", "assets/photos/2.jpeg", "assets/photos/2.png"]
        );
    }

    #[test]
    fn missing_slot_gets_numbered_placeholder() {
        let probe = FakeProbe::new(&[]);
        let resolver = PhotoResolver::new(layout());
        let got = pollster::block_on(resolver.resolve(3, &probe));
        assert!(got.is_placeholder());
        assert_eq!(got.url(), placeholder_data_uri(4));
        assert!(got.url().contains("Add%20photo%204"));
        assert_eq!(probe.seen.borrow().len(), 4);
    }

    #[test]
    fn resolution_is_memoized() {
        let probe = FakeProbe::new(&["assets/photos/1.jpeg"]);
        let resolver = PhotoResolver::new(layout());
        let a = pollster::block_on(resolver.resolve(0, &probe));
        let probes_after_first = probe.seen.borrow().len();
        let b = pollster::block_on(resolver.resolve(0, &probe));
        let c = pollster::block_on(resolver.resolve(5, &probe));
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(probe.seen.borrow().len(), probes_after_first);
        assert_eq!(resolver.cached(0), Some(a));
        assert_eq!(resolver.cached(1), None);
    }

    /// Suspends once before answering, like a real image load.
    struct SlowProbe {
        inner: FakeProbe,
    }

    impl ImageProbe for SlowProbe {
        async fn probe(&self, url: &str) -> bool {
            let mut yielded = false;
            poll_fn(|cx| {
                if yielded {
                    Poll::Ready(())
                } else {
                    yielded = true;
                    cx.waker().wake_by_ref();
                    Poll::Pending
                }
            })
            .await;
            self.inner.probe(url).await
        }
    }

    #[test]
    fn concurrent_resolves_of_one_slot_share_a_single_probe_run() {
        let probe = SlowProbe {
            inner: FakeProbe::new(&["assets/photos/1.png"]),
        };
        let resolver = PhotoResolver::new(layout());

        let mut a = std::pin::pin!(resolver.resolve(0, &probe));
        let mut b = std::pin::pin!(resolver.resolve(5, &probe));
        let (mut got_a, mut got_b) = (None, None);
        pollster::block_on(poll_fn(|cx| {
            if got_a.is_none() {
                if let Poll::Ready(v) = a.as_mut().poll(cx) {
                    got_a = Some(v);
                }
            }
            if got_b.is_none() {
                if let Poll::Ready(v) = b.as_mut().poll(cx) {
                    got_b = Some(v);
                }
            }
            if got_a.is_some() && got_b.is_some() {
                Poll::Ready(())
            } else {
                Poll::Pending
            }
        }));

        let expected = PhotoSource::Asset("assets/photos/1.png".to_string());
        assert_eq!(got_a, Some(expected.clone()));
        assert_eq!(got_b, Some(expected));
        assert_eq!(
            *probe.inner.seen.borrow(),
            ["assets/photos/1.jpg", "assets/photos/1.jpeg", "assets/photos/1.png"]
        );
    }

    struct NoopWake;

    impl std::task::Wake for NoopWake {
        fn wake(self: std::sync::Arc<Self>) {}
    }

    #[test]
    fn waiter_takes_over_when_the_probing_call_is_dropped() {
        let probe = SlowProbe {
            inner: FakeProbe::new(&[]),
        };
        let resolver = PhotoResolver::new(layout());

        {
            let mut first = std::pin::pin!(resolver.resolve(2, &probe));
            let waker = Waker::from(std::sync::Arc::new(NoopWake));
            let mut cx = std::task::Context::from_waker(&waker);
            assert!(first.as_mut().poll(&mut cx).is_pending());
            assert_eq!(resolver.cached(2), None);
        }

        let got = pollster::block_on(resolver.resolve(2, &probe));
        assert_eq!(got, PhotoSource::Placeholder(placeholder_data_uri(3)));
        assert_eq!(resolver.cached(2), Some(got));
    }

    #[test]
    fn placeholder_is_an_encoded_svg_data_uri() {
        let uri = placeholder_data_uri(1);
        assert!(uri.starts_with("data:image/svg+xml;charset=UTF-8,%3Csvg"));
        assert!(uri.contains("viewBox%3D'0%200%20800%20600'"));
        assert!(uri.contains("%23ffd6e0"));
        assert!(!uri.contains(' '));
        assert!(!uri.contains('#'));
    }

    #[test]
    fn gallery_fallback_swaps_each_element_once() {
        let mut fallback = GalleryFallback::new();
        let swap = fallback.take(2).expect("first error swaps");
        assert_eq!(swap.alt, "Placeholder image 3");
        assert_eq!(swap.src, placeholder_data_uri(3));
        assert_eq!(fallback.take(2), None);
        assert!(fallback.take(0).is_some());
    }
}
