use std::rc::Rc;

use leptos::prelude::*;
use valentine::config::PageConfig;
use valentine::controller::PageController;
use valentine::evasive::Point;
use valentine::slideshow::SlideChange;

use crate::ui_model::CONFIG_ELEMENT_ID;

mod audio;
mod confetti;
mod dom;
mod probe;
mod share;
mod shell;

use probe::BrowserImageProbe;
use shell::{Background, CelebrationOverlay, Gallery, HintLine, Proposal, TopActions};

pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let config = PageConfig::from_json_or_default(dom::element_text(CONFIG_ELEMENT_ID).as_deref());
    let ctl = PageController::new(config, &dom::location_search(), dom::entropy_seed());
    let music = match audio::create_music_element(&ctl.config().music_src) {
        Ok(el) => Some(el),
        Err(e) => {
            tracing::warn!("{e}");
            None
        }
    };
    let rt = Runtime {
        ctl: Rc::new(ctl),
        music,
    };

    mount_to_body(move || view! { <App rt=rt /> });
}

/// Page state shared by every handler. Cheap to clone.
#[derive(Clone)]
pub(super) struct Runtime {
    pub(super) ctl: Rc<PageController>,
    pub(super) music: Option<web_sys::HtmlAudioElement>,
}

/// View-facing mirror of the controller. Reactive closures read these,
/// never the controller itself.
#[derive(Clone, Copy)]
pub(super) struct UiSignals {
    pub(super) hint: RwSignal<Option<String>>,
    pub(super) music_playing: RwSignal<bool>,
    pub(super) overlay_open: RwSignal<bool>,
    pub(super) no_pos: RwSignal<Option<Point>>,
    pub(super) layer_src: [RwSignal<Option<String>>; 2],
    pub(super) visible_layer: RwSignal<usize>,
    pub(super) carousel_index: RwSignal<usize>,
    pub(super) slide_src: RwSignal<Vec<Option<String>>>,
}

impl UiSignals {
    fn new(photo_count: usize) -> Self {
        Self {
            hint: RwSignal::new(None),
            music_playing: RwSignal::new(false),
            overlay_open: RwSignal::new(false),
            no_pos: RwSignal::new(None),
            layer_src: [RwSignal::new(None), RwSignal::new(None)],
            visible_layer: RwSignal::new(0),
            carousel_index: RwSignal::new(0),
            slide_src: RwSignal::new(vec![None; photo_count]),
        }
    }

    pub(super) fn sync_audio(&self, ctl: &PageController) {
        let audio = ctl.audio.borrow();
        self.hint.set(audio.hint().map(str::to_string));
        self.music_playing.set(audio.is_playing());
    }

    fn apply_slide(&self, change: &SlideChange) {
        self.layer_src[change.show.index()].set(Some(change.source.url().to_string()));
        self.visible_layer.set(change.show.index());
    }
}

fn start_slideshow(rt: &Runtime, ui: UiSignals) {
    let ctl = Rc::clone(&rt.ctl);
    wasm_bindgen_futures::spawn_local(async move {
        ctl.slideshow
            .prime(&BrowserImageProbe, |c| ui.apply_slide(c))
            .await;
    });

    let cfg = rt.ctl.config();
    let crossfade = cfg.crossfade_ms;
    let ctl = Rc::clone(&rt.ctl);
    let res = dom::set_interval(cfg.slideshow_interval_ms, move || {
        let ctl = Rc::clone(&ctl);
        wasm_bindgen_futures::spawn_local(async move {
            ctl.slideshow
                .advance(
                    &BrowserImageProbe,
                    |c| ui.apply_slide(c),
                    dom::sleep_ms(crossfade),
                )
                .await;
        });
    });
    if let Err(e) = res {
        tracing::warn!("{e}");
    }
}

/// Keep a floating "No" button on screen when the viewport shrinks.
fn watch_resize(rt: &Runtime, ui: UiSignals, no_ref: NodeRef<leptos::html::Button>) -> Result<(), String> {
    let window = dom::window()?;
    let rt = rt.clone();
    dom::add_listener(&window, "resize", move |_: web_sys::Event| {
        let (Some(current), Some(btn)) = (ui.no_pos.get_untracked(), no_ref.get_untracked()) else {
            return;
        };
        let size = dom::element_size(&btn);
        let clamped = rt
            .ctl
            .evasive
            .borrow()
            .clamp_into(dom::viewport_size(), size, current);
        if let Some(p) = clamped {
            ui.no_pos.set(Some(p));
        }
    })
}

#[component]
fn App(rt: Runtime) -> impl IntoView {
    let ui = UiSignals::new(rt.ctl.photo_count());
    let no_ref = NodeRef::<leptos::html::Button>::new();

    audio::install(&rt, ui);
    start_slideshow(&rt, ui);
    if let Err(e) = watch_resize(&rt, ui, no_ref) {
        tracing::warn!("{e}");
    }

    let name = rt.ctl.name().to_string();
    let gallery = rt.ctl.config().gallery;

    view! {
        <Background ui=ui />
        <main class="page">
            <TopActions rt=rt.clone() ui=ui />
            <Proposal rt=rt.clone() ui=ui name=name no_ref=no_ref />
            <HintLine ui=ui />
            <Gallery rt=rt.clone() ui=ui mode=gallery />
        </main>
        <CelebrationOverlay rt=rt ui=ui />
    }
}
