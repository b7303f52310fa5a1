use std::rc::Rc;

use leptos::prelude::*;
use valentine::carousel::{track_transform, CarouselCommand};
use valentine::celebration::ClickTarget;
use valentine::config::GalleryMode;
use valentine::fmt::px;
use valentine::share::share_with_fallback;

use super::probe::BrowserImageProbe;
use super::share::BrowserShareTarget;
use super::{audio, confetti, dom, Runtime, UiSignals};
use crate::ui_model::{dot_label, greeting, slide_alt, TopAction};

/// The two crossfading background layers.
#[component]
pub(super) fn Background(ui: UiSignals) -> impl IntoView {
    let layers = [0usize, 1]
        .into_iter()
        .map(|i| {
            view! {
                <div
                    class="bg-layer"
                    class:is-visible=move || ui.visible_layer.get() == i
                    style=move || {
                        ui.layer_src[i]
                            .get()
                            .map(|src| format!("background-image: url(\"{src}\");"))
                            .unwrap_or_default()
                    }
                ></div>
            }
        })
        .collect_view();

    view! { <div class="bg" aria-hidden="true">{layers}</div> }
}

fn share_page(rt: &Runtime, ui: UiSignals) {
    let rt = rt.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let payload = rt.ctl.share_payload(dom::location_href());
        let outcome = share_with_fallback(&BrowserShareTarget::new(), &payload).await;
        tracing::info!(?outcome, "share finished");
        if let Some(hint) = outcome.hint() {
            audio::flash_hint(&rt, ui, &hint);
        }
    });
}

#[component]
pub(super) fn TopActions(rt: Runtime, ui: UiSignals) -> impl IntoView {
    let buttons = TopAction::all()
        .iter()
        .copied()
        .map(|action| {
            let rt = rt.clone();
            let on_click = move |_| match action {
                TopAction::Music => audio::toggle(&rt, ui),
                TopAction::Share => share_page(&rt, ui),
            };
            let pressed = move || {
                (action == TopAction::Music)
                    .then(|| if ui.music_playing.get() { "true" } else { "false" })
            };
            view! {
                <button
                    class="top-action"
                    aria-pressed=pressed
                    aria-label=move || action.label(ui.music_playing.get())
                    title=move || action.label(ui.music_playing.get())
                    on:click=on_click
                >
                    {move || action.icon(ui.music_playing.get())}
                </button>
            }
        })
        .collect_view();

    view! { <nav class="top-actions">{buttons}</nav> }
}

#[component]
pub(super) fn HintLine(ui: UiSignals) -> impl IntoView {
    view! {
        <p
            class="hint"
            class:is-visible=move || ui.hint.with(|h| h.is_some())
            role="status"
            aria-live="polite"
        >
            {move || ui.hint.get().unwrap_or_default()}
        </p>
    }
}

fn launch_bursts(rt: &Runtime) {
    let bursts = rt.ctl.celebration.borrow_mut().confirm();
    for burst in bursts {
        let ctl = Rc::clone(&rt.ctl);
        let fire = move || {
            if let Err(e) = confetti::launch_burst(&ctl, burst.count) {
                tracing::warn!("{e}");
            }
        };
        if burst.delay_ms == 0 {
            fire();
        } else if let Err(e) = dom::set_timeout(burst.delay_ms, fire) {
            tracing::warn!("{e}");
        }
    }
}

/// Move the "No" button somewhere else on screen.
fn flee(rt: &Runtime, ui: UiSignals, no_ref: NodeRef<leptos::html::Button>, ev: &web_sys::Event) {
    ev.prevent_default();
    ev.stop_propagation();
    let Some(btn) = no_ref.get_untracked() else {
        return;
    };
    let size = dom::element_size(&btn);
    let p = rt.ctl.relocate_evasive(dom::viewport_size(), size);
    ui.no_pos.set(Some(p));
}

#[component]
pub(super) fn Proposal(
    rt: Runtime,
    ui: UiSignals,
    name: String,
    no_ref: NodeRef<leptos::html::Button>,
) -> impl IntoView {
    let on_yes = {
        let rt = rt.clone();
        move |_| {
            ui.overlay_open.set(true);
            audio::start_music(&rt, ui);
            launch_bursts(&rt);
        }
    };

    let on_enter = {
        let rt = rt.clone();
        move |ev: web_sys::MouseEvent| flee(&rt, ui, no_ref, &ev)
    };
    let on_pointer = {
        let rt = rt.clone();
        move |ev: web_sys::PointerEvent| flee(&rt, ui, no_ref, &ev)
    };
    let on_touch = {
        let rt = rt.clone();
        move |ev: web_sys::TouchEvent| flee(&rt, ui, no_ref, &ev)
    };
    let on_click = move |ev: web_sys::MouseEvent| flee(&rt, ui, no_ref, &ev);

    view! {
        <section class="proposal">
            <h1 class="greeting">{greeting(&name)}</h1>
            <div class="answers">
                <button class="answer answer-yes" on:click=on_yes>
                    "Yes"
                </button>
                <button
                    class="answer answer-no"
                    class:is-floating=move || ui.no_pos.with(|p| p.is_some())
                    style=move || {
                        ui.no_pos
                            .get()
                            .map(|p| format!("left: {}; top: {};", px(p.x), px(p.y)))
                            .unwrap_or_default()
                    }
                    node_ref=no_ref
                    on:mouseenter=on_enter
                    on:pointerdown=on_pointer
                    on:touchstart=on_touch
                    on:click=on_click
                >
                    "No"
                </button>
            </div>
        </section>
    }
}

#[component]
pub(super) fn CelebrationOverlay(rt: Runtime, ui: UiSignals) -> impl IntoView {
    let name = rt.ctl.name().to_string();

    let on_backdrop = {
        let rt = rt.clone();
        move |ev: web_sys::MouseEvent| {
            let target = if ev.target() == ev.current_target() {
                ClickTarget::Backdrop
            } else {
                ClickTarget::Content
            };
            if rt.ctl.celebration.borrow_mut().overlay_mut().click(target) {
                ui.overlay_open.set(false);
            }
        }
    };

    let on_close = move |_| {
        rt.ctl.celebration.borrow_mut().overlay_mut().close();
        ui.overlay_open.set(false);
    };

    view! {
        <div
            class="overlay"
            class:is-open=move || ui.overlay_open.get()
            aria-hidden=move || if ui.overlay_open.get() { "false" } else { "true" }
            on:click=on_backdrop
        >
            <div class="overlay-card" role="dialog" aria-modal="true">
                <h2>"Yay! 💖"</h2>
                <p>{format!("I knew you would say yes, {name}!")}</p>
                <button class="overlay-close" on:click=on_close>
                    "Close"
                </button>
            </div>
        </div>
    }
}

fn go(rt: &Runtime, ui: UiSignals, cmd: CarouselCommand) {
    let index = rt.ctl.carousel.borrow_mut().apply(cmd);
    ui.carousel_index.set(index);
}

#[component]
fn Carousel(rt: Runtime, ui: UiSignals) -> impl IntoView {
    let count = rt.ctl.carousel.borrow().count();

    {
        let ctl = Rc::clone(&rt.ctl);
        wasm_bindgen_futures::spawn_local(async move {
            for i in 0..count {
                let source = ctl.resolver().resolve(i, &BrowserImageProbe).await;
                ui.slide_src.update(|srcs| {
                    if let Some(slot) = srcs.get_mut(i) {
                        *slot = Some(source.url().to_string());
                    }
                });
            }
        });
    }

    match dom::window() {
        Ok(window) => {
            let rt = rt.clone();
            let res = dom::add_listener(&window, "keydown", move |ev: web_sys::KeyboardEvent| {
                if let Some(cmd) = CarouselCommand::from_key(&ev.key()) {
                    go(&rt, ui, cmd);
                }
            });
            if let Err(e) = res {
                tracing::warn!("{e}");
            }
        }
        Err(e) => tracing::warn!("{e}"),
    }

    let slides = (0..count)
        .map(|i| {
            view! {
                <div class="slide" class:is-active=move || ui.carousel_index.get() == i>
                    <img
                        alt=slide_alt(i)
                        src=move || ui.slide_src.with(|srcs| srcs.get(i).cloned().flatten())
                    />
                </div>
            }
        })
        .collect_view();

    let dots = (0..count)
        .map(|i| {
            let rt = rt.clone();
            view! {
                <button
                    class="dot"
                    class:is-active=move || ui.carousel_index.get() == i
                    aria-label=dot_label(i, count)
                    aria-current=move || if ui.carousel_index.get() == i { "true" } else { "false" }
                    on:click=move |_| go(&rt, ui, CarouselCommand::GoTo(i))
                ></button>
            }
        })
        .collect_view();

    let on_prev = {
        let rt = rt.clone();
        move |_| go(&rt, ui, CarouselCommand::Prev)
    };
    let on_next = {
        let rt = rt.clone();
        move |_| go(&rt, ui, CarouselCommand::Next)
    };
    let on_touch_start = {
        let rt = rt.clone();
        move |ev: web_sys::TouchEvent| {
            if let Some(t) = ev.touches().get(0) {
                rt.ctl.swipe.borrow_mut().start(f64::from(t.client_x()));
            }
        }
    };
    let on_touch_end = {
        let rt = rt.clone();
        move |ev: web_sys::TouchEvent| {
            let Some(t) = ev.changed_touches().get(0) else {
                return;
            };
            let cmd = rt.ctl.swipe.borrow_mut().end(f64::from(t.client_x()));
            if let Some(cmd) = cmd {
                go(&rt, ui, cmd);
            }
        }
    };
    let on_touch_cancel = move |_| rt.ctl.swipe.borrow_mut().cancel();

    view! {
        <section class="carousel" aria-roledescription="carousel">
            <div
                class="carousel-viewport"
                on:touchstart=on_touch_start
                on:touchend=on_touch_end
                on:touchcancel=on_touch_cancel
            >
                <div
                    class="carousel-track"
                    style=move || format!("transform: {};", track_transform(ui.carousel_index.get()))
                >
                    {slides}
                </div>
            </div>
            <button class="carousel-nav prev" aria-label="Previous photo" on:click=on_prev>
                "‹"
            </button>
            <button class="carousel-nav next" aria-label="Next photo" on:click=on_next>
                "›"
            </button>
            <div class="dots">{dots}</div>
        </section>
    }
}

/// Static photo grid; a broken image is swapped for its placeholder once.
#[component]
fn Grid(rt: Runtime) -> impl IntoView {
    let layout = rt.ctl.config().asset_layout();

    let items = (0..layout.photo_count())
        .map(|i| {
            let first = layout.candidates(i).into_iter().next().unwrap_or_default();
            let src = RwSignal::new(first);
            let alt = RwSignal::new(slide_alt(i));
            let rt = rt.clone();
            let on_error = move |_| {
                let swap = rt.ctl.gallery.borrow_mut().take(i);
                if let Some(swap) = swap {
                    tracing::debug!(index = i, "gallery image swapped for placeholder");
                    src.set(swap.src);
                    alt.set(swap.alt);
                }
            };
            view! {
                <img
                    class="grid-photo"
                    loading="lazy"
                    src=move || src.get()
                    alt=move || alt.get()
                    on:error=on_error
                />
            }
        })
        .collect_view();

    view! { <section class="grid">{items}</section> }
}

#[component]
pub(super) fn Gallery(rt: Runtime, ui: UiSignals, mode: GalleryMode) -> impl IntoView {
    match mode {
        GalleryMode::Carousel => view! { <Carousel rt=rt ui=ui /> }.into_any(),
        GalleryMode::Grid => view! { <Grid rt=rt /> }.into_any(),
    }
}
