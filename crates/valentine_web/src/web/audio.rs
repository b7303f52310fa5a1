//! Background music over one detached, looping `<audio>` element.

use valentine::audio::{MediaEvent, ToggleIntent};
use wasm_bindgen_futures::JsFuture;

use super::dom;
use super::{Runtime, UiSignals};
use crate::ui_model::PLAY_FAILED_HINT;

pub(super) fn create_music_element(src: &str) -> Result<web_sys::HtmlAudioElement, String> {
    let el = web_sys::HtmlAudioElement::new_with_src(src)
        .map_err(|_| "audio: HtmlAudioElement::new_with_src failed".to_string())?;
    el.set_loop(true);
    el.set_preload("auto");
    Ok(el)
}

/// `play()` and wait for the platform's verdict.
async fn try_play(el: &web_sys::HtmlMediaElement) -> bool {
    match el.play() {
        Ok(promise) => JsFuture::from(promise).await.is_ok(),
        Err(_) => false,
    }
}

/// Forward media events, then try to autoplay.
pub(super) fn install(rt: &Runtime, ui: UiSignals) {
    let Some(el) = rt.music.clone() else {
        return;
    };

    for (name, ev) in [
        ("play", MediaEvent::Play),
        ("pause", MediaEvent::Pause),
        ("ended", MediaEvent::Ended),
    ] {
        let rt = rt.clone();
        let res = dom::add_listener(&el, name, move |_: web_sys::Event| {
            rt.ctl.audio.borrow_mut().on_media_event(ev);
            ui.sync_audio(&rt.ctl);
        });
        if let Err(e) = res {
            tracing::warn!("{e}");
        }
    }

    if !rt.ctl.audio.borrow_mut().begin_autoplay() {
        return;
    }
    let rt = rt.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let ok = try_play(&el).await;
        rt.ctl.audio.borrow_mut().autoplay_result(ok);
        ui.sync_audio(&rt.ctl);
        if !ok {
            arm_unlock(&rt, ui);
        }
    });
}

/// Retry playback on the first pointer-down anywhere on the page.
fn arm_unlock(rt: &Runtime, ui: UiSignals) {
    let doc = match dom::document() {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!("{e}");
            return;
        }
    };
    let rt = rt.clone();
    let res = dom::add_once_listener(&doc, "pointerdown", move |_| {
        let retry = rt.ctl.audio.borrow_mut().take_unlock_attempt();
        ui.sync_audio(&rt.ctl);
        if retry {
            play_and_report(rt, ui, false);
        }
    });
    if let Err(e) = res {
        tracing::warn!("{e}");
    }
}

fn play_and_report(rt: Runtime, ui: UiSignals, hint_on_failure: bool) {
    let Some(el) = rt.music.clone() else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        let ok = try_play(&el).await;
        rt.ctl.audio.borrow_mut().play_result(ok);
        ui.sync_audio(&rt.ctl);
        if !ok && hint_on_failure {
            flash_hint(&rt, ui, PLAY_FAILED_HINT);
        }
    });
}

/// The music button.
pub(super) fn toggle(rt: &Runtime, ui: UiSignals) {
    let intent = rt.ctl.audio.borrow().toggle_intent();
    match intent {
        ToggleIntent::Play => play_and_report(rt.clone(), ui, true),
        ToggleIntent::Pause => {
            if let Some(el) = &rt.music {
                if el.pause().is_err() {
                    tracing::warn!("audio: pause failed");
                }
            }
        }
    }
}

/// Fire-and-forget start used by the celebration; a no-op once music is playing.
pub(super) fn start_music(rt: &Runtime, ui: UiSignals) {
    if rt.ctl.audio.borrow().is_playing() {
        return;
    }
    play_and_report(rt.clone(), ui, false);
}

/// Show `text` under the greeting for `hint_duration_ms`.
pub(super) fn flash_hint(rt: &Runtime, ui: UiSignals, text: &str) {
    let ticket = rt.ctl.audio.borrow_mut().flash_hint(text);
    ui.sync_audio(&rt.ctl);

    let ms = rt.ctl.config().hint_duration_ms;
    let rt = rt.clone();
    let res = dom::set_timeout(ms, move || {
        if rt.ctl.audio.borrow_mut().expire_hint(ticket) {
            ui.sync_audio(&rt.ctl);
        }
    });
    if let Err(e) = res {
        tracing::warn!("{e}");
    }
}
