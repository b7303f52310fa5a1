use valentine::evasive::Size;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

pub(super) fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or("dom: no window".to_string())
}

pub(super) fn document() -> Result<web_sys::Document, String> {
    window()?.document().ok_or("dom: no document".to_string())
}

pub(super) fn viewport_size() -> Size {
    let Ok(w) = window() else {
        return Size::default();
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Size::new(width, height)
}

pub(super) fn element_size(el: &web_sys::Element) -> Size {
    let r = el.get_bounding_client_rect();
    Size::new(r.width(), r.height())
}

pub(super) fn location_search() -> String {
    window()
        .ok()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

pub(super) fn location_href() -> String {
    window()
        .ok()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default()
}

/// Text of the element with `id`, if it exists.
pub(super) fn element_text(id: &str) -> Option<String> {
    document().ok()?.get_element_by_id(id)?.text_content()
}

pub(super) fn entropy_seed() -> u64 {
    let noise = js_sys::Math::random().to_bits();
    let now = js_sys::Date::now().to_bits();
    noise ^ now.rotate_left(17)
}

/// Run `f` once after `ms` milliseconds.
pub(super) fn set_timeout(ms: u32, f: impl FnOnce() + 'static) -> Result<i32, String> {
    let cb = Closure::once_into_js(f);
    window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms as i32)
        .map_err(|_| "dom: setTimeout failed".to_string())
}

/// Run `f` every `ms` milliseconds for the lifetime of the page.
pub(super) fn set_interval(ms: u32, f: impl FnMut() + 'static) -> Result<i32, String> {
    let w = window()?;
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
    let id = w
        .set_interval_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), ms as i32)
        .map_err(|_| "dom: setInterval failed".to_string())?;
    cb.forget();
    Ok(id)
}

/// Resolves after `ms` milliseconds (immediately when there is no window).
pub(super) async fn sleep_ms(ms: u32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().is_some_and(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32)
                .is_ok()
        });
        if !scheduled {
            let _ = resolve.call0(&JsValue::UNDEFINED);
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// Listen for `event` on `target`. The listener stays attached for the page's lifetime.
pub(super) fn add_listener<E: JsCast + 'static>(
    target: &web_sys::EventTarget,
    event: &str,
    f: impl FnMut(E) + 'static,
) -> Result<(), String> {
    let mut f = f;
    let cb = Closure::wrap(Box::new(move |ev: web_sys::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            f(ev);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .map_err(|_| format!("dom: addEventListener({event}) failed"))?;
    cb.forget();
    Ok(())
}

/// Listen for the first `event` on `target` only; the browser detaches the listener afterwards.
pub(super) fn add_once_listener(
    target: &web_sys::EventTarget,
    event: &str,
    f: impl FnOnce(web_sys::Event) + 'static,
) -> Result<(), String> {
    let opts = web_sys::AddEventListenerOptions::new();
    opts.set_once(true);
    let cb = Closure::once_into_js(f);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            cb.unchecked_ref(),
            &opts,
        )
        .map_err(|_| format!("dom: addEventListener({event}, once) failed"))
}
