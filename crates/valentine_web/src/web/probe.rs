use valentine::assets::ImageProbe;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Probes by loading the URL into a detached `<img>`.
pub(super) struct BrowserImageProbe;

impl ImageProbe for BrowserImageProbe {
    async fn probe(&self, url: &str) -> bool {
        match image_load_promise(url) {
            Ok(promise) => JsFuture::from(promise).await.is_ok(),
            Err(e) => {
                tracing::warn!("{e}");
                false
            }
        }
    }
}

fn image_load_promise(url: &str) -> Result<js_sys::Promise, String> {
    let img = web_sys::HtmlImageElement::new()
        .map_err(|_| "image: HtmlImageElement::new failed".to_string())?;

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let onload = Closure::once_into_js(move || {
            let _ = resolve.call0(&JsValue::UNDEFINED);
        });
        let onerror = Closure::once_into_js(move || {
            let _ = reject.call1(&JsValue::UNDEFINED, &JsValue::from_str("image: load error"));
        });
        img.set_onload(Some(onload.unchecked_ref()));
        img.set_onerror(Some(onerror.unchecked_ref()));
    });

    img.set_src(url);
    Ok(promise)
}
