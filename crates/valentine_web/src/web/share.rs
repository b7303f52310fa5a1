use valentine::error::ShareError;
use valentine::share::{SharePayload, ShareTarget};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Web Share API and async clipboard, looked up dynamically since either may be missing.
pub(super) struct BrowserShareTarget {
    navigator: JsValue,
}

impl BrowserShareTarget {
    pub(super) fn new() -> Self {
        let navigator = web_sys::window()
            .map(|w| JsValue::from(w.navigator()))
            .unwrap_or(JsValue::UNDEFINED);
        Self { navigator }
    }

    fn clipboard(&self) -> Option<JsValue> {
        js_sys::Reflect::get(&self.navigator, &JsValue::from_str("clipboard"))
            .ok()
            .filter(|c| !c.is_undefined() && !c.is_null())
    }
}

fn method(target: &JsValue, name: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()
}

/// Cancel and permission errors are the visitor's (or platform's) "no".
fn classify(err: JsValue) -> ShareError {
    let name = js_sys::Reflect::get(&err, &JsValue::from_str("name"))
        .ok()
        .and_then(|n| n.as_string())
        .unwrap_or_default();
    match name.as_str() {
        "AbortError" | "NotAllowedError" => ShareError::Declined,
        "" => ShareError::Failed("unknown error".to_string()),
        _ => ShareError::Failed(name),
    }
}

async fn await_call(promise: JsValue) -> Result<(), ShareError> {
    let promise = promise
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| ShareError::Failed("not a promise".to_string()))?;
    JsFuture::from(promise).await.map(|_| ()).map_err(classify)
}

impl ShareTarget for BrowserShareTarget {
    fn can_share_natively(&self) -> bool {
        method(&self.navigator, "share").is_some()
    }

    async fn share_native(&self, payload: &SharePayload) -> Result<(), ShareError> {
        let share = method(&self.navigator, "share").ok_or(ShareError::Unavailable)?;
        let data = js_sys::Object::new();
        for (key, value) in [
            ("title", &payload.title),
            ("text", &payload.text),
            ("url", &payload.url),
        ] {
            js_sys::Reflect::set(&data, &JsValue::from_str(key), &JsValue::from_str(value))
                .map_err(|_| ShareError::Failed(format!("set {key}")))?;
        }
        let promise = share.call1(&self.navigator, &data).map_err(classify)?;
        await_call(promise).await
    }

    fn has_clipboard(&self) -> bool {
        self.clipboard()
            .is_some_and(|c| method(&c, "writeText").is_some())
    }

    async fn write_clipboard(&self, text: &str) -> Result<(), ShareError> {
        let clipboard = self.clipboard().ok_or(ShareError::Unavailable)?;
        let write = method(&clipboard, "writeText").ok_or(ShareError::Unavailable)?;
        let promise = write
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(classify)?;
        await_call(promise).await
    }
}
