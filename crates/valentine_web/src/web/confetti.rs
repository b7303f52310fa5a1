use std::cell::RefCell;
use std::rc::Rc;

use valentine::confetti::{BurstEvent, BurstTracker, Keyframe, ParticleSpec, EASING};
use valentine::controller::PageController;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::dom;

fn set(obj: &js_sys::Object, key: &str, value: &JsValue) -> Result<(), String> {
    js_sys::Reflect::set(obj, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|_| format!("confetti: failed to set {key}"))
}

fn keyframes_js(frames: &[Keyframe]) -> Result<js_sys::Array, String> {
    let arr = js_sys::Array::new();
    for f in frames {
        let obj = js_sys::Object::new();
        set(&obj, "transform", &JsValue::from_str(&f.transform))?;
        set(&obj, "opacity", &JsValue::from_f64(f.opacity))?;
        if let Some(offset) = f.offset {
            set(&obj, "offset", &JsValue::from_f64(offset))?;
        }
        arr.push(&obj);
    }
    Ok(arr)
}

fn timing_js(spec: &ParticleSpec) -> Result<js_sys::Object, String> {
    let obj = js_sys::Object::new();
    set(&obj, "duration", &JsValue::from_f64(spec.duration_ms))?;
    set(&obj, "delay", &JsValue::from_f64(spec.delay_ms))?;
    set(&obj, "easing", &JsValue::from_str(EASING))?;
    set(&obj, "fill", &JsValue::from_str("forwards"))?;
    Ok(obj)
}

/// `el.animate(keyframes, timing)`.
fn animate(el: &web_sys::Element, spec: &ParticleSpec) -> Result<web_sys::Animation, String> {
    let func = js_sys::Reflect::get(el, &JsValue::from_str("animate"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
        .ok_or("confetti: Element.animate unavailable".to_string())?;
    let anim = func
        .call2(el, &keyframes_js(&spec.keyframes())?, &timing_js(spec)?)
        .map_err(|_| "confetti: animate() threw".to_string())?;
    anim.dyn_into::<web_sys::Animation>()
        .map_err(|_| "confetti: animate() returned a non-Animation".to_string())
}

fn finish_particle(piece: &web_sys::Element, layer: &web_sys::Element, tracker: &RefCell<BurstTracker>) {
    let event = tracker.borrow_mut().particle_finished();
    match event {
        BurstEvent::ParticleRemoved => piece.remove(),
        BurstEvent::ParticleAndContainerRemoved => {
            piece.remove();
            layer.remove();
        }
        BurstEvent::Ignored => {}
    }
}

/// Spawn `count` particles in a fresh full-screen layer. The layer removes
/// itself once every particle's animation has finished.
pub(super) fn launch_burst(ctl: &PageController, count: usize) -> Result<(), String> {
    let doc = dom::document()?;
    let body = doc.body().ok_or("confetti: no body".to_string())?;

    let layer = doc
        .create_element("div")
        .map_err(|_| "confetti: create layer failed".to_string())?;
    layer.set_class_name("confetti-layer");
    layer
        .set_attribute("aria-hidden", "true")
        .map_err(|_| "confetti: set aria-hidden failed".to_string())?;

    let specs = ctl.plan_burst(dom::viewport_size(), count);
    if specs.is_empty() {
        return Ok(());
    }
    body.append_child(&layer)
        .map_err(|_| "confetti: append layer failed".to_string())?;

    let tracker = Rc::new(RefCell::new(BurstTracker::new(specs.len())));
    for spec in &specs {
        let piece = doc
            .create_element("span")
            .map_err(|_| "confetti: create piece failed".to_string())?;
        piece.set_class_name("confetti-piece");
        piece
            .set_attribute("style", &spec.style())
            .map_err(|_| "confetti: set style failed".to_string())?;
        layer
            .append_child(&piece)
            .map_err(|_| "confetti: append piece failed".to_string())?;

        match animate(&piece, spec) {
            Ok(anim) => {
                let (piece, layer, tracker) = (piece.clone(), layer.clone(), Rc::clone(&tracker));
                let onfinish = Closure::once_into_js(move || finish_particle(&piece, &layer, &tracker));
                anim.set_onfinish(Some(onfinish.unchecked_ref()));
            }
            Err(e) => {
                tracing::debug!("{e}");
                finish_particle(&piece, &layer, &tracker);
            }
        }
    }
    tracing::debug!(particles = specs.len(), "confetti burst launched");
    Ok(())
}
