use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use vizij_carousel_core::{
    Axis, Carousel, CarouselConfig, ElementRef, SettleCallback, SnapModel, TrackStyle,
    TransitionEnd, TransitionHandler, TransitionObserver, TransitionTarget,
};

const TRANSITION_END: &str = "transitionend";

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn parse_axis(axis: &str) -> Result<Axis, JsError> {
    axis.parse::<Axis>()
        .map_err(|e| JsError::new(&format!("axis error: {e}")))
}

/// Fold an offset into the centered loop band. `snap_spacing == 0` is identity.
#[wasm_bindgen]
pub fn normalize_loop(offset: f64, snap_spacing: f64) -> f64 {
    vizij_carousel_core::normalize_loop(offset, snap_spacing)
}

/// Nearest snap index (lowest index on ties, 0 for an empty list).
#[wasm_bindgen]
pub fn resolve_snap_target(offset: f64, snap_points: Vec<f64>) -> u32 {
    vizij_carousel_core::resolve_snap_target(offset, &snap_points) as u32
}

#[wasm_bindgen]
pub fn compute_anchor_lock(current: f64, target: f64) -> f64 {
    vizij_carousel_core::compute_anchor_lock(current, target)
}

/// `axis` must be "x" or "y".
#[wasm_bindgen]
pub fn compute_transform(offset_px: f64, axis: &str) -> Result<String, JsError> {
    Ok(vizij_carousel_core::compute_transform(
        offset_px,
        parse_axis(axis)?,
    ))
}

#[wasm_bindgen]
pub fn compute_transition(duration_ms: f64, easing: &str) -> String {
    vizij_carousel_core::compute_transition(duration_ms, easing)
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}

fn style_to_js(style: &TrackStyle) -> Result<JsValue, JsError> {
    swb::to_value(style).map_err(|e| JsError::new(&format!("style error: {e}")))
}

/// Interaction session over a measured track.
#[wasm_bindgen]
pub struct VizijCarousel {
    core: Carousel,
}

#[wasm_bindgen]
impl VizijCarousel {
    /// Create a session from a SnapModel object and an optional config object.
    /// Example:
    ///   new VizijCarousel({ axis: "x", slideCount: 2, snapPoints: [0, -320],
    ///                       slideSizes: [320, 320], viewportSize: 320, loop: false },
    ///                     { duration_ms: 250 })
    #[wasm_bindgen(constructor)]
    pub fn new(model: JsValue, config: JsValue) -> Result<VizijCarousel, JsError> {
        console_error_panic_hook::set_once();

        let model: SnapModel =
            swb::from_value(model).map_err(|e| JsError::new(&format!("model error: {e}")))?;
        let cfg: CarouselConfig = if jsvalue_is_undefined_or_null(&config) {
            CarouselConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let core =
            Carousel::new(model, cfg).map_err(|e| JsError::new(&format!("carousel error: {e}")))?;
        Ok(VizijCarousel { core })
    }

    #[wasm_bindgen(js_name = begin_drag)]
    pub fn begin_drag(&mut self) {
        self.core.begin_drag();
    }

    /// Returns `{ transform }` for the dragged frame.
    #[wasm_bindgen(js_name = drag_by)]
    pub fn drag_by(&mut self, delta: f64) -> Result<JsValue, JsError> {
        style_to_js(&self.core.drag_by(delta))
    }

    /// Returns `{ transform, transition }` for the settle animation.
    #[wasm_bindgen(js_name = end_drag)]
    pub fn end_drag(&mut self) -> Result<JsValue, JsError> {
        style_to_js(&self.core.end_drag())
    }

    #[wasm_bindgen(js_name = go_to)]
    pub fn go_to(&mut self, index: u32) -> Result<JsValue, JsError> {
        style_to_js(&self.core.go_to(index as usize))
    }

    pub fn next(&mut self) -> Result<JsValue, JsError> {
        style_to_js(&self.core.next())
    }

    pub fn prev(&mut self) -> Result<JsValue, JsError> {
        style_to_js(&self.core.prev())
    }

    /// Call after the settle transition ends. Returns a transition-free
    /// frame, or null when nothing moved.
    pub fn settle(&mut self) -> Result<JsValue, JsError> {
        match self.core.settle() {
            Some(style) => style_to_js(&style),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn style(&self) -> Result<JsValue, JsError> {
        style_to_js(&self.core.style())
    }

    pub fn offset(&self) -> f64 {
        self.core.offset()
    }

    pub fn index(&self) -> u32 {
        self.core.index() as u32
    }
}

/// Any JS object exposing `addEventListener`/`removeEventListener`
/// (normally a DOM element). Identity is `Object.is`.
#[derive(Clone)]
struct JsElement(JsValue);

fn call_listener_method(target: &JsValue, method: &str, listener: &JsValue) -> Result<(), JsValue> {
    let f: Function = Reflect::get(target, &JsValue::from_str(method))?.dyn_into()?;
    f.call2(target, &JsValue::from_str(TRANSITION_END), listener)?;
    Ok(())
}

impl TransitionTarget for JsElement {
    type Registration = Option<Closure<dyn FnMut(JsValue)>>;

    fn same_element(&self, other: &Self) -> bool {
        Object::is(&self.0, &other.0)
    }

    fn listen(&self, handler: TransitionHandler<Self>) -> Self::Registration {
        let closure = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            let target = Reflect::get(&event, &JsValue::from_str("target"))
                .unwrap_or(JsValue::UNDEFINED);
            let property_name = Reflect::get(&event, &JsValue::from_str("propertyName"))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default();
            handler(&TransitionEnd {
                target: JsElement(target),
                property_name,
            });
        });
        match call_listener_method(&self.0, "addEventListener", closure.as_ref()) {
            Ok(()) => Some(closure),
            Err(err) => {
                log::warn!("transition watcher: addEventListener failed: {err:?}");
                None
            }
        }
    }

    fn unlisten(&self, registration: Self::Registration) {
        let Some(closure) = registration else {
            return;
        };
        if let Err(err) = call_listener_method(&self.0, "removeEventListener", closure.as_ref()) {
            log::warn!("transition watcher: removeEventListener failed: {err:?}");
        }
    }
}

/// Watches `transitionend` on a track element and calls back once per
/// transform completion fired by the element itself.
///
/// Call `sync(element, callback)` whenever either may have changed (e.g. on
/// every render); the listener is only moved when identities differ.
/// `dispose()` removes it.
#[wasm_bindgen]
pub struct TransitionWatcher {
    element: ElementRef<JsElement>,
    callback: Option<(Function, SettleCallback)>,
    observer: TransitionObserver<JsElement>,
}

impl Default for TransitionWatcher {
    fn default() -> Self {
        Self {
            element: ElementRef::new(),
            callback: None,
            observer: TransitionObserver::new(),
        }
    }
}

#[wasm_bindgen]
impl TransitionWatcher {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TransitionWatcher {
        console_error_panic_hook::set_once();
        TransitionWatcher::default()
    }

    /// `element` may be null/undefined (not mounted yet).
    pub fn sync(&mut self, element: JsValue, callback: Function) {
        let element = if jsvalue_is_undefined_or_null(&element) {
            None
        } else {
            Some(JsElement(element))
        };
        self.element.set(element);
        let settle = self.settle_callback(callback);
        self.observer.sync(&self.element, &settle);
    }

    #[wasm_bindgen(js_name = is_subscribed)]
    pub fn is_subscribed(&self) -> bool {
        self.observer.is_subscribed()
    }

    pub fn dispose(&mut self) {
        self.observer.unsubscribe();
        self.element.set(None);
        self.callback = None;
    }

    /// Reuse the wrapper while the JS function is the same object so the
    /// observer sees a stable callback identity.
    fn settle_callback(&mut self, callback: Function) -> SettleCallback {
        if let Some((prev, settle)) = &self.callback {
            if Object::is(prev, &callback) {
                return Rc::clone(settle);
            }
        }
        let f = callback.clone();
        let settle: SettleCallback = Rc::new(move || {
            if let Err(err) = f.call0(&JsValue::UNDEFINED) {
                log::warn!("transition watcher: callback threw: {err:?}");
            }
        });
        self.callback = Some((callback, Rc::clone(&settle)));
        settle
    }
}
