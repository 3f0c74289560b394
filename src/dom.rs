//! Browser host for the positioning engine.
//!
//! [`Positioner`] owns a [`PositionEngine`] bound to a floating element. While
//! active it listens for window resize, scroll on the window and every
//! scrollable ancestor of the anchor and the panel, and outside interaction
//! (pointer, focus, Escape). Geometry triggers are batched into one
//! `requestAnimationFrame` callback; every recomputation is written back to
//! the panel as `left`/`top` and a `data-placement` attribute.
//!
//! Listener callbacks only hold a `Weak` handle to the engine and use
//! `try_borrow_mut`, so a trigger fired while the engine is mid-computation
//! is dropped instead of re-entering it.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventTarget, HtmlElement, KeyboardEvent, Node, Window};

use crate::anchor::AnchorSource;
use crate::compute::PositionResult;
use crate::engine::{Environment, PositionEngine, Trigger};
use crate::options::PositionOptions;
use crate::rect::{Rect, Size};

type SharedEngine = Rc<RefCell<PositionEngine<BrowserEnvironment>>>;
type WeakEngine = Weak<RefCell<PositionEngine<BrowserEnvironment>>>;

// =============================================================================
// LISTENERS
// =============================================================================

/// One registered DOM listener. Dropping the guard removes it.
pub struct ListenerGuard {
    target: EventTarget,
    event: &'static str,
    capture: bool,
    callback: Closure<dyn FnMut(Event)>,
}

impl ListenerGuard {
    fn attach(target: &EventTarget, event: &'static str, capture: bool, callback: Closure<dyn FnMut(Event)>) -> Option<Self> {
        match target.add_event_listener_with_callback_and_bool(event, callback.as_ref().unchecked_ref(), capture) {
            Ok(()) => Some(Self { target: target.clone(), event, capture, callback }),
            Err(err) => {
                tracing::warn!(event, error = ?err, "failed to attach listener");
                None
            }
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let removed = self.target.remove_event_listener_with_callback_and_bool(
            self.event,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        );
        if let Err(err) = removed {
            tracing::warn!(event = self.event, error = ?err, "failed to detach listener");
        }
    }
}

/// Forward a trigger to the engine unless it is gone or busy.
fn dispatch(engine: &WeakEngine, trigger: Trigger) {
    let Some(engine) = engine.upgrade() else {
        return;
    };
    let Ok(mut engine) = engine.try_borrow_mut() else {
        tracing::debug!(?trigger, "engine busy; dropping trigger");
        return;
    };
    engine.notify(trigger);
}

// =============================================================================
// FRAMES
// =============================================================================

/// The outstanding animation-frame request, shared with its own callback.
#[derive(Default)]
struct FrameSlot {
    id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

/// Request one animation frame that runs the engine's coalesced recomputation.
///
/// A frame that finds the engine busy schedules itself again, so the
/// engine's pending flag is always eventually cleared.
fn schedule_frame(window: &Window, engine: WeakEngine, slot: &Rc<FrameSlot>) -> Result<(), JsValue> {
    let slot_for_cb = Rc::clone(slot);
    let callback = Closure::wrap(Box::new(move |_ts: f64| {
        slot_for_cb.id.set(None);
        let busy = engine.upgrade().is_some_and(|engine| !run_frame(&engine));
        // Released at the end of the call, after any retry has been stored.
        let current = slot_for_cb.callback.borrow_mut().take();
        if busy {
            tracing::debug!("engine busy; retrying on next frame");
            let retried = web_sys::window()
                .ok_or_else(|| JsValue::from_str("no window"))
                .and_then(|window| schedule_frame(&window, engine.clone(), &slot_for_cb));
            if let Err(err) = retried {
                tracing::warn!(error = ?err, "failed to reschedule frame");
            }
        }
        drop(current);
    }) as Box<dyn FnMut(f64)>);

    let id = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    slot.id.set(Some(id));
    *slot.callback.borrow_mut() = Some(callback);
    Ok(())
}

/// Run the pending recomputation. Returns `false` if the engine was borrowed.
fn run_frame(engine: &SharedEngine) -> bool {
    let Ok(mut engine) = engine.try_borrow_mut() else {
        return false;
    };
    if let Some(result) = engine.on_frame() {
        apply_position(engine.environment().floating(), &result);
    }
    true
}

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// [`Environment`] backed by the browser window.
pub struct BrowserEnvironment {
    engine: WeakEngine,
    floating: HtmlElement,
    frame: Rc<FrameSlot>,
}

impl BrowserEnvironment {
    fn new(engine: WeakEngine, floating: HtmlElement) -> Self {
        Self { engine, floating, frame: Rc::new(FrameSlot::default()) }
    }

    /// The panel this environment positions.
    #[must_use]
    pub fn floating(&self) -> &HtmlElement {
        &self.floating
    }

    fn trigger_callback(&self, trigger: Trigger) -> Closure<dyn FnMut(Event)> {
        let engine = self.engine.clone();
        Closure::wrap(Box::new(move |_event: Event| dispatch(&engine, trigger)) as Box<dyn FnMut(Event)>)
    }

    fn outside_callback(&self, anchor: Option<Element>) -> Closure<dyn FnMut(Event)> {
        let engine = self.engine.clone();
        let floating = self.floating.clone();
        Closure::wrap(Box::new(move |event: Event| {
            let Some(target) = event.target() else {
                return;
            };
            let Some(node) = target.dyn_ref::<Node>() else {
                return;
            };
            let inside_anchor = anchor.as_ref().is_some_and(|anchor| anchor.contains(Some(node)));
            if inside_anchor || floating.contains(Some(node)) {
                return;
            }
            dispatch(&engine, Trigger::Dismiss);
        }) as Box<dyn FnMut(Event)>)
    }

    fn escape_callback(&self) -> Closure<dyn FnMut(Event)> {
        let engine = self.engine.clone();
        Closure::wrap(Box::new(move |event: Event| {
            if event.dyn_ref::<KeyboardEvent>().is_some_and(|key| key.key() == "Escape") {
                dispatch(&engine, Trigger::Dismiss);
            }
        }) as Box<dyn FnMut(Event)>)
    }
}

impl Environment for BrowserEnvironment {
    type Subscription = Vec<ListenerGuard>;

    fn viewport(&self) -> Rect {
        let Some(window) = web_sys::window() else {
            return Rect::ZERO;
        };
        if let Some(root) = window.document().and_then(|document| document.document_element()) {
            return Rect::new(0.0, 0.0, f64::from(root.client_width()), f64::from(root.client_height()));
        }
        let width = window.inner_width().map_or(0.0, |value| value.as_f64().unwrap_or(0.0));
        let height = window.inner_height().map_or(0.0, |value| value.as_f64().unwrap_or(0.0));
        Rect::new(0.0, 0.0, width, height)
    }

    fn subscribe(&mut self, anchor: &AnchorSource) -> Vec<ListenerGuard> {
        let Some(window) = web_sys::window() else {
            tracing::warn!("no window; positioning will not track resize or scroll");
            return Vec::new();
        };
        let anchor_element = anchor.element().cloned();
        let mut guards = Vec::new();

        guards.extend(ListenerGuard::attach(&window, "resize", false, self.trigger_callback(Trigger::Resize)));

        let mut observed: Vec<Element> = anchor_element.iter().cloned().collect();
        observed.push(self.floating.clone().into());
        for target in scroll_targets(&window, &observed) {
            guards.extend(ListenerGuard::attach(&target, "scroll", false, self.trigger_callback(Trigger::Scroll)));
        }

        if let Some(document) = window.document() {
            for event in ["pointerdown", "focusin"] {
                guards.extend(ListenerGuard::attach(&document, event, true, self.outside_callback(anchor_element.clone())));
            }
            guards.extend(ListenerGuard::attach(&document, "keydown", true, self.escape_callback()));
        }

        tracing::debug!(listeners = guards.len(), "positioning listeners attached");
        guards
    }

    fn request_frame(&mut self) -> bool {
        let Some(window) = web_sys::window() else {
            tracing::warn!("no window; cannot schedule frame");
            return false;
        };
        match schedule_frame(&window, self.engine.clone(), &self.frame) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = ?err, "requestAnimationFrame failed");
                false
            }
        }
    }

    fn cancel_frame(&mut self) {
        let Some(id) = self.frame.id.take() else {
            return;
        };
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.cancel_animation_frame(id) {
                tracing::warn!(error = ?err, "cancelAnimationFrame failed");
            }
        }
        self.frame.callback.borrow_mut().take();
    }
}

/// The window plus every scrollable ancestor of `elements`, without duplicates.
fn scroll_targets(window: &Window, elements: &[Element]) -> Vec<EventTarget> {
    let mut ancestors: Vec<Element> = Vec::new();
    for element in elements {
        let mut current = element.parent_element();
        while let Some(node) = current {
            if is_scroll_container(window, &node) && !ancestors.contains(&node) {
                ancestors.push(node.clone());
            }
            current = node.parent_element();
        }
    }
    let mut targets: Vec<EventTarget> = vec![window.clone().into()];
    targets.extend(ancestors.into_iter().map(EventTarget::from));
    targets
}

fn is_scroll_container(window: &Window, element: &Element) -> bool {
    let Ok(Some(style)) = window.get_computed_style(element) else {
        return false;
    };
    ["overflow-x", "overflow-y"].iter().any(|property| {
        let value = style.get_property_value(property).unwrap_or_default();
        matches!(value.as_str(), "auto" | "scroll" | "overlay")
    })
}

/// Measure the panel's current rendered size.
#[must_use]
pub fn element_size(element: &Element) -> Size {
    let bounds = element.get_bounding_client_rect();
    Size::new(bounds.width(), bounds.height())
}

/// Write `result` onto `element` as `left`/`top` and a `data-placement` attribute.
pub fn apply_position(element: &HtmlElement, result: &PositionResult) {
    let (left, top) = result.css_offset();
    let style = element.style();
    for (property, value) in [("left", left.as_str()), ("top", top.as_str())] {
        if let Err(err) = style.set_property(property, value) {
            tracing::warn!(property, error = ?err, "failed to write panel offset");
        }
    }
    if let Err(err) = element.set_attribute("data-placement", result.placement.as_str()) {
        tracing::warn!(error = ?err, "failed to reflect placement");
    }
}

// =============================================================================
// POSITIONER
// =============================================================================

/// Handle tying a [`PositionEngine`] to a floating element.
///
/// Cheap to clone; clones share one engine. Dropping the last handle drops
/// the engine and with it every listener.
#[derive(Clone)]
pub struct Positioner {
    engine: SharedEngine,
}

impl Positioner {
    /// Create an inactive positioner for `floating`.
    #[must_use]
    pub fn new(floating: HtmlElement) -> Self {
        let engine = Rc::new_cyclic(|weak: &WeakEngine| {
            RefCell::new(PositionEngine::new(BrowserEnvironment::new(weak.clone(), floating)))
        });
        Self { engine }
    }

    /// Start positioning against `anchor` and apply the first result.
    pub fn activate(&self, anchor: impl Into<AnchorSource>, options: PositionOptions) -> Option<PositionResult> {
        let anchor = anchor.into();
        self.with_engine(|engine| {
            let floating: Element = engine.environment().floating().clone().into();
            let result = engine.activate(anchor, move || element_size(&floating), options);
            apply_if_active(engine, result)
        })
        .flatten()
    }

    /// Stop positioning and remove every listener.
    pub fn deactivate(&self) {
        self.with_engine(PositionEngine::deactivate);
    }

    /// Recompute now, bypassing frame coalescing, and apply the result.
    pub fn reposition(&self) -> Option<PositionResult> {
        self.with_engine(|engine| {
            let result = engine.reposition();
            apply_if_active(engine, result)
        })
        .flatten()
    }

    /// Swap the anchor without rebuilding the positioner.
    pub fn set_anchor(&self, anchor: impl Into<AnchorSource>) -> Option<PositionResult> {
        let anchor = anchor.into();
        self.with_engine(|engine| {
            let result = engine.set_anchor(anchor);
            apply_if_active(engine, result)
        })
        .flatten()
    }

    /// Replace the options, recomputing if active.
    pub fn set_options(&self, options: PositionOptions) -> Option<PositionResult> {
        self.with_engine(|engine| {
            let result = engine.set_options(options);
            apply_if_active(engine, result)
        })
        .flatten()
    }

    /// Deliver a trigger observed by the host, e.g. from a `ResizeObserver` on the anchor.
    pub fn notify(&self, trigger: Trigger) {
        dispatch(&Rc::downgrade(&self.engine), trigger);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.engine.try_borrow().is_ok_and(|engine| engine.is_active())
    }

    #[must_use]
    pub fn result(&self) -> Option<PositionResult> {
        self.engine.try_borrow().map_or(None, |engine| engine.result())
    }

    fn with_engine<R>(&self, f: impl FnOnce(&mut PositionEngine<BrowserEnvironment>) -> R) -> Option<R> {
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => Some(f(&mut engine)),
            Err(_) => {
                tracing::debug!("engine busy; ignoring re-entrant call");
                None
            }
        }
    }
}

fn apply_if_active(engine: &PositionEngine<BrowserEnvironment>, result: Option<PositionResult>) -> Option<PositionResult> {
    if engine.is_active() {
        if let Some(result) = &result {
            apply_position(engine.environment().floating(), result);
        }
    }
    result
}
