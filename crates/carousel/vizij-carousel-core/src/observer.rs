//! Transition-end observation for a rendered track element.
//!
//! The host renderer owns the element; this module only holds a scoped
//! registration against it. [`TransitionTarget`] is the adapter seam (the
//! wasm crate implements it over `addEventListener`, tests use an in-memory
//! element). [`TransitionObserver`] filters native completions down to the
//! ones that matter for a settle: fired by the subscribed element itself
//! (not a descendant) for the `transform` property.
//!
//! Lifecycle:
//! - `sync` acquires a registration when the element or callback identity
//!   changes and releases the previous one first.
//! - `unsubscribe` and `Drop` release whatever is held.
//! - A missing element is a no-op subscription.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

/// Property name a settle completion must carry.
pub const TRANSFORM_PROPERTY: &str = "transform";

/// A native transition-completion notification.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionEnd<E> {
    /// Element that originated the event (may be a descendant of the listener).
    pub target: E,
    /// CSS property whose transition finished.
    pub property_name: String,
}

/// Listener installed on an element; receives every completion it sees.
pub type TransitionHandler<E> = Rc<dyn Fn(&TransitionEnd<E>)>;

/// Host callback fired once per qualifying completion.
pub type SettleCallback = Rc<dyn Fn()>;

/// Host element handle that can deliver transition-completion events.
pub trait TransitionTarget: Clone + 'static {
    /// Token needed to remove a listener again.
    type Registration;

    /// Identity comparison (same node), not structural equality.
    fn same_element(&self, other: &Self) -> bool;

    fn listen(&self, handler: TransitionHandler<Self>) -> Self::Registration;

    fn unlisten(&self, registration: Self::Registration);
}

/// True when `event` is a transform completion fired by `element` itself.
pub fn is_settle_event<E: TransitionTarget>(event: &TransitionEnd<E>, element: &E) -> bool {
    event.property_name == TRANSFORM_PROPERTY && event.target.same_element(element)
}

/// Host-owned mutable reference to the rendered element. Empty until the
/// host mounts the element, cleared again on unmount.
pub struct ElementRef<E> {
    slot: Rc<RefCell<Option<E>>>,
}

impl<E> Clone for ElementRef<E> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<E> Default for ElementRef<E> {
    fn default() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for ElementRef<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementRef").field(&self.slot.borrow()).finish()
    }
}

impl<E: Clone> ElementRef<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(element: E) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(element))),
        }
    }

    pub fn set(&self, element: Option<E>) {
        *self.slot.borrow_mut() = element;
    }

    /// Snapshot of the current element.
    pub fn get(&self) -> Option<E> {
        self.slot.borrow().clone()
    }

    pub fn is_set(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

/// One owner of an element handle fed by [`MergedRef`].
pub enum RefSink<E> {
    Slot(ElementRef<E>),
    Callback(Rc<dyn Fn(Option<&E>)>),
}

impl<E> Clone for RefSink<E> {
    fn clone(&self) -> Self {
        match self {
            RefSink::Slot(r) => RefSink::Slot(r.clone()),
            RefSink::Callback(f) => RefSink::Callback(Rc::clone(f)),
        }
    }
}

impl<E> fmt::Debug for RefSink<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefSink::Slot(_) => f.write_str("RefSink::Slot"),
            RefSink::Callback(_) => f.write_str("RefSink::Callback"),
        }
    }
}

/// Fans a single element assignment out to several independent owners,
/// e.g. the observer's [`ElementRef`] and a host measurement hook.
#[derive(Debug)]
pub struct MergedRef<E> {
    sinks: Vec<RefSink<E>>,
}

impl<E> Default for MergedRef<E> {
    fn default() -> Self {
        Self { sinks: Vec::new() }
    }
}

impl<E: Clone> MergedRef<E> {
    pub fn new(sinks: Vec<RefSink<E>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: RefSink<E>) {
        self.sinks.push(sink);
    }

    /// Propagate `element` (or its removal) to every sink, in order.
    pub fn assign(&self, element: Option<E>) {
        for sink in &self.sinks {
            match sink {
                RefSink::Slot(slot) => slot.set(element.clone()),
                RefSink::Callback(f) => f(element.as_ref()),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

struct Subscription<E: TransitionTarget> {
    element: E,
    callback: SettleCallback,
    registration: E::Registration,
}

/// Scoped subscription bridging native completions into a settle callback.
pub struct TransitionObserver<E: TransitionTarget> {
    active: Option<Subscription<E>>,
}

impl<E: TransitionTarget> Default for TransitionObserver<E> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<E: TransitionTarget> fmt::Debug for TransitionObserver<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionObserver")
            .field("subscribed", &self.is_subscribed())
            .finish()
    }
}

fn same_callback(a: &SettleCallback, b: &SettleCallback) -> bool {
    std::ptr::eq(Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>())
}

impl<E: TransitionTarget> TransitionObserver<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the registration in line with the element currently held by
    /// `element_ref` and `callback`. Re-subscribes only when either identity
    /// changed; an empty reference releases any previous registration.
    pub fn sync(&mut self, element_ref: &ElementRef<E>, callback: &SettleCallback) {
        let element = element_ref.get();
        if let (Some(active), Some(el)) = (&self.active, &element) {
            if active.element.same_element(el) && same_callback(&active.callback, callback) {
                return;
            }
        }
        self.unsubscribe();
        match element {
            Some(el) => self.subscribe(el, Rc::clone(callback)),
            None => debug!("transition observer: no element mounted, skipping subscribe"),
        }
    }

    /// Listen on `element`, replacing any previous registration.
    pub fn subscribe(&mut self, element: E, callback: SettleCallback) {
        self.unsubscribe();
        let watched = element.clone();
        let on_settle = Rc::clone(&callback);
        let handler: TransitionHandler<E> = Rc::new(move |event: &TransitionEnd<E>| {
            if is_settle_event(event, &watched) {
                on_settle();
            }
        });
        let registration = element.listen(handler);
        debug!("transition observer: subscribed");
        self.active = Some(Subscription {
            element,
            callback,
            registration,
        });
    }

    /// Release the current registration, if any.
    pub fn unsubscribe(&mut self) {
        if let Some(sub) = self.active.take() {
            sub.element.unlisten(sub.registration);
            debug!("transition observer: released");
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.active.is_some()
    }

    /// Element the observer is currently registered on.
    pub fn element(&self) -> Option<&E> {
        self.active.as_ref().map(|sub| &sub.element)
    }
}

impl<E: TransitionTarget> Drop for TransitionObserver<E> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
