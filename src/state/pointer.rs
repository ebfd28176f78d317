//! Pointer Module - pointer-move handler registry
//!
//! The host (browser glue, terminal input loop, tests) dispatches every
//! pointer move here; registered handlers receive it in client coordinates.
//! Registration hands back a [`PointerSubscription`] guard and the handler
//! lives exactly as long as the guard does.
//!
//! # API
//!
//! - `on_pointer_move(fn)` - register, returns the guard
//! - `dispatch(event)` - fan a pointer move out to every handler
//! - `listener_count()` - live handlers (0 once every scene is unmounted)
//! - `last_event()` - most recent pointer move
//!
//! # Example
//!
//! ```
//! use login_monsters::state::pointer::{self, PointerEvent};
//!
//! let subscription = pointer::on_pointer_move(|event| {
//!     let _ = (event.client_x, event.client_y);
//! });
//! assert_eq!(pointer::listener_count(), 1);
//!
//! pointer::dispatch(PointerEvent::new(12.0, 30.0));
//!
//! drop(subscription);
//! assert_eq!(pointer::listener_count(), 0);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

// =============================================================================
// TYPES
// =============================================================================

/// A pointer move in the host's client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub client_x: f32,
    pub client_y: f32,
}

impl PointerEvent {
    pub const fn new(client_x: f32, client_y: f32) -> Self {
        Self { client_x, client_y }
    }
}

/// Pointer-move handler.
pub type PointerHandler = Rc<dyn Fn(&PointerEvent)>;

// =============================================================================
// REGISTRY
// =============================================================================

struct PointerRegistry {
    handlers: Vec<(usize, PointerHandler)>,
    next_id: usize,
    last_event: Option<PointerEvent>,
}

impl PointerRegistry {
    fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
            last_event: None,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static POINTER_REGISTRY: RefCell<PointerRegistry> = RefCell::new(PointerRegistry::new());
}

// =============================================================================
// SUBSCRIPTION GUARD
// =============================================================================

/// Keeps a pointer handler registered. Dropping it deregisters.
#[must_use = "the handler is removed as soon as the subscription is dropped"]
pub struct PointerSubscription {
    id: Option<usize>,
}

impl PointerSubscription {
    /// Deregister now. Same as dropping.
    pub fn release(mut self) {
        self.remove();
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    fn remove(&mut self) {
        if let Some(id) = self.id.take() {
            POINTER_REGISTRY.with(|registry| {
                registry.borrow_mut().handlers.retain(|(handler_id, _)| *handler_id != id);
            });
            tracing::trace!(id, "pointer listener released");
        }
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        self.remove();
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Register a pointer-move handler.
pub fn on_pointer_move<F>(handler: F) -> PointerSubscription
where
    F: Fn(&PointerEvent) + 'static,
{
    let id = POINTER_REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        let id = registry.next_id();
        registry.handlers.push((id, Rc::new(handler)));
        id
    });
    tracing::trace!(id, "pointer listener registered");
    PointerSubscription { id: Some(id) }
}

/// Dispatch a pointer move to every registered handler.
///
/// Returns the number of handlers that saw the event. Handlers may
/// register or release subscriptions while running.
pub fn dispatch(event: PointerEvent) -> usize {
    let handlers: Vec<PointerHandler> = POINTER_REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        registry.last_event = Some(event);
        registry.handlers.iter().map(|(_, handler)| handler.clone()).collect()
    });

    for handler in &handlers {
        handler(&event);
    }
    handlers.len()
}

/// Number of live pointer handlers.
pub fn listener_count() -> usize {
    POINTER_REGISTRY.with(|registry| registry.borrow().handlers.len())
}

/// Most recent dispatched pointer move.
pub fn last_event() -> Option<PointerEvent> {
    POINTER_REGISTRY.with(|registry| registry.borrow().last_event)
}

/// Reset all pointer state (for testing).
///
/// Drops every handler and the last event. Ids keep counting up, so guards
/// from before the reset can never remove a handler registered after it.
pub fn reset_pointer_state() {
    POINTER_REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        registry.handlers.clear();
        registry.last_event = None;
    });
}

// =============================================================================
// TESTS
// =============================================================================
