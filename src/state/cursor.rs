//! Cursor Sampler - pointer position in canvas space.
//!
//! Maps client coordinates into the 400×400 logical canvas through the
//! scene's on-screen bounds:
//!
//! ```text
//! canvas_x = (client_x - bounds.left) / bounds.width  * 400
//! canvas_y = (client_y - bounds.top)  / bounds.height * 400
//! ```
//!
//! The position is a single `Signal<Point>`, so both coordinates change in
//! one write and no reader sees half an update. Until the first sample it
//! sits at the canvas centre. Samples taken while the bounds are unknown
//! (scene not laid out yet) are dropped and the last value is kept.

use spark_signals::{signal, Signal};

use crate::types::{Bounds, CANVAS_CENTER, CANVAS_SIZE, Point};

use super::pointer::{self, PointerSubscription};

/// Map a client position into canvas space.
///
/// Returns `None` when there are no usable bounds.
pub fn to_canvas(client_x: f32, client_y: f32, bounds: Option<Bounds>) -> Option<Point> {
    let bounds = bounds.filter(|b| !b.is_degenerate())?;
    Some(Point::new(
        (client_x - bounds.left) / bounds.width * CANVAS_SIZE,
        (client_y - bounds.top) / bounds.height * CANVAS_SIZE,
    ))
}

/// Latest cursor position plus the bounds it is mapped through.
///
/// Cloning shares the same signals.
#[derive(Clone)]
pub struct CursorSampler {
    position: Signal<Point>,
    bounds: Signal<Option<Bounds>>,
}

impl CursorSampler {
    pub fn new() -> Self {
        Self {
            position: signal(CANVAS_CENTER),
            bounds: signal(None),
        }
    }

    /// The position signal, for deriveds that track the cursor.
    pub fn signal(&self) -> Signal<Point> {
        self.position.clone()
    }

    /// Current canvas position.
    pub fn position(&self) -> Point {
        self.position.get()
    }

    /// Update the scene's on-screen rectangle (`None` while unmounted or
    /// not laid out).
    pub fn set_bounds(&self, bounds: Option<Bounds>) {
        if self.bounds.get() != bounds {
            self.bounds.set(bounds);
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds.get()
    }

    /// Map one client position and publish it. Returns false when the
    /// sample was skipped.
    pub fn sample(&self, client_x: f32, client_y: f32) -> bool {
        match to_canvas(client_x, client_y, self.bounds.get()) {
            Some(point) => {
                self.position.set(point);
                true
            }
            None => {
                tracing::trace!(client_x, client_y, "no scene bounds, cursor sample skipped");
                false
            }
        }
    }

    /// Back to the canvas centre (mount default).
    pub fn reset(&self) {
        self.position.set(CANVAS_CENTER);
    }

    /// Listen to pointer moves until the returned guard is dropped.
    pub fn attach(&self) -> PointerSubscription {
        let sampler = self.clone();
        pointer::on_pointer_move(move |event| {
            sampler.sample(event.client_x, event.client_y);
        })
    }
}

impl Default for CursorSampler {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
