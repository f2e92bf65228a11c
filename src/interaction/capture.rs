//! Scoped pointer capture.
//!
//! While a drag or resize is in progress the editor needs every pointer-move and
//! pointer-up on the whole input surface, not only those over the entity being
//! manipulated. A [`PointerCapture`] is that subscription: it is taken when a gesture
//! starts, stored inside the gesture, and released when the guard is dropped, which
//! happens on every path that leaves the gesture.

use log::trace;
use std::cell::Cell;
use std::rc::Rc;

/// The global input surface gestures subscribe to.
///
/// Cloning shares the same subscription count.
#[derive(Debug, Clone, Default)]
pub struct InputSurface {
    subscriptions: Rc<Cell<usize>>,
}

impl InputSurface {
    /// Creates a surface with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to pointer-move and pointer-up until the returned guard is dropped.
    pub fn capture(&self) -> PointerCapture {
        let count = self.subscriptions.get() + 1;
        self.subscriptions.set(count);
        trace!("pointer captured ({count} active)");
        PointerCapture {
            subscriptions: Rc::clone(&self.subscriptions),
        }
    }

    /// Number of live captures.
    pub fn active_captures(&self) -> usize {
        self.subscriptions.get()
    }

    /// Whether any gesture is currently receiving global pointer events.
    pub fn is_captured(&self) -> bool {
        self.active_captures() > 0
    }
}

/// Live subscription to global pointer events. Released on drop.
#[derive(Debug)]
pub struct PointerCapture {
    subscriptions: Rc<Cell<usize>>,
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        let count = self.subscriptions.get().saturating_sub(1);
        self.subscriptions.set(count);
        trace!("pointer released ({count} active)");
    }
}
