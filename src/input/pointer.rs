//! Pointer vocabulary and scoped pointer capture
//!
//! While a gesture is active the host must route every pointer move and the
//! final release to the desktop, even when the pointer leaves the window that
//! started the gesture. Hosts implement [`PointerCapture`] to attach and detach
//! those global listeners; the desktop holds a [`PointerCaptureGuard`] for the
//! lifetime of each gesture so the listeners are always detached, whichever
//! way the gesture ends.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Which affordance of a window received a pointer-down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetZone {
    /// Title bar, excluding the window controls
    Header,
    /// Bottom-right resize corner
    ResizeHandle,
    /// Anywhere else: body, window controls, borders
    None,
}

/// Host hook for attaching global pointer listeners during a gesture
pub trait PointerCapture: Send + Sync {
    /// Start delivering pointer move/up events from the whole surface
    fn subscribe(&self);
    /// Stop delivering them
    fn unsubscribe(&self);
}

/// Capture for hosts that already deliver every pointer event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn subscribe(&self) {}
    fn unsubscribe(&self) {}
}

/// RAII wrapper for one pointer subscription
///
/// Subscribes on creation and unsubscribes when dropped.
pub struct PointerCaptureGuard {
    capture: Arc<dyn PointerCapture>,
}

impl PointerCaptureGuard {
    pub fn acquire(capture: &Arc<dyn PointerCapture>) -> Self {
        capture.subscribe();
        Self {
            capture: Arc::clone(capture),
        }
    }
}

impl Drop for PointerCaptureGuard {
    fn drop(&mut self) {
        self.capture.unsubscribe();
    }
}

impl fmt::Debug for PointerCaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerCaptureGuard").finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::CountingCapture;
    use super::*;

    #[test]
    fn guard_subscribes_and_unsubscribes() {
        let counting = Arc::new(CountingCapture::default());
        let capture: Arc<dyn PointerCapture> = counting.clone();

        let guard = PointerCaptureGuard::acquire(&capture);
        assert_eq!(counting.active(), 1);

        drop(guard);
        assert_eq!(counting.active(), 0);
        assert_eq!(counting.subscriptions(), 1);
    }

    #[test]
    fn target_zone_serializes_as_snake_case() {
        let json = serde_json::to_string(&TargetZone::ResizeHandle).unwrap();
        assert_eq!(json, "\"resize_handle\"");
    }
}
