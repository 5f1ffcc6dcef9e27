//! Gesture state management
//!
//! The desktop models a single pointer, so at most one gesture exists at a
//! time. The slot is either idle or holds the active gesture together with
//! the pointer capture that keeps its events flowing. Releasing the slot
//! drops the capture guard, which detaches the host listeners.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::domain::kind::WindowKind;
use crate::input::drag::{DragGesture, IconDragGesture};
use crate::input::pointer::{PointerCapture, PointerCaptureGuard};
use crate::input::resize::ResizeGesture;

/// Gesture slot errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("A {active:?} gesture is already in progress")]
    GestureInProgress { active: GesturePhase },
}

/// Any gesture the desktop can track
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Drag(DragGesture),
    Resize(ResizeGesture),
    Icon(IconDragGesture),
}

impl Gesture {
    pub fn phase(&self) -> GesturePhase {
        match self {
            Gesture::Drag(_) => GesturePhase::Dragging,
            Gesture::Resize(_) => GesturePhase::Resizing,
            Gesture::Icon(_) => GesturePhase::MovingIcon,
        }
    }

    /// Window the gesture acts on, if any
    pub fn window(&self) -> Option<WindowKind> {
        match self {
            Gesture::Drag(drag) => Some(drag.window()),
            Gesture::Resize(resize) => Some(resize.window()),
            Gesture::Icon(_) => None,
        }
    }
}

/// Coarse state of the gesture slot, for rendering cursors and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    Idle,
    Dragging,
    Resizing,
    MovingIcon,
}

#[derive(Debug)]
struct ActiveGesture {
    gesture: Gesture,
    _capture: PointerCaptureGuard,
}

/// The single process-wide gesture slot
#[derive(Debug, Default)]
pub struct GestureSlot {
    active: Option<ActiveGesture>,
}

impl GestureSlot {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    pub fn phase(&self) -> GesturePhase {
        self.current()
            .map(Gesture::phase)
            .unwrap_or(GesturePhase::Idle)
    }

    /// The active gesture, if any
    pub fn current(&self) -> Option<&Gesture> {
        self.active.as_ref().map(|active| &active.gesture)
    }

    /// Idle -> active transition
    ///
    /// Subscribes the pointer capture. Fails without side effects if another
    /// gesture already owns the slot.
    pub fn claim(
        &mut self,
        gesture: Gesture,
        capture: &Arc<dyn PointerCapture>,
    ) -> Result<(), GestureError> {
        if let Some(active) = &self.active {
            return Err(GestureError::GestureInProgress {
                active: active.gesture.phase(),
            });
        }

        self.active = Some(ActiveGesture {
            gesture,
            _capture: PointerCaptureGuard::acquire(capture),
        });
        Ok(())
    }

    /// Active -> idle transition
    ///
    /// Unsubscribes the pointer capture and returns the finished gesture.
    /// Releasing an idle slot is a no-op.
    pub fn release(&mut self) -> Option<Gesture> {
        self.active.take().map(|active| active.gesture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::core::{Point, Rect};
    use crate::domain::window::Window;
    use crate::input::pointer::testing::CountingCapture;

    fn drag_of(kind: WindowKind) -> Gesture {
        let window = Window::new(kind, kind.default_rect());
        Gesture::Drag(DragGesture::begin(&window, Point::new(120.0, 90.0)))
    }

    fn resize_of(kind: WindowKind) -> Gesture {
        let window = Window::new(kind, Rect::new(0.0, 0.0, 400.0, 300.0));
        Gesture::Resize(ResizeGesture::begin(&window, Point::new(400.0, 300.0)))
    }

    fn capture() -> (Arc<CountingCapture>, Arc<dyn PointerCapture>) {
        let counting = Arc::new(CountingCapture::default());
        let capture: Arc<dyn PointerCapture> = counting.clone();
        (counting, capture)
    }

    #[test]
    fn default_slot_is_idle() {
        let slot = GestureSlot::default();
        assert!(slot.is_idle());
        assert_eq!(slot.phase(), GesturePhase::Idle);
        assert!(slot.current().is_none());
    }

    #[test]
    fn claim_then_release_balances_capture() {
        let (counting, capture) = capture();
        let mut slot = GestureSlot::new();

        slot.claim(drag_of(WindowKind::About), &capture).unwrap();
        assert_eq!(slot.phase(), GesturePhase::Dragging);
        assert_eq!(counting.active(), 1);

        let finished = slot.release().unwrap();
        assert_eq!(finished.window(), Some(WindowKind::About));
        assert!(slot.is_idle());
        assert_eq!(counting.active(), 0);
    }

    #[test]
    fn second_gesture_is_rejected_until_release() {
        let (counting, capture) = capture();
        let mut slot = GestureSlot::new();

        slot.claim(drag_of(WindowKind::About), &capture).unwrap();
        let err = slot.claim(resize_of(WindowKind::Projects), &capture).unwrap_err();
        assert_eq!(
            err,
            GestureError::GestureInProgress {
                active: GesturePhase::Dragging
            }
        );
        assert_eq!(counting.subscriptions(), 1);
        assert_eq!(slot.current().and_then(Gesture::window), Some(WindowKind::About));

        slot.release();
        slot.claim(resize_of(WindowKind::Projects), &capture).unwrap();
        assert_eq!(slot.phase(), GesturePhase::Resizing);
    }

    #[test]
    fn dropping_slot_releases_capture() {
        let (counting, capture) = capture();
        {
            let mut slot = GestureSlot::new();
            slot.claim(resize_of(WindowKind::Skills), &capture).unwrap();
            assert_eq!(counting.active(), 1);
        }
        assert_eq!(counting.active(), 0);
    }

    #[test]
    fn releasing_idle_slot_is_noop() {
        let mut slot = GestureSlot::new();
        assert!(slot.release().is_none());
    }
}
