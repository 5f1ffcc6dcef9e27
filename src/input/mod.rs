//! Pointer input handling
//!
//! Gesture controllers that turn pointer-down/move/up streams into window
//! geometry updates, plus the capture hook hosts implement to keep those
//! streams flowing while a gesture is active.

pub mod drag;
pub mod pointer;
pub mod resize;

pub use drag::{DragGesture, IconDragGesture};
pub use pointer::{NoCapture, PointerCapture, PointerCaptureGuard, TargetZone};
pub use resize::ResizeGesture;
