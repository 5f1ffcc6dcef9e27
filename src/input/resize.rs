//! Resize controller
//!
//! A resize remembers the pointer position and window size at gesture start.
//! Each pointer move proposes `start_size + (pointer - start_pointer)`, which
//! is clamped against the window's current top-left corner.

use crate::domain::clamp::{validate_position, Bounds, GeometryError};
use crate::domain::core::{Point, Rect, Size};
use crate::domain::kind::WindowKind;
use crate::domain::window::Window;

/// An in-progress window resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeGesture {
    window: WindowKind,
    start_pointer: Point,
    start_size: Size,
}

impl ResizeGesture {
    /// Starts resizing `window` from the pointer at `pointer`
    pub fn begin(window: &Window, pointer: Point) -> Self {
        Self {
            window: window.kind(),
            start_pointer: pointer,
            start_size: window.rect().size(),
        }
    }

    pub fn window(&self) -> WindowKind {
        self.window
    }

    pub fn start_pointer(&self) -> Point {
        self.start_pointer
    }

    pub fn start_size(&self) -> Size {
        self.start_size
    }

    /// Unclamped size for a pointer position
    pub fn proposed_size(&self, pointer: Point) -> Size {
        self.start_size.grown_by(pointer.offset_from(self.start_pointer))
    }

    /// Resizes the window to follow the pointer
    ///
    /// A non-finite pointer is rejected and the window keeps its geometry.
    /// A proposal that went negative is floored at zero first; the clamp
    /// then lifts it to the minimum window size.
    pub fn apply(
        &self,
        window: &mut Window,
        pointer: Point,
        bounds: &Bounds,
    ) -> Result<Rect, GeometryError> {
        let pointer = validate_position(pointer)?;
        let proposed = self.proposed_size(pointer);
        let floored = Size::new(proposed.width.max(0.0), proposed.height.max(0.0));
        window.resize_to(floored, bounds)
    }
}
