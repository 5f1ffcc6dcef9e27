//! Drag controller
//!
//! A drag remembers where inside the header the pointer grabbed the window.
//! Each pointer move places the window's top-left corner at
//! `pointer - offset`, clamped, so moves are independent of one another.

use crate::domain::clamp::{Bounds, GeometryError};
use crate::domain::core::{Point, Rect, Size};
use crate::domain::icon::DesktopIcon;
use crate::domain::kind::WindowKind;
use crate::domain::window::Window;

/// An in-progress window drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    window: WindowKind,
    offset: Point,
}

impl DragGesture {
    /// Starts dragging `window` with the pointer at `pointer`
    pub fn begin(window: &Window, pointer: Point) -> Self {
        Self {
            window: window.kind(),
            offset: pointer.offset_from(window.rect().origin()),
        }
    }

    pub fn window(&self) -> WindowKind {
        self.window
    }

    /// Pointer position relative to the window's top-left at gesture start
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Unclamped top-left corner for a pointer position
    pub fn proposed_position(&self, pointer: Point) -> Point {
        pointer.offset_from(self.offset)
    }

    /// Moves the window to follow the pointer
    pub fn apply(
        &self,
        window: &mut Window,
        pointer: Point,
        bounds: &Bounds,
    ) -> Result<Rect, GeometryError> {
        window.move_to(self.proposed_position(pointer), bounds)
    }
}

/// An in-progress desktop icon drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconDragGesture {
    icon: usize,
    offset: Point,
}

impl IconDragGesture {
    /// Starts dragging the icon at index `icon`
    pub fn begin(icon: usize, current: &DesktopIcon, pointer: Point) -> Self {
        Self {
            icon,
            offset: pointer.offset_from(current.position()),
        }
    }

    pub fn icon(&self) -> usize {
        self.icon
    }

    pub fn apply(&self, icon: &mut DesktopIcon, pointer: Point, footprint: Size, region: Size) {
        icon.move_to(pointer.offset_from(self.offset), footprint, region);
    }
}
