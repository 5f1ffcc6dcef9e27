//! Window entity
//!
//! Holds the geometry and visibility flags of one registered window. Fields are
//! private: every mutation goes through the transition methods below, and
//! geometry changes always pass through the clamp functions.

use crate::domain::clamp::{
    clamp_position, clamp_rect, clamp_size, validate_position, validate_size, Bounds,
    GeometryError,
};
use crate::domain::core::{Point, Rect, Size};
use crate::domain::kind::WindowKind;

/// One window on the desktop
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    kind: WindowKind,
    rect: Rect,
    is_open: bool,
    is_minimized: bool,
    stack_order: u64,
}

impl Window {
    /// Creates a closed window with the given geometry
    ///
    /// Stack order starts at 0, below anything the manager ever assigns.
    pub fn new(kind: WindowKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            is_open: false,
            is_minimized: false,
            stack_order: 0,
        }
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_minimized(&self) -> bool {
        self.is_minimized
    }

    pub fn stack_order(&self) -> u64 {
        self.stack_order
    }

    /// Open and not minimized, i.e. painted and hit-testable
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.is_minimized
    }

    /// Shows the window and restores it from the taskbar. Idempotent.
    pub fn open(&mut self) {
        self.is_open = true;
        self.is_minimized = false;
    }

    /// Hides the window. Geometry and the minimized flag are kept so a
    /// reopen restores the last layout. Idempotent.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Hides the window while keeping it open for taskbar purposes
    ///
    /// # Returns
    /// false (and no change) if the window is not open
    pub fn minimize(&mut self) -> bool {
        if !self.is_open {
            return false;
        }
        self.is_minimized = true;
        true
    }

    /// Moves the top-left corner to `proposed`, clamped, keeping the size
    ///
    /// On malformed input the current geometry is kept and the error returned.
    pub fn move_to(&mut self, proposed: Point, bounds: &Bounds) -> Result<Rect, GeometryError> {
        let proposed = validate_position(proposed)?;
        let origin = clamp_position(proposed, self.rect.size(), bounds);
        self.rect = Rect::from_parts(origin, self.rect.size());
        Ok(self.rect)
    }

    /// Resizes to `proposed`, clamped, keeping the top-left corner
    ///
    /// On malformed input the current geometry is kept and the error returned.
    pub fn resize_to(&mut self, proposed: Size, bounds: &Bounds) -> Result<Rect, GeometryError> {
        let proposed = validate_size(proposed)?;
        let size = clamp_size(proposed, self.rect.origin(), bounds);
        self.rect = Rect::from_parts(self.rect.origin(), size);
        Ok(self.rect)
    }

    /// Re-fits the current geometry into new bounds (after a viewport change)
    pub fn reclamp(&mut self, bounds: &Bounds) {
        self.rect = clamp_rect(self.rect, bounds);
    }

    pub fn set_stack_order(&mut self, order: u64) {
        self.stack_order = order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(Size::new(1920.0, 1080.0))
    }

    fn about() -> Window {
        Window::new(WindowKind::About, Rect::new(100.0, 80.0, 450.0, 500.0))
    }

    #[test]
    fn new_window_is_closed() {
        let window = about();
        assert!(!window.is_open());
        assert!(!window.is_minimized());
        assert_eq!(window.stack_order(), 0);
    }

    #[test]
    fn open_restores_from_minimized() {
        let mut window = about();
        window.open();
        assert!(window.minimize());
        assert!(window.is_minimized());

        window.open();
        assert!(window.is_open());
        assert!(!window.is_minimized());
        assert!(window.is_visible());
    }

    #[test]
    fn minimize_requires_open_window() {
        let mut window = about();
        assert!(!window.minimize());
        assert!(!window.is_minimized());
    }

    #[test]
    fn close_keeps_geometry_and_minimized_flag() {
        let mut window = about();
        window.open();
        window.move_to(Point::new(500.0, 500.0), &bounds()).unwrap();
        window.minimize();
        window.close();
        window.close();

        assert!(!window.is_open());
        assert!(window.is_minimized());
        assert_eq!(window.rect().origin(), Point::new(500.0, 500.0));
    }

    #[test]
    fn move_keeps_size_and_clamps() {
        let mut window = about();
        let rect = window.move_to(Point::new(5000.0, -10.0), &bounds()).unwrap();
        assert_eq!(rect, Rect::new(1470.0, 0.0, 450.0, 500.0));
    }

    #[test]
    fn resize_keeps_position_and_clamps() {
        let mut window = about();
        let rect = window.resize_to(Size::new(10.0, 9000.0), &bounds()).unwrap();
        assert_eq!(rect, Rect::new(100.0, 80.0, 300.0, 1000.0));
    }

    #[test]
    fn invalid_geometry_keeps_last_known_good() {
        let mut window = about();
        let before = window.rect();

        assert!(window.move_to(Point::new(f64::NAN, 10.0), &bounds()).is_err());
        assert!(window.resize_to(Size::new(-5.0, 10.0), &bounds()).is_err());
        assert_eq!(window.rect(), before);
    }

    #[test]
    fn reclamp_fits_smaller_viewport() {
        let mut window = Window::new(WindowKind::Projects, Rect::new(200.0, 120.0, 700.0, 600.0));
        let small = Bounds::new(Size::new(800.0, 500.0));
        window.reclamp(&small);
        assert!(small.contains(&window.rect()));
        assert_eq!(window.rect(), Rect::new(100.0, 0.0, 700.0, 500.0));
    }
}
