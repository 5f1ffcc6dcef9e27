//! Desktop icons
//!
//! Shortcuts placed directly on the wallpaper. An icon can be dragged around
//! and, when activated, opens the window it points at.

use serde::Serialize;

use crate::domain::clamp::{clamp_position, Bounds};
use crate::domain::core::{Point, Rect, Size};
use crate::domain::kind::WindowKind;

/// A draggable shortcut on the desktop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesktopIcon {
    target: WindowKind,
    label: &'static str,
    position: Point,
}

impl DesktopIcon {
    pub fn new(target: WindowKind, position: Point) -> Self {
        Self {
            target,
            label: target.title(),
            position,
        }
    }

    /// Icons shown on a fresh desktop
    pub fn defaults() -> Vec<DesktopIcon> {
        vec![
            DesktopIcon::new(WindowKind::ThisPc, Point::new(50.0, 50.0)),
            DesktopIcon::new(WindowKind::RecycleBin, Point::new(50.0, 150.0)),
        ]
    }

    pub fn target(&self) -> WindowKind {
        self.target
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Area covered by the icon for a given footprint
    pub fn bounds(&self, footprint: Size) -> Rect {
        Rect::from_parts(self.position, footprint)
    }

    /// Moves the icon, keeping its whole footprint inside `region`
    ///
    /// Non-finite input is ignored.
    pub fn move_to(&mut self, proposed: Point, footprint: Size, region: Size) {
        if !proposed.is_finite() {
            return;
        }
        self.position = clamp_position(proposed, footprint, &Bounds::new(region));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOOTPRINT: Size = Size {
        width: 80.0,
        height: 100.0,
    };

    #[test]
    fn defaults_point_at_system_windows() {
        let icons = DesktopIcon::defaults();
        assert_eq!(icons.len(), 2);
        assert_eq!(icons[0].target(), WindowKind::ThisPc);
        assert_eq!(icons[0].label(), "This PC");
        assert_eq!(icons[1].position(), Point::new(50.0, 150.0));
    }

    #[test]
    fn move_is_clamped_to_region() {
        let mut icon = DesktopIcon::new(WindowKind::ThisPc, Point::new(50.0, 50.0));
        let region = Size::new(1920.0, 1000.0);

        icon.move_to(Point::new(3000.0, -40.0), FOOTPRINT, region);
        assert_eq!(icon.position(), Point::new(1840.0, 0.0));

        icon.move_to(Point::new(f64::NAN, 10.0), FOOTPRINT, region);
        assert_eq!(icon.position(), Point::new(1840.0, 0.0));
    }

    #[test]
    fn region_smaller_than_footprint_pins_to_origin() {
        let mut icon = DesktopIcon::new(WindowKind::RecycleBin, Point::new(50.0, 150.0));
        icon.move_to(Point::new(30.0, 30.0), FOOTPRINT, Size::new(60.0, 90.0));
        assert_eq!(icon.position(), Point::ORIGIN);
    }

    #[test]
    fn bounds_use_footprint() {
        let icon = DesktopIcon::new(WindowKind::RecycleBin, Point::new(50.0, 150.0));
        assert_eq!(icon.bounds(FOOTPRINT), Rect::new(50.0, 150.0, 80.0, 100.0));
    }
}
