//! Geometry clamping
//!
//! Pure functions that constrain a proposed window position or size to the
//! visible region of the desktop. Clamping never fails: out-of-range values are
//! substituted with the nearest valid value. Validation of malformed input
//! (NaN, infinities, negative sizes) is a separate step at this boundary.

use thiserror::Error;

use crate::domain::core::{Point, Rect, Size};

/// Minimum window width in pixels
pub const MIN_WIDTH: f64 = 300.0;
/// Minimum window height in pixels
pub const MIN_HEIGHT: f64 = 200.0;

/// Malformed geometry rejected before clamping
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("Invalid position ({x}, {y})")]
    InvalidPosition { x: f64, y: f64 },
    #[error("Invalid size {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
}

/// The region windows must stay inside plus the minimum window size
///
/// `region` is the visible part of the viewport, i.e. the viewport with the
/// taskbar band already removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub region: Size,
    pub min: Size,
}

impl Bounds {
    /// Bounds over `region` with the default minimum window size
    pub fn new(region: Size) -> Self {
        Self {
            region,
            min: Size::new(MIN_WIDTH, MIN_HEIGHT),
        }
    }

    /// Bounds over `region` with an explicit minimum window size
    pub fn with_min(region: Size, min: Size) -> Self {
        Self { region, min }
    }

    /// Returns true if `rect` satisfies every containment invariant
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.x >= 0.0
            && rect.y >= 0.0
            && rect.right() <= self.region.width
            && rect.bottom() <= self.region.height
            && rect.width >= self.min.width
            && rect.height >= self.min.height
    }
}

/// Constrains a proposed top-left corner so a window of `size` stays visible
///
/// Each axis is bounded to `[0, region - size]`. When the window is larger than
/// the region the coordinate becomes 0, never negative.
pub fn clamp_position(proposed: Point, size: Size, bounds: &Bounds) -> Point {
    Point::new(
        proposed.x.min(bounds.region.width - size.width).max(0.0),
        proposed.y.min(bounds.region.height - size.height).max(0.0),
    )
}

/// Constrains a proposed size for a window anchored at `position`
///
/// Each dimension is bounded to `[min, region - position]`; the minimum wins
/// when the two conflict.
pub fn clamp_size(proposed: Size, position: Point, bounds: &Bounds) -> Size {
    Size::new(
        proposed
            .width
            .min(bounds.region.width - position.x)
            .max(bounds.min.width),
        proposed
            .height
            .min(bounds.region.height - position.y)
            .max(bounds.min.height),
    )
}

/// Clamps a whole rectangle: size against the full region first, then position
///
/// The result satisfies [`Bounds::contains`] whenever the region is at least
/// as large as the minimum window size.
pub fn clamp_rect(rect: Rect, bounds: &Bounds) -> Rect {
    let size = clamp_size(rect.size(), Point::ORIGIN, bounds);
    let origin = clamp_position(rect.origin(), size, bounds);
    Rect::from_parts(origin, size)
}

/// Rejects non-finite coordinates
pub fn validate_position(point: Point) -> Result<Point, GeometryError> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(GeometryError::InvalidPosition {
            x: point.x,
            y: point.y,
        })
    }
}

/// Rejects negative or non-finite sizes
pub fn validate_size(size: Size) -> Result<Size, GeometryError> {
    if size.is_valid() {
        Ok(size)
    } else {
        Err(GeometryError::InvalidSize {
            width: size.width,
            height: size.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_hd() -> Bounds {
        Bounds::new(Size::new(1920.0, 1080.0))
    }

    #[test]
    fn position_inside_region_is_unchanged() {
        let size = Size::new(450.0, 500.0);
        let pos = clamp_position(Point::new(290.0, 240.0), size, &full_hd());
        assert_eq!(pos, Point::new(290.0, 240.0));
    }

    #[test]
    fn position_is_pulled_back_inside() {
        let size = Size::new(450.0, 500.0);
        let bounds = full_hd();

        let pos = clamp_position(Point::new(-50.0, -10.0), size, &bounds);
        assert_eq!(pos, Point::ORIGIN);

        let pos = clamp_position(Point::new(1800.0, 900.0), size, &bounds);
        assert_eq!(pos, Point::new(1470.0, 580.0));
    }

    #[test]
    fn oversized_window_is_pinned_to_origin() {
        let bounds = Bounds::new(Size::new(400.0, 300.0));
        let pos = clamp_position(Point::new(120.0, 80.0), Size::new(800.0, 600.0), &bounds);
        assert_eq!(pos, Point::ORIGIN);
    }

    #[test]
    fn position_clamp_is_idempotent() {
        let bounds = full_hd();
        let size = Size::new(700.0, 600.0);
        let samples = [
            Point::new(-1000.0, 5000.0),
            Point::new(10.0, 10.0),
            Point::new(1919.0, 1079.0),
            Point::new(1220.0, 480.0),
        ];
        for proposed in samples {
            let once = clamp_position(proposed, size, &bounds);
            let twice = clamp_position(once, size, &bounds);
            assert_eq!(once, twice, "clamp not idempotent for {:?}", proposed);
        }
    }

    #[test]
    fn size_never_drops_below_minimum() {
        let size = clamp_size(Size::new(120.0, 50.0), Point::new(100.0, 80.0), &full_hd());
        assert_eq!(size, Size::new(MIN_WIDTH, MIN_HEIGHT));
    }

    #[test]
    fn size_is_bounded_by_region_edge() {
        let size = clamp_size(Size::new(5000.0, 5000.0), Point::new(100.0, 80.0), &full_hd());
        assert_eq!(size, Size::new(1820.0, 1000.0));
    }

    #[test]
    fn minimum_wins_over_region_edge() {
        let size = clamp_size(Size::new(450.0, 500.0), Point::new(1800.0, 1000.0), &full_hd());
        assert_eq!(size, Size::new(MIN_WIDTH, MIN_HEIGHT));
    }

    #[test]
    fn clamped_rect_is_contained() {
        let bounds = Bounds::new(Size::new(1280.0, 640.0));
        let samples = [
            Rect::new(-20.0, -20.0, 100.0, 100.0),
            Rect::new(1200.0, 600.0, 450.0, 500.0),
            Rect::new(0.0, 0.0, 4000.0, 4000.0),
            Rect::new(300.0, 160.0, 500.0, 450.0),
        ];
        for rect in samples {
            let clamped = clamp_rect(rect, &bounds);
            assert!(bounds.contains(&clamped), "{:?} -> {:?}", rect, clamped);
        }
    }

    #[test]
    fn custom_minimum_is_respected() {
        let bounds = Bounds::with_min(Size::new(1000.0, 800.0), Size::new(100.0, 100.0));
        let size = clamp_size(Size::new(50.0, 150.0), Point::ORIGIN, &bounds);
        assert_eq!(size, Size::new(100.0, 150.0));
    }

    #[test]
    fn malformed_geometry_is_rejected() {
        assert!(validate_position(Point::new(f64::NAN, 1.0)).is_err());
        assert!(validate_position(Point::new(1.0, f64::INFINITY)).is_err());
        assert!(validate_size(Size::new(-1.0, 10.0)).is_err());
        assert_eq!(validate_size(Size::new(0.0, 0.0)), Ok(Size::new(0.0, 0.0)));
    }
}
