//! Domain logic and core data structures
//!
//! This module contains pure window-management logic that is independent
//! of any host UI runtime or rendering backend.

pub mod clamp;
pub mod core;
pub mod icon;
pub mod kind;
pub mod window;

pub use clamp::{Bounds, GeometryError, MIN_HEIGHT, MIN_WIDTH};
pub use self::core::{Point, Rect, Size};
pub use icon::DesktopIcon;
pub use kind::{UnknownWindowId, WindowKind};
pub use window::Window;
