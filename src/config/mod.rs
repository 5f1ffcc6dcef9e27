//! Configuration module for the desktop
//!
//! The host supplies a single configuration surface: viewport dimensions and
//! the handful of lengths that shape window geometry. This module keeps those
//! values sanitized before they reach the window manager.

pub mod desktop;

pub use desktop::{ConfigError, DesktopConfig};
