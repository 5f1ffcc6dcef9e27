//! Simulated desktop window manager
//!
//! A headless model of a desktop shell: a fixed roster of windows that can be
//! opened, closed, minimized, focused, dragged and resized inside a viewport,
//! with a taskbar, a start menu and draggable desktop icons. Hosts feed
//! pointer events and commands into [`Desktop`] and read back window
//! snapshots or a rendered frame.

pub mod app;
pub mod config;
pub mod domain;
pub mod input;
pub mod ui;

pub use app::{Desktop, DesktopError, GesturePhase, SharedDesktop, WindowSnapshot};
pub use config::DesktopConfig;
pub use domain::{Point, Rect, Size, WindowKind};
pub use input::{PointerCapture, TargetZone};
