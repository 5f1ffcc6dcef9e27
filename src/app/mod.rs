//! Application orchestration layer
//!
//! This module owns the desktop state: the window registry, the gesture slot
//! and the shell (taskbar, start menu). [`Desktop`] is the entry point every
//! host event goes through.

pub mod controller;
pub mod manager;
pub mod shell;
pub mod state;

pub use controller::{Desktop, DesktopError, SharedDesktop};
pub use manager::{ManagerError, WindowManager, WindowSnapshot};
pub use shell::{StartMenu, TaskbarEntry};
pub use state::{Gesture, GestureError, GesturePhase, GestureSlot};
