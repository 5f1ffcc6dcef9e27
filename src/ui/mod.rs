//! Presentation helpers
//!
//! Screen layout of the desktop's interactive regions and a software frame
//! renderer that paints from the same layout.

pub mod layout;
pub mod renderer;

pub use layout::{hit_test, Affordance, Hit, Scene, TaskbarLayout, WindowLayout};
pub use renderer::{FrameLayout, FrameRenderer, RendererError};
