use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::clamp::{Bounds, MIN_HEIGHT, MIN_WIDTH};
use crate::domain::core::Size;

/// Host-supplied desktop settings
///
/// Every field has a default, so a partial JSON document is enough to build
/// a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// Full host viewport in pixels
    pub viewport: Size,
    /// Band reserved for the taskbar at the bottom of the viewport
    pub taskbar_height: f64,
    /// Smallest size a window may be resized to
    pub min_window: Size,
    /// Footprint of a desktop icon (glyph plus label)
    pub icon_size: Size,
    /// Visible widths below this switch the desktop to compact mode
    pub compact_breakpoint: f64,
}

impl DesktopConfig {
    pub const DEFAULT_VIEWPORT: Size = Size {
        width: 1920.0,
        height: 1080.0,
    };
    pub const DEFAULT_TASKBAR_HEIGHT: f64 = 80.0;
    pub const DEFAULT_ICON_SIZE: Size = Size {
        width: 80.0,
        height: 100.0,
    };
    pub const DEFAULT_COMPACT_BREAKPOINT: f64 = 768.0;

    /// Default settings for a viewport of the given size
    pub fn for_viewport(viewport: Size) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.set_viewport(viewport)?;
        Ok(config)
    }

    /// Parses a JSON document and sanitizes the result
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let parsed: DesktopConfig = serde_json::from_str(json)?;
        parsed.sanitized()
    }

    /// Replaces the viewport, rejecting malformed dimensions
    pub fn set_viewport(&mut self, viewport: Size) -> Result<(), ConfigError> {
        if !viewport.is_valid() {
            return Err(ConfigError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        Ok(())
    }

    /// Height the taskbar actually occupies: the configured band, capped by
    /// the viewport height
    pub fn taskbar_band(&self) -> f64 {
        self.taskbar_height.min(self.viewport.height)
    }

    /// Visible region: the viewport minus the taskbar band
    pub fn visible_region(&self) -> Size {
        Size::new(
            self.viewport.width,
            (self.viewport.height - self.taskbar_band()).max(0.0),
        )
    }

    /// Clamp bounds for window geometry
    pub fn bounds(&self) -> Bounds {
        Bounds::with_min(self.visible_region(), self.min_window)
    }

    /// True when the viewport is too narrow for free-floating windows
    pub fn is_compact(&self) -> bool {
        self.viewport.width < self.compact_breakpoint
    }

    /// Validates the viewport and pulls every other field into range
    pub fn sanitized(mut self) -> Result<Self, ConfigError> {
        let viewport = self.viewport;
        self.taskbar_height = sanitize_length(self.taskbar_height, Self::DEFAULT_TASKBAR_HEIGHT);
        self.min_window = Size::new(
            sanitize_length(self.min_window.width, MIN_WIDTH),
            sanitize_length(self.min_window.height, MIN_HEIGHT),
        );
        self.icon_size = Size::new(
            sanitize_length(self.icon_size.width, Self::DEFAULT_ICON_SIZE.width),
            sanitize_length(self.icon_size.height, Self::DEFAULT_ICON_SIZE.height),
        );
        self.compact_breakpoint =
            sanitize_length(self.compact_breakpoint, Self::DEFAULT_COMPACT_BREAKPOINT);
        self.set_viewport(viewport)?;
        Ok(self)
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            viewport: Self::DEFAULT_VIEWPORT,
            taskbar_height: Self::DEFAULT_TASKBAR_HEIGHT,
            min_window: Size::new(MIN_WIDTH, MIN_HEIGHT),
            icon_size: Self::DEFAULT_ICON_SIZE,
            compact_breakpoint: Self::DEFAULT_COMPACT_BREAKPOINT,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse desktop configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Viewport {width}x{height} is not a valid size")]
    InvalidViewport { width: f64, height: f64 },
}

fn sanitize_length(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}
