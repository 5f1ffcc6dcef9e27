//! Window roster
//!
//! The desktop hosts a fixed set of content sections. Each one is a variant of
//! [`WindowKind`]; the string form is the stable window identifier used by the
//! presentation layer and resolved once, at the boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::core::Rect;

/// RGB accent colour used for a window's header and taskbar button
pub type Accent = [u8; 3];

/// Every window the desktop knows how to host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    About,
    Projects,
    Skills,
    Experience,
    Contact,
    ThisPc,
    RecycleBin,
    Search,
}

impl WindowKind {
    /// All kinds in roster (registration) order
    pub const ALL: [WindowKind; 8] = [
        WindowKind::About,
        WindowKind::Projects,
        WindowKind::Skills,
        WindowKind::Experience,
        WindowKind::Contact,
        WindowKind::ThisPc,
        WindowKind::RecycleBin,
        WindowKind::Search,
    ];

    /// Stable identifier string
    pub fn id(&self) -> &'static str {
        match self {
            WindowKind::About => "about",
            WindowKind::Projects => "projects",
            WindowKind::Skills => "skills",
            WindowKind::Experience => "experience",
            WindowKind::Contact => "contact",
            WindowKind::ThisPc => "thispc",
            WindowKind::RecycleBin => "recyclebin",
            WindowKind::Search => "search",
        }
    }

    /// Title shown in the window header and taskbar tooltip
    pub fn title(&self) -> &'static str {
        match self {
            WindowKind::About => "About Me",
            WindowKind::Projects => "Projects",
            WindowKind::Skills => "Skills",
            WindowKind::Experience => "Experience",
            WindowKind::Contact => "Contact",
            WindowKind::ThisPc => "This PC",
            WindowKind::RecycleBin => "Recycle Bin",
            WindowKind::Search => "Search",
        }
    }

    /// Geometry the window gets when it is registered
    pub fn default_rect(&self) -> Rect {
        match self {
            WindowKind::About => Rect::new(100.0, 80.0, 450.0, 500.0),
            WindowKind::Projects => Rect::new(200.0, 120.0, 700.0, 600.0),
            WindowKind::Skills => Rect::new(150.0, 100.0, 600.0, 550.0),
            WindowKind::Experience => Rect::new(250.0, 140.0, 650.0, 580.0),
            WindowKind::Contact => Rect::new(300.0, 160.0, 500.0, 450.0),
            WindowKind::ThisPc => Rect::new(200.0, 100.0, 600.0, 500.0),
            WindowKind::RecycleBin => Rect::new(250.0, 120.0, 500.0, 400.0),
            WindowKind::Search => Rect::new(300.0, 140.0, 550.0, 450.0),
        }
    }

    /// Header accent colour
    pub fn accent(&self) -> Accent {
        match self {
            WindowKind::About => [59, 130, 246],
            WindowKind::Projects => [34, 197, 94],
            WindowKind::Skills => [168, 85, 247],
            WindowKind::Experience => [249, 115, 22],
            WindowKind::Contact => [236, 72, 153],
            WindowKind::ThisPc => [107, 114, 128],
            WindowKind::RecycleBin => [239, 68, 68],
            WindowKind::Search => [99, 102, 241],
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a string does not name any window kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown window id: {0}")]
pub struct UnknownWindowId(pub String);

impl FromStr for WindowKind {
    type Err = UnknownWindowId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindowKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| UnknownWindowId(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_str() {
        for kind in WindowKind::ALL {
            assert_eq!(kind.id().parse::<WindowKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        let err = "trash".parse::<WindowKind>().unwrap_err();
        assert_eq!(err, UnknownWindowId("trash".to_string()));
    }

    #[test]
    fn serde_uses_identifier_strings() {
        let json = serde_json::to_string(&WindowKind::RecycleBin).unwrap();
        assert_eq!(json, "\"recyclebin\"");
        let kind: WindowKind = serde_json::from_str("\"thispc\"").unwrap();
        assert_eq!(kind, WindowKind::ThisPc);
    }

    #[test]
    fn default_geometry_respects_minimum_size() {
        for kind in WindowKind::ALL {
            let rect = kind.default_rect();
            assert!(rect.width >= 300.0 && rect.height >= 200.0, "{}", kind);
        }
    }
}
