//! Taskbar and start menu state

use serde::Serialize;

use crate::app::manager::WindowManager;
use crate::domain::kind::WindowKind;

/// One taskbar button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskbarEntry {
    pub id: WindowKind,
    pub title: &'static str,
    /// Open and not minimized; drives the indicator dot
    pub active: bool,
    pub focused: bool,
}

/// Taskbar buttons for every registered window, in registration order
pub fn taskbar_entries(manager: &WindowManager) -> Vec<TaskbarEntry> {
    manager
        .windows()
        .map(|window| TaskbarEntry {
            id: window.kind(),
            title: window.kind().title(),
            active: window.is_visible(),
            focused: manager.focused() == Some(window.kind()),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartMenu {
    open: bool,
}

impl StartMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clamp::Bounds;
    use crate::domain::core::Size;

    #[test]
    fn entries_follow_registration_order() {
        let bounds = Bounds::new(Size::new(1920.0, 1000.0));
        let mut manager = WindowManager::new();
        for kind in [WindowKind::About, WindowKind::Projects, WindowKind::Contact] {
            manager.register(kind, kind.default_rect(), &bounds).unwrap();
        }
        manager.open(WindowKind::Contact).unwrap();
        manager.open(WindowKind::About).unwrap();
        manager.minimize(WindowKind::About).unwrap();

        let entries = taskbar_entries(&manager);
        let ids: Vec<WindowKind> = entries.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![WindowKind::About, WindowKind::Projects, WindowKind::Contact]);

        assert!(!entries[0].active); // minimized
        assert!(entries[0].focused);
        assert!(!entries[1].active); // never opened
        assert!(entries[2].active);
        assert_eq!(entries[2].title, "Contact");
    }

    #[test]
    fn start_menu_toggles() {
        let mut menu = StartMenu::default();
        assert!(!menu.is_open());
        assert!(menu.toggle());
        assert!(!menu.toggle());
        menu.toggle();
        menu.close();
        assert!(!menu.is_open());
    }
}
