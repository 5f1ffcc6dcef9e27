//! Window manager registry
//!
//! Owns every registered [`Window`] in registration order, the process-wide
//! stacking counter and the focused window. Opening or focusing a window
//! stamps it with the next counter value, so the most recently raised window
//! always has the highest stack order.

use serde::Serialize;
use thiserror::Error;

use crate::domain::clamp::{clamp_rect, validate_position, validate_size, Bounds, GeometryError};
use crate::domain::core::Rect;
use crate::domain::kind::WindowKind;
use crate::domain::window::Window;

/// Registry errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ManagerError {
    #[error("Window not found: {0}")]
    NotFound(String),
    #[error("Window already registered: {0}")]
    AlreadyRegistered(WindowKind),
    #[error("Invalid initial geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),
}

/// Render-facing view of one window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSnapshot {
    pub id: WindowKind,
    pub title: &'static str,
    pub rect: Rect,
    pub is_open: bool,
    pub is_minimized: bool,
    pub stack_order: u64,
    pub is_focused: bool,
}

impl WindowSnapshot {
    /// Painted and hit-testable
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.is_minimized
    }
}

/// Registry of every window on the desktop
#[derive(Debug, Clone)]
pub struct WindowManager {
    windows: Vec<Window>,
    next_stack_order: u64,
    focused: Option<WindowKind>,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowManager {
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            next_stack_order: 1,
            focused: None,
        }
    }

    /// Adds a closed window with `initial` geometry fitted into `bounds`
    pub fn register(
        &mut self,
        kind: WindowKind,
        initial: Rect,
        bounds: &Bounds,
    ) -> Result<(), ManagerError> {
        if self.get(kind).is_some() {
            return Err(ManagerError::AlreadyRegistered(kind));
        }
        validate_position(initial.origin())?;
        validate_size(initial.size())?;

        self.windows.push(Window::new(kind, clamp_rect(initial, bounds)));
        Ok(())
    }

    pub fn get(&self, kind: WindowKind) -> Option<&Window> {
        self.windows.iter().find(|window| window.kind() == kind)
    }

    pub(crate) fn get_mut(&mut self, kind: WindowKind) -> Result<&mut Window, ManagerError> {
        self.windows
            .iter_mut()
            .find(|window| window.kind() == kind)
            .ok_or_else(|| ManagerError::NotFound(kind.id().to_string()))
    }

    /// Windows in registration order
    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }

    pub fn focused(&self) -> Option<WindowKind> {
        self.focused
    }

    /// Stack order the next raise will assign
    pub fn next_stack_order(&self) -> u64 {
        self.next_stack_order
    }

    /// Opens (or restores) a window and raises it to the top
    pub fn open(&mut self, kind: WindowKind) -> Result<u64, ManagerError> {
        self.get_mut(kind)?.open();
        Ok(self.raise(kind))
    }

    /// Hides a window; focus is dropped if it was focused, not transferred
    pub fn close(&mut self, kind: WindowKind) -> Result<(), ManagerError> {
        self.get_mut(kind)?.close();
        if self.focused == Some(kind) {
            self.focused = None;
        }
        Ok(())
    }

    /// Minimizes an open window; focus is left unchanged
    ///
    /// # Returns
    /// Whether the window was open and is now minimized
    pub fn minimize(&mut self, kind: WindowKind) -> Result<bool, ManagerError> {
        Ok(self.get_mut(kind)?.minimize())
    }

    /// Raises a window unless it already has focus
    ///
    /// # Returns
    /// The newly assigned stack order, or None if the window was already focused
    pub fn focus(&mut self, kind: WindowKind) -> Result<Option<u64>, ManagerError> {
        self.get_mut(kind)?;
        if self.focused == Some(kind) {
            return Ok(None);
        }
        Ok(Some(self.raise(kind)))
    }

    /// Refits every window into new bounds
    pub fn reclamp_all(&mut self, bounds: &Bounds) {
        for window in &mut self.windows {
            window.reclamp(bounds);
        }
    }

    /// Every window, ascending by stack order
    ///
    /// Ties (windows never raised) keep registration order.
    pub fn list(&self) -> Vec<WindowSnapshot> {
        let mut snapshots: Vec<WindowSnapshot> =
            self.windows.iter().map(|window| self.snapshot(window)).collect();
        snapshots.sort_by_key(|snapshot| snapshot.stack_order);
        snapshots
    }

    /// Open, non-minimized windows in paint order (topmost last)
    pub fn render_order(&self) -> Vec<WindowSnapshot> {
        self.list()
            .into_iter()
            .filter(WindowSnapshot::is_visible)
            .collect()
    }

    pub fn snapshot_of(&self, kind: WindowKind) -> Option<WindowSnapshot> {
        self.get(kind).map(|window| self.snapshot(window))
    }

    fn snapshot(&self, window: &Window) -> WindowSnapshot {
        WindowSnapshot {
            id: window.kind(),
            title: window.kind().title(),
            rect: window.rect(),
            is_open: window.is_open(),
            is_minimized: window.is_minimized(),
            stack_order: window.stack_order(),
            is_focused: self.focused == Some(window.kind()),
        }
    }

    // Counter increment and assignment happen together under `&mut self`.
    fn raise(&mut self, kind: WindowKind) -> u64 {
        let order = self.next_stack_order;
        self.next_stack_order += 1;
        if let Some(window) = self.windows.iter_mut().find(|window| window.kind() == kind) {
            window.set_stack_order(order);
        }
        self.focused = Some(kind);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::core::{Point, Size};

    fn bounds() -> Bounds {
        Bounds::new(Size::new(1920.0, 1000.0))
    }

    fn roster() -> WindowManager {
        let mut manager = WindowManager::new();
        for kind in WindowKind::ALL {
            manager.register(kind, kind.default_rect(), &bounds()).unwrap();
        }
        manager
    }

    fn max_other_order(manager: &WindowManager, kind: WindowKind) -> u64 {
        manager
            .windows()
            .filter(|window| window.kind() != kind)
            .map(Window::stack_order)
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn registration_keeps_windows_closed() {
        let manager = roster();
        assert_eq!(manager.windows().count(), 8);
        assert!(manager.windows().all(|window| !window.is_open()));
        assert_eq!(manager.next_stack_order(), 1);
        assert_eq!(manager.focused(), None);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut manager = roster();
        let err = manager
            .register(WindowKind::About, Rect::new(0.0, 0.0, 400.0, 300.0), &bounds())
            .unwrap_err();
        assert_eq!(err, ManagerError::AlreadyRegistered(WindowKind::About));
    }

    #[test]
    fn malformed_initial_geometry_is_rejected() {
        let mut manager = WindowManager::new();
        let err = manager
            .register(WindowKind::About, Rect::new(0.0, 0.0, f64::NAN, 300.0), &bounds())
            .unwrap_err();
        assert!(matches!(err, ManagerError::InvalidGeometry(_)));
    }

    #[test]
    fn initial_geometry_is_clamped() {
        let mut manager = WindowManager::new();
        manager
            .register(WindowKind::About, Rect::new(1800.0, 900.0, 450.0, 500.0), &bounds())
            .unwrap();
        let rect = manager.get(WindowKind::About).unwrap().rect();
        assert_eq!(rect, Rect::new(1470.0, 500.0, 450.0, 500.0));
    }

    #[test]
    fn unknown_window_is_not_found() {
        let mut manager = WindowManager::new();
        assert_eq!(
            manager.open(WindowKind::Search),
            Err(ManagerError::NotFound("search".to_string()))
        );
        assert!(manager.close(WindowKind::Search).is_err());
        assert!(manager.minimize(WindowKind::Search).is_err());
        assert!(manager.focus(WindowKind::Search).is_err());
    }

    #[test]
    fn open_assigns_next_stack_order_and_focus() {
        let mut manager = roster();
        assert_eq!(manager.open(WindowKind::About), Ok(1));
        assert_eq!(manager.open(WindowKind::Projects), Ok(2));

        assert_eq!(manager.focused(), Some(WindowKind::Projects));
        assert_eq!(manager.next_stack_order(), 3);
        assert_eq!(manager.get(WindowKind::About).unwrap().stack_order(), 1);
    }

    #[test]
    fn focusing_focused_window_is_noop() {
        let mut manager = roster();
        manager.open(WindowKind::About).unwrap();
        assert_eq!(manager.focus(WindowKind::About), Ok(None));
        assert_eq!(manager.next_stack_order(), 2);
    }

    #[test]
    fn stack_order_is_monotonic() {
        let mut manager = roster();
        let script = [
            WindowKind::About,
            WindowKind::Skills,
            WindowKind::About,
            WindowKind::Contact,
            WindowKind::Skills,
            WindowKind::Projects,
        ];

        for (step, kind) in script.into_iter().enumerate() {
            let before = manager.next_stack_order();
            let ceiling = max_other_order(&manager, kind);
            let order = if step % 2 == 0 {
                manager.open(kind).unwrap()
            } else {
                manager.focus(kind).unwrap().unwrap()
            };

            assert_eq!(order, before);
            assert_eq!(manager.next_stack_order(), before + 1);
            assert!(order > ceiling, "step {} raised {} to {}", step, kind, order);
        }
    }

    #[test]
    fn close_drops_focus_without_transfer() {
        let mut manager = roster();
        manager.open(WindowKind::About).unwrap();
        manager.open(WindowKind::Projects).unwrap();

        manager.close(WindowKind::Projects).unwrap();
        assert_eq!(manager.focused(), None);

        // Closing a window that is not focused leaves focus alone
        manager.focus(WindowKind::About).unwrap();
        manager.close(WindowKind::Skills).unwrap();
        assert_eq!(manager.focused(), Some(WindowKind::About));
    }

    #[test]
    fn minimize_keeps_focus() {
        let mut manager = roster();
        manager.open(WindowKind::About).unwrap();
        assert_eq!(manager.minimize(WindowKind::About), Ok(true));
        assert_eq!(manager.focused(), Some(WindowKind::About));

        // Minimizing a closed window does nothing
        assert_eq!(manager.minimize(WindowKind::Contact), Ok(false));
    }

    #[test]
    fn list_is_sorted_by_stack_order() {
        let mut manager = roster();
        manager.open(WindowKind::Contact).unwrap();
        manager.open(WindowKind::About).unwrap();
        manager.focus(WindowKind::Contact).unwrap();

        let list = manager.list();
        assert_eq!(list.len(), 8);
        let orders: Vec<u64> = list.iter().map(|snapshot| snapshot.stack_order).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted);

        let top = list.last().unwrap();
        assert_eq!(top.id, WindowKind::Contact);
        assert!(top.is_focused);
        // Never-raised windows keep registration order at the bottom
        assert_eq!(list[0].id, WindowKind::Projects);
    }

    #[test]
    fn render_order_skips_hidden_windows() {
        let mut manager = roster();
        manager.open(WindowKind::About).unwrap();
        manager.open(WindowKind::Skills).unwrap();
        manager.open(WindowKind::Contact).unwrap();
        manager.minimize(WindowKind::Skills).unwrap();

        let ids: Vec<WindowKind> = manager.render_order().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![WindowKind::About, WindowKind::Contact]);
    }

    #[test]
    fn reclamp_all_fits_new_bounds() {
        let mut manager = roster();
        let small = Bounds::new(Size::new(800.0, 600.0));
        manager.reclamp_all(&small);
        assert!(manager.windows().all(|window| small.contains(&window.rect())));
        assert_eq!(
            manager.get(WindowKind::About).unwrap().rect().origin(),
            Point::new(100.0, 80.0)
        );
    }
}
