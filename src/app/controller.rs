//! Desktop controller and coordination layer
//!
//! [`Desktop`] is the single state holder the presentation layer talks to. It
//! owns the window registry, the gesture slot, the desktop icons and the shell
//! state, and exposes commands as its only mutation entry points. Rejected
//! commands are logged and returned as errors; they never leave partial state
//! behind.

use std::fmt;
use std::sync::{Arc, Mutex};

use log::{debug, info, warn};
use thiserror::Error;

use crate::app::manager::{ManagerError, WindowManager, WindowSnapshot};
use crate::app::shell::{taskbar_entries, StartMenu, TaskbarEntry};
use crate::app::state::{Gesture, GestureError, GesturePhase, GestureSlot};
use crate::config::{ConfigError, DesktopConfig};
use crate::domain::clamp::{validate_position, GeometryError};
use crate::domain::core::{Point, Rect, Size};
use crate::domain::icon::DesktopIcon;
use crate::domain::kind::{UnknownWindowId, WindowKind};
use crate::input::drag::{DragGesture, IconDragGesture};
use crate::input::pointer::{NoCapture, PointerCapture, TargetZone};
use crate::input::resize::ResizeGesture;
use crate::ui::layout::{hit_test, Affordance, Hit, Scene, TaskbarLayout};

/// Top-left corner windows are placed at in compact mode
const COMPACT_ORIGIN: Point = Point { x: 10.0, y: 10.0 };
/// Horizontal margin kept free around windows in compact mode
const COMPACT_MARGIN_X: f64 = 20.0;
/// Vertical room kept free for the taskbar in compact mode
const COMPACT_MARGIN_Y: f64 = 120.0;

/// Desktop shared between threads; the mutex keeps stack order assignment
/// atomic with the counter increment
pub type SharedDesktop = Arc<Mutex<Desktop>>;

/// Errors returned by desktop commands
#[derive(Debug, Error)]
pub enum DesktopError {
    #[error(transparent)]
    Window(#[from] ManagerError),
    #[error(transparent)]
    Gesture(#[from] GestureError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("No desktop icon opens {0}")]
    IconNotFound(WindowKind),
    #[error("Failed to serialize desktop state: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<UnknownWindowId> for DesktopError {
    fn from(err: UnknownWindowId) -> Self {
        DesktopError::Window(ManagerError::NotFound(err.0))
    }
}

/// The simulated desktop
pub struct Desktop {
    config: DesktopConfig,
    manager: WindowManager,
    gestures: GestureSlot,
    icons: Vec<DesktopIcon>,
    start_menu: StartMenu,
    capture: Arc<dyn PointerCapture>,
}

impl Desktop {
    /// Empty desktop for hosts that deliver every pointer event anyway
    pub fn new(config: DesktopConfig) -> Self {
        Self::with_capture(config, Arc::new(NoCapture))
    }

    /// Empty desktop that subscribes `capture` for the duration of each gesture
    pub fn with_capture(config: DesktopConfig, capture: Arc<dyn PointerCapture>) -> Self {
        Self {
            config,
            manager: WindowManager::new(),
            gestures: GestureSlot::new(),
            icons: Vec::new(),
            start_menu: StartMenu::default(),
            capture,
        }
    }

    /// The portfolio desktop: every section registered, default icons placed
    /// and "About Me" open and focused
    pub fn portfolio(config: DesktopConfig) -> Self {
        Self::portfolio_with_capture(config, Arc::new(NoCapture))
    }

    pub fn portfolio_with_capture(
        config: DesktopConfig,
        capture: Arc<dyn PointerCapture>,
    ) -> Self {
        let mut desktop = Self::with_capture(config, capture);

        for kind in WindowKind::ALL {
            if let Err(err) = desktop.register_window(kind, kind.default_rect()) {
                warn!("Skipping {}: {}", kind, err);
            }
        }
        for icon in DesktopIcon::defaults() {
            desktop.add_icon(icon);
        }
        if let Err(err) = desktop.open_kind(WindowKind::About) {
            warn!("Failed to open the start page: {}", err);
        }

        desktop
    }

    /// Moves the desktop behind a mutex for multi-source input
    pub fn into_shared(self) -> SharedDesktop {
        Arc::new(Mutex::new(self))
    }

    // ===== Registration =====

    pub fn register_window(&mut self, kind: WindowKind, initial: Rect) -> Result<(), DesktopError> {
        let bounds = self.config.bounds();
        let registered = self.manager.register(kind, initial, &bounds);
        report("register", kind.id(), registered.map_err(Into::into))?;
        debug!("Registered {} at {:?}", kind, self.manager.get(kind).map(|w| w.rect()));
        Ok(())
    }

    /// Places an icon, fitted into the visible region
    pub fn add_icon(&mut self, mut icon: DesktopIcon) {
        icon.move_to(icon.position(), self.config.icon_size, self.config.visible_region());
        self.icons.push(icon);
    }

    // ===== Window commands =====

    pub fn open_window(&mut self, id: &str) -> Result<(), DesktopError> {
        report("open", id, resolve(id).and_then(|kind| self.open_kind(kind)))
    }

    pub fn close_window(&mut self, id: &str) -> Result<(), DesktopError> {
        report(
            "close",
            id,
            resolve(id).and_then(|kind| {
                self.manager.close(kind)?;
                info!("Closed {}", kind);
                Ok(())
            }),
        )
    }

    pub fn minimize_window(&mut self, id: &str) -> Result<(), DesktopError> {
        report(
            "minimize",
            id,
            resolve(id).and_then(|kind| {
                if self.manager.minimize(kind)? {
                    info!("Minimized {}", kind);
                } else {
                    debug!("Minimize of closed window {} ignored", kind);
                }
                Ok(())
            }),
        )
    }

    pub fn focus_window(&mut self, id: &str) -> Result<(), DesktopError> {
        report("focus", id, resolve(id).and_then(|kind| self.focus_kind(kind)))
    }

    fn open_kind(&mut self, kind: WindowKind) -> Result<(), DesktopError> {
        let order = self.manager.open(kind)?;
        if self.config.is_compact() {
            self.fit_compact(kind)?;
        }
        info!("Opened {} at stack order {}", kind, order);
        Ok(())
    }

    fn focus_kind(&mut self, kind: WindowKind) -> Result<(), DesktopError> {
        if let Some(order) = self.manager.focus(kind)? {
            debug!("Focused {} at stack order {}", kind, order);
        }
        Ok(())
    }

    fn fit_compact(&mut self, kind: WindowKind) -> Result<(), DesktopError> {
        let bounds = self.config.bounds();
        let viewport = self.config.viewport;
        let window = self.manager.get_mut(kind)?;
        let size = window.rect().size();
        let fitted = Size::new(
            (viewport.width - COMPACT_MARGIN_X).min(size.width).max(0.0),
            (viewport.height - COMPACT_MARGIN_Y).min(size.height).max(0.0),
        );

        // Park at the origin so the old position does not limit the resize
        window.move_to(Point::ORIGIN, &bounds)?;
        window.resize_to(fitted, &bounds)?;
        window.move_to(COMPACT_ORIGIN, &bounds)?;
        Ok(())
    }

    // ===== Gestures =====

    /// Pointer pressed on a window
    ///
    /// Always focuses the window; a header press starts a drag and a resize
    /// handle press starts a resize. Rejected while another gesture is active.
    pub fn on_pointer_down(
        &mut self,
        id: &str,
        point: Point,
        zone: TargetZone,
    ) -> Result<GesturePhase, DesktopError> {
        report(
            "pointer down on",
            id,
            resolve(id).and_then(|kind| self.begin_window_gesture(kind, point, zone)),
        )
    }

    /// Pointer pressed on the desktop icon that opens `target`
    pub fn on_icon_pointer_down(
        &mut self,
        target: &str,
        point: Point,
    ) -> Result<GesturePhase, DesktopError> {
        report(
            "pointer down on icon",
            target,
            resolve(target).and_then(|kind| self.begin_icon_gesture(kind, point)),
        )
    }

    /// Pointer moved; applied immediately to the active gesture, if any
    pub fn on_pointer_move(&mut self, point: Point) {
        let Some(gesture) = self.gestures.current().copied() else {
            return;
        };
        if let Err(err) = self.apply_gesture(gesture, point) {
            warn!("Pointer move to {:?} ignored: {}", point, err);
        }
    }

    /// Pointer released anywhere; commits the last position and ends the gesture
    pub fn on_pointer_up(&mut self) {
        if let Some(gesture) = self.gestures.release() {
            debug!("{:?} finished", gesture.phase());
        }
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gestures.phase()
    }

    fn ensure_idle(&self) -> Result<(), GestureError> {
        match self.gestures.phase() {
            GesturePhase::Idle => Ok(()),
            active => Err(GestureError::GestureInProgress { active }),
        }
    }

    fn begin_window_gesture(
        &mut self,
        kind: WindowKind,
        point: Point,
        zone: TargetZone,
    ) -> Result<GesturePhase, DesktopError> {
        self.ensure_idle()?;
        let point = validate_position(point)?;
        self.focus_kind(kind)?;

        if self.config.is_compact() {
            debug!("Compact layout, no {:?} gesture on {}", zone, kind);
            return Ok(GesturePhase::Idle);
        }

        let window = self.manager.get_mut(kind)?;
        let gesture = match zone {
            TargetZone::Header => Gesture::Drag(DragGesture::begin(window, point)),
            TargetZone::ResizeHandle => Gesture::Resize(ResizeGesture::begin(window, point)),
            TargetZone::None => return Ok(GesturePhase::Idle),
        };
        self.gestures.claim(gesture, &self.capture)?;
        debug!("{:?} started on {}", gesture.phase(), kind);
        Ok(gesture.phase())
    }

    fn begin_icon_gesture(
        &mut self,
        kind: WindowKind,
        point: Point,
    ) -> Result<GesturePhase, DesktopError> {
        self.ensure_idle()?;
        let point = validate_position(point)?;
        let index = self.icon_index(kind)?;

        if self.config.is_compact() {
            return Ok(GesturePhase::Idle);
        }

        let gesture = Gesture::Icon(IconDragGesture::begin(index, &self.icons[index], point));
        self.gestures.claim(gesture, &self.capture)?;
        debug!("Icon drag started on {}", kind);
        Ok(gesture.phase())
    }

    fn apply_gesture(&mut self, gesture: Gesture, point: Point) -> Result<(), DesktopError> {
        let bounds = self.config.bounds();
        match gesture {
            Gesture::Drag(drag) => {
                let window = self.manager.get_mut(drag.window())?;
                drag.apply(window, point, &bounds)?;
            }
            Gesture::Resize(resize) => {
                let window = self.manager.get_mut(resize.window())?;
                resize.apply(window, point, &bounds)?;
            }
            Gesture::Icon(icon_drag) => {
                let footprint = self.config.icon_size;
                let region = self.config.visible_region();
                if let Some(icon) = self.icons.get_mut(icon_drag.icon()) {
                    icon_drag.apply(icon, point, footprint, region);
                }
            }
        }
        Ok(())
    }

    // ===== Icons =====

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    /// Double-click on an icon: opens the window it points at
    pub fn activate_icon(&mut self, target: &str) -> Result<(), DesktopError> {
        report(
            "activate icon",
            target,
            resolve(target).and_then(|kind| {
                self.icon_index(kind)?;
                self.open_kind(kind)
            }),
        )
    }

    fn icon_index(&self, kind: WindowKind) -> Result<usize, DesktopError> {
        self.icons
            .iter()
            .position(|icon| icon.target() == kind)
            .ok_or(DesktopError::IconNotFound(kind))
    }

    // ===== Taskbar and start menu =====

    pub fn taskbar_entries(&self) -> Vec<TaskbarEntry> {
        taskbar_entries(&self.manager)
    }

    /// Taskbar button press: opens (or restores) and raises the window
    pub fn taskbar_click(&mut self, id: &str) -> Result<(), DesktopError> {
        self.open_window(id)
    }

    pub fn toggle_start_menu(&mut self) -> bool {
        let open = self.start_menu.toggle();
        debug!("Start menu {}", if open { "opened" } else { "closed" });
        open
    }

    pub fn is_start_menu_open(&self) -> bool {
        self.start_menu.is_open()
    }

    /// Start menu entry chosen: the menu closes and the window opens
    pub fn start_menu_select(&mut self, id: &str) -> Result<(), DesktopError> {
        self.start_menu.close();
        self.open_window(id)
    }

    pub fn taskbar_layout(&self) -> TaskbarLayout {
        TaskbarLayout::new(
            self.config.viewport,
            self.config.visible_region(),
            &self.taskbar_entries(),
            self.start_menu.is_open(),
        )
    }

    // ===== Hit-tested input =====

    /// Resolves a point to whatever is topmost under it
    pub fn hit_test(&self, point: Point) -> Hit {
        let windows = self.render_order();
        let taskbar = self.taskbar_layout();
        let scene = Scene {
            windows: &windows,
            icons: &self.icons,
            icon_size: self.config.icon_size,
            taskbar: &taskbar,
        };
        hit_test(&scene, point)
    }

    /// Pointer pressed at a screen position; starts whatever gesture the
    /// affordance under it claims
    pub fn pointer_down_at(&mut self, point: Point) -> Result<Hit, DesktopError> {
        let hit = self.hit_test(point);
        match hit {
            Hit::Window { id, affordance } => {
                self.on_pointer_down(id.id(), point, affordance.zone())?;
            }
            Hit::Icon { target, .. } => {
                self.on_icon_pointer_down(target.id(), point)?;
            }
            _ => {}
        }
        Ok(hit)
    }

    /// Click at a screen position; runs window controls and shell buttons
    pub fn click_at(&mut self, point: Point) -> Result<Hit, DesktopError> {
        let hit = self.hit_test(point);
        match hit {
            Hit::Window {
                id,
                affordance: Affordance::CloseButton,
            } => self.close_window(id.id())?,
            Hit::Window {
                id,
                affordance: Affordance::MinimizeButton,
            } => self.minimize_window(id.id())?,
            Hit::Window { id, .. } => self.focus_window(id.id())?,
            Hit::StartButton => {
                self.toggle_start_menu();
            }
            Hit::StartMenuItem(id) => self.start_menu_select(id.id())?,
            Hit::TaskbarButton(id) => self.taskbar_click(id.id())?,
            Hit::Taskbar | Hit::Icon { .. } | Hit::Desktop => {}
        }
        Ok(hit)
    }

    /// Double-click at a screen position; icons open their window
    pub fn double_click_at(&mut self, point: Point) -> Result<Hit, DesktopError> {
        let hit = self.hit_test(point);
        if let Hit::Icon { target, .. } = hit {
            self.activate_icon(target.id())?;
        }
        Ok(hit)
    }

    // ===== Queries =====

    /// Every window ascending by stack order
    pub fn list_windows(&self) -> Vec<WindowSnapshot> {
        self.manager.list()
    }

    /// Visible windows in paint order (topmost last)
    pub fn render_order(&self) -> Vec<WindowSnapshot> {
        self.manager.render_order()
    }

    pub fn window(&self, id: &str) -> Option<WindowSnapshot> {
        resolve(id)
            .ok()
            .and_then(|kind| self.manager.snapshot_of(kind))
    }

    pub fn focused_window(&self) -> Option<WindowKind> {
        self.manager.focused()
    }

    pub fn next_stack_order(&self) -> u64 {
        self.manager.next_stack_order()
    }

    /// `list_windows` as JSON for a web presentation layer
    pub fn snapshot_json(&self) -> Result<String, DesktopError> {
        Ok(serde_json::to_string(&self.list_windows())?)
    }

    // ===== Configuration =====

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn is_compact(&self) -> bool {
        self.config.is_compact()
    }

    /// Host viewport changed; every window and icon is refitted
    pub fn set_viewport(&mut self, viewport: Size) -> Result<(), DesktopError> {
        if let Err(err) = self.config.set_viewport(viewport) {
            warn!("Viewport change ignored: {}", err);
            return Err(err.into());
        }

        let bounds = self.config.bounds();
        self.manager.reclamp_all(&bounds);
        let footprint = self.config.icon_size;
        let region = self.config.visible_region();
        for icon in &mut self.icons {
            icon.move_to(icon.position(), footprint, region);
        }
        info!(
            "Viewport set to {}x{}, windows refitted",
            viewport.width, viewport.height
        );
        Ok(())
    }
}

impl fmt::Debug for Desktop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Desktop")
            .field("config", &self.config)
            .field("manager", &self.manager)
            .field("gestures", &self.gestures)
            .field("icons", &self.icons)
            .field("start_menu", &self.start_menu)
            .finish_non_exhaustive()
    }
}

fn resolve(id: &str) -> Result<WindowKind, DesktopError> {
    Ok(id.parse::<WindowKind>()?)
}

fn report<T>(op: &str, id: &str, result: Result<T, DesktopError>) -> Result<T, DesktopError> {
    if let Err(err) = &result {
        warn!("{} {} ignored: {}", op, id, err);
    }
    result
}
