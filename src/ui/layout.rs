//! Affordance layout and hit testing
//!
//! Computes where each interactive region of a window, the taskbar and the
//! desktop icons sits on screen, and resolves a pointer position to the
//! topmost thing under it. The renderer draws from the same layout so what is
//! painted and what is hit always agree.

use crate::app::manager::WindowSnapshot;
use crate::app::shell::TaskbarEntry;
use crate::domain::core::{Point, Rect, Size};
use crate::domain::icon::DesktopIcon;
use crate::domain::kind::WindowKind;
use crate::input::pointer::TargetZone;

/// Height of the window header band
pub const HEADER_HEIGHT: f64 = 44.0;
/// Side of the minimize/close buttons
pub const CONTROL_SIZE: f64 = 24.0;
/// Space between the controls and the header edge
pub const CONTROL_PADDING: f64 = 12.0;
/// Space between the two control buttons
pub const CONTROL_GAP: f64 = 4.0;
/// Side of the bottom-right resize handle
pub const RESIZE_HANDLE_SIZE: f64 = 16.0;
/// Side of a taskbar button
pub const TASKBAR_BUTTON_SIZE: f64 = 48.0;
/// Space between taskbar buttons
pub const TASKBAR_BUTTON_GAP: f64 = 4.0;
/// Width of the start button
pub const START_BUTTON_WIDTH: f64 = 96.0;
/// Width of the start menu panel
pub const START_MENU_WIDTH: f64 = 240.0;
/// Height of one start menu row
pub const START_MENU_ITEM_HEIGHT: f64 = 40.0;

/// Interactive region of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    Header,
    MinimizeButton,
    CloseButton,
    ResizeHandle,
    Body,
}

impl Affordance {
    /// Gesture zone a pointer-down on this affordance starts
    pub fn zone(&self) -> TargetZone {
        match self {
            Affordance::Header => TargetZone::Header,
            Affordance::ResizeHandle => TargetZone::ResizeHandle,
            Affordance::MinimizeButton | Affordance::CloseButton | Affordance::Body => {
                TargetZone::None
            }
        }
    }
}

/// Screen regions of one window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowLayout {
    pub frame: Rect,
    pub header: Rect,
    pub minimize: Rect,
    pub close: Rect,
    pub resize_handle: Rect,
    pub body: Rect,
}

impl WindowLayout {
    pub fn for_rect(frame: Rect) -> Self {
        let header_height = HEADER_HEIGHT.min(frame.height);
        let header = Rect::new(frame.x, frame.y, frame.width, header_height);

        let control_y = frame.y + (header_height - CONTROL_SIZE) / 2.0;
        let close_x = frame.right() - CONTROL_PADDING - CONTROL_SIZE;
        let minimize_x = close_x - CONTROL_GAP - CONTROL_SIZE;
        let close = Rect::new(close_x, control_y, CONTROL_SIZE, CONTROL_SIZE);
        let minimize = Rect::new(minimize_x, control_y, CONTROL_SIZE, CONTROL_SIZE);

        let resize_handle = Rect::new(
            frame.right() - RESIZE_HANDLE_SIZE,
            frame.bottom() - RESIZE_HANDLE_SIZE,
            RESIZE_HANDLE_SIZE,
            RESIZE_HANDLE_SIZE,
        );
        let body = Rect::new(
            frame.x,
            frame.y + header_height,
            frame.width,
            (frame.height - header_height).max(0.0),
        );

        Self {
            frame,
            header,
            minimize,
            close,
            resize_handle,
            body,
        }
    }

    /// Affordance under `point`, or None outside the window
    ///
    /// The resize handle wins over the body, the controls over the header.
    pub fn affordance_at(&self, point: Point) -> Option<Affordance> {
        if !self.frame.contains_point(point) {
            return None;
        }
        let affordance = if self.resize_handle.contains_point(point) {
            Affordance::ResizeHandle
        } else if self.close.contains_point(point) {
            Affordance::CloseButton
        } else if self.minimize.contains_point(point) {
            Affordance::MinimizeButton
        } else if self.header.contains_point(point) {
            Affordance::Header
        } else {
            Affordance::Body
        };
        Some(affordance)
    }
}

/// Screen regions of the taskbar band and, when open, the start menu
#[derive(Debug, Clone, PartialEq)]
pub struct TaskbarLayout {
    pub band: Rect,
    pub start_button: Rect,
    pub buttons: Vec<(WindowKind, Rect)>,
    pub start_menu: Option<StartMenuLayout>,
}

/// Start menu panel, one row per window, anchored above the start button
#[derive(Debug, Clone, PartialEq)]
pub struct StartMenuLayout {
    pub panel: Rect,
    pub items: Vec<(WindowKind, Rect)>,
}

impl StartMenuLayout {
    fn above(start_button: Rect, entries: &[TaskbarEntry]) -> Self {
        let height = entries.len() as f64 * START_MENU_ITEM_HEIGHT;
        let panel = Rect::new(
            start_button.x,
            (start_button.y - CONTROL_PADDING - height).max(0.0),
            START_MENU_WIDTH,
            height,
        );
        let items = entries
            .iter()
            .enumerate()
            .map(|(row, entry)| {
                let y = panel.y + row as f64 * START_MENU_ITEM_HEIGHT;
                (entry.id, Rect::new(panel.x, y, panel.width, START_MENU_ITEM_HEIGHT))
            })
            .collect();
        Self { panel, items }
    }
}

impl TaskbarLayout {
    /// Lays out the band below the `visible` region, buttons centred
    pub fn new(
        viewport: Size,
        visible: Size,
        entries: &[TaskbarEntry],
        start_menu_open: bool,
    ) -> Self {
        let band = Rect::new(
            0.0,
            visible.height,
            viewport.width,
            viewport.height - visible.height,
        );
        let button_y = band.y + (band.height - TASKBAR_BUTTON_SIZE) / 2.0;

        let start_button = Rect::new(
            CONTROL_PADDING,
            button_y,
            START_BUTTON_WIDTH,
            TASKBAR_BUTTON_SIZE,
        );

        let count = entries.len() as f64;
        let row_width = count * TASKBAR_BUTTON_SIZE + (count - 1.0).max(0.0) * TASKBAR_BUTTON_GAP;
        let mut x = (viewport.width - row_width) / 2.0;
        let mut buttons = Vec::with_capacity(entries.len());
        for entry in entries {
            buttons.push((
                entry.id,
                Rect::new(x, button_y, TASKBAR_BUTTON_SIZE, TASKBAR_BUTTON_SIZE),
            ));
            x += TASKBAR_BUTTON_SIZE + TASKBAR_BUTTON_GAP;
        }

        let start_menu = start_menu_open.then(|| StartMenuLayout::above(start_button, entries));

        Self {
            band,
            start_button,
            buttons,
            start_menu,
        }
    }
}

/// What a pointer position lands on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    Window {
        id: WindowKind,
        affordance: Affordance,
    },
    StartButton,
    StartMenuItem(WindowKind),
    TaskbarButton(WindowKind),
    Taskbar,
    Icon {
        index: usize,
        target: WindowKind,
    },
    Desktop,
}

/// Everything the hit test needs to know about the current frame
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// Visible windows in paint order (topmost last)
    pub windows: &'a [WindowSnapshot],
    pub icons: &'a [DesktopIcon],
    pub icon_size: Size,
    pub taskbar: &'a TaskbarLayout,
}

/// Resolves `point` to the topmost element under it
///
/// The open start menu is above everything, windows paint above the taskbar
/// and icons, and later windows in paint order are above earlier ones.
pub fn hit_test(scene: &Scene<'_>, point: Point) -> Hit {
    if let Some(menu) = &scene.taskbar.start_menu {
        if let Some((id, _)) = menu.items.iter().find(|(_, rect)| rect.contains_point(point)) {
            return Hit::StartMenuItem(*id);
        }
    }

    for window in scene.windows.iter().rev() {
        if let Some(affordance) = WindowLayout::for_rect(window.rect).affordance_at(point) {
            return Hit::Window {
                id: window.id,
                affordance,
            };
        }
    }

    if scene.taskbar.band.contains_point(point) {
        if scene.taskbar.start_button.contains_point(point) {
            return Hit::StartButton;
        }
        return scene
            .taskbar
            .buttons
            .iter()
            .find(|(_, rect)| rect.contains_point(point))
            .map(|(id, _)| Hit::TaskbarButton(*id))
            .unwrap_or(Hit::Taskbar);
    }

    for (index, icon) in scene.icons.iter().enumerate().rev() {
        if icon.bounds(scene.icon_size).contains_point(point) {
            return Hit::Icon {
                index,
                target: icon.target(),
            };
        }
    }

    Hit::Desktop
}
