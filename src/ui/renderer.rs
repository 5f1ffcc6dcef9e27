//! Desktop frame rendering
//!
//! Paints a software frame of the desktop with tiny-skia. Layout calculation
//! is kept separate from rasterization: [`FrameLayout`] is a flat, ordered
//! list of shapes built from the desktop state, and [`FrameRenderer`] only
//! knows how to paint shapes. Geometry comes from [`crate::ui::layout`], so the
//! frame matches hit testing exactly.

use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap, Point as SkiaPoint,
    Rect as SkiaRect, SpreadMode, Stroke, Transform,
};

use crate::app::controller::Desktop;
use crate::app::manager::WindowSnapshot;
use crate::domain::core::{Rect, Size};
use crate::domain::icon::DesktopIcon;
use crate::domain::kind::Accent;
use crate::ui::layout::{TaskbarLayout, WindowLayout, CONTROL_PADDING};

/// Spacing of the wallpaper grid
pub const WALLPAPER_GRID: f64 = 50.0;
/// Side of the glyph square drawn for a desktop icon
const ICON_GLYPH_SIZE: f64 = 48.0;
/// Height of the label plate under an icon glyph
const ICON_LABEL_HEIGHT: f64 = 20.0;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create a {width}x{height} pixmap for rendering")]
    PixmapCreationFailed { width: u32, height: u32 },

    #[error("Failed to encode frame as PNG: {0}")]
    Encode(String),
}

/// Represents a single line segment
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
    pub color: Color,
}

/// One paint operation
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Fill { rect: Rect, color: Color },
    Outline { rect: Rect, width: f32, color: Color },
    Circle { cx: f32, cy: f32, radius: f32, color: Color },
    Line(Line),
}

/// Pre-calculated frame, painted back to front
#[derive(Debug, Clone)]
pub struct FrameLayout {
    /// Wallpaper gradient, top to bottom
    pub wallpaper: (Color, Color),

    pub shapes: Vec<Shape>,

    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl FrameLayout {
    /// Builds the frame for the desktop's current state
    pub fn from_desktop(desktop: &Desktop) -> Self {
        let config = desktop.config();
        let mut layout = Self {
            wallpaper: (
                Color::from_rgba8(30, 58, 138, 255),
                Color::from_rgba8(88, 28, 135, 255),
            ),
            shapes: Vec::new(),
            canvas_width: config.viewport.width as f32,
            canvas_height: config.viewport.height as f32,
        };

        layout.push_wallpaper_grid(config.visible_region());
        for icon in desktop.icons() {
            layout.push_icon(icon, config.icon_size);
        }
        for window in desktop.render_order() {
            layout.push_window(&window);
        }
        let entries = desktop.taskbar_entries();
        let taskbar = desktop.taskbar_layout();
        let active: Vec<(bool, bool)> = entries.iter().map(|e| (e.active, e.focused)).collect();
        layout.push_taskbar(&taskbar, &active);

        layout
    }

    fn push_wallpaper_grid(&mut self, region: Size) {
        let color = Color::from_rgba8(255, 255, 255, 20);
        let width = region.width as f32;
        let height = region.height as f32;

        let mut x = WALLPAPER_GRID;
        while x < region.width {
            self.shapes.push(Shape::Line(Line {
                x1: x as f32,
                y1: 0.0,
                x2: x as f32,
                y2: height,
                width: 1.0,
                color,
            }));
            x += WALLPAPER_GRID;
        }

        let mut y = WALLPAPER_GRID;
        while y < region.height {
            self.shapes.push(Shape::Line(Line {
                x1: 0.0,
                y1: y as f32,
                x2: width,
                y2: y as f32,
                width: 1.0,
                color,
            }));
            y += WALLPAPER_GRID;
        }
    }

    fn push_icon(&mut self, icon: &DesktopIcon, footprint: Size) {
        let bounds = icon.bounds(footprint);
        let glyph_x = bounds.x + (bounds.width - ICON_GLYPH_SIZE).max(0.0) / 2.0;
        self.shapes.push(Shape::Fill {
            rect: Rect::new(glyph_x, bounds.y, ICON_GLYPH_SIZE, ICON_GLYPH_SIZE),
            color: accent_color(icon.target().accent(), 255),
        });
        self.shapes.push(Shape::Fill {
            rect: Rect::new(
                bounds.x,
                bounds.y + ICON_GLYPH_SIZE + 8.0,
                bounds.width,
                ICON_LABEL_HEIGHT,
            ),
            color: Color::from_rgba8(0, 0, 0, 90),
        });
    }

    fn push_window(&mut self, window: &WindowSnapshot) {
        let regions = WindowLayout::for_rect(window.rect);
        let accent = window.id.accent();

        self.shapes.push(Shape::Fill {
            rect: regions.body,
            color: Color::from_rgba8(255, 255, 255, 242),
        });
        self.shapes.push(Shape::Fill {
            rect: regions.header,
            color: accent_color(accent, 255),
        });
        if window.is_focused {
            self.shapes.push(Shape::Outline {
                rect: regions.frame,
                width: 2.0,
                color: accent_color(accent, 255),
            });
        } else {
            self.shapes.push(Shape::Outline {
                rect: regions.frame,
                width: 1.0,
                color: Color::from_rgba8(0, 0, 0, 60),
            });
        }

        self.push_control(regions.minimize, Color::from_rgba8(234, 179, 8, 255));
        self.push_control(regions.close, Color::from_rgba8(239, 68, 68, 255));

        // Three diagonal strokes in the resize corner
        let handle = regions.resize_handle;
        let grip = Color::from_rgba8(156, 163, 175, 255);
        for step in 1..=3 {
            let inset = handle.width * step as f64 / 4.0;
            self.shapes.push(Shape::Line(Line {
                x1: (handle.right() - inset) as f32,
                y1: handle.bottom() as f32 - 2.0,
                x2: handle.right() as f32 - 2.0,
                y2: (handle.bottom() - inset) as f32,
                width: 1.5,
                color: grip,
            }));
        }
    }

    fn push_control(&mut self, rect: Rect, color: Color) {
        self.shapes.push(Shape::Circle {
            cx: (rect.x + rect.width / 2.0) as f32,
            cy: (rect.y + rect.height / 2.0) as f32,
            radius: (rect.width / 2.0) as f32,
            color,
        });
    }

    fn push_taskbar(&mut self, taskbar: &TaskbarLayout, states: &[(bool, bool)]) {
        self.shapes.push(Shape::Fill {
            rect: taskbar.band,
            color: Color::from_rgba8(17, 24, 39, 230),
        });
        self.shapes.push(Shape::Fill {
            rect: taskbar.start_button,
            color: Color::from_rgba8(37, 99, 235, 255),
        });

        for ((kind, rect), (active, focused)) in taskbar.buttons.iter().zip(states) {
            let alpha = if *active { 255 } else { 110 };
            self.shapes.push(Shape::Fill {
                rect: *rect,
                color: accent_color(kind.accent(), alpha),
            });
            if *focused {
                self.shapes.push(Shape::Outline {
                    rect: *rect,
                    width: 2.0,
                    color: Color::WHITE,
                });
            }
            if *active {
                self.shapes.push(Shape::Circle {
                    cx: (rect.x + rect.width / 2.0) as f32,
                    cy: (rect.bottom() + 4.0) as f32,
                    radius: 2.5,
                    color: Color::WHITE,
                });
            }
        }

        if let Some(menu) = &taskbar.start_menu {
            self.shapes.push(Shape::Fill {
                rect: menu.panel,
                color: Color::from_rgba8(31, 41, 55, 245),
            });
            for (kind, row) in &menu.items {
                let radius = (row.height / 4.0) as f32;
                self.shapes.push(Shape::Circle {
                    cx: (row.x + CONTROL_PADDING) as f32 + radius,
                    cy: (row.y + row.height / 2.0) as f32,
                    radius,
                    color: accent_color(kind.accent(), 255),
                });
            }
        }
    }
}

/// Software renderer for desktop frames
#[derive(Debug, Default)]
pub struct FrameRenderer;

impl FrameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Lays out and paints the desktop in one step
    pub fn render(&self, desktop: &Desktop) -> Result<Pixmap, RendererError> {
        self.render_layout(&FrameLayout::from_desktop(desktop))
    }

    /// Render a frame layout to a pixmap
    pub fn render_layout(&self, layout: &FrameLayout) -> Result<Pixmap, RendererError> {
        let width = layout.canvas_width as u32;
        let height = layout.canvas_height as u32;
        let mut pixmap = Pixmap::new(width, height)
            .ok_or(RendererError::PixmapCreationFailed { width, height })?;

        self.render_wallpaper(&mut pixmap, layout);
        for shape in &layout.shapes {
            self.render_shape(&mut pixmap, shape);
        }

        Ok(pixmap)
    }

    /// PNG bytes of a rendered frame
    pub fn encode_png(&self, pixmap: &Pixmap) -> Result<Vec<u8>, RendererError> {
        pixmap
            .encode_png()
            .map_err(|err| RendererError::Encode(err.to_string()))
    }

    fn render_wallpaper(&self, pixmap: &mut Pixmap, layout: &FrameLayout) {
        let (top, bottom) = layout.wallpaper;
        let shader = LinearGradient::new(
            SkiaPoint::from_xy(0.0, 0.0),
            SkiaPoint::from_xy(0.0, layout.canvas_height),
            vec![GradientStop::new(0.0, top), GradientStop::new(1.0, bottom)],
            SpreadMode::Pad,
            Transform::identity(),
        );

        match (shader, SkiaRect::from_xywh(0.0, 0.0, layout.canvas_width, layout.canvas_height)) {
            (Some(shader), Some(rect)) => {
                let paint = Paint {
                    shader,
                    ..Paint::default()
                };
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
            // Degenerate gradient on a one pixel tall canvas
            _ => pixmap.fill(top),
        }
    }

    fn render_shape(&self, pixmap: &mut Pixmap, shape: &Shape) {
        let mut paint = Paint::default();
        paint.anti_alias = true;

        match shape {
            Shape::Fill { rect, color } => {
                if let Some(rect) = to_skia(rect) {
                    paint.set_color(*color);
                    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                }
            }
            Shape::Outline { rect, width, color } => {
                if let Some(path) = to_skia(rect).map(PathBuilder::from_rect) {
                    paint.set_color(*color);
                    let stroke = Stroke {
                        width: *width,
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                }
            }
            Shape::Circle {
                cx,
                cy,
                radius,
                color,
            } => {
                if let Some(path) = PathBuilder::from_circle(*cx, *cy, *radius) {
                    paint.set_color(*color);
                    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
                }
            }
            Shape::Line(line) => {
                let mut path_builder = PathBuilder::new();
                path_builder.move_to(line.x1, line.y1);
                path_builder.line_to(line.x2, line.y2);

                if let Some(path) = path_builder.finish() {
                    paint.set_color(line.color);
                    let stroke = Stroke {
                        width: line.width,
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                }
            }
        }
    }
}

fn accent_color([r, g, b]: Accent, alpha: u8) -> Color {
    Color::from_rgba8(r, g, b, alpha)
}

fn to_skia(rect: &Rect) -> Option<SkiaRect> {
    SkiaRect::from_xywh(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )
}
