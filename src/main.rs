use std::env;
use std::error::Error;
use std::fs;

use env_logger::Builder as LogBuilder;
use log::{info, LevelFilter};

use portfolio_desktop::ui::FrameRenderer;
use portfolio_desktop::{Desktop, DesktopConfig, Point, TargetZone};

/// Runs a short scripted session against the portfolio desktop, prints the
/// final window list as JSON and writes the last frame as a PNG.
///
/// Usage: portfolio-desktop [output.png] [config.json]
fn main() -> Result<(), Box<dyn Error>> {
    LogBuilder::from_default_env()
        .filter_level(LevelFilter::Info)
        .init();

    let mut args = env::args().skip(1);
    let output = args.next().unwrap_or_else(|| "desktop.png".to_string());
    let config = match args.next() {
        Some(path) => DesktopConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => DesktopConfig::default(),
    };

    info!(
        "portfolio-desktop {} on a {}x{} viewport",
        env!("CARGO_PKG_VERSION"),
        config.viewport.width,
        config.viewport.height
    );
    let mut desktop = Desktop::portfolio(config);

    // Open projects from the taskbar and drag it by its header
    desktop.taskbar_click("projects")?;
    if let Some(projects) = desktop.window("projects") {
        let grab = Point::new(projects.rect.x + 40.0, projects.rect.y + 20.0);
        desktop.pointer_down_at(grab)?;
        desktop.on_pointer_move(Point::new(grab.x + 200.0, grab.y + 100.0));
        desktop.on_pointer_up();
    }

    // Shrink it from the bottom-right corner
    if let Some(projects) = desktop.window("projects") {
        let corner = Point::new(projects.rect.right() - 4.0, projects.rect.bottom() - 4.0);
        desktop.on_pointer_down("projects", corner, TargetZone::ResizeHandle)?;
        desktop.on_pointer_move(Point::new(corner.x - 150.0, corner.y - 120.0));
        desktop.on_pointer_up();
    }

    // Pick skills from the start menu
    desktop.toggle_start_menu();
    desktop.start_menu_select("skills")?;

    println!("{}", desktop.snapshot_json()?);

    let renderer = FrameRenderer::new();
    let frame = renderer.render(&desktop)?;
    fs::write(&output, renderer.encode_png(&frame)?)?;
    info!("Frame written to {}", output);

    Ok(())
}
