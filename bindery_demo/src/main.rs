//! Window demo
//!
//! Opens a window from an optional config file and reports what the native
//! library can see: monitors, clipboard contents and joysticks.
//!
//! ```text
//! window_demo [CONFIG.toml|CONFIG.ron] [--frames N]
//! ```

use std::path::PathBuf;
use std::time::Duration;

use bindery::prelude::*;
use clap::Parser;
use thiserror::Error;

const FRAME_TIME: Duration = Duration::from_millis(16);

#[derive(Error, Debug)]
enum DemoError {
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Open a window and report what the native library can see
#[derive(Parser, Debug)]
#[command(name = "window_demo", version)]
struct Args {
    /// Window settings file (.toml or .ron)
    config: Option<PathBuf>,

    /// Close after this many frames
    #[arg(long, value_name = "N")]
    frames: Option<u64>,
}

fn report_monitors() {
    for (index, monitor) in Monitor::all().iter().enumerate() {
        let name = monitor.name().unwrap_or_else(|e| format!("<{e}>"));
        match monitor.video_mode() {
            Ok(mode) => log::info!(
                "Monitor {index}: {name} {}x{} @ {}Hz",
                mode.width,
                mode.height,
                mode.refresh_rate
            ),
            Err(e) => log::warn!("Monitor {index}: {name} ({e})"),
        }
    }
}

fn report_clipboard() -> Result<(), DemoError> {
    let clipboard = Clipboard::open()?;
    match clipboard.text()? {
        Some(text) => log::info!("Clipboard holds {} bytes of text", text.len()),
        None => log::info!("Clipboard holds no text"),
    }
    Ok(())
}

fn report_joysticks() -> Result<(), DemoError> {
    for id in Joystick::connected()? {
        let joystick = Joystick::open(id)?;
        log::info!(
            "Joystick {id}: {} ({} axes, {} buttons, gamepad: {})",
            joystick.name().unwrap_or_default(),
            joystick.axes().len(),
            joystick.buttons().len(),
            joystick.is_gamepad()
        );
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), DemoError> {
    let config = match &args.config {
        Some(path) => WindowConfig::load_from_file(path)?,
        None => WindowConfig::default(),
    };
    config.validate()?;

    log::info!("Opening '{}' ({}x{})", config.title, config.width, config.height);
    let window = Window::from_config(&config)?;
    log::debug!("Window flags: {:?}", window.flags()?);

    report_monitors();
    report_clipboard()?;
    report_joysticks()?;

    let mut frame = 0_u64;
    while !window.should_close()? {
        poll_events()?;
        frame += 1;
        if args.frames.is_some_and(|limit| frame >= limit) {
            log::info!("Frame limit reached");
            break;
        }
        std::thread::sleep(FRAME_TIME);
    }

    log::info!("Closing after {frame} frames");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    bindery::foundation::logging::init();

    log::info!("Starting window demo");

    let args = Args::parse();
    match run(&args) {
        Ok(()) => {
            log::info!("Window demo finished successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Window demo failed: {e}");
            Err(e.into())
        }
    }
}
