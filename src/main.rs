//! # Watchface Host Entry Point
//!
//! This binary plays the part of the watch's operating system for the
//! watchface library: it loads the window, drives the tick service, forwards
//! hourly pulses to a stand-in vibration motor and shows every redraw on the
//! terminal.
//!
//! ## Usage
//! - `analog24`: run until Ctrl-C, redrawing on every tick
//! - `analog24 --stdout`: draw a single frame for the current time and exit
//! - `analog24 --debug`: tick every second and sweep the hand once a minute
//! - `analog24 --config PATH`: read settings from `PATH` instead of
//!   `watchface.toml`

// Test modules
#[cfg(test)]
mod tests;

use analog24_lib::{
    config::Config,
    framebuffer::FrameBuffer,
    renderer::{draw_ascii, render_ascii},
    ticker::TickService,
    Canvas, Haptics, TickUnit, Watchface,
};
use anyhow::Context;
use chrono::Local;
use std::env;

/// ANSI clear-screen and cursor-home, so each frame overwrites the last.
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Vibration motor stand-in: rings the terminal bell.
struct TerminalHaptics;

impl Haptics for TerminalHaptics {
    fn short_pulse(&mut self) {
        log::info!("bzzt (short pulse)");
        print!("\x07");
    }
}

/// Command line options
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    /// Render once to stdout and exit
    development_mode: bool,
    /// Force the per-second debug cadence
    debug: bool,
    /// Explicit config path
    config_path: Option<String>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Options> {
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--stdout" => options.development_mode = true,
            "--debug" => options.debug = true,
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                options.config_path = Some(path);
            }
            other => anyhow::bail!("unknown argument: {}", other),
        }
    }
    Ok(options)
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_args(env::args().skip(1))?;

    let mut config = match &options.config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };
    if options.debug {
        config.timer.unit = TickUnit::Second;
    }
    config.validate()?;

    let canvas = config.canvas();
    let mut watchface = Watchface::new(canvas, config.timer.unit);
    session(&mut watchface, |watchface| run(watchface, &options, canvas))
}

/// Load the window, run `body`, and unload again even when `body` fails.
fn session<T, F>(watchface: &mut Watchface, body: F) -> anyhow::Result<T>
where
    F: FnOnce(&mut Watchface) -> anyhow::Result<T>,
{
    watchface.load()?;
    let result = body(watchface);
    let unloaded = watchface.unload();
    let value = result?;
    unloaded?;
    Ok(value)
}

/// Draw the first frame, then either print it once or run the tick loop.
fn run(watchface: &mut Watchface, options: &Options, canvas: Canvas) -> anyhow::Result<()> {
    let mut display = FrameBuffer::new(canvas.width, canvas.height);
    watchface
        .face_mut()?
        .redraw(&mut display, &Local::now().naive_local())?;

    // Development mode: one frame, no timer
    if options.development_mode {
        draw_ascii(&display);
        return Ok(());
    }

    print!("{}{}", CLEAR_SCREEN, render_ascii(&display));

    let rt = tokio::runtime::Runtime::new()?;
    let mut haptics = TerminalHaptics;
    let service = TickService::new(watchface.unit());

    let ticks = rt.block_on(service.run(
        |now| -> anyhow::Result<()> {
            watchface.handle_tick(&now, &mut haptics)?;
            watchface.face_mut()?.redraw(&mut display, &now)?;
            print!("{}{}", CLEAR_SCREEN, render_ascii(&display));
            Ok(())
        },
        async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                // Keep ticking; the process can still be killed
                log::error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        },
    ))?;

    log::info!("Stopped after {} ticks", ticks);
    Ok(())
}
