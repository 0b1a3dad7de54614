//! # Host Services and Window Lifecycle
//!
//! The watchface does not own the device. A host supplies the periodic tick,
//! the vibration motor and the display, and tells the watchface when its
//! window is loaded and unloaded. This module holds the pieces of that
//! contract that the library needs:
//!
//! - [`TickUnit`]: granularity of the tick service
//! - [`Haptics`]: fire-and-forget vibration
//! - [`Watchface`]: the window, owning the [`ClockFaceRenderer`] between
//!   `load` and `unload`
//!
//! All drawable objects (markers, hand, date labels) are created in
//! [`Watchface::load`] and released exactly once in [`Watchface::unload`].

use crate::face::{ClockFaceRenderer, TickOutcome};
use crate::geometry::Canvas;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Granularity of the host tick service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickUnit {
    /// Normal cadence
    #[default]
    Minute,
    /// Debug cadence: the hand sweeps once a minute
    Second,
}

/// Vibration motor of the device.
pub trait Haptics {
    /// Single short pulse, returns immediately.
    fn short_pulse(&mut self);
}

/// Where the window is in its lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Idle,
    Loaded,
    Unloaded,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WatchfaceError {
    #[error("watchface is already loaded")]
    AlreadyLoaded,
    #[error("watchface is not loaded")]
    NotLoaded,
    #[error("watchface was unloaded and cannot be reused")]
    Unloaded,
}

/// The watchface window.
#[derive(Debug)]
pub struct Watchface {
    canvas: Canvas,
    unit: TickUnit,
    state: Lifecycle,
    face: Option<ClockFaceRenderer>,
}

impl Watchface {
    pub fn new(canvas: Canvas, unit: TickUnit) -> Self {
        Self {
            canvas,
            unit,
            state: Lifecycle::Idle,
            face: None,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state
    }

    pub fn unit(&self) -> TickUnit {
        self.unit
    }

    /// Create the renderer and its drawables.
    pub fn load(&mut self) -> Result<(), WatchfaceError> {
        match self.state {
            Lifecycle::Idle => {}
            Lifecycle::Loaded => return Err(WatchfaceError::AlreadyLoaded),
            Lifecycle::Unloaded => return Err(WatchfaceError::Unloaded),
        }

        log::info!(
            "Loading watchface on {}x{} canvas ({:?} ticks)",
            self.canvas.width,
            self.canvas.height,
            self.unit
        );
        self.face = Some(ClockFaceRenderer::new(self.canvas, self.unit));
        self.state = Lifecycle::Loaded;
        Ok(())
    }

    /// Release the renderer and its drawables.
    pub fn unload(&mut self) -> Result<(), WatchfaceError> {
        match self.state {
            Lifecycle::Loaded => {}
            Lifecycle::Idle => return Err(WatchfaceError::NotLoaded),
            Lifecycle::Unloaded => return Err(WatchfaceError::Unloaded),
        }

        log::info!("Unloading watchface");
        self.face = None;
        self.state = Lifecycle::Unloaded;
        Ok(())
    }

    pub fn face(&self) -> Result<&ClockFaceRenderer, WatchfaceError> {
        self.face.as_ref().ok_or(self.not_loaded())
    }

    pub fn face_mut(&mut self) -> Result<&mut ClockFaceRenderer, WatchfaceError> {
        let err = self.not_loaded();
        self.face.as_mut().ok_or(err)
    }

    /// Forward a timer tick to the loaded face.
    pub fn handle_tick<H: Haptics>(
        &mut self,
        time: &NaiveDateTime,
        haptics: &mut H,
    ) -> Result<TickOutcome, WatchfaceError> {
        Ok(self.face_mut()?.on_tick(time, haptics))
    }

    fn not_loaded(&self) -> WatchfaceError {
        match self.state {
            Lifecycle::Unloaded => WatchfaceError::Unloaded,
            _ => WatchfaceError::NotLoaded,
        }
    }
}
