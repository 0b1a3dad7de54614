//! # 24-Hour Analog Watchface Library
//!
//! This library draws a single watchface for a small monochrome wrist display:
//! a 24-hour dial with one hour hand, fixed midnight/noon markers, 46 ring
//! ticks and a short date readout. It is designed around the constraints of
//! the target watch:
//!
//! ## Design Philosophy
//!
//! ### Fixed Drawables
//! - **No allocation while running**: the hand shape, both markers and the date
//!   buffers are created once when the window loads and reused on every redraw
//! - **Bounded text**: the date fields live in fixed byte buffers (6 and 4
//!   bytes) that reject oversize writes instead of truncating
//!
//! ### Refresh Cadence
//! The host timer fires once per minute (once per second in debug cadence):
//! - **Dirty marking**: a tick marks the root dirty, fanning out to the
//!   background, date and hands layers
//! - **Hourly pulse**: when the tick lands on minute 0 the vibration motor gets
//!   a single short pulse
//!
//! ### Drawing Model
//! All passes draw through `embedded_graphics`, so the same code renders onto
//! the watch panel, the in-memory [`framebuffer::FrameBuffer`] used by tests,
//! or the terminal in development mode.
//!
//! ## Core Types
//! - [`ClockFaceRenderer`]: the three draw passes and the tick callback
//! - [`Watchface`]: the window lifecycle around the renderer
//! - [`Canvas`]: fixed display bounds and all derived layout points
//!
//! # Example
//! ```
//! use analog24_lib::{Canvas, ClockFaceRenderer, TickUnit};
//! use analog24_lib::framebuffer::FrameBuffer;
//! use chrono::NaiveDate;
//!
//! let time = NaiveDate::from_ymd_opt(2025, 11, 5)
//!     .unwrap()
//!     .and_hms_opt(14, 30, 0)
//!     .unwrap();
//!
//! let mut face = ClockFaceRenderer::new(Canvas::default(), TickUnit::Minute);
//! let mut display = FrameBuffer::new(144, 168);
//! face.redraw(&mut display, &time).unwrap();
//!
//! assert_eq!(face.labels().day.as_str(), "Wed");
//! assert_eq!(face.labels().num.as_str(), "05");
//! ```

// Module declarations
pub mod config;
pub mod date;
pub mod face;
pub mod framebuffer;
pub mod geometry;
pub mod host;
pub mod renderer;
pub mod ticker;

pub use face::{ClockFaceRenderer, Layer, RenderError, TickOutcome};
pub use geometry::Canvas;
pub use host::{Haptics, Lifecycle, TickUnit, Watchface, WatchfaceError};
