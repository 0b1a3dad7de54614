//! # Date Readout Buffers
//!
//! The date readout is two tiny text fields under the dial: the weekday
//! abbreviation and the zero-padded day of month. Both live in fixed byte
//! buffers that are overwritten in place on every date pass, so the display
//! never allocates while the watchface is running.
//!
//! A buffer of capacity `N` holds at most `N - 1` bytes. The last slot stays
//! reserved for the display toolkit's terminator, and a write that would use
//! it is rejected with [`TextError::Overflow`] rather than truncated.

use chrono::{Datelike, NaiveDateTime};
use std::fmt;
use thiserror::Error;

/// Capacity of the weekday buffer.
pub const DAY_CAPACITY: usize = 6;
/// Capacity of the day-of-month buffer.
pub const NUM_CAPACITY: usize = 4;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TextError {
    /// Formatted text did not fit in the buffer
    #[error("text does not fit in a {capacity}-byte buffer")]
    Overflow { capacity: usize },
}

/// Fixed-capacity text buffer formatted in place.
#[derive(Clone, Copy)]
pub struct FixedText<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Default for FixedText<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FixedText<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }

    /// Largest number of bytes the buffer accepts.
    pub const fn limit() -> usize {
        N.saturating_sub(1)
    }

    pub fn as_str(&self) -> &str {
        // Only ever filled from a successfully formatted &str
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Replace the contents with `args`.
    ///
    /// On overflow the previous contents are kept.
    pub fn format(&mut self, args: fmt::Arguments) -> Result<&str, TextError> {
        let mut scratch = [0u8; N];
        let limit = Self::limit();
        let written = format_no_std::show(&mut scratch[..limit], args)
            .map_err(|_| TextError::Overflow { capacity: N })?
            .len();

        self.buf = scratch;
        self.len = written;
        Ok(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FixedText").field(&self.as_str()).finish()
    }
}

impl<const N: usize> fmt::Display for FixedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two date fields shown under the dial.
#[derive(Clone, Debug, Default)]
pub struct DateLabels {
    /// Weekday abbreviation, e.g. `Wed`
    pub day: FixedText<DAY_CAPACITY>,
    /// Zero-padded day of month, e.g. `05`
    pub num: FixedText<NUM_CAPACITY>,
}

impl DateLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reformat both fields for `time`.
    pub fn update(&mut self, time: &NaiveDateTime) -> Result<(), TextError> {
        self.day.format(format_args!("{}", time.weekday()))?;
        self.num.format(format_args!("{:02}", time.day()))?;
        Ok(())
    }
}
