//! In-memory 1-bit display
//!
//! Stands in for the watch's monochrome panel when running on a desktop. The
//! layout matches what the panel controller expects: rows of bytes, each byte
//! covering 8 horizontal pixels, most significant bit first. A set bit is a
//! lit (white) pixel.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use std::convert::Infallible;

/// Monochrome framebuffer implementing `DrawTarget`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    bits: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        // Each row has (width+7)/8 bytes
        let bytes_per_row = width.div_ceil(8);
        let buffer_size = (bytes_per_row * height) as usize;
        Self {
            width,
            height,
            bits: vec![0x00; buffer_size], // Dark by default
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn locate(&self, point: Point) -> Option<(usize, u8)> {
        let (x, y) = (u32::try_from(point.x).ok()?, u32::try_from(point.y).ok()?);
        if x >= self.width || y >= self.height {
            return None;
        }
        let bytes_per_row = self.width.div_ceil(8);
        let byte_index = (y * bytes_per_row + x / 8) as usize;
        let bit_mask = 0x80 >> (x % 8);
        Some((byte_index, bit_mask))
    }

    /// Pixels outside the buffer are dropped.
    pub fn set_pixel(&mut self, point: Point, color: BinaryColor) {
        if let Some((index, mask)) = self.locate(point) {
            match color {
                BinaryColor::On => self.bits[index] |= mask,
                BinaryColor::Off => self.bits[index] &= !mask,
            }
        }
    }

    /// Color at `point`, `None` when outside the buffer.
    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        self.locate(point).map(|(index, mask)| {
            if self.bits[index] & mask != 0 {
                BinaryColor::On
            } else {
                BinaryColor::Off
            }
        })
    }

    /// Every lit pixel, row by row.
    pub fn lit_points(&self) -> impl Iterator<Item = Point> + '_ {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height)
            .flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
            .filter(|p| self.pixel(*p) == Some(BinaryColor::On))
    }

    pub fn count_lit(&self) -> usize {
        self.lit_points().count()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }
}
