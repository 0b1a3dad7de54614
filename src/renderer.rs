//! # Terminal Rendering
//!
//! Development-mode output: the face is drawn into a [`FrameBuffer`] exactly
//! as it would be on the watch, then the buffer is dumped to the terminal.
//!
//! Terminal cells are roughly twice as tall as they are wide, so each
//! character covers two vertically stacked pixels using half-block glyphs:
//!
//! | top | bottom | glyph |
//! |-----|--------|-------|
//! | off | off    | ` `   |
//! | on  | off    | `▀`   |
//! | off | on     | `▄`   |
//! | on  | on     | `█`   |

use crate::face::{ClockFaceRenderer, RenderError};
use crate::framebuffer::FrameBuffer;
use chrono::NaiveDateTime;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use std::convert::Infallible;

fn cell(top: bool, bottom: bool) -> char {
    match (top, bottom) {
        (false, false) => ' ',
        (true, false) => '▀',
        (false, true) => '▄',
        (true, true) => '█',
    }
}

/// Render the framebuffer as text, one line per two pixel rows.
pub fn render_ascii(fb: &FrameBuffer) -> String {
    let lit = |x: i32, y: i32| fb.pixel(Point::new(x, y)) == Some(BinaryColor::On);
    let (width, height) = (fb.width() as i32, fb.height() as i32);

    let mut out = String::with_capacity(((width + 1) * (height + 1) / 2) as usize * 3);
    for y in (0..height).step_by(2) {
        for x in 0..width {
            out.push(cell(lit(x, y), lit(x, y + 1)));
        }
        out.push('\n');
    }
    out
}

/// Print the framebuffer to stdout.
pub fn draw_ascii(fb: &FrameBuffer) {
    print!("{}", render_ascii(fb));
}

/// Draw every dirty layer of `face` into a fresh framebuffer.
pub fn render_frame(
    face: &mut ClockFaceRenderer,
    time: &NaiveDateTime,
) -> Result<FrameBuffer, RenderError<Infallible>> {
    let canvas = *face.canvas();
    let mut fb = FrameBuffer::new(canvas.width, canvas.height);
    face.mark_all_dirty();
    face.redraw(&mut fb, time)?;
    Ok(fb)
}
