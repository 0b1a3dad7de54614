//! # Clock Face Renderer
//!
//! Draws the watchface into any monochrome `embedded_graphics` target. The
//! face is split into three layers, each with its own pass:
//!
//! 1. **Background**: black fill, midnight/noon markers and the 46 ring ticks
//! 2. **Date**: weekday and day-of-month fields under the dial
//! 3. **Hands**: the rotating hour hand and the center dot
//!
//! A timer tick marks the root dirty, which fans out to all three layers. The
//! host's redraw cycle then calls [`ClockFaceRenderer::redraw`]. The layers
//! share one target, so a single dirty layer still repaints the whole window
//! in layer order before the marks are cleared.

use crate::date::{DateLabels, TextError};
use crate::geometry::{debug_hand_angle, hand_angle, Canvas, HandShape};
use crate::host::{Haptics, TickUnit};
use chrono::{NaiveDateTime, Timelike};
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_9X18, FONT_9X18_BOLD},
        MonoFont, MonoTextStyle, MonoTextStyleBuilder,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, Polyline, PrimitiveStyle, Rectangle, Triangle},
    text::{Baseline, Text},
};
use std::fmt;
use thiserror::Error;

/// Size of the weekday field.
const DAY_FIELD: Size = Size::new(27, 20);
/// Size of the day-of-month field.
const NUM_FIELD: Size = Size::new(18, 20);

/// Errors raised while drawing a pass.
#[derive(Error, Debug)]
pub enum RenderError<E: fmt::Debug> {
    /// The draw target rejected a primitive
    #[error("display error: {0:?}")]
    Display(E),

    /// A date field could not be formatted
    #[error(transparent)]
    Text(#[from] TextError),
}

/// Drawing layers, in the order they are composed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Background,
    Date,
    Hands,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Background, Layer::Date, Layer::Hands];
}

/// Result of a timer tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// An on-the-hour pulse was sent to the haptics
    pub pulsed: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct DirtyLayers {
    background: bool,
    date: bool,
    hands: bool,
}

impl DirtyLayers {
    fn flag(&mut self, layer: Layer) -> &mut bool {
        match layer {
            Layer::Background => &mut self.background,
            Layer::Date => &mut self.date,
            Layer::Hands => &mut self.hands,
        }
    }
}

/// The 24-hour face: fixed drawables plus the date buffers.
#[derive(Clone, Debug)]
pub struct ClockFaceRenderer {
    canvas: Canvas,
    unit: TickUnit,
    hand: HandShape,
    midnight: Triangle,
    noon: Triangle,
    labels: DateLabels,
    dirty: DirtyLayers,
}

impl ClockFaceRenderer {
    /// Build the face. Every layer starts dirty so the first redraw is complete.
    pub fn new(canvas: Canvas, unit: TickUnit) -> Self {
        let mut face = Self {
            canvas,
            unit,
            hand: HandShape::default(),
            midnight: canvas.midnight_marker(),
            noon: canvas.noon_marker(),
            labels: DateLabels::new(),
            dirty: DirtyLayers::default(),
        };
        face.mark_all_dirty();
        face
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn labels(&self) -> &DateLabels {
        &self.labels
    }

    pub fn mark_dirty(&mut self, layer: Layer) {
        *self.dirty.flag(layer) = true;
    }

    /// Dirty-mark the root, which covers every layer.
    pub fn mark_all_dirty(&mut self) {
        for layer in Layer::ALL {
            self.mark_dirty(layer);
        }
    }

    pub fn is_dirty(&self, layer: Layer) -> bool {
        match layer {
            Layer::Background => self.dirty.background,
            Layer::Date => self.dirty.date,
            Layer::Hands => self.dirty.hands,
        }
    }

    /// Turn of the hand for `time` at the configured cadence.
    pub fn hand_turns(&self, time: &NaiveDateTime) -> f32 {
        match self.unit {
            TickUnit::Minute => hand_angle(time.hour(), time.minute()),
            TickUnit::Second => debug_hand_angle(time.second()),
        }
    }

    /// Timer callback: request a full redraw and pulse on the hour.
    pub fn on_tick<H: Haptics>(&mut self, time: &NaiveDateTime, haptics: &mut H) -> TickOutcome {
        self.mark_all_dirty();

        let pulsed = time.minute() == 0;
        if pulsed {
            log::info!("On the hour ({:02}:00), pulsing", time.hour());
            haptics.short_pulse();
        }

        TickOutcome { pulsed }
    }

    /// Repaint the window if any layer is dirty, then clear the marks.
    ///
    /// Every pass runs: a hand drawn without the background under it would
    /// leave the previous hand on the display.
    pub fn redraw<D>(
        &mut self,
        target: &mut D,
        time: &NaiveDateTime,
    ) -> Result<(), RenderError<D::Error>>
    where
        D: DrawTarget<Color = BinaryColor>,
        D::Error: fmt::Debug,
    {
        if self.dirty == DirtyLayers::default() {
            return Ok(());
        }

        for layer in Layer::ALL {
            log::debug!("Redrawing {:?} layer", layer);
            match layer {
                Layer::Background => self.draw_background(target)?,
                Layer::Date => self.draw_date(target, time)?,
                Layer::Hands => self.draw_hands(target, time)?,
            }
            *self.dirty.flag(layer) = false;
        }
        Ok(())
    }

    /// Black fill, the two fixed markers and the ring ticks.
    pub fn draw_background<D>(&self, target: &mut D) -> Result<(), RenderError<D::Error>>
    where
        D: DrawTarget<Color = BinaryColor>,
        D::Error: fmt::Debug,
    {
        self.canvas
            .bounds()
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(target)
            .map_err(RenderError::Display)?;

        self.midnight
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(target)
            .map_err(RenderError::Display)?;
        self.noon
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(target)
            .map_err(RenderError::Display)?;

        let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
        for tick in self.canvas.ring_ticks() {
            match tick.inner {
                Some(inner) => Line::new(inner, tick.outer)
                    .into_styled(stroke)
                    .draw(target)
                    .map_err(RenderError::Display)?,
                None => Pixel(tick.outer, BinaryColor::On)
                    .draw(target)
                    .map_err(RenderError::Display)?,
            }
        }
        Ok(())
    }

    /// Hour hand (white, outlined black) and the center dot.
    pub fn draw_hands<D>(
        &self,
        target: &mut D,
        time: &NaiveDateTime,
    ) -> Result<(), RenderError<D::Error>>
    where
        D: DrawTarget<Color = BinaryColor>,
        D::Error: fmt::Debug,
    {
        let [left, tail, right, tip] = self
            .hand
            .rotated(self.hand_turns(time), self.canvas.pivot());

        // The kite is convex, so two triangles split along tail-tip cover it
        let fill = PrimitiveStyle::with_fill(BinaryColor::On);
        for half in [
            Triangle::new(left, tail, tip),
            Triangle::new(tail, right, tip),
        ] {
            half.into_styled(fill)
                .draw(target)
                .map_err(RenderError::Display)?;
        }

        let outline = [left, tail, right, tip, left];
        Polyline::new(&outline)
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::Off, 1))
            .draw(target)
            .map_err(RenderError::Display)?;

        self.canvas
            .center_dot()
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(target)
            .map_err(RenderError::Display)?;
        Ok(())
    }

    /// Refresh the date buffers and draw both fields.
    pub fn draw_date<D>(
        &mut self,
        target: &mut D,
        time: &NaiveDateTime,
    ) -> Result<(), RenderError<D::Error>>
    where
        D: DrawTarget<Color = BinaryColor>,
        D::Error: fmt::Debug,
    {
        self.labels.update(time)?;

        let (day_field, num_field) = self.date_fields();
        draw_field(target, day_field, self.labels.day.as_str(), &FONT_9X18)?;
        draw_field(target, num_field, self.labels.num.as_str(), &FONT_9X18_BOLD)?;
        Ok(())
    }

    /// Bounds of the weekday and day-of-month fields.
    ///
    /// On the 144x168 display these are `(46,114) 27x20` and `(73,114) 18x20`.
    pub fn date_fields(&self) -> (Rectangle, Rectangle) {
        let x = self.canvas.width as i32 / 2;
        let y = self.canvas.height as i32 - 54;
        (
            Rectangle::new(Point::new(x - 26, y), DAY_FIELD),
            Rectangle::new(Point::new(x + 1, y), NUM_FIELD),
        )
    }
}

/// White text on a black field, clipped to the field.
fn draw_field<D>(
    target: &mut D,
    field: Rectangle,
    text: &str,
    font: &'static MonoFont<'static>,
) -> Result<(), RenderError<D::Error>>
where
    D: DrawTarget<Color = BinaryColor>,
    D::Error: fmt::Debug,
{
    let style: MonoTextStyle<'_, BinaryColor> = MonoTextStyleBuilder::new()
        .font(font)
        .text_color(BinaryColor::On)
        .background_color(BinaryColor::Off)
        .build();

    let mut clipped = target.clipped(&field);
    field
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(&mut clipped)
        .map_err(RenderError::Display)?;
    Text::with_baseline(text, field.top_left, style, Baseline::Top)
        .draw(&mut clipped)
        .map_err(RenderError::Display)?;
    Ok(())
}
