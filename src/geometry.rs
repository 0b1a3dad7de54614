//! # Face Geometry
//!
//! Pure layout math for the 24-hour dial. Nothing in here draws; every
//! function maps fixed canvas constants (and, for the hand, the current time)
//! to `embedded_graphics` points that the [`face`](crate::face) passes render.
//!
//! ## Dial Layout
//!
//! The ring is divided into 48 half-hour positions, numbered clockwise from
//! the top of the display:
//! - **Position 0**: midnight (top), drawn as an outlined triangle
//! - **Position 24**: noon (bottom), drawn as a filled triangle
//! - **Odd positions**: single-pixel dots (the half hours)
//! - **Even positions**: lines whose length grows with the hour's weight
//!
//! The ring radius is `width / 2 + 4`, so the ticks run past the visible edge
//! and bleed into the border. Horizontal overshoot is clamped onto the first
//! and last columns; vertical positions always land on-screen for the
//! supported display sizes.

use embedded_graphics::{
    prelude::*,
    primitives::{Rectangle, Triangle},
};
use std::f32::consts::TAU;

/// Number of tick positions around the dial (one per half hour).
pub const TICK_POSITIONS: u32 = 48;

/// Tick position replaced by the noon marker.
pub const NOON_POSITION: u32 = 24;

/// Vertical offset from the bounds center to the hand pivot.
pub const PIVOT_OFFSET_Y: i32 = 8;

/// How far the ring radius reaches past half the display width.
const RADIUS_OVERSHOOT: i32 = 4;

/// Base line length of an even tick.
const TICK_BASE_LENGTH: i32 = 6;
/// Extra length for the even-hour ticks (multiples of 4).
const TICK_HOUR_BONUS: i32 = 4;
/// Extra length for the six-hour ticks.
const TICK_QUARTER_BONUS: i32 = 8;

/// Visual weight of a ring tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickMark {
    /// Single pixel at the ring edge
    Dot,
    /// Plain even position
    Short,
    /// Multiple of 4 that is not a six-hour mark
    Medium,
    /// Six-hour mark (multiple of 12)
    Long,
}

impl TickMark {
    /// Line length in pixels, `None` for dots.
    pub fn length(self) -> Option<i32> {
        match self {
            TickMark::Dot => None,
            TickMark::Short => Some(TICK_BASE_LENGTH),
            TickMark::Medium => Some(TICK_BASE_LENGTH + TICK_HOUR_BONUS),
            TickMark::Long => Some(TICK_BASE_LENGTH + TICK_HOUR_BONUS + TICK_QUARTER_BONUS),
        }
    }
}

/// Classify a tick position by its divisibility.
pub fn tick_mark(index: u32) -> TickMark {
    if index % 2 == 1 {
        TickMark::Dot
    } else if index % 12 == 0 {
        TickMark::Long
    } else if index % 4 == 0 {
        TickMark::Medium
    } else {
        TickMark::Short
    }
}

/// Angle of a tick position as a fraction of a full turn.
pub fn tick_angle(index: u32) -> f32 {
    index as f32 / TICK_POSITIONS as f32
}

/// Hour hand angle as a fraction of a full turn on the 24-hour dial.
///
/// ```
/// use analog24_lib::geometry::hand_angle;
///
/// assert_eq!(hand_angle(0, 0), 0.0);
/// assert_eq!(hand_angle(12, 0), 0.5);
/// ```
pub fn hand_angle(hour: u32, minute: u32) -> f32 {
    (hour as f32 + minute as f32 / 60.0) / 24.0
}

/// Fast-moving hand angle used by the per-second debug cadence.
pub fn debug_hand_angle(second: u32) -> f32 {
    second as f32 / 60.0
}

/// Offset of length `radius` pointing at `turns` clockwise from 12 o'clock.
fn polar(turns: f32, radius: i32) -> Point {
    let radians = turns * TAU;
    Point::new(
        (radians.sin() * radius as f32).round() as i32,
        (-radians.cos() * radius as f32).round() as i32,
    )
}

/// One drawable ring tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub index: u32,
    pub mark: TickMark,
    /// Point on the ring, x clamped into the canvas
    pub outer: Point,
    /// Start of the line for even ticks
    pub inner: Option<Point>,
}

/// Fixed display bounds of the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas {
            width: 144,
            height: 168,
        }
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(self.width, self.height))
    }

    /// Plain center of the bounds.
    pub fn center(&self) -> Point {
        Point::new(self.width as i32 / 2, self.height as i32 / 2)
    }

    /// Center of the tick ring, one pixel left of the bounds center.
    pub fn ring_center(&self) -> Point {
        self.center() - Point::new(1, 0)
    }

    /// Point the hand rotates about.
    pub fn pivot(&self) -> Point {
        self.center() + Point::new(0, PIVOT_OFFSET_Y)
    }

    pub fn face_radius(&self) -> i32 {
        self.width as i32 / 2 + RADIUS_OVERSHOOT
    }

    /// Geometry of ring position `index`, or `None` if nothing is drawn there.
    ///
    /// A zero-width canvas has no columns to clamp onto and draws no ticks.
    pub fn tick(&self, index: u32) -> Option<Tick> {
        if index == 0 || index >= TICK_POSITIONS || index == NOON_POSITION {
            return None;
        }
        if self.width == 0 {
            return None;
        }

        let center = self.ring_center();
        let radius = self.face_radius();
        let turns = tick_angle(index);
        let mark = tick_mark(index);

        let mut outer = center + polar(turns, radius);
        outer.x = outer.x.clamp(0, self.width as i32 - 1);

        let inner = mark
            .length()
            .map(|length| center + polar(turns, radius - length));

        Some(Tick {
            index,
            mark,
            outer,
            inner,
        })
    }

    /// Whether the ring stays inside the top and bottom edges.
    pub fn ring_fits_vertically(&self) -> bool {
        let center_y = self.center().y;
        let radius = self.face_radius();
        center_y - radius >= 0 && center_y + radius <= self.height as i32 - 1
    }

    /// All 46 drawable ticks in clockwise order.
    pub fn ring_ticks(&self) -> impl Iterator<Item = Tick> + '_ {
        (1..TICK_POSITIONS).filter_map(move |index| self.tick(index))
    }

    fn marker_x(&self) -> i32 {
        self.width as i32 / 2 - 1
    }

    /// Outlined marker at the top of the dial.
    pub fn midnight_marker(&self) -> Triangle {
        let cx = self.marker_x();
        Triangle::new(
            Point::new(cx - 5, 4),
            Point::new(cx + 5, 4),
            Point::new(cx, 20),
        )
    }

    /// Filled marker at the bottom of the dial.
    pub fn noon_marker(&self) -> Triangle {
        let cx = self.marker_x();
        let border = self.height as i32 - 1;
        Triangle::new(
            Point::new(cx - 5, border - 4),
            Point::new(cx + 5, border - 4),
            Point::new(cx, border - 20),
        )
    }

    /// 3x3 dot around the plain bounds center.
    ///
    /// Not the pivot: the dot sits `PIVOT_OFFSET_Y` pixels above the point
    /// the hand turns around.
    pub fn center_dot(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.width as i32 / 2 - 1, self.height as i32 / 2 - 1),
            Size::new(3, 3),
        )
    }
}

/// Kite-shaped hour hand, vertices relative to the pivot with the tip up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandShape {
    points: [Point; 4],
}

impl Default for HandShape {
    fn default() -> Self {
        HandShape {
            points: [
                Point::new(-8, 0),
                Point::new(0, 16),
                Point::new(8, 0),
                Point::new(0, -64),
            ],
        }
    }
}

impl HandShape {
    /// Vertices rotated clockwise by `turns` and moved onto `pivot`.
    pub fn rotated(&self, turns: f32, pivot: Point) -> [Point; 4] {
        let radians = turns * TAU;
        let (sin, cos) = radians.sin_cos();
        self.points.map(|p| {
            let x = p.x as f32 * cos - p.y as f32 * sin;
            let y = p.x as f32 * sin + p.y as f32 * cos;
            pivot + Point::new(x.round() as i32, y.round() as i32)
        })
    }
}
