//! # End-to-End Watchface Tests
//!
//! These tests drive the watchface the way the host does: load the window,
//! deliver ticks, run the redraw cycle into a framebuffer and inspect the
//! pixels. They are independent of the wall clock; every time is fixed.

use analog24_lib::{
    config::Config,
    framebuffer::FrameBuffer,
    geometry::{hand_angle, HandShape},
    Canvas, Haptics, Layer, TickUnit, Watchface,
};
use chrono::{NaiveDate, NaiveDateTime};
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use std::io::Write;
use tempfile::NamedTempFile;

#[derive(Default)]
struct CountingHaptics {
    pulses: usize,
}

impl Haptics for CountingHaptics {
    fn short_pulse(&mut self) {
        self.pulses += 1;
    }
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 5)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn loaded() -> Watchface {
    let mut watchface = Watchface::new(Canvas::default(), TickUnit::Minute);
    watchface.load().unwrap();
    watchface
}

/// Scenario: 14:30 on Wednesday the 5th.
///
/// The hand sits at (14 + 0.5) / 24 of a turn and the date reads "Wed 05".
#[test]
fn afternoon_frame_matches_expected_layout() {
    let mut watchface = loaded();
    let mut display = FrameBuffer::new(144, 168);
    let time = at(14, 30);

    let face = watchface.face_mut().unwrap();
    face.redraw(&mut display, &time).unwrap();

    let turns = face.hand_turns(&time);
    assert!(
        (turns - 0.604_167).abs() < 1e-5,
        "hand at {} turns, expected 0.604167",
        turns
    );
    assert_eq!(face.labels().day.as_str(), "Wed");
    assert_eq!(face.labels().num.as_str(), "05");

    // Halfway along the hand, inside the outline
    let canvas = Canvas::default();
    let tip = HandShape::default().rotated(hand_angle(14, 30), canvas.pivot())[3];
    let midway = canvas.pivot() + (tip - canvas.pivot()) / 2;
    assert_eq!(display.pixel(midway), Some(BinaryColor::On));
}

/// Every minute of a day delivers exactly one pulse per hour.
#[test]
fn hourly_pulse_over_a_full_day() {
    let mut watchface = loaded();
    let mut haptics = CountingHaptics::default();

    for hour in 0..24 {
        for minute in 0..60 {
            let outcome = watchface
                .handle_tick(&at(hour, minute), &mut haptics)
                .unwrap();
            assert_eq!(
                outcome.pulsed,
                minute == 0,
                "unexpected pulse state at {:02}:{:02}",
                hour,
                minute
            );
        }
    }

    assert_eq!(haptics.pulses, 24);
}

/// A tick after a redraw makes every layer dirty again.
#[test]
fn tick_schedules_full_redraw() {
    let mut watchface = loaded();
    let mut display = FrameBuffer::new(144, 168);
    let mut haptics = CountingHaptics::default();

    watchface
        .face_mut()
        .unwrap()
        .redraw(&mut display, &at(8, 15))
        .unwrap();
    for layer in Layer::ALL {
        assert!(!watchface.face().unwrap().is_dirty(layer));
    }

    watchface.handle_tick(&at(8, 16), &mut haptics).unwrap();
    for layer in Layer::ALL {
        assert!(watchface.face().unwrap().is_dirty(layer));
    }
}

/// The hand moves between frames; the background does not.
#[test]
fn consecutive_frames_differ_only_where_the_hand_moved() {
    let mut watchface = loaded();
    let mut morning = FrameBuffer::new(144, 168);
    let mut evening = FrameBuffer::new(144, 168);

    let face = watchface.face_mut().unwrap();
    face.redraw(&mut morning, &at(6, 0)).unwrap();
    face.mark_all_dirty();
    face.redraw(&mut evening, &at(18, 0)).unwrap();

    assert_ne!(morning, evening);

    // Ring ticks are identical in both frames
    for tick in Canvas::default().ring_ticks() {
        assert_eq!(morning.pixel(tick.outer), evening.pixel(tick.outer));
    }

    // 06:00 points right, 18:00 points left
    let pivot = Canvas::default().pivot();
    let right = pivot + Point::new(40, 0);
    let left = pivot - Point::new(40, 0);
    assert_eq!(morning.pixel(right), Some(BinaryColor::On));
    assert_eq!(morning.pixel(left), Some(BinaryColor::Off));
    assert_eq!(evening.pixel(left), Some(BinaryColor::On));
    assert_eq!(evening.pixel(right), Some(BinaryColor::Off));
}

/// The debug cadence moves the hand with the seconds.
#[test]
fn debug_cadence_uses_seconds() {
    let mut watchface = Watchface::new(Canvas::default(), TickUnit::Second);
    watchface.load().unwrap();

    let time = NaiveDate::from_ymd_opt(2025, 11, 5)
        .unwrap()
        .and_hms_opt(3, 17, 45)
        .unwrap();
    assert_eq!(watchface.face().unwrap().hand_turns(&time), 0.75);
}

/// Settings file drives canvas size and cadence; the hourly pulse stays on.
#[test]
fn watchface_from_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[display]
width = 200
height = 228

[timer]
unit = "second"
"#
    )
    .unwrap();

    let config = Config::load_from_path(file.path());
    config.validate().unwrap();

    let canvas = config.canvas();
    let mut watchface = Watchface::new(canvas, config.timer.unit);
    watchface.load().unwrap();

    let mut display = FrameBuffer::new(canvas.width, canvas.height);
    watchface
        .face_mut()
        .unwrap()
        .redraw(&mut display, &at(0, 0))
        .unwrap();

    for tick in canvas.ring_ticks() {
        assert!((0..200).contains(&tick.outer.x));
        assert_eq!(display.pixel(tick.outer), Some(BinaryColor::On));
    }

    let mut haptics = CountingHaptics::default();
    watchface.handle_tick(&at(1, 0), &mut haptics).unwrap();
    assert_eq!(haptics.pulses, 1);
}
