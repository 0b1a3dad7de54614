//! # Tick Service
//!
//! Host-side periodic timer. It sleeps until the next whole minute (or whole
//! second in debug cadence), reads the local wall clock and hands the time to
//! the subscriber. Ticks are aligned to wall-clock boundaries rather than
//! spaced by a fixed interval, so the hand moves as the minute changes and not
//! some arbitrary offset later.
//!
//! Unsubscribing is done by resolving the `shutdown` future passed to
//! [`TickService::run`].

use crate::host::TickUnit;
use chrono::{Local, NaiveDateTime, Timelike};
use std::future::Future;
use std::time::Duration;

/// Extra wait past the boundary so the clock has rolled over when we read it.
const TICK_SLACK: Duration = Duration::from_millis(5);

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Time from `now` until the next boundary of `unit`.
///
/// Landing exactly on a boundary waits a full unit.
pub fn next_tick_delay(now: &NaiveDateTime, unit: TickUnit) -> Duration {
    // Leap seconds report nanos >= 1e9; treat them as the end of the second
    let nanos = (now.nanosecond() as u64).min(NANOS_PER_SECOND - 1);
    let elapsed = match unit {
        TickUnit::Minute => now.second() as u64 * NANOS_PER_SECOND + nanos,
        TickUnit::Second => nanos,
    };
    let period = match unit {
        TickUnit::Minute => 60 * NANOS_PER_SECOND,
        TickUnit::Second => NANOS_PER_SECOND,
    };
    Duration::from_nanos(period - elapsed)
}

/// Periodic wall-clock timer.
#[derive(Clone, Copy, Debug)]
pub struct TickService {
    unit: TickUnit,
}

impl TickService {
    pub fn new(unit: TickUnit) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> TickUnit {
        self.unit
    }

    /// Call `on_tick` at every boundary until `shutdown` resolves.
    ///
    /// Returns the number of ticks delivered, or the first handler error.
    pub async fn run<F, E, S>(&self, mut on_tick: F, shutdown: S) -> Result<u64, E>
    where
        F: FnMut(NaiveDateTime) -> Result<(), E>,
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        log::info!("Tick service subscribed ({:?} cadence)", self.unit);

        let mut delivered = 0;
        loop {
            let delay = next_tick_delay(&Local::now().naive_local(), self.unit) + TICK_SLACK;
            tokio::select! {
                _ = &mut shutdown => {
                    log::info!("Tick service unsubscribed after {} ticks", delivered);
                    return Ok(delivered);
                }
                _ = tokio::time::sleep(delay) => {
                    let now = Local::now().naive_local();
                    log::debug!("Tick at {}", now.format("%H:%M:%S"));
                    on_tick(now)?;
                    delivered += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(minute: u32, second: u32, milli: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_milli_opt(10, minute, second, milli)
            .unwrap()
    }

    #[test]
    fn test_minute_delay() {
        assert_eq!(
            next_tick_delay(&at(0, 15, 0), TickUnit::Minute),
            Duration::from_secs(45)
        );
        assert_eq!(
            next_tick_delay(&at(0, 59, 500), TickUnit::Minute),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_boundary_waits_full_unit() {
        assert_eq!(
            next_tick_delay(&at(30, 0, 0), TickUnit::Minute),
            Duration::from_secs(60)
        );
        assert_eq!(
            next_tick_delay(&at(30, 0, 0), TickUnit::Second),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_second_delay() {
        assert_eq!(
            next_tick_delay(&at(0, 42, 250), TickUnit::Second),
            Duration::from_millis(750)
        );
    }

    #[test]
    fn test_leap_second_delay_is_positive() {
        let leap = at(59, 59, 1_500);
        assert!(next_tick_delay(&leap, TickUnit::Minute) > Duration::ZERO);
        assert!(next_tick_delay(&leap, TickUnit::Second) > Duration::ZERO);
    }

    #[tokio::test]
    async fn test_shutdown_before_first_tick() {
        let service = TickService::new(TickUnit::Minute);
        let delivered = service
            .run(|_| Ok::<(), ()>(()), async {})
            .await
            .unwrap();
        assert_eq!(delivered, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handler_error_stops_service() {
        let service = TickService::new(TickUnit::Second);
        let mut seen = 0;
        let result = service
            .run(
                |_| {
                    seen += 1;
                    if seen == 3 {
                        Err("stop")
                    } else {
                        Ok(())
                    }
                },
                std::future::pending(),
            )
            .await;
        assert_eq!(result, Err("stop"));
        assert_eq!(seen, 3);
    }
}
