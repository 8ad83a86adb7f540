//! Axis tick derivation for the two legends.
//!
//! Distance ticks mark stops along the progress axis, thinned so labels do
//! not pile up where stops are dense. Time ticks mark whole hours across
//! the observed time range.

use std::sync::Arc;

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use stringline_telemetry::StopEvent;

use crate::scale::Bounds;

/// Minimum progress-axis distance between two labeled stops.
pub const DISTANCE_TICK_SPACING: f64 = 1.0;

/// Initial entry of the placed-marks list. Sits below any real progress
/// value, so a stop within one unit of zero is treated as crowding it.
const PLACED_SEED: f64 = -1.0;

/// A labeled stop mark on the progress axis.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTick {
    pub progress: f64,
    pub label: Arc<str>,
}

/// A labeled whole-hour mark on the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeTick {
    pub time: DateTime<Utc>,
    pub label: String,
}

/// Pick which stops get a labeled mark, walking the batch in order.
///
/// A stop is emitted only when its progress is strictly more than
/// [`DISTANCE_TICK_SPACING`] away from every previously emitted mark.
pub fn distance_ticks(events: &[StopEvent]) -> Vec<DistanceTick> {
    let mut placed = vec![PLACED_SEED];
    let mut ticks = Vec::new();

    for event in events {
        let nearest = placed
            .iter()
            .map(|mark| (mark - event.progress).abs())
            .fold(f64::INFINITY, f64::min);
        if nearest > DISTANCE_TICK_SPACING {
            ticks.push(DistanceTick {
                progress: event.progress,
                label: event.stop_name.clone(),
            });
            placed.push(event.progress);
        }
    }
    ticks
}

/// Hourly marks from the first whole hour at or after `min_time` through
/// `max_time`, labeled like `"Tue, 3PM"`.
pub fn time_ticks(bounds: &Bounds) -> Vec<TimeTick> {
    let mut ticks = Vec::new();
    let mut mark = first_whole_hour(bounds.min_time);
    while mark <= bounds.max_time {
        ticks.push(TimeTick {
            time: mark,
            label: mark.format("%a, %-I%p").to_string(),
        });
        mark += TimeDelta::hours(1);
    }
    ticks
}

fn first_whole_hour(time: DateTime<Utc>) -> DateTime<Utc> {
    // truncation only fails on timestamps near the representable extremes
    let floor = time.duration_trunc(TimeDelta::hours(1)).unwrap_or(time);
    if floor < time {
        floor + TimeDelta::hours(1)
    } else {
        floor
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stringline_telemetry::DirectionId;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 3, 20, hour, minute, 0).unwrap()
    }

    fn stop(progress: f64, name: &str) -> StopEvent {
        StopEvent::new(at(15, 0), progress, name, "t1", DirectionId::Outbound, "1")
    }

    #[test]
    fn test_crowded_stops_share_one_label() {
        let events = vec![stop(10.0, "Alpha"), stop(10.5, "Beta"), stop(11.5, "Gamma")];
        let ticks = distance_ticks(&events);

        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_ref()).collect();
        assert_eq!(labels, vec!["Alpha", "Gamma"]);
    }

    #[test]
    fn test_seed_mark_shadows_progress_zero() {
        let events = vec![stop(0.0, "Terminal"), stop(0.5, "Near"), stop(1.8, "Far")];
        let ticks = distance_ticks(&events);

        // 0.0 is exactly one unit from the seed, 0.5 is past it
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_ref()).collect();
        assert_eq!(labels, vec!["Near", "Far"]);
    }

    #[test]
    fn test_emitted_marks_keep_their_spacing() {
        let progresses = [3.2, 3.9, 5.1, 5.2, 9.0, 9.5, 12.0, 2.4];
        let events: Vec<StopEvent> = progresses
            .iter()
            .enumerate()
            .map(|(i, &p)| stop(p, &format!("stop-{i}")))
            .collect();

        let ticks = distance_ticks(&events);
        assert!(!ticks.is_empty());
        for (i, a) in ticks.iter().enumerate() {
            for b in &ticks[i + 1..] {
                assert!((a.progress - b.progress).abs() > DISTANCE_TICK_SPACING);
            }
        }
    }

    #[test]
    fn test_revisited_progress_is_not_relabeled() {
        // an out-and-back trip passes the same stops twice
        let events = vec![stop(2.0, "Out"), stop(4.0, "Turn"), stop(2.0, "Out")];
        assert_eq!(distance_ticks(&events).len(), 2);
    }

    fn bounds(min: DateTime<Utc>, max: DateTime<Utc>) -> Bounds {
        Bounds {
            min_time: min,
            max_time: max,
            min_progress: 0.0,
            max_progress: 1.0,
        }
    }

    #[test]
    fn test_hour_marks_cover_the_span() {
        let ticks = time_ticks(&bounds(at(15, 4), at(17, 10)));

        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].time, at(16, 0));
        assert_eq!(ticks[1].time, at(17, 0));
    }

    #[test]
    fn test_hour_marks_include_exact_endpoints() {
        let ticks = time_ticks(&bounds(at(15, 0), at(17, 0)));

        let times: Vec<DateTime<Utc>> = ticks.iter().map(|t| t.time).collect();
        assert_eq!(times, vec![at(15, 0), at(16, 0), at(17, 0)]);
    }

    #[test]
    fn test_no_hour_mark_fits_a_short_span() {
        assert!(time_ticks(&bounds(at(15, 10), at(15, 50))).is_empty());
    }

    #[test]
    fn test_labels_use_weekday_and_hour() {
        // 2018-03-20 is a Tuesday
        let ticks = time_ticks(&bounds(at(15, 0), at(15, 0)));
        assert_eq!(ticks[0].label, "Tue, 3PM");

        let midnight = Utc.with_ymd_and_hms(2018, 3, 21, 0, 0, 0).unwrap();
        let ticks = time_ticks(&bounds(midnight, midnight));
        assert_eq!(ticks[0].label, "Wed, 12AM");
    }
}
