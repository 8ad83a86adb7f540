//! Data bounds and the linear data-to-screen mapping.

use chrono::{DateTime, Utc};
use itertools::Itertools;
use stringline_telemetry::StopEvent;

use crate::geometry::{Margins, ScreenPt};

/// Observed extent of a batch along both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_time: DateTime<Utc>,
    pub max_time: DateTime<Utc>,
    pub min_progress: f64,
    pub max_progress: f64,
}

impl Bounds {
    /// Extent of `events`, or `None` for an empty batch.
    pub fn of(events: &[StopEvent]) -> Option<Self> {
        let (min_time, max_time) = events.iter().map(|e| e.timestamp).minmax().into_option()?;
        let (min_progress, max_progress) = events
            .iter()
            .map(|e| e.progress)
            .minmax_by(|a, b| a.total_cmp(b))
            .into_option()?;
        Some(Self {
            min_time,
            max_time,
            min_progress,
            max_progress,
        })
    }

    pub fn time_span_secs(&self) -> f64 {
        (self.max_time - self.min_time).num_milliseconds() as f64 / 1000.0
    }

    pub fn progress_span(&self) -> f64 {
        self.max_progress - self.min_progress
    }
}

/// Maps `(progress, time)` pairs into pixels for one diagram layout.
///
/// Both axes are independent linear scales from the data bounds onto the
/// plot area inside the margins. A batch with zero span on an axis maps
/// every value on that axis to the near edge instead of dividing by zero.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    bounds: Bounds,
    margins: Margins,
    width: f64,
    height: f64,
}

impl CoordinateMapper {
    pub fn new(bounds: Bounds, margins: Margins, width: f64, height: f64) -> Self {
        Self {
            bounds,
            margins,
            width,
            height,
        }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn progress_to_x(&self, progress: f64) -> f64 {
        let span = self.bounds.progress_span();
        if span <= 0.0 {
            return self.margins.left;
        }
        let plot_width = self.width - self.margins.left - self.margins.right;
        self.margins.left + (progress - self.bounds.min_progress) / span * plot_width
    }

    pub fn time_to_y(&self, time: DateTime<Utc>) -> f64 {
        let span = self.bounds.time_span_secs();
        if span <= 0.0 {
            return self.margins.top;
        }
        let elapsed = (time - self.bounds.min_time).num_milliseconds() as f64 / 1000.0;
        let plot_height = self.height - self.margins.top - self.margins.bottom;
        self.margins.top + elapsed / span * plot_height
    }

    pub fn map(&self, progress: f64, time: DateTime<Utc>) -> ScreenPt {
        ScreenPt::new(self.progress_to_x(progress), self.time_to_y(time))
    }
}

// ============================================================================
// Tests
// ============================================================================
