//! Two-snapshot position blending.
//!
//! The feed reports positions in coarse poll steps; the map advances a
//! blend factor every display frame and draws each vehicle part-way
//! between its last two reported positions, which reads as continuous
//! motion.

use geo::Point;
use stringline_telemetry::TripIdentifier;

use crate::snapshot::PositionSnapshot;

/// Factor value right after a poll lands. Slightly above zero so the first
/// frame after a poll already leans toward the new snapshot.
pub const FACTOR_RESET: f64 = 0.005;

/// Factor increment per display frame.
pub const FACTOR_STEP: f64 = 0.01;

/// The two snapshots currently being blended, and how far along the blend
/// is. `factor` runs from [`FACTOR_RESET`] to 1.0; at 1.0 the display sits
/// exactly on the newer snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationState {
    old: Option<PositionSnapshot>,
    new: PositionSnapshot,
    factor: f64,
}

impl InterpolationState {
    /// State for the very first poll. With nothing to blend from, the
    /// factor starts saturated and vehicles display where they reported.
    pub fn first(snapshot: PositionSnapshot) -> Self {
        Self {
            old: None,
            new: snapshot,
            factor: 1.0,
        }
    }

    /// Fold in the next poll: the current newer snapshot becomes the older
    /// one and the blend restarts.
    pub fn buffered(self, snapshot: PositionSnapshot) -> Self {
        Self {
            old: Some(self.new),
            new: snapshot,
            factor: FACTOR_RESET,
        }
    }

    /// One display frame forward. Saturates at 1.0.
    pub fn advanced(self) -> Self {
        Self {
            factor: (self.factor + FACTOR_STEP).min(1.0),
            ..self
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Display position for one trip.
    ///
    /// A trip absent from the newer snapshot has gone quiet and yields
    /// `None` no matter what the older one says. One that is new this
    /// poll displays directly at its reported position.
    pub fn position_of(&self, trip_id: &TripIdentifier) -> Option<Point<f64>> {
        let target = self.new.get(trip_id)?;
        let origin = self.old.as_ref().and_then(|old| old.get(trip_id));
        match origin {
            Some(origin) => Some(Point::new(
                target.x() * self.factor + origin.x() * (1.0 - self.factor),
                target.y() * self.factor + origin.y() * (1.0 - self.factor),
            )),
            None => Some(target),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
