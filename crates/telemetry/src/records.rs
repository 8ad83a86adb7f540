//! Core record types shared by the diagram and live-map engines, plus the
//! crate-wide error type.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use geo::Point;
use thiserror::Error;

use crate::identifiers::{RouteIdentifier, TripIdentifier};

// ============================================================================
// Directions
// ============================================================================

/// Travel direction of a trip. Wire encoding follows GTFS `direction_id`:
/// 0 = outbound, 1 = inbound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionId {
    Outbound = 0,
    Inbound = 1,
}

impl DirectionId {
    /// Parse the wire encoding. Anything but 0 or 1 is rejected.
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Outbound),
            1 => Some(Self::Inbound),
            _ => None,
        }
    }

    pub fn as_wire(self) -> u8 {
        self as u8
    }
}

/// Direction restriction applied when assembling trip polylines.
///
/// `Both` admits every trip; there is no magic sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectionFilter {
    #[default]
    Both,
    Only(DirectionId),
}

impl DirectionFilter {
    pub fn matches(self, direction: DirectionId) -> bool {
        match self {
            Self::Both => true,
            Self::Only(wanted) => wanted == direction,
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// One observation of a trip calling at a stop: when it was there and how
/// far along the route it had come.
///
/// `progress` is a monotonic along-route distance in route-relative units,
/// not a geographic coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct StopEvent {
    pub timestamp: DateTime<Utc>,
    pub progress: f64,
    pub stop_name: Arc<str>,
    pub trip_id: TripIdentifier,
    pub direction: DirectionId,
    pub route: RouteIdentifier,
}

impl StopEvent {
    pub fn new(
        timestamp: DateTime<Utc>,
        progress: f64,
        stop_name: impl Into<Arc<str>>,
        trip_id: impl Into<TripIdentifier>,
        direction: DirectionId,
        route: impl Into<RouteIdentifier>,
    ) -> Self {
        Self {
            timestamp,
            progress,
            stop_name: stop_name.into(),
            trip_id: trip_id.into(),
            direction,
            route: route.into(),
        }
    }
}

/// Latest reported position of one vehicle, as a lon/lat point plus the
/// styling hints carried by the live feed. `color` is a hex string without
/// the leading `#`, exactly as the feed sends it.
#[derive(Debug, Clone, PartialEq)]
pub struct VehiclePosition {
    pub trip_id: TripIdentifier,
    pub direction: DirectionId,
    pub color: Arc<str>,
    pub position: Point<f64>,
}

// ============================================================================
// Errors
// ============================================================================

/// Errors surfaced by feed fetching and decoding.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("feed returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("could not decode feed payload: {0}")]
    Decode(String),

    #[error("malformed feed record: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_wire_round_trip() {
        assert_eq!(DirectionId::from_wire(0), Some(DirectionId::Outbound));
        assert_eq!(DirectionId::from_wire(1), Some(DirectionId::Inbound));
        assert_eq!(DirectionId::from_wire(2), None);
        assert_eq!(DirectionId::Inbound.as_wire(), 1);
    }

    #[test]
    fn test_filter_wildcard_admits_everything() {
        assert!(DirectionFilter::Both.matches(DirectionId::Outbound));
        assert!(DirectionFilter::Both.matches(DirectionId::Inbound));
    }

    #[test]
    fn test_filter_only_is_exact() {
        let filter = DirectionFilter::Only(DirectionId::Inbound);
        assert!(filter.matches(DirectionId::Inbound));
        assert!(!filter.matches(DirectionId::Outbound));
    }
}
