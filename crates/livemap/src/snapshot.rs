//! Positions of the whole fleet at one poll instant.

use std::collections::HashMap;

use geo::Point;
use stringline_telemetry::{TripIdentifier, VehiclePosition};

/// Where every reporting vehicle was at one instant, keyed by trip.
///
/// Later duplicates of a trip id win, matching the feed's
/// last-report-is-current convention.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionSnapshot {
    positions: HashMap<TripIdentifier, Point<f64>>,
}

impl PositionSnapshot {
    pub fn from_fleet(fleet: &[VehiclePosition]) -> Self {
        let mut positions = HashMap::with_capacity(fleet.len());
        for vehicle in fleet {
            positions.insert(vehicle.trip_id.clone(), vehicle.position);
        }
        Self { positions }
    }

    pub fn get(&self, trip_id: &TripIdentifier) -> Option<Point<f64>> {
        self.positions.get(trip_id).copied()
    }

    pub fn contains(&self, trip_id: &TripIdentifier) -> bool {
        self.positions.contains_key(trip_id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stringline_telemetry::DirectionId;

    fn vehicle(trip: &str, lon: f64, lat: f64) -> VehiclePosition {
        VehiclePosition {
            trip_id: trip.into(),
            direction: DirectionId::Outbound,
            color: "EE352E".into(),
            position: Point::new(lon, lat),
        }
    }

    #[test]
    fn test_snapshot_keys_by_trip() {
        let snapshot = PositionSnapshot::from_fleet(&[
            vehicle("t1", -74.0, 40.7),
            vehicle("t2", -73.9, 40.8),
        ]);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(&"t1".into()), Some(Point::new(-74.0, 40.7)));
        assert!(!snapshot.contains(&"t3".into()));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let snapshot = PositionSnapshot::from_fleet(&[
            vehicle("t1", -74.0, 40.7),
            vehicle("t1", -73.5, 40.9),
        ]);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get(&"t1".into()), Some(Point::new(-73.5, 40.9)));
    }
}
