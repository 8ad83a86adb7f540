//! Wire-format decoding for the two feeds.
//!
//! The per-route feed is a JSON array of stop events; the live feed is a
//! GeoJSON `FeatureCollection` of vehicle points. Both formats tolerate
//! extra fields. A malformed route payload fails the whole batch, while a
//! malformed live feature is skipped with a warning so one bad vehicle
//! cannot blank the map.

use chrono::{DateTime, Utc};
use geo::Point;
use geojson::{Feature, FeatureCollection, Value as GeoValue};
use serde::Deserialize;
use tracing::warn;

use crate::identifiers::TripIdentifier;
use crate::records::{DirectionId, FeedError, Result, StopEvent, VehiclePosition};

// ============================================================================
// Per-route stop events
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawStopEvent {
    timestamp: DateTime<Utc>,
    progress: f64,
    stop: RawStop,
    trip: RawTrip,
}

#[derive(Debug, Deserialize)]
struct RawStop {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawTrip {
    id: String,
    direction: u8,
    route: String,
}

impl RawStopEvent {
    fn into_event(self) -> Result<StopEvent> {
        let direction = DirectionId::from_wire(self.trip.direction).ok_or_else(|| {
            FeedError::Malformed(format!(
                "trip {} has direction {}, expected 0 or 1",
                self.trip.id, self.trip.direction
            ))
        })?;
        Ok(StopEvent::new(
            self.timestamp,
            self.progress,
            self.stop.name,
            self.trip.id,
            direction,
            self.trip.route,
        ))
    }
}

/// Decode a per-route feed payload into stop events, preserving feed order.
pub fn decode_route_events(payload: &[u8]) -> Result<Vec<StopEvent>> {
    let raw: Vec<RawStopEvent> =
        serde_json::from_slice(payload).map_err(|err| FeedError::Decode(err.to_string()))?;
    raw.into_iter().map(RawStopEvent::into_event).collect()
}

// ============================================================================
// Live vehicle positions
// ============================================================================

/// Decode the live GeoJSON feed into vehicle positions.
///
/// Features without a point geometry or without the `trip`, `direction`,
/// and `color` properties are dropped.
pub fn decode_live_positions(payload: &[u8]) -> Result<Vec<VehiclePosition>> {
    let collection: FeatureCollection =
        serde_json::from_slice(payload).map_err(|err| FeedError::Decode(err.to_string()))?;

    let mut positions = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.iter().enumerate() {
        match feature_position(feature) {
            Some(position) => positions.push(position),
            None => warn!(feature = index, "skipping unusable live feature"),
        }
    }
    Ok(positions)
}

fn feature_position(feature: &Feature) -> Option<VehiclePosition> {
    let geometry = feature.geometry.as_ref()?;
    let GeoValue::Point(coordinates) = &geometry.value else {
        return None;
    };
    let lon = *coordinates.first()?;
    let lat = *coordinates.get(1)?;

    let properties = feature.properties.as_ref()?;
    let trip = properties.get("trip")?.as_str()?;
    let direction = properties
        .get("direction")?
        .as_u64()
        .and_then(|raw| u8::try_from(raw).ok())
        .and_then(DirectionId::from_wire)?;
    let color = properties.get("color")?.as_str()?;

    Some(VehiclePosition {
        trip_id: TripIdentifier::new(trip),
        direction,
        color: color.into(),
        position: Point::new(lon, lat),
    })
}

// ============================================================================
// Tests
// ============================================================================
