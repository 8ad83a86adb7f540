//! Per-trip polyline assembly.

use std::collections::HashMap;

use stringline_telemetry::{DirectionFilter, DirectionId, RouteIdentifier, StopEvent, TripIdentifier};

use crate::geometry::ScreenPt;
use crate::scale::CoordinateMapper;

/// One trip's polyline in screen space, vertices in time order.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPath {
    pub trip_id: TripIdentifier,
    pub route: RouteIdentifier,
    pub direction: DirectionId,
    pub points: Vec<ScreenPt>,
}

struct TripGroup<'a> {
    trip_id: TripIdentifier,
    route: RouteIdentifier,
    direction: DirectionId,
    events: Vec<&'a StopEvent>,
}

/// Group a batch into per-trip polylines.
///
/// Trips appear in order of their first event in the batch. Within a trip,
/// events are sorted by timestamp with the batch order breaking ties, then
/// mapped through `mapper`. A trip with a single event yields a one-point
/// path.
pub fn trip_paths(
    events: &[StopEvent],
    filter: DirectionFilter,
    mapper: &CoordinateMapper,
) -> Vec<TripPath> {
    let mut index: HashMap<TripIdentifier, usize> = HashMap::new();
    let mut groups: Vec<TripGroup<'_>> = Vec::new();

    for event in events.iter().filter(|e| filter.matches(e.direction)) {
        let slot = *index.entry(event.trip_id.clone()).or_insert_with(|| {
            groups.push(TripGroup {
                trip_id: event.trip_id.clone(),
                route: event.route.clone(),
                direction: event.direction,
                events: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].events.push(event);
    }

    groups
        .into_iter()
        .map(|mut group| {
            group.events.sort_by_key(|e| e.timestamp);
            TripPath {
                trip_id: group.trip_id,
                route: group.route,
                direction: group.direction,
                points: group
                    .events
                    .iter()
                    .map(|e| mapper.map(e.progress, e.timestamp))
                    .collect(),
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
