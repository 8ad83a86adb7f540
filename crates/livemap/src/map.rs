//! Live-map state: fleet buffering, symbol styling, and GeoJSON output.

use geo::Point;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoValue};
use serde_json::{json, Map as JsonMap};
use stringline_telemetry::{DirectionId, VehiclePosition};

use crate::interpolate::InterpolationState;
use crate::snapshot::PositionSnapshot;

/// Stroke for one class of vehicle symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: String,
}

impl Stroke {
    pub fn new(width: f64, color: impl Into<String>) -> Self {
        Self {
            width,
            color: color.into(),
        }
    }
}

/// Per-direction symbol strokes, with a fallback for vehicles whose
/// direction is unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolStyle {
    pub outbound: Stroke,
    pub inbound: Stroke,
    pub fallback: Stroke,
}

impl Default for SymbolStyle {
    fn default() -> Self {
        Self {
            outbound: Stroke::new(2.0, "black"),
            inbound: Stroke::new(1.5, "white"),
            fallback: Stroke::new(2.0, "gray"),
        }
    }
}

impl SymbolStyle {
    pub fn stroke_for(&self, direction: Option<DirectionId>) -> &Stroke {
        match direction {
            Some(DirectionId::Outbound) => &self.outbound,
            Some(DirectionId::Inbound) => &self.inbound,
            None => &self.fallback,
        }
    }
}

/// Receives the repainted vehicle layer after every display frame.
pub trait MapSurface: Send {
    /// Called once at startup with the configured viewport center.
    fn set_viewport(&mut self, center: Point<f64>) {
        let _ = center;
    }

    fn set_features(&mut self, features: FeatureCollection);
}

/// The live vehicle map.
///
/// Holds the latest polled fleet plus the interpolation state across the
/// last two polls. [`apply_poll`](Self::apply_poll) buffers a fresh fleet,
/// [`advance_frame`](Self::advance_frame) moves the blend forward, and
/// [`features`](Self::features) emits the blended picture as GeoJSON.
#[derive(Debug, Clone)]
pub struct TrainMap {
    style: SymbolStyle,
    fleet: Vec<VehiclePosition>,
    state: Option<InterpolationState>,
}

impl TrainMap {
    pub fn new(style: SymbolStyle) -> Self {
        Self {
            style,
            fleet: Vec::new(),
            state: None,
        }
    }

    /// Whether at least one poll has landed.
    pub fn has_data(&self) -> bool {
        self.state.is_some()
    }

    /// Blend factor of the current interpolation, if any.
    pub fn factor(&self) -> Option<f64> {
        self.state.as_ref().map(InterpolationState::factor)
    }

    /// Fold in a freshly polled fleet and restart the blend.
    pub fn apply_poll(&mut self, fleet: Vec<VehiclePosition>) {
        let snapshot = PositionSnapshot::from_fleet(&fleet);
        self.state = Some(match self.state.take() {
            None => InterpolationState::first(snapshot),
            Some(state) => state.buffered(snapshot),
        });
        self.fleet = fleet;
    }

    /// One display frame forward.
    pub fn advance_frame(&mut self) {
        if let Some(state) = self.state.take() {
            self.state = Some(state.advanced());
        }
    }

    /// The current picture: one point feature per displayed vehicle, at its
    /// blended position, carrying a display-ready fill color (the feed's
    /// hex value with `#` prepended) plus this map's stroke styling.
    pub fn features(&self) -> FeatureCollection {
        let mut features = Vec::with_capacity(self.fleet.len());
        if let Some(state) = &self.state {
            for vehicle in &self.fleet {
                if let Some(position) = state.position_of(&vehicle.trip_id) {
                    features.push(self.feature(vehicle, position));
                }
            }
        }
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    fn feature(&self, vehicle: &VehiclePosition, position: Point<f64>) -> Feature {
        let stroke = self.style.stroke_for(Some(vehicle.direction));

        let mut properties = JsonMap::new();
        properties.insert("trip".to_string(), json!(vehicle.trip_id.as_str()));
        properties.insert(
            "direction".to_string(),
            json!(vehicle.direction.as_wire()),
        );
        properties.insert(
            "color".to_string(),
            json!(format!("#{}", vehicle.color)),
        );
        properties.insert("stroke-width".to_string(), json!(stroke.width));
        properties.insert("stroke-color".to_string(), json!(stroke.color));

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(GeoValue::Point(vec![
                position.x(),
                position.y(),
            ]))),
            id: Some(geojson::feature::Id::String(
                vehicle.trip_id.as_str().to_string(),
            )),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

impl Default for TrainMap {
    fn default() -> Self {
        Self::new(SymbolStyle::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
