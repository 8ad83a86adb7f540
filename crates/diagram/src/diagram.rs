//! The stringline diagram itself: batch state, pointer state, and scene
//! composition.

use std::time::Duration;

use stringline_telemetry::{DirectionFilter, RouteIdentifier, StopEvent};

use crate::geometry::{Margins, ScreenPt};
use crate::legend::{distance_ticks, time_ticks};
use crate::paths::trip_paths;
use crate::scale::{Bounds, CoordinateMapper};
use crate::scene::{PrimitiveKind, Rotation, Scene};
use crate::tooltip::{indicator_at, ScaleReference};

/// Layout and behavior knobs for one diagram instance.
#[derive(Debug, Clone)]
pub struct DiagramConfig {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub direction: DirectionFilter,
    pub refresh_interval: Duration,
    pub reference: ScaleReference,
}

impl DiagramConfig {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margins: Margins::default(),
            direction: DirectionFilter::Both,
            refresh_interval: Duration::from_secs(30),
            reference: ScaleReference::default(),
        }
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self::new(500.0, 400.0)
    }
}

/// What applying a fetched batch did to the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The batch replaced the previous one.
    Updated,
    /// The batch was empty; previous state stands.
    Skipped,
}

/// A time-distance diagram of every trip on one route.
///
/// Stop events plot as polylines over (progress, time); the slope of each
/// segment is the vehicle's pace. State changes only through
/// [`apply_batch`](Self::apply_batch) and the pointer methods, and
/// [`scene`](Self::scene) composes the current picture on demand.
#[derive(Debug, Clone)]
pub struct MareyDiagram {
    route: RouteIdentifier,
    config: DiagramConfig,
    events: Vec<StopEvent>,
    bounds: Option<Bounds>,
    pointer: Option<ScreenPt>,
}

impl MareyDiagram {
    pub fn new(route: impl Into<RouteIdentifier>, config: DiagramConfig) -> Self {
        Self {
            route: route.into(),
            config,
            events: Vec::new(),
            bounds: None,
            pointer: None,
        }
    }

    pub fn route(&self) -> &RouteIdentifier {
        &self.route
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Bounds of the batch on display, if one has been applied.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Replace the displayed batch wholesale. An empty batch is ignored so
    /// a hiccup in the feed never blanks the diagram.
    pub fn apply_batch(&mut self, events: Vec<StopEvent>) -> RefreshOutcome {
        match Bounds::of(&events) {
            Some(bounds) => {
                self.bounds = Some(bounds);
                self.events = events;
                RefreshOutcome::Updated
            }
            None => RefreshOutcome::Skipped,
        }
    }

    /// Track the pointer. Positions outside the surface are ignored.
    pub fn pointer_moved(&mut self, pointer: ScreenPt) {
        let inside = (0.0..=self.config.width).contains(&pointer.x)
            && (0.0..=self.config.height).contains(&pointer.y);
        if inside {
            self.pointer = Some(pointer);
        }
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    /// Compose the current picture: distance legend, then time legend, then
    /// trip paths, then the scale indicator. Empty until the first batch.
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::default();
        let Some(bounds) = self.bounds else {
            return scene;
        };
        let mapper = CoordinateMapper::new(
            bounds,
            self.config.margins,
            self.config.width,
            self.config.height,
        );

        for tick in distance_ticks(&self.events) {
            let x = mapper.progress_to_x(tick.progress);
            scene.push_line(
                ScreenPt::new(x, mapper.time_to_y(bounds.min_time)),
                ScreenPt::new(x, mapper.time_to_y(bounds.max_time)),
                PrimitiveKind::DistanceTick,
            );
            let anchor = ScreenPt::new(
                x - 5.0,
                self.config.height - self.config.margins.bottom + 10.0,
            );
            scene.push_text(
                tick.label.as_ref(),
                anchor,
                Some(Rotation {
                    degrees: 45.0,
                    about: anchor,
                }),
                PrimitiveKind::DistanceLabel,
            );
        }

        for tick in time_ticks(&bounds) {
            let y = mapper.time_to_y(tick.time);
            scene.push_text(
                tick.label,
                ScreenPt::new(5.0, y + 6.0),
                None,
                PrimitiveKind::TimeLabel,
            );
            scene.push_line(
                mapper.map(bounds.min_progress, tick.time),
                mapper.map(bounds.max_progress, tick.time),
                PrimitiveKind::TimeTick,
            );
        }

        for path in trip_paths(&self.events, self.config.direction, &mapper) {
            scene.push_polyline(
                path.points,
                PrimitiveKind::TripPath {
                    route: path.route,
                    direction: path.direction,
                },
            );
        }

        if let Some(pointer) = self.pointer {
            let indicator = indicator_at(
                pointer,
                &bounds,
                self.config.width,
                self.config.height,
                &self.config.reference,
            );
            scene
                .primitives
                .extend(indicator.primitives(&self.config.reference));
        }

        scene
    }
}

// ============================================================================
// Tests
// ============================================================================
