//! Renderable scene model.
//!
//! A [`Scene`] is an ordered list of primitives in screen space; later
//! entries paint over earlier ones. Surfaces decide stroke, font, and color
//! from each primitive's [`PrimitiveKind`], keeping the diagram free of any
//! rendering backend.

use stringline_telemetry::{DirectionId, RouteIdentifier};

use crate::geometry::ScreenPt;

/// What a primitive depicts. Surfaces key their styling off this.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveKind {
    DistanceTick,
    DistanceLabel,
    TimeTick,
    TimeLabel,
    TripPath {
        route: RouteIdentifier,
        direction: DirectionId,
    },
    ScaleIndicator,
}

/// Text rotation in degrees, clockwise about an anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub degrees: f64,
    pub about: ScreenPt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Polyline {
        points: Vec<ScreenPt>,
        kind: PrimitiveKind,
    },
    Text {
        content: String,
        anchor: ScreenPt,
        rotation: Option<Rotation>,
        kind: PrimitiveKind,
    },
}

impl Primitive {
    pub fn kind(&self) -> &PrimitiveKind {
        match self {
            Self::Polyline { kind, .. } => kind,
            Self::Text { kind, .. } => kind,
        }
    }
}

/// An ordered batch of primitives ready for painting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn push_line(&mut self, from: ScreenPt, to: ScreenPt, kind: PrimitiveKind) {
        self.primitives.push(Primitive::Polyline {
            points: vec![from, to],
            kind,
        });
    }

    pub fn push_polyline(&mut self, points: Vec<ScreenPt>, kind: PrimitiveKind) {
        self.primitives.push(Primitive::Polyline { points, kind });
    }

    pub fn push_text(
        &mut self,
        content: impl Into<String>,
        anchor: ScreenPt,
        rotation: Option<Rotation>,
        kind: PrimitiveKind,
    ) {
        self.primitives.push(Primitive::Text {
            content: content.into(),
            anchor,
            rotation,
            kind,
        });
    }
}

/// Receives freshly composed scenes whenever the diagram changes.
pub trait VectorSurface: Send {
    fn render(&mut self, scene: &Scene);
}
