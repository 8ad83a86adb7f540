//! # stringline-diagram
//!
//! A Marey-style stringline diagram: every trip on a route drawn as a
//! polyline over (distance, time), so slope reads as speed and crossings
//! as meets.
//!
//! The crate splits into:
//!
//! - **Scale**: [`Bounds`] and [`CoordinateMapper`], the linear mapping
//!   from data to pixels inside fixed [`Margins`].
//! - **Legends**: stop marks thinned by spacing and whole-hour time marks.
//! - **Paths**: per-trip polyline assembly with direction filtering.
//! - **Tooltip**: the pointer-anchored scale indicator.
//! - **Scene**: backend-neutral primitives consumed by a [`VectorSurface`].
//! - **Driver**: [`DiagramHandle`] runs fetch-and-render on a tokio task.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use stringline_diagram::{DiagramConfig, MareyDiagram, RefreshOutcome};
//! use stringline_telemetry::{DirectionId, StopEvent};
//!
//! let t0 = Utc.with_ymd_and_hms(2018, 3, 20, 15, 0, 0).unwrap();
//! let batch = vec![
//!     StopEvent::new(t0, 0.0, "Alpha", "t1", DirectionId::Outbound, "1"),
//!     StopEvent::new(
//!         t0 + chrono::TimeDelta::minutes(9),
//!         3.5,
//!         "Beta",
//!         "t1",
//!         DirectionId::Outbound,
//!         "1",
//!     ),
//! ];
//!
//! let mut diagram = MareyDiagram::new("1", DiagramConfig::default());
//! assert_eq!(diagram.apply_batch(batch), RefreshOutcome::Updated);
//! assert!(!diagram.scene().is_empty());
//! ```

pub mod diagram;
pub mod geometry;
pub mod legend;
pub mod paths;
pub mod refresh;
pub mod scale;
pub mod scene;
pub mod tooltip;

pub use diagram::{DiagramConfig, MareyDiagram, RefreshOutcome};
pub use geometry::{Margins, ScreenPt};
pub use legend::{DistanceTick, TimeTick, DISTANCE_TICK_SPACING};
pub use paths::TripPath;
pub use refresh::DiagramHandle;
pub use scale::{Bounds, CoordinateMapper};
pub use scene::{Primitive, PrimitiveKind, Rotation, Scene, VectorSurface};
pub use tooltip::{ScaleIndicator, ScaleReference};
