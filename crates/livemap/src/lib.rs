//! # stringline-livemap
//!
//! Live vehicle positions on a map, smoothed between feed polls.
//!
//! The feed reports the whole fleet every poll interval; drawing those
//! reports directly makes vehicles jump. [`TrainMap`] keeps the last two
//! polls and a blend factor that advances every display frame, so each
//! vehicle glides from its previous report toward its latest one. The
//! blended picture goes out as a GeoJSON layer through a [`MapSurface`].
//!
//! [`LiveMapHandle::spawn`] runs the poll-and-frame loop on a tokio task
//! that stops when the handle drops.

pub mod interpolate;
pub mod map;
pub mod runner;
pub mod snapshot;

pub use interpolate::{InterpolationState, FACTOR_RESET, FACTOR_STEP};
pub use map::{MapSurface, Stroke, SymbolStyle, TrainMap};
pub use runner::{LiveMapConfig, LiveMapHandle};
pub use snapshot::PositionSnapshot;
