//! Feed source traits.
//!
//! The refresh drivers poll through these rather than a concrete HTTP
//! client, so tests and offline tools can substitute canned data.

use std::future::Future;
use std::pin::Pin;

use crate::identifiers::RouteIdentifier;
use crate::records::{Result, StopEvent, VehiclePosition};

/// Supplies the per-route stop event feed.
pub trait EventSource: Send + Sync {
    /// Fetch the current batch of stop events for one route.
    fn fetch_route_events<'a>(
        &'a self,
        route: &'a RouteIdentifier,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StopEvent>>> + Send + 'a>>;
}

/// Supplies the system-wide live vehicle position feed.
pub trait PositionSource: Send + Sync {
    /// Fetch the latest position of every reporting vehicle.
    fn fetch_positions(&self)
        -> Pin<Box<dyn Future<Output = Result<Vec<VehiclePosition>>> + Send + '_>>;
}
