//! # stringline-telemetry
//!
//! Records, wire formats, and feed plumbing for the stringline diagram and
//! live vehicle map.
//!
//! The crate covers three things:
//!
//! - **Records**: [`StopEvent`] and [`VehiclePosition`], with typed
//!   identifiers and an explicit [`DirectionFilter`].
//! - **Wire formats**: decoding of the per-route JSON feed and the live
//!   GeoJSON feed in [`wire`].
//! - **Sources**: the [`EventSource`] / [`PositionSource`] traits plus the
//!   [`HttpFeedClient`] that implements both against a telemetry server.
//!
//! ```
//! use stringline_telemetry::{wire, DirectionId};
//!
//! let payload = br#"[{
//!     "timestamp": "2018-03-20T15:04:00Z",
//!     "progress": 0.0,
//!     "stop": { "name": "Van Cortlandt Park" },
//!     "trip": { "id": "t1", "direction": 0, "route": "1" }
//! }]"#;
//!
//! let events = wire::decode_route_events(payload).unwrap();
//! assert_eq!(events[0].direction, DirectionId::Outbound);
//! ```

pub mod client;
pub mod identifiers;
pub mod records;
pub mod source;
pub mod wire;

pub use client::HttpFeedClient;
pub use identifiers::{RouteIdentifier, TripIdentifier};
pub use records::{
    DirectionFilter, DirectionId, FeedError, Result, StopEvent, VehiclePosition,
};
pub use source::{EventSource, PositionSource};
