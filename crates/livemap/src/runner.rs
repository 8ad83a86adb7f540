//! Poll-and-frame driver for the live map.
//!
//! One spawned task owns the [`TrainMap`] and serializes everything that
//! touches it: feed polls land on a slow interval, display frames on a
//! fast one, and each frame pushes the repainted layer to the surface.
//! Dropping the [`LiveMapHandle`] tears the task down.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use geo::Point;
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

use stringline_telemetry::{PositionSource, Result as FeedResult, VehiclePosition};

use crate::map::{MapSurface, SymbolStyle, TrainMap};

/// Cadence and styling for one live map instance.
#[derive(Debug, Clone)]
pub struct LiveMapConfig {
    pub poll_interval: Duration,
    pub frame_interval: Duration,
    pub style: SymbolStyle,
    /// Initial viewport hint for the surface, lon/lat.
    pub center: Point<f64>,
}

impl Default for LiveMapConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            frame_interval: Duration::from_millis(16),
            style: SymbolStyle::default(),
            center: Point::new(-74.006, 40.7128),
        }
    }
}

type PollFuture = Pin<Box<dyn Future<Output = FeedResult<Vec<VehiclePosition>>> + Send>>;

/// Remote control for a spawned live-map driver.
pub struct LiveMapHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl LiveMapHandle {
    /// Spawn the driver task. It polls immediately, then on every poll
    /// interval, and repaints on every frame interval once data exists.
    pub fn spawn(
        source: Arc<dyn PositionSource>,
        surface: Box<dyn MapSurface>,
        config: LiveMapConfig,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        tokio::spawn(run(source, surface, config, shutdown_rx));
        Self {
            shutdown_tx: Some(shutdown_tx),
        }
    }
}

impl Drop for LiveMapHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn run(
    source: Arc<dyn PositionSource>,
    mut surface: Box<dyn MapSurface>,
    config: LiveMapConfig,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let mut map = TrainMap::new(config.style.clone());
    surface.set_viewport(config.center);

    let mut poll = tokio::time::interval(config.poll_interval);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut frame = tokio::time::interval(config.frame_interval);
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut inflight: FuturesUnordered<PollFuture> = FuturesUnordered::new();

    debug!("live map driver started");
    loop {
        tokio::select! {
            _ = &mut shutdown_rx => break,

            _ = poll.tick() => {
                let source = Arc::clone(&source);
                inflight.push(Box::pin(async move {
                    source.fetch_positions().await
                }));
            }

            Some(polled) = inflight.next(), if !inflight.is_empty() => {
                match polled {
                    Ok(fleet) if fleet.is_empty() => {
                        trace!("empty live payload, keeping last positions");
                    }
                    Ok(fleet) => {
                        trace!(vehicles = fleet.len(), "live poll landed");
                        map.apply_poll(fleet);
                    }
                    Err(err) => {
                        warn!(error = %err, "live poll failed, keeping last positions");
                    }
                }
            }

            _ = frame.tick() => {
                if map.has_data() {
                    map.advance_frame();
                    surface.set_features(map.features());
                }
            }
        }
    }
    debug!("live map driver stopped");
}

// ============================================================================
// Tests
// ============================================================================
