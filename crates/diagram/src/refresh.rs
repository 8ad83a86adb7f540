//! Refresh driver: owns a diagram, polls its feed, pushes scenes to a
//! surface.
//!
//! All mutation happens on one spawned task, so batches and pointer events
//! are serialized without locks. Fetches run as detached futures inside the
//! task; a fetch that outlives its interval never blocks the next tick or a
//! pointer update. Dropping the [`DiagramHandle`] tears the task down.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

use stringline_telemetry::{EventSource, Result as FeedResult, StopEvent};

use crate::diagram::{MareyDiagram, RefreshOutcome};
use crate::geometry::ScreenPt;
use crate::scene::VectorSurface;

enum PointerEvent {
    Moved(ScreenPt),
    Left,
}

type FetchFuture = Pin<Box<dyn Future<Output = FeedResult<Vec<StopEvent>>> + Send>>;

/// Remote control for a spawned diagram driver.
///
/// The driver stops when the handle is dropped.
pub struct DiagramHandle {
    pointer_tx: mpsc::UnboundedSender<PointerEvent>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl DiagramHandle {
    /// Spawn the driver task. It fetches immediately, then on every
    /// interval from the diagram's config.
    pub fn spawn(
        diagram: MareyDiagram,
        source: Arc<dyn EventSource>,
        surface: Box<dyn VectorSurface>,
    ) -> Self {
        let (pointer_tx, pointer_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        tokio::spawn(run(diagram, source, surface, pointer_rx, shutdown_rx));
        Self {
            pointer_tx,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn pointer_moved(&self, x: f64, y: f64) {
        let _ = self.pointer_tx.send(PointerEvent::Moved(ScreenPt::new(x, y)));
    }

    pub fn pointer_left(&self) {
        let _ = self.pointer_tx.send(PointerEvent::Left);
    }
}

impl Drop for DiagramHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn run(
    mut diagram: MareyDiagram,
    source: Arc<dyn EventSource>,
    mut surface: Box<dyn VectorSurface>,
    mut pointer_rx: mpsc::UnboundedReceiver<PointerEvent>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(diagram.config().refresh_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut inflight: FuturesUnordered<FetchFuture> = FuturesUnordered::new();

    debug!(route = %diagram.route(), "diagram driver started");
    loop {
        tokio::select! {
            _ = &mut shutdown_rx => break,

            _ = ticker.tick() => {
                let source = Arc::clone(&source);
                let route = diagram.route().clone();
                inflight.push(Box::pin(async move {
                    source.fetch_route_events(&route).await
                }));
            }

            Some(fetched) = inflight.next(), if !inflight.is_empty() => {
                match fetched {
                    Ok(batch) => match diagram.apply_batch(batch) {
                        RefreshOutcome::Updated => {
                            trace!(route = %diagram.route(), "applied fresh batch");
                            surface.render(&diagram.scene());
                        }
                        RefreshOutcome::Skipped => {
                            trace!(route = %diagram.route(), "empty batch, keeping last picture");
                        }
                    },
                    Err(err) => {
                        warn!(route = %diagram.route(), error = %err, "feed fetch failed, keeping last picture");
                    }
                }
            }

            event = pointer_rx.recv() => match event {
                Some(PointerEvent::Moved(pointer)) => {
                    diagram.pointer_moved(pointer);
                    surface.render(&diagram.scene());
                }
                Some(PointerEvent::Left) => {
                    diagram.pointer_left();
                    surface.render(&diagram.scene());
                }
                None => break,
            },
        }
    }
    debug!(route = %diagram.route(), "diagram driver stopped");
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::DiagramConfig;
    use crate::scene::Scene;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;
    use std::time::Duration;
    use stringline_telemetry::{DirectionId, FeedError, RouteIdentifier};

    struct CannedSource {
        batches: Mutex<Vec<FeedResult<Vec<StopEvent>>>>,
    }

    impl CannedSource {
        fn new(batches: Vec<FeedResult<Vec<StopEvent>>>) -> Arc<Self> {
            Arc::new(Self {
                batches: Mutex::new(batches),
            })
        }
    }

    impl EventSource for CannedSource {
        fn fetch_route_events<'a>(
            &'a self,
            _route: &'a RouteIdentifier,
        ) -> Pin<Box<dyn Future<Output = FeedResult<Vec<StopEvent>>> + Send + 'a>> {
            let mut batches = self.batches.lock().unwrap();
            let next = if batches.len() > 1 {
                batches.remove(0)
            } else {
                // keep replaying the last batch
                match &batches[0] {
                    Ok(events) => Ok(events.clone()),
                    Err(_) => Err(FeedError::Transport("replayed failure".into())),
                }
            };
            Box::pin(std::future::ready(next))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSurface {
        scenes: Arc<Mutex<Vec<Scene>>>,
    }

    impl VectorSurface for RecordingSurface {
        fn render(&mut self, scene: &Scene) {
            self.scenes.lock().unwrap().push(scene.clone());
        }
    }

    fn batch() -> Vec<StopEvent> {
        let t0 = Utc.with_ymd_and_hms(2018, 3, 20, 15, 0, 0).unwrap();
        vec![
            StopEvent::new(t0, 0.0, "Alpha", "t1", DirectionId::Outbound, "1"),
            StopEvent::new(
                t0 + chrono::TimeDelta::minutes(8),
                3.0,
                "Beta",
                "t1",
                DirectionId::Outbound,
                "1",
            ),
        ]
    }

    fn fast_config() -> DiagramConfig {
        let mut config = DiagramConfig::default();
        config.refresh_interval = Duration::from_millis(10);
        config
    }

    #[tokio::test]
    async fn test_first_fetch_is_immediate() {
        let mut config = DiagramConfig::default();
        config.refresh_interval = Duration::from_secs(3600);

        let surface = RecordingSurface::default();
        let scenes = surface.scenes.clone();
        let handle = DiagramHandle::spawn(
            MareyDiagram::new("1", config),
            CannedSource::new(vec![Ok(batch())]),
            Box::new(surface),
        );

        tokio::time::sleep(Duration::from_millis(60)).await;
        let rendered = scenes.lock().unwrap();
        assert_eq!(
            rendered.len(),
            1,
            "driver should render once without waiting a full interval"
        );
        assert!(!rendered[0].is_empty());
        drop(rendered);
        drop(handle);
    }

    #[tokio::test]
    async fn test_failures_keep_the_last_picture() {
        let surface = RecordingSurface::default();
        let scenes = surface.scenes.clone();
        let handle = DiagramHandle::spawn(
            MareyDiagram::new("1", fast_config()),
            CannedSource::new(vec![
                Ok(batch()),
                Err(FeedError::Transport("boom".into())),
            ]),
            Box::new(surface),
        );

        tokio::time::sleep(Duration::from_millis(80)).await;
        drop(handle);

        let rendered = scenes.lock().unwrap();
        // exactly one successful batch made it to the surface
        assert_eq!(rendered.len(), 1);
        assert!(!rendered[0].is_empty());
    }

    #[tokio::test]
    async fn test_pointer_events_rerender() {
        let surface = RecordingSurface::default();
        let scenes = surface.scenes.clone();
        let handle = DiagramHandle::spawn(
            MareyDiagram::new("1", fast_config()),
            CannedSource::new(vec![Ok(batch())]),
            Box::new(surface),
        );

        tokio::time::sleep(Duration::from_millis(30)).await;
        let before = scenes.lock().unwrap().len();
        handle.pointer_moved(120.0, 90.0);
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(scenes.lock().unwrap().len() > before);
        drop(handle);
    }

    #[tokio::test]
    async fn test_dropping_the_handle_stops_the_driver() {
        let surface = RecordingSurface::default();
        let scenes = surface.scenes.clone();
        let handle = DiagramHandle::spawn(
            MareyDiagram::new("1", fast_config()),
            CannedSource::new(vec![Ok(batch())]),
            Box::new(surface),
        );

        tokio::time::sleep(Duration::from_millis(30)).await;
        drop(handle);
        tokio::time::sleep(Duration::from_millis(10)).await;

        let after_drop = scenes.lock().unwrap().len();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(scenes.lock().unwrap().len(), after_drop);
    }
}
