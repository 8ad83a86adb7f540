//! HTTP implementation of the feed sources.

use std::future::Future;
use std::pin::Pin;

use crate::identifiers::RouteIdentifier;
use crate::records::{FeedError, Result, StopEvent, VehiclePosition};
use crate::source::{EventSource, PositionSource};
use crate::wire;

/// Fetches both feeds from a telemetry server over HTTP.
///
/// Endpoints are fixed relative to the base URL: `/api/route/{route}` for
/// stop events and `/live/geojson` for vehicle positions.
#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpFeedClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Use a caller-configured client, e.g. one with custom timeouts.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    fn route_events_url(&self, route: &RouteIdentifier) -> String {
        format!("{}/api/route/{}", self.base_url, route)
    }

    fn live_url(&self) -> String {
        format!("{}/live/geojson", self.base_url)
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| FeedError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FeedError::Transport(err.to_string()))?;
        Ok(body.to_vec())
    }
}

impl EventSource for HttpFeedClient {
    fn fetch_route_events<'a>(
        &'a self,
        route: &'a RouteIdentifier,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<StopEvent>>> + Send + 'a>> {
        Box::pin(async move {
            let url = self.route_events_url(route);
            let payload = self.get_bytes(&url).await?;
            wire::decode_route_events(&payload)
        })
    }
}

impl PositionSource for HttpFeedClient {
    fn fetch_positions(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<VehiclePosition>>> + Send + '_>> {
        Box::pin(async move {
            let url = self.live_url();
            let payload = self.get_bytes(&url).await?;
            wire::decode_live_positions(&payload)
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
