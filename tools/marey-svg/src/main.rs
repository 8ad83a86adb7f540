//! Render one route's stringline diagram to a standalone SVG file.
//!
//! Feed it either a telemetry server (`--base-url`) or a saved stop-event
//! JSON payload (`--input`). Handy for eyeballing a route without wiring
//! up a real surface.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stringline_diagram::{DiagramConfig, MareyDiagram, RefreshOutcome};
use stringline_telemetry::{
    wire, DirectionFilter, DirectionId, EventSource, HttpFeedClient, RouteIdentifier,
};

mod svg;

#[derive(Parser, Debug)]
#[command(name = "marey-svg", about = "Render a route's stringline diagram as SVG")]
struct Args {
    /// Route to render, e.g. "1"
    #[arg(short, long)]
    route: String,

    /// Base URL of a telemetry server to fetch from
    #[arg(long, conflicts_with = "input")]
    base_url: Option<String>,

    /// Read a stop-event JSON payload from a file instead of fetching
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output SVG path
    #[arg(short, long)]
    output: PathBuf,

    /// Surface width in pixels
    #[arg(long, default_value_t = 500.0)]
    width: f64,

    /// Surface height in pixels
    #[arg(long, default_value_t = 400.0)]
    height: f64,

    /// Keep only one direction (0 = outbound, 1 = inbound)
    #[arg(long)]
    direction: Option<u8>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let route = RouteIdentifier::new(args.route.as_str());
    let events = match (&args.input, &args.base_url) {
        (Some(path), _) => {
            info!(path = %path.display(), "reading stop events");
            let payload =
                fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            wire::decode_route_events(&payload)?
        }
        (None, Some(base_url)) => {
            info!(%route, %base_url, "fetching stop events");
            let client = HttpFeedClient::new(base_url.as_str());
            client.fetch_route_events(&route).await?
        }
        (None, None) => bail!("pass --input FILE or --base-url URL"),
    };
    info!(events = events.len(), "decoded batch");

    let mut config = DiagramConfig::new(args.width, args.height);
    if let Some(raw) = args.direction {
        let direction = DirectionId::from_wire(raw)
            .with_context(|| format!("direction must be 0 or 1, got {raw}"))?;
        config.direction = DirectionFilter::Only(direction);
    }

    let mut diagram = MareyDiagram::new(route, config);
    if diagram.apply_batch(events) == RefreshOutcome::Skipped {
        bail!("no events for route {}", diagram.route());
    }

    let document = svg::document(&diagram.scene(), args.width, args.height);
    fs::write(&args.output, document)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(output = %args.output.display(), "wrote diagram");
    Ok(())
}
