//! `streamyyy-grid`: computes the Streamyyy stream grid for a viewport.
//!
//! # Usage
//!
//! ```text
//! streamyyy-grid [OPTIONS]
//!
//! Options:
//!   -n, --streams <N>          Number of open streams [default: 4]
//!       --width <PX>           Viewport width [default: 375]
//!       --height <PX>          Viewport height [default: 812]
//!       --platform <NAME>      ios | android | web [default: this machine]
//!       --content <TYPE>       mixed | gaming | esports | just-chatting
//!       --max-streams <N>      Overrides `grid.max_streams` from the config
//!       --config <PATH>        Config file [default: platform config dir]
//!       --format <FORMAT>      text | json [default: text]
//!       --suggestions          Also print layout suggestions
//!       --tiles                Also print every tile rectangle
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable             | Description                                   |
//! |----------------------|-----------------------------------------------|
//! | `STREAMYYY_CONFIG`   | Config file path (same as `--config`)         |
//! | `STREAMYYY_PLATFORM` | Platform (same as `--platform`)               |
//! | `RUST_LOG`           | Log filter; overrides `log_level` from config |
//!
//! Logs go to stderr so JSON on stdout stays machine-readable.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use streamyyy_cli::config::{load_config, LayoutConfig};
use streamyyy_cli::report::{OutputFormat, Report};
use streamyyy_core::{
    ContentType, FixedViewport, LayoutEngine, Platform, ScreenDimensions, Viewport,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Computes the multi-stream grid Streamyyy would show for a viewport.
#[derive(Debug, Parser)]
#[command(
    name = "streamyyy-grid",
    about = "Compute the Streamyyy multi-stream grid for a viewport",
    version
)]
struct Cli {
    /// Number of open streams.
    #[arg(short = 'n', long, default_value_t = 4)]
    streams: u32,

    /// Viewport width in logical pixels.
    #[arg(long, default_value_t = 375.0)]
    width: f64,

    /// Viewport height in logical pixels.
    #[arg(long, default_value_t = 812.0)]
    height: f64,

    /// Platform the viewport belongs to; defaults to the one this binary was
    /// built for.
    #[arg(long, env = "STREAMYYY_PLATFORM")]
    platform: Option<Platform>,

    /// Kind of content being watched; only affects suggestions.
    #[arg(long, default_value_t = ContentType::Mixed)]
    content: ContentType,

    /// Upper clamp on tiles laid out, overriding the config file.
    #[arg(long)]
    max_streams: Option<u32>,

    /// Path to a TOML config file.
    #[arg(long, env = "STREAMYYY_CONFIG")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also print layout suggestions for the device.
    #[arg(long)]
    suggestions: bool,

    /// Also print the pixel rectangle of every tile.
    #[arg(long)]
    tiles: bool,
}

/// Validated request built from the command line.
#[derive(Debug)]
struct GridRequest {
    streams: u32,
    viewport: Viewport,
    content: ContentType,
    max_streams: Option<u32>,
    config: Option<PathBuf>,
    format: OutputFormat,
    suggestions: bool,
    tiles: bool,
}

impl Cli {
    /// Converts the parsed arguments into a [`GridRequest`].
    ///
    /// # Errors
    ///
    /// Returns an error if the viewport is not positive and finite or
    /// `--max-streams` is zero.
    fn into_request(self) -> anyhow::Result<GridRequest> {
        ScreenDimensions::new(self.width, self.height)
            .with_context(|| format!("invalid viewport '{}x{}'", self.width, self.height))?;

        if self.max_streams == Some(0) {
            anyhow::bail!("--max-streams must be at least 1");
        }

        Ok(GridRequest {
            streams: self.streams,
            viewport: Viewport::new(
                self.width,
                self.height,
                self.platform.unwrap_or_else(Platform::current),
            ),
            content: self.content,
            max_streams: self.max_streams,
            config: self.config,
            format: self.format,
            suggestions: self.suggestions,
            tiles: self.tiles,
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(config: &LayoutConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let request = Cli::parse().into_request()?;

    let config = load_config(request.config.as_deref()).with_context(|| match &request.config {
        Some(path) => format!("failed to load config from {}", path.display()),
        None => "failed to load config from the platform config directory".to_string(),
    })?;

    init_logging(&config);
    debug!(?config, "configuration loaded");

    let mut options = config.grid.clone();
    if let Some(max_streams) = request.max_streams {
        options.max_streams = max_streams;
    }

    let mut engine = LayoutEngine::with_spacing(options, config.spacing.clone());
    let source = FixedViewport {
        viewport: request.viewport,
    };
    let layout = engine
        .refresh(&source, request.streams)
        .context("failed to read viewport")?
        .clone();

    info!(
        streams = request.streams,
        columns = layout.grid.columns,
        rows = layout.grid.rows,
        "layout computed"
    );

    let suggestions = if request.suggestions {
        Some(
            engine
                .suggestions(request.streams, request.content)
                .unwrap_or_default(),
        )
    } else {
        None
    };

    let report = Report::new(request.streams, layout, suggestions, request.tiles);
    let rendered = report
        .render(request.format)
        .context("failed to render layout report")?;
    print!("{rendered}");
    if request.format == OutputFormat::Json {
        println!();
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
