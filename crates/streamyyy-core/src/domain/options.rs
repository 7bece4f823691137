//! Recognised grid options and the device preference table.
//!
//! Both structs deserialise with per-field defaults, so a config file that
//! only sets `max_streams = 4` keeps every other value at its default:
//!
//! ```toml
//! [grid]
//! max_streams = 4
//!
//! [grid.preferences]
//! tablet_wide = 1.3
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default upper clamp on the number of tiles laid out.
pub const DEFAULT_MAX_STREAMS: u32 = 9;
/// Largest `max_streams` the scorer accepts; larger values are clamped.
pub const MAX_STREAMS_CEILING: u32 = 64;
/// Default minimum tile width.
pub const DEFAULT_MIN_CELL_WIDTH: f64 = 120.0;
/// Default minimum tile height.
pub const DEFAULT_MIN_CELL_HEIGHT: f64 = 68.0;
/// Default target tile aspect ratio (16:9 video).
pub const DEFAULT_ASPECT_RATIO: f64 = 16.0 / 9.0;
/// Default space reserved around the grid.
pub const DEFAULT_GRID_PADDING: f64 = 16.0;
/// Default space between tiles.
pub const DEFAULT_GRID_GAP: f64 = 8.0;
/// Default vertical space reserved above the grid.
pub const DEFAULT_HEADER_HEIGHT: f64 = 120.0;
/// Default vertical space reserved below the grid.
pub const DEFAULT_FOOTER_HEIGHT: f64 = 100.0;

/// Options that shape the grid scorer's search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Upper clamp on tiles considered, itself capped at [`MAX_STREAMS_CEILING`].
    pub max_streams: u32,
    /// Candidates with narrower cells are rejected outright.
    pub min_cell_width: f64,
    /// Candidates with shorter cells are rejected outright.
    pub min_cell_height: f64,
    /// Target tile width / height.
    pub aspect_ratio: f64,
    /// Space reserved on every side of the grid.
    pub padding: f64,
    /// Space between adjacent tiles.
    pub gap: f64,
    /// Chrome above the grid.
    pub header_height: f64,
    /// Chrome below the grid.
    pub footer_height: f64,
    /// Device-specific score multipliers.
    pub preferences: DevicePreferences,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            max_streams: DEFAULT_MAX_STREAMS,
            min_cell_width: DEFAULT_MIN_CELL_WIDTH,
            min_cell_height: DEFAULT_MIN_CELL_HEIGHT,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            padding: DEFAULT_GRID_PADDING,
            gap: DEFAULT_GRID_GAP,
            header_height: DEFAULT_HEADER_HEIGHT,
            footer_height: DEFAULT_FOOTER_HEIGHT,
            preferences: DevicePreferences::default(),
        }
    }
}

impl GridOptions {
    /// Returns a copy with every unusable value replaced by its default.
    ///
    /// Options usually come from a hand-edited config file, and the scorer
    /// must never divide by a zero aspect ratio or reserve negative space.
    /// Each replacement is logged at `warn` level.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();

        if out.max_streams == 0 {
            warn!("max_streams must be at least 1; using {DEFAULT_MAX_STREAMS}");
            out.max_streams = DEFAULT_MAX_STREAMS;
        }
        if out.max_streams > MAX_STREAMS_CEILING {
            warn!(
                max_streams = out.max_streams,
                "max_streams above {MAX_STREAMS_CEILING}; clamping"
            );
            out.max_streams = MAX_STREAMS_CEILING;
        }
        if !(out.aspect_ratio.is_finite() && out.aspect_ratio > 0.0) {
            warn!(aspect_ratio = out.aspect_ratio, "invalid aspect ratio; using 16:9");
            out.aspect_ratio = DEFAULT_ASPECT_RATIO;
        }
        out.min_cell_width = non_negative("min_cell_width", out.min_cell_width, DEFAULT_MIN_CELL_WIDTH);
        out.min_cell_height =
            non_negative("min_cell_height", out.min_cell_height, DEFAULT_MIN_CELL_HEIGHT);
        out.padding = non_negative("padding", out.padding, DEFAULT_GRID_PADDING);
        out.gap = non_negative("gap", out.gap, DEFAULT_GRID_GAP);
        out.header_height = non_negative("header_height", out.header_height, DEFAULT_HEADER_HEIGHT);
        out.footer_height = non_negative("footer_height", out.footer_height, DEFAULT_FOOTER_HEIGHT);
        out.preferences = out.preferences.sanitized();
        out
    }
}

fn non_negative(name: &str, value: f64, default: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!(option = name, value, "option must be a finite non-negative number; using {default}");
        default
    }
}

/// Score multipliers that bias the grid scorer towards layouts suited to the
/// device class.
///
/// These are tie-breakers layered on top of the geometric score, not hard
/// constraints.  Values above 1.0 favour a shape, values below 1.0 discourage
/// it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevicePreferences {
    /// Tablet, grid wider than tall (`cols > rows`).
    pub tablet_wide: f64,
    /// Tablet, grid at least as tall as wide (`rows >= cols`).
    pub tablet_tall: f64,
    /// Phone, at most two tiles in a single row or column.
    pub phone_strip: f64,
    /// Phone, at most four tiles within a 2×2 grid.
    pub phone_compact: f64,
    /// Phone in portrait, at most four tiles stacked in more than two rows.
    pub phone_tall_stack: f64,
    /// Small screen bucket, grid of at most four cells.
    pub small_screen_simple: f64,
    /// Large or xlarge screen bucket, three or more columns.
    pub large_screen_rich: f64,
}

impl Default for DevicePreferences {
    fn default() -> Self {
        Self {
            tablet_wide: 1.2,
            tablet_tall: 1.1,
            phone_strip: 1.3,
            phone_compact: 1.2,
            phone_tall_stack: 0.25,
            small_screen_simple: 1.2,
            large_screen_rich: 1.1,
        }
    }
}

impl DevicePreferences {
    /// Neutral table: every multiplier is 1.0, so only geometry decides.
    pub fn neutral() -> Self {
        Self {
            tablet_wide: 1.0,
            tablet_tall: 1.0,
            phone_strip: 1.0,
            phone_compact: 1.0,
            phone_tall_stack: 1.0,
            small_screen_simple: 1.0,
            large_screen_rich: 1.0,
        }
    }

    fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let fix = |name: &str, value: f64, default: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                warn!(multiplier = name, value, "multiplier must be positive; using {default}");
                default
            }
        };
        Self {
            tablet_wide: fix("tablet_wide", self.tablet_wide, defaults.tablet_wide),
            tablet_tall: fix("tablet_tall", self.tablet_tall, defaults.tablet_tall),
            phone_strip: fix("phone_strip", self.phone_strip, defaults.phone_strip),
            phone_compact: fix("phone_compact", self.phone_compact, defaults.phone_compact),
            phone_tall_stack: fix("phone_tall_stack", self.phone_tall_stack, defaults.phone_tall_stack),
            small_screen_simple: fix(
                "small_screen_simple",
                self.small_screen_simple,
                defaults.small_screen_simple,
            ),
            large_screen_rich: fix("large_screen_rich", self.large_screen_rich, defaults.large_screen_rich),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
