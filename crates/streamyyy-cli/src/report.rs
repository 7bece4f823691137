//! Renders a computed layout for the terminal or for another program.

use std::fmt::Write as _;

use serde::Serialize;

use streamyyy_core::{DeviceInfo, GridFit, LayoutSuggestion, ResponsiveLayout};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// A single JSON object on stdout.
    Json,
}

/// What `streamyyy-grid` prints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub stream_count: u32,
    pub layout: ResponsiveLayout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<LayoutSuggestion>>,
}

impl Report {
    /// Builds a report; tile rectangles are kept only when `include_tiles` is set.
    pub fn new(
        stream_count: u32,
        mut layout: ResponsiveLayout,
        suggestions: Option<Vec<LayoutSuggestion>>,
        include_tiles: bool,
    ) -> Self {
        if !include_tiles {
            layout.tiles.clear();
        }
        Self {
            stream_count,
            layout,
            suggestions,
        }
    }

    /// Renders the report in `format`.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if JSON serialization fails.
    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self),
            OutputFormat::Text => Ok(self.to_text()),
        }
    }

    fn to_text(&self) -> String {
        let layout = &self.layout;
        let grid = &layout.grid;
        let mut out = String::new();

        match (&layout.screen, &layout.device) {
            (Some(screen), Some(device)) => {
                let _ = writeln!(
                    out,
                    "device:  {} ({}, {}, {}) {}x{}",
                    device_class(device),
                    device.platform,
                    device.screen_size,
                    if device.is_landscape { "landscape" } else { "portrait" },
                    screen.width,
                    screen.height,
                );
            }
            _ => {
                let _ = writeln!(out, "device:  unknown");
            }
        }

        let _ = writeln!(
            out,
            "grid:    {}x{} for {} of {} streams, cell {}x{}, gap {}, padding {}",
            grid.columns,
            grid.rows,
            layout.tile_count,
            self.stream_count,
            grid.cell_width,
            grid.cell_height,
            grid.gap,
            grid.padding,
        );

        match &layout.fit {
            GridFit::Scored { score } => {
                let _ = writeln!(out, "fit:     scored ({score:.4})");
            }
            GridFit::BestEffort { reason } => {
                let _ = writeln!(out, "fit:     best effort: {reason}");
            }
        }

        if !layout.tiles.is_empty() {
            let _ = writeln!(out, "tiles:");
            for tile in &layout.tiles {
                let _ = writeln!(
                    out,
                    "  #{:<2} x={:<5} y={:<5} {}x{}",
                    tile.index, tile.x, tile.y, tile.width, tile.height
                );
            }
        }

        if let Some(suggestions) = &self.suggestions {
            let _ = writeln!(out, "suggestions:");
            for s in suggestions {
                let marker = if s.recommended { '*' } else { ' ' };
                let _ = writeln!(out, "  {marker} {:<9} {}", s.layout, s.description);
            }
        }

        out
    }
}

fn device_class(device: &DeviceInfo) -> &'static str {
    if device.is_desktop {
        "desktop"
    } else if device.is_tablet {
        "tablet"
    } else {
        "phone"
    }
}
