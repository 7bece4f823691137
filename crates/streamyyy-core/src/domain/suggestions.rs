//! Canned layout suggestions shown next to the automatic grid.
//!
//! The list is advisory.  It is keyed by stream-count bucket and device
//! orientation and does not consult the grid scorer, so the two can disagree
//! for the same input (for example the scorer picking 1×3 on a tall phone while
//! the suggestions recommend 2×2).  A UI that needs them to agree should
//! compare against [`crate::GridDimensions`] itself.
//!
//! Every list ends with an `adaptive` entry, so the result is never empty.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::device::{DeviceInfo, ScreenSize};

/// Label of the trailing entry present in every suggestion list.
pub const ADAPTIVE_LAYOUT: &str = "adaptive";

/// Kind of content being watched; tweaks which alternatives are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    #[default]
    Mixed,
    Gaming,
    Esports,
    JustChatting,
}

impl ContentType {
    fn is_fast_paced(self) -> bool {
        matches!(self, ContentType::Gaming | ContentType::Esports)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Mixed => "mixed",
            ContentType::Gaming => "gaming",
            ContentType::Esports => "esports",
            ContentType::JustChatting => "just-chatting",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "mixed" => Ok(ContentType::Mixed),
            "gaming" => Ok(ContentType::Gaming),
            "esports" => Ok(ContentType::Esports),
            "just-chatting" | "chatting" => Ok(ContentType::JustChatting),
            other => Err(format!(
                "unknown content type '{other}' (expected mixed, gaming, esports or just-chatting)"
            )),
        }
    }
}

/// One human-facing layout alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSuggestion {
    /// Short label such as `"2x2"` or `"adaptive"`.
    pub layout: String,
    pub description: String,
    pub columns: u32,
    pub rows: u32,
    pub recommended: bool,
}

impl LayoutSuggestion {
    fn new(layout: impl Into<String>, description: impl Into<String>, columns: u32, rows: u32) -> Self {
        Self {
            layout: layout.into(),
            description: description.into(),
            columns,
            rows,
            recommended: false,
        }
    }

    fn recommended(mut self, recommended: bool) -> Self {
        self.recommended = recommended;
        self
    }
}

/// Returns the suggestion list for `stream_count` streams on `device`.
///
/// Counts above nine use the 5–9 bucket.  The trailing `adaptive` entry is
/// recommended when more than four streams are open or the screen is small;
/// at most one of the other entries is recommended.
pub fn suggest(stream_count: u32, content_type: ContentType, device: &DeviceInfo) -> Vec<LayoutSuggestion> {
    let portrait_phone = device.is_phone && !device.is_landscape;
    let mut out = Vec::new();

    match stream_count {
        0 => {}
        1 => {
            out.push(
                LayoutSuggestion::new("1x1", "Single stream, full width", 1, 1).recommended(true),
            );
            if content_type.is_fast_paced() {
                out.push(LayoutSuggestion::new(
                    "focus",
                    "Single stream with room for chat below",
                    1,
                    1,
                ));
            }
        }
        2 => {
            let side_by_side = LayoutSuggestion::new("2x1", "Two streams side by side", 2, 1)
                .recommended(device.is_landscape);
            let stacked = LayoutSuggestion::new("1x2", "Two streams stacked", 1, 2)
                .recommended(!device.is_landscape);
            if device.is_landscape {
                out.extend([side_by_side, stacked]);
            } else {
                out.extend([stacked, side_by_side]);
            }
        }
        3 | 4 => {
            out.push(
                LayoutSuggestion::new("2x2", "Balanced grid with equal tiles", 2, 2).recommended(true),
            );
            if stream_count == 3 {
                out.push(LayoutSuggestion::new(
                    "focus+2",
                    "One large stream above two smaller ones",
                    2,
                    2,
                ));
            }
            if portrait_phone {
                out.push(LayoutSuggestion::new(
                    format!("1x{stream_count}"),
                    "Scrollable vertical list",
                    1,
                    stream_count,
                ));
            }
        }
        _ => {
            let tiles = stream_count.min(9);
            if portrait_phone {
                let rows = tiles.div_ceil(2);
                out.push(
                    LayoutSuggestion::new(
                        format!("2x{rows}"),
                        "Two columns sized for a tall screen",
                        2,
                        rows,
                    )
                    .recommended(true),
                );
            }
            out.push(
                LayoutSuggestion::new("3x3", "Nine-tile grid for following many streams", 3, 3)
                    .recommended(!portrait_phone),
            );
            if tiles <= 6 {
                out.push(LayoutSuggestion::new("3x2", "Six tiles in two rows", 3, 2));
            }
        }
    }

    out.push(adaptive(stream_count, device));
    out
}

fn adaptive(stream_count: u32, device: &DeviceInfo) -> LayoutSuggestion {
    let tiles = stream_count.max(1);
    let columns = (f64::from(tiles).sqrt().ceil() as u32).max(1);
    let rows = tiles.div_ceil(columns);
    LayoutSuggestion::new(
        ADAPTIVE_LAYOUT,
        "Let Streamyyy pick the best grid for this screen",
        columns,
        rows,
    )
    .recommended(stream_count > 4 || device.screen_size == ScreenSize::Small)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
