//! End-to-end layout computation.
//!
//! ```text
//! (stream count, width, height, platform)
//!     └─ classify_for          → ScreenDimensions + DeviceInfo
//!     └─ spacing::*_with       → responsive padding and gap
//!     └─ score_grid            → GridDimensions + GridFit
//!     └─ tile_regions          → one rectangle per visible tile
//! ```
//!
//! Spacing is derived before scoring and fed into the scorer's options, so the
//! `gap` and `padding` reported on the grid are the ones its tile sizes were
//! computed with.

use serde::Serialize;
use tracing::warn;

use crate::domain::device::{classify_for, DeviceInfo, Platform, ScreenDimensions};
use crate::domain::grid::{effective_stream_count, score_grid, GridDimensions, GridFit, TileRegion};
use crate::domain::options::GridOptions;
use crate::domain::spacing::{gap_with, padding_with, SpacingScale};

/// Everything the rendering layer needs to lay out the stream grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveLayout {
    /// `None` only when the viewport itself was invalid.
    pub screen: Option<ScreenDimensions>,
    /// `None` only when the viewport itself was invalid.
    pub device: Option<DeviceInfo>,
    pub grid: GridDimensions,
    pub fit: GridFit,
    /// Number of tiles actually laid out after clamping to `max_streams`.
    /// Zero streams give zero tiles inside the 1×1 `grid`.
    pub tile_count: u32,
    /// One rectangle per laid-out tile, in row-major order.
    pub tiles: Vec<TileRegion>,
}

/// Computes the full layout using the default spacing scale.
///
/// Never fails: an invalid viewport yields a 1×1 grid with zero-sized cells
/// and [`GridFit::BestEffort`] carrying the reason.
pub fn compute_responsive_layout(
    stream_count: u32,
    width: f64,
    height: f64,
    platform: Platform,
    options: &GridOptions,
) -> ResponsiveLayout {
    compute_responsive_layout_with(
        stream_count,
        width,
        height,
        platform,
        options,
        &SpacingScale::default(),
    )
}

/// Computes the full layout with an explicit spacing scale.
pub fn compute_responsive_layout_with(
    stream_count: u32,
    width: f64,
    height: f64,
    platform: Platform,
    options: &GridOptions,
    spacing: &SpacingScale,
) -> ResponsiveLayout {
    let options = options.sanitized();

    let (screen, device) = match classify_for(platform, width, height) {
        Ok(classified) => classified,
        Err(reason) => {
            warn!("cannot lay out streams: {reason}");
            return ResponsiveLayout {
                screen: None,
                device: None,
                grid: GridDimensions::empty(options.gap, options.padding),
                fit: GridFit::BestEffort { reason },
                tile_count: 0,
                tiles: Vec::new(),
            };
        }
    };

    let scoring_options = GridOptions {
        padding: padding_with(spacing, &device, options.padding),
        gap: gap_with(spacing, &device, options.gap),
        ..options
    };

    let selection = score_grid(stream_count, &screen, &device, &scoring_options);
    let tile_count = effective_stream_count(stream_count, &scoring_options).min(stream_count);
    let tiles = selection
        .grid
        .tile_regions(screen.width, scoring_options.header_height, tile_count);

    ResponsiveLayout {
        screen: Some(screen),
        device: Some(device),
        grid: selection.grid,
        fit: selection.fit,
        tile_count,
        tiles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::LayoutError;
    use crate::domain::options::MAX_STREAMS_CEILING;

    #[test]
    fn test_phone_layout_uses_responsive_spacing() {
        // Arrange / Act: 375x812 is a "large" bucket phone → padding 20, gap 10
        let layout = compute_responsive_layout(4, 375.0, 812.0, Platform::Ios, &GridOptions::default());

        // Assert
        assert_eq!(layout.grid.padding, 20.0);
        assert_eq!(layout.grid.gap, 10.0);
        assert_eq!((layout.grid.columns, layout.grid.rows), (2, 2));
        // (375 - 40 - 10) / 2 = 162.5 → 162 wide, 162.5 / (16/9) = 91.4 → 91 tall
        assert_eq!(layout.grid.cell_width, 162);
        assert_eq!(layout.grid.cell_height, 91);
        assert_eq!(layout.tiles.len(), 4);
    }

    #[test]
    fn test_tablet_layout_is_three_by_three_for_nine_streams() {
        let layout =
            compute_responsive_layout(9, 1194.0, 834.0, Platform::Ios, &GridOptions::default());
        assert_eq!((layout.grid.columns, layout.grid.rows), (3, 3));
        assert!(layout.fit.is_scored());
        assert_eq!(layout.device.map(|d| d.is_tablet), Some(true));
    }

    #[test]
    fn test_invalid_viewport_degrades_to_empty_grid() {
        let layout = compute_responsive_layout(3, 0.0, 812.0, Platform::Ios, &GridOptions::default());

        assert_eq!(layout.grid, GridDimensions::empty(8.0, 16.0));
        assert!(layout.screen.is_none());
        assert!(layout.tiles.is_empty());
        assert!(matches!(
            layout.fit,
            GridFit::BestEffort {
                reason: LayoutError::InvalidViewport { .. }
            }
        ));
    }

    #[test]
    fn test_zero_streams_lay_out_no_tiles_but_a_valid_grid() {
        let layout = compute_responsive_layout(0, 375.0, 812.0, Platform::Ios, &GridOptions::default());
        assert_eq!((layout.grid.columns, layout.grid.rows), (1, 1));
        assert_eq!(layout.tile_count, 0);
        assert!(layout.tiles.is_empty());
    }

    #[test]
    fn test_tile_count_is_clamped_to_max_streams() {
        let layout = compute_responsive_layout(14, 1920.0, 1080.0, Platform::Web, &GridOptions::default());
        assert_eq!(layout.tile_count, 9);
        assert_eq!(layout.tiles.len(), 9);
    }

    #[test]
    fn test_max_u32_streams_and_max_streams_are_clamped_to_ceiling() {
        // Arrange
        let options = GridOptions {
            max_streams: u32::MAX,
            ..GridOptions::default()
        };

        // Act
        let layout = compute_responsive_layout(u32::MAX, 1920.0, 1080.0, Platform::Web, &options);

        // Assert
        assert_eq!(layout.tile_count, MAX_STREAMS_CEILING);
        assert_eq!(layout.tiles.len() as u32, MAX_STREAMS_CEILING);
        assert!(layout.grid.columns * layout.grid.rows >= MAX_STREAMS_CEILING);
    }

    #[test]
    fn test_layout_serializes_with_camel_case_keys() {
        let layout = compute_responsive_layout(2, 812.0, 375.0, Platform::Android, &GridOptions::default());
        let json = serde_json::to_value(&layout).expect("serialize");

        assert_eq!(json["grid"]["columns"], 2);
        assert!(json["grid"].get("cellWidth").is_some());
        assert_eq!(json["device"]["platform"], "android");
        assert_eq!(json["fit"]["status"], "scored");
    }
}
