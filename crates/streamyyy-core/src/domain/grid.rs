//! Grid scorer: picks rows, columns and tile size for a number of streams.
//!
//! The scorer enumerates a small set of candidate column counts, derives the
//! row count and the largest tile of the target aspect ratio that fits each
//! candidate, rejects candidates whose tiles fall below the minimum size, and
//! keeps the best-scoring survivor.
//!
//! # Scoring
//!
//! ```text
//! score = aspect × utilisation × size × device multiplier
//!
//! aspect      = min(cell_aspect / target, target / cell_aspect)      (≤ 1.0)
//! utilisation = grid footprint incl. gaps / available area          (≤ 1.0)
//! size        = one tile's area / available area                    (≤ 1.0)
//! ```
//!
//! Every candidate tile is sized at exactly the target aspect ratio, so the
//! aspect term is always 1.0 for the built-in sizing.  It stays in the formula
//! so a tile that is not at the target shape is still penalised, and the score
//! is effectively `utilisation × size × device multiplier`.
//!
//! Candidates are visited in ascending column order and only a strictly
//! higher score replaces the current best, so ties go to fewer columns.
//!
//! # Failure policy
//!
//! The result feeds the render path, so [`compute_grid`] never fails.  When no
//! candidate keeps tiles above the minimum size, the candidate with the largest
//! tiles is returned instead and [`GridFit::BestEffort`] records why.

use serde::Serialize;
use tracing::{debug, warn};

use super::device::{DeviceInfo, ScreenDimensions, ScreenSize};
use super::error::LayoutError;
use super::options::{DevicePreferences, GridOptions};

/// Multiplier applied to the tile count before taking the square root that
/// bounds the column search.
const COLUMN_SEARCH_FACTOR: f64 = 1.5;

/// Rows, columns and tile size chosen for a set of streams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDimensions {
    pub columns: u32,
    pub rows: u32,
    /// Tile width, floored to whole pixels.
    pub cell_width: u32,
    /// Tile height, floored to whole pixels.
    pub cell_height: u32,
    pub gap: f64,
    pub padding: f64,
    /// `columns * rows`.
    pub max_cells: u32,
}

/// A tile's rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileRegion {
    /// Zero-based position in row-major order.
    pub index: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TileRegion {
    /// Returns the rightmost X coordinate (exclusive).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottommost Y coordinate (exclusive).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns `true` if this tile shares any area with `other`.
    pub fn overlaps(&self, other: &TileRegion) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

impl GridDimensions {
    /// Degenerate single-tile grid with zero-sized cells.
    pub fn empty(gap: f64, padding: f64) -> Self {
        Self {
            columns: 1,
            rows: 1,
            cell_width: 0,
            cell_height: 0,
            gap,
            padding,
            max_cells: 1,
        }
    }

    /// Width of the whole grid including gaps.
    pub fn content_width(&self) -> f64 {
        f64::from(self.columns) * f64::from(self.cell_width)
            + f64::from(self.columns.saturating_sub(1)) * self.gap
    }

    /// Height of the whole grid including gaps.
    pub fn content_height(&self) -> f64 {
        f64::from(self.rows) * f64::from(self.cell_height)
            + f64::from(self.rows.saturating_sub(1)) * self.gap
    }

    /// Lays out `tiles` tiles in row-major order.
    ///
    /// The grid is centred horizontally inside the padded viewport width and
    /// starts `padding` below `top_offset` (normally the header height).  At
    /// most [`GridDimensions::max_cells`] regions are returned.
    pub fn tile_regions(&self, viewport_width: f64, top_offset: f64, tiles: u32) -> Vec<TileRegion> {
        let inner_width = (viewport_width - 2.0 * self.padding).max(0.0);
        let left = self.padding + ((inner_width - self.content_width()).max(0.0) / 2.0);
        let top = top_offset.max(0.0) + self.padding;
        let step_x = f64::from(self.cell_width) + self.gap;
        let step_y = f64::from(self.cell_height) + self.gap;

        (0..tiles.min(self.max_cells))
            .map(|index| {
                let col = index % self.columns;
                let row = index / self.columns;
                TileRegion {
                    index,
                    x: (left + f64::from(col) * step_x).floor() as u32,
                    y: (top + f64::from(row) * step_y).floor() as u32,
                    width: self.cell_width,
                    height: self.cell_height,
                }
            })
            .collect()
    }
}

/// How the chosen grid relates to the constraints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GridFit {
    /// A candidate met the minimum tile size; `score` is its composite score.
    Scored { score: f64 },
    /// No candidate met the constraints; the grid is the least-bad option.
    BestEffort { reason: LayoutError },
}

impl GridFit {
    /// Returns `true` when the grid satisfies every constraint.
    pub fn is_scored(&self) -> bool {
        matches!(self, GridFit::Scored { .. })
    }
}

/// A chosen grid plus the diagnostic describing how it was chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSelection {
    pub grid: GridDimensions,
    pub fit: GridFit,
}

/// One entry of the column search with its continuous (unfloored) tile size.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    columns: u32,
    rows: u32,
    cell_width: f64,
    cell_height: f64,
}

impl Candidate {
    /// Sizes the largest `aspect`-shaped tile that fits one column and one row.
    fn size(columns: u32, rows: u32, available_width: f64, available_height: f64, opts: &GridOptions) -> Self {
        let column_width =
            (available_width - f64::from(columns - 1) * opts.gap) / f64::from(columns);
        let row_height = (available_height - f64::from(rows - 1) * opts.gap) / f64::from(rows);

        let (mut cell_width, mut cell_height) = (0.0, 0.0);
        if column_width > 0.0 && row_height > 0.0 {
            cell_width = column_width;
            cell_height = column_width / opts.aspect_ratio;
            if cell_height > row_height {
                cell_height = row_height;
                cell_width = row_height * opts.aspect_ratio;
            }
        }

        Self {
            columns,
            rows,
            cell_width,
            cell_height,
        }
    }

    fn area(&self) -> f64 {
        self.cell_width * self.cell_height
    }

    fn meets_minimum(&self, opts: &GridOptions) -> bool {
        self.cell_width > 0.0
            && self.cell_height > 0.0
            && self.cell_width >= opts.min_cell_width
            && self.cell_height >= opts.min_cell_height
    }

    fn score(
        &self,
        available_width: f64,
        available_height: f64,
        tiles: u32,
        device: &DeviceInfo,
        opts: &GridOptions,
    ) -> f64 {
        let available_area = available_width * available_height;

        let cell_aspect = self.cell_width / self.cell_height;
        let aspect_score = (cell_aspect / opts.aspect_ratio).min(opts.aspect_ratio / cell_aspect);

        let used_width = f64::from(self.columns) * self.cell_width
            + f64::from(self.columns - 1) * opts.gap;
        let used_height =
            f64::from(self.rows) * self.cell_height + f64::from(self.rows - 1) * opts.gap;
        let utilisation = (used_width * used_height) / available_area;

        let size_score = self.area() / available_area;

        let multiplier = device_multiplier(&opts.preferences, device, tiles, self.columns, self.rows);

        aspect_score * utilisation * size_score * multiplier
    }

    fn into_grid(self, opts: &GridOptions) -> GridDimensions {
        GridDimensions {
            columns: self.columns,
            rows: self.rows,
            cell_width: self.cell_width.max(0.0).floor() as u32,
            cell_height: self.cell_height.max(0.0).floor() as u32,
            gap: opts.gap,
            padding: opts.padding,
            max_cells: self.columns * self.rows,
        }
    }
}

/// Device-class bias for a `columns × rows` grid holding `tiles` tiles.
fn device_multiplier(
    prefs: &DevicePreferences,
    device: &DeviceInfo,
    tiles: u32,
    columns: u32,
    rows: u32,
) -> f64 {
    let mut multiplier = 1.0;

    if device.is_tablet {
        multiplier *= if columns > rows {
            prefs.tablet_wide
        } else {
            prefs.tablet_tall
        };
    } else if device.is_phone {
        if tiles <= 2 && (columns == 1 || rows == 1) {
            multiplier *= prefs.phone_strip;
        } else if tiles <= 4 && columns <= 2 && rows <= 2 {
            multiplier *= prefs.phone_compact;
        } else if tiles <= 4 && rows > 2 && !device.is_landscape {
            multiplier *= prefs.phone_tall_stack;
        }
    }

    match device.screen_size {
        ScreenSize::Small if columns.saturating_mul(rows) <= 4 => multiplier *= prefs.small_screen_simple,
        ScreenSize::Large | ScreenSize::XLarge if columns >= 3 => {
            multiplier *= prefs.large_screen_rich
        }
        _ => {}
    }

    multiplier
}

/// Number of tiles actually laid out: `stream_count` clamped to
/// `max_streams`, and never less than one.
pub fn effective_stream_count(stream_count: u32, opts: &GridOptions) -> u32 {
    stream_count.min(opts.max_streams).max(1)
}

/// Chooses the grid for `stream_count` streams.
///
/// Never fails; see [`score_grid`] for the diagnostic variant.
pub fn compute_grid(
    stream_count: u32,
    screen: &ScreenDimensions,
    device: &DeviceInfo,
    options: &GridOptions,
) -> GridDimensions {
    score_grid(stream_count, screen, device, options).grid
}

/// Chooses the grid for `stream_count` streams and reports how well it fits.
///
/// A `stream_count` of zero is laid out as a single tile so downstream code
/// never divides by zero.  Counts above `options.max_streams` are clamped.
pub fn score_grid(
    stream_count: u32,
    screen: &ScreenDimensions,
    device: &DeviceInfo,
    options: &GridOptions,
) -> GridSelection {
    let opts = options.sanitized();
    let tiles = effective_stream_count(stream_count, &opts);

    let available_width = screen.width - 2.0 * opts.padding;
    let available_height =
        screen.height - opts.header_height - opts.footer_height - 2.0 * opts.padding;

    let max_columns = ((f64::from(tiles) * COLUMN_SEARCH_FACTOR).sqrt().ceil() as u32)
        .clamp(1, tiles);

    let mut best: Option<(Candidate, f64)> = None;
    let mut least_bad: Option<Candidate> = None;

    for columns in 1..=max_columns {
        let rows = tiles.div_ceil(columns);
        if columns.saturating_mul(rows) < tiles {
            continue;
        }

        let candidate = Candidate::size(columns, rows, available_width, available_height, &opts);

        if !candidate.meets_minimum(&opts) {
            debug!(
                columns,
                rows,
                cell_width = candidate.cell_width,
                cell_height = candidate.cell_height,
                "grid candidate below minimum tile size"
            );
            if least_bad.map_or(true, |lb| candidate.area() > lb.area()) {
                least_bad = Some(candidate);
            }
            continue;
        }

        let score = candidate.score(available_width, available_height, tiles, device, &opts);
        debug!(columns, rows, score, "grid candidate scored");

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    if let Some((candidate, score)) = best {
        return GridSelection {
            grid: candidate.into_grid(&opts),
            fit: GridFit::Scored { score },
        };
    }

    let reason = if available_width <= 0.0 || available_height <= 0.0 {
        LayoutError::NoAvailableSpace {
            available_width,
            available_height,
        }
    } else {
        LayoutError::CellsBelowMinimum {
            min_cell_width: opts.min_cell_width,
            min_cell_height: opts.min_cell_height,
        }
    };
    warn!(
        stream_count,
        width = screen.width,
        height = screen.height,
        "no grid satisfies the layout constraints: {reason}"
    );

    // `least_bad` is always set here: the column search visits at least one
    // candidate and every candidate that is not `best` lands in `least_bad`.
    let grid = least_bad
        .map(|candidate| candidate.into_grid(&opts))
        .unwrap_or_else(|| GridDimensions::empty(opts.gap, opts.padding));

    GridSelection {
        grid,
        fit: GridFit::BestEffort { reason },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::device::{classify_for, Platform};
    use crate::domain::options::MAX_STREAMS_CEILING;

    fn grid_for(streams: u32, width: f64, height: f64) -> GridSelection {
        let (screen, device) = classify_for(Platform::Ios, width, height).unwrap();
        score_grid(streams, &screen, &device, &GridOptions::default())
    }

    // ── Scenarios ─────────────────────────────────────────────────────────────

    #[test]
    fn test_single_stream_on_phone_fills_width() {
        // Available: 343 x 560.  343 / (16/9) = 192.9
        let selection = grid_for(1, 375.0, 812.0);

        assert_eq!((selection.grid.columns, selection.grid.rows), (1, 1));
        assert_eq!(selection.grid.cell_width, 343);
        assert_eq!(selection.grid.cell_height, 192);
        assert!(selection.fit.is_scored());
    }

    #[test]
    fn test_single_stream_on_landscape_phone_is_one_by_one() {
        let selection = grid_for(1, 812.0, 375.0);
        assert_eq!((selection.grid.columns, selection.grid.rows), (1, 1));
        // Height-bound: available height 123, width 123 * 16/9 = 218.7
        assert_eq!(selection.grid.cell_height, 123);
        assert_eq!(selection.grid.cell_width, 218);
    }

    #[test]
    fn test_four_streams_on_phone_portrait_is_two_by_two() {
        let selection = grid_for(4, 375.0, 812.0);

        assert_eq!((selection.grid.columns, selection.grid.rows), (2, 2));
        // (343 - 8) / 2 = 167.5 wide, 167.5 / (16/9) = 94.2 tall
        assert_eq!(selection.grid.cell_width, 167);
        assert_eq!(selection.grid.cell_height, 94);
        assert_eq!(selection.grid.max_cells, 4);
    }

    #[test]
    fn test_nine_streams_on_tablet_landscape_is_three_by_three() {
        let selection = grid_for(9, 1194.0, 834.0);

        assert_eq!((selection.grid.columns, selection.grid.rows), (3, 3));
        assert!(selection.grid.cell_width >= 120);
        assert!(selection.grid.cell_height >= 68);
        assert_eq!(selection.grid.cell_width, 335);
        assert_eq!(selection.grid.cell_height, 188);
    }

    #[test]
    fn test_ten_streams_clamp_to_max_streams() {
        let ten = grid_for(10, 1194.0, 834.0);
        let nine = grid_for(9, 1194.0, 834.0);

        assert_eq!(ten.grid, nine.grid);
        assert!(ten.grid.max_cells >= 9);
    }

    #[test]
    fn test_two_streams_on_phone_portrait_stack_vertically() {
        let selection = grid_for(2, 375.0, 812.0);
        assert_eq!((selection.grid.columns, selection.grid.rows), (1, 2));
    }

    #[test]
    fn test_two_streams_on_phone_landscape_sit_side_by_side() {
        let selection = grid_for(2, 812.0, 375.0);
        assert_eq!((selection.grid.columns, selection.grid.rows), (2, 1));
    }

    // ── Edge cases ────────────────────────────────────────────────────────────

    #[test]
    fn test_zero_streams_yield_single_tile() {
        let selection = grid_for(0, 375.0, 812.0);
        assert_eq!((selection.grid.columns, selection.grid.rows), (1, 1));
        assert_eq!(selection.grid.max_cells, 1);
        assert!(selection.grid.cell_width > 0);
    }

    #[test]
    fn test_narrow_viewport_falls_back_without_panicking() {
        // Available width 68 is below the 120 minimum for every candidate.
        let selection = grid_for(4, 100.0, 800.0);

        assert!(matches!(
            selection.fit,
            GridFit::BestEffort {
                reason: LayoutError::CellsBelowMinimum { .. }
            }
        ));
        assert!(selection.grid.columns * selection.grid.rows >= 4);
    }

    #[test]
    fn test_fallback_picks_candidate_with_largest_tiles() {
        // Landscape phone with four streams: nothing reaches 68px tall.
        let selection = grid_for(4, 812.0, 375.0);

        assert!(!selection.fit.is_scored());
        // 2x2 and 3x2 both give 57.5px-tall tiles and 1x4 is smaller; the tie
        // goes to fewer columns.
        assert_eq!((selection.grid.columns, selection.grid.rows), (2, 2));
        assert_eq!(selection.grid.cell_height, 57);
    }

    #[test]
    fn test_chrome_taller_than_viewport_reports_no_space() {
        // 200 tall minus 220 of header/footer leaves nothing.
        let selection = grid_for(3, 375.0, 200.0);

        assert!(matches!(
            selection.fit,
            GridFit::BestEffort {
                reason: LayoutError::NoAvailableSpace { .. }
            }
        ));
        assert_eq!(selection.grid.cell_width, 0);
        assert_eq!(selection.grid.cell_height, 0);
        assert!(selection.grid.columns * selection.grid.rows >= 3);
    }

    #[test]
    fn test_compute_grid_is_deterministic() {
        let (screen, device) = classify_for(Platform::Android, 1080.0, 2340.0).unwrap();
        let opts = GridOptions::default();
        let a = compute_grid(7, &screen, &device, &opts);
        let b = compute_grid(7, &screen, &device, &opts);
        assert_eq!(a, b);
    }

    #[test]
    fn test_output_echoes_spacing_options() {
        let (screen, device) = classify_for(Platform::Web, 1920.0, 1080.0).unwrap();
        let opts = GridOptions {
            padding: 24.0,
            gap: 12.0,
            ..GridOptions::default()
        };
        let grid = compute_grid(4, &screen, &device, &opts);
        assert_eq!(grid.padding, 24.0);
        assert_eq!(grid.gap, 12.0);
    }

    #[test]
    fn test_never_more_columns_than_tiles() {
        for streams in 1..=9 {
            let selection = grid_for(streams, 1920.0, 1080.0);
            assert!(selection.grid.columns <= streams);
        }
    }

    // ── device_multiplier ─────────────────────────────────────────────────────

    #[test]
    fn test_tablet_prefers_wide_grids() {
        let (_, device) = classify_for(Platform::Ios, 1194.0, 834.0).unwrap();
        let prefs = DevicePreferences::default();
        let wide = device_multiplier(&prefs, &device, 6, 3, 2);
        let tall = device_multiplier(&prefs, &device, 6, 2, 3);
        assert!(wide > tall);
    }

    #[test]
    fn test_phone_discourages_tall_stack_in_portrait_only() {
        let prefs = DevicePreferences::default();
        let (_, portrait) = classify_for(Platform::Ios, 375.0, 812.0).unwrap();
        let (_, landscape) = classify_for(Platform::Ios, 812.0, 375.0).unwrap();

        assert!(device_multiplier(&prefs, &portrait, 4, 1, 4) < 1.0);
        assert_eq!(device_multiplier(&prefs, &landscape, 4, 1, 4), 1.0);
    }

    #[test]
    fn test_neutral_preferences_leave_multiplier_at_one() {
        let prefs = DevicePreferences::neutral();
        let (_, device) = classify_for(Platform::Ios, 375.0, 812.0).unwrap();
        assert_eq!(device_multiplier(&prefs, &device, 4, 2, 2), 1.0);
    }

    // ── TileRegion / tile_regions ─────────────────────────────────────────────

    #[test]
    fn test_tile_region_does_not_overlap_when_adjacent() {
        let a = TileRegion { index: 0, x: 0, y: 0, width: 100, height: 56 };
        let b = TileRegion { index: 1, x: 100, y: 0, width: 100, height: 56 };
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_tile_region_overlaps_when_sharing_area() {
        let a = TileRegion { index: 0, x: 0, y: 0, width: 100, height: 56 };
        let b = TileRegion { index: 1, x: 50, y: 20, width: 100, height: 56 };
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_tile_regions_are_row_major_and_disjoint() {
        // Arrange
        let grid = grid_for(4, 375.0, 812.0).grid;

        // Act
        let tiles = grid.tile_regions(375.0, 120.0, 4);

        // Assert
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0].y, tiles[1].y, "first two tiles share a row");
        assert!(tiles[2].y > tiles[0].y, "third tile starts a new row");
        for (i, a) in tiles.iter().enumerate() {
            for b in &tiles[i + 1..] {
                assert!(!a.overlaps(b), "tiles {} and {} overlap", a.index, b.index);
            }
        }
    }

    #[test]
    fn test_tile_regions_start_below_header_and_inside_padding() {
        let grid = grid_for(1, 375.0, 812.0).grid;
        let tiles = grid.tile_regions(375.0, 120.0, 1);

        assert_eq!(tiles[0].y, 136);
        assert_eq!(tiles[0].x, 16);
        assert!(tiles[0].right() <= 375 - 16);
    }

    #[test]
    fn test_tile_regions_never_exceed_max_cells() {
        let grid = grid_for(4, 375.0, 812.0).grid;
        assert_eq!(grid.tile_regions(375.0, 120.0, 12).len(), 4);
    }

    #[test]
    fn test_candidate_score_has_no_aspect_penalty() {
        // Arrange
        let (screen, device) = classify_for(Platform::Ios, 1194.0, 834.0).unwrap();
        let opts = GridOptions::default();
        let available_width = screen.width - 2.0 * opts.padding;
        let available_height =
            screen.height - opts.header_height - opts.footer_height - 2.0 * opts.padding;
        let candidate = Candidate::size(3, 3, available_width, available_height, &opts);

        // Act
        let score = candidate.score(available_width, available_height, 9, &device, &opts);

        // Assert: tiles are sized at the target shape, so only utilisation,
        // size and the device multiplier contribute.
        assert!((candidate.cell_width / candidate.cell_height - opts.aspect_ratio).abs() < 1e-9);
        let area = available_width * available_height;
        let used_width = 3.0 * candidate.cell_width + 2.0 * opts.gap;
        let used_height = 3.0 * candidate.cell_height + 2.0 * opts.gap;
        let utilisation = used_width * used_height / area;
        let size = candidate.area() / area;
        let multiplier = device_multiplier(&opts.preferences, &device, 9, 3, 3);
        assert!((score - utilisation * size * multiplier).abs() < 1e-12);
    }

    #[test]
    fn test_huge_stream_count_and_max_streams_do_not_overflow() {
        let (screen, device) = classify_for(Platform::Web, 1920.0, 1080.0).unwrap();
        let opts = GridOptions {
            max_streams: u32::MAX,
            ..GridOptions::default()
        };

        let selection = score_grid(u32::MAX, &screen, &device, &opts);

        assert!(selection.grid.max_cells >= MAX_STREAMS_CEILING);
        assert!(selection.grid.columns <= MAX_STREAMS_CEILING);
    }
}
