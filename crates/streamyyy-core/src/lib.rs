//! # streamyyy-core
//!
//! Layout engine behind the Streamyyy multi-stream viewer.  Given how many
//! live streams the user wants to watch and the size of the screen, it decides
//! how many rows and columns to use and how large each video tile should be.
//!
//! The crate has zero dependencies on OS APIs, UI frameworks, or network
//! sockets: every function is pure and cheap enough to call on every layout
//! pass of the rendering layer.
//!
//! # Architecture overview
//!
//! - **`domain`** – The layout rules themselves.  Device classification
//!   (`device`), the grid scorer (`grid`), responsive spacing (`spacing`),
//!   canned layout suggestions (`suggestions`), and the tunable option tables
//!   (`options`).
//!
//! - **`application`** – Wires the domain pieces together into a single
//!   [`ResponsiveLayout`] result and provides [`LayoutEngine`], which remembers
//!   the last computation and reads the viewport through the
//!   [`ViewportSource`] port.
//!
//! ```text
//! stream count + viewport
//!        │
//!        ▼
//!  device::classify ──► spacing::{padding, gap} ──► grid::score_grid
//!        │                                              │
//!        └──────────────► ResponsiveLayout ◄────────────┘
//! ```

pub mod application;
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `streamyyy_core::GridDimensions` instead of the full module path.
pub use application::{
    compute_responsive_layout, FixedViewport, LayoutEngine, ResponsiveLayout, Viewport,
    ViewportError, ViewportSource,
};
pub use domain::device::{classify, classify_for, DeviceInfo, Platform, ScreenDimensions, ScreenSize};
pub use domain::error::LayoutError;
pub use domain::grid::{compute_grid, score_grid, GridDimensions, GridFit, GridSelection, TileRegion};
pub use domain::options::{DevicePreferences, GridOptions};
pub use domain::spacing::SpacingScale;
pub use domain::suggestions::{suggest, ContentType, LayoutSuggestion};
