//! Application layer: turns a viewport and a stream count into one layout.
//!
//! - **`compute_layout`** – the end-to-end pipeline (classify, derive spacing,
//!   score) producing a [`ResponsiveLayout`].
//! - **`viewport`** – the [`ViewportSource`] port through which the current
//!   screen size is read, plus a fixed implementation for tests and the CLI.
//! - **`engine`** – [`LayoutEngine`], which owns the options and skips
//!   recomputation when neither the viewport nor the stream count changed.

pub mod compute_layout;
pub mod engine;
pub mod viewport;

pub use compute_layout::{compute_responsive_layout, compute_responsive_layout_with, ResponsiveLayout};
pub use engine::LayoutEngine;
pub use viewport::{FixedViewport, Viewport, ViewportError, ViewportSource};
