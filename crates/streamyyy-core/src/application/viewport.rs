//! Viewport port: where the current screen size comes from.
//!
//! The layout engine never asks the OS or a UI toolkit for the window size
//! directly.  Hosts implement [`ViewportSource`] on top of whatever they have
//! (a window-resize callback, a React Native bridge, command-line flags) and
//! hand it to [`crate::LayoutEngine::refresh`].
//!
//! [`FixedViewport`] is always compiled so tests and the CLI can use it
//! without a real display.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::device::Platform;

/// Error type for viewport reads.
#[derive(Debug, Error, PartialEq)]
pub enum ViewportError {
    /// The host could not report a viewport size, e.g. before the first
    /// window has been laid out.
    #[error("viewport unavailable: {0}")]
    Unavailable(String),
}

/// A viewport size and the platform it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub platform: Platform,
}

impl Viewport {
    pub fn new(width: f64, height: f64, platform: Platform) -> Self {
        Self {
            width,
            height,
            platform,
        }
    }
}

/// Reads the current viewport from the host.
pub trait ViewportSource: Send + Sync {
    /// Returns the current viewport.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::Unavailable`] if the host cannot report a size.
    fn viewport(&self) -> Result<Viewport, ViewportError>;
}

/// A viewport source that always reports the same size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewport {
    pub viewport: Viewport,
}

impl FixedViewport {
    pub fn new(width: f64, height: f64, platform: Platform) -> Self {
        Self {
            viewport: Viewport::new(width, height, platform),
        }
    }

    /// 375×812 iPhone in portrait.
    pub fn phone_portrait() -> Self {
        Self::new(375.0, 812.0, Platform::Ios)
    }

    /// 1194×834 iPad in landscape.
    pub fn tablet_landscape() -> Self {
        Self::new(1194.0, 834.0, Platform::Ios)
    }

    /// 1920×1080 browser window.
    pub fn desktop_1080p() -> Self {
        Self::new(1920.0, 1080.0, Platform::Web)
    }
}

impl ViewportSource for FixedViewport {
    /// Returns the viewport provided at construction time (never fails).
    fn viewport(&self) -> Result<Viewport, ViewportError> {
        Ok(self.viewport)
    }
}
