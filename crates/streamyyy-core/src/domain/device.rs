//! Device and screen classification.
//!
//! The grid scorer and the spacing calculator both bias their output by the
//! kind of device the viewer is running on.  This module turns a raw viewport
//! (width × height in density-independent pixels) into:
//!
//! - [`ScreenDimensions`] – the viewport itself plus orientation and aspect.
//! - [`DeviceInfo`] – phone / tablet / desktop flags and a [`ScreenSize`]
//!   bucket taken from fixed breakpoints.
//!
//! # Breakpoints
//!
//! Buckets are chosen by the *longer* side of the viewport, so rotating a
//! device never moves it into a different bucket:
//!
//! | Longer side     | Bucket   |
//! |-----------------|----------|
//! | ≤ 480           | `Small`  |
//! | ≤ 768           | `Medium` |
//! | ≤ 1024          | `Large`  |
//! | > 1024          | `XLarge` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::LayoutError;

/// Upper bound (inclusive) of the `Small` bucket.
pub const SMALL_BREAKPOINT: f64 = 480.0;
/// Upper bound (inclusive) of the `Medium` bucket.
pub const MEDIUM_BREAKPOINT: f64 = 768.0;
/// Upper bound (inclusive) of the `Large` bucket.
pub const LARGE_BREAKPOINT: f64 = 1024.0;

/// Minimum shorter side for a tablet.
pub const TABLET_MIN_SHORT_SIDE: f64 = 600.0;
/// Minimum longer side for a tablet.
pub const TABLET_MIN_LONG_SIDE: f64 = 900.0;

/// The platform the viewer runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    /// Browser and desktop builds.
    Web,
}

impl Platform {
    /// Returns the platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else {
            Platform::Web
        }
    }

    /// Lower-case name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Web => "web",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            "web" => Ok(Platform::Web),
            other => Err(format!("unknown platform '{other}' (expected ios, android or web)")),
        }
    }
}

/// Screen-size bucket derived from the longer viewport side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenSize {
    Small,
    Medium,
    Large,
    XLarge,
}

impl ScreenSize {
    /// Buckets a viewport by its longer side.  Boundaries belong to the lower
    /// bucket, so exactly 480 is `Small` and 481 is `Medium`.
    pub fn from_longest_side(longest: f64) -> Self {
        if longest <= SMALL_BREAKPOINT {
            ScreenSize::Small
        } else if longest <= MEDIUM_BREAKPOINT {
            ScreenSize::Medium
        } else if longest <= LARGE_BREAKPOINT {
            ScreenSize::Large
        } else {
            ScreenSize::XLarge
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScreenSize::Small => "small",
            ScreenSize::Medium => "medium",
            ScreenSize::Large => "large",
            ScreenSize::XLarge => "xlarge",
        }
    }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The viewport a layout is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenDimensions {
    pub width: f64,
    pub height: f64,
    pub is_landscape: bool,
    /// `width / height`.
    pub aspect_ratio: f64,
}

impl ScreenDimensions {
    /// Builds the dimensions for a viewport.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidViewport`] when either side is zero,
    /// negative, or not finite.
    pub fn new(width: f64, height: f64) -> Result<Self, LayoutError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(LayoutError::InvalidViewport { width, height });
        }
        Ok(Self {
            width,
            height,
            is_landscape: width > height,
            aspect_ratio: width / height,
        })
    }

    /// Returns the longer of the two sides.
    pub fn longest_side(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Returns the shorter of the two sides.
    pub fn shortest_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// Device class and screen bucket for a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub is_tablet: bool,
    pub is_phone: bool,
    pub is_desktop: bool,
    pub is_landscape: bool,
    pub screen_size: ScreenSize,
    pub platform: Platform,
}

impl DeviceInfo {
    /// Classifies already-validated screen dimensions.
    ///
    /// A tablet needs both a shorter side of at least 600 and a longer side of
    /// at least 900.  A desktop is a web build on an `XLarge` screen.  Anything
    /// that is neither is a phone.
    pub fn from_screen(screen: &ScreenDimensions, platform: Platform) -> Self {
        let screen_size = ScreenSize::from_longest_side(screen.longest_side());
        let is_tablet = screen.shortest_side() >= TABLET_MIN_SHORT_SIDE
            && screen.longest_side() >= TABLET_MIN_LONG_SIDE;
        let is_desktop = platform == Platform::Web && screen_size == ScreenSize::XLarge;

        Self {
            is_tablet,
            is_phone: !is_tablet && !is_desktop,
            is_desktop,
            is_landscape: screen.is_landscape,
            screen_size,
            platform,
        }
    }
}

/// Classifies a viewport on the platform this binary was built for.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidViewport`] for a zero, negative, or non-finite
/// width or height.
pub fn classify(width: f64, height: f64) -> Result<(ScreenDimensions, DeviceInfo), LayoutError> {
    classify_for(Platform::current(), width, height)
}

/// Classifies a viewport on an explicit platform.
///
/// # Errors
///
/// Same as [`classify`].
pub fn classify_for(
    platform: Platform,
    width: f64,
    height: f64,
) -> Result<(ScreenDimensions, DeviceInfo), LayoutError> {
    let screen = ScreenDimensions::new(width, height)?;
    let device = DeviceInfo::from_screen(&screen, platform);
    Ok((screen, device))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
