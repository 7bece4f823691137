//! Responsive padding and gap.
//!
//! Spacing scales with the screen-size bucket and gets an extra boost on
//! tablets, where thumbs sit further from the content.

use serde::{Deserialize, Serialize};

use super::device::{DeviceInfo, ScreenSize};

/// Base padding before scaling.
pub const DEFAULT_PADDING: f64 = 16.0;
/// Base gap before scaling.
pub const DEFAULT_GAP: f64 = 8.0;

/// Scale factors applied to base spacing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingScale {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
    pub xlarge: f64,
    /// Extra factor on top of the bucket factor for tablets.
    pub tablet: f64,
}

impl Default for SpacingScale {
    fn default() -> Self {
        Self {
            small: 0.75,
            medium: 1.0,
            large: 1.25,
            xlarge: 1.5,
            tablet: 1.2,
        }
    }
}

impl SpacingScale {
    /// Combined factor for a device.
    pub fn factor(&self, device: &DeviceInfo) -> f64 {
        let bucket = match device.screen_size {
            ScreenSize::Small => self.small,
            ScreenSize::Medium => self.medium,
            ScreenSize::Large => self.large,
            ScreenSize::XLarge => self.xlarge,
        };
        if device.is_tablet {
            bucket * self.tablet
        } else {
            bucket
        }
    }

    /// Scales `base` for `device`, rounded to whole pixels and never negative.
    pub fn scale(&self, device: &DeviceInfo, base: f64) -> f64 {
        (base * self.factor(device)).round().max(0.0)
    }
}

/// Padding around the grid for `device`, using the default scale table.
pub fn padding(device: &DeviceInfo, base: f64) -> f64 {
    padding_with(&SpacingScale::default(), device, base)
}

/// Gap between tiles for `device`, using the default scale table.
pub fn gap(device: &DeviceInfo, base: f64) -> f64 {
    gap_with(&SpacingScale::default(), device, base)
}

/// Padding around the grid for `device` with an explicit scale table.
pub fn padding_with(scale: &SpacingScale, device: &DeviceInfo, base: f64) -> f64 {
    scale.scale(device, base)
}

/// Gap between tiles for `device` with an explicit scale table.
pub fn gap_with(scale: &SpacingScale, device: &DeviceInfo, base: f64) -> f64 {
    scale.scale(device, base)
}
