//! Stateful front end over the pure layout pipeline.
//!
//! A UI calls the engine on every layout pass.  Most passes change neither the
//! viewport nor the stream count, so [`LayoutEngine`] keeps the last request and
//! its result and hands the result back unchanged when the inputs match.

use tracing::debug;

use crate::domain::options::GridOptions;
use crate::domain::spacing::SpacingScale;
use crate::domain::suggestions::{suggest, ContentType, LayoutSuggestion};

use super::compute_layout::{compute_responsive_layout_with, ResponsiveLayout};
use super::viewport::{Viewport, ViewportError, ViewportSource};

/// Inputs of the last computation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LayoutRequest {
    stream_count: u32,
    viewport: Viewport,
}

/// Owns the layout options and remembers the most recent layout.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: GridOptions,
    spacing: SpacingScale,
    last: Option<(LayoutRequest, ResponsiveLayout)>,
}

impl LayoutEngine {
    /// Creates an engine with the given options and the default spacing scale.
    pub fn new(options: GridOptions) -> Self {
        Self::with_spacing(options, SpacingScale::default())
    }

    /// Creates an engine with explicit options and spacing scale.
    pub fn with_spacing(options: GridOptions, spacing: SpacingScale) -> Self {
        Self {
            options,
            spacing,
            last: None,
        }
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Replaces the options and forgets the cached layout.
    pub fn set_options(&mut self, options: GridOptions) {
        self.options = options;
        self.last = None;
    }

    /// Replaces the spacing scale and forgets the cached layout.
    pub fn set_spacing(&mut self, spacing: SpacingScale) {
        self.spacing = spacing;
        self.last = None;
    }

    /// Returns the layout for `stream_count` streams on `viewport`, reusing the
    /// previous result when both inputs are unchanged.
    pub fn layout(&mut self, stream_count: u32, viewport: Viewport) -> &ResponsiveLayout {
        let request = LayoutRequest {
            stream_count,
            viewport,
        };

        let cached = matches!(&self.last, Some((last, _)) if *last == request);
        if cached {
            debug!(stream_count, "layout inputs unchanged; reusing previous layout");
        } else {
            self.last = None;
        }

        let (options, spacing) = (&self.options, &self.spacing);
        let (_, layout) = self.last.get_or_insert_with(|| {
            let layout = compute_responsive_layout_with(
                stream_count,
                viewport.width,
                viewport.height,
                viewport.platform,
                options,
                spacing,
            );
            (request, layout)
        });
        layout
    }

    /// Reads the viewport from `source` and returns the layout for it.
    ///
    /// # Errors
    ///
    /// Propagates [`ViewportError`] from the source; the cached layout is kept.
    pub fn refresh(
        &mut self,
        source: &dyn ViewportSource,
        stream_count: u32,
    ) -> Result<&ResponsiveLayout, ViewportError> {
        let viewport = source.viewport()?;
        Ok(self.layout(stream_count, viewport))
    }

    /// Returns the most recent layout, if any.
    pub fn last_layout(&self) -> Option<&ResponsiveLayout> {
        self.last.as_ref().map(|(_, layout)| layout)
    }

    /// Suggestions for the device seen by the most recent layout.
    ///
    /// Returns `None` before the first layout or when the last viewport was
    /// invalid.
    pub fn suggestions(&self, stream_count: u32, content_type: ContentType) -> Option<Vec<LayoutSuggestion>> {
        let device = self.last_layout()?.device?;
        Some(suggest(stream_count, content_type, &device))
    }
}
