//! Render geometry and environment-driven options.

use crate::domain::LocationMode;
use crate::error::{RemitError, RemitResult};
use std::env;

/// Environment variable selecting the location output mode.
pub const LOCATION_MODE_ENV: &str = "REMITFORM_LOCATION_MODE";

/// A4 in points.
pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Page margins in points.
///
/// `top` is the baseline of the first element on every page, not the edge
/// of a printable box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 30.0,
            bottom: 30.0,
            left: 30.0,
        }
    }
}

/// Geometry and typography shared by every layout plan.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Size of pages the service creates; layout follows the surface's own size
    pub page_width: f32,
    pub page_height: f32,
    pub margins: Margins,
    /// Vertical advance of a single-line field
    pub base_gap: f32,
    /// Extra advance per additional wrapped line
    pub wrap_gap: f32,
    /// Height of the filled section band
    pub band_height: f32,
    /// Vertical space a section band consumes
    pub band_advance: f32,
    /// Blank space above every section band except the first
    pub section_spacing: f32,
    /// Vertical space taken by the title row on the first page
    pub title_advance: f32,
    pub font_size: f32,
    pub header_font_size: f32,
    pub title_font_size: f32,
    pub note_font_size: f32,
    pub shrink_step: f32,
    pub shrink_floor: f32,
    pub label_indent: f32,
    pub value_indent: f32,
    /// Gap between the underline end and the right margin
    pub right_inset: f32,
    pub min_wrap_width: f32,
    pub box_height: f32,
    pub choice_box_size: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH_PT,
            page_height: A4_HEIGHT_PT,
            margins: Margins::default(),
            base_gap: 18.0,
            wrap_gap: 14.0,
            band_height: 18.0,
            band_advance: 25.0,
            section_spacing: 6.0,
            title_advance: 30.0,
            font_size: 9.0,
            header_font_size: 9.0,
            title_font_size: 12.0,
            note_font_size: 7.0,
            shrink_step: 0.5,
            shrink_floor: 7.0,
            label_indent: 10.0,
            value_indent: 5.0,
            right_inset: 12.0,
            min_wrap_width: 10.0,
            box_height: 35.0,
            choice_box_size: 8.0,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the single-line advance and the per-wrapped-line advance.
    pub fn with_line_gaps(mut self, base_gap: f32, wrap_gap: f32) -> Self {
        self.base_gap = base_gap;
        self.wrap_gap = wrap_gap;
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Sets the shrink-to-fit decrement and minimum size.
    pub fn with_shrink(mut self, step: f32, floor: f32) -> Self {
        self.shrink_step = step;
        self.shrink_floor = floor;
        self
    }

    /// Lowest baseline an element may reach before a page break.
    pub fn bottom_limit(&self) -> f32 {
        self.page_height - self.margins.bottom
    }

    /// Rejects geometry the engine cannot lay out.
    pub fn validate(&self) -> RemitResult<()> {
        let positive = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("base_gap", self.base_gap),
            ("font_size", self.font_size),
            ("shrink_step", self.shrink_step),
            ("shrink_floor", self.shrink_floor),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(RemitError::InvalidInput {
                    parameter: name.to_string(),
                    reason: format!("must be positive, got {value}"),
                });
            }
        }
        if self.margins.top >= self.bottom_limit() {
            return Err(RemitError::InvalidInput {
                parameter: "margins".to_string(),
                reason: "top and bottom margins leave no vertical space".to_string(),
            });
        }
        if self.margins.left + self.margins.right >= self.page_width {
            return Err(RemitError::InvalidInput {
                parameter: "margins".to_string(),
                reason: "left and right margins leave no horizontal space".to_string(),
            });
        }
        if self.shrink_floor > self.font_size {
            return Err(RemitError::InvalidInput {
                parameter: "shrink_floor".to_string(),
                reason: "floor is larger than the default font size".to_string(),
            });
        }
        Ok(())
    }
}

/// Options for location canonicalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationOptions {
    pub mode: LocationMode,
}

impl LocationOptions {
    pub fn new(mode: LocationMode) -> Self {
        Self { mode }
    }

    /// Reads `REMITFORM_LOCATION_MODE`; unset or unrecognized values fall back to English.
    pub fn from_env() -> Self {
        let mode = match env::var(LOCATION_MODE_ENV) {
            Ok(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!("{LOCATION_MODE_ENV}: {err}; using English");
                LocationMode::En
            }),
            Err(_) => LocationMode::En,
        };
        Self { mode }
    }

    /// An explicit mode wins over the environment.
    pub fn with_override(self, mode: Option<LocationMode>) -> Self {
        match mode {
            Some(mode) => Self { mode },
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_is_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bottom_limit(), A4_HEIGHT_PT - 30.0);
    }

    #[test]
    fn test_builder_overrides() {
        let config = RenderConfig::new()
            .with_page_size(300.0, 400.0)
            .with_line_gaps(20.0, 12.0)
            .with_shrink(1.0, 6.0);
        assert_eq!(config.page_height, 400.0);
        assert_eq!(config.wrap_gap, 12.0);
        assert_eq!(config.shrink_floor, 6.0);
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let config = RenderConfig::new().with_page_size(595.0, 60.0);
        assert!(matches!(
            config.validate(),
            Err(RemitError::InvalidInput { .. })
        ));

        let config = RenderConfig::new().with_shrink(0.5, 12.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_location_override() {
        let options = LocationOptions::new(LocationMode::En).with_override(Some(LocationMode::Zh));
        assert_eq!(options.mode, LocationMode::Zh);
        assert_eq!(options.with_override(None).mode, LocationMode::Zh);
    }
}
