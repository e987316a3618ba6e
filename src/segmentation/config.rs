use crate::error::Error;

/// Radius of the fixed 3x3 erosion/dilation window.
pub const MORPHOLOGY_RADIUS: u32 = 1;

/// Largest accepted feather or density radius.
pub const MAX_WINDOW_RADIUS: u32 = 1024;

/// Tunable constants of the cutout pipeline
///
/// The defaults reproduce the reference behavior; changing them trades
/// subject recall against background leakage.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationConfig {
    /// Fraction of width and height covered by each background corner sample.
    pub corner_fraction: f32,
    /// Number of sequential region-growing passes.
    pub region_growth_passes: usize,
    /// Search radius of the edge feathering stage.
    pub feather_radius: u32,
    /// Confidence above which a pixel is roughened as subject.
    pub confidence_threshold: f32,
    /// Window radius of the edge-density field.
    pub density_radius: u32,
    /// Sobel magnitude above which a pixel counts toward edge density.
    pub density_edge_threshold: f32,
    /// Sobel magnitude above which a pixel is a strong edge.
    pub strong_edge_threshold: f32,
    /// Longest side the encoded-image entry point processes; larger images
    /// are downscaled first. `None` disables the cap.
    pub max_dimension: Option<u32>,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            corner_fraction: 0.15,
            region_growth_passes: 2,
            feather_radius: 2,
            confidence_threshold: 0.4,
            density_radius: 5,
            density_edge_threshold: 30.0,
            strong_edge_threshold: 40.0,
            max_dimension: Some(1200),
        }
    }
}

impl SegmentationConfig {
    #[must_use]
    pub const fn with_corner_fraction(mut self, corner_fraction: f32) -> Self {
        self.corner_fraction = corner_fraction;
        self
    }

    #[must_use]
    pub const fn with_region_growth_passes(mut self, passes: usize) -> Self {
        self.region_growth_passes = passes;
        self
    }

    #[must_use]
    pub const fn with_feather_radius(mut self, radius: u32) -> Self {
        self.feather_radius = radius;
        self
    }

    #[must_use]
    pub const fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_density_radius(mut self, radius: u32) -> Self {
        self.density_radius = radius;
        self
    }

    #[must_use]
    pub const fn with_edge_thresholds(mut self, density: f32, strong: f32) -> Self {
        self.density_edge_threshold = density;
        self.strong_edge_threshold = strong;
        self
    }

    #[must_use]
    pub const fn with_max_dimension(mut self, max_dimension: Option<u32>) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Checks every field against the range the pipeline accepts.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidParameter` - naming the first offending field
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.corner_fraction > 0.0 && self.corner_fraction <= 0.5) {
            return Err(Error::InvalidParameter(format!(
                "corner_fraction must be in (0, 0.5], got {}",
                self.corner_fraction
            )));
        }
        for (name, radius) in [
            ("feather_radius", self.feather_radius),
            ("density_radius", self.density_radius),
        ] {
            if !(1..=MAX_WINDOW_RADIUS).contains(&radius) {
                return Err(Error::InvalidParameter(format!(
                    "{name} must be in [1, {MAX_WINDOW_RADIUS}], got {radius}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(Error::InvalidParameter(format!(
                "confidence_threshold must be in [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        for (name, value) in [
            ("density_edge_threshold", self.density_edge_threshold),
            ("strong_edge_threshold", self.strong_edge_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if self.max_dimension == Some(0) {
            return Err(Error::InvalidParameter(
                "max_dimension must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SegmentationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.region_growth_passes, 2);
        assert_eq!(config.feather_radius, 2);
        assert_eq!(config.density_radius, 5);
        assert_eq!(config.max_dimension, Some(1200));
    }

    #[test]
    fn builder_methods_override_fields() {
        let config = SegmentationConfig::default()
            .with_feather_radius(4)
            .with_region_growth_passes(3)
            .with_max_dimension(None);
        assert_eq!(config.feather_radius, 4);
        assert_eq!(config.region_growth_passes, 3);
        assert_eq!(config.max_dimension, None);
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let invalid = [
            SegmentationConfig::default().with_corner_fraction(0.0),
            SegmentationConfig::default().with_corner_fraction(0.75),
            SegmentationConfig::default().with_corner_fraction(f32::NAN),
            SegmentationConfig::default().with_feather_radius(0),
            SegmentationConfig::default().with_density_radius(0),
            SegmentationConfig::default().with_density_radius(u32::MAX / 2 + 1),
            SegmentationConfig::default().with_density_radius(MAX_WINDOW_RADIUS + 1),
            SegmentationConfig::default().with_feather_radius(u32::MAX),
            SegmentationConfig::default().with_confidence_threshold(1.5),
            SegmentationConfig::default().with_edge_thresholds(-1.0, 40.0),
            SegmentationConfig::default().with_edge_thresholds(30.0, f32::INFINITY),
            SegmentationConfig::default().with_max_dimension(Some(0)),
        ];
        for config in invalid {
            assert!(
                matches!(config.validate(), Err(Error::InvalidParameter(_))),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn validate_accepts_largest_window_radius() {
        let config = SegmentationConfig::default()
            .with_density_radius(MAX_WINDOW_RADIUS)
            .with_feather_radius(MAX_WINDOW_RADIUS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_growth_passes_are_allowed() {
        let config = SegmentationConfig::default().with_region_growth_passes(0);
        assert!(config.validate().is_ok());
    }
}
