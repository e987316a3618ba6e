use image::Rgba;
use imageproc::definitions::Image;

use crate::error::Error;
use crate::segmentation::background::ColorSample;
use crate::segmentation::config::SegmentationConfig;
use crate::segmentation::density::edge_density;
use crate::segmentation::organic::{boundary_roughness, mask_noise};
use crate::utils::{clamp_unit, fill_rows, validate_matching_dimensions};
use crate::ScalarField;

/// Weight of "differs from the background color".
const FOREGROUND_WEIGHT: f32 = 0.4;
/// Weight of "sits on a strong edge".
const STRONG_EDGE_WEIGHT: f32 = 0.35;
/// Weight of "sits in an edge-dense neighborhood".
const HIGH_DENSITY_WEIGHT: f32 = 0.25;
/// Edge density above which a neighborhood counts as detailed.
const HIGH_DENSITY_THRESHOLD: f32 = 0.3;
/// Confidence lost at the far corners relative to the image center.
const CENTER_FALLOFF: f32 = 0.4;

const MIN_COLOR_THRESHOLD: f32 = 25.0;
const MAX_COLOR_THRESHOLD: f32 = 50.0;
const STD_DEV_FACTOR: f32 = 0.5;

/// Computes the color-distance threshold separating subject from background.
///
/// The distances are sorted in place. The threshold is the median (the
/// element at index `len / 2`) plus half the population standard deviation,
/// clamped to `[25, 50]`. An empty slice yields the lower bound.
pub fn adaptive_threshold(distances: &mut [f32]) -> f32 {
    if distances.is_empty() {
        return MIN_COLOR_THRESHOLD;
    }

    distances.sort_unstable_by(f32::total_cmp);
    let median = distances[distances.len() / 2];

    let count = distances.len() as f64;
    let mean = distances.iter().map(|&d| f64::from(d)).sum::<f64>() / count;
    let variance = distances
        .iter()
        .map(|&d| (f64::from(d) - mean).powi(2))
        .sum::<f64>()
        / count;
    let std_dev = variance.sqrt() as f32;

    STD_DEV_FACTOR
        .mul_add(std_dev, median)
        .clamp(MIN_COLOR_THRESHOLD, MAX_COLOR_THRESHOLD)
}

/// Fuses color, edge and position cues into a per-pixel subject confidence
///
/// The builder borrows the source image and its edge field; the edge-density
/// field and the adaptive color threshold are computed once per build.
pub struct ConfidenceMaskBuilder<'a> {
    image: &'a Image<Rgba<u8>>,
    edges: &'a ScalarField,
    background: ColorSample,
    config: &'a SegmentationConfig,
}

impl<'a> ConfidenceMaskBuilder<'a> {
    pub const fn new(
        image: &'a Image<Rgba<u8>>,
        edges: &'a ScalarField,
        background: ColorSample,
        config: &'a SegmentationConfig,
    ) -> Self {
        Self {
            image,
            edges,
            background,
            config,
        }
    }

    /// Builds the confidence mask
    ///
    /// For each pixel the confidence starts as the weighted sum of three
    /// boolean cues (foreground color, strong edge, high edge density), is
    /// offset by [`mask_noise`] and scaled by a center bias that falls from 1
    /// at the image center to 0.6 at the corners. Pixels above the confidence
    /// threshold are roughened with [`boundary_roughness`]. Every value is
    /// clamped to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - When the edge field was computed for an
    ///   image of a different size
    pub fn build(&self) -> Result<ScalarField, Error> {
        let (width, height) = self.image.dimensions();
        validate_matching_dimensions((width, height), self.edges.dimensions())?;

        let mut mask = ScalarField::new(width, height);
        if width == 0 || height == 0 {
            return Ok(mask);
        }

        let distances: Vec<f32> = self
            .image
            .pixels()
            .map(|pixel| self.background.distance(*pixel))
            .collect();
        let mut sorted = distances.clone();
        let color_threshold = adaptive_threshold(&mut sorted);
        tracing::debug!(color_threshold, "adaptive color threshold");

        let density = edge_density(
            self.edges,
            self.config.density_radius,
            self.config.density_edge_threshold,
        );

        let center_x = width as f32 / 2.0;
        let center_y = height as f32 / 2.0;
        let max_distance = center_x.hypot(center_y);
        let strong_edge_threshold = self.config.strong_edge_threshold;
        let confidence_threshold = self.config.confidence_threshold;
        let edges = self.edges.as_raw();
        let density = density.as_raw();

        fill_rows(&mut mask, |y, row| {
            let offset = y as usize * width as usize;
            for (x, value) in (0..width).zip(row.iter_mut()) {
                let index = offset + x as usize;

                let mut confidence = 0.0;
                if distances[index] > color_threshold {
                    confidence += FOREGROUND_WEIGHT;
                }
                if edges[index] > strong_edge_threshold {
                    confidence += STRONG_EDGE_WEIGHT;
                }
                if density[index] > HIGH_DENSITY_THRESHOLD {
                    confidence += HIGH_DENSITY_WEIGHT;
                }

                let from_center = (x as f32 - center_x).hypot(y as f32 - center_y);
                let center_bias = 1.0 - (from_center / max_distance) * CENTER_FALLOFF;
                confidence = (confidence + mask_noise(x, y)) * center_bias;

                if confidence > confidence_threshold {
                    confidence = (confidence + boundary_roughness(x, y)).min(1.0);
                }

                *value = clamp_unit(confidence);
            }
        });

        Ok(mask)
    }
}
