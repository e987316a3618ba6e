use image::{GenericImageView, Rgba};
use imageproc::definitions::Image;

use crate::error::Error;
use crate::segmentation::organic::alpha_perturbation;
use crate::utils::{clamp_unit, scale_alpha, validate_matching_dimensions};
use crate::ScalarField;

/// Mask values below this become fully transparent.
const TRANSPARENT_BELOW: f32 = 0.05;

/// Trait for writing a subject mask into the alpha channel of RGBA images
///
/// Only the alpha channel changes; red, green and blue are preserved. Alpha
/// never increases: each pixel keeps at most its original opacity.
pub trait ApplySubjectMask {
    /// Scales the alpha channel by the mask
    ///
    /// This consumes the original image.
    ///
    /// Pixels whose mask value is below 0.05 become fully transparent. Every
    /// other pixel keeps `floor(alpha * m)`, where `m` is the mask value plus
    /// a small deterministic perturbation, clamped to `[0, 1]`.
    ///
    /// # Arguments
    ///
    /// * `mask` - Final subject mask with the image's dimensions
    ///
    /// # Returns
    ///
    /// The image with its alpha channel rewritten
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - When image and mask dimensions don't match
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use altar_cutout::{ApplySubjectMask, ScalarField};
    /// use image::RgbaImage;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let image = RgbaImage::new(10, 10);
    /// let mask = ScalarField::new(10, 10);
    ///
    /// let cutout = image.apply_subject_mask(&mask)?;
    /// # Ok(())
    /// # }
    /// ```
    fn apply_subject_mask(self, mask: &ScalarField) -> Result<Self, Error>
    where
        Self: Sized;

    /// Scales the alpha channel by the mask in-place
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - When image and mask dimensions don't match
    fn apply_subject_mask_mut(&mut self, mask: &ScalarField) -> Result<&mut Self, Error>;
}

impl ApplySubjectMask for Image<Rgba<u8>> {
    fn apply_subject_mask(mut self, mask: &ScalarField) -> Result<Self, Error> {
        self.apply_subject_mask_mut(mask)?;
        Ok(self)
    }

    fn apply_subject_mask_mut(&mut self, mask: &ScalarField) -> Result<&mut Self, Error> {
        validate_matching_dimensions(self.dimensions(), mask.dimensions())?;

        self.enumerate_pixels_mut()
            .zip(mask.pixels())
            .for_each(|((x, y, pixel), mask_value)| {
                let Rgba([red, green, blue, alpha]) = *pixel;
                *pixel = Rgba([red, green, blue, masked_alpha(alpha, mask_value.0[0], x, y)]);
            });

        Ok(self)
    }
}

/// Alpha of one pixel after masking.
#[inline]
fn masked_alpha(alpha: u8, mask_value: f32, x: u32, y: u32) -> u8 {
    if mask_value < TRANSPARENT_BELOW {
        0
    } else {
        scale_alpha(alpha, clamp_unit(mask_value + alpha_perturbation(x, y)))
    }
}

/// Fraction of fully transparent pixels, for diagnostics.
pub(crate) fn transparent_fraction<I>(image: &I) -> f32
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (width, height) = image.dimensions();
    let total = u64::from(width) * u64::from(height);
    if total == 0 {
        return 0.0;
    }
    let transparent = image
        .pixels()
        .filter(|(_, _, Rgba([_, _, _, alpha]))| *alpha == 0)
        .count();
    transparent as f32 / total as f32
}
