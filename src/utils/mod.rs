//! Internal utility functions for altar-cutout.
//!
//! This module contains the helpers shared by the segmentation stages:
//! dimension checks, row-wise field filling and 3x3 neighborhood access.

use image::Luma;
use imageproc::definitions::{Clamp, Image};

use crate::error::Error;

/// Validates that two images or fields have matching dimensions.
///
/// # Arguments
///
/// * `expected` - The dimensions of the reference image
/// * `actual` - The dimensions of the image or field being checked
///
/// # Returns
///
/// `Ok(())` if the dimensions match, otherwise `Error::DimensionMismatch`
pub fn validate_matching_dimensions(expected: (u32, u32), actual: (u32, u32)) -> Result<(), Error> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::DimensionMismatch { expected, actual })
    }
}

/// Clamps a value to the unit interval.
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Scales an 8-bit alpha value by a factor in [0, 1], rounding down.
#[inline]
pub fn scale_alpha(alpha: u8, factor: f32) -> u8 {
    <u8 as Clamp<f32>>::clamp((f32::from(alpha) * factor).floor())
}

/// Returns `true` for pixels on the 1-pixel frame of a `width` x `height` grid.
#[inline]
pub const fn is_border(x: u32, y: u32, width: u32, height: u32) -> bool {
    x == 0 || y == 0 || x + 1 >= width || y + 1 >= height
}

/// Iterates over the 3x3 neighborhood values of an interior pixel.
///
/// The center pixel is included; callers that need only the 8 neighbors
/// skip position 4. `(x, y)` must not lie on the border.
#[inline]
pub fn neighborhood_3x3(field: &Image<Luma<f32>>, x: u32, y: u32) -> impl Iterator<Item = f32> + '_ {
    let width = field.width() as usize;
    let samples: &[f32] = field.as_raw();
    (y - 1..=y + 1).flat_map(move |ny| {
        let row = ny as usize * width;
        (x - 1..=x + 1).map(move |nx| samples[row + nx as usize])
    })
}

/// Fills a scalar field row by row.
///
/// `fill` receives the row index and the mutable row slice. Each row must be
/// computable from data the closure borrows immutably; with the `rayon`
/// feature rows are filled in parallel.
pub fn fill_rows<F>(field: &mut Image<Luma<f32>>, fill: F)
where
    F: Fn(u32, &mut [f32]) + Send + Sync,
{
    let width = field.width() as usize;
    if width == 0 {
        return;
    }
    let samples: &mut [f32] = field;

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        samples
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| fill(y as u32, row));
    }

    #[cfg(not(feature = "rayon"))]
    samples
        .chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| fill(y as u32, row));
}
