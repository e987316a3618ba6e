//! Test utilities for altar-cutout
//!
//! This module provides the synthetic scenes shared by the stage tests.
//! It is only compiled when running tests.

#[cfg(test)]
use image::{Luma, Rgba};
#[cfg(test)]
use imageproc::definitions::Image;

#[cfg(test)]
use crate::ScalarField;

/// Creates an opaque image filled with one color.
#[cfg(test)]
pub fn create_flat_image(width: u32, height: u32, color: [u8; 3]) -> Image<Rgba<u8>> {
    let [r, g, b] = color;
    Image::from_pixel(width, height, Rgba([r, g, b, 255]))
}

/// Creates an opaque image with a `side` x `side` square of `foreground`
/// centered on `background`.
///
/// The square starts at `((width - side) / 2, (height - side) / 2)`.
#[cfg(test)]
pub fn create_centered_square(
    width: u32,
    height: u32,
    side: u32,
    foreground: [u8; 3],
    background: [u8; 3],
) -> Image<Rgba<u8>> {
    let x0 = (width - side) / 2;
    let y0 = (height - side) / 2;
    Image::from_fn(width, height, |x, y| {
        let [r, g, b] = if (x0..x0 + side).contains(&x) && (y0..y0 + side).contains(&y) {
            foreground
        } else {
            background
        };
        Rgba([r, g, b, 255])
    })
}

/// Creates a centered square textured with vertical red stripes.
///
/// Columns alternate two bright and two dark red pixels, so every interior
/// pixel of the square carries a strong horizontal gradient.
#[cfg(test)]
pub fn create_striped_square(
    width: u32,
    height: u32,
    side: u32,
    background: [u8; 3],
) -> Image<Rgba<u8>> {
    let x0 = (width - side) / 2;
    let mut image = create_centered_square(width, height, side, [255, 0, 0], background);
    let y0 = (height - side) / 2;
    for y in y0..y0 + side {
        for x in x0..x0 + side {
            if (x - x0) % 4 >= 2 {
                image.put_pixel(x, y, Rgba([120, 0, 0, 255]));
            }
        }
    }
    image
}

/// Creates a scalar field from a closure.
#[cfg(test)]
pub fn field_from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> f32) -> ScalarField {
    ScalarField::from_fn(width, height, |x, y| Luma([f(x, y)]))
}

/// Compares two fields value by value with a tolerance.
///
/// # Returns
/// `true` if dimensions match and every value differs by at most `tolerance`
#[cfg(test)]
pub fn fields_approx_equal(expected: &ScalarField, actual: &ScalarField, tolerance: f32) -> bool {
    expected.dimensions() == actual.dimensions()
        && expected
            .as_raw()
            .iter()
            .zip(actual.as_raw())
            .all(|(e, a)| (e - a).abs() <= tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_centered_square_places_square_in_the_middle() {
        let image = create_centered_square(10, 8, 4, [255, 0, 0], [0, 0, 255]);
        assert_eq!(image.dimensions(), (10, 8));
        assert_eq!(image.get_pixel(3, 2), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(6, 5), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(2, 2), &Rgba([0, 0, 255, 255]));
        assert_eq!(image.get_pixel(7, 6), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn create_striped_square_alternates_column_pairs() {
        let image = create_striped_square(20, 20, 8, [0, 128, 0]);
        assert_eq!(image.get_pixel(6, 10), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(7, 10), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(8, 10), &Rgba([120, 0, 0, 255]));
        assert_eq!(image.get_pixel(9, 10), &Rgba([120, 0, 0, 255]));
        assert_eq!(image.get_pixel(10, 10), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(5, 10), &Rgba([0, 128, 0, 255]));
    }

    #[test]
    fn fields_approx_equal_respects_tolerance() {
        let a = field_from_fn(3, 3, |x, _| x as f32);
        let b = field_from_fn(3, 3, |x, _| x as f32 + 0.01);
        assert!(fields_approx_equal(&a, &b, 0.02));
        assert!(!fields_approx_equal(&a, &b, 0.001));
        assert!(!fields_approx_equal(&a, &field_from_fn(2, 3, |_, _| 0.0), 1.0));
    }
}
