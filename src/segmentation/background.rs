use image::Rgba;
use imageproc::definitions::Image;
use itertools::iproduct;

/// Average color of a rectangular region
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorSample {
    /// Mean red channel in `[0, 255]`
    pub r: f32,
    /// Mean green channel in `[0, 255]`
    pub g: f32,
    /// Mean blue channel in `[0, 255]`
    pub b: f32,
}

impl ColorSample {
    /// Creates a color sample from channel means.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Euclidean RGB distance between this sample and a pixel. Alpha is ignored.
    #[must_use]
    pub fn distance(&self, pixel: Rgba<u8>) -> f32 {
        let Rgba([red, green, blue, _]) = pixel;
        let dr = f32::from(red) - self.r;
        let dg = f32::from(green) - self.g;
        let db = f32::from(blue) - self.b;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Channel-wise mean of several samples; an empty slice yields black.
    #[must_use]
    pub fn mean_of(samples: &[Self]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let count = samples.len() as f32;
        let (r, g, b) = samples.iter().fold((0.0, 0.0, 0.0), |(r, g, b), sample| {
            (r + sample.r, g + sample.g, b + sample.b)
        });
        Self::new(r / count, g / count, b / count)
    }
}

/// Trait estimating the dominant background color of a photograph
///
/// Photographed artifacts usually sit on a uniform backdrop that reaches the
/// image border. Sampling all four corners keeps a single corner that
/// contains foreground detail from dominating the estimate.
pub trait EstimateBackground {
    /// Averages the means of the four corner rectangles
    ///
    /// # Arguments
    ///
    /// * `corner_fraction` - Width and height of each corner rectangle as a
    ///   fraction of the image width and height
    ///
    /// # Returns
    ///
    /// The estimated background color. Empty corner rectangles contribute
    /// `{0, 0, 0}`.
    fn estimate_background(&self, corner_fraction: f32) -> ColorSample;
}

impl EstimateBackground for Image<Rgba<u8>> {
    fn estimate_background(&self, corner_fraction: f32) -> ColorSample {
        let (width, height) = self.dimensions();
        let (w, h) = (width as f32, height as f32);
        let near = corner_fraction;
        let far = 1.0 - corner_fraction;

        let corners = [
            (0.0, 0.0, w * near, h * near),
            (w * far, 0.0, w, h * near),
            (0.0, h * far, w * near, h),
            (w * far, h * far, w, h),
        ];

        let samples = corners.map(|(x1, y1, x2, y2)| region_mean(self, x1, y1, x2, y2));
        ColorSample::mean_of(&samples)
    }
}

/// Mean color of the pixels in `[floor(x1), floor(x2)) x [floor(y1), floor(y2))`,
/// clipped to the image.
fn region_mean(image: &Image<Rgba<u8>>, x1: f32, y1: f32, x2: f32, y2: f32) -> ColorSample {
    let (width, height) = image.dimensions();
    let x_range = (x1.floor() as u32)..(x2.floor() as u32).min(width);
    let y_range = (y1.floor() as u32)..(y2.floor() as u32).min(height);

    let mut sum = [0u64; 3];
    let mut count = 0u64;
    for (y, x) in iproduct!(y_range, x_range) {
        let Rgba([red, green, blue, _]) = *image.get_pixel(x, y);
        sum[0] += u64::from(red);
        sum[1] += u64::from(green);
        sum[2] += u64::from(blue);
        count += 1;
    }

    if count == 0 {
        return ColorSample::default();
    }
    let count = count as f32;
    ColorSample::new(
        sum[0] as f32 / count,
        sum[1] as f32 / count,
        sum[2] as f32 / count,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_centered_square, create_flat_image};

    #[test]
    fn estimate_background_with_flat_image_returns_its_color() {
        let image = create_flat_image(40, 30, [12, 200, 77]);
        let background = image.estimate_background(0.15);
        assert_eq!(background, ColorSample::new(12.0, 200.0, 77.0));
    }

    #[test]
    fn estimate_background_ignores_centered_subject() {
        let image = create_centered_square(100, 100, 40, [255, 0, 0], [0, 128, 0]);
        let background = image.estimate_background(0.15);
        assert_eq!(background, ColorSample::new(0.0, 128.0, 0.0));
    }

    #[test]
    fn estimate_background_averages_the_four_corners() {
        // Top-left corner white, rest black: one of four corners contributes 255.
        let mut image = create_flat_image(20, 20, [0, 0, 0]);
        for y in 0..3 {
            for x in 0..3 {
                image.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
        let background = image.estimate_background(0.15);
        assert!((background.r - 63.75).abs() < 1e-3);
        assert!((background.g - 63.75).abs() < 1e-3);
    }

    #[test]
    fn estimate_background_with_tiny_image_yields_black_for_empty_corners() {
        // 15% of 3 pixels floors to an empty rectangle for the near corners.
        let image = create_flat_image(3, 3, [90, 90, 90]);
        let background = image.estimate_background(0.15);
        assert!(background.r < 90.0);
    }

    #[test]
    fn estimate_background_with_zero_area_image_is_black() {
        let image: Image<Rgba<u8>> = Image::new(0, 0);
        assert_eq!(image.estimate_background(0.15), ColorSample::default());
    }

    #[test]
    fn color_sample_distance_is_euclidean() {
        let sample = ColorSample::new(0.0, 0.0, 0.0);
        assert!((sample.distance(Rgba([3, 4, 0, 255])) - 5.0).abs() < 1e-6);
        assert_eq!(ColorSample::mean_of(&[]), ColorSample::default());
    }
}
