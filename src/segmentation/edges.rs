use image::{Luma, Rgba};
use imageproc::definitions::Image;
use imageproc::map::map_colors;

use crate::utils::fill_rows;
use crate::ScalarField;

/// Horizontal Sobel kernel, row-major.
const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

/// Vertical Sobel kernel, row-major.
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Trait providing Sobel gradient magnitudes for color images
pub trait DetectEdges {
    /// Computes the per-pixel Sobel gradient magnitude of luminance
    ///
    /// Luminance is the unweighted mean of the red, green and blue channels.
    /// The 1-pixel border is left at 0. Magnitudes are not normalized; callers
    /// compare them against absolute thresholds.
    ///
    /// # Returns
    ///
    /// A field with the same dimensions as the image
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use altar_cutout::DetectEdges;
    /// use image::RgbaImage;
    ///
    /// let image = RgbaImage::new(16, 16);
    /// let edges = image.sobel_edges();
    /// assert_eq!(edges.dimensions(), (16, 16));
    /// ```
    fn sobel_edges(&self) -> ScalarField;
}

impl DetectEdges for Image<Rgba<u8>> {
    fn sobel_edges(&self) -> ScalarField {
        let (width, height) = self.dimensions();
        let luminance = mean_luminance(self);
        let mut edges = ScalarField::new(width, height);

        if width < 3 || height < 3 {
            return edges;
        }

        fill_rows(&mut edges, |y, row| {
            if y == 0 || y + 1 >= height {
                return;
            }
            for x in 1..width - 1 {
                row[x as usize] = gradient_magnitude(&luminance, x, y);
            }
        });

        edges
    }
}

/// Mean of the R, G and B channels; alpha is ignored.
fn mean_luminance(image: &Image<Rgba<u8>>) -> ScalarField {
    map_colors(image, |Rgba([red, green, blue, _])| {
        Luma([(f32::from(red) + f32::from(green) + f32::from(blue)) / 3.0])
    })
}

fn gradient_magnitude(luminance: &ScalarField, x: u32, y: u32) -> f32 {
    let mut gx = 0.0f32;
    let mut gy = 0.0f32;
    for (ky, (row_x, row_y)) in SOBEL_X.iter().zip(SOBEL_Y.iter()).enumerate() {
        let sy = y + ky as u32 - 1;
        for (kx, (weight_x, weight_y)) in row_x.iter().zip(row_y.iter()).enumerate() {
            let gray = luminance.get_pixel(x + kx as u32 - 1, sy).0[0];
            gx += gray * weight_x;
            gy += gray * weight_y;
        }
    }
    gx.hypot(gy)
}
