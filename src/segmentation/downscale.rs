use image::Rgba;
use imageproc::definitions::{Clamp, Image};

use crate::error::Error;

/// Contribution of one source index to one destination index.
#[derive(Debug, Clone, Copy)]
struct AreaWeight {
    source_index: u32,
    weight: f32,
}

/// Area-averaging downscaler
///
/// Every destination pixel is the coverage-weighted mean of the source pixels
/// its footprint overlaps, which avoids the aliasing of point sampling when
/// large photographs are shrunk to the working size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaDownscale {
    pub new_width: u32,
    pub new_height: u32,
}

impl AreaDownscale {
    /// Creates a downscaler with explicit target dimensions.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidParameter` - When either target dimension is zero
    pub fn new(new_width: u32, new_height: u32) -> Result<Self, Error> {
        if new_width == 0 || new_height == 0 {
            return Err(Error::InvalidParameter(format!(
                "downscale target must be non-empty, got {new_width}x{new_height}"
            )));
        }
        Ok(Self {
            new_width,
            new_height,
        })
    }

    /// Target that fits `width` x `height` within `max_dimension` on its
    /// longest side, or `None` when the image already fits or is empty.
    ///
    /// Both sides are scaled by `max_dimension / max(width, height)` and
    /// floored, never below 1.
    #[must_use]
    pub fn fit_within(width: u32, height: u32, max_dimension: u32) -> Option<Self> {
        let longest = width.max(height);
        if width == 0 || height == 0 || max_dimension == 0 || longest <= max_dimension {
            return None;
        }
        let scale = f64::from(max_dimension) / f64::from(longest);
        let scaled = |side: u32| {
            if side == longest {
                max_dimension
            } else {
                ((f64::from(side) * scale).floor() as u32).max(1)
            }
        };
        Some(Self {
            new_width: scaled(width),
            new_height: scaled(height),
        })
    }

    /// Resizes an RGBA image to the target dimensions.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidParameter` - When the source image is empty
    /// * `Error::UpscalingNotSupported` - When a target side exceeds the source
    pub fn resize(&self, source: &Image<Rgba<u8>>) -> Result<Image<Rgba<u8>>, Error> {
        let (src_width, src_height) = source.dimensions();
        if src_width == 0 || src_height == 0 {
            return Err(Error::InvalidParameter(
                "cannot downscale an empty image".to_string(),
            ));
        }
        if self.new_width > src_width || self.new_height > src_height {
            return Err(Error::UpscalingNotSupported {
                src_width,
                src_height,
                target_width: self.new_width,
                target_height: self.new_height,
            });
        }
        if (self.new_width, self.new_height) == (src_width, src_height) {
            return Ok(source.clone());
        }

        let x_weights = area_weights(src_width, self.new_width);
        let y_weights = area_weights(src_height, self.new_height);

        // Horizontal pass: every source row reduced to the destination width.
        let channels = 4usize;
        let row_len = self.new_width as usize * channels;
        let mut horizontal = vec![0.0f32; src_height as usize * row_len];
        for sy in 0..src_height {
            let row = &mut horizontal[sy as usize * row_len..(sy as usize + 1) * row_len];
            for (dx, weights) in x_weights.iter().enumerate() {
                for entry in weights {
                    let pixel = source.get_pixel(entry.source_index, sy);
                    for c in 0..channels {
                        row[dx * channels + c] += f32::from(pixel[c]) * entry.weight;
                    }
                }
            }
        }

        // Vertical pass.
        let mut output = Image::new(self.new_width, self.new_height);
        for (dy, weights) in y_weights.iter().enumerate() {
            let mut sum = vec![0.0f32; row_len];
            for entry in weights {
                let offset = entry.source_index as usize * row_len;
                for (acc, value) in sum.iter_mut().zip(&horizontal[offset..offset + row_len]) {
                    *acc += value * entry.weight;
                }
            }
            for dx in 0..self.new_width {
                let base = dx as usize * channels;
                let channel = |c: usize| <u8 as Clamp<f32>>::clamp(sum[base + c].round());
                output.put_pixel(
                    dx,
                    dy as u32,
                    Rgba([channel(0), channel(1), channel(2), channel(3)]),
                );
            }
        }

        Ok(output)
    }
}

/// Coverage weights mapping `src_size` samples onto `dst_size` samples.
///
/// Destination sample `d` covers the source interval
/// `[d * scale, (d + 1) * scale)`; the weights of each destination sum to 1.
fn area_weights(src_size: u32, dst_size: u32) -> Vec<Vec<AreaWeight>> {
    let scale = f64::from(src_size) / f64::from(dst_size);
    (0..dst_size)
        .map(|d| {
            let start = f64::from(d) * scale;
            let end = (start + scale).min(f64::from(src_size));
            let span = end - start;
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(src_size);
            (first..last)
                .filter_map(|s| {
                    let overlap = end.min(f64::from(s) + 1.0) - start.max(f64::from(s));
                    (overlap > 1e-9).then(|| AreaWeight {
                        source_index: s,
                        weight: (overlap / span) as f32,
                    })
                })
                .collect()
        })
        .collect()
}
