use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgba};
use imageproc::definitions::Image;

use crate::error::Error;

/// Seam where a collaborator hands decoded pixels to the pipeline
///
/// Implementations that cannot expose their pixels (for example a bitmap
/// tainted by a foreign origin) return `Error::AccessDenied`; sources that
/// fail to decode return `Error::DecodeFailure`. Both are reported by
/// [`Error::is_unavailable`].
pub trait PixelSource {
    /// Produces an owned RGBA copy of the source pixels.
    ///
    /// # Errors
    ///
    /// * `Error::AccessDenied` - When the pixels may not be read
    /// * `Error::DecodeFailure` - When the source cannot be decoded
    fn read_pixels(&self) -> Result<Image<Rgba<u8>>, Error>;
}

impl PixelSource for Image<Rgba<u8>> {
    fn read_pixels(&self) -> Result<Image<Rgba<u8>>, Error> {
        Ok(self.clone())
    }
}

impl PixelSource for DynamicImage {
    fn read_pixels(&self) -> Result<Image<Rgba<u8>>, Error> {
        Ok(self.to_rgba8())
    }
}

/// Encoded image bytes in any format the `image` crate was built to read.
#[derive(Debug, Clone, Copy)]
pub struct EncodedImage<'a>(pub &'a [u8]);

impl PixelSource for EncodedImage<'_> {
    fn read_pixels(&self) -> Result<Image<Rgba<u8>>, Error> {
        image::load_from_memory(self.0)
            .map(|decoded| decoded.to_rgba8())
            .map_err(|e| Error::DecodeFailure(e.to_string()))
    }
}

/// Wraps a raw row-major RGBA buffer.
///
/// # Errors
///
/// * `Error::BufferLengthMismatch` - When `data.len() != width * height * 4`
pub fn pixel_buffer_from_raw(
    width: u32,
    height: u32,
    data: Vec<u8>,
) -> Result<Image<Rgba<u8>>, Error> {
    let expected = width as usize * height as usize * 4;
    let actual = data.len();
    if actual != expected {
        return Err(Error::BufferLengthMismatch {
            width,
            height,
            expected,
            actual,
        });
    }
    Image::from_raw(width, height, data).ok_or(Error::BufferLengthMismatch {
        width,
        height,
        expected,
        actual,
    })
}

/// Encodes an RGBA image as PNG, keeping the alpha channel.
///
/// # Errors
///
/// * `Error::EncodeFailure` - When the encoder rejects the image
pub fn encode_png(image: &Image<Rgba<u8>>) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| Error::EncodeFailure(e.to_string()))?;
    Ok(bytes)
}
