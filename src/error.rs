use thiserror::Error;

/// Error type for segmentation operations
///
/// Every stage of the cutout pipeline either produces a valid buffer or
/// fails with one of these variants. `AccessDenied` and `DecodeFailure` are
/// the "unavailable" causes: the caller is expected to fall back to the
/// untouched original image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The pixel source refused to expose its pixels
    ///
    /// This is the equivalent of a tainted canvas: the image exists but its
    /// pixel data must not be read.
    #[error("Pixel access denied: {0}")]
    AccessDenied(String),

    /// The source bytes could not be decoded into an image
    #[error("Failed to decode source image: {0}")]
    DecodeFailure(String),

    /// The processed buffer could not be encoded as PNG
    #[error("Failed to encode cutout: {0}")]
    EncodeFailure(String),

    /// Image and field dimensions do not match
    ///
    /// This error occurs when a scalar field (edges, mask, density) was
    /// computed for an image of a different size.
    #[error("Dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },

    /// A raw RGBA buffer does not hold exactly `width * height * 4` bytes
    #[error("RGBA buffer for {width}x{height} must hold {expected} bytes, got {actual}")]
    BufferLengthMismatch {
        /// Declared image width
        width: u32,
        /// Declared image height
        height: u32,
        /// Required length, `width * height * 4`
        expected: usize,
        /// Length of the buffer provided
        actual: usize,
    },

    /// Invalid parameter provided to the operation
    ///
    /// This error is returned when a configuration value is outside the
    /// range the pipeline accepts.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The area downscaler was asked to enlarge an image
    #[error("Area downscaling cannot enlarge {src_width}x{src_height} to {target_width}x{target_height}")]
    UpscalingNotSupported {
        /// Source image width
        src_width: u32,
        /// Source image height
        src_height: u32,
        /// Requested target width
        target_width: u32,
        /// Requested target height
        target_height: u32,
    },
}

impl Error {
    /// Returns `true` when the pipeline could not read the source pixels at all.
    ///
    /// Callers answer these errors by using the original image unprocessed.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::AccessDenied(_) | Self::DecodeFailure(_))
    }
}
