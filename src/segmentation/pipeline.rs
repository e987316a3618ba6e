use image::Rgba;
use imageproc::definitions::Image;

use crate::error::Error;
use crate::segmentation::background::EstimateBackground;
use crate::segmentation::composite::{transparent_fraction, ApplySubjectMask};
use crate::segmentation::confidence::ConfidenceMaskBuilder;
use crate::segmentation::config::SegmentationConfig;
use crate::segmentation::downscale::AreaDownscale;
use crate::segmentation::edges::DetectEdges;
use crate::segmentation::feather::feather_mask;
use crate::segmentation::morphology::clean_mask;
use crate::segmentation::region_growing::grow_regions;
use crate::segmentation::source::{encode_png, PixelSource};
use crate::ScalarField;

/// Runs the cutout stages in order on one image
///
/// Edge detection and background estimation feed the confidence mask, which
/// is refined by region growing, morphological cleaning and feathering before
/// it is written into the alpha channel. Every call owns its buffers, so one
/// `Segmenter` can serve any number of images, concurrently or not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmenter {
    config: SegmentationConfig,
}

impl Segmenter {
    /// Creates a segmenter after validating the configuration.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidParameter` - When a configuration value is out of range
    pub fn new(config: SegmentationConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self { config })
    }

    pub const fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Computes the final feathered subject mask without touching the image.
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - Only if an intermediate field disagrees
    ///   in size with the image, which indicates a bug in a stage
    pub fn subject_mask(&self, image: &Image<Rgba<u8>>) -> Result<ScalarField, Error> {
        let edges = image.sobel_edges();
        let background = image.estimate_background(self.config.corner_fraction);
        tracing::debug!(
            r = background.r,
            g = background.g,
            b = background.b,
            "background estimate"
        );

        let confidence =
            ConfidenceMaskBuilder::new(image, &edges, background, &self.config).build()?;
        let grown = grow_regions(confidence, self.config.region_growth_passes);
        let cleaned = clean_mask(&grown);
        Ok(feather_mask(&cleaned, self.config.feather_radius))
    }

    /// Makes the background of `image` transparent.
    ///
    /// Color channels are preserved and alpha never increases. A zero-area
    /// image is returned unchanged.
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - See [`Segmenter::subject_mask`]
    #[tracing::instrument(
        level = "debug",
        skip(self, image),
        fields(width = image.width(), height = image.height())
    )]
    pub fn segment(&self, image: Image<Rgba<u8>>) -> Result<Image<Rgba<u8>>, Error> {
        if image.width() == 0 || image.height() == 0 {
            return Ok(image);
        }
        let mask = self.subject_mask(&image)?;
        image.apply_subject_mask(&mask)
    }
}

/// Trait for removing the background of RGBA images in one call
pub trait RemoveBackground {
    /// Segments the image with the default configuration
    ///
    /// # Errors
    ///
    /// * `Error::DimensionMismatch` - See [`Segmenter::subject_mask`]
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use altar_cutout::RemoveBackground;
    /// use image::RgbaImage;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let image = RgbaImage::new(64, 64);
    /// let cutout = image.remove_background()?;
    /// # Ok(())
    /// # }
    /// ```
    fn remove_background(self) -> Result<Self, Error>
    where
        Self: Sized;

    /// Segments the image with a custom configuration
    ///
    /// # Errors
    ///
    /// * `Error::InvalidParameter` - When the configuration is out of range
    fn remove_background_with(self, config: &SegmentationConfig) -> Result<Self, Error>
    where
        Self: Sized;
}

impl RemoveBackground for Image<Rgba<u8>> {
    fn remove_background(self) -> Result<Self, Error> {
        Segmenter::default().segment(self)
    }

    fn remove_background_with(self, config: &SegmentationConfig) -> Result<Self, Error> {
        Segmenter::new(config.clone())?.segment(self)
    }
}

/// Reads, caps, segments and PNG-encodes one image.
///
/// Images whose longest side exceeds `config.max_dimension` are first
/// area-downscaled to fit it.
///
/// # Errors
///
/// * `Error::AccessDenied` / `Error::DecodeFailure` - When the source pixels
///   are unavailable
/// * `Error::InvalidParameter` - When the configuration is out of range
/// * `Error::EncodeFailure` - When the cutout cannot be encoded
pub fn try_extract_subject<S>(source: &S, config: &SegmentationConfig) -> Result<Vec<u8>, Error>
where
    S: PixelSource + ?Sized,
{
    let segmenter = Segmenter::new(config.clone())?;
    let mut pixels = source.read_pixels()?;

    let (width, height) = pixels.dimensions();
    if let Some(target) = config
        .max_dimension
        .and_then(|max_dimension| AreaDownscale::fit_within(width, height, max_dimension))
    {
        tracing::debug!(
            width,
            height,
            new_width = target.new_width,
            new_height = target.new_height,
            "downscaling to working size"
        );
        pixels = target.resize(&pixels)?;
    }

    let cutout = segmenter.segment(pixels)?;
    tracing::debug!(
        transparent = transparent_fraction(&cutout),
        "fraction of transparent pixels"
    );
    encode_png(&cutout)
}

/// Sentinel form of [`try_extract_subject`].
///
/// Returns `None` when no cutout could be produced, in which case the caller
/// uses the original image untouched. The cause is logged, never returned.
#[tracing::instrument(level = "debug", skip(source, config))]
pub fn extract_subject<S>(source: &S, config: &SegmentationConfig) -> Option<Vec<u8>>
where
    S: PixelSource + ?Sized,
{
    match try_extract_subject(source, config) {
        Ok(bytes) => Some(bytes),
        Err(error) if error.is_unavailable() => {
            tracing::warn!(%error, "source pixels unavailable, keeping the original image");
            None
        }
        Err(error) => {
            tracing::warn!(%error, "segmentation failed, keeping the original image");
            None
        }
    }
}
