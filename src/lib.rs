mod error;
mod segmentation;
#[cfg(test)]
mod test_utils;
mod utils;

use image::{ImageBuffer, Luma, Pixel};

pub use error::Error;
pub use segmentation::background::{ColorSample, EstimateBackground};
pub use segmentation::composite::ApplySubjectMask;
pub use segmentation::confidence::{adaptive_threshold, ConfidenceMaskBuilder};
pub use segmentation::config::{SegmentationConfig, MAX_WINDOW_RADIUS, MORPHOLOGY_RADIUS};
pub use segmentation::density::edge_density;
pub use segmentation::downscale::AreaDownscale;
pub use segmentation::edges::DetectEdges;
pub use segmentation::feather::feather_mask;
pub use segmentation::morphology::clean_mask;
pub use segmentation::organic;
pub use segmentation::pipeline::{
    extract_subject, try_extract_subject, RemoveBackground, Segmenter,
};
pub use segmentation::region_growing::grow_regions;
pub use segmentation::source::{encode_png, pixel_buffer_from_raw, EncodedImage, PixelSource};
pub use segmentation::summed_area_table::SummedAreaTable;

pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// Per-pixel `f32` field with the dimensions of its source image.
pub type ScalarField = Image<Luma<f32>>;
