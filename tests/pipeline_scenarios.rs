//! End-to-end cutout scenarios on synthetic scenes
//!
//! Each scene has a known subject and background, so the resulting alpha
//! channel can be checked region by region.

use std::ops::Range;

use altar_cutout::{Image, RemoveBackground, SegmentationConfig, Segmenter};
use image::Rgba;

const GREEN: [u8; 3] = [0, 128, 0];

fn flat_scene(width: u32, height: u32, color: [u8; 3]) -> Image<Rgba<u8>> {
    let [r, g, b] = color;
    Image::from_pixel(width, height, Rgba([r, g, b, 255]))
}

/// A `side` x `side` square centered on a `background` scene.
///
/// When `striped` is set the square alternates two columns of bright red
/// and two of dark red, otherwise it is flat bright red.
fn square_scene(width: u32, height: u32, side: u32, striped: bool) -> Image<Rgba<u8>> {
    let x0 = (width - side) / 2;
    let y0 = (height - side) / 2;
    Image::from_fn(width, height, |x, y| {
        let inside = (x0..x0 + side).contains(&x) && (y0..y0 + side).contains(&y);
        if !inside {
            let [r, g, b] = GREEN;
            Rgba([r, g, b, 255])
        } else if striped && (x - x0) % 4 >= 2 {
            Rgba([120, 0, 0, 255])
        } else {
            Rgba([255, 0, 0, 255])
        }
    })
}

fn alpha_values(image: &Image<Rgba<u8>>, xs: Range<u32>, ys: Range<u32>) -> Vec<u8> {
    ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
        .map(|(x, y)| image.get_pixel(x, y)[3])
        .collect()
}

#[test]
fn uniform_image_becomes_fully_transparent() {
    for color in [[255, 255, 255], [0, 0, 0], [37, 190, 88]] {
        let cutout = flat_scene(64, 48, color).remove_background().unwrap();
        assert!(
            cutout.pixels().all(|pixel| pixel[3] == 0),
            "uniform {color:?} should have no subject"
        );
    }
}

#[test]
fn textured_square_is_kept_and_corners_are_removed() {
    let cutout = square_scene(100, 100, 40, true).remove_background().unwrap();

    for (xs, ys) in [(0..10, 0..10), (90..100, 0..10), (0..10, 90..100), (90..100, 90..100)] {
        assert!(
            alpha_values(&cutout, xs.clone(), ys.clone())
                .iter()
                .all(|&alpha| alpha == 0),
            "corner {xs:?} x {ys:?} should be transparent"
        );
    }

    let center = alpha_values(&cutout, 40..60, 40..60);
    let mean = center.iter().map(|&alpha| f32::from(alpha)).sum::<f32>() / center.len() as f32;
    assert!(mean >= 0.85 * 255.0, "central mean alpha {mean}");
    assert!(center.iter().all(|&alpha| f32::from(alpha) >= 0.7 * 255.0));
}

#[test]
fn textured_square_boundary_is_feathered() {
    let cutout = square_scene(100, 100, 40, true).remove_background().unwrap();
    let alpha = cutout.get_pixel(30, 50)[3];
    assert!(alpha > 0 && alpha < 255, "boundary alpha {alpha}");
}

#[test]
fn flat_square_without_texture_feathers_to_faint_alpha_as_reference() {
    // Reference behavior of the confidence weights, not a regression: the
    // interior of a flat square has no Sobel edges, and color difference
    // alone reaches only about 0.35 confidence.
    let cutout = square_scene(100, 100, 40, false).remove_background().unwrap();

    assert!(cutout.get_pixel(50, 50)[3] < 64);
    for (x, y) in [(0, 0), (99, 0), (0, 99), (99, 99), (5, 5)] {
        assert_eq!(cutout.get_pixel(x, y)[3], 0);
    }
}

#[test]
fn color_channels_are_never_modified() {
    let image = square_scene(80, 60, 24, true);
    let cutout = image.clone().remove_background().unwrap();
    for (before, after) in image.pixels().zip(cutout.pixels()) {
        assert_eq!(before.0[..3], after.0[..3]);
        assert!(after[3] <= before[3]);
    }
}

#[test]
fn segmentation_is_reproducible() {
    let image = square_scene(90, 70, 30, true);
    let segmenter = Segmenter::default();
    let first = segmenter.segment(image.clone()).unwrap();
    let second = segmenter.segment(image).unwrap();
    assert_eq!(first, second);
}

#[test]
fn translucent_input_alpha_is_only_reduced() {
    let mut image = square_scene(60, 60, 24, true);
    for pixel in image.pixels_mut() {
        pixel[3] = 128;
    }
    let cutout = image.remove_background().unwrap();
    assert!(cutout.pixels().all(|pixel| pixel[3] <= 128));
    assert!(cutout.get_pixel(30, 30)[3] > 0);
}

#[test]
fn more_growth_passes_keep_mask_in_range() {
    let image = square_scene(70, 70, 30, true);
    let config = SegmentationConfig::default().with_region_growth_passes(5);
    let mask = Segmenter::new(config).unwrap().subject_mask(&image).unwrap();
    assert_eq!(mask.dimensions(), (70, 70));
    assert!(mask.pixels().all(|value| (0.0..=1.0).contains(&value.0[0])));
}
