use crate::segmentation::summed_area_table::SummedAreaTable;
use crate::utils::fill_rows;
use crate::ScalarField;

/// Computes the local edge density of an edge field.
///
/// Each pixel whose full `(2 * radius + 1)²` window fits inside the image
/// receives the fraction of window pixels whose edge magnitude exceeds
/// `edge_threshold`. Pixels closer than `radius` to a border keep density 0.
///
/// Window counts come from a summed-area table over the thresholded field,
/// so the cost does not grow with the radius.
///
/// # Arguments
///
/// * `edges` - Sobel magnitudes, as produced by [`crate::DetectEdges`]
/// * `radius` - Window radius in pixels
/// * `edge_threshold` - Magnitude above which a pixel counts as an edge
pub fn edge_density(edges: &ScalarField, radius: u32, edge_threshold: f32) -> ScalarField {
    let (width, height) = edges.dimensions();
    let mut density = ScalarField::new(width, height);

    let reach = 2 * u64::from(radius);
    if u64::from(width) <= reach || u64::from(height) <= reach {
        return density;
    }

    let counts = SummedAreaTable::<u32>::from_fn(width, height, |x, y| {
        u32::from(edges.get_pixel(x, y).0[0] > edge_threshold)
    });
    let side = reach + 1;
    let window_area = (side * side) as f32;
    let r = i64::from(radius);

    fill_rows(&mut density, |y, row| {
        if y < radius || y >= height - radius {
            return;
        }
        let y = i64::from(y);
        for x in radius..width - radius {
            let cx = i64::from(x);
            let count = counts.rectangle_sum(cx - r, y - r, cx + r, y + r);
            row[x as usize] = count as f32 / window_area;
        }
    });

    density
}
