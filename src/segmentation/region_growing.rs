use crate::utils::{fill_rows, is_border, neighborhood_3x3};
use crate::ScalarField;

/// Neighbor average above which a background-leaning pixel is pulled up.
const SUBJECT_CONSENSUS: f32 = 0.6;
/// Neighbor average below which a subject-leaning pixel is pushed down.
const BACKGROUND_CONSENSUS: f32 = 0.3;
const PROMOTION_STEP: f32 = 0.3;
const DEMOTION_STEP: f32 = 0.2;

/// Relaxes a confidence mask toward neighborhood consensus.
///
/// Runs `passes` sequential passes. Each pass reads only the complete result
/// of the previous pass and writes into a second buffer; the two buffers
/// alternate. Border pixels are carried over unchanged.
///
/// # Arguments
///
/// * `mask` - Confidence mask in `[0, 1]`, consumed
/// * `passes` - Number of refinement passes
///
/// # Returns
///
/// The refined mask
pub fn grow_regions(mask: ScalarField, passes: usize) -> ScalarField {
    let (width, height) = mask.dimensions();
    let mut current = mask;
    if passes == 0 || width == 0 || height == 0 {
        return current;
    }
    let mut next = ScalarField::new(width, height);

    for pass in 0..passes {
        grow_pass(&current, &mut next);
        std::mem::swap(&mut current, &mut next);

        let changed = current
            .as_raw()
            .iter()
            .zip(next.as_raw())
            .filter(|(after, before)| after != before)
            .count();
        tracing::debug!(pass, changed, "region growing pass");
    }

    current
}

fn grow_pass(previous: &ScalarField, next: &mut ScalarField) {
    let (width, height) = previous.dimensions();
    let source = previous.as_raw();

    fill_rows(next, |y, row| {
        let offset = y as usize * width as usize;
        for (x, value) in (0..width).zip(row.iter_mut()) {
            let center = source[offset + x as usize];
            *value = if is_border(x, y, width, height) {
                center
            } else {
                let neighbor_sum: f32 = neighborhood_3x3(previous, x, y)
                    .enumerate()
                    .filter(|&(position, _)| position != 4)
                    .map(|(_, neighbor)| neighbor)
                    .sum();
                grow_pixel(center, neighbor_sum / 8.0)
            };
        }
    });
}

/// Applies the consensus rule to one pixel.
#[inline]
fn grow_pixel(center: f32, neighbor_average: f32) -> f32 {
    if neighbor_average > SUBJECT_CONSENSUS && center < 0.5 {
        (center + PROMOTION_STEP).min(1.0)
    } else if neighbor_average < BACKGROUND_CONSENSUS && center > 0.5 {
        (center - DEMOTION_STEP).max(0.0)
    } else {
        center
    }
}
