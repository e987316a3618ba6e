use crate::utils::{fill_rows, is_border, neighborhood_3x3};
use crate::ScalarField;

/// Value separating background-leaning from subject-leaning pixels.
const SPLIT: f32 = 0.5;

/// Suppresses isolated noise with a single erosion-then-dilation step.
///
/// First, every interior pixel below 0.5 is replaced by the minimum of its
/// 3x3 neighborhood, shrinking background-classified islands. Then every
/// interior pixel above 0.5 in the eroded buffer is replaced by the maximum of
/// its 3x3 neighborhood in that buffer, filling small holes in the subject.
/// A value of exactly 0.5 triggers neither branch and is copied. Border pixels
/// pass through unchanged.
///
/// Each step reads one complete buffer and writes a fresh one.
pub fn clean_mask(mask: &ScalarField) -> ScalarField {
    let eroded = morph_step(mask, |value| value < SPLIT, f32::INFINITY, f32::min);
    morph_step(&eroded, |value| value > SPLIT, f32::NEG_INFINITY, f32::max)
}

/// Writes a new field where selected interior pixels take the folded value of
/// their 3x3 window and every other pixel is copied.
fn morph_step<S>(
    source: &ScalarField,
    selects: S,
    identity: f32,
    combine: fn(f32, f32) -> f32,
) -> ScalarField
where
    S: Fn(f32) -> bool + Send + Sync,
{
    let (width, height) = source.dimensions();
    let samples = source.as_raw();
    let mut output = ScalarField::new(width, height);

    fill_rows(&mut output, |y, row| {
        let offset = y as usize * width as usize;
        for (x, value) in (0..width).zip(row.iter_mut()) {
            let center = samples[offset + x as usize];
            *value = if !is_border(x, y, width, height) && selects(center) {
                neighborhood_3x3(source, x, y).fold(identity, combine)
            } else {
                center
            };
        }
    });

    output
}
