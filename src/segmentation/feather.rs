use crate::segmentation::organic::{feather_variation, subject_texture};
use crate::utils::{clamp_unit, fill_rows};
use crate::ScalarField;

/// Values above this are definite subject.
const DEFINITE_SUBJECT: f32 = 0.85;
/// Values below this are definite background.
const DEFINITE_BACKGROUND: f32 = 0.15;
const SPLIT: f32 = 0.5;
/// Height of the alpha ramp on either side of the split.
const RAMP: f32 = 0.4;

/// Turns the cleaned mask into a graded alpha ramp.
///
/// Definite subject pixels get a light texture, definite background pixels
/// are forced to 0. A pixel in the transition band looks for the nearest
/// pixel on the opposite side of 0.5 within `radius` and is placed on a ramp
/// by that distance: subject-leaning pixels rise from 0.5 toward 0.9,
/// background-leaning pixels fall from 0.5 toward 0.1, each shifted by an
/// organic variation. A band pixel of exactly 0.5 has no opposite side and
/// takes the background ramp at full distance.
///
/// # Arguments
///
/// * `mask` - Cleaned mask in `[0, 1]`
/// * `radius` - Search radius in pixels, at least 1
pub fn feather_mask(mask: &ScalarField, radius: u32) -> ScalarField {
    let (width, height) = mask.dimensions();
    let samples = mask.as_raw();
    let radius = radius.max(1);
    let reach = radius as i64;
    let mut feathered = ScalarField::new(width, height);

    fill_rows(&mut feathered, |y, row| {
        let offset = y as usize * width as usize;
        for (x, value) in (0..width).zip(row.iter_mut()) {
            let center = samples[offset + x as usize];

            *value = if center > DEFINITE_SUBJECT {
                (center + subject_texture(x, y)).min(1.0)
            } else if center < DEFINITE_BACKGROUND {
                0.0
            } else {
                let (cx, cy) = (i64::from(x), i64::from(y));
                let mut nearest = radius as f32;
                for ny in (cy - reach).max(0)..=(cy + reach).min(i64::from(height) - 1) {
                    for nx in (cx - reach).max(0)..=(cx + reach).min(i64::from(width) - 1) {
                        let neighbor = samples[ny as usize * width as usize + nx as usize];
                        if is_opposite(center, neighbor) {
                            let (dx, dy) = (nx - cx, ny - cy);
                            nearest = nearest.min(((dx * dx + dy * dy) as f32).sqrt());
                        }
                    }
                }

                let dist_factor = nearest / radius as f32;
                let variation = feather_variation(x, y);
                if center > SPLIT {
                    clamp_unit(RAMP.mul_add(dist_factor, SPLIT) + variation)
                } else {
                    clamp_unit(RAMP.mul_add(-dist_factor, SPLIT) - variation)
                }
            };
        }
    });

    feathered
}

#[inline]
fn is_opposite(center: f32, neighbor: f32) -> bool {
    (center > SPLIT && neighbor < SPLIT) || (center < SPLIT && neighbor > SPLIT)
}
