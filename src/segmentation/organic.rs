//! Deterministic "organic" perturbations.
//!
//! Cutouts are meant to look hand-torn rather than machine-precise, so several
//! stages add small sinusoidal offsets to the mask. Every term is a pure
//! function of the pixel coordinates: identical input buffers always produce
//! identical cutouts.

/// Low-frequency wobble added to the raw confidence before center weighting.
#[inline]
pub fn mask_noise(x: u32, y: u32) -> f32 {
    (x as f32 * 0.05).sin() * (y as f32 * 0.05).cos() * 0.1
}

/// Diagonal ripple in [0, 0.2] added to pixels already classified as subject.
#[inline]
pub fn boundary_roughness(x: u32, y: u32) -> f32 {
    ((x as f32).mul_add(0.1, y as f32 * 0.07).sin() + 1.0) * 0.1
}

/// Texture in [-0.05, 0.05] applied to definite subject pixels while feathering.
#[inline]
pub fn subject_texture(x: u32, y: u32) -> f32 {
    (x as f32).mul_add(0.15, y as f32 * 0.12).sin() * 0.05
}

/// Offset in [0, 0.2] that widens or narrows the feathered transition band.
#[inline]
pub fn feather_variation(x: u32, y: u32) -> f32 {
    ((x as f32 * 0.2).sin() * (y as f32 * 0.18).cos() + 1.0) * 0.1
}

/// Final per-pixel offset in [-0.05, 0.05] applied when writing alpha.
#[inline]
pub fn alpha_perturbation(x: u32, y: u32) -> f32 {
    (x as f32 * 0.2).sin() * (y as f32 * 0.2).cos() * 0.05
}
