//! Distance-driven obstacle density

use crate::tuning::Tuning;

/// Density multiplier for `distance`: starts at `difficulty_start` and
/// reaches 1.0 at `difficulty_ramp_distance`.
pub fn difficulty_factor(distance: f32, tuning: &Tuning) -> f32 {
    let start = tuning.difficulty_start;
    let ramp = tuning.difficulty_ramp_distance.max(f32::EPSILON);
    let factor = start + (distance / ramp) * (1.0 - start);
    // NaN distance collapses to the easiest setting
    if factor.is_nan() {
        return start;
    }
    factor.clamp(start, 1.0)
}
