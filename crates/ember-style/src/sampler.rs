//! Pure keyframe evaluation over a decoded value list
//!
//! Keyframes sit at the normalized progress points `0, 1/(n-1), ..., 1`;
//! sampling maps a progress in [0, 1] onto the surrounding pair and blends
//! channel-wise. Progress is assumed pre-clamped by the animator.

use crate::value::StyleValue;

/// Linear interpolation between two floats
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sample a keyframe list at a given progress, returning the blended value.
///
/// A one-element list returns that element for any progress. The local
/// fraction is 0 at the final keyframe, so the last value is never
/// overshot. Scalar units are taken from the first keyframe; the animator
/// guarantees they are constant across the list.
pub fn sample(keyframes: &[StyleValue], progress: f32) -> StyleValue {
    debug_assert!(!keyframes.is_empty());
    debug_assert!((0.0..=1.0).contains(&progress));

    let n = keyframes.len();
    if n == 1 {
        return keyframes[0].clone();
    }

    let total = progress * (n - 1) as f32;
    let start = (total.floor() as usize).min(n - 1);
    let end = (start + 1).min(n - 1);
    let local = total - start as f32;

    blend(&keyframes[start], &keyframes[end], local, &keyframes[0])
}

fn blend(a: &StyleValue, b: &StyleValue, t: f32, first: &StyleValue) -> StyleValue {
    match (a, b, first) {
        (
            StyleValue::Scalar { magnitude: ma, .. },
            StyleValue::Scalar { magnitude: mb, .. },
            StyleValue::Scalar { unit, .. },
        ) => StyleValue::scalar(lerp(*ma, *mb, t), unit.clone()),
        (
            StyleValue::Color {
                r: ra,
                g: ga,
                b: ba,
                a: aa,
            },
            StyleValue::Color {
                r: rb,
                g: gb,
                b: bb,
                a: ab,
            },
            _,
        ) => StyleValue::color(
            lerp(*ra as f32, *rb as f32, t).round() as u8,
            lerp(*ga as f32, *gb as f32, t).round() as u8,
            lerp(*ba as f32, *bb as f32, t).round() as u8,
            lerp(*aa, *ab, t),
        ),
        // Mixed variants never reach here through a validated animator
        _ => a.clone(),
    }
}
