//! Per-property animation: keyframe strings composed into `progress -> string`

use crate::sampler::sample;
use crate::value::StyleValue;
use ember_core::{EmberError, Result};

/// A pure evaluation from lifetime progress to a style string, built once
/// per animated property per particle.
///
/// Keyframes are decoded eagerly at construction; evaluation is infallible
/// and safe to call repeatedly and out of order.
#[derive(Clone, Debug)]
pub enum PropertyAnimator {
    /// A constant value — bypasses decoding and interpolation entirely
    Fixed(String),
    /// A decoded keyframe list sampled at clamped progress
    Keyframes(Vec<StyleValue>),
}

impl PropertyAnimator {
    /// Build the constant-value fast path.
    pub fn fixed(value: impl Into<String>) -> Self {
        Self::Fixed(value.into())
    }

    /// Decode a raw keyframe list and validate it.
    ///
    /// Fails with `KeyframeMismatch` when the list is empty, an entry does
    /// not decode, the list mixes scalar and color entries, or scalar
    /// entries disagree on their unit.
    pub fn from_keyframes<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        if values.is_empty() {
            return Err(EmberError::KeyframeMismatch(
                "empty keyframe list".into(),
            ));
        }

        let mut frames = Vec::with_capacity(values.len());
        for (i, raw) in values.iter().enumerate() {
            let raw = raw.as_ref();
            let value = StyleValue::decode(raw).map_err(|e| {
                EmberError::KeyframeMismatch(format!("keyframe {i} ({raw:?}): {e}"))
            })?;
            frames.push(value);
        }

        let first = &frames[0];
        for (i, value) in frames.iter().enumerate().skip(1) {
            if value.is_color() != first.is_color() {
                return Err(EmberError::KeyframeMismatch(format!(
                    "keyframe {i} is a {}, expected a {}",
                    value.kind(),
                    first.kind()
                )));
            }
            if let (
                StyleValue::Scalar { unit: u0, .. },
                StyleValue::Scalar { unit: ui, .. },
            ) = (first, value)
            {
                if u0 != ui {
                    return Err(EmberError::KeyframeMismatch(format!(
                        "keyframe {i} has unit {ui:?}, expected {u0:?}"
                    )));
                }
            }
        }

        Ok(Self::Keyframes(frames))
    }

    /// Evaluate at a lifetime progress. Out-of-range progress is clamped.
    pub fn evaluate(&self, progress: f32) -> String {
        match self {
            Self::Fixed(value) => value.clone(),
            Self::Keyframes(frames) => {
                sample(frames, progress.clamp(0.0, 1.0)).encode()
            }
        }
    }
}
