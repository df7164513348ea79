//! Ember Style - style-string values animated over a particle's lifetime
//!
//! Three layers, leaf first:
//! - `value`: decode a style string (`#fff`, `rgba(...)`, `16px`) into a
//!   normalized `StyleValue` and encode it back
//! - `sampler`: blend an ordered keyframe list at a fractional progress
//! - `animator`: the two composed into `progress -> style string`, built
//!   once per animated property

pub mod animator;
pub mod sampler;
pub mod value;

pub use animator::PropertyAnimator;
pub use sampler::{lerp, sample};
pub use value::StyleValue;
