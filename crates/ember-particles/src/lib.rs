//! Ember Particles - emitters, particle physics and the per-frame tick
//!
//! Provides a style-keyframe particle simulation with:
//! - Timed emitter cadences with catch-up spawning and emission budgets
//! - Per-spawn template resolution (fixed values or zero-arg resolvers)
//! - Euler position/velocity/lifetime integration
//! - Per-property style animators evaluated at normalized lifetime progress
//! - A global particle cap with oldest-first eviction
//!
//! Rendering is delegated to a host-supplied [`RenderSurface`]; the engine
//! never owns a window or a frame source.

pub mod clock;
pub mod emitter;
pub mod manager;
pub mod particle;
pub mod rand;
pub mod surface;

pub use clock::FrameClock;
pub use emitter::{EmitterConfig, EmitterState, ParticleTemplate, Prop, StyleSpec};
pub use manager::{Manager, ManagerConfig};
pub use particle::{Particle, UpdateHook};
pub use rand::EffectRng;
pub use surface::{RecordingSurface, RenderSurface};
