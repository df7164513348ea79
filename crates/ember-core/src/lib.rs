//! Ember Core - Foundational types for the ember particle engine
//!
//! This crate provides the types every other ember crate depends on:
//! - `EmitterId`, `ParticleId`, `NodeHandle` - Stable identifiers
//! - `Vec2` - 2D spatial math
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{EmberError, Result};
pub use id::{EmitterId, NodeHandle, ParticleId};
pub use types::Vec2;
