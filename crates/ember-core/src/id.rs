//! Stable identifiers for emitters, particles and render nodes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident, $counter:ident) => {
        /// Global counter for generating unique IDs
        static $counter: AtomicU64 = AtomicU64::new(1);

        $(#[$doc])*
        #[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Mint a new unique id
            pub fn new() -> Self {
                Self($counter.fetch_add(1, Ordering::Relaxed))
            }

            /// Create an id from a raw value (for testing)
            pub fn from_raw(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw u64 value
            pub fn raw(&self) -> u64 {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// A stable handle to a registered emitter.
    ///
    /// Returned by `Manager::create_emitter` and used for explicit removal;
    /// never recycled within a process.
    EmitterId,
    NEXT_EMITTER_ID
);

define_id!(
    /// A stable identifier for one live particle.
    ParticleId,
    NEXT_PARTICLE_ID
);

define_id!(
    /// An opaque handle to a node owned by the render surface.
    ///
    /// The engine never interprets the value; it only hands it back to the
    /// surface that minted it.
    NodeHandle,
    NEXT_NODE_HANDLE
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_generation() {
        let id1 = EmitterId::new();
        let id2 = EmitterId::new();
        assert_ne!(id1, id2);
        assert!(id2.0 > id1.0);
    }

    #[test]
    fn test_from_raw() {
        let id = ParticleId::from_raw(42);
        assert_eq!(id.raw(), 42);
    }

    #[test]
    fn test_node_handles_unique() {
        let a = NodeHandle::new();
        let b = NodeHandle::new();
        assert_ne!(a, b);
    }
}
