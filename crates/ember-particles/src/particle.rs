//! Particle state and per-tick physics integration

use ember_core::{EmitterId, NodeHandle, ParticleId, Vec2};
use ember_style::PropertyAnimator;
use std::rc::Rc;

/// Per-frame hook invoked after physics integration and before rendering is
/// pushed, with the particle itself as its only input.
pub type UpdateHook = Rc<dyn Fn(&mut Particle)>;

/// One simulated entity: motion state, lifecycle state and the animators
/// driving its visual properties.
///
/// Lifecycle is `Spawned -> Alive -> Expired`, terminal; expiry releases the
/// rendering node.
pub struct Particle {
    pub id: ParticleId,
    /// The emitter this particle was spawned from
    pub emitter: EmitterId,
    /// The render node this particle exclusively owns
    pub node: NodeHandle,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Seconds lived so far
    pub age: f32,
    /// Time to live, resolved once at spawn
    pub ttl: f32,
    /// Ticks survived, for frame-gated hook effects
    pub frame_number: u64,
    /// Free-form text, independently settable (typically from the hook)
    pub text: Option<String>,
    pub(crate) animators: Vec<(String, PropertyAnimator)>,
    pub(crate) on_update: Option<UpdateHook>,
}

impl Particle {
    /// Normalized lifetime progress in [0, 1]
    pub fn age_ratio(&self) -> f32 {
        if self.ttl <= 0.0 {
            1.0
        } else {
            (self.age / self.ttl).min(1.0)
        }
    }

    pub fn expired(&self) -> bool {
        self.age >= self.ttl
    }

    /// Advance one tick. Returns false once the particle has expired;
    /// an expired particle gets no physics and no further hook calls.
    pub fn advance(&mut self, dt: f32, gravity: f32) -> bool {
        self.age += dt;
        if self.expired() {
            return false;
        }

        // Explicit Euler — fine for short lifetimes, no sub-stepping
        self.velocity.y += gravity * dt;
        self.position += self.velocity * dt;
        self.frame_number += 1;

        if let Some(hook) = self.on_update.clone() {
            hook(self);
        }
        true
    }

    /// The animated properties, in template order
    pub fn animators(&self) -> impl Iterator<Item = (&str, &PropertyAnimator)> {
        self.animators.iter().map(|(name, anim)| (name.as_str(), anim))
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn test_particle(ttl: f32) -> Particle {
        Particle {
            id: ParticleId::new(),
            emitter: EmitterId::new(),
            node: NodeHandle::new(),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            age: 0.0,
            ttl,
            frame_number: 0,
            text: None,
            animators: Vec::new(),
            on_update: None,
        }
    }

    #[test]
    fn expires_exactly_at_ttl() {
        let mut p = test_particle(1.0);
        assert!(p.advance(0.5, 0.0));
        assert!(!p.expired());
        assert!(!p.advance(0.5, 0.0));
        assert!(p.expired());
    }

    #[test]
    fn gravity_accelerates_downward() {
        let mut p = test_particle(10.0);
        p.velocity = Vec2::new(10.0, 0.0);
        p.advance(1.0, 100.0);
        assert!((p.velocity.y - 100.0).abs() < 1e-4);
        assert!((p.position.x - 10.0).abs() < 1e-4);
        // Velocity integrates before position
        assert!((p.position.y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn expired_particle_gets_no_physics() {
        let mut p = test_particle(0.25);
        p.velocity = Vec2::new(5.0, 0.0);
        assert!(!p.advance(0.5, 100.0));
        assert_eq!(p.position, Vec2::ZERO);
        assert_eq!(p.frame_number, 0);
    }

    #[test]
    fn hook_runs_after_physics_each_tick() {
        let seen = Rc::new(Cell::new(0u64));
        let seen_in_hook = seen.clone();
        let mut p = test_particle(10.0);
        p.on_update = Some(Rc::new(move |p: &mut Particle| {
            seen_in_hook.set(p.frame_number);
            if p.frame_number % 2 == 0 {
                p.set_text("#");
            }
        }));

        p.advance(0.1, 0.0);
        assert_eq!(seen.get(), 1);
        assert_eq!(p.text, None);

        p.advance(0.1, 0.0);
        assert_eq!(seen.get(), 2);
        assert_eq!(p.text.as_deref(), Some("#"));
    }

    #[test]
    fn age_ratio_clamps() {
        let mut p = test_particle(2.0);
        assert_eq!(p.age_ratio(), 0.0);
        p.age = 1.0;
        assert_eq!(p.age_ratio(), 0.5);
        p.age = 5.0;
        assert_eq!(p.age_ratio(), 1.0);
    }
}
