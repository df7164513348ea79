//! The per-frame tick: spawning, physics, rendering pushes and cleanup

use crate::emitter::{EmitterConfig, EmitterState};
use crate::particle::Particle;
use crate::surface::RenderSurface;
use ember_core::{EmitterId, ParticleId, Result};
use std::collections::HashMap;

/// Manager construction options
#[derive(Clone, Copy, Debug)]
pub struct ManagerConfig {
    /// Global particle cap; the oldest particles are evicted on overflow
    pub max_particles: usize,
    /// Downward acceleration applied to every particle, in units/s^2
    pub gravity: f32,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_particles: 10_000,
            gravity: 100.0,
        }
    }
}

/// Owns all live emitters and particles and drives the global tick.
///
/// Single-threaded and cooperative: all mutation happens inside `tick` or
/// through `&mut self` entry points, so registrations made between ticks
/// take effect on the next tick and nothing is observed half-built.
pub struct Manager<S: RenderSurface> {
    surface: S,
    config: ManagerConfig,
    emitters: HashMap<EmitterId, EmitterState>,
    /// Spawn order, oldest first — eviction drains from the front
    particles: Vec<Particle>,
}

impl<S: RenderSurface> Manager<S> {
    pub fn new(surface: S, config: ManagerConfig) -> Self {
        Self {
            surface,
            config,
            emitters: HashMap::new(),
            particles: Vec::new(),
        }
    }

    /// Validate and register a new emitter. It starts spawning on the next
    /// tick; the returned handle can remove it later.
    pub fn create_emitter(&mut self, config: EmitterConfig) -> Result<EmitterId> {
        config.validate()?;
        let id = EmitterId::new();
        self.emitters.insert(id, EmitterState::new(config));
        Ok(id)
    }

    /// Explicitly remove an emitter. Its already-spawned particles live on
    /// until they expire. Returns false for an unknown handle.
    pub fn remove_emitter(&mut self, id: EmitterId) -> bool {
        self.emitters.remove(&id).is_some()
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Advance the whole engine by `dt` seconds. Called once per frame by
    /// the host loop; never fails for a well-formed manager — faulty
    /// particles are warned about and skipped.
    pub fn tick(&mut self, dt: f32) {
        let surface = &mut self.surface;
        let emitters = &mut self.emitters;
        let particles = &mut self.particles;

        // Spawn phase: each emitter catches up on its cadence. Subtracting
        // the cadence per spawn keeps the fractional remainder, so a dt
        // spike still yields the right number of particles.
        for (&id, state) in emitters.iter_mut() {
            state.time_since_last_emission += dt;
            while state.time_since_last_emission >= state.config.emit_every
                && !state.budget_exhausted()
            {
                state.time_since_last_emission -= state.config.emit_every;
                // Counted even when construction fails below, so a bad
                // template cannot outlive its budget
                state.emissions_so_far += 1;

                let origin = state.config.position.resolve();
                match state.config.particle.resolve() {
                    Ok(resolved) => {
                        let node = surface.create_node();
                        particles.push(Particle {
                            id: ParticleId::new(),
                            emitter: id,
                            node,
                            position: origin + resolved.offset,
                            velocity: resolved.velocity,
                            age: 0.0,
                            ttl: resolved.ttl,
                            frame_number: 0,
                            text: resolved.text,
                            animators: resolved.animators,
                            on_update: resolved.on_update,
                        });
                    }
                    Err(e) => {
                        println!("[particles] Emitter {id}: dropped one particle: {e}");
                    }
                }
            }
        }

        // Advance phase: physics, hooks, then rendering pushes
        for p in particles.iter_mut() {
            if p.advance(dt, self.config.gravity) {
                push_particle(surface, p);
            }
        }

        // Retire phase: expired particles release their nodes
        particles.retain(|p| {
            if p.expired() {
                surface.release_node(p.node);
                false
            } else {
                true
            }
        });

        // Cap enforcement, at most once per tick: evict oldest first so
        // recently spawned particles survive
        let excess = particles.len().saturating_sub(self.config.max_particles);
        if excess > 0 {
            for p in particles.drain(..excess) {
                surface.release_node(p.node);
            }
        }

        // Emitters with a spent budget linger until their last particle
        // has expired, then go away
        emitters.retain(|id, state| {
            let finished = state.budget_exhausted()
                && !particles.iter().any(|p| p.emitter == *id);
            if finished {
                println!("[particles] Emitter {id} finished");
            }
            !finished
        });
    }
}

/// Evaluate every animator at the particle's lifetime progress and push the
/// results, plus the position-derived transform and any text.
fn push_particle<S: RenderSurface>(surface: &mut S, p: &Particle) {
    let progress = p.age_ratio();
    for (name, animator) in p.animators() {
        surface.set_node_property(p.node, name, &animator.evaluate(progress));
    }
    // Motion is simulated, not declaratively authored: the offset always
    // comes from integrated position, independent of the animator map
    surface.set_node_property(
        p.node,
        "transform",
        &format!("translate({}px, {}px)", p.position.x, p.position.y),
    );
    if let Some(text) = &p.text {
        surface.set_node_property(p.node, "text", text);
    }
}
