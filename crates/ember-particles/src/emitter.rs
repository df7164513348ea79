//! Emitter configuration, particle templates and runtime spawn state
//!
//! Template fields are either fixed values or zero-arg resolvers invoked
//! fresh at every spawn — that is the point where per-particle randomness
//! is realized. Configurations can be built in code or parsed from a TOML
//! table; TOML ranges (`ttl_min`/`ttl_max`, `speed_min`/`speed_max`) become
//! resolvers over a per-emitter rng.

use crate::particle::UpdateHook;
use crate::rand::EffectRng;
use ember_core::{EmberError, Result, Vec2};
use ember_style::PropertyAnimator;
use std::cell::RefCell;
use std::rc::Rc;

/// A template field: `Fixed` is taken as-is, `Resolver` is invoked fresh at
/// each spawn.
pub enum Prop<T> {
    Fixed(T),
    Resolver(Rc<dyn Fn() -> T>),
}

impl<T: Clone> Prop<T> {
    pub fn resolver(f: impl Fn() -> T + 'static) -> Self {
        Self::Resolver(Rc::new(f))
    }

    pub fn resolve(&self) -> T {
        match self {
            Self::Fixed(value) => value.clone(),
            Self::Resolver(f) => f(),
        }
    }
}

impl<T: Clone> Clone for Prop<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Fixed(value) => Self::Fixed(value.clone()),
            Self::Resolver(f) => Self::Resolver(f.clone()),
        }
    }
}

impl<T> From<T> for Prop<T> {
    fn from(value: T) -> Self {
        Self::Fixed(value)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Prop<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Self::Resolver(_) => f.debug_tuple("Resolver").field(&"<fn>").finish(),
        }
    }
}

/// The value of one style property in a template: a constant string or an
/// ordered keyframe list spanning the particle's lifetime.
#[derive(Clone, Debug)]
pub enum StyleSpec {
    Value(String),
    Keyframes(Vec<String>),
}

impl StyleSpec {
    pub(crate) fn build(&self) -> Result<PropertyAnimator> {
        match self {
            Self::Value(s) => Ok(PropertyAnimator::fixed(s.clone())),
            Self::Keyframes(list) => PropertyAnimator::from_keyframes(list),
        }
    }
}

/// Configuration for the particles an emitter spawns. Every field may be a
/// fixed value or a resolver.
#[derive(Clone)]
pub struct ParticleTemplate {
    /// Time to live in seconds
    pub ttl: Prop<f32>,
    pub velocity: Prop<Vec2>,
    /// Spawn offset relative to the emitter position
    pub offset: Prop<Vec2>,
    pub text: Option<Prop<String>>,
    /// Property name to style value, in rendering-irrelevant order
    pub style: Vec<(String, Prop<StyleSpec>)>,
    /// Per-frame hook, shared by every particle from this template
    pub on_update: Option<UpdateHook>,
}

impl std::fmt::Debug for ParticleTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleTemplate")
            .field("ttl", &self.ttl)
            .field("velocity", &self.velocity)
            .field("offset", &self.offset)
            .field("text", &self.text)
            .field("style", &self.style)
            .field("on_update", &self.on_update.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Default for ParticleTemplate {
    fn default() -> Self {
        Self {
            ttl: Prop::Fixed(1.0),
            velocity: Prop::Fixed(Vec2::ZERO),
            offset: Prop::Fixed(Vec2::ZERO),
            text: None,
            style: Vec::new(),
            on_update: None,
        }
    }
}

impl ParticleTemplate {
    /// Resolve every field fresh for one spawn, building the animators.
    ///
    /// A bad style entry fails only this particle, not the emitter.
    pub(crate) fn resolve(&self) -> Result<ResolvedParticle> {
        let mut animators = Vec::with_capacity(self.style.len());
        for (name, spec) in &self.style {
            let animator = spec.resolve().build().map_err(|e| {
                EmberError::KeyframeMismatch(format!("property {name:?}: {e}"))
            })?;
            animators.push((name.clone(), animator));
        }
        Ok(ResolvedParticle {
            ttl: self.ttl.resolve(),
            velocity: self.velocity.resolve(),
            offset: self.offset.resolve(),
            text: self.text.as_ref().map(Prop::resolve),
            animators,
            on_update: self.on_update.clone(),
        })
    }
}

/// One spawn's worth of resolved template values
pub(crate) struct ResolvedParticle {
    pub ttl: f32,
    pub velocity: Vec2,
    pub offset: Vec2,
    pub text: Option<String>,
    pub animators: Vec<(String, PropertyAnimator)>,
    pub on_update: Option<UpdateHook>,
}

impl std::fmt::Debug for ResolvedParticle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedParticle")
            .field("ttl", &self.ttl)
            .field("velocity", &self.velocity)
            .field("offset", &self.offset)
            .field("text", &self.text)
            .field("animators", &self.animators)
            .field("on_update", &self.on_update.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Configuration for one emitter
#[derive(Clone, Debug)]
pub struct EmitterConfig {
    /// Spawn origin; a resolver models "emit from wherever the pointer is"
    pub position: Prop<Vec2>,
    /// Minimum seconds between spawns, must be positive
    pub emit_every: f32,
    /// Total spawn budget; None means unbounded
    pub max_emissions: Option<u32>,
    pub particle: ParticleTemplate,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            position: Prop::Fixed(Vec2::ZERO),
            emit_every: 0.1,
            max_emissions: None,
            particle: ParticleTemplate::default(),
        }
    }
}

impl EmitterConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.emit_every > 0.0 && self.emit_every.is_finite()) {
            return Err(EmberError::Config(format!(
                "emit_every must be a positive number, got {}",
                self.emit_every
            )));
        }
        if self.max_emissions == Some(0) {
            return Err(EmberError::Config(
                "max_emissions must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }

    /// Parse an EmitterConfig from a TOML table.
    ///
    /// Required: `emit_every` and a `[particle]` table. Range forms
    /// (`ttl_min`/`ttl_max`, `speed_min`/`speed_max` with optional
    /// `direction`/`spread` in degrees) become per-spawn resolvers.
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let emit_every = table
            .get("emit_every")
            .map(|v| toml_f32(v, 0.0))
            .ok_or_else(|| EmberError::Config("missing required field: emit_every".into()))?;

        let particle_table = table
            .get("particle")
            .and_then(|v| v.as_table())
            .ok_or_else(|| EmberError::Config("missing required [particle] table".into()))?;

        let position = table
            .get("position")
            .map(|v| toml_vec2(v, Vec2::ZERO))
            .unwrap_or(Vec2::ZERO);

        let max_emissions = table
            .get("max_emissions")
            .and_then(|v| v.as_integer())
            .map(|n| n.max(0) as u32);

        let config = Self {
            position: Prop::Fixed(position),
            emit_every,
            max_emissions,
            particle: particle_from_toml(particle_table)?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn particle_from_toml(table: &toml::value::Table) -> Result<ParticleTemplate> {
    let mut template = ParticleTemplate::default();
    // One rng shared by all of this emitter's range resolvers
    let rng = Rc::new(RefCell::new(EffectRng::default()));

    if let (Some(min), Some(max)) = (table.get("ttl_min"), table.get("ttl_max")) {
        let (min, max) = (toml_f32(min, 0.0), toml_f32(max, 0.0));
        let rng = rng.clone();
        template.ttl = Prop::resolver(move || rng.borrow_mut().range(min, max));
    } else if let Some(v) = table.get("ttl") {
        template.ttl = Prop::Fixed(toml_f32(v, 1.0));
    }

    if let Some(v) = table.get("velocity") {
        template.velocity = Prop::Fixed(toml_vec2(v, Vec2::ZERO));
    } else if let (Some(min), Some(max)) = (table.get("speed_min"), table.get("speed_max")) {
        let (min, max) = (toml_f32(min, 0.0), toml_f32(max, 0.0));
        let direction = table.get("direction").map(|v| toml_f32(v, 0.0)).unwrap_or(0.0);
        let spread = table.get("spread").map(|v| toml_f32(v, 360.0)).unwrap_or(360.0);
        let rng = rng.clone();
        template.velocity = Prop::resolver(move || {
            let mut rng = rng.borrow_mut();
            let speed = rng.range(min, max);
            rng.polar(direction, spread, speed)
        });
    }

    if let Some(v) = table.get("offset") {
        template.offset = Prop::Fixed(toml_vec2(v, Vec2::ZERO));
    }

    if let Some(text) = table.get("text").and_then(|v| v.as_str()) {
        template.text = Some(Prop::Fixed(text.to_string()));
    }

    if let Some(style) = table.get("style").and_then(|v| v.as_table()) {
        for (name, value) in style {
            let spec = match value {
                toml::Value::String(s) => StyleSpec::Value(s.clone()),
                toml::Value::Array(items) => {
                    let frames = items
                        .iter()
                        .map(|item| {
                            item.as_str().map(str::to_string).ok_or_else(|| {
                                EmberError::Config(format!(
                                    "style property {name:?}: keyframes must be strings"
                                ))
                            })
                        })
                        .collect::<Result<Vec<String>>>()?;
                    StyleSpec::Keyframes(frames)
                }
                _ => {
                    return Err(EmberError::Config(format!(
                        "style property {name:?} must be a string or an array of strings"
                    )))
                }
            };
            template.style.push((name.clone(), Prop::Fixed(spec)));
        }
    }

    Ok(template)
}

/// Runtime state for one registered emitter
pub struct EmitterState {
    pub config: EmitterConfig,
    pub emissions_so_far: u32,
    /// Accumulated time; the spawn loop subtracts `emit_every` per spawn so
    /// the fractional remainder carries over (catch-up semantics)
    pub time_since_last_emission: f32,
}

impl EmitterState {
    pub fn new(config: EmitterConfig) -> Self {
        Self {
            config,
            emissions_so_far: 0,
            time_since_last_emission: 0.0,
        }
    }

    /// True once the emission budget is spent (never for unbounded emitters)
    pub fn budget_exhausted(&self) -> bool {
        self.config
            .max_emissions
            .is_some_and(|max| self.emissions_so_far >= max)
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn toml_vec2(v: &toml::Value, default: Vec2) -> Vec2 {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 2 {
            return Vec2::new(toml_f32(&arr[0], default.x), toml_f32(&arr[1], default.y));
        }
    }
    default
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EmitterConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_cadence() {
        let config = EmitterConfig {
            emit_every: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            EmberError::Config(_)
        ));
    }

    #[test]
    fn validate_rejects_zero_budget() {
        let config = EmitterConfig {
            max_emissions: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            EmberError::Config(_)
        ));
    }

    #[test]
    fn resolver_fields_resolve_fresh() {
        let counter = std::cell::Cell::new(0.0f32);
        let template = ParticleTemplate {
            ttl: Prop::resolver(move || {
                counter.set(counter.get() + 1.0);
                counter.get()
            }),
            ..Default::default()
        };
        assert_eq!(template.resolve().unwrap().ttl, 1.0);
        assert_eq!(template.resolve().unwrap().ttl, 2.0);
    }

    #[test]
    fn bad_style_entry_fails_resolution() {
        let template = ParticleTemplate {
            style: vec![(
                "backgroundColor".into(),
                Prop::Fixed(StyleSpec::Keyframes(vec!["#fff".into(), "notacolor".into()])),
            )],
            ..Default::default()
        };
        assert!(matches!(
            template.resolve().unwrap_err(),
            EmberError::KeyframeMismatch(_)
        ));
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r##"
emit_every = 0.032
max_emissions = 8
position = [320, 240]

[particle]
ttl_min = 0.5
ttl_max = 2.5
speed_min = 100.0
speed_max = 500.0

[particle.style]
backgroundColor = ["#fff", "rgba(255, 166, 36, 0.5)"]
width = "16px"
"##;
        let table: toml::value::Table = toml::from_str(toml_str).unwrap();
        let config = EmitterConfig::from_toml(&table).unwrap();
        assert!((config.emit_every - 0.032).abs() < 1e-6);
        assert_eq!(config.max_emissions, Some(8));
        assert_eq!(config.position.resolve(), Vec2::new(320.0, 240.0));

        let resolved = config.particle.resolve().unwrap();
        assert!(resolved.ttl >= 0.5 && resolved.ttl < 2.5);
        let speed = resolved.velocity.length();
        assert!(speed >= 100.0 && speed < 500.0);
        assert_eq!(resolved.animators.len(), 2);
    }

    #[test]
    fn from_toml_requires_cadence_and_particle() {
        let table: toml::value::Table = toml::from_str("[particle]").unwrap();
        assert!(matches!(
            EmitterConfig::from_toml(&table).unwrap_err(),
            EmberError::Config(_)
        ));

        let table: toml::value::Table = toml::from_str("emit_every = 0.1").unwrap();
        assert!(matches!(
            EmitterConfig::from_toml(&table).unwrap_err(),
            EmberError::Config(_)
        ));
    }

    #[test]
    fn from_toml_integer_float_coercion() {
        let toml_str = r#"
emit_every = 1

[particle]
ttl = 2
velocity = [10, -20.5]
"#;
        let table: toml::value::Table = toml::from_str(toml_str).unwrap();
        let config = EmitterConfig::from_toml(&table).unwrap();
        assert!((config.emit_every - 1.0).abs() < 1e-6);
        let resolved = config.particle.resolve().unwrap();
        assert!((resolved.ttl - 2.0).abs() < 1e-6);
        assert_eq!(resolved.velocity, Vec2::new(10.0, -20.5));
    }

    #[test]
    fn from_toml_rejects_non_string_keyframes() {
        let toml_str = r#"
emit_every = 0.1

[particle.style]
width = [1, 2]
"#;
        let table: toml::value::Table = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            EmitterConfig::from_toml(&table).unwrap_err(),
            EmberError::Config(_)
        ));
    }

    #[test]
    fn budget_exhaustion() {
        let mut state = EmitterState::new(EmitterConfig {
            max_emissions: Some(2),
            ..Default::default()
        });
        assert!(!state.budget_exhausted());
        state.emissions_so_far = 2;
        assert!(state.budget_exhausted());

        let unbounded = EmitterState::new(EmitterConfig::default());
        assert!(!unbounded.budget_exhausted());
    }
}
