//! Lightweight xorshift32 PRNG — no external crate needed

use ember_core::Vec2;

pub struct EffectRng {
    state: u32,
}

impl EffectRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() as f32) / (u32::MAX as f32)
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns a velocity at a random angle within `spread_deg` degrees of
    /// `direction_deg`, with the given speed. A 360 degree spread covers the
    /// full circle.
    pub fn polar(&mut self, direction_deg: f32, spread_deg: f32, speed: f32) -> Vec2 {
        let half = spread_deg * 0.5;
        let angle = direction_deg + self.range(-half, half);
        Vec2::from_angle_deg(angle) * speed
    }
}

impl Default for EffectRng {
    fn default() -> Self {
        Self::new(0xDEAD_BEEF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = EffectRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!(v >= 0.0 && v < 10.0);
        }
    }

    #[test]
    fn polar_speed_preserved() {
        let mut rng = EffectRng::new(123);
        for _ in 0..100 {
            let v = rng.polar(0.0, 360.0, 5.0);
            assert!((v.length() - 5.0).abs() < 1e-3);
        }
    }

    #[test]
    fn polar_zero_spread_follows_direction() {
        let mut rng = EffectRng::new(99);
        let v = rng.polar(90.0, 0.0, 1.0);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 1.0).abs() < 1e-5);
    }
}
