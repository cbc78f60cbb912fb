//! Seeded random shove pulses, standing in for an operator in headless runs.

use mechanics::operator::SHOVE_MAGNITUDE;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simcore::Model;

#[derive(Debug, Clone)]
pub struct RandomDisturbance {
    rng: StdRng,
    /// Expected pulses per second
    pub rate: f64,
    /// Peak pulse force (N)
    pub magnitude: f64,
    /// Pulse length (s)
    pub duration: f64,
    remaining: f64,
    current: f64,
}

impl RandomDisturbance {
    pub fn new(seed: u64) -> Self {
        RandomDisturbance {
            rng: StdRng::seed_from_u64(seed),
            rate: 0.5,
            magnitude: SHOVE_MAGNITUDE,
            duration: 0.1,
            remaining: 0.0,
            current: 0.0,
        }
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = magnitude;
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Force to apply over the next `dt` seconds.
    pub fn sample(&mut self, dt: f64) -> f64 {
        if self.remaining > 0.0 {
            self.remaining -= dt;
            return self.current;
        }

        let p = (self.rate * dt).clamp(0.0, 1.0);
        if !self.rng.gen_bool(p) {
            self.current = 0.0;
            return 0.0;
        }

        let direction = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        self.current = direction * self.magnitude * self.rng.gen_range(0.5..=1.0);
        self.remaining = self.duration - dt;
        self.current
    }
}

impl Model for RandomDisturbance {
    fn reset(&mut self) {
        self.remaining = 0.0;
        self.current = 0.0;
    }
}
