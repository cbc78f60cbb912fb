use nalgebra::Vector4;
use serde::{Deserialize, Serialize};

use crate::params::CartPoleParams;

// Mechanical State
/// Cart-pole state. `theta` is measured from upright and kept in (-pi, pi].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartPoleState {
    /// Cart position (m)
    pub x: f64,
    /// Cart velocity (m/s)
    pub x_dot: f64,
    /// Pole angle from upright (rad)
    pub theta: f64,
    /// Pole angular velocity (rad/s)
    pub theta_dot: f64,
}

impl CartPoleState {
    pub fn new(x: f64, x_dot: f64, theta: f64, theta_dot: f64) -> Self {
        CartPoleState {
            x,
            x_dot,
            theta,
            theta_dot,
        }
    }

    pub fn to_vector(&self) -> Vector4<f64> {
        Vector4::new(self.x, self.x_dot, self.theta, self.theta_dot)
    }

    pub fn from_vector(v: &Vector4<f64>) -> Self {
        CartPoleState::new(v[0], v[1], v[2], v[3])
    }

    /// Named components, in storage order.
    pub fn components(&self) -> [(&'static str, f64); 4] {
        [
            ("x", self.x),
            ("x_dot", self.x_dot),
            ("theta", self.theta),
            ("theta_dot", self.theta_dot),
        ]
    }

    /// First component that is NaN or infinite, if any.
    pub fn first_non_finite(&self) -> Option<(&'static str, f64)> {
        self.components()
            .into_iter()
            .find(|(_, value)| !value.is_finite())
    }
}

/// Reference targets for the cart position and pole angle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Reference {
    pub x: f64,
    pub theta: f64,
}

impl Reference {
    pub fn new(x: f64, theta: f64) -> Self {
        Reference { x, theta }
    }
}

/// Damping coefficients passed per call, so friction can be switched off
/// without touching the parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Damping {
    /// Cart linear damping, N per (m/s)
    pub cart: f64,
    /// Pole rotational damping, N*m per (rad/s)
    pub pole: f64,
}

impl Damping {
    pub fn new(cart: f64, pole: f64) -> Self {
        Damping { cart, pole }
    }

    pub fn off() -> Self {
        Damping::default()
    }

    pub fn from_params(params: &CartPoleParams) -> Self {
        Damping::new(params.cart_damping, params.pole_damping)
    }
}

/// Track boundaries for the cart (m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackLimits {
    pub x_min: f64,
    pub x_max: f64,
}

impl TrackLimits {
    pub fn new(x_min: f64, x_max: f64) -> Self {
        TrackLimits { x_min, x_max }
    }

    pub fn symmetric(half_width: f64) -> Self {
        TrackLimits::new(-half_width, half_width)
    }

    pub fn clamp(&self, x: f64) -> f64 {
        crate::math::clamp(x, self.x_min, self.x_max)
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.x_min && x <= self.x_max
    }
}

impl Default for TrackLimits {
    fn default() -> Self {
        // 742 px either side of center at 170 px/m
        TrackLimits::symmetric(742.0 / 170.0)
    }
}

// General Traits
pub trait Model {
    fn reset(&mut self);
}

/// A stateful feedback law producing a commanded cart force.
///
/// The returned force is unsaturated; actuator limits are applied by the caller.
pub trait ForceController: Model {
    fn command(&mut self, state: &CartPoleState, t: f64, reference: &Reference) -> f64;
}
