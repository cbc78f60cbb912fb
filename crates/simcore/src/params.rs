//! Physical and numerical constants for a cart-pole run.

use serde::{Deserialize, Serialize};

/// Settling band: both errors must stay inside it for `hold_time` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettleBand {
    /// Position error threshold (m)
    pub x_thresh: f64,
    /// Angle error threshold (rad)
    pub theta_thresh: f64,
    /// Required continuous in-band duration (s)
    pub hold_time: f64,
}

impl Default for SettleBand {
    fn default() -> Self {
        SettleBand {
            x_thresh: 0.05,
            theta_thresh: 3.0_f64.to_radians(),
            hold_time: 1.0,
        }
    }
}

/// Parameters of the cart-pole system, fixed for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartPoleParams {
    /// Cart mass (kg)
    pub cart_mass: f64,
    /// Pole mass (kg)
    pub pole_mass: f64,
    /// Pivot to pole center of mass (m); the rod is twice this long
    pub half_length: f64,
    /// Gravitational acceleration (m/s^2)
    pub gravity: f64,
    /// Cart linear damping used when friction is on, N per (m/s)
    pub cart_damping: f64,
    /// Pole rotational damping used when friction is on, N*m per (rad/s)
    pub pole_damping: f64,
    /// Actuator force limit applied to the controller output (N)
    pub max_force: f64,
    /// Limit on operator-applied forces (N)
    pub max_operator_force: f64,
    /// Fixed integration step (s)
    pub dt: f64,
    /// Physics sub-steps per frame
    pub substeps: u32,
    pub settle: SettleBand,
    /// Number of frames kept in the history buffer
    pub history_len: usize,
}

impl Default for CartPoleParams {
    fn default() -> Self {
        CartPoleParams {
            cart_mass: 1.0,
            pole_mass: 0.2,
            half_length: 0.5,
            gravity: 9.81,
            cart_damping: 0.05,
            pole_damping: 0.02,
            max_force: 50.0,
            max_operator_force: 50.0,
            dt: 1.0 / 240.0,
            substeps: 2,
            settle: SettleBand::default(),
            history_len: 900,
        }
    }
}

impl CartPoleParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_masses(mut self, cart_mass: f64, pole_mass: f64) -> Self {
        self.cart_mass = cart_mass;
        self.pole_mass = pole_mass;
        self
    }

    pub fn with_half_length(mut self, half_length: f64) -> Self {
        self.half_length = half_length;
        self
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_damping(mut self, cart_damping: f64, pole_damping: f64) -> Self {
        self.cart_damping = cart_damping;
        self.pole_damping = pole_damping;
        self
    }

    pub fn with_max_force(mut self, max_force: f64) -> Self {
        self.max_force = max_force;
        self
    }

    pub fn with_timestep(mut self, dt: f64, substeps: u32) -> Self {
        self.dt = dt;
        self.substeps = substeps;
        self
    }

    pub fn with_settle_band(mut self, settle: SettleBand) -> Self {
        self.settle = settle;
        self
    }

    pub fn total_mass(&self) -> f64 {
        self.cart_mass + self.pole_mass
    }

    /// Moment of inertia of the uniform rod about its center of mass.
    pub fn pole_inertia_com(&self) -> f64 {
        self.pole_mass * self.half_length.powi(2) / 3.0
    }
}
