//! Position PID controller for the cart
//!
//! Regulates cart position only. The integral accumulates over the spacing of
//! the simulated time `t` passed to successive calls, and the derivative acts on
//! measured cart velocity.

use serde::{Deserialize, Serialize};
use simcore::{CartPoleState, ForceController, Model, Reference};

/// Gains of the position controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PidGains {
    /// Proportional gain, N per m of position error
    pub k_p: f64,
    /// Integral gain, N per (m*s) of accumulated error
    pub k_i: f64,
    /// Derivative gain, N per (m/s) of cart velocity
    pub k_d: f64,
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            k_p: 5.0,
            k_i: 2.0,
            k_d: 3.0,
        }
    }
}

impl PidGains {
    pub fn new(k_p: f64, k_i: f64, k_d: f64) -> Self {
        Self { k_p, k_i, k_d }
    }

    /// Create a P-only controller
    pub fn p(k_p: f64) -> Self {
        Self::new(k_p, 0.0, 0.0)
    }

    /// Create a PD controller
    pub fn pd(k_p: f64, k_d: f64) -> Self {
        Self::new(k_p, 0.0, k_d)
    }
}

/// PID on cart position with state
///
/// The angle reference is accepted but does not enter the control law: the
/// controller regulates position alone.
#[derive(Debug, Clone, Default)]
pub struct PositionPid {
    /// Live-tunable gains; changes take effect on the next call
    pub gains: PidGains,
    integral: f64,
    prev_t: f64,
}

impl PositionPid {
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            integral: 0.0,
            prev_t: 0.0,
        }
    }

    /// Get the accumulated position-error integral (m*s)
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Time of the previous call
    pub fn prev_t(&self) -> f64 {
        self.prev_t
    }
}

impl Model for PositionPid {
    /// Clears the integral and the previous-call time.
    ///
    /// Must be called whenever the driving clock restarts, or the next call
    /// sees a bogus time step.
    fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_t = 0.0;
    }
}

impl ForceController for PositionPid {
    fn command(&mut self, state: &CartPoleState, t: f64, reference: &Reference) -> f64 {
        let dt = t - self.prev_t;
        self.prev_t = t;

        let x_err = reference.x - state.x;
        self.integral += x_err * dt;

        let u_p = self.gains.k_p * x_err;
        let u_i = self.gains.k_i * self.integral;
        let u_d = -self.gains.k_d * state.x_dot;

        u_p + u_i + u_d
    }
}
