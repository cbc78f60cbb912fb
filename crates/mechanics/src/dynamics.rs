//! Cart-pole dynamics
//!
//! Provides the state derivative for two regimes:
//! - Free motion: the coupled cart and pole equations for a uniform rod
//! - Constrained motion: cart held against a wall, pole swinging about a fixed pivot
//!
//! Both regimes are integrated by the same RK4 routine; only the derivative differs.

use nalgebra::Vector4;
use simcore::{
    wrap_angle, CartPoleParams, CartPoleState, Damping, Integrator, OdeSystem, RungeKutta4,
};

/// Added to inertia denominators so a vanishing pole inertia cannot divide by zero.
pub const INERTIA_EPSILON: f64 = 1e-9;

/// Which set of equations governs a sub-step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Regime {
    /// Cart free to slide under the total applied force (N).
    Free { force: f64 },
    /// Cart pinned at a wall: no translation, pole pivots about a fixed point.
    Constrained,
}

/// Angular acceleration contributed by pole rotational damping.
fn pole_damping_accel(params: &CartPoleParams, pole_damping: f64, theta_dot: f64) -> f64 {
    let torque = -pole_damping * theta_dot;
    torque / (params.pole_mass * params.half_length.powi(2) + INERTIA_EPSILON)
}

/// Derivative of the free cart-pole.
///
/// Returns `(x_dot, x_dd, theta_dot, theta_dd)`.
pub fn free_derivative(
    params: &CartPoleParams,
    state: &Vector4<f64>,
    force: f64,
    damping: Damping,
) -> Vector4<f64> {
    let (x_dot, theta, theta_dot) = (state[1], state[2], state[3]);
    let m = params.pole_mass;
    let l = params.half_length;
    let total_mass = params.total_mass();

    let force_eff = force - damping.cart * x_dot;

    let (s, c) = theta.sin_cos();

    let temp = (force_eff + m * l * theta_dot.powi(2) * s) / total_mass;
    let denom = l * (4.0 / 3.0 - m * c.powi(2) / total_mass);
    let theta_dd = (params.gravity * s - c * temp) / (denom + INERTIA_EPSILON)
        + pole_damping_accel(params, damping.pole, theta_dot);
    let x_dd = temp - m * l * theta_dd * c / total_mass;

    Vector4::new(x_dot, x_dd, theta_dot, theta_dd)
}

/// Derivative with the cart held at a wall.
///
/// Translation is frozen; the pole behaves as a rod on a fixed pivot.
pub fn constrained_derivative(
    params: &CartPoleParams,
    state: &Vector4<f64>,
    damping: Damping,
) -> Vector4<f64> {
    let (theta, theta_dot) = (state[2], state[3]);
    let l = params.half_length;

    let theta_dd = params.gravity * theta.sin() / (l * 4.0 / 3.0 + INERTIA_EPSILON)
        + pole_damping_accel(params, damping.pole, theta_dot);

    Vector4::new(0.0, 0.0, theta_dot, theta_dd)
}

/// The cart-pole as an ODE system for one sub-step.
#[derive(Debug, Clone, Copy)]
pub struct CartPoleSystem<'a> {
    pub params: &'a CartPoleParams,
    pub regime: Regime,
    pub damping: Damping,
}

impl OdeSystem for CartPoleSystem<'_> {
    fn derivative(&self, state: &Vector4<f64>) -> Vector4<f64> {
        match self.regime {
            Regime::Free { force } => free_derivative(self.params, state, force, self.damping),
            Regime::Constrained => constrained_derivative(self.params, state, self.damping),
        }
    }
}

/// Cart-pole plant with its fixed parameters.
#[derive(Debug, Clone)]
pub struct CartPole {
    pub params: CartPoleParams,
}

impl CartPole {
    pub fn new(params: CartPoleParams) -> Self {
        CartPole { params }
    }

    pub fn system(&self, regime: Regime, damping: Damping) -> CartPoleSystem<'_> {
        CartPoleSystem {
            params: &self.params,
            regime,
            damping,
        }
    }

    /// Instantaneous derivative of `state` under `regime`.
    pub fn derivative(
        &self,
        state: &CartPoleState,
        regime: Regime,
        damping: Damping,
    ) -> CartPoleState {
        let d = self.system(regime, damping).derivative(&state.to_vector());
        CartPoleState::from_vector(&d)
    }

    /// Advances `state` by one RK4 step of length `dt`, wrapping the angle afterwards.
    pub fn integrate(
        &self,
        state: &CartPoleState,
        regime: Regime,
        damping: Damping,
        dt: f64,
    ) -> CartPoleState {
        let system = self.system(regime, damping);
        let next = RungeKutta4.step(&system, &state.to_vector(), dt);

        let mut next = CartPoleState::from_vector(&next);
        next.theta = wrap_angle(next.theta);
        next
    }
}
