use nalgebra::Vector4;

/// A first-order ODE over the four-component cart-pole state vector.
pub trait OdeSystem {
    /// Time derivative of `state`.
    fn derivative(&self, state: &Vector4<f64>) -> Vector4<f64>;
}

/// A generic fixed-step integration strategy.
pub trait Integrator {
    /// Advances `state` by one step of length `dt` and returns the new state.
    fn step<S: OdeSystem + ?Sized>(
        &self,
        system: &S,
        state: &Vector4<f64>,
        dt: f64,
    ) -> Vector4<f64>;
}

/// Classic fourth-order Runge-Kutta integrator.
///
/// Evaluates the system at the start, twice at the midpoint and at the end of
/// the step, then combines the slopes with weights 1/6, 1/3, 1/3, 1/6.
/// The integrator knows nothing about which system it drives; regime selection
/// belongs to the `OdeSystem` implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKutta4;

impl Integrator for RungeKutta4 {
    fn step<S: OdeSystem + ?Sized>(
        &self,
        system: &S,
        state: &Vector4<f64>,
        dt: f64,
    ) -> Vector4<f64> {
        let half = 0.5 * dt;

        let k1 = system.derivative(state);
        let k2 = system.derivative(&(state + k1 * half));
        let k3 = system.derivative(&(state + k2 * half));
        let k4 = system.derivative(&(state + k3 * dt));

        state + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
    }
}
