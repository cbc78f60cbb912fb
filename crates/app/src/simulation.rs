//! Fixed-step simulation loop
//!
//! Sequences one physics sub-step as:
//! controller -> actuator clamp -> add external force -> contact check ->
//! pre-clamp -> RK4 -> post-clamp -> advance time -> metrics.
//! A frame runs `substeps` of these and appends one history sample.

use control::PositionPid;
use log::{debug, info, warn};
use mechanics::{push_force, CartPole, ConstraintResolver, Contact, PointerInput};
use simcore::{
    clamp, wrap_angle, CartPoleParams, CartPoleState, Damping, ForceController, Model, Reference,
    SimError, SimResult, TrackLimits,
};

use crate::config::SimConfig;
use crate::history::History;
use crate::metrics::{Metrics, MetricsTracker};

/// Reference position nudge (m)
pub const REF_X_STEP: f64 = 0.01;
/// Reference angle nudge (deg)
pub const REF_THETA_STEP_DEG: f64 = 0.5;

/// Outputs of one sub-step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Time at the end of the sub-step (s)
    pub t: f64,
    /// Controller output before the actuator limit (N)
    pub raw_force: f64,
    /// Controller output after the actuator limit (N)
    pub applied_force: f64,
    /// Applied controller force plus external force (N)
    pub total_force: f64,
    /// Whether the raw controller force exceeded the actuator limit
    pub saturated: bool,
    pub contact: Contact,
    pub metrics: Metrics,
}

/// The cart-pole, its controller and its metrics, advanced in fixed steps.
pub struct Simulation<C: ForceController = PositionPid> {
    plant: CartPole,
    resolver: ConstraintResolver,
    controller: C,
    metrics: MetricsTracker,
    history: History,
    state: CartPoleState,
    initial_state: CartPoleState,
    t: f64,
    reference: Reference,
    friction_on: bool,
    paused: bool,
    last_contact: Contact,
    last_saturated: bool,
}

impl Simulation<PositionPid> {
    pub fn from_config(config: &SimConfig) -> Self {
        Simulation::new(
            config.params.clone(),
            config.track,
            PositionPid::new(config.gains),
            config.initial_state,
        )
    }
}

impl<C: ForceController> Simulation<C> {
    pub fn new(
        params: CartPoleParams,
        track: TrackLimits,
        controller: C,
        initial_state: CartPoleState,
    ) -> Self {
        let metrics = MetricsTracker::new(params.settle);
        let history = History::new(params.history_len);
        Simulation {
            plant: CartPole::new(params),
            resolver: ConstraintResolver::new(track),
            controller,
            metrics,
            history,
            state: initial_state,
            initial_state,
            t: 0.0,
            reference: Reference::default(),
            friction_on: true,
            paused: false,
            last_contact: Contact::None,
            last_saturated: false,
        }
    }

    pub fn params(&self) -> &CartPoleParams {
        &self.plant.params
    }

    pub fn track(&self) -> &TrackLimits {
        &self.resolver.track
    }

    pub fn state(&self) -> &CartPoleState {
        &self.state
    }

    /// Overwrite the state, e.g. to place the cart for a scenario.
    pub fn set_state(&mut self, state: CartPoleState) {
        self.state = state;
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.metrics()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn reference(&self) -> Reference {
        self.reference
    }

    /// Sets the targets, keeping `x` on the track and `theta` wrapped.
    pub fn set_reference(&mut self, x: f64, theta: f64) {
        self.reference = Reference::new(self.resolver.track.clamp(x), wrap_angle(theta));
    }

    /// Moves the targets by whole nudge increments.
    pub fn nudge_reference(&mut self, x_steps: i32, theta_steps: i32) {
        let x = self.reference.x + x_steps as f64 * REF_X_STEP;
        let theta = self.reference.theta + (theta_steps as f64 * REF_THETA_STEP_DEG).to_radians();
        self.set_reference(x, theta);
    }

    pub fn center_references(&mut self) {
        self.reference = Reference::default();
    }

    pub fn friction_on(&self) -> bool {
        self.friction_on
    }

    pub fn set_friction(&mut self, on: bool) {
        self.friction_on = on;
    }

    /// Damping for the current friction setting.
    pub fn damping(&self) -> Damping {
        if self.friction_on {
            Damping::from_params(&self.plant.params)
        } else {
            Damping::off()
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// External force from the operator inputs.
    ///
    /// Only the pointer force is held to the operator force limit; the key push
    /// is added on top of it.
    pub fn operator_force(&self, pointer: PointerInput, push_left: bool, push_right: bool) -> f64 {
        let pointer_force = pointer.force(self.state.x, self.plant.params.max_operator_force);
        pointer_force + push_force(push_left, push_right)
    }

    /// Restores the initial state and restarts the clock, controller, metrics and history.
    pub fn reset(&mut self) {
        self.state = self.initial_state;
        self.t = 0.0;
        self.metrics.reset();
        self.controller.reset();
        self.history.clear();
        self.last_contact = Contact::None;
        self.last_saturated = false;
        info!("simulation reset");
    }

    /// Runs one frame of sub-steps with a constant external force.
    ///
    /// The state is checked for non-finite components before anything is
    /// touched. Returns the last sub-step's report, or `None` when paused or
    /// configured with zero sub-steps.
    pub fn step_frame(&mut self, external_force: f64) -> SimResult<Option<StepReport>> {
        if let Some((component, value)) = self.state.first_non_finite() {
            warn!("refusing to step: {component} is {value}");
            return Err(SimError::InvalidState { component, value });
        }
        if self.paused {
            return Ok(None);
        }

        let mut last = None;
        for _ in 0..self.plant.params.substeps {
            last = Some(self.substep(external_force));
        }

        if let Some(report) = &last {
            self.history.push(self.t, &self.state, report.total_force);
        }
        Ok(last)
    }

    /// Advances one fixed `dt`.
    pub fn substep(&mut self, external_force: f64) -> StepReport {
        let dt = self.plant.params.dt;
        let max_force = self.plant.params.max_force;

        let raw_force = self.controller.command(&self.state, self.t, &self.reference);
        let applied_force = clamp(raw_force, -max_force, max_force);
        let saturated = raw_force.abs() > max_force;
        let total_force = applied_force + external_force;

        let contact = self.resolver.contact(&self.state, total_force);
        self.resolver.pre_clamp(&mut self.state, contact);
        let regime = self.resolver.regime(contact, total_force);
        self.state = self.plant.integrate(&self.state, regime, self.damping(), dt);
        self.resolver.post_clamp(&mut self.state);

        self.t += dt;
        self.metrics
            .update(&self.state, self.t, total_force, &self.reference, dt);

        self.log_transitions(contact, saturated, raw_force);

        StepReport {
            t: self.t,
            raw_force,
            applied_force,
            total_force,
            saturated,
            contact,
            metrics: self.metrics.metrics(),
        }
    }

    fn log_transitions(&mut self, contact: Contact, saturated: bool, raw_force: f64) {
        if contact != self.last_contact {
            match contact {
                Contact::None => debug!("t={:.3}s: cart left the wall", self.t),
                wall => debug!("t={:.3}s: cart pinned at {wall:?} wall", self.t),
            }
            self.last_contact = contact;
        }
        if saturated != self.last_saturated {
            if saturated {
                debug!("t={:.3}s: actuator saturated (raw {raw_force:+.2} N)", self.t);
            } else {
                debug!("t={:.3}s: actuator back in range", self.t);
            }
            self.last_saturated = saturated;
        }
    }
}
