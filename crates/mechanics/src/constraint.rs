//! Wall contact for the cart
//!
//! Each sub-step the resolver decides whether the cart is resting against a
//! track limit and being pushed further into it. If so the sub-step runs in the
//! constrained regime. Clamps before and after integration keep the cart on the
//! track.

use log::trace;
use simcore::{CartPoleState, TrackLimits};

use crate::dynamics::Regime;

/// Distance from a limit within which the cart counts as touching it (m).
pub const CONTACT_EPSILON: f64 = 1e-6;

/// Which wall, if any, the cart is pressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Contact {
    #[default]
    None,
    Left,
    Right,
}

impl Contact {
    pub fn is_constrained(&self) -> bool {
        !matches!(self, Contact::None)
    }
}

/// Resolves cart contact against the track limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintResolver {
    pub track: TrackLimits,
}

impl ConstraintResolver {
    pub fn new(track: TrackLimits) -> Self {
        ConstraintResolver { track }
    }

    /// Contact flag for a sub-step, given the sum of every applied force.
    ///
    /// Touching a wall is not enough: the force must also push into it.
    pub fn contact(&self, state: &CartPoleState, total_force: f64) -> Contact {
        let at_left = state.x <= self.track.x_min + CONTACT_EPSILON;
        let at_right = state.x >= self.track.x_max - CONTACT_EPSILON;

        if at_left && total_force < 0.0 {
            Contact::Left
        } else if at_right && total_force > 0.0 {
            Contact::Right
        } else {
            Contact::None
        }
    }

    /// Regime to integrate with for the given contact.
    pub fn regime(&self, contact: Contact, total_force: f64) -> Regime {
        if contact.is_constrained() {
            Regime::Constrained
        } else {
            Regime::Free { force: total_force }
        }
    }

    /// Pins the cart to the wall it is pressed against and stops it.
    pub fn pre_clamp(&self, state: &mut CartPoleState, contact: Contact) {
        match contact {
            Contact::None => return,
            Contact::Left => state.x = self.track.x_min,
            Contact::Right => state.x = self.track.x_max,
        }
        state.x_dot = 0.0;
    }

    /// Pulls a cart that drifted past a limit back onto the track.
    ///
    /// Only velocity pointing further out of the track is cancelled.
    pub fn post_clamp(&self, state: &mut CartPoleState) {
        if state.x < self.track.x_min {
            trace!("cart drifted past left limit: x={}", state.x);
            state.x = self.track.x_min;
            if state.x_dot < 0.0 {
                state.x_dot = 0.0;
            }
        } else if state.x > self.track.x_max {
            trace!("cart drifted past right limit: x={}", state.x);
            state.x = self.track.x_max;
            if state.x_dot > 0.0 {
                state.x_dot = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ConstraintResolver {
        ConstraintResolver::new(TrackLimits::new(-2.0, 2.0))
    }

    #[test]
    fn test_contact_requires_inward_force() {
        let r = resolver();
        let at_right = CartPoleState::new(2.0, 0.0, 0.0, 0.0);
        assert_eq!(r.contact(&at_right, 5.0), Contact::Right);
        assert_eq!(r.contact(&at_right, -5.0), Contact::None);
        assert_eq!(r.contact(&at_right, 0.0), Contact::None);

        let at_left = CartPoleState::new(-2.0, 0.0, 0.0, 0.0);
        assert_eq!(r.contact(&at_left, -5.0), Contact::Left);
        assert_eq!(r.contact(&at_left, 5.0), Contact::None);
    }

    #[test]
    fn test_contact_tolerance() {
        let r = resolver();
        let near = CartPoleState::new(2.0 - 0.5 * CONTACT_EPSILON, 0.0, 0.0, 0.0);
        assert_eq!(r.contact(&near, 1.0), Contact::Right);

        let away = CartPoleState::new(2.0 - 10.0 * CONTACT_EPSILON, 0.0, 0.0, 0.0);
        assert_eq!(r.contact(&away, 1.0), Contact::None);

        let middle = CartPoleState::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(r.contact(&middle, 100.0), Contact::None);
    }

    #[test]
    fn test_regime_selection() {
        let r = resolver();
        assert_eq!(r.regime(Contact::Left, -3.0), Regime::Constrained);
        assert_eq!(r.regime(Contact::None, -3.0), Regime::Free { force: -3.0 });
    }

    #[test]
    fn test_pre_clamp_snaps_to_wall_and_stops() {
        let r = resolver();
        let mut state = CartPoleState::new(2.0 - 0.5 * CONTACT_EPSILON, 0.7, 0.1, 0.2);
        r.pre_clamp(&mut state, Contact::Right);
        assert_eq!(state.x, 2.0);
        assert_eq!(state.x_dot, 0.0);
        assert_eq!(state.theta, 0.1);

        let mut free = CartPoleState::new(1.0, 0.7, 0.0, 0.0);
        r.pre_clamp(&mut free, Contact::None);
        assert_eq!(free, CartPoleState::new(1.0, 0.7, 0.0, 0.0));
    }

    #[test]
    fn test_post_clamp_keeps_outward_velocity() {
        let r = resolver();

        let mut inbound = CartPoleState::new(-2.01, -0.5, 0.0, 0.0);
        r.post_clamp(&mut inbound);
        assert_eq!(inbound.x, -2.0);
        assert_eq!(inbound.x_dot, 0.0);

        // past the wall but already heading back: keep the velocity
        let mut rebounding = CartPoleState::new(2.01, -0.5, 0.0, 0.0);
        r.post_clamp(&mut rebounding);
        assert_eq!(rebounding.x, 2.0);
        assert_eq!(rebounding.x_dot, -0.5);

        let mut inside = CartPoleState::new(1.99, 3.0, 0.0, 0.0);
        r.post_clamp(&mut inside);
        assert_eq!(inside, CartPoleState::new(1.99, 3.0, 0.0, 0.0));
    }
}
