//! Operator-applied forces
//!
//! Force laws for the interactive inputs that act on the cart alongside the
//! controller: a pointer that drags the cart on a spring or shoves it, and a
//! fixed push from the arrow keys. Polling the inputs happens elsewhere.

use serde::{Deserialize, Serialize};
use simcore::clamp;

/// Spring drag stiffness (N/m)
pub const SPRING_STIFFNESS: f64 = 27.2;
/// Peak shove force (N)
pub const SHOVE_MAGNITUDE: f64 = 26.0;
/// Distance over which a shove ramps to its peak (m)
pub const SHOVE_LENGTH: f64 = 75.0 / 170.0;
/// Force of a held push key (N)
pub const PUSH_FORCE: f64 = 18.0;

/// Pointer interaction with the cart.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PointerInput {
    #[default]
    Idle,
    /// Pull the cart toward `target_x` with a linear spring.
    Spring { target_x: f64 },
    /// Saturating shove toward `target_x`.
    Shove { target_x: f64 },
}

impl PointerInput {
    /// Force on a cart at `cart_x`, limited to `max_force` in magnitude.
    pub fn force(&self, cart_x: f64, max_force: f64) -> f64 {
        let f = match *self {
            PointerInput::Idle => return 0.0,
            PointerInput::Spring { target_x } => SPRING_STIFFNESS * (target_x - cart_x),
            PointerInput::Shove { target_x } => {
                SHOVE_MAGNITUDE * ((target_x - cart_x) / SHOVE_LENGTH).tanh()
            }
        };
        clamp(f, -max_force, max_force)
    }
}

/// Force from the push keys. Holding both cancels out.
pub fn push_force(left: bool, right: bool) -> f64 {
    match (left, right) {
        (true, false) => -PUSH_FORCE,
        (false, true) => PUSH_FORCE,
        _ => 0.0,
    }
}
