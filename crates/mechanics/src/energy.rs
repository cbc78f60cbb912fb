use simcore::{CartPoleParams, CartPoleState};

/// Total mechanical energy of the cart-pole (J).
///
/// Potential energy is zero with the pole upright and negative once it falls.
pub fn mechanical_energy(params: &CartPoleParams, state: &CartPoleState) -> f64 {
    let m = params.pole_mass;
    let l = params.half_length;
    let (s, c) = state.theta.sin_cos();

    // velocity of the pole's center of mass
    let x_com_dot = state.x_dot + l * state.theta_dot * c;
    let y_com_dot = -l * state.theta_dot * s;
    let v_com2 = x_com_dot.powi(2) + y_com_dot.powi(2);

    let t_cart = 0.5 * params.cart_mass * state.x_dot.powi(2);
    let t_com = 0.5 * m * v_com2;
    let t_rot = 0.5 * params.pole_inertia_com() * state.theta_dot.powi(2);

    let potential = m * params.gravity * l * (c - 1.0);

    t_cart + t_com + t_rot + potential
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_upright_at_rest_is_zero() {
        let p = CartPoleParams::default();
        assert_eq!(mechanical_energy(&p, &CartPoleState::default()), 0.0);
    }

    #[test]
    fn test_hanging_is_lowest() {
        let p = CartPoleParams::default();
        let hanging = CartPoleState::new(0.0, 0.0, PI, 0.0);
        // 2 * m * g * l below upright
        assert_relative_eq!(
            mechanical_energy(&p, &hanging),
            -2.0 * 0.2 * 9.81 * 0.5,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_cart_kinetic_energy() {
        let p = CartPoleParams::default();
        let moving = CartPoleState::new(0.0, 2.0, 0.0, 0.0);
        // whole system translates together: 0.5 * (M + m) * v^2
        assert_relative_eq!(mechanical_energy(&p, &moving), 0.5 * 1.2 * 4.0, max_relative = 1e-12);
    }

    #[test]
    fn test_spinning_pole_uses_pivot_inertia() {
        let p = CartPoleParams::default();
        let spinning = CartPoleState::new(0.0, 0.0, 0.0, 3.0);
        // pinned cart: 0.5 * (m l^2 + m l^2 / 3) * w^2
        let expected = 0.5 * (4.0 / 3.0) * 0.2 * 0.25 * 9.0;
        assert_relative_eq!(mechanical_energy(&p, &spinning), expected, max_relative = 1e-12);
    }
}
