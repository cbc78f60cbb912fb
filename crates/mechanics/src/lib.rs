//! Cart-pole mechanics
//!
//! This crate provides:
//! - Free and wall-constrained dynamics, integrated with RK4
//! - Wall contact resolution against the track limits
//! - Mechanical energy
//! - Operator force laws

pub mod constraint;
pub mod dynamics;
pub mod energy;
pub mod operator;

pub use constraint::{ConstraintResolver, Contact, CONTACT_EPSILON};
pub use dynamics::{CartPole, CartPoleSystem, Regime};
pub use energy::mechanical_energy;
pub use operator::{push_force, PointerInput};
