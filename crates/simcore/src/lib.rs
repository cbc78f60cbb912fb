//! Shared types for the cart-pole simulation
//!
//! This crate provides:
//! - The state, reference, damping and track-limit types
//! - Run parameters and the settling band
//! - The `Model` and `ForceController` traits
//! - A fixed-step RK4 integrator over generic ODE systems
//! - Angle wrapping and clamping helpers
//! - The error type

pub mod error;
pub mod integrators;
pub mod math;
pub mod params;
pub mod traits;

pub use error::*;
pub use integrators::*;
pub use math::*;
pub use params::*;
pub use traits::*;
