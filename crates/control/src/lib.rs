//! Feedback control for the cart-pole
//!
//! This crate provides:
//! - A PID controller on cart position
//! - A named gain table for live tuning

pub mod gains;
pub mod pid;

pub use gains::*;
pub use pid::*;
