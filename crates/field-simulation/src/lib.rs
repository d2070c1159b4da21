//! # Field Simulation
//!
//! The particle store and the per-frame simulation step for the
//! constellation field.

pub mod field;
pub mod params;

pub use field::*;
pub use params::*;
