//! # Field Renderer
//!
//! wgpu visualization for the constellation field: particle discs,
//! connection lines between nearby particles, and the drifting glow
//! backdrop.

pub mod connections;
pub mod error;
pub mod glow;
pub mod renderer;

pub use connections::*;
pub use error::*;
pub use glow::*;
pub use renderer::*;
