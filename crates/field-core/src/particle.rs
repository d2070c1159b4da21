//! The particle type for the constellation field.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// A single animated point of the field.
///
/// GPU-compatible: `repr(C)` with explicit padding so the live particle set
/// can be uploaded verbatim as a storage buffer. The matching WGSL struct is
/// 48 bytes with `color` 16-byte aligned; `velocity` travels along but is
/// never read by the shaders.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Position in surface pixels, origin at the top-left corner.
    pub position: Vec2,
    /// Velocity in pixels per frame. Assigned once at spawn; boundary
    /// reflection only ever negates a component, never rescales it.
    pub velocity: Vec2,
    /// Base color (sRGB), one of [`crate::constants::PALETTE`].
    pub color: Vec3,
    /// Opacity of the particle disc.
    pub alpha: f32,
    /// Disc radius in pixels.
    pub size: f32,
    _pad: [f32; 3],
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, size: f32, color: Vec3, alpha: f32) -> Self {
        Self {
            position,
            velocity,
            color,
            alpha,
            size,
            _pad: [0.0; 3],
        }
    }
}
