//! Tuning constants for the constellation field.
//!
//! All distances are in physical pixels and all speeds in pixels per frame;
//! the field is framerate-coupled on purpose (it is a decorative background,
//! not a physics simulation).

use glam::Vec3;

/// Viewport area, in square pixels, that yields one particle.
///
/// Count is `floor(width * height / PIXELS_PER_PARTICLE)`, so a viewport
/// smaller than this yields an empty field.
pub const PIXELS_PER_PARTICLE: u32 = 25_000;

/// Per-axis speed bound; velocity components are drawn from `[-MAX_SPEED, MAX_SPEED)`.
pub const MAX_SPEED: f32 = 0.15;

/// Particle radius range, drawn uniformly from `[MIN_SIZE, MAX_SIZE)`.
pub const MIN_SIZE: f32 = 1.0;
pub const MAX_SIZE: f32 = 3.0;

/// Particle opacity range, drawn uniformly from `[MIN_ALPHA, MAX_ALPHA)`.
pub const MIN_ALPHA: f32 = 0.2;
pub const MAX_ALPHA: f32 = 0.7;

/// Maximum distance at which two particles are linked by a line.
pub const LINK_RADIUS: f32 = 150.0;

/// Squared link radius; the pair scan compares against this before any sqrt.
pub const LINK_RADIUS_SQ: f32 = LINK_RADIUS * LINK_RADIUS;

/// Opacity of a link between coincident particles; links fade linearly to
/// zero opacity at [`LINK_RADIUS`].
pub const LINK_ALPHA: f32 = 0.1;

/// Stroke width of a link, in pixels.
pub const LINK_WIDTH: f32 = 0.5;

/// Whole-layer opacity applied on top of per-particle alpha when the field
/// is composited over the backdrop.
pub const LAYER_OPACITY: f32 = 0.6;

/// Fixed particle palette (sRGB): warm orange, violet, green.
pub const PALETTE: [Vec3; 3] = [
    Vec3::new(255.0 / 255.0, 107.0 / 255.0, 0.0 / 255.0),
    Vec3::new(147.0 / 255.0, 51.0 / 255.0, 234.0 / 255.0),
    Vec3::new(34.0 / 255.0, 197.0 / 255.0, 94.0 / 255.0),
];
