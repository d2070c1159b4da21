//! Spawn-time parameters for runtime tuning.

use field_core::constants;

/// Tuning knobs read when (re)populating a field.
///
/// Defaults reproduce the stock constellation look; tests shrink the density
/// to get predictable counts.
#[derive(Clone, Copy, Debug)]
pub struct FieldParams {
    /// Viewport area, in square pixels, that yields one particle.
    pub pixels_per_particle: u32,
    /// Per-axis speed bound; components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f32,
    /// Disc radius range `[min, max)`, in pixels.
    pub size_range: [f32; 2],
    /// Disc opacity range `[min, max)`.
    pub alpha_range: [f32; 2],
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            pixels_per_particle: constants::PIXELS_PER_PARTICLE,
            max_speed: constants::MAX_SPEED,
            size_range: [constants::MIN_SIZE, constants::MAX_SIZE],
            alpha_range: [constants::MIN_ALPHA, constants::MAX_ALPHA],
        }
    }
}
