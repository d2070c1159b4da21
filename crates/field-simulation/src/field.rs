//! The particle store and per-frame step.

use field_core::{constants::PALETTE, Particle};
use glam::Vec2;
use rand::Rng;

use crate::FieldParams;

/// Owns the live particle set together with the viewport bounds it was
/// spawned for.
///
/// The set is created in one shot and wholesale discarded on resize;
/// individual particles are never added or removed in between, and outside
/// of [`ParticleField::step`] they are never mutated.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    params: FieldParams,
    width: f32,
    height: f32,
}

impl ParticleField {
    /// Populate a fresh field for a `width` x `height` pixel viewport.
    ///
    /// The random source is passed in so callers (and tests) control the
    /// sequence; the field itself holds no RNG state.
    pub fn new(width: u32, height: u32, params: FieldParams, rng: &mut impl Rng) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            params,
            width: width as f32,
            height: height as f32,
        };
        field.repopulate(width, height, rng);
        field
    }

    /// Discard every particle and respawn the whole set at new dimensions.
    ///
    /// Nothing carries over: the count is re-derived from the new area and
    /// every attribute is drawn fresh.
    pub fn repopulate(&mut self, width: u32, height: u32, rng: &mut impl Rng) {
        self.width = width as f32;
        self.height = height as f32;
        self.particles = spawn_particles(width, height, &self.params, rng);
        log::debug!(
            "populated {} particles for a {}x{} viewport",
            self.particles.len(),
            width,
            height
        );
    }

    /// Advance every particle by one frame and reflect at the viewport edges.
    ///
    /// Reflection checks the already-updated position and only flips the
    /// velocity sign; the position is not pulled back inside, so a particle
    /// that overshoots an edge re-enters on the following frame.
    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.position += particle.velocity;

            if particle.position.x < 0.0 || particle.position.x > self.width {
                particle.velocity.x = -particle.velocity.x;
            }
            if particle.position.y < 0.0 || particle.position.y > self.height {
                particle.velocity.y = -particle.velocity.y;
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Viewport width the current set was spawned for, in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Viewport height the current set was spawned for, in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }
}

/// Spawn the full particle set for the given viewport.
///
/// Integer division floors the count: a viewport smaller than
/// `pixels_per_particle` yields an empty set, which every consumer handles.
fn spawn_particles(
    width: u32,
    height: u32,
    params: &FieldParams,
    rng: &mut impl Rng,
) -> Vec<Particle> {
    let count = (width * height / params.pixels_per_particle) as usize;
    let (w, h) = (width as f32, height as f32);

    let mut particles = Vec::with_capacity(count);
    for _ in 0..count {
        let position = Vec2::new(rng.random_range(0.0..w), rng.random_range(0.0..h));
        let velocity = Vec2::new(
            rng.random_range(-params.max_speed..params.max_speed),
            rng.random_range(-params.max_speed..params.max_speed),
        );
        let size = rng.random_range(params.size_range[0]..params.size_range[1]);
        let color = PALETTE[rng.random_range(0..PALETTE.len())];
        let alpha = rng.random_range(params.alpha_range[0]..params.alpha_range[1]);

        particles.push(Particle::new(position, velocity, size, color, alpha));
    }

    particles
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_core::constants;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn single(x: f32, y: f32, vx: f32, vy: f32, width: f32, height: f32) -> ParticleField {
        ParticleField {
            particles: vec![Particle::new(
                Vec2::new(x, y),
                Vec2::new(vx, vy),
                1.5,
                constants::PALETTE[0],
                0.4,
            )],
            params: FieldParams::default(),
            width,
            height,
        }
    }

    #[test]
    fn count_is_area_over_density() {
        let field = ParticleField::new(500, 500, FieldParams::default(), &mut rng());
        assert_eq!(field.len(), 10);
    }

    #[test]
    fn viewport_below_density_spawns_nothing() {
        let field = ParticleField::new(100, 100, FieldParams::default(), &mut rng());
        assert!(field.is_empty());
    }

    #[test]
    fn custom_density_changes_the_count() {
        let params = FieldParams {
            pixels_per_particle: 10_000,
            ..FieldParams::default()
        };
        let field = ParticleField::new(500, 500, params, &mut rng());
        assert_eq!(field.len(), 25);
    }

    #[test]
    fn spawned_attributes_stay_in_range() {
        let field = ParticleField::new(1000, 800, FieldParams::default(), &mut rng());
        assert_eq!(field.len(), 32);

        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x < 1000.0);
            assert!(p.position.y >= 0.0 && p.position.y < 800.0);
            assert!(p.velocity.x.abs() <= constants::MAX_SPEED);
            assert!(p.velocity.y.abs() <= constants::MAX_SPEED);
            assert!(p.size >= constants::MIN_SIZE && p.size < constants::MAX_SIZE);
            assert!(p.alpha >= constants::MIN_ALPHA && p.alpha < constants::MAX_ALPHA);
            assert!(constants::PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn interior_step_moves_without_reflection() {
        let mut field = single(5.0, 50.0, -0.1, 0.0, 100.0, 100.0);
        field.step();

        let p = field.particles()[0];
        assert!((p.position.x - 4.9).abs() < 1e-5);
        assert_eq!(p.velocity.x, -0.1);
    }

    #[test]
    fn boundary_reflection_flips_velocity_on_the_crossing_step() {
        let mut field = single(99.95, 50.0, 0.1, 0.0, 100.0, 100.0);

        field.step();
        let p = field.particles()[0];
        // The overshoot survives the reflecting step; only the sign flips.
        assert!(p.position.x > 100.0);
        assert_eq!(p.velocity.x, -0.1);

        field.step();
        let p = field.particles()[0];
        assert!(p.position.x <= 100.0);
        assert!((p.position.x - 99.95).abs() < 1e-3);
        assert_eq!(p.velocity.x, -0.1);
    }

    #[test]
    fn axis_reflections_are_independent() {
        let mut field = single(50.0, 0.02, 0.05, -0.1, 100.0, 100.0);
        field.step();

        let p = field.particles()[0];
        assert_eq!(p.velocity.x, 0.05);
        assert_eq!(p.velocity.y, 0.1);
    }

    #[test]
    fn repopulate_discards_the_previous_set() {
        let mut rng = rng();
        let mut field = ParticleField::new(500, 500, FieldParams::default(), &mut rng);
        let before = field.particles().to_vec();
        assert_eq!(before.len(), 10);

        field.repopulate(300, 300, &mut rng);
        assert_eq!(field.len(), 3);
        assert_eq!(field.width(), 300.0);
        for p in field.particles() {
            assert!(p.position.x < 300.0 && p.position.y < 300.0);
            assert!(!before.contains(p));
        }
    }

    #[test]
    fn stepping_an_empty_field_is_a_no_op() {
        let mut field = ParticleField::new(120, 90, FieldParams::default(), &mut rng());
        assert!(field.is_empty());
        field.step();
        assert!(field.is_empty());
    }
}
