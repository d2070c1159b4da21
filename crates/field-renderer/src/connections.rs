//! CPU pair scan producing the connection-line segments for one frame.
//!
//! The scan is a naive O(n²) walk over unordered pairs, kept affordable by a
//! per-axis rejection before any squared distance is computed. At the stock
//! density (tens to low hundreds of particles) this beats a spatial grid on
//! simplicity; the grid is the upgrade path if the density ever grows.

use bytemuck::{Pod, Zeroable};
use field_core::constants::{LINK_ALPHA, LINK_RADIUS, LINK_RADIUS_SQ};
use field_core::Particle;
use glam::{Vec2, Vec3};

/// One connection line, ready for the GPU segment buffer.
///
/// 32 bytes, matching the WGSL `Segment` struct. Color is the sRGB base
/// color of the pair's first particle; alpha is the distance-faded link
/// opacity (the particles' own opacities do not factor in).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub color: Vec3,
    pub alpha: f32,
}

/// Link opacity for a pair `distance` pixels apart: [`LINK_ALPHA`] for
/// coincident particles, fading linearly to zero at [`LINK_RADIUS`].
pub fn line_alpha(distance: f32) -> f32 {
    LINK_ALPHA * (1.0 - distance / LINK_RADIUS)
}

/// Scan all unordered pairs `(i, j)` with `i < j` and collect the segments
/// to draw this frame.
///
/// A pair further than [`LINK_RADIUS`] apart on either axis is rejected
/// before the squared distance is touched; only pairs strictly inside the
/// radius produce a segment.
pub fn collect_segments(particles: &[Particle]) -> Vec<LineSegment> {
    let mut segments = Vec::new();

    for i in 0..particles.len() {
        let a = &particles[i];
        for b in &particles[i + 1..] {
            let dx = a.position.x - b.position.x;
            if dx > LINK_RADIUS || dx < -LINK_RADIUS {
                continue;
            }
            let dy = a.position.y - b.position.y;
            if dy > LINK_RADIUS || dy < -LINK_RADIUS {
                continue;
            }

            let dist_sq = dx * dx + dy * dy;
            if dist_sq < LINK_RADIUS_SQ {
                segments.push(LineSegment {
                    start: a.position,
                    end: b.position,
                    color: a.color,
                    alpha: line_alpha(dist_sq.sqrt()),
                });
            }
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_core::constants::PALETTE;

    fn particle_at(x: f32, y: f32, color_index: usize) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.5, PALETTE[color_index], 0.5)
    }

    #[test]
    fn coincident_pair_gets_peak_alpha() {
        let particles = [particle_at(10.0, 10.0, 0), particle_at(10.0, 10.0, 1)];
        let segments = collect_segments(&particles);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].alpha, LINK_ALPHA);
    }

    #[test]
    fn alpha_fades_linearly_with_distance() {
        assert_eq!(line_alpha(0.0), 0.1);
        assert!((line_alpha(75.0) - 0.05).abs() < 1e-6);
        assert_eq!(line_alpha(150.0), 0.0);
    }

    #[test]
    fn pair_at_exactly_link_radius_draws_nothing() {
        let particles = [particle_at(0.0, 0.0, 0), particle_at(150.0, 0.0, 1)];
        assert!(collect_segments(&particles).is_empty());
    }

    #[test]
    fn axis_overflow_rejects_before_any_distance() {
        let particles = [particle_at(0.0, 0.0, 0), particle_at(151.0, 0.0, 1)];
        assert!(collect_segments(&particles).is_empty());

        let particles = [particle_at(0.0, 0.0, 0), particle_at(0.0, 151.0, 1)];
        assert!(collect_segments(&particles).is_empty());
    }

    #[test]
    fn diagonal_pair_inside_both_axes_can_still_be_too_far() {
        // 140 px on each axis passes both axis checks but is ~198 px apart.
        let particles = [particle_at(0.0, 0.0, 0), particle_at(140.0, 140.0, 1)];
        assert!(collect_segments(&particles).is_empty());
    }

    #[test]
    fn color_comes_from_the_first_particle_of_the_pair() {
        let particles = [particle_at(0.0, 0.0, 2), particle_at(50.0, 0.0, 1)];
        let segments = collect_segments(&particles);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].color, PALETTE[2]);
        assert_eq!(segments[0].start, Vec2::new(0.0, 0.0));
        assert_eq!(segments[0].end, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn every_unordered_pair_is_considered_once() {
        let particles = [
            particle_at(0.0, 0.0, 0),
            particle_at(30.0, 0.0, 1),
            particle_at(60.0, 0.0, 2),
        ];
        // (0,1), (0,2) and (1,2) are all in range.
        assert_eq!(collect_segments(&particles).len(), 3);
    }

    #[test]
    fn empty_and_singleton_sets_produce_no_segments() {
        assert!(collect_segments(&[]).is_empty());
        assert!(collect_segments(&[particle_at(5.0, 5.0, 0)]).is_empty());
    }
}
