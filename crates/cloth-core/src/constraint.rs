use glam::Vec3;

/// Distance constraint between two cloth particles.
///
/// Enforced by direct position projection (Jakobsen-style relaxation):
/// each pass moves the endpoints toward the rest length. There is no
/// compliance or stored multiplier; stiffness comes from iteration count.
///
/// Reference: Jakobsen, "Advanced Character Physics", GDC 2001
pub struct DistanceConstraint {
    /// Particle index A.
    pub a: u32,
    /// Particle index B.
    pub b: u32,
    /// Target distance, fixed at construction from grid spacing.
    pub rest_length: f32,
}

impl DistanceConstraint {
    pub fn new(a: u32, b: u32, rest_length: f32) -> Self {
        Self { a, b, rest_length }
    }
}

/// Distances below this are degenerate; the constraint is skipped to
/// avoid dividing by a near-zero length.
const MIN_DISTANCE: f32 = 1e-6;

/// One Gauss-Seidel pass over all constraints, in list order.
///
/// Corrections are applied immediately, so list order affects the
/// convergence trajectory; the order is fixed at construction and must
/// not be shuffled. `fixed[i]` marks particles excluded from correction
/// this step (structurally pinned or grabbed):
///
/// - both endpoints free: each absorbs half the correction
/// - one endpoint fixed: the free endpoint absorbs all of it
/// - both fixed: no-op
pub fn solve_constraints(
    constraints: &[DistanceConstraint],
    positions: &mut [Vec3],
    fixed: &[bool],
) {
    for c in constraints {
        let a = c.a as usize;
        let b = c.b as usize;

        let delta = positions[b] - positions[a];
        let dist = delta.length();
        if dist < MIN_DISTANCE {
            continue;
        }

        let diff = (dist - c.rest_length) / dist;
        let offset = delta * (0.5 * diff);

        match (fixed[a], fixed[b]) {
            (false, false) => {
                positions[a] += offset;
                positions[b] -= offset;
            }
            (false, true) => positions[a] += offset * 2.0,
            (true, false) => positions[b] -= offset * 2.0,
            (true, true) => {}
        }
    }
}
