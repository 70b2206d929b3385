use glam::Vec3;

/// SoA particle storage for the cloth grid.
///
/// Velocity is implicit: `position - previous` is the displacement of the
/// last step (Verlet). `previous` is never read by rendering code.
pub struct ParticleSet {
    pub count: usize,
    pub position: Vec<Vec3>,
    /// Position at the end of the prior step.
    pub previous: Vec<Vec3>,
    /// Structural anchors (the top row). Immutable after construction.
    pub pinned: Vec<bool>,
}

impl ParticleSet {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: vec![Vec3::ZERO; count],
            previous: vec![Vec3::ZERO; count],
            pinned: vec![false; count],
        }
    }
}
