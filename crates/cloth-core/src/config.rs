use glam::Vec3;

/// Global simulation parameters, read fresh on every `step`.
///
/// These are driven by external UI state; there is no hidden process-wide
/// configuration. Damping belongs in `[0, 1)` and `constraint_iterations`
/// is honored literally (0 means no relaxation passes).
pub struct ClothConfig {
    pub gravity: Vec3,
    /// Velocity retention per step; approximates air resistance.
    pub damping: f32,
    /// Gauss-Seidel passes over the constraint list per step.
    pub constraint_iterations: u32,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -28.0, 0.0),
            damping: 0.99,
            constraint_iterations: 12,
        }
    }
}
