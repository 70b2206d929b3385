use crate::config::ClothConfig;
use crate::constraint::{solve_constraints, DistanceConstraint};
use crate::error::ClothError;
use crate::grab::GrabState;
use crate::particle::ParticleSet;
use glam::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Rest-layout position of grid node `(col, row)`.
///
/// The cloth hangs centered at the origin with the top edge at max y and
/// z = 0. `reset` reuses this so restoration is bit-exact.
fn rest_position(
    col: usize,
    row: usize,
    segments_x: u32,
    segments_y: u32,
    spacing_x: f32,
    spacing_y: f32,
) -> Vec3 {
    Vec3::new(
        (col as f32 - segments_x as f32 / 2.0) * spacing_x,
        (segments_y as f32 / 2.0 - row as f32) * spacing_y,
        0.0,
    )
}

/// Interactive Verlet cloth: a grid of point masses under gravity and
/// damping, held together by distance constraints, with one optional
/// pointer-grabbed particle pinned to a moving target.
///
/// The solver is single-threaded and frame-driven; the caller is
/// responsible for clamping large frame deltas and splitting them into
/// sub-steps before calling [`step`](ClothSolver::step).
pub struct ClothSolver {
    pub particles: ParticleSet,
    pub config: ClothConfig,
    constraints: Vec<DistanceConstraint>,
    grab: GrabState,
    segments_x: u32,
    segments_y: u32,
    spacing_x: f32,
    spacing_y: f32,
    /// Scratch: particles excluded from integration and correction this
    /// step. Rebuilt at the top of every `step`.
    fixed: Vec<bool>,
}

impl ClothSolver {
    /// Build a `(segments_x + 1) x (segments_y + 1)` grid spanning
    /// `width x height`, top row pinned, at rest (zero initial velocity).
    ///
    /// Constraints are generated per cell in row-major order: right
    /// neighbor, bottom neighbor, bottom-right diagonal, bottom-left
    /// diagonal. That order is the relaxation order for the lifetime of
    /// the solver.
    pub fn new(
        segments_x: u32,
        segments_y: u32,
        width: f32,
        height: f32,
    ) -> Result<Self, ClothError> {
        if segments_x == 0 || segments_y == 0 {
            return Err(ClothError::InvalidSegments {
                segments_x,
                segments_y,
            });
        }
        if !(width > 0.0 && width.is_finite()) || !(height > 0.0 && height.is_finite()) {
            return Err(ClothError::InvalidExtent { width, height });
        }

        let cols = segments_x as usize + 1;
        let rows = segments_y as usize + 1;
        let count = cols * rows;
        let spacing_x = width / segments_x as f32;
        let spacing_y = height / segments_y as f32;

        let mut particles = ParticleSet::new(count);
        for row in 0..rows {
            for col in 0..cols {
                let idx = row * cols + col;
                let p = rest_position(col, row, segments_x, segments_y, spacing_x, spacing_y);
                particles.position[idx] = p;
                particles.previous[idx] = p;
            }
        }
        for col in 0..cols {
            particles.pinned[col] = true;
        }

        let diagonal = (spacing_x * spacing_x + spacing_y * spacing_y).sqrt();
        let mut constraints = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                let idx = (row * cols + col) as u32;
                let below = idx + cols as u32;
                // Structural: right neighbor
                if col + 1 < cols {
                    constraints.push(DistanceConstraint::new(idx, idx + 1, spacing_x));
                }
                // Structural: bottom neighbor
                if row + 1 < rows {
                    constraints.push(DistanceConstraint::new(idx, below, spacing_y));
                }
                // Shear: bottom-right diagonal
                if col + 1 < cols && row + 1 < rows {
                    constraints.push(DistanceConstraint::new(idx, below + 1, diagonal));
                }
                // Shear: bottom-left diagonal
                if col > 0 && row + 1 < rows {
                    constraints.push(DistanceConstraint::new(idx, below - 1, diagonal));
                }
            }
        }

        Ok(Self {
            particles,
            config: ClothConfig::default(),
            constraints,
            grab: GrabState::Idle,
            segments_x,
            segments_y,
            spacing_x,
            spacing_y,
            fixed: vec![false; count],
        })
    }

    /// Restore every particle to the construction-time rest layout with
    /// zero implicit velocity.
    ///
    /// Pinned flags, constraints, config, and grab state are untouched;
    /// callers driving a grab are expected to release it themselves.
    pub fn reset(&mut self) {
        let cols = self.cols();
        for row in 0..self.rows() {
            for col in 0..cols {
                let idx = row * cols + col;
                let p = rest_position(
                    col,
                    row,
                    self.segments_x,
                    self.segments_y,
                    self.spacing_x,
                    self.spacing_y,
                );
                self.particles.position[idx] = p;
                self.particles.previous[idx] = p;
            }
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// Integration (Verlet with damping), then the grab override, then
    /// `constraint_iterations` relaxation passes. Non-positive `dt` is
    /// accepted and contributes zero gravity displacement; the caller is
    /// expected to pre-clamp large frame deltas.
    pub fn step(&mut self, dt: f32) {
        let count = self.particles.count;
        let gravity_step = self.config.gravity * (dt * dt);
        let damping = self.config.damping;
        let grabbed = self.grab.index();

        // Fixedness is derived fresh each step: pinned or grabbed.
        for i in 0..count {
            self.fixed[i] = self.particles.pinned[i] || grabbed == Some(i);
        }

        #[cfg(not(feature = "parallel"))]
        {
            for i in 0..count {
                if self.fixed[i] {
                    continue;
                }
                let current = self.particles.position[i];
                let velocity = (current - self.particles.previous[i]) * damping;
                self.particles.previous[i] = current;
                self.particles.position[i] = current + velocity + gravity_step;
            }
        }

        #[cfg(feature = "parallel")]
        {
            // Integrate into a temp buffer in parallel, then apply.
            // Results are identical to the serial path; relaxation below
            // stays serial because constraint order is contractual.
            let fixed = &self.fixed;
            let position = &self.particles.position;
            let previous = &self.particles.previous;
            let integrated: Vec<Vec3> = (0..count)
                .into_par_iter()
                .map(|i| {
                    if fixed[i] {
                        position[i]
                    } else {
                        position[i] + (position[i] - previous[i]) * damping + gravity_step
                    }
                })
                .collect();
            for i in 0..count {
                if !self.fixed[i] {
                    self.particles.previous[i] = self.particles.position[i];
                }
                self.particles.position[i] = integrated[i];
            }
        }

        // Grab override: pin to the target with zero implicit velocity so
        // the particle does not spring away on release.
        if let GrabState::Grabbing { index, target } = self.grab {
            self.particles.position[index] = target;
            self.particles.previous[index] = target;
        }

        for _ in 0..self.config.constraint_iterations {
            solve_constraints(&self.constraints, &mut self.particles.position, &self.fixed);
        }
    }

    /// Index of the particle closest to `point` by squared distance.
    /// `None` only for an empty particle set.
    pub fn find_nearest(&self, point: Vec3) -> Option<usize> {
        let mut best = None;
        let mut best_dist = f32::INFINITY;
        for (i, p) in self.particles.position.iter().enumerate() {
            let d = p.distance_squared(point);
            if d < best_dist {
                best_dist = d;
                best = Some(i);
            }
        }
        best
    }

    /// Start grabbing `index`, pinning it to `target` from the next step.
    ///
    /// Refused (returns `false`, state unchanged) for pinned or
    /// out-of-range indices. Grabbing while already grabbing reassigns
    /// the grab to the new particle.
    pub fn begin_grab(&mut self, index: usize, target: Vec3) -> bool {
        if index >= self.particles.count || self.particles.pinned[index] {
            return false;
        }
        self.grab = GrabState::Grabbing { index, target };
        true
    }

    /// Move the active grab target. No-op when idle.
    pub fn update_grab(&mut self, target: Vec3) {
        if let GrabState::Grabbing { index, .. } = self.grab {
            self.grab = GrabState::Grabbing { index, target };
        }
    }

    /// Release the grab. The particle keeps `position == previous` from
    /// the last override, so it leaves with zero implicit velocity.
    pub fn end_grab(&mut self) {
        self.grab = GrabState::Idle;
    }

    /// Index of the currently grabbed particle, if any.
    pub fn grabbed(&self) -> Option<usize> {
        self.grab.index()
    }

    /// Current positions, one `Vec3` per particle, row-major.
    pub fn positions(&self) -> &[Vec3] {
        &self.particles.position
    }

    /// Current positions as a flat scalar buffer, 3 components per
    /// particle, for copying into a renderable vertex buffer.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.particles.position)
    }

    pub fn particle_count(&self) -> usize {
        self.particles.count
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn constraints(&self) -> &[DistanceConstraint] {
        &self.constraints
    }

    /// Row-major index of grid node `(col, row)`.
    pub fn index_of(&self, col: usize, row: usize) -> usize {
        row * self.cols() + col
    }

    pub fn is_pinned(&self, index: usize) -> bool {
        self.particles.pinned.get(index).copied().unwrap_or(false)
    }

    fn cols(&self) -> usize {
        self.segments_x as usize + 1
    }

    fn rows(&self) -> usize {
        self.segments_y as usize + 1
    }
}
