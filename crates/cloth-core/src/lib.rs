//! Interactive Verlet cloth simulation.
//!
//! A grid of point masses hangs from its pinned top row, integrated with
//! position-based Verlet dynamics and held together by structural and
//! shear distance constraints. One particle at a time can be grabbed and
//! dragged to an externally supplied target while the rest of the cloth
//! reacts.
//!
//! The crate is renderer-agnostic: a frame loop calls
//! [`ClothSolver::step`] and copies [`ClothSolver::positions_flat`] into
//! its vertex buffer. See the `cloth-wasm` crate for the browser boundary.

pub mod config;
pub mod constraint;
pub mod error;
pub mod grab;
pub mod particle;
pub mod solver;

pub use config::ClothConfig;
pub use constraint::DistanceConstraint;
pub use error::ClothError;
pub use grab::GrabState;
pub use particle::ParticleSet;
pub use solver::ClothSolver;
