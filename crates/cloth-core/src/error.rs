//! Error types for cloth construction.
//!
//! Only building the grid can fail hard. Runtime parameter misuse
//! (grabbing a pinned particle, non-positive time steps, zero relaxation
//! iterations) is a silent no-op so the frame loop is never interrupted.

use core::fmt;

/// Errors that can occur when building a cloth grid.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Both segment counts must be at least 1.
    InvalidSegments { segments_x: u32, segments_y: u32 },
    /// Width and height must be positive and finite.
    InvalidExtent { width: f32, height: f32 },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidSegments { segments_x, segments_y } => write!(
                f,
                "grid needs at least 1 segment per axis, got {}x{}",
                segments_x, segments_y
            ),
            ClothError::InvalidExtent { width, height } => write!(
                f,
                "cloth extent must be positive and finite, got {}x{}",
                width, height
            ),
        }
    }
}

impl std::error::Error for ClothError {}
