use glam::Vec3;

/// Pointer grab: at most one particle pinned to an externally supplied
/// moving target, overriding normal dynamics while active.
///
/// The lifecycle is Idle -> Grabbing -> Idle. A new grab while already
/// grabbing reassigns directly without passing through Idle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrabState {
    Idle,
    Grabbing { index: usize, target: Vec3 },
}

impl GrabState {
    /// Index of the grabbed particle, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            GrabState::Idle => None,
            GrabState::Grabbing { index, .. } => Some(*index),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, GrabState::Grabbing { .. })
    }
}
