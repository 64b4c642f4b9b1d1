//! Error types for the scheduling engine

use cadence_primitives::Resource;
use thiserror::Error;

/// Scheduling errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Two operations in one time slot share a resource
    #[error("structural violation: operations overlap on resource {resource}")]
    StructuralViolation {
        /// The shared resource
        resource: Resource,
    },

    /// Merged schedules collide on a resource at the same slot
    #[error("overlapping operations between merged schedules at slot {index} on resource {resource}")]
    Collision {
        /// Slot index in the merged result
        index: usize,
        /// The shared resource
        resource: Resource,
    },

    /// Bad start/end bounds
    #[error("invalid range [{start}, {end}) for schedule of length {len}")]
    InvalidRange {
        /// Inclusive start
        start: usize,
        /// Exclusive end
        end: usize,
        /// Schedule length
        len: usize,
    },

    /// Negative search distance
    #[error("negative max_distance: {0}")]
    NegativeDistance(isize),

    /// Frontier already past the requested start
    #[error("frontier for resource {resource} is at {frontier}, after start {start}")]
    FrontierViolation {
        /// Offending resource
        resource: Resource,
        /// Its frontier value
        frontier: usize,
        /// Requested start
        start: usize,
    },

    /// Unknown insert strategy name
    #[error("unrecognized insert strategy: {0}")]
    UnrecognizedStrategy(String),

    /// Unknown alignment name
    #[error("unrecognized alignment: {0}")]
    UnrecognizedAlignment(String),

    /// A value of the wrong kind where a time slot is required
    #[error("type mismatch: expected a time slot, got {0}")]
    TypeMismatch(&'static str),

    /// Slot index out of bounds
    #[error("slot index {index} out of bounds for schedule of length {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Schedule length
        len: usize,
    },

    /// Operation expected in a slot is absent
    #[error("operation not found in slot {index}")]
    OperationNotFound {
        /// Slot index searched
        index: usize,
    },

    /// The acceptance predicate vetoed a placement
    #[error("placement rejected by acceptance predicate at slot {index}")]
    PlacementRejected {
        /// Slot index of the rejected placement
        index: usize,
    },

    /// A nested schedule contains itself
    #[error("cyclic nesting: a schedule is nested inside itself")]
    CyclicNesting,
}

impl ScheduleError {
    /// Re-label a structural violation found while merging slot `index`
    pub(crate) fn into_collision(self, index: usize) -> Self {
        match self {
            ScheduleError::StructuralViolation { resource } => {
                ScheduleError::Collision { index, resource }
            }
            other => other,
        }
    }
}

/// Result type for scheduling operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;
