use crate::task::TaskPointFactoryType;

/// Recoverable task edit failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Task is full (maximum {max} points)")]
    TaskFull { max: usize },

    #[error("Task point index {index} out of range (task has {size} points)")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("No compatible point type for position {position} (requested {point_type:?})")]
    IncompatiblePoint {
        position: usize,
        point_type: Option<TaskPointFactoryType>,
    },

    #[error("No ordered task is active")]
    NotOrdered,

    #[error("Task point {0} has no target")]
    NoTarget(usize),

    #[error("Task point {0} has already been achieved")]
    PointAchieved(usize),

    #[error("Task failed validation: {0:?}")]
    InvalidTask(Vec<TaskValidationError>),
}

/// Non-fatal findings reported by task validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskValidationError {
    /// First point is not a legal start type
    NoValidStart,

    /// Last point is not a legal finish type
    NoValidFinish,

    /// A turnpoint type is not legal under the ruleset
    InvalidPointType,

    /// Ruleset requires start and finish at the same waypoint
    TaskNotClosed,

    /// Ruleset requires all turnpoints to share one type
    TaskNotHomogeneous,

    /// Ruleset requires an exact number of points
    IncorrectNumberTurnpoints,

    ExceedsMaxTurnpoints,

    UnderMinTurnpoints,

    /// Same waypoint used twice (start may equal finish)
    TurnpointsNotUnique,

    /// Leg proportions break the FAI triangle rules
    InvalidFaiTriangleGeometry,

    EmptyTask,

    /// Start, finish or turnpoint zones exceed FAI badge dimensions
    NonFaiOzs,

    /// Turnpoints are not all MAT cylinders
    NonMatOzs,
}

impl TaskValidationError {
    /// Whether this finding blocks the task from being flown
    pub fn is_error(self) -> bool {
        !matches!(
            self,
            Self::TurnpointsNotUnique | Self::NonFaiOzs | Self::NonMatOzs
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
