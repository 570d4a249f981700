//! Ordered tasks and the rulesets governing them
//!
//! An [`OrderedTask`] owns its [`OrderedTaskPoint`]s and the [`TaskFactory`]
//! of the active ruleset. Edits are applied to a copy and only replace the
//! task once they succeeded.

mod behaviour;
mod factory;
pub mod fai_triangle;
mod landout;
mod ordered;
mod point;
mod target;

pub use self::behaviour::{ContestNationality, SectorDefaults, TaskBehaviour};
pub use self::factory::{
    FixedSizes, MAX_MAT_POINTS, RulesetDescriptor, TaskFactory, TaskFactoryConstraints, TaskFactoryType,
    TaskPointFactoryType, ValidationReport, create_task_factory, descriptor,
};
pub use self::landout::TaskLegLandoutDistance;
pub use self::ordered::OrderedTask;
pub use self::point::{OrderedTaskPoint, PointKind, Waypoint};
pub use self::target::Target;
