#![doc = include_str!("../README.md")]

pub use crate::error::{Error, Result, TaskValidationError};
pub use crate::geo::{Angle, FlatProjection, GeoPoint, GeoVector};
pub use crate::manager::{ExclusiveLease, Lease, ProtectedTaskManager, TaskManager, TaskMode};
pub use crate::polar::{GlidePolar, PolarCoefficients, PolarInfo, PolarSettings};
pub use crate::task::{
    OrderedTask, OrderedTaskPoint, PointKind, TaskBehaviour, TaskFactory, TaskFactoryType, TaskPointFactoryType,
    ValidationReport, Waypoint,
};
pub use crate::zone::ObservationZone;

pub mod airspace;
mod error;
pub mod geo;
pub mod manager;
pub mod polar;
pub mod task;
pub mod zone;
