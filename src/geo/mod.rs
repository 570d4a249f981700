//! Geographic primitives
//!
//! Angles, points and vectors on a spherical earth, plus the local flat
//! projection used for all line/circle geometry near the task area.

mod angle;
mod bounding_box;
mod flat;
mod point;

pub use self::angle::Angle;
pub use self::bounding_box::BoundingBox;
pub use self::flat::{FlatLine, FlatProjection};
pub use self::point::{GeoPoint, GeoVector};

/// FAI sphere radius (m)
pub const EARTH_RADIUS: f64 = 6_371_000.0;
