use crate::geo::GeoPoint;

/// Movable scoring point inside an area zone
///
/// The range and radial view of a target is derived from its location and
/// the zone it sits in, see [`OrderedTaskPoint::target_range_radial`].
///
/// [`OrderedTaskPoint::target_range_radial`]: crate::task::OrderedTaskPoint::target_range_radial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    location: GeoPoint,
    locked: bool,
}

impl Target {
    pub fn new(location: GeoPoint) -> Self {
        Self {
            location,
            locked: false,
        }
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Move the target unless it is locked and `override_lock` is not set
    pub fn set_location(&mut self, location: GeoPoint, override_lock: bool) -> bool {
        if self.locked && !override_lock {
            return false;
        }

        self.location = location;
        true
    }

    /// A locked target is left alone by target optimisation
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}
