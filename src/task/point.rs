use crate::geo::{Angle, GeoPoint};
use crate::task::{TaskLegLandoutDistance, TaskPointFactoryType, Target};
use crate::zone::ObservationZone;

/// A named location a task point can be placed on
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub id: u32,
    pub name: String,
    pub location: GeoPoint,
    /// m MSL
    pub elevation: f64,
    pub is_turnpoint: bool,
}

impl Waypoint {
    pub fn new(id: u32, name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            elevation: 0.0,
            is_turnpoint: true,
        }
    }
}

/// Role of a point within an ordered task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    Start,
    /// Assigned speed task turnpoint, scored at the waypoint
    Turnpoint,
    /// Area turnpoint with a movable target
    Area,
    Finish,
}

impl PointKind {
    pub fn is_intermediate(self) -> bool {
        matches!(self, Self::Turnpoint | Self::Area)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderedTaskPoint {
    kind: PointKind,
    waypoint: Waypoint,
    zone: ObservationZone,
    target: Option<Target>,
    achieved: bool,
    scored_location: Option<GeoPoint>,
    landout: TaskLegLandoutDistance,
}

impl OrderedTaskPoint {
    /// Area points get a target at the waypoint
    pub fn new(kind: PointKind, waypoint: Waypoint, zone: ObservationZone) -> Self {
        let target = (kind == PointKind::Area).then(|| Target::new(waypoint.location));
        Self {
            kind,
            waypoint,
            zone,
            target,
            achieved: false,
            scored_location: None,
            landout: TaskLegLandoutDistance::new(),
        }
    }

    pub fn kind(&self) -> PointKind {
        self.kind
    }

    pub fn is_intermediate(&self) -> bool {
        self.kind.is_intermediate()
    }

    pub fn waypoint(&self) -> &Waypoint {
        &self.waypoint
    }

    pub fn location(&self) -> GeoPoint {
        self.waypoint.location
    }

    /// Role and zone shape combined
    pub fn factory_type(&self) -> TaskPointFactoryType {
        TaskPointFactoryType::classify(self.kind, self.zone.shape())
    }

    pub fn zone(&self) -> &ObservationZone {
        &self.zone
    }

    pub(crate) fn zone_mut(&mut self) -> &mut ObservationZone {
        &mut self.zone
    }

    pub fn is_achieved(&self) -> bool {
        self.achieved
    }

    pub fn set_achieved(&mut self, achieved: bool) {
        self.achieved = achieved;
    }

    /// Where the point was scored, the waypoint until set otherwise
    pub fn scored_location(&self) -> GeoPoint {
        self.scored_location.unwrap_or(self.waypoint.location)
    }

    pub fn set_scored_location(&mut self, location: Option<GeoPoint>) {
        self.scored_location = location;
    }

    /// Landout geometry of the leg arriving at this point
    pub fn landout(&self) -> &TaskLegLandoutDistance {
        &self.landout
    }

    pub(crate) fn update_landout(&mut self, origin: GeoPoint) -> bool {
        let boundary = self.zone.boundary();
        self.landout.update(origin, self.waypoint.location, boundary)
    }

    pub(crate) fn clear_landout(&mut self) {
        self.landout.clear();
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn target_location(&self) -> Option<GeoPoint> {
        self.target.map(|target| target.location())
    }

    pub fn set_target_locked(&mut self, locked: bool) -> bool {
        match &mut self.target {
            Some(target) => {
                target.set_locked(locked);
                true
            }
            None => false,
        }
    }

    pub fn set_target_location(&mut self, location: GeoPoint, override_lock: bool) -> bool {
        match &mut self.target {
            Some(target) => target.set_location(location, override_lock),
            None => false,
        }
    }

    /// Place the target from a range in `[-1, 1]` and a radial relative to
    /// `reference`, the bearing of the inbound leg
    ///
    /// Positive ranges move towards the far edge of the zone, negative
    /// ranges towards the near edge. A locked target is moved as well and
    /// stays locked.
    pub fn set_target_range_radial(&mut self, range: f64, radial: Angle, reference: Angle) -> bool {
        let Some(target) = &mut self.target else {
            return false;
        };

        let range = range.clamp(-1.0, 1.0);
        let mut direction = reference + radial.as_delta();
        if range < 0.0 {
            direction = direction + Angle::HALF_CIRCLE;
        }

        let location = self.zone.point_towards_edge(direction.as_bearing(), range.abs());
        target.set_location(location, true)
    }

    /// Range and radial of the target relative to the inbound leg bearing
    /// `reference`, the inverse of [`Self::set_target_range_radial`]
    pub fn target_range_radial(&self, reference: Angle) -> Option<(f64, Angle)> {
        let target = self.target?;
        let center = self.waypoint.location;
        let location = target.location();

        let distance = center.distance(&location);
        if distance < 1e-3 {
            return Some((0.0, Angle::ZERO));
        }

        let direction = center.bearing(&location);
        let raw = (direction - reference).as_delta();
        let (sign, radial) = if raw.abs() > Angle::QUARTER_CIRCLE {
            (-1.0, (raw + Angle::HALF_CIRCLE).as_delta())
        } else {
            (1.0, raw)
        };

        let edge = self.zone.edge_distance(direction);
        let range = if edge > 0.0 { sign * (distance / edge).min(1.0) } else { 0.0 };
        Some((range, radial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoVector;
    use claims::{assert_lt, assert_none, assert_some};

    fn waypoint() -> Waypoint {
        Waypoint::new(1, "Area", GeoPoint::degrees(7.0, 51.0))
    }

    fn area_point() -> OrderedTaskPoint {
        let waypoint = waypoint();
        let zone = ObservationZone::cylinder(waypoint.location, 10_000.0);
        OrderedTaskPoint::new(PointKind::Area, waypoint, zone)
    }

    #[test]
    fn test_targets_only_on_areas() {
        assert!(area_point().has_target());

        let waypoint = waypoint();
        let zone = ObservationZone::cylinder(waypoint.location, 500.0);
        let turnpoint = OrderedTaskPoint::new(PointKind::Turnpoint, waypoint, zone);
        assert!(!turnpoint.has_target());
        assert_none!(turnpoint.target_range_radial(Angle::ZERO));
    }

    #[test]
    fn test_initial_target_at_waypoint() {
        let point = area_point();
        assert_eq!(point.target_location(), Some(point.location()));

        let (range, radial) = assert_some!(point.target_range_radial(Angle::ZERO));
        assert_eq!(range, 0.0);
        assert_eq!(radial, Angle::ZERO);
    }

    #[test]
    fn test_range_radial_round_trip() {
        let reference = Angle::degrees(40.0);
        let mut point = area_point();

        for (range, radial) in [(0.5, 30.0), (-0.5, 30.0), (1.0, -60.0), (-0.8, 0.0)] {
            assert!(point.set_target_range_radial(range, Angle::degrees(radial), reference));
            let (actual_range, actual_radial) = assert_some!(point.target_range_radial(reference));
            assert_lt!((actual_range - range).abs(), 1e-3);
            assert_lt!((actual_radial.to_degrees() - radial).abs(), 1e-3);
        }
    }

    #[test]
    fn test_range_moves_along_leg() {
        let reference = Angle::ZERO;
        let mut point = area_point();

        assert!(point.set_target_range_radial(0.5, Angle::ZERO, reference));
        let expected = GeoVector::new(5_000.0, Angle::ZERO).end_point(&point.location());
        let target = assert_some!(point.target_location());
        assert_lt!(target.distance(&expected), 1e-3);
    }

    #[test]
    fn test_locked_target_is_placed_explicitly() {
        let mut point = area_point();
        assert!(point.set_target_locked(true));

        let location = GeoVector::new(5_000.0, Angle::ZERO).end_point(&point.location());
        assert!(!point.set_target_location(location, false));
        assert_eq!(point.target_location(), Some(point.location()));

        assert!(point.set_target_range_radial(0.5, Angle::ZERO, Angle::ZERO));
        let target = assert_some!(point.target_location());
        assert_lt!(target.distance(&location), 1e-3);
        assert!(assert_some!(point.target()).is_locked());
    }

    #[test]
    fn test_scored_location_defaults_to_waypoint() {
        let mut point = area_point();
        assert_eq!(point.scored_location(), point.location());

        let scored = GeoPoint::degrees(7.05, 51.02);
        point.set_scored_location(Some(scored));
        assert_eq!(point.scored_location(), scored);
    }
}
