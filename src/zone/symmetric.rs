use super::boundary::{self, LINE_POINTS};
use crate::geo::{Angle, FlatProjection, GeoPoint, GeoVector};

/// Sector shapes whose orientation follows the task legs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymmetricKind {
    /// FAI 90° sector
    FaiSector,
    /// Start or finish line, a 180° half disc behind the line
    Line,
    /// 90° sector of 10 km plus a 500 m cylinder
    Keyhole,
    /// BGA fixed course: 90° sector of 20 km plus a 500 m cylinder
    BgaFixedCourse,
    /// BGA enhanced option: 180° sector of 10 km plus a 500 m cylinder
    BgaEnhancedOption,
    /// BGA start: 180° sector of 5 km
    BgaStart,
    /// 90° sector of configurable radius
    SymmetricQuadrant,
}

pub const FAI_SECTOR_TURNPOINT_RADIUS: f64 = 10_000.0;
pub const FAI_SECTOR_END_RADIUS: f64 = 1_000.0;
pub const KEYHOLE_INNER_RADIUS: f64 = 500.0;

/// A sector bisected by the direction away from the task legs
///
/// At a start the sector points away from the first leg, at a finish it
/// continues the last leg, and at a turnpoint it points to the outside of
/// the turn. [`SymmetricSectorZone::set_legs`] re-orients it whenever the
/// neighbouring points change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricSectorZone {
    kind: SymmetricKind,
    location: GeoPoint,
    radius: f64,
    sector_angle: Angle,
    inner_radius: f64,
    start_radial: Angle,
    end_radial: Angle,
}

impl SymmetricSectorZone {
    fn with_shape(kind: SymmetricKind, location: GeoPoint, radius: f64, sector_angle: Angle, inner_radius: f64) -> Self {
        let mut zone = Self {
            kind,
            location,
            radius,
            sector_angle,
            inner_radius,
            start_radial: Angle::ZERO,
            end_radial: Angle::ZERO,
        };
        zone.orient(Angle::ZERO);
        zone
    }

    /// FAI sector, 10 km at turnpoints and 1 km at start or finish
    pub fn fai_sector(location: GeoPoint, is_turnpoint: bool) -> Self {
        let radius = if is_turnpoint {
            FAI_SECTOR_TURNPOINT_RADIUS
        } else {
            FAI_SECTOR_END_RADIUS
        };
        Self::with_shape(SymmetricKind::FaiSector, location, radius, Angle::QUARTER_CIRCLE, 0.0)
    }

    /// Line of total `length`, centred on the waypoint
    pub fn line(location: GeoPoint, length: f64) -> Self {
        Self::with_shape(SymmetricKind::Line, location, length / 2.0, Angle::HALF_CIRCLE, 0.0)
    }

    pub fn keyhole(location: GeoPoint) -> Self {
        Self::with_shape(
            SymmetricKind::Keyhole,
            location,
            10_000.0,
            Angle::QUARTER_CIRCLE,
            KEYHOLE_INNER_RADIUS,
        )
    }

    pub fn bga_fixed_course(location: GeoPoint) -> Self {
        Self::with_shape(
            SymmetricKind::BgaFixedCourse,
            location,
            20_000.0,
            Angle::QUARTER_CIRCLE,
            KEYHOLE_INNER_RADIUS,
        )
    }

    pub fn bga_enhanced_option(location: GeoPoint) -> Self {
        Self::with_shape(
            SymmetricKind::BgaEnhancedOption,
            location,
            10_000.0,
            Angle::HALF_CIRCLE,
            KEYHOLE_INNER_RADIUS,
        )
    }

    pub fn bga_start(location: GeoPoint) -> Self {
        Self::with_shape(SymmetricKind::BgaStart, location, 5_000.0, Angle::HALF_CIRCLE, 0.0)
    }

    pub fn symmetric_quadrant(location: GeoPoint, radius: f64) -> Self {
        Self::with_shape(SymmetricKind::SymmetricQuadrant, location, radius, Angle::QUARTER_CIRCLE, 0.0)
    }

    pub fn kind(&self) -> SymmetricKind {
        self.kind
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Resize shapes with a configurable radius; other kinds keep theirs
    pub fn set_radius(&mut self, radius: f64) {
        if self.has_variable_radius() {
            self.radius = radius;
        }
    }

    pub fn has_variable_radius(&self) -> bool {
        matches!(self.kind, SymmetricKind::Line | SymmetricKind::SymmetricQuadrant)
    }

    /// Total line length, only meaningful for lines
    pub fn length(&self) -> f64 {
        self.radius * 2.0
    }

    pub fn sector_angle(&self) -> Angle {
        self.sector_angle
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn start_radial(&self) -> Angle {
        self.start_radial
    }

    pub fn end_radial(&self) -> Angle {
        self.end_radial
    }

    /// Direction the sector opens towards
    pub fn bisector(&self) -> Angle {
        (self.start_radial + self.sector_angle.half()).as_bearing()
    }

    fn orient(&mut self, bisector: Angle) {
        let half = self.sector_angle.half();
        self.start_radial = (bisector - half).as_bearing();
        self.end_radial = (bisector + half).as_bearing();
    }

    /// Re-orient from the neighbouring task points
    ///
    /// Without either neighbour the orientation is left unchanged.
    pub fn set_legs(&mut self, previous: Option<&GeoPoint>, next: Option<&GeoPoint>) {
        let bisector = match (previous, next) {
            (None, Some(next)) => next.bearing(&self.location),
            (Some(previous), None) => previous.bearing(&self.location),
            (Some(previous), Some(next)) => {
                let to_previous = self.location.bearing(previous);
                let to_next = self.location.bearing(next);
                to_previous.half_angle(to_next)
            }
            (None, None) => return,
        };
        self.orient(bisector);
    }

    fn is_within_radials(&self, location: &GeoPoint) -> bool {
        let bearing = self.location.bearing(location);
        bearing.between(self.start_radial, self.end_radial)
    }

    pub fn inside(&self, location: &GeoPoint) -> bool {
        let distance = self.location.distance(location);
        if distance <= self.inner_radius {
            return true;
        }
        distance <= self.radius && self.is_within_radials(location)
    }

    pub fn boundary(&self) -> Vec<GeoPoint> {
        if self.kind == SymmetricKind::Line {
            let (first, last) = self.line_ends();
            let length = first.distance(&last);
            let segments = (LINE_POINTS - 1) as f64;
            return (0..LINE_POINTS)
                .map(|i| first.intermediate_point(&last, length * i as f64 / segments))
                .collect();
        }

        let mut points = if self.inner_radius > 0.0 {
            // the part of the inner cylinder not covered by the sector
            let width = Angle::FULL_CIRCLE - self.sector_angle;
            boundary::arc(&self.location, self.inner_radius, self.end_radial, width)
        } else {
            vec![self.location]
        };
        points.extend(boundary::arc(&self.location, self.radius, self.start_radial, self.sector_angle));
        points
    }

    /// End points of a line zone
    pub fn line_ends(&self) -> (GeoPoint, GeoPoint) {
        (
            GeoVector::new(self.radius, self.start_radial).end_point(&self.location),
            GeoVector::new(self.radius, self.end_radial).end_point(&self.location),
        )
    }

    pub fn intersects(&self, start: &GeoPoint, end: &GeoPoint, projection: &FlatProjection) -> Vec<GeoPoint> {
        if self.radius <= 0.0 {
            return Vec::new();
        }
        let closed = self.kind != SymmetricKind::Line;
        boundary::polygon_intersections(&self.boundary(), closed, start, end, projection)
    }
}
