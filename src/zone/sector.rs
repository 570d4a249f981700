use super::boundary::{self, is_full_circle, within_radials};
use crate::geo::{Angle, FlatProjection, GeoPoint};

/// Pie slice around a waypoint, bounded by two radials
///
/// Radials run clockwise from `start_radial` to `end_radial`. Equal radials
/// describe a full circle, which is the default for AAT segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorZone {
    location: GeoPoint,
    radius: f64,
    start_radial: Angle,
    end_radial: Angle,
}

impl SectorZone {
    pub fn new(location: GeoPoint, radius: f64) -> Self {
        Self::with_radials(location, radius, Angle::ZERO, Angle::FULL_CIRCLE)
    }

    pub fn with_radials(location: GeoPoint, radius: f64, start_radial: Angle, end_radial: Angle) -> Self {
        Self {
            location,
            radius,
            start_radial: start_radial.as_bearing(),
            end_radial: end_radial.as_bearing(),
        }
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    pub fn start_radial(&self) -> Angle {
        self.start_radial
    }

    pub fn end_radial(&self) -> Angle {
        self.end_radial
    }

    pub fn set_radials(&mut self, start_radial: Angle, end_radial: Angle) {
        self.start_radial = start_radial.as_bearing();
        self.end_radial = end_radial.as_bearing();
    }

    pub fn is_full_circle(&self) -> bool {
        is_full_circle(self.start_radial, self.end_radial)
    }

    pub fn is_within_radials(&self, location: &GeoPoint) -> bool {
        let bearing = self.location.bearing(location);
        within_radials(bearing, self.start_radial, self.end_radial)
    }

    pub fn inside(&self, location: &GeoPoint) -> bool {
        self.location.distance(location) <= self.radius && self.is_within_radials(location)
    }

    pub fn boundary(&self) -> Vec<GeoPoint> {
        if self.is_full_circle() {
            return boundary::circle(&self.location, self.radius);
        }

        let width = (self.end_radial - self.start_radial).as_bearing();
        let mut points = vec![self.location];
        points.extend(boundary::arc(&self.location, self.radius, self.start_radial, width));
        points
    }

    pub fn intersects(&self, start: &GeoPoint, end: &GeoPoint, projection: &FlatProjection) -> Vec<GeoPoint> {
        if self.radius <= 0.0 {
            return Vec::new();
        }
        boundary::polygon_intersections(&self.boundary(), true, start, end, projection)
    }
}

/// Sector with a circular hole around the waypoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnularSectorZone {
    sector: SectorZone,
    inner_radius: f64,
}

impl AnnularSectorZone {
    pub fn new(location: GeoPoint, radius: f64) -> Self {
        Self {
            sector: SectorZone::new(location, radius),
            inner_radius: 0.0,
        }
    }

    pub fn with_radials(
        location: GeoPoint,
        radius: f64,
        inner_radius: f64,
        start_radial: Angle,
        end_radial: Angle,
    ) -> Self {
        Self {
            sector: SectorZone::with_radials(location, radius, start_radial, end_radial),
            inner_radius,
        }
    }

    pub fn location(&self) -> GeoPoint {
        self.sector.location()
    }

    pub fn radius(&self) -> f64 {
        self.sector.radius()
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.sector.set_radius(radius);
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn set_inner_radius(&mut self, inner_radius: f64) {
        self.inner_radius = inner_radius;
    }

    pub fn start_radial(&self) -> Angle {
        self.sector.start_radial()
    }

    pub fn end_radial(&self) -> Angle {
        self.sector.end_radial()
    }

    pub fn set_radials(&mut self, start_radial: Angle, end_radial: Angle) {
        self.sector.set_radials(start_radial, end_radial);
    }

    pub fn is_within_radials(&self, location: &GeoPoint) -> bool {
        self.sector.is_within_radials(location)
    }

    pub fn inside(&self, location: &GeoPoint) -> bool {
        let distance = self.location().distance(location);
        distance >= self.inner_radius && self.sector.inside(location)
    }

    pub fn boundary(&self) -> Vec<GeoPoint> {
        if self.inner_radius <= 0.0 {
            return self.sector.boundary();
        }

        let location = self.location();
        let start = self.start_radial();
        let width = if self.sector.is_full_circle() {
            Angle::FULL_CIRCLE
        } else {
            (self.end_radial() - start).as_bearing()
        };

        let mut points = boundary::arc(&location, self.radius(), start, width);
        let mut inner = boundary::arc(&location, self.inner_radius, start, width);
        inner.reverse();
        points.extend(inner);
        points
    }

    pub fn intersects(&self, start: &GeoPoint, end: &GeoPoint, projection: &FlatProjection) -> Vec<GeoPoint> {
        if self.radius() <= 0.0 {
            return Vec::new();
        }
        boundary::polygon_intersections(&self.boundary(), true, start, end, projection)
    }
}
