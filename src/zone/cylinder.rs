use super::boundary;
use crate::geo::{FlatLine, FlatProjection, GeoPoint};

/// Fixed radius of a MAT cylinder, one statute mile (m)
pub const MAT_CYLINDER_RADIUS: f64 = 1609.344;

/// Circular zone around a waypoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderZone {
    location: GeoPoint,
    radius: f64,
}

impl CylinderZone {
    pub fn new(location: GeoPoint, radius: f64) -> Self {
        Self { location, radius }
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

    pub fn inside(&self, location: &GeoPoint) -> bool {
        self.location.distance(location) <= self.radius
    }

    /// Points where the segment `start`-`end` crosses the circle, ordered
    /// from `start`
    pub fn intersects(&self, start: &GeoPoint, end: &GeoPoint, projection: &FlatProjection) -> Vec<GeoPoint> {
        if self.radius <= 0.0 {
            return Vec::new();
        }

        let line = FlatLine::new(projection.project(start), projection.project(end));
        let center = projection.project(&self.location);
        let radius = projection.project_range(&self.location, self.radius);

        line.intersect_circle(center, radius)
            .into_iter()
            .map(|point| projection.unproject(point))
            .collect()
    }

    pub fn boundary(&self) -> Vec<GeoPoint> {
        boundary::circle(&self.location, self.radius)
    }

    /// Point on the circle nearest to `location`, or `location` itself if
    /// it is inside
    pub fn closest_point(&self, location: &GeoPoint) -> GeoPoint {
        if self.inside(location) {
            *location
        } else {
            self.location.intermediate_point(location, self.radius)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{Angle, GeoVector};
    use claims::assert_lt;

    fn origin() -> GeoPoint {
        GeoPoint::degrees(0.0, 0.0)
    }

    fn east(distance: f64) -> GeoPoint {
        GeoVector::new(distance.abs(), Angle::degrees(if distance < 0.0 { 270.0 } else { 90.0 })).end_point(&origin())
    }

    #[test]
    fn test_inside() {
        let zone = CylinderZone::new(origin(), 500.0);
        assert!(zone.inside(&east(400.0)));
        assert!(zone.inside(&origin()));
        assert!(!zone.inside(&east(600.0)));
    }

    #[test]
    fn test_intersects_through_center() {
        let zone = CylinderZone::new(origin(), 500.0);
        let projection = FlatProjection::new(origin());

        let points = zone.intersects(&east(-1000.0), &east(1000.0), &projection);
        assert_eq!(points.len(), 2);
        assert_lt!(points[0].distance(&east(-500.0)), 0.5);
        assert_lt!(points[1].distance(&east(500.0)), 0.5);
    }

    #[test]
    fn test_intersects_zero_length_segment() {
        let zone = CylinderZone::new(origin(), 500.0);
        let projection = FlatProjection::new(origin());
        assert!(zone.intersects(&east(-1000.0), &east(-1000.0), &projection).is_empty());
    }

    #[test]
    fn test_intersects_non_positive_radius() {
        let zone = CylinderZone::new(origin(), 0.0);
        let projection = FlatProjection::new(origin());
        assert!(zone.intersects(&east(-1000.0), &east(1000.0), &projection).is_empty());
    }

    #[test]
    fn test_boundary() {
        let zone = CylinderZone::new(GeoPoint::degrees(7.0, 51.0), 500.0);
        let boundary = zone.boundary();

        assert_eq!(boundary.len(), boundary::CIRCLE_SEGMENTS);
        for vertex in &boundary {
            assert_lt!((zone.location().distance(vertex) - 500.0).abs(), 1e-6);
        }
    }

    #[test]
    fn test_closest_point() {
        let zone = CylinderZone::new(origin(), 500.0);
        assert_eq!(zone.closest_point(&east(100.0)), east(100.0));

        let closest = zone.closest_point(&east(2000.0));
        assert_lt!(closest.distance(&east(500.0)), 1e-6);
    }
}
