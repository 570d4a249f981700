use super::{Angle, BoundingBox, EARTH_RADIUS, GeoPoint};
use glam::DVec2;

/// Local equirectangular projection centred on a reference point
///
/// Projected coordinates are metres, `x` east and `y` north of the centre.
/// Accurate enough for geometry within a few hundred kilometres of the
/// centre, which covers any single task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatProjection {
    center: GeoPoint,
    cos_latitude: f64,
}

impl FlatProjection {
    pub fn new(center: GeoPoint) -> Self {
        Self {
            center,
            cos_latitude: center.latitude.cos(),
        }
    }

    /// Projection centred on the bounding box of `points`
    ///
    /// Returns `None` if the slice is empty.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        BoundingBox::from_points(points).map(|bbox| Self::new(bbox.center()))
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn project(&self, location: &GeoPoint) -> DVec2 {
        let dlon = (location.longitude - self.center.longitude).as_delta();
        let dlat = location.latitude - self.center.latitude;
        DVec2::new(
            dlon.to_radians() * self.cos_latitude * EARTH_RADIUS,
            dlat.to_radians() * EARTH_RADIUS,
        )
    }

    pub fn unproject(&self, point: DVec2) -> GeoPoint {
        let dlat = point.y / EARTH_RADIUS;
        let dlon = if self.cos_latitude.abs() > f64::EPSILON {
            point.x / (EARTH_RADIUS * self.cos_latitude)
        } else {
            0.0
        };

        GeoPoint::new(
            (self.center.longitude + Angle::radians(dlon)).as_delta(),
            self.center.latitude + Angle::radians(dlat),
        )
    }

    /// Projected length of a geodesic distance measured east from `location`
    pub fn project_range(&self, location: &GeoPoint, distance: f64) -> f64 {
        let other = super::GeoVector::new(distance, Angle::QUARTER_CIRCLE).end_point(location);
        self.project(location).distance(self.project(&other))
    }
}

/// A line segment in projected coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatLine {
    pub start: DVec2,
    pub end: DVec2,
}

impl FlatLine {
    pub const fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    pub fn direction(&self) -> DVec2 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    pub fn point_at(&self, t: f64) -> DVec2 {
        self.start + self.direction() * t
    }

    /// Line parameters where the infinite line through this segment meets
    /// a circle, in ascending order
    ///
    /// Returns `None` if the line misses the circle, the radius is not
    /// positive or the segment has zero length.
    pub fn circle_parameters(&self, center: DVec2, radius: f64) -> Option<(f64, f64)> {
        if radius <= 0.0 {
            return None;
        }

        let d = self.direction();
        let f = self.start - center;

        let a = d.length_squared();
        if a < f64::EPSILON {
            return None;
        }

        let b = 2.0 * f.dot(d);
        let c = f.length_squared() - radius * radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        Some(((-b - root) / (2.0 * a), (-b + root) / (2.0 * a)))
    }

    /// Points where this segment crosses a circle, ordered from `start`
    pub fn intersect_circle(&self, center: DVec2, radius: f64) -> Vec<DVec2> {
        let Some((t1, t2)) = self.circle_parameters(center, radius) else {
            return Vec::new();
        };

        let mut points = Vec::with_capacity(2);
        if (0.0..=1.0).contains(&t1) {
            points.push(self.point_at(t1));
        }
        if t2 != t1 && (0.0..=1.0).contains(&t2) {
            points.push(self.point_at(t2));
        }
        points
    }

    /// Parameter along this segment where it crosses `other`
    pub fn intersect_parameter(&self, other: &FlatLine) -> Option<f64> {
        let dir1 = self.direction();
        let dir2 = other.direction();

        let det = dir1.perp_dot(dir2);
        if det.abs() < f64::EPSILON {
            return None;
        }

        let dp = other.start - self.start;
        let t = dp.perp_dot(dir2) / det;
        let s = dp.perp_dot(dir1) / det;

        if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&s) {
            return None;
        }

        Some(t)
    }

    pub fn intersect(&self, other: &FlatLine) -> Option<DVec2> {
        self.intersect_parameter(other).map(|t| self.point_at(t))
    }

    /// Closest point on the segment to `point`
    pub fn closest_point(&self, point: DVec2) -> DVec2 {
        let d = self.direction();
        let length_squared = d.length_squared();
        if length_squared < f64::EPSILON {
            return self.start;
        }

        let t = ((point - self.start).dot(d) / length_squared).clamp(0.0, 1.0);
        self.point_at(t)
    }
}
