use crate::geo::{BoundingBox, FlatLine, FlatProjection, GeoPoint};
use glam::DVec2;

/// Airspace volume bounded by a closed polygon
#[derive(Debug, Clone, PartialEq)]
pub struct AirspacePolygon {
    border: Vec<GeoPoint>,
    bounds: BoundingBox,
    projection: FlatProjection,
}

impl AirspacePolygon {
    /// Returns `None` for fewer than three vertices
    pub fn new(border: Vec<GeoPoint>) -> Option<Self> {
        if border.len() < 3 {
            return None;
        }

        let bounds = BoundingBox::from_points(&border)?;
        let projection = FlatProjection::new(bounds.center());
        Some(Self {
            border,
            bounds,
            projection,
        })
    }

    pub fn border(&self) -> &[GeoPoint] {
        &self.border
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    fn edges<'a>(&'a self, projection: &'a FlatProjection) -> impl Iterator<Item = FlatLine> + 'a {
        let count = self.border.len();
        (0..count).map(move |i| {
            FlatLine::new(
                projection.project(&self.border[i]),
                projection.project(&self.border[(i + 1) % count]),
            )
        })
    }

    /// Even-odd crossing test in the polygon's own projection
    pub fn inside(&self, location: &GeoPoint) -> bool {
        if !self.bounds.contains(location) {
            return false;
        }

        let point = self.projection.project(location);
        let mut inside = false;
        for edge in self.edges(&self.projection) {
            let (a, b) = (edge.start, edge.end);
            if (a.y > point.y) != (b.y > point.y) {
                let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if point.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Edge crossings of the segment `start`-`end`, ordered from `start`
    pub fn intersects(&self, start: &GeoPoint, end: &GeoPoint, projection: &FlatProjection) -> Vec<GeoPoint> {
        let mut segment = BoundingBox::from(*start);
        segment.extend(*end);
        if !self.bounds.overlaps(&segment) {
            return Vec::new();
        }

        let line = FlatLine::new(projection.project(start), projection.project(end));
        if line.length() < f64::EPSILON {
            return Vec::new();
        }

        let mut parameters: Vec<f64> = self
            .edges(projection)
            .filter_map(|edge| line.intersect_parameter(&edge))
            .collect();
        parameters.sort_by(f64::total_cmp);
        parameters.dedup_by(|a, b| (*a - *b).abs() * line.length() < 1e-3);

        parameters
            .into_iter()
            .map(|t| projection.unproject(line.point_at(t)))
            .collect()
    }

    /// `location` itself if inside, otherwise the nearest point on the border
    pub fn closest_point(&self, location: &GeoPoint) -> GeoPoint {
        if self.inside(location) {
            return *location;
        }

        let point = self.projection.project(location);
        let closest = self
            .edges(&self.projection)
            .map(|edge| edge.closest_point(point))
            .min_by(|a, b| a.distance_squared(point).total_cmp(&b.distance_squared(point)))
            .unwrap_or(DVec2::ZERO);
        self.projection.unproject(closest)
    }
}
