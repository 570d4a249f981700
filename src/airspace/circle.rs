use crate::geo::{Angle, BoundingBox, FlatLine, FlatProjection, GeoPoint, GeoVector};
use tracing::trace;

/// Number of vertices in the enclosing border polygon, first and last
/// coinciding
const BORDER_POINTS: usize = 13;

/// Border radius relative to the true radius
const BORDER_SCALE: f64 = 1.1;

/// Circular airspace volume
///
/// Besides the exact circle it keeps a coarse polygon drawn outside the
/// circle, so the polygon's bounding box always contains the whole circle
/// and can reject far-away queries before any exact geometry runs.
#[derive(Debug, Clone, PartialEq)]
pub struct AirspaceCircle {
    center: GeoPoint,
    radius: f64,
    border: Vec<GeoPoint>,
    bounds: BoundingBox,
}

impl AirspaceCircle {
    pub fn new(center: GeoPoint, radius: f64) -> Self {
        let border: Vec<GeoPoint> = (0..BORDER_POINTS)
            .map(|i| {
                let bearing = Angle::degrees(i as f64 * 360.0 / (BORDER_POINTS - 1) as f64);
                GeoVector::new(radius * BORDER_SCALE, bearing.as_bearing()).end_point(&center)
            })
            .collect();
        let bounds = BoundingBox::from_points(&border).unwrap_or_else(|| BoundingBox::from(center));

        Self {
            center,
            radius,
            border,
            bounds,
        }
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Enclosing polygon at 1.1 times the radius
    pub fn border(&self) -> &[GeoPoint] {
        &self.border
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn inside(&self, location: &GeoPoint) -> bool {
        self.center.distance(location) <= self.radius
    }

    /// Points where the segment `start`-`end` crosses the circle, ordered
    /// from `start`
    pub fn intersects(&self, start: &GeoPoint, end: &GeoPoint, projection: &FlatProjection) -> Vec<GeoPoint> {
        let mut segment = BoundingBox::from(*start);
        segment.extend(*end);
        if !self.bounds.overlaps(&segment) {
            trace!("segment rejected by airspace bounds");
            return Vec::new();
        }

        let line = FlatLine::new(projection.project(start), projection.project(end));
        let center = projection.project(&self.center);
        let radius = projection.project_range(&self.center, self.radius);

        line.intersect_circle(center, radius)
            .into_iter()
            .map(|point| projection.unproject(point))
            .collect()
    }

    /// `location` itself if inside, otherwise the nearest point on the circle
    pub fn closest_point(&self, location: &GeoPoint) -> GeoPoint {
        if self.inside(location) {
            *location
        } else {
            self.center.intermediate_point(location, self.radius)
        }
    }
}
