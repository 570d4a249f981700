use crate::geo::{Angle, FlatLine, FlatProjection, GeoPoint, GeoVector};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tangent {
    location: GeoPoint,
    vector: GeoVector,
}

impl Tangent {
    fn new(origin: &GeoPoint, location: GeoPoint) -> Self {
        Self {
            location,
            vector: origin.distance_bearing(&location),
        }
    }
}

/// Scorable distance along one leg for an aircraft that lands out
///
/// The boundary vertices seen furthest left and right of the nominal leg
/// from the previous scored location form a cone. Inside the cone the
/// landing position scores its direct distance, beside it the distance
/// is measured via the tangent point, and past the zone via the closest
/// boundary point. The tangent geometry is cached and only recomputed when
/// the origin or the destination zone changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskLegLandoutDistance {
    origin: Option<GeoPoint>,
    destination: Option<GeoPoint>,
    boundary: Vec<GeoPoint>,
    nominal: Angle,
    tangents: Option<(Tangent, Tangent)>,
}

impl TaskLegLandoutDistance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.tangents.is_some()
    }

    /// Refresh the cached geometry, returns whether it was recomputed
    pub fn update(&mut self, origin: GeoPoint, destination: GeoPoint, boundary: Vec<GeoPoint>) -> bool {
        if self.origin == Some(origin) && self.destination == Some(destination) && self.boundary == boundary {
            return false;
        }

        self.origin = Some(origin);
        self.destination = Some(destination);
        self.boundary = boundary;
        self.recompute(origin, destination);
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn recompute(&mut self, origin: GeoPoint, destination: GeoPoint) {
        if self.boundary.is_empty() {
            self.tangents = None;
            return;
        }

        self.nominal = origin.bearing(&destination);
        let direct = Tangent::new(&origin, destination);
        let (mut left, mut right) = (direct, direct);
        let (mut min_delta, mut max_delta) = (0.0, 0.0);

        for vertex in &self.boundary {
            let tangent = Tangent::new(&origin, *vertex);
            let delta = (tangent.vector.bearing - self.nominal).as_delta().to_radians();
            if delta > max_delta {
                max_delta = delta;
                right = tangent;
            } else if delta < min_delta {
                min_delta = delta;
                left = tangent;
            }
        }

        debug!(
            left = left.vector.bearing.to_degrees(),
            right = right.vector.bearing.to_degrees(),
            "landout geometry recomputed"
        );
        self.tangents = Some((left, right));
    }

    /// Left and right tangent points of the cone
    pub fn tangent_points(&self) -> Option<(GeoPoint, GeoPoint)> {
        self.tangents.map(|(left, right)| (left.location, right.location))
    }

    /// Scorable distance for a landing at `reference`, 0 without geometry
    ///
    /// Continuous across the sides of the tangent cone. Inside the zone the
    /// value steps where the reference crosses the ring at the tangent
    /// distance: within it the tangent point scores, beyond it the closest
    /// boundary point does.
    pub fn distance(&self, reference: &GeoPoint) -> f64 {
        let (Some(origin), Some((left, right))) = (self.origin, self.tangents) else {
            return 0.0;
        };

        let vector = origin.distance_bearing(reference);
        if vector.distance < f64::EPSILON {
            return 0.0;
        }

        let delta = (vector.bearing - self.nominal).as_delta().to_radians();
        let tangent = if delta > 0.0 { right } else { left };

        let distance = if vector.distance <= tangent.vector.distance {
            let in_cone = (vector.bearing - left.vector.bearing).as_delta().to_radians() >= 0.0
                && (vector.bearing - right.vector.bearing).as_delta().to_radians() <= 0.0;
            if in_cone {
                vector.distance
            } else {
                tangent.vector.distance - tangent.location.distance(reference)
            }
        } else {
            let closest = self.closest_boundary_point(reference);
            origin.distance(&closest) - reference.distance(&closest)
        };

        distance.max(0.0)
    }

    fn closest_boundary_point(&self, reference: &GeoPoint) -> GeoPoint {
        let Some(projection) = self.destination.map(FlatProjection::new) else {
            return *reference;
        };

        let point = projection.project(reference);
        let vertices: Vec<_> = self.boundary.iter().map(|vertex| projection.project(vertex)).collect();
        let count = vertices.len();

        (0..count)
            .map(|i| FlatLine::new(vertices[i], vertices[(i + 1) % count]).closest_point(point))
            .min_by(|a, b| a.distance_squared(point).total_cmp(&b.distance_squared(point)))
            .map(|closest| projection.unproject(closest))
            .unwrap_or(*reference)
    }
}
