use super::{Angle, EARTH_RADIUS};
use serde::{Deserialize, Serialize};

/// A location on the earth's surface
///
/// Both coordinates are angles; longitude positive east, latitude positive
/// north. Distances are great-circle distances on a sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: Angle,
    pub latitude: Angle,
}

impl GeoPoint {
    pub const fn new(longitude: Angle, latitude: Angle) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Create a point from longitude and latitude in degrees
    pub fn degrees(longitude: f64, latitude: f64) -> Self {
        Self::new(Angle::degrees(longitude), Angle::degrees(latitude))
    }

    /// A point that fails [`GeoPoint::is_valid`]
    pub fn invalid() -> Self {
        Self::new(Angle::radians(f64::NAN), Angle::radians(f64::NAN))
    }

    pub fn is_valid(&self) -> bool {
        let lon = self.longitude.to_degrees();
        let lat = self.latitude.to_degrees();
        (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat)
    }

    /// Great-circle distance to `other` (m)
    pub fn distance(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS * a.sqrt().min(1.0).asin()
    }

    /// Initial great-circle bearing towards `other`
    pub fn bearing(&self, other: &GeoPoint) -> Angle {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let y = dlon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
        Angle::radians(y.atan2(x)).as_bearing()
    }

    pub fn distance_bearing(&self, other: &GeoPoint) -> GeoVector {
        GeoVector::new(self.distance(other), self.bearing(other))
    }

    /// Point `distance` metres from here along the great circle towards
    /// `destination`, clamped to `destination`
    pub fn intermediate_point(&self, destination: &GeoPoint, distance: f64) -> GeoPoint {
        let total = self.distance(destination);
        if total <= 0.0 || distance >= total {
            return *destination;
        }
        if distance <= 0.0 {
            return *self;
        }

        GeoVector::new(distance, self.bearing(destination)).end_point(self)
    }

    /// Point halfway to `other`
    pub fn middle(&self, other: &GeoPoint) -> GeoPoint {
        let half = self.distance(other) / 2.0;
        self.intermediate_point(other, half)
    }
}

/// Distance and bearing from some origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoVector {
    pub distance: f64,
    pub bearing: Angle,
}

impl GeoVector {
    pub const fn new(distance: f64, bearing: Angle) -> Self {
        Self { distance, bearing }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, Angle::ZERO)
    }

    /// Destination reached by travelling this vector from `origin`
    pub fn end_point(&self, origin: &GeoPoint) -> GeoPoint {
        if self.distance <= 0.0 {
            return *origin;
        }

        let delta = self.distance / EARTH_RADIUS;
        let lat1 = origin.latitude.to_radians();
        let bearing = self.bearing.to_radians();

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).asin();
        let dlon = (bearing.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

        GeoPoint::new(
            (origin.longitude + Angle::radians(dlon)).as_delta(),
            Angle::radians(lat2),
        )
    }
}
