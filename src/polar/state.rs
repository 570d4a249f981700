use crate::geo::{Angle, GeoPoint, GeoVector};

/// A horizontal velocity
///
/// For wind, `bearing` is the direction the wind blows from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpeedVector {
    pub bearing: Angle,
    /// Magnitude (m/s)
    pub norm: f64,
}

impl SpeedVector {
    pub const fn new(bearing: Angle, norm: f64) -> Self {
        Self { bearing, norm }
    }

    pub const fn zero() -> Self {
        Self::new(Angle::ZERO, 0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.norm <= 0.0
    }

    /// Component of this wind opposing travel along `track` (m/s)
    pub fn head_wind(&self, track: Angle) -> f64 {
        -self.norm * (self.bearing.reciprocal() - track).cos()
    }
}

/// Snapshot of the aircraft supplied by the telemetry layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AircraftState {
    pub location: GeoPoint,
    /// Altitude above MSL (m)
    pub altitude: f64,
    pub track: Angle,
    pub ground_speed: f64,
    pub true_airspeed: f64,
    pub indicated_airspeed: f64,
    /// Total energy vario (m/s)
    pub vario: f64,
    /// Air mass vertical speed (m/s)
    pub netto_vario: f64,
    /// Load factor, 1.0 in straight flight
    pub g_load: f64,
    pub wind: SpeedVector,
}

impl AircraftState {
    pub fn new(location: GeoPoint, altitude: f64) -> Self {
        Self {
            location,
            altitude,
            track: Angle::ZERO,
            ground_speed: 0.0,
            true_airspeed: 0.0,
            indicated_airspeed: 0.0,
            vario: 0.0,
            netto_vario: 0.0,
            g_load: 1.0,
            wind: SpeedVector::zero(),
        }
    }
}

/// Geometry of a single glide: where to, how much height, what wind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlideState {
    pub vector: GeoVector,
    /// Height available above the minimum arrival altitude (m)
    pub altitude_difference: f64,
    pub wind: SpeedVector,
    /// Head wind component along `vector` (m/s)
    pub head_wind: f64,
}

impl GlideState {
    pub fn new(vector: GeoVector, min_arrival_altitude: f64, altitude: f64, wind: SpeedVector) -> Self {
        Self {
            vector,
            altitude_difference: altitude - min_arrival_altitude,
            wind,
            head_wind: wind.head_wind(vector.bearing),
        }
    }

    /// Glide from the aircraft's position to `destination`
    pub fn from_aircraft(state: &AircraftState, destination: &GeoPoint, min_arrival_altitude: f64) -> Self {
        let vector = state.location.distance_bearing(destination);
        Self::new(vector, min_arrival_altitude, state.altitude, state.wind)
    }
}
