use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// An angle, stored in radians
///
/// Bearings are measured clockwise from true north. Arithmetic does not
/// normalise; use [`Angle::as_bearing`] or [`Angle::as_delta`] to bring a
/// result back into range.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);
    pub const QUARTER_CIRCLE: Angle = Angle(PI / 2.0);
    pub const HALF_CIRCLE: Angle = Angle(PI);
    pub const FULL_CIRCLE: Angle = Angle(TAU);

    pub const fn radians(value: f64) -> Self {
        Self(value)
    }

    pub fn degrees(value: f64) -> Self {
        Self(value.to_radians())
    }

    pub fn to_radians(self) -> f64 {
        self.0
    }

    pub fn to_degrees(self) -> f64 {
        self.0.to_degrees()
    }

    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn half(self) -> Self {
        Self(self.0 / 2.0)
    }

    /// Normalise to `[0°, 360°)`
    pub fn as_bearing(self) -> Self {
        let value = self.0.rem_euclid(TAU);
        // rem_euclid may round tiny negative inputs up to exactly TAU
        if value >= TAU { Self(0.0) } else { Self(value) }
    }

    /// Normalise to `(-180°, 180°]`
    pub fn as_delta(self) -> Self {
        let value = self.as_bearing().0;
        if value > PI { Self(value - TAU) } else { Self(value) }
    }

    /// The opposite bearing
    pub fn reciprocal(self) -> Self {
        (self + Self::HALF_CIRCLE).as_bearing()
    }

    /// Bisector of the angle between two bearings, pointing away from the
    /// smaller of the two arcs.
    ///
    /// Used to orient symmetric sectors: called on the bearing to the
    /// previous point with the bearing to the next point, the result points
    /// to the outside of the turn.
    pub fn half_angle(self, end: Angle) -> Self {
        let a = self.as_bearing().0;
        let b = end.as_bearing().0;
        if a == b {
            return self.reciprocal();
        }

        let middle = Self((a + b) / 2.0);
        if (a - b).abs() < PI {
            middle.reciprocal()
        } else {
            middle.as_bearing()
        }
    }

    /// Whether this bearing lies on the clockwise arc from `start` to `end`
    pub fn between(self, start: Angle, end: Angle) -> bool {
        let width = (end - start).as_bearing();
        let delta = (self - start).as_bearing();
        delta <= width
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        Angle(self.0 * rhs)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;

    fn div(self, rhs: f64) -> Angle {
        Angle(self.0 / rhs)
    }
}
