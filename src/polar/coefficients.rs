use serde::{Deserialize, Serialize};

/// Quadratic drag polar `sink = a·V² + b·V + c`
///
/// Speeds are in m/s, sink rates positive downwards in m/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl PolarCoefficients {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub const fn invalid() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Whether the parabola opens upwards with its minimum at a positive speed
    pub fn is_valid(&self) -> bool {
        self.a > 0.0 && self.b < 0.0 && self.c > 0.0
    }

    /// Fit a polar through three speed/vario pairs
    ///
    /// `w1..w3` are vertical speeds as printed in polar tables, i.e. negative
    /// when sinking. Returns invalid coefficients if the points are degenerate.
    pub fn from_vw3(v1: f64, v2: f64, v3: f64, w1: f64, w2: f64, w3: f64) -> Self {
        let d = v1 * v1 * (v2 - v3) + v2 * v2 * (v3 - v1) + v3 * v3 * (v1 - v2);
        if d == 0.0 || v2 == v3 {
            return Self::invalid();
        }

        let a = -((v2 - v3) * (w1 - w3) + (v3 - v1) * (w2 - w3)) / d;
        let b = -(w2 - w3 + a * (v2 * v2 - v3 * v3)) / (v2 - v3);
        let c = -(w3 + a * v3 * v3 + b * v3);
        Self::new(a, b, c)
    }

    /// Fit a polar whose minimum sink is at `v1` and which passes through `v2`
    ///
    /// Vertical speeds are negative when sinking, as for [`from_vw3`](Self::from_vw3).
    pub fn from_vw2(v1: f64, v2: f64, w1: f64, w2: f64) -> Self {
        if v1 == v2 {
            return Self::invalid();
        }

        let a = (w1 - w2) / ((v2 - v1) * (v2 - v1));
        let b = -2.0 * a * v1;
        let c = -w1 + a * v1 * v1;
        Self::new(a, b, c)
    }

    pub fn sink_rate(&self, v: f64) -> f64 {
        (self.a * v + self.b) * v + self.c
    }
}

/// Aircraft polar as published: three measured points plus mass data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarInfo {
    /// Mass at which the polar points were measured (kg)
    pub reference_mass: f64,
    /// Maximum water ballast (l)
    pub max_ballast: f64,
    /// Speeds (m/s)
    pub v1: f64,
    pub v2: f64,
    pub v3: f64,
    /// Vertical speeds at `v1..v3` (m/s, negative when sinking)
    pub w1: f64,
    pub w2: f64,
    pub w3: f64,
    /// Wing area (m²), zero when unknown
    pub wing_area: f64,
}

impl PolarInfo {
    pub fn coefficients(&self) -> PolarCoefficients {
        PolarCoefficients::from_vw3(self.v1, self.v2, self.v3, self.w1, self.w2, self.w3)
    }

    pub fn is_valid(&self) -> bool {
        self.reference_mass > 0.0 && self.coefficients().is_valid()
    }
}

impl Default for PolarInfo {
    /// Points sampled from the default [`GlidePolar`](super::GlidePolar) coefficients
    fn default() -> Self {
        Self {
            reference_mass: 300.0,
            max_ballast: 90.0,
            v1: 20.0,
            v2: 30.0,
            v3: 40.0,
            w1: -0.64,
            w2: -0.691,
            w3: -1.056,
            wing_area: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::assert_lt;

    #[test]
    fn test_from_vw3_recovers_parabola() {
        let expected = PolarCoefficients::new(0.00157, -0.0734, 1.48);
        let coefficients = PolarInfo::default().coefficients();

        assert_lt!((coefficients.a - expected.a).abs(), 1e-9);
        assert_lt!((coefficients.b - expected.b).abs(), 1e-9);
        assert_lt!((coefficients.c - expected.c).abs(), 1e-9);
        assert!(coefficients.is_valid());
    }

    #[test]
    fn test_from_vw3_degenerate() {
        let coefficients = PolarCoefficients::from_vw3(20.0, 20.0, 20.0, -0.6, -0.6, -0.6);
        assert!(!coefficients.is_valid());
    }

    #[test]
    fn test_from_vw2_minimum_at_first_point() {
        let coefficients = PolarCoefficients::from_vw2(22.0, 40.0, -0.6, -1.2);
        assert!(coefficients.is_valid());

        let v_min = -coefficients.b / (2.0 * coefficients.a);
        assert_lt!((v_min - 22.0).abs(), 1e-9);
        assert_lt!((coefficients.sink_rate(22.0) - 0.6).abs(), 1e-9);
        assert_lt!((coefficients.sink_rate(40.0) - 1.2).abs(), 1e-9);
    }
}
