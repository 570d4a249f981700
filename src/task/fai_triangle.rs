//! FAI triangle leg proportions

use crate::geo::GeoPoint;

/// Shortest leg of any FAI triangle (m)
pub const MIN_FAI_LEG: f64 = 2_000.0;

/// Triangles at least this long use the large-triangle proportions (m)
pub const LARGE_TRIANGLE_DISTANCE: f64 = 750_000.0;

const SMALL_MIN_LEG_RATIO: f64 = 0.28;
const LARGE_MIN_LEG_RATIO: f64 = 0.25;
const LARGE_MAX_LEG_RATIO: f64 = 0.45;

/// Whether three leg lengths form a valid FAI triangle
pub fn test_distances(d1: f64, d2: f64, d3: f64) -> bool {
    let legs = [d1, d2, d3];
    if legs.iter().any(|&leg| leg < MIN_FAI_LEG) {
        return false;
    }

    let total = d1 + d2 + d3;
    if total < LARGE_TRIANGLE_DISTANCE {
        legs.iter().all(|&leg| leg >= SMALL_MIN_LEG_RATIO * total)
    } else {
        legs.iter()
            .all(|&leg| leg >= LARGE_MIN_LEG_RATIO * total && leg <= LARGE_MAX_LEG_RATIO * total)
    }
}

/// Whether the triangle `a`-`b`-`c`-`a` satisfies the FAI proportions
pub fn test_points(a: &GeoPoint, b: &GeoPoint, c: &GeoPoint) -> bool {
    test_distances(a.distance(b), b.distance(c), c.distance(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equilateral() {
        assert!(test_distances(100_000.0, 100_000.0, 100_000.0));
        assert!(test_distances(300_000.0, 300_000.0, 300_000.0));
    }

    #[test]
    fn test_short_leg() {
        assert!(!test_distances(1_500.0, 1_500.0, 1_500.0));
        assert!(!test_distances(100_000.0, 100_000.0, 50_000.0));
    }

    #[test]
    fn test_large_triangle_proportions() {
        // 26 % is too short below 750 km but fine above
        assert!(!test_distances(26_000.0, 37_000.0, 37_000.0));
        assert!(test_distances(260_000.0, 370_000.0, 370_000.0));

        // longest leg above 45 %
        assert!(!test_distances(250_000.0, 250_000.0, 460_000.0));
    }

    #[test]
    fn test_from_points() {
        let a = GeoPoint::degrees(7.0, 51.0);
        let b = GeoPoint::degrees(7.5, 51.0);
        let c = GeoPoint::degrees(7.25, 51.3);
        assert!(test_points(&a, &b, &c));

        let flat = GeoPoint::degrees(7.25, 51.01);
        assert!(!test_points(&a, &b, &flat));
    }
}
