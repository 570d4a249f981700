use super::{Angle, GeoPoint};

/// Bounding box for geographic areas
///
/// Represents a rectangular geographic area defined by longitude and latitude bounds.
///
/// # Limitations
///
/// **Anti-meridian handling**: simple min/max logic is used, so a task or
/// airspace crossing the ±180° longitude line gets a box spanning nearly the
/// entire globe instead of the actual smaller region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub west: Angle,
    pub north: Angle,
    pub east: Angle,
    pub south: Angle,
}

impl BoundingBox {
    /// Create a bounding box from a slice of points
    ///
    /// Returns `None` if the slice is empty.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let mut bbox = Self::from(*first);
        for &point in rest {
            bbox.extend(point);
        }
        Some(bbox)
    }

    /// Extend bounding box to include a point
    ///
    /// Grows the bounding box if necessary to encompass the given point.
    /// If the point is already inside the bbox, no change is made.
    pub fn extend(&mut self, point: GeoPoint) {
        self.west = min(self.west, point.longitude);
        self.east = max(self.east, point.longitude);
        self.north = max(self.north, point.latitude);
        self.south = min(self.south, point.latitude);
    }

    /// Merge another bounding box into this one
    pub fn merge(&mut self, other: BoundingBox) {
        self.west = min(self.west, other.west);
        self.east = max(self.east, other.east);
        self.north = max(self.north, other.north);
        self.south = min(self.south, other.south);
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.longitude >= self.west
            && point.longitude <= self.east
            && point.latitude >= self.south
            && point.latitude <= self.north
    }

    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.west <= other.east
            && other.west <= self.east
            && self.south <= other.north
            && other.south <= self.north
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new((self.west + self.east).half(), (self.north + self.south).half())
    }
}

impl From<GeoPoint> for BoundingBox {
    fn from(point: GeoPoint) -> Self {
        Self {
            west: point.longitude,
            north: point.latitude,
            east: point.longitude,
            south: point.latitude,
        }
    }
}

fn min(a: Angle, b: Angle) -> Angle {
    if b < a { b } else { a }
}

fn max(a: Angle, b: Angle) -> Angle {
    if b > a { b } else { a }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::assert_none;

    fn bbox(west: f64, north: f64, east: f64, south: f64) -> BoundingBox {
        BoundingBox {
            west: Angle::radians(west),
            north: Angle::radians(north),
            east: Angle::radians(east),
            south: Angle::radians(south),
        }
    }

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(Angle::radians(lon), Angle::radians(lat))
    }

    #[test]
    fn test_from_point() {
        let bbox = BoundingBox::from(point(0.852_941_4, 0.041_037_06));

        assert_eq!(bbox.west.to_radians(), 0.041_037_06);
        assert_eq!(bbox.north.to_radians(), 0.852_941_4);
        assert_eq!(bbox.east.to_radians(), 0.041_037_06);
        assert_eq!(bbox.south.to_radians(), 0.852_941_4);
    }

    #[test]
    fn test_from_points_empty() {
        assert_none!(BoundingBox::from_points(&[]));
    }

    #[test]
    fn test_from_points_multiple() {
        let points = vec![
            point(0.5, 0.5), // Center (lat, lon)
            point(0.8, 0.2), // North + West
            point(0.2, 0.9), // South + East
            point(0.9, 0.1), // North + West
        ];
        let bbox = BoundingBox::from_points(&points).unwrap();

        assert_eq!(bbox, self::bbox(0.1, 0.9, 0.9, 0.2));
    }

    #[test]
    fn test_extend_multiple_directions() {
        let mut bbox = BoundingBox::from(point(0.5, 0.5));

        bbox.extend(point(0.8, 0.8)); // NE
        bbox.extend(point(0.2, 0.2)); // SW
        bbox.extend(point(0.9, 0.1)); // NW

        assert_eq!(bbox, self::bbox(0.1, 0.9, 0.8, 0.2));
    }

    #[test]
    fn test_extend_with_point_inside_bbox() {
        let mut bbox = bbox(0.0, 1.0, 1.0, 0.0);
        bbox.extend(point(0.5, 0.5));
        assert_eq!(bbox, self::bbox(0.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn test_merge_non_overlapping() {
        let mut bbox1 = bbox(0.0, 0.5, 0.5, 0.0);
        bbox1.merge(bbox(0.6, 1.0, 1.0, 0.6));
        assert_eq!(bbox1, bbox(0.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn test_merge_contained() {
        let mut bbox1 = bbox(0.0, 1.0, 1.0, 0.0);
        bbox1.merge(bbox(0.2, 0.8, 0.8, 0.2));
        assert_eq!(bbox1, bbox(0.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn test_contains() {
        let bbox = bbox(0.0, 1.0, 1.0, 0.0);
        assert!(bbox.contains(&point(0.5, 0.5)));
        assert!(bbox.contains(&point(1.0, 0.0)));
        assert!(!bbox.contains(&point(1.1, 0.5)));
    }

    #[test]
    fn test_overlaps() {
        let a = bbox(0.0, 0.6, 0.6, 0.0);
        assert!(a.overlaps(&bbox(0.4, 1.0, 1.0, 0.4)));
        assert!(!a.overlaps(&bbox(0.7, 1.0, 1.0, 0.7)));
    }

    #[test]
    fn test_center() {
        let center = bbox(0.0, 1.0, 0.5, 0.0).center();
        assert_eq!(center, point(0.5, 0.25));
    }
}
