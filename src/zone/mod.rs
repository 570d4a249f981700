//! Observation zones
//!
//! The closed set of regions that can surround a task point. Every shape
//! answers the same questions: is a location inside, where does a leg
//! cross the boundary, and what polygon approximates the boundary.

mod boundary;
mod cylinder;
mod sector;
mod symmetric;

pub use self::boundary::{CIRCLE_SEGMENTS, LINE_POINTS};
pub use self::cylinder::{CylinderZone, MAT_CYLINDER_RADIUS};
pub use self::sector::{AnnularSectorZone, SectorZone};
pub use self::symmetric::{
    FAI_SECTOR_END_RADIUS, FAI_SECTOR_TURNPOINT_RADIUS, KEYHOLE_INNER_RADIUS, SymmetricKind,
    SymmetricSectorZone,
};

use crate::geo::{Angle, FlatProjection, GeoPoint, GeoVector};

/// Shape tag of an [`ObservationZone`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneShape {
    Cylinder,
    MatCylinder,
    Sector,
    AnnularSector,
    FaiSector,
    Line,
    Keyhole,
    BgaFixedCourse,
    BgaEnhancedOption,
    BgaStart,
    SymmetricQuadrant,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObservationZone {
    Cylinder(CylinderZone),
    /// Cylinder with the fixed MAT radius
    MatCylinder(CylinderZone),
    Sector(SectorZone),
    AnnularSector(AnnularSectorZone),
    Symmetric(SymmetricSectorZone),
}

impl ObservationZone {
    pub fn cylinder(location: GeoPoint, radius: f64) -> Self {
        Self::Cylinder(CylinderZone::new(location, radius))
    }

    pub fn mat_cylinder(location: GeoPoint) -> Self {
        Self::MatCylinder(CylinderZone::new(location, MAT_CYLINDER_RADIUS))
    }

    /// Full-circle sector, the default AAT segment
    pub fn sector(location: GeoPoint, radius: f64) -> Self {
        Self::Sector(SectorZone::new(location, radius))
    }

    pub fn annular_sector(location: GeoPoint, radius: f64) -> Self {
        Self::AnnularSector(AnnularSectorZone::new(location, radius))
    }

    pub fn fai_sector(location: GeoPoint, is_turnpoint: bool) -> Self {
        Self::Symmetric(SymmetricSectorZone::fai_sector(location, is_turnpoint))
    }

    pub fn line(location: GeoPoint, length: f64) -> Self {
        Self::Symmetric(SymmetricSectorZone::line(location, length))
    }

    pub fn keyhole(location: GeoPoint) -> Self {
        Self::Symmetric(SymmetricSectorZone::keyhole(location))
    }

    pub fn bga_fixed_course(location: GeoPoint) -> Self {
        Self::Symmetric(SymmetricSectorZone::bga_fixed_course(location))
    }

    pub fn bga_enhanced_option(location: GeoPoint) -> Self {
        Self::Symmetric(SymmetricSectorZone::bga_enhanced_option(location))
    }

    pub fn bga_start(location: GeoPoint) -> Self {
        Self::Symmetric(SymmetricSectorZone::bga_start(location))
    }

    pub fn symmetric_quadrant(location: GeoPoint, radius: f64) -> Self {
        Self::Symmetric(SymmetricSectorZone::symmetric_quadrant(location, radius))
    }

    pub fn shape(&self) -> ZoneShape {
        match self {
            Self::Cylinder(_) => ZoneShape::Cylinder,
            Self::MatCylinder(_) => ZoneShape::MatCylinder,
            Self::Sector(_) => ZoneShape::Sector,
            Self::AnnularSector(_) => ZoneShape::AnnularSector,
            Self::Symmetric(zone) => match zone.kind() {
                SymmetricKind::FaiSector => ZoneShape::FaiSector,
                SymmetricKind::Line => ZoneShape::Line,
                SymmetricKind::Keyhole => ZoneShape::Keyhole,
                SymmetricKind::BgaFixedCourse => ZoneShape::BgaFixedCourse,
                SymmetricKind::BgaEnhancedOption => ZoneShape::BgaEnhancedOption,
                SymmetricKind::BgaStart => ZoneShape::BgaStart,
                SymmetricKind::SymmetricQuadrant => ZoneShape::SymmetricQuadrant,
            },
        }
    }

    /// The waypoint the zone is built around
    pub fn location(&self) -> GeoPoint {
        match self {
            Self::Cylinder(zone) | Self::MatCylinder(zone) => zone.location(),
            Self::Sector(zone) => zone.location(),
            Self::AnnularSector(zone) => zone.location(),
            Self::Symmetric(zone) => zone.location(),
        }
    }

    /// Outer radius
    pub fn radius(&self) -> f64 {
        match self {
            Self::Cylinder(zone) | Self::MatCylinder(zone) => zone.radius(),
            Self::Sector(zone) => zone.radius(),
            Self::AnnularSector(zone) => zone.radius(),
            Self::Symmetric(zone) => zone.radius(),
        }
    }

    /// The adjustable dimension carried over when a point changes type:
    /// radius, or length for lines. `None` for shapes of fixed size.
    pub fn size(&self) -> Option<f64> {
        match self {
            Self::Cylinder(zone) | Self::MatCylinder(zone) => Some(zone.radius()),
            Self::Sector(zone) => Some(zone.radius()),
            Self::AnnularSector(zone) => Some(zone.radius()),
            Self::Symmetric(zone) => match zone.kind() {
                SymmetricKind::Line => Some(zone.length()),
                SymmetricKind::SymmetricQuadrant => Some(zone.radius()),
                _ => None,
            },
        }
    }

    /// Change the adjustable dimension; fixed shapes ignore this
    pub fn set_size(&mut self, size: f64) {
        match self {
            Self::Cylinder(zone) => zone.set_radius(size),
            Self::MatCylinder(_) => {}
            Self::Sector(zone) => zone.set_radius(size),
            Self::AnnularSector(zone) => zone.set_radius(size),
            Self::Symmetric(zone) => match zone.kind() {
                SymmetricKind::Line => zone.set_radius(size / 2.0),
                _ => zone.set_radius(size),
            },
        }
    }

    /// Distance subtracted from a leg when scoring, for zones that count as
    /// achieved at their edge
    pub fn score_adjustment(&self) -> f64 {
        match self {
            Self::Cylinder(zone) | Self::MatCylinder(zone) => zone.radius(),
            _ => 0.0,
        }
    }

    /// Whether the zone leaves room for a movable target
    pub fn is_area(&self) -> bool {
        matches!(
            self,
            Self::Cylinder(_) | Self::MatCylinder(_) | Self::Sector(_) | Self::AnnularSector(_)
        )
    }

    pub fn inside(&self, location: &GeoPoint) -> bool {
        match self {
            Self::Cylinder(zone) | Self::MatCylinder(zone) => zone.inside(location),
            Self::Sector(zone) => zone.inside(location),
            Self::AnnularSector(zone) => zone.inside(location),
            Self::Symmetric(zone) => zone.inside(location),
        }
    }

    /// Boundary crossings of the segment `start`-`end`, ordered from `start`
    ///
    /// Zero-length segments and zones without extent have no crossings.
    pub fn intersects(&self, start: &GeoPoint, end: &GeoPoint, projection: &FlatProjection) -> Vec<GeoPoint> {
        match self {
            Self::Cylinder(zone) | Self::MatCylinder(zone) => zone.intersects(start, end, projection),
            Self::Sector(zone) => zone.intersects(start, end, projection),
            Self::AnnularSector(zone) => zone.intersects(start, end, projection),
            Self::Symmetric(zone) => zone.intersects(start, end, projection),
        }
    }

    /// Polygon approximating the zone outline
    pub fn boundary(&self) -> Vec<GeoPoint> {
        match self {
            Self::Cylinder(zone) | Self::MatCylinder(zone) => zone.boundary(),
            Self::Sector(zone) => zone.boundary(),
            Self::AnnularSector(zone) => zone.boundary(),
            Self::Symmetric(zone) => zone.boundary(),
        }
    }

    /// Re-orient leg-dependent shapes from the neighbouring task points
    pub fn set_legs(&mut self, previous: Option<&GeoPoint>, next: Option<&GeoPoint>) {
        if let Self::Symmetric(zone) = self {
            zone.set_legs(previous, next);
        }
    }

    /// Distance from the waypoint to the outer edge along `bearing`
    pub fn edge_distance(&self, bearing: Angle) -> f64 {
        match self {
            Self::Cylinder(zone) | Self::MatCylinder(zone) => zone.radius().max(0.0),
            Self::Sector(zone) => {
                let location = zone.location();
                boundary::ray_cast(&location, bearing, zone.radius(), |p| zone.inside(p))
            }
            Self::AnnularSector(zone) => {
                let location = zone.location();
                boundary::ray_cast(&location, bearing, zone.radius(), |p| zone.inside(p))
            }
            Self::Symmetric(zone) => {
                let location = zone.location();
                boundary::ray_cast(&location, bearing, zone.radius(), |p| zone.inside(p))
            }
        }
    }

    /// Point `fraction` of the way from the waypoint to the edge along `bearing`
    pub fn point_towards_edge(&self, bearing: Angle, fraction: f64) -> GeoPoint {
        let distance = self.edge_distance(bearing) * fraction;
        GeoVector::new(distance, bearing).end_point(&self.location())
    }
}
