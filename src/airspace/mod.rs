//! Airspace volumes
//!
//! Only the horizontal geometry lives here; vertical limits are plain
//! altitudes compared by the caller.

mod circle;
mod polygon;

pub use self::circle::AirspaceCircle;
pub use self::polygon::AirspacePolygon;

use crate::geo::{BoundingBox, FlatProjection, GeoPoint};

#[derive(Debug, Clone, PartialEq)]
pub enum AirspaceShape {
    Circle(AirspaceCircle),
    Polygon(AirspacePolygon),
}

/// An airspace volume with vertical limits (m MSL)
#[derive(Debug, Clone, PartialEq)]
pub struct AbstractAirspace {
    pub name: String,
    pub base: f64,
    pub top: f64,
    pub shape: AirspaceShape,
}

impl AbstractAirspace {
    pub fn new(name: impl Into<String>, base: f64, top: f64, shape: AirspaceShape) -> Self {
        Self {
            name: name.into(),
            base,
            top,
            shape,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        match &self.shape {
            AirspaceShape::Circle(circle) => circle.bounds(),
            AirspaceShape::Polygon(polygon) => polygon.bounds(),
        }
    }

    pub fn inside(&self, location: &GeoPoint) -> bool {
        match &self.shape {
            AirspaceShape::Circle(circle) => circle.inside(location),
            AirspaceShape::Polygon(polygon) => polygon.inside(location),
        }
    }

    /// Inside horizontally and between base and top
    pub fn inside_volume(&self, location: &GeoPoint, altitude: f64) -> bool {
        altitude >= self.base && altitude <= self.top && self.inside(location)
    }

    pub fn intersects(&self, start: &GeoPoint, end: &GeoPoint, projection: &FlatProjection) -> Vec<GeoPoint> {
        match &self.shape {
            AirspaceShape::Circle(circle) => circle.intersects(start, end, projection),
            AirspaceShape::Polygon(polygon) => polygon.intersects(start, end, projection),
        }
    }

    pub fn closest_point(&self, location: &GeoPoint) -> GeoPoint {
        match &self.shape {
            AirspaceShape::Circle(circle) => circle.closest_point(location),
            AirspaceShape::Polygon(polygon) => polygon.closest_point(location),
        }
    }
}
