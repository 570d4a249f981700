use crate::geo::{Angle, FlatLine, FlatProjection, GeoPoint, GeoVector};
use glam::DVec2;

/// Vertices used to approximate a full circle
pub const CIRCLE_SEGMENTS: usize = 20;

/// Points along a straight boundary such as a start line
pub const LINE_POINTS: usize = 21;

const ARC_STEP_DEGREES: f64 = 360.0 / CIRCLE_SEGMENTS as f64;

/// Whether a pair of radials describes a full circle
pub(crate) fn is_full_circle(start: Angle, end: Angle) -> bool {
    (end - start).as_bearing().to_radians() < 1e-9
}

/// Whether `bearing` lies within the clockwise sector from `start` to `end`
pub(crate) fn within_radials(bearing: Angle, start: Angle, end: Angle) -> bool {
    is_full_circle(start, end) || bearing.between(start, end)
}

pub(crate) fn circle(center: &GeoPoint, radius: f64) -> Vec<GeoPoint> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let bearing = Angle::FULL_CIRCLE * (i as f64 / CIRCLE_SEGMENTS as f64);
            GeoVector::new(radius, bearing).end_point(center)
        })
        .collect()
}

/// Arc from `start` clockwise by `width`, both ends included
pub(crate) fn arc(center: &GeoPoint, radius: f64, start: Angle, width: Angle) -> Vec<GeoPoint> {
    let segments = ((width.to_degrees() / ARC_STEP_DEGREES).ceil() as usize).max(1);
    (0..=segments)
        .map(|i| {
            let bearing = start + width * (i as f64 / segments as f64);
            GeoVector::new(radius, bearing.as_bearing()).end_point(center)
        })
        .collect()
}

/// Entry and exit points of the segment `start`-`end` across a boundary
/// polygon, ordered from `start`
///
/// `closed` joins the last vertex back to the first.
pub(crate) fn polygon_intersections(
    boundary: &[GeoPoint],
    closed: bool,
    start: &GeoPoint,
    end: &GeoPoint,
    projection: &FlatProjection,
) -> Vec<GeoPoint> {
    let line = FlatLine::new(projection.project(start), projection.project(end));
    if line.length() < f64::EPSILON || boundary.len() < 2 {
        return Vec::new();
    }

    let vertices: Vec<DVec2> = boundary.iter().map(|p| projection.project(p)).collect();
    let mut edges: Vec<FlatLine> = vertices
        .windows(2)
        .map(|pair| FlatLine::new(pair[0], pair[1]))
        .collect();
    if closed {
        if let (Some(&last), Some(&first)) = (vertices.last(), vertices.first()) {
            edges.push(FlatLine::new(last, first));
        }
    }

    let mut parameters: Vec<f64> = edges
        .iter()
        .filter_map(|edge| line.intersect_parameter(edge))
        .collect();
    parameters.sort_by(f64::total_cmp);

    let mut points = Vec::with_capacity(2);
    if let Some(&first) = parameters.first() {
        points.push(projection.unproject(line.point_at(first)));
    }
    if let Some(&last) = parameters.last() {
        if parameters.len() > 1 && (last - parameters[0]) * line.length() > 1e-3 {
            points.push(projection.unproject(line.point_at(last)));
        }
    }
    points
}

/// Distance from `center` to the outermost inside point along `bearing`
///
/// Samples inwards from `max_radius` and refines the last transition by
/// bisection, so zones with holes still report their outer edge.
pub(crate) fn ray_cast<F>(center: &GeoPoint, bearing: Angle, max_radius: f64, inside: F) -> f64
where
    F: Fn(&GeoPoint) -> bool,
{
    const SAMPLES: usize = 64;
    const ITERATIONS: usize = 32;

    if max_radius <= 0.0 {
        return 0.0;
    }

    let at = |distance: f64| GeoVector::new(distance, bearing).end_point(center);
    let step = max_radius / SAMPLES as f64;

    for i in (1..=SAMPLES).rev() {
        let distance = step * i as f64;
        if !inside(&at(distance)) {
            continue;
        }
        if i == SAMPLES {
            return max_radius;
        }

        let (mut low, mut high) = (distance, distance + step);
        for _ in 0..ITERATIONS {
            let middle = (low + high) / 2.0;
            if inside(&at(middle)) {
                low = middle;
            } else {
                high = middle;
            }
        }
        return low;
    }
    0.0
}
