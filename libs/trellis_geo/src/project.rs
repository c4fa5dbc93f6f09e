//! Projection of a point onto a polyline

use crate::DistanceApproximator;
use geo::{Coord, Distance, Haversine, LineString, Point};

/// The result of projecting a point onto a polyline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// The closest position upon the polyline.
    pub point: Point,
    /// Squared distance (metres²) between the projected point and the query.
    pub sq_distance: f64,
    /// Index of the segment (`shape[segment]..shape[segment + 1]`) the point lies on.
    pub segment: usize,
    /// Fraction of the total polyline length at which the point lies, in `[0, 1]`.
    pub offset: f64,
}

/// Projects `point` onto the segment `u -> v`, treating longitude as scaled
/// by `lng_scale` so that the result is the closest point in metric terms.
fn project_segment(point: &Point, u: Coord, v: Coord, lng_scale: f64) -> Point {
    let dx = (v.x - u.x) * lng_scale;
    let dy = v.y - u.y;

    let sq_length = dx * dx + dy * dy;
    if sq_length <= 0.0 {
        return Point(u);
    }

    let px = (point.x() - u.x) * lng_scale;
    let py = point.y() - u.y;

    let scale = (px * dx + py * dy) / sq_length;
    if scale <= 0.0 {
        Point(u)
    } else if scale >= 1.0 {
        Point(v)
    } else {
        Point::new(u.x + (v.x - u.x) * scale, u.y + (v.y - u.y) * scale)
    }
}

/// Projects a point onto the closest position upon `shape`.
///
/// Returns `None` when the shape is empty. A single-point shape projects
/// onto that point with an offset of zero.
///
/// ### Note
/// The offset is exactly `0.0` when the projection lands on the first vertex
/// and exactly `1.0` when it lands on the last one. Callers rely on this to
/// recognise projections onto nodes.
///
/// ```text
///        point
///          |
///   o------x----------o-------o
///   0     0.2                 1
/// ```
pub fn project(
    point: &Point,
    shape: &LineString,
    approximator: &DistanceApproximator,
) -> Option<Projection> {
    let first = *shape.0.first()?;
    let last = *shape.0.last()?;

    let lng_scale = point.y().to_radians().cos();

    let mut closest = Projection {
        point: Point(first),
        sq_distance: approximator.distance_squared(&Point(first)),
        segment: 0,
        offset: 0.0,
    };

    let mut closest_partial_length = 0.0;
    let mut total_length = 0.0;

    for (segment, line) in shape.lines().enumerate() {
        let projected = project_segment(point, line.start, line.end, lng_scale);
        let sq_distance = approximator.distance_squared(&projected);

        if sq_distance < closest.sq_distance {
            closest.point = projected;
            closest.sq_distance = sq_distance;
            closest.segment = segment;
            closest_partial_length = total_length + Haversine.distance(Point(line.start), projected);
        }

        total_length += Haversine.distance(Point(line.start), Point(line.end));
    }

    closest.offset = if total_length <= 0.0 || closest_partial_length <= 0.0 {
        0.0
    } else if closest.point.0 == last {
        1.0
    } else {
        (closest_partial_length / total_length).clamp(0.0, 1.0)
    };

    Some(closest)
}
