use crate::{DistanceApproximator, METERS_PER_DEGREE_LAT};
use geo::{Point, Rect, coord};

/// Creates the bounding box extending `meters` from `center` in every
/// cardinal direction.
pub fn expand_meters(center: &Point, meters: f64) -> Rect {
    let meters = meters.max(0.0);

    let dlat = meters / METERS_PER_DEGREE_LAT;
    let dlng = meters / DistanceApproximator::meters_per_lng_degree(center.y());

    Rect::new(
        coord! { x: center.x() - dlng, y: center.y() - dlat },
        coord! { x: center.x() + dlng, y: center.y() + dlat },
    )
}
