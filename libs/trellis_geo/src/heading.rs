use geo::{Bearing, Haversine, Point};

/// Great-circle heading from `from` to `to`, in degrees within `[0, 360)`.
#[inline]
pub fn heading(from: &Point, to: &Point) -> f64 {
    Haversine.bearing(*from, *to).rem_euclid(360.0)
}

/// Converts a floating heading into whole degrees within `[0, 359]`.
///
/// ### Note
/// The clamp is performed before the cast, so that values rounding
/// up to `360.0` (or non-finite values) cannot escape the range.
#[inline]
pub fn clamp_heading(heading: f64) -> u16 {
    if heading.is_nan() {
        return 0;
    }

    heading.min(359.0).max(0.0) as u16
}

/// The smaller angle between two headings, in `[0, 180]`.
///
/// ```rust
/// use trellis_geo::turn_degree180;
///
/// assert_eq!(turn_degree180(10, 350), 20);
/// assert_eq!(turn_degree180(90, 270), 180);
/// ```
#[inline]
pub fn turn_degree180(lhs: u16, rhs: u16) -> u16 {
    let degree = lhs.abs_diff(rhs) % 360;
    if degree > 180 { 360 - degree } else { degree }
}
