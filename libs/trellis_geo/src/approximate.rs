use crate::METERS_PER_DEGREE_LAT;
use geo::Point;

/// Approximates distances from a fixed centre using an equirectangular
/// projection.
///
/// Longitudinal distances are scaled by the cosine of the centre's
/// latitude, so the approximation degrades as points move away from
/// the centre. It is intended for comparisons within a few kilometres,
/// where it is considerably cheaper than a great-circle distance.
///
/// ### Example
/// ```rust
/// use trellis_geo::DistanceApproximator;
/// use geo::point;
///
/// let approx = DistanceApproximator::new(point! { x: 0.0, y: 0.0 });
/// let sq = approx.distance_squared(&point! { x: 0.0, y: 0.001 });
/// assert!((sq.sqrt() - 110.567).abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DistanceApproximator {
    center: Point,
    meters_per_lng_degree: f64,
}

impl DistanceApproximator {
    pub fn new(center: Point) -> Self {
        Self {
            center,
            meters_per_lng_degree: Self::meters_per_lng_degree(center.y()),
        }
    }

    /// Metres spanned by one degree of longitude at the given latitude.
    #[inline]
    pub fn meters_per_lng_degree(lat: f64) -> f64 {
        lat.to_radians().cos() * METERS_PER_DEGREE_LAT
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Squared distance (in metres²) from the centre to `point`.
    #[inline]
    pub fn distance_squared(&self, point: &Point) -> f64 {
        let lat = (point.y() - self.center.y()) * METERS_PER_DEGREE_LAT;
        let lng = (point.x() - self.center.x()) * self.meters_per_lng_degree;

        lat * lat + lng * lng
    }

    #[inline]
    pub fn distance(&self, point: &Point) -> f64 {
        self.distance_squared(point).sqrt()
    }
}
