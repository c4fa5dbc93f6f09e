use geo::Point;

/// A single position of a GPS trace.
///
/// The accuracy and search radius describe the measurement only. Offline
/// matching queries every measurement of a trace with the radius of its
/// session, see [`crate::config::MatchOptions::sq_search_radius`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    lnglat: Point,
    gps_accuracy: f64,
    search_radius: f64,
}

impl Measurement {
    pub fn new(lnglat: Point, gps_accuracy: f64, search_radius: f64) -> Self {
        Self {
            lnglat,
            gps_accuracy,
            search_radius,
        }
    }

    #[inline]
    pub fn lnglat(&self) -> Point {
        self.lnglat
    }

    /// Accuracy of the position, in metres.
    #[inline]
    pub fn gps_accuracy(&self) -> f64 {
        self.gps_accuracy
    }

    /// Radius around the position (metres) in which to search for candidates.
    #[inline]
    pub fn search_radius(&self) -> f64 {
        self.search_radius
    }
}
