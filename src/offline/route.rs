use crate::Error;
use crate::matching::{EdgeSegment, MapMatching};
use crate::network::RoadNetwork;
use crate::offline::MatchResult;
use itertools::Itertools;
use log::warn;
use wkt::ToWkt;

/// Joins the routes between the decoded states of `results` into a
/// single sequence of edge segments, in the order travelled.
///
/// Consecutive segments of the same edge are merged. A route which does
/// not continue from the previous one is appended regardless.
pub fn construct_route<N: RoadNetwork>(
    mm: &MapMatching<N>,
    results: &[MatchResult],
) -> Result<Vec<EdgeSegment>, Error> {
    let mut route: Vec<EdgeSegment> = vec![];

    let states = results.iter().filter_map(|result| result.state).dedup();

    for (left, right) in states.tuple_windows() {
        for segment in mm.route_segments(left, right)? {
            if let Some(last) = route.last_mut() {
                if last.merge(&segment) {
                    continue;
                }

                if !last.adjoined(mm.network(), &segment) {
                    warn!(
                        "Discontinuity between {} and {}",
                        last.shape(mm.network()).wkt_string(),
                        segment.shape(mm.network()).wkt_string()
                    );
                }
            }

            route.push(segment);
        }
    }

    Ok(route)
}
