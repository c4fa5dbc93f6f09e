use crate::Error;
use crate::candidate::CandidateQuery;
use crate::matching::{MapMatching, Measurement, StateId, Time};
use crate::network::{DirectedEdge, RoadNetwork};
use crate::offline::{MatchResult, collect_graphset, guess_source, guess_target, interpolate};
use geo::{Distance, Haversine};
use log::{debug, info};
use measure_time::debug_time;
use rustc_hash::FxHashMap;

/// Matches every measurement of a trace onto the network.
///
/// Measurements within `interpolation_distance` (metres) of the previously
/// kept measurement are not decoded, but interpolated onto the route
/// travelled between the decoded measurements either side of them.
/// The first and last measurements are always decoded.
///
/// Returns exactly one result per measurement, in the order given.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = "info"))]
pub fn offline_match<N: RoadNetwork, Q: CandidateQuery>(
    mm: &mut MapMatching<N>,
    query: &mut Q,
    measurements: &[Measurement],
    sq_search_radius: f64,
    interpolation_distance: f64,
) -> Result<Vec<MatchResult>, Error> {
    mm.clear();

    let Some(last) = measurements.len().checked_sub(1) else {
        return Ok(vec![]);
    };

    // The measurement index of each time, and the skipped indices following it
    let mut kept: Vec<usize> = Vec::with_capacity(measurements.len());
    let mut proximate: FxHashMap<Time, Vec<usize>> = FxHashMap::default();

    {
        debug_time!("offline_match: load states");

        for (index, measurement) in measurements.iter().enumerate() {
            let previous = kept.last().map(|&prev| &measurements[prev]);

            let skip = index != last
                && previous.is_some_and(|previous| {
                    Haversine.distance(previous.lnglat(), measurement.lnglat()) < interpolation_distance
                });

            if skip {
                proximate.entry(kept.len() - 1).or_default().push(index);
                continue;
            }

            let candidates = {
                let costing = mm.costing();
                let filter = |edge: &DirectedEdge| costing.filter(edge);
                query.query(&measurement.lnglat(), sq_search_radius, Some(&filter))
            };

            debug!("Measurement {index} has {} candidates", candidates.len());
            mm.append_state(*measurement, candidates);
            kept.push(index);
        }
    }

    let path = {
        debug_time!("offline_match: decode path");

        let mut path = mm.search_path(kept.len() - 1)?.collect::<Vec<Option<StateId>>>();
        path.reverse();
        path
    };

    debug_time!("offline_match: assemble results");
    let mut results = Vec::with_capacity(measurements.len());

    if let [only] = path.as_slice() {
        results.push(guess_source(mm, *only, None, &measurements[kept[0]]));
    } else {
        results.push(MatchResult::raw(measurements[kept[0]].lnglat()));
    }

    for time in 1..path.len() {
        let (source, target) = (path[time - 1], path[time]);

        if results.last().is_some_and(|result| !result.is_matched()) {
            results.pop();
            results.push(guess_source(mm, source, target, &measurements[kept[time - 1]]));
        }

        if let Some(skipped) = proximate.get(&(time - 1)) {
            let graphset = collect_graphset(mm, source, target);

            for &index in skipped {
                let measurement = &measurements[index];
                let candidates = {
                    let costing = mm.costing();
                    let filter = |edge: &DirectedEdge| costing.filter(edge);
                    query.query(&measurement.lnglat(), sq_search_radius, Some(&filter))
                };

                results.push(interpolate(mm.network(), &graphset, &candidates, measurement));
            }
        }

        results.push(guess_target(mm, source, target, &measurements[kept[time]]));
    }

    info!(
        "Matched {} of {} measurements, decoding {} of them",
        results.iter().filter(|result| result.is_matched()).count(),
        measurements.len(),
        kept.len()
    );

    Ok(results)
}
