use crate::candidate::Candidate;
use crate::matching::{MapMatching, Measurement, StateId};
use crate::network::{GraphElement, NodeId, RoadNetwork};
use crate::offline::MatchResult;
use itertools::Itertools;
use rustc_hash::FxHashSet;

/// The network elements a skipped measurement may be interpolated onto.
pub type GraphSet = FxHashSet<GraphElement>;

/// The nodes a node candidate snapped onto, one per correlated edge end.
pub(crate) fn collect_nodes<N: RoadNetwork>(network: &N, candidate: &Candidate) -> Vec<NodeId> {
    candidate
        .edges
        .iter()
        .filter_map(|edge| {
            if edge.dist == 0.0 {
                network.start_node(edge.id)
            } else if edge.dist == 1.0 {
                network.end_node(edge.id)
            } else {
                None
            }
        })
        .unique()
        .collect()
}

/// The elements of a candidate, its nodes if it is a node candidate.
fn candidate_elements<N: RoadNetwork>(network: &N, candidate: &Candidate) -> Vec<GraphElement> {
    if candidate.is_node() {
        collect_nodes(network, candidate)
            .into_iter()
            .map(GraphElement::Node)
            .collect()
    } else {
        candidate
            .edges
            .iter()
            .map(|edge| GraphElement::Edge(edge.id))
            .collect()
    }
}

/// Every element travelled between two decoded states.
///
/// When only the source was decoded, its own elements are used.
pub fn collect_graphset<N: RoadNetwork>(
    mm: &MapMatching<N>,
    source: Option<StateId>,
    target: Option<StateId>,
) -> GraphSet {
    match (source, target) {
        (Some(source), Some(target)) => mm
            .route(source, target)
            .flat_map(|label| {
                let edge = label.edge.filter(|edge| edge.is_valid()).map(GraphElement::Edge);
                let node = label.node().filter(NodeId::is_valid).map(GraphElement::Node);
                edge.into_iter().chain(node)
            })
            .collect(),
        (Some(source), None) => mm
            .state(source)
            .map(|state| candidate_elements(mm.network(), state.candidate()))
            .unwrap_or_default()
            .into_iter()
            .collect(),
        _ => GraphSet::default(),
    }
}

/// Matches a skipped measurement onto its closest candidate lying
/// within `graphset`, falling back to its raw position.
pub fn interpolate<N: RoadNetwork>(
    network: &N,
    graphset: &GraphSet,
    candidates: &[Candidate],
    measurement: &Measurement,
) -> MatchResult {
    let mut closest: Option<(&Candidate, GraphElement)> = None;

    for candidate in candidates {
        if closest.is_some_and(|(best, _)| best.sq_distance <= candidate.sq_distance) {
            continue;
        }

        let element = candidate_elements(network, candidate)
            .into_iter()
            .filter(|element| graphset.contains(element))
            .last();

        if let Some(element) = element {
            closest = Some((candidate, element));
        }
    }

    match closest {
        Some((candidate, element)) => MatchResult {
            point: candidate.vertex,
            distance: candidate.distance(),
            element: Some(element),
            state: None,
        },
        None => MatchResult::raw(measurement.lnglat()),
    }
}

/// Resolves the measurement of `source`, given the state it continues to.
///
/// Its element is the one nearest to the source along the route between them.
pub fn guess_source<N: RoadNetwork>(
    mm: &MapMatching<N>,
    source: Option<StateId>,
    target: Option<StateId>,
    measurement: &Measurement,
) -> MatchResult {
    match (source, target) {
        (Some(source), Some(target)) => {
            let element = mm.route(source, target).filter_map(|label| label.element()).last();

            match mm.state(source) {
                Some(state) => MatchResult {
                    point: state.candidate().vertex,
                    distance: state.candidate().distance(),
                    element,
                    state: Some(source),
                },
                None => MatchResult::raw(measurement.lnglat()),
            }
        }
        (Some(source), None) => MatchResult {
            state: Some(source),
            ..MatchResult::raw(measurement.lnglat())
        },
        _ => MatchResult::raw(measurement.lnglat()),
    }
}

/// Resolves the measurement of `target`, given the state it was reached from.
///
/// Its element is the one at which the route between them arrives.
pub fn guess_target<N: RoadNetwork>(
    mm: &MapMatching<N>,
    source: Option<StateId>,
    target: Option<StateId>,
    measurement: &Measurement,
) -> MatchResult {
    match (source, target) {
        (Some(source), Some(target)) => {
            let element = mm.route(source, target).next().and_then(|label| label.element());

            match mm.state(target) {
                Some(state) => MatchResult {
                    point: state.candidate().vertex,
                    distance: state.candidate().distance(),
                    element,
                    state: Some(target),
                },
                None => MatchResult::raw(measurement.lnglat()),
            }
        }
        (None, Some(target)) => MatchResult {
            state: Some(target),
            ..MatchResult::raw(measurement.lnglat())
        },
        _ => MatchResult::raw(measurement.lnglat()),
    }
}
