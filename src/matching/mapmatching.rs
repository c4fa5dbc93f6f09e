use crate::candidate::Candidate;
use crate::config::{ConfigError, MatchOptions};
use crate::costing::CostModel;
use crate::matching::{
    EdgeSegment, Measurement, PathIter, Routes, SegmentError, State, StateId, Time,
    ViterbiModel, ViterbiSearch,
};
use crate::network::RoadNetwork;
use crate::routing::{INVALID_DESTINATION, Label, LabelError, LabelSet, RoutingContext, TurnCostTable};
use geo::{Distance, Haversine};
use log::trace;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use trellis_geo::DistanceApproximator;

/// The states of a trace and the routes between them.
///
/// Routes are searched lazily, on the first transition out of a state,
/// towards every state of the following column.
#[derive(Debug)]
pub struct Trellis<'a, N: RoadNetwork> {
    network: &'a N,
    costing: Arc<dyn CostModel>,

    inv_double_sq_sigma_z: f64,
    inv_beta: f64,
    breakage_distance: f64,
    max_route_distance_factor: f64,
    search_radius: f64,
    turn_costs: TurnCostTable,

    measurements: Vec<Measurement>,
    states: Vec<State>,
    columns: Vec<Vec<StateId>>,
    routes: FxHashMap<StateId, Routes>,
}

impl<N: RoadNetwork> Trellis<'_, N> {
    fn measurement_of(&self, state: StateId) -> Option<&Measurement> {
        self.states
            .get(state)
            .and_then(|state| self.measurements.get(state.time()))
    }

    /// Great-circle distance (metres) between the measurements of two states.
    fn measured_distance(&self, left: StateId, right: StateId) -> Option<f64> {
        let (left, right) = (self.measurement_of(left)?, self.measurement_of(right)?);
        Some(Haversine.distance(left.lnglat(), right.lnglat()))
    }

    /// Searches the routes from `left` to every state at `time`.
    fn route(&mut self, left: StateId, time: Time, predecessor: Option<StateId>) -> Result<(), LabelError> {
        let (Some(state), Some(column)) = (self.states.get(left), self.columns.get(time)) else {
            return Ok(());
        };

        let (Some(source), Some(target)) = (
            self.measurements.get(state.time()),
            self.measurements.get(time),
        ) else {
            return Ok(());
        };

        // Continue from the edge by which the best path arrived at `left`
        let edge_label = predecessor
            .and_then(|predecessor| self.routes.get(&predecessor))
            .and_then(|routes| routes.last_label(left))
            .and_then(|label| label.edge_label);

        let column = column
            .iter()
            .take(INVALID_DESTINATION as usize - 1)
            .copied()
            .collect::<Vec<_>>();

        let destinations = std::iter::once(state.candidate())
            .chain(column.iter().filter_map(|id| self.states.get(*id).map(State::candidate)))
            .collect::<Vec<&Candidate>>();

        let distance = Haversine.distance(source.lnglat(), target.lnglat());
        let max_route_distance =
            (distance * self.max_route_distance_factor).min(self.breakage_distance);

        let ctx = RoutingContext {
            network: self.network,
            costing: self.costing.as_ref(),
            approximator: DistanceApproximator::new(target.lnglat()),
            search_radius: self.search_radius,
            turn_costs: &self.turn_costs,
        };

        let mut labelset = LabelSet::new(max_route_distance.ceil());
        let results = ctx.find_shortest_path(&destinations, 0, &mut labelset, edge_label)?;

        trace!(
            "Routed state {left} to {} of {} states within {max_route_distance:.1}m",
            results.len().saturating_sub(1),
            column.len()
        );

        let label_idx = column
            .iter()
            .enumerate()
            .filter_map(|(index, id)| results.get(&(index as u16 + 1)).map(|idx| (*id, *idx)))
            .collect();

        self.routes.insert(left, Routes::new(labelset, label_idx));
        Ok(())
    }
}

impl<N: RoadNetwork> ViterbiModel for Trellis<'_, N> {
    type Error = LabelError;

    fn emission_cost(&self, state: StateId) -> f64 {
        self.states.get(state).map_or(f64::INFINITY, |state| {
            state.candidate().sq_distance * self.inv_double_sq_sigma_z
        })
    }

    fn transition_cost(
        &mut self,
        left: StateId,
        right: StateId,
        predecessor: Option<StateId>,
    ) -> Result<Option<f64>, LabelError> {
        let Some(time) = self.states.get(right).map(State::time) else {
            return Ok(None);
        };

        if !self.routes.contains_key(&left) {
            self.route(left, time, predecessor)?;
        }

        let Some(label) = self.routes.get(&left).and_then(|routes| routes.last_label(right)) else {
            return Ok(None);
        };

        let Some(distance) = self.measured_distance(left, right) else {
            return Ok(None);
        };

        Ok(Some(
            (label.turn_cost + (label.cost - distance).abs()) * self.inv_beta,
        ))
    }
}

/// A map matching session over a single trace.
///
/// Measurements are appended as columns of candidate states, and the
/// most likely sequence of states is decoded on demand.
///
/// ### Example
/// ```rust
/// use std::sync::Arc;
/// use geo::point;
/// use trellis::{MapMatching, Measurement, NetworkBuilder};
/// use trellis::candidate::{CandidateQuery, CandidateScan};
/// use trellis::config::MatchOptions;
/// use trellis::costing::AccessCost;
///
/// let network = NetworkBuilder::default()
///     .with_wkt(&["LINESTRING(0 0,0.01 0)"])
///     .build();
///
/// let options = MatchOptions::default();
/// let mut matching = MapMatching::new(&network, Arc::new(AccessCost::universal()), &options)
///     .expect("options are valid");
///
/// let mut query = CandidateScan::new(&network);
/// for x in [0.001, 0.002] {
///     let measurement = Measurement::new(point! { x: x, y: 0.0001 }, 5.0, 50.0);
///     let candidates = query.query(&measurement.lnglat(), options.sq_search_radius(), None);
///     matching.append_state(measurement, candidates);
/// }
///
/// let winner = matching.search_winner(1).expect("routing succeeds");
/// assert!(winner.is_some());
/// ```
#[derive(Debug)]
pub struct MapMatching<'a, N: RoadNetwork> {
    viterbi: ViterbiSearch,
    trellis: Trellis<'a, N>,
}

impl<'a, N: RoadNetwork> MapMatching<'a, N> {
    pub fn new(
        network: &'a N,
        costing: Arc<dyn CostModel>,
        options: &MatchOptions,
    ) -> Result<Self, ConfigError> {
        options.validate()?;

        Ok(Self {
            viterbi: ViterbiSearch::new(),
            trellis: Trellis {
                network,
                costing,
                inv_double_sq_sigma_z: 1.0 / (options.sigma_z * options.sigma_z * 2.0),
                inv_beta: 1.0 / options.beta,
                breakage_distance: options.breakage_distance,
                max_route_distance_factor: options.max_route_distance_factor,
                search_radius: options.search_radius,
                turn_costs: TurnCostTable::new(options.turn_penalty_factor),
                measurements: vec![],
                states: vec![],
                columns: vec![],
                routes: FxHashMap::default(),
            },
        })
    }

    pub fn network(&self) -> &'a N {
        self.trellis.network
    }

    pub fn costing(&self) -> &dyn CostModel {
        self.trellis.costing.as_ref()
    }

    /// Removes every measurement, state and route of the session.
    pub fn clear(&mut self) {
        self.viterbi.clear();
        self.trellis.measurements.clear();
        self.trellis.states.clear();
        self.trellis.columns.clear();
        self.trellis.routes.clear();
    }

    /// Appends a column of a state per candidate of the measurement.
    pub fn append_state(
        &mut self,
        measurement: Measurement,
        candidates: impl IntoIterator<Item = Candidate>,
    ) -> Time {
        let time = self.trellis.columns.len();

        let column = candidates
            .into_iter()
            .map(|candidate| {
                let id = self.trellis.states.len();
                self.trellis.states.push(State::new(id, time, candidate));
                id
            })
            .collect::<Vec<_>>();

        self.trellis.measurements.push(measurement);
        self.trellis.columns.push(column.clone());
        self.viterbi.add_column(column)
    }

    pub fn emission_cost(&self, state: StateId) -> f64 {
        self.trellis.emission_cost(state)
    }

    /// The cost of transitioning between two states, routing from `left`
    /// if it has not been routed from already. `None` if unreachable.
    pub fn transition_cost(&mut self, left: StateId, right: StateId) -> Result<Option<f64>, LabelError> {
        let predecessor = self.viterbi.predecessor(left);
        self.trellis.transition_cost(left, right, predecessor)
    }

    pub fn search_winner(&mut self, time: Time) -> Result<Option<StateId>, LabelError> {
        self.viterbi.search_winner(&mut self.trellis, time)
    }

    /// Iterates the most likely state of each time, from `time` back to the first.
    pub fn search_path(&mut self, time: Time) -> Result<PathIter<'_>, LabelError> {
        self.viterbi.search_path(&mut self.trellis, time)
    }

    pub fn predecessor(&self, state: StateId) -> Option<StateId> {
        self.viterbi.predecessor(state)
    }

    pub fn cost_so_far(&self, state: StateId) -> Option<f64> {
        self.viterbi.cost_so_far(state)
    }

    /// Iterates the labels of the route from `left` to `right` in reverse,
    /// beginning with the label arriving at `right`.
    ///
    /// Empty unless the route has been searched, and `right` was reached.
    pub fn route(&self, left: StateId, right: StateId) -> impl Iterator<Item = &Label> + '_ {
        self.trellis
            .routes
            .get(&left)
            .into_iter()
            .flat_map(move |routes| routes.route(right))
    }

    /// The route from `left` to `right` as segments of edges, in the order travelled.
    pub fn route_segments(&self, left: StateId, right: StateId) -> Result<Vec<EdgeSegment>, SegmentError> {
        let mut segments = self
            .route(left, right)
            .filter_map(|label| label.edge.map(|edge| EdgeSegment::new(edge, label.source, label.target)))
            .collect::<Result<Vec<_>, _>>()?;

        segments.reverse();
        Ok(segments)
    }

    pub fn measurement(&self, time: Time) -> Option<&Measurement> {
        self.trellis.measurements.get(time)
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.trellis.states.get(id)
    }

    pub fn column(&self, time: Time) -> &[StateId] {
        self.viterbi.column(time)
    }

    /// The number of columns, one per appended measurement.
    pub fn size(&self) -> usize {
        self.trellis.columns.len()
    }
}
