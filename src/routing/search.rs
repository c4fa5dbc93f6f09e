use crate::candidate::Candidate;
use crate::costing::{CostModel, EdgeLabel};
use crate::network::{DirectedEdge, EdgeId, NodeId, NodeInfo, RoadNetwork};
use crate::routing::{Label, LabelError, LabelIdx, LabelKey, LabelSet, TurnCostTable};
use geo::Point;
use log::trace;
use rustc_hash::{FxHashMap, FxHashSet};
use trellis_geo::{DistanceApproximator, clamp_heading, heading, turn_degree180};

type Destinations<K> = FxHashMap<K, FxHashSet<u16>>;

/// Everything a search needs besides its endpoints.
#[derive(Debug)]
pub struct RoutingContext<'a, N: RoadNetwork> {
    pub network: &'a N,
    pub costing: &'a dyn CostModel,
    /// Centred on the measurement being routed towards.
    pub approximator: DistanceApproximator,
    pub search_radius: f64,
    pub turn_costs: &'a TurnCostTable,
}

impl<'a, N: RoadNetwork> RoutingContext<'a, N> {
    /// Searches for the shortest paths from the destination at `origin` to
    /// every other destination, storing the labels in `labelset`.
    ///
    /// Returns the index of the label arriving at each destination which
    /// was reached. Destinations which could not be reached within the
    /// label set's maximum cost are absent. The label set's queue is
    /// cleared on return, though its labels are kept.
    ///
    /// The path leaving the origin is judged against `edge_label`, the
    /// edge by which the origin itself was arrived at.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = "debug"))]
    pub fn find_shortest_path(
        &self,
        destinations: &[&Candidate],
        origin: u16,
        labelset: &mut LabelSet,
        edge_label: Option<EdgeLabel>,
    ) -> Result<FxHashMap<u16, LabelIdx>, LabelError> {
        let result = self.search(destinations, origin, labelset, edge_label);

        labelset.clear_queue();
        labelset.clear_status();

        result
    }

    fn search(
        &self,
        destinations: &[&Candidate],
        origin: u16,
        labelset: &mut LabelSet,
        edge_label: Option<EdgeLabel>,
    ) -> Result<FxHashMap<u16, LabelIdx>, LabelError> {
        let (mut node_dests, mut edge_dests) = self.set_destinations(destinations);
        self.set_origin(destinations, origin, labelset, edge_label)?;

        let mut results = FxHashMap::default();

        while let Some(label_idx) = labelset.pop() {
            let Some(label) = labelset.label(label_idx).copied() else {
                break;
            };

            match label.key {
                LabelKey::Node(node) => {
                    if let Some(dests) = node_dests.remove(&node) {
                        results.extend(dests.into_iter().map(|dest| (dest, label_idx)));
                    }

                    if node_dests.is_empty() && edge_dests.is_empty() {
                        break;
                    }

                    self.expand_node(node, &label, label_idx, destinations, &edge_dests, labelset)?;
                }
                LabelKey::Destination(dest) => {
                    results.insert(dest, label_idx);

                    if let Some(candidate) = destinations.get(dest as usize) {
                        for path_edge in &candidate.edges {
                            if let Some(dests) = edge_dests.get_mut(&path_edge.id) {
                                dests.remove(&dest);
                                if dests.is_empty() {
                                    edge_dests.remove(&path_edge.id);
                                }
                            }
                        }
                    }

                    if node_dests.is_empty() && edge_dests.is_empty() {
                        break;
                    }

                    if dest == origin {
                        self.expand_origin(origin, &label, label_idx, destinations, &edge_dests, labelset)?;
                    }
                }
            }
        }

        trace!(
            "Reached {} of {} destinations using {} labels",
            results.len(),
            destinations.len(),
            labelset.len()
        );

        Ok(results)
    }

    /// Registers each destination at the node it lies upon,
    /// or otherwise along each of its edges.
    fn set_destinations(&self, destinations: &[&Candidate]) -> (Destinations<NodeId>, Destinations<EdgeId>) {
        let mut node_dests = Destinations::<NodeId>::default();
        let mut edge_dests = Destinations::<EdgeId>::default();

        for (dest, candidate) in destinations.iter().enumerate().take(u16::MAX as usize) {
            let dest = dest as u16;

            for path_edge in candidate.edges.iter().filter(|edge| edge.id.is_valid()) {
                let node = if path_edge.dist == 0.0 {
                    self.network.start_node(path_edge.id)
                } else if path_edge.dist == 1.0 {
                    self.network.end_node(path_edge.id)
                } else {
                    edge_dests.entry(path_edge.id).or_default().insert(dest);
                    continue;
                };

                if let Some(node) = node {
                    node_dests.entry(node).or_default().insert(dest);
                }
            }
        }

        (node_dests, edge_dests)
    }

    fn set_origin(
        &self,
        destinations: &[&Candidate],
        origin: u16,
        labelset: &mut LabelSet,
        edge_label: Option<EdgeLabel>,
    ) -> Result<(), LabelError> {
        let Some(candidate) = destinations.get(origin as usize) else {
            return Ok(());
        };

        let travel_mode = self.costing.travel_mode();

        for path_edge in candidate.edges.iter().filter(|edge| edge.id.is_valid()) {
            let node = if path_edge.dist == 0.0 {
                self.network.start_node(path_edge.id)
            } else if path_edge.dist == 1.0 {
                self.network.end_node(path_edge.id)
            } else {
                labelset.put(Label::seed(LabelKey::Destination(origin), travel_mode, edge_label))?;
                continue;
            };

            let allowed = node
                .and_then(|node| self.network.node(node))
                .is_some_and(|info| self.costing.node_allowed(info));

            if let (Some(node), true) = (node, allowed) {
                labelset.put(Label::seed(LabelKey::Node(node), travel_mode, edge_label))?;
            }
        }

        Ok(())
    }

    fn expand_node(
        &self,
        node: NodeId,
        label: &Label,
        label_idx: LabelIdx,
        destinations: &[&Candidate],
        edge_dests: &Destinations<EdgeId>,
        labelset: &mut LabelSet,
    ) -> Result<(), LabelError> {
        let Some(info) = self.network.node(node) else {
            return Ok(());
        };

        if info.edge_count == 0 || !self.costing.node_allowed(info) {
            return Ok(());
        }

        let inbound = label.edge_label.map(|pred| self.inbound_heading(&pred, info));

        for (id, edge) in self.network.outgoing(node) {
            // Edges leaving the level are not traversed
            if edge.end_node.level() != node.level() {
                continue;
            }

            if !self.edge_allowed(id, edge, label.edge_label.as_ref()) {
                continue;
            }

            let turn_cost = match inbound {
                Some(inbound) => {
                    let outbound = self.outbound_heading(id, edge, info);
                    label.turn_cost + self.turn_costs.cost(turn_degree180(inbound, outbound))
                }
                None => 0.0,
            };

            let end = self.network.node(edge.end_node);
            let edge_label = Some(EdgeLabel::new(id, edge, end));

            let step = |key, source, target, cost, sort_cost| Label {
                key,
                edge: Some(id),
                source,
                target,
                cost,
                turn_cost,
                sort_cost,
                predecessor: Some(label_idx),
                travel_mode: self.costing.travel_mode(),
                edge_label,
            };

            for &dest in edge_dests.get(&id).into_iter().flatten() {
                let Some(candidate) = destinations.get(dest as usize) else {
                    continue;
                };

                for path_edge in candidate.edges.iter().filter(|path_edge| path_edge.id == id) {
                    let cost = label.cost + edge.length * path_edge.dist;
                    labelset.put(step(LabelKey::Destination(dest), 0.0, path_edge.dist, cost, cost))?;
                }
            }

            if let Some(end) = end {
                let cost = label.cost + edge.length;
                let sort_cost = cost + self.heuristic(&end.position);
                labelset.put(step(LabelKey::Node(edge.end_node), 0.0, 1.0, cost, sort_cost))?;
            }
        }

        Ok(())
    }

    /// Expands from an origin part way along its edges, towards the
    /// destinations further along each edge and its end node.
    fn expand_origin(
        &self,
        origin: u16,
        label: &Label,
        label_idx: LabelIdx,
        destinations: &[&Candidate],
        edge_dests: &Destinations<EdgeId>,
        labelset: &mut LabelSet,
    ) -> Result<(), LabelError> {
        let Some(candidate) = destinations.get(origin as usize) else {
            return Ok(());
        };

        for origin_edge in &candidate.edges {
            let Some(edge) = self.network.edge(origin_edge.id) else {
                continue;
            };

            if !self.edge_allowed(origin_edge.id, edge, label.edge_label.as_ref()) {
                continue;
            }

            let turn_cost = match label.edge_label {
                Some(pred) if pred.is_reversed_by(origin_edge.id, edge) => {
                    label.turn_cost + self.turn_costs.u_turn()
                }
                _ => 0.0,
            };

            let end = self.network.node(edge.end_node);
            let edge_label = Some(EdgeLabel::new(origin_edge.id, edge, end));

            let step = |key, target, cost, sort_cost| Label {
                key,
                edge: Some(origin_edge.id),
                source: origin_edge.dist,
                target,
                cost,
                turn_cost,
                sort_cost,
                predecessor: Some(label_idx),
                travel_mode: self.costing.travel_mode(),
                edge_label,
            };

            for &other in edge_dests.get(&origin_edge.id).into_iter().flatten() {
                let Some(candidate) = destinations.get(other as usize) else {
                    continue;
                };

                for other_edge in &candidate.edges {
                    if other_edge.id == origin_edge.id && origin_edge.dist <= other_edge.dist {
                        let cost = label.cost + edge.length * (other_edge.dist - origin_edge.dist);
                        labelset.put(step(LabelKey::Destination(other), other_edge.dist, cost, cost))?;
                    }
                }
            }

            if let Some(end) = end {
                let cost = label.cost + edge.length * (1.0 - origin_edge.dist);
                let sort_cost = cost + self.heuristic(&end.position);
                labelset.put(step(LabelKey::Node(edge.end_node), 1.0, cost, sort_cost))?;
            }
        }

        Ok(())
    }

    /// Whether `edge` may be taken having arrived by `pred`. Without a
    /// known arrival, only edges the costing filters out are excluded.
    fn edge_allowed(&self, id: EdgeId, edge: &DirectedEdge, pred: Option<&EdgeLabel>) -> bool {
        match pred {
            Some(pred) => pred.edge == id || self.costing.allowed(edge, pred, id),
            None => !self.costing.filter(edge),
        }
    }

    /// Lower bound of the distance from `position` to the target.
    #[inline]
    fn heuristic(&self, position: &Point) -> f64 {
        (self.approximator.distance(position) - self.search_radius).max(0.0)
    }

    /// The heading at which the edge of `pred` would leave `node`, were it reversed.
    fn inbound_heading(&self, pred: &EdgeLabel, node: &NodeInfo) -> u16 {
        if let Some(heading) = node.heading(pred.opp_local_idx) {
            return heading;
        }

        let forward = self.network.edge(pred.edge).is_some_and(|edge| edge.forward);
        self.shape_heading(pred.edge, !forward)
    }

    fn outbound_heading(&self, id: EdgeId, edge: &DirectedEdge, node: &NodeInfo) -> u16 {
        node.heading(edge.local_idx)
            .unwrap_or_else(|| self.shape_heading(id, edge.forward))
    }

    /// Heading of the first segment of the edge's shape, or of
    /// its last segment reversed when `from_start` is unset.
    fn shape_heading(&self, id: EdgeId, from_start: bool) -> u16 {
        let Some(points) = self.network.shape(id).map(|shape| &shape.0) else {
            return 0;
        };

        if points.len() < 2 {
            return 0;
        }

        let (from, to) = if from_start {
            (points[0], points[1])
        } else {
            (points[points.len() - 1], points[points.len() - 2])
        };

        clamp_heading(heading(&Point(from), &Point(to)))
    }
}
