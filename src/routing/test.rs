use crate::candidate::{Candidate, CandidateQuery, CandidateScan};
use crate::costing::{AccessCost, ProfileOptions, TravelMode};
use crate::network::*;
use crate::routing::*;
use approx::assert_relative_eq;
use geo::{Point, point};
use trellis_fixtures::{BLOCK_GRID, STRAIGHT_ROAD};
use trellis_geo::DistanceApproximator;

fn node_label(index: u32, sort_cost: f64) -> Label {
    Label {
        cost: sort_cost,
        sort_cost,
        ..Label::seed(
            LabelKey::Node(NodeId(GraphId::new(0, 0, index))),
            TravelMode::Drive,
            None,
        )
    }
}

fn candidate(network: &InMemoryNetwork, location: Point) -> Candidate {
    CandidateScan::new(network)
        .query(&location, 25.0 * 25.0, None)
        .into_iter()
        .next()
        .expect("candidate exists")
}

fn context<'a>(
    network: &'a InMemoryNetwork,
    costing: &'a AccessCost,
    turn_costs: &'a TurnCostTable,
    target: Point,
) -> RoutingContext<'a, InMemoryNetwork> {
    RoutingContext {
        network,
        costing,
        approximator: DistanceApproximator::new(target),
        search_radius: 25.0,
        turn_costs,
    }
}

#[test]
fn labelset_pops_in_order() -> Result<(), LabelError> {
    let mut labelset = LabelSet::new(100.0);

    assert!(labelset.put(node_label(0, 5.0))?);
    assert!(labelset.put(node_label(1, 3.0))?);
    assert!(labelset.put(node_label(2, 8.0))?);
    assert!(labelset.put(node_label(3, 3.0))?);

    // Replacing lowers the cost of a pending label
    assert!(labelset.put(node_label(2, 4.0))?);
    assert!(!labelset.put(node_label(2, 6.0))?);

    let mut popped = vec![];
    while let Some(idx) = labelset.pop() {
        popped.push(idx);
    }

    // Ties resolve to the earlier label
    assert_eq!(popped, vec![1, 3, 2, 0]);
    assert_eq!(labelset.len(), 4);

    let costs = popped
        .iter()
        .filter_map(|idx| labelset.label(*idx))
        .map(|label| label.sort_cost)
        .collect::<Vec<_>>();
    assert!(costs.windows(2).all(|pair| pair[0] <= pair[1]));

    Ok(())
}

#[test]
fn labelset_permanent_labels_are_kept() -> Result<(), LabelError> {
    let mut labelset = LabelSet::new(10.0);

    assert!(labelset.put(node_label(0, 2.0))?);
    assert_eq!(labelset.pop(), Some(0));

    let key = LabelKey::Node(NodeId(GraphId::new(0, 0, 0)));
    assert!(labelset.is_permanent(key));

    // Cheaper offers for a settled label are discarded
    assert!(!labelset.put(node_label(0, 1.0))?);
    assert_relative_eq!(labelset.label(0).map_or(0.0, |l| l.cost), 2.0);

    // Labels beyond the maximum cost are never queued
    assert!(!labelset.put(node_label(1, 10.5))?);
    assert!(labelset.put(node_label(1, 10.0))?);

    assert_eq!(
        labelset.put(Label {
            key: LabelKey::Node(NodeId::INVALID),
            ..node_label(0, 1.0)
        }),
        Err(LabelError::InvalidNode)
    );
    assert_eq!(
        labelset.put(Label {
            key: LabelKey::Destination(INVALID_DESTINATION),
            ..node_label(0, 1.0)
        }),
        Err(LabelError::InvalidDestination)
    );

    labelset.clear();
    assert_eq!(labelset.len(), 0);
    assert!(labelset.is_empty());
    Ok(())
}

#[test]
fn turn_costs_decay() {
    let table = TurnCostTable::new(200.0);
    assert_relative_eq!(table.u_turn(), 200.0);
    assert_relative_eq!(table.cost(45), 200.0 / std::f64::consts::E);
    assert!(table.cost(90) > table.cost(180));

    let disabled = TurnCostTable::new(0.0);
    assert!((0..=180).all(|degree| disabled.cost(degree) == 0.0));
}

#[test_log::test]
fn routes_along_an_edge() -> Result<(), LabelError> {
    let network = NetworkBuilder::default().with_wkt(STRAIGHT_ROAD).build();
    let costing = AccessCost::universal();
    let turn_costs = TurnCostTable::default();

    let origin = candidate(&network, point! { x: 0.002, y: 0.0 });
    let target = candidate(&network, point! { x: 0.007, y: 0.0 });

    let ctx = context(&network, &costing, &turn_costs, target.location);
    let mut labelset = LabelSet::new(2000.0);

    let results = ctx.find_shortest_path(&[&origin, &target], 0, &mut labelset, None)?;
    let label = results
        .get(&1)
        .and_then(|idx| labelset.label(*idx))
        .expect("target is reached");

    assert_relative_eq!(label.cost, 1111.95 * 0.5, epsilon = 1.0);
    assert_relative_eq!(label.source, 0.2, epsilon = 1e-6);
    assert_relative_eq!(label.target, 0.7, epsilon = 1e-6);
    assert_eq!(label.turn_cost, 0.0);
    assert_eq!(label.predecessor, results.get(&0).copied());

    // The queue is released once complete
    assert!(labelset.is_empty());
    Ok(())
}

#[test_log::test]
fn routes_through_intersections() -> Result<(), LabelError> {
    let network = NetworkBuilder::default().with_wkt(BLOCK_GRID).build();
    let costing = AccessCost::drive(ProfileOptions::default());
    let turn_costs = TurnCostTable::new(50.0);

    let origin = candidate(&network, point! { x: 0.001, y: 0.0 });
    let target = candidate(&network, point! { x: 0.002, y: 0.001 });
    let corner = network
        .node_at(&point! { x: 0.002, y: 0.0 })
        .expect("corner exists");

    let ctx = context(&network, &costing, &turn_costs, target.location);
    let mut labelset = LabelSet::new(2000.0);

    let results = ctx.find_shortest_path(&[&origin, &target], 0, &mut labelset, None)?;
    let arrival = results.get(&1).copied().expect("target is reached");

    let path = labelset.trace(arrival).collect::<Vec<_>>();
    assert_eq!(path.len(), 3);
    assert_eq!(path[1].node(), Some(corner));
    assert_eq!(path[2].destination(), Some(0));

    let label = path[0];
    assert_relative_eq!(label.cost, 222.39, epsilon = 0.5);

    // A left turn at the corner
    assert!(label.turn_cost > 0.0);
    assert!(label.turn_cost < turn_costs.cost(45));
    assert_eq!(label.edge_label.map(|edge| edge.edge), label.edge);
    Ok(())
}

#[test]
fn bounded_by_maximum_cost() -> Result<(), LabelError> {
    let network = NetworkBuilder::default().with_wkt(BLOCK_GRID).build();
    let costing = AccessCost::drive(ProfileOptions::default());
    let turn_costs = TurnCostTable::default();

    let origin = candidate(&network, point! { x: 0.001, y: 0.0 });
    let target = candidate(&network, point! { x: 0.002, y: 0.001 });

    let ctx = context(&network, &costing, &turn_costs, target.location);
    let mut labelset = LabelSet::new(150.0);

    let results = ctx.find_shortest_path(&[&origin, &target], 0, &mut labelset, None)?;
    assert!(results.contains_key(&0));
    assert!(!results.contains_key(&1));
    Ok(())
}
