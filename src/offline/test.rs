use crate::Error;
use crate::candidate::{CandidateGridQuery, CandidateQuery};
use crate::config::MatchOptions;
use crate::costing::{AccessCost, ProfileOptions};
use crate::matching::{MapMatching, Measurement};
use crate::network::*;
use crate::offline::*;
use approx::assert_relative_eq;
use geo::{LineString, Point, point};
use std::sync::Arc;
use trellis_fixtures::{BLOCK_GRID, BLOCK_GRID_MATCHED, BLOCK_GRID_TRACE, STRAIGHT_ROAD};
use trellis_geo::METERS_PER_DEGREE_LAT;
use wkt::TryFromWkt;

fn measurements(points: impl IntoIterator<Item = Point>) -> Vec<Measurement> {
    points
        .into_iter()
        .map(|point| Measurement::new(point, 5.0, 50.0))
        .collect()
}

fn edge(network: &InMemoryNetwork, from: Point, to: Point) -> EdgeId {
    let (from, to) = (
        network.node_at(&from).expect("node exists"),
        network.node_at(&to).expect("node exists"),
    );
    network.edge_between(from, to).expect("edge exists")
}

fn run(
    network: &InMemoryNetwork,
    measurements: &[Measurement],
) -> Result<Vec<MatchResult>, Error> {
    let options = MatchOptions::default();
    let mut mm = MapMatching::new(network, Arc::new(AccessCost::universal()), &options)?;
    let size = network.partition_size() / 100.0;
    let mut query = CandidateGridQuery::new(network, size, size)?;

    offline_match(
        &mut mm,
        &mut query,
        measurements,
        options.sq_search_radius(),
        options.interpolation_distance,
    )
}

#[test]
fn empty_trace() -> Result<(), Error> {
    let network = NetworkBuilder::default().with_wkt(STRAIGHT_ROAD).build();
    assert!(run(&network, &[])?.is_empty());
    Ok(())
}

#[test_log::test]
fn interpolates_proximate_measurements() -> Result<(), Error> {
    let network = NetworkBuilder::default().with_wkt(STRAIGHT_ROAD).build();
    let east = edge(&network, point! { x: 0.0, y: 0.0 }, point! { x: 0.01, y: 0.0 });

    // The second measurement lies within the interpolation distance of the first
    let trace = measurements([
        point! { x: 0.001, y: 0.00002 },
        point! { x: 0.00105, y: 0.00002 },
        point! { x: 0.003, y: 0.00002 },
    ]);

    let results = run(&network, &trace)?;
    assert_eq!(results.len(), 3);

    let [first, middle, last] = results.as_slice() else {
        panic!("expected three results");
    };

    assert!(first.state.is_some());
    assert!(last.state.is_some());
    assert_ne!(first.state, last.state);
    assert_eq!(first.element, Some(GraphElement::Edge(east)));
    assert_eq!(last.element, Some(GraphElement::Edge(east)));

    // Interpolated onto the route, without a state of its own
    assert_eq!(middle.state, None);
    assert_eq!(middle.element, Some(GraphElement::Edge(east)));
    assert_eq!(middle.graph_type(), GraphType::Edge);
    assert_relative_eq!(middle.point.x(), 0.00105, epsilon = 1e-9);
    assert_relative_eq!(middle.point.y(), 0.0, epsilon = 1e-9);
    assert_relative_eq!(middle.distance, 0.00002 * METERS_PER_DEGREE_LAT, epsilon = 1e-6);
    Ok(())
}

#[test_log::test]
fn interpolates_along_one_way() -> Result<(), Error> {
    let mut builder = NetworkBuilder::default();
    builder.add_one_way(geo::wkt! { LINESTRING(0.0 0.0, 0.01 0.0) });
    let network = builder.build();
    let east = edge(&network, point! { x: 0.0, y: 0.0 }, point! { x: 0.01, y: 0.0 });

    let options = MatchOptions {
        sigma_z: 5.0,
        interpolation_distance: 1000.0,
        ..MatchOptions::default()
    };

    let mut mm = MapMatching::new(&network, Arc::new(AccessCost::universal()), &options)?;
    let size = network.partition_size() / 100.0;
    let mut query = CandidateGridQuery::new(&network, size, size)?;

    // Roughly 50m apart, the middle lies within the interpolation distance
    let spacing = 50.0 / METERS_PER_DEGREE_LAT;
    let trace = measurements((1..=3).map(|step| point! { x: 0.001 + step as f64 * spacing, y: 0.0 }));

    let results = offline_match(
        &mut mm,
        &mut query,
        &trace,
        options.sq_search_radius(),
        options.interpolation_distance,
    )?;

    assert_eq!(results.len(), 3);
    assert!(results[0].state.is_some());
    assert!(results[2].state.is_some());
    assert_eq!(results[0].element, Some(GraphElement::Edge(east)));
    assert_eq!(results[2].element, Some(GraphElement::Edge(east)));

    assert_eq!(results[1].state, None);
    assert_eq!(results[1].element, Some(GraphElement::Edge(east)));
    assert_relative_eq!(results[1].point.x(), trace[1].lnglat().x(), epsilon = 1e-9);
    Ok(())
}

#[test]
fn unmatched_measurements_keep_their_position() -> Result<(), Error> {
    let network = NetworkBuilder::default().with_wkt(STRAIGHT_ROAD).build();

    // Roughly 1.1km north of the road
    let isolated = point! { x: 0.003, y: 0.01 };
    let trace = measurements([point! { x: 0.001, y: 0.0 }, isolated, point! { x: 0.005, y: 0.0 }]);

    let results = run(&network, &trace)?;
    assert_eq!(results.len(), 3);

    assert_eq!(results[1], MatchResult::raw(isolated));
    assert_eq!(results[1].graph_type(), GraphType::Unknown);
    Ok(())
}

#[test]
fn session_radius_governs_queries() -> Result<(), Error> {
    let network = NetworkBuilder::default().with_wkt(STRAIGHT_ROAD).build();

    // Roughly 22m from the road, beyond the radius each measurement carries
    let trace = [0.002, 0.004]
        .map(|x| Measurement::new(point! { x: x, y: 0.0002 }, 5.0, 1.0))
        .to_vec();

    let results = run(&network, &trace)?;
    assert!(results.iter().all(|result| result.is_matched()));
    Ok(())
}

#[test]
fn single_measurement() -> Result<(), Error> {
    let network = NetworkBuilder::default().with_wkt(STRAIGHT_ROAD).build();
    let location = point! { x: 0.002, y: 0.0001 };

    let results = run(&network, &measurements([location]))?;
    let [only] = results.as_slice() else {
        panic!("expected a single result");
    };

    assert!(only.state.is_some());
    assert_eq!(only.point, location);
    Ok(())
}

#[test_log::test]
fn matches_block_grid() -> Result<(), Error> {
    let network = NetworkBuilder::default().with_wkt(BLOCK_GRID).build();

    let trace = LineString::try_from_wkt_str(BLOCK_GRID_TRACE).expect("valid trace");
    let expected = LineString::try_from_wkt_str(BLOCK_GRID_MATCHED).expect("valid trace");

    let options = MatchOptions::default();
    let costing = Arc::new(AccessCost::drive(ProfileOptions::default()));
    let mut mm = MapMatching::new(&network, costing, &options)?;
    let size = network.partition_size() / 100.0;
    let mut query = CandidateGridQuery::new(&network, size, size)?;

    let trace = measurements(trace.points());
    let results = offline_match(&mut mm, &mut query, &trace, options.sq_search_radius(), 10.0)?;

    assert_eq!(results.len(), trace.len());
    for (result, expected) in results.iter().zip(expected.points()) {
        assert!(result.is_matched(), "Expected {result:?} to be matched");
        assert_relative_eq!(result.point.x(), expected.x(), epsilon = 1e-7);
        assert_relative_eq!(result.point.y(), expected.y(), epsilon = 1e-7);
    }

    let route = construct_route(&mm, &results)?;
    let travelled = route
        .iter()
        .filter(|segment| segment.target() > segment.source())
        .collect::<Vec<_>>();

    let expected_edges = [
        edge(&network, point! { x: 0.0, y: 0.0 }, point! { x: 0.002, y: 0.0 }),
        edge(&network, point! { x: 0.002, y: 0.0 }, point! { x: 0.004, y: 0.0 }),
        edge(&network, point! { x: 0.004, y: 0.0 }, point! { x: 0.004, y: 0.002 }),
        edge(&network, point! { x: 0.004, y: 0.002 }, point! { x: 0.004, y: 0.004 }),
    ];

    assert_eq!(
        travelled.iter().map(|segment| segment.edge()).collect::<Vec<_>>(),
        expected_edges
    );
    assert_relative_eq!(travelled[0].source(), 0.1, epsilon = 1e-6);
    assert_relative_eq!(travelled[3].target(), 0.5, epsilon = 1e-6);

    // A repeated match begins afresh
    let again = offline_match(&mut mm, &mut query, &trace, options.sq_search_radius(), 10.0)?;
    assert_eq!(again, results);
    Ok(())
}

#[test]
fn interpolation_outside_graphset() {
    let network = NetworkBuilder::default().with_wkt(STRAIGHT_ROAD).build();
    let location = point! { x: 0.002, y: 0.0001 };
    let measurement = Measurement::new(location, 5.0, 50.0);

    let mut query = crate::candidate::CandidateScan::new(&network);
    let candidates = query.query(&location, 2500.0, None);
    assert!(!candidates.is_empty());

    let result = interpolate(&network, &GraphSet::default(), &candidates, &measurement);
    assert_eq!(result, MatchResult::raw(location));

    let graphset = candidates[0]
        .edges
        .iter()
        .map(|edge| GraphElement::Edge(edge.id))
        .collect::<GraphSet>();
    let result = interpolate(&network, &graphset, &candidates, &measurement);
    assert!(result.is_matched());
    assert_relative_eq!(result.point.y(), 0.0, epsilon = 1e-9);
}
