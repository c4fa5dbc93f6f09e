use crate::config::ConfigError;
use crate::costing::*;
use crate::network::*;
use geo::{point, wkt};
use std::str::FromStr;
use std::sync::Arc;

/// A dead end `a -> b`, and a through road `b -> c -> d`.
fn network() -> InMemoryNetwork {
    let mut builder = NetworkBuilder::default();
    builder.add_two_way(wkt! { LINESTRING(0.0 0.0, 0.001 0.0) });
    builder.add_two_way(wkt! { LINESTRING(0.001 0.0, 0.002 0.0) });
    builder.add_two_way(wkt! { LINESTRING(0.002 0.0, 0.003 0.0) });
    builder.add_way(
        wkt! { LINESTRING(0.002 0.0, 0.002 0.001) },
        Access::PEDESTRIAN,
        Access::PEDESTRIAN,
    );
    builder.build()
}

fn node(network: &InMemoryNetwork, x: f64) -> NodeId {
    network.node_at(&point! { x: x, y: 0.0 }).expect("node exists")
}

fn label(network: &InMemoryNetwork, from: NodeId, to: NodeId) -> EdgeLabel {
    let id = network.edge_between(from, to).expect("edge exists");
    let edge = network.edge(id).expect("edge exists");
    EdgeLabel::new(id, edge, network.node(edge.end_node))
}

#[test]
fn drive_forbids_u_turns_outside_dead_ends() {
    let network = network();
    let (a, b, c) = (node(&network, 0.0), node(&network, 0.001), node(&network, 0.002));
    let drive = AccessCost::drive(ProfileOptions::default());

    // Arrived at c from b, reversing towards b
    let arrived = label(&network, b, c);
    assert!(!arrived.dead_end);

    let back = network.edge_between(c, b).expect("edge exists");
    let back_edge = network.edge(back).expect("edge exists");
    assert!(arrived.is_reversed_by(back, back_edge));
    assert!(!drive.allowed(back_edge, &arrived, back));

    // Arrived at the dead end a, reversing is the only option
    let dead_end = label(&network, b, a);
    assert!(dead_end.dead_end);

    let out = network.edge_between(a, b).expect("edge exists");
    let out_edge = network.edge(out).expect("edge exists");
    assert!(drive.allowed(out_edge, &dead_end, out));

    // The universal profile reverses anywhere
    assert!(AccessCost::universal().allowed(back_edge, &arrived, back));
}

#[test]
fn access_restricts_modes() {
    let network = network();
    let c = node(&network, 0.002);
    let footpath_end = network
        .node_at(&point! { x: 0.002, y: 0.001 })
        .expect("node exists");

    let id = network.edge_between(c, footpath_end).expect("edge exists");
    let footpath = network.edge(id).expect("edge exists");

    assert!(AccessCost::drive(ProfileOptions::default()).filter(footpath));
    assert!(AccessCost::bicycle(ProfileOptions::default()).filter(footpath));
    assert!(!AccessCost::pedestrian(ProfileOptions::default()).filter(footpath));
    assert!(!AccessCost::universal().filter(footpath));

    let ignoring = AccessCost::drive(ProfileOptions {
        ignore_access: true,
        ..ProfileOptions::default()
    });
    assert!(!ignoring.filter(footpath));
}

#[test]
fn registry_rejects_duplicates() -> Result<(), ConfigError> {
    let mut registry = ModeRegistry::default();

    let mode = registry.register("auto", Arc::new(AccessCost::drive(ProfileOptions::default())))?;
    assert_eq!(mode, TravelMode::Drive);
    registry.register("multimodal", Arc::new(AccessCost::universal()))?;

    let duplicate = registry.register("car", Arc::new(AccessCost::drive(ProfileOptions::default())));
    assert!(matches!(
        duplicate,
        Err(ConfigError::DuplicateTravelMode(TravelMode::Drive))
    ));

    assert_eq!(registry.name_to_travel_mode("multimodal")?, TravelMode::Universal);
    assert_eq!(registry.travel_mode_to_name(TravelMode::Drive)?, "auto");
    assert!(matches!(
        registry.name_to_travel_mode("car"),
        Err(ConfigError::InvalidCostingName(_))
    ));
    assert!(matches!(
        registry.name_to_travel_mode(""),
        Err(ConfigError::InvalidCostingName(_))
    ));
    assert!(matches!(
        registry.costing(TravelMode::Bicycle),
        Err(ConfigError::UnregisteredTravelMode(TravelMode::Bicycle))
    ));

    assert_eq!(registry.modes().count(), 2);
    Ok(())
}

#[test]
fn travel_mode_names() {
    assert_eq!(TravelMode::Universal.to_string(), "universal");
    assert_eq!(TravelMode::from_str("bicycle").ok(), Some(TravelMode::Bicycle));
    assert_eq!(TravelMode::from_repr(0), Some(TravelMode::Drive));
}
