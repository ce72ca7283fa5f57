//! Building networks through the facade.

use wn_components::{LinkStatus, LinkType, NodeType, ValveType};
use wn_network::{ModelError, WaterNetworkModel};

#[test]
fn junction_attributes_and_isolated_vertex() {
    let mut wn = WaterNetworkModel::new();
    wn.add_junction("J1", 150, Some("pattern1"), 15).unwrap();

    let node = wn.get_node("J1").unwrap();
    assert_eq!(node.node_type(), NodeType::Junction);
    let j = node.as_junction().unwrap();
    assert_eq!(j.base_demand, 150.0);
    assert_eq!(j.elevation, 15.0);
    assert_eq!(j.demand_pattern.as_deref(), Some("pattern1"));

    assert!(wn.topology().contains_node("J1"));
    assert!(wn.get_links_for_node("J1").unwrap().is_empty());
}

#[test]
fn tank_attributes() {
    let mut wn = WaterNetworkModel::new();
    wn.add_tank("T1", 15, 75, 0, 100, 10, 0).unwrap();

    let t = wn.get_node("T1").unwrap().as_tank().unwrap();
    assert_eq!(t.elevation, 15.0);
    assert_eq!(t.init_level, 75.0);
    assert_eq!(t.min_level, 0.0);
    assert_eq!(t.max_level, 100.0);
    assert_eq!(t.diameter, 10.0);
    assert_eq!(t.min_vol, 0.0);
    assert_eq!(wn.num_tanks(), 1);
    assert!(wn.topology().contains_node("T1"));
}

#[test]
fn reservoir_attributes() {
    let mut wn = WaterNetworkModel::new();
    wn.add_reservoir("R1", 30, Some("pattern1")).unwrap();

    let r = wn.get_node("R1").unwrap().as_reservoir().unwrap();
    assert_eq!(r.base_head, 30.0);
    assert_eq!(r.head_pattern.as_deref(), Some("pattern1"));
    assert_eq!(wn.num_reservoirs(), 1);
}

#[test]
fn pipe_attributes_and_edge() {
    let mut wn = WaterNetworkModel::new();
    wn.add_junction("J1", 0, None, 0).unwrap();
    wn.add_junction("J2", 0, None, 0).unwrap();
    wn.add_pipe("P1", "J1", "J2", 1000, 1, 100, 0, "Open").unwrap();

    let link = wn.get_link("P1").unwrap();
    assert_eq!(link.link_type(), LinkType::Pipe);
    assert_eq!(link.start_node(), "J1");
    assert_eq!(link.end_node(), "J2");
    let p = link.as_pipe().unwrap();
    assert_eq!(p.length, 1000.0);
    assert_eq!(p.diameter, 1.0);
    assert_eq!(p.roughness, 100.0);
    assert_eq!(p.minor_loss, 0.0);
    assert_eq!(p.status, LinkStatus::Open);

    assert_eq!(wn.topology().endpoints("P1").unwrap(), ("J1", "J2"));
    assert_eq!(wn.topology().edge_count(), 1);
}

#[test]
fn cv_status_registers_check_valve_in_any_case() {
    let mut wn = WaterNetworkModel::new();
    wn.add_junction("J1", 0, None, 0).unwrap();
    wn.add_junction("J2", 0, None, 0).unwrap();
    wn.add_pipe("P1", "J1", "J2", 1000, 1, 100, 0, "cv").unwrap();
    wn.add_pipe("P2", "J1", "J2", 1000, 1, 100, 0, "Cv").unwrap();
    wn.add_pipe("P3", "J1", "J2", 1000, 1, 100, 0, "CLOSED").unwrap();

    assert_eq!(wn.check_valves().collect::<Vec<_>>(), vec!["P1", "P2"]);
    assert!(!wn.is_check_valve("P3"));

    wn.remove_pipe("P1").unwrap();
    assert!(!wn.is_check_valve("P1"));
    assert_eq!(wn.check_valves().collect::<Vec<_>>(), vec!["P2"]);
}

#[test]
fn valve_attributes() {
    let mut wn = WaterNetworkModel::new();
    wn.add_junction("J1", 0, None, 0).unwrap();
    wn.add_junction("J2", 0, None, 0).unwrap();
    wn.add_valve("V1", "J1", "J2", 0.3, ValveType::Fcv, 0.0, 0.05)
        .unwrap();

    let link = wn.get_link("V1").unwrap();
    assert_eq!(link.status(), LinkStatus::Active);
    let v = link.as_valve().unwrap();
    assert_eq!(v.valve_type, ValveType::Fcv);
    assert_eq!(v.setting, 0.05);
    assert_eq!(wn.num_valves(), 1);
}

#[test]
fn duplicate_names_per_namespace() {
    let mut wn = WaterNetworkModel::new();
    wn.add_junction("A", 0, None, 0).unwrap();
    wn.add_junction("B", 0, None, 0).unwrap();

    assert!(matches!(
        wn.add_tank("A", 0, 1, 0, 2, 5, 0),
        Err(ModelError::DuplicateName { kind: "node", .. })
    ));

    // Node and link namespaces are independent
    wn.add_pipe_default("A", "A", "B").unwrap();
    assert!(matches!(
        wn.add_pipe_default("A", "B", "A"),
        Err(ModelError::DuplicateName { kind: "link", .. })
    ));
    assert_eq!(wn.num_nodes(), 2);
    assert_eq!(wn.num_links(), 1);
}

#[test]
fn unknown_names_are_not_found() {
    let mut wn = WaterNetworkModel::new();
    assert!(matches!(
        wn.get_node("nope"),
        Err(ModelError::NotFound { kind: "node", .. })
    ));
    assert!(matches!(
        wn.get_link("nope"),
        Err(ModelError::NotFound { kind: "link", .. })
    ));
    assert!(matches!(
        wn.get_curve("nope"),
        Err(ModelError::NotFound { kind: "curve", .. })
    ));
    assert!(matches!(
        wn.remove_pipe("nope"),
        Err(ModelError::NotFound { .. })
    ));
    assert!(matches!(
        wn.remove_junction("nope"),
        Err(ModelError::NotFound { .. })
    ));
    assert!(matches!(
        wn.get_links_for_node("nope"),
        Err(ModelError::NotFound { .. })
    ));
}

#[test]
fn iteration_follows_insertion_order_and_restarts() {
    let mut wn = WaterNetworkModel::new();
    for name in ["J3", "J1", "J2"] {
        wn.add_junction(name, 0, None, 0).unwrap();
    }
    wn.add_reservoir("R1", 20, None).unwrap();
    wn.add_pipe_default("P2", "R1", "J3").unwrap();
    wn.add_pipe_default("P1", "J3", "J1").unwrap();

    let names: Vec<&str> = wn.nodes().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["J3", "J1", "J2", "R1"]);
    // A second pass yields the same sequence
    let again: Vec<&str> = wn.nodes().map(|(n, _)| n).collect();
    assert_eq!(names, again);

    let links: Vec<&str> = wn.links().map(|(n, _)| n).collect();
    assert_eq!(links, vec!["P2", "P1"]);

    let junctions: Vec<&str> = wn.junctions().map(|(n, _)| n).collect();
    assert_eq!(junctions, vec!["J3", "J1", "J2"]);
    assert_eq!(wn.reservoirs().count(), 1);
    assert_eq!(wn.pipes().count(), 2);
    assert_eq!(wn.pumps().count(), 0);
}

#[test]
fn incident_links_ignore_direction() {
    let mut wn = WaterNetworkModel::new();
    for name in ["J1", "J2", "J3", "J4"] {
        wn.add_junction(name, 0, None, 0).unwrap();
    }
    wn.add_pipe_default("p1", "J1", "J2").unwrap();
    wn.add_pipe_default("p2", "J3", "J1").unwrap();
    wn.add_pipe_default("p3", "J1", "J4").unwrap();
    wn.add_pipe_default("p4", "J3", "J4").unwrap();

    assert_eq!(wn.get_links_for_node("J1").unwrap(), vec!["p1", "p2", "p3"]);
    assert_eq!(wn.get_links_for_node("J4").unwrap(), vec!["p3", "p4"]);
}

#[test]
fn model_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WaterNetworkModel>();
}
