//! Integration tests for wn-components: building elements the way a network
//! model does and reading them back through the shared surfaces.

use wn_components::{
    Curve, CurveType, HeadCurveCoefficients, Junction, Link, LinkAttribute, LinkKind, LinkStatus,
    LinkType, Node, NodeAttribute, NodeKind, NodeType, Pipe, Pump, PumpType, Reservoir, Tank,
    Valve, ValveType,
};

#[test]
fn node_surface_covers_every_kind() {
    let nodes = vec![
        Node::new("J1", NodeKind::Junction(Junction::new(10.0, 0.02, None).unwrap())),
        Node::new(
            "T1",
            NodeKind::Tank(Tank::new(40.0, 3.0, 1.0, 6.0, 12.0, 0.0).unwrap()),
        ),
        Node::new("R1", NodeKind::Reservoir(Reservoir::new(55.0, None).unwrap())),
    ];

    let types: Vec<NodeType> = nodes.iter().map(Node::node_type).collect();
    assert_eq!(
        types,
        vec![NodeType::Junction, NodeType::Tank, NodeType::Reservoir]
    );

    let elevations: Vec<f64> = nodes.iter().map(Node::elevation).collect();
    assert_eq!(elevations, vec![10.0, 40.0, 55.0]);

    // Diameter only exists on the tank
    let diameters: Vec<Option<f64>> = nodes
        .iter()
        .map(|n| n.attribute(NodeAttribute::Diameter))
        .collect();
    assert_eq!(diameters, vec![None, Some(12.0), None]);

    let tank = nodes[1].as_tank().unwrap();
    assert!((tank.area() - std::f64::consts::PI * 36.0).abs() < 1e-9);
}

#[test]
fn link_surface_covers_every_kind() {
    let pipe = Pipe::new(304.8, 0.3048, 100.0, 0.0, LinkStatus::Open).unwrap();
    let coeffs = HeadCurveCoefficients {
        a: 80.0 / 3.0,
        b: 20.0 / 300.0,
        c: 2.0,
    };
    let links = vec![
        Link::new("P1", "R1", "J1", LinkKind::Pipe(pipe)),
        Link::new("PU1", "J1", "J2", LinkKind::Pump(Pump::head("C1", coeffs))),
        Link::new(
            "PU2",
            "J2",
            "J3",
            LinkKind::Pump(Pump::constant_power(50.0).unwrap()),
        ),
        Link::new(
            "V1",
            "J3",
            "T1",
            LinkKind::Valve(Valve::new(0.2, ValveType::Prv, 0.0, 30.0).unwrap()),
        ),
    ];

    let types: Vec<LinkType> = links.iter().map(Link::link_type).collect();
    assert_eq!(
        types,
        vec![LinkType::Pipe, LinkType::Pump, LinkType::Pump, LinkType::Valve]
    );

    let statuses: Vec<LinkStatus> = links.iter().map(Link::status).collect();
    assert_eq!(
        statuses,
        vec![
            LinkStatus::Open,
            LinkStatus::Open,
            LinkStatus::Open,
            LinkStatus::Active
        ]
    );

    let pump_types: Vec<PumpType> = links
        .iter()
        .filter_map(Link::as_pump)
        .map(Pump::pump_type)
        .collect();
    assert_eq!(pump_types, vec![PumpType::Head, PumpType::Power]);

    assert_eq!(links[2].attribute(LinkAttribute::Power), Some(50.0));
    assert_eq!(links[1].attribute(LinkAttribute::Power), None);
    assert_eq!(links[3].attribute(LinkAttribute::Diameter), Some(0.2));
}

#[test]
fn status_strings_round_through_display() {
    for s in ["OPEN", "CLOSED", "ACTIVE", "CV"] {
        let status: LinkStatus = s.parse().unwrap();
        assert_eq!(status.to_string(), s);
    }
    assert_eq!(" open ".parse::<LinkStatus>(), Ok(LinkStatus::Open));
}

#[test]
fn curves_keep_type_and_points() {
    let curve = Curve::new(
        "C1",
        "head".parse().unwrap(),
        vec![(0.0, 35.0), (10.0, 20.0), (18.0, 2.0)],
    )
    .unwrap();
    assert_eq!(curve.curve_type(), CurveType::Head);
    assert_eq!(curve.num_points(), 3);
    assert_eq!(curve.points()[1], (10.0, 20.0));
}

#[test]
fn elements_serialize_with_serde_derives() {
    // The derives are what the network config layer relies on.
    fn assert_serde<T: serde::Serialize + serde::de::DeserializeOwned>() {}
    assert_serde::<Node>();
    assert_serde::<Link>();
    assert_serde::<Curve>();
}
