//! Network-wide attribute queries.

use wn_components::{LinkAttribute, NodeAttribute};

use crate::model::WaterNetworkModel;

impl WaterNetworkModel {
    /// `(name, value)` for every node carrying `attr`, in insertion order.
    pub fn query_node_attribute(&self, attr: NodeAttribute) -> Vec<(String, f64)> {
        self.nodes()
            .filter_map(|(name, node)| node.attribute(attr).map(|v| (name.to_string(), v)))
            .collect()
    }

    /// `(name, value)` for every link carrying `attr`, in insertion order.
    pub fn query_link_attribute(&self, attr: LinkAttribute) -> Vec<(String, f64)> {
        self.links()
            .filter_map(|(name, link)| link.attribute(attr).map(|v| (name.to_string(), v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wn_components::ValveType;

    #[test]
    fn only_carriers_are_reported() {
        let mut wn = WaterNetworkModel::new();
        wn.add_junction("J1", 0.0, None, 10.0).unwrap();
        wn.add_reservoir("R1", 40.0, None).unwrap();
        wn.add_tank("T1", 25.0, 2.0, 1.0, 5.0, 8.0, 0.0).unwrap();
        wn.add_junction("J2", 0.0, None, 12.0).unwrap();

        assert_eq!(
            wn.query_node_attribute(NodeAttribute::Elevation),
            vec![
                ("J1".to_string(), 10.0),
                ("T1".to_string(), 25.0),
                ("J2".to_string(), 12.0)
            ]
        );
        assert_eq!(
            wn.query_node_attribute(NodeAttribute::BaseHead),
            vec![("R1".to_string(), 40.0)]
        );

        wn.add_pipe("P1", "R1", "J1", 1000, 0.4, 100, 0, "OPEN").unwrap();
        wn.add_valve("V1", "J1", "J2", 0.2, ValveType::Prv, 0.0, 30.0)
            .unwrap();
        assert_eq!(
            wn.query_link_attribute(LinkAttribute::Diameter),
            vec![("P1".to_string(), 0.4), ("V1".to_string(), 0.2)]
        );
        assert_eq!(
            wn.query_link_attribute(LinkAttribute::Setting),
            vec![("V1".to_string(), 30.0)]
        );
    }
}
