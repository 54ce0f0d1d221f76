#[cfg(test)]
mod test_validation {
    use bayesnet::{Error, NetworkBuilder};
    use std::collections::HashMap;

    fn row(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(v, p)| (v.to_string(), *p)).collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn diamond_builder() -> NetworkBuilder {
        // A -> B, A -> C, B -> D, C -> D
        let mut builder = NetworkBuilder::new();
        builder.add_edge("A", "B");
        builder.add_edge("A", "C");
        builder.add_edge("B", "D");
        builder.add_edge("C", "D");
        for name in ["A", "B", "C", "D"] {
            builder.set_domain(name, strings(&["t", "f"]));
        }
        builder
            .set_cpt_row("A", vec![], row(&[("t", 0.5), ("f", 0.5)]))
            .unwrap();
        for name in ["B", "C"] {
            for parent in ["t", "f"] {
                builder
                    .set_cpt_row(name, strings(&[parent]), row(&[("t", 0.3), ("f", 0.7)]))
                    .unwrap();
            }
        }
        for key in [["t", "t"], ["t", "f"], ["f", "t"], ["f", "f"]] {
            builder
                .set_cpt_row("D", strings(&key), row(&[("t", 0.6), ("f", 0.4)]))
                .unwrap();
        }
        builder
    }

    #[test]
    fn test_topological_order_places_parents_first() {
        let network = diamond_builder().validate().unwrap();
        let order = network.topological_order().unwrap();
        let position: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();
        for (parent, child) in [("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")] {
            assert!(position[parent] < position[child], "{} before {}", parent, child);
        }
    }

    #[test]
    fn test_topological_order_follows_creation_order() {
        let network = diamond_builder().validate().unwrap();
        // A is the only root; B was declared before C.
        assert_eq!(
            network.topological_order().unwrap(),
            vec!["A", "B", "C", "D"]
        );
    }

    #[test]
    fn test_cycle_is_a_structural_error() {
        let mut builder = NetworkBuilder::new();
        builder.add_edge("A", "B");
        builder.add_edge("B", "C");
        builder.add_edge("C", "A");
        for name in ["A", "B", "C"] {
            builder.set_domain(name, strings(&["t", "f"]));
        }
        let err = builder.validate().unwrap_err();
        assert!(matches!(err, Error::CycleDetected));
    }

    #[test]
    fn test_row_sums_outside_tolerance_are_rejected() {
        for bad_sum in [0.9, 1.1] {
            let mut builder = NetworkBuilder::new();
            builder.set_domain("A", strings(&["t", "f"]));
            let err = builder
                .set_cpt_row("A", vec![], row(&[("t", bad_sum / 2.0), ("f", bad_sum / 2.0)]))
                .unwrap_err();
            assert!(matches!(err, Error::BadRowSum { .. }), "sum {}", bad_sum);
        }
    }

    #[test]
    fn test_row_sum_within_tolerance_is_accepted() {
        let mut builder = NetworkBuilder::new();
        builder.set_domain("A", strings(&["t", "f"]));
        builder
            .set_cpt_row("A", vec![], row(&[("t", 0.5), ("f", 0.5000005)]))
            .unwrap();
        builder.validate().unwrap();
    }

    #[test]
    fn test_missing_parent_combination_is_reported() {
        let mut builder = NetworkBuilder::new();
        builder.add_edge("A", "B");
        builder.set_domain("A", strings(&["t", "f"]));
        builder.set_domain("B", strings(&["t", "f"]));
        builder
            .set_cpt_row("A", vec![], row(&[("t", 0.5), ("f", 0.5)]))
            .unwrap();
        builder
            .set_cpt_row("B", strings(&["t"]), row(&[("t", 0.3), ("f", 0.7)]))
            .unwrap();
        // The ("f",) row is missing.
        let err = builder.validate().unwrap_err();
        assert!(matches!(err, Error::MissingCptRow { node, .. } if node == "B"));
    }

    #[test]
    fn test_missing_root_cpt_is_reported() {
        let mut builder = NetworkBuilder::new();
        builder.set_domain("A", strings(&["t", "f"]));
        let err = builder.validate().unwrap_err();
        assert!(matches!(err, Error::MissingRootCpt(node) if node == "A"));
    }

    #[test]
    fn test_undeclared_domain_is_reported() {
        let mut builder = NetworkBuilder::new();
        builder.add_edge("A", "B");
        let err = builder.validate().unwrap_err();
        assert!(matches!(err, Error::EmptyDomain(node) if node == "A"));
    }

    #[test]
    fn test_check_is_idempotent() {
        let network = diamond_builder().validate().unwrap();
        network.check().unwrap();
        network.check().unwrap();
        // The network is still queryable afterwards.
        bayesnet::ask(&network, "D", &HashMap::new()).unwrap();
    }
}
