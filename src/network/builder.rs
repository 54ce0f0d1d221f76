use crate::errors::{Error, Result};
use crate::network::graph::Network;
use crate::network::node::{Node, PROB_TOLERANCE};
use std::collections::HashMap;

/// Mutable construction phase of a [`Network`].
///
/// The loader feeds edges, domains, and CPT rows into a builder; once the
/// description is complete, [`validate`](NetworkBuilder::validate) checks
/// the whole network and yields the immutable `Network` used for
/// inference. Nodes are created lazily: the first edge or domain
/// declaration naming an unseen variable creates it with an empty domain,
/// and creation order is preserved (it decides topological tie-breaking).
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    net: Network,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self {
            net: Network::empty(),
        }
    }

    fn ensure_node(&mut self, name: &str) -> &mut Node {
        self.net
            .nodes
            .entry(name.to_string())
            .or_insert_with(|| Node::new(name, Vec::new()))
    }

    /// Record the dependency `parent -> child`, creating either endpoint
    /// if absent. Idempotent: a repeated edge is not recorded twice.
    pub fn add_edge(&mut self, parent: &str, child: &str) {
        self.ensure_node(parent);
        let child_node = self.ensure_node(child);
        if !child_node.parents.iter().any(|p| p == parent) {
            child_node.parents.push(parent.to_string());
        }

        let siblings = self.net.children.entry(parent.to_string()).or_default();
        if !siblings.iter().any(|c| c == child) {
            siblings.push(child.to_string());
        }
    }

    /// Declare (or replace) the domain of a node, creating it if absent.
    /// The given order is preserved and defines output and summation
    /// order.
    pub fn set_domain(&mut self, name: &str, values: Vec<String>) {
        self.ensure_node(name).values = values;
    }

    /// Store one CPT row for `name`, keyed by the parents' joint values in
    /// parent order (empty for a root). Rejects rows whose probabilities
    /// do not sum to 1 within tolerance; no auto-normalization.
    pub fn set_cpt_row(
        &mut self,
        name: &str,
        parent_values: Vec<String>,
        value_probs: HashMap<String, f64>,
    ) -> Result<()> {
        let sum: f64 = value_probs.values().sum();
        if (sum - 1.0).abs() > PROB_TOLERANCE {
            return Err(Error::BadRowSum {
                node: name.to_string(),
                parents: parent_values.join(", "),
                sum,
            });
        }
        let node = self
            .net
            .nodes
            .get_mut(name)
            .ok_or_else(|| Error::UnknownVariable(name.to_string()))?;
        node.cpt.insert(parent_values, value_probs);
        Ok(())
    }

    /// Check the full network and convert the builder into the immutable
    /// [`Network`]. Fails on a cycle, an undeclared domain, incomplete CPT
    /// coverage, or a row that does not sum to 1.
    pub fn validate(self) -> Result<Network> {
        self.net.check()?;
        Ok(self.net)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_is_idempotent() {
        let mut builder = NetworkBuilder::new();
        builder.add_edge("A", "B");
        builder.add_edge("A", "B");
        builder.set_domain("A", vec!["t".to_string(), "f".to_string()]);
        builder.set_domain("B", vec!["t".to_string(), "f".to_string()]);
        assert_eq!(builder.net.node("B").unwrap().parents, vec!["A"]);
        assert_eq!(builder.net.children_of("A"), ["B"]);
    }

    #[test]
    fn test_set_cpt_row_rejects_bad_sum() {
        let mut builder = NetworkBuilder::new();
        builder.set_domain("A", vec!["t".to_string(), "f".to_string()]);
        let row = HashMap::from([("t".to_string(), 0.5), ("f".to_string(), 0.4)]);
        let err = builder.set_cpt_row("A", Vec::new(), row).unwrap_err();
        assert!(matches!(err, Error::BadRowSum { .. }));
    }

    #[test]
    fn test_set_cpt_row_unknown_node() {
        let mut builder = NetworkBuilder::new();
        let row = HashMap::from([("t".to_string(), 1.0)]);
        let err = builder.set_cpt_row("Ghost", Vec::new(), row).unwrap_err();
        assert!(matches!(err, Error::UnknownVariable(name) if name == "Ghost"));
    }
}
