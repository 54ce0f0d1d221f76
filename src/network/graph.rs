use crate::errors::{Error, Result};
use crate::network::node::{Node, PROB_TOLERANCE};
use indexmap::IndexMap;
use log::debug;
use std::collections::{HashMap, VecDeque};

/// A validated discrete Bayesian network.
///
/// The network owns its nodes and the derived parent -> children adjacency.
/// Nodes iterate in creation order, which makes the topological order (and
/// everything printed from it) deterministic. Instances are produced by
/// [`crate::network::NetworkBuilder::validate`] and are read-only from
/// there on: inference never mutates the network, so a shared reference
/// can serve concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub(crate) nodes: IndexMap<String, Node>,
    pub(crate) children: HashMap<String, Vec<String>>,
}

impl Network {
    pub(crate) fn empty() -> Self {
        Self {
            nodes: IndexMap::new(),
            children: HashMap::new(),
        }
    }

    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Result<&Node> {
        self.nodes
            .get(name)
            .ok_or_else(|| Error::UnknownVariable(name.to_string()))
    }

    /// True when a node with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Number of nodes in the network.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node names in creation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Names of the children of `name`, in edge-insertion order.
    pub fn children_of(&self, name: &str) -> &[String] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of the parentless nodes, in creation order.
    pub fn roots(&self) -> Vec<&str> {
        self.nodes
            .values()
            .filter(|node| node.is_root())
            .map(|node| node.name.as_str())
            .collect()
    }

    /// Compute a topological order of the nodes with Kahn's algorithm.
    ///
    /// Roots enter the queue in creation order and children in stored edge
    /// order, so the result is deterministic for a given construction
    /// sequence. It is *a* valid order, not necessarily the only one.
    pub fn topological_order(&self) -> Result<Vec<String>> {
        let mut in_degree: IndexMap<&str, usize> = self
            .nodes
            .iter()
            .map(|(name, node)| (name.as_str(), node.parents.len()))
            .collect();

        let mut queue: VecDeque<&str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(name, _)| *name)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(current) = queue.pop_front() {
            order.push(current.to_string());
            for child in self.children_of(current) {
                let degree = in_degree
                    .get_mut(child.as_str())
                    .ok_or_else(|| Error::UnknownVariable(child.clone()))?;
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(child);
                }
            }
        }

        if order.len() != self.nodes.len() {
            return Err(Error::CycleDetected);
        }
        debug!("topological order: {}", order.join(" -> "));
        Ok(order)
    }

    /// Verify that the network is complete and consistent.
    ///
    /// Checks, for every node: that a domain was declared; that the CPT
    /// covers the full Cartesian product of the parents' domains (or has
    /// the empty-tuple row for a root); and that every stored row sums
    /// to 1 within tolerance. Rows are re-checked even though
    /// `set_cpt_row` already gated them, since the table may also be
    /// populated directly.
    ///
    /// The check is side-effect-free and idempotent; the first violation
    /// found is returned.
    pub fn check(&self) -> Result<()> {
        self.topological_order()?;

        for (name, node) in &self.nodes {
            if node.values.is_empty() {
                return Err(Error::EmptyDomain(name.clone()));
            }

            if node.is_root() {
                if !node.cpt.contains_key(&Vec::new()) {
                    return Err(Error::MissingRootCpt(name.clone()));
                }
            } else {
                for key in self.parent_combinations(node)? {
                    if !node.cpt.contains_key(&key) {
                        return Err(Error::MissingCptRow {
                            node: name.clone(),
                            parents: key.join(", "),
                        });
                    }
                }
            }

            for (key, row) in &node.cpt {
                let sum: f64 = row.values().sum();
                if (sum - 1.0).abs() > PROB_TOLERANCE {
                    return Err(Error::BadRowSum {
                        node: name.clone(),
                        parents: key.join(", "),
                        sum,
                    });
                }
            }
        }
        Ok(())
    }

    /// Cartesian product of the parents' domains, in parent-declaration
    /// order with each parent's values in its declared order.
    fn parent_combinations(&self, node: &Node) -> Result<Vec<Vec<String>>> {
        let mut combinations: Vec<Vec<String>> = vec![Vec::new()];
        for parent_name in &node.parents {
            let parent = self.node(parent_name)?;
            let mut extended = Vec::with_capacity(combinations.len() * parent.values.len());
            for combination in &combinations {
                for value in &parent.values {
                    let mut next = combination.clone();
                    next.push(value.clone());
                    extended.push(next);
                }
            }
            combinations = extended;
        }
        Ok(combinations)
    }
}
