use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Deviation from 1.0 tolerated when checking that a CPT row is a
/// probability distribution.
pub const PROB_TOLERANCE: f64 = 1e-6;

/// One random variable of the network.
///
/// A node owns its finite domain, the ordered list of its parents, and its
/// conditional probability table. The CPT is keyed by the joint values of
/// the parents, in `parents` order (the empty key for a parentless node);
/// each entry maps the node's own values to probabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique name under which the network indexes this node.
    pub name: String,
    /// Possible values, in declaration order. The order is observable: it
    /// fixes output order and the branch order when summing out a hidden
    /// variable.
    pub values: Vec<String>,
    /// Parent names, in declaration order. The order fixes the CPT key
    /// layout.
    pub parents: Vec<String>,
    /// Conditional probability table: parent joint values -> own value ->
    /// probability.
    pub cpt: HashMap<Vec<String>, HashMap<String, f64>>,
}

impl Node {
    /// Create a node with the given domain and no parents or CPT rows.
    pub fn new(name: &str, values: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            values,
            parents: Vec::new(),
            cpt: HashMap::new(),
        }
    }

    /// True when the node has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Look up `P(self = value | parents = parent_assignment)`.
    ///
    /// The assignment must cover every parent; the caller guarantees this
    /// by assigning ancestors before descendants (topological order). A
    /// missing row or value is a lookup error, never a silent zero.
    pub fn probability(
        &self,
        value: &str,
        parent_assignment: &HashMap<String, String>,
    ) -> Result<f64> {
        let key: Vec<String> = self
            .parents
            .iter()
            .map(|p| {
                parent_assignment
                    .get(p)
                    .cloned()
                    .ok_or_else(|| Error::UnknownVariable(p.clone()))
            })
            .collect::<Result<_>>()?;

        self.cpt
            .get(&key)
            .and_then(|row| row.get(value))
            .copied()
            .ok_or_else(|| Error::CptLookup {
                node: self.name.clone(),
                parents: key.join(", "),
                value: value.to_string(),
            })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parents = if self.parents.is_empty() {
            "none".to_string()
        } else {
            self.parents.join(", ")
        };
        write!(
            f,
            "Node({}, values=[{}], parents={})",
            self.name,
            self.values.join(", "),
            parents
        )
    }
}
