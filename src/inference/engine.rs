//! Exact inference by enumeration (Russell & Norvig's ENUMERATION-ASK).
//!
//! The engine is a pure function over a validated [`Network`]: it walks
//! the variables in topological order, multiplies in the CPT factor of
//! every bound variable, and sums out each hidden variable by branching
//! over its domain. Cost is exponential in the number of hidden variables
//! (the product of their domain sizes); that is the accepted price of
//! exact enumeration and nothing here caches factors or eliminates
//! variables.

use crate::errors::{Error, Result};
use crate::inference::trace::{NullSink, TraceEvent, TraceSink};
use crate::network::Network;
use log::{debug, info};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// A normalized posterior distribution over one variable's domain.
///
/// Entries keep the variable's declared value order. Probabilities are
/// nonnegative and sum to 1 up to floating-point rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    entries: Vec<(String, f64)>,
}

impl Distribution {
    /// Probability of one value, or `None` for a value outside the domain.
    pub fn probability(&self, value: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, p)| *p)
    }

    /// `(value, probability)` pairs in domain order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(v, p)| (v.as_str(), *p))
    }

    /// The value with the highest posterior probability.
    pub fn most_likely(&self) -> Option<(&str, f64)> {
        self.entries
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(v, p)| (v.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Distribution {
    // Serialized as a map so JSON output reads {"yes": 0.52, ...} while
    // keeping domain order.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (value, prob) in &self.entries {
            map.serialize_entry(value, prob)?;
        }
        map.end()
    }
}

/// Compute `P(query | evidence)` over a validated network.
///
/// Evidence maps variable names to values; an entry naming a variable the
/// network does not contain is ignored. An evidence value outside its
/// variable's domain is not rejected up front — it surfaces as a
/// [`Error::CptLookup`] when the enumeration first needs that row.
pub fn ask(
    network: &Network,
    query: &str,
    evidence: &HashMap<String, String>,
) -> Result<Distribution> {
    ask_traced(network, query, evidence, &mut NullSink)
}

/// [`ask`], reporting every enumeration step to `sink`.
pub fn ask_traced(
    network: &Network,
    query: &str,
    evidence: &HashMap<String, String>,
    sink: &mut dyn TraceSink,
) -> Result<Distribution> {
    let query_node = network.node(query)?;
    let order = network.topological_order()?;

    info!(
        "asking P({} | {} evidence variable(s)) over {} nodes",
        query,
        evidence.len(),
        network.len()
    );
    sink.emit(&TraceEvent::QueryStart {
        variable: query.to_string(),
        evidence: {
            let mut pairs: Vec<_> = evidence
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            pairs.sort();
            pairs
        },
    });

    let mut raw: Vec<(String, f64)> = Vec::with_capacity(query_node.values.len());
    for value in &query_node.values {
        sink.emit(&TraceEvent::Candidate {
            variable: query.to_string(),
            value: value.clone(),
        });
        let mut assignment = evidence.clone();
        assignment.insert(query.to_string(), value.clone());
        let weight = enumerate(network, &order, &mut assignment, sink, 0)?;
        sink.emit(&TraceEvent::Weight {
            value: value.clone(),
            weight,
        });
        debug!("unnormalized weight for {}={}: {}", query, value, weight);
        raw.push((value.clone(), weight));
    }

    let total: f64 = raw.iter().map(|(_, w)| w).sum();
    if total == 0.0 {
        return Err(Error::ZeroEvidenceProbability);
    }

    Ok(Distribution {
        entries: raw.into_iter().map(|(v, w)| (v, w / total)).collect(),
    })
}

/// Joint weight of `assignment` over the variables in `order`.
///
/// This is the recursive core of the algorithm, public so that its
/// order-independence (the result does not depend on which valid
/// topological order is used) can be exercised directly. Variables bound
/// in `assignment` contribute their CPT factor; unbound ones are summed
/// out.
pub fn enumerate_all(
    network: &Network,
    order: &[String],
    assignment: &HashMap<String, String>,
) -> Result<f64> {
    let mut assignment = assignment.clone();
    enumerate(network, order, &mut assignment, &mut NullSink, 0)
}

fn enumerate(
    network: &Network,
    order: &[String],
    assignment: &mut HashMap<String, String>,
    sink: &mut dyn TraceSink,
    depth: usize,
) -> Result<f64> {
    let Some((current, rest)) = order.split_first() else {
        return Ok(1.0);
    };
    let node = network.node(current)?;

    if let Some(bound) = assignment.get(current).cloned() {
        let probability = node.probability(&bound, assignment)?;
        sink.emit(&TraceEvent::Observed {
            depth,
            variable: current.clone(),
            value: bound,
            probability,
        });
        return Ok(probability * enumerate(network, rest, assignment, sink, depth + 1)?);
    }

    sink.emit(&TraceEvent::HiddenStart {
        depth,
        variable: current.clone(),
        values: node.values.clone(),
    });
    let mut total = 0.0;
    for value in &node.values {
        let probability = node.probability(value, assignment)?;
        assignment.insert(current.clone(), value.clone());
        let subtotal = probability * enumerate(network, rest, assignment, sink, depth + 1)?;
        assignment.remove(current);
        total += subtotal;
        sink.emit(&TraceEvent::HiddenBranch {
            depth,
            variable: current.clone(),
            value: value.clone(),
            probability,
            subtotal,
        });
    }
    sink.emit(&TraceEvent::HiddenTotal {
        depth,
        variable: current.clone(),
        total,
    });
    Ok(total)
}
