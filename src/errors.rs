//! Error types for network construction, validation, and inference.

use thiserror::Error;

/// Errors raised while loading, validating, or querying a Bayesian network.
///
/// The variants fall into the layers of the pipeline: `Format` comes from
/// the text-file loader, `BadRowSum` from probability checks, `EmptyDomain`
/// / `MissingCptRow` / `MissingRootCpt` / `CycleDetected` from structural
/// validation, and `CptLookup` / `ZeroEvidenceProbability` from inference.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed line in a structure or CPT file.
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    /// A CPT row's probabilities do not sum to 1 within tolerance.
    #[error("CPT row for node {node} with parent values ({parents}) does not sum to 1 (sum={sum:.6})")]
    BadRowSum {
        node: String,
        parents: String,
        sum: f64,
    },

    /// A node was referenced before any domain was declared for it.
    #[error("node {0} has no declared domain")]
    EmptyDomain(String),

    /// Validation found a parent-value combination with no CPT row.
    #[error("missing CPT entry for node {node} with parent values ({parents})")]
    MissingCptRow { node: String, parents: String },

    /// A parentless node has no row keyed by the empty tuple.
    #[error("missing CPT for root node {0}")]
    MissingRootCpt(String),

    /// The parent/child relation is not a DAG.
    #[error("cycle detected: the network is not a directed acyclic graph")]
    CycleDetected,

    /// A name does not refer to any node in the network.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    /// A CPT lookup at inference time missed its row or value. After a
    /// successful validation this means an evidence value outside the
    /// variable's declared domain.
    #[error("missing CPT entry for node {node}: parent values ({parents}), value '{value}'")]
    CptLookup {
        node: String,
        parents: String,
        value: String,
    },

    /// The evidence assignment has zero joint probability under the model,
    /// so the posterior cannot be normalized.
    #[error("evidence has zero total probability; the observations are inconsistent with the network")]
    ZeroEvidenceProbability,
}

pub type Result<T> = std::result::Result<T, Error>;
