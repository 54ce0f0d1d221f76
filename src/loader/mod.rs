//! Text-file loading of network structure and CPTs.
//!
//! Two line-oriented formats feed a [`NetworkBuilder`]: a structure file
//! of `Parent -> Child` edges and a CPT file of per-node blocks. Loading
//! aborts on the first malformed line; there is no partial-network
//! recovery.

pub mod cpt;
pub mod structure;

pub use cpt::parse_cpts;
pub use structure::parse_structure;

use crate::network::{Network, NetworkBuilder};
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

/// Read a structure file and a CPT file, build the network, and validate
/// it. Called once per load; the returned network is ready for queries.
pub fn load_files(structure_path: &Path, cpt_path: &Path) -> Result<Network> {
    let mut builder = NetworkBuilder::new();

    info!("loading structure from {}", structure_path.display());
    let text = fs::read_to_string(structure_path)
        .with_context(|| format!("failed to read structure file {}", structure_path.display()))?;
    parse_structure(&text, &mut builder)
        .with_context(|| format!("in structure file {}", structure_path.display()))?;

    info!("loading CPTs from {}", cpt_path.display());
    let text = fs::read_to_string(cpt_path)
        .with_context(|| format!("failed to read CPT file {}", cpt_path.display()))?;
    parse_cpts(&text, &mut builder)
        .with_context(|| format!("in CPT file {}", cpt_path.display()))?;

    info!("validating network structure and probabilities");
    let network = builder.validate()?;
    info!("network loaded and validated: {} node(s)", network.len());
    Ok(network)
}
