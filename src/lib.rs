#[macro_use]
pub mod common;
pub mod display;
pub mod errors;
pub mod inference;
pub mod loader;
pub mod network;

pub use errors::{Error, Result};
pub use inference::{ask, ask_traced, Distribution};
pub use network::{Network, NetworkBuilder, Node};
