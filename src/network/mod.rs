pub mod builder;
pub mod graph;
pub mod node;

pub use builder::NetworkBuilder;
pub use graph::Network;
pub use node::{Node, PROB_TOLERANCE};
