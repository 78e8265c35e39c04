//! Mobile ad-hoc network simulator.
//!
//! Nodes move over a 2-D plane under a pluggable mobility model and exchange
//! one-hop messages whose delivery depends only on distance versus a
//! transmission range. A run reports how many of the attempted messages were
//! delivered.

pub mod common;
pub mod report;
pub mod simulation;
pub mod trajectory;

pub use common::{ConfigError, SimulationConfig};
pub use report::RunReport;
pub use simulation::{MobilityKind, Network};
