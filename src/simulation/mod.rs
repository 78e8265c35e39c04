//! Network simulation core module.
//!
//! This module provides the time-stepped simulation of a mobile ad-hoc
//! network. It integrates:
//! - Pluggable mobility models producing per-step displacements
//! - A network of point nodes moved by one shared model
//! - All-pairs, range-based one-hop message delivery accounting
//!
//! ## Module Organization
//!
//! - `types`: Core data structures (Point, Node, snapshots)
//! - `geometry`: Distance and range helpers
//! - `mobility`: The mobility model trait, its six policies and their parameters
//! - `network`: The network owning nodes, model and counters, and the run loop

pub mod geometry;
pub mod mobility;
pub mod network;
pub mod types;

pub use mobility::{MobilityKind, MobilityModel, MobilityParams};
pub use network::Network;
pub use types::{Displacement, NetworkSnapshot, Node, Point};
