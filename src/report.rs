//! Run summary produced by the driver after a simulation completes.
//!
//! The network only counts messages; the delivery ratio is derived here and
//! is undefined (`None`) when no message was attempted, i.e. with at most one
//! node or zero iterations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::common::config::SimulationConfig;
use crate::simulation::network::Network;

/// Aggregate result of one simulation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RunReport {
    /// Wall-clock start of the run, RFC 3339.
    pub started_at: String,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: i64,
    pub config: SimulationConfig,
    pub delivered_msgs: u64,
    pub total_msgs: u64,
    pub delivery_ratio: Option<f64>,
}

/// `delivered / total`, or `None` when nothing was sent.
pub fn delivery_ratio(delivered_msgs: u64, total_msgs: u64) -> Option<f64> {
    if total_msgs == 0 {
        return None;
    }
    Some(delivered_msgs as f64 / total_msgs as f64)
}

impl RunReport {
    pub fn new(config: &SimulationConfig, network: &Network, started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> Self {
        Self {
            started_at: started_at.to_rfc3339(),
            elapsed_ms: (finished_at - started_at).num_milliseconds(),
            config: config.clone(),
            delivered_msgs: network.delivered_msgs(),
            total_msgs: network.total_msgs(),
            delivery_ratio: delivery_ratio(network.delivered_msgs(), network.total_msgs()),
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Delivered messages: {}", self.delivered_msgs)?;
        writeln!(f, "Total messages: {}", self.total_msgs)?;
        match self.delivery_ratio {
            Some(ratio) => write!(f, "Delivery ratio: {}", ratio),
            None => write!(f, "Delivery ratio: n/a (no messages sent)"),
        }
    }
}
