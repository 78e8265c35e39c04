//! Trajectory recording.
//!
//! Collects the per-iteration snapshots the network hands to its observer so
//! node movement can be plotted or animated by an external tool. The recorded
//! trajectory is written as a single JSON document.

use anyhow::Context;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::simulation::network::Network;
use crate::simulation::types::{NetworkSnapshot, NodeSnapshot};

#[derive(Debug, Default, Serialize)]
pub struct TrajectoryRecorder {
    /// Node positions before the first iteration.
    pub initial: Vec<NodeSnapshot>,
    /// One entry per completed iteration.
    pub steps: Vec<NetworkSnapshot>,
}

impl TrajectoryRecorder {
    /// Start a recording from the network's current (pre-run) positions.
    pub fn new(network: &Network) -> Self {
        Self {
            initial: network.nodes().iter().map(NodeSnapshot::from).collect(),
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, snapshot: &NetworkSnapshot) {
        self.steps.push(snapshot.clone());
    }

    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let file = File::create(path).with_context(|| format!("Failed to create trajectory file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .with_context(|| format!("Failed to write trajectory to {}", path.display()))?;
        log::info!("Wrote {} trajectory steps to {}", self.steps.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_initial_positions_and_every_step() {
        let mut network = Network::from_selector(3, "seismic", Some(12)).unwrap();
        let mut recorder = TrajectoryRecorder::new(&network);
        network.run_with_observer(4, |snapshot| recorder.record(snapshot));

        assert_eq!(recorder.initial.len(), 3);
        assert_eq!(recorder.steps.len(), 4);
        assert_eq!(recorder.steps[3].total_msgs, network.total_msgs());

        let path = std::env::temp_dir().join(format!("adhoc-sim-trajectory-{}.json", std::process::id()));
        recorder.write_json(&path).unwrap();
        let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(written["steps"].as_array().unwrap().len(), 4);
        assert_eq!(written["initial"][2]["node_id"], 2);
    }
}
