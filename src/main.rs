use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, error, info};
use std::path::PathBuf;

use adhoc_mobility_simulator::common::config::{MobilitySection, SimulationConfig, load_config};
use adhoc_mobility_simulator::report::RunReport;
use adhoc_mobility_simulator::simulation::{MobilityKind, Network};
use adhoc_mobility_simulator::trajectory::TrajectoryRecorder;

#[derive(Parser, Debug)]
#[command(name = "adhoc-sim", version, about = "Mobile ad-hoc network delivery-ratio simulator")]
struct Cli {
    /// Configuration file (.toml, otherwise JSON). Command-line values override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of nodes
    #[arg(short, long)]
    nodes: Option<usize>,

    /// Number of iterations to run (0 is a valid no-op run)
    #[arg(short, long)]
    iterations: Option<u64>,

    /// Mobility model: random-walk, gauss-markov, landmark, wind-drift,
    /// directed-random-walk, seismic
    #[arg(short, long)]
    model: Option<String>,

    /// Transmission range shared by all nodes
    #[arg(short, long = "transmission-range")]
    transmission_range: Option<f64>,

    /// RNG seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write per-iteration node positions to this JSON file
    #[arg(long)]
    trajectory: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging for the simulator
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Merge command-line overrides into the file (or default) configuration.
    fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path).with_context(|| format!("Loading configuration {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(nodes) = self.nodes {
            config.node_count = nodes;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(range) = self.transmission_range {
            config.transmission_range = range;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(model) = &self.model {
            let kind: MobilityKind = model.parse()?;
            // A different model does not inherit the file's parameters
            if config.mobility.kind().ok() != Some(kind) {
                config.mobility = MobilitySection::for_model(kind);
            }
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    info!(
        "Simulating {} nodes, {} mobility, {} iterations, transmission range {}",
        config.node_count, config.mobility.model, config.iterations, config.transmission_range
    );

    let mut network = Network::from_config(&config)?;
    let started_at = Utc::now();

    match &cli.trajectory {
        Some(path) => {
            let mut recorder = TrajectoryRecorder::new(&network);
            network.run_with_observer(config.iterations, |snapshot| recorder.record(snapshot));
            recorder.write_json(path)?;
        }
        None => network.run(config.iterations),
    }

    let report = RunReport::new(&config, &network, started_at, Utc::now());
    info!(
        "Finished in {} ms: {} of {} messages delivered",
        report.elapsed_ms, report.delivered_msgs, report.total_msgs
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report).context("Serializing report")?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Logging setup
    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter(Some("adhoc_sim"), level)
        .filter(Some("adhoc_mobility_simulator"), level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
