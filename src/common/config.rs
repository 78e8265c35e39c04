//! Simulation configuration loading, parsing, and validation.
//!
//! A configuration file is TOML (`.toml`) or JSON (anything else) and may
//! omit any field; omitted fields take the illustrative defaults of the
//! chosen mobility model. Example:
//!
//! ```toml
//! node-count = 20
//! iterations = 50
//! transmission-range = 10.0
//! seed = 42
//!
//! [mobility]
//! type = "wind-drift"
//! wind-speed = 4.0
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::simulation::mobility::{DEFAULT_TRANSMISSION_RANGE, MobilityKind, MobilityParams};

/// Error type for configuration failures. Any of these aborts before a
/// network is built.
#[derive(Debug)]
pub enum ConfigError {
    UnknownMobilityModel(String),
    InvalidParameter(String),
    FileReadError(String),
    ParseError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UnknownMobilityModel(name) => write!(
                f,
                "Unknown mobility model '{}': use random-walk, gauss-markov, landmark, wind-drift, directed-random-walk, or seismic",
                name
            ),
            ConfigError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            ConfigError::FileReadError(msg) => write!(f, "Failed to read file: {}", msg),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Mobility section of the configuration: a selector plus optional
/// per-model parameters. Parameters that do not belong to the selected
/// model are ignored; keys that belong to no model are a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct MobilitySection {
    /// Model selector, written `type` (`model` is accepted too).
    #[serde(rename = "type", alias = "model")]
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_step_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_landmarks: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark_range: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_dir: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
}

impl Default for MobilitySection {
    fn default() -> Self {
        Self::for_model(MobilityKind::Seismic)
    }
}

impl MobilitySection {
    /// Section selecting `kind` with every parameter left at its default.
    pub fn for_model(kind: MobilityKind) -> Self {
        Self {
            model: kind.as_str().to_string(),
            max_step_size: None,
            alpha: None,
            beta: None,
            num_landmarks: None,
            landmark_range: None,
            wind_speed: None,
            wind_dir: None,
            max_speed: None,
            magnitude: None,
        }
    }

    pub fn kind(&self) -> Result<MobilityKind, ConfigError> {
        self.model.parse()
    }

    /// Resolve the selector and merge the given parameters over the model's
    /// defaults.
    pub fn params(&self) -> Result<MobilityParams, ConfigError> {
        let params = match MobilityParams::defaults(self.kind()?) {
            MobilityParams::RandomWalk { max_step_size } => MobilityParams::RandomWalk {
                max_step_size: self.max_step_size.unwrap_or(max_step_size),
            },
            MobilityParams::GaussMarkov { alpha, beta } => MobilityParams::GaussMarkov {
                alpha: self.alpha.unwrap_or(alpha),
                beta: self.beta.unwrap_or(beta),
            },
            MobilityParams::Landmark {
                num_landmarks,
                landmark_range,
            } => MobilityParams::Landmark {
                num_landmarks: self.num_landmarks.unwrap_or(num_landmarks),
                landmark_range: self.landmark_range.unwrap_or(landmark_range),
            },
            MobilityParams::WindDrift {
                wind_speed,
                wind_dir,
                max_step_size,
            } => MobilityParams::WindDrift {
                wind_speed: self.wind_speed.unwrap_or(wind_speed),
                wind_dir: self.wind_dir.unwrap_or(wind_dir),
                max_step_size: self.max_step_size.unwrap_or(max_step_size),
            },
            MobilityParams::DirectedRandomWalk { max_speed } => MobilityParams::DirectedRandomWalk {
                max_speed: self.max_speed.unwrap_or(max_speed),
            },
            MobilityParams::Seismic { magnitude } => MobilityParams::Seismic {
                magnitude: self.magnitude.unwrap_or(magnitude),
            },
        };
        Ok(params)
    }
}

/// Root structure of a simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of nodes placed in the world.
    pub node_count: usize,
    /// Number of movement + delivery iterations to run.
    pub iterations: u64,
    /// Inclusive reachability radius shared by all nodes.
    pub transmission_range: f64,
    /// RNG seed. When absent the run is seeded from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub mobility: MobilitySection,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            node_count: 20,
            iterations: 50,
            transmission_range: DEFAULT_TRANSMISSION_RANGE,
            seed: None,
            mobility: MobilitySection::default(),
        }
    }
}

impl SimulationConfig {
    /// Validate the whole configuration and return the resolved mobility
    /// parameters.
    pub fn validate(&self) -> Result<MobilityParams, ConfigError> {
        const MAX_NODES: usize = u32::MAX as usize;

        if self.node_count == 0 {
            return Err(ConfigError::InvalidParameter("node-count must be at least 1".to_string()));
        }
        if self.node_count > MAX_NODES {
            return Err(ConfigError::InvalidParameter(format!(
                "node-count {} exceeds maximum of {}",
                self.node_count, MAX_NODES
            )));
        }

        let params = self.mobility.params()?;
        params.validate(self.transmission_range)?;
        Ok(params)
    }
}

/// Load and parse a configuration from a file.
///
/// The format is picked from the extension: `.toml` is TOML, everything else
/// is parsed as JSON. The result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<SimulationConfig, ConfigError> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("{}", path.display()))
        .map_err(|e| ConfigError::FileReadError(format!("{:#}", e)))?;

    let is_toml = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let config = if is_toml { parse_toml(&data)? } else { parse_json(&data)? };

    config.validate()?;
    Ok(config)
}

pub fn parse_toml(data: &str) -> Result<SimulationConfig, ConfigError> {
    toml::from_str(data).map_err(|e| ConfigError::ParseError(e.to_string()))
}

pub fn parse_json(data: &str) -> Result<SimulationConfig, ConfigError> {
    serde_json::from_str::<SimulationConfig>(data)
        .context("Invalid JSON format")
        .map_err(|e| ConfigError::ParseError(format!("{:#}", e)))
}
