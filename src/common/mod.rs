//! Configuration shared by the simulation core and the command line driver.

pub mod config;

pub use config::{ConfigError, SimulationConfig, load_config};
