//! Configuration management for the land simulation

pub mod settings;

pub use settings::{
    CliOverrides, ColorMode, LandConfig, OutputConfig, OutputFormat, Settings, SimulationConfig,
};
