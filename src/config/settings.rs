//! Configuration settings for the land simulation

use crate::simulation::{Color, ColorPolicy, ALIVE_PROBABILITY_DEFAULT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub land: LandConfig,
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandConfig {
    pub width: usize,
    pub height: usize,
    pub alive_probability: f64,
    /// Fixed seed for reproducible runs; entropy is used when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub generations: usize,
    pub color_mode: ColorMode,
    pub palette_color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    Repaint,
    Preserve,
}

impl ColorMode {
    pub fn policy(self, palette_color: Color) -> ColorPolicy {
        match self {
            ColorMode::Repaint => ColorPolicy::Repaint(palette_color),
            ColorMode::Preserve => ColorPolicy::Preserve,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Print every Nth day
    pub show_every: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            land: LandConfig {
                width: 32,
                height: 32,
                alive_probability: ALIVE_PROBABILITY_DEFAULT,
                seed: None,
            },
            simulation: SimulationConfig {
                generations: 10,
                color_mode: ColorMode::Repaint,
                palette_color: Color::default(),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                show_every: 1,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.land.alive_probability) {
            anyhow::bail!(
                "Alive probability must be within [0, 1], got {}",
                self.land.alive_probability
            );
        }

        if isize::try_from(self.land.width).is_err() || isize::try_from(self.land.height).is_err() {
            anyhow::bail!("Land dimensions {}x{} are too large", self.land.width, self.land.height);
        }

        if self.output.show_every == 0 {
            anyhow::bail!("show_every must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.land.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.land.height = height;
        }
        if let Some(probability) = cli_overrides.alive_probability {
            self.land.alive_probability = probability;
        }
        if let Some(seed) = cli_overrides.seed {
            self.land.seed = Some(seed);
        }
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub alive_probability: Option<f64>,
    pub seed: Option<u64>,
    pub generations: Option<usize>,
    pub format: Option<OutputFormat>,
}
