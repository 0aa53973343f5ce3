//! Command line driver for the land simulation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use golly_land::{
    config::{CliOverrides, OutputFormat, Settings},
    land_from_settings,
    simulation::{Land, Pattern, PATTERN_NAMES},
    utils::{ColorOutput, LandFormatter},
};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "golly-land")]
#[command(about = "Game of Life land simulator")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Visual,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Visual => OutputFormat::Visual,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a random land and advance it
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Land width (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Land height (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Probability that a cell starts alive (overrides config)
        #[arg(short, long)]
        probability: Option<f64>,

        /// Seed for the random source (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        generations: Option<usize>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Place a named pattern on a dead land and show how it evolves
    Pattern {
        /// Pattern name
        #[arg(short, long, default_value = "blinker")]
        name: String,

        /// Side length of the square land
        #[arg(long, default_value_t = 8)]
        size: isize,

        /// Number of generations
        #[arg(short, long, default_value_t = 4)]
        generations: usize,
    },

    /// Write a default configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(err) = dispatch(cli.command) {
        eprintln!("{}", failure_message(&err));
        std::process::exit(1);
    }
}

/// Render an error and its context chain for the terminal
fn failure_message(err: &anyhow::Error) -> String {
    ColorOutput::error(&format!("Error: {:#}", err))
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            config,
            width,
            height,
            probability,
            seed,
            generations,
            format,
        } => {
            let overrides = CliOverrides {
                width,
                height,
                alive_probability: probability,
                seed,
                generations,
                format: format.map(OutputFormat::from),
            };
            run_command(&config, &overrides)
        }
        Commands::Pattern {
            name,
            size,
            generations,
        } => pattern_command(&name, size, generations),
        Commands::Setup { directory, force } => setup_command(&directory, force),
    }
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        info!("Config file {} not found, using defaults", config_path.display());
        Ok(Settings::default())
    }
}

fn run_command(config_path: &Path, overrides: &CliOverrides) -> Result<()> {
    let mut settings = load_settings(config_path)?;
    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    debug!("Settings: {:?}", settings);

    let mut land = land_from_settings(&settings).context("Failed to build land")?;
    let policy = settings.simulation.color_mode.policy(settings.simulation.palette_color);
    let format = settings.output.format;

    println!("{}", LandFormatter::format_day(&land, format)?);

    let start_time = Instant::now();
    for day in 1..=settings.simulation.generations {
        land.advance(policy);
        if day % settings.output.show_every == 0 || day == settings.simulation.generations {
            println!("{}", LandFormatter::format_day(&land, format)?);
        }
    }

    info!(
        "Advanced {} generations of a {}x{} land in {:.3}s",
        settings.simulation.generations,
        land.width(),
        land.height(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn pattern_command(name: &str, size: isize, generations: usize) -> Result<()> {
    let pattern = Pattern::named(name)
        .with_context(|| format!("Known patterns: {}", PATTERN_NAMES.join(", ")))?;

    let mut land = Land::square(size, 0.0).context("Failed to build land")?;
    let origin_x = (size - pattern.width() as isize) / 2;
    let origin_y = (size - pattern.height() as isize) / 2;
    land.place_pattern(origin_x, origin_y, &pattern)
        .with_context(|| format!("Pattern '{}' does not fit a {}x{} land", name, size, size))?;

    println!("{}", ColorOutput::info(&format!("Pattern '{}':", name)));
    println!("{}", LandFormatter::format_day(&land, OutputFormat::Visual)?);
    for _ in 0..generations {
        land.step();
        println!("{}", LandFormatter::format_day(&land, OutputFormat::Visual)?);
    }
    Ok(())
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    let config_path = directory.join("config/default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("{}", ColorOutput::success(&format!("Created: {}", config_path.display())));
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!("Skipped: {} (already exists)", config_path.display()))
        );
    }
    Ok(())
}
