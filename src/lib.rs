//! Game of Life land simulation
//!
//! A fixed-size grid of cells seeded at random and advanced one generation at
//! a time under the classic B3/S23 rule, with running alive/dead and day
//! aggregates for a presentation layer to read.

pub mod config;
pub mod error;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::{LandError, LandResult};
pub use simulation::{Cell, CellState, Color, ColorPolicy, Land, LandStats, Pattern, SharedLand};

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Build a land from settings, honoring a fixed seed when one is configured
pub fn land_from_settings(settings: &Settings) -> Result<Land> {
    settings.validate()?;
    let builder = Land::builder(settings.land.width as isize, settings.land.height as isize)
        .alive_probability(settings.land.alive_probability)
        .palette_color(settings.simulation.palette_color);

    let land = match settings.land.seed {
        Some(seed) => builder.build_with_rng(&mut StdRng::seed_from_u64(seed))?,
        None => builder.build()?,
    };
    Ok(land)
}
