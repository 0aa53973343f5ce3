//! Game of Life simulation core

pub mod cell;
pub mod grid;
pub mod land;
pub mod pattern;
pub mod rules;
pub mod shared;

pub use cell::{Cell, CellState, Color};
pub use grid::CellGrid;
pub use land::{
    ColorPolicy, Land, LandBuilder, LandStats, ALIVE_PROBABILITY_ALL_ALIVE,
    ALIVE_PROBABILITY_ALL_DEAD, ALIVE_PROBABILITY_DEFAULT,
};
pub use pattern::{Pattern, PATTERN_NAMES};
pub use rules::{LifeRules, Transition};
pub use shared::SharedLand;
