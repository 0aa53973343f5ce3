//! The atomic simulation unit

use serde::{Deserialize, Serialize};
use std::fmt;

/// Life state of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    /// Contribution of this state to a neighbor count
    #[inline]
    pub fn weight(self) -> u8 {
        match self {
            CellState::Alive => 1,
            CellState::Dead => 0,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// Opaque display attribute, a packed ARGB value
///
/// The simulation never reads it; it only rides along with the cell so a
/// renderer can paint it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const BLACK: Color = Color(0xFF00_0000);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn argb(self) -> u32 {
        self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

/// A binary life state plus its display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    state: CellState,
    color: Color,
}

impl Cell {
    pub fn new(state: CellState, color: Color) -> Self {
        Self { state, color }
    }

    pub fn dead(color: Color) -> Self {
        Self::new(CellState::Dead, color)
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    pub fn alive(&mut self) {
        self.state = CellState::Alive;
    }

    pub fn die(&mut self) {
        self.state = CellState::Dead;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alive_and_die_are_idempotent() {
        let mut cell = Cell::dead(Color::BLACK);
        cell.alive();
        cell.alive();
        assert_eq!(cell.state(), CellState::Alive);

        cell.die();
        cell.die();
        assert!(cell.is_dead());
    }

    #[test]
    fn test_color_does_not_touch_state() {
        let mut cell = Cell::new(CellState::Alive, Color::WHITE);
        cell.set_color(Color::from_rgb(0x12, 0x34, 0x56));
        assert_eq!(cell.color(), Color(0xFF12_3456));
        assert!(cell.is_alive());
    }

    #[test]
    fn test_state_weight() {
        assert_eq!(CellState::Alive.weight(), 1);
        assert_eq!(CellState::Dead.weight(), 0);
        assert_eq!(CellState::from(true), CellState::Alive);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::from_rgb(255, 0, 128).to_string(), "#FFFF0080");
    }
}
