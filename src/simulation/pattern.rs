//! Text patterns for stamping known shapes onto a land

use crate::error::{LandError, LandResult};

/// A rectangular arrangement of alive and dead cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

/// Names accepted by [`Pattern::named`]
pub const PATTERN_NAMES: [&str; 4] = ["blinker", "block", "glider", "beacon"];

impl Pattern {
    /// Parse a pattern from text.
    /// Each non-empty line is a row; `1` or `#` is alive, `0` or `.` is dead.
    pub fn parse(content: &str) -> LandResult<Self> {
        let lines: Vec<&str> = content
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            return Err(LandError::invalid("Pattern is empty or contains no valid rows"));
        }

        let width = lines[0].chars().count();
        let height = lines.len();
        let mut cells = Vec::with_capacity(width * height);

        for (row_idx, line) in lines.iter().enumerate() {
            let row_len = line.chars().count();
            if row_len != width {
                return Err(LandError::invalid(format!(
                    "Row {} has length {}, expected {} (all rows must have the same length)",
                    row_idx, row_len, width
                )));
            }

            for (col_idx, ch) in line.chars().enumerate() {
                match ch {
                    '1' | '#' => cells.push(true),
                    '0' | '.' => cells.push(false),
                    _ => {
                        return Err(LandError::invalid(format!(
                            "Invalid character '{}' at position ({}, {})",
                            ch, col_idx, row_idx
                        )))
                    }
                }
            }
        }

        Ok(Self { width, height, cells })
    }

    /// One of the built-in patterns
    pub fn named(name: &str) -> LandResult<Self> {
        let content = match name.to_ascii_lowercase().as_str() {
            // vertical period-2 oscillator
            "blinker" => "010\n010\n010\n",
            "block" => "11\n11\n",
            "glider" => "010\n001\n111\n",
            "beacon" => "1100\n1100\n0011\n0011\n",
            other => {
                return Err(LandError::invalid(format!(
                    "Unknown pattern '{}', expected one of: {}",
                    other,
                    PATTERN_NAMES.join(", ")
                )))
            }
        };
        Self::parse(content)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Every position in the pattern with its state, row by row
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &alive)| (i % self.width, i / self.width, alive))
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pattern() {
        let pattern = Pattern::parse("010\n101\n010\n").unwrap();
        assert_eq!(pattern.width(), 3);
        assert_eq!(pattern.height(), 3);
        assert_eq!(pattern.living_count(), 4);
        let alive: Vec<_> = pattern
            .positions()
            .filter(|&(_, _, alive)| alive)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(alive, vec![(1, 0), (0, 1), (2, 1), (1, 2)]);
    }

    #[test]
    fn test_parse_accepts_dot_hash() {
        let pattern = Pattern::parse("  .#.\n  ##.\n").unwrap();
        assert_eq!(pattern.living_count(), 3);
        assert!(pattern.positions().any(|cell| cell == (0, 1, true)));
    }

    #[test]
    fn test_invalid_input() {
        assert!(Pattern::parse("010\n1X1\n010\n").is_err());
        assert!(Pattern::parse("010\n11\n010\n").is_err());
        assert!(Pattern::parse("").is_err());
        assert!(matches!(
            Pattern::parse("\n\n"),
            Err(LandError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_named_patterns() {
        for name in PATTERN_NAMES {
            assert!(Pattern::named(name).is_ok(), "{} should exist", name);
        }
        assert_eq!(Pattern::named("glider").unwrap().living_count(), 5);
        assert_eq!(Pattern::named("Beacon").unwrap().living_count(), 8);
        assert!(Pattern::named("spaceship").is_err());
    }

    #[test]
    fn test_positions_order() {
        let pattern = Pattern::parse("10\n01\n").unwrap();
        let positions: Vec<_> = pattern.positions().collect();
        assert_eq!(
            positions,
            vec![(0, 0, true), (1, 0, false), (0, 1, false), (1, 1, true)]
        );
    }
}
