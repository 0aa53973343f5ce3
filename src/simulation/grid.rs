//! Bounds-checked flat cell buffer

use super::cell::Cell;
use crate::error::{LandError, LandResult};
use itertools::iproduct;

/// A `width x height` buffer of cells stored row by row
///
/// Position `(x, y)` lives at `y * width + x`, so each row is one contiguous
/// slice of `width` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Create a grid with every position set to `fill`
    pub fn new(width: usize, height: usize, fill: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert a signed position to a buffer index, rejecting anything off the grid
    pub fn index(&self, x: isize, y: isize) -> LandResult<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return Err(LandError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.offset(x as usize, y as usize))
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: isize, y: isize) -> LandResult<&Cell> {
        let idx = self.index(x, y)?;
        Ok(&self.cells[idx])
    }

    pub fn get_mut(&mut self, x: isize, y: isize) -> LandResult<&mut Cell> {
        let idx = self.index(x, y)?;
        Ok(&mut self.cells[idx])
    }

    /// Cell at an in-range position; callers iterate `0..width` and `0..height`
    #[inline]
    pub(crate) fn cell_at(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.offset(x, y)]
    }

    #[inline]
    pub(crate) fn cell_at_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let idx = self.offset(x, y);
        &mut self.cells[idx]
    }

    /// Count alive cells among the up-to-8 neighbors of an in-range position.
    /// Neighbors past the edge do not exist; there is no wraparound.
    pub(crate) fn count_neighbors(&self, x: usize, y: usize) -> u8 {
        iproduct!(-1isize..=1, -1isize..=1)
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter_map(|(dx, dy)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                (nx < self.width && ny < self.height).then(|| self.cell_at(nx, ny))
            })
            .map(|cell| cell.state().weight())
            .sum()
    }

    /// Count alive cells by scanning the whole buffer
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Positions of all alive cells as `(x, y)`
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.height, 0..self.width)
            .filter(|&(y, x)| self.cell_at(x, y).is_alive())
            .map(|(y, x)| (x, y))
            .collect()
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}
