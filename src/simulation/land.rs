//! The land: a fixed-size grid of cells advanced one generation at a time

use super::cell::{Cell, CellState, Color};
use super::grid::CellGrid;
use super::pattern::Pattern;
use super::rules::LifeRules;
use crate::error::{LandError, LandResult};
use log::{debug, trace};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ALIVE_PROBABILITY_DEFAULT: f64 = 0.5;
pub const ALIVE_PROBABILITY_ALL_DEAD: f64 = 0.0;
pub const ALIVE_PROBABILITY_ALL_ALIVE: f64 = 1.0;

/// How cells of a new generation get their display color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPolicy {
    /// Paint every cell of the new generation with this color
    Repaint(Color),
    /// Keep the color each position had in the previous generation
    Preserve,
}

/// Aggregate snapshot of a land
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandStats {
    pub day: u64,
    pub width: usize,
    pub height: usize,
    pub alive: usize,
    pub dead: usize,
    pub total: usize,
    pub density: f64,
}

impl fmt::Display for LandStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Day {} ({}x{}):", self.day, self.width, self.height)?;
        writeln!(f, "  Alive: {}", self.alive)?;
        writeln!(f, "  Dead: {}", self.dead)?;
        write!(f, "  Density: {:.1}%", self.density * 100.0)
    }
}

/// Builder for [`Land`] when the defaults of the shorthand constructors don't fit
#[derive(Debug, Clone)]
pub struct LandBuilder {
    width: isize,
    height: isize,
    alive_probability: f64,
    palette_color: Color,
}

impl LandBuilder {
    pub fn new(width: isize, height: isize) -> Self {
        Self {
            width,
            height,
            alive_probability: ALIVE_PROBABILITY_DEFAULT,
            palette_color: Color::default(),
        }
    }

    pub fn alive_probability(mut self, alive_probability: f64) -> Self {
        self.alive_probability = alive_probability;
        self
    }

    pub fn palette_color(mut self, color: Color) -> Self {
        self.palette_color = color;
        self
    }

    pub fn build(self) -> LandResult<Land> {
        self.build_with_rng(&mut rand::thread_rng())
    }

    /// Build the land, drawing seed values from `rng`
    pub fn build_with_rng<R: Rng>(self, rng: &mut R) -> LandResult<Land> {
        if self.width < 0 {
            return Err(LandError::invalid(format!("Width must be >= 0, got {}", self.width)));
        }
        if self.height < 0 {
            return Err(LandError::invalid(format!("Height must be >= 0, got {}", self.height)));
        }
        validate_probability(self.alive_probability)?;

        let (width, height) = (self.width as usize, self.height as usize);
        let bytes = width
            .checked_mul(height)
            .and_then(|cells| cells.checked_mul(std::mem::size_of::<Cell>()));
        if !matches!(bytes, Some(bytes) if bytes <= isize::MAX as usize) {
            return Err(LandError::invalid(format!(
                "Land of {}x{} cells is too large",
                width, height
            )));
        }
        let blank = Cell::dead(self.palette_color);
        let mut land = Land {
            cells: CellGrid::new(width, height, blank),
            back: CellGrid::new(width, height, blank),
            day_count: 0,
            alive_cell_count: 0,
            palette_color: self.palette_color,
        };
        land.init_with_rng(self.alive_probability, rng)?;
        Ok(land)
    }
}

fn validate_probability(alive_probability: f64) -> LandResult<()> {
    if !(ALIVE_PROBABILITY_ALL_DEAD..=ALIVE_PROBABILITY_ALL_ALIVE).contains(&alive_probability) {
        return Err(LandError::invalid(format!(
            "Invalid probability {}, the range is 0 <= probability <= 1",
            alive_probability
        )));
    }
    Ok(())
}

/// Owns the current generation and keeps its aggregates in step with it.
///
/// Positions are `(x, y)` with `0 <= x < width` and `0 <= y < height`.
/// Every positional accessor is bounds checked and fails with
/// [`LandError::OutOfBounds`] instead of clamping or wrapping.
#[derive(Debug, Clone)]
pub struct Land {
    cells: CellGrid,
    // Target buffer for the next generation; swapped with `cells` on advance
    back: CellGrid,
    day_count: u64,
    alive_cell_count: usize,
    palette_color: Color,
}

impl Land {
    /// Create a land seeded with `alive_probability` per cell
    pub fn new(width: isize, height: isize, alive_probability: f64) -> LandResult<Self> {
        LandBuilder::new(width, height)
            .alive_probability(alive_probability)
            .build()
    }

    /// Create a land seeded with the default probability
    pub fn with_size(width: isize, height: isize) -> LandResult<Self> {
        LandBuilder::new(width, height).build()
    }

    /// Create a `size x size` land
    pub fn square(size: isize, alive_probability: f64) -> LandResult<Self> {
        Self::new(size, size, alive_probability)
    }

    /// Create a land drawing its seed values from `rng`
    pub fn with_rng<R: Rng>(
        width: isize,
        height: isize,
        alive_probability: f64,
        rng: &mut R,
    ) -> LandResult<Self> {
        LandBuilder::new(width, height)
            .alive_probability(alive_probability)
            .build_with_rng(rng)
    }

    pub fn builder(width: isize, height: isize) -> LandBuilder {
        LandBuilder::new(width, height)
    }

    /// Re-seed with the default probability
    pub fn init(&mut self) {
        self.seed(ALIVE_PROBABILITY_DEFAULT, &mut rand::thread_rng());
    }

    /// Re-seed every cell. The day count is left alone.
    pub fn init_with_probability(&mut self, alive_probability: f64) -> LandResult<()> {
        self.init_with_rng(alive_probability, &mut rand::thread_rng())
    }

    /// Re-seed every cell from `rng`.
    ///
    /// Each position is an independent trial: one uniform draw in `[0, 1)`,
    /// alive when the draw is below `alive_probability`. Positions are drawn
    /// column by column (`x` outer, `y` inner). On error the land is unchanged.
    pub fn init_with_rng<R: Rng>(&mut self, alive_probability: f64, rng: &mut R) -> LandResult<()> {
        validate_probability(alive_probability)?;
        self.seed(alive_probability, rng);
        Ok(())
    }

    // `alive_probability` must already be validated
    fn seed<R: Rng>(&mut self, alive_probability: f64, rng: &mut R) {
        let mut alive = 0;
        for x in 0..self.width() {
            for y in 0..self.height() {
                let state = CellState::from(rng.gen::<f64>() < alive_probability);
                alive += state.weight() as usize;
                *self.cells.cell_at_mut(x, y) = Cell::new(state, self.palette_color);
            }
        }
        self.alive_cell_count = alive;

        debug!(
            "Seeded {}x{} land with p={}: {} alive",
            self.width(),
            self.height(),
            alive_probability,
            alive
        );
    }

    /// Kill every cell. The day count is left alone.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::dead(self.palette_color));
        self.alive_cell_count = 0;
    }

    /// Re-seed with the default probability and restart the day count
    pub fn reset(&mut self) {
        self.init();
        self.day_count = 0;
    }

    pub fn reset_with_probability(&mut self, alive_probability: f64) -> LandResult<()> {
        self.init_with_probability(alive_probability)?;
        self.day_count = 0;
        Ok(())
    }

    pub fn reset_with_rng<R: Rng>(&mut self, alive_probability: f64, rng: &mut R) -> LandResult<()> {
        self.init_with_rng(alive_probability, rng)?;
        self.day_count = 0;
        Ok(())
    }

    /// Advance one generation, painting new cells with the palette color
    pub fn step(&mut self) {
        self.advance(ColorPolicy::Repaint(self.palette_color));
    }

    /// Advance one generation.
    ///
    /// Every position of the next generation is decided from the current one
    /// and written into the back buffer, then the buffers are swapped. The
    /// alive count is carried forward by the births and deaths decided along
    /// the way rather than by rescanning.
    pub fn advance(&mut self, policy: ColorPolicy) {
        self.day_count += 1;

        let width = self.width();
        let current = &self.cells;
        let delta: isize = if current.is_empty() {
            0
        } else {
            self.back
                .cells_mut()
                .par_chunks_mut(width)
                .enumerate()
                .map(|(y, row)| {
                    let mut row_delta = 0;
                    for (x, next) in row.iter_mut().enumerate() {
                        let old = current.cell_at(x, y);
                        let color = match policy {
                            ColorPolicy::Repaint(color) => color,
                            ColorPolicy::Preserve => old.color(),
                        };
                        let transition =
                            LifeRules::transition(old.state(), current.count_neighbors(x, y));
                        *next = Cell::new(transition.next_state(), color);
                        row_delta += transition.alive_delta();
                    }
                    row_delta
                })
                .sum()
        };

        std::mem::swap(&mut self.cells, &mut self.back);
        self.alive_cell_count = self.alive_cell_count.saturating_add_signed(delta);
        debug_assert_eq!(self.alive_cell_count, self.cells.living_count());

        trace!("Day {}: {} alive", self.day_count, self.alive_cell_count);
    }

    /// Advance `generations` times with the palette color
    pub fn step_n(&mut self, generations: usize) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Number of alive neighbors around `(x, y)`, edges clipped
    pub fn neighbor_count(&self, x: isize, y: isize) -> LandResult<u8> {
        self.cells.index(x, y)?;
        Ok(self.cells.count_neighbors(x as usize, y as usize))
    }

    pub fn cell(&self, x: isize, y: isize) -> LandResult<&Cell> {
        self.cells.get(x, y)
    }

    pub fn is_cell_alive(&self, x: isize, y: isize) -> LandResult<bool> {
        Ok(self.cells.get(x, y)?.is_alive())
    }

    pub fn is_cell_dead(&self, x: isize, y: isize) -> LandResult<bool> {
        Ok(self.cells.get(x, y)?.is_dead())
    }

    pub fn cell_color(&self, x: isize, y: isize) -> LandResult<Color> {
        Ok(self.cells.get(x, y)?.color())
    }

    /// Force a cell alive. Returns `true` if it was dead before.
    pub fn set_cell_alive(&mut self, x: isize, y: isize) -> LandResult<bool> {
        let cell = self.cells.get_mut(x, y)?;
        if cell.is_alive() {
            return Ok(false);
        }
        cell.alive();
        self.alive_cell_count += 1;
        Ok(true)
    }

    /// Force a cell dead. Returns `true` if it was alive before.
    pub fn set_cell_die(&mut self, x: isize, y: isize) -> LandResult<bool> {
        let cell = self.cells.get_mut(x, y)?;
        if cell.is_dead() {
            return Ok(false);
        }
        cell.die();
        self.alive_cell_count -= 1;
        Ok(true)
    }

    pub fn set_cell_color(&mut self, x: isize, y: isize, color: Color) -> LandResult<()> {
        self.cells.get_mut(x, y)?.set_color(color);
        Ok(())
    }

    /// Stamp `pattern` with its top-left corner at `(origin_x, origin_y)`.
    ///
    /// The whole pattern must fit; nothing is written otherwise. Returns the
    /// number of cells whose state changed.
    pub fn place_pattern(
        &mut self,
        origin_x: isize,
        origin_y: isize,
        pattern: &Pattern,
    ) -> LandResult<usize> {
        if pattern.width() == 0 || pattern.height() == 0 {
            return Ok(0);
        }
        self.cells.index(origin_x, origin_y)?;
        self.cells.index(
            origin_x + pattern.width() as isize - 1,
            origin_y + pattern.height() as isize - 1,
        )?;

        let mut changed = 0;
        for (px, py, alive) in pattern.positions() {
            let (x, y) = (origin_x + px as isize, origin_y + py as isize);
            let flipped = if alive {
                self.set_cell_alive(x, y)?
            } else {
                self.set_cell_die(x, y)?
            };
            changed += flipped as usize;
        }
        Ok(changed)
    }

    pub fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    pub fn alive_cell_count(&self) -> usize {
        self.alive_cell_count
    }

    pub fn dead_cell_count(&self) -> usize {
        self.cell_count() - self.alive_cell_count()
    }

    pub fn day_count(&self) -> u64 {
        self.day_count
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn palette_color(&self) -> Color {
        self.palette_color
    }

    /// Color used for cells created by seeding and by [`Land::step`]
    pub fn set_palette_color(&mut self, color: Color) {
        self.palette_color = color;
    }

    /// Read-only view of the current generation
    pub fn grid(&self) -> &CellGrid {
        &self.cells
    }

    pub fn stats(&self) -> LandStats {
        let total = self.cell_count();
        LandStats {
            day: self.day_count,
            width: self.width(),
            height: self.height(),
            alive: self.alive_cell_count,
            dead: self.dead_cell_count(),
            total,
            density: if total == 0 {
                0.0
            } else {
                self.alive_cell_count as f64 / total as f64
            },
        }
    }
}

impl fmt::Display for Land {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let symbol = if self.cells.cell_at(x, y).is_alive() { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Every draw is 0.0, so any positive probability seeds alive
    fn zero_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    fn land_from_pattern(width: isize, height: isize, rows: &str) -> Land {
        let mut land = Land::with_rng(width, height, 0.0, &mut zero_rng()).unwrap();
        land.place_pattern(0, 0, &Pattern::parse(rows).unwrap()).unwrap();
        land
    }

    #[test]
    fn test_construction_rejects_bad_arguments() {
        assert!(matches!(Land::new(-1, 4, 0.5), Err(LandError::InvalidArgument { .. })));
        assert!(matches!(Land::new(4, -1, 0.5), Err(LandError::InvalidArgument { .. })));
        assert!(matches!(Land::new(4, 4, -0.1), Err(LandError::InvalidArgument { .. })));
        assert!(matches!(Land::new(4, 4, 1.5), Err(LandError::InvalidArgument { .. })));
        assert!(Land::new(4, 4, f64::NAN).is_err());
    }

    #[test]
    fn test_oversized_land_is_rejected() {
        assert!(matches!(
            Land::new(isize::MAX, 2, 0.5),
            Err(LandError::InvalidArgument { .. })
        ));
        assert!(Land::builder(isize::MAX, isize::MAX).build().is_err());
    }

    #[test]
    fn test_init_reseeds_with_default_probability() {
        let mut land = Land::with_rng(10, 10, 0.0, &mut zero_rng()).unwrap();
        land.step();
        land.init();
        assert_eq!(land.alive_cell_count(), land.grid().living_count());
        assert_eq!(land.day_count(), 1);
    }

    #[test]
    fn test_empty_land() {
        let mut land = Land::new(0, 0, 0.5).unwrap();
        assert_eq!(land.cell_count(), 0);
        land.step();
        assert_eq!(land.day_count(), 1);
        assert_eq!(land.alive_cell_count(), 0);
        assert!(land.is_cell_alive(0, 0).is_err());
    }

    #[test]
    fn test_seeding_extremes() {
        let land = Land::square(6, ALIVE_PROBABILITY_ALL_ALIVE).unwrap();
        assert_eq!(land.alive_cell_count(), 36);
        assert_eq!(land.dead_cell_count(), 0);

        let land = Land::square(6, ALIVE_PROBABILITY_ALL_DEAD).unwrap();
        assert_eq!(land.alive_cell_count(), 0);
        assert_eq!(land.dead_cell_count(), 36);
    }

    #[test]
    fn test_seeding_uses_injected_rng() {
        let land = Land::with_rng(3, 2, 0.5, &mut zero_rng()).unwrap();
        assert_eq!(land.alive_cell_count(), 6);

        // Draws just below 1.0 fail every probability short of 1
        let mut high = StepRng::new(u64::MAX, 0);
        let land = Land::with_rng(3, 2, 0.999, &mut high).unwrap();
        assert_eq!(land.alive_cell_count(), 0);

        let a = Land::with_rng(8, 8, 0.5, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = Land::with_rng(8, 8, 0.5, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.alive_cell_count(), a.grid().living_count());
    }

    #[test]
    fn test_failed_reseed_leaves_land_untouched() {
        let mut land = Land::with_rng(4, 4, 1.0, &mut zero_rng()).unwrap();
        assert!(land.init_with_probability(2.0).is_err());
        assert_eq!(land.alive_cell_count(), 16);
    }

    #[test]
    fn test_isolated_cell_dies() {
        let mut land = land_from_pattern(3, 3, "000\n010\n000");
        land.step();
        assert!(land.is_cell_dead(1, 1).unwrap());
        assert_eq!(land.alive_cell_count(), 0);
    }

    #[test]
    fn test_birth_with_three_neighbors() {
        let mut land = land_from_pattern(3, 3, "110\n100\n000");
        assert_eq!(land.neighbor_count(1, 1).unwrap(), 3);
        land.step();
        // Block forms: the three survive and (1,1) is born
        assert!(land.is_cell_alive(1, 1).unwrap());
        assert_eq!(land.alive_cell_count(), 4);
    }

    #[test]
    fn test_overpopulation() {
        let mut land = land_from_pattern(3, 3, "111\n111\n000");
        land.step();
        assert!(land.is_cell_dead(1, 0).unwrap());
        assert!(land.is_cell_dead(1, 1).unwrap());
        assert_eq!(land.alive_cell_count(), land.grid().living_count());
    }

    #[test]
    fn test_alive_count_tracks_grid() {
        let mut land = Land::with_rng(24, 17, 0.4, &mut StdRng::seed_from_u64(42)).unwrap();
        for _ in 0..30 {
            land.step();
            assert_eq!(land.alive_cell_count(), land.grid().living_count());
        }
    }

    #[test]
    fn test_day_count() {
        let mut land = Land::with_rng(5, 5, 0.5, &mut zero_rng()).unwrap();
        land.step_n(3);
        assert_eq!(land.day_count(), 3);

        land.clear();
        assert_eq!(land.day_count(), 3);
        land.init_with_rng(0.5, &mut zero_rng()).unwrap();
        assert_eq!(land.day_count(), 3);

        land.reset_with_rng(0.0, &mut zero_rng()).unwrap();
        assert_eq!(land.day_count(), 0);
        land.step();
        land.reset();
        assert_eq!(land.day_count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut land = Land::with_rng(5, 4, 1.0, &mut zero_rng()).unwrap();
        land.clear();
        assert_eq!(land.alive_cell_count(), 0);
        assert!(land.grid().cells().iter().all(Cell::is_dead));
    }

    #[test]
    fn test_paint_mutators_are_idempotent() {
        let mut land = land_from_pattern(4, 4, "0000");
        assert!(land.set_cell_alive(2, 2).unwrap());
        assert!(!land.set_cell_alive(2, 2).unwrap());
        assert_eq!(land.alive_cell_count(), 1);

        assert!(land.set_cell_die(2, 2).unwrap());
        assert!(!land.set_cell_die(2, 2).unwrap());
        assert_eq!(land.alive_cell_count(), 0);
    }

    #[test]
    fn test_out_of_bounds_accessors() {
        let mut land = Land::new(5, 4, 0.5).unwrap();
        for (x, y) in [(-1, 0), (5, 0), (0, -1), (0, 4)] {
            assert!(matches!(land.is_cell_alive(x, y), Err(LandError::OutOfBounds { .. })));
            assert!(land.is_cell_dead(x, y).is_err());
            assert!(land.cell_color(x, y).is_err());
            assert!(land.neighbor_count(x, y).is_err());
            assert!(land.set_cell_alive(x, y).is_err());
            assert!(land.set_cell_die(x, y).is_err());
            assert!(land.set_cell_color(x, y, Color::BLACK).is_err());
        }
    }

    #[test]
    fn test_color_policies() {
        let red = Color::from_rgb(255, 0, 0);
        let blue = Color::from_rgb(0, 0, 255);

        let mut land = Land::builder(3, 3)
            .alive_probability(0.0)
            .palette_color(red)
            .build()
            .unwrap();
        land.place_pattern(0, 0, &Pattern::parse("110\n110\n000").unwrap()).unwrap();
        land.set_cell_color(0, 0, blue).unwrap();

        land.advance(ColorPolicy::Preserve);
        assert_eq!(land.cell_color(0, 0).unwrap(), blue);
        assert_eq!(land.cell_color(2, 2).unwrap(), red);

        land.set_palette_color(blue);
        land.step();
        assert!(land.grid().cells().iter().all(|cell| cell.color() == blue));
    }

    #[test]
    fn test_place_pattern_must_fit() {
        let mut land = land_from_pattern(4, 4, "0");
        let glider = Pattern::named("glider").unwrap();
        assert!(land.place_pattern(2, 2, &glider).is_err());
        assert_eq!(land.alive_cell_count(), 0);
        assert_eq!(land.place_pattern(1, 1, &glider).unwrap(), 5);
        assert_eq!(land.alive_cell_count(), 5);
    }

    #[test]
    fn test_stats() {
        let mut land = Land::with_rng(4, 5, 1.0, &mut zero_rng()).unwrap();
        land.set_cell_die(0, 0).unwrap();
        let stats = land.stats();
        assert_eq!(stats.total, 20);
        assert_eq!(stats.alive, 19);
        assert_eq!(stats.dead, 1);
        assert!((stats.density - 0.95).abs() < 1e-9);
    }
}
