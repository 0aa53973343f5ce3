//! Thread-safe handle to a land
//!
//! Mutations take the write lock for the whole operation so readers never see
//! a half-advanced generation or a day count without its grid. Queries share
//! the read lock.

use super::cell::Color;
use super::land::{ColorPolicy, Land, LandStats};
use crate::error::LandResult;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
pub struct SharedLand {
    inner: Arc<RwLock<Land>>,
}

impl SharedLand {
    pub fn new(land: Land) -> Self {
        Self {
            inner: Arc::new(RwLock::new(land)),
        }
    }

    // A panic mid-operation cannot leave a torn generation behind: advance
    // only swaps buffers after the new one is complete.
    fn read_guard(&self) -> RwLockReadGuard<'_, Land> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Land> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a query against a consistent view of the land
    pub fn read<T>(&self, f: impl FnOnce(&Land) -> T) -> T {
        f(&self.read_guard())
    }

    /// Run a mutation with exclusive access
    pub fn write<T>(&self, f: impl FnOnce(&mut Land) -> T) -> T {
        f(&mut self.write_guard())
    }

    pub fn step(&self) {
        self.write_guard().step();
    }

    pub fn advance(&self, policy: ColorPolicy) {
        self.write_guard().advance(policy);
    }

    pub fn clear(&self) {
        self.write_guard().clear();
    }

    pub fn reset(&self) {
        self.write_guard().reset();
    }

    pub fn reset_with_probability(&self, alive_probability: f64) -> LandResult<()> {
        self.write_guard().reset_with_probability(alive_probability)
    }

    pub fn set_cell_alive(&self, x: isize, y: isize) -> LandResult<bool> {
        self.write_guard().set_cell_alive(x, y)
    }

    pub fn set_cell_die(&self, x: isize, y: isize) -> LandResult<bool> {
        self.write_guard().set_cell_die(x, y)
    }

    pub fn set_cell_color(&self, x: isize, y: isize, color: Color) -> LandResult<()> {
        self.write_guard().set_cell_color(x, y, color)
    }

    pub fn is_cell_alive(&self, x: isize, y: isize) -> LandResult<bool> {
        self.read_guard().is_cell_alive(x, y)
    }

    pub fn stats(&self) -> LandStats {
        self.read_guard().stats()
    }

    /// Copy of the current land, detached from this handle
    pub fn snapshot(&self) -> Land {
        self.read_guard().clone()
    }
}

impl From<Land> for SharedLand {
    fn from(land: Land) -> Self {
        Self::new(land)
    }
}
