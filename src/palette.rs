//! Color sources.
//!
//! The engine never picks colors itself; it asks a [`ColorSource`]. The
//! default source is a [`Palette`] of configured ids drawn uniformly with
//! `fastrand`. Seeding the palette makes a whole session reproducible.

use crate::config::ConfigError;
use crate::grid::ColorId;

/// Supplies color ids for new cells.
pub trait ColorSource {
    fn next_color_id(&mut self) -> ColorId;
}

impl<F> ColorSource for F
where
    F: FnMut() -> ColorId,
{
    fn next_color_id(&mut self) -> ColorId {
        self()
    }
}

/// A fixed set of color ids with a random generator.
#[derive(Clone, Debug)]
pub struct Palette {
    ids: Vec<ColorId>,
    rng: fastrand::Rng,
}

impl Palette {
    /// Create a palette from explicit ids. Fails if `ids` is empty.
    pub fn new(ids: Vec<ColorId>) -> Result<Self, ConfigError> {
        if ids.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self {
            ids,
            rng: fastrand::Rng::new(),
        })
    }

    /// Palette with ids `0..count`.
    pub fn uniform(count: u32) -> Result<Self, ConfigError> {
        Self::new((0..count).collect())
    }

    /// Reseed the generator for a reproducible sequence.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    pub fn ids(&self) -> &[ColorId] {
        &self.ids
    }
}

impl ColorSource for Palette {
    fn next_color_id(&mut self) -> ColorId {
        self.ids[self.rng.usize(..self.ids.len())]
    }
}
