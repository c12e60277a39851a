//! Synthesis parameters with range-clamped setters

use std::time::{SystemTime, UNIX_EPOCH};

use crate::io::configuration::{
    DEFAULT_AUTISM, DEFAULT_MAGIC, DEFAULT_NEIGHBORS, DEFAULT_TRIES, MAX_NEIGHBORS, MAX_TRIES,
};

/// Tuning knobs for one synthesis run
///
/// All values are fixed for the duration of a run. Setters clamp to the
/// valid range instead of failing, so any input yields a usable
/// configuration.
#[derive(Clone, Copy, Debug)]
pub struct Parameters {
    h_tile: bool,
    v_tile: bool,
    autism: f64,
    neighbors: usize,
    tries: usize,
    magic: u8,
    random_seed: u64,
}

impl Default for Parameters {
    /// Defaults: no tiling, sensitivity 32/256, 29 neighbors, 192 probes,
    /// polishing decay 192, seeded from the current time
    fn default() -> Self {
        Self {
            h_tile: false,
            v_tile: false,
            autism: DEFAULT_AUTISM,
            neighbors: DEFAULT_NEIGHBORS,
            tries: DEFAULT_TRIES,
            magic: DEFAULT_MAGIC,
            random_seed: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |elapsed| elapsed.as_secs()),
        }
    }
}

impl Parameters {
    /// Create parameters with the default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the output wraps horizontally
    pub const fn h_tile(&self) -> bool {
        self.h_tile
    }

    /// Whether the output wraps vertically
    pub const fn v_tile(&self) -> bool {
        self.v_tile
    }

    /// Sensitivity to outliers, shaping the perceptual difference curve
    pub const fn outlier_sensitivity(&self) -> f64 {
        self.autism
    }

    /// Neighbors collected per output pixel
    pub const fn neighbors(&self) -> usize {
        self.neighbors
    }

    /// Random corpus probes per output pixel
    pub const fn tries(&self) -> usize {
        self.tries
    }

    /// Polishing decay constant; zero disables polishing
    pub const fn magic(&self) -> u8 {
        self.magic
    }

    /// Seed for the run's random sampler
    pub const fn random_seed(&self) -> u64 {
        self.random_seed
    }

    /// Make the output seamless when repeated horizontally
    pub fn set_h_tile(&mut self, h_tile: bool) -> &mut Self {
        self.h_tile = h_tile;
        self
    }

    /// Make the output seamless when repeated vertically
    pub fn set_v_tile(&mut self, v_tile: bool) -> &mut Self {
        self.v_tile = v_tile;
        self
    }

    /// Set the outlier sensitivity, clamped to `[0, 1]`
    ///
    /// Zero collapses the difference curve to exact-match-or-maximum.
    pub fn set_outlier_sensitivity(&mut self, sensitivity: f64) -> &mut Self {
        self.autism = sensitivity.clamp(0.0, 1.0);
        self
    }

    /// Set the neighborhood size, clamped to the largest usable disc
    pub fn set_neighbors(&mut self, neighbors: usize) -> &mut Self {
        self.neighbors = neighbors.min(MAX_NEIGHBORS);
        self
    }

    /// Set the random probe count, clamped to `[0, 65536]`
    pub fn set_tries(&mut self, tries: usize) -> &mut Self {
        self.tries = tries.min(MAX_TRIES);
        self
    }

    /// Set the polishing decay constant
    pub fn set_magic(&mut self, magic: u8) -> &mut Self {
        self.magic = magic;
        self
    }

    /// Set the random seed
    pub fn set_random_seed(&mut self, seed: u64) -> &mut Self {
        self.random_seed = seed;
        self
    }
}
