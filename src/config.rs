//! Configuration for the layout pipeline.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::layout::{BoundingBox, LayoutAlgorithm};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutConfig {
    /// Layout algorithm to run.
    pub algorithm: LayoutAlgorithm,
    /// Multiply the final coordinates by this factor.
    pub scale: Option<f64>,
    /// Fit the layout into this box instead of the one derived from the
    /// network's default node size.
    pub fit_into: Option<BoundingBox>,
    /// Seed for randomised algorithms. None = seeded from entropy.
    pub seed: Option<u64>,
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, algorithm: LayoutAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_fit_into(mut self, bbox: BoundingBox) -> Self {
        self.fit_into = Some(bbox);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// RNG for randomised algorithms.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
