//! Circle and random layouts.

use std::f64::consts::TAU;

use rand::Rng;

use super::graph::LayoutGraph;
use super::types::{Layout, Point};

/// Node `i` of `n` at angle `2πi/n` on the unit circle.
pub fn circle(graph: &LayoutGraph) -> Layout {
    Layout::new(circle_points(graph.node_count(), 1.0))
}

pub(crate) fn circle_points(n: usize, radius: f64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            Point::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Uniformly random positions in `[-1, 1]²`.
pub fn random<R: Rng + ?Sized>(graph: &LayoutGraph, rng: &mut R) -> Layout {
    Layout::new(random_points(graph.node_count(), 1.0, rng))
}

pub(crate) fn random_points<R: Rng + ?Sized>(n: usize, half_side: f64, rng: &mut R) -> Vec<Point> {
    (0..n)
        .map(|_| {
            Point::new(
                rng.gen_range(-half_side..=half_side),
                rng.gen_range(-half_side..=half_side),
            )
        })
        .collect()
}
