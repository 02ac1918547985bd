//! Fruchterman-Reingold force-directed layout.
//!
//! Phases per iteration:
//!   1. Repulsion between every pair of nodes (force 1/d)
//!   2. Attraction along every edge (force d²)
//!   3. Move each node, displacement capped by the current temperature
//!
//! The temperature cools linearly from `sqrt(n)/10` to zero.

use rand::Rng;

use super::basic::random_points;
use super::graph::LayoutGraph;
use super::types::{Layout, Point};

pub const FR_ITERATIONS: usize = 500;

/// Distances below this are treated as coincident nodes.
pub(crate) const MIN_DISTANCE: f64 = 1e-9;

pub fn fruchterman_reingold<R: Rng + ?Sized>(graph: &LayoutGraph, rng: &mut R) -> Layout {
    let n = graph.node_count();
    if n == 0 {
        return Layout::default();
    }
    let half_side = (n as f64).sqrt() / 2.0;
    let mut pos = random_points(n, half_side, rng);
    let edges = graph.edge_pairs();
    let start_temp = (n as f64).sqrt() / 10.0;

    let mut disp = vec![Point::default(); n];
    for iter in 0..FR_ITERATIONS {
        let temp = start_temp * (1.0 - iter as f64 / FR_ITERATIONS as f64);
        disp.fill(Point::default());

        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy) = separation(&pos[i], &pos[j], rng);
                let d2 = dx * dx + dy * dy;
                // unit vector / d, i.e. (dx, dy) / d²
                let fx = dx / d2;
                let fy = dy / d2;
                disp[i].x += fx;
                disp[i].y += fy;
                disp[j].x -= fx;
                disp[j].y -= fy;
            }
        }

        for &(a, b) in &edges {
            let dx = pos[a].x - pos[b].x;
            let dy = pos[a].y - pos[b].y;
            let d = dx.hypot(dy);
            // unit vector · d²
            disp[a].x -= dx * d;
            disp[a].y -= dy * d;
            disp[b].x += dx * d;
            disp[b].y += dy * d;
        }

        apply_displacement(&mut pos, &disp, temp);
    }
    Layout::new(pos)
}

/// Vector from `b` to `a`, nudged apart when the two points coincide.
pub(crate) fn separation<R: Rng + ?Sized>(a: &Point, b: &Point, rng: &mut R) -> (f64, f64) {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    if dx.hypot(dy) >= MIN_DISTANCE {
        (dx, dy)
    } else {
        (
            rng.gen_range(-1e-6..=1e-6) + MIN_DISTANCE,
            rng.gen_range(-1e-6..=1e-6),
        )
    }
}

/// Move every node along its displacement, limited to `max_step`.
pub(crate) fn apply_displacement(pos: &mut [Point], disp: &[Point], max_step: f64) {
    for (p, d) in pos.iter_mut().zip(disp) {
        let len = d.x.hypot(d.y);
        if len < MIN_DISTANCE || !len.is_finite() {
            continue;
        }
        let step = len.min(max_step) / len;
        p.x += d.x * step;
        p.y += d.y * step;
    }
}
