//! DrL-style force-directed layout for large graphs.
//!
//! Runs a fixed annealing schedule of stages. In every iteration each node
//! considers two candidate positions:
//!   1. the analytic move toward the centroid of its neighbours, damped
//!   2. a random jump around that point, sized by the stage temperature
//! and keeps whichever has the lower energy. A node's energy is the
//! attraction-weighted squared distance to its neighbours plus the local
//! density of other nodes. Every node splats a falloff kernel into a
//! sparse density grid, so a density lookup is a single cell read and a
//! move only touches the cells under the old and new kernels.

use std::collections::HashMap;

use rand::Rng;
use tracing::trace;

use super::basic::random_points;
use super::graph::LayoutGraph;
use super::types::{Layout, Point};

/// Radius within which other nodes contribute to the density energy.
pub const DENSITY_RADIUS: f64 = 10.0;
/// Half side of the random start square, per `sqrt(n)`.
pub const INITIAL_SPREAD: f64 = 10.0;
/// Density cells per `DENSITY_RADIUS`; the kernel spans this many cells on
/// each side of its centre.
const KERNEL_CELLS: i64 = 2;
const CELL_SIZE: f64 = DENSITY_RADIUS / KERNEL_CELLS as f64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub name: &'static str,
    pub iterations: usize,
    pub temperature: f64,
    pub attraction: f64,
    pub damping: f64,
}

/// Default annealing schedule: liquid, expansion, cooldown, crunch, simmer.
pub const SCHEDULE: [Stage; 5] = [
    Stage {
        name: "liquid",
        iterations: 200,
        temperature: 2000.0,
        attraction: 10.0,
        damping: 1.0,
    },
    Stage {
        name: "expansion",
        iterations: 200,
        temperature: 2000.0,
        attraction: 2.0,
        damping: 1.0,
    },
    Stage {
        name: "cooldown",
        iterations: 200,
        temperature: 2000.0,
        attraction: 1.0,
        damping: 0.1,
    },
    Stage {
        name: "crunch",
        iterations: 50,
        temperature: 250.0,
        attraction: 1.0,
        damping: 0.25,
    },
    Stage {
        name: "simmer",
        iterations: 100,
        temperature: 250.0,
        attraction: 0.5,
        damping: 0.0,
    },
];

/// Scales stage temperature into a random jump length.
const JUMP_FACTOR: f64 = 0.01;
/// Scales stage attraction into the weight of the edge energy.
const ATTRACTION_FACTOR: f64 = 0.001;

type Cell = (i64, i64);

/// Summed falloff of every node, keyed by cell. Cells no kernel reaches
/// are absent.
struct DensityGrid {
    cells: HashMap<Cell, f64>,
}

impl DensityGrid {
    fn build(pos: &[Point]) -> Self {
        let mut grid = Self {
            cells: HashMap::new(),
        };
        for p in pos {
            grid.splat(cell_of(p), 1.0);
        }
        grid
    }

    /// Add (`sign = 1`) or remove (`sign = -1`) the kernel centred on `centre`.
    fn splat(&mut self, centre: Cell, sign: f64) {
        for dx in -KERNEL_CELLS..=KERNEL_CELLS {
            for dy in -KERNEL_CELLS..=KERNEL_CELLS {
                let key = (centre.0 + dx, centre.1 + dy);
                let value = self.cells.entry(key).or_insert(0.0);
                *value += sign * falloff(dx, dy);
                if *value <= f64::EPSILON {
                    self.cells.remove(&key);
                }
            }
        }
    }

    fn relocate(&mut self, from: &Point, to: &Point) {
        let (a, b) = (cell_of(from), cell_of(to));
        if a != b {
            self.splat(a, -1.0);
            self.splat(b, 1.0);
        }
    }

    /// Density at `at`, minus the kernel of the node currently at `own`.
    fn density(&self, own: &Point, at: &Point) -> f64 {
        let (own, at) = (cell_of(own), cell_of(at));
        let total = self.cells.get(&at).copied().unwrap_or(0.0);
        (total - falloff(at.0 - own.0, at.1 - own.1)).max(0.0)
    }
}

/// Kernel weight at a cell offset; zero outside the kernel.
fn falloff(dx: i64, dy: i64) -> f64 {
    if dx.abs() > KERNEL_CELLS || dy.abs() > KERNEL_CELLS {
        return 0.0;
    }
    let span = (KERNEL_CELLS + 1) as f64;
    (1.0 - dx.abs() as f64 / span) * (1.0 - dy.abs() as f64 / span)
}

fn cell_of(p: &Point) -> Cell {
    (
        (p.x / CELL_SIZE).floor() as i64,
        (p.y / CELL_SIZE).floor() as i64,
    )
}

fn energy(
    grid: &DensityGrid,
    pos: &[Point],
    adj: &[Vec<usize>],
    node: usize,
    at: &Point,
    attraction: f64,
) -> f64 {
    let edge_energy: f64 = adj[node]
        .iter()
        .map(|&j| {
            let dx = pos[j].x - at.x;
            let dy = pos[j].y - at.y;
            dx * dx + dy * dy
        })
        .sum();
    attraction * ATTRACTION_FACTOR * edge_energy + grid.density(&pos[node], at)
}

pub fn drl<R: Rng + ?Sized>(graph: &LayoutGraph, rng: &mut R) -> Layout {
    drl_with_schedule(graph, &SCHEDULE, rng)
}

pub fn drl_with_schedule<R: Rng + ?Sized>(
    graph: &LayoutGraph,
    schedule: &[Stage],
    rng: &mut R,
) -> Layout {
    let n = graph.node_count();
    if n == 0 {
        return Layout::default();
    }
    let adj = graph.adjacency();
    let spread = INITIAL_SPREAD * (n as f64).sqrt();
    let mut pos = random_points(n, spread, rng);
    let mut grid = DensityGrid::build(&pos);

    for stage in schedule {
        trace!(stage = stage.name, iterations = stage.iterations, "drl stage");
        let jump = stage.temperature * JUMP_FACTOR;
        for _ in 0..stage.iterations {
            for node in 0..n {
                let old = pos[node];

                let analytic = if adj[node].is_empty() {
                    old
                } else {
                    let k = adj[node].len() as f64;
                    let (sx, sy) = adj[node]
                        .iter()
                        .fold((0.0, 0.0), |(ax, ay), &j| (ax + pos[j].x, ay + pos[j].y));
                    let centroid = Point::new(sx / k, sy / k);
                    Point::new(
                        old.x + (centroid.x - old.x) * stage.damping,
                        old.y + (centroid.y - old.y) * stage.damping,
                    )
                };
                let jumped = Point::new(
                    analytic.x + rng.gen_range(-0.5..=0.5) * jump,
                    analytic.y + rng.gen_range(-0.5..=0.5) * jump,
                );

                let e_analytic = energy(&grid, &pos, &adj, node, &analytic, stage.attraction);
                let e_jumped = energy(&grid, &pos, &adj, node, &jumped, stage.attraction);
                let next = if e_jumped < e_analytic { jumped } else { analytic };

                grid.relocate(&old, &next);
                pos[node] = next;
            }
        }
    }
    Layout::new(pos)
}
