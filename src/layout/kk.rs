//! Kamada-Kawai spring layout.
//!
//! Every pair of nodes is joined by a spring whose rest length is their
//! hop distance and whose stiffness is `1/d²`. Each iteration moves the
//! node with the largest energy gradient by one Newton-Raphson step.
//! Gradients are maintained incrementally, so an iteration costs O(n).

use super::basic::circle_points;
use super::fr::MIN_DISTANCE;
use super::graph::LayoutGraph;
use super::types::{Layout, Point};

pub const KK_ITERATIONS_PER_NODE: usize = 50;
pub const KK_EPSILON: f64 = 1e-4;

struct Springs {
    /// Rest lengths, row-major `n × n`.
    length: Vec<f64>,
    /// Stiffness, row-major `n × n`.
    strength: Vec<f64>,
    n: usize,
}

impl Springs {
    fn new(graph: &LayoutGraph) -> Self {
        let n = graph.node_count();
        let dist = graph.all_pairs_distances();
        let max_finite = dist
            .iter()
            .flatten()
            .filter_map(|d| *d)
            .max()
            .unwrap_or(0)
            .max(1);
        // Disconnected pairs sit a little further apart than the widest
        // connected pair.
        let unreachable = (max_finite + 1) as f64;

        let mut length = vec![0.0; n * n];
        let mut strength = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let l = dist[i][j].map_or(unreachable, |d| d as f64);
                length[i * n + j] = l;
                strength[i * n + j] = 1.0 / (l * l);
            }
        }
        Self {
            length,
            strength,
            n,
        }
    }

    fn max_length(&self) -> f64 {
        self.length.iter().copied().fold(1.0, f64::max)
    }

    /// Gradient of the energy of node `i` due to the spring to `j`.
    fn pair_gradient(&self, pos: &[Point], i: usize, j: usize) -> (f64, f64) {
        let dx = pos[i].x - pos[j].x;
        let dy = pos[i].y - pos[j].y;
        let d = dx.hypot(dy);
        if d < MIN_DISTANCE {
            return (0.0, 0.0);
        }
        let k = self.strength[i * self.n + j];
        let l = self.length[i * self.n + j];
        (k * (dx - l * dx / d), k * (dy - l * dy / d))
    }

    fn node_gradient(&self, pos: &[Point], i: usize) -> (f64, f64) {
        (0..self.n)
            .filter(|&j| j != i)
            .map(|j| self.pair_gradient(pos, i, j))
            .fold((0.0, 0.0), |(ax, ay), (gx, gy)| (ax + gx, ay + gy))
    }

    /// Newton-Raphson step for node `m`, `None` when the Hessian is singular.
    fn newton_step(&self, pos: &[Point], m: usize, gx: f64, gy: f64) -> Option<(f64, f64)> {
        let (mut exx, mut eyy, mut exy) = (0.0, 0.0, 0.0);
        for i in (0..self.n).filter(|&i| i != m) {
            let dx = pos[m].x - pos[i].x;
            let dy = pos[m].y - pos[i].y;
            let d = dx.hypot(dy);
            if d < MIN_DISTANCE {
                continue;
            }
            let k = self.strength[m * self.n + i];
            let l = self.length[m * self.n + i];
            let d3 = d * d * d;
            exx += k * (1.0 - l * dy * dy / d3);
            eyy += k * (1.0 - l * dx * dx / d3);
            exy += k * l * dx * dy / d3;
        }
        let det = exx * eyy - exy * exy;
        if det.abs() < 1e-12 {
            return None;
        }
        let step_x = (-gx * eyy + gy * exy) / det;
        let step_y = (-gy * exx + gx * exy) / det;
        Some((step_x, step_y))
    }
}

pub fn kamada_kawai(graph: &LayoutGraph) -> Layout {
    let n = graph.node_count();
    match n {
        0 => return Layout::default(),
        1 => return Layout::new(vec![Point::default()]),
        _ => {}
    }

    let springs = Springs::new(graph);
    let max_step = springs.max_length();
    let mut pos = circle_points(n, max_step / 2.0);
    let mut grad: Vec<(f64, f64)> = (0..n).map(|i| springs.node_gradient(&pos, i)).collect();

    for _ in 0..KK_ITERATIONS_PER_NODE * n {
        let Some((m, delta)) = grad
            .iter()
            .map(|(gx, gy)| gx.hypot(*gy))
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
        else {
            break;
        };
        if delta < KK_EPSILON {
            break;
        }

        let (gx, gy) = grad[m];
        let (mut sx, mut sy) = match springs.newton_step(&pos, m, gx, gy) {
            Some(step) => step,
            None => {
                // Singular Hessian: take a small gradient-descent step instead.
                let scale = (max_step * 0.01) / delta;
                (-gx * scale, -gy * scale)
            }
        };
        let len = sx.hypot(sy);
        if len > max_step {
            sx *= max_step / len;
            sy *= max_step / len;
        }
        move_node(&springs, &mut pos, &mut grad, m, sx, sy);
    }
    Layout::new(pos)
}

fn move_node(
    springs: &Springs,
    pos: &mut [Point],
    grad: &mut [(f64, f64)],
    m: usize,
    sx: f64,
    sy: f64,
) {
    let n = pos.len();
    let before: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            if i == m {
                (0.0, 0.0)
            } else {
                springs.pair_gradient(pos, i, m)
            }
        })
        .collect();

    pos[m].x += sx;
    pos[m].y += sy;

    for i in (0..n).filter(|&i| i != m) {
        let (nx, ny) = springs.pair_gradient(pos, i, m);
        grad[i].0 += nx - before[i].0;
        grad[i].1 += ny - before[i].1;
    }
    grad[m] = springs.node_gradient(pos, m);
}
