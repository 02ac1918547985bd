//! Large Graph Layout.
//!
//! Each connected component grows outward from its highest-degree node:
//! BFS layers are added one at a time, every new node starts next to its
//! BFS parent, and the nodes placed so far are relaxed with a
//! grid-limited force-directed pass. Components end up side by side.

use std::collections::HashMap;
use std::f64::consts::TAU;

use rand::Rng;

use super::fr::{apply_displacement, separation};
use super::graph::LayoutGraph;
use super::types::{Layout, Point};

pub const LGL_TOTAL_ITERATIONS: usize = 150;
pub const LGL_MIN_ITERATIONS_PER_LAYER: usize = 10;
/// Repulsion only acts between nodes in the same or adjacent grid cells.
pub const LGL_CELL_SIZE: f64 = 2.0;
/// Horizontal gap left between neighbouring components.
pub const COMPONENT_GAP: f64 = 1.0;

pub fn lgl<R: Rng + ?Sized>(graph: &LayoutGraph, rng: &mut R) -> Layout {
    let n = graph.node_count();
    let mut pos = vec![Point::default(); n];
    if n == 0 {
        return Layout::default();
    }
    let adj = graph.adjacency();

    let mut offset_x = 0.0;
    for component in graph.components() {
        layout_component(graph, &adj, &component, &mut pos, rng);

        let sub = Layout::new(component.iter().map(|&i| pos[i]).collect());
        let Some(bbox) = sub.bounding_box() else {
            continue;
        };
        let center_y = bbox.center().y;
        for &i in &component {
            pos[i].x += offset_x - bbox.left;
            pos[i].y -= center_y;
        }
        offset_x += bbox.width() + COMPONENT_GAP;
    }
    Layout::new(pos)
}

fn layout_component<R: Rng + ?Sized>(
    graph: &LayoutGraph,
    adj: &[Vec<usize>],
    component: &[usize],
    pos: &mut [Point],
    rng: &mut R,
) {
    let Some(&root) = component
        .iter()
        .max_by(|&&a, &&b| adj[a].len().cmp(&adj[b].len()).then(b.cmp(&a)))
    else {
        return;
    };

    let tree = graph.bfs_tree(root);
    let iterations =
        (LGL_TOTAL_ITERATIONS / tree.levels.len().max(1)).max(LGL_MIN_ITERATIONS_PER_LAYER);

    let mut placed_flag = vec![false; adj.len()];
    let mut placed: Vec<usize> = vec![root];
    placed_flag[root] = true;
    pos[root] = Point::default();

    for layer in tree.levels.iter().skip(1) {
        for &v in layer {
            let anchor = tree.parent.get(&v).map_or(Point::default(), |&p| pos[p]);
            let angle = rng.gen_range(0.0..TAU);
            pos[v] = Point::new(anchor.x + angle.cos(), anchor.y + angle.sin());
            placed_flag[v] = true;
        }
        placed.extend_from_slice(layer);
        relax(adj, &placed, &placed_flag, pos, iterations, rng);
    }
}

fn relax<R: Rng + ?Sized>(
    adj: &[Vec<usize>],
    placed: &[usize],
    placed_flag: &[bool],
    pos: &mut [Point],
    iterations: usize,
    rng: &mut R,
) {
    let start_temp = (placed.len() as f64).sqrt() / 2.0;
    let mut disp = vec![Point::default(); pos.len()];

    for iter in 0..iterations {
        let temp = start_temp * (1.0 - iter as f64 / iterations as f64);
        disp.fill(Point::default());

        let mut grid: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for &v in placed {
            grid.entry(cell_of(&pos[v])).or_default().push(v);
        }

        for &v in placed {
            let (cx, cy) = cell_of(&pos[v]);
            for gx in (cx - 1)..=(cx + 1) {
                for gy in (cy - 1)..=(cy + 1) {
                    let Some(members) = grid.get(&(gx, gy)) else {
                        continue;
                    };
                    for &w in members.iter().filter(|&&w| w != v) {
                        let (dx, dy) = separation(&pos[v], &pos[w], rng);
                        let d2 = dx * dx + dy * dy;
                        disp[v].x += dx / d2;
                        disp[v].y += dy / d2;
                    }
                }
            }

            for &w in adj[v].iter().filter(|&&w| placed_flag[w]) {
                let dx = pos[v].x - pos[w].x;
                let dy = pos[v].y - pos[w].y;
                let d = dx.hypot(dy);
                disp[v].x -= dx * d;
                disp[v].y -= dy * d;
            }
        }

        apply_displacement(pos, &disp, temp);
    }
}

fn cell_of(p: &Point) -> (i64, i64) {
    (
        (p.x / LGL_CELL_SIZE).floor() as i64,
        (p.y / LGL_CELL_SIZE).floor() as i64,
    )
}
