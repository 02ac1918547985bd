//! Reingold-Tilford tree layout and its circular variant.
//!
//! Phases:
//!   1. Root selection: the highest-degree node of every component
//!   2. BFS spanning forest
//!   3. Bottom-up contour merge: siblings are pushed apart until their
//!      subtrees are at least one unit apart on every shared level, then
//!      the parent is centred over its first and last child
//!   4. Top-down accumulation of relative offsets into absolute x
//!
//! Component roots hang below a virtual root, so separate trees are packed
//! side by side with the same contour rule.

use std::f64::consts::TAU;

use super::graph::LayoutGraph;
use super::types::{Layout, Point};

/// Minimum horizontal distance between neighbouring subtrees.
pub const SIBLING_SEPARATION: f64 = 1.0;

/// Left and right outline of a subtree, one entry per level below (and
/// including) its root, relative to the root's x.
#[derive(Debug, Clone, Default)]
struct Contour {
    left: Vec<f64>,
    right: Vec<f64>,
}

impl Contour {
    fn leaf() -> Self {
        Self {
            left: vec![0.0],
            right: vec![0.0],
        }
    }

    /// Lay `children` out left to right. Returns the contour of the node
    /// they hang from and each child's offset relative to that node.
    fn stack(children: Vec<Contour>) -> (Contour, Vec<f64>) {
        let mut offsets = Vec::with_capacity(children.len());
        let mut acc = Contour::default();

        for child in children {
            let shift = if offsets.is_empty() {
                0.0
            } else {
                acc.right
                    .iter()
                    .zip(&child.left)
                    .map(|(r, l)| r - l + SIBLING_SEPARATION)
                    .fold(f64::NEG_INFINITY, f64::max)
            };
            let common = acc.right.len().min(child.right.len());
            for d in 0..common {
                acc.right[d] = child.right[d] + shift;
            }
            for d in common..child.left.len() {
                acc.left.push(child.left[d] + shift);
                acc.right.push(child.right[d] + shift);
            }
            offsets.push(shift);
        }

        let mid = match (offsets.first(), offsets.last()) {
            (Some(first), Some(last)) => (first + last) / 2.0,
            _ => 0.0,
        };
        for o in &mut offsets {
            *o -= mid;
        }

        let mut contour = Contour::leaf();
        contour.left.extend(acc.left.iter().map(|x| x - mid));
        contour.right.extend(acc.right.iter().map(|x| x - mid));
        (contour, offsets)
    }
}

/// Highest-degree node of every component, lowest index on ties.
pub fn tree_roots(graph: &LayoutGraph) -> Vec<usize> {
    graph
        .components()
        .iter()
        .filter_map(|component| {
            component
                .iter()
                .copied()
                .max_by(|&a, &b| graph.degree(a).cmp(&graph.degree(b)).then(b.cmp(&a)))
        })
        .collect()
}

/// Children lists of the BFS forest grown from `roots`, plus a top-down
/// visiting order and each node's depth.
fn bfs_forest(graph: &LayoutGraph, roots: &[usize]) -> (Vec<Vec<usize>>, Vec<usize>, Vec<usize>) {
    let n = graph.node_count();
    let mut children = vec![Vec::new(); n];
    let mut depth = vec![0; n];
    let mut order = Vec::with_capacity(n);

    for &root in roots {
        let tree = graph.bfs_tree(root);
        for (d, level) in tree.levels.iter().enumerate() {
            for &v in level {
                depth[v] = d;
                order.push(v);
                if let Some(&p) = tree.parent.get(&v) {
                    children[p].push(v);
                }
            }
        }
    }
    (children, order, depth)
}

pub fn reingold_tilford(graph: &LayoutGraph) -> Layout {
    let n = graph.node_count();
    if n == 0 {
        return Layout::default();
    }
    let roots = tree_roots(graph);
    let (children, order, depth) = bfs_forest(graph, &roots);

    let mut contours: Vec<Option<Contour>> = vec![None; n];
    let mut offset = vec![0.0; n];

    for &u in order.iter().rev() {
        let kids: Vec<Contour> = children[u]
            .iter()
            .map(|&c| contours[c].take().unwrap_or_else(Contour::leaf))
            .collect();
        let (contour, offsets) = Contour::stack(kids);
        for (&c, o) in children[u].iter().zip(offsets) {
            offset[c] = o;
        }
        contours[u] = Some(contour);
    }

    // Virtual root above all component roots.
    let tops: Vec<Contour> = roots
        .iter()
        .map(|&r| contours[r].take().unwrap_or_else(Contour::leaf))
        .collect();
    let (_, root_offsets) = Contour::stack(tops);

    let mut x = vec![0.0; n];
    for (&r, o) in roots.iter().zip(root_offsets) {
        x[r] = o;
    }
    for &u in &order {
        for &c in &children[u] {
            x[c] = x[u] + offset[c];
        }
    }

    Layout::new(
        (0..n)
            .map(|i| Point::new(x[i], depth[i] as f64))
            .collect(),
    )
}

/// [`reingold_tilford`] wrapped around the origin: the x range maps onto
/// the angle `0..2π(n-1)/n` and depth becomes the radius.
pub fn reingold_tilford_circular(graph: &LayoutGraph) -> Layout {
    let mut layout = reingold_tilford(graph);
    let n = layout.len();
    let Some(bbox) = layout.bounding_box() else {
        return layout;
    };
    let ratio = TAU * (n as f64 - 1.0) / n as f64;
    let width = bbox.width();
    for p in &mut layout.coords {
        let theta = if width > 0.0 {
            (p.x - bbox.left) * ratio / width
        } else {
            0.0
        };
        let r = p.y;
        *p = Point::new(r * theta.cos(), r * theta.sin());
    }
    layout
}
