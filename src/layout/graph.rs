//! LayoutGraph — converts a CX network into a petgraph UnGraph for layout.
//!
//! Layout algorithms address nodes by position (`0..node_count`), which is
//! the order the nodes appear in the CX `nodes` aspect. Edge direction
//! carries no meaning for any supported layout, so the graph is undirected.

use std::collections::HashMap;

use petgraph::algo::{connected_components, dijkstra};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::{Bfs, EdgeRef};
use tracing::debug;

use crate::cx::CxNetwork;

/// Node data stored in the petgraph UnGraph.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// CX `@id` of the node.
    pub cx_id: i64,
    pub name: Option<String>,
}

/// Graph handed to the layout algorithms.
#[derive(Debug, Clone, Default)]
pub struct LayoutGraph {
    pub graph: UnGraph<NodeData, ()>,
    /// Maps CX node id → petgraph NodeIndex.
    pub node_index: HashMap<i64, NodeIndex>,
}

impl LayoutGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a LayoutGraph from a parsed CX network.
    ///
    /// Duplicate node ids keep their first occurrence. Edges that point at
    /// unknown nodes are dropped.
    pub fn from_cx(net: &CxNetwork) -> Self {
        let mut g = Self::new();
        for node in &net.nodes {
            g.add_node(node.id, node.name.clone());
        }
        for edge in &net.edges {
            if !g.add_edge(edge.source, edge.target) {
                debug!(
                    edge = edge.id,
                    source = edge.source,
                    target = edge.target,
                    "skipping edge with unknown endpoint"
                );
            }
        }
        g
    }

    /// Add a node. No-op if a node with the same id already exists.
    pub fn add_node(&mut self, cx_id: i64, name: Option<String>) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&cx_id) {
            return idx;
        }
        let idx = self.graph.add_node(NodeData { cx_id, name });
        self.node_index.insert(cx_id, idx);
        idx
    }

    /// Add an edge between two existing nodes. Returns false when either
    /// endpoint is unknown.
    pub fn add_edge(&mut self, source: i64, target: i64) -> bool {
        match (self.node_index.get(&source), self.node_index.get(&target)) {
            (Some(&a), Some(&b)) => {
                self.graph.add_edge(a, b, ());
                true
            }
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// CX ids in node order.
    pub fn node_ids(&self) -> Vec<i64> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].cx_id)
            .collect()
    }

    /// Distinct neighbours of node `i`, sorted, self-loops excluded.
    pub fn neighbors(&self, i: usize) -> Vec<usize> {
        let mut result: Vec<usize> = self
            .graph
            .neighbors(NodeIndex::new(i))
            .map(NodeIndex::index)
            .filter(|&j| j != i)
            .collect();
        result.sort_unstable();
        result.dedup();
        result
    }

    /// Number of distinct neighbours of node `i`.
    pub fn degree(&self, i: usize) -> usize {
        self.neighbors(i).len()
    }

    /// Every edge once as `(a, b)` with `a < b`; self-loops excluded,
    /// parallel edges kept.
    pub fn edge_pairs(&self) -> Vec<(usize, usize)> {
        self.graph
            .edge_references()
            .filter_map(|e| {
                let (a, b) = (e.source().index(), e.target().index());
                match a.cmp(&b) {
                    std::cmp::Ordering::Less => Some((a, b)),
                    std::cmp::Ordering::Greater => Some((b, a)),
                    std::cmp::Ordering::Equal => None,
                }
            })
            .collect()
    }

    /// Adjacency lists for all nodes (see [`LayoutGraph::neighbors`]).
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        (0..self.node_count()).map(|i| self.neighbors(i)).collect()
    }

    /// True for the empty graph and for graphs with a single component.
    pub fn is_connected(&self) -> bool {
        connected_components(&self.graph) <= 1
    }

    /// Connected components, each sorted, ordered by their smallest node.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut seen = vec![false; self.node_count()];
        let mut result = Vec::new();
        for start in self.graph.node_indices() {
            if seen[start.index()] {
                continue;
            }
            let mut members = Vec::new();
            let mut bfs = Bfs::new(&self.graph, start);
            while let Some(v) = bfs.next(&self.graph) {
                seen[v.index()] = true;
                members.push(v.index());
            }
            members.sort_unstable();
            result.push(members);
        }
        result
    }

    /// Hop distance from `source` to every node, `None` when unreachable.
    pub fn bfs_distances(&self, source: usize) -> Vec<Option<usize>> {
        let mut dist = vec![None; self.node_count()];
        if source >= dist.len() {
            return dist;
        }
        for (v, d) in dijkstra(&self.graph, NodeIndex::new(source), None, |_| 1usize) {
            dist[v.index()] = Some(d);
        }
        dist
    }

    /// All-pairs hop distances.
    pub fn all_pairs_distances(&self) -> Vec<Vec<Option<usize>>> {
        (0..self.node_count()).map(|s| self.bfs_distances(s)).collect()
    }

    /// Breadth-first spanning tree of the component containing `root`.
    ///
    /// Each non-root node hangs from its lowest-index neighbour one level up.
    pub fn bfs_tree(&self, root: usize) -> BfsTree {
        let dist = self.bfs_distances(root);
        let mut tree = BfsTree::default();
        for (v, d) in dist.iter().enumerate() {
            let Some(d) = *d else {
                continue;
            };
            if tree.levels.len() <= d {
                tree.levels.resize_with(d + 1, Vec::new);
            }
            tree.levels[d].push(v);
            if d > 0 {
                let parent = self
                    .neighbors(v)
                    .into_iter()
                    .find(|&u| dist[u] == Some(d - 1));
                if let Some(parent) = parent {
                    tree.parent.insert(v, parent);
                }
            }
        }
        tree
    }
}

/// Result of [`LayoutGraph::bfs_tree`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BfsTree {
    /// Nodes by hop distance from the root, each level sorted.
    pub levels: Vec<Vec<usize>>,
    /// Parent of every reached node except the root.
    pub parent: HashMap<usize, usize>,
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_graph.rs"]
mod tests;
