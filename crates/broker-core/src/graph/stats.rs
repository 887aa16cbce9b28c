//! Summary statistics for a structural view.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: size of the view. Every view of one
//!   node table has the same node count.
//! - **excluded_edge_count**: edges the view's filter rejected.
//! - **self_loop_count**: edges `v → v`.
//! - **parallel_edge_count**: edges repeating an earlier `(source, target)`
//!   pair. They are kept in adjacency but add no reachability.
//! - **weakly_connected_component_count**: components when edge direction
//!   is ignored. Isolated nodes count as their own component.
//! - **isolated_node_count**: nodes with no in- or out-edges.
//! - **max_in_degree** / **max_out_degree**: counted with multiplicity.
//! - **density**: `edge_count / (node_count * (node_count - 1))`, zero for
//!   graphs with fewer than two nodes.
//! - **fingerprint**: BLAKE3 of the edge list, for comparing runs.

use serde::Serialize;

use crate::graph::store::DirectedGraphStore;
use crate::graph::view::GraphView;

/// Summary statistics for one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewStats {
    pub label: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub excluded_edge_count: usize,
    pub self_loop_count: usize,
    pub parallel_edge_count: usize,
    pub weakly_connected_component_count: usize,
    pub isolated_node_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    pub density: f64,
    pub fingerprint: String,
}

impl ViewStats {
    #[must_use]
    pub fn from_view(view: &GraphView) -> Self {
        let mut stats = Self::from_store(&view.label, &view.store);
        stats.excluded_edge_count = view.excluded_edges;
        stats
    }

    #[must_use]
    pub fn from_store(label: &str, store: &DirectedGraphStore) -> Self {
        let node_count = store.node_count();
        let edges = store.edges();

        let self_loop_count = edges.iter().filter(|(s, t)| s == t).count();

        let mut sorted = edges.to_vec();
        sorted.sort_unstable();
        let parallel_edge_count = sorted.windows(2).filter(|w| w[0] == w[1]).count();

        // In-degrees come from the edge list; the reverse adjacency stays
        // unbuilt unless a traversal asked for it.
        let forward = store.forward();
        let mut in_degree = vec![0_usize; node_count];
        for &(_, target) in edges {
            in_degree[target] += 1;
        }
        let isolated_node_count = (0..node_count)
            .filter(|&v| forward.degree(v) == 0 && in_degree[v] == 0)
            .count();
        let max_out_degree = (0..node_count).map(|v| forward.degree(v)).max().unwrap_or(0);
        let max_in_degree = in_degree.iter().copied().max().unwrap_or(0);

        Self {
            label: label.to_string(),
            node_count,
            edge_count: edges.len(),
            excluded_edge_count: 0,
            self_loop_count,
            parallel_edge_count,
            weakly_connected_component_count: weak_components(node_count, edges),
            isolated_node_count,
            max_in_degree,
            max_out_degree,
            density: compute_density(node_count, edges.len()),
            fingerprint: fingerprint(edges),
        }
    }
}

/// Union-find component count, ignoring direction.
fn weak_components(node_count: usize, edges: &[(usize, usize)]) -> usize {
    fn find(parent: &mut [usize], mut x: usize) -> usize {
        while parent[x] != x {
            parent[x] = parent[parent[x]];
            x = parent[x];
        }
        x
    }

    let mut parent: Vec<usize> = (0..node_count).collect();
    let mut components = node_count;
    for &(s, t) in edges {
        let (a, b) = (find(&mut parent, s), find(&mut parent, t));
        if a != b {
            parent[a] = b;
            components -= 1;
        }
    }
    components
}

fn fingerprint(edges: &[(usize, usize)]) -> String {
    let mut hasher = blake3::Hasher::new();
    for &(source, target) in edges {
        hasher.update(&(source as u64).to_le_bytes());
        hasher.update(&(target as u64).to_le_bytes());
    }
    format!("blake3:{}", hasher.finalize().to_hex())
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    edge_count as f64 / max_edges
}
