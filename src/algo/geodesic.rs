//! Bounded shortest-path search on the surface graph.
//!
//! Geodesic distances along the surface are approximated by shortest
//! weighted paths on the edge graph. The search is abstracted behind the
//! [`ShortestPathWithCutoff`] trait so the patch extractor is agnostic to
//! the backing implementation; [`Dijkstra`] is the shipped backend.
//!
//! The cutoff matters for performance: the search is issued once per mesh
//! vertex, so a backend must stop expanding the frontier past the cutoff
//! rather than exploring the whole graph.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::graph::SurfaceGraph;

/// A single-source shortest-path search bounded by a distance cutoff.
///
/// Implementations return every vertex whose shortest weighted distance
/// from `source` is at most `cutoff`, paired with that distance. The source
/// itself is always included at distance zero (for `cutoff >= 0`).
///
/// Implementations must be thread-safe: [`compute_all_patches`] dispatches
/// searches across a worker pool with a shared backend reference.
///
/// [`compute_all_patches`]: crate::algo::patch::compute_all_patches
pub trait ShortestPathWithCutoff: Send + Sync {
    /// Vertices reachable from `source` within `cutoff`, with distances.
    ///
    /// `source` is a valid node id of `graph` and `cutoff` is non-negative;
    /// both are validated by the caller.
    fn reachable_within(&self, graph: &SurfaceGraph, source: usize, cutoff: f64)
        -> Vec<(usize, f64)>;
}

/// Dijkstra's algorithm with an explicit distance cutoff.
///
/// Distances are kept in a hash map rather than a dense per-vertex array so
/// the per-search cost scales with the patch size, not the mesh size.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

/// Entry in the search priority queue.
#[derive(Debug, Clone)]
struct SearchEntry {
    vertex: usize,
    distance: f64,
}

impl PartialEq for SearchEntry {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl Eq for SearchEntry {}

impl PartialOrd for SearchEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
    }
}

impl ShortestPathWithCutoff for Dijkstra {
    fn reachable_within(
        &self,
        graph: &SurfaceGraph,
        source: usize,
        cutoff: f64,
    ) -> Vec<(usize, f64)> {
        let mut distances: HashMap<usize, f64> = HashMap::new();
        let mut heap = BinaryHeap::new();
        let mut reached = Vec::new();

        distances.insert(source, 0.0);
        heap.push(SearchEntry {
            vertex: source,
            distance: 0.0,
        });

        while let Some(SearchEntry { vertex: u, distance: dist_u }) = heap.pop() {
            // Skip if this is a stale entry (a shorter path was found already)
            if dist_u > distances[&u] {
                continue;
            }

            reached.push((u, dist_u));

            for &(v, weight) in graph.neighbors(u) {
                let new_dist = dist_u + weight;
                if new_dist > cutoff {
                    continue;
                }
                if distances.get(&v).map_or(true, |&cur| new_dist < cur) {
                    distances.insert(v, new_dist);
                    heap.push(SearchEntry {
                        vertex: v,
                        distance: new_dist,
                    });
                }
            }
        }

        reached
    }
}
