//! Weighted surface graph construction.
//!
//! The surface graph is the engine's derived, read-only view of a mesh:
//! nodes are vertex ids, an edge joins `u` and `v` iff some triangle has
//! both as corners, and the edge weight is the Euclidean distance between
//! the two positions at build time. Shortest paths on this graph
//! approximate geodesic distances on the surface.
//!
//! # Example
//!
//! ```
//! use surfpatch::mesh::SurfaceMesh;
//! use surfpatch::graph::SurfaceGraph;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let mesh = SurfaceMesh::new(vertices, vec![[0, 1, 2]]).unwrap();
//!
//! let graph = SurfaceGraph::build(&mesh);
//! assert_eq!(graph.num_vertices(), 3);
//! assert_eq!(graph.num_edges(), 3);
//! ```

use std::collections::HashSet;

use crate::mesh::SurfaceMesh;

/// An undirected weighted graph over a mesh's vertices.
///
/// Stored as adjacency lists; no parallel edges, no self-loops. Vertices
/// with no incident faces are valid zero-degree nodes whose patch is just
/// themselves.
#[derive(Debug, Clone)]
pub struct SurfaceGraph {
    adjacency: Vec<Vec<(usize, f64)>>,
    num_edges: usize,
}

impl SurfaceGraph {
    /// Build the surface graph from a validated mesh.
    ///
    /// For each face, each of its three cyclic corner pairs becomes an
    /// undirected edge weighted by Euclidean distance, inserted once.
    /// Degenerate faces (fewer than three distinct corners) are skipped.
    /// Pure function of the mesh geometry and topology.
    pub fn build(mesh: &SurfaceMesh) -> Self {
        let n = mesh.num_vertices();
        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut num_edges = 0;

        for face in mesh.faces() {
            if face[0] == face[1] || face[1] == face[2] || face[0] == face[2] {
                continue;
            }

            for i in 0..3 {
                let u = face[i];
                let v = face[(i + 1) % 3];
                let key = (u.min(v), u.max(v));
                if !seen.insert(key) {
                    continue;
                }
                let weight = mesh.distance(u, v);
                adjacency[u].push((v, weight));
                adjacency[v].push((u, weight));
                num_edges += 1;
            }
        }

        Self { adjacency, num_edges }
    }

    /// Number of nodes (equals the mesh's vertex count).
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Neighbors of `vertex` with edge weights.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range; callers validate ids at the
    /// public API boundary.
    #[inline]
    pub fn neighbors(&self, vertex: usize) -> &[(usize, f64)] {
        &self.adjacency[vertex]
    }

    /// Number of edges incident to `vertex`.
    #[inline]
    pub fn degree(&self, vertex: usize) -> usize {
        self.adjacency[vertex].len()
    }

    /// Whether `vertex` is a valid node id.
    #[inline]
    pub fn contains(&self, vertex: usize) -> bool {
        vertex < self.adjacency.len()
    }
}
