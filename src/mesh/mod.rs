//! Molecular surface mesh representation.
//!
//! A [`SurfaceMesh`] is a triangulated surface: an ordered sequence of 3D
//! vertex positions, an ordered sequence of triangular faces indexing into
//! it, and a [`FeatureTable`] of named per-vertex scalar attributes
//! (interface probability, charge, hydrophobicity, hydrogen-bond potential).
//!
//! The mesh is supplied by an external loader; this crate never parses mesh
//! file formats itself.
//!
//! # Example
//!
//! ```
//! use surfpatch::mesh::SurfaceMesh;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let mut mesh = SurfaceMesh::new(vertices, faces).unwrap();
//! mesh.set_feature("iface", vec![0.9, 0.1, 0.4]).unwrap();
//! assert_eq!(mesh.num_vertices(), 3);
//! ```

mod features;

pub use features::{FeatureTable, SCORED_FEATURES};

use nalgebra::Point3;

use crate::error::{PatchError, Result};

/// A triangulated molecular surface with per-vertex scalar features.
///
/// Vertex ids are indices into the position sequence and are stable for the
/// lifetime of the mesh. Construction validates that every face index is in
/// range; faces with repeated corners are legal input and are skipped when
/// the surface graph is built.
#[derive(Debug, Clone)]
pub struct SurfaceMesh {
    positions: Vec<Point3<f64>>,
    faces: Vec<[usize; 3]>,
    features: FeatureTable,
}

impl SurfaceMesh {
    /// Create a mesh from vertex positions and triangle faces.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::InvalidVertexIndex`] if any face references a
    /// vertex index outside `[0, num_vertices)`.
    pub fn new(positions: Vec<Point3<f64>>, faces: Vec<[usize; 3]>) -> Result<Self> {
        for (fi, face) in faces.iter().enumerate() {
            for &vi in face {
                if vi >= positions.len() {
                    return Err(PatchError::InvalidVertexIndex { face: fi, vertex: vi });
                }
            }
        }

        let features = FeatureTable::new(positions.len());
        Ok(Self { positions, faces, features })
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Vertex positions, indexed by vertex id.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Position of a single vertex.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::VertexOutOfRange`] for an invalid vertex id.
    pub fn position(&self, vertex: usize) -> Result<&Point3<f64>> {
        self.positions.get(vertex).ok_or(PatchError::VertexOutOfRange {
            vertex,
            num_vertices: self.positions.len(),
        })
    }

    /// Triangle faces as vertex-index triples.
    #[inline]
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// The per-vertex feature table.
    #[inline]
    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    /// Set (or replace) a named per-vertex attribute.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::AttributeLengthMismatch`] if `values` does not
    /// have exactly one entry per vertex.
    pub fn set_feature(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        self.features.insert(name, values)
    }

    /// Euclidean distance between two vertices.
    ///
    /// Both ids must be in range; callers validate before use.
    #[inline]
    pub(crate) fn distance(&self, u: usize, v: usize) -> f64 {
        (self.positions[u] - self.positions[v]).norm()
    }
}
