//! # Surfpatch
//!
//! Geodesic patch extraction and scoring for molecular surface meshes.
//!
//! Protein-interface analysis works with "patches": local regions of a
//! molecular surface within a geodesic radius of a center vertex. Given a
//! triangulated surface with per-vertex scalar features (interface
//! probability, charge, hydrophobicity, hydrogen-bond potential), this
//! crate builds the weighted edge graph of the mesh, extracts a geodesic
//! patch around every vertex, scores each patch by a weighted combination
//! of mean features, and selects the top-K patches for downstream
//! visualization or export.
//!
//! Mesh loading and on-screen drawing are deliberately out of scope: the
//! mesh arrives as plain position/face/attribute arrays from a loader, and
//! the [`TopKResult`](result::TopKResult) leaves as plain index/score
//! arrays (JSON-serializable) for a renderer.
//!
//! ## Quick Start
//!
//! ```
//! use surfpatch::prelude::*;
//! use nalgebra::Point3;
//!
//! // A flat square: four vertices, two triangles.
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2], [1, 3, 2]];
//!
//! let mut mesh = SurfaceMesh::new(vertices, faces).unwrap();
//! mesh.set_feature("iface", vec![0.9, 0.4, 0.7, 0.2]).unwrap();
//!
//! let engine = PatchEngine::new(mesh);
//! let result = engine
//!     .get_top_patches(&TopPatchOptions::new().with_top_k(2).with_radius(1.5))
//!     .unwrap();
//!
//! for (center, score, members) in result.iter() {
//!     println!("patch at {center}: score {score:.3}, {} vertices", members.len());
//! }
//! ```
//!
//! ## Lower-level pieces
//!
//! Each pipeline stage is usable on its own:
//!
//! ```
//! use surfpatch::prelude::*;
//! use surfpatch::algo::patch::{extract_patch, score_patch};
//! use nalgebra::Point3;
//!
//! # let vertices = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(0.5, 1.0, 0.0),
//! # ];
//! # let mesh = SurfaceMesh::new(vertices, vec![[0, 1, 2]]).unwrap();
//! let graph = SurfaceGraph::build(&mesh);
//! let patch = extract_patch(&graph, 0, 1.2).unwrap();
//! let score = score_patch(mesh.features(), &patch, &FeatureWeights::default());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod engine;
pub mod error;
pub mod graph;
pub mod mesh;
pub mod result;
pub mod session;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use surfpatch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::geodesic::{Dijkstra, ShortestPathWithCutoff};
    pub use crate::algo::patch::{
        compute_all_patches, extract_patch, select_top_k, CenterFilter, FeatureWeights, Patch,
        PatchOptions,
    };
    pub use crate::algo::Progress;
    pub use crate::engine::{PatchEngine, TopPatchOptions};
    pub use crate::error::{PatchError, Result};
    pub use crate::graph::SurfaceGraph;
    pub use crate::mesh::{FeatureTable, SurfaceMesh, SCORED_FEATURES};
    pub use crate::result::TopKResult;
    pub use crate::session::PatchSession;
}

// Re-export nalgebra types for convenience
pub use nalgebra;
