//! Geodesic patch extraction.
//!
//! A patch is the set of vertices within a geodesic radius of a center
//! vertex. This module extracts a single patch ([`extract_patch`]) or one
//! patch per mesh vertex ([`compute_all_patches`]); the latter is the
//! dominant cost path and supports parallel dispatch, periodic progress
//! reporting, and cooperative cancellation.
//!
//! # Example
//!
//! ```
//! use surfpatch::mesh::SurfaceMesh;
//! use surfpatch::graph::SurfaceGraph;
//! use surfpatch::algo::patch::{compute_all_patches, extract_patch, PatchOptions};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let mesh = SurfaceMesh::new(vertices, vec![[0, 1, 2]]).unwrap();
//! let graph = SurfaceGraph::build(&mesh);
//!
//! let patch = extract_patch(&graph, 0, 1.1).unwrap();
//! assert!(patch.contains(0) && patch.contains(1));
//!
//! let patches = compute_all_patches(&graph, &PatchOptions::new(1.1)).unwrap();
//! assert_eq!(patches.len(), 3);
//! ```

mod score;
mod select;

pub use score::{score_all, score_patch, FeatureWeights};
pub use select::{select_top_k, CenterFilter};

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::algo::geodesic::{Dijkstra, ShortestPathWithCutoff};
use crate::algo::Progress;
use crate::error::{PatchError, Result};
use crate::graph::SurfaceGraph;

/// How often [`compute_all_patches`] reports progress, in completed
/// vertices.
pub const PROGRESS_INTERVAL: usize = 1000;

/// A local surface region: a center vertex and every vertex within a
/// geodesic radius of it.
///
/// Patches are immutable once created. Members are stored sorted by vertex
/// id and always include the center (at distance zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    center: usize,
    members: Vec<usize>,
}

impl Patch {
    fn new(center: usize, mut members: Vec<usize>) -> Self {
        members.sort_unstable();
        Self { center, members }
    }

    /// The center vertex id.
    #[inline]
    pub fn center(&self) -> usize {
        self.center
    }

    /// Member vertex ids, sorted ascending.
    #[inline]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Number of member vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the patch has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `vertex` belongs to the patch.
    pub fn contains(&self, vertex: usize) -> bool {
        self.members.binary_search(&vertex).is_ok()
    }
}

/// Options for [`compute_all_patches`].
#[derive(Debug)]
pub struct PatchOptions {
    /// Geodesic radius. Must be non-negative; radius 0 yields singleton
    /// patches.
    pub radius: f64,

    /// Whether to dispatch per-vertex searches across the rayon pool
    /// (default: true). The result order is the same either way.
    pub parallel: bool,

    /// Progress callback, invoked every [`PROGRESS_INTERVAL`] completed
    /// vertices.
    pub progress: Progress,

    /// Optional cancellation flag, checked between per-vertex searches.
    /// When it reads true the computation stops with
    /// [`PatchError::Cancelled`] and no partial results.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl PatchOptions {
    /// Create options for the given geodesic radius.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            parallel: true,
            progress: Progress::none(),
            cancel: None,
        }
    }

    /// Force single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the progress callback.
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    /// Set a cancellation flag.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }
}

fn validate_radius(radius: f64) -> Result<()> {
    if radius.is_nan() || radius < 0.0 {
        return Err(PatchError::invalid_param(
            "radius",
            radius,
            "must be non-negative",
        ));
    }
    Ok(())
}

/// Extract the patch around `center` using the default [`Dijkstra`] backend.
///
/// # Errors
///
/// [`PatchError::VertexOutOfRange`] if `center` is not a valid node;
/// [`PatchError::InvalidParameter`] if `radius` is negative.
pub fn extract_patch(graph: &SurfaceGraph, center: usize, radius: f64) -> Result<Patch> {
    extract_patch_with(&Dijkstra, graph, center, radius)
}

/// Extract the patch around `center` using a caller-supplied search backend.
pub fn extract_patch_with(
    search: &dyn ShortestPathWithCutoff,
    graph: &SurfaceGraph,
    center: usize,
    radius: f64,
) -> Result<Patch> {
    validate_radius(radius)?;
    if !graph.contains(center) {
        return Err(PatchError::VertexOutOfRange {
            vertex: center,
            num_vertices: graph.num_vertices(),
        });
    }

    let reached = search.reachable_within(graph, center, radius);
    let members = reached.into_iter().map(|(v, _)| v).collect();
    Ok(Patch::new(center, members))
}

/// Compute one patch per vertex, in ascending vertex-id order, using the
/// default [`Dijkstra`] backend.
pub fn compute_all_patches(graph: &SurfaceGraph, options: &PatchOptions) -> Result<Vec<Patch>> {
    compute_all_patches_with(&Dijkstra, graph, options)
}

/// Compute one patch per vertex using a caller-supplied search backend.
///
/// Each per-vertex search reads only the immutable graph, so with
/// `options.parallel` the searches run on the rayon pool; the returned
/// sequence is indexed by vertex id in ascending order regardless.
///
/// # Errors
///
/// [`PatchError::InvalidParameter`] for a negative radius;
/// [`PatchError::Cancelled`] if the cancellation flag trips.
pub fn compute_all_patches_with(
    search: &dyn ShortestPathWithCutoff,
    graph: &SurfaceGraph,
    options: &PatchOptions,
) -> Result<Vec<Patch>> {
    validate_radius(options.radius)?;

    let n = graph.num_vertices();

    if options.parallel {
        let completed = AtomicUsize::new(0);
        (0..n)
            .into_par_iter()
            .map(|center| {
                if let Some(flag) = &options.cancel {
                    if flag.load(Ordering::Relaxed) {
                        return Err(PatchError::Cancelled);
                    }
                }
                let patch = extract_patch_with(search, graph, center, options.radius)?;
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if done % PROGRESS_INTERVAL == 0 {
                    options.progress.report(done, n);
                }
                Ok(patch)
            })
            .collect()
    } else {
        let mut patches = Vec::with_capacity(n);
        for center in 0..n {
            if let Some(flag) = &options.cancel {
                if flag.load(Ordering::Relaxed) {
                    return Err(PatchError::Cancelled);
                }
            }
            patches.push(extract_patch_with(search, graph, center, options.radius)?);
            let done = center + 1;
            if done % PROGRESS_INTERVAL == 0 {
                options.progress.report(done, n);
            }
        }
        Ok(patches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::SurfaceMesh;
    use nalgebra::Point3;

    fn square_graph() -> SurfaceGraph {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2], [1, 3, 2]];
        SurfaceGraph::build(&SurfaceMesh::new(vertices, faces).unwrap())
    }

    fn grid_graph(n: usize) -> SurfaceGraph {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        for j in 0..=n {
            for i in 0..=n {
                vertices.push(Point3::new(i as f64, j as f64, 0.0));
            }
        }
        for j in 0..n {
            for i in 0..n {
                let v00 = j * (n + 1) + i;
                let v10 = v00 + 1;
                let v01 = v00 + (n + 1);
                let v11 = v01 + 1;
                faces.push([v00, v10, v11]);
                faces.push([v00, v11, v01]);
            }
        }
        SurfaceGraph::build(&SurfaceMesh::new(vertices, faces).unwrap())
    }

    #[test]
    fn test_patch_contains_center() {
        let graph = square_graph();
        for center in 0..4 {
            for &radius in &[0.0, 0.5, 1.5, 10.0] {
                let patch = extract_patch(&graph, center, radius).unwrap();
                assert!(patch.contains(center), "center {center} radius {radius}");
            }
        }
    }

    #[test]
    fn test_radius_zero_is_singleton() {
        let graph = square_graph();
        let patch = extract_patch(&graph, 2, 0.0).unwrap();
        assert_eq!(patch.members(), &[2]);
    }

    #[test]
    fn test_square_radius_covers_all() {
        // Max pairwise geodesic distance on the unit square is sqrt(2).
        let graph = square_graph();
        let patch = extract_patch(&graph, 0, 1.5).unwrap();
        assert_eq!(patch.members(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_monotone_in_radius() {
        let graph = grid_graph(4);
        for center in 0..graph.num_vertices() {
            let small = extract_patch(&graph, center, 1.2).unwrap();
            let large = extract_patch(&graph, center, 2.7).unwrap();
            for &v in small.members() {
                assert!(large.contains(v));
            }
        }
    }

    #[test]
    fn test_negative_radius_rejected() {
        let graph = square_graph();
        assert!(matches!(
            extract_patch(&graph, 0, -1.0),
            Err(PatchError::InvalidParameter { name: "radius", .. })
        ));
    }

    #[test]
    fn test_center_out_of_range() {
        let graph = square_graph();
        assert!(matches!(
            extract_patch(&graph, 9, 1.0),
            Err(PatchError::VertexOutOfRange { vertex: 9, num_vertices: 4 })
        ));
    }

    #[test]
    fn test_all_patches_ordered_by_center() {
        let graph = grid_graph(3);
        let patches = compute_all_patches(&graph, &PatchOptions::new(1.5)).unwrap();

        assert_eq!(patches.len(), graph.num_vertices());
        for (i, patch) in patches.iter().enumerate() {
            assert_eq!(patch.center(), i);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let graph = grid_graph(5);
        let parallel = compute_all_patches(&graph, &PatchOptions::new(2.2)).unwrap();
        let sequential =
            compute_all_patches(&graph, &PatchOptions::new(2.2).sequential()).unwrap();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_cancellation() {
        let graph = grid_graph(3);
        let flag = Arc::new(AtomicBool::new(true));
        let options = PatchOptions::new(1.0).with_cancel_flag(flag);

        assert!(matches!(
            compute_all_patches(&graph, &options),
            Err(PatchError::Cancelled)
        ));
    }

    #[test]
    fn test_fake_backend() {
        // A deterministic stand-in that reaches only the source, whatever
        // the radius.
        struct SourceOnly;
        impl ShortestPathWithCutoff for SourceOnly {
            fn reachable_within(
                &self,
                _graph: &SurfaceGraph,
                source: usize,
                _cutoff: f64,
            ) -> Vec<(usize, f64)> {
                vec![(source, 0.0)]
            }
        }

        let graph = square_graph();
        let patches =
            compute_all_patches_with(&SourceOnly, &graph, &PatchOptions::new(99.0)).unwrap();
        for (i, patch) in patches.iter().enumerate() {
            assert_eq!(patch.members(), &[i]);
        }
    }
}
