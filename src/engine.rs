//! The patch query engine.
//!
//! [`PatchEngine`] is the query context tying everything together: it owns
//! a [`SurfaceMesh`], the [`SurfaceGraph`] derived from it, and the
//! shortest-path backend, and answers [`get_top_patches`] queries — the
//! full pipeline of per-vertex patch extraction, scoring, interface-cutoff
//! filtering, and top-K selection.
//!
//! [`get_top_patches`]: PatchEngine::get_top_patches
//!
//! # Example
//!
//! ```
//! use surfpatch::engine::{PatchEngine, TopPatchOptions};
//! use surfpatch::mesh::SurfaceMesh;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2], [1, 3, 2]];
//! let mut mesh = SurfaceMesh::new(vertices, faces).unwrap();
//! mesh.set_feature("iface", vec![1.0; 4]).unwrap();
//!
//! let engine = PatchEngine::new(mesh);
//! let options = TopPatchOptions::new().with_top_k(2).with_radius(1.5);
//! let result = engine.get_top_patches(&options).unwrap();
//! assert_eq!(result.centers, vec![0, 1]);
//! ```

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use log::{debug, info};

use crate::algo::geodesic::{Dijkstra, ShortestPathWithCutoff};
use crate::algo::patch::{
    compute_all_patches_with, score_all, select_top_k, CenterFilter, FeatureWeights, Patch,
    PatchOptions,
};
use crate::algo::Progress;
use crate::error::{PatchError, Result};
use crate::graph::SurfaceGraph;
use crate::mesh::SurfaceMesh;
use crate::result::TopKResult;

/// Options for [`PatchEngine::get_top_patches`].
///
/// Defaults match interactive interface analysis: 100 patches at a 9 Å
/// geodesic radius, no center filtering, default feature weights.
#[derive(Debug)]
pub struct TopPatchOptions {
    /// Maximum number of patches to return. Must be at least 1.
    pub top_k: usize,

    /// Geodesic patch radius (Å). Must be non-negative.
    pub radius: f64,

    /// Minimum interface value at the patch center. Values ≤ 0 disable the
    /// filter and make every vertex an eligible center.
    pub iface_cutoff: f64,

    /// Feature weights; `None` uses [`FeatureWeights::default`].
    pub weights: Option<FeatureWeights>,

    /// Whether to run the per-vertex searches on the rayon pool.
    pub parallel: bool,

    /// Progress callback for the patch-computation phase.
    pub progress: Progress,

    /// Optional cancellation flag, checked between per-vertex searches.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl TopPatchOptions {
    /// Create options with the default parameters.
    pub fn new() -> Self {
        Self {
            top_k: 100,
            radius: 9.0,
            iface_cutoff: 0.0,
            weights: None,
            parallel: true,
            progress: Progress::none(),
            cancel: None,
        }
    }

    /// Set the number of patches to return.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the geodesic radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Require a minimum interface value at patch centers.
    pub fn with_iface_cutoff(mut self, cutoff: f64) -> Self {
        self.iface_cutoff = cutoff;
        self
    }

    /// Override the feature weights.
    pub fn with_weights(mut self, weights: FeatureWeights) -> Self {
        self.weights = Some(weights);
        self
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

impl Default for TopPatchOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Query context owning a mesh, its derived surface graph, and the
/// shortest-path backend.
///
/// The graph is built once at construction and is read-only thereafter;
/// queries allocate fresh patches and results owned by the caller.
pub struct PatchEngine {
    mesh: SurfaceMesh,
    graph: SurfaceGraph,
    backend: Option<Box<dyn ShortestPathWithCutoff>>,
}

impl PatchEngine {
    /// Create an engine with the default [`Dijkstra`] backend.
    pub fn new(mesh: SurfaceMesh) -> Self {
        Self::with_backend(mesh, Some(Box::new(Dijkstra)))
    }

    /// Create an engine with a caller-supplied search backend.
    ///
    /// Passing `None` produces an engine with no shortest-path capability;
    /// every query fails fast with [`PatchError::MissingBackend`] rather
    /// than silently degrading.
    pub fn with_backend(
        mesh: SurfaceMesh,
        backend: Option<Box<dyn ShortestPathWithCutoff>>,
    ) -> Self {
        let graph = SurfaceGraph::build(&mesh);
        debug!(
            "surface graph: {} vertices, {} edges",
            graph.num_vertices(),
            graph.num_edges()
        );
        Self { mesh, graph, backend }
    }

    /// The underlying mesh.
    #[inline]
    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    /// The derived surface graph.
    #[inline]
    pub fn graph(&self) -> &SurfaceGraph {
        &self.graph
    }

    fn backend(&self) -> Result<&dyn ShortestPathWithCutoff> {
        self.backend.as_deref().ok_or(PatchError::MissingBackend)
    }

    /// Compute one patch per vertex at the given options.
    pub fn compute_all_patches(&self, options: &PatchOptions) -> Result<Vec<Patch>> {
        compute_all_patches_with(self.backend()?, &self.graph, options)
    }

    /// Compute, score, filter, and rank patches for every vertex.
    ///
    /// Either fully succeeds or fails atomically; no partial results.
    ///
    /// # Errors
    ///
    /// [`PatchError::InvalidParameter`] for `top_k == 0` or a negative
    /// radius; [`PatchError::MissingBackend`] if the engine has no search
    /// backend; [`PatchError::Cancelled`] if the cancellation flag trips.
    pub fn get_top_patches(&self, options: &TopPatchOptions) -> Result<TopKResult> {
        if options.top_k == 0 {
            return Err(PatchError::invalid_param(
                "top_k",
                options.top_k,
                "must be at least 1",
            ));
        }
        let backend = self.backend()?;

        info!(
            "computing patches for {} vertices at radius {}",
            self.graph.num_vertices(),
            options.radius
        );
        let patch_options = PatchOptions {
            radius: options.radius,
            parallel: options.parallel,
            progress: options.progress.clone(),
            cancel: options.cancel.clone(),
        };
        let patches = compute_all_patches_with(backend, &self.graph, &patch_options)?;

        debug!("scoring {} patches", patches.len());
        let weights = options.weights.unwrap_or_default();
        let scores = score_all(self.mesh.features(), &patches, &weights);

        let filter = (options.iface_cutoff > 0.0).then_some(CenterFilter {
            feature: "iface",
            min_value: options.iface_cutoff,
        });

        let result = select_top_k(&patches, &scores, options.top_k, filter, self.mesh.features())?;
        info!("selected {} patches", result.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    /// The flat square from the interface-analysis acceptance examples:
    /// four corners, two triangles, uniform interface value 1.0.
    fn square_mesh() -> SurfaceMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2], [1, 3, 2]];
        let mut mesh = SurfaceMesh::new(vertices, faces).unwrap();
        mesh.set_feature("iface", vec![1.0; 4]).unwrap();
        mesh
    }

    #[test]
    fn test_square_full_radius() {
        let engine = PatchEngine::new(square_mesh());
        let options = TopPatchOptions::new()
            .with_top_k(2)
            .with_radius(1.5)
            .with_weights(FeatureWeights::new(1.0, 0.0, 0.0, 0.0));

        let result = engine.get_top_patches(&options).unwrap();

        // Max pairwise distance is sqrt(2) <= 1.5, so every patch covers the
        // whole square and scores 1.0; ties resolve to the lowest centers.
        assert_eq!(result.centers, vec![0, 1]);
        assert_eq!(result.scores, vec![1.0, 1.0]);
        for members in &result.vertex_indices {
            assert_eq!(members, &vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_square_radius_zero() {
        let mut mesh = square_mesh();
        mesh.set_feature("iface", vec![0.4, 0.9, 0.1, 0.6]).unwrap();

        let engine = PatchEngine::new(mesh);
        let options = TopPatchOptions::new()
            .with_top_k(4)
            .with_radius(0.0)
            .with_weights(FeatureWeights::new(1.0, 0.0, 0.0, 0.0));

        let result = engine.get_top_patches(&options).unwrap();

        // Singleton patches score each center's own interface value.
        assert_eq!(result.centers, vec![1, 3, 0, 2]);
        assert_eq!(result.scores, vec![0.9, 0.6, 0.4, 0.1]);
        for (i, members) in result.vertex_indices.iter().enumerate() {
            assert_eq!(members, &vec![result.centers[i]]);
        }
    }

    #[test]
    fn test_iface_cutoff_filters_centers() {
        let mut mesh = square_mesh();
        mesh.set_feature("iface", vec![0.9, 0.2, 0.8, 0.1]).unwrap();

        let engine = PatchEngine::new(mesh);
        let options = TopPatchOptions::new()
            .with_top_k(4)
            .with_radius(1.5)
            .with_iface_cutoff(0.5);

        let result = engine.get_top_patches(&options).unwrap();
        assert_eq!(result.centers, vec![0, 2]);
    }

    #[test]
    fn test_cutoff_zero_disables_filter() {
        let mut mesh = square_mesh();
        mesh.set_feature("iface", vec![0.0, 0.0, 0.0, 0.0]).unwrap();

        let engine = PatchEngine::new(mesh);
        let options = TopPatchOptions::new().with_top_k(4).with_radius(1.5);

        let result = engine.get_top_patches(&options).unwrap();
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_top_k_zero_rejected() {
        let engine = PatchEngine::new(square_mesh());
        let options = TopPatchOptions::new().with_top_k(0);

        assert!(matches!(
            engine.get_top_patches(&options),
            Err(PatchError::InvalidParameter { name: "top_k", .. })
        ));
    }

    #[test]
    fn test_negative_radius_rejected() {
        let engine = PatchEngine::new(square_mesh());
        let options = TopPatchOptions::new().with_radius(-2.0);

        assert!(matches!(
            engine.get_top_patches(&options),
            Err(PatchError::InvalidParameter { name: "radius", .. })
        ));
    }

    #[test]
    fn test_missing_backend_fails_fast() {
        let engine = PatchEngine::with_backend(square_mesh(), None);

        assert!(matches!(
            engine.get_top_patches(&TopPatchOptions::new()),
            Err(PatchError::MissingBackend)
        ));
    }

    #[test]
    fn test_injected_backend() {
        // A deterministic fake: every patch is just its own center.
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

        let engine = PatchEngine::with_backend(square_mesh(), Some(Box::new(SourceOnly)));
        let result = engine
            .get_top_patches(&TopPatchOptions::new().with_radius(100.0))
            .unwrap();

        for (i, members) in result.vertex_indices.iter().enumerate() {
            assert_eq!(members, &vec![result.centers[i]]);
        }
    }

    #[test]
    fn test_missing_features_default_to_zero() {
        // No features at all: every patch scores 0.0, query still succeeds.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ];
        let mesh = SurfaceMesh::new(vertices, vec![[0, 1, 2]]).unwrap();

        let engine = PatchEngine::new(mesh);
        let result = engine
            .get_top_patches(&TopPatchOptions::new().with_top_k(3).with_radius(2.0))
            .unwrap();

        assert_eq!(result.centers, vec![0, 1, 2]);
        assert_eq!(result.scores, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_progress_reported() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let mut vertices = Vec::new();
        let mut faces = Vec::new();
        let n = 40; // (n+1)^2 = 1681 vertices, enough to cross the interval
        for j in 0..=n {
            for i in 0..=n {
                vertices.push(Point3::new(i as f64, j as f64, 0.0));
            }
        }
        for j in 0..n {
            for i in 0..n {
                let v00 = j * (n + 1) + i;
                faces.push([v00, v00 + 1, v00 + n + 2]);
                faces.push([v00, v00 + n + 2, v00 + n + 1]);
            }
        }
        let mesh = SurfaceMesh::new(vertices, faces).unwrap();

        let reports = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&reports);
        let options = TopPatchOptions::new()
            .with_top_k(1)
            .with_radius(1.0)
            .sequential()
            .with_progress(Progress::new(move |_, _| {
                counter.fetch_add(1, Ordering::Relaxed);
            }));

        let engine = PatchEngine::new(mesh);
        let _ = engine.get_top_patches(&options).unwrap();
        assert_eq!(reports.load(Ordering::Relaxed), 1);
    }
}
