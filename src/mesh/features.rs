//! Named per-vertex scalar attributes.
//!
//! Surface meshes produced by protein-interface pipelines carry a handful of
//! per-vertex scalars alongside the geometry. The [`FeatureTable`] stores
//! them as dense columns keyed by name, one value per vertex.
//!
//! Missing attributes are never an error: lookups that fall through read as
//! all zeros, so scoring stays total over the declared feature set.

use std::collections::HashMap;

use crate::error::{PatchError, Result};

/// The features scored by the patch engine, in fixed order: interface
/// probability, electrostatic charge, hydrophobicity, hydrogen-bond
/// potential.
pub const SCORED_FEATURES: [&str; 4] = ["iface", "charge", "hphob", "hbond"];

/// Dense per-vertex scalar attributes keyed by name.
///
/// Every column has exactly one value per vertex; length is enforced at
/// insertion. Lookups also accept the `vertex_`-prefixed spelling used by
/// surface-mesh PLY exporters, so `iface` and `vertex_iface` resolve to the
/// same column.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    num_vertices: usize,
    columns: HashMap<String, Vec<f64>>,
}

impl FeatureTable {
    /// Create an empty table for a mesh with `num_vertices` vertices.
    pub fn new(num_vertices: usize) -> Self {
        Self {
            num_vertices,
            columns: HashMap::new(),
        }
    }

    /// Number of vertices each column must cover.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Insert (or replace) a column.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::AttributeLengthMismatch`] if `values.len()`
    /// differs from the vertex count.
    pub fn insert(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        if values.len() != self.num_vertices {
            return Err(PatchError::AttributeLengthMismatch {
                name: name.to_string(),
                expected: self.num_vertices,
                actual: values.len(),
            });
        }
        self.columns.insert(name.to_string(), values);
        Ok(())
    }

    /// Look up a column by name, trying the bare name first and then the
    /// `vertex_`-prefixed alias.
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        if let Some(values) = self.columns.get(name) {
            return Some(values.as_slice());
        }
        self.columns
            .get(&format!("vertex_{name}"))
            .map(Vec::as_slice)
    }

    /// Whether a column (under either spelling) is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// A single vertex's value for a named feature.
    ///
    /// Missing columns read as `0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::VertexOutOfRange`] for an invalid vertex id.
    pub fn value(&self, name: &str, vertex: usize) -> Result<f64> {
        if vertex >= self.num_vertices {
            return Err(PatchError::VertexOutOfRange {
                vertex,
                num_vertices: self.num_vertices,
            });
        }
        Ok(self.get(name).map_or(0.0, |values| values[vertex]))
    }

    /// Names of all stored columns, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}
