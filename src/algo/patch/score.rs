//! Patch scoring.
//!
//! A patch's score is a weighted linear combination of the arithmetic means
//! of its members' features, taken in the fixed [`SCORED_FEATURES`] order:
//! interface, charge, hydrophobicity, hydrogen bonding. Features absent
//! from the table contribute a zero mean rather than an error.
//!
//! The formula is deliberately unnormalized beyond the implicit averaging:
//! downstream consumers threshold on score magnitudes, so the numbers must
//! not change.

use nalgebra::Vector4;

use crate::algo::patch::Patch;
use crate::error::{PatchError, Result};
use crate::mesh::{FeatureTable, SCORED_FEATURES};

/// Weights for the four scored features, in [`SCORED_FEATURES`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureWeights(Vector4<f64>);

impl FeatureWeights {
    /// Create weights from per-feature values in [`SCORED_FEATURES`] order.
    pub fn new(iface: f64, charge: f64, hphob: f64, hbond: f64) -> Self {
        Self(Vector4::new(iface, charge, hphob, hbond))
    }

    /// Create weights from a slice.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::InvalidParameter`] unless the slice has
    /// exactly four entries.
    pub fn from_slice(weights: &[f64]) -> Result<Self> {
        if weights.len() != 4 {
            return Err(PatchError::invalid_param(
                "weights",
                weights.len(),
                "expected exactly 4 feature weights",
            ));
        }
        Ok(Self(Vector4::from_column_slice(weights)))
    }

    /// The weight applied to the `i`-th scored feature.
    #[inline]
    pub fn get(&self, i: usize) -> f64 {
        self.0[i]
    }

    /// The weights as a nalgebra vector.
    #[inline]
    pub fn as_vector(&self) -> &Vector4<f64> {
        &self.0
    }
}

impl Default for FeatureWeights {
    /// The default weighting used for interface analysis:
    /// `[1.0, 0.3, 0.5, 0.8]`.
    fn default() -> Self {
        Self::new(1.0, 0.3, 0.5, 0.8)
    }
}

/// Score a single patch.
///
/// For each scored feature, takes the mean over the patch's member
/// vertices, multiplies by the feature's weight, and sums the four weighted
/// means. An empty patch scores exactly `0.0`. Pure and deterministic.
pub fn score_patch(features: &FeatureTable, patch: &Patch, weights: &FeatureWeights) -> f64 {
    if patch.is_empty() {
        return 0.0;
    }

    let inv_len = 1.0 / patch.len() as f64;
    let mut score = 0.0;
    for (i, name) in SCORED_FEATURES.iter().enumerate() {
        let Some(column) = features.get(name) else {
            continue; // missing feature: zero mean, zero contribution
        };
        let sum: f64 = patch.members().iter().map(|&v| column[v]).sum();
        score += weights.get(i) * sum * inv_len;
    }
    score
}

/// Score every patch in order.
pub fn score_all(
    features: &FeatureTable,
    patches: &[Patch],
    weights: &FeatureWeights,
) -> Vec<f64> {
    patches
        .iter()
        .map(|patch| score_patch(features, patch, weights))
        .collect()
}
