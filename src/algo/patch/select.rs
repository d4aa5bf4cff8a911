//! Top-K patch selection.
//!
//! Ranks scored patches and returns the best K as a [`TopKResult`].
//! Ordering is total and reproducible: descending score, ties broken by
//! ascending center vertex id, independent of the underlying sort's
//! stability.

use std::cmp::Ordering;

use crate::algo::patch::Patch;
use crate::error::{PatchError, Result};
use crate::mesh::FeatureTable;
use crate::result::TopKResult;

/// A candidate filter on the patch *center's* raw feature value.
///
/// Candidates pass when the center vertex's value for `feature` is at least
/// `min_value`. The filter looks at the raw per-vertex feature, not the
/// patch's aggregate score; a missing feature reads as zero.
#[derive(Debug, Clone, Copy)]
pub struct CenterFilter<'a> {
    /// The feature name (alias-resolved by the table).
    pub feature: &'a str,
    /// Minimum value for the center vertex.
    pub min_value: f64,
}

/// Select the top `k` patches by score.
///
/// Returns at most `k` entries, fewer if fewer candidates pass the filter;
/// never pads. `patches` and `scores` are parallel sequences.
///
/// # Errors
///
/// [`PatchError::InvalidParameter`] if `k` is zero or the sequences have
/// different lengths; [`PatchError::VertexOutOfRange`] if a filtered
/// center id is outside the feature table's vertex range.
pub fn select_top_k(
    patches: &[Patch],
    scores: &[f64],
    k: usize,
    filter: Option<CenterFilter<'_>>,
    features: &FeatureTable,
) -> Result<TopKResult> {
    if k == 0 {
        return Err(PatchError::invalid_param("k", k, "must be at least 1"));
    }
    if patches.len() != scores.len() {
        return Err(PatchError::invalid_param(
            "scores",
            scores.len(),
            "must have one score per patch",
        ));
    }

    let mut candidates: Vec<usize> = Vec::with_capacity(patches.len());
    for (i, patch) in patches.iter().enumerate() {
        let eligible = match filter {
            Some(CenterFilter { feature, min_value }) => {
                features.value(feature, patch.center())? >= min_value
            }
            None => true,
        };
        if eligible {
            candidates.push(i);
        }
    }

    candidates.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
            .then_with(|| patches[a].center().cmp(&patches[b].center()))
    });
    candidates.truncate(k);

    Ok(TopKResult {
        centers: candidates.iter().map(|&i| patches[i].center()).collect(),
        scores: candidates.iter().map(|&i| scores[i]).collect(),
        vertex_indices: candidates
            .iter()
            .map(|&i| patches[i].members().to_vec())
            .collect(),
    })
}
