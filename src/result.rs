//! Top-K query results and their JSON persistence.
//!
//! A [`TopKResult`] is the engine's sole externally consumed artifact. It
//! serializes to JSON with the exact field names `centers`, `scores`, and
//! `vertex_indices`, and re-loads bit-for-bit, so a separately invoked
//! visualization pass can consume previously computed results without
//! recomputation.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Ranked patch-selection output: up to K entries ordered by descending
/// score, ties by ascending center vertex id.
///
/// The three sequences are parallel: entry `i` is the patch centered at
/// `centers[i]`, scoring `scores[i]`, with member vertices
/// `vertex_indices[i]` (sorted ascending). Produced once per query and
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopKResult {
    /// Center vertex id of each selected patch.
    pub centers: Vec<usize>,
    /// Score of each selected patch.
    pub scores: Vec<f64>,
    /// Member vertex ids of each selected patch.
    pub vertex_indices: Vec<Vec<usize>>,
}

impl TopKResult {
    /// Number of selected patches.
    #[inline]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// Whether no patch was selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Iterate over `(center, score, members)` entries in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64, &[usize])> {
        self.centers
            .iter()
            .zip(&self.scores)
            .zip(&self.vertex_indices)
            .map(|((&center, &score), members)| (center, score, members.as_slice()))
    }

    /// Serialize to a pretty-printed JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the result to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Load a previously saved result from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TopKResult {
        TopKResult {
            centers: vec![7, 3, 11],
            scores: vec![0.987654321, 0.5, -0.25],
            vertex_indices: vec![vec![1, 7, 9], vec![2, 3], vec![11]],
        }
    }

    #[test]
    fn test_json_round_trip() {
        let result = sample();
        let json = result.to_json_string().unwrap();
        let loaded = TopKResult::from_json_str(&json).unwrap();

        assert_eq!(loaded, result);
    }

    #[test]
    fn test_field_names() {
        let json = sample().to_json_string().unwrap();
        assert!(json.contains("\"centers\""));
        assert!(json.contains("\"scores\""));
        assert!(json.contains("\"vertex_indices\""));
    }

    #[test]
    fn test_float_fidelity() {
        // serde_json emits the shortest representation that parses back to
        // the identical f64.
        let result = TopKResult {
            centers: vec![0],
            scores: vec![0.1 + 0.2],
            vertex_indices: vec![vec![0]],
        };
        let loaded = TopKResult::from_json_str(&result.to_json_string().unwrap()).unwrap();
        assert_eq!(loaded.scores[0].to_bits(), result.scores[0].to_bits());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join("surfpatch_result_test.json");

        let result = sample();
        result.save_json(&path).unwrap();
        let loaded = TopKResult::load_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, result);
    }

    #[test]
    fn test_iter_entries() {
        let result = sample();
        let entries: Vec<_> = result.iter().collect();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, 7);
        assert_eq!(entries[1].2, &[2, 3]);
    }

    #[test]
    fn test_load_rejects_malformed() {
        assert!(TopKResult::from_json_str("{\"centers\": [1]}").is_err());
    }
}
