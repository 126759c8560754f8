use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::knowledge::types::ChunkRecord;

/// In-memory chunk records of one processed document.
///
/// Loaded once at startup and only read afterwards. Reprocessing replaces the
/// file on disk; a running service keeps the records it loaded.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<ChunkRecord>,
}

impl Corpus {
    pub fn new(records: Vec<ChunkRecord>) -> Self {
        Self { records }
    }

    /// Best-effort load: a missing or unreadable file gives an empty corpus
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!(path = %path.display(), "Corpus file not found, starting with an empty corpus");
            return Self::default();
        }

        match Self::try_load(path) {
            Ok(corpus) => {
                debug!(path = %path.display(), records = corpus.len(), "Corpus loaded");
                corpus
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load corpus, using an empty corpus");
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read corpus {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Parse a corpus file. Elements that are not records are skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let values: Vec<Value> =
            serde_json::from_str(json).context("Corpus file is not a JSON array")?;

        let mut records = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            if !value.is_object() {
                warn!(index, "Skipping corpus entry that is not an object");
                continue;
            }
            match serde_json::from_value::<ChunkRecord>(value) {
                Ok(record) => records.push(record),
                Err(e) => warn!(index, error = %e, "Skipping malformed corpus entry"),
            }
        }

        Ok(Self { records })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)?;
        crate::storage::write_replacing(path, json.as_bytes())
    }

    pub fn records(&self) -> &[ChunkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> HashSet<&str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }

    /// Number of records whose id repeats an earlier record
    pub fn duplicate_count(&self) -> usize {
        self.records.len() - self.ids().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, content: &str) -> ChunkRecord {
        ChunkRecord {
            id: id.to_string(),
            content: content.to_string(),
            title: "Title".to_string(),
            section: "Title".to_string(),
            chunk_id: "0".to_string(),
            chunk_type: "section".to_string(),
            keywords: ["title".to_string()].into_iter().collect(),
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed_chunks.json");
        let corpus = Corpus::new(vec![record("a", "first"), record("b", "second")]);

        corpus.save(&path).unwrap();
        let loaded = Corpus::load(&path);

        assert_eq!(loaded.records(), corpus.records());
    }

    #[test]
    fn test_persisted_keys() {
        let corpus = Corpus::new(vec![record("a", "first")]);
        let json = serde_json::to_value(corpus.records()).unwrap();
        let entry = json[0].as_object().unwrap();

        for key in ["id", "content", "title", "section", "chunk_id", "type", "keywords"] {
            assert!(entry.contains_key(key), "missing key {}", key);
        }
        assert!(entry["keywords"].is_array());
    }

    #[test]
    fn test_missing_file_gives_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = Corpus::load(&dir.path().join("absent.json"));
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_corrupt_file_gives_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed_chunks.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(Corpus::load(&path).is_empty());
        assert!(Corpus::try_load(&path).is_err());
    }

    #[test]
    fn test_missing_keys_are_tolerated() {
        let json = r#"[
            {"id": "x1", "title": "Fever"},
            {"content": "Give paracetamol", "keywords": null},
            {"id": "x3", "content": null, "keywords": ["fever"]}
        ]"#;
        let corpus = Corpus::from_json(json).unwrap();

        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.records()[0].content, "");
        assert!(corpus.records()[0].keywords.is_empty());
        assert_eq!(corpus.records()[1].id, "");
        assert!(corpus.records()[1].keywords.is_empty());
        assert_eq!(corpus.records()[2].content, "");
        assert!(corpus.records()[2].keywords.contains("fever"));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let json = r#"[
            "just a string",
            42,
            {"id": "ok", "content": "Valid entry"},
            {"id": "bad", "content": 17}
        ]"#;
        let corpus = Corpus::from_json(json).unwrap();

        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.records()[0].id, "ok");
    }

    #[test]
    fn test_duplicate_count() {
        let corpus = Corpus::new(vec![
            record("a", "same"),
            record("a", "same"),
            record("b", "other"),
        ]);
        assert_eq!(corpus.duplicate_count(), 1);
        assert_eq!(corpus.ids().len(), 2);
    }
}
