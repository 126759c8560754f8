use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// A heading and the paragraphs that follow it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub content: String,
}

impl Section {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Chunk of section text before ids and keywords are attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub content: String,
    pub title: String,
    pub section: String,
    /// Position marker, unique within one chunking run
    pub chunk_id: String,
    pub chunk_type: String,
}

/// Stored and queryable unit of the corpus
///
/// Every field tolerates being absent or `null` in the corpus file so older or
/// hand-edited corpora still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Content-only hash; identical text always yields the same id
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub section: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chunk_id: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub chunk_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: BTreeSet<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Chunk record with its relevance to one query. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredChunk {
    #[serde(flatten)]
    pub record: ChunkRecord,
    pub score: u32,
}

/// Source citation returned alongside an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub id: String,
    pub title: String,
    pub content: String,
    pub section: String,
}

/// Result of processing a source document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    pub sections: usize,
    pub chunks: usize,
    pub records: usize,
    /// Record ids already present in the previous corpus
    pub unchanged: usize,
    /// Record ids not present in the previous corpus
    pub added: usize,
    /// Previous record ids that no longer exist
    pub removed: usize,
    /// Records whose id repeats an earlier record of this run
    pub duplicates: usize,
}
