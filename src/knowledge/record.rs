use sha2::{Digest, Sha256};

use crate::knowledge::keywords::extract_keywords_capped;
use crate::knowledge::types::{Chunk, ChunkRecord};

/// Compute SHA256 hash of chunk content
pub fn content_id(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Turns chunks into corpus records
pub struct RecordBuilder {
    keyword_limit: Option<usize>,
}

impl RecordBuilder {
    pub fn new(keyword_limit: Option<usize>) -> Self {
        Self { keyword_limit }
    }

    pub fn build(&self, chunk: Chunk) -> ChunkRecord {
        let keywords = extract_keywords_capped(&chunk.content, self.keyword_limit)
            .into_iter()
            .collect();

        ChunkRecord {
            id: content_id(&chunk.content),
            content: chunk.content,
            title: chunk.title,
            section: chunk.section,
            chunk_id: chunk.chunk_id,
            chunk_type: chunk.chunk_type,
            keywords,
        }
    }

    pub fn build_all(&self, chunks: Vec<Chunk>) -> Vec<ChunkRecord> {
        chunks.into_iter().map(|chunk| self.build(chunk)).collect()
    }
}
