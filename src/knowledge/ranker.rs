use serde::Serialize;
use tracing::debug;

use crate::constants::{CONTENT_MATCH_SCORE, DOMAIN_BOOST, DOMAIN_TERMS, KEYWORD_MATCH_SCORE};
use crate::knowledge::corpus::Corpus;
use crate::knowledge::fallback::fallback_chunks;
use crate::knowledge::keywords::extract_keywords;
use crate::knowledge::types::{ChunkRecord, ScoredChunk};

/// Why retrieval returned the fixed fallback set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    EmptyCorpus,
    NoQueryKeywords,
    NoMatches,
}

/// Outcome of ranking a query against the corpus
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieval {
    /// Chunks with a positive score, best first
    Ranked(Vec<ScoredChunk>),
    /// Fixed guideline content; nothing in the corpus was usable
    Fallback {
        reason: FallbackReason,
        chunks: Vec<ScoredChunk>,
    },
}

impl Retrieval {
    fn fallback(reason: FallbackReason) -> Self {
        Retrieval::Fallback {
            reason,
            chunks: fallback_chunks(),
        }
    }

    pub fn chunks(&self) -> &[ScoredChunk] {
        match self {
            Retrieval::Ranked(chunks) => chunks,
            Retrieval::Fallback { chunks, .. } => chunks,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Retrieval::Fallback { .. })
    }
}

/// Keyword-overlap relevance ranker
pub struct Ranker {
    top_k: usize,
}

impl Ranker {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    /// Rank corpus records against `query`, keeping the `top_k` best with a positive score.
    /// Records with equal scores keep their corpus order.
    pub fn rank(&self, query: &str, corpus: &Corpus) -> Retrieval {
        if corpus.is_empty() {
            return Retrieval::fallback(FallbackReason::EmptyCorpus);
        }

        let keywords = extract_keywords(query);
        if keywords.is_empty() {
            debug!(query, "Query has no usable keywords");
            return Retrieval::fallback(FallbackReason::NoQueryKeywords);
        }

        let query_lower = query.to_lowercase();
        let mut scored: Vec<ScoredChunk> = corpus
            .records()
            .iter()
            .filter_map(|record| {
                let score = score_record(&query_lower, &keywords, record);
                (score > 0).then(|| ScoredChunk {
                    record: record.clone(),
                    score,
                })
            })
            .collect();

        if scored.is_empty() {
            debug!(query, "No corpus chunk matched the query");
            return Retrieval::fallback(FallbackReason::NoMatches);
        }

        // Stable sort keeps corpus order among equal scores
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(self.top_k);

        debug!(
            query,
            keywords = ?keywords,
            results = scored.len(),
            best = scored.first().map(|c| c.score).unwrap_or(0),
            "Ranked corpus"
        );

        Retrieval::Ranked(scored)
    }
}

/// Score one record.
///
/// Per query keyword: +2 when it is one of the record's keywords, and independently
/// +1 when it occurs anywhere in the lowercased content. Per domain term found in both
/// the lowercased query and content: +3.
pub fn score_record(query_lower: &str, query_keywords: &[String], record: &ChunkRecord) -> u32 {
    let content = record.content.to_lowercase();
    let mut score = 0;

    for keyword in query_keywords {
        if record.keywords.contains(keyword) {
            score += KEYWORD_MATCH_SCORE;
        }
        if content.contains(keyword.as_str()) {
            score += CONTENT_MATCH_SCORE;
        }
    }

    for term in DOMAIN_TERMS {
        if query_lower.contains(term) && content.contains(term) {
            score += DOMAIN_BOOST;
        }
    }

    score
}
