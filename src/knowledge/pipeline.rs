use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::config::KnowledgeConfig;
use crate::knowledge::chunker::{ChunkStrategy, Chunker};
use crate::knowledge::corpus::Corpus;
use crate::knowledge::loader::loader_for;
use crate::knowledge::record::RecordBuilder;
use crate::knowledge::sections::{split_sections, HeadingRule};
use crate::knowledge::types::ProcessReport;

/// Document processing flavour
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PipelineVariant {
    /// Keyword headings, sliding-window chunks, every keyword kept
    #[default]
    Standard,
    /// Guideline headings, sentence-group chunks, capped keywords
    Simple,
}

/// Source document to corpus file
pub struct Pipeline {
    variant: PipelineVariant,
    heading_rule: HeadingRule,
    chunker: Chunker,
    records: RecordBuilder,
}

impl Pipeline {
    pub fn new(variant: PipelineVariant, config: &KnowledgeConfig) -> Result<Self> {
        let (heading_rule, strategy, keyword_limit) = match variant {
            PipelineVariant::Standard => (
                HeadingRule::Keyword,
                ChunkStrategy::sliding_window(config.chunk_size, config.chunk_overlap)?,
                None,
            ),
            PipelineVariant::Simple => (
                HeadingRule::Guideline,
                ChunkStrategy::sentence_group(config.sentences_per_chunk, config.min_chunk_chars)?,
                Some(config.keyword_limit),
            ),
        };

        Ok(Self {
            variant,
            heading_rule,
            chunker: Chunker::new(strategy),
            records: RecordBuilder::new(keyword_limit),
        })
    }

    /// Sections, chunks and records for already extracted paragraphs.
    /// Fails when no section could be formed.
    pub fn build_corpus<S: AsRef<str>>(&self, paragraphs: &[S]) -> Result<(Corpus, ProcessReport)> {
        let sections = split_sections(paragraphs, self.heading_rule);
        if sections.is_empty() {
            bail!("No content extracted from document");
        }

        let chunks = self.chunker.chunk_sections(&sections);
        let chunk_count = chunks.len();
        let corpus = Corpus::new(self.records.build_all(chunks));

        debug!(
            sections = sections.len(),
            chunks = chunk_count,
            "Document chunked"
        );

        let report = ProcessReport {
            sections: sections.len(),
            chunks: chunk_count,
            records: corpus.len(),
            duplicates: corpus.duplicate_count(),
            ..Default::default()
        };

        Ok((corpus, report))
    }

    /// Process `source` and replace the corpus file at `corpus_path`
    pub fn process(&self, source: &Path, corpus_path: &Path) -> Result<ProcessReport> {
        if !source.exists() {
            bail!("File not found: {}", source.display());
        }

        info!(source = %source.display(), pipeline = ?self.variant, "Processing document");

        let paragraphs = loader_for(source)?
            .load_paragraphs(source)
            .with_context(|| format!("Failed to extract text from {}", source.display()))?;

        let (corpus, mut report) = self.build_corpus(&paragraphs)?;

        let previous = Corpus::load(corpus_path);
        let previous_ids = previous.ids();
        let current_ids = corpus.ids();
        report.unchanged = current_ids.intersection(&previous_ids).count();
        report.added = current_ids.len() - report.unchanged;
        report.removed = previous_ids.len() - report.unchanged;

        corpus
            .save(corpus_path)
            .with_context(|| format!("Failed to store corpus at {}", corpus_path.display()))?;

        info!(
            sections = report.sections,
            records = report.records,
            added = report.added,
            removed = report.removed,
            corpus = %corpus_path.display(),
            "Corpus stored"
        );

        Ok(report)
    }
}
