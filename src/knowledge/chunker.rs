use anyhow::{bail, Result};
use regex::Regex;
use std::collections::VecDeque;
use std::sync::LazyLock;

use crate::constants::CHUNK_TYPE_SECTION;
use crate::knowledge::types::{Chunk, Section};

/// Separators tried in priority order by the sliding window
const SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " ", ""];

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence pattern is valid"));

/// How section content is cut into chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStrategy {
    /// Recursive separator split bounded by `chunk_size` characters, consecutive
    /// chunks sharing up to `chunk_overlap` characters
    SlidingWindow {
        chunk_size: usize,
        chunk_overlap: usize,
    },
    /// Fixed batches of sentences; batches not longer than `min_chars` are dropped
    SentenceGroup {
        sentences_per_chunk: usize,
        min_chars: usize,
    },
}

impl ChunkStrategy {
    pub fn sliding_window(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            bail!("chunk_size must be greater than zero");
        }
        if chunk_overlap > chunk_size {
            bail!(
                "chunk_overlap ({}) cannot exceed chunk_size ({})",
                chunk_overlap,
                chunk_size
            );
        }
        Ok(Self::SlidingWindow {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn sentence_group(sentences_per_chunk: usize, min_chars: usize) -> Result<Self> {
        if sentences_per_chunk == 0 {
            bail!("sentences_per_chunk must be greater than zero");
        }
        Ok(Self::SentenceGroup {
            sentences_per_chunk,
            min_chars,
        })
    }
}

pub struct Chunker {
    strategy: ChunkStrategy,
}

impl Chunker {
    pub fn new(strategy: ChunkStrategy) -> Self {
        Self { strategy }
    }

    /// Chunk every section, tagging chunks with their section title
    pub fn chunk_sections(&self, sections: &[Section]) -> Vec<Chunk> {
        let mut chunks = Vec::new();

        for section in sections {
            let pieces = match self.strategy {
                ChunkStrategy::SlidingWindow {
                    chunk_size,
                    chunk_overlap,
                } => self.split_text(&section.content, SEPARATORS, chunk_size, chunk_overlap),
                ChunkStrategy::SentenceGroup {
                    sentences_per_chunk,
                    min_chars,
                } => self.group_sentences(&section.content, sentences_per_chunk, min_chars),
            };

            for (i, content) in pieces.into_iter().enumerate() {
                let chunk_id = match self.strategy {
                    ChunkStrategy::SlidingWindow { .. } => format!("{}_{}", chunks.len(), i),
                    ChunkStrategy::SentenceGroup { .. } => chunks.len().to_string(),
                };
                chunks.push(Chunk {
                    content,
                    title: section.title.clone(),
                    section: section.title.clone(),
                    chunk_id,
                    chunk_type: CHUNK_TYPE_SECTION.to_string(),
                });
            }
        }

        chunks
    }

    /// Recursively split on the first separator present in `text`, merging the
    /// pieces back into windows. Pieces still too long are split again with the
    /// remaining separators; the empty separator splits into characters.
    fn split_text(
        &self,
        text: &str,
        separators: &[&str],
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Vec<String> {
        let mut separator = separators.last().copied().unwrap_or("");
        let mut remaining: &[&str] = &[];
        for (i, candidate) in separators.iter().copied().enumerate() {
            if candidate.is_empty() {
                separator = candidate;
                break;
            }
            if text.contains(candidate) {
                separator = candidate;
                remaining = &separators[i + 1..];
                break;
            }
        }

        let mut final_chunks = Vec::new();
        let mut good_splits: Vec<String> = Vec::new();

        for piece in split_keeping_separator(text, separator) {
            if piece.chars().count() < chunk_size {
                good_splits.push(piece);
                continue;
            }

            if !good_splits.is_empty() {
                final_chunks.extend(self.merge_splits(
                    std::mem::take(&mut good_splits),
                    chunk_size,
                    chunk_overlap,
                ));
            }
            if remaining.is_empty() {
                final_chunks.push(piece);
            } else {
                final_chunks.extend(self.split_text(&piece, remaining, chunk_size, chunk_overlap));
            }
        }

        if !good_splits.is_empty() {
            final_chunks.extend(self.merge_splits(good_splits, chunk_size, chunk_overlap));
        }

        final_chunks
    }

    /// Greedily concatenate pieces into windows of at most `chunk_size` characters.
    /// When a window is emitted, pieces are dropped from its front until at most
    /// `chunk_overlap` characters remain to seed the next window.
    fn merge_splits(
        &self,
        splits: Vec<String>,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Vec<String> {
        let mut docs = Vec::new();
        let mut window: VecDeque<(String, usize)> = VecDeque::new();
        let mut total = 0usize;

        for piece in splits {
            let len = piece.chars().count();

            if total + len > chunk_size && !window.is_empty() {
                push_window(&mut docs, &window);

                while total > chunk_overlap || (total + len > chunk_size && total > 0) {
                    match window.pop_front() {
                        Some((_, dropped)) => total -= dropped,
                        None => break,
                    }
                }
            }

            total += len;
            window.push_back((piece, len));
        }

        push_window(&mut docs, &window);
        docs
    }

    fn group_sentences(
        &self,
        content: &str,
        sentences_per_chunk: usize,
        min_chars: usize,
    ) -> Vec<String> {
        let sentences: Vec<&str> = SENTENCE_END_RE.split(content).collect();

        sentences
            .chunks(sentences_per_chunk)
            .filter_map(|batch| {
                let joined = batch
                    .iter()
                    .map(|sentence| sentence.trim())
                    .filter(|sentence| !sentence.is_empty())
                    .collect::<Vec<_>>()
                    .join(". ");
                (joined.chars().count() > min_chars).then(|| format!("{}.", joined))
            })
            .collect()
    }
}

/// Split on `separator`, attaching it to the start of the following piece.
/// Empty pieces are dropped; the empty separator yields single characters.
fn split_keeping_separator(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return text.chars().map(String::from).collect();
    }

    let mut parts = text.split(separator);
    let mut pieces = Vec::new();
    if let Some(first) = parts.next() {
        pieces.push(first.to_string());
    }
    pieces.extend(parts.map(|part| format!("{}{}", separator, part)));
    pieces.retain(|piece| !piece.is_empty());
    pieces
}

fn push_window(docs: &mut Vec<String>, window: &VecDeque<(String, usize)>) {
    let joined: String = window.iter().map(|(piece, _)| piece.as_str()).collect();
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        docs.push(trimmed.to_string());
    }
}
