use crate::constants::{CHUNK_TYPE_SECTION, GUIDELINES_NAME};
use crate::knowledge::types::{ChunkRecord, ScoredChunk};

const FALLBACK_ENTRIES: &[(&str, &str, &str, &str, u32)] = &[
    (
        "fallback_1",
        "General Medical Guidelines",
        "Standard Treatment Principles",
        "For medical conditions, always consult the latest Ghana Standard Treatment Guidelines. \
         Treatment should be individualized based on patient assessment, available resources, \
         and clinical expertise.",
        80,
    ),
    (
        "fallback_2",
        "Patient Safety Guidelines",
        "Safety Protocols",
        "Patient safety is paramount. Monitor for adverse reactions, ensure proper dosing based \
         on age and weight, and maintain appropriate follow-up care.",
        75,
    ),
];

/// Generic guideline content used when retrieval has nothing to offer
pub fn fallback_chunks() -> Vec<ScoredChunk> {
    FALLBACK_ENTRIES
        .iter()
        .map(|&(id, title, section, content, score)| ScoredChunk {
            record: ChunkRecord {
                id: id.to_string(),
                content: content.to_string(),
                title: title.to_string(),
                section: section.to_string(),
                chunk_id: id.to_string(),
                chunk_type: CHUNK_TYPE_SECTION.to_string(),
                keywords: Default::default(),
            },
            score,
        })
        .collect()
}

/// Disclaimer answer for when there is no context to answer from
pub fn fallback_answer(query: &str) -> String {
    format!(
        "I apologize, but I'm currently unable to access the complete Ghana Standard Treatment \
Guidelines database to provide a specific answer to your question about \"{query}\".

For accurate medical guidance, please:
1. Consult the official {GUIDELINES_NAME}
2. Speak with a qualified healthcare professional
3. Contact your local healthcare facility

This is important for ensuring you receive appropriate, safe, and effective medical care \
based on the most current guidelines and your specific situation."
    )
}
