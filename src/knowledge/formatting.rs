use colored::Colorize;

use crate::constants::GUIDELINES_NAME;
use crate::knowledge::fallback::fallback_answer;
use crate::knowledge::ranker::Retrieval;
use crate::knowledge::types::{ScoredChunk, SourceCitation};

/// Chunks quoted in a manual answer
const MANUAL_ANSWER_CHUNKS: usize = 3;
/// Characters of each chunk quoted in a manual answer
const MANUAL_ANSWER_CHARS: usize = 300;
/// Characters of content shown per search hit
const SEARCH_PREVIEW_CHARS: usize = 200;

/// Answer assembled from retrieved chunks when no completion service answered
pub fn manual_answer(query: &str, chunks: &[ScoredChunk]) -> String {
    if chunks.is_empty() {
        return fallback_answer(query);
    }

    let mut parts = vec![format!("Based on {}:\n", GUIDELINES_NAME)];

    for (i, chunk) in chunks.iter().take(MANUAL_ANSWER_CHUNKS).enumerate() {
        let content = chunk.record.content.replace('\n', " ");
        parts.push(format!("{}. From {}:", i + 1, chunk.record.section));
        parts.push(format!(
            "   {}\n",
            preview(content.trim(), MANUAL_ANSWER_CHARS)
        ));
    }

    parts.push("\n⚠️ Important:".to_string());
    parts.push(
        "• Always consult a qualified healthcare professional for proper diagnosis".to_string(),
    );
    parts.push("• Treatment should be individualized based on patient assessment".to_string());
    parts.push("• Follow proper medical protocols and safety guidelines".to_string());

    parts.join("\n")
}

/// Citations for the best `max` chunks, numbered by rank
pub fn format_sources(
    chunks: &[ScoredChunk],
    max: usize,
    preview_chars: usize,
) -> Vec<SourceCitation> {
    chunks
        .iter()
        .take(max)
        .enumerate()
        .map(|(i, chunk)| SourceCitation {
            id: (i + 1).to_string(),
            title: chunk.record.section.clone(),
            content: preview(&chunk.record.content, preview_chars),
            section: chunk.record.section.clone(),
        })
        .collect()
}

pub fn format_search_results(retrieval: &Retrieval) -> String {
    let mut output = String::new();

    if let Retrieval::Fallback { reason, .. } = retrieval {
        output.push_str(
            &format!("No corpus matches ({:?}), showing fallback guidance", reason)
                .yellow()
                .to_string(),
        );
        output.push_str("\n\n");
    }

    for chunk in retrieval.chunks() {
        output.push_str(&"━".repeat(60));
        output.push('\n');

        output.push_str(&chunk.record.title.blue().bold().to_string());
        output.push('\n');

        if chunk.record.section != chunk.record.title {
            output.push_str(&chunk.record.section.cyan().to_string());
            output.push('\n');
        }

        output.push_str(&chunk.record.id.bright_black().to_string());
        output.push('\n');

        output.push_str(&preview(&chunk.record.content, SEARCH_PREVIEW_CHARS));
        output.push('\n');

        output.push_str(&format!("score {}", chunk.score).green().to_string());
        output.push_str("\n\n");
    }

    output
}

/// First `max_chars` characters, with "..." appended when anything was cut
pub fn preview(input: &str, max_chars: usize) -> String {
    if input.chars().count() > max_chars {
        format!("{}...", truncate_chars(input, max_chars))
    } else {
        input.to_string()
    }
}

pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    input.chars().take(max_chars).collect()
}
