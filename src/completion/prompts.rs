use crate::constants::GUIDELINES_NAME;
use crate::knowledge::formatting::truncate_chars;
use crate::knowledge::types::ScoredChunk;

pub const QUERY_MAX_TOKENS: u32 = 800;
pub const CASE_DESCRIPTION_MAX_TOKENS: u32 = 500;
pub const CORRECT_ANSWERS_MAX_TOKENS: u32 = 400;
pub const EVALUATION_MAX_TOKENS: u32 = 600;

/// Ranked chunks quoted as query context
const QUERY_CONTEXT_CHUNKS: usize = 3;
/// Characters of each chunk quoted as query context
const QUERY_CONTEXT_CHARS: usize = 500;

/// Reply the query prompt asks for when the context does not help
pub const INSUFFICIENT_CONTEXT_REPLY: &str =
    "The provided medical guidelines do not cover this question.";

pub fn query_context(chunks: &[ScoredChunk]) -> String {
    chunks
        .iter()
        .take(QUERY_CONTEXT_CHUNKS)
        .map(|chunk| {
            format!(
                "{}:\n{}...",
                chunk.record.section,
                truncate_chars(&chunk.record.content, QUERY_CONTEXT_CHARS).trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn query_prompt(query: &str, chunks: &[ScoredChunk]) -> String {
    format!(
        "
Answer the following medical question strictly using the {GUIDELINES_NAME}.

Context:
{context}

Question: {query}

Respond concisely and professionally with specific treatment instructions from the guidelines only.
If context is insufficient, say: \"{INSUFFICIENT_CONTEXT_REPLY}\"
",
        context = query_context(chunks),
    )
}

pub fn case_description_prompt(illness: &str, context: &str) -> String {
    format!(
        "
Based on the Ghana Standard Treatment Guidelines, generate a realistic medical case study for {illness}.

Medical Context from Guidelines:
{context}

Create a case study that includes:
1. Patient demographics (age, gender, occupation)
2. Chief complaint and history of present illness
3. Relevant symptoms and physical findings
4. Any relevant past medical history
5. Make it realistic for a Ghanaian healthcare setting

The case should be challenging but solvable with the provided medical knowledge.
Format as a narrative case presentation suitable for medical students.

Generate ONLY the case description without revealing the diagnosis or treatment.
"
    )
}

pub fn correct_answers_prompt(illness: &str, context: &str) -> String {
    format!(
        "
Based on the Ghana Standard Treatment Guidelines, provide:

1. DIAGNOSIS: The correct medical diagnosis for {illness}
2. TREATMENT: The specific treatment protocol as per Ghana STG

Medical Context:
{context}

Format your response as:
DIAGNOSIS: [diagnosis]
TREATMENT: [detailed treatment protocol]

Be specific and follow the exact guidelines provided in the context.
"
    )
}

pub fn evaluation_prompt(
    correct_diagnosis: &str,
    correct_treatment: &str,
    user_diagnosis: &str,
    user_treatment: &str,
) -> String {
    format!(
        "
Evaluate the following medical student answers against the correct answers from Ghana Standard Treatment Guidelines:

CORRECT DIAGNOSIS: {correct_diagnosis}
STUDENT DIAGNOSIS: {user_diagnosis}

CORRECT TREATMENT: {correct_treatment}
STUDENT TREATMENT: {user_treatment}

Provide:
1. DIAGNOSIS_SCORE: 0-100 (how close is the student's diagnosis?)
2. TREATMENT_SCORE: 0-100 (how accurate is the treatment plan?)
3. FEEDBACK: Constructive feedback explaining what was correct/incorrect

Format as:
DIAGNOSIS_SCORE: [number]
TREATMENT_SCORE: [number]
FEEDBACK: [detailed feedback]

Be fair but thorough in evaluation. Consider partial credit for related conditions or alternative valid treatments.
"
    )
}
