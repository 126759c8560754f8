use super::Evaluation;

/// Score for an answer the heuristic accepts
pub const MATCH_SCORE: u32 = 50;
/// Score for an answer the heuristic rejects
pub const MISS_SCORE: u32 = 20;
/// Leading words of the correct treatment looked for in the user's answer
const TREATMENT_LEAD_WORDS: usize = 3;

/// Coarse offline grading.
///
/// The diagnosis matches when the correct diagnosis occurs in the user's answer.
/// The treatment matches when any of the first three words of the correct
/// treatment occurs in the user's answer. Both comparisons ignore case.
pub fn heuristic_evaluation(
    correct_diagnosis: &str,
    correct_treatment: &str,
    user_diagnosis: &str,
    user_treatment: &str,
) -> Evaluation {
    let user_diagnosis = user_diagnosis.to_lowercase();
    let diagnosis_score = if user_diagnosis.contains(&correct_diagnosis.to_lowercase()) {
        MATCH_SCORE
    } else {
        MISS_SCORE
    };

    let user_treatment = user_treatment.to_lowercase();
    let correct_treatment_lower = correct_treatment.to_lowercase();
    let treatment_score = if correct_treatment_lower
        .split_whitespace()
        .take(TREATMENT_LEAD_WORDS)
        .any(|word| user_treatment.contains(word))
    {
        MATCH_SCORE
    } else {
        MISS_SCORE
    };

    Evaluation {
        diagnosis_score,
        treatment_score,
        feedback: format!(
            "
Diagnosis Evaluation: Your answer was compared against '{}'.
Treatment Evaluation: Your answer was compared against the standard treatment protocol.

For detailed feedback, please ensure the AI service is properly configured.
",
            correct_diagnosis
        ),
    }
}
