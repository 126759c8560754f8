//! Labeled-field extraction from free-form completion text.
//!
//! Replies are untrusted: every field has a default used when its label is
//! missing, so a sloppy reply never fails the surrounding operation.

use regex::Regex;
use std::sync::LazyLock;

use crate::case_study::Evaluation;

static DIAGNOSIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)DIAGNOSIS:\s*(.+?)(?:TREATMENT:|$)").expect("diagnosis pattern is valid")
});
static TREATMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)TREATMENT:\s*(.+)").expect("treatment pattern is valid"));
static DIAGNOSIS_SCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)DIAGNOSIS_SCORE:\s*(\d+)").expect("diagnosis score pattern is valid")
});
static TREATMENT_SCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)TREATMENT_SCORE:\s*(\d+)").expect("treatment score pattern is valid")
});
static FEEDBACK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)FEEDBACK:\s*(.+)").expect("feedback pattern is valid"));

pub const DEFAULT_TREATMENT: &str = "Standard treatment as per Ghana STG";
pub const DEFAULT_FEEDBACK: &str = "Evaluation completed.";
pub const MAX_SCORE: u32 = 100;

/// First capture of `re`, trimmed; `None` when absent or blank
fn labeled_field(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

fn labeled_score(re: &Regex, text: &str) -> u32 {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        // digits only, so a parse failure means the number overflowed
        .map(|m| m.as_str().parse::<u32>().unwrap_or(MAX_SCORE).min(MAX_SCORE))
        .unwrap_or(0)
}

/// `(diagnosis, treatment)` from a `DIAGNOSIS:` / `TREATMENT:` reply.
/// Diagnosis defaults to the illness name.
pub fn parse_correct_answers(text: &str, illness: &str) -> (String, String) {
    let diagnosis = labeled_field(&DIAGNOSIS_RE, text).unwrap_or_else(|| illness.to_string());
    let treatment =
        labeled_field(&TREATMENT_RE, text).unwrap_or_else(|| DEFAULT_TREATMENT.to_string());
    (diagnosis, treatment)
}

/// Scores (clamped to 0..=100, default 0) and feedback from an evaluation reply
pub fn parse_evaluation(text: &str) -> Evaluation {
    Evaluation {
        diagnosis_score: labeled_score(&DIAGNOSIS_SCORE_RE, text),
        treatment_score: labeled_score(&TREATMENT_SCORE_RE, text),
        feedback: labeled_field(&FEEDBACK_RE, text)
            .unwrap_or_else(|| DEFAULT_FEEDBACK.to_string()),
    }
}
