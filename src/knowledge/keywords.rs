use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::constants::STOPWORDS;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z]{3,}\b").expect("word pattern is valid"));

/// Minimum keyword length after stopword removal
const MIN_KEYWORD_LEN: usize = 4;

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Extract keywords from text: alphabetic, lowercase, at least four letters,
/// not a stopword. Duplicates are removed keeping first-occurrence order.
pub fn extract_keywords(text: &str) -> Vec<String> {
    extract_keywords_capped(text, None)
}

/// Same as [`extract_keywords`], keeping at most `limit` keywords when set
pub fn extract_keywords_capped(text: &str, limit: Option<usize>) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut seen = HashSet::new();
    let limit = limit.unwrap_or(usize::MAX);

    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|word| !is_stopword(word) && word.len() >= MIN_KEYWORD_LEN)
        .filter(|word| seen.insert(*word))
        .take(limit)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keywords_basic() {
        let keywords = extract_keywords("Malaria treatment requires artemisinin combination therapy");
        assert_eq!(
            keywords,
            vec![
                "malaria",
                "treatment",
                "requires",
                "artemisinin",
                "combination",
                "therapy"
            ]
        );
    }

    #[test]
    fn test_stopwords_and_short_words_removed() {
        let keywords = extract_keywords("What is the dose for this drug when taken with food");
        assert_eq!(keywords, vec!["dose", "drug", "taken", "food"]);
    }

    #[test]
    fn test_will_and_what_are_both_stopwords() {
        assert_eq!(extract_keywords("will what malaria"), vec!["malaria"]);
        assert_eq!(
            extract_keywords_capped("What will happen with malaria", Some(5)),
            vec!["happen", "malaria"]
        );
    }

    #[test]
    fn test_query_of_only_stopwords_is_empty() {
        assert!(extract_keywords("the and for").is_empty());
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("123 456 !!!").is_empty());
    }

    #[test]
    fn test_deduplicates_case_insensitively() {
        let keywords = extract_keywords("Fever fever FEVER chills");
        assert_eq!(keywords, vec!["fever", "chills"]);
    }

    #[test]
    fn test_tokens_glued_to_digits_are_skipped() {
        // No word boundary between letters and digits
        let keywords = extract_keywords("vitamin b12 dosage2 paracetamol");
        assert_eq!(keywords, vec!["vitamin", "paracetamol"]);
    }

    #[test]
    fn test_capped_extraction_keeps_first_occurrences() {
        let text = "alpha bravo charlie delta echo foxtrot";
        let keywords = extract_keywords_capped(text, Some(3));
        assert_eq!(keywords, vec!["alpha", "bravo", "charlie"]);
        assert_eq!(extract_keywords_capped(text, None).len(), 6);
    }

    #[test]
    fn test_every_keyword_is_lowercase_alpha_and_not_stopword() {
        let text = "The Patient's SYMPTOMS, e.g. high-fever & rigors; were noted over 2 days. \
                    Café-au-lait macules? Résumé of care: ORS, zinc, follow-up.";
        for keyword in extract_keywords(text) {
            assert!(keyword.len() >= 4, "{} too short", keyword);
            assert!(
                keyword.chars().all(|c| c.is_ascii_lowercase()),
                "{} is not lowercase ascii",
                keyword
            );
            assert!(!is_stopword(&keyword), "{} is a stopword", keyword);
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "Uncomplicated malaria: give artemether-lumefantrine twice daily for three days. \
                    Monitor the patient for vomiting and repeat the dose if vomited.";
        let first = extract_keywords(text);
        let second = extract_keywords(&first.join(" "));
        assert_eq!(first, second);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "Oral rehydration salts and zinc supplementation for diarrhoea";
        assert_eq!(extract_keywords(text), extract_keywords(text));
    }
}
