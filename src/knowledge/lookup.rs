use crate::knowledge::corpus::Corpus;
use crate::knowledge::types::ChunkRecord;

/// Chunks mentioning an illness, in corpus order.
///
/// A record matches when the whole illness name occurs in its content or title, or
/// when any single word of the name occurs in its content. Unlike the ranker this
/// does not score; the first `limit` matches are returned as found.
pub fn illness_context<'a>(illness: &str, corpus: &'a Corpus, limit: usize) -> Vec<&'a ChunkRecord> {
    let illness = illness.to_lowercase();
    let words: Vec<&str> = illness.split_whitespace().collect();

    corpus
        .records()
        .iter()
        .filter(|record| {
            let content = record.content.to_lowercase();
            content.contains(&illness)
                || record.title.to_lowercase().contains(&illness)
                || words.iter().any(|word| content.contains(word))
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, content: &str) -> ChunkRecord {
        ChunkRecord {
            id: id.to_string(),
            content: content.to_string(),
            title: title.to_string(),
            section: title.to_string(),
            ..Default::default()
        }
    }

    fn ids(records: &[&ChunkRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_matches_full_name_in_content_or_title() {
        let corpus = Corpus::new(vec![
            record("a", "Fevers", "Uncomplicated MALARIA is treated orally"),
            record("b", "Malaria", "Give the first dose under observation"),
            record("c", "Measles", "Vitamin A supplementation"),
        ]);
        let found = illness_context("Malaria", &corpus, 5);
        assert_eq!(ids(&found), vec!["a", "b"]);
    }

    #[test]
    fn test_any_word_matches_content_only() {
        let corpus = Corpus::new(vec![
            record("a", "Sickle Cell Disease", "Painful crises need analgesia"),
            record("b", "Haematology", "Screen for sickle trait at birth"),
            record("c", "Diabetes", "Check blood glucose"),
        ]);
        // "a" only has the words in its title, which is checked for the full name alone
        let found = illness_context("Sickle Cell Anaemia", &corpus, 5);
        assert_eq!(ids(&found), vec!["b"]);
    }

    #[test]
    fn test_returns_first_matches_in_corpus_order() {
        let records = (0..8)
            .map(|i| record(&i.to_string(), "Asthma", "Asthma attack management"))
            .collect();
        let corpus = Corpus::new(records);
        let found = illness_context("asthma", &corpus, 5);
        assert_eq!(ids(&found), vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_no_match_and_empty_corpus() {
        let corpus = Corpus::new(vec![record("a", "Gout", "Allopurinol")]);
        assert!(illness_context("Typhoid Fever", &corpus, 5).is_empty());
        assert!(illness_context("Typhoid Fever", &Corpus::default(), 5).is_empty());
    }
}
