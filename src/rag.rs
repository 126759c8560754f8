// Copyright 2025 Muvon Un Limited
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::completion::prompts::{query_prompt, QUERY_MAX_TOKENS};
use crate::completion::{Collaborator, CompletionRequest};
use crate::config::{CompletionConfig, SearchConfig};
use crate::knowledge::formatting::{format_sources, manual_answer};
use crate::knowledge::types::{ScoredChunk, SourceCitation};
use crate::knowledge::{Corpus, Ranker, Retrieval};

/// Answer to a free-text question with the chunks it was drawn from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    pub sources: Vec<SourceCitation>,
}

/// Retrieval-augmented question answering over one corpus
pub struct RagService {
    corpus: Corpus,
    ranker: Ranker,
    collaborator: Collaborator,
    max_sources: usize,
    source_preview_chars: usize,
    temperature: f32,
}

impl RagService {
    pub fn new(
        corpus: Corpus,
        collaborator: Collaborator,
        search: &SearchConfig,
        completion: &CompletionConfig,
    ) -> Self {
        Self {
            corpus,
            ranker: Ranker::new(search.top_k),
            collaborator,
            max_sources: search.max_sources,
            source_preview_chars: search.source_preview_chars,
            temperature: completion.temperature,
        }
    }

    pub fn retrieve(&self, query: &str) -> Retrieval {
        self.ranker.rank(query, &self.corpus)
    }

    pub async fn answer(&self, query: &str) -> QueryResponse {
        let retrieval = self.retrieve(query);
        let chunks = retrieval.chunks();
        debug!(
            results = chunks.len(),
            fallback = retrieval.is_fallback(),
            remote = self.collaborator.is_available(),
            "Retrieved context"
        );

        let answer = self.generate_answer(query, chunks).await;

        QueryResponse {
            answer,
            sources: format_sources(chunks, self.max_sources, self.source_preview_chars),
        }
    }

    async fn generate_answer(&self, query: &str, chunks: &[ScoredChunk]) -> String {
        let request = CompletionRequest::user(query_prompt(query, chunks), QUERY_MAX_TOKENS)
            .with_temperature(self.temperature);

        match self.collaborator.try_complete(request, "query answer").await {
            Some(answer) => {
                let lower = answer.to_lowercase();
                if lower.contains("consult") && lower.contains("health") {
                    warn!("Completion answer looks like a generic disclaimer");
                }
                answer
            }
            None => manual_answer(query, chunks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::testing::{remote, ScriptedProvider};
    use crate::constants::GUIDELINES_NAME;
    use crate::knowledge::keywords::extract_keywords;
    use crate::knowledge::types::ChunkRecord;

    fn corpus() -> Corpus {
        let record = |id: &str, section: &str, content: &str| ChunkRecord {
            id: id.to_string(),
            title: section.to_string(),
            section: section.to_string(),
            content: content.to_string(),
            keywords: extract_keywords(content).into_iter().collect(),
            ..Default::default()
        };
        Corpus::new(vec![
            record(
                "m",
                "Malaria",
                "Malaria treatment requires artemisinin combination therapy",
            ),
            record("g", "Gout", "Colchicine relieves acute gout"),
        ])
    }

    fn service(collaborator: Collaborator) -> RagService {
        RagService::new(
            corpus(),
            collaborator,
            &SearchConfig::default(),
            &CompletionConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_offline_answer_uses_ranked_chunks() {
        let response = service(Collaborator::Offline)
            .answer("What is the malaria treatment")
            .await;

        assert!(response
            .answer
            .starts_with(&format!("Based on {}:", GUIDELINES_NAME)));
        assert!(response.answer.contains("1. From Malaria:"));
        assert_eq!(response.sources.len(), 1);
        assert_eq!(response.sources[0].id, "1");
        assert_eq!(response.sources[0].title, "Malaria");
    }

    #[tokio::test]
    async fn test_unmatched_query_cites_fallback_guidance() {
        let response = service(Collaborator::Offline).answer("the and for").await;

        assert_eq!(response.sources.len(), 2);
        assert_eq!(response.sources[0].title, "Standard Treatment Principles");
        assert!(response.answer.contains("From Safety Protocols:"));
    }

    #[tokio::test]
    async fn test_collaborator_answer_and_prompt() {
        let provider = ScriptedProvider::new(vec![Ok("Give artemether-lumefantrine.")]);
        let response = service(remote(&provider)).answer("malaria treatment").await;

        assert_eq!(response.answer, "Give artemether-lumefantrine.");
        assert_eq!(response.sources.len(), 1);

        let requests = provider.requests();
        assert_eq!(requests[0].max_tokens, 800);
        assert_eq!(requests[0].temperature, Some(0.3));
        assert!(requests[0]
            .prompt
            .contains("Malaria:\nMalaria treatment requires artemisinin combination therapy..."));
    }

    #[tokio::test]
    async fn test_collaborator_failure_uses_manual_answer() {
        let provider = ScriptedProvider::new(vec![Err("timeout")]);
        let response = service(remote(&provider)).answer("gout colchicine").await;

        assert!(response.answer.contains("1. From Gout:"));
        assert_eq!(response.sources[0].title, "Gout");
    }
}
