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
use tracing::{debug, info};

use crate::completion::parse::{parse_correct_answers, parse_evaluation};
use crate::completion::prompts::{
    case_description_prompt, correct_answers_prompt, evaluation_prompt,
    CASE_DESCRIPTION_MAX_TOKENS, CORRECT_ANSWERS_MAX_TOKENS, EVALUATION_MAX_TOKENS,
};
use crate::completion::{Collaborator, CompletionRequest};
use crate::knowledge::lookup::illness_context;
use crate::knowledge::Corpus;

pub mod evaluation;
pub mod illnesses;


pub use evaluation::heuristic_evaluation;
pub use illnesses::{pick_illness, ILLNESSES};

/// Chunks of illness context quoted in case study prompts
const PROMPT_CONTEXT_CHUNKS: usize = 3;

/// Generated case study with its reference answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub illness: String,
    pub case_description: String,
    pub correct_diagnosis: String,
    pub correct_treatment: String,
}

/// Grading of a user's answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub diagnosis_score: u32,
    pub treatment_score: u32,
    pub feedback: String,
}

/// Case study generation and grading over one corpus
pub struct CaseStudyService {
    corpus: Corpus,
    collaborator: Collaborator,
    lookup_limit: usize,
}

impl CaseStudyService {
    pub fn new(corpus: Corpus, collaborator: Collaborator, lookup_limit: usize) -> Self {
        Self {
            corpus,
            collaborator,
            lookup_limit,
        }
    }

    /// Case study for `illness`, or for a random illness from the fixed list
    pub async fn generate(&self, illness: Option<&str>) -> CaseStudy {
        let illness = match illness.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None => pick_illness(&mut rand::thread_rng()).to_string(),
        };

        let context = self.illness_context_text(&illness);
        debug!(illness = %illness, context_chars = context.len(), "Generating case study");

        let description = self
            .collaborator
            .try_complete(
                CompletionRequest::user(
                    case_description_prompt(&illness, &context),
                    CASE_DESCRIPTION_MAX_TOKENS,
                ),
                "case description",
            )
            .await;

        match description {
            Some(case_description) => {
                let (correct_diagnosis, correct_treatment) =
                    self.correct_answers(&illness, &context).await;
                CaseStudy {
                    illness,
                    case_description,
                    correct_diagnosis,
                    correct_treatment,
                }
            }
            None => {
                info!(illness = %illness, "Using template case study");
                template_case_study(&illness)
            }
        }
    }

    /// Grade user answers with the completion service, or with the offline
    /// heuristic when it is unavailable or the call failed
    pub async fn evaluate(
        &self,
        correct_diagnosis: &str,
        correct_treatment: &str,
        user_diagnosis: &str,
        user_treatment: &str,
    ) -> Evaluation {
        let reply = self
            .collaborator
            .try_complete(
                CompletionRequest::user(
                    evaluation_prompt(
                        correct_diagnosis,
                        correct_treatment,
                        user_diagnosis,
                        user_treatment,
                    ),
                    EVALUATION_MAX_TOKENS,
                ),
                "evaluation",
            )
            .await;

        match reply {
            Some(text) => parse_evaluation(&text),
            None => heuristic_evaluation(
                correct_diagnosis,
                correct_treatment,
                user_diagnosis,
                user_treatment,
            ),
        }
    }

    async fn correct_answers(&self, illness: &str, context: &str) -> (String, String) {
        let reply = self
            .collaborator
            .try_complete(
                CompletionRequest::user(
                    correct_answers_prompt(illness, context),
                    CORRECT_ANSWERS_MAX_TOKENS,
                ),
                "correct answers",
            )
            .await;

        match reply {
            Some(text) => parse_correct_answers(&text, illness),
            None => (
                illness.to_string(),
                format!("Standard treatment for {} as per Ghana STG", illness),
            ),
        }
    }

    fn illness_context_text(&self, illness: &str) -> String {
        illness_context(illness, &self.corpus, self.lookup_limit)
            .iter()
            .take(PROMPT_CONTEXT_CHUNKS)
            .map(|record| record.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Case study built without the completion service
pub fn template_case_study(illness: &str) -> CaseStudy {
    CaseStudy {
        illness: illness.to_string(),
        case_description: illnesses::template_description(illness),
        correct_diagnosis: illness.to_string(),
        correct_treatment: format!(
            "Treatment for {} as per Ghana Standard Treatment Guidelines",
            illness
        ),
    }
}
