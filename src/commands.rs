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

use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use tracing::error;

use crate::case_study::{CaseStudyService, ILLNESSES};
use crate::cli::Commands;
use crate::completion::Collaborator;
use crate::config::Config;
use crate::knowledge::formatting::format_search_results;
use crate::knowledge::{Corpus, Pipeline, Ranker, Retrieval};
use crate::rag::RagService;

/// Run one subcommand. Command results are printed to stdout as JSON.
pub async fn execute(config: &Config, command: Commands, corpus_override: Option<&Path>) -> Result<()> {
    let corpus_path = config.corpus_path(corpus_override)?;

    match command {
        Commands::Process { path, pipeline } => {
            let variant = pipeline.unwrap_or(config.knowledge.pipeline);
            let result = Pipeline::new(variant, &config.knowledge)
                .and_then(|pipeline| pipeline.process(&path, &corpus_path));

            match result {
                Ok(report) => print_json(&json!({ "success": true, "report": report })),
                Err(e) => {
                    error!(error = %e, source = %path.display(), "Document processing failed");
                    print_json(&json!({ "success": false, "error": format!("{:#}", e) }))?;
                    Err(e)
                }
            }
        }

        Commands::Query { query } => {
            let collaborator =
                Collaborator::from_env(&config.completion, &config.completion.query_api_key_env);
            let service = RagService::new(
                Corpus::load(&corpus_path),
                collaborator,
                &config.search,
                &config.completion,
            );
            print_json(&service.answer(&query).await)
        }

        Commands::Search {
            query,
            limit,
            format,
        } => {
            let retrieval = Ranker::new(limit).rank(&query, &Corpus::load(&corpus_path));
            match format.as_str() {
                "text" => {
                    print!("{}", format_search_results(&retrieval));
                    Ok(())
                }
                "json" => print_json(&search_json(&retrieval)),
                other => bail!("Unknown output format '{}', expected text or json", other),
            }
        }

        Commands::Generate { illness } => {
            let service = case_study_service(config, &corpus_path);
            print_json(&service.generate(illness.as_deref()).await)
        }

        Commands::Evaluate {
            correct_diagnosis,
            correct_treatment,
            user_diagnosis,
            user_treatment,
        } => {
            let service = case_study_service(config, &corpus_path);
            let evaluation = service
                .evaluate(
                    &correct_diagnosis,
                    &correct_treatment,
                    &user_diagnosis,
                    &user_treatment,
                )
                .await;
            print_json(&evaluation)
        }

        Commands::Illnesses => print_json(&ILLNESSES),
    }
}

fn case_study_service(config: &Config, corpus_path: &Path) -> CaseStudyService {
    let collaborator =
        Collaborator::from_env(&config.completion, &config.completion.case_study_api_key_env);
    CaseStudyService::new(
        Corpus::load(corpus_path),
        collaborator,
        config.search.lookup_limit,
    )
}

fn search_json(retrieval: &Retrieval) -> serde_json::Value {
    match retrieval {
        Retrieval::Ranked(chunks) => json!({ "fallback": null, "results": chunks }),
        Retrieval::Fallback { reason, chunks } => json!({ "fallback": reason, "results": chunks }),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
