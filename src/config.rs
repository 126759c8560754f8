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

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::knowledge::pipeline::PipelineVariant;

const CONFIG_TEMPLATE: &str = include_str!("../config-templates/default.toml");

/// Document processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    pub pipeline: PipelineVariant,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub sentences_per_chunk: usize,
    pub min_chunk_chars: usize,
    pub keyword_limit: usize,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineVariant::Standard,
            chunk_size: 512,
            chunk_overlap: 100,
            sentences_per_chunk: 3,
            min_chunk_chars: 50,
            keyword_limit: 20,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub top_k: usize,
    pub max_sources: usize,
    pub source_preview_chars: usize,
    pub lookup_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            max_sources: 3,
            source_preview_chars: 200,
            lookup_limit: 5,
        }
    }
}

/// Completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub endpoint: String,
    pub model: String,
    pub query_api_key_env: String,
    pub case_study_api_key_env: String,
    /// Sampling temperature for query answers; case study calls use the service default
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.mistral.ai".to_string(),
            model: "mistral-large-latest".to_string(),
            query_api_key_env: "MISTRAL_API_KEY".to_string(),
            case_study_api_key_env: "MISTRAL_CASE_STUDY_API_KEY".to_string(),
            temperature: 0.3,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub corpus_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// When set, JSON logs are also written to daily-rotated files here
    pub directory: Option<PathBuf>,
}

/// Main configuration for medguide
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub knowledge: KnowledgeConfig,
    pub search: SearchConfig,
    pub completion: CompletionConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from config.toml file
    /// `MEDGUIDE_CONFIG` points at an explicit file; otherwise the system config
    /// directory is used and seeded from the embedded template on first run
    pub fn load() -> Result<Self> {
        if let Ok(explicit) = std::env::var("MEDGUIDE_CONFIG") {
            return Self::load_from(Path::new(&explicit));
        }

        let config_path = crate::storage::get_system_config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config: Self = toml::from_str(CONFIG_TEMPLATE)?;
            config.validate()?;

            if let Some(parent) = config_path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&config_path, CONFIG_TEMPLATE)?;

            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.search.top_k == 0 {
            bail!("search.top_k must be at least 1");
        }
        Ok(())
    }

    /// Resolve the corpus file, CLI override first
    pub fn corpus_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(path.to_path_buf());
        }
        match &self.storage.corpus_path {
            Some(path) => Ok(path.clone()),
            None => crate::storage::get_default_corpus_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_matches_defaults() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        let defaults = Config::default();

        assert_eq!(config.knowledge.pipeline, defaults.knowledge.pipeline);
        assert_eq!(config.knowledge.chunk_size, 512);
        assert_eq!(config.knowledge.chunk_overlap, 100);
        assert_eq!(config.knowledge.sentences_per_chunk, 3);
        assert_eq!(config.knowledge.min_chunk_chars, 50);
        assert_eq!(config.knowledge.keyword_limit, 20);
        assert_eq!(config.search.top_k, defaults.search.top_k);
        assert_eq!(config.search.max_sources, 3);
        assert_eq!(config.completion.model, "mistral-large-latest");
        assert!(config.storage.corpus_path.is_none());
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[search]\ntop_k = 8\n").unwrap();
        assert_eq!(config.search.top_k, 8);
        assert_eq!(config.search.source_preview_chars, 200);
        assert_eq!(config.knowledge.chunk_size, 512);
        assert_eq!(config.completion.query_api_key_env, "MISTRAL_API_KEY");
    }

    #[test]
    fn test_pipeline_variant_from_toml() {
        let config: Config = toml::from_str("[knowledge]\npipeline = \"simple\"\n").unwrap();
        assert_eq!(config.knowledge.pipeline, PipelineVariant::Simple);
    }

    #[test]
    fn test_corpus_path_override() {
        let mut config = Config::default();
        config.storage.corpus_path = Some(PathBuf::from("/data/chunks.json"));

        let resolved = config.corpus_path(None).unwrap();
        assert_eq!(resolved, PathBuf::from("/data/chunks.json"));

        let overridden = config
            .corpus_path(Some(Path::new("/tmp/other.json")))
            .unwrap();
        assert_eq!(overridden, PathBuf::from("/tmp/other.json"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[completion]\nmodel = \"mistral-small-latest\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.completion.model, "mistral-small-latest");
        assert_eq!(config.completion.timeout_secs, 60);
    }

    #[test]
    fn test_zero_top_k_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\ntop_k = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("search.top_k must be at least 1"));
    }
}
