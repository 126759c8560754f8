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

//! Text generation behind a provider seam.
//!
//! Every caller holds a [`Collaborator`], which is either a remote provider or
//! offline. Failures never escape it: callers get `None` and take their local
//! fallback path.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::CompletionConfig;

pub mod mistral;
pub mod parse;
pub mod prompts;

pub use mistral::MistralProvider;

/// Author of a prompt message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// One prompt and its generation limits
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub role: Role,
    pub prompt: String,
    pub max_tokens: u32,
    /// Omitted from the request when unset, leaving the service default
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn user(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            role: Role::User,
            prompt: prompt.into(),
            max_tokens,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// A text generation backend
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Generate text for `request`. Errors cover transport, status and
    /// malformed responses alike.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Completion service as seen by the query and case-study services
#[derive(Clone)]
pub enum Collaborator {
    Remote(Arc<dyn CompletionProvider>),
    Offline,
}

impl std::fmt::Debug for Collaborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collaborator::Remote(provider) => f
                .debug_tuple("Remote")
                .field(&provider.name())
                .finish(),
            Collaborator::Offline => f.write_str("Offline"),
        }
    }
}

impl Collaborator {
    /// Build from configuration and the API key held in `key_var`.
    /// A missing key or a client that cannot be built leaves the collaborator offline.
    pub fn from_env(config: &CompletionConfig, key_var: &str) -> Self {
        let api_key = match std::env::var(key_var) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                info!(key_var, "No completion API key configured, using local fallbacks");
                return Collaborator::Offline;
            }
        };

        match MistralProvider::new(config, api_key) {
            Ok(provider) => Collaborator::Remote(Arc::new(provider)),
            Err(e) => {
                warn!(error = %e, "Failed to initialize completion client, using local fallbacks");
                Collaborator::Offline
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Collaborator::Remote(_))
    }

    /// Run one completion. `None` when offline or when the call failed; the
    /// failure is logged and never retried.
    pub async fn try_complete(&self, request: CompletionRequest, purpose: &str) -> Option<String> {
        let provider = match self {
            Collaborator::Remote(provider) => provider,
            Collaborator::Offline => return None,
        };

        match provider.complete(&request).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(
                    provider = provider.name(),
                    purpose,
                    error = %e,
                    "Completion failed, falling back"
                );
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use anyhow::bail;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Provider replaying canned replies in order, recording every prompt
    pub struct ScriptedProvider {
        replies: Mutex<VecDeque<Result<String, String>>>,
        pub prompts: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        pub fn new(replies: Vec<Result<&str, &str>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(
                    replies
                        .into_iter()
                        .map(|r| r.map(str::to_string).map_err(str::to_string))
                        .collect(),
                ),
                prompts: Mutex::new(Vec::new()),
            })
        }

        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String> {
            self.prompts.lock().unwrap().push(request.clone());
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(text),
                Some(Err(message)) => bail!(message),
                None => bail!("no scripted reply left"),
            }
        }
    }

    pub fn remote(provider: &Arc<ScriptedProvider>) -> Collaborator {
        Collaborator::Remote(provider.clone())
    }
}
