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

use anyhow::Result;
use tracing::debug;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt::Layer, prelude::*, registry::Registry, EnvFilter};

use crate::config::LoggingConfig;

fn env_filter(debug_mode: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug_mode {
            // Debug level for our crate, info for dependencies
            EnvFilter::new("info,medguide=debug")
        } else {
            EnvFilter::new("medguide=info")
        }
    })
}

/// Initialize logging.
///
/// Human-readable logs go to stderr; stdout carries command output only. When a
/// log directory is configured, JSON logs are also written to daily-rotated files.
pub fn init_logging(config: &LoggingConfig, debug_mode: bool) -> Result<()> {
    let console_layer = Layer::new()
        .with_writer(std::io::stderr)
        .with_target(false);

    let file_layer = match &config.directory {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "medguide.log");
            Some(
                Layer::new()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json(),
            )
        }
        None => None,
    };

    Registry::default()
        .with(console_layer)
        .with(file_layer)
        .with(env_filter(debug_mode))
        .try_init()?;

    debug!(
        log_directory = ?config.directory,
        debug_mode = debug_mode,
        "Logging initialized"
    );

    Ok(())
}
