// Copyright 2026 Muvon Un Limited
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

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::knowledge::PipelineVariant;

#[derive(Parser, Debug)]
#[command(name = "medguide")]
#[command(version, author = "Muvon Un Limited <opensource@muvon.io>")]
#[command(about = "Question answering and case studies over chunked standard treatment guidelines", long_about = None)]
pub struct Cli {
    /// Corpus file to read and write (overrides storage.corpus_path)
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chunk a guidelines document (.docx, .txt or .md) into the corpus file
    Process {
        /// Source document path
        path: PathBuf,

        /// Processing pipeline (defaults to knowledge.pipeline)
        #[arg(short, long, value_enum)]
        pipeline: Option<PipelineVariant>,
    },

    /// Answer a question from the guidelines
    Query {
        /// Free-text question
        query: String,
    },

    /// Show the chunks ranked for a query
    Search {
        /// Search query
        query: String,

        /// Maximum number of chunks to show
        #[arg(
            short,
            long,
            default_value = "5",
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
        )]
        limit: usize,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Generate a case study
    Generate {
        /// Illness to build the case around (random when omitted)
        illness: Option<String>,
    },

    /// Grade answers to a case study
    Evaluate {
        correct_diagnosis: String,
        correct_treatment: String,
        user_diagnosis: String,
        user_treatment: String,
    },

    /// List the illnesses case studies are drawn from
    Illnesses,
}
