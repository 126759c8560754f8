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

/// Words never kept as keywords. Entries shorter than four letters are already
/// dropped by the length filter but stay listed so the filter order is explicit.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old", "see",
    "two", "way", "who", "boy", "did", "its", "let", "put", "say", "she", "too", "use", "with",
    "this", "that", "from", "they", "know", "want", "been", "good", "much", "some", "time",
    "very", "when", "come", "here", "just", "like", "long", "make", "many", "over", "such",
    "take", "than", "them", "well", "were", "will", "what",
];

/// Clinical vocabulary that earns the domain boost when shared by query and chunk
pub const DOMAIN_TERMS: &[&str] = &[
    "treatment",
    "therapy",
    "medicine",
    "drug",
    "dose",
    "symptom",
    "diagnosis",
    "patient",
    "disease",
    "condition",
];

/// Score added per domain term present in both query and chunk
pub const DOMAIN_BOOST: u32 = 3;
/// Score added when a query keyword is in the chunk's keyword set
pub const KEYWORD_MATCH_SCORE: u32 = 2;
/// Score added when a query keyword occurs anywhere in the chunk content
pub const CONTENT_MATCH_SCORE: u32 = 1;

/// Title given to content that precedes the first heading
pub const DEFAULT_SECTION_TITLE: &str = "Introduction";

/// Value of the `type` field on every chunk
pub const CHUNK_TYPE_SECTION: &str = "section";

/// Guidelines edition cited in answers and prompts
pub const GUIDELINES_NAME: &str = "Ghana Standard Treatment Guidelines (7th Edition, 2017)";
