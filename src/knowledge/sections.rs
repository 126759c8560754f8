use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SECTION_TITLE;
use crate::knowledge::types::Section;

/// How a paragraph is recognised as a section heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingRule {
    /// Paragraph mentions chapter, section, introduction or preface
    Keyword,
    /// Chapter prefix, or a short paragraph naming disorders, disease, treatment or care
    Guideline,
}

const KEYWORD_MARKERS: &[&str] = &["chapter", "section", "introduction", "preface"];
const GUIDELINE_MARKERS: &[&str] = &["DISORDERS", "DISEASE", "TREATMENT", "CARE"];
const GUIDELINE_HEADING_MAX_CHARS: usize = 100;

impl HeadingRule {
    pub fn is_heading(self, paragraph: &str) -> bool {
        match self {
            HeadingRule::Keyword => {
                let lower = paragraph.to_lowercase();
                KEYWORD_MARKERS.iter().any(|marker| lower.contains(marker))
            }
            HeadingRule::Guideline => {
                if paragraph.starts_with("Chapter") || paragraph.starts_with("CHAPTER") {
                    return true;
                }
                if paragraph.chars().count() >= GUIDELINE_HEADING_MAX_CHARS {
                    return false;
                }
                let upper = paragraph.to_uppercase();
                GUIDELINE_MARKERS.iter().any(|marker| upper.contains(marker))
            }
        }
    }
}

/// Group ordered paragraphs into titled sections.
///
/// Blank paragraphs are ignored. A heading closes the section being built (when it
/// has content) and titles the next one; content before any heading belongs to
/// an "Introduction" section.
pub fn split_sections<S: AsRef<str>>(paragraphs: &[S], rule: HeadingRule) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current_title = DEFAULT_SECTION_TITLE.to_string();
    let mut current_body: Vec<&str> = Vec::new();

    for paragraph in paragraphs {
        let text = paragraph.as_ref().trim();
        if text.is_empty() {
            continue;
        }

        if rule.is_heading(text) {
            if !current_body.is_empty() {
                sections.push(Section::new(current_title.clone(), current_body.join("\n")));
                current_body.clear();
            }
            current_title = text.to_string();
        } else {
            current_body.push(text);
        }
    }

    if !current_body.is_empty() {
        sections.push(Section::new(current_title, current_body.join("\n")));
    }

    sections
}
