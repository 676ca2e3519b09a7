//! Section and ranking types, including the persona-mode output contract.

use serde::{Deserialize, Serialize};

/// A document section: a heading plus the body text that follows it, up to
/// the next heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Source document identifier (typically the file name).
    pub document: String,

    /// Section heading text.
    pub title: String,

    /// Page on which the section starts (1-based).
    pub page: u32,

    /// Concatenated body text of the section.
    pub body: String,
}

impl Section {
    /// Create a new section with an empty body.
    pub fn new(document: impl Into<String>, title: impl Into<String>, page: u32) -> Self {
        Self {
            document: document.into(),
            title: title.into(),
            page,
            body: String::new(),
        }
    }

    /// Append a line of body text.
    pub fn push_body(&mut self, text: &str) {
        if !self.body.is_empty() {
            self.body.push(' ');
        }
        self.body.push_str(text.trim());
    }
}

/// One entry in the persona-mode ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    /// Source document identifier.
    pub document: String,

    /// Section heading text (possibly truncated for output).
    pub section_title: String,

    /// Dense 1-based rank, unique per ranking run.
    pub importance_rank: u32,

    /// Page on which the section starts (1-based).
    pub page_number: u32,
}

/// Refined excerpt for one top-ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    /// Source document identifier.
    pub document: String,

    /// Length-bounded excerpt, truncated at a sentence or whitespace
    /// boundary, never mid-word.
    pub refined_text: String,

    /// Page on which the section starts (1-based).
    pub page_number: u32,
}

/// Metadata block of the persona-mode output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaMetadata {
    /// Documents that contributed sections, in processing order.
    pub input_documents: Vec<String>,

    /// Persona role string.
    pub persona: String,

    /// Task description string.
    pub job_to_be_done: String,
}

/// Persona-mode output contract, one object per collection:
/// `{"metadata", "extracted_sections", "subsection_analysis"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaOutput {
    pub metadata: PersonaMetadata,
    pub extracted_sections: Vec<RankedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}
