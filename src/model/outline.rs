//! Outline types: the final title + ordered heading list for one document.

use serde::{Deserialize, Serialize};

/// Nesting level of a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Map a 1-based numbering depth to a level (1 → H1, 2 → H2, 3+ → H3).
    pub fn from_depth(depth: u32) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// Map a 0-based size band index to a level (band 0 → H1, 1 → H2, rest → H3).
    pub fn from_band(band: usize) -> Self {
        match band {
            0 => HeadingLevel::H1,
            1 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeadingLevel::H1 => write!(f, "H1"),
            HeadingLevel::H2 => write!(f, "H2"),
            HeadingLevel::H3 => write!(f, "H3"),
        }
    }
}

/// A single heading in document reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading text.
    pub text: String,

    /// Nesting level.
    pub level: HeadingLevel,

    /// Source page (1-based).
    pub page: u32,
}

impl Heading {
    /// Create a new heading.
    pub fn new(text: impl Into<String>, level: HeadingLevel, page: u32) -> Self {
        Self {
            text: text.into(),
            level,
            page,
        }
    }
}

/// The extracted outline for one document.
///
/// `headings` preserves document reading order (page ascending, then original
/// position within the page); the level is an attribute, never a sort key.
/// The serialized shape is the outline-mode output contract:
/// `{"title": "...", "outline": [{"text", "level", "page"}, ...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    /// Document title; empty string when no first-page candidate qualifies.
    pub title: String,

    /// Ordered headings.
    #[serde(rename = "outline")]
    pub headings: Vec<Heading>,
}

impl Outline {
    /// Create an outline.
    pub fn new(title: impl Into<String>, headings: Vec<Heading>) -> Self {
        Self {
            title: title.into(),
            headings,
        }
    }

    /// The empty outline emitted for documents with no fragments.
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            headings: Vec::new(),
        }
    }

    /// Whether the outline has neither title nor headings.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.headings.is_empty()
    }

    /// Count headings at a given level.
    pub fn count_level(&self, level: HeadingLevel) -> usize {
        self.headings.iter().filter(|h| h.level == level).count()
    }
}
