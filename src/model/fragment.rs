//! The atomic input unit: one styled run of text.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One styled text run with position, page, and font metadata.
///
/// Fragments are produced by a [`FragmentSource`](crate::source::FragmentSource)
/// and are read-only to the pipeline. Pages are 1-based; `y_position` is
/// normalized from the top of the page (0.0 = top edge, 1.0 = bottom edge) so
/// that reading order is `(page, y_position, x_position)` ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// The text content.
    pub text: String,

    /// Font size in points.
    pub font_size: f32,

    /// Whether the font appears to be bold.
    #[serde(default)]
    pub is_bold: bool,

    /// Page number (1-based).
    pub page: u32,

    /// Normalized vertical position on the page (0.0 = top).
    pub y_position: f32,

    /// Horizontal position on the page (left edge of the run).
    #[serde(default)]
    pub x_position: f32,
}

impl TextFragment {
    /// Create a new fragment.
    pub fn new(
        text: impl Into<String>,
        font_size: f32,
        is_bold: bool,
        page: u32,
        y_position: f32,
        x_position: f32,
    ) -> Self {
        Self {
            text: text.into(),
            font_size,
            is_bold,
            page,
            y_position,
            x_position,
        }
    }

    /// Validate the structural input contract.
    ///
    /// Page 0 and negative or non-finite font sizes are hard errors; the
    /// caller decides whether to skip the document or abort the batch.
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(Error::InvalidFragment {
                page: self.page,
                reason: "page numbers are 1-based".to_string(),
            });
        }
        if !self.font_size.is_finite() || self.font_size < 0.0 {
            return Err(Error::InvalidFragment {
                page: self.page,
                reason: format!("font size {} is not a valid size", self.font_size),
            });
        }
        Ok(())
    }

    /// Character count of the trimmed text.
    pub fn char_count(&self) -> usize {
        self.text.trim().chars().count()
    }
}

/// Validate a whole fragment list against the input contract.
pub fn validate_fragments(fragments: &[TextFragment]) -> Result<()> {
    for fragment in fragments {
        fragment.validate()?;
    }
    Ok(())
}
