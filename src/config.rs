//! Configuration for outline extraction and persona ranking.
//!
//! All thresholds and weights are explicit, immutable values passed into the
//! pipeline by reference. Nothing here is global or mutable, so documents
//! with different tunings can be processed concurrently without interference.

/// Configuration for the heading classification pipeline.
///
/// The defaults reproduce the empirically tuned behavior; every knob is
/// exposed so a caller can re-tune for unusual document collections.
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    /// Weight of the relative-font-size signal.
    pub size_weight: f32,

    /// Weight of the numbering/pattern signal.
    pub pattern_weight: f32,

    /// Weight of the shape signal (length, punctuation, capitalization, bold).
    pub shape_weight: f32,

    /// Weight of the on-page position signal.
    pub position_weight: f32,

    /// Combined score a line must reach to become a heading candidate.
    pub acceptance_threshold: f32,

    /// Size ratio (line size / body size) below which the size signal is zero.
    pub min_size_ratio: f32,

    /// Size ratio at which the size signal saturates to 1.0.
    pub max_size_ratio: f32,

    /// Maximum character length for a heading candidate line.
    pub max_heading_len: usize,

    /// Minimum character length for a heading candidate line.
    pub min_heading_len: usize,

    /// Normalized y-position (0.0 = top of page) below which the position
    /// bonus applies.
    pub top_of_page_band: f32,

    /// Vertical tolerance for merging fragments into one logical line, in
    /// normalized page units (fraction of the page height).
    pub line_merge_tolerance: f32,

    /// Process documents of a batch in parallel.
    pub parallel: bool,
}

impl OutlineConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the four signal weights at once.
    pub fn with_weights(mut self, size: f32, pattern: f32, shape: f32, position: f32) -> Self {
        self.size_weight = size;
        self.pattern_weight = pattern;
        self.shape_weight = shape;
        self.position_weight = position;
        self
    }

    /// Set the candidate acceptance threshold.
    pub fn with_acceptance_threshold(mut self, threshold: f32) -> Self {
        self.acceptance_threshold = threshold;
        self
    }

    /// Set the maximum heading line length in characters.
    pub fn with_max_heading_len(mut self, len: usize) -> Self {
        self.max_heading_len = len;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            size_weight: 0.4,
            pattern_weight: 0.3,
            shape_weight: 0.2,
            position_weight: 0.1,
            acceptance_threshold: 0.4,
            min_size_ratio: 1.05,
            max_size_ratio: 1.5,
            max_heading_len: 150,
            min_heading_len: 3,
            top_of_page_band: 0.15,
            line_merge_tolerance: 0.005,
            parallel: true,
        }
    }
}

/// Configuration for the persona relevance ranker.
#[derive(Debug, Clone)]
pub struct RankConfig {
    /// Maximum number of ranked sections returned.
    pub top_sections: usize,

    /// Maximum number of refined-text analyses returned.
    pub top_subsections: usize,

    /// Diversity cap: maximum sections one document may contribute to the
    /// top of the ranking before being pushed below under-represented
    /// documents.
    pub max_per_document: usize,

    /// Hard upper bound on refined-text length in characters, ellipsis
    /// included.
    pub max_refined_len: usize,

    /// Multiplier for keyword hits in the section title relative to hits in
    /// the section body.
    pub title_weight: f32,

    /// Maximum section title length in the ranked output.
    pub max_title_len: usize,
}

impl RankConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of ranked sections to return.
    pub fn with_top_sections(mut self, n: usize) -> Self {
        self.top_sections = n;
        self
    }

    /// Set the number of refined-text analyses to return.
    pub fn with_top_subsections(mut self, n: usize) -> Self {
        self.top_subsections = n;
        self
    }

    /// Set the per-document diversity cap.
    pub fn with_max_per_document(mut self, n: usize) -> Self {
        self.max_per_document = n;
        self
    }

    /// Set the refined-text length bound.
    pub fn with_max_refined_len(mut self, len: usize) -> Self {
        self.max_refined_len = len;
        self
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            top_sections: 12,
            top_subsections: 8,
            max_per_document: 3,
            max_refined_len: 500,
            title_weight: 5.0,
            max_title_len: 80,
        }
    }
}
