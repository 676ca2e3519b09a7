//! Heading classification: logical line merging and weighted-signal scoring.
//!
//! Each merged text line is scored with four signals normalized to `[0, 1]`
//! (relative font size, numbering/pattern match, line shape, page position)
//! and weighted-summed. A line becomes a heading candidate iff the combined
//! score reaches the acceptance threshold *and* its size is not below the
//! document body size. The scoring function is a fixed, explainable table of
//! weights; there is no randomness and no trained component.

use regex::Regex;

use crate::config::OutlineConfig;
use crate::model::TextFragment;

use super::font_profile::FontProfile;

/// A logical text line: adjacent same-line fragments merged in reading order.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// Merged text.
    pub text: String,

    /// Page number (1-based).
    pub page: u32,

    /// Dominant font size, weighted by character count across the merged
    /// fragments.
    pub font_size: f32,

    /// Whether the line is predominantly bold (by character count).
    pub is_bold: bool,

    /// Normalized vertical position of the line (0.0 = top).
    pub y_position: f32,

    /// Leftmost horizontal position.
    pub x_position: f32,

    /// Index in document reading order.
    pub order: usize,
}

/// A line judged likely to be a structural heading, before level assignment.
#[derive(Debug, Clone)]
pub struct HeadingCandidate {
    /// Heading text.
    pub text: String,

    /// Page number (1-based).
    pub page: u32,

    /// Line font size.
    pub font_size: f32,

    /// Whether the line is predominantly bold.
    pub is_bold: bool,

    /// Combined signal score; monotonic in the signals, never negative.
    pub score: f32,

    /// Count of numeric groups in an explicit numbering prefix
    /// (`"1."` → 1, `"2.3"` → 2), when the line carries one.
    pub numbering_depth: Option<u32>,

    /// Normalized vertical position (0.0 = top).
    pub y_position: f32,

    /// Leftmost horizontal position.
    pub x_position: f32,

    /// Index of the source line in document reading order.
    pub order: usize,
}

/// Heading classifier with pre-compiled text patterns.
pub struct HeadingClassifier {
    numbered_prefix: Regex,
    lettered_prefix: Regex,
    named_prefix: Regex,
    academic_section: Regex,
    title_case: Regex,
    ignore: Vec<Regex>,
}

impl HeadingClassifier {
    /// Compile the pattern set.
    pub fn new() -> Self {
        Self {
            // "1. Introduction", "2.3 Details", "10.1.2 Edge cases"
            numbered_prefix: Regex::new(r"^(\d+(?:\.\d+)*)\.?\s+\S").unwrap(),
            // "A. Appendix material"
            lettered_prefix: Regex::new(r"^[A-Z]\.\s+\S").unwrap(),
            // "Chapter 3", "Section 12", "Appendix B"
            named_prefix: Regex::new(r"^(?i)(chapter|section|appendix|part)\s+[\dA-Z]").unwrap(),
            academic_section: Regex::new(
                r"^(?i)(abstract|introduction|background|methodology|methods|results|findings|discussion|conclusion|conclusions|references|bibliography|acknowledg(e)?ments|summary|overview|glossary)$",
            )
            .unwrap(),
            // "Literature Review", "Getting Started"
            title_case: Regex::new(r"^[A-Z][a-z]+(?:\s+(?:[A-Z][a-z]+|of|the|and|for|in|to|a|an))*$")
                .unwrap(),
            ignore: vec![
                Regex::new(r"^\d+$").unwrap(),
                Regex::new(r"^[^\w\s]+$").unwrap(),
                Regex::new(r"^(?i)page\s+\d+$").unwrap(),
                Regex::new(r"^\w{1,2}$").unwrap(),
            ],
        }
    }

    /// Classify all lines of a document, returning accepted candidates in
    /// reading order.
    pub fn classify(
        &self,
        lines: &[TextLine],
        profile: &FontProfile,
        config: &OutlineConfig,
    ) -> Vec<HeadingCandidate> {
        let mut candidates = Vec::new();
        for line in lines {
            if let Some(candidate) = self.classify_line(line, profile, config) {
                candidates.push(candidate);
            }
        }
        log::debug!(
            "classified {} heading candidates from {} lines (body size {:.1})",
            candidates.len(),
            lines.len(),
            profile.body_size
        );
        candidates
    }

    /// Score one line; `None` when it is body text.
    pub fn classify_line(
        &self,
        line: &TextLine,
        profile: &FontProfile,
        config: &OutlineConfig,
    ) -> Option<HeadingCandidate> {
        let text = line.text.trim();
        let char_len = text.chars().count();

        if char_len < config.min_heading_len {
            return None;
        }
        if self.ignore.iter().any(|re| re.is_match(text)) {
            return None;
        }

        // Font-size floor is absolute: body-sized text below the dominant
        // size never becomes a heading, pattern or not. Sizes are bucketed
        // at 0.1pt, so allow half a bucket of slack.
        if line.font_size < profile.body_size - 0.05 {
            return None;
        }

        // Overlong lines and multi-sentence prose are body text.
        if char_len > config.max_heading_len || self.is_prose(text) {
            return None;
        }

        let size = size_signal(line.font_size, profile.body_size, config);
        let (pattern, numbering_depth) = self.pattern_signal(text);
        let shape = shape_signal(text, line.is_bold, char_len, config);
        let position = if line.y_position <= config.top_of_page_band {
            1.0
        } else {
            0.0
        };

        let score = (size * config.size_weight
            + pattern * config.pattern_weight
            + shape * config.shape_weight
            + position * config.position_weight)
            .max(0.0);

        if score < config.acceptance_threshold {
            return None;
        }

        Some(HeadingCandidate {
            text: text.to_string(),
            page: line.page,
            font_size: line.font_size,
            is_bold: line.is_bold,
            score,
            numbering_depth,
            y_position: line.y_position,
            x_position: line.x_position,
            order: line.order,
        })
    }

    /// Pattern signal in `[0, 1]` plus the numbering depth, if any.
    fn pattern_signal(&self, text: &str) -> (f32, Option<u32>) {
        if let Some(caps) = self.numbered_prefix.captures(text) {
            let depth = caps[1].split('.').count() as u32;
            return (1.0, Some(depth));
        }
        if self.named_prefix.is_match(text) {
            return (1.0, Some(1));
        }
        if self.lettered_prefix.is_match(text) {
            // Lettered prefixes mark top-level divisions (appendices).
            return (0.9, Some(1));
        }
        if self.academic_section.is_match(text) {
            return (0.9, None);
        }
        if is_all_caps(text) && text.split_whitespace().count() <= 5 {
            return (0.7, None);
        }
        if self.title_case.is_match(text) {
            return (0.5, None);
        }
        (0.0, None)
    }

    /// Multi-sentence prose ending in a period is body text, not a heading.
    ///
    /// A numbering prefix ("1.") contains a period but is not a sentence
    /// end, so a recognized prefix is stripped before counting breaks.
    fn is_prose(&self, text: &str) -> bool {
        if !text.ends_with('.') {
            return false;
        }
        let stripped = match self.numbered_prefix.captures(text) {
            Some(caps) => text[caps[1].len()..].trim_start_matches('.').trim_start(),
            None => text,
        };
        let interior = &stripped[..stripped.len() - 1];
        interior.matches(". ").count() >= 1
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge fragments into logical lines in reading order.
///
/// Fragments are sorted by `(page, y, x)` before merging, so the result is
/// deterministic regardless of input order. Adjacent fragments on the same
/// page whose vertical positions differ by at most the configured tolerance
/// belong to the same line; the line's font size is the character-weighted
/// dominant size, and the line is bold when most of its characters are.
pub fn merge_lines(fragments: &[TextFragment], config: &OutlineConfig) -> Vec<TextLine> {
    let mut ordered: Vec<&TextFragment> = fragments.iter().filter(|f| !f.text.trim().is_empty()).collect();
    ordered.sort_by(|a, b| {
        a.page
            .cmp(&b.page)
            .then(a.y_position.total_cmp(&b.y_position))
            .then(a.x_position.total_cmp(&b.x_position))
    });

    let mut lines: Vec<TextLine> = Vec::new();
    let mut run: Vec<&TextFragment> = Vec::new();

    for fragment in ordered {
        let same_line = run.last().is_some_and(|prev| {
            prev.page == fragment.page
                && (fragment.y_position - prev.y_position).abs() <= config.line_merge_tolerance
        });
        if !same_line && !run.is_empty() {
            let order = lines.len();
            lines.push(build_line(&run, order));
            run.clear();
        }
        run.push(fragment);
    }
    if !run.is_empty() {
        let order = lines.len();
        lines.push(build_line(&run, order));
    }

    lines
}

fn build_line(run: &[&TextFragment], order: usize) -> TextLine {
    let mut text = String::new();
    for fragment in run {
        let piece = fragment.text.trim();
        if !text.is_empty() && !text.ends_with(' ') {
            text.push(' ');
        }
        text.push_str(piece);
    }

    let total_chars: usize = run.iter().map(|f| f.char_count()).sum();
    let weighted_size: f32 = run
        .iter()
        .map(|f| f.font_size * f.char_count() as f32)
        .sum();
    let font_size = if total_chars > 0 {
        weighted_size / total_chars as f32
    } else {
        run[0].font_size
    };
    let bold_chars: usize = run
        .iter()
        .filter(|f| f.is_bold)
        .map(|f| f.char_count())
        .sum();

    TextLine {
        text,
        page: run[0].page,
        font_size,
        is_bold: total_chars > 0 && bold_chars * 2 > total_chars,
        y_position: run[0].y_position,
        x_position: run
            .iter()
            .map(|f| f.x_position)
            .fold(f32::INFINITY, f32::min),
        order,
    }
}

/// Relative-size signal: ~0 below a 1.05 ratio, saturating at the max ratio.
fn size_signal(font_size: f32, body_size: f32, config: &OutlineConfig) -> f32 {
    if body_size <= 0.0 {
        return 0.0;
    }
    let ratio = font_size / body_size;
    ((ratio - config.min_size_ratio) / (config.max_size_ratio - config.min_size_ratio))
        .clamp(0.0, 1.0)
}

/// Shape signal: bold, heading-like length, no terminal sentence punctuation,
/// and capitalization each contribute a fixed bonus.
fn shape_signal(text: &str, is_bold: bool, char_len: usize, config: &OutlineConfig) -> f32 {
    let mut score = 0.0;
    if is_bold {
        score += 0.4;
    }
    if char_len >= config.min_heading_len && char_len <= 100 {
        score += 0.3;
    }
    if !text.ends_with('.') && !text.ends_with(';') && !text.ends_with(',') {
        score += 0.2;
    }
    if capitalization_ratio(text) >= 0.5 {
        score += 0.1;
    }
    f32::min(score, 1.0)
}

/// Fraction of words starting with an uppercase letter.
fn capitalization_ratio(text: &str) -> f32 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let capitalized = words
        .iter()
        .filter(|w| w.chars().next().is_some_and(|c| c.is_uppercase() || c.is_numeric()))
        .count();
    capitalized as f32 / words.len() as f32
}

/// Whether every letter in the text is uppercase.
fn is_all_caps(text: &str) -> bool {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    !letters.is_empty() && letters.iter().all(|c| c.is_uppercase())
}
