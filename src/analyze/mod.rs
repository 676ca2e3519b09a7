//! The per-document analysis pipeline.
//!
//! Stages are strictly sequential, data-dependent transforms: fragments →
//! font profile → heading candidates → (hierarchy, title) → outline. All
//! working state is owned by the caller's stack frame and discarded after
//! the pass; nothing is cached across documents.

pub mod classifier;
pub mod font_profile;
pub mod hierarchy;
pub mod sections;
pub mod title;

use std::collections::BTreeSet;

use crate::config::OutlineConfig;
use crate::error::Result;
use crate::model::{validate_fragments, Outline, Section, TextFragment};

pub use classifier::{merge_lines, HeadingCandidate, HeadingClassifier, TextLine};
pub use font_profile::FontProfile;
pub use hierarchy::assign_levels;
pub use sections::collect_sections;
pub use title::select_title;

/// Outline plus ranked-mode section bodies for one document.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    /// The extracted outline.
    pub outline: Outline,

    /// Sections (heading + body text) in reading order.
    pub sections: Vec<Section>,
}

/// Run the full pipeline and return only the outline.
///
/// Zero fragments yield the empty outline (`{"title": "", "outline": []}`);
/// structurally invalid fragments are the only hard failure.
pub fn extract_outline(fragments: &[TextFragment], config: &OutlineConfig) -> Result<Outline> {
    validate_fragments(fragments)?;
    if fragments.is_empty() {
        return Ok(Outline::empty());
    }

    let lines = merge_lines(fragments, config);
    let profile = FontProfile::build(fragments);
    let classifier = HeadingClassifier::new();
    let candidates = classifier.classify(&lines, &profile, config);

    Ok(assemble_outline(&candidates))
}

/// Run the full pipeline, keeping section bodies for persona ranking.
pub fn analyze_document(
    document: &str,
    fragments: &[TextFragment],
    config: &OutlineConfig,
) -> Result<DocumentAnalysis> {
    validate_fragments(fragments)?;
    if fragments.is_empty() {
        return Ok(DocumentAnalysis {
            outline: Outline::empty(),
            sections: Vec::new(),
        });
    }

    let lines = merge_lines(fragments, config);
    let profile = FontProfile::build(fragments);
    let classifier = HeadingClassifier::new();
    let candidates = classifier.classify(&lines, &profile, config);

    let outline = assemble_outline(&candidates);
    let sections = collect_sections(document, &lines, &candidates);

    Ok(DocumentAnalysis { outline, sections })
}

/// Combine title selection and level assignment into the final outline.
///
/// The title's own candidate lines are removed from the heading list so the
/// title is never double-reported as an H1; duplicates identical in
/// (text, page) are dropped keeping the first. Order stays document reading
/// order throughout — only ordered collections are involved, so re-runs on
/// the same input are byte-identical.
fn assemble_outline(candidates: &[HeadingCandidate]) -> Outline {
    let (title, consumed) = select_title(candidates);
    let consumed: BTreeSet<usize> = consumed.into_iter().collect();

    let remaining: Vec<HeadingCandidate> = candidates
        .iter()
        .filter(|c| !consumed.contains(&c.order))
        .cloned()
        .collect();

    let mut seen: BTreeSet<(String, u32)> = BTreeSet::new();
    let headings = assign_levels(&remaining)
        .into_iter()
        .filter(|h| seen.insert((h.text.clone(), h.page)))
        .collect();

    Outline::new(title, headings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;

    fn frag(text: &str, size: f32, bold: bool, page: u32, y: f32) -> TextFragment {
        TextFragment::new(text, size, bold, page, y, 72.0)
    }

    #[test]
    fn test_empty_document_yields_empty_outline() {
        let outline = extract_outline(&[], &OutlineConfig::default()).unwrap();
        assert_eq!(outline, Outline::empty());
    }

    #[test]
    fn test_invalid_fragment_is_hard_failure() {
        let fragments = vec![frag("x", -2.0, false, 1, 0.1)];
        assert!(extract_outline(&fragments, &OutlineConfig::default()).is_err());
    }

    #[test]
    fn test_title_excluded_from_headings() {
        let fragments = vec![
            frag("1. Introduction", 18.0, true, 1, 0.05),
            frag(
                "Lorem ipsum dolor sit amet, a long passage of plain body text.",
                11.0,
                false,
                1,
                0.15,
            ),
            frag("1.1 Background", 14.0, true, 1, 0.30),
        ];
        let outline = extract_outline(&fragments, &OutlineConfig::default()).unwrap();

        assert_eq!(outline.title, "1. Introduction");
        assert_eq!(outline.headings.len(), 1);
        assert_eq!(outline.headings[0].text, "1.1 Background");
        assert_eq!(outline.headings[0].level, HeadingLevel::H2);
        assert_eq!(outline.headings[0].page, 1);
    }

    #[test]
    fn test_duplicate_headings_removed() {
        let fragments = vec![
            frag("Title Line", 20.0, true, 1, 0.05),
            frag("2. Repeated", 14.0, true, 1, 0.3),
            frag("2. Repeated", 14.0, true, 1, 0.6),
            frag("2. Repeated", 14.0, true, 2, 0.2),
        ];
        let outline = extract_outline(&fragments, &OutlineConfig::default()).unwrap();
        let on_page_1 = outline
            .headings
            .iter()
            .filter(|h| h.text == "2. Repeated" && h.page == 1)
            .count();
        assert_eq!(on_page_1, 1);
        // Same text on a different page is a different heading.
        assert!(outline.headings.iter().any(|h| h.page == 2));
    }

    #[test]
    fn test_determinism_across_runs() {
        let fragments = vec![
            frag("Guide to Everything", 22.0, true, 1, 0.04),
            frag("1. Setup", 16.0, true, 1, 0.2),
            frag("Install the tool and configure paths for the environment.", 11.0, false, 1, 0.3),
            frag("1.1 Requirements", 13.0, true, 1, 0.5),
            frag("2. Usage", 16.0, true, 2, 0.1),
        ];
        let config = OutlineConfig::default();
        let a = serde_json::to_string(&extract_outline(&fragments, &config).unwrap()).unwrap();
        let b = serde_json::to_string(&extract_outline(&fragments, &config).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reading_order_invariant() {
        let fragments = vec![
            frag("Top Title", 22.0, true, 1, 0.04),
            frag("9. Last Big Section", 16.0, true, 3, 0.1),
            frag("1. Small Early Section", 13.0, true, 1, 0.4),
            frag("5. Middle Section", 16.0, true, 2, 0.1),
        ];
        let outline = extract_outline(&fragments, &OutlineConfig::default()).unwrap();
        let pages: Vec<u32> = outline.headings.iter().map(|h| h.page).collect();
        let mut sorted = pages.clone();
        sorted.sort_unstable();
        assert_eq!(pages, sorted);
    }

    #[test]
    fn test_analyze_document_sections() {
        let fragments = vec![
            frag("Cookbook", 22.0, true, 1, 0.04),
            frag("Vegetarian Recipes", 16.0, true, 1, 0.2),
            frag("Use lentils and beans for hearty mains.", 11.0, false, 1, 0.3),
            frag("Desserts", 16.0, true, 2, 0.1),
            frag("Fruit based desserts travel well.", 11.0, false, 2, 0.2),
        ];
        let analysis =
            analyze_document("cookbook.pdf", &fragments, &OutlineConfig::default()).unwrap();
        assert_eq!(analysis.outline.title, "Cookbook");
        assert_eq!(analysis.sections.len(), 3);
        assert_eq!(analysis.sections[1].title, "Vegetarian Recipes");
        assert!(analysis.sections[1].body.contains("lentils"));
    }
}
