//! Section segmentation: pairing headings with the body text that follows.

use std::collections::BTreeSet;

use crate::model::Section;

use super::classifier::{HeadingCandidate, TextLine};

/// Split a document into sections: each heading candidate opens a section,
/// and every following line up to the next candidate joins its body.
///
/// Lines before the first heading (cover text, front matter) belong to no
/// section and are dropped.
pub fn collect_sections(
    document: &str,
    lines: &[TextLine],
    candidates: &[HeadingCandidate],
) -> Vec<Section> {
    let heading_orders: BTreeSet<usize> = candidates.iter().map(|c| c.order).collect();

    let mut sections: Vec<Section> = Vec::new();
    for line in lines {
        if heading_orders.contains(&line.order) {
            sections.push(Section::new(document, line.text.trim(), line.page));
        } else if let Some(current) = sections.last_mut() {
            current.push_body(&line.text);
        }
    }

    log::debug!("{}: segmented {} sections", document, sections.len());
    sections
}
