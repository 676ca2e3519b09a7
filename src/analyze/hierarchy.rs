//! Level assignment: banding candidates into H1/H2/H3.

use crate::model::{Heading, HeadingLevel};

use super::classifier::HeadingCandidate;

/// Assign levels to candidates and return headings in reading order.
///
/// Candidates are banded by distinct font size, descending: the largest
/// distinct size maps to H1, the next to H2, everything smaller to H3. A
/// candidate carrying an explicit numbering prefix takes its level from the
/// numbering depth instead (depth 1 → H1, 2 → H2, 3+ → H3) — explicit
/// numbering is a stronger depth signal than font size alone. With fewer
/// than three distinct sizes and no numbering, same-size candidates collapse
/// to the same level; levels are never diversified by force.
///
/// The input order (document reading order) is preserved; the level is an
/// attribute, not a sort key.
pub fn assign_levels(candidates: &[HeadingCandidate]) -> Vec<Heading> {
    let bands = size_bands(candidates);

    candidates
        .iter()
        .map(|candidate| {
            let level = match candidate.numbering_depth {
                Some(depth) => HeadingLevel::from_depth(depth),
                None => HeadingLevel::from_band(band_of(&bands, candidate.font_size)),
            };
            Heading::new(candidate.text.clone(), level, candidate.page)
        })
        .collect()
}

/// Distinct candidate sizes, descending, bucketed at 0.1pt.
fn size_bands(candidates: &[HeadingCandidate]) -> Vec<i32> {
    let mut keys: Vec<i32> = candidates
        .iter()
        .map(|c| (c.font_size * 10.0).round() as i32)
        .collect();
    keys.sort_unstable_by(|a, b| b.cmp(a));
    keys.dedup();
    keys
}

/// Index of the band a size falls into; sizes between bands take the band of
/// the next larger distinct size.
fn band_of(bands: &[i32], font_size: f32) -> usize {
    let key = (font_size * 10.0).round() as i32;
    bands.iter().position(|&b| key >= b).unwrap_or(bands.len())
}
