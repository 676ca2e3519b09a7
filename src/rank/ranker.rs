//! Persona relevance ranking: scoring, diversity cap, excerpt refinement.

use crate::config::RankConfig;
use crate::model::{RankedSection, Section, SubsectionAnalysis};

use super::keywords::PersonaContext;

/// The result of one ranking invocation.
#[derive(Debug, Clone)]
pub struct Ranking {
    /// Dense 1..K ranked sections.
    pub extracted_sections: Vec<RankedSection>,

    /// Refined excerpts for the top-ranked sections.
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

/// Rank sections against a persona context.
///
/// Scores are keyword hit counts (title hits weighted higher than body hits)
/// dampened by `ln(1 + body length)` so long sections are not favored purely
/// by bulk. The sort is stable: ties keep original document order, which
/// within a document is page-ascending. A per-document diversity cap pushes
/// a document's surplus sections below every cap-satisfying section, keeping
/// relative score order inside each bucket. When no section matches any
/// keyword, the original order is returned with zero scores — ranking never
/// fails for lack of keyword overlap.
pub fn rank_sections(
    sections: &[Section],
    persona: &PersonaContext,
    config: &RankConfig,
) -> Ranking {
    let mut scored: Vec<(usize, f32)> = sections
        .iter()
        .enumerate()
        .map(|(idx, section)| (idx, relevance_score(section, persona, config)))
        .collect();

    let any_hit = scored.iter().any(|(_, score)| *score > 0.0);
    let ordered = if any_hit {
        // Stable: equal scores keep original order; pages ascend within it.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        apply_diversity_cap(&scored, sections, config.max_per_document)
    } else {
        // Without any keyword overlap the diversity cap must not run: it
        // would reshuffle an all-zero list away from document order.
        log::debug!(
            "no keyword overlap for persona '{}', falling back to document order",
            persona.role
        );
        scored
    };

    let top_k = ordered.len().min(config.top_sections);
    let extracted_sections: Vec<RankedSection> = ordered[..top_k]
        .iter()
        .enumerate()
        .map(|(rank, &(idx, _))| {
            let section = &sections[idx];
            RankedSection {
                document: section.document.clone(),
                section_title: truncate_chars(&section.title, config.max_title_len),
                importance_rank: rank as u32 + 1,
                page_number: section.page,
            }
        })
        .collect();

    let subsection_analysis: Vec<SubsectionAnalysis> = ordered[..top_k]
        .iter()
        .filter(|&&(idx, _)| !sections[idx].body.trim().is_empty())
        .take(config.top_subsections)
        .map(|&(idx, _)| {
            let section = &sections[idx];
            SubsectionAnalysis {
                document: section.document.clone(),
                refined_text: refine_text(&section.body, config.max_refined_len),
                page_number: section.page,
            }
        })
        .collect();

    Ranking {
        extracted_sections,
        subsection_analysis,
    }
}

/// Keyword relevance of one section, length-dampened, never negative.
pub fn relevance_score(section: &Section, persona: &PersonaContext, config: &RankConfig) -> f32 {
    let title = section.title.to_lowercase();
    let body = section.body.to_lowercase();

    let mut raw = 0.0f32;
    for keyword in &persona.derived_keywords {
        raw += title.matches(keyword.as_str()).count() as f32 * config.title_weight;
        raw += body.matches(keyword.as_str()).count() as f32;
    }

    if raw == 0.0 {
        return 0.0;
    }
    let dampening = (1.0 + body.chars().count() as f32).ln().max(1.0);
    raw / dampening
}

/// Re-order a score-sorted list so that no document contributes more than
/// `cap` sections before every under-represented document's sections.
///
/// Sections beyond a document's cap move to an overflow bucket appended
/// after the main bucket; relative order is preserved within each.
fn apply_diversity_cap(
    scored: &[(usize, f32)],
    sections: &[Section],
    cap: usize,
) -> Vec<(usize, f32)> {
    if cap == 0 {
        return scored.to_vec();
    }

    let mut counts: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
    let mut main = Vec::with_capacity(scored.len());
    let mut overflow = Vec::new();

    for &(idx, score) in scored {
        let document = sections[idx].document.as_str();
        let count = counts.entry(document).or_insert(0);
        if *count < cap {
            *count += 1;
            main.push((idx, score));
        } else {
            overflow.push((idx, score));
        }
    }

    main.extend(overflow);
    main
}

/// Truncate to at most `max_len` characters on a char boundary.
fn truncate_chars(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        Some((byte, _)) => text[..byte].trim_end().to_string(),
        None => text.to_string(),
    }
}

/// Bound an excerpt to `max_len` characters, cutting at a sentence boundary
/// when one exists in the back half of the budget, else at whitespace —
/// never mid-word. A trailing ellipsis marks truncation and is budgeted
/// inside the bound. A body with no boundary at all (one unbroken token) is
/// hard-capped at `max_len` without an ellipsis.
pub fn refine_text(body: &str, max_len: usize) -> String {
    let text = body.trim();
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let budget = max_len.saturating_sub(3);
    let head_end = text
        .char_indices()
        .nth(budget)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len());
    let head = &text[..head_end];

    let sentence_cut = head
        .rfind(['.', '!', '?'])
        .map(|byte| byte + 1)
        .filter(|&byte| byte * 2 >= head_end);
    let cut = match sentence_cut.or_else(|| head.rfind(char::is_whitespace)) {
        Some(byte) => byte,
        None => {
            // A single unbroken token longer than the budget has no boundary
            // to cut at; hard-cap it with no ellipsis rather than fake a
            // word-safe cut.
            let end = text
                .char_indices()
                .nth(max_len)
                .map(|(byte, _)| byte)
                .unwrap_or(text.len());
            return text[..end].to_string();
        }
    };

    let mut refined = text[..cut].trim_end().to_string();
    refined.push_str("...");
    refined
}
