//! Corpus-wide font statistics for one document.

use std::collections::BTreeMap;

use crate::model::TextFragment;

/// Percentiles computed over the size distribution, used for level banding.
const PERCENTILES: [u8; 3] = [75, 90, 95];

/// Font-size statistics derived once per document.
///
/// `body_size` is the character-count-weighted mode of all fragment sizes:
/// weighting by characters rather than fragment count keeps a few large-font
/// short titles from dominating the estimate. Sizes are bucketed at 0.1pt
/// precision. The histogram lives in a `BTreeMap` so every derived value is
/// independent of input order.
#[derive(Debug, Clone, Default)]
pub struct FontProfile {
    /// Dominant body-text size; 0.0 for an empty document.
    pub body_size: f32,

    /// Size bucket (size × 10) → total character count at that size.
    pub size_histogram: BTreeMap<i32, usize>,

    /// (percentile, size) thresholds, ascending by percentile.
    pub size_percentiles: Vec<(u8, f32)>,
}

impl FontProfile {
    /// Build the profile from a document's fragments.
    ///
    /// Pure function of the fragment list; an empty list yields the
    /// degenerate profile with `body_size = 0.0`.
    pub fn build(fragments: &[TextFragment]) -> Self {
        let mut histogram: BTreeMap<i32, usize> = BTreeMap::new();
        for fragment in fragments {
            let chars = fragment.char_count();
            if chars == 0 {
                continue;
            }
            *histogram.entry(size_key(fragment.font_size)).or_insert(0) += chars;
        }

        if histogram.is_empty() {
            return Self::default();
        }

        // Highest weight wins; on a tie the smaller size is the body text.
        let mut body_key = 0;
        let mut body_weight = 0;
        for (&key, &weight) in &histogram {
            if weight > body_weight {
                body_key = key;
                body_weight = weight;
            }
        }

        let total: usize = histogram.values().sum();
        let size_percentiles = PERCENTILES
            .iter()
            .map(|&p| (p, weighted_percentile(&histogram, total, p)))
            .collect();

        Self {
            body_size: key_size(body_key),
            size_histogram: histogram,
            size_percentiles,
        }
    }

    /// Look up a percentile threshold computed at build time.
    pub fn percentile(&self, p: u8) -> Option<f32> {
        self.size_percentiles
            .iter()
            .find(|(pct, _)| *pct == p)
            .map(|(_, size)| *size)
    }

    /// Whether the profile was built from no measurable text.
    pub fn is_degenerate(&self) -> bool {
        self.size_histogram.is_empty()
    }
}

/// Bucket a font size at 0.1pt precision.
fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

/// Recover the representative size of a bucket.
fn key_size(key: i32) -> f32 {
    key as f32 / 10.0
}

/// Smallest size whose cumulative character weight reaches `p` percent.
fn weighted_percentile(histogram: &BTreeMap<i32, usize>, total: usize, p: u8) -> f32 {
    let target = (total as f64 * p as f64 / 100.0).ceil() as usize;
    let mut cumulative = 0;
    for (&key, &weight) in histogram {
        cumulative += weight;
        if cumulative >= target {
            return key_size(key);
        }
    }
    histogram
        .keys()
        .next_back()
        .copied()
        .map(key_size)
        .unwrap_or(0.0)
}
