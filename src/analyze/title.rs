//! Title selection from first-page heading candidates.

use unicode_normalization::UnicodeNormalization;

use super::classifier::HeadingCandidate;

/// Pick the document title from the first page.
///
/// The candidate pool is the first-page heading candidates holding that
/// page's single largest candidate font size. One candidate is the title
/// outright; several at the same size are concatenated in reading order
/// (top-to-bottom, left-to-right). No qualifying candidate — a cover page
/// with no detected heading, say — yields the empty string; the outline is
/// still emitted.
///
/// Returns the title string plus the `order` indices of the consumed
/// candidates, so outline assembly can drop them from the heading list.
pub fn select_title(candidates: &[HeadingCandidate]) -> (String, Vec<usize>) {
    let first_page: Vec<&HeadingCandidate> =
        candidates.iter().filter(|c| c.page == 1).collect();
    if first_page.is_empty() {
        return (String::new(), Vec::new());
    }

    let max_key = first_page
        .iter()
        .map(|c| (c.font_size * 10.0).round() as i32)
        .max()
        .unwrap_or(0);

    let mut pool: Vec<&HeadingCandidate> = first_page
        .into_iter()
        .filter(|c| (c.font_size * 10.0).round() as i32 == max_key)
        .collect();
    pool.sort_by(|a, b| {
        a.y_position
            .total_cmp(&b.y_position)
            .then(a.x_position.total_cmp(&b.x_position))
    });

    let title = normalize_title(
        &pool
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    );
    let consumed = pool.iter().map(|c| c.order).collect();

    (title, consumed)
}

/// NFC-normalize and collapse runs of whitespace.
fn normalize_title(raw: &str) -> String {
    raw.nfc()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(text: &str, size: f32, page: u32, y: f32, x: f32, order: usize) -> HeadingCandidate {
        HeadingCandidate {
            text: text.to_string(),
            page,
            font_size: size,
            is_bold: true,
            score: 0.9,
            numbering_depth: None,
            y_position: y,
            x_position: x,
            order,
        }
    }

    #[test]
    fn test_single_largest_candidate_is_title() {
        let candidates = vec![
            candidate("Annual Report", 24.0, 1, 0.05, 72.0, 0),
            candidate("Overview", 16.0, 1, 0.2, 72.0, 1),
        ];
        let (title, consumed) = select_title(&candidates);
        assert_eq!(title, "Annual Report");
        assert_eq!(consumed, vec![0]);
    }

    #[test]
    fn test_equal_size_candidates_concatenate_in_reading_order() {
        let candidates = vec![
            candidate("for Everyone", 24.0, 1, 0.10, 72.0, 1),
            candidate("Digital   Libraries", 24.0, 1, 0.05, 72.0, 0),
        ];
        let (title, consumed) = select_title(&candidates);
        assert_eq!(title, "Digital Libraries for Everyone");
        assert_eq!(consumed, vec![0, 1]);
    }

    #[test]
    fn test_left_to_right_on_same_line() {
        let candidates = vec![
            candidate("Right", 20.0, 1, 0.05, 300.0, 1),
            candidate("Left", 20.0, 1, 0.05, 72.0, 0),
        ];
        let (title, _) = select_title(&candidates);
        assert_eq!(title, "Left Right");
    }

    #[test]
    fn test_no_first_page_candidate_yields_empty_title() {
        let candidates = vec![candidate("Later Heading", 18.0, 3, 0.1, 72.0, 0)];
        let (title, consumed) = select_title(&candidates);
        assert_eq!(title, "");
        assert!(consumed.is_empty());
    }

    #[test]
    fn test_no_candidates_at_all() {
        let (title, consumed) = select_title(&[]);
        assert_eq!(title, "");
        assert!(consumed.is_empty());
    }
}
