//! Grouping OCR tokens into horizontal text lines.

use crate::types::{OcrPage, OcrToken, TokenId};

/// Tokens sharing one vertical band of the page.
///
/// Token order is discovery order (vertical center), not left to right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    /// Members of the line.
    pub tokens: Vec<TokenId>,
}

impl Line {
    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the line has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Cluster tokens into lines by vertical-center proximity.
///
/// Tokens are stable-sorted by vertical center and swept once. A token joins
/// the current line when its center is less than `y_threshold` away from the
/// center of the token added last; otherwise it opens a new line. Because the
/// anchor moves with every token, a long sloping line stays together but a
/// slow downward drift can also merge lines that a fixed anchor would split.
pub fn cluster<'a, I>(tokens: I, y_threshold: f64) -> Vec<Line>
where
    I: IntoIterator<Item = (TokenId, &'a OcrToken)>,
{
    let mut centers: Vec<(TokenId, f64)> = tokens
        .into_iter()
        .map(|(id, token)| (id, token.bbox.center_y()))
        .collect();
    centers.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut lines = Vec::new();
    let mut current = Line::default();
    let mut current_y = 0.0_f64;

    for (id, y) in centers {
        if !current.is_empty() && (y - current_y).abs() >= y_threshold {
            lines.push(std::mem::take(&mut current));
        }
        current.tokens.push(id);
        current_y = y;
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Cluster every token of a page.
pub fn cluster_page(page: &OcrPage, y_threshold: f64) -> Vec<Line> {
    cluster(page.iter(), y_threshold)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::BoundingBox;

    fn token_at(x: f64, y: f64) -> OcrToken {
        OcrToken::new(BoundingBox::from_edges(x, y - 5.0, x + 20.0, y + 5.0), "x", 1.0)
    }

    fn indices(lines: &[Line]) -> Vec<Vec<usize>> {
        lines.iter().map(|l| l.tokens.iter().map(|id| id.index()).collect()).collect()
    }

    #[test]
    fn same_band_is_one_line_regardless_of_x() {
        let page: OcrPage = vec![token_at(900.0, 50.0), token_at(0.0, 52.0), token_at(400.0, 49.0)].into();
        let lines = cluster_page(&page, 10.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 3);
    }

    #[test]
    fn separated_bands_split_top_to_bottom() {
        let page: OcrPage = vec![token_at(0.0, 100.0), token_at(0.0, 20.0), token_at(0.0, 60.0)].into();
        let lines = cluster_page(&page, 10.0);
        assert_eq!(indices(&lines), vec![vec![1], vec![2], vec![0]]);
    }

    #[test]
    fn distance_equal_to_threshold_splits() {
        let page: OcrPage = vec![token_at(0.0, 0.0), token_at(0.0, 10.0)].into();
        assert_eq!(cluster_page(&page, 10.0).len(), 2);
        assert_eq!(cluster_page(&page, 10.5).len(), 1);
    }

    #[test]
    fn ties_keep_original_order() {
        let page: OcrPage = vec![token_at(50.0, 30.0), token_at(10.0, 30.0), token_at(30.0, 30.0)].into();
        let lines = cluster_page(&page, 10.0);
        assert_eq!(indices(&lines), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn anchor_drifts_with_each_token() {
        // Each step is 6px; the first and last token are 24px apart but
        // stay on one line because every step is compared to its neighbor.
        let page: OcrPage = (0..5).map(|i| token_at(f64::from(i) * 30.0, f64::from(i) * 6.0)).collect();
        let lines = cluster_page(&page, 10.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 5);
    }

    #[test]
    fn filtered_ids_are_preserved() {
        let page: OcrPage = vec![token_at(0.0, 0.0), token_at(0.0, 1.0), token_at(0.0, 2.0)].into();
        let lines = cluster(page.iter().filter(|(id, _)| id.index() != 1), 10.0);
        assert_eq!(indices(&lines), vec![vec![0, 2]]);
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(cluster_page(&OcrPage::new(), 10.0).is_empty());
    }
}
