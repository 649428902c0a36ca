//! Grouping of positioned fragments into visual text lines.
//!
//! Fragments arrive in arbitrary extractor order with slightly jittered
//! baselines. Clustering walks them in reading order and attaches each
//! fragment to the open line while it stays within a font-scaled vertical
//! tolerance of the line's first member.

use crate::geometry::{PageTextLayer, TextFragment};

/// Floor for the vertical clustering tolerance, in percentage points.
///
/// Keeps very small print from fracturing into one line per fragment.
pub const MIN_Y_TOLERANCE: f64 = 1.5;

/// A horizontal run of fragments that render as one visual line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TextLine {
    /// Mean vertical position of the members, as a page percentage.
    pub y: f64,
    /// Member fragments, ordered left to right.
    pub items: Vec<TextFragment>,
    /// Left edge of the leftmost member.
    pub min_x: f64,
    /// Rightmost extent over all members (`x + width`).
    pub max_x: f64,
    /// Mean font size of the members.
    pub avg_font_size: f64,
}

impl TextLine {
    /// Member texts joined left to right with single spaces.
    pub fn text(&self) -> String {
        self.items
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Vertical tolerance for attaching `fragment` to an open line.
///
/// Scales with the fragment's font size expressed as a fraction of the page
/// width, doubled, and never drops below [`MIN_Y_TOLERANCE`].
fn y_tolerance(fragment: &TextFragment, page_width_px: f64) -> f64 {
    (fragment.font_size / page_width_px * 100.0 * 2.0).max(MIN_Y_TOLERANCE)
}

/// Cluster a page's fragments into visual lines.
///
/// Fragments are visited in `(y, x)` order. Each one joins the open line
/// when its `y` lies within its own tolerance of the line's first member;
/// otherwise the open line is flushed and a new one starts. Returned lines
/// are ordered top to bottom with members sorted left to right.
pub fn cluster_into_lines(fragments: &[TextFragment], page_width_px: f64) -> Vec<TextLine> {
    if fragments.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&TextFragment> = fragments.iter().collect();
    sorted.sort_by(|a, b| {
        a.y.partial_cmp(&b.y)
            .unwrap()
            .then(a.x.partial_cmp(&b.x).unwrap())
    });

    let mut lines = Vec::new();
    let mut group: Vec<TextFragment> = vec![sorted[0].clone()];
    // Anchor is the first member's y, not a running average, so a slow
    // vertical drift cannot chain distinct lines together.
    let mut anchor_y = sorted[0].y;

    for &fragment in &sorted[1..] {
        if (fragment.y - anchor_y).abs() <= y_tolerance(fragment, page_width_px) {
            group.push(fragment.clone());
        } else {
            lines.push(make_line(std::mem::take(&mut group)));
            group.push(fragment.clone());
            anchor_y = fragment.y;
        }
    }
    lines.push(make_line(group));

    lines
}

/// Cluster the fragments of `page` using its rendered pixel width.
pub fn cluster_page(page: &PageTextLayer) -> Vec<TextLine> {
    cluster_into_lines(&page.fragments, page.width)
}

fn make_line(mut items: Vec<TextFragment>) -> TextLine {
    items.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
    let n = items.len() as f64;
    let y = items.iter().map(|f| f.y).sum::<f64>() / n;
    let min_x = items.iter().map(|f| f.x).fold(f64::INFINITY, f64::min);
    let max_x = items.iter().map(|f| f.right()).fold(f64::NEG_INFINITY, f64::max);
    let avg_font_size = items.iter().map(|f| f.font_size).sum::<f64>() / n;
    TextLine {
        y,
        items,
        min_x,
        max_x,
        avg_font_size,
    }
}
