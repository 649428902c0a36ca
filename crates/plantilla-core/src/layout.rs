//! Page-level layout classification: margins and per-line alignment.

use crate::lines::TextLine;

/// Inferred left and right page margins, as page percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    /// Left margin position.
    pub left: f64,
    /// Right margin position.
    pub right: f64,
}

/// Margins assumed when a page is too sparse to measure.
pub const DEFAULT_MARGINS: Margins = Margins {
    left: 8.0,
    right: 92.0,
};

/// Horizontal treatment of a reconstructed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Flush against the left margin.
    Left,
    /// Centered on the page.
    Center,
    /// Flush against the right margin.
    Right,
    /// Justified block text. Never produced by [`classify_alignment`];
    /// reserved for callers that post-edit the classification.
    Justify,
    /// Two groups pushed to opposite edges of the same line.
    Split,
}

impl Alignment {
    /// CSS `text-align` keyword for this alignment, or `None` for
    /// [`Alignment::Split`], which renders as a two-cell row instead.
    pub fn text_align(&self) -> Option<&'static str> {
        match self {
            Alignment::Left => Some("left"),
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
            Alignment::Justify => Some("justify"),
            Alignment::Split => None,
        }
    }
}

/// Estimate page margins from where lines start.
///
/// Takes the lower quartile of line starts in the left 40% of the page, so
/// a handful of indented lines cannot drag the margin rightward. Sparse
/// pages (fewer than 3 lines, or nothing starting on the left half) fall
/// back to [`DEFAULT_MARGINS`]. The right margin mirrors the left.
pub fn infer_margins(lines: &[TextLine]) -> Margins {
    if lines.len() < 3 {
        return DEFAULT_MARGINS;
    }

    let mut starts: Vec<f64> = lines
        .iter()
        .map(|line| line.min_x)
        .filter(|x| *x < 40.0)
        .collect();
    if starts.is_empty() {
        return DEFAULT_MARGINS;
    }

    starts.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let left = starts[starts.len() / 4];
    Margins {
        left,
        right: 100.0 - left,
    }
}

/// Classify a line's horizontal treatment.
///
/// The checks run as a cascade and the first match wins:
///
/// 1. Two or more members whose leftmost and rightmost starts are more than
///    30 points apart form a [`Alignment::Split`] row (label left, value
///    right is the classic case).
/// 2. A line starting near the left margin whose content center is well off
///    the page center is [`Alignment::Left`].
/// 3. A content center within 8 points of the page center is
///    [`Alignment::Center`].
/// 4. A line starting past 60 is [`Alignment::Right`].
/// 5. Everything else is [`Alignment::Left`].
pub fn classify_alignment(line: &TextLine, margins: &Margins) -> Alignment {
    if line.items.len() >= 2 {
        let first = &line.items[0];
        let last = &line.items[line.items.len() - 1];
        if last.x - first.x > 30.0 {
            return Alignment::Split;
        }
    }

    let content_center = (line.min_x + line.max_x) / 2.0;
    let center_offset = (content_center - 50.0).abs();

    if line.min_x < margins.left + 5.0 && center_offset > 8.0 {
        return Alignment::Left;
    }
    if center_offset < 8.0 {
        return Alignment::Center;
    }
    if line.min_x > 60.0 {
        return Alignment::Right;
    }
    Alignment::Left
}
