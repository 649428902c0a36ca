//! Markup assembly for reconstructed layouts.
//!
//! Turns clustered lines into a deterministic HTML draft: one themed
//! wrapper block, one block per visual line with alignment, vertical
//! rhythm, and emphasis decided from the measurements, and placeholder
//! tokens substituted into the text. The draft is what a vision pass
//! refines; it must already be a usable template on its own.

use crate::fields::PlaceholderMap;
use crate::geometry::{PageTextLayer, TextFragment};
use crate::layout::{Alignment, Margins, classify_alignment, infer_margins};
use crate::lines::{TextLine, cluster_page};
use crate::theme::Theme;

const PAGE_BREAK: &str = "<div style=\"page-break-before: always;\"></div>";

/// Vertical rhythm class for the gap above a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingTier {
    /// Touching or overlapping its predecessor.
    Minimal,
    /// A small paragraph gap.
    Small,
    /// A section gap.
    Medium,
    /// A large structural gap.
    Large,
}

impl SpacingTier {
    /// Classify the signed gap, in percentage points, between a line's `y`
    /// and its predecessor's. The first line of a page has gap 0, and a
    /// negative gap reads as [`SpacingTier::Minimal`].
    pub fn from_gap(gap: f64) -> Self {
        if gap > 6.0 {
            SpacingTier::Large
        } else if gap > 4.0 {
            SpacingTier::Medium
        } else if gap > 2.5 {
            SpacingTier::Small
        } else {
            SpacingTier::Minimal
        }
    }
}

/// Assembles page text layers into the HTML skeleton.
pub struct SkeletonAssembler;

impl SkeletonAssembler {
    /// Build the full skeleton for a document.
    ///
    /// Pages render in order, separated by forced page breaks. After the
    /// last page comes a fixed signature block, then the wrapper closes.
    /// The output is deterministic for a given input.
    pub fn assemble(
        pages: &[PageTextLayer],
        placeholders: &PlaceholderMap,
        theme: &Theme,
    ) -> String {
        let mut parts: Vec<String> = Vec::new();

        parts.push(format!(
            "<div style=\"font-family: {}; color: {}; font-size: {}; padding: {};\">",
            theme.font_family, theme.text_color, theme.base_font_size, theme.page_padding
        ));

        for (index, page) in pages.iter().enumerate() {
            if index > 0 {
                parts.push(PAGE_BREAK.to_string());
            }
            render_page(&mut parts, page, placeholders, theme);
        }

        parts.push(signature_block(theme));
        parts.push("</div>".to_string());

        parts.join("\n")
    }
}

fn render_page(
    parts: &mut Vec<String>,
    page: &PageTextLayer,
    placeholders: &PlaceholderMap,
    theme: &Theme,
) {
    let lines = cluster_page(page);
    let margins = infer_margins(&lines);

    let mut previous_y: Option<f64> = None;
    for line in &lines {
        let gap = previous_y.map_or(0.0, |y| line.y - y);
        let tier = SpacingTier::from_gap(gap);
        parts.push(render_line(line, &margins, tier, placeholders, theme));
        previous_y = Some(line.y);
    }
}

fn render_line(
    line: &TextLine,
    margins: &Margins,
    tier: SpacingTier,
    placeholders: &PlaceholderMap,
    theme: &Theme,
) -> String {
    let margin_top = spacing_css(tier, theme);

    let mut emphasis = String::new();
    if is_bold_line(line) {
        emphasis.push_str(" font-weight: bold;");
    }
    if is_large_line(line) {
        emphasis.push_str(&format!(" font-size: {};", theme.emphasis_font_size));
    }

    match classify_alignment(line, margins) {
        Alignment::Split => render_split_row(line, margin_top, &emphasis, placeholders),
        alignment => {
            let text = escape_markup(&placeholders.substitute(&line.text()));
            let align = alignment.text_align().unwrap_or("left");
            format!(
                "<div style=\"margin-top: {margin_top}; text-align: {align};{emphasis}\">{text}</div>"
            )
        }
    }
}

/// Render a split line as a flex row: members left of the page midline form
/// the start-aligned cell, the rest the end-aligned cell. Substitution runs
/// per cell so a value cannot straddle the gap.
fn render_split_row(
    line: &TextLine,
    margin_top: &str,
    emphasis: &str,
    placeholders: &PlaceholderMap,
) -> String {
    let (left, right): (Vec<&TextFragment>, Vec<&TextFragment>) =
        line.items.iter().partition(|f| f.x < 50.0);

    let left_text = escape_markup(&placeholders.substitute(&join_texts(&left)));
    let right_text = escape_markup(&placeholders.substitute(&join_texts(&right)));

    format!(
        "<div style=\"margin-top: {margin_top}; display: flex; justify-content: space-between;{emphasis}\"><span>{left_text}</span><span style=\"text-align: right;\">{right_text}</span></div>"
    )
}

fn join_texts(fragments: &[&TextFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn spacing_css(tier: SpacingTier, theme: &Theme) -> &str {
    match tier {
        SpacingTier::Minimal => &theme.spacing.minimal,
        SpacingTier::Small => &theme.spacing.small,
        SpacingTier::Medium => &theme.spacing.medium,
        SpacingTier::Large => &theme.spacing.large,
    }
}

/// A line renders bold when its average font size clears 12.5, any member
/// font name mentions bold, or any single member exceeds size 13.
fn is_bold_line(line: &TextLine) -> bool {
    line.avg_font_size > 12.5
        || line
            .items
            .iter()
            .any(|f| f.font_name.to_lowercase().contains("bold"))
        || line.items.iter().any(|f| f.font_size > 13.0)
}

/// A line renders at the emphasis font size when its average clears 14.
fn is_large_line(line: &TextLine) -> bool {
    line.avg_font_size > 14.0
}

/// Escape `<` and `>` in line text.
///
/// Text containing an ampersand is assumed to already carry entities and
/// passes through untouched.
fn escape_markup(text: &str) -> String {
    if text.contains('&') {
        text.to_string()
    } else {
        text.replace('<', "&lt;").replace('>', "&gt;")
    }
}

fn signature_block(theme: &Theme) -> String {
    format!(
        "<div style=\"margin-top: 64px;\"><div style=\"width: 240px; border-top: 1px solid {}; padding-top: 6px; text-align: center;\">{}</div></div>",
        theme.text_color,
        escape_markup(&theme.signature_caption)
    )
}
