use crate::error::LayoutWarning;

/// A positioned run of text measured on a rendered page image.
///
/// `x` and `y` are percentages of the page width and height with the origin
/// at the top-left corner, so `x` grows rightward and `y` grows downward.
/// `width` is a percentage of the page width. Fragments usually correspond to
/// the word or phrase boxes an OCR pass reports.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TextFragment {
    /// The text content of this fragment.
    pub text: String,
    /// Left edge, as a percentage of the page width (0-100).
    pub x: f64,
    /// Top edge, as a percentage of the page height (0-100).
    pub y: f64,
    /// Width, as a percentage of the page width.
    pub width: f64,
    /// Rendered glyph height in page-relative units.
    pub font_size: f64,
    /// Font name reported by the extractor (may be empty).
    #[cfg_attr(feature = "serde", serde(default))]
    pub font_name: String,
}

impl TextFragment {
    /// Right edge of the fragment (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns `true` when the fragment carries text and sits inside the
    /// page coordinate space with a positive glyph size.
    pub fn is_well_formed(&self) -> bool {
        !self.text.is_empty()
            && (0.0..=100.0).contains(&self.x)
            && (0.0..=100.0).contains(&self.y)
            && self.width >= 0.0
            && self.font_size > 0.0
    }
}

/// One page's worth of positioned text, plus the pixel dimensions of the
/// rendered image the percentages were measured against.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PageTextLayer {
    /// 1-indexed page number.
    pub page_number: u32,
    /// Rendered page width in pixels.
    pub width: f64,
    /// Rendered page height in pixels.
    pub height: f64,
    /// Positioned text runs, in extractor order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fragments: Vec<TextFragment>,
}

impl PageTextLayer {
    /// A page with no text at all.
    pub fn empty(page_number: u32, width: f64, height: f64) -> Self {
        Self {
            page_number,
            width,
            height,
            fragments: Vec::new(),
        }
    }
}

/// Collect a warning for every fragment that fails [`TextFragment::is_well_formed`].
///
/// Malformed fragments are still processed downstream (the clusterer tolerates
/// them), so these warnings are advisory.
pub fn audit_pages(pages: &[PageTextLayer]) -> Vec<LayoutWarning> {
    let mut warnings = Vec::new();
    for page in pages {
        for fragment in &page.fragments {
            if !fragment.is_well_formed() {
                warnings.push(LayoutWarning::malformed_fragment(
                    page.page_number,
                    &fragment.text,
                ));
            }
        }
    }
    warnings
}
