//! Visual defaults applied to reconstructed markup.

/// CSS lengths for the four vertical spacing tiers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpacingScale {
    /// Lines immediately below their predecessor.
    pub minimal: String,
    /// A small paragraph gap.
    pub small: String,
    /// A section gap.
    pub medium: String,
    /// A large structural gap.
    pub large: String,
}

impl Default for SpacingScale {
    fn default() -> Self {
        Self {
            minimal: "2px".to_string(),
            small: "8px".to_string(),
            medium: "16px".to_string(),
            large: "28px".to_string(),
        }
    }
}

/// Presentation values woven into the emitted markup.
///
/// The skeleton uses inline styles only, so the theme is the single place
/// the document's look is decided. Defaults render a plain printable page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Theme {
    /// Font stack for the document wrapper.
    pub font_family: String,
    /// Body text color.
    pub text_color: String,
    /// Font size of regular lines.
    pub base_font_size: String,
    /// Font size applied to visually large lines.
    pub emphasis_font_size: String,
    /// Padding of the document wrapper.
    pub page_padding: String,
    /// Caption under the signature rule.
    pub signature_caption: String,
    /// Vertical rhythm between lines.
    pub spacing: SpacingScale,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            text_color: "#1a1a1a".to_string(),
            base_font_size: "13px".to_string(),
            emphasis_font_size: "17px".to_string(),
            page_padding: "32px 40px".to_string(),
            signature_caption: "Firma".to_string(),
            spacing: SpacingScale::default(),
        }
    }
}
