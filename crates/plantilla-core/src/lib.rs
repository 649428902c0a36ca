//! plantilla-core: Backend-independent data types and algorithms.
//!
//! This crate provides the foundational types (TextFragment, PageTextLayer,
//! TextLine, etc.) and algorithms (line clustering, layout classification,
//! placeholder substitution, skeleton assembly) used by plantilla-rs.
//! It never talks to a network or a model; everything here is deterministic.

pub mod error;
pub mod fields;
pub mod geometry;
pub mod layout;
pub mod lines;
pub mod skeleton;
pub mod theme;
pub mod tokens;

pub use error::{BuildResult, LayoutWarning, WarningCode};
pub use fields::{ExtractedField, PlaceholderMap, placeholder_name};
pub use geometry::{PageTextLayer, TextFragment, audit_pages};
pub use layout::{Alignment, DEFAULT_MARGINS, Margins, classify_alignment, infer_margins};
pub use lines::{MIN_Y_TOLERANCE, TextLine, cluster_into_lines, cluster_page};
pub use skeleton::{SkeletonAssembler, SpacingTier};
pub use theme::{SpacingScale, Theme};
pub use tokens::{PLACEHOLDER_PATTERN, scan_placeholders, template_confidence};

#[cfg(test)]
mod tests {
    #[test]
    fn crate_compiles() {
        assert_eq!(2 + 2, 4);
    }
}
