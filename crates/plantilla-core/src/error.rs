//! Warning types for plantilla-rs.
//!
//! Layout reconstruction is total: malformed input degrades the output
//! instead of failing it. [`LayoutWarning`] records the issues encountered
//! along the way and [`BuildResult`] pairs a value with the warnings
//! collected while producing it.

use std::fmt;

/// Machine-readable warning code for categorizing reconstruction issues.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum WarningCode {
    /// A text fragment had empty text, out-of-range coordinates, or a
    /// non-positive font size.
    MalformedFragment,
    /// A field label reduced to an empty placeholder name.
    EmptyPlaceholderName,
    /// Two fields carried the same value; the later one owns the token.
    DuplicateFieldValue,
    /// A field value was too short to substitute safely.
    ShortFieldValue,
    /// Any other warning not covered by specific variants.
    Other(String),
}

impl WarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &str {
        match self {
            WarningCode::MalformedFragment => "MALFORMED_FRAGMENT",
            WarningCode::EmptyPlaceholderName => "EMPTY_PLACEHOLDER_NAME",
            WarningCode::DuplicateFieldValue => "DUPLICATE_FIELD_VALUE",
            WarningCode::ShortFieldValue => "SHORT_FIELD_VALUE",
            WarningCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal issue encountered while reconstructing a layout.
///
/// Warnings never stop the pipeline; they describe where the output may be
/// weaker than the input deserved (a dropped fragment, a field that could
/// not become a placeholder).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutWarning {
    /// Machine-readable warning code.
    pub code: WarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// 1-indexed page number where the warning occurred, if applicable.
    pub page: Option<u32>,
    /// Element context (e.g., a fragment text or field label).
    pub element: Option<String>,
}

impl LayoutWarning {
    /// Create a warning with just a description.
    ///
    /// Uses [`WarningCode::Other`] as the default code.
    pub fn new(description: impl Into<String>) -> Self {
        let desc = description.into();
        Self {
            code: WarningCode::Other(desc.clone()),
            description: desc,
            page: None,
            element: None,
        }
    }

    /// Create a warning with a specific code and description.
    pub fn with_code(code: WarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            page: None,
            element: None,
        }
    }

    /// Warning for a fragment that failed validation on the given page.
    pub fn malformed_fragment(page: u32, text: &str) -> Self {
        Self {
            code: WarningCode::MalformedFragment,
            description: "fragment has empty text, out-of-range position, or zero font size"
                .to_string(),
            page: Some(page),
            element: Some(text.to_string()),
        }
    }

    /// Warning for a field label that slugged down to nothing.
    pub fn empty_placeholder_name(label: &str) -> Self {
        Self {
            code: WarningCode::EmptyPlaceholderName,
            description: "field label contains no usable characters".to_string(),
            page: None,
            element: Some(label.to_string()),
        }
    }

    /// Warning for a field whose value collides with an earlier field.
    pub fn duplicate_field_value(label: &str) -> Self {
        Self {
            code: WarningCode::DuplicateFieldValue,
            description: "field value already registered; token reassigned".to_string(),
            page: None,
            element: Some(label.to_string()),
        }
    }

    /// Warning for a field value too short to substitute.
    pub fn short_field_value(label: &str) -> Self {
        Self {
            code: WarningCode::ShortFieldValue,
            description: "field value shorter than two characters; skipped".to_string(),
            page: None,
            element: Some(label.to_string()),
        }
    }
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(page) = self.page {
            write!(f, " (page {page})")?;
        }
        if let Some(ref element) = self.element {
            write!(f, " [{element}]")?;
        }
        Ok(())
    }
}

/// Result wrapper that pairs a value with collected warnings.
#[derive(Debug, Clone)]
pub struct BuildResult<T> {
    /// The produced value.
    pub value: T,
    /// Warnings collected while producing it.
    pub warnings: Vec<LayoutWarning>,
}

impl<T> BuildResult<T> {
    /// Create a result with no warnings.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Create a result with warnings.
    pub fn with_warnings(value: T, warnings: Vec<LayoutWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transform the value while preserving warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> BuildResult<U> {
        BuildResult {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_new_defaults_to_other_code() {
        let w = LayoutWarning::new("something odd");
        assert!(matches!(w.code, WarningCode::Other(_)));
        assert_eq!(w.page, None);
        assert_eq!(w.element, None);
        assert_eq!(w.to_string(), "[OTHER] something odd");
    }

    #[test]
    fn warning_with_code() {
        let w = LayoutWarning::with_code(WarningCode::MalformedFragment, "bad fragment");
        assert_eq!(w.code, WarningCode::MalformedFragment);
        assert_eq!(w.to_string(), "[MALFORMED_FRAGMENT] bad fragment");
    }

    #[test]
    fn malformed_fragment_display_includes_page_and_element() {
        let w = LayoutWarning::malformed_fragment(2, "??");
        assert_eq!(
            w.to_string(),
            "[MALFORMED_FRAGMENT] fragment has empty text, out-of-range position, or zero font size (page 2) [??]"
        );
    }

    #[test]
    fn empty_placeholder_name_carries_label() {
        let w = LayoutWarning::empty_placeholder_name("///");
        assert_eq!(w.code, WarningCode::EmptyPlaceholderName);
        assert_eq!(w.element, Some("///".to_string()));
    }

    #[test]
    fn duplicate_field_value_code() {
        let w = LayoutWarning::duplicate_field_value("fecha");
        assert_eq!(w.code.as_str(), "DUPLICATE_FIELD_VALUE");
    }

    #[test]
    fn short_field_value_code() {
        let w = LayoutWarning::short_field_value("iva");
        assert_eq!(w.code.as_str(), "SHORT_FIELD_VALUE");
    }

    #[test]
    fn warning_code_display() {
        assert_eq!(
            format!("{}", WarningCode::MalformedFragment),
            "MALFORMED_FRAGMENT"
        );
        assert_eq!(format!("{}", WarningCode::Other("x".into())), "OTHER");
    }

    #[test]
    fn warning_clone_and_eq() {
        let w1 = LayoutWarning::empty_placeholder_name("##");
        let w2 = w1.clone();
        assert_eq!(w1, w2);
    }

    #[test]
    fn build_result_ok_is_clean() {
        let result = BuildResult::ok(42);
        assert_eq!(result.value, 42);
        assert!(result.is_clean());
    }

    #[test]
    fn build_result_with_warnings() {
        let warnings = vec![
            LayoutWarning::new("warn 1"),
            LayoutWarning::malformed_fragment(1, "x"),
        ];
        let result = BuildResult::with_warnings("hello", warnings);
        assert_eq!(result.value, "hello");
        assert_eq!(result.warnings.len(), 2);
        assert!(!result.is_clean());
    }

    #[test]
    fn build_result_map_preserves_warnings() {
        let result = BuildResult::with_warnings(10, vec![LayoutWarning::new("test")]);
        let mapped = result.map(|v| v * 2);
        assert_eq!(mapped.value, 20);
        assert_eq!(mapped.warnings.len(), 1);
        assert_eq!(mapped.warnings[0].description, "test");
    }
}
