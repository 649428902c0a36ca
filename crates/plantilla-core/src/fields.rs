//! Field values and their substitution into reconstructed text.
//!
//! An upstream extractor reports labeled values it found on the document
//! (invoice number, date, customer name). [`PlaceholderMap`] turns those
//! into `{{snake_case}}` tokens and swaps them into line text, so the
//! emitted markup is a reusable template rather than a transcript.

use crate::error::{BuildResult, LayoutWarning};

/// A labeled value recognized on the document by an upstream extractor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ExtractedField {
    /// What the value is (e.g., "Numero de factura").
    pub label: String,
    /// The literal text as it appears on the page.
    pub value: String,
    /// Extractor confidence in [0, 1].
    #[cfg_attr(feature = "serde", serde(default))]
    pub confidence: f64,
}

/// Derive a placeholder name from a field label.
///
/// Lower-cases the label, drops everything that is not an ASCII
/// alphanumeric or one of `áéíóúñü`, collapses whitespace runs into single
/// underscores, and trims underscores from both ends. Labels with no usable
/// characters produce an empty name.
pub fn placeholder_name(label: &str) -> String {
    let mut name = String::with_capacity(label.len());
    let mut pending_separator = false;
    for ch in label.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric()
            || matches!(ch, 'á' | 'é' | 'í' | 'ó' | 'ú' | 'ñ' | 'ü')
        {
            if pending_separator && !name.is_empty() {
                name.push('_');
            }
            name.push(ch);
            pending_separator = false;
        } else if ch.is_whitespace() {
            pending_separator = true;
        }
        // Punctuation and symbols vanish without becoming separators.
    }
    name
}

struct PlaceholderEntry {
    /// Trimmed literal value to look for in line text.
    value: String,
    /// Token substituted in its place, braces included.
    token: String,
}

/// Ordered mapping from document values to placeholder tokens.
///
/// Entries keep the order fields were first registered in, which makes
/// template output deterministic for a given input.
#[derive(Default)]
pub struct PlaceholderMap {
    entries: Vec<PlaceholderEntry>,
}

impl PlaceholderMap {
    /// Build a map from extracted fields.
    ///
    /// Values are trimmed and must be at least two characters long;
    /// anything shorter substitutes too greedily to be useful. When two
    /// fields share a value, the later label takes over the token but the
    /// entry keeps its original position.
    pub fn from_fields(fields: &[ExtractedField]) -> Self {
        Self::from_fields_checked(fields).value
    }

    /// Like [`PlaceholderMap::from_fields`], also reporting the fields
    /// that were skipped or overwritten.
    pub fn from_fields_checked(fields: &[ExtractedField]) -> BuildResult<Self> {
        let mut entries: Vec<PlaceholderEntry> = Vec::new();
        let mut warnings = Vec::new();

        for field in fields {
            let value = field.value.trim();
            if value.chars().count() <= 1 {
                warnings.push(LayoutWarning::short_field_value(&field.label));
                continue;
            }
            let name = placeholder_name(&field.label);
            if name.is_empty() {
                warnings.push(LayoutWarning::empty_placeholder_name(&field.label));
            }
            let token = format!("{{{{{name}}}}}");
            match entries.iter_mut().find(|entry| entry.value == value) {
                Some(existing) => {
                    warnings.push(LayoutWarning::duplicate_field_value(&field.label));
                    existing.token = token;
                }
                None => entries.push(PlaceholderEntry {
                    value: value.to_string(),
                    token,
                }),
            }
        }

        BuildResult::with_warnings(Self { entries }, warnings)
    }

    /// Number of registered values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no values were registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(value, token)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|entry| (entry.value.as_str(), entry.token.as_str()))
    }

    /// Replace known values in `text` with their tokens.
    ///
    /// Longer values substitute first so a short value cannot eat the middle
    /// of a longer one. Each entry replaces at most its first occurrence:
    /// exact match preferred, case-insensitive match as a fallback. Text
    /// outside the matched span keeps its original casing.
    pub fn substitute(&self, text: &str) -> String {
        let mut order: Vec<&PlaceholderEntry> = self.entries.iter().collect();
        order.sort_by(|a, b| b.value.len().cmp(&a.value.len()));

        let mut result = text.to_string();
        for entry in order {
            if let Some(start) = result.find(&entry.value) {
                result.replace_range(start..start + entry.value.len(), &entry.token);
            } else if let Some((start, end)) = find_case_insensitive(&result, &entry.value) {
                result.replace_range(start..end, &entry.token);
            }
        }
        result
    }
}

/// Locate the first case-insensitive occurrence of `needle` in `haystack`,
/// returning its byte range in `haystack`.
fn find_case_insensitive(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    for (start, _) in haystack.char_indices() {
        let mut candidate = haystack[start..].chars();
        let mut end = start;
        let mut matched = true;
        for expected in needle.chars() {
            match candidate.next() {
                Some(actual) if chars_eq_ignore_case(actual, expected) => {
                    end += actual.len_utf8();
                }
                _ => {
                    matched = false;
                    break;
                }
            }
        }
        if matched {
            return Some((start, end));
        }
    }
    None
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
