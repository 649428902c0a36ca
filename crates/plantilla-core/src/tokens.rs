//! Scanning emitted markup for placeholder tokens.

use regex::Regex;

/// Pattern every well-formed placeholder token matches.
pub const PLACEHOLDER_PATTERN: &str = r"\{\{[a-z0-9_áéíóúñü]+\}\}";

/// Collect the placeholder tokens appearing in `html`, braces included,
/// deduplicated in first-appearance order.
pub fn scan_placeholders(html: &str) -> Vec<String> {
    let re = match Regex::new(PLACEHOLDER_PATTERN) {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };

    let mut tokens: Vec<String> = Vec::new();
    for found in re.find_iter(html) {
        let token = found.as_str();
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

/// Score how trustworthy a generated template is.
///
/// Templates that captured more than three variables nearly always came
/// from a document the extractor understood; the rest get a flat
/// middling score.
pub fn template_confidence(variables: &[String]) -> f64 {
    if variables.len() > 3 { 0.85 } else { 0.6 }
}
