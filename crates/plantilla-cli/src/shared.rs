use std::path::Path;

use plantilla::{Alignment, ExtractedField, GeneratedTemplate, PageTextLayer};
use serde::Deserialize;

/// A document export: the positioned text layer plus the fields recognized
/// upstream. This is the JSON format every subcommand reads.
#[derive(Debug, Deserialize)]
pub struct Document {
    /// Text layers in page order.
    #[serde(default)]
    pub pages: Vec<PageTextLayer>,
    /// Labeled values recognized on the document.
    #[serde(default)]
    pub fields: Vec<ExtractedField>,
}

/// Load a document JSON file with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not found,
/// unreadable, or not valid document JSON.
pub fn load_document(file: &Path) -> Result<Document, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    let data = std::fs::read_to_string(file).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", file.display());
        1
    })?;

    serde_json::from_str(&data).map_err(|e| {
        eprintln!("Error: invalid document JSON: {e}");
        1
    })
}

/// Write `content` to `output`, or to stdout when no path is given.
pub fn write_output(output: Option<&Path>, content: &str) -> Result<(), i32> {
    match output {
        Some(path) => std::fs::write(path, content).map_err(|e| {
            eprintln!("Error: failed to write {}: {e}", path.display());
            1
        }),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}

/// JSON envelope for template-producing subcommands.
pub fn template_json(template: &GeneratedTemplate) -> serde_json::Value {
    serde_json::json!({
        "html": template.html,
        "variables": template.variables,
        "confidence": template.confidence,
        "pageCount": template.page_count,
    })
}

/// Convert an `Alignment` to its lowercase name.
pub fn alignment_str(alignment: &Alignment) -> &'static str {
    match alignment {
        Alignment::Left => "left",
        Alignment::Center => "center",
        Alignment::Right => "right",
        Alignment::Justify => "justify",
        Alignment::Split => "split",
    }
}
