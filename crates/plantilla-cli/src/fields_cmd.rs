use std::path::Path;

use plantilla::PlaceholderMap;

use crate::cli::DumpFormat;
use crate::shared::load_document;

pub fn run(file: &Path, format: &DumpFormat) -> Result<(), i32> {
    let document = load_document(file)?;

    let result = PlaceholderMap::from_fields_checked(&document.fields);
    for warning in &result.warnings {
        eprintln!("Warning: {warning}");
    }

    for (value, token) in result.value.iter() {
        match format {
            DumpFormat::Text => println!("{token}\t{value}"),
            DumpFormat::Json => {
                let obj = serde_json::json!({ "token": token, "value": value });
                println!("{}", serde_json::to_string(&obj).unwrap());
            }
        }
    }

    Ok(())
}
