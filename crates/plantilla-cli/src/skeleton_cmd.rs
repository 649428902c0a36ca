use std::path::Path;

use plantilla::TemplateGenerator;

use crate::cli::TemplateFormat;
use crate::shared::{load_document, template_json, write_output};

pub fn run(file: &Path, output: Option<&Path>, format: &TemplateFormat) -> Result<(), i32> {
    let document = load_document(file)?;
    let generator = TemplateGenerator::default();
    let template = generator.generate(&document.pages, &document.fields, None);

    match format {
        TemplateFormat::Html => write_output(output, &template.html),
        TemplateFormat::Json => {
            let obj = template_json(&template);
            write_output(output, &serde_json::to_string_pretty(&obj).unwrap())
        }
    }
}
