use std::path::Path;

use plantilla::ollama::{OllamaRefiner, OllamaSettings};
use plantilla::{RasterImage, RefineContext, TemplateGenerator};

use crate::cli::TemplateFormat;
use crate::shared::{load_document, template_json, write_output};

pub fn run(
    file: &Path,
    image: &Path,
    mime: &str,
    memory: Option<&Path>,
    model: &str,
    ollama_url: &str,
    output: Option<&Path>,
    format: &TemplateFormat,
) -> Result<(), i32> {
    let document = load_document(file)?;

    let bytes = std::fs::read(image).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", image.display());
        1
    })?;
    let raster = RasterImage::new(bytes, mime);

    let memory = match memory {
        Some(path) => Some(std::fs::read_to_string(path).map_err(|e| {
            eprintln!("Error: failed to read {}: {e}", path.display());
            1
        })?),
        None => None,
    };

    let refiner = OllamaRefiner::new(OllamaSettings {
        base_url: ollama_url.to_string(),
        model: model.to_string(),
        ..OllamaSettings::default()
    })
    .map_err(|e| {
        eprintln!("Error: failed to build Ollama client: {e}");
        1
    })?;

    let generator = TemplateGenerator::default();
    let template = generator.generate(
        &document.pages,
        &document.fields,
        Some(RefineContext {
            image: &raster,
            refiner: &refiner,
            memory: memory.as_deref(),
        }),
    );

    match format {
        TemplateFormat::Html => write_output(output, &template.html),
        TemplateFormat::Json => {
            let mut obj = template_json(&template);
            obj["refinement"] = serde_json::json!(template.refinement.as_str());
            write_output(output, &serde_json::to_string_pretty(&obj).unwrap())
        }
    }
}
