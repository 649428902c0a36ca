use std::path::Path;

use plantilla::{classify_alignment, cluster_page, infer_margins};

use crate::cli::DumpFormat;
use crate::shared::{alignment_str, load_document};

pub fn run(file: &Path, page: Option<u32>, format: &DumpFormat) -> Result<(), i32> {
    let document = load_document(file)?;

    let pages: Vec<_> = match page {
        Some(number) => {
            let selected: Vec<_> = document
                .pages
                .iter()
                .filter(|p| p.page_number == number)
                .collect();
            if selected.is_empty() {
                eprintln!("Error: page {number} not found in document");
                return Err(1);
            }
            selected
        }
        None => document.pages.iter().collect(),
    };

    for layer in pages {
        let lines = cluster_page(layer);
        let margins = infer_margins(&lines);

        match format {
            DumpFormat::Text => {
                println!("--- Page {} ---", layer.page_number);
                println!("margins: left={:.1} right={:.1}", margins.left, margins.right);
                for line in &lines {
                    let alignment = classify_alignment(line, &margins);
                    println!(
                        "y={:<6.1} x=[{:.1}, {:.1}]  size={:.1}  align={:<7} {}",
                        line.y,
                        line.min_x,
                        line.max_x,
                        line.avg_font_size,
                        alignment_str(&alignment),
                        line.text()
                    );
                }
            }
            DumpFormat::Json => {
                let rows: Vec<serde_json::Value> = lines
                    .iter()
                    .map(|line| {
                        let alignment = classify_alignment(line, &margins);
                        serde_json::json!({
                            "y": line.y,
                            "minX": line.min_x,
                            "maxX": line.max_x,
                            "fontSize": line.avg_font_size,
                            "alignment": alignment_str(&alignment),
                            "text": line.text(),
                        })
                    })
                    .collect();
                let obj = serde_json::json!({
                    "page": layer.page_number,
                    "margins": { "left": margins.left, "right": margins.right },
                    "lines": rows,
                });
                println!("{}", serde_json::to_string(&obj).unwrap());
            }
        }
    }

    Ok(())
}
