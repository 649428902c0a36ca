//! Integration tests for the template generation pipeline.
//!
//! These tests exercise the full skeleton -> refinement -> scan pipeline
//! with in-memory page fixtures and mock refinement backends.

use plantilla::{
    ExtractedField, GeneratedTemplate, GeneratorOptions, MarkupRefiner, PageTextLayer,
    RasterImage, RefineContext, RefineRequest, RefinementOutcome, TemplateGenerator, TextFragment,
    VisionError,
};

// --- Helpers ---

fn fragment(text: &str, x: f64, y: f64, width: f64, font_size: f64) -> TextFragment {
    TextFragment {
        text: text.to_string(),
        x,
        y,
        width,
        font_size,
        font_name: String::new(),
    }
}

fn invoice_page() -> PageTextLayer {
    PageTextLayer {
        page_number: 1,
        width: 800.0,
        height: 1100.0,
        fragments: vec![
            fragment("INVOICE", 8.0, 8.0, 30.0, 16.0),
            fragment("Factura No.", 8.0, 20.0, 14.0, 11.0),
            fragment("12345", 80.0, 20.0, 12.0, 11.0),
            fragment("Cliente: ACME S.A.", 8.0, 30.0, 40.0, 11.0),
            fragment("Total: 1.234,56", 8.0, 45.0, 30.0, 12.0),
        ],
    }
}

fn invoice_fields() -> Vec<ExtractedField> {
    vec![
        ExtractedField {
            label: "Numero Factura".to_string(),
            value: "12345".to_string(),
            confidence: 0.9,
        },
        ExtractedField {
            label: "Cliente".to_string(),
            value: "ACME S.A.".to_string(),
            confidence: 0.9,
        },
        ExtractedField {
            label: "Total".to_string(),
            value: "1.234,56".to_string(),
            confidence: 0.9,
        },
    ]
}

fn png_stub() -> RasterImage {
    RasterImage::new(vec![0x89, 0x50, 0x4e, 0x47], "image/png")
}

fn generate_with(
    refiner: &dyn MarkupRefiner,
    options: GeneratorOptions,
) -> (GeneratedTemplate, String) {
    let pages = vec![invoice_page()];
    let fields = invoice_fields();
    let image = png_stub();
    let generator = TemplateGenerator::new(options);
    let skeleton = generator.build_skeleton(&pages, &fields);
    let template = generator.generate(
        &pages,
        &fields,
        Some(RefineContext {
            image: &image,
            refiner,
            memory: None,
        }),
    );
    (template, skeleton)
}

// --- Mock backends ---

struct FixedRefiner(String);

impl MarkupRefiner for FixedRefiner {
    fn supports_vision(&self) -> bool {
        true
    }

    fn refine(&self, _request: &RefineRequest<'_>) -> Result<String, VisionError> {
        Ok(self.0.clone())
    }
}

struct BlindRefiner;

impl MarkupRefiner for BlindRefiner {
    fn supports_vision(&self) -> bool {
        false
    }

    fn refine(&self, _request: &RefineRequest<'_>) -> Result<String, VisionError> {
        Err(VisionError::Unsupported)
    }
}

struct FailingRefiner;

impl MarkupRefiner for FailingRefiner {
    fn supports_vision(&self) -> bool {
        true
    }

    fn refine(&self, _request: &RefineRequest<'_>) -> Result<String, VisionError> {
        Err(VisionError::Transport("connection refused".to_string()))
    }
}

const REFINED: &str = "<div style=\"font-family: Georgia;\">\n<div>Factura {{numero_factura}}</div>\n<div>{{cliente}}</div>\n<div>{{total}}</div>\n</div>";

// ==================== Skeleton pipeline ====================

#[test]
fn invoice_template_end_to_end() {
    let generator = TemplateGenerator::default();
    let template = generator.generate(&[invoice_page()], &invoice_fields(), None);

    assert!(
        template.html.starts_with(
            "<div style=\"font-family: Arial, Helvetica, sans-serif; color: #1a1a1a; \
             font-size: 13px; padding: 32px 40px;\">"
        ),
        "wrapper should carry the default theme, got: {}",
        &template.html[..template.html.len().min(120)]
    );
    assert!(
        template
            .html
            .contains("<span style=\"text-align: right;\">{{numero_factura}}</span>"),
        "invoice number should land in the right cell of a split row"
    );
    assert!(template.html.contains("Cliente: {{cliente}}"));
    assert!(template.html.contains("Total: {{total}}"));
    assert!(
        template.html.contains(">INVOICE</div>"),
        "heading text should survive untouched"
    );
    assert!(
        template
            .html
            .contains("font-weight: bold; font-size: 17px;"),
        "the 16pt heading should render bold and large"
    );
    assert!(template.html.contains("Firma"), "signature block is always appended");

    assert_eq!(
        template.variables,
        vec!["{{numero_factura}}", "{{cliente}}", "{{total}}"],
        "variables should list tokens in document order"
    );
    assert_eq!(template.confidence, 0.6);
    assert_eq!(template.page_count, 1);
    assert_eq!(template.refinement, RefinementOutcome::Skipped);
}

#[test]
fn generate_matches_build_skeleton_without_refinement() {
    let generator = TemplateGenerator::default();
    let pages = vec![invoice_page()];
    let fields = invoice_fields();
    let skeleton = generator.build_skeleton(&pages, &fields);
    let template = generator.generate(&pages, &fields, None);
    assert_eq!(template.html, skeleton);
}

#[test]
fn output_is_deterministic() {
    let generator = TemplateGenerator::default();
    let first = generator.generate(&[invoice_page()], &invoice_fields(), None);
    let second = generator.generate(&[invoice_page()], &invoice_fields(), None);
    assert_eq!(first.html, second.html);
    assert_eq!(first.variables, second.variables);
}

#[test]
fn empty_document_yields_shell() {
    let generator = TemplateGenerator::default();
    let template = generator.generate(&[], &[], None);
    assert!(template.html.starts_with("<div style=\"font-family:"));
    assert!(template.html.ends_with("</div>"));
    assert!(template.html.contains("Firma"));
    assert!(template.variables.is_empty());
    assert_eq!(template.confidence, 0.6);
    assert_eq!(template.page_count, 0);
}

#[test]
fn multi_page_documents_get_page_breaks() {
    let mut second = invoice_page();
    second.page_number = 2;
    let pages = vec![invoice_page(), second];
    let generator = TemplateGenerator::default();
    let template = generator.generate(&pages, &invoice_fields(), None);
    assert_eq!(template.page_count, 2);
    assert_eq!(
        template.html.matches("page-break-before").count(),
        1,
        "a break belongs between the pages, not before the first"
    );
}

#[test]
fn four_variables_raise_confidence() {
    let mut page = invoice_page();
    page.fragments.push(fragment("Fecha: 2024-01-31", 8.0, 55.0, 30.0, 11.0));
    let mut fields = invoice_fields();
    fields.push(ExtractedField {
        label: "Fecha".to_string(),
        value: "2024-01-31".to_string(),
        confidence: 0.9,
    });
    let generator = TemplateGenerator::default();
    let template = generator.generate(&[page], &fields, None);
    assert_eq!(template.variables.len(), 4);
    assert_eq!(template.confidence, 0.85);
}

// ==================== Refinement fallback ====================

#[test]
fn applied_refinement_replaces_markup() {
    let refiner = FixedRefiner(REFINED.to_string());
    let (template, skeleton) = generate_with(&refiner, GeneratorOptions::default());
    assert_eq!(template.refinement, RefinementOutcome::Applied);
    assert_eq!(template.html, REFINED);
    assert_ne!(template.html, skeleton);
    assert_eq!(
        template.variables,
        vec!["{{numero_factura}}", "{{cliente}}", "{{total}}"],
        "variables should be rescanned from the refined markup"
    );
}

#[test]
fn fenced_refinement_is_unwrapped() {
    let refiner = FixedRefiner(format!("```html\n{REFINED}\n```"));
    let (template, _) = generate_with(&refiner, GeneratorOptions::default());
    assert_eq!(template.refinement, RefinementOutcome::Applied);
    assert_eq!(template.html, REFINED);
}

#[test]
fn garbage_refinement_is_rejected() {
    let refiner = FixedRefiner("I could not process the image, sorry.".to_string());
    let (template, skeleton) = generate_with(&refiner, GeneratorOptions::default());
    assert_eq!(template.refinement, RefinementOutcome::Rejected);
    assert_eq!(template.html, skeleton, "rejected output must not leak into the template");
}

#[test]
fn failing_backend_keeps_skeleton_byte_identical() {
    let (template, skeleton) = generate_with(&FailingRefiner, GeneratorOptions::default());
    assert_eq!(template.refinement, RefinementOutcome::Failed);
    assert_eq!(template.html, skeleton);
}

#[test]
fn blind_backend_reports_unsupported() {
    let (template, skeleton) = generate_with(&BlindRefiner, GeneratorOptions::default());
    assert_eq!(template.refinement, RefinementOutcome::Unsupported);
    assert_eq!(template.html, skeleton);
}

#[test]
fn refinement_disabled_by_options() {
    let refiner = FixedRefiner(REFINED.to_string());
    let options = GeneratorOptions {
        refine: false,
        ..GeneratorOptions::default()
    };
    let (template, skeleton) = generate_with(&refiner, options);
    assert_eq!(template.refinement, RefinementOutcome::Skipped);
    assert_eq!(template.html, skeleton);
}
