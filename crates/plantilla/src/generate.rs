//! End-to-end template generation.

use plantilla_core::{
    ExtractedField, PageTextLayer, PlaceholderMap, SkeletonAssembler, Theme, audit_pages,
    scan_placeholders, template_confidence,
};
use tracing::debug;

use crate::image::RasterImage;
use crate::refine::{MarkupRefiner, RefinementOutcome, refine_or_fallback};

/// Options controlling template generation.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Presentation values woven into the markup.
    pub theme: Theme,
    /// Whether to call the refiner when one is supplied (default: true).
    pub refine: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            refine: true,
        }
    }
}

/// The refinement collaborators for one generation run.
pub struct RefineContext<'a> {
    /// Rendered image of the first page.
    pub image: &'a RasterImage,
    /// Backend asked to adjust the skeleton.
    pub refiner: &'a dyn MarkupRefiner,
    /// Accumulated notes from earlier documents of the same kind.
    pub memory: Option<&'a str>,
}

/// A finished template and what is known about it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTemplate {
    /// Final HTML markup with `{{placeholder}}` tokens.
    pub html: String,
    /// Placeholder tokens present in `html`, deduplicated in
    /// first-appearance order.
    pub variables: Vec<String>,
    /// Heuristic trust score in [0, 1].
    pub confidence: f64,
    /// Number of input pages.
    pub page_count: usize,
    /// What happened during the refinement step.
    pub refinement: RefinementOutcome,
}

/// Turns measured pages and extracted fields into an editable template.
pub struct TemplateGenerator {
    options: GeneratorOptions,
}

impl Default for TemplateGenerator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

impl TemplateGenerator {
    /// Create a generator with the given options.
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// The options this generator was built with.
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Build the deterministic skeleton without any refinement.
    pub fn build_skeleton(&self, pages: &[PageTextLayer], fields: &[ExtractedField]) -> String {
        let placeholders = PlaceholderMap::from_fields(fields);
        SkeletonAssembler::assemble(pages, &placeholders, &self.options.theme)
    }

    /// Produce the final template.
    ///
    /// Assembles the skeleton, optionally runs it through the refinement
    /// context, and scans the winning markup for its variables. When
    /// `refinement` is `None` or refinement is disabled in the options,
    /// the skeleton ships unchanged with
    /// [`RefinementOutcome::Skipped`].
    pub fn generate(
        &self,
        pages: &[PageTextLayer],
        fields: &[ExtractedField],
        refinement: Option<RefineContext<'_>>,
    ) -> GeneratedTemplate {
        for warning in audit_pages(pages) {
            debug!(%warning, "input fragment failed validation");
        }

        let placeholders = PlaceholderMap::from_fields_checked(fields);
        for warning in &placeholders.warnings {
            debug!(%warning, "field skipped or remapped");
        }

        let skeleton =
            SkeletonAssembler::assemble(pages, &placeholders.value, &self.options.theme);

        let (html, outcome) = match refinement {
            Some(context) if self.options.refine => {
                refine_or_fallback(&skeleton, context.refiner, context.image, context.memory)
            }
            _ => (skeleton, RefinementOutcome::Skipped),
        };

        let variables = scan_placeholders(&html);
        let confidence = template_confidence(&variables);
        GeneratedTemplate {
            html,
            confidence,
            page_count: pages.len(),
            variables,
            refinement: outcome,
        }
    }
}
