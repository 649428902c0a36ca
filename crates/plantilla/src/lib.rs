//! plantilla: Reconstruct editable HTML templates from positioned text fragments.
//!
//! This is the public API facade crate for plantilla-rs. It re-exports types from
//! plantilla-core and adds image handling, vision-backed refinement, and the
//! template generator that ties the pipeline together.
//!
//! # Architecture
//!
//! - **plantilla-core**: Backend-independent data types and algorithms
//! - **plantilla** (this crate): Template generator, refinement backends, image handling

pub use plantilla_core;

pub mod generate;
pub mod image;
#[cfg(feature = "ollama")]
pub mod ollama;
pub mod refine;

pub use generate::{GeneratedTemplate, GeneratorOptions, RefineContext, TemplateGenerator};
pub use image::RasterImage;
pub use refine::{
    FieldExtractor, MarkupRefiner, RefineRequest, RefinementOutcome, VisionError,
    refine_or_fallback, sanitize_refined,
};

// The core types most callers need, without a second import.
pub use plantilla_core::{
    Alignment, BuildResult, ExtractedField, LayoutWarning, Margins, PageTextLayer,
    PlaceholderMap, SkeletonAssembler, TextFragment, TextLine, Theme, WarningCode,
    classify_alignment, cluster_into_lines, cluster_page, infer_margins, placeholder_name,
    scan_placeholders, template_confidence,
};
