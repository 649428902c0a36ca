//! Guarded vision-model refinement of assembled skeletons.
//!
//! A refiner backend sees the page image next to the deterministic draft
//! and may tighten spacing, alignment, and emphasis. Backends are free to
//! be unavailable, slow, or wrong; every path through this module ends in
//! usable markup, falling back to the untouched skeleton when the refined
//! candidate cannot be trusted.

use std::fmt;

use plantilla_core::{ExtractedField, scan_placeholders};
use tracing::warn;

use crate::image::RasterImage;

/// Errors surfaced by vision backends.
#[derive(Debug, Clone, PartialEq)]
pub enum VisionError {
    /// The backend could not be reached at all.
    Transport(String),
    /// The backend answered with a non-success status.
    Service {
        /// HTTP status code.
        status: u16,
        /// Response body or status text.
        message: String,
    },
    /// The backend answered with something unparseable.
    InvalidResponse(String),
    /// The backend exists but cannot process images.
    Unsupported,
}

impl fmt::Display for VisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisionError::Transport(msg) => write!(f, "transport error: {msg}"),
            VisionError::Service { status, message } => {
                write!(f, "service error (HTTP {status}): {message}")
            }
            VisionError::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
            VisionError::Unsupported => write!(f, "backend cannot process images"),
        }
    }
}

impl std::error::Error for VisionError {}

/// Everything a backend needs for one refinement call.
#[derive(Debug)]
pub struct RefineRequest<'a> {
    /// The deterministic HTML draft.
    pub skeleton: &'a str,
    /// Rendered image of the first page.
    pub image: &'a RasterImage,
    /// Accumulated notes from earlier documents of the same kind.
    pub memory: Option<&'a str>,
}

/// A backend that can compare markup against a page image and adjust it.
pub trait MarkupRefiner {
    /// Whether the backing model accepts image input. Refinement is skipped
    /// entirely when this returns false.
    fn supports_vision(&self) -> bool;

    /// Produce adjusted markup for the request. The returned text may be
    /// wrapped in fences or prose; the caller sanitizes it.
    fn refine(&self, request: &RefineRequest<'_>) -> Result<String, VisionError>;
}

/// A backend that can read labeled values off a page image.
pub trait FieldExtractor {
    /// Recognize labeled fields on the image.
    fn extract_fields(&self, image: &RasterImage) -> Result<Vec<ExtractedField>, VisionError>;
}

/// What happened to the skeleton on its way to the final template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefinementOutcome {
    /// No backend or image was supplied; the skeleton shipped as-is.
    Skipped,
    /// The backend cannot see images; the skeleton shipped as-is.
    Unsupported,
    /// The backend's markup replaced the skeleton.
    Applied,
    /// The backend answered but not with markup; the skeleton shipped as-is.
    Rejected,
    /// The backend call failed; the skeleton shipped as-is.
    Failed,
}

impl RefinementOutcome {
    /// Returns the string tag for this outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            RefinementOutcome::Skipped => "skipped",
            RefinementOutcome::Unsupported => "unsupported",
            RefinementOutcome::Applied => "applied",
            RefinementOutcome::Rejected => "rejected",
            RefinementOutcome::Failed => "failed",
        }
    }
}

impl fmt::Display for RefinementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const REFINE_PROMPT_HEADER: &str = "\
You are adjusting an HTML draft that reconstructs the layout of a scanned document page.
Compare the draft against the page image and correct spacing, alignment, and emphasis \
so the rendered result matches the scan.

Rules:
- Keep every {{placeholder}} token exactly as written, byte for byte.
- Keep a single top-level <div> wrapper and inline styles only.
- Do not invent text that is not on the page.
- Return the complete adjusted HTML with no markdown fences and no commentary.";

/// Build the instruction text sent alongside the page image.
pub fn build_refine_instruction(skeleton: &str, memory: Option<&str>) -> String {
    let mut instruction = String::from(REFINE_PROMPT_HEADER);
    if let Some(memory) = memory {
        instruction.push_str("\n\nNotes from previously processed documents of this kind:\n");
        instruction.push_str(memory);
    }
    instruction.push_str("\n\nDraft HTML:\n");
    instruction.push_str(skeleton);
    instruction
}

/// Refine `skeleton` against `image`, falling back to the skeleton whenever
/// the backend cannot improve it.
///
/// The fallback is byte-identical to the input skeleton, so callers can
/// rely on the output being renderable no matter what the backend did.
/// Losing a placeholder token in the refined markup is logged but does not
/// reject it; layout fidelity is worth more than a recoverable token.
pub fn refine_or_fallback(
    skeleton: &str,
    refiner: &dyn MarkupRefiner,
    image: &RasterImage,
    memory: Option<&str>,
) -> (String, RefinementOutcome) {
    if !refiner.supports_vision() {
        return (skeleton.to_string(), RefinementOutcome::Unsupported);
    }

    let request = RefineRequest {
        skeleton,
        image,
        memory,
    };
    let raw = match refiner.refine(&request) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(error = %err, "refinement call failed, keeping skeleton");
            return (skeleton.to_string(), RefinementOutcome::Failed);
        }
    };

    match sanitize_refined(&raw) {
        Some(refined) => {
            for token in scan_placeholders(skeleton) {
                if !refined.contains(&token) {
                    warn!(%token, "refined markup dropped a placeholder token");
                }
            }
            (refined, RefinementOutcome::Applied)
        }
        None => {
            warn!("refined markup carried no wrapper block, keeping skeleton");
            (skeleton.to_string(), RefinementOutcome::Rejected)
        }
    }
}

/// Clean a raw backend response down to the markup it should contain.
///
/// Strips a markdown code fence if the response is wrapped in one, then
/// cuts from the first `<div` to the last `</div>` so prose before or
/// after the markup falls away. Returns `None` when no wrapper block
/// remains, which callers treat as a rejection.
pub fn sanitize_refined(raw: &str) -> Option<String> {
    let stripped = strip_code_fences(raw);
    let candidate = match extract_wrapper_block(&stripped) {
        Some(block) => block,
        None => stripped.as_str(),
    };
    if candidate.starts_with("<div") {
        Some(candidate.to_string())
    } else {
        None
    }
}

fn strip_code_fences(raw: &str) -> String {
    let text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        // Drop the info string (e.g. "html") up to the first newline.
        if let Some(newline) = rest.find('\n') {
            let body = &rest[newline + 1..];
            if let Some(end) = body.rfind("```") {
                return body[..end].trim().to_string();
            }
        }
    }
    text.to_string()
}

fn extract_wrapper_block(text: &str) -> Option<&str> {
    let start = text.find("<div")?;
    let end = text.rfind("</div>")?;
    if end < start {
        return None;
    }
    Some(&text[start..end + "</div>".len()])
}
