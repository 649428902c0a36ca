//! Ollama backend for refinement and field extraction.
//!
//! Talks to a local Ollama server over its `/api/generate` endpoint with
//! blocking HTTP. Vision-capable models (llama3.2-vision, llava) receive
//! the page image base64-encoded next to the instruction text.

use std::time::Duration;

use plantilla_core::ExtractedField;
use serde::{Deserialize, Serialize};

use crate::image::RasterImage;
use crate::refine::{
    FieldExtractor, MarkupRefiner, RefineRequest, VisionError, build_refine_instruction,
};

/// Connection settings for an Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaSettings {
    /// Server base URL.
    pub base_url: String,
    /// Model to run (e.g., "llama3.2-vision").
    pub model: String,
    /// Whether the configured model accepts image input. Text-only models
    /// still serve field extraction from OCR text elsewhere; refinement is
    /// skipped for them.
    pub supports_vision: bool,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2-vision".to_string(),
            supports_vision: true,
            timeout: Duration::from_secs(120),
        }
    }
}

/// Client for a local Ollama server.
pub struct OllamaRefiner {
    settings: OllamaSettings,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<String>>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct FieldRow {
    label: String,
    value: String,
    #[serde(default)]
    confidence: f64,
}

const FIELD_PROMPT: &str = "\
Read the document page in the image and list the labeled values it contains \
(identifiers, dates, names, amounts).

Return a JSON array, nothing else. Each element:
{\"label\": \"what the value is\", \"value\": \"the exact text on the page\", \"confidence\": 0.0-1.0}
Use the document's own language for labels.";

impl OllamaRefiner {
    /// Create a client for the given settings.
    pub fn new(settings: OllamaSettings) -> Result<Self, VisionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| VisionError::Transport(e.to_string()))?;
        Ok(Self { settings, client })
    }

    /// The settings this client was built with.
    pub fn settings(&self) -> &OllamaSettings {
        &self.settings
    }

    fn call(&self, prompt: &str, image: Option<&RasterImage>) -> Result<String, VisionError> {
        let request = GenerateRequest {
            model: &self.settings.model,
            prompt,
            images: image.map(|img| vec![img.to_base64()]),
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.settings.base_url))
            .json(&request)
            .send()
            .map_err(|e| VisionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(VisionError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let payload: GenerateResponse = response
            .json()
            .map_err(|e| VisionError::InvalidResponse(e.to_string()))?;
        Ok(payload.response)
    }
}

impl MarkupRefiner for OllamaRefiner {
    fn supports_vision(&self) -> bool {
        self.settings.supports_vision
    }

    fn refine(&self, request: &RefineRequest<'_>) -> Result<String, VisionError> {
        let instruction = build_refine_instruction(request.skeleton, request.memory);
        self.call(&instruction, Some(request.image))
    }
}

impl FieldExtractor for OllamaRefiner {
    fn extract_fields(&self, image: &RasterImage) -> Result<Vec<ExtractedField>, VisionError> {
        if !self.settings.supports_vision {
            return Err(VisionError::Unsupported);
        }
        let raw = self.call(FIELD_PROMPT, Some(image))?;
        let rows: Vec<FieldRow> = serde_json::from_str(extract_json_array(&raw))
            .map_err(|e| VisionError::InvalidResponse(e.to_string()))?;
        Ok(rows
            .into_iter()
            .map(|row| ExtractedField {
                label: row.label,
                value: row.value,
                confidence: row.confidence,
            })
            .collect())
    }
}

/// Cut a fenced or prose-wrapped response down to its JSON array.
fn extract_json_array(raw: &str) -> &str {
    let text = raw.trim();
    if let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) {
        if start < end {
            return &text[start..=end];
        }
    }
    text
}
