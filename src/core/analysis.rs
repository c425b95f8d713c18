//! One image+prompt analysis round-trip against the hosted multimodal model.

use crate::core::encode::strip_data_uri;
use crate::domain::model::AuditResponse;
use crate::domain::ports::{GenerateRequest, GenerativeBackend, PromptPart, PromptTurn};
use crate::utils::error::{AuditError, Result};

const SYSTEM_INSTRUCTION: &str = "\
You are an expert Visual Audit Assistant for industrial, retail, and safety inspections.
Analyze the provided image carefully.
Your goal is to answer the user's question about the image accurately.

If the user asks to count, locate, or identify specific items (like \"boxes\", \"helmets\", \"empty shelves\", \"hazards\"),
you MUST provide bounding boxes for those items in the response.

Coordinates for bounding boxes must be integers on a scale of 0 to 1000 (ymin, xmin, ymax, xmax).

Return the result strictly in JSON format matching this schema:
{
  \"answer\": \"A detailed text answer to the user's question.\",
  \"items\": [
    { \"label\": \"Short label for the item\", \"box_2d\": [ymin, xmin, ymax, xmax] }
  ]
}

If no specific items need bounding boxes based on the query, return an empty array for \"items\".";

/// The output schema the remote model is held to, in the service's own
/// schema dialect.
fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "answer": { "type": "STRING" },
            "items": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": { "type": "STRING" },
                        "box_2d": {
                            "type": "ARRAY",
                            "items": { "type": "INTEGER" },
                            "description": "ymin, xmin, ymax, xmax coordinates (0-1000)"
                        }
                    }
                }
            }
        },
        "propertyOrdering": ["answer", "items"]
    })
}

pub struct AnalysisClient<B: GenerativeBackend> {
    backend: B,
}

impl<B: GenerativeBackend> AnalysisClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Analyze one image with a free-text prompt.
    ///
    /// Failures stay distinct: a transport error, an empty reply, and a reply
    /// that fails the schema each surface as their own error variant. No
    /// retry, no caching; identical inputs are always re-sent.
    pub async fn analyze(
        &self,
        base64_image: &str,
        mime_type: &str,
        prompt: &str,
    ) -> Result<AuditResponse> {
        let request = GenerateRequest {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            turns: vec![PromptTurn::user(vec![
                PromptPart::InlineImage {
                    mime_type: mime_type.to_string(),
                    data: strip_data_uri(base64_image).to_string(),
                },
                PromptPart::Text(prompt.to_string()),
            ])],
            response_schema: Some(response_schema()),
        };

        tracing::debug!(mime_type, "requesting image analysis");
        let text = self.backend.generate(request).await?;
        if text.trim().is_empty() {
            return Err(AuditError::EmptyResponse);
        }

        parse_audit_response(&text)
    }
}

/// Strict parse of the model's reply. Extra top-level fields, a wrong element
/// shape, or plain non-JSON all reject with a schema error rather than a
/// partial value.
pub fn parse_audit_response(text: &str) -> Result<AuditResponse> {
    serde_json::from_str(text).map_err(|e| AuditError::SchemaError {
        message: e.to_string(),
    })
}
