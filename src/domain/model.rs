use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One detected region of interest, as returned by the analysis model.
///
/// `box_2d` is `[ymin, xmin, ymax, xmax]` on a 0-1000 scale. Coordinates are
/// stored exactly as the model emitted them; clamping and well-formedness are
/// handled at projection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundingBox {
    pub label: String,
    pub box_2d: [i64; 4],
}

/// The full result of one image analysis round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditResponse {
    pub answer: String,
    pub items: Vec<BoundingBox>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// One turn in a conversation. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Model, text)
    }
}

/// In-memory aggregate of one inspection: the selected image, its chat
/// history, and the most recent analysis. Lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct AuditSession {
    pub id: String,
    pub image_path: Option<String>,
    pub mime_type: Option<String>,
    pub history: Vec<ChatMessage>,
    pub last_analysis: Option<AuditResponse>,
}

impl AuditSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            ..Default::default()
        }
    }

    /// Selecting a new image discards the previous analysis.
    pub fn select_image(&mut self, path: impl Into<String>, mime_type: impl Into<String>) {
        self.image_path = Some(path.into());
        self.mime_type = Some(mime_type.into());
        self.last_analysis = None;
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.history.push(ChatMessage::user(text));
    }

    pub fn push_model(&mut self, text: impl Into<String>) {
        self.history.push(ChatMessage::model(text));
    }

    pub fn record_analysis(&mut self, analysis: AuditResponse) {
        self.last_analysis = Some(analysis);
    }
}

/// A rectangle positioned relative to the displayed image's box, each field a
/// percentage of the container. Produced only by the coordinate projector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl OverlayRect {
    /// Resolve the percentages against a concrete rendered box, returning
    /// `(x, y, width, height)` in pixels.
    pub fn to_pixels(&self, container_w: f64, container_h: f64) -> (f64, f64, f64, f64) {
        (
            self.left / 100.0 * container_w,
            self.top / 100.0 * container_h,
            self.width / 100.0 * container_w,
            self.height / 100.0 * container_h,
        )
    }
}
