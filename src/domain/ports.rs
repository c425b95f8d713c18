use crate::domain::model::ChatRole;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the bytes of a selected image come from.
pub trait ImageStore: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn model(&self) -> &str;
    fn base_url(&self) -> &str;
    fn verbose(&self) -> bool;
}

/// One piece of a prompt turn.
#[derive(Debug, Clone)]
pub enum PromptPart {
    Text(String),
    InlineImage { mime_type: String, data: String },
}

/// One role-tagged turn, in the order it should reach the model.
#[derive(Debug, Clone)]
pub struct PromptTurn {
    pub role: ChatRole,
    pub parts: Vec<PromptPart>,
}

impl PromptTurn {
    pub fn user(parts: Vec<PromptPart>) -> Self {
        Self {
            role: ChatRole::User,
            parts,
        }
    }
}

/// A single request to the hosted generative model.
///
/// When `response_schema` is set the backend must ask the service for JSON
/// output conforming to that schema; otherwise the reply is plain text.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub system_instruction: String,
    pub turns: Vec<PromptTurn>,
    pub response_schema: Option<serde_json::Value>,
}

/// The remote-model seam. Both the analysis and chat clients depend on this
/// trait so tests can substitute a double for the HTTP transport.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Perform one round-trip and return the reply's first candidate text.
    async fn generate(&self, request: GenerateRequest) -> Result<String>;
}
