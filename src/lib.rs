pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use self::adapters::{GeminiBackend, LocalImageStore};
pub use self::config::{CliConfig, Settings, TomlConfig};
pub use self::core::analysis::AnalysisClient;
pub use self::core::chat::ChatClient;
pub use self::core::engine::{AuditEngine, AuditReport};
pub use self::domain::model::{
    AuditResponse, AuditSession, BoundingBox, ChatMessage, ChatRole, OverlayRect,
};
pub use self::utils::error::{AuditError, Result};
