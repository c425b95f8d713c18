use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("model service returned {status}: {message}")]
    RemoteError { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("model returned no text")]
    EmptyResponse,

    #[error("model response did not match the expected schema: {message}")]
    SchemaError { message: String },

    #[error("superseded by a newer request")]
    Superseded,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error for {field}: {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, AuditError>;
