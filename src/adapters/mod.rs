// Adapters layer: concrete implementations for external systems (the hosted
// generative service, the local filesystem).

pub mod gemini;
pub mod storage;

pub use gemini::GeminiBackend;
pub use storage::LocalImageStore;
