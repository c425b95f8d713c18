pub mod analysis;
pub mod chat;
pub mod encode;
pub mod engine;
pub mod overlay;
pub mod session;

pub use crate::domain::model::{AuditResponse, BoundingBox, ChatMessage, ChatRole, OverlayRect};
pub use crate::domain::ports::{ConfigProvider, GenerativeBackend, ImageStore};
pub use crate::utils::error::Result;
