//! Freeform chat assistant riding on the same generative transport.

use crate::domain::model::ChatMessage;
use crate::domain::ports::{GenerateRequest, GenerativeBackend, PromptPart, PromptTurn};
use crate::utils::error::{AuditError, Result};

const CHAT_SYSTEM_INSTRUCTION: &str = "You are a helpful AI assistant for a Visual Audit application. You help users understand audit procedures, safety regulations, and analyze text-based queries.";

/// Returned when the remote call fails. The chat path deliberately degrades
/// instead of propagating, unlike the analysis path.
pub const APOLOGY_REPLY: &str = "Sorry, I encountered an error processing your request.";

/// Returned when the remote call succeeds but carries no text.
pub const EMPTY_REPLY_FALLBACK: &str = "I couldn't generate a response.";

/// Opening message seeding a fresh conversation.
pub const GREETING: &str = "Hello! I'm your Visual Audit Assistant. I can help you understand safety regulations, audit best practices, or interpret previous inspection results. How can I help you today?";

pub struct ChatClient<B: GenerativeBackend> {
    backend: B,
}

impl<B: GenerativeBackend> ChatClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Continue a conversation: the full prior history plus one new user
    /// message is replayed to the remote service, which holds no session
    /// state of its own between calls.
    ///
    /// This method never fails. Any remote error is swallowed and converted
    /// to a fixed apology string appended as if the assistant had replied.
    pub async fn send(&self, history: &[ChatMessage], message: &str) -> String {
        match self.try_send(history, message).await {
            Ok(text) => text,
            Err(AuditError::EmptyResponse) => EMPTY_REPLY_FALLBACK.to_string(),
            Err(err) => {
                tracing::warn!("chat turn failed, degrading to canned reply: {}", err);
                APOLOGY_REPLY.to_string()
            }
        }
    }

    async fn try_send(&self, history: &[ChatMessage], message: &str) -> Result<String> {
        let mut turns: Vec<PromptTurn> = history
            .iter()
            .map(|m| PromptTurn {
                role: m.role,
                parts: vec![PromptPart::Text(m.text.clone())],
            })
            .collect();
        turns.push(PromptTurn::user(vec![PromptPart::Text(message.to_string())]));

        let request = GenerateRequest {
            system_instruction: CHAT_SYSTEM_INSTRUCTION.to_string(),
            turns,
            response_schema: None,
        };

        tracing::debug!(history_len = history.len(), "sending chat turn");
        let text = self.backend.generate(request).await?;
        if text.trim().is_empty() {
            return Ok(EMPTY_REPLY_FALLBACK.to_string());
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ChatRole;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct StubBackend {
        reply: Option<&'static str>,
        requests: Arc<Mutex<Vec<GenerateRequest>>>,
    }

    impl StubBackend {
        fn replying(text: &'static str) -> Self {
            Self {
                reply: Some(text),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl GenerativeBackend for StubBackend {
        async fn generate(&self, request: GenerateRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request);
            match self.reply {
                Some(text) => Ok(text.to_string()),
                None => Err(AuditError::RemoteError {
                    status: 500,
                    message: "boom".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_send_returns_reply_text() {
        let backend = StubBackend::replying("Hard hats are required in zone B.");
        let client = ChatClient::new(backend);

        let reply = client.send(&[], "what PPE does zone B need?").await;
        assert_eq!(reply, "Hard hats are required in zone B.");
    }

    #[tokio::test]
    async fn test_send_degrades_to_apology_on_failure() {
        let backend = StubBackend::failing();
        let client = ChatClient::new(backend);

        let reply = client.send(&[], "hello").await;
        assert_eq!(reply, APOLOGY_REPLY);
    }

    #[tokio::test]
    async fn test_send_falls_back_on_empty_reply() {
        let backend = StubBackend::replying("");
        let client = ChatClient::new(backend);

        let reply = client.send(&[], "hello").await;
        assert_eq!(reply, EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn test_send_replays_history_in_caller_order() {
        let backend = StubBackend::replying("noted");
        let requests = backend.requests.clone();
        let client = ChatClient::new(backend);

        let history = vec![
            ChatMessage::model("how can I help?"),
            ChatMessage::user("explain lockout/tagout"),
            ChatMessage::model("it is an energy isolation procedure"),
        ];
        client.send(&history, "give an example").await;

        let requests = requests.lock().unwrap();
        let turns = &requests[0].turns;
        assert_eq!(turns.len(), 4);

        let roles: Vec<ChatRole> = turns.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![ChatRole::Model, ChatRole::User, ChatRole::Model, ChatRole::User]
        );
        match &turns[1].parts[0] {
            PromptPart::Text(text) => assert_eq!(text, "explain lockout/tagout"),
            other => panic!("expected text part, got {:?}", other),
        }
        match &turns[3].parts[0] {
            PromptPart::Text(text) => assert_eq!(text, "give an example"),
            other => panic!("expected text part, got {:?}", other),
        }
        assert!(requests[0].response_schema.is_none());
    }
}
