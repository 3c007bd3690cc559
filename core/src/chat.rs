use crate::backend::BackendClient;
use crate::events::EventSender;
use std::sync::Arc;
use uuid::Uuid;

/// Placeholder text shown while the bot reply is in flight
pub const PROCESSING_INDICATOR: &str = "Memproses...";

/// Fixed reply shown when an exchange fails
pub const CHAT_FAILURE_REPLY: &str = "Gagal mengambil jawaban.";

/// Who sent a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// A single message in the chat transcript
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub pending: bool,
}

/// Result of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Exchange started; a reply or failure event will follow
    Started,
    /// Trimmed input was empty, nothing was sent
    EmptyInput,
    /// The previous exchange is still in flight
    Busy,
}

/// Floating chatbot panel: open/close visibility plus one
/// request/response exchange at a time.
pub struct ChatPanel {
    messages: Vec<ChatMessage>,
    backend: Arc<dyn BackendClient>,
    event_sender: EventSender,
    visible: bool,
    in_flight: Option<Uuid>,
}

impl ChatPanel {
    pub fn new(backend: Arc<dyn BackendClient>, event_sender: EventSender) -> Self {
        Self {
            messages: Vec::new(),
            backend,
            event_sender,
            visible: false,
            in_flight: None,
        }
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Append the user message and a bot placeholder, then fetch the
    /// reply without blocking the UI loop. The placeholder id is the
    /// only thing a completion may mutate.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::EmptyInput;
        }
        if self.in_flight.is_some() {
            tracing::debug!("submit rejected, exchange still in flight");
            return SubmitOutcome::Busy;
        }

        self.messages.push(ChatMessage {
            id: Uuid::new_v4(),
            sender: Sender::User,
            text: text.to_string(),
            pending: false,
        });

        let placeholder = Uuid::new_v4();
        self.messages.push(ChatMessage {
            id: placeholder,
            sender: Sender::Bot,
            text: PROCESSING_INDICATOR.to_string(),
            pending: true,
        });
        self.in_flight = Some(placeholder);

        let backend = self.backend.clone();
        let sender = self.event_sender.clone();
        let message = text.to_string();
        tokio::spawn(async move {
            match backend.ask_chatbot(&message).await {
                Ok(reply) => {
                    let _ = sender.send_chat_reply(placeholder, reply);
                }
                Err(error) => {
                    let _ = sender.send_chat_failed(placeholder, error);
                }
            }
        });

        SubmitOutcome::Started
    }

    /// Replace the placeholder's content with the bot's reply
    pub fn resolve_reply(&mut self, id: Uuid, reply: String) {
        self.finish(id, reply);
    }

    /// Replace the placeholder's content with the fixed failure reply
    pub fn resolve_failure(&mut self, id: Uuid) {
        self.finish(id, CHAT_FAILURE_REPLY.to_string());
    }

    fn finish(&mut self, id: Uuid, text: String) {
        if let Some(msg) = self.messages.iter_mut().rev().find(|m| m.id == id) {
            msg.text = text;
            msg.pending = false;
        }
        if self.in_flight == Some(id) {
            self.in_flight = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::backend::{BackendError, BackendInfo, SimilarityResult};
    use crate::events::{AppEvent, EventBus};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Backend that only counts how often it was called
    struct CountingBackend {
        calls: AtomicUsize,
    }

    impl CountingBackend {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BackendClient for CountingBackend {
        async fn ask_chatbot(&self, _message: &str) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("ok".to_string())
        }

        async fn similar_words(&self, _term: &str) -> Result<Vec<SimilarityResult>, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        fn info(&self) -> BackendInfo {
            BackendInfo {
                name: "Counting Backend".to_string(),
                description: "Counts calls".to_string(),
                version: "0.1.0".to_string(),
            }
        }
    }

    fn panel_with_mock(delay_ms: u64) -> (ChatPanel, tokio::sync::mpsc::UnboundedReceiver<AppEvent>) {
        let bus = EventBus::new();
        let sender = bus.sender();
        let backend = Arc::new(MockBackend::new().with_delay(Duration::from_millis(delay_ms)));
        (ChatPanel::new(backend, sender), bus.into_receiver())
    }

    #[tokio::test]
    async fn test_submit_appends_user_then_placeholder() {
        let (mut panel, mut receiver) = panel_with_mock(10);

        assert_eq!(panel.submit("Dimana gempa terkini?"), SubmitOutcome::Started);

        // Both messages exist before the call settles
        let messages = panel.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].text, "Dimana gempa terkini?");
        assert_eq!(messages[1].sender, Sender::Bot);
        assert!(messages[1].pending);
        assert_eq!(messages[1].text, PROCESSING_INDICATOR);
        assert!(panel.is_processing());

        let placeholder_id = messages[1].id;
        match receiver.recv().await.unwrap() {
            AppEvent::ChatReply { id, reply } => {
                assert_eq!(id, placeholder_id);
                panel.resolve_reply(id, reply);
            }
            other => panic!("Expected ChatReply, got {:?}", other),
        }

        // Exactly the placeholder was mutated, nothing appended
        let messages = panel.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "Dimana gempa terkini?");
        assert!(!messages[1].pending);
        assert!(messages[1].text.contains("Magnitudo"));
        assert!(!panel.is_processing());
    }

    #[tokio::test]
    async fn test_empty_submit_appends_nothing_and_calls_nothing() {
        let bus = EventBus::new();
        let backend = Arc::new(CountingBackend::new());
        let mut panel = ChatPanel::new(backend.clone(), bus.sender());

        assert_eq!(panel.submit(""), SubmitOutcome::EmptyInput);
        assert_eq!(panel.submit("   "), SubmitOutcome::EmptyInput);

        assert!(panel.messages().is_empty());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_submit_while_pending_is_rejected() {
        let (mut panel, _receiver) = panel_with_mock(200);

        assert_eq!(panel.submit("cuaca jakarta"), SubmitOutcome::Started);
        assert_eq!(panel.submit("gempa"), SubmitOutcome::Busy);

        assert_eq!(panel.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_replaces_placeholder_with_fixed_reply() {
        let (mut panel, mut receiver) = panel_with_mock(10);
        panel.open();

        assert_eq!(panel.submit("network error"), SubmitOutcome::Started);

        match receiver.recv().await.unwrap() {
            AppEvent::ChatFailed { id, error } => {
                assert!(matches!(error, BackendError::Network(_)));
                panel.resolve_failure(id);
            }
            other => panic!("Expected ChatFailed, got {:?}", other),
        }

        let messages = panel.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].text, CHAT_FAILURE_REPLY);
        assert!(!messages[1].pending);
        // A failed exchange leaves the panel state alone
        assert!(panel.is_open());
        assert!(!panel.is_processing());
    }

    #[tokio::test]
    async fn test_open_close_are_idempotent() {
        let (mut panel, _receiver) = panel_with_mock(10);

        assert!(!panel.is_open());
        panel.open();
        panel.open();
        assert!(panel.is_open());
        panel.close();
        panel.close();
        assert!(!panel.is_open());
    }
}
