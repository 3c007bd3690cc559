use crate::backend::{BackendError, SimilarityResult};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Events that flow through the application
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The chatbot replied to the exchange with this placeholder id
    ChatReply { id: Uuid, reply: String },

    /// The chatbot exchange with this placeholder id failed
    ChatFailed { id: Uuid, error: BackendError },

    /// Similarity results arrived for a search term
    SearchLoaded {
        term: String,
        results: Vec<SimilarityResult>,
    },

    /// The search exchange for a term failed
    SearchFailed { term: String, error: BackendError },

    /// Application should quit
    Quit,
}

/// Event bus for communication between components
#[derive(Debug)]
pub struct EventBus {
    sender: mpsc::UnboundedSender<AppEvent>,
    receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Get a sender handle for the event bus
    pub fn sender(&self) -> EventSender {
        EventSender {
            inner: self.sender.clone(),
        }
    }

    /// Get the receiver (should only be used by the main event loop)
    pub fn into_receiver(self) -> mpsc::UnboundedReceiver<AppEvent> {
        self.receiver
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle for sending events to the event bus
#[derive(Debug, Clone)]
pub struct EventSender {
    inner: mpsc::UnboundedSender<AppEvent>,
}

impl EventSender {
    /// Send an event to the bus
    pub fn send(&self, event: AppEvent) -> Result<(), EventSendError> {
        self.inner
            .send(event)
            .map_err(|_| EventSendError::ChannelClosed)
    }

    /// Send a chatbot reply for a placeholder
    pub fn send_chat_reply(&self, id: Uuid, reply: String) -> Result<(), EventSendError> {
        self.send(AppEvent::ChatReply { id, reply })
    }

    /// Send a chatbot failure for a placeholder
    pub fn send_chat_failed(&self, id: Uuid, error: BackendError) -> Result<(), EventSendError> {
        self.send(AppEvent::ChatFailed { id, error })
    }

    /// Send similarity results for a term
    pub fn send_search_loaded(
        &self,
        term: String,
        results: Vec<SimilarityResult>,
    ) -> Result<(), EventSendError> {
        self.send(AppEvent::SearchLoaded { term, results })
    }

    /// Send a search failure for a term
    pub fn send_search_failed(
        &self,
        term: String,
        error: BackendError,
    ) -> Result<(), EventSendError> {
        self.send(AppEvent::SearchFailed { term, error })
    }

    /// Send quit signal
    pub fn send_quit(&self) -> Result<(), EventSendError> {
        self.send(AppEvent::Quit)
    }
}

/// Errors that can occur when sending events
#[derive(Debug, thiserror::Error)]
pub enum EventSendError {
    #[error("Event channel is closed")]
    ChannelClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus() {
        let bus = EventBus::new();
        let sender = bus.sender();
        let mut receiver = bus.into_receiver();

        let id = Uuid::new_v4();
        sender.send_chat_reply(id, "halo".to_string()).unwrap();

        let event = receiver.recv().await.unwrap();
        match event {
            AppEvent::ChatReply { id: got, reply } => {
                assert_eq!(got, id);
                assert_eq!(reply, "halo");
            }
            _ => panic!("Expected ChatReply event"),
        }
    }

    #[tokio::test]
    async fn test_quit_event() {
        let bus = EventBus::new();
        let sender = bus.sender();
        let mut receiver = bus.into_receiver();

        sender.send_quit().unwrap();
        assert!(matches!(receiver.recv().await.unwrap(), AppEvent::Quit));
    }
}
