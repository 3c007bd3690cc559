use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod http;
pub mod mock;

/// Backend capability both panels talk to
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Post a chat message and get the bot's reply
    async fn ask_chatbot(&self, message: &str) -> Result<String, BackendError>;

    /// Fetch the words most similar to a term
    async fn similar_words(&self, term: &str) -> Result<Vec<SimilarityResult>, BackendError>;

    /// Get backend information
    fn info(&self) -> BackendInfo;
}

/// One similarity hit as served by the word2vec endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub word: String,
    pub score: f64,
}

/// Information about a backend
#[derive(Debug, Clone)]
pub struct BackendInfo {
    pub name: String,
    pub description: String,
    pub version: String,
}

/// Errors that can occur while talking to the backend
#[derive(Error, Debug, Clone)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Contract(String),

    #[error("Backend configuration error: {0}")]
    Configuration(String),
}

/// Factory for creating different types of backends
pub struct BackendFactory;

impl BackendFactory {
    /// Create an HTTP backend against the dashboard API.
    /// Required: KATALAB_API_URL (e.g. "http://localhost:5000")
    pub fn create_http_from_env() -> Result<std::sync::Arc<dyn BackendClient>, BackendError> {
        let base_url = std::env::var("KATALAB_API_URL")
            .map_err(|_| BackendError::Configuration("Missing KATALAB_API_URL".to_string()))?;

        let backend = http::HttpBackend::new(base_url)
            .map_err(|e| BackendError::Configuration(format!("{}", e)))?;
        Ok(std::sync::Arc::new(backend))
    }

    /// Create the canned offline backend
    pub fn create_mock() -> std::sync::Arc<dyn BackendClient> {
        std::sync::Arc::new(mock::MockBackend::new())
    }
}
