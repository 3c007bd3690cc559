use super::{BackendClient, BackendError, BackendInfo, SimilarityResult};
use async_trait::async_trait;
use std::time::Duration;

/// Offline backend with canned chatbot replies and a small slang lexicon.
/// Lets the UI run without a dashboard server and backs the panel tests.
pub struct MockBackend {
    info: BackendInfo,
    delay: Duration,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            info: BackendInfo {
                name: "Mock Backend".to_string(),
                description: "Canned chatbot and word2vec data for testing".to_string(),
                version: "0.1.0".to_string(),
            },
            delay: Duration::from_millis(300), // Simulate network latency
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Intent matching mirrors the dashboard chatbot: earthquake,
    /// weather, warnings, then a fallback.
    fn canned_reply(message: &str) -> String {
        let msg = message.to_lowercase();

        if ["gempa", "guncang", "magnitudo"].iter().any(|k| msg.contains(k)) {
            return "Gempa terbaru: Magnitudo 4.8 SR di Banten pada 12:31:42 WIB. \
                    Kedalaman 10 km. Potensi: Tidak berpotensi tsunami."
                .to_string();
        }

        if ["cuaca", "hujan", "panas"].iter().any(|k| msg.contains(k)) {
            return "Cuaca di Jakarta Pusat, DKI Jakarta: Cerah Berawan, Suhu 31°C, \
                    Humiditas 70%, Angin 12 km/jam."
                .to_string();
        }

        if msg.contains("peringatan") || msg.contains("warning") {
            return "Tidak ada peringatan cuaca/gempa saat ini.".to_string();
        }

        "Maaf, saya hanya bisa menjawab pertanyaan tentang gempa, cuaca, atau peringatan BMKG."
            .to_string()
    }

    /// Unknown terms return an empty list, like the word2vec handler does
    /// for out-of-vocabulary words.
    fn lexicon(term: &str) -> Vec<SimilarityResult> {
        let entries: &[(&str, f64)] = match term.to_lowercase().trim() {
            "alay" => &[("santai", 0.82), ("woles", 0.77)],
            "woles" => &[("santai", 0.88), ("kalem", 0.81), ("selow", 0.74)],
            "kepo" => &[("penasaran", 0.86), ("usil", 0.69)],
            "gempa" => &[("lindu", 0.79), ("guncangan", 0.71), ("getaran", 0.66)],
            _ => &[],
        };

        entries
            .iter()
            .map(|(word, score)| SimilarityResult {
                word: (*word).to_string(),
                score: *score,
            })
            .collect()
    }

    fn simulated_failure(input: &str) -> Option<BackendError> {
        if input.trim().eq_ignore_ascii_case("error") {
            return Some(BackendError::Contract("Simulated contract error".to_string()));
        }
        if input.trim().eq_ignore_ascii_case("network error") {
            return Some(BackendError::Network("Simulated network failure".to_string()));
        }
        None
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackendClient for MockBackend {
    async fn ask_chatbot(&self, message: &str) -> Result<String, BackendError> {
        if let Some(error) = Self::simulated_failure(message) {
            return Err(error);
        }

        tokio::time::sleep(self.delay).await;
        Ok(Self::canned_reply(message))
    }

    async fn similar_words(&self, term: &str) -> Result<Vec<SimilarityResult>, BackendError> {
        if let Some(error) = Self::simulated_failure(term) {
            return Err(error);
        }

        tokio::time::sleep(self.delay).await;
        Ok(Self::lexicon(term))
    }

    fn info(&self) -> BackendInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_chatbot_intents() {
        let backend = MockBackend::new().with_delay(Duration::from_millis(10));

        let reply = backend.ask_chatbot("Dimana gempa terkini?").await.unwrap();
        assert!(reply.contains("Magnitudo"));

        let reply = backend.ask_chatbot("Bagaimana cuaca di Jakarta?").await.unwrap();
        assert!(reply.contains("Cuaca di Jakarta"));

        let reply = backend.ask_chatbot("halo bot").await.unwrap();
        assert!(reply.contains("Maaf"));
    }

    #[tokio::test]
    async fn test_mock_chatbot_error_triggers() {
        let backend = MockBackend::new().with_delay(Duration::from_millis(10));

        match backend.ask_chatbot("error").await.unwrap_err() {
            BackendError::Contract(msg) => assert_eq!(msg, "Simulated contract error"),
            other => panic!("Expected contract error, got {:?}", other),
        }

        assert!(matches!(
            backend.ask_chatbot("network error").await.unwrap_err(),
            BackendError::Network(_)
        ));
    }

    #[tokio::test]
    async fn test_mock_lexicon() {
        let backend = MockBackend::new().with_delay(Duration::from_millis(10));

        let results = backend.similar_words("alay").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].word, "santai");
        assert!(results[0].score > results[1].score);

        let results = backend.similar_words("zzzzz").await.unwrap();
        assert!(results.is_empty());
    }
}
