use super::{BackendClient, BackendError, BackendInfo, SimilarityResult};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const CHATBOT_PATH: &str = "/api/chatbot";
const WORD2VEC_PATH: &str = "/api/word2vec";

/// Client for the dashboard HTTP API
pub struct HttpBackend {
    info: BackendInfo,
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            info: BackendInfo {
                name: "Dashboard API".to_string(),
                description: format!("Chatbot and word2vec endpoints at {}", base_url),
                version: "0.1.0".to_string(),
            },
            client,
            base_url,
        })
    }

    async fn read_json(&self, resp: reqwest::Response) -> Result<Value, BackendError> {
        if !resp.status().is_success() {
            return Err(BackendError::Network(format!("{}", resp.status())));
        }
        resp.json()
            .await
            .map_err(|e| BackendError::Contract(format!("decode error: {}", e)))
    }
}

#[async_trait]
impl BackendClient for HttpBackend {
    async fn ask_chatbot(&self, message: &str) -> Result<String, BackendError> {
        let url = format!("{}{}", self.base_url, CHATBOT_PATH);
        let resp = self
            .client
            .post(&url)
            .json(&json!({ "message": message }))
            .send()
            .await
            .map_err(|e| BackendError::Network(format!("request error: {}", e)))?;

        decode_reply(self.read_json(resp).await?)
    }

    async fn similar_words(&self, term: &str) -> Result<Vec<SimilarityResult>, BackendError> {
        let url = format!("{}{}", self.base_url, WORD2VEC_PATH);
        let resp = self
            .client
            .get(&url)
            .query(&[("word", term)])
            .send()
            .await
            .map_err(|e| BackendError::Network(format!("request error: {}", e)))?;

        decode_similar(self.read_json(resp).await?)
    }

    fn info(&self) -> BackendInfo {
        self.info.clone()
    }
}

#[derive(Debug, Deserialize)]
struct ChatbotReply {
    reply: String,
}

#[derive(Debug, Deserialize)]
struct Word2VecReply {
    #[serde(default)]
    similar: Option<Vec<SimilarityResult>>,
}

fn decode_reply(body: Value) -> Result<String, BackendError> {
    let parsed: ChatbotReply = serde_json::from_value(body)
        .map_err(|e| BackendError::Contract(format!("bad chatbot reply: {}", e)))?;
    Ok(parsed.reply)
}

fn decode_similar(body: Value) -> Result<Vec<SimilarityResult>, BackendError> {
    let parsed: Word2VecReply = serde_json::from_value(body)
        .map_err(|e| BackendError::Contract(format!("bad word2vec reply: {}", e)))?;
    parsed
        .similar
        .ok_or_else(|| BackendError::Contract("missing similar list".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_reply() {
        let reply = decode_reply(json!({ "reply": "Cuaca cerah." })).unwrap();
        assert_eq!(reply, "Cuaca cerah.");
    }

    #[test]
    fn test_decode_reply_missing_field() {
        let result = decode_reply(json!({ "message": "salah" }));
        assert!(matches!(result, Err(BackendError::Contract(_))));
    }

    #[test]
    fn test_decode_similar() {
        let results = decode_similar(json!({
            "similar": [
                { "word": "santai", "score": 0.82 },
                { "word": "woles", "score": 0.77 }
            ]
        }))
        .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].word, "santai");
        assert!((results[0].score - 0.82).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decode_similar_empty_list_is_ok() {
        let results = decode_similar(json!({ "similar": [] })).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_decode_similar_missing_or_null() {
        assert!(matches!(
            decode_similar(json!({})),
            Err(BackendError::Contract(_))
        ));
        assert!(matches!(
            decode_similar(json!({ "similar": null })),
            Err(BackendError::Contract(_))
        ));
    }

    #[test]
    fn test_decode_similar_wrong_shape() {
        let result = decode_similar(json!({ "similar": [{ "kata": "santai" }] }));
        assert!(matches!(result, Err(BackendError::Contract(_))));
    }
}
