//! Mood check-ins

use std::fmt;
use std::str::FromStr;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::error::ApiError;

/// Where an emotion reading came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmotionSource {
    /// Picked from the emoji grid
    #[default]
    #[serde(rename = "emoji")]
    Emoji,
    /// Predicted from a photo
    #[serde(rename = "AI")]
    Ai,
    #[serde(rename = "self-report")]
    SelfReport,
}

impl EmotionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            EmotionSource::Emoji => "emoji",
            EmotionSource::Ai => "AI",
            EmotionSource::SelfReport => "self-report",
        }
    }
}

impl fmt::Display for EmotionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "emoji" => Ok(EmotionSource::Emoji),
            "ai" => Ok(EmotionSource::Ai),
            "self-report" => Ok(EmotionSource::SelfReport),
            other => Err(format!("unknown emotion source: {}", other)),
        }
    }
}

/// One logged emotion, as stored on the user record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmotionLog {
    pub emotion: String,
    pub source: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize)]
struct EmotionCreate<'a> {
    emotion: &'a str,
    source: EmotionSource,
}

impl ApiClient {
    /// Record how the user feels right now
    pub async fn log_emotion(
        &self,
        user_id: &str,
        emotion: &str,
        source: EmotionSource,
    ) -> Result<(), ApiError> {
        let response = self
            .request(Method::POST, &["users", user_id, "emotions"])
            .json(&EmotionCreate { emotion, source })
            .send()
            .await?;
        Self::expect_success(response).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::api::test_support::stub_server;

    #[test]
    fn test_source_parsing() {
        assert_eq!("ai".parse::<EmotionSource>().unwrap(), EmotionSource::Ai);
        assert_eq!("AI".parse::<EmotionSource>().unwrap(), EmotionSource::Ai);
        assert_eq!("Emoji".parse::<EmotionSource>().unwrap(), EmotionSource::Emoji);
        assert_eq!(
            "self-report".parse::<EmotionSource>().unwrap(),
            EmotionSource::SelfReport
        );
        assert!("camera".parse::<EmotionSource>().is_err());
        assert_eq!(EmotionSource::default(), EmotionSource::Emoji);
    }

    #[tokio::test]
    async fn test_log_emotion_request() {
        let (client, seen) = stub_server(vec![(200, r#"{"message":"Emotion logged"}"#)]);

        client
            .log_emotion("u1", "happy", EmotionSource::Ai)
            .await
            .unwrap();

        let request = seen.recv().unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.url, "/users/u1/emotions");
        let body: Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body, json!({"emotion": "happy", "source": "AI"}));
    }

    #[tokio::test]
    async fn test_log_emotion_rejected() {
        let (client, _seen) = stub_server(vec![(404, r#"{"detail":"User not found"}"#)]);

        let err = client
            .log_emotion("u1", "sad", EmotionSource::Emoji)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 404, .. }));
        assert_eq!(err.user_message("Failed to save emotion"), "User not found");
    }
}
