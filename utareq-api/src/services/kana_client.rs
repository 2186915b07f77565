//! Gemini API client for kana annotation
//!
//! Sends one generateContent call per batch with a JSON response schema so
//! the model output parses directly into typed results.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Kana client errors
#[derive(Debug, Error)]
pub enum KanaError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// One title/artist pair submitted for annotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongName {
    pub title: String,
    pub artist: String,
}

/// Annotated result: original names with parenthetical readings appended
/// where needed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanaResult {
    pub original_title: String,
    pub updated_title: String,
    pub original_artist: String,
    pub updated_artist: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Gemini API client for kana annotation
#[derive(Clone)]
pub struct KanaClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl KanaClient {
    pub fn new(api_key: Option<String>) -> Result<Self, KanaError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| KanaError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Override the API base URL (tests)
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Annotate a batch of song names with katakana readings.
    ///
    /// One request per batch; the response schema constrains the model to a
    /// JSON array matching [`KanaResult`].
    pub async fn annotate(&self, songs: &[SongName]) -> Result<Vec<KanaResult>, KanaError> {
        let api_key = self.api_key.as_deref().ok_or(KanaError::MissingApiKey)?;

        let song_list = serde_json::to_string(songs)
            .map_err(|e| KanaError::Parse(e.to_string()))?;
        let prompt = format!(
            "以下の日本の曲名とアーティスト名のJSONリストについて、一般的なカタカナの読み仮名を括弧付きで追記した結果を返してください。\n\
             - 英語名、数字、記号のみ、または既にカタカナ/ひらがなの場合は、読み仮名は不要です。その場合は元の文字列をそのまま updatedTitle/updatedArtist に入れてください。\n\
             - 読み仮名が必要な漢字や英語表記の場合のみ「元の名前(カタカナ)」の形式にしてください。\n\n\
             リスト:\n{}\n",
            song_list
        );

        let request_body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "originalTitle": { "type": "STRING" },
                            "updatedTitle": { "type": "STRING" },
                            "originalArtist": { "type": "STRING" },
                            "updatedArtist": { "type": "STRING" }
                        },
                        "required": ["originalTitle", "updatedTitle", "originalArtist", "updatedArtist"]
                    }
                }
            }
        });

        let url = format!("{}/{}:generateContent", self.base_url, GEMINI_MODEL);
        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| KanaError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(KanaError::Api(status.as_u16(), body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| KanaError::Parse(e.to_string()))?;

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| KanaError::Parse("Empty model response".to_string()))?;

        serde_json::from_str(text).map_err(|e| KanaError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_is_an_error() {
        let client = KanaClient::new(None).unwrap();
        let songs = vec![SongName {
            title: "夜に駆ける".to_string(),
            artist: "YOASOBI".to_string(),
        }];
        assert!(matches!(
            client.annotate(&songs).await,
            Err(KanaError::MissingApiKey)
        ));
    }

    #[test]
    fn kana_result_uses_camel_case_wire_names() {
        let result = KanaResult {
            original_title: "夜に駆ける".to_string(),
            updated_title: "夜に駆ける(ヨルニカケル)".to_string(),
            original_artist: "YOASOBI".to_string(),
            updated_artist: "YOASOBI".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("originalTitle").is_some());
        assert!(value.get("updatedArtist").is_some());
    }
}
