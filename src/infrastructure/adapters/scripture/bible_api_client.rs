//! Bible API Client - JSON 经文检索
//!
//! 实现 ScriptureSourcePort trait
//!
//! 外部 API:
//! GET {base_url}/{reference}?translation={version}
//! Response: {"reference": "...", "verses": [{"verse": 16, "text": "..."}], ...}

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::application::ports::{ScriptureError, ScriptureSourcePort};

#[derive(Debug, Deserialize)]
struct PassageBody {
    #[serde(default)]
    verses: Vec<VerseBody>,
}

#[derive(Debug, Deserialize)]
struct VerseBody {
    #[serde(default)]
    text: String,
}

/// 经文客户端配置
#[derive(Debug, Clone)]
pub struct BibleApiConfig {
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for BibleApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://bible-api.com".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Bible API 客户端
pub struct BibleApiClient {
    client: Client,
    config: BibleApiConfig,
}

impl BibleApiClient {
    pub fn new(config: BibleApiConfig) -> Result<Self, ScriptureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScriptureError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn passage_url(&self, reference: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            reference.trim().replace(' ', "+")
        )
    }
}

#[async_trait]
impl ScriptureSourcePort for BibleApiClient {
    async fn fetch(&self, reference: &str, version: &str) -> Result<Vec<String>, ScriptureError> {
        let url = self.passage_url(reference);
        tracing::debug!(url = %url, version, "Fetching passage");

        let response = self
            .client
            .get(&url)
            .query(&[("translation", version.to_lowercase())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScriptureError::Timeout
                } else {
                    ScriptureError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ScriptureError::NotFound(reference.to_string()));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            // 该接口对不支持的译本返回 4xx 并在错误信息中说明
            if error_text.to_lowercase().contains("translation") {
                return Err(ScriptureError::UnsupportedVersion(version.to_string()));
            }
            return Err(ScriptureError::InvalidResponse(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: PassageBody = response
            .json()
            .await
            .map_err(|e| ScriptureError::InvalidResponse(e.to_string()))?;

        let verses: Vec<String> = body
            .verses
            .into_iter()
            .map(|v| v.text.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|v| !v.is_empty())
            .collect();

        if verses.is_empty() {
            return Err(ScriptureError::NotFound(reference.to_string()));
        }
        Ok(verses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = BibleApiConfig::default();
        assert_eq!(config.base_url, "https://bible-api.com");
    }

    #[test]
    fn test_passage_url() {
        let client = BibleApiClient::new(BibleApiConfig {
            base_url: "http://localhost:7000/".to_string(),
            timeout_secs: 1,
        })
        .unwrap();
        assert_eq!(client.passage_url(" John 3:16 "), "http://localhost:7000/John+3:16");
    }

    #[test]
    fn test_parse_body() {
        let json = r#"{"reference": "John 3:16", "verses": [{"verse": 16, "text": "For God so loved\nthe world "}]}"#;
        let body: PassageBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.verses.len(), 1);
        assert!(body.verses[0].text.starts_with("For God"));
    }
}
