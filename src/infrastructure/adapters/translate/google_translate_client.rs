//! Google Translate Client - 公共翻译接口
//!
//! 实现 PhraseTranslatorPort trait
//!
//! 外部 API:
//! GET {base_url}/translate_a/single?client=gtx&sl=auto&tl={code}&dt=t&q={text}
//! Response: [[["译文片段", "原文片段", ...], ...], ...]

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::application::ports::{PhraseTranslatorPort, TranslateError};

/// 翻译客户端配置
#[derive(Debug, Clone)]
pub struct GoogleTranslateConfig {
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GoogleTranslateConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.googleapis.com".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Google Translate 客户端
pub struct GoogleTranslateClient {
    client: Client,
    config: GoogleTranslateConfig,
}

impl GoogleTranslateClient {
    pub fn new(config: GoogleTranslateConfig) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TranslateError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn translate_url(&self) -> String {
        format!("{}/translate_a/single", self.config.base_url.trim_end_matches('/'))
    }
}

/// 拼接所有译文片段
fn parse_segments(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0)?.as_str())
        .collect();
    Some(text)
}

#[async_trait]
impl PhraseTranslatorPort for GoogleTranslateClient {
    async fn translate(&self, text: &str, language_code: &str) -> Result<String, TranslateError> {
        tracing::debug!(text_len = text.len(), code = language_code, "Sending translate request");

        let response = self
            .client
            .get(self.translate_url())
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", language_code),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslateError::Timeout
                } else if e.is_connect() {
                    TranslateError::NetworkError(format!("Cannot connect to translate service: {}", e))
                } else {
                    TranslateError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranslateError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslateError::InvalidResponse(e.to_string()))?;

        parse_segments(&body)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| TranslateError::InvalidResponse("No translated segments".to_string()))
    }
}
