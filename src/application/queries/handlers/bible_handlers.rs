//! Bible Query Handlers

use serde::Serialize;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::pipeline::PassageService;
use crate::application::queries::GetPassage;

/// 经文响应，`text` 每个元素是一页幻灯片的正文
#[derive(Debug, Clone, Serialize)]
pub struct PassageResponse {
    pub reference: String,
    pub version: String,
    pub text: Vec<String>,
}

/// GetPassage Handler
pub struct GetPassageHandler {
    passages: Arc<PassageService>,
}

impl GetPassageHandler {
    pub fn new(passages: Arc<PassageService>) -> Self {
        Self { passages }
    }

    pub async fn handle(&self, query: GetPassage) -> Result<PassageResponse, ApplicationError> {
        let passage = self
            .passages
            .fetch_passage(&query.reference, &query.version)
            .await;

        if passage.is_empty() {
            return Err(ApplicationError::not_found("Passage", query.reference.trim()));
        }

        let text = self
            .passages
            .paginate(&passage)
            .into_iter()
            .map(|group| group.into_body())
            .collect();

        Ok(PassageResponse {
            reference: passage.reference,
            version: passage.version,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::FakeScripture;
    use crate::application::ports::ScriptureSourcePort;
    use crate::domain::PassageLimits;

    fn handler(verses: &[&str]) -> GetPassageHandler {
        let source = Arc::new(FakeScripture::with_verses(verses)) as Arc<dyn ScriptureSourcePort>;
        GetPassageHandler::new(Arc::new(PassageService::new(Some(source), None, PassageLimits::default())))
    }

    #[tokio::test]
    async fn test_passage_paginated() {
        let response = handler(&["a", "b", "c"])
            .handle(GetPassage::new("psalm 23:1-3", None))
            .await
            .unwrap();

        assert_eq!(response.reference, "Psalm 23:1-3");
        assert_eq!(response.version, "NIV");
        assert_eq!(response.text, vec!["a\nb".to_string(), "c".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_passage_is_not_found() {
        let err = handler(&[])
            .handle(GetPassage::new("Nowhere 1:1", Some("ESV".into())))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }
}
