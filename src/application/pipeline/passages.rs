//! Passage Service
//!
//! 经文检索链：结构化来源 -> 生成式兜底。失败只会得到空经文，不会向上抛错。

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::chain::{Attempt, ProviderChain, Strategy};
use crate::application::ports::{GenerativeTextPort, ScriptureSourcePort};
use crate::application::prompts;
use crate::domain::scripture::{normalize_reference, parse_numbered_verses, Passage};
use crate::domain::{paginate_passage, PassageLimits, SlideGroup};

struct PassageQuery {
    reference: String,
    version: String,
}

struct StructuredSourceStrategy {
    port: Arc<dyn ScriptureSourcePort>,
}

#[async_trait]
impl Strategy<PassageQuery, Vec<String>> for StructuredSourceStrategy {
    fn name(&self) -> &'static str {
        "structured"
    }

    async fn attempt(&self, query: &PassageQuery) -> Attempt<Vec<String>> {
        match self.port.fetch(&query.reference, &query.version).await {
            Ok(verses) => {
                let verses: Vec<String> = verses
                    .into_iter()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect();
                Attempt::from_option(Some(verses).filter(|v| !v.is_empty()))
            }
            Err(e) => {
                tracing::warn!(
                    reference = %query.reference,
                    version = %query.version,
                    error = %e,
                    "Scripture lookup failed, trying generative fallback"
                );
                Attempt::Skip
            }
        }
    }
}

struct GenerativeScriptureStrategy {
    port: Arc<dyn GenerativeTextPort>,
}

#[async_trait]
impl Strategy<PassageQuery, Vec<String>> for GenerativeScriptureStrategy {
    fn name(&self) -> &'static str {
        "generative"
    }

    async fn attempt(&self, query: &PassageQuery) -> Attempt<Vec<String>> {
        let prompt = prompts::scripture_lookup(&query.reference, &query.version);
        match self.port.generate(&prompt).await {
            Ok(reply) => {
                let verses = parse_numbered_verses(prompts::strip_code_fences(&reply));
                Attempt::from_option(Some(verses).filter(|v| !v.is_empty()))
            }
            Err(e) => {
                tracing::warn!(reference = %query.reference, error = %e, "Generative scripture lookup failed");
                Attempt::Skip
            }
        }
    }
}

/// 经文检索 + 分页
pub struct PassageService {
    chain: ProviderChain<PassageQuery, Vec<String>>,
    limits: PassageLimits,
}

impl PassageService {
    pub fn new(
        source: Option<Arc<dyn ScriptureSourcePort>>,
        generative: Option<Arc<dyn GenerativeTextPort>>,
        limits: PassageLimits,
    ) -> Self {
        let chain = ProviderChain::new("scripture")
            .with_optional(source.map(|port| StructuredSourceStrategy { port }))
            .with_optional(generative.map(|port| GenerativeScriptureStrategy { port }));
        Self { chain, limits }
    }

    /// 取回经文；引用无效或所有来源失败时经文为空
    pub async fn fetch_passage(&self, reference: &str, version: &str) -> Passage {
        let version = version.trim().to_uppercase();
        let Some(reference) = normalize_reference(reference) else {
            return Passage {
                reference: reference.trim().to_string(),
                version,
                verses: Vec::new(),
            };
        };

        let query = PassageQuery {
            reference: reference.clone(),
            version: version.clone(),
        };
        let verses = match self.chain.run(&query).await {
            Some(resolved) => {
                tracing::info!(
                    reference = %reference,
                    version = %version,
                    provider = resolved.provider,
                    verses = resolved.value.len(),
                    "Passage fetched"
                );
                resolved.value
            }
            None => {
                tracing::warn!(reference = %reference, version = %version, "Passage unavailable");
                Vec::new()
            }
        };

        Passage {
            reference,
            version,
            verses,
        }
    }

    /// 按配置的限制给经文分页
    pub fn paginate(&self, passage: &Passage) -> Vec<SlideGroup> {
        paginate_passage(&passage.verses, self.limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::{FakeGenerative, FakeScripture};

    fn service(
        source: &Arc<FakeScripture>,
        generative: Option<&Arc<FakeGenerative>>,
    ) -> PassageService {
        PassageService::new(
            Some(source.clone() as Arc<dyn ScriptureSourcePort>),
            generative.map(|g| g.clone() as Arc<dyn GenerativeTextPort>),
            PassageLimits::default(),
        )
    }

    #[tokio::test]
    async fn test_structured_source_first() {
        let source = Arc::new(FakeScripture::with_verses(&["For God so loved", " ", "that he gave"]));
        let generative = Arc::new(FakeGenerative::fixed("1 unused"));
        let passages = service(&source, Some(&generative));

        let passage = passages.fetch_passage("john 3:16-17 (NIV)", "niv").await;

        assert_eq!(passage.reference, "John 3:16-17");
        assert_eq!(passage.version, "NIV");
        assert_eq!(passage.verses, vec!["For God so loved", "that he gave"]);
        assert_eq!(generative.calls(), 0);
    }

    #[tokio::test]
    async fn test_generative_fallback_strips_numbers() {
        let source = Arc::new(FakeScripture::default());
        let generative = Arc::new(FakeGenerative::fixed("1 In the beginning\n2 The earth was formless"));
        let passages = service(&source, Some(&generative));

        let passage = passages.fetch_passage("Genesis 1:1-2", "ESV").await;

        assert_eq!(passage.verses, vec!["In the beginning", "The earth was formless"]);
        assert_eq!(source.calls(), 1);
        assert_eq!(generative.calls(), 1);
    }

    #[tokio::test]
    async fn test_total_failure_is_empty() {
        let source = Arc::new(FakeScripture::default());
        let generative = Arc::new(FakeGenerative::failing());
        let passages = service(&source, Some(&generative));

        let passage = passages.fetch_passage("Psalm 23", "NIV").await;

        assert!(passage.is_empty());
        assert!(passages.paginate(&passage).is_empty());
    }

    #[tokio::test]
    async fn test_blank_reference_skips_providers() {
        let source = Arc::new(FakeScripture::with_verses(&["x"]));
        let passages = service(&source, None);

        assert!(passages.fetch_passage("n", "NIV").await.is_empty());
        assert!(passages.fetch_passage("  ", "NIV").await.is_empty());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_paginate_uses_limits() {
        let source = Arc::new(FakeScripture::with_verses(&["v1", "v2", "v3", "v4", "v5"]));
        let passages = service(&source, None);

        let passage = passages.fetch_passage("Romans 12:1-5", "NIV").await;
        let groups = passages.paginate(&passage);

        assert_eq!(groups.iter().map(SlideGroup::len).collect::<Vec<_>>(), vec![2, 2, 1]);
    }
}
