//! Translation Resolver
//!
//! 进程级缓存：`(原文, 目标语言)` 一旦解析就不再变化，命中时不再调用任何服务。
//! 同一个 key 同时只会有一次解析在进行（in-flight 表），其余调用者等待同一个结果。
//! 网络调用期间不持有任何 map 的锁。

use dashmap::DashMap;
use futures_util::future::{join_all, FutureExt};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::strategies::{GenerativeStrategy, IdentityStrategy, PhraseStrategy, TranslationInput};
use crate::application::chain::ProviderChain;
use crate::application::ports::{GenerativeTextPort, PhraseTranslatorPort};
use crate::application::prompts;

/// 译文来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationSource {
    Generative,
    Phrase,
    Identity,
}

/// 一条解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub source: TranslationSource,
}

impl Translation {
    pub fn new(text: impl Into<String>, source: TranslationSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    pub fn identity(text: &str) -> Self {
        Self::new(text, TranslationSource::Identity)
    }

    /// 是否真的翻译了（非原样返回）
    pub fn is_translated(&self) -> bool {
        self.source != TranslationSource::Identity
    }
}

/// 缓存统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TranslationStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub provider_calls: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    text: String,
    language: String,
}

impl CacheKey {
    fn new(text: &str, language: &str) -> Self {
        Self {
            text: text.to_string(),
            language: language.trim().to_string(),
        }
    }
}

type InFlight = Arc<OnceCell<Translation>>;

/// Translation Resolver
pub struct TranslationResolver {
    generative: Option<Arc<dyn GenerativeTextPort>>,
    /// generative -> phrase -> identity
    single: ProviderChain<TranslationInput, Translation>,
    /// 批量失败后逐行使用: phrase -> identity
    fallback: ProviderChain<TranslationInput, Translation>,
    cache: DashMap<CacheKey, Translation>,
    in_flight: DashMap<CacheKey, InFlight>,
    hits: AtomicU64,
    misses: AtomicU64,
    provider_calls: Arc<AtomicU64>,
}

impl TranslationResolver {
    pub fn new(
        generative: Option<Arc<dyn GenerativeTextPort>>,
        phrase: Option<Arc<dyn PhraseTranslatorPort>>,
    ) -> Self {
        let provider_calls = Arc::new(AtomicU64::new(0));

        let generative_strategy = generative.as_ref().map(|port| GenerativeStrategy {
            port: Arc::clone(port),
            provider_calls: Arc::clone(&provider_calls),
        });
        let phrase_strategy = |port: &Arc<dyn PhraseTranslatorPort>| PhraseStrategy {
            port: Arc::clone(port),
            provider_calls: Arc::clone(&provider_calls),
        };

        let single = ProviderChain::new("translation")
            .with_optional(generative_strategy)
            .with_optional(phrase.as_ref().map(phrase_strategy))
            .with(IdentityStrategy);
        let fallback = ProviderChain::new("translation-fallback")
            .with_optional(phrase.as_ref().map(phrase_strategy))
            .with(IdentityStrategy);

        tracing::info!(providers = ?single.names(), "Translation resolver initialized");

        Self {
            generative,
            single,
            fallback,
            cache: DashMap::new(),
            in_flight: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            provider_calls,
        }
    }

    /// 解析单条文本；总是返回一个值（最坏情况为原文）
    pub async fn resolve(&self, text: &str, language: &str) -> Translation {
        if text.trim().is_empty() {
            return Translation::identity(text);
        }

        let key = CacheKey::new(text, language);
        if let Some(hit) = self.lookup(&key) {
            return hit;
        }

        let input = TranslationInput {
            text: text.to_string(),
            language: language.trim().to_string(),
        };
        self.settle(key, || async move { self.run_chain(&self.single, &input).await })
            .await
    }

    /// 批量解析，输出与输入逐行对齐
    pub async fn resolve_lines(&self, lines: &[String], language: &str) -> Vec<String> {
        self.resolve_all(lines, language)
            .await
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    /// 原文 -> 译文映射，只包含真正翻译了的行
    pub async fn translation_map(&self, lines: &[String], language: &str) -> HashMap<String, String> {
        let resolved = self.resolve_all(lines, language).await;
        lines
            .iter()
            .zip(resolved)
            .filter(|(_, t)| t.is_translated())
            .map(|(line, t)| (line.clone(), t.text))
            .collect()
    }

    pub fn stats(&self) -> TranslationStats {
        TranslationStats {
            entries: self.cache.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            provider_calls: self.provider_calls.load(Ordering::Relaxed),
        }
    }

    async fn resolve_all(&self, lines: &[String], language: &str) -> Vec<Translation> {
        let mut seen = HashSet::new();
        let mut resolved: HashMap<&str, Translation> = HashMap::new();
        let mut pending: Vec<&str> = Vec::new();

        for line in lines {
            if line.trim().is_empty() || !seen.insert(line.as_str()) {
                continue;
            }
            match self.lookup(&CacheKey::new(line, language)) {
                Some(hit) => {
                    resolved.insert(line.as_str(), hit);
                }
                None => pending.push(line.as_str()),
            }
        }

        if !pending.is_empty() {
            // 一次 prompt 覆盖所有未缓存的行；只在有行真正需要时才会被 poll
            let batch = self.generate_batch(&pending, language).shared();

            let settled = join_all(pending.iter().enumerate().map(|(i, line)| {
                let batch = batch.clone();
                let key = CacheKey::new(line, language);
                async move {
                    let translation = self
                        .settle(key, || async move {
                            match batch.await {
                                Some(replies) => match replies.get(i) {
                                    Some(reply) => {
                                        Translation::new(reply.as_str(), TranslationSource::Generative)
                                    }
                                    None => Translation::identity(line),
                                },
                                None => {
                                    let input = TranslationInput {
                                        text: line.to_string(),
                                        language: language.trim().to_string(),
                                    };
                                    self.run_chain(&self.fallback, &input).await
                                }
                            }
                        })
                        .await;
                    (*line, translation)
                }
            }))
            .await;

            resolved.extend(settled);
        }

        lines
            .iter()
            .map(|line| {
                resolved
                    .get(line.as_str())
                    .cloned()
                    .unwrap_or_else(|| Translation::identity(line))
            })
            .collect()
    }

    /// 一次生成式调用翻译多行；不可用或失败时返回 `None`
    async fn generate_batch(&self, lines: &[&str], language: &str) -> Option<Arc<Vec<String>>> {
        let port = self.generative.as_ref()?;
        let sources: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        let prompt = prompts::song_translation(&sources, language.trim());

        self.provider_calls.fetch_add(1, Ordering::Relaxed);
        match port.generate(&prompt).await {
            Ok(reply) => {
                let replies = prompts::translation_lines(&reply, &sources);
                if replies.is_empty() {
                    tracing::warn!(lines = sources.len(), "Generative batch returned nothing");
                    return None;
                }
                if replies.len() < sources.len() {
                    tracing::warn!(
                        expected = sources.len(),
                        received = replies.len(),
                        "Generative batch reply is short, padding with original lines"
                    );
                }
                Some(Arc::new(replies))
            }
            Err(e) => {
                tracing::warn!(error = %e, lines = sources.len(), "Generative batch translation failed");
                None
            }
        }
    }

    async fn run_chain(
        &self,
        chain: &ProviderChain<TranslationInput, Translation>,
        input: &TranslationInput,
    ) -> Translation {
        chain
            .run(input)
            .await
            .map(|resolved| resolved.value)
            .unwrap_or_else(|| Translation::identity(&input.text))
    }

    fn lookup(&self, key: &CacheKey) -> Option<Translation> {
        let hit = self.cache.get(key).map(|entry| entry.value().clone());
        match hit {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        hit
    }

    /// 对一个 key 只运行一次 `init`，结果写入缓存（先写者胜）
    async fn settle<F, Fut>(&self, key: CacheKey, init: F) -> Translation
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Translation>,
    {
        let cell = self
            .in_flight
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        let cached_key = &key;
        let value = cell
            .get_or_init(|| async move {
                // 等待期间别的调用者可能已经写入缓存
                if let Some(hit) = self.cache.get(cached_key).map(|e| e.value().clone()) {
                    return hit;
                }
                init().await
            })
            .await
            .clone();

        let stored = self
            .cache
            .entry(key.clone())
            .or_insert(value)
            .value()
            .clone();
        self.in_flight.remove_if(&key, |_, current| Arc::ptr_eq(current, &cell));

        stored
    }
}
