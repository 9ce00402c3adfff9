//! 单条翻译的兜底策略

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::resolver::{Translation, TranslationSource};
use crate::application::chain::{Attempt, Strategy};
use crate::application::ports::{GenerativeTextPort, PhraseTranslatorPort};
use crate::application::prompts;
use crate::domain::language::language_code_or_default;

/// 单条翻译的输入
#[derive(Debug, Clone)]
pub(crate) struct TranslationInput {
    pub text: String,
    pub language: String,
}

/// 生成式翻译
pub(crate) struct GenerativeStrategy {
    pub port: Arc<dyn GenerativeTextPort>,
    pub provider_calls: Arc<AtomicU64>,
}

#[async_trait]
impl Strategy<TranslationInput, Translation> for GenerativeStrategy {
    fn name(&self) -> &'static str {
        "generative"
    }

    async fn attempt(&self, input: &TranslationInput) -> Attempt<Translation> {
        self.provider_calls.fetch_add(1, Ordering::Relaxed);
        let prompt = prompts::phrase_translation(&input.text, &input.language);

        match self.port.generate(&prompt).await {
            Ok(reply) => {
                let text = prompts::strip_code_fences(&reply);
                if text.is_empty() {
                    Attempt::Skip
                } else {
                    Attempt::Success(Translation::new(text, TranslationSource::Generative))
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, language = %input.language, "Generative translation failed");
                Attempt::Skip
            }
        }
    }
}

/// 确定性短语翻译
pub(crate) struct PhraseStrategy {
    pub port: Arc<dyn PhraseTranslatorPort>,
    pub provider_calls: Arc<AtomicU64>,
}

#[async_trait]
impl Strategy<TranslationInput, Translation> for PhraseStrategy {
    fn name(&self) -> &'static str {
        "phrase"
    }

    async fn attempt(&self, input: &TranslationInput) -> Attempt<Translation> {
        self.provider_calls.fetch_add(1, Ordering::Relaxed);
        let code = language_code_or_default(&input.language);

        match self.port.translate(&input.text, code).await {
            Ok(text) if !text.trim().is_empty() => {
                Attempt::Success(Translation::new(text.trim(), TranslationSource::Phrase))
            }
            Ok(_) => Attempt::Skip,
            Err(e) => {
                tracing::warn!(error = %e, code, "Phrase translation failed");
                Attempt::Skip
            }
        }
    }
}

/// 原文原样返回，链尾兜底
pub(crate) struct IdentityStrategy;

#[async_trait]
impl Strategy<TranslationInput, Translation> for IdentityStrategy {
    fn name(&self) -> &'static str {
        "identity"
    }

    async fn attempt(&self, input: &TranslationInput) -> Attempt<Translation> {
        Attempt::Success(Translation::identity(&input.text))
    }
}
