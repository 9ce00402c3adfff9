//! 测试用的 fake 端口实现
//!
//! 每个 fake 都带调用计数器，供断言调用次数。

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{
    AssetCatalogPort, AssetError, DeckMetadata, DeckRendererPort, GenerativeError,
    GenerativeTextPort, PhraseTranslatorPort, RenderError, RenderedDeck, RepositoryError,
    ScriptureError, ScriptureSourcePort, SongRecord, SongRepositoryPort, TranslateError,
};
use crate::domain::{Section, SlideDescriptor};

// ============================================================================
// Generative
// ============================================================================

type ReplyFn = dyn Fn(&str) -> Result<String, GenerativeError> + Send + Sync;

/// 按 prompt 计算回复的生成式服务
pub struct FakeGenerative {
    reply: Box<ReplyFn>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerative {
    pub fn new(reply: impl Fn(&str) -> Result<String, GenerativeError> + Send + Sync + 'static) -> Self {
        Self {
            reply: Box::new(reply),
            delay: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// 总是返回同一段文本
    pub fn fixed(reply: &str) -> Self {
        let reply = reply.to_string();
        Self::new(move |_| Ok(reply.clone()))
    }

    /// 总是失败
    pub fn failing() -> Self {
        Self::new(|_| Err(GenerativeError::ServiceError("unavailable".to_string())))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeTextPort for FakeGenerative {
    async fn generate(&self, prompt: &str) -> Result<String, GenerativeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.reply)(prompt)
    }
}

// ============================================================================
// Phrase translator
// ============================================================================

/// 把文本翻译成 `"{code}:{text}"`
#[derive(Default)]
pub struct FakePhrase {
    failing: bool,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakePhrase {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PhraseTranslatorPort for FakePhrase {
    async fn translate(&self, text: &str, language_code: &str) -> Result<String, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing {
            return Err(TranslateError::NetworkError("connection refused".to_string()));
        }
        Ok(format!("{}:{}", language_code, text))
    }
}

// ============================================================================
// Scripture
// ============================================================================

/// 固定经文；`verses` 为空时返回 NotFound
#[derive(Default)]
pub struct FakeScripture {
    verses: Vec<String>,
    calls: AtomicUsize,
}

impl FakeScripture {
    pub fn with_verses(verses: &[&str]) -> Self {
        Self {
            verses: verses.iter().map(|v| v.to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScriptureSourcePort for FakeScripture {
    async fn fetch(&self, reference: &str, _version: &str) -> Result<Vec<String>, ScriptureError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.verses.is_empty() {
            return Err(ScriptureError::NotFound(reference.to_string()));
        }
        Ok(self.verses.clone())
    }
}

// ============================================================================
// Renderer / assets
// ============================================================================

/// 记录最后一次渲染的幻灯片
#[derive(Default)]
pub struct FakeRenderer {
    pub rendered: Mutex<Vec<SlideDescriptor>>,
}

#[async_trait]
impl DeckRendererPort for FakeRenderer {
    async fn render(
        &self,
        _metadata: &DeckMetadata,
        slides: &[SlideDescriptor],
    ) -> Result<RenderedDeck, RenderError> {
        *self.rendered.lock().unwrap() = slides.to_vec();
        Ok(RenderedDeck {
            bytes: format!("{} slides", slides.len()).into_bytes(),
            content_type: "text/plain",
            file_extension: "txt",
        })
    }
}

/// 每个分类都返回 `{category}.png`，或者一律没有素材
pub struct FakeAssets {
    available: bool,
}

impl FakeAssets {
    pub fn available() -> Self {
        Self { available: true }
    }

    pub fn empty() -> Self {
        Self { available: false }
    }
}

#[async_trait]
impl AssetCatalogPort for FakeAssets {
    async fn pick_image(&self, category: &str) -> Result<Option<PathBuf>, AssetError> {
        if self.available {
            Ok(Some(PathBuf::from(format!("{}.png", category))))
        } else {
            Ok(None)
        }
    }
}

// ============================================================================
// Song repository
// ============================================================================

#[derive(Default)]
pub struct InMemorySongRepo {
    songs: DashMap<String, SongRecord>,
}

impl InMemorySongRepo {
    pub fn with_song(id: &str, title: &str, sections: Vec<Section>) -> Self {
        let repo = Self::default();
        let now = Utc::now();
        repo.songs.insert(
            id.to_string(),
            SongRecord {
                id: id.to_string(),
                title: title.to_string(),
                artist: None,
                ccli_number: None,
                sections,
                created_at: now,
                updated_at: now,
            },
        );
        repo
    }
}

#[async_trait]
impl SongRepositoryPort for InMemorySongRepo {
    async fn save(&self, song: &SongRecord) -> Result<(), RepositoryError> {
        self.songs.insert(song.id.clone(), song.clone());
        Ok(())
    }

    async fn insert(&self, song: &SongRecord) -> Result<(), RepositoryError> {
        match self.songs.entry(song.id.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::Duplicate(song.id.clone())),
            Entry::Vacant(slot) => {
                slot.insert(song.clone());
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<SongRecord>, RepositoryError> {
        Ok(self.songs.get(id).map(|s| s.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<SongRecord>, RepositoryError> {
        let mut songs: Vec<SongRecord> = self.songs.iter().map(|s| s.value().clone()).collect();
        songs.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(songs)
    }

    async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        Ok(self.songs.remove(id).is_some())
    }
}
