//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（生成式服务、翻译、经文、渲染、素材、Repository）
//! - chain: 有序兜底策略
//! - translation: 带缓存的翻译解析
//! - pipeline: 段落切分、经文检索、幻灯片组装
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod chain;
pub mod commands;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod prompts;
pub mod queries;
pub mod translation;

#[cfg(test)]
pub(crate) mod fakes;

// Re-exports
pub use commands::{
    handlers::{
        CreateSongHandler, DeleteSongHandler, GenerateDeckHandler, GenerateDeckResponse,
        UpdateSongHandler,
    },
    CreateSong, DeleteSong, GenerateDeck, UpdateSong,
};

pub use error::ApplicationError;

pub use pipeline::{CompositionSettings, DeckComposer, PassageService, SectionSegmenter};

pub use ports::{
    AssetCatalogPort, AssetError, DeckMetadata, DeckRendererPort, GenerativeError,
    GenerativeTextPort, PhraseTranslatorPort, RenderError, RenderedDeck, RepositoryError,
    ScriptureError, ScriptureSourcePort, SongRecord, SongRepositoryPort, TranslateError,
};

pub use queries::{
    handlers::{
        GetPassageHandler, GetSongHandler, ListSongsHandler, PassageResponse, SectionView,
        SongResponse,
    },
    GetPassage, GetSong, ListSongs,
};

pub use translation::{Translation, TranslationResolver, TranslationSource, TranslationStats};
