//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod asset_catalog;
mod deck_renderer;
mod generative_text;
mod phrase_translator;
mod repositories;
mod scripture_source;

pub use asset_catalog::{AssetCatalogPort, AssetError};
pub use deck_renderer::{DeckMetadata, DeckRendererPort, RenderError, RenderedDeck};
pub use generative_text::{GenerativeError, GenerativeTextPort};
pub use phrase_translator::{PhraseTranslatorPort, TranslateError};
pub use repositories::{RepositoryError, SongRecord, SongRepositoryPort};
pub use scripture_source::{ScriptureError, ScriptureSourcePort};
