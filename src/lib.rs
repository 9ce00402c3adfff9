//! ServiceDeck - 主日崇拜幻灯片生成服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Song Context: 歌曲与段落
//! - Service Context: 崇拜请求、日期格式
//! - 文本分段、分页、经文与语言查找表、幻灯片描述
//!
//! 应用层 (application/):
//! - Ports: 端口定义（GenerativeText, PhraseTranslator, ScriptureSource, DeckRenderer,
//!   AssetCatalog, SongRepository）
//! - Translation: 带缓存和 in-flight 去重的翻译解析
//! - Pipeline: 分段、经文、整套幻灯片组装
//! - Commands / Queries: CQRS 处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Persistence: SQLite 歌曲库 + 种子导入
//! - Adapters: 生成式文本、机器翻译、经文 API、JSON 渲染、图片素材目录

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
