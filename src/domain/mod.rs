//! Domain Layer - 领域层
//!
//! 纯逻辑，不做 IO:
//! - Song Context: 歌曲与段落
//! - Service Context: 一次崇拜的请求
//! - 文本分割、分页、经文与语言查找表、幻灯片描述

pub mod language;
pub mod pagination;
pub mod scripture;
pub mod service;
pub mod slide;
pub mod song;
pub mod text_segmenter;

pub use pagination::{paginate_lines, paginate_passage, PassageLimits, SlideGroup};
pub use slide::{FontHints, FontPreset, SlideDescriptor, SlideKind, TemplateSize};
pub use song::{Section, Song};
pub use text_segmenter::{clean_lyrics, single_section, split_by_markers, TextKind};
