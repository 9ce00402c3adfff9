//! 组装流水线
//!
//! - segmenter: 原文 -> 段落
//! - passages: 经文检索 + 分页
//! - composer: 请求 -> 有序幻灯片描述

mod composer;
mod passages;
mod segmenter;

pub use composer::{CompositionSettings, DeckComposer};
pub use passages::PassageService;
pub use segmenter::SectionSegmenter;
