//! Song Context - 歌曲限界上下文
//!
//! 职责:
//! - 歌曲与段落（Verse / Chorus ...）实体
//! - 段落内容按行拆分

mod entities;

pub use entities::{Section, Song};
