//! Pagination - 把文本单元切成一页页幻灯片
//!
//! - passage: 经文按节数 + 换行数分组
//! - slides: 歌词按固定窗口分组，可选双语交错

mod group;
mod passage;
mod slides;

pub use group::SlideGroup;
pub use passage::{
    paginate_passage, PassageLimits, DEFAULT_MAX_LINES_PER_GROUP, DEFAULT_MAX_VERSES_PER_GROUP,
};
pub use slides::{
    paginate_lines, BILINGUAL_LINES_PER_SLIDE, MONOLINGUAL_LINES_PER_SLIDE,
};
