//! 歌词分页（可选双语交错）

use std::collections::HashMap;

use super::SlideGroup;

/// 单语模式每页行数
pub const MONOLINGUAL_LINES_PER_SLIDE: usize = 4;

/// 双语模式每页原文行数（每行后面跟一行译文）
pub const BILINGUAL_LINES_PER_SLIDE: usize = 2;

/// 把歌词行切成固定大小的窗口，每个窗口一页
///
/// 双语模式下每行原文后紧跟其译文（来自 `translations`）。
/// 查不到译文或译文与原文相同的行只输出原文。
/// 一行永远不会被拆到两页。
pub fn paginate_lines(
    lines: &[String],
    chunk_size: usize,
    bilingual: bool,
    translations: &HashMap<String, String>,
) -> Vec<SlideGroup> {
    lines
        .chunks(chunk_size.max(1))
        .map(|window| {
            if !bilingual {
                return SlideGroup::plain(window.to_vec());
            }

            let mut body: Vec<&str> = Vec::with_capacity(window.len() * 2);
            for line in window {
                body.push(line);
                if let Some(translated) = translations.get(line) {
                    if translated.trim() != line.trim() && !translated.trim().is_empty() {
                        body.push(translated);
                    }
                }
            }
            SlideGroup::new(window.to_vec(), body.join("\n"))
        })
        .collect()
}
