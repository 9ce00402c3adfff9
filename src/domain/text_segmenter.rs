//! 文本分割器
//!
//! 把歌词/经文原文切成带标签的段落。这里只包含确定性的部分：
//! - `[Label]` 结构标记切分
//! - 歌词清洗（去掉歌词站点附带的页眉页脚）
//! - 兜底的单段落
//!
//! 生成式兜底（无标记时请模型给出结构）在 application 层的 provider chain 里完成。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::song::Section;

/// 段落标记: `[Verse 1]`、`[Chorus]` 等（不跨行）
static SECTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\[\]\r\n]+)\]").expect("valid marker regex"));

static CONTRIBUTORS_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^\s*\d+\s+Contributors.*?Lyrics").expect("valid header regex"));

static MIGHT_ALSO_LIKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)You might also like").expect("valid filler regex"));

static EMBED_FOOTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d*Embed$").expect("valid footer regex"));

/// 第一个标记之前的文本使用的标签
pub const INTRO_LABEL: &str = "Intro";

/// 分割对象的种类，决定兜底段落的标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Lyrics,
    Content,
}

impl TextKind {
    /// 兜底段落标签
    pub fn fallback_label(&self) -> &'static str {
        match self {
            TextKind::Lyrics => "Lyrics",
            TextKind::Content => "Content",
        }
    }
}

/// 按 `[Label]` 标记切分
///
/// - 没有任何标记时返回 `None`（交给兜底策略）
/// - 第一个标记之前的非空文本成为 `Intro` 段
/// - 内容为空的段落被丢弃
pub fn split_by_markers(text: &str) -> Option<Vec<Section>> {
    let markers: Vec<_> = SECTION_MARKER.captures_iter(text).collect();
    if markers.is_empty() {
        return None;
    }

    let mut sections = Vec::with_capacity(markers.len() + 1);

    let first_start = markers[0].get(0).map(|m| m.start()).unwrap_or(0);
    push_section(&mut sections, INTRO_LABEL, &text[..first_start]);

    for (i, caps) in markers.iter().enumerate() {
        let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let end = markers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());

        push_section(&mut sections, label.as_str(), &text[whole.end()..end]);
    }

    Some(sections)
}

fn push_section(sections: &mut Vec<Section>, label: &str, body: &str) {
    let section = Section::new(label, body.trim());
    if !section.is_empty() {
        sections.push(section);
    }
}

/// 兜底：整段文本作为单个段落；空文本返回空
pub fn single_section(text: &str, kind: TextKind) -> Vec<Section> {
    let section = Section::new(kind.fallback_label(), text.trim());
    if section.is_empty() {
        Vec::new()
    } else {
        vec![section]
    }
}

/// 清洗歌词站点附带的噪声
///
/// 去掉 `"123 Contributors ... Lyrics"` 页眉、`You might also like`、
/// 以及末尾的 `"123Embed"`，保留结构性的换行。
pub fn clean_lyrics(lyrics: &str) -> String {
    let text = CONTRIBUTORS_HEADER.replace(lyrics, "");
    let text = MIGHT_ALSO_LIKE.replace_all(&text, "");
    let text = EMBED_FOOTER.replace(text.trim(), "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_markers_returns_none() {
        assert!(split_by_markers("just some words\nand more").is_none());
    }

    #[test]
    fn test_one_section_per_marker() {
        let text = "[Verse 1]\nAmazing grace\nhow sweet\n\n[Chorus]\nMy chains are gone\n[Verse 2]\nTwas grace";
        let sections = split_by_markers(text).unwrap();

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].label(), "Verse 1");
        assert_eq!(sections[0].lines(), &["Amazing grace", "how sweet"]);
        assert_eq!(sections[1].label(), "Chorus");
        assert_eq!(sections[2].label(), "Verse 2");
        assert!(sections.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_text_before_first_marker_becomes_intro() {
        let text = "  Opening line  \n[Chorus]\nSing";
        let sections = split_by_markers(text).unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].label(), INTRO_LABEL);
        assert_eq!(sections[0].lines(), &["Opening line"]);
        assert_eq!(sections[1].label(), "Chorus");
    }

    #[test]
    fn test_empty_marker_region_dropped() {
        let text = "[Intro]\n\n[Verse]\nLine one\n[Outro]   \n";
        let sections = split_by_markers(text).unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].label(), "Verse");
    }

    #[test]
    fn test_markers_only_yields_empty() {
        let sections = split_by_markers("[Verse]\n[Chorus]").unwrap();
        assert!(sections.is_empty());
    }

    #[test]
    fn test_single_section_labels() {
        let lyrics = single_section("a\nb", TextKind::Lyrics);
        assert_eq!(lyrics.len(), 1);
        assert_eq!(lyrics[0].label(), "Lyrics");

        let content = single_section("a", TextKind::Content);
        assert_eq!(content[0].label(), "Content");

        assert!(single_section("  \n ", TextKind::Lyrics).is_empty());
    }

    #[test]
    fn test_clean_lyrics() {
        let raw = "12 Contributors Easy To Love Lyrics[Verse 1]\nLine one\nYou might also like\nLine two\n34Embed";
        let cleaned = clean_lyrics(raw);

        assert!(cleaned.starts_with("[Verse 1]"));
        assert!(!cleaned.contains("You might also like"));
        assert!(cleaned.ends_with("Line two"));
    }

    #[test]
    fn test_clean_lyrics_leaves_plain_text() {
        assert_eq!(clean_lyrics("  Hello\nWorld  "), "Hello\nWorld");
    }
}
