//! Section Segmenter
//!
//! 结构标记 -> 生成式结构兜底 -> 单段落兜底。非空输入永远至少得到一个段落。

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::application::chain::{Attempt, ProviderChain, Strategy};
use crate::application::ports::GenerativeTextPort;
use crate::application::prompts;
use crate::domain::{clean_lyrics, single_section, split_by_markers, Section, TextKind};

struct SegmentInput {
    text: String,
    kind: TextKind,
}

struct MarkerStrategy;

#[async_trait]
impl Strategy<SegmentInput, Vec<Section>> for MarkerStrategy {
    fn name(&self) -> &'static str {
        "markers"
    }

    async fn attempt(&self, input: &SegmentInput) -> Attempt<Vec<Section>> {
        match split_by_markers(&input.text) {
            Some(sections) if !sections.is_empty() => Attempt::Success(sections),
            _ => Attempt::Skip,
        }
    }
}

/// 模型返回的一个段落
#[derive(Debug, Deserialize)]
struct SectionReply {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    content: String,
}

struct GenerativeStructureStrategy {
    port: Arc<dyn GenerativeTextPort>,
}

#[async_trait]
impl Strategy<SegmentInput, Vec<Section>> for GenerativeStructureStrategy {
    fn name(&self) -> &'static str {
        "generative"
    }

    async fn attempt(&self, input: &SegmentInput) -> Attempt<Vec<Section>> {
        let kind = match input.kind {
            TextKind::Lyrics => "song lyrics",
            TextKind::Content => "text",
        };
        let prompt = prompts::section_structure(&input.text, kind);

        match self.port.generate(&prompt).await {
            Ok(reply) => {
                let sections = parse_section_reply(&reply);
                if sections.is_empty() {
                    tracing::warn!("Generative segmentation returned no usable sections");
                }
                Attempt::from_option(Some(sections).filter(|s| !s.is_empty()))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Generative segmentation failed");
                Attempt::Skip
            }
        }
    }
}

struct CatchAllStrategy;

#[async_trait]
impl Strategy<SegmentInput, Vec<Section>> for CatchAllStrategy {
    fn name(&self) -> &'static str {
        "catch-all"
    }

    async fn attempt(&self, input: &SegmentInput) -> Attempt<Vec<Section>> {
        let sections = single_section(&input.text, input.kind);
        Attempt::from_option(Some(sections).filter(|s| !s.is_empty()))
    }
}

/// 解析 JSON 数组形式的段落回复
///
/// 容忍代码块围栏和数组前后的说明文字；空标签补成 `Verse {n}`，空内容丢弃。
fn parse_section_reply(reply: &str) -> Vec<Section> {
    let body = prompts::strip_code_fences(reply);
    let json = match (body.find('['), body.rfind(']')) {
        (Some(start), Some(end)) if start < end => &body[start..=end],
        _ => return Vec::new(),
    };

    let replies: Vec<SectionReply> = match serde_json::from_str(json) {
        Ok(replies) => replies,
        Err(e) => {
            tracing::debug!(error = %e, "Section reply is not valid JSON");
            return Vec::new();
        }
    };

    replies
        .into_iter()
        .enumerate()
        .filter_map(|(i, reply)| {
            let label = reply
                .label
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| format!("Verse {}", i + 1));
            let section = Section::new(label, &reply.content);
            (!section.is_empty()).then_some(section)
        })
        .collect()
}

/// 段落切分服务
pub struct SectionSegmenter {
    chain: ProviderChain<SegmentInput, Vec<Section>>,
}

impl SectionSegmenter {
    pub fn new(generative: Option<Arc<dyn GenerativeTextPort>>) -> Self {
        let chain = ProviderChain::new("segmentation")
            .with(MarkerStrategy)
            .with_optional(generative.map(|port| GenerativeStructureStrategy { port }))
            .with(CatchAllStrategy);
        Self { chain }
    }

    /// 切分文本；歌词先做清洗。空输入返回空。
    pub async fn segment(&self, text: &str, kind: TextKind) -> Vec<Section> {
        let text = match kind {
            TextKind::Lyrics => clean_lyrics(text),
            TextKind::Content => text.trim().to_string(),
        };
        if text.is_empty() {
            return Vec::new();
        }

        let input = SegmentInput { text, kind };
        match self.chain.run(&input).await {
            Some(resolved) => {
                tracing::debug!(
                    provider = resolved.provider,
                    sections = resolved.value.len(),
                    "Text segmented"
                );
                resolved.value
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::FakeGenerative;

    #[tokio::test]
    async fn test_markers_skip_generative() {
        let generative = Arc::new(FakeGenerative::fixed("[]"));
        let segmenter = SectionSegmenter::new(Some(generative.clone() as Arc<dyn GenerativeTextPort>));

        let sections = segmenter
            .segment("[Verse 1]\nLine one\n[Chorus]\nLine two", TextKind::Lyrics)
            .await;

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].label(), "Chorus");
        assert_eq!(generative.calls(), 0);
    }

    #[tokio::test]
    async fn test_generative_structure_used_without_markers() {
        let reply = "```json\n[{\"label\": \"Verse 1\", \"content\": \"a\\nb\"}, {\"label\": \"\", \"content\": \"c\"}, {\"label\": \"Empty\", \"content\": \"  \"}]\n```";
        let generative = Arc::new(FakeGenerative::fixed(reply));
        let segmenter = SectionSegmenter::new(Some(generative.clone() as Arc<dyn GenerativeTextPort>));

        let sections = segmenter.segment("a\nb\nc", TextKind::Lyrics).await;

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].lines(), &["a", "b"]);
        assert_eq!(sections[1].label(), "Verse 2");
        assert_eq!(generative.calls(), 1);
    }

    #[tokio::test]
    async fn test_unusable_reply_falls_back_to_single_section() {
        let generative = Arc::new(FakeGenerative::fixed("Sorry, I cannot help with that."));
        let segmenter = SectionSegmenter::new(Some(generative as Arc<dyn GenerativeTextPort>));

        let sections = segmenter.segment("line one\nline two", TextKind::Lyrics).await;

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].label(), "Lyrics");
        assert_eq!(sections[0].lines().len(), 2);
    }

    #[tokio::test]
    async fn test_generative_failure_and_content_label() {
        let segmenter = SectionSegmenter::new(Some(Arc::new(FakeGenerative::failing()) as Arc<dyn GenerativeTextPort>));

        let sections = segmenter.segment("Welcome everyone", TextKind::Content).await;

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].label(), "Content");
    }

    #[tokio::test]
    async fn test_markers_only_falls_through() {
        let segmenter = SectionSegmenter::new(None);
        let sections = segmenter.segment("[Verse]\n[Chorus]", TextKind::Lyrics).await;
        assert_eq!(sections.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let segmenter = SectionSegmenter::new(None);
        assert!(segmenter.segment("   \n", TextKind::Lyrics).await.is_empty());
    }

    #[tokio::test]
    async fn test_lyrics_cleaned_before_split() {
        let segmenter = SectionSegmenter::new(None);
        let sections = segmenter
            .segment("3 Contributors Song Lyrics[Verse]\nHello\n12Embed", TextKind::Lyrics)
            .await;

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].label(), "Verse");
        assert_eq!(sections[0].lines(), &["Hello"]);
    }
}
