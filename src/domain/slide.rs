//! Slide - 交给渲染器的幻灯片描述
//!
//! 只携带内容与字号提示，不含任何版式计算。

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 幻灯片种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlideKind {
    Title,
    Body,
    TitleAndBody,
    ImageRight,
}

/// 字号提示（pt）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontHints {
    pub primary_pt: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_pt: Option<f32>,
}

impl FontHints {
    pub fn new(primary_pt: f32) -> Self {
        Self {
            primary_pt,
            secondary_pt: None,
        }
    }

    pub fn with_secondary(primary_pt: f32, secondary_pt: f32) -> Self {
        Self {
            primary_pt,
            secondary_pt: Some(secondary_pt),
        }
    }
}

/// 幻灯片描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDescriptor {
    pub kind: SlideKind,
    pub primary_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
    pub font: FontHints,
}

impl SlideDescriptor {
    pub fn title(text: impl Into<String>, font: FontHints) -> Self {
        Self {
            kind: SlideKind::Title,
            primary_text: text.into(),
            secondary_text: None,
            image: None,
            font,
        }
    }

    /// 带副标题的标题页（副标题为空时省略）
    pub fn title_with_subtitle(
        text: impl Into<String>,
        subtitle: Option<String>,
        font: FontHints,
    ) -> Self {
        Self {
            secondary_text: subtitle.filter(|s| !s.trim().is_empty()),
            ..Self::title(text, font)
        }
    }

    pub fn body(text: impl Into<String>, font: FontHints) -> Self {
        Self {
            kind: SlideKind::Body,
            primary_text: text.into(),
            secondary_text: None,
            image: None,
            font,
        }
    }

    /// 标题 + 正文；`primary_text` 为标题，`secondary_text` 为正文
    pub fn title_and_body(
        title: impl Into<String>,
        body: impl Into<String>,
        font: FontHints,
    ) -> Self {
        Self {
            kind: SlideKind::TitleAndBody,
            primary_text: title.into(),
            secondary_text: Some(body.into()),
            image: None,
            font,
        }
    }

    pub fn image_right(title: impl Into<String>, image: PathBuf, font: FontHints) -> Self {
        Self {
            kind: SlideKind::ImageRight,
            primary_text: title.into(),
            secondary_text: None,
            image: Some(image),
            font,
        }
    }

    /// 占位页，组装结束前会被回填
    pub(crate) fn placeholder() -> Self {
        Self::title(String::new(), FontHints::new(0.0))
    }
}

/// 模板尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TemplateSize {
    /// 从模板名解析尺寸；名称中包含 small/large 即可，其余情况为 medium
    pub fn from_hint(hint: Option<&str>) -> Self {
        let hint = hint.unwrap_or_default().to_lowercase();
        if hint.contains("small") {
            TemplateSize::Small
        } else if hint.contains("large") {
            TemplateSize::Large
        } else {
            TemplateSize::Medium
        }
    }

    pub fn preset(&self) -> FontPreset {
        match self {
            TemplateSize::Small => FontPreset {
                title: 70.0,
                song: 53.0,
                bible: 43.0,
                offering: 32.0,
            },
            TemplateSize::Medium => FontPreset {
                title: 50.0,
                song: 33.0,
                bible: 32.0,
                offering: 23.0,
            },
            TemplateSize::Large => FontPreset {
                title: 40.0,
                song: 27.0,
                bible: 23.0,
                offering: 16.0,
            },
        }
    }
}

/// 一套模板字号
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontPreset {
    pub title: f32,
    pub song: f32,
    pub bible: f32,
    pub offering: f32,
}

impl FontPreset {
    /// 标题配图页左侧文字比标题小 10pt
    pub fn image_title(&self) -> f32 {
        self.title - 10.0
    }

    /// 双语歌词页缩小到 80%
    pub fn bilingual_song(&self) -> f32 {
        self.song * 0.8
    }
}

/// 版权页字号
pub const COPYRIGHT_FONT_PT: f32 = 10.0;

/// 标题页副标题字号
pub const SUBTITLE_FONT_PT: f32 = 8.0;
