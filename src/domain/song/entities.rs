//! Song Context - Entities

use serde::{Deserialize, Serialize};

/// 歌曲段落
///
/// 不变量: `lines` 中每一行都已 trim 且非空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    label: String,
    lines: Vec<String>,
}

impl Section {
    /// 从段落原文创建（按行拆分，丢弃空行）
    pub fn new(label: impl Into<String>, content: &str) -> Self {
        Self {
            label: label.into().trim().to_string(),
            lines: split_lines(content),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// 段落原文（行之间以换行连接）
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// 歌曲（只读输入）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    pub ccli_number: Option<String>,
    pub sections: Vec<Section>,
}

impl Song {
    /// 所有段落的行，按出现顺序
    pub fn all_lines(&self) -> impl Iterator<Item = &String> {
        self.sections.iter().flat_map(|s| s.lines().iter())
    }

    /// 标题幻灯片副标题
    pub fn ccli_caption(&self) -> Option<String> {
        self.ccli_number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| format!("CCLI Licence No. {}", n))
    }
}

/// 按行拆分（支持 \n 和 \r\n），trim 并过滤空行
pub(crate) fn split_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
