//! Service Context - 请求值对象

use serde::{Deserialize, Serialize};

use crate::domain::language::DEFAULT_LANGUAGE;
use crate::domain::scripture::DEFAULT_VERSION;
use crate::domain::song::Section;

fn default_church_name() -> String {
    "Blacktown Chinese Christian Church".to_string()
}

fn default_service_name() -> String {
    "English Service".to_string()
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_mingle_text() -> String {
    "Mingle time!".to_string()
}

fn default_template_name() -> Option<String> {
    Some("medium".to_string())
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// 经文朗读
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub reference: String,
    #[serde(default = "default_version")]
    pub version: String,
}

/// 请求中的段落
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInput {
    #[serde(default)]
    pub label: String,
    pub content: String,
}

/// 请求段落 -> 领域段落；空标签补成 `Verse {n}`，空内容丢弃
pub fn sections_from_inputs(inputs: &[SectionInput]) -> Vec<Section> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let label = if s.label.trim().is_empty() {
                format!("Verse {}", i + 1)
            } else {
                s.label.clone()
            };
            Section::new(label, &s.content)
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// 请求中的诗歌
///
/// 三种给法：直接给出 `sections`；只给原始 `lyrics`（需要分段）；
/// 只给 `id`（从曲库加载）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub ccli_number: Option<String>,
    #[serde(default)]
    pub sections: Vec<SectionInput>,
    #[serde(default)]
    pub lyrics: Option<String>,
}

impl SongInput {
    pub fn has_text(&self) -> bool {
        self.sections.iter().any(|s| !s.content.trim().is_empty())
            || self
                .lyrics
                .as_deref()
                .is_some_and(|l| !l.trim().is_empty())
    }
}

/// 报告事项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// 奉献信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferingInfo {
    pub account_name: String,
    pub account_number: String,
    pub bsb: String,
    pub reference: String,
    pub details: String,
}

impl Default for OfferingInfo {
    fn default() -> Self {
        Self {
            account_name: default_church_name(),
            account_number: "4216 50263".to_string(),
            bsb: "112 - 879".to_string(),
            reference: "offering".to_string(),
            details: "The offering box is available at the back of the hall".to_string(),
        }
    }
}

impl OfferingInfo {
    /// 奉献页正文，每项一行
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Account name: {}", self.account_name),
            format!("Account number: {}", self.account_number),
            format!("BSB: {}", self.bsb),
            format!("Please put in \"{}\" as the reference", self.reference),
            self.details.clone(),
        ]
    }
}

/// 一次崇拜的完整请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub date: String,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default = "default_church_name")]
    pub church_name: String,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default)]
    pub bible_readings: Vec<Reading>,
    #[serde(default)]
    pub songs: Vec<SongInput>,
    #[serde(default)]
    pub response_songs: Vec<SongInput>,
    #[serde(default)]
    pub announcements: Vec<Announcement>,
    #[serde(default)]
    pub offering: OfferingInfo,
    #[serde(default)]
    pub prayer_points: Vec<String>,
    #[serde(default = "default_mingle_text")]
    pub mingle_text: String,
    #[serde(default = "default_template_name")]
    pub template_name: Option<String>,
    #[serde(default)]
    pub translate: bool,
    #[serde(default = "default_language")]
    pub language: String,
}

impl ServiceRequest {
    /// 只有日期、其余取默认值的请求
    pub fn for_date(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            speaker: String::new(),
            topic: String::new(),
            church_name: default_church_name(),
            service_name: default_service_name(),
            bible_readings: Vec::new(),
            songs: Vec::new(),
            response_songs: Vec::new(),
            announcements: Vec::new(),
            offering: OfferingInfo::default(),
            prayer_points: Vec::new(),
            mingle_text: default_mingle_text(),
            template_name: default_template_name(),
            translate: false,
            language: default_language(),
        }
    }
}
