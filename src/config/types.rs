//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::CompositionSettings;
use crate::domain::pagination::{
    BILINGUAL_LINES_PER_SLIDE, DEFAULT_MAX_LINES_PER_GROUP, DEFAULT_MAX_VERSES_PER_GROUP,
    MONOLINGUAL_LINES_PER_SLIDE,
};
use crate::domain::PassageLimits;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 生成式文本服务配置
    #[serde(default)]
    pub generative: GenerativeConfig,

    /// 机器翻译配置
    #[serde(default)]
    pub translator: TranslatorConfig,

    /// 经文检索配置
    #[serde(default)]
    pub scripture: ScriptureConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 图片素材配置
    #[serde(default)]
    pub assets: AssetsConfig,

    /// 幻灯片排版配置
    #[serde(default)]
    pub composition: CompositionConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 生成式文本服务配置
///
/// `api_key` 为空时不接入生成式服务，翻译和分段走后备策略。
#[derive(Debug, Clone, Deserialize)]
pub struct GenerativeConfig {
    /// 服务基础 URL
    #[serde(default = "default_generative_url")]
    pub url: String,

    /// 模型名称
    #[serde(default = "default_generative_model")]
    pub model: String,

    #[serde(default)]
    pub api_key: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_generative_timeout")]
    pub timeout_secs: u64,

    /// 最大重试次数
    #[serde(default = "default_generative_retries")]
    pub max_retries: u32,
}

fn default_generative_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_generative_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_generative_timeout() -> u64 {
    60
}

fn default_generative_retries() -> u32 {
    1
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            url: default_generative_url(),
            model: default_generative_model(),
            api_key: String::new(),
            timeout_secs: default_generative_timeout(),
            max_retries: default_generative_retries(),
        }
    }
}

impl GenerativeConfig {
    pub fn is_enabled(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// 机器翻译配置
#[derive(Debug, Clone, Deserialize)]
pub struct TranslatorConfig {
    #[serde(default = "default_translator_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_client_timeout")]
    pub timeout_secs: u64,
}

fn default_translator_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_client_timeout() -> u64 {
    10
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            url: default_translator_url(),
            timeout_secs: default_client_timeout(),
        }
    }
}

/// 经文检索配置
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptureConfig {
    #[serde(default = "default_scripture_url")]
    pub url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_client_timeout")]
    pub timeout_secs: u64,
}

fn default_scripture_url() -> String {
    "https://bible-api.com".to_string()
}

impl Default for ScriptureConfig {
    fn default() -> Self {
        Self {
            url: default_scripture_url(),
            timeout_secs: default_client_timeout(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// 启动时导入的歌曲 JSON（可选）
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

fn default_db_path() -> String {
    "data/servicedeck.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            seed_file: None,
        }
    }
}

/// 图片素材配置
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    /// 素材根目录，子目录按类别命名（Communion / Bible / ...）
    #[serde(default = "default_assets_dir")]
    pub dir: PathBuf,
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
        }
    }
}

/// 幻灯片排版配置
#[derive(Debug, Clone, Deserialize)]
pub struct CompositionConfig {
    /// 单语歌词每页行数
    #[serde(default = "default_lines_per_slide")]
    pub lines_per_slide: usize,

    /// 双语歌词每页原文行数
    #[serde(default = "default_bilingual_lines_per_slide")]
    pub bilingual_lines_per_slide: usize,

    /// 经文每页最多节数
    #[serde(default = "default_verses_per_slide")]
    pub verses_per_slide: usize,

    /// 经文每页最多行数
    #[serde(default = "default_max_lines_per_passage_slide")]
    pub max_lines_per_passage_slide: usize,
}

fn default_lines_per_slide() -> usize {
    MONOLINGUAL_LINES_PER_SLIDE
}

fn default_bilingual_lines_per_slide() -> usize {
    BILINGUAL_LINES_PER_SLIDE
}

fn default_verses_per_slide() -> usize {
    DEFAULT_MAX_VERSES_PER_GROUP
}

fn default_max_lines_per_passage_slide() -> usize {
    DEFAULT_MAX_LINES_PER_GROUP
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            lines_per_slide: default_lines_per_slide(),
            bilingual_lines_per_slide: default_bilingual_lines_per_slide(),
            verses_per_slide: default_verses_per_slide(),
            max_lines_per_passage_slide: default_max_lines_per_passage_slide(),
        }
    }
}

impl CompositionConfig {
    pub fn settings(&self) -> CompositionSettings {
        CompositionSettings {
            lines_per_slide: self.lines_per_slide,
            bilingual_lines_per_slide: self.bilingual_lines_per_slide,
        }
    }

    pub fn passage_limits(&self) -> PassageLimits {
        PassageLimits {
            max_verses: self.verses_per_slide,
            max_lines: self.max_lines_per_passage_slide,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.generative.model, "gemini-2.5-flash");
        assert!(!config.generative.is_enabled());
        assert_eq!(config.database.path, "data/servicedeck.db");
        assert!(config.database.seed_file.is_none());
        assert_eq!(config.composition.lines_per_slide, 4);
        assert_eq!(config.composition.bilingual_lines_per_slide, 2);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_generative_enabled_by_key() {
        let mut config = GenerativeConfig::default();
        config.api_key = "   ".to_string();
        assert!(!config.is_enabled());
        config.api_key = "secret".to_string();
        assert!(config.is_enabled());
    }

    #[test]
    fn test_composition_conversions() {
        let config = CompositionConfig {
            lines_per_slide: 6,
            bilingual_lines_per_slide: 3,
            verses_per_slide: 1,
            max_lines_per_passage_slide: 5,
        };
        let settings = config.settings();
        assert_eq!(settings.lines_per_slide, 6);
        assert_eq!(settings.bilingual_lines_per_slide, 3);

        let limits = config.passage_limits();
        assert_eq!(limits.max_verses, 1);
        assert_eq!(limits.max_lines, 5);
    }
}
