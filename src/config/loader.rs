//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 未配置 `generative.api_key` 时读取的环境变量
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `SERVICEDECK_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `SERVICEDECK_SERVER__PORT=8080`
/// - `SERVICEDECK_GENERATIVE__API_KEY=...`
/// - `SERVICEDECK_DATABASE__SEED_FILE=data/songs_db.json`
/// - `SERVICEDECK_COMPOSITION__LINES_PER_SLIDE=6`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("generative.timeout_secs", 60)?
        .set_default("generative.max_retries", 1)?
        .set_default("database.path", "data/servicedeck.db")?
        .set_default("database.max_connections", 5)?
        .set_default("assets.dir", "assets")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: SERVICEDECK_SCRIPTURE__URL=http://localhost:7000
    builder = builder.add_source(
        Environment::with_prefix("SERVICEDECK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    if !app_config.generative.is_enabled() {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            app_config.generative.api_key = key;
        }
    }

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.generative.is_enabled() && config.generative.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Generative URL cannot be empty".to_string(),
        ));
    }

    if config.translator.url.is_empty() || config.scripture.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Translator and scripture URLs cannot be empty".to_string(),
        ));
    }

    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    let composition = &config.composition;
    if composition.lines_per_slide == 0
        || composition.bilingual_lines_per_slide == 0
        || composition.verses_per_slide == 0
        || composition.max_lines_per_passage_slide == 0
    {
        return Err(ConfigError::ValidationError(
            "Composition limits must be positive".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志），不输出 API key
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    if config.generative.is_enabled() {
        tracing::info!("Generative: {} ({})", config.generative.url, config.generative.model);
        tracing::info!("Generative Timeout: {}s", config.generative.timeout_secs);
    } else {
        tracing::info!("Generative: disabled (no API key)");
    }
    tracing::info!("Translator: {}", config.translator.url);
    tracing::info!("Scripture: {}", config.scripture.url);
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    if let Some(seed) = &config.database.seed_file {
        tracing::info!("Seed File: {:?}", seed);
    }
    tracing::info!("Assets Directory: {:?}", config.assets.dir);
    tracing::info!(
        "Lines Per Slide: {} (bilingual {})",
        config.composition.lines_per_slide,
        config.composition.bilingual_lines_per_slide
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
