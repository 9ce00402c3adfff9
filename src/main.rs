//! ServiceDeck - 主日崇拜幻灯片生成服务
//!
//! - Domain: song/, service/, pagination/
//! - Application: translation, pipeline, commands, queries, ports
//! - Infrastructure: http, persistence, adapters

use std::sync::Arc;

use servicedeck::application::{
    DeckComposer, GenerativeTextPort, PassageService, PhraseTranslatorPort, ScriptureSourcePort,
    SectionSegmenter, TranslationResolver,
};
use servicedeck::config::{load_config, print_config, AppConfig};
use servicedeck::infrastructure::adapters::{
    AssetDirectory, BibleApiClient, BibleApiConfig, GeminiClient, GeminiClientConfig,
    GoogleTranslateClient, GoogleTranslateConfig, JsonDeckRenderer,
};
use servicedeck::infrastructure::http::{AppState, HttpServer, ServerConfig};
use servicedeck::infrastructure::persistence::sqlite::{
    create_pool, import_seed_file, run_migrations, DatabaseConfig, SqliteSongRepository,
};

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},servicedeck={},tower_http=debug,sqlx=warn",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// API key 为空时不接入生成式服务
fn generative_client(config: &AppConfig) -> anyhow::Result<Option<Arc<dyn GenerativeTextPort>>> {
    if !config.generative.is_enabled() {
        tracing::warn!("No generative API key configured, using fallback providers only");
        return Ok(None);
    }

    let client = GeminiClient::new(GeminiClientConfig {
        base_url: config.generative.url.clone(),
        model: config.generative.model.clone(),
        api_key: config.generative.api_key.clone(),
        timeout_secs: config.generative.timeout_secs,
        max_retries: config.generative.max_retries,
    })?;
    Ok(Some(Arc::new(client)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("ServiceDeck - 崇拜幻灯片生成服务");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig::new(&config.database.path, config.database.max_connections);
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    let song_repo = Arc::new(SqliteSongRepository::new(pool));

    if let Some(seed_file) = &config.database.seed_file {
        match import_seed_file(seed_file, song_repo.as_ref()).await {
            Ok(inserted) => tracing::info!(inserted, "Seed songs imported"),
            Err(e) => tracing::warn!(error = %e, path = ?seed_file, "Seed import failed"),
        }
    }

    // 外部服务适配器
    let generative = generative_client(&config)?;
    let translator: Arc<dyn PhraseTranslatorPort> = Arc::new(GoogleTranslateClient::new(GoogleTranslateConfig {
        base_url: config.translator.url.clone(),
        timeout_secs: config.translator.timeout_secs,
    })?);
    let scripture: Arc<dyn ScriptureSourcePort> = Arc::new(BibleApiClient::new(BibleApiConfig {
        base_url: config.scripture.url.clone(),
        timeout_secs: config.scripture.timeout_secs,
    })?);
    let assets = Arc::new(AssetDirectory::new(config.assets.dir.clone()));
    let renderer = Arc::new(JsonDeckRenderer::new(true));

    // 应用层管线
    let resolver = Arc::new(TranslationResolver::new(generative.clone(), Some(translator)));
    let segmenter = Arc::new(SectionSegmenter::new(generative.clone()));
    let passages = Arc::new(PassageService::new(
        Some(scripture),
        generative,
        config.composition.passage_limits(),
    ));
    let composer = Arc::new(DeckComposer::new(
        resolver.clone(),
        segmenter.clone(),
        passages.clone(),
        song_repo.clone(),
        assets,
        config.composition.settings(),
    ));

    let state = AppState::new(
        song_repo,
        resolver.clone(),
        segmenter,
        passages,
        composer,
        renderer,
    );

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, Arc::new(state));

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    let stats = resolver.stats();
    tracing::info!(
        entries = stats.entries,
        hits = stats.hits,
        misses = stats.misses,
        provider_calls = stats.provider_calls,
        "Server shutdown complete"
    );

    Ok(())
}
