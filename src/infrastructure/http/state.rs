//! Application State
//!
//! 所有 Command/Query Handlers 以及跨请求共享的翻译缓存

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateSongHandler, DeleteSongHandler, GenerateDeckHandler, UpdateSongHandler,
    // Query handlers
    GetPassageHandler, GetSongHandler, ListSongsHandler,
    // Pipeline
    DeckComposer, PassageService, SectionSegmenter, TranslationResolver,
    // Ports
    DeckRendererPort, SongRepositoryPort,
};

/// 应用状态
pub struct AppState {
    // ========== Shared ==========
    pub resolver: Arc<TranslationResolver>,

    // ========== Command Handlers ==========
    pub create_song_handler: CreateSongHandler,
    pub update_song_handler: UpdateSongHandler,
    pub delete_song_handler: DeleteSongHandler,
    pub generate_deck_handler: GenerateDeckHandler,

    // ========== Query Handlers ==========
    pub get_song_handler: GetSongHandler,
    pub list_songs_handler: ListSongsHandler,
    pub get_passage_handler: GetPassageHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        song_repo: Arc<dyn SongRepositoryPort>,
        resolver: Arc<TranslationResolver>,
        segmenter: Arc<SectionSegmenter>,
        passages: Arc<PassageService>,
        composer: Arc<DeckComposer>,
        renderer: Arc<dyn DeckRendererPort>,
    ) -> Self {
        Self {
            resolver,

            // Command handlers
            create_song_handler: CreateSongHandler::new(song_repo.clone(), segmenter.clone()),
            update_song_handler: UpdateSongHandler::new(song_repo.clone(), segmenter),
            delete_song_handler: DeleteSongHandler::new(song_repo.clone()),
            generate_deck_handler: GenerateDeckHandler::new(composer, renderer),

            // Query handlers
            get_song_handler: GetSongHandler::new(song_repo.clone()),
            list_songs_handler: ListSongsHandler::new(song_repo),
            get_passage_handler: GetPassageHandler::new(passages),
        }
    }
}
