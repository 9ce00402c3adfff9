//! Deck Command Handlers

use std::sync::Arc;

use crate::application::commands::GenerateDeck;
use crate::application::error::ApplicationError;
use crate::application::pipeline::DeckComposer;
use crate::application::ports::{DeckMetadata, DeckRendererPort};

/// 生成结果
#[derive(Debug, Clone)]
pub struct GenerateDeckResponse {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
    pub slide_count: usize,
}

/// GenerateDeck Handler
pub struct GenerateDeckHandler {
    composer: Arc<DeckComposer>,
    renderer: Arc<dyn DeckRendererPort>,
}

impl GenerateDeckHandler {
    pub fn new(composer: Arc<DeckComposer>, renderer: Arc<dyn DeckRendererPort>) -> Self {
        Self { composer, renderer }
    }

    pub async fn handle(&self, command: GenerateDeck) -> Result<GenerateDeckResponse, ApplicationError> {
        let request = command.request;
        let slides = self.composer.compose(&request).await?;

        let metadata = DeckMetadata {
            title: format!("{} - {}", request.church_name.trim(), request.service_name.trim()),
            date: request.date.trim().to_string(),
            template_name: request.template_name.clone(),
        };
        let rendered = self.renderer.render(&metadata, &slides).await.map_err(|e| {
            tracing::error!(date = %metadata.date, error = %e, "Deck rendering failed");
            ApplicationError::from(e)
        })?;

        tracing::info!(
            date = %metadata.date,
            slides = slides.len(),
            bytes = rendered.bytes.len(),
            "Deck generated"
        );

        Ok(GenerateDeckResponse {
            file_name: format!("Service_{}.{}", metadata.date, rendered.file_extension),
            content_type: rendered.content_type,
            bytes: rendered.bytes,
            slide_count: slides.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::{FakeAssets, FakeRenderer, InMemorySongRepo};
    use crate::application::pipeline::{CompositionSettings, PassageService, SectionSegmenter};
    use crate::application::translation::TranslationResolver;
    use crate::domain::service::ServiceRequest;
    use crate::domain::PassageLimits;

    #[tokio::test]
    async fn test_generate_names_file_by_date() {
        let composer = Arc::new(DeckComposer::new(
            Arc::new(TranslationResolver::new(None, None)),
            Arc::new(SectionSegmenter::new(None)),
            Arc::new(PassageService::new(None, None, PassageLimits::default())),
            Arc::new(InMemorySongRepo::default()),
            Arc::new(FakeAssets::empty()),
            CompositionSettings::default(),
        ));
        let renderer = Arc::new(FakeRenderer::default());
        let handler = GenerateDeckHandler::new(composer, renderer.clone());

        let response = handler
            .handle(GenerateDeck {
                request: ServiceRequest::for_date("2024-05-12"),
            })
            .await
            .unwrap();

        assert_eq!(response.file_name, "Service_2024-05-12.txt");
        // 周报、标题、奉献、结束
        assert_eq!(response.slide_count, 4);
        assert_eq!(renderer.rendered.lock().unwrap().len(), 4);
    }
}
