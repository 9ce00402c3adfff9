//! JSON Deck Renderer
//!
//! 把幻灯片描述序列化成 JSON 文档，供前端或其他工具排版。

use async_trait::async_trait;
use serde::Serialize;

use crate::application::ports::{DeckMetadata, DeckRendererPort, RenderError, RenderedDeck};
use crate::domain::SlideDescriptor;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeckDocument<'a> {
    title: &'a str,
    date: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<&'a str>,
    slide_count: usize,
    slides: &'a [SlideDescriptor],
}

/// JSON 渲染器
#[derive(Debug, Clone, Default)]
pub struct JsonDeckRenderer {
    pretty: bool,
}

impl JsonDeckRenderer {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

#[async_trait]
impl DeckRendererPort for JsonDeckRenderer {
    async fn render(
        &self,
        metadata: &DeckMetadata,
        slides: &[SlideDescriptor],
    ) -> Result<RenderedDeck, RenderError> {
        let document = DeckDocument {
            title: &metadata.title,
            date: &metadata.date,
            template: metadata.template_name.as_deref(),
            slide_count: slides.len(),
            slides,
        };

        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&document)
        } else {
            serde_json::to_vec(&document)
        }
        .map_err(|e| RenderError::SerializationError(e.to_string()))?;

        Ok(RenderedDeck {
            bytes,
            content_type: "application/json",
            file_extension: "json",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FontHints;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_render_document() {
        let renderer = JsonDeckRenderer::new(false);
        let metadata = DeckMetadata {
            title: "Church - English Service".to_string(),
            date: "2024-03-03".to_string(),
            template_name: Some("medium".to_string()),
        };
        let slides = vec![
            SlideDescriptor::title("Welcome", FontHints::new(50.0)),
            SlideDescriptor::image_right("Bible Reading", PathBuf::from("assets/Bible/1.png"), FontHints::new(40.0)),
        ];

        let rendered = renderer.render(&metadata, &slides).await.unwrap();
        assert_eq!(rendered.content_type, "application/json");
        assert_eq!(rendered.file_extension, "json");

        let value: serde_json::Value = serde_json::from_slice(&rendered.bytes).unwrap();
        assert_eq!(value["slideCount"], 2);
        assert_eq!(value["template"], "medium");
        assert_eq!(value["slides"][0]["kind"], "title");
        assert_eq!(value["slides"][1]["kind"], "imageRight");
        assert_eq!(value["slides"][1]["image"], "assets/Bible/1.png");
        assert!(value["slides"][0].get("image").is_none());
        assert_eq!(value["slides"][0]["primaryText"], "Welcome");
        assert_eq!(value["slides"][0]["font"]["primaryPt"], 50.0);
        assert!(value["slides"][0].get("primary_text").is_none());
        assert!(value["slides"][0]["font"].get("secondaryPt").is_none());
    }
}
