//! Deck Composer
//!
//! 把一次崇拜请求组装成有序的幻灯片描述。外部服务（翻译、经文、素材）全部在
//! 组装前并发完成，之后按固定顺序排列；任何外部失败都只会降级单页内容。

use futures_util::future::{join_all, try_join_all};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::{PassageService, SectionSegmenter};
use crate::application::error::ApplicationError;
use crate::application::ports::{AssetCatalogPort, SongRepositoryPort};
use crate::application::translation::TranslationResolver;
use crate::domain::scripture::{copyright_notice, normalize_reference, Passage};
use crate::domain::service::{
    bulletin_date, is_first_week, parse_service_date, sections_from_inputs, ServiceRequest, SongInput,
};
use crate::domain::slide::{COPYRIGHT_FONT_PT, SUBTITLE_FONT_PT};
use crate::domain::pagination::{BILINGUAL_LINES_PER_SLIDE, MONOLINGUAL_LINES_PER_SLIDE};
use crate::domain::{
    paginate_lines, FontHints, FontPreset, SlideDescriptor, Song, TemplateSize, TextKind,
};

/// 周报页标题字号
const BULLETIN_HEADING_PT: f32 = 30.0;

/// 周报页正文字号
const BULLETIN_BODY_PT: f32 = 20.0;

const COMMUNION_TITLE: &str = "Holy Communion";
const COMMUNION_ASSETS: &str = "Communion";
const BIBLE_TITLE: &str = "Bible Reading";
const BIBLE_ASSETS: &str = "Bible";
const OFFERING_TITLE: &str = "Offering";

/// 歌词分页设置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionSettings {
    pub lines_per_slide: usize,
    pub bilingual_lines_per_slide: usize,
}

impl Default for CompositionSettings {
    fn default() -> Self {
        Self {
            lines_per_slide: MONOLINGUAL_LINES_PER_SLIDE,
            bilingual_lines_per_slide: BILINGUAL_LINES_PER_SLIDE,
        }
    }
}

/// 组装器依赖
pub struct DeckComposer {
    resolver: Arc<TranslationResolver>,
    segmenter: Arc<SectionSegmenter>,
    passages: Arc<PassageService>,
    songs: Arc<dyn SongRepositoryPort>,
    assets: Arc<dyn AssetCatalogPort>,
    settings: CompositionSettings,
}

impl DeckComposer {
    pub fn new(
        resolver: Arc<TranslationResolver>,
        segmenter: Arc<SectionSegmenter>,
        passages: Arc<PassageService>,
        songs: Arc<dyn SongRepositoryPort>,
        assets: Arc<dyn AssetCatalogPort>,
        settings: CompositionSettings,
    ) -> Self {
        Self {
            resolver,
            segmenter,
            passages,
            songs,
            assets,
            settings,
        }
    }

    /// 组装整套幻灯片
    ///
    /// 只有请求本身无效（歌曲既没有内容也没有 id、引用的歌曲不存在）才会失败；
    /// 失败时不返回任何部分结果。
    pub async fn compose(&self, request: &ServiceRequest) -> Result<Vec<SlideDescriptor>, ApplicationError> {
        let preset = TemplateSize::from_hint(request.template_name.as_deref()).preset();

        let (songs, response_songs) = tokio::try_join!(
            self.resolve_songs(&request.songs),
            self.resolve_songs(&request.response_songs),
        )?;

        let (song_slides, response_slides, passages) = tokio::join!(
            self.songs_slides(&songs, request, &preset),
            self.songs_slides(&response_songs, request, &preset),
            self.fetch_passages(request),
        );

        // 1. 周报占位
        let mut slides = vec![SlideDescriptor::placeholder()];

        // 2. 标题页
        slides.push(SlideDescriptor::title(
            format!("{}\n{}", request.church_name.trim(), request.service_name.trim()),
            FontHints::new(preset.title),
        ));

        // 3. 诗歌
        slides.extend(song_slides);

        // 4. 圣餐（每月第一周）
        match parse_service_date(&request.date) {
            Some(date) if is_first_week(date) => {
                slides.push(self.image_slide(COMMUNION_TITLE, COMMUNION_ASSETS, &preset).await);
            }
            Some(_) => {}
            None => {
                tracing::debug!(date = %request.date, "Service date not recognised, skipping communion");
            }
        }

        // 5. 读经
        if !passages.is_empty() {
            slides.push(self.image_slide(BIBLE_TITLE, BIBLE_ASSETS, &preset).await);
            for passage in &passages {
                slides.extend(self.passage_slides(passage, &preset));
            }
            slides.extend(copyright_slides(&passages));
        }

        // 6. 回填周报
        slides[0] = bulletin_slide(request, &songs, &passages, &response_songs);

        // 7. 回应诗歌
        slides.extend(response_slides);

        // 8. 报告
        slides.extend(request.announcements.iter().map(|a| {
            match a.content.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
                Some(content) => SlideDescriptor::title_and_body(
                    a.title.trim(),
                    content,
                    FontHints::with_secondary(preset.title, preset.song),
                ),
                None => SlideDescriptor::title(a.title.trim(), FontHints::new(preset.title)),
            }
        }));

        // 9. 奉献
        slides.push(SlideDescriptor::title_and_body(
            OFFERING_TITLE,
            request.offering.lines().join("\n"),
            FontHints::with_secondary(preset.title, preset.offering),
        ));

        // 10. 代祷事项
        slides.extend(
            request
                .prayer_points
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .map(|p| SlideDescriptor::title(p, FontHints::new(preset.title))),
        );

        // 11. 结束
        slides.push(SlideDescriptor::title(
            request.mingle_text.trim(),
            FontHints::new(preset.title),
        ));

        tracing::info!(
            date = %request.date,
            songs = songs.len(),
            response_songs = response_songs.len(),
            readings = passages.len(),
            slides = slides.len(),
            "Deck composed"
        );

        Ok(slides)
    }

    async fn resolve_songs(&self, inputs: &[SongInput]) -> Result<Vec<Song>, ApplicationError> {
        try_join_all(inputs.iter().map(|input| self.resolve_song(input))).await
    }

    /// 三种给法：sections、原始歌词、曲库 id
    async fn resolve_song(&self, input: &SongInput) -> Result<Song, ApplicationError> {
        let title = input.title.trim();

        if input.has_text() {
            if title.is_empty() {
                return Err(ApplicationError::validation("Song title is required"));
            }
            let sections = match input.lyrics.as_deref() {
                Some(lyrics) if !input.sections.iter().any(|s| !s.content.trim().is_empty()) => {
                    self.segmenter.segment(lyrics, TextKind::Lyrics).await
                }
                _ => sections_from_inputs(&input.sections),
            };
            return Ok(Song {
                id: input.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string()),
                title: title.to_string(),
                artist: input.artist.clone(),
                ccli_number: input.ccli_number.clone(),
                sections,
            });
        }

        let Some(id) = input.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) else {
            return Err(ApplicationError::validation(format!(
                "Song '{}' has no sections, lyrics or id",
                title
            )));
        };

        let record = self
            .songs
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Song", id))?;

        let mut song = Song::from(record);
        if !title.is_empty() {
            song.title = title.to_string();
        }
        Ok(song)
    }

    async fn songs_slides(
        &self,
        songs: &[Song],
        request: &ServiceRequest,
        preset: &FontPreset,
    ) -> Vec<SlideDescriptor> {
        let per_song = join_all(songs.iter().map(|song| self.song_slides(song, request, preset))).await;
        per_song.into_iter().flatten().collect()
    }

    /// 标题页 + 每个段落分页
    async fn song_slides(&self, song: &Song, request: &ServiceRequest, preset: &FontPreset) -> Vec<SlideDescriptor> {
        let translate = request.translate;
        let language = request.language.as_str();

        let (title, translations) = if translate {
            let lines: Vec<String> = song.all_lines().cloned().collect();
            let (title, translations) = tokio::join!(
                self.resolver.resolve(&song.title, language),
                self.resolver.translation_map(&lines, language),
            );
            let title = if title.is_translated() && title.text.trim() != song.title.trim() {
                format!("{}\n{}", song.title, title.text)
            } else {
                song.title.clone()
            };
            (title, translations)
        } else {
            (song.title.clone(), HashMap::new())
        };

        let caption = song.ccli_caption();
        let title_font = if caption.is_some() {
            FontHints::with_secondary(preset.title, SUBTITLE_FONT_PT)
        } else {
            FontHints::new(preset.title)
        };

        let (chunk, body_font) = if translate {
            (self.settings.bilingual_lines_per_slide, preset.bilingual_song())
        } else {
            (self.settings.lines_per_slide, preset.song)
        };

        let mut slides = vec![SlideDescriptor::title_with_subtitle(title, caption, title_font)];
        for section in &song.sections {
            slides.extend(
                paginate_lines(section.lines(), chunk, translate, &translations)
                    .into_iter()
                    .map(|group| SlideDescriptor::body(group.into_body(), FontHints::new(body_font))),
            );
        }

        tracing::debug!(song = %song.title, slides = slides.len(), translate, "Song slides built");
        slides
    }

    /// 所有读经并发检索，顺序与请求一致；空引用和 `n` 视为没有读经
    async fn fetch_passages(&self, request: &ServiceRequest) -> Vec<Passage> {
        join_all(
            request
                .bible_readings
                .iter()
                .filter(|r| normalize_reference(&r.reference).is_some())
                .map(|r| self.passages.fetch_passage(&r.reference, &r.version)),
        )
        .await
    }

    /// 经文页；取不到经文时只保留一页带引用的标题页
    fn passage_slides(&self, passage: &Passage, preset: &FontPreset) -> Vec<SlideDescriptor> {
        let heading = passage.heading();
        let groups = self.passages.paginate(passage);
        if groups.is_empty() {
            return vec![SlideDescriptor::title(heading, FontHints::new(preset.title))];
        }

        groups
            .into_iter()
            .map(|group| {
                SlideDescriptor::title_and_body(
                    heading.clone(),
                    group.into_body(),
                    FontHints::with_secondary(preset.title, preset.bible),
                )
            })
            .collect()
    }

    /// 标题配图页；没有素材时降级为标题页
    async fn image_slide(&self, title: &str, category: &str, preset: &FontPreset) -> SlideDescriptor {
        let font = FontHints::new(preset.image_title());
        match self.assets.pick_image(category).await {
            Ok(Some(path)) => SlideDescriptor::image_right(title, path, font),
            Ok(None) => {
                tracing::warn!(category, "No image asset found, using title slide");
                SlideDescriptor::title(title, font)
            }
            Err(e) => {
                tracing::warn!(category, error = %e, "Image asset lookup failed, using title slide");
                SlideDescriptor::title(title, font)
            }
        }
    }
}

/// 每个出现过的译本一页版权声明，按首次出现顺序
fn copyright_slides(passages: &[Passage]) -> Vec<SlideDescriptor> {
    let mut versions: Vec<&str> = Vec::new();
    for passage in passages {
        if !versions.contains(&passage.version.as_str()) {
            versions.push(passage.version.as_str());
        }
    }

    versions
        .into_iter()
        .map(|version| SlideDescriptor::body(copyright_notice(version), FontHints::new(COPYRIGHT_FONT_PT)))
        .collect()
}

fn bulletin_slide(
    request: &ServiceRequest,
    songs: &[Song],
    passages: &[Passage],
    response_songs: &[Song],
) -> SlideDescriptor {
    let titles = |songs: &[Song]| {
        songs
            .iter()
            .map(|s| s.title.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    };
    let references = passages
        .iter()
        .map(|p| p.reference.as_str())
        .collect::<Vec<_>>()
        .join(" / ");

    let heading = format!(
        "{}\nWelcome to Our {}\n{}",
        request.church_name.trim(),
        request.service_name.trim(),
        bulletin_date(&request.date)
    );
    let summary = [
        format!("Worship Songs: {}", titles(songs)),
        format!("Passage: {}", references),
        format!("Speaker: {}", request.speaker.trim()),
        format!("Topic: {}", request.topic.trim()),
        format!("Response Song: {}", titles(response_songs)),
        "Announcements and Closing Prayer".to_string(),
        "Benediction".to_string(),
    ];

    SlideDescriptor::title_and_body(
        heading,
        summary.join("\n"),
        FontHints::with_secondary(BULLETIN_HEADING_PT, BULLETIN_BODY_PT),
    )
}
