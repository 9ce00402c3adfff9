//! Asset Directory - 文件系统图片素材
//!
//! 目录结构: `{root}/{Category}/*.png|jpg|jpeg`，每次随机挑一张。

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::application::ports::{AssetCatalogPort, AssetError};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// 文件系统素材目录
#[derive(Debug, Clone)]
pub struct AssetDirectory {
    root: PathBuf,
}

impl AssetDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// `communion` -> `Communion`
fn category_dir(category: &str) -> String {
    let mut chars = category.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[async_trait]
impl AssetCatalogPort for AssetDirectory {
    async fn pick_image(&self, category: &str) -> Result<Option<PathBuf>, AssetError> {
        let dir = self.root.join(category_dir(category));

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(dir = %dir.display(), "Asset category not found");
                return Ok(None);
            }
            Err(e) => return Err(AssetError::IoError(e.to_string())),
        };

        let mut images = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AssetError::IoError(e.to_string()))?
        {
            let path = entry.path();
            if is_image(&path) {
                images.push(path);
            }
        }

        Ok(images.choose(&mut rand::rng()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_category_dir() {
        assert_eq!(category_dir(" communion "), "Communion");
        assert_eq!(category_dir("BIBLE"), "Bible");
        assert_eq!(category_dir(""), "");
    }

    #[tokio::test]
    async fn test_pick_image_from_category() {
        let temp = TempDir::new().unwrap();
        let bible = temp.path().join("Bible");
        std::fs::create_dir_all(&bible).unwrap();
        std::fs::write(bible.join("one.PNG"), b"png").unwrap();
        std::fs::write(bible.join("notes.txt"), b"text").unwrap();

        let assets = AssetDirectory::new(temp.path());
        let picked = assets.pick_image("bible").await.unwrap();

        assert_eq!(picked, Some(bible.join("one.PNG")));
    }

    #[tokio::test]
    async fn test_missing_or_empty_category() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("Communion")).unwrap();

        let assets = AssetDirectory::new(temp.path());

        assert_eq!(assets.pick_image("Communion").await.unwrap(), None);
        assert_eq!(assets.pick_image("Mingle").await.unwrap(), None);
    }
}
