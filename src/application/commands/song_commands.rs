//! Song Commands

use crate::domain::service::SectionInput;

/// 创建歌曲命令
///
/// `sections` 为空时使用 `lyrics` 分段
#[derive(Debug, Clone)]
pub struct CreateSong {
    pub id: Option<String>,
    pub title: String,
    pub artist: Option<String>,
    pub ccli_number: Option<String>,
    pub sections: Vec<SectionInput>,
    pub lyrics: Option<String>,
}

/// 整体替换歌曲命令
#[derive(Debug, Clone)]
pub struct UpdateSong {
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    pub ccli_number: Option<String>,
    pub sections: Vec<SectionInput>,
    pub lyrics: Option<String>,
}

/// 删除歌曲命令
#[derive(Debug, Clone)]
pub struct DeleteSong {
    pub id: String,
}
