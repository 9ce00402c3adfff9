//! Song Queries

/// 获取歌曲详情查询
#[derive(Debug, Clone)]
pub struct GetSong {
    pub id: String,
}

/// 列出所有歌曲查询
#[derive(Debug, Clone)]
pub struct ListSongs;
