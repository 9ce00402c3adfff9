//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod seed;
mod song_repo;

pub use database::*;
pub use seed::*;
pub use song_repo::*;
