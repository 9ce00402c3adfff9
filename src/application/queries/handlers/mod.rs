//! Query Handlers 实现

mod bible_handlers;
mod song_handlers;

pub use bible_handlers::*;
pub use song_handlers::*;
