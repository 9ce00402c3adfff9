//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod deck_handlers;
mod song_handlers;

pub use deck_handlers::*;
pub use song_handlers::*;
