//! HTTP Handlers

mod bible;
mod deck;
mod ping;
mod song;

pub use bible::*;
pub use deck::*;
pub use ping::*;
pub use song::*;
