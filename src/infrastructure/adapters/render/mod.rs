//! Render Adapter

mod json_renderer;

pub use json_renderer::JsonDeckRenderer;
