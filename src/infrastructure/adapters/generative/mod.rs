//! Generative Adapter - 生成式文本 HTTP 客户端

mod gemini_client;

pub use gemini_client::{GeminiClient, GeminiClientConfig};
