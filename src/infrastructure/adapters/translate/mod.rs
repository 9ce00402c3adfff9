//! Translate Adapter - 确定性机器翻译客户端

mod google_translate_client;

pub use google_translate_client::{GoogleTranslateClient, GoogleTranslateConfig};
