//! 翻译解析
//!
//! - resolver: 缓存 + in-flight 去重 + provider chain
//! - strategies: generative / phrase / identity 三种策略

mod resolver;
mod strategies;

pub use resolver::{Translation, TranslationResolver, TranslationSource, TranslationStats};
