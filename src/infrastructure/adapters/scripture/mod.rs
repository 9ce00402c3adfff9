//! Scripture Adapter - 结构化经文检索

mod bible_api_client;

pub use bible_api_client::{BibleApiClient, BibleApiConfig};
