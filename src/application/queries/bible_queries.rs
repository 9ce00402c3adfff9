//! Bible Queries

use crate::domain::scripture::DEFAULT_VERSION;

/// 获取经文（已分页）查询
#[derive(Debug, Clone)]
pub struct GetPassage {
    pub reference: String,
    pub version: String,
}

impl GetPassage {
    pub fn new(reference: impl Into<String>, version: Option<String>) -> Self {
        Self {
            reference: reference.into(),
            version: version
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        }
    }
}
