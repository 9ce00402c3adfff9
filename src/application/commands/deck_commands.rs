//! Deck Commands

use crate::domain::service::ServiceRequest;

/// 生成整套崇拜幻灯片
#[derive(Debug, Clone)]
pub struct GenerateDeck {
    pub request: ServiceRequest,
}
