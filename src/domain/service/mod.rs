//! Service Context - 一次主日崇拜的输入
//!
//! 职责:
//! - 崇拜请求（日期、讲员、诗歌、经文、报告、奉献、代祷事项）
//! - 日期格式查找表

mod calendar;
mod request;

pub use calendar::{bulletin_date, is_first_week, parse_service_date, DATE_FORMATS};
pub use request::{
    sections_from_inputs, Announcement, OfferingInfo, Reading, SectionInput, ServiceRequest,
    SongInput,
};
