//! Service Context - 日期

use chrono::{Datelike, NaiveDate};

/// 支持的日期格式，按顺序尝试
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y", "%Y.%m.%d"];

/// 解析崇拜日期；都不匹配时返回 `None`
pub fn parse_service_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
}

/// 当月第一周（1-7 号），用于判断是否有圣餐
pub fn is_first_week(date: NaiveDate) -> bool {
    (1..=7).contains(&date.day())
}

/// 周报上显示的日期: `2024-03-03` -> `2024.03.03`
pub fn bulletin_date(date: &str) -> String {
    date.trim().replace('-', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        assert_eq!(parse_service_date("2024-03-03"), Some(expected));
        assert_eq!(parse_service_date("2024/03/03"), Some(expected));
        assert_eq!(parse_service_date("03/03/2024"), Some(expected));
        assert_eq!(parse_service_date(" 03.03.2024 "), Some(expected));
    }

    #[test]
    fn test_unparseable_date() {
        assert_eq!(parse_service_date("next sunday"), None);
        assert_eq!(parse_service_date("2024-02-30"), None);
        assert_eq!(parse_service_date(""), None);
    }

    #[test]
    fn test_first_week() {
        for day in 1..=7 {
            assert!(is_first_week(NaiveDate::from_ymd_opt(2024, 9, day).unwrap()));
        }
        for day in 8..=30 {
            assert!(!is_first_week(NaiveDate::from_ymd_opt(2024, 9, day).unwrap()));
        }
    }

    #[test]
    fn test_bulletin_date() {
        assert_eq!(bulletin_date("2024-03-03"), "2024.03.03");
    }
}
