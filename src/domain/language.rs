//! Language - 语言名到翻译代码的查找表

/// 未知语言时使用的默认代码
pub const DEFAULT_LANGUAGE_CODE: &str = "zh-CN";

/// 默认目标语言名
pub const DEFAULT_LANGUAGE: &str = "Chinese (Simplified)";

/// 语言名（小写）-> 翻译代码
const LANGUAGE_CODES: &[(&str, &str)] = &[
    ("mandarin chinese", "zh-CN"),
    ("chinese (simplified)", "zh-CN"),
    ("simplified chinese", "zh-CN"),
    ("chinese", "zh-CN"),
    ("chinese (traditional)", "zh-TW"),
    ("traditional chinese", "zh-TW"),
    ("cantonese", "zh-TW"),
    ("spanish", "es"),
    ("hindi", "hi"),
    ("arabic", "ar"),
    ("korean", "ko"),
    ("japanese", "ja"),
    ("french", "fr"),
    ("german", "de"),
    ("indonesian", "id"),
    ("vietnamese", "vi"),
    ("portuguese", "pt"),
];

/// 查找语言代码；未收录返回 `None`
pub fn lookup_language_code(language: &str) -> Option<&'static str> {
    let key = language.trim().to_lowercase();
    LANGUAGE_CODES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, code)| *code)
}

/// 查找语言代码；未收录时回退到默认代码
pub fn language_code_or_default(language: &str) -> &'static str {
    lookup_language_code(language).unwrap_or(DEFAULT_LANGUAGE_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_languages() {
        assert_eq!(lookup_language_code("Mandarin Chinese"), Some("zh-CN"));
        assert_eq!(lookup_language_code("  SPANISH "), Some("es"));
        assert_eq!(lookup_language_code("Arabic"), Some("ar"));
    }

    #[test]
    fn test_unknown_language_falls_back() {
        assert_eq!(lookup_language_code("Klingon"), None);
        assert_eq!(language_code_or_default("Klingon"), DEFAULT_LANGUAGE_CODE);
    }
}
