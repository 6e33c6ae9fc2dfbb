// 宿主标准语言代码与 MOJi 内部语言代码的对照表
const LANGUAGES: &[(&str, &str)] = &[
    ("auto", "auto"),
    ("zh-Hans", "zh"),
    ("zh-Hant", "zh"),
    ("en", "en"),
    ("ja", "ja"),
];

/// 返回支持的语言列表（宿主标准代码）
pub fn supported_languages() -> Vec<&'static str> {
    LANGUAGES.iter().map(|(standard, _)| *standard).collect()
}

/// 宿主语言代码 -> 服务语言代码
pub fn to_service_code(standard: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(code, _)| *code == standard)
        .map(|(_, lang)| *lang)
}

/// 服务语言代码 -> 宿主语言代码，多个条目对应同一代码时取最后一个
pub fn to_standard_code(lang: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .rev()
        .find(|(_, code)| *code == lang)
        .map(|(standard, _)| *standard)
}

pub fn is_supported(standard: &str) -> bool {
    to_service_code(standard).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_languages_in_order() {
        assert_eq!(
            supported_languages(),
            vec!["auto", "zh-Hans", "zh-Hant", "en", "ja"]
        );
    }

    #[test]
    fn maps_both_directions() {
        assert_eq!(to_service_code("zh-Hans"), Some("zh"));
        assert_eq!(to_service_code("ja"), Some("ja"));
        assert_eq!(to_service_code("fr"), None);

        assert_eq!(to_standard_code("en"), Some("en"));
        assert_eq!(to_standard_code("zh"), Some("zh-Hant"));
        assert_eq!(to_standard_code("ko"), None);
    }

    #[test]
    fn auto_is_supported() {
        assert!(is_supported("auto"));
        assert!(!is_supported("de"));
    }
}
