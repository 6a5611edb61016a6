//! 行內標記轉換模組
//!
//! 負責粗體、斜體與 [數字] 引用上標的轉換

use regex::Regex;
use std::sync::LazyLock;

static BOLD_ASTERISKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid regex"));

static BOLD_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.*?)__").expect("Invalid regex"));

static ITALIC_ASTERISK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("Invalid regex"));

static ITALIC_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(.*?)_").expect("Invalid regex"));

static CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]").expect("Invalid regex"));

/// 粗體標記 `**text**` 與 `__text__` 轉為 `<b>`
#[must_use]
pub fn apply_bold(text: &str) -> String {
    let result = BOLD_ASTERISKS.replace_all(text, "<b>$1</b>").to_string();
    BOLD_UNDERSCORES
        .replace_all(&result, "<b>$1</b>")
        .to_string()
}

/// 斜體標記 `*text*` 與 `_text_` 轉為 `<i>`
///
/// 必須在 `apply_bold` 之後呼叫，否則 `**` 會被當成兩組斜體
#[must_use]
pub fn apply_italic(text: &str) -> String {
    let result = ITALIC_ASTERISK.replace_all(text, "<i>$1</i>").to_string();
    ITALIC_UNDERSCORE
        .replace_all(&result, "<i>$1</i>")
        .to_string()
}

/// 將 `[數字]` 引用標記包成 `<sup>`
///
/// 緊鄰 HTML 標籤（前一字元為 `>` 或後一字元為 `<`）的標記
/// 視為已處理過，不再包一層
#[must_use]
pub fn superscript_citations(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for m in CITATION.find_iter(text) {
        let after_tag = text[..m.start()].ends_with('>');
        let before_tag = text[m.end()..].starts_with('<');

        result.push_str(&text[last_end..m.start()]);
        if after_tag || before_tag {
            result.push_str(m.as_str());
        } else {
            result.push_str("<sup>");
            result.push_str(m.as_str());
            result.push_str("</sup>");
        }
        last_end = m.end();
    }

    result.push_str(&text[last_end..]);
    result
}

/// 將所有 `[數字]` 引用標記包成 `<sup>`，不檢查前後文
#[must_use]
pub fn superscript_citations_all(text: &str) -> String {
    CITATION.replace_all(text, "<sup>[$1]</sup>").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_bold() {
        assert_eq!(apply_bold("**粗體**文字"), "<b>粗體</b>文字");
        assert_eq!(apply_bold("__bold__ text"), "<b>bold</b> text");
    }

    #[test]
    fn test_apply_italic() {
        assert_eq!(apply_italic("*斜體*文字"), "<i>斜體</i>文字");
        assert_eq!(apply_italic("_italic_ text"), "<i>italic</i> text");
    }

    #[test]
    fn test_bold_before_italic() {
        let text = apply_italic(&apply_bold("**重點** 與 *強調*"));
        assert_eq!(text, "<b>重點</b> 與 <i>強調</i>");
    }

    #[test]
    fn test_superscript_citations() {
        assert_eq!(
            superscript_citations("如文獻[1]所述"),
            "如文獻<sup>[1]</sup>所述"
        );
    }

    #[test]
    fn test_superscript_citations_skips_wrapped() {
        // 已包過的標記不重複處理
        assert_eq!(
            superscript_citations("<sup>[1]</sup> 與 [2]"),
            "<sup>[1]</sup> 與 <sup>[2]</sup>"
        );
    }

    #[test]
    fn test_superscript_citations_ignores_non_numeric() {
        assert_eq!(superscript_citations("[註] 不變"), "[註] 不變");
    }

    #[test]
    fn test_superscript_citations_all() {
        assert_eq!(
            superscript_citations_all("數值[1][2]"),
            "數值<sup>[1]</sup><sup>[2]</sup>"
        );
    }
}
