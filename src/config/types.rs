use serde::{Deserialize, Serialize};
use std::fmt;

/// 介面語言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::ZhTw
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GIF 轉檔設定
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GifConverterSettings {
    /// 保留 ffmpeg 的診斷輸出並轉送到 log（不會混入轉檔報告）
    pub capture_tool_output: bool,
    /// 任一檔案轉換失敗時，程式以非零狀態碼結束
    pub fail_on_error: bool,
    /// 同時轉檔的數量上限，1 表示嚴格逐一處理
    pub max_parallel_jobs: usize,
}

impl Default for GifConverterSettings {
    fn default() -> Self {
        Self {
            capture_tool_output: false,
            fail_on_error: false,
            max_parallel_jobs: 1,
        }
    }
}

/// 使用者設定，對應工作目錄下的 settings.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    pub gif_converter: GifConverterSettings,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: UserSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = UserSettings::default();
        assert_eq!(settings.language, Language::ZhTw);
        assert!(!settings.gif_converter.capture_tool_output);
        assert!(!settings.gif_converter.fail_on_error);
        assert_eq!(settings.gif_converter.max_parallel_jobs, 1);
    }

    #[test]
    fn test_parse_full_settings() {
        let json = r#"{
            "language": "en-US",
            "gif_converter": {
                "capture_tool_output": true,
                "fail_on_error": true,
                "max_parallel_jobs": 4
            }
        }"#;
        let settings: UserSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.language, Language::EnUs);
        assert!(settings.gif_converter.capture_tool_output);
        assert!(settings.gif_converter.fail_on_error);
        assert_eq!(settings.gif_converter.max_parallel_jobs, 4);
    }

    #[test]
    fn test_parse_partial_settings_uses_defaults() {
        let json = r#"{"gif_converter": {"fail_on_error": true}}"#;
        let settings: UserSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.language, Language::ZhTw);
        assert!(settings.gif_converter.fail_on_error);
        assert_eq!(settings.gif_converter.max_parallel_jobs, 1);
    }

    #[test]
    fn test_language_as_str() {
        assert_eq!(Language::EnUs.as_str(), "en-US");
        assert_eq!(Language::ZhTw.as_str(), "zh-TW");
        assert_eq!(Language::ZhTw.to_string(), "zh-TW");
    }
}
