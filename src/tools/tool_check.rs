//! 外部工具檢查模組
//!
//! 在開始任何批次處理前確認必要的外部工具存在於 PATH 中

use anyhow::{Result, anyhow};
use std::path::PathBuf;

/// 在 PATH 中尋找外部工具，回傳完整路徑
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| anyhow!("找不到外部工具: {name}"))
}

/// ffmpeg 是唯一必要的外部工具，缺少時整個批次在掃描任何檔案前直接失敗
pub fn require_ffmpeg() -> Result<PathBuf> {
    which::which("ffmpeg").map_err(|_| {
        anyhow!(
            "找不到 ffmpeg，請先安裝後再執行（macOS: brew install ffmpeg / Ubuntu: sudo apt install ffmpeg）"
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_tool_not_found() {
        let result = require_tool("nonexistent_tool_12345");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("nonexistent_tool_12345")
        );
    }
}
