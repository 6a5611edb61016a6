use super::ffmpeg_command::FfmpegCommand;
use anyhow::{Context, Result, bail};
use log::debug;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// 單一 GIF 檔案的轉換任務
#[derive(Debug, Clone)]
pub struct ConversionTask {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
}

impl ConversionTask {
    #[must_use]
    pub fn new(source_path: &Path) -> Self {
        let ffmpeg_cmd = FfmpegCommand::new(source_path);
        Self {
            source_path: source_path.to_path_buf(),
            destination_path: ffmpeg_cmd.destination_path().to_path_buf(),
        }
    }

    #[must_use]
    pub fn source_file_name(&self) -> String {
        self.source_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// 編碼器回報成功且輸出檔案非空
    Success { size_bytes: u64 },
    /// 編碼器以非零狀態結束
    EncodeFailed { message: String },
    /// 編碼器回報成功但輸出檔案不存在或為空
    EmptyOutput,
}

impl ConversionOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// 單一任務的轉換結果，每個輸入檔案恰好產生一筆
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub task: ConversionTask,
    pub outcome: ConversionOutcome,
}

impl ConversionResult {
    /// 成功時的輸出檔案大小（KB，整數除法）
    #[must_use]
    pub fn size_kb(&self) -> Option<u64> {
        match self.outcome {
            ConversionOutcome::Success { size_bytes } => Some(size_bytes / 1024),
            _ => None,
        }
    }
}

/// 外部轉檔工具的介面，測試時以假實作替換
pub trait Transcoder: Sync {
    /// 執行單一轉換，Err 代表編碼器回報失敗
    fn convert(&self, task: &ConversionTask) -> Result<()>;
}

/// 以 ffmpeg 子程序實作的轉檔器
pub struct FfmpegTranscoder {
    capture_tool_output: bool,
}

impl FfmpegTranscoder {
    #[must_use]
    pub const fn new(capture_tool_output: bool) -> Self {
        Self {
            capture_tool_output,
        }
    }
}

impl Transcoder for FfmpegTranscoder {
    fn convert(&self, task: &ConversionTask) -> Result<()> {
        let ffmpeg_cmd = FfmpegCommand::new(&task.source_path);
        let mut command = ffmpeg_cmd.build_command();
        command.stdout(Stdio::null());

        let status = if self.capture_tool_output {
            command.stderr(Stdio::piped());
            let mut child = command
                .spawn()
                .with_context(|| format!("無法啟動 ffmpeg: {}", task.source_path.display()))?;

            if let Some(stderr) = child.stderr.take() {
                for line in BufReader::new(stderr).lines().map_while(Result::ok) {
                    debug!("ffmpeg [{}]: {}", task.source_file_name(), line);
                }
            }

            child
                .wait()
                .with_context(|| format!("無法等待 ffmpeg 結束: {}", task.source_path.display()))?
        } else {
            command.stderr(Stdio::null());
            command
                .status()
                .with_context(|| format!("無法啟動 ffmpeg: {}", task.source_path.display()))?
        };

        if !status.success() {
            match status.code() {
                Some(code) => bail!("ffmpeg 結束碼 {code}"),
                None => bail!("ffmpeg 被信號中止"),
            }
        }

        Ok(())
    }
}

/// 執行單一任務並檢查輸出檔案
///
/// 編碼器回報成功仍須確認輸出檔案存在且非空；
/// 回報失敗時不檢查也不刪除任何部分輸出
pub fn execute_task(transcoder: &dyn Transcoder, task: &ConversionTask) -> ConversionResult {
    let outcome = match transcoder.convert(task) {
        Ok(()) => {
            let size = fs::metadata(&task.destination_path)
                .map(|m| m.len())
                .unwrap_or(0);
            if size > 0 {
                ConversionOutcome::Success { size_bytes: size }
            } else {
                ConversionOutcome::EmptyOutput
            }
        }
        Err(e) => ConversionOutcome::EncodeFailed {
            message: e.to_string(),
        },
    };

    ConversionResult {
        task: task.clone(),
        outcome,
    }
}
