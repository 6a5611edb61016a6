use super::parallel::convert_parallel;
use super::transcoder::{
    ConversionOutcome, ConversionResult, ConversionTask, FfmpegTranscoder, Transcoder,
    execute_task,
};
use crate::config::Config;
use crate::tools::{require_ffmpeg, scan_gif_files, validate_directory_exists};
use anyhow::Result;
use console::style;
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct GifConverter {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl GifConverter {
    #[must_use]
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    /// 轉換指定資料夾內的所有 GIF，回傳每個檔案的轉換結果
    pub fn run(&self, directory: &Path) -> Result<Vec<ConversionResult>> {
        println!("{}", style("=== GIF 貼圖轉換 ===").cyan().bold());

        validate_directory_exists(directory)?;

        // 缺少 ffmpeg 必須在列出任何檔案前就失敗
        require_ffmpeg()?;

        println!("{}", style("掃描 GIF 檔案中...").dim());
        let gif_files = scan_gif_files(directory)?;

        if gif_files.is_empty() {
            println!("{}", style("找不到任何 GIF 檔案").yellow());
            self.print_summary(0, &[]);
            return Ok(Vec::new());
        }

        println!(
            "{}",
            style(format!("找到 {} 個 GIF 檔案：", gif_files.len())).green()
        );

        for (index, file) in gif_files.iter().enumerate() {
            println!(
                "  {}. {} ({} KB)",
                index + 1,
                file.path.file_name().unwrap_or_default().to_string_lossy(),
                file.size / 1024
            );
        }

        println!();
        println!("{}", style("開始轉換...").cyan());

        let settings = &self.config.settings.gif_converter;
        let transcoder = FfmpegTranscoder::new(settings.capture_tool_output);
        let tasks: Vec<ConversionTask> = gif_files
            .iter()
            .map(|file| ConversionTask::new(&file.path))
            .collect();

        let results = if settings.max_parallel_jobs > 1 {
            convert_parallel(
                &tasks,
                &transcoder,
                settings.max_parallel_jobs,
                &self.shutdown_signal,
                |result| Self::print_result_line(result),
            )?
        } else {
            self.convert_sequential(&tasks, &transcoder)
        };

        self.print_summary(tasks.len(), &results);

        Ok(results)
    }

    /// 逐檔轉換，每個檔案完成後立即回報才處理下一個
    fn convert_sequential(
        &self,
        tasks: &[ConversionTask],
        transcoder: &dyn Transcoder,
    ) -> Vec<ConversionResult> {
        let mut results = Vec::with_capacity(tasks.len());

        for task in tasks {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                warn!("收到中斷信號，停止剩餘轉換");
                break;
            }

            let result = execute_task(transcoder, task);
            Self::print_result_line(&result);
            results.push(result);
        }

        results
    }

    fn print_result_line(result: &ConversionResult) {
        let name = result.task.source_file_name();
        match &result.outcome {
            ConversionOutcome::Success { .. } => {
                let kb = result.size_kb().unwrap_or(0);
                println!("  {} {} ({kb} KB)", style("✓").green(), name);
            }
            ConversionOutcome::EncodeFailed { message } => {
                println!("  {} {}: {}", style("✗").red(), name, style(message).red());
            }
            ConversionOutcome::EmptyOutput => {
                println!(
                    "  {} {}: {}",
                    style("✗").red(),
                    name,
                    style("輸出檔案不存在或為空").red()
                );
            }
        }
    }

    fn print_summary(&self, total_files: usize, results: &[ConversionResult]) {
        let succeeded = results.iter().filter(|r| r.outcome.is_success()).count();
        let failed = results.len() - succeeded;
        let skipped = total_files - results.len();

        println!();
        println!("{}", style("=== GIF 轉換摘要 ===").cyan().bold());
        println!("  總計: {total_files} 個檔案");
        println!("  成功: {} 個", style(succeeded).green());
        if failed > 0 {
            println!("  失敗: {} 個", style(failed).red());
        }
        if skipped > 0 {
            println!("  未處理: {} 個", style(skipped).yellow());
        }

        println!();
        println!("{}", style("全部完成").green().bold());
        println!(
            "{}",
            style("WebP 檔案輸出於來源資料夾，檔名相同、副檔名為 .webp").dim()
        );

        info!("GIF 轉換完成 - 成功: {succeeded}, 失敗: {failed}");
    }
}
