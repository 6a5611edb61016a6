use super::transcoder::{ConversionOutcome, ConversionResult, ConversionTask, Transcoder, execute_task};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// 平行轉換多個 GIF
///
/// 使用固定上限的 rayon 工作緒池，每個 ffmpeg 程序各自獨立，
/// 回報順序為完成順序而非發現順序
pub fn convert_parallel(
    tasks: &[ConversionTask],
    transcoder: &dyn Transcoder,
    max_jobs: usize,
    shutdown_signal: &AtomicBool,
    report: impl Fn(&ConversionResult) + Sync,
) -> Result<Vec<ConversionResult>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(max_jobs)
        .build()
        .context("無法建立轉換工作緒池")?;

    let progress_bar = ProgressBar::new(tasks.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    progress_bar.set_message("轉換 GIF 中...");

    let results = pool.install(|| {
        tasks
            .par_iter()
            .map(|task| {
                if shutdown_signal.load(Ordering::SeqCst) {
                    progress_bar.inc(1);
                    return ConversionResult {
                        task: task.clone(),
                        outcome: ConversionOutcome::EncodeFailed {
                            message: "操作已取消".to_string(),
                        },
                    };
                }

                let result = execute_task(transcoder, task);
                progress_bar.suspend(|| report(&result));
                progress_bar.inc(1);
                result
            })
            .collect()
    });

    progress_bar.finish_with_message("完成");

    Ok(results)
}
