//! GIF 貼圖轉換元件
//!
//! 使用 ffmpeg 將 GIF 動圖轉換為 512x512 循環播放的 WebP 貼圖

mod ffmpeg_command;
mod main;
mod parallel;
mod transcoder;

pub use ffmpeg_command::FfmpegCommand;
pub use main::GifConverter;
pub use transcoder::{
    ConversionOutcome, ConversionResult, ConversionTask, FfmpegTranscoder, Transcoder,
    execute_task,
};
