use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct GifFileInfo {
    pub path: PathBuf,
    pub size: u64,
}

/// 掃描目錄中的 GIF 檔案（不含子目錄），依檔名排序
pub fn scan_gif_files(directory: &Path) -> Result<Vec<GifFileInfo>> {
    let mut gif_files: Vec<GifFileInfo> = WalkDir::new(directory)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| is_gif_file(entry.path()))
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            Some(GifFileInfo {
                path: entry.into_path(),
                size: metadata.len(),
            })
        })
        .collect();

    gif_files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(gif_files)
}

/// 只接受小寫 .gif 副檔名（區分大小寫）
fn is_gif_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gif")
}
