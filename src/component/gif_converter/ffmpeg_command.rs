use std::path::{Path, PathBuf};
use std::process::Command;

pub struct FfmpegCommand {
    source_path: PathBuf,
    destination_path: PathBuf,
}

impl FfmpegCommand {
    #[must_use]
    pub fn new(source_path: &Path) -> Self {
        let destination_path = Self::generate_destination_path(source_path);
        Self {
            source_path: source_path.to_path_buf(),
            destination_path,
        }
    }

    fn generate_destination_path(source_path: &Path) -> PathBuf {
        let file_stem = source_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let parent = source_path.parent().unwrap_or(Path::new("."));
        parent.join(format!("{file_stem}.webp"))
    }

    #[must_use]
    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }

    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new("ffmpeg");

        cmd.args([
            "-hide_banner",
            "-nostdin",
            "-loglevel", "error",
            "-i", &self.source_path.display().to_string(),
            // 降到 10fps，等比縮進 512x512 後以白色補滿成正方形
            "-vf",
            "fps=10,scale=512:512:force_original_aspect_ratio=decrease,pad=512:512:(ow-iw)/2:(oh-ih)/2:white",
            "-loop", "0",
            "-an", "-sn", "-dn",
            "-map_metadata", "-1",
            "-c:v", "libwebp",
            "-lossless", "0",
            "-quality", "75",
            "-y",
        ]);
        cmd.arg(&self.destination_path);

        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_destination_path() {
        let source = Path::new("/stickers/dance.gif");
        let cmd = FfmpegCommand::new(source);
        assert_eq!(cmd.destination_path(), Path::new("/stickers/dance.webp"));
    }

    #[test]
    fn test_generate_destination_path_with_dots() {
        let source = Path::new("/stickers/cat.v2.final.gif");
        let cmd = FfmpegCommand::new(source);
        assert_eq!(
            cmd.destination_path(),
            Path::new("/stickers/cat.v2.final.webp")
        );
    }

    #[test]
    fn test_generate_destination_path_relative() {
        let source = Path::new("wave.gif");
        let cmd = FfmpegCommand::new(source);
        assert_eq!(cmd.destination_path(), Path::new("wave.webp"));
    }

    #[test]
    fn test_build_command_arguments() {
        let source = Path::new("/stickers/dance.gif");
        let cmd = FfmpegCommand::new(source).build_command();

        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();

        assert!(args.contains(&"-y".to_string()));
        assert!(args.contains(&"-loop".to_string()));
        assert!(args.iter().any(|a| a.contains("force_original_aspect_ratio")));
        assert_eq!(args.last().unwrap(), "/stickers/dance.webp");
    }
}
