mod gif_scanner;
mod path_validator;
mod tool_check;

pub use gif_scanner::{GifFileInfo, scan_gif_files};
pub use path_validator::validate_directory_exists;
pub use tool_check::{require_ffmpeg, require_tool};
