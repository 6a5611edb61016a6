//! Markdown 轉部落格 HTML 的命令列工具
//!
//! 用法:
//!   md2html <輸入.md> <輸出.html>  轉換指定檔案，導覽列輸出到 <輸出>_nav.html
//!   md2html                        轉換目前資料夾的 origin.md

use anyhow::{Context, Result};
use auto_gif_convert::component::MarkdownConverter;
use auto_gif_convert::init;
use console::style;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    init::init();

    let args: Vec<String> = env::args().collect();

    let result = match args.len() {
        1 => convert_file(
            Path::new("origin.md"),
            Path::new("output.html"),
            Path::new("navigation.html"),
        ),
        3 => {
            let output_path = Path::new(&args[2]);
            let nav_path = navigation_path(output_path);
            convert_file(Path::new(&args[1]), output_path, &nav_path)
        }
        _ => {
            eprintln!("用法: {} [輸入.md 輸出.html]", args[0]);
            eprintln!();
            eprintln!("不帶參數時轉換目前資料夾的 origin.md 為 output.html 與 navigation.html");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("錯誤:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn convert_file(input_path: &Path, output_path: &Path, nav_path: &Path) -> Result<()> {
    let markdown_content = fs::read_to_string(input_path)
        .with_context(|| format!("無法讀取檔案: {}", input_path.display()))?;

    let mut converter = MarkdownConverter::new();
    let (content_html, navigation_html) = converter.convert_with_navigation(&markdown_content);

    fs::write(output_path, content_html)
        .with_context(|| format!("無法寫入檔案: {}", output_path.display()))?;
    fs::write(nav_path, navigation_html)
        .with_context(|| format!("無法寫入檔案: {}", nav_path.display()))?;

    println!(
        "{}",
        style(format!(
            "轉換完成: {} -> {}",
            input_path.display(),
            output_path.display()
        ))
        .green()
    );
    println!("導覽列已儲存到: {}", nav_path.display());

    Ok(())
}

/// 依輸出檔名產生導覽列檔名（`xxx.html` -> `xxx_nav.html`）
fn navigation_path(output_path: &Path) -> PathBuf {
    let name = output_path.to_string_lossy();
    match name.strip_suffix(".html") {
        Some(stem) => PathBuf::from(format!("{stem}_nav.html")),
        None => PathBuf::from(format!("{name}_nav.html")),
    }
}
