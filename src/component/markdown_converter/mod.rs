//! Markdown 轉部落格 HTML 元件
//!
//! 將文章 Markdown 轉成頁面內容 HTML 與側邊導覽列 HTML

mod blocks;
mod inline;
mod main;

pub use main::MarkdownConverter;
