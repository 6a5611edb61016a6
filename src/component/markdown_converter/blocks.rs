//! 區塊元素轉換模組
//!
//! 表格、條列與參考文獻區塊轉成部落格頁面使用的 HTML 結構

use super::inline::{apply_bold, superscript_citations_all};
use regex::Regex;
use std::sync::LazyLock;

static REFERENCE_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(\d+)\](.*)").expect("Invalid regex"));

static REFERENCE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\d+\]").expect("Invalid regex"));

#[must_use]
pub fn is_list_line(line: &str) -> bool {
    line.starts_with("- ") || line.starts_with("* ")
}

#[must_use]
pub fn is_reference_line(line: &str) -> bool {
    REFERENCE_START.is_match(line)
}

/// 從起始位置收集連續含 `|` 的表格行
pub fn extract_table(lines: &[&str], start_index: usize) -> (Vec<String>, usize) {
    let mut table_lines = Vec::new();
    let mut i = start_index;

    while i < lines.len() {
        let line = lines[i].trim();
        if line.contains('|') {
            table_lines.push(line.to_string());
            i += 1;
        } else {
            break;
        }
    }

    (table_lines, i)
}

/// 從起始位置收集條列行，允許項目之間夾空行
pub fn extract_list(lines: &[&str], start_index: usize) -> (Vec<String>, usize) {
    let mut list_lines = Vec::new();
    let mut i = start_index;

    while i < lines.len() {
        let line = lines[i].trim();
        let next_is_item = i + 1 < lines.len() && is_list_line(lines[i + 1].trim());

        if is_list_line(line) || (line.is_empty() && next_is_item) {
            if !line.is_empty() {
                list_lines.push(line.to_string());
            }
            i += 1;
        } else {
            break;
        }
    }

    (list_lines, i)
}

/// 從起始位置收集參考文獻行，允許條目之間夾空行
pub fn extract_references(lines: &[&str], start_index: usize) -> (Vec<String>, usize) {
    let mut ref_lines = Vec::new();
    let mut i = start_index;

    while i < lines.len() {
        let line = lines[i].trim();
        let next_is_entry = i + 1 < lines.len() && is_reference_line(lines[i + 1].trim());

        if is_reference_line(line) || (line.is_empty() && next_is_entry) {
            if !line.is_empty() {
                ref_lines.push(line.to_string());
            }
            i += 1;
        } else {
            break;
        }
    }

    (ref_lines, i)
}

/// 標頭之後的分隔行只由 `|`、`-` 與空白組成
fn is_separator_row(line: &str) -> bool {
    line.chars().all(|c| matches!(c, '|' | '-' | ' '))
}

fn split_cells(row: &str) -> Vec<String> {
    row.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// 表格行轉成 `<table>`，第一行視為標頭
#[must_use]
pub fn render_table(table_lines: &[String]) -> String {
    if table_lines.is_empty() {
        return String::new();
    }

    let mut html = vec!["<table>".to_string()];

    html.push("    <thead>".to_string());
    html.push("        <tr>".to_string());
    for cell in split_cells(&table_lines[0]) {
        html.push(format!(
            "            <th>{}</th>",
            superscript_citations_all(&cell)
        ));
    }
    html.push("        </tr>".to_string());
    html.push("    </thead>".to_string());

    let start_row = if table_lines.len() > 1 && is_separator_row(&table_lines[1]) {
        2
    } else {
        1
    };

    if table_lines.len() > start_row {
        html.push("    <tbody>".to_string());
        for row in &table_lines[start_row..] {
            html.push("        <tr>".to_string());
            for cell in split_cells(row) {
                html.push(format!(
                    "            <td>{}</td>",
                    superscript_citations_all(&cell)
                ));
            }
            html.push("        </tr>".to_string());
        }
        html.push("    </tbody>".to_string());
    }

    html.push("</table>".to_string());
    html.join("\n")
}

/// 條列行轉成 `<ul class="uul">`，每個項目內容包在 `<p>` 中
#[must_use]
pub fn render_list(list_lines: &[String]) -> String {
    if list_lines.is_empty() {
        return String::new();
    }

    let mut html = vec![r#"<ul class="uul">"#.to_string()];

    for line in list_lines {
        let content = apply_bold(line[2..].trim());
        html.push("    <li>".to_string());
        html.push(format!("        <p>{content}</p>"));
        html.push("    </li>".to_string());
    }

    html.push("</ul>".to_string());
    html.join("\n")
}

/// 參考文獻行轉成 `<ul class="references">`，編號包在獨立的 span 中
#[must_use]
pub fn render_references(ref_lines: &[String]) -> String {
    if ref_lines.is_empty() {
        return String::new();
    }

    let mut html = vec![r#"<ul class="references">"#.to_string()];

    for line in ref_lines {
        if let Some(caps) = REFERENCE_ENTRY.captures(line) {
            let number = &caps[1];
            let content = caps[2].trim();
            html.push("    <li>".to_string());
            html.push(format!(
                r#"        <span class="reference-number">[{number}]</span>{content}"#
            ));
            html.push("    </li>".to_string());
        }
    }

    html.push("</ul>".to_string());
    html.join("\n")
}
