use super::blocks::{
    extract_list, extract_references, extract_table, is_list_line, is_reference_line,
    render_list, render_references, render_table,
};
use super::inline::{apply_bold, apply_italic, superscript_citations};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static NUMBERED_ITEM_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.").expect("Invalid regex"));

static NUMBERED_ITEM_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\s)").expect("Invalid regex"));

static IMAGE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("Invalid regex"));

#[derive(Debug, Clone)]
struct NavigationItem {
    level: u8,
    id: String,
    title: String,
}

/// Markdown 轉部落格 HTML 的轉換器
///
/// 轉換規則：
/// - `# 標題` 轉為 `<h2 class="section-title" id="sectionN">`，其後內容包在
///   `<div class="content-section">` 中
/// - `## 標題` 轉為 `<h3 class="sub-title" id="sectionN-M">`
/// - `### 標題` 轉為 `<h4 class="mini-title">`，`#### 標題` 轉為 `<b>`
/// - 段落、表格、條列、參考文獻與圖片各轉成固定的頁面結構
///
/// 章節編號為累計狀態，一個實例只能轉換一份文件
pub struct MarkdownConverter {
    section_counter: usize,
    subsection_counter: HashMap<usize, usize>,
    current_section: Option<usize>,
    in_content_section: bool,
    navigation_items: Vec<NavigationItem>,
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            section_counter: 0,
            subsection_counter: HashMap::new(),
            current_section: None,
            in_content_section: false,
            navigation_items: Vec::new(),
        }
    }

    /// 轉換 Markdown 內容為頁面 HTML
    pub fn convert(&mut self, markdown_text: &str) -> String {
        let lines: Vec<&str> = markdown_text.split('\n').collect();
        let mut html_lines: Vec<String> = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i].trim();

            if line.starts_with("# ") {
                html_lines.extend(self.handle_section_title(line));
                i += 1;
            } else if line.starts_with("## ") {
                html_lines.push(self.handle_sub_title(line));
                i += 1;
            } else if line.starts_with("### ") {
                html_lines.push(Self::handle_mini_title(line));
                i += 1;
            } else if line.starts_with("#### ") {
                html_lines.push(Self::handle_bold_title(line));
                i += 1;
            } else if is_image_line(line) {
                i = Self::handle_image_block(&lines, i, line, &mut html_lines);
            } else if line.contains('|') && i + 1 < lines.len() && lines[i + 1].contains('|') {
                let (table_lines, next_i) = extract_table(&lines, i);
                html_lines.push(render_table(&table_lines));
                i = next_i;
            } else if is_list_line(line) {
                let (list_lines, next_i) = extract_list(&lines, i);
                html_lines.push(render_list(&list_lines));
                i = next_i;
            } else if is_reference_line(line) {
                let (ref_lines, next_i) = extract_references(&lines, i);
                html_lines.push(render_references(&ref_lines));
                i = next_i;
            } else if !line.is_empty() {
                let (paragraph_lines, next_i) = extract_paragraphs(&lines, i);
                html_lines.push(render_paragraphs(&paragraph_lines));
                i = next_i;
            } else {
                i += 1;
            }
        }

        if self.in_content_section {
            html_lines.push("</div>".to_string());
        }

        html_lines.join("\n")
    }

    /// 轉換並同時產生側邊導覽列 HTML
    pub fn convert_with_navigation(&mut self, markdown_text: &str) -> (String, String) {
        let content_html = self.convert(markdown_text);
        let navigation_html = self.generate_navigation();
        (content_html, navigation_html)
    }

    fn handle_section_title(&mut self, line: &str) -> Vec<String> {
        let title = line[2..].trim();

        let mut result = Vec::new();
        if self.in_content_section {
            result.push("</div>".to_string());
        }

        self.section_counter += 1;
        self.current_section = Some(self.section_counter);
        self.subsection_counter.insert(self.section_counter, 0);

        let section_id = format!("section{}", self.section_counter);
        result.push(format!(
            r#"<h2 class="section-title" id="{section_id}">{title}</h2>"#
        ));

        self.navigation_items.push(NavigationItem {
            level: 1,
            id: section_id,
            title: title.to_string(),
        });

        result.push(r#"<div class="content-section">"#.to_string());
        self.in_content_section = true;

        result
    }

    fn handle_sub_title(&mut self, line: &str) -> String {
        let title = line[3..].trim();

        let subsection_id = match self.current_section {
            Some(section) => {
                let counter = self.subsection_counter.entry(section).or_insert(0);
                *counter += 1;
                format!("section{section}-{counter}")
            }
            None => {
                // 文件開頭直接出現二級標題時補一個隱含章節
                self.section_counter += 1;
                self.current_section = Some(self.section_counter);
                self.subsection_counter.insert(self.section_counter, 1);
                format!("section{}-1", self.section_counter)
            }
        };

        self.navigation_items.push(NavigationItem {
            level: 2,
            id: subsection_id.clone(),
            title: title.to_string(),
        });

        format!(r#"<h3 class="sub-title" id="{subsection_id}">{title}</h3>"#)
    }

    fn handle_mini_title(line: &str) -> String {
        let title = line[4..].trim();
        format!(r#"<h4 class="mini-title">{title}</h4>"#)
    }

    fn handle_bold_title(line: &str) -> String {
        let title = line[5..].trim();
        format!("<b>{title}</b>")
    }

    /// 處理圖片行，若下方幾行內有獨立的圖床連結則優先作為 src
    fn handle_image_block(
        lines: &[&str],
        i: usize,
        line: &str,
        html_lines: &mut Vec<String>,
    ) -> usize {
        let mut next_line_url: Option<&str> = None;
        let mut skip_lines = 0;

        // 最多向下找 3 行，略過空行
        for j in (i + 1)..lines.len().min(i + 4) {
            let check_line = lines[j].trim();
            if check_line.is_empty() {
                continue;
            }
            if check_line.starts_with("http://") || check_line.starts_with("https://") {
                next_line_url = Some(check_line);
                skip_lines = j - i;
            }
            break;
        }

        let (image_html, caption_html) = render_image(line, next_line_url);
        html_lines.push(image_html);
        if let Some(caption) = caption_html {
            html_lines.push(caption);
        }

        if next_line_url.is_some() && skip_lines > 0 {
            i + skip_lines + 1
        } else {
            i + 1
        }
    }

    /// 產生側邊導覽列 HTML
    #[must_use]
    pub fn generate_navigation(&self) -> String {
        if self.navigation_items.is_empty() {
            return String::new();
        }

        let mut nav_html = Vec::new();

        for item in &self.navigation_items {
            if item.level == 1 {
                nav_html.push(format!(
                    r#"<div class="nav-item level-1" data-target="{}">"#,
                    item.id
                ));
                nav_html.push(r#"    <span class="circle"></span>"#.to_string());
                nav_html.push(format!("    {}", item.title));
                nav_html.push("</div>".to_string());
            } else {
                nav_html.push(format!(
                    r#"<div class="nav-item level-2" data-target="{}">"#,
                    item.id
                ));
                nav_html.push(r#"    <span class="circle small"></span>"#.to_string());
                nav_html.push(format!(r#"    <span class="text2">{}</span>"#, item.title));
                nav_html.push("</div>".to_string());
            }
        }

        nav_html.join("\n")
    }
}

fn is_image_line(line: &str) -> bool {
    line.contains("![") && line.contains("](")
}

fn is_block_start(line: &str) -> bool {
    line.starts_with('#')
        || is_list_line(line)
        || is_image_line(line)
        || line.contains('|')
        || is_reference_line(line)
}

/// 收集連續的段落文字行，空行不會中斷段落
fn extract_paragraphs(lines: &[&str], start_index: usize) -> (Vec<String>, usize) {
    let mut paragraph_lines = Vec::new();
    let mut i = start_index;

    while i < lines.len() {
        let line = lines[i].trim();

        if line.is_empty() {
            i += 1;
            continue;
        }

        // 起始行無條件收下，避免在無法辨識的行上原地打轉
        if i > start_index && is_block_start(line) {
            break;
        }

        paragraph_lines.push(line.to_string());
        i += 1;
    }

    (paragraph_lines, i)
}

/// 將收集到的段落行合併為一個 `<p>`
///
/// 含編號項目（`1.` 開頭）時在每個編號前插入 `<br>` 分行
fn render_paragraphs(paragraph_lines: &[String]) -> String {
    if paragraph_lines.is_empty() {
        return String::new();
    }

    let has_numbered_items = paragraph_lines
        .iter()
        .any(|line| NUMBERED_ITEM_START.is_match(line.trim()));

    let mut combined = paragraph_lines.join(" ");
    if has_numbered_items {
        combined = NUMBERED_ITEM_MARKER
            .replace_all(&combined, "<br>$1")
            .to_string();
        if let Some(stripped) = combined.strip_prefix("<br>") {
            combined = stripped.to_string();
        }
    }

    let combined = superscript_citations(&apply_italic(&apply_bold(&combined)));

    format!("<p>{combined}</p>")
}

fn render_image(line: &str, next_line_url: Option<&str>) -> (String, Option<String>) {
    match IMAGE_TAG.captures(line) {
        Some(caps) => {
            let alt_text = &caps[1];
            let src_url = next_line_url.unwrap_or(&caps[2]);

            (
                format!(r#"<img src="{src_url}" alt="{alt_text}">"#),
                Some(r#"<p class="Figure"></p>"#.to_string()),
            )
        }
        None => (line.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_title_opens_content_section() {
        let mut converter = MarkdownConverter::new();
        let html = converter.convert("# 簡介\n\n內容文字");

        assert!(html.contains(r#"<h2 class="section-title" id="section1">簡介</h2>"#));
        assert!(html.contains(r#"<div class="content-section">"#));
        assert!(html.ends_with("</div>"));
        assert!(html.contains("<p>內容文字</p>"));
    }

    #[test]
    fn test_second_section_closes_previous() {
        let mut converter = MarkdownConverter::new();
        let html = converter.convert("# 甲\n\n內容一\n\n# 乙\n\n內容二");

        let first_close = html.find("</div>").unwrap();
        let second_section = html.find("id=\"section2\"").unwrap();
        assert!(first_close < second_section);
    }

    #[test]
    fn test_subsection_numbering() {
        let mut converter = MarkdownConverter::new();
        let html = converter.convert("# 甲\n\n## 子一\n\n## 子二\n\n# 乙\n\n## 子三");

        assert!(html.contains(r#"id="section1-1">子一"#));
        assert!(html.contains(r#"id="section1-2">子二"#));
        assert!(html.contains(r#"id="section2-1">子三"#));
    }

    #[test]
    fn test_subsection_without_section() {
        let mut converter = MarkdownConverter::new();
        let html = converter.convert("## 孤立子章節");

        assert!(html.contains(r#"<h3 class="sub-title" id="section1-1">孤立子章節</h3>"#));
    }

    #[test]
    fn test_mini_and_bold_titles() {
        let mut converter = MarkdownConverter::new();
        let html = converter.convert("### 小標\n\n#### 重點標");

        assert!(html.contains(r#"<h4 class="mini-title">小標</h4>"#));
        assert!(html.contains("<b>重點標</b>"));
    }

    #[test]
    fn test_paragraphs_merge_across_blank_lines() {
        let mut converter = MarkdownConverter::new();
        let html = converter.convert("第一句。\n\n第二句。");

        assert_eq!(html, "<p>第一句。 第二句。</p>");
    }

    #[test]
    fn test_numbered_paragraph_inserts_breaks() {
        let mut converter = MarkdownConverter::new();
        let html = converter.convert("1. 第一步\n2. 第二步");

        assert_eq!(html, "<p>1. 第一步 <br>2. 第二步</p>");
    }

    #[test]
    fn test_paragraph_inline_formatting() {
        let mut converter = MarkdownConverter::new();
        let html = converter.convert("引用**重點**結果[1]");

        assert_eq!(html, "<p>引用<b>重點</b>結果<sup>[1]</sup></p>");
    }

    #[test]
    fn test_image_with_following_url() {
        let mut converter = MarkdownConverter::new();
        let html = converter.convert("![架構圖](local.png)\n\nhttps://img.example.com/arch.png\n\n後續段落");

        assert!(html.contains(r#"<img src="https://img.example.com/arch.png" alt="架構圖">"#));
        assert!(html.contains(r#"<p class="Figure"></p>"#));
        assert!(html.contains("<p>後續段落</p>"));
        assert!(!html.contains("<p>https://"));
    }

    #[test]
    fn test_image_without_following_url() {
        let mut converter = MarkdownConverter::new();
        let html = converter.convert("![圖](https://example.com/a.png)");

        assert!(html.contains(r#"<img src="https://example.com/a.png" alt="圖">"#));
    }

    #[test]
    fn test_navigation_levels() {
        let mut converter = MarkdownConverter::new();
        let (_, nav) = converter.convert_with_navigation("# 甲\n\n## 子一");

        assert!(nav.contains(r#"<div class="nav-item level-1" data-target="section1">"#));
        assert!(nav.contains(r#"    <span class="circle"></span>"#));
        assert!(nav.contains("    甲"));
        assert!(nav.contains(r#"<div class="nav-item level-2" data-target="section1-1">"#));
        assert!(nav.contains(r#"    <span class="circle small"></span>"#));
        assert!(nav.contains(r#"    <span class="text2">子一</span>"#));
    }

    #[test]
    fn test_navigation_empty_without_titles() {
        let mut converter = MarkdownConverter::new();
        let (_, nav) = converter.convert_with_navigation("只有段落");

        assert!(nav.is_empty());
    }

    #[test]
    fn test_unrecognized_hash_line_does_not_hang() {
        let mut converter = MarkdownConverter::new();
        let html = converter.convert("#無空格標題");

        assert_eq!(html, "<p>#無空格標題</p>");
    }
}
