//! 报告页面渲染
//!
//! 每个分类输出一个标题和一张表，所有插入的文本都会转义。

use crate::models::{Category, Report, StockRow, COLUMNS};

/// 页面外观参数
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// 静态资源前缀
    pub assets_base: String,
    /// 页脚站点名
    pub site_name: String,
    /// 页脚年份
    pub year: i32,
}

/// 渲染完整的报告页面
pub fn render_report_page(report: &Report, page: &PageOptions) -> String {
    let label = html_escape(&report.label);
    let assets = html_escape(page.assets_base.trim_end_matches('/'));
    let tables: String = report.categories.iter().map(render_category).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Daily Technical Analysis Report - {label}</title>
<link rel="stylesheet" href="{assets}/style.css">
<script src="{assets}/script.js"></script>
</head>
<body>
<h1>Daily Technical Analysis Report ({label})</h1>
{tables}
{footer}
</body>
</html>
"#,
        label = label,
        assets = assets,
        tables = tables,
        footer = render_footer(page),
    )
}

fn render_category(category: &Category) -> String {
    let header: String = COLUMNS
        .iter()
        .map(|col| format!("        <th>{}</th>\n", html_escape(col)))
        .collect();
    let rows: String = category.rows.iter().map(render_row).collect();

    format!(
        "<h2>{name}</h2>\n<table>\n  <thead>\n    <tr>\n{header}    </tr>\n  </thead>\n  <tbody>\n{rows}  </tbody>\n</table>\n",
        name = html_escape(&category.name),
        header = header,
        rows = rows,
    )
}

fn render_row(row: &StockRow) -> String {
    let cells: String = row
        .cells()
        .iter()
        .map(|cell| format!("      <td>{}</td>\n", html_escape(&cell.to_string())))
        .collect();
    format!("    <tr>\n{}    </tr>\n", cells)
}

fn render_footer(page: &PageOptions) -> String {
    format!(
        "<footer>\n  <p>&copy; {} {} | Auto-updated trading insights</p>\n</footer>",
        page.year,
        html_escape(&page.site_name),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
