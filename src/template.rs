//! Assembles the final HTML document handed to the PDF renderer.

use crate::html::escape_html;
use crate::theme::Theme;

/// Wrap a rendered body fragment in the full document shell.
pub fn render_document(fragment: &str, title: &str, theme: &Theme) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>{title}</title>
<style>
{style}</style>
</head>
<body>
{fragment}
</body>
</html>
"#,
        title = escape_html(title),
        style = stylesheet(theme),
        fragment = fragment,
    )
}

/// Print stylesheet for the report layout.
///
/// Headings keep their following content on the same page, code blocks
/// and tables are not split across pages, and the outline gets its own
/// page when [`Theme::toc`] asks for one.
fn stylesheet(theme: &Theme) -> String {
    let toc_break = if theme.toc.paginate { "always" } else { "auto" };
    format!(
        r#"@page {{
    size: {page_size};
    margin: {page_margin};
}}
body {{
    font-family: {body_font};
    line-height: {line_height};
    color: {text_color};
}}
h1 {{
    color: {h1_color};
    border-bottom: 3px solid {h1_color};
    padding-bottom: 10px;
    page-break-after: avoid;
}}
h2 {{
    color: {h2_color};
    border-bottom: 2px solid {h2_color};
    padding-bottom: 5px;
    margin-top: 30px;
    page-break-after: avoid;
}}
h3 {{
    color: {h3_color};
    margin-top: 20px;
    page-break-after: avoid;
}}
code {{
    background-color: {code_background};
    padding: 2px 5px;
    border-radius: 3px;
    font-family: {code_font};
}}
pre {{
    background-color: {code_background};
    padding: 15px;
    border-radius: 5px;
    overflow-x: auto;
    page-break-inside: avoid;
}}
table {{
    border-collapse: collapse;
    width: 100%;
    margin: 20px 0;
    page-break-inside: avoid;
}}
th, td {{
    border: 1px solid {table_border};
    padding: 12px;
    text-align: left;
}}
th {{
    background-color: {table_header_background};
    color: {table_header_text};
}}
tr:nth-child(even) {{
    background-color: {table_stripe};
}}
.toc {{
    page-break-after: {toc_break};
}}
.toc ul {{
    list-style-type: none;
    padding-left: 20px;
}}
.toc a {{
    text-decoration: none;
    color: {toc_link};
}}
p {{
    text-align: justify;
}}
ul, ol {{
    margin: 10px 0;
    padding-left: 30px;
}}
li {{
    margin: 5px 0;
}}
hr {{
    border: none;
    border-top: 2px solid {rule_color};
    margin: 30px 0;
}}
"#,
        page_size = theme.page.size,
        page_margin = theme.page.margin,
        body_font = theme.body.font_family,
        line_height = theme.body.line_height,
        text_color = theme.body.text_color,
        h1_color = theme.headings.h1_color,
        h2_color = theme.headings.h2_color,
        h3_color = theme.headings.h3_color,
        code_background = theme.code.background,
        code_font = theme.code.font_family,
        table_border = theme.table.border_color,
        table_header_background = theme.table.header_background,
        table_header_text = theme.table.header_text,
        table_stripe = theme.table.stripe_background,
        toc_break = toc_break,
        toc_link = theme.toc.link_color,
        rule_color = theme.body.rule_color,
    )
}
