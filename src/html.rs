//! Markdown-to-HTML conversion.
//!
//! Parsing and serialization are delegated to pulldown-cmark; this module
//! adds the two behaviors the document shell relies on: every heading gets
//! a stable `id` anchor, and a paragraph consisting solely of `[TOC]` is
//! replaced with the generated outline.

use pulldown_cmark::{html, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::toc::{self, Slugs, TocEntry};

/// The HTML fragment for a Markdown document, plus the first H1 text
/// (used as the default document title).
pub(crate) struct Fragment {
    pub html: String,
    pub title: Option<String>,
}

/// Recognized Markdown extensions: tables, fenced code blocks, and the
/// `[TOC]` outline. Fenced code is core CommonMark in pulldown-cmark;
/// nothing else is switched on.
fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options
}

/// Convert Markdown text to an HTML fragment.
pub(crate) fn render(markdown: &str) -> Fragment {
    let headings = collect_headings(markdown);
    let title = headings
        .iter()
        .find(|h| h.level == 1)
        .map(|h| h.text.clone());

    let mut slugs = Slugs::new();
    let entries: Vec<TocEntry> = headings
        .into_iter()
        .map(|h| {
            let slug = slugs.assign(&h.text);
            TocEntry {
                level: h.level,
                text: h.text,
                slug,
            }
        })
        .collect();
    let outline = toc::render_outline(&entries);

    let mut events: Vec<Event> = Vec::new();
    let mut paragraph: Option<Vec<Event>> = None;
    let mut next_heading = 0usize;

    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            // Headings never occur inside a paragraph, so these two arms
            // cannot interleave with the buffering below.
            Event::Start(Tag::Heading {
                level,
                classes,
                attrs,
                ..
            }) => {
                let id = entries
                    .get(next_heading)
                    .map(|entry| CowStr::from(entry.slug.clone()));
                next_heading += 1;
                events.push(Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }));
            }
            Event::Start(Tag::Paragraph) => {
                paragraph = Some(Vec::new());
            }
            Event::End(TagEnd::Paragraph) => {
                let buffered = paragraph.take().unwrap_or_default();
                if is_outline_marker(&buffered) {
                    events.push(Event::Html(CowStr::from(outline.clone())));
                } else {
                    events.push(Event::Start(Tag::Paragraph));
                    events.extend(buffered);
                    events.push(Event::End(TagEnd::Paragraph));
                }
            }
            other => match paragraph.as_mut() {
                Some(buffer) => buffer.push(other),
                None => events.push(other),
            },
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    Fragment { html: out, title }
}

/// True when the buffered paragraph is exactly the `[TOC]` marker.
/// Unresolved bracket references reach us as several text events.
fn is_outline_marker(events: &[Event]) -> bool {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) => text.push_str(t),
            _ => return false,
        }
    }
    text.trim() == toc::MARKER
}

struct RawHeading {
    level: u8,
    text: String,
}

/// First pass: the plain text and level of every heading, in order.
fn collect_headings(markdown: &str) -> Vec<RawHeading> {
    let mut headings = Vec::new();
    let mut current: Option<RawHeading> = None;

    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some(RawHeading {
                    level: heading_level_to_u8(level),
                    text: String::new(),
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = current.take() {
                    headings.push(heading);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push(' ');
                }
            }
            _ => {}
        }
    }

    headings
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Escape text for interpolation into HTML.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_get_id_anchors() {
        let fragment = render("# Title\n\n## Section");
        assert!(fragment.html.contains("<h1 id=\"title\">Title</h1>"));
        assert!(fragment.html.contains("<h2 id=\"section\">Section</h2>"));
    }

    #[test]
    fn duplicate_headings_get_distinct_anchors() {
        let fragment = render("# Setup\n\n# Setup");
        assert!(fragment.html.contains("<h1 id=\"setup\">Setup</h1>"));
        assert!(fragment.html.contains("<h1 id=\"setup_1\">Setup</h1>"));
    }

    #[test]
    fn tables_emphasis_and_headings_render() {
        let markdown = "# Title\n\nSome *text*.\n\n| a | b |\n|---|---|\n| 1 | 2 |";
        let fragment = render(markdown);
        assert!(fragment.html.contains("<h1 id=\"title\">Title</h1>"));
        assert!(fragment.html.contains("<em>text</em>"));
        assert!(fragment.html.contains("<table>"));
        assert!(fragment.html.contains("<th>a</th>"));
        assert!(fragment.html.contains("<th>b</th>"));
        assert!(fragment.html.contains("<td>1</td>"));
        assert!(fragment.html.contains("<td>2</td>"));
    }

    #[test]
    fn fenced_code_renders_as_pre_code() {
        let fragment = render("```rust\nlet x = 1;\n```");
        assert!(fragment
            .html
            .contains("<pre><code class=\"language-rust\">let x = 1;"));
    }

    #[test]
    fn inline_code_renders_as_code() {
        let fragment = render("call `convert()` first");
        assert!(fragment.html.contains("<code>convert()</code>"));
    }

    #[test]
    fn marker_paragraph_becomes_outline() {
        let fragment = render("[TOC]\n\n# One\n\n## Two");
        assert!(fragment.html.contains("<div class=\"toc\">"));
        assert!(fragment.html.contains("<a href=\"#one\">One</a>"));
        assert!(fragment.html.contains("<a href=\"#two\">Two</a>"));
        assert!(!fragment.html.contains("[TOC]"));
    }

    #[test]
    fn outline_keeps_out_of_order_headings_in_one_list() {
        let fragment = render("[TOC]\n\n## Sub\n\n# Top");
        assert_eq!(fragment.html.matches("<ul>").count(), 1);
        assert!(fragment.html.contains("<li><a href=\"#sub\">Sub</a></li>"));
        assert!(fragment.html.contains("<li><a href=\"#top\">Top</a></li>"));
    }

    #[test]
    fn no_marker_means_no_outline() {
        let fragment = render("# One\n\nBody text.");
        assert!(!fragment.html.contains("class=\"toc\""));
        assert!(fragment.html.contains("<h1 id=\"one\">One</h1>"));
    }

    #[test]
    fn marker_must_be_the_whole_paragraph() {
        let fragment = render("See [TOC] above.");
        assert!(!fragment.html.contains("class=\"toc\""));
        assert!(fragment.html.contains("[TOC]"));
    }

    #[test]
    fn title_is_first_h1_text() {
        let fragment = render("## Minor\n\n# The Report\n\n# Second");
        assert_eq!(fragment.title.as_deref(), Some("The Report"));
    }

    #[test]
    fn title_absent_without_h1() {
        let fragment = render("## Only a subsection");
        assert_eq!(fragment.title, None);
    }

    #[test]
    fn empty_input_yields_empty_fragment() {
        let fragment = render("");
        assert_eq!(fragment.html, "");
        assert_eq!(fragment.title, None);
    }

    #[test]
    fn heading_text_with_inline_code_keeps_the_code_text() {
        let fragment = render("# Using `mdreport`");
        assert!(fragment.html.contains("id=\"using-mdreport\""));
    }

    #[test]
    fn escape_html_covers_the_four_specials() {
        assert_eq!(escape_html("a < b & c > \"d\""), "a &lt; b &amp; c &gt; &quot;d&quot;");
    }
}
