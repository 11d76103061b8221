//! Table-of-contents generation: heading anchors and the rendered outline.

use std::collections::HashSet;
use std::fmt::Write as _;

use crate::html::escape_html;

/// A paragraph consisting solely of this marker is replaced by the outline.
pub(crate) const MARKER: &str = "[TOC]";

/// One heading in the document outline.
#[derive(Debug, Clone)]
pub(crate) struct TocEntry {
    pub level: u8,
    pub text: String,
    pub slug: String,
}

/// Assigns document-unique anchor slugs, in heading order.
pub(crate) struct Slugs {
    seen: HashSet<String>,
}

impl Slugs {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Slug for the next heading. Duplicates get `_1`, `_2`, ... suffixes.
    pub fn assign(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = "section".to_string();
        }
        if self.seen.insert(base.clone()) {
            return base;
        }
        let mut n = 1usize;
        loop {
            let candidate = format!("{base}_{n}");
            if self.seen.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Lowercase the text, keep alphanumerics and underscores, and collapse
/// runs of whitespace and hyphens into a single `-`.
pub(crate) fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut pending_separator = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            pending_separator = true;
        }
    }
    slug
}

/// Render the entries as a nested `<div class="toc">` outline.
pub(crate) fn render_outline(entries: &[TocEntry]) -> String {
    let mut out = String::from("<div class=\"toc\">\n");
    render_list(&nest_entries(entries), &mut out);
    out.push_str("</div>\n");
    out
}

struct TocNode<'a> {
    entry: &'a TocEntry,
    children: Vec<TocNode<'a>>,
}

/// Nest the flat heading sequence into a tree. A deeper heading becomes a
/// child of the entry before it; a heading shallower than the enclosing
/// list joins that list as a sibling, so an out-of-order document still
/// gets a single list per nesting depth.
fn nest_entries(entries: &[TocEntry]) -> Vec<TocNode<'_>> {
    // Each frame is an open sibling list tagged with the level of its items.
    let mut stack: Vec<(u8, Vec<TocNode<'_>>)> = Vec::new();

    for entry in entries {
        let node = TocNode {
            entry,
            children: Vec::new(),
        };

        while stack.len() > 1 && stack.last().is_some_and(|(level, _)| entry.level < *level) {
            close_top(&mut stack);
        }

        let deeper = stack.last().map_or(true, |(level, _)| entry.level > *level);
        if deeper {
            stack.push((entry.level, vec![node]));
        } else if let Some((level, siblings)) = stack.last_mut() {
            // Shallower than everything seen so far: the open list absorbs
            // the new level instead of a second top-level list starting.
            if entry.level < *level {
                *level = entry.level;
            }
            siblings.push(node);
        }
    }

    while stack.len() > 1 {
        close_top(&mut stack);
    }
    stack.pop().map(|(_, list)| list).unwrap_or_default()
}

/// Close the deepest open list, attaching it to the last node below it.
fn close_top<'a>(stack: &mut Vec<(u8, Vec<TocNode<'a>>)>) {
    if let Some((_, children)) = stack.pop() {
        if let Some((_, below)) = stack.last_mut() {
            match below.last_mut() {
                Some(parent) => parent.children.extend(children),
                None => below.extend(children),
            }
        }
    }
}

fn render_list(nodes: &[TocNode<'_>], out: &mut String) {
    if nodes.is_empty() {
        return;
    }
    out.push_str("<ul>\n");
    for node in nodes {
        let _ = write!(
            out,
            "<li><a href=\"#{}\">{}</a>",
            node.entry.slug,
            escape_html(&node.entry.text)
        );
        if !node.children.is_empty() {
            out.push('\n');
            render_list(&node.children, out);
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: u8, text: &str, slug: &str) -> TocEntry {
        TocEntry {
            level,
            text: text.to_string(),
            slug: slug.to_string(),
        }
    }

    #[test]
    fn slugify_joins_words_with_hyphens() {
        assert_eq!(slugify("Memory Match Game"), "memory-match-game");
        assert_eq!(slugify("Title"), "title");
    }

    #[test]
    fn slugify_drops_punctuation() {
        assert_eq!(slugify("Setup, Then Run!"), "setup-then-run");
        assert_eq!(slugify("API & Tools"), "api-tools");
    }

    #[test]
    fn slugify_keeps_non_ascii_letters() {
        assert_eq!(slugify("Überblick"), "überblick");
    }

    #[test]
    fn duplicate_slugs_get_numeric_suffixes() {
        let mut slugs = Slugs::new();
        assert_eq!(slugs.assign("Title"), "title");
        assert_eq!(slugs.assign("Title"), "title_1");
        assert_eq!(slugs.assign("Title"), "title_2");
    }

    #[test]
    fn unsluggable_heading_falls_back_to_section() {
        let mut slugs = Slugs::new();
        assert_eq!(slugs.assign("!!!"), "section");
        assert_eq!(slugs.assign("???"), "section_1");
    }

    #[test]
    fn outline_nests_by_heading_level() {
        let entries = vec![
            entry(1, "Title", "title"),
            entry(2, "Setup", "setup"),
            entry(2, "Usage", "usage"),
            entry(1, "Appendix", "appendix"),
        ];
        let outline = render_outline(&entries);
        assert_eq!(
            outline,
            "<div class=\"toc\">\n\
             <ul>\n\
             <li><a href=\"#title\">Title</a>\n\
             <ul>\n\
             <li><a href=\"#setup\">Setup</a></li>\n\
             <li><a href=\"#usage\">Usage</a></li>\n\
             </ul>\n\
             </li>\n\
             <li><a href=\"#appendix\">Appendix</a></li>\n\
             </ul>\n\
             </div>\n"
        );
    }

    #[test]
    fn outline_escapes_entry_text() {
        let entries = vec![entry(1, "a < b & c", "a-b-c")];
        let outline = render_outline(&entries);
        assert!(outline.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn heading_shallower_than_the_first_joins_the_same_list() {
        let entries = vec![entry(2, "Sub", "sub"), entry(1, "Top", "top")];
        let outline = render_outline(&entries);
        assert_eq!(
            outline,
            "<div class=\"toc\">\n\
             <ul>\n\
             <li><a href=\"#sub\">Sub</a></li>\n\
             <li><a href=\"#top\">Top</a></li>\n\
             </ul>\n\
             </div>\n"
        );
        assert_eq!(outline.matches("<ul>").count(), 1);
    }

    #[test]
    fn resurfacing_subheading_joins_its_parents_nested_list() {
        let entries = vec![
            entry(1, "Top", "top"),
            entry(3, "Deep", "deep"),
            entry(2, "Mid", "mid"),
        ];
        let outline = render_outline(&entries);
        // Deep and Mid share the one list nested under Top.
        assert_eq!(outline.matches("<ul>").count(), 2);
        let deep = outline.find("#deep").unwrap();
        let mid = outline.find("#mid").unwrap();
        assert!(deep < mid);
    }

    #[test]
    fn outline_handles_skipped_levels() {
        let entries = vec![entry(1, "Top", "top"), entry(3, "Deep", "deep")];
        let outline = render_outline(&entries);
        assert!(outline.contains("<a href=\"#top\">Top</a>"));
        assert!(outline.contains("<a href=\"#deep\">Deep</a>"));
        // The deep entry sits inside a nested list under the top entry.
        let top = outline.find("#top").unwrap();
        let deep = outline.find("#deep").unwrap();
        assert!(top < deep);
    }

    #[test]
    fn empty_outline_is_just_the_container() {
        assert_eq!(render_outline(&[]), "<div class=\"toc\">\n</div>\n");
    }
}
