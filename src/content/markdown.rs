//! Markdown analysis: HTML, heading anchors, table of contents, summary

use lazy_static::lazy_static;
use pulldown_cmark::{html, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::ops::RangeInclusive;

use crate::config::SiteConfig;
use crate::helpers::html_escape;

lazy_static! {
    static ref MORE_DIVIDER: Regex = Regex::new(r"<!--\s*more\s*-->").unwrap();
}

const RAW_HTML_OMITTED: &str = "<!-- raw HTML omitted -->";

/// Settings taken from `[markup]` and `summaryLength`
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    pub unsafe_html: bool,
    pub toc_levels: RangeInclusive<u8>,
    pub toc_ordered: bool,
    pub summary_length: usize,
}

impl MarkdownOptions {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            unsafe_html: config.markup.goldmark.renderer.unsafe_html,
            toc_levels: config.toc_levels(),
            toc_ordered: config.markup.table_of_contents.ordered,
            summary_length: config.summary_length,
        }
    }
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

/// A heading listed in the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub title: String,
    pub anchor: String,
}

/// Everything derived from a document body
#[derive(Debug, Clone, Serialize)]
pub struct RenderedBody {
    pub html: String,
    pub toc: Vec<TocEntry>,
    /// Plain-text summary
    pub summary: String,
    /// Whether the summary is shorter than the full text
    pub truncated: bool,
    pub word_count: usize,
}

/// Markdown renderer
pub struct MarkdownRenderer {
    options: MarkdownOptions,
}

impl MarkdownRenderer {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    /// Render a body and collect its headings and summary
    pub fn render(&self, markdown: &str) -> RenderedBody {
        let divider = MORE_DIVIDER.find(markdown);
        let full = MORE_DIVIDER.replace(markdown, "");

        let mut events: Vec<Event> = Parser::new_ext(&full, parser_options()).collect();
        let toc = self.assign_anchors(&mut events);

        if !self.options.unsafe_html {
            events = omit_raw_html(events);
        }

        let mut out = String::with_capacity(full.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());

        let text = plain_text(&full);
        let word_count = text.split_whitespace().count();

        let (summary, truncated) = match divider {
            Some(m) => (plain_text(&markdown[..m.start()]), true),
            None if word_count > self.options.summary_length => (
                text.split_whitespace()
                    .take(self.options.summary_length)
                    .collect::<Vec<_>>()
                    .join(" "),
                true,
            ),
            None => (text, false),
        };

        RenderedBody {
            html: out,
            toc,
            summary,
            truncated,
            word_count,
        }
    }

    /// Give every heading an id and return those inside the ToC range
    fn assign_anchors(&self, events: &mut [Event]) -> Vec<TocEntry> {
        let mut taken: HashSet<String> = HashSet::new();
        let mut toc = Vec::new();

        let mut i = 0;
        while i < events.len() {
            let heading = match &events[i] {
                Event::Start(Tag::Heading { level, id, .. }) => {
                    Some((heading_level(*level), id.as_ref().map(|s| s.to_string())))
                }
                _ => None,
            };
            let Some((level, explicit_id)) = heading else {
                i += 1;
                continue;
            };

            let mut title = String::new();
            let mut end = i + 1;
            while end < events.len() && !matches!(events[end], Event::End(TagEnd::Heading(_))) {
                if let Event::Text(t) | Event::Code(t) = &events[end] {
                    title.push_str(t);
                }
                end += 1;
            }

            let anchor = match explicit_id {
                Some(id) => {
                    taken.insert(id.clone());
                    id
                }
                None => unique_anchor(&title, &mut taken),
            };
            if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                *id = Some(anchor.clone().into());
            }

            if self.options.toc_levels.contains(&level) {
                toc.push(TocEntry {
                    level,
                    title: title.trim().to_string(),
                    anchor,
                });
            }
            i = end + 1;
        }

        toc
    }

    /// Render ToC entries as nested lists inside `<nav id="TableOfContents">`
    pub fn table_of_contents_html(&self, toc: &[TocEntry]) -> String {
        if toc.is_empty() {
            return String::new();
        }

        let tag = if self.options.toc_ordered { "ol" } else { "ul" };
        let mut html = String::from(r#"<nav id="TableOfContents">"#);
        let mut open: Vec<u8> = Vec::new();

        for entry in toc {
            match open.last().copied() {
                Some(last) if entry.level <= last => {
                    while open.len() > 1 && open.last().is_some_and(|&l| l > entry.level) {
                        html.push_str(&format!("</li></{}>", tag));
                        open.pop();
                    }
                    html.push_str("</li>");
                }
                _ => {
                    html.push_str(&format!("<{}>", tag));
                    open.push(entry.level);
                }
            }
            html.push_str(&format!(
                r##"<li><a href="#{}">{}</a>"##,
                html_escape(&entry.anchor),
                html_escape(&entry.title)
            ));
        }

        while open.pop().is_some() {
            html.push_str(&format!("</li></{}>", tag));
        }
        html.push_str("</nav>");
        html
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(MarkdownOptions::default())
    }
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_HEADING_ATTRIBUTES
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Slug of `title`, suffixed `-1`, `-2`, ... until it is not taken
fn unique_anchor(title: &str, taken: &mut HashSet<String>) -> String {
    let mut base = slug::slugify(title);
    if base.is_empty() {
        base = "heading".to_string();
    }

    let mut anchor = base.clone();
    let mut n = 0;
    while taken.contains(&anchor) {
        n += 1;
        anchor = format!("{}-{}", base, n);
    }
    taken.insert(anchor.clone());
    anchor
}

/// Replace raw HTML with a marker; one marker per HTML block
fn omit_raw_html(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out: Vec<Event<'_>> = Vec::with_capacity(events.len());
    for event in events {
        match event {
            Event::Html(_) => {
                if !matches!(out.last(), Some(Event::Html(_))) {
                    out.push(Event::Html(RAW_HTML_OMITTED.into()));
                }
            }
            Event::InlineHtml(_) => out.push(Event::InlineHtml(RAW_HTML_OMITTED.into())),
            other => out.push(other),
        }
    }
    out
}

/// Text content of a markdown fragment with whitespace collapsed
fn plain_text(markdown: &str) -> String {
    let mut text = String::new();
    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => text.push(' '),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = r#"Intro paragraph about the stack.

## Layout

Some text.

### Frame pointer

More text.

#### Alignment

## Layout
"#;

    #[test]
    fn test_heading_anchors() {
        let rendered = MarkdownRenderer::default().render(POST);
        assert!(rendered.html.contains(r#"<h2 id="layout">Layout</h2>"#));
        assert!(rendered.html.contains(r#"<h3 id="frame-pointer">"#));
        assert!(rendered.html.contains(r#"<h2 id="layout-1">"#));
    }

    #[test]
    fn test_explicit_id_reserves_anchor() {
        let rendered = MarkdownRenderer::default().render("## A {#layout}\n\n## Layout\n\n## Layout\n");
        let anchors: Vec<_> = rendered.toc.iter().map(|e| e.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["layout", "layout-1", "layout-2"]);
    }

    #[test]
    fn test_generated_suffix_does_not_collide() {
        let rendered = MarkdownRenderer::default().render("## Layout\n\n## Layout 1\n\n## Layout\n");
        let anchors: Vec<_> = rendered.toc.iter().map(|e| e.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["layout", "layout-1", "layout-2"]);
    }

    #[test]
    fn test_toc_respects_levels() {
        let rendered = MarkdownRenderer::default().render(POST);
        let anchors: Vec<_> = rendered.toc.iter().map(|e| e.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["layout", "frame-pointer", "layout-1"]);

        let renderer = MarkdownRenderer::new(MarkdownOptions {
            toc_levels: 2..=4,
            ..Default::default()
        });
        assert_eq!(renderer.render(POST).toc.len(), 4);
    }

    #[test]
    fn test_explicit_heading_id() {
        let rendered = MarkdownRenderer::default().render("## Stack {#the-stack}\n");
        assert_eq!(rendered.toc[0].anchor, "the-stack");
        assert_eq!(rendered.toc[0].title, "Stack");
    }

    #[test]
    fn test_toc_html_nesting() {
        let renderer = MarkdownRenderer::default();
        let toc = renderer.render(POST).toc;
        assert_eq!(
            renderer.table_of_contents_html(&toc),
            concat!(
                r#"<nav id="TableOfContents"><ul>"#,
                r##"<li><a href="#layout">Layout</a><ul>"##,
                r##"<li><a href="#frame-pointer">Frame pointer</a></li></ul></li>"##,
                r##"<li><a href="#layout-1">Layout</a></li></ul></nav>"##
            )
        );
    }

    #[test]
    fn test_toc_html_ordered() {
        let renderer = MarkdownRenderer::new(MarkdownOptions {
            toc_ordered: true,
            ..Default::default()
        });
        let html = renderer.table_of_contents_html(&renderer.render("## One\n## Two\n").toc);
        assert!(html.starts_with(r#"<nav id="TableOfContents"><ol>"#));
        assert!(!html.contains("<ul>"));
        assert_eq!(renderer.table_of_contents_html(&[]), "");
    }

    #[test]
    fn test_raw_html_omitted() {
        let body = "<div class=\"diagram\">stack</div>\n\nText with <b>bold</b>.\n";
        let rendered = MarkdownRenderer::default().render(body);
        assert!(!rendered.html.contains("<div"));
        assert!(!rendered.html.contains("<b>"));
        assert!(rendered.html.contains(RAW_HTML_OMITTED));

        let block = "<div>\n<p>stack</p>\n</div>\n\nAfter.\n";
        let rendered = MarkdownRenderer::default().render(block);
        assert_eq!(rendered.html.matches(RAW_HTML_OMITTED).count(), 1);
        assert!(rendered.html.contains("After."));

        let renderer = MarkdownRenderer::new(MarkdownOptions {
            unsafe_html: true,
            ..Default::default()
        });
        let rendered = renderer.render(body);
        assert!(rendered.html.contains(r#"<div class="diagram">"#));
        assert!(rendered.html.contains("<b>bold</b>"));
    }

    #[test]
    fn test_summary_divider() {
        let body = "First part.\n\n<!--more-->\n\nSecond part.\n";
        let rendered = MarkdownRenderer::default().render(body);
        assert_eq!(rendered.summary, "First part.");
        assert!(rendered.truncated);
        assert!(!rendered.html.contains("more"));
        assert!(rendered.html.contains("Second part."));
        assert_eq!(rendered.word_count, 4);
    }

    #[test]
    fn test_summary_length() {
        let renderer = MarkdownRenderer::new(MarkdownOptions {
            summary_length: 3,
            ..Default::default()
        });
        let rendered = renderer.render("one two three four five");
        assert_eq!(rendered.summary, "one two three");
        assert!(rendered.truncated);

        let rendered = renderer.render("one `two`");
        assert_eq!(rendered.summary, "one two");
        assert!(!rendered.truncated);
    }
}
