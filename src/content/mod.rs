//! Content module - scans, filters and orders Markdown documents

mod document;
mod filter;
mod frontmatter;
mod listing;
mod markdown;
mod scanner;

pub use document::{ContentDocument, DocumentKind};
pub use filter::{filter_drafts, BuildMode};
pub use frontmatter::{parse_date_string, FrontMatter, FrontMatterFormat};
pub use listing::{compare_listing, expose, pages_in_sections, section_counts, sort_listing};
pub use markdown::{MarkdownOptions, MarkdownRenderer, RenderedBody, TocEntry};
pub use scanner::ContentScanner;

#[cfg(test)]
pub(crate) fn test_document(title: &str, date: &str, draft: bool) -> ContentDocument {
    let slug = slug::slugify(title);
    ContentDocument {
        title: title.to_string(),
        date: parse_date_string(date).unwrap(),
        draft,
        kind: DocumentKind::Page,
        section: "posts".to_string(),
        slug: slug.clone(),
        path: format!("/posts/{}/", slug),
        source: format!("posts/{}.md", slug),
        full_source: std::path::PathBuf::from(format!("content/posts/{}.md", slug)),
        lang: "en".to_string(),
        tags: Vec::new(),
        summary: None,
        body: String::new(),
        extra: indexmap::IndexMap::new(),
    }
}
