//! Content document model

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// What a document represents in the site tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// A regular page, e.g. a blog post
    Page,
    /// A section's `_index.md`
    Section,
    /// The root `_index.md`
    Home,
}

/// A Markdown file loaded from the content directory
#[derive(Debug, Clone, Serialize)]
pub struct ContentDocument {
    /// Document title
    pub title: String,

    /// Publication date
    pub date: DateTime<FixedOffset>,

    /// Drafts are only exposed in preview builds
    pub draft: bool,

    pub kind: DocumentKind,

    /// First directory under the content root, empty for root files
    pub section: String,

    /// Last path segment (URL-friendly name)
    pub slug: String,

    /// Logical URL path, e.g. `/posts/vla-stack/`
    pub path: String,

    /// Source file path relative to the content directory, `/`-separated
    pub source: String,

    /// Full source file path
    #[serde(skip)]
    pub full_source: PathBuf,

    pub lang: String,

    pub tags: Vec<String>,

    /// Summary set in front-matter
    pub summary: Option<String>,

    /// Raw markdown body
    pub body: String,

    /// Custom front-matter fields
    pub extra: IndexMap<String, serde_json::Value>,
}

impl ContentDocument {
    pub fn is_page(&self) -> bool {
        self.kind == DocumentKind::Page
    }

    /// Source path without its extension, the key `pageRef` values use
    pub fn source_key(&self) -> &str {
        self.source
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.source)
    }
}

/// Where a file sits in the site tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Location {
    pub kind: DocumentKind,
    pub section: String,
    pub slug: String,
    pub path: String,
    /// Name used when the front-matter has no title
    pub fallback_title: String,
}

impl Location {
    /// Derive kind, section, slug and logical path from a content-relative path
    pub fn from_relative(relative: &Path, slug_override: Option<&str>) -> Self {
        let mut dirs: Vec<String> = relative
            .parent()
            .map(|p| {
                p.components()
                    .filter_map(|c| match c {
                        Component::Normal(s) => s.to_str().map(String::from),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let stem = relative
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        if stem == "_index" {
            let kind = if dirs.is_empty() {
                DocumentKind::Home
            } else {
                DocumentKind::Section
            };
            return Self {
                kind,
                section: dirs.first().cloned().unwrap_or_default(),
                slug: dirs.last().cloned().unwrap_or_default(),
                path: url_path(&dirs),
                fallback_title: dirs.last().cloned().unwrap_or_default(),
            };
        }

        // Leaf bundle: the directory names the page
        let name = if stem == "index" {
            dirs.pop().unwrap_or(stem)
        } else {
            stem
        };

        let slug = slug_override
            .map(|s| s.trim_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slug::slugify(&name));

        let section = dirs.first().cloned().unwrap_or_default();
        dirs.push(slug.clone());

        Self {
            kind: DocumentKind::Page,
            section,
            slug,
            path: url_path(&dirs),
            fallback_title: name,
        }
    }
}

fn url_path(segments: &[String]) -> String {
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate(path: &str) -> Location {
        Location::from_relative(Path::new(path), None)
    }

    #[test]
    fn test_regular_post() {
        let loc = locate("posts/How VLAs Work.md");
        assert_eq!(loc.kind, DocumentKind::Page);
        assert_eq!(loc.section, "posts");
        assert_eq!(loc.slug, "how-vlas-work");
        assert_eq!(loc.path, "/posts/how-vlas-work/");
        assert_eq!(loc.fallback_title, "How VLAs Work");
    }

    #[test]
    fn test_root_page() {
        let loc = locate("about.md");
        assert_eq!(loc.section, "");
        assert_eq!(loc.path, "/about/");
    }

    #[test]
    fn test_leaf_bundle() {
        let loc = locate("posts/stack-layout/index.md");
        assert_eq!(loc.kind, DocumentKind::Page);
        assert_eq!(loc.section, "posts");
        assert_eq!(loc.slug, "stack-layout");
        assert_eq!(loc.path, "/posts/stack-layout/");
    }

    #[test]
    fn test_section_and_home() {
        let section = locate("posts/_index.md");
        assert_eq!(section.kind, DocumentKind::Section);
        assert_eq!(section.path, "/posts/");

        let home = locate("_index.md");
        assert_eq!(home.kind, DocumentKind::Home);
        assert_eq!(home.path, "/");
    }

    #[test]
    fn test_nested_directories() {
        let loc = locate("posts/2025/vla.md");
        assert_eq!(loc.section, "posts");
        assert_eq!(loc.path, "/posts/2025/vla/");
    }

    #[test]
    fn test_slug_override() {
        let loc = Location::from_relative(Path::new("posts/draft-1.md"), Some("vla-stack"));
        assert_eq!(loc.slug, "vla-stack");
        assert_eq!(loc.path, "/posts/vla-stack/");
    }
}
