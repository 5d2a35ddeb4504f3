//! Content scanner - walks the content directory and loads documents

use chrono::{DateTime, Utc};
use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use super::document::Location;
use super::{ContentDocument, FrontMatter};
use crate::config::SiteConfig;
use crate::error::{Error, Result};

/// Loads documents from the content directory.
///
/// Every call to [`ContentScanner::scan`] starts a fresh walk, so the
/// sequence can be restarted. Yield order follows the file system and is
/// not meaningful; sort with [`super::sort_listing`].
#[derive(Debug, Clone)]
pub struct ContentScanner {
    content_dir: PathBuf,
    default_language: String,
    ignore: Vec<Regex>,
}

impl ContentScanner {
    /// Create a scanner for `content_dir` using the site's settings
    pub fn new<P: AsRef<Path>>(content_dir: P, config: &SiteConfig) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            default_language: config.default_content_language.clone(),
            ignore: config.ignore_patterns(),
        }
    }

    /// Lazily walk the content tree, loading each Markdown file
    pub fn scan(&self) -> impl Iterator<Item = Result<ContentDocument>> + '_ {
        self.content_dir
            .is_dir()
            .then(|| WalkDir::new(&self.content_dir).follow_links(true))
            .into_iter()
            .flat_map(|walk| walk.into_iter())
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if !entry.file_type().is_file()
                        || !is_markdown_file(path)
                        || self.is_ignored(path)
                    {
                        return None;
                    }
                    Some(self.load(path))
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.content_dir.clone());
                    Some(Err(Error::io(path, e.into())))
                }
            })
    }

    /// Load a single document from a file
    pub fn load(&self, path: &Path) -> Result<ContentDocument> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let (fm, body) = FrontMatter::parse(&content, path)?;

        let date = match fm.parse_date(path)? {
            Some(date) => date,
            None => file_modified(path),
        };

        let relative = path.strip_prefix(&self.content_dir).unwrap_or(path);
        let location = Location::from_relative(relative, fm.slug.as_deref());

        tracing::debug!("Loaded {:?} as {}", relative, location.path);

        Ok(ContentDocument {
            title: fm
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(location.fallback_title),
            date,
            draft: fm.draft,
            kind: location.kind,
            section: location.section,
            slug: location.slug,
            path: location.path,
            source: to_slash(relative),
            full_source: path.to_path_buf(),
            lang: fm.lang.unwrap_or_else(|| self.default_language.clone()),
            tags: fm.tags,
            summary: fm.summary,
            body: body.to_string(),
            extra: fm.extra,
        })
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self.ignore.is_empty() {
            return false;
        }
        let relative = path.strip_prefix(&self.content_dir).unwrap_or(path);
        let relative = to_slash(relative);
        self.ignore.iter().any(|re| re.is_match(&relative))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

fn file_modified(path: &Path) -> DateTime<chrono::FixedOffset> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now())
        .fixed_offset()
}

fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
