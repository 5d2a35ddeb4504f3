//! Create a new content file

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Create a draft at `path` (relative to the content directory).
///
/// The title defaults to the file name with dashes turned into spaces.
pub fn create_content(site: &Site, path: &str, title: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let relative = if path.ends_with(".md") || path.ends_with(".markdown") {
        PathBuf::from(path)
    } else {
        PathBuf::from(format!("{}.md", path.trim_end_matches('/')))
    };
    if relative.is_absolute() {
        anyhow::bail!("Path must be relative to the content directory: {}", path);
    }

    let file_path = site.content_dir.join(&relative);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let title = match title {
        Some(title) => title.to_string(),
        None => default_title(&relative),
    };

    // Dates are written as bare TOML datetimes, the way Hugo archetypes do
    let content = format!(
        "+++\ntitle = {}\ndate = {}\ndraft = true\n+++\n",
        toml::Value::String(title),
        now.format("%Y-%m-%dT%H:%M:%S%:z")
    );

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

fn default_title(relative: &std::path::Path) -> String {
    let stem = relative
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled");
    let stem = if stem == "index" || stem == "_index" {
        relative
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .unwrap_or(stem)
    } else {
        stem
    };

    let words: Vec<String> = stem
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    words.join(" ")
}
