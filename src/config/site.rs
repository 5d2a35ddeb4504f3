//! Site configuration (hugo.toml)

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use super::Params;
use crate::error::{Error, Result};

/// Config file names, in lookup order
pub const CONFIG_FILES: &[&str] = &["hugo.toml", "config.toml"];

/// Main site configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    // Site
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub language_code: String,
    pub default_content_language: String,
    pub title: String,

    // Directory
    pub content_dir: String,
    pub publish_dir: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore_files: Vec<String>,

    // Writing
    pub summary_length: usize,
    pub enable_emoji: bool,

    pub module: ModuleConfig,
    pub markup: MarkupConfig,

    /// Named menus, e.g. `[[menu.main]]`
    #[serde(rename = "menu", skip_serializing_if = "IndexMap::is_empty")]
    pub menus: IndexMap<String, Vec<MenuEntry>>,

    pub params: Params,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            language_code: String::new(),
            default_content_language: "en".to_string(),
            title: String::new(),

            content_dir: "content".to_string(),
            publish_dir: "public".to_string(),
            ignore_files: Vec::new(),

            summary_length: 70,
            enable_emoji: false,

            module: ModuleConfig::default(),
            markup: MarkupConfig::default(),
            menus: IndexMap::new(),
            params: Params::default(),
        }
    }
}

impl SiteConfig {
    /// Find the config file in a site directory
    pub fn find<P: AsRef<Path>>(base_dir: P) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| base_dir.as_ref().join(name))
            .find(|path| path.is_file())
    }

    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content, path)
    }

    /// Parse configuration text; `path` is only used in error messages.
    ///
    /// Keys the loader does not know are skipped and logged at debug level.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config: SiteConfig =
            serde_ignored::deserialize(deserializer, |key: serde_ignored::Path| {
                ignored.push(key.to_string());
            })
            .map_err(|e| Error::config(path, e.to_string()))?;

        for key in &ignored {
            tracing::debug!("Ignoring unknown config key `{}` in {:?}", key, path);
        }

        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::config(path, "missing required key `baseURL`"));
        }
        if self.title.trim().is_empty() {
            return Err(Error::config(path, "missing required key `title`"));
        }

        let toc = &self.markup.table_of_contents;
        if toc.start_level > toc.end_level {
            return Err(Error::config(
                path,
                format!(
                    "`markup.tableOfContents.startLevel` ({}) is greater than `endLevel` ({})",
                    toc.start_level, toc.end_level
                ),
            ));
        }

        for pattern in &self.ignore_files {
            if let Err(e) = Regex::new(pattern) {
                return Err(Error::config(
                    path,
                    format!("invalid `ignoreFiles` pattern `{}`: {}", pattern, e),
                ));
            }
        }

        if !self.base_url.contains("://") {
            tracing::warn!("baseURL `{}` is not an absolute URL", self.base_url);
        }

        Ok(())
    }

    /// Serialize the recognized fields back to TOML
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Heading levels included in tables of contents
    pub fn toc_levels(&self) -> RangeInclusive<u8> {
        let toc = &self.markup.table_of_contents;
        toc.start_level..=toc.end_level
    }

    /// Compiled `ignoreFiles` patterns
    pub fn ignore_patterns(&self) -> Vec<Regex> {
        // Patterns were checked in validate()
        self.ignore_files
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect()
    }
}

/// Hugo module imports (themes)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<ModuleImport>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleImport {
    pub path: String,
}

/// Markup rendering options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkupConfig {
    pub highlight: HighlightConfig,
    pub goldmark: GoldmarkConfig,
    pub table_of_contents: TableOfContentsConfig,
}

/// Syntax highlighting options, passed through to the theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HighlightConfig {
    pub no_classes: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self { no_classes: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoldmarkConfig {
    pub renderer: RendererConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Pass raw HTML in Markdown through to the output
    #[serde(rename = "unsafe")]
    pub unsafe_html: bool,
}

/// Table of contents heading range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableOfContentsConfig {
    pub start_level: u8,
    pub end_level: u8,
    pub ordered: bool,
}

impl Default for TableOfContentsConfig {
    fn default() -> Self {
        Self {
            start_level: 2,
            end_level: 3,
            ordered: false,
        }
    }
}

/// A navigation entry as declared in the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub weight: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<String>,
}
