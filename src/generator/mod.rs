//! Generator module - writes the site manifest consumed by the theme renderer

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::build::SiteBuild;
use crate::config::{FeedDescription, SiteConfig};
use crate::content::{
    BuildMode, ContentDocument, DocumentKind, MarkdownOptions, MarkdownRenderer, TocEntry,
};
use crate::helpers::{date_xml, full_date, full_url_for, stringify_toml_datetimes, url_for};
use crate::menu::MenuItem;
use crate::Site;

/// Manifest file name inside the publish directory
pub const MANIFEST_FILE: &str = "site.json";

/// Words per minute used for reading time
const READING_SPEED: usize = 213;

/// Everything the renderer needs for one build
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest<'a> {
    pub generator: String,
    pub build_mode: BuildMode,
    pub generated_at: String,
    pub config: SiteConfig,
    pub menus: &'a IndexMap<String, Vec<MenuItem>>,
    pub sections: BTreeMap<String, usize>,
    pub main_sections: &'a [String],
    pub pages: Vec<PageData>,
}

/// One exposed document, ready for templates
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub title: String,
    pub date: String,
    /// Human-readable date, e.g. `April 13, 2025`
    pub date_display: String,
    pub kind: DocumentKind,
    pub draft: bool,
    pub section: String,
    pub slug: String,
    pub path: String,
    pub rel_permalink: String,
    pub permalink: String,
    pub source: String,
    pub lang: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub truncated: bool,
    /// Feed item description per `params.rssFeedDescription`
    pub description: String,
    pub content: String,
    pub toc: Vec<TocEntry>,
    pub table_of_contents: String,
    pub word_count: usize,
    pub reading_time: usize,
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Manifest generator
pub struct Generator {
    site: Site,
    renderer: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Self {
        let renderer = MarkdownRenderer::new(MarkdownOptions::from_config(&site.config));
        Self {
            site: site.clone(),
            renderer,
        }
    }

    /// Path the manifest is written to
    pub fn manifest_path(&self) -> PathBuf {
        self.site.public_dir.join(MANIFEST_FILE)
    }

    /// Build the manifest for a resolved site
    pub fn manifest<'a>(&'a self, build: &'a SiteBuild) -> Manifest<'a> {
        let pages = build
            .documents
            .iter()
            .map(|doc| self.page_data(doc))
            .collect();

        Manifest {
            generator: format!("hugo-rs {}", env!("CARGO_PKG_VERSION")),
            build_mode: build.mode,
            generated_at: date_xml(&chrono::Utc::now().fixed_offset()),
            config: self.manifest_config(),
            menus: &build.menus.menus,
            sections: build.sections(),
            main_sections: &build.main_sections,
            pages,
        }
    }

    /// Write the manifest to the publish directory
    pub fn generate(&self, build: &SiteBuild) -> Result<PathBuf> {
        fs::create_dir_all(&self.site.public_dir)?;

        let manifest = self.manifest(build);
        let output_path = self.manifest_path();
        let json = serde_json::to_string_pretty(&manifest)?;
        fs::write(&output_path, json)?;
        tracing::info!(
            "Generated {} with {} pages",
            MANIFEST_FILE,
            manifest.pages.len()
        );

        Ok(output_path)
    }

    /// Site config with theme param dates as plain strings
    fn manifest_config(&self) -> SiteConfig {
        let mut config = self.site.config.clone();
        config
            .params
            .extra
            .values_mut()
            .for_each(stringify_toml_datetimes);
        config
    }

    fn page_data(&self, doc: &ContentDocument) -> PageData {
        let config = &self.site.config;
        let rendered = self.renderer.render(&doc.body);

        let (summary, truncated) = match &doc.summary {
            Some(summary) => (summary.clone(), true),
            None => (rendered.summary, rendered.truncated),
        };
        let description = match config.params.rss_feed_description {
            FeedDescription::Summary => summary.clone(),
            FeedDescription::Full => rendered.html.clone(),
        };
        let table_of_contents = self.renderer.table_of_contents_html(&rendered.toc);

        PageData {
            title: doc.title.clone(),
            date: date_xml(&doc.date),
            date_display: full_date(&doc.date),
            kind: doc.kind,
            draft: doc.draft,
            section: doc.section.clone(),
            slug: doc.slug.clone(),
            path: doc.path.clone(),
            rel_permalink: url_for(config, &doc.path),
            permalink: full_url_for(config, &doc.path),
            source: doc.source.clone(),
            lang: doc.lang.clone(),
            tags: doc.tags.clone(),
            summary,
            truncated,
            description,
            content: rendered.html,
            toc: rendered.toc,
            table_of_contents,
            word_count: rendered.word_count,
            reading_time: rendered.word_count.div_ceil(READING_SPEED),
            extra: doc.extra.clone(),
        }
    }
}
