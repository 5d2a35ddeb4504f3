//! One build pass: scan, filter, order, resolve menus

use std::collections::BTreeMap;

use crate::content::{
    expose, filter_drafts, pages_in_sections, section_counts, sort_listing, BuildMode,
    ContentDocument,
};
use crate::error::{Error, Result};
use crate::menu::{build_menus, ContentIndex, Menus};
use crate::Site;

/// The resolved model of a site for one build mode
#[derive(Debug, Clone)]
pub struct SiteBuild {
    pub mode: BuildMode,
    /// Exposed documents, newest first
    pub documents: Vec<ContentDocument>,
    pub menus: Menus,
    /// Sections configured as main sections
    pub main_sections: Vec<String>,
}

impl SiteBuild {
    /// Regular pages (posts), newest first
    pub fn pages(&self) -> impl Iterator<Item = &ContentDocument> {
        self.documents.iter().filter(|d| d.is_page())
    }

    /// Pages of the main sections, newest first
    pub fn main_section_pages(&self) -> impl Iterator<Item = &ContentDocument> {
        pages_in_sections(&self.documents, &self.main_sections)
    }

    /// Number of pages per section
    pub fn sections(&self) -> BTreeMap<String, usize> {
        section_counts(&self.documents)
    }
}

/// Run a build pass over a site.
///
/// In production any malformed content file (bad header, unreadable
/// `date`) aborts the build with [`Error::FrontMatter`]. In preview it is
/// skipped with a warning. Other errors abort in both modes.
pub fn build(site: &Site, mode: BuildMode) -> Result<SiteBuild> {
    let scanner = site.scanner();

    let mut loaded = Vec::new();
    for result in scanner.scan() {
        match result {
            Ok(doc) => loaded.push(doc),
            // Preview skips malformed files so one broken draft does not block the rest
            Err(e @ Error::FrontMatter { .. }) if mode == BuildMode::Preview => {
                tracing::warn!("Skipping document: {}", e);
            }
            Err(e) => return Err(e),
        }
    }
    let total = loaded.len();

    let mut documents = expose(filter_drafts(loaded, mode).collect())?;
    sort_listing(&mut documents);

    tracing::info!(
        "Loaded {} documents ({} exposed in {} mode)",
        total,
        documents.len(),
        mode
    );

    let index = ContentIndex::from_documents(&documents);
    let menus = build_menus(&site.config.menus, &index);

    let main_sections = site.config.params.main_sections.clone();
    let sections = section_counts(&documents);
    for section in &main_sections {
        if !sections.contains_key(section) {
            tracing::info!("Main section `{}` has no pages", section);
        }
    }

    Ok(SiteBuild {
        mode,
        documents,
        menus,
        main_sections,
    })
}
