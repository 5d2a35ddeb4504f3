//! hugo-rs: loads Hugo-style site configuration and Markdown content
//!
//! This crate reads a site's TOML configuration and content tree, applies
//! the draft rules of the build mode, resolves navigation menus and writes
//! a manifest that a theme renderer consumes.

pub mod build;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod menu;

pub use content::BuildMode;
pub use error::{Error, Result};

use std::path::{Path, PathBuf};

/// A site on disk
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Config file the site was loaded from
    pub config_path: PathBuf,
    /// Content directory
    pub content_dir: PathBuf,
    /// Publish (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Load a site from a directory containing `hugo.toml` or `config.toml`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = config::SiteConfig::find(&base_dir).ok_or_else(|| {
            Error::config(
                &base_dir,
                format!("no {} found", config::CONFIG_FILES.join(" or ")),
            )
        })?;

        let config = config::SiteConfig::load(&config_path)?;
        tracing::debug!("Loaded config from {:?}", config_path);

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.publish_dir);

        Ok(Self {
            config,
            base_dir,
            config_path,
            content_dir,
            public_dir,
        })
    }

    /// Scanner over this site's content directory
    pub fn scanner(&self) -> content::ContentScanner {
        content::ContentScanner::new(&self.content_dir, &self.config)
    }

    /// Load and resolve the site for a build mode
    pub fn build(&self, mode: BuildMode) -> Result<build::SiteBuild> {
        build::build(self, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_site_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "baseURL = \"https://example.org/\"\ntitle = \"Blog\"\ncontentDir = \"posts-src\"\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.content_dir, dir.path().join("posts-src"));
        assert_eq!(site.public_dir, dir.path().join("public"));
        assert_eq!(site.config_path, dir.path().join("config.toml"));
    }

    #[test]
    fn test_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = Site::new(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains("hugo.toml"));
    }
}
