//! Draft filtering by build mode

use serde::Serialize;

use super::ContentDocument;

/// Which documents a build exposes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Public output: drafts are hidden
    #[default]
    Production,
    /// Local preview: drafts are shown and files with malformed
    /// front-matter are skipped instead of failing the build
    Preview,
}

impl BuildMode {
    pub fn from_drafts_flag(build_drafts: bool) -> Self {
        if build_drafts {
            BuildMode::Preview
        } else {
            BuildMode::Production
        }
    }

    pub fn includes_drafts(self) -> bool {
        self == BuildMode::Preview
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildMode::Production => f.write_str("production"),
            BuildMode::Preview => f.write_str("preview"),
        }
    }
}

/// Keep the documents visible in `mode`
pub fn filter_drafts<I>(docs: I, mode: BuildMode) -> impl Iterator<Item = ContentDocument>
where
    I: IntoIterator<Item = ContentDocument>,
{
    docs.into_iter()
        .filter(move |doc| mode.includes_drafts() || !doc.draft)
}
