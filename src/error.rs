//! Error types for loading a site

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a build
#[derive(Debug, Error)]
pub enum Error {
    /// The site configuration is missing a required key or is inconsistent
    #[error("config error in {path:?}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// A content file has a malformed or missing front-matter header
    #[error("front-matter error in {path:?}: {reason}")]
    FrontMatter { path: PathBuf, reason: String },

    /// Two exposed documents map to the same logical path
    #[error("duplicate path {path}: {first:?} and {second:?}")]
    DuplicatePath {
        path: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::ConfigParse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn front_matter(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::FrontMatter {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
