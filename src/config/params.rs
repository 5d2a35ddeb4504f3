//! Theme parameters (`[params]`)

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Site parameters consumed by the theme
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Params {
    pub sitename: String,
    pub description: String,
    pub default_color: ColorMode,
    /// Sections listed on the home page and in feeds
    pub main_sections: Vec<String>,
    pub toc: bool,
    pub toc_open: bool,
    pub go_to_top: bool,
    pub rss_feed_description: FeedDescription,
    pub author: Author,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub social_icons: Vec<SocialIcon>,

    /// Theme params this crate does not interpret
    #[serde(flatten)]
    pub extra: IndexMap<String, toml::Value>,
}

/// Default color scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Dark,
    Light,
    #[default]
    Auto,
}

/// What an RSS item carries as its description
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedDescription {
    #[default]
    Summary,
    Full,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub avatar: String,
    pub intro: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialIcon {
    pub name: String,
    pub url: String,
}
