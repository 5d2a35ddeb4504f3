//! Configuration module

mod params;
mod site;

pub use params::{Author, ColorMode, FeedDescription, Params, SocialIcon};
pub use site::{
    GoldmarkConfig, HighlightConfig, MarkupConfig, MenuEntry, ModuleConfig, ModuleImport,
    RendererConfig, SiteConfig, TableOfContentsConfig, CONFIG_FILES,
};
