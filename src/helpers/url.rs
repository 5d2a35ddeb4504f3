//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a URL path
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Path component of the base URL, always ending in `/`
///
/// # Examples
/// ```ignore
/// site_root("https://example.com/blog") // -> "/blog/"
/// ```
pub fn site_root(base_url: &str) -> String {
    let without_scheme = base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url);
    let path = without_scheme
        .find('/')
        .map(|i| &without_scheme[i..])
        .unwrap_or("/");
    let path = path.trim_matches('/');

    if path.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", path)
    }
}

/// Generate a site-relative URL, including the base URL's path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/posts/vla/") // -> "/blog/posts/vla/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = site_root(&config.base_url);
    let path = encode_path(path.trim_start_matches('/'));
    format!("{}{}", root, path)
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/posts/vla/") // -> "https://example.com/blog/posts/vla/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.base_url.trim_end_matches('/');
    let path = encode_path(path.trim_start_matches('/'));
    format!("{}/{}", base, path)
}

/// Percent-encode a URL path, keeping `/`
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH).to_string()
}

/// Whether a link leaves the site
pub fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("//")
}
