//! Navigation menus
//!
//! Menu entries are declared in the site config. Each entry either points
//! at content through `pageRef` or carries a literal `url`; when the page
//! reference resolves, it wins over the url and the item takes part in
//! active-route highlighting.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::config::MenuEntry;
use crate::content::ContentDocument;

/// Where a menu item links to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum MenuLink {
    /// A resolved content path
    Page { page_ref: String, path: String },
    /// A literal URL from the config
    Url { url: String },
}

/// A resolved navigation item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub identifier: Option<String>,
    pub name: String,
    pub weight: i64,
    pub link: MenuLink,
    pub pre: Option<String>,
    pub post: Option<String>,
}

impl MenuItem {
    /// Link target for rendering
    pub fn href(&self) -> &str {
        match &self.link {
            MenuLink::Page { path, .. } => path,
            MenuLink::Url { url } => url,
        }
    }

    /// Whether this item should be highlighted on the page at `page_path`.
    ///
    /// Only items linked to content take part. A section link is active on
    /// the section page and on every page below it.
    pub fn is_active(&self, page_path: &str) -> bool {
        match &self.link {
            MenuLink::Page { path, .. } if path == "/" => page_path == "/",
            MenuLink::Page { path, .. } => page_path.starts_with(path.as_str()),
            MenuLink::Url { .. } => false,
        }
    }
}

/// A `pageRef` that matched no content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingReference {
    pub menu: String,
    pub name: String,
    pub page_ref: String,
    /// The url used instead
    pub fallback: String,
}

impl fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "menu `{}` entry `{}`: pageRef `{}` matches no content, using url `{}`",
            self.menu, self.name, self.page_ref, self.fallback
        )
    }
}

/// All menus of a build, with the warnings raised while resolving them
#[derive(Debug, Clone, Default, Serialize)]
pub struct Menus {
    pub menus: IndexMap<String, Vec<MenuItem>>,
    #[serde(skip)]
    pub warnings: Vec<DanglingReference>,
}

impl Menus {
    pub fn get(&self, name: &str) -> &[MenuItem] {
        self.menus.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Lookup from normalized page references to logical paths
#[derive(Debug, Clone)]
pub struct ContentIndex {
    paths: HashMap<String, String>,
}

impl Default for ContentIndex {
    fn default() -> Self {
        let mut paths = HashMap::new();
        // The home page always exists
        paths.insert(String::new(), "/".to_string());
        Self { paths }
    }
}

impl ContentIndex {
    /// Index the exposed documents and their sections
    pub fn from_documents<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = &'a ContentDocument>,
    {
        let mut index = Self::default();
        for doc in docs {
            index.insert(&doc.path, &doc.path);
            index.insert(doc.source_key(), &doc.path);
            if !doc.section.is_empty() {
                index.insert(&doc.section, &format!("/{}/", doc.section));
            }
        }
        index
    }

    pub fn insert(&mut self, reference: &str, path: &str) {
        self.paths
            .entry(normalize_ref(reference))
            .or_insert_with(|| path.to_string());
    }

    /// Logical path for a page reference, if any content matches
    pub fn resolve(&self, page_ref: &str) -> Option<&str> {
        self.paths.get(&normalize_ref(page_ref)).map(String::as_str)
    }
}

/// Normalize a page reference: no surrounding slashes, no extension,
/// no trailing `index`/`_index`, lowercase
pub fn normalize_ref(reference: &str) -> String {
    let mut key = reference.trim().trim_matches('/').to_lowercase();

    for ext in [".md", ".markdown"] {
        if let Some(stripped) = key.strip_suffix(ext) {
            key = stripped.to_string();
            break;
        }
    }

    if key == "_index" || key == "index" {
        key.clear();
    } else {
        for suffix in ["/_index", "/index"] {
            if let Some(stripped) = key.strip_suffix(suffix) {
                key = stripped.to_string();
                break;
            }
        }
    }

    key
}

/// Resolve every configured menu against the content index.
///
/// Items come out in ascending weight order; equal weights keep their
/// declaration order.
pub fn build_menus(config: &IndexMap<String, Vec<MenuEntry>>, index: &ContentIndex) -> Menus {
    let mut menus = Menus::default();

    for (menu_name, entries) in config {
        let mut items: Vec<MenuItem> = entries
            .iter()
            .map(|entry| {
                let (link, dangling) = resolve_link(entry, index);
                if let Some(page_ref) = dangling {
                    let warning = DanglingReference {
                        menu: menu_name.clone(),
                        name: entry.name.clone(),
                        page_ref,
                        fallback: entry.url.clone().unwrap_or_default(),
                    };
                    tracing::warn!("{}", warning);
                    menus.warnings.push(warning);
                }
                MenuItem {
                    identifier: entry.identifier.clone(),
                    name: entry.name.clone(),
                    weight: entry.weight,
                    link,
                    pre: entry.pre.clone(),
                    post: entry.post.clone(),
                }
            })
            .collect();

        items.sort_by_key(|item| item.weight);
        tracing::debug!("Menu `{}` has {} items", menu_name, items.len());
        menus.menus.insert(menu_name.clone(), items);
    }

    menus
}

/// The link for an entry, plus the page reference if it dangled
fn resolve_link(entry: &MenuEntry, index: &ContentIndex) -> (MenuLink, Option<String>) {
    let url = || MenuLink::Url {
        url: entry.url.clone().unwrap_or_default(),
    };

    match &entry.page_ref {
        Some(page_ref) => match index.resolve(page_ref) {
            Some(path) => (
                MenuLink::Page {
                    page_ref: page_ref.clone(),
                    path: path.to_string(),
                },
                None,
            ),
            None => (url(), Some(page_ref.clone())),
        },
        None => (url(), None),
    }
}
