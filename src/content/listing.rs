//! Ordering and de-duplication of exposed documents

use indexmap::map::Entry;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::ContentDocument;
use crate::error::{Error, Result};

/// Newest first; equal dates order by title, then path
pub fn compare_listing(a: &ContentDocument, b: &ContentDocument) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.path.cmp(&b.path))
}

/// Sort documents for chronological listings
pub fn sort_listing(docs: &mut [ContentDocument]) {
    docs.sort_by(compare_listing);
}

/// Keep one document per (language, logical path).
///
/// Two published documents on the same path are an error. A draft that
/// collides with a published document is hidden behind it; two colliding
/// drafts keep the one whose source sorts first.
pub fn expose(mut docs: Vec<ContentDocument>) -> Result<Vec<ContentDocument>> {
    docs.sort_by(|a, b| a.source.cmp(&b.source));

    let mut exposed: IndexMap<(String, String), ContentDocument> = IndexMap::new();
    for doc in docs {
        match exposed.entry((doc.lang.clone(), doc.path.clone())) {
            Entry::Vacant(slot) => {
                slot.insert(doc);
            }
            Entry::Occupied(mut slot) => {
                let current = slot.get();
                if !current.draft && !doc.draft {
                    return Err(Error::DuplicatePath {
                        path: doc.path.clone(),
                        first: current.full_source.clone(),
                        second: doc.full_source,
                    });
                }
                let (kept, hidden) = if current.draft && !doc.draft {
                    let hidden = slot.insert(doc);
                    (slot.get().source.clone(), hidden.source)
                } else {
                    (current.source.clone(), doc.source)
                };
                tracing::warn!(
                    "Draft {} shares path {} with {}, hiding the draft",
                    hidden,
                    slot.key().1,
                    kept
                );
            }
        }
    }

    Ok(exposed.into_values().collect())
}

/// Regular pages belonging to any of `sections`, in listing order
pub fn pages_in_sections<'a>(
    docs: &'a [ContentDocument],
    sections: &'a [String],
) -> impl Iterator<Item = &'a ContentDocument> + 'a {
    docs.iter()
        .filter(move |doc| doc.is_page() && sections.iter().any(|s| *s == doc.section))
}

/// Number of regular pages per non-empty section
pub fn section_counts(docs: &[ContentDocument]) -> BTreeMap<String, usize> {
    let mut sections = BTreeMap::new();
    for doc in docs.iter().filter(|d| d.is_page() && !d.section.is_empty()) {
        *sections.entry(doc.section.clone()).or_insert(0) += 1;
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::test_document;
    use std::path::PathBuf;

    #[test]
    fn test_sort_newest_first() {
        let mut docs = vec![
            test_document("Old", "2024-01-01", false),
            test_document("New", "2025-04-13", false),
            test_document("Middle", "2025-02-07", false),
        ];
        sort_listing(&mut docs);
        let titles: Vec<_> = docs.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Middle", "Old"]);
    }

    #[test]
    fn test_sort_ties_by_title() {
        let mut docs = vec![
            test_document("Beta", "2025-01-01", false),
            test_document("Alpha", "2025-01-01", false),
        ];
        sort_listing(&mut docs);
        assert_eq!(docs[0].title, "Alpha");
        assert_eq!(docs[1].title, "Beta");
    }

    #[test]
    fn test_same_title_different_paths_kept() {
        let mut draft = test_document("How variable sized arrays work", "2025-02-07", true);
        draft.path = "/posts/vla-draft/".to_string();
        draft.source = "posts/vla-draft.md".to_string();
        let published = test_document("How variable sized arrays work", "2025-04-13", false);

        let docs = expose(vec![draft, published]).unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn test_published_duplicates_fail() {
        let mut a = test_document("A", "2025-01-01", false);
        let mut b = test_document("B", "2025-01-02", false);
        a.path = "/posts/same/".to_string();
        b.path = "/posts/same/".to_string();
        a.source = "posts/a.md".to_string();
        b.source = "posts/b.md".to_string();
        a.full_source = PathBuf::from("content/posts/a.md");
        b.full_source = PathBuf::from("content/posts/b.md");

        let err = expose(vec![a, b]).unwrap_err();
        assert!(matches!(err, Error::DuplicatePath { ref path, .. } if path == "/posts/same/"));
    }

    #[test]
    fn test_draft_hidden_behind_published() {
        let mut draft = test_document("Draft", "2025-01-01", true);
        let mut published = test_document("Published", "2025-01-02", false);
        draft.path = "/posts/same/".to_string();
        published.path = "/posts/same/".to_string();
        draft.source = "posts/a.md".to_string();
        published.source = "posts/b.md".to_string();

        let docs = expose(vec![draft, published]).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "Published");
    }

    #[test]
    fn test_colliding_drafts_keep_first_source() {
        let mut later = test_document("Later", "2025-03-01", true);
        let mut earlier = test_document("Earlier", "2025-01-01", true);
        later.path = "/posts/same/".to_string();
        earlier.path = "/posts/same/".to_string();
        later.source = "posts/b.md".to_string();
        earlier.source = "posts/a.md".to_string();

        // Input order does not matter
        let docs = expose(vec![later.clone(), earlier.clone()]).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].source, "posts/a.md");

        let docs = expose(vec![earlier, later]).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].source, "posts/a.md");
    }

    #[test]
    fn test_same_path_other_language() {
        let english = test_document("Post", "2025-01-01", false);
        let mut french = test_document("Post", "2025-01-01", false);
        french.lang = "fr".to_string();
        french.source = "posts/post.fr.md".to_string();

        assert_eq!(expose(vec![english, french]).unwrap().len(), 2);
    }

    #[test]
    fn test_sections() {
        let mut about = test_document("About", "2025-01-01", false);
        about.section = String::new();
        let docs = vec![
            test_document("One", "2025-01-01", false),
            test_document("Two", "2025-01-02", false),
            about,
        ];

        let counts = section_counts(&docs);
        assert_eq!(counts.get("posts"), Some(&2));
        assert_eq!(counts.len(), 1);

        let main = vec!["posts".to_string()];
        assert_eq!(pages_in_sections(&docs, &main).count(), 2);
        let missing = vec!["notes".to_string()];
        assert_eq!(pages_in_sections(&docs, &missing).count(), 0);
    }
}
