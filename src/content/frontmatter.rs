//! Front-matter parsing
//!
//! A content file opens with a metadata header in one of three formats:
//! TOML between `+++` lines, YAML between `---` lines, or a JSON object.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::helpers::stringify_toml_datetimes;

const TOML_DELIMITER: &str = "+++";
const YAML_DELIMITER: &str = "---";

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        None(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
        OneOrMany::None(()) => Vec::new(),
    })
}

/// Header format of a content file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterFormat {
    Toml,
    Yaml,
    Json,
}

/// Front-matter data from a content document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub draft: bool,
    pub slug: Option<String>,
    pub lang: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub summary: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl FrontMatter {
    /// Split a file into front-matter and body.
    ///
    /// `path` names the file in errors. A file without a recognized header,
    /// or whose closing delimiter is missing, is an error.
    pub fn parse<'a>(content: &'a str, path: &Path) -> Result<(Self, &'a str)> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let (fm, body) = match detect_format(content) {
            Some(FrontMatterFormat::Toml) => {
                let (header, body) = split_delimited(content, TOML_DELIMITER).ok_or_else(|| {
                    Error::front_matter(path, "missing closing `+++` delimiter")
                })?;
                (parse_toml(header, path)?, body)
            }
            Some(FrontMatterFormat::Yaml) => {
                let (header, body) = split_delimited(content, YAML_DELIMITER).ok_or_else(|| {
                    Error::front_matter(path, "missing closing `---` delimiter")
                })?;
                (parse_yaml(header, path)?, body)
            }
            Some(FrontMatterFormat::Json) => parse_json(content, path)?,
            None => {
                return Err(Error::front_matter(
                    path,
                    "missing front-matter delimiter (`+++`, `---` or `{`)",
                ))
            }
        };

        Ok((fm, body.trim_start_matches(['\n', '\r'])))
    }

    /// Parse the date field.
    ///
    /// `Ok(None)` when no date is set; an error when it is set but unreadable.
    pub fn parse_date(&self, path: &Path) -> Result<Option<DateTime<FixedOffset>>> {
        match &self.date {
            None => Ok(None),
            Some(s) => parse_date_string(s)
                .map(Some)
                .ok_or_else(|| Error::front_matter(path, format!("invalid date `{}`", s))),
        }
    }
}

fn detect_format(content: &str) -> Option<FrontMatterFormat> {
    if content.starts_with(TOML_DELIMITER) {
        Some(FrontMatterFormat::Toml)
    } else if content.starts_with(YAML_DELIMITER) {
        Some(FrontMatterFormat::Yaml)
    } else if content.starts_with('{') {
        Some(FrontMatterFormat::Json)
    } else {
        None
    }
}

/// Split at the first line consisting only of `delimiter`, after the opening one
fn split_delimited<'a>(content: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != delimiter {
        return None;
    }

    let mut offset = first.len();
    for line in lines {
        if line.trim_end() == delimiter {
            return Some((&content[first.len()..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_toml(header: &str, path: &Path) -> Result<FrontMatter> {
    let mut value: toml::Value = toml::from_str::<toml::Table>(header)
        .map(toml::Value::Table)
        .map_err(|e| Error::front_matter(path, e.to_string()))?;

    // TOML dates are native values; the model reads them as text
    stringify_toml_datetimes(&mut value);

    value
        .try_into()
        .map_err(|e: toml::de::Error| Error::front_matter(path, e.to_string()))
}

fn parse_yaml(header: &str, path: &Path) -> Result<FrontMatter> {
    if header.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    serde_yaml::from_str(header).map_err(|e| Error::front_matter(path, e.to_string()))
}

fn parse_json<'a>(content: &'a str, path: &Path) -> Result<(FrontMatter, &'a str)> {
    let mut stream = serde_json::Deserializer::from_str(content).into_iter::<FrontMatter>();
    match stream.next() {
        Some(Ok(fm)) => Ok((fm, &content[stream.byte_offset()..])),
        Some(Err(e)) => Err(Error::front_matter(path, e.to_string())),
        None => Err(Error::front_matter(path, "empty JSON front-matter")),
    }
}

/// Parse an ISO-8601 date or date-time. Values without an offset are UTC.
pub fn parse_date_string(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    let with_offset = ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%d %H:%M:%S%z", "%Y-%m-%d %H:%M:%S %z"];
    for fmt in with_offset {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let naive = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in naive {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<(FrontMatter, &str)> {
        FrontMatter::parse(content, Path::new("content/posts/test.md"))
    }

    #[test]
    fn test_parse_toml_frontmatter() {
        let content = r#"+++
title = "How variable sized arrays work"
date = 2025-04-13T10:00:00+02:00
draft = false
tags = ["c", "stack"]
series = "internals"
+++

The stack pointer moves at runtime.
"#;

        let (fm, body) = parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("How variable sized arrays work"));
        assert_eq!(fm.date.as_deref(), Some("2025-04-13T10:00:00+02:00"));
        assert!(!fm.draft);
        assert_eq!(fm.tags, vec!["c", "stack"]);
        assert_eq!(fm.extra["series"], "internals");
        assert!(body.starts_with("The stack pointer"));
    }

    #[test]
    fn test_parse_toml_nested_dates() {
        let content = "+++\ntitle = \"Notes\"\n[revisions]\nfirst = 2025-02-07\nlist = [2025-04-13T08:00:00Z]\n+++\n";
        let (fm, _) = parse(content).unwrap();
        assert_eq!(fm.extra["revisions"]["first"], "2025-02-07");
        assert_eq!(fm.extra["revisions"]["list"][0], "2025-04-13T08:00:00Z");
    }

    #[test]
    fn test_parse_toml_local_date() {
        let content = "+++\ntitle = \"Draft\"\ndate = 2025-02-07\ndraft = true\n+++\nBody\n";
        let (fm, body) = parse(content).unwrap();
        assert_eq!(fm.date.as_deref(), Some("2025-02-07"));
        assert!(fm.draft);
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
draft: true
tags: Notes
---

This is the content.
"#;

        let (fm, body) = parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-15"));
        assert!(fm.draft);
        assert_eq!(fm.tags, vec!["Notes"]);
        assert!(body.contains("This is the content."));
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test Post", "tags": ["a", "b"], "draft": true}

This is content.
"#;

        let (fm, body) = parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Test Post"));
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert!(fm.draft);
        assert_eq!(body.trim(), "This is content.");
    }

    #[test]
    fn test_empty_header() {
        let (fm, body) = parse("+++\n+++\nJust text\n").unwrap();
        assert!(fm.title.is_none());
        assert!(!fm.draft);
        assert_eq!(body, "Just text\n");
    }

    #[test]
    fn test_missing_closing_delimiter() {
        let err = parse("+++\ntitle = \"x\"\n\nno end").unwrap_err();
        assert!(matches!(err, Error::FrontMatter { .. }));
        assert!(err.to_string().contains("test.md"));
    }

    #[test]
    fn test_missing_header() {
        let err = parse("# Just a heading\n\nText").unwrap_err();
        assert!(matches!(err, Error::FrontMatter { .. }));
    }

    #[test]
    fn test_malformed_toml() {
        let err = parse("+++\ntitle = \n+++\nBody").unwrap_err();
        assert!(matches!(err, Error::FrontMatter { .. }));
    }

    #[test]
    fn test_horizontal_rule_is_not_delimiter() {
        let err = parse("----\nnot a header\n----\n").unwrap_err();
        assert!(matches!(err, Error::FrontMatter { .. }));
    }

    #[test]
    fn test_parse_date_formats() {
        let dt = parse_date_string("2025-04-13").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-04-13T00:00:00+00:00");

        let dt = parse_date_string("2025-04-13T10:30:00+05:30").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 5 * 3600 + 30 * 60);

        let dt = parse_date_string("2025-04-13T10:30:00Z").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);

        let dt = parse_date_string("2025-04-13 10:30:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "10:30");

        assert!(parse_date_string("April 13th").is_none());
    }

    #[test]
    fn test_invalid_date_is_error() {
        let (fm, _) = parse("+++\ndate = \"yesterday\"\n+++\n").unwrap();
        let err = fm.parse_date(Path::new("a.md")).unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }
}
