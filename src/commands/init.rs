//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"baseURL = "https://example.org/"
languageCode = "en-us"
title = "My New Site"

[module]
[[module.imports]]
path = "github.com/hugo-sid/hugo-blog-awesome"

[markup]
[markup.highlight]
noClasses = false

[markup.tableOfContents]
startLevel = 2
endLevel = 3
ordered = false

[[menu.main]]
pageRef = "posts"
name = "Posts"
url = "/posts/"
weight = 10

[params]
sitename = "My New Site"
defaultColor = "auto"
mainSections = ["posts"]
toc = true
goToTop = true
"#;

/// Scaffold a site with a config file and one draft post.
///
/// Refuses to touch a directory that already has a config file.
pub fn init_site(target_dir: &Path) -> Result<()> {
    for name in crate::config::CONFIG_FILES {
        if target_dir.join(name).exists() {
            anyhow::bail!("{:?} already contains {}", target_dir, name);
        }
    }

    fs::create_dir_all(target_dir.join("content/posts"))?;
    fs::create_dir_all(target_dir.join("static"))?;
    fs::create_dir_all(target_dir.join("themes"))?;

    fs::write(target_dir.join("hugo.toml"), CONFIG)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"+++
title = "Hello World"
date = {}
draft = true
tags = ["welcome"]
+++

This is the first post of the site. Publish it by setting `draft = false`.

<!--more-->

## Writing

Create a new post with `hugo-rs new posts/my-post`.

## Building

Run `hugo-rs build` to write the site manifest, or `hugo-rs build -D` to
include drafts.
"#,
        now.format("%Y-%m-%dT%H:%M:%S%:z")
    );
    fs::write(target_dir.join("content/posts/hello-world.md"), sample_post)?;

    Ok(())
}
