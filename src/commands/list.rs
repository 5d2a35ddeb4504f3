//! List site content

use anyhow::Result;

use crate::content::BuildMode;
use crate::helpers::{is_external, short_date};
use crate::menu::MenuLink;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str, mode: BuildMode) -> Result<()> {
    let build = site.build(mode)?;

    match content_type {
        "page" | "pages" | "post" | "posts" => {
            let pages: Vec<_> = build.pages().collect();
            println!("Pages ({}):", pages.len());
            for page in pages {
                let marker = if page.draft { " (draft)" } else { "" };
                println!(
                    "  {} - {}{} [{}]",
                    short_date(&page.date),
                    page.title,
                    marker,
                    page.source
                );
            }
        }
        "draft" | "drafts" => {
            // Drafts only exist in a preview build
            let build = if mode.includes_drafts() {
                build
            } else {
                site.build(BuildMode::Preview)?
            };
            let drafts: Vec<_> = build.pages().filter(|p| p.draft).collect();
            println!("Drafts ({}):", drafts.len());
            for page in drafts {
                println!(
                    "  {} - {} [{}]",
                    short_date(&page.date),
                    page.title,
                    page.source
                );
            }
        }
        "section" | "sections" => {
            let sections = build.sections();
            println!("Sections ({}):", sections.len());
            for (name, count) in sections {
                let main = if build.main_sections.contains(&name) {
                    " (main)"
                } else {
                    ""
                };
                println!("  {} ({}){}", name, count, main);
            }
        }
        "menu" | "menus" => {
            for (name, items) in &build.menus.menus {
                println!("Menu {} ({}):", name, items.len());
                for item in items {
                    let kind = match &item.link {
                        MenuLink::Page { .. } => "page",
                        MenuLink::Url { url } if is_external(url) => "external",
                        MenuLink::Url { .. } => "url",
                    };
                    println!(
                        "  [{}] {} -> {} ({})",
                        item.weight,
                        item.name,
                        item.href(),
                        kind
                    );
                }
            }
            for warning in &build.menus.warnings {
                println!("warning: {}", warning);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: pages, drafts, sections, menus",
                content_type
            );
        }
    }

    Ok(())
}
