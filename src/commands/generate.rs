//! Build the site manifest

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::build::SiteBuild;
use crate::content::BuildMode;
use crate::generator::Generator;
use crate::Site;

/// Run one build and write the manifest
pub fn run(site: &Site, mode: BuildMode) -> Result<(SiteBuild, PathBuf)> {
    let start = std::time::Instant::now();

    let build = site.build(mode)?;
    for warning in &build.menus.warnings {
        tracing::debug!("Dangling menu reference: {}", warning);
    }

    let generator = Generator::new(site);
    let path = generator.generate(&build)?;

    let duration = start.elapsed();
    tracing::info!("Built in {:.2}s", duration.as_secs_f64());

    Ok((build, path))
}

/// Watch content and config for changes and rebuild.
///
/// Every rebuild reloads the config and rescans all content.
pub async fn watch(site: &Site, mode: BuildMode) -> Result<()> {
    let base_dir = site.base_dir.clone();
    tokio::task::spawn_blocking(move || watch_blocking(base_dir, mode)).await?
}

fn watch_blocking(base_dir: PathBuf, mode: BuildMode) -> Result<()> {
    let site = Site::new(&base_dir)?;
    let (tx, rx) = channel();

    // Debounce to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if site.content_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.content_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", site.content_dir);
    }
    debouncer
        .watcher()
        .watch(&site.config_path, RecursiveMode::NonRecursive)?;
    tracing::debug!("Watching: {:?}", site.config_path);

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| {
                    let path_str = e.path.to_string_lossy();
                    !path_str.contains(".git")
                        && !path_str.contains(".DS_Store")
                        && !path_str.ends_with('~')
                });
                if !relevant {
                    continue;
                }

                tracing::info!("Change detected, rebuilding...");
                let result = Site::new(&base_dir)
                    .map_err(anyhow::Error::from)
                    .and_then(|site| run(&site, mode));
                if let Err(e) = result {
                    tracing::error!("Build failed: {:#}", e);
                }
            }
            Ok(Err(e)) => tracing::error!("Watch error: {:?}", e),
            Err(_) => break,
        }
    }

    Ok(())
}
