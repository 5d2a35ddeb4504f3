//! CLI entry point for hugo-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hugo_rs::{BuildMode, Site};

#[derive(Parser)]
#[command(name = "hugo-rs")]
#[command(version)]
#[command(about = "Loads a Hugo-style blog and writes its site manifest", long_about = None)]
struct Cli {
    /// Site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    source: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new draft
    New {
        /// Path inside the content directory, e.g. posts/my-post
        path: String,

        /// Title of the new draft
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Load the site and write the manifest
    #[command(alias = "g", alias = "generate")]
    Build {
        /// Include drafts (preview mode)
        #[arg(short = 'D', long = "buildDrafts")]
        build_drafts: bool,

        /// Rebuild on content or config changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Remove the publish directory
    Clean,

    /// Print the effective configuration
    Config,

    /// List site information
    List {
        /// What to list (pages, drafts, sections, menus)
        #[arg(default_value = "pages")]
        r#type: String,

        /// Include drafts (preview mode)
        #[arg(short = 'D', long = "buildDrafts")]
        build_drafts: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "hugo_rs=debug,info"
    } else {
        "hugo_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.source {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            hugo_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized new site in {:?}", target_dir);
        }

        Commands::New { path, title } => {
            let site = Site::new(&base_dir)?;
            let created = hugo_rs::commands::new::create_content(&site, &path, title.as_deref())?;
            println!("Created {:?}", created);
        }

        Commands::Build {
            build_drafts,
            watch,
        } => {
            let site = Site::new(&base_dir)?;
            let mode = BuildMode::from_drafts_flag(build_drafts);
            tracing::info!("Building site in {} mode...", mode);

            let (build, manifest) = hugo_rs::commands::generate::run(&site, mode)?;
            println!(
                "Built {} pages, manifest written to {:?}",
                build.pages().count(),
                manifest
            );

            if watch {
                tracing::info!("Watching for file changes...");
                hugo_rs::commands::generate::watch(&site, mode).await?;
            }
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Cleaning publish directory...");
            hugo_rs::commands::clean::run(&site)?;
            println!("Cleaned successfully!");
        }

        Commands::Config => {
            let site = Site::new(&base_dir)?;
            hugo_rs::commands::config::run(&site)?;
        }

        Commands::List {
            r#type,
            build_drafts,
        } => {
            let site = Site::new(&base_dir)?;
            let mode = BuildMode::from_drafts_flag(build_drafts);
            hugo_rs::commands::list::run(&site, &r#type, mode)?;
        }

        Commands::Version => {
            println!("hugo-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
