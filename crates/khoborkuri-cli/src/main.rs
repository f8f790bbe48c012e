//! Khoborkuri CLI
//!
//! Command-line interface for Khoborkuri - a local news desk with posts,
//! categories and hashtags.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use khoborkuri_core::{Config, ContentStore, LoadOrigin, StorageError, View};

mod commands;
mod editor;
mod output;

use commands::post::{NewPost, PostEdits};
use commands::Store;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "khoborkuri")]
#[command(about = "Khoborkuri - Local-first news posts and categories")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to an alternative config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a page (defaults to home)
    View {
        #[command(subcommand)]
        command: Option<ViewCommands>,
    },
    /// Manage posts
    Post {
        #[command(subcommand)]
        command: PostCommands,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// List hashtags of published posts
    Tags,
    /// Show storage location and content counts
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ViewCommands {
    /// Latest published posts
    Home,
    /// Published posts in a category
    Category {
        /// Category ID (full ID or prefix)
        id: String,
    },
    /// Published posts with a hashtag
    Tag {
        /// Hashtag, with or without a leading '#'
        tag: String,
    },
    /// A single post
    Post {
        /// Post ID (full ID or prefix)
        id: String,
    },
    /// All posts and categories, drafts included
    Admin,
}

impl From<ViewCommands> for View {
    fn from(command: ViewCommands) -> Self {
        match command {
            ViewCommands::Home => View::Home,
            ViewCommands::Category { id } => View::Category { id },
            ViewCommands::Tag { tag } => View::Tag { name: tag },
            ViewCommands::Post { id } => View::PostDetail { id },
            ViewCommands::Admin => View::Admin,
        }
    }
}

#[derive(Subcommand)]
enum PostCommands {
    /// Create a new post
    #[command(alias = "add")]
    Create {
        /// Headline
        #[arg(short = 'T', long)]
        title: String,
        /// Body text, paragraphs separated by newlines (opens editor if not provided)
        #[arg(short, long)]
        content: Option<String>,
        /// Category ID (defaults to the fallback category)
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Hashtags to add (comma-separated or repeated)
        #[arg(short, long)]
        tag: Vec<String>,
        /// Image URL
        #[arg(long)]
        image: Option<String>,
        /// Video URL
        #[arg(long)]
        video: Option<String>,
        /// Save as draft instead of publishing
        #[arg(long)]
        draft: bool,
    },
    /// Edit a post (prompts for fields when none are given)
    Edit {
        /// Post ID (full ID or prefix)
        id: String,
        #[arg(short = 'T', long)]
        title: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Replacement hashtags (comma-separated)
        #[arg(short, long)]
        tags: Option<String>,
        /// Image URL (empty string clears it)
        #[arg(long)]
        image: Option<String>,
        /// Video URL (empty string clears it)
        #[arg(long)]
        video: Option<String>,
    },
    /// Publish a post
    Publish {
        /// Post ID (full ID or prefix)
        id: String,
    },
    /// Turn a post back into a draft
    Unpublish {
        /// Post ID (full ID or prefix)
        id: String,
    },
    /// Delete a post
    #[command(alias = "rm")]
    Delete {
        /// Post ID (full ID or prefix)
        id: String,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Create a new category
    #[command(alias = "add")]
    Create {
        /// Category name
        name: String,
    },
    /// Rename a category
    Rename {
        /// Category ID (full ID or prefix)
        id: String,
        /// New name
        name: String,
    },
    /// Delete a category, moving its posts to the fallback category
    #[command(alias = "rm")]
    Delete {
        /// Category ID (full ID or prefix)
        id: String,
    },
    /// List all categories
    #[command(alias = "ls")]
    List,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, storage_key, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let result = run(cli, &output);
    if let Some(hint) = result.as_ref().err().and_then(storage_hint) {
        eprintln!("Hint: {}", hint);
    }
    result
}

fn run(cli: Cli, output: &Output) -> Result<()> {
    // Config commands don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    init_logging(&config);

    let mut store = open_store(&config, output)?;

    match cli.command {
        None => commands::view::show(&store, View::Home, output),
        Some(Commands::View { command }) => {
            let view = command.map(View::from).unwrap_or_default();
            commands::view::show(&store, view, output)
        }
        Some(Commands::Post { command }) => handle_post_command(command, &mut store, output),
        Some(Commands::Category { command }) => {
            handle_category_command(command, &mut store, output)
        }
        Some(Commands::Tags) => commands::tag::list(&store, output),
        Some(Commands::Status) => commands::status::show(&store, &config, output),
        Some(Commands::Config { .. }) => Ok(()), // Handled above
    }
}

/// The user-facing hint of the first storage error in the chain
fn storage_hint(err: &anyhow::Error) -> Option<&'static str> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<StorageError>())
        .and_then(StorageError::hint)
}

fn open_store(config: &Config, output: &Output) -> Result<Store> {
    let store = ContentStore::open(config.storage(), config.storage_key.clone())
        .with_context(|| format!("Failed to open {}", config.document_path().display()))?;

    match store.origin() {
        LoadOrigin::Restored => {}
        LoadOrigin::Seeded => info!("Seeded new document at {:?}", config.document_path()),
        LoadOrigin::RecoveredFromCorrupt => {
            warn!("Stored document was corrupt, restored seed content");
            if !output.is_quiet() {
                eprintln!(
                    "Warning: {} could not be read. A backup was kept and the default content restored.",
                    config.document_path().display()
                );
            }
        }
    }

    Ok(store)
}

fn handle_post_command(command: PostCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        PostCommands::Create {
            title,
            content,
            category,
            tag,
            image,
            video,
            draft,
        } => {
            let new = NewPost {
                title,
                content,
                category,
                tags: tag,
                image,
                video,
                draft,
            };
            commands::post::create(store, new, output)
        }
        PostCommands::Edit {
            id,
            title,
            content,
            category,
            tags,
            image,
            video,
        } => {
            let edits = PostEdits {
                title,
                content,
                category,
                tags,
                image,
                video,
            };
            commands::post::edit(store, id, edits, output)
        }
        PostCommands::Publish { id } => commands::post::set_published(store, id, true, output),
        PostCommands::Unpublish { id } => commands::post::set_published(store, id, false, output),
        PostCommands::Delete { id } => commands::post::delete(store, id, output),
    }
}

fn handle_category_command(
    command: CategoryCommands,
    store: &mut Store,
    output: &Output,
) -> Result<()> {
    match command {
        CategoryCommands::Create { name } => commands::category::create(store, name, output),
        CategoryCommands::Rename { id, name } => {
            commands::category::rename(store, id, name, output)
        }
        CategoryCommands::Delete { id } => commands::category::delete(store, id, output),
        CategoryCommands::List => commands::category::list(store, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Initialize logging
///
/// Only initializes if KHOBORKURI_LOG is set. Logs to config.log_file
/// when configured, otherwise to stderr.
fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var("KHOBORKURI_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(format!(
        "khoborkuri_core={},khoborkuri_cli={}",
        log_level, log_level
    ));

    match &config.log_file {
        Some(log_path) => {
            let log_file = match OpenOptions::new().create(true).append(true).open(log_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
                    return;
                }
            };
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }

    info!("Logging initialized at level {}", log_level);
}
