//! Status command handler

use anyhow::Result;
use tracing::debug;

use khoborkuri_core::{Config, LoadOrigin};

use super::Store;
use crate::output::{Output, OutputFormat};

/// Post and category counts shown by `status`
#[derive(Debug, PartialEq, Eq)]
struct Counts {
    posts: usize,
    published: usize,
    drafts: usize,
    categories: usize,
    hashtags: usize,
}

impl Counts {
    fn of(store: &Store) -> Self {
        let published = store.posts().iter().filter(|p| p.published).count();
        Self {
            posts: store.posts().len(),
            published,
            drafts: store.posts().len() - published,
            categories: store.categories().len(),
            hashtags: store.tags_with_counts().len(),
        }
    }
}

fn origin_label(origin: LoadOrigin) -> &'static str {
    match origin {
        LoadOrigin::Restored => "restored",
        LoadOrigin::Seeded => "seeded",
        LoadOrigin::RecoveredFromCorrupt => "recovered from corrupt document",
    }
}

/// Size of the stored document; a failed lookup is logged and shown as unknown
fn document_size(store: &Store) -> Option<u64> {
    match store.storage().size_of(store.key()) {
        Ok(size) => size,
        Err(e) => {
            debug!(error = %e, "Could not read document size");
            None
        }
    }
}

/// Show status information
pub fn show(store: &Store, config: &Config, output: &Output) -> Result<()> {
    let counts = Counts::of(store);
    let size = document_size(store);

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "document": config.document_path(),
                    "document_size": size,
                    "origin": origin_label(store.origin()),
                    "counts": {
                        "posts": counts.posts,
                        "published": counts.published,
                        "drafts": counts.drafts,
                        "categories": counts.categories,
                        "hashtags": counts.hashtags
                    },
                    "fallback_category": store.fallback_category().id
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.document_path().display());
        }
        OutputFormat::Human => {
            println!("Khoborkuri Status");
            println!("=================");
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            println!("  Document: {}", config.document_path().display());
            if let Some(size) = size {
                println!("  Size:     {} bytes", size);
            }
            println!("  Loaded:   {}", origin_label(store.origin()));
            println!();
            println!("Contents:");
            println!(
                "  Posts:      {} ({} published, {} drafts)",
                counts.posts, counts.published, counts.drafts
            );
            println!("  Categories: {}", counts.categories);
            println!("  Hashtags:   {}", counts.hashtags);
            println!("  Fallback:   {}", store.fallback_category().name);
        }
    }

    Ok(())
}
