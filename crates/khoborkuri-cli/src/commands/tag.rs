//! Hashtag command handlers

use anyhow::Result;

use super::Store;
use crate::output::Output;

/// List hashtags of published posts with usage counts
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let tags = store.tags_with_counts();
    output.print_tags(&tags);
    Ok(())
}
