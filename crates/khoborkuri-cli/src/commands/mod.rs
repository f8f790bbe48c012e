//! Command handlers

use anyhow::{bail, Result};

use khoborkuri_core::{ContentStore, FileStorage};

pub mod category;
pub mod config;
pub mod post;
pub mod status;
pub mod tag;
pub mod view;

/// The store as opened by the CLI
pub type Store = ContentStore<FileStorage>;

/// Resolve a full id or unique id prefix against `ids`
///
/// An exact match wins even if it is also a prefix of other ids.
pub fn resolve_id<'a>(
    kind: &str,
    input: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<String> {
    let mut matches = Vec::new();
    for id in ids {
        if id == input {
            return Ok(id.to_string());
        }
        if id.starts_with(input) {
            matches.push(id);
        }
    }

    match matches.len() {
        0 => bail!("No {} found matching: {}", kind, input),
        1 => Ok(matches[0].to_string()),
        _ => {
            eprintln!("Multiple {}s match '{}':", kind, input);
            for id in &matches {
                eprintln!("  {}", id);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

/// Resolve a post id or prefix
pub fn resolve_post_id(store: &Store, input: &str) -> Result<String> {
    resolve_id("post", input, store.posts().iter().map(|p| p.id.as_str()))
}

/// Resolve a category id or prefix
pub fn resolve_category_id(store: &Store, input: &str) -> Result<String> {
    resolve_id(
        "category",
        input,
        store.categories().iter().map(|c| c.id.as_str()),
    )
}
