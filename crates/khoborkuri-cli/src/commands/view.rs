//! View command handlers

use anyhow::Result;

use khoborkuri_core::{Router, View};

use super::{resolve_category_id, resolve_post_id, Store};
use crate::output::Output;

/// Navigate to `view` and print the derived page
pub fn show(store: &Store, view: View, output: &Output) -> Result<()> {
    let mut router = Router::new();
    router.navigate(resolve_view(store, view));

    let page = router.page(store);
    output.print_page(&page, store.categories());
    Ok(())
}

/// Expand id prefixes; ids that do not resolve are kept so the page
/// reports "not found"
fn resolve_view(store: &Store, view: View) -> View {
    match view {
        View::Category { id } => View::Category {
            id: resolve_category_id(store, &id).unwrap_or(id),
        },
        View::PostDetail { id } => View::PostDetail {
            id: resolve_post_id(store, &id).unwrap_or(id),
        },
        View::Tag { name } => View::Tag {
            name: name.strip_prefix('#').unwrap_or(&name).to_string(),
        },
        other => other,
    }
}
