//! Category command handlers

use anyhow::{Context, Result};

use khoborkuri_core::StoreError;

use super::{resolve_category_id, Store};
use crate::editor::confirm;
use crate::output::Output;

/// List all categories
pub fn list(store: &Store, output: &Output) -> Result<()> {
    output.print_categories(store.categories());
    Ok(())
}

/// Create a new category
pub fn create(store: &mut Store, name: String, output: &Output) -> Result<()> {
    let category = store
        .create_category(&name)
        .context("Failed to create category")?;

    if output.is_quiet() {
        println!("{}", category.id);
    }
    output.success(&format!(
        "Created category: {} ({}) [{}]",
        category.name, category.slug, category.id
    ));
    Ok(())
}

/// Rename a category
pub fn rename(store: &mut Store, id: String, name: String, output: &Output) -> Result<()> {
    let category_id = resolve_category_id(store, &id)?;

    store
        .rename_category(&category_id, &name)
        .context("Failed to rename category")?;

    output.success(&format!("Renamed category {} to {}", category_id, name.trim()));
    Ok(())
}

/// Delete a category, moving its posts to the fallback category
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let category_id = resolve_category_id(store, &id)?;

    if output.should_prompt() {
        let affected = store
            .posts()
            .iter()
            .filter(|p| p.category_id == category_id)
            .count();
        if let Some(category) = store.category(&category_id) {
            println!("Delete category: {} - {}", category.id, category.name);
        }
        if affected > 0 {
            println!("{} post(s) will move to the fallback category.", affected);
        }
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    match store.delete_category(&category_id) {
        Ok(_) => {
            output.success(&format!(
                "Deleted category: {} (posts moved to {})",
                category_id,
                store.fallback_category().name
            ));
            Ok(())
        }
        Err(e @ StoreError::InvalidOperation(_)) => {
            Err(anyhow::Error::new(e).context("At least one category must remain"))
        }
        Err(e) => Err(anyhow::Error::new(e).context("Failed to delete category")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::quiet_store;

    #[test]
    fn test_create_and_rename() {
        let (_dir, mut store, output) = quiet_store();

        create(&mut store, "Sports Desk".to_string(), &output).unwrap();
        let id = store.categories().last().unwrap().id.clone();
        assert_eq!(store.categories().last().unwrap().slug, "sports-desk");

        rename(&mut store, id[..8].to_string(), "Cricket".to_string(), &output).unwrap();
        let cat = store.category(&id).unwrap();
        assert_eq!(cat.name, "Cricket");
        assert_eq!(cat.slug, "cricket");
    }

    #[test]
    fn test_delete_moves_posts() {
        let (_dir, mut store, output) = quiet_store();

        delete(&mut store, "1".to_string(), &output).unwrap();

        assert_eq!(store.categories().len(), 3);
        assert_eq!(store.post("p1").unwrap().category_id, "2");
    }

    #[test]
    fn test_delete_last_category_fails() {
        let (_dir, mut store, output) = quiet_store();
        for id in ["1", "2", "3"] {
            delete(&mut store, id.to_string(), &output).unwrap();
        }

        let err = delete(&mut store, "4".to_string(), &output).unwrap_err();
        assert!(err.to_string().contains("At least one category"));
        assert_eq!(store.categories().len(), 1);
    }
}
