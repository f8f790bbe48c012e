//! Content store
//!
//! The `ContentStore` owns the posts and categories and is the only way to
//! change them. Every mutation that changes something writes the whole
//! document back to storage before returning.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = ContentStore::open(config.storage(), &config.storage_key)?;
//!
//! store.create_category("Sports")?;
//! store.create_post(PostDraft::new("Title", "Body", "1"))?;
//!
//! store.delete_category("2")?; // posts in "2" move to the fallback
//! ```
//!
//! ## Loading
//!
//! A missing document starts from the seed data. A document that fails to
//! parse is copied to `<key>.corrupt` and replaced by the seed data as well;
//! that failure is logged but never returned.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::document::ContentDocument;
use crate::error::{StoreError, StoreResult};
use crate::models::{Category, Post, PostDraft, PostPatch};
use crate::storage::Storage;

/// How the store's content was obtained at open time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// A valid persisted document was loaded
    Restored,
    /// Nothing was persisted yet; seed data was used
    Seeded,
    /// The persisted document was unreadable; seed data was used
    RecoveredFromCorrupt,
}

/// Owned, persisted collection of posts and categories
pub struct ContentStore<S: Storage> {
    /// Current content
    doc: ContentDocument,
    /// Durable backend
    storage: S,
    /// Key the document lives under
    key: String,
    /// How the content was obtained
    origin: LoadOrigin,
}

impl<S: Storage> ContentStore<S> {
    /// Open the store, loading the persisted document or seeding a new one
    ///
    /// Only a failure to read or write the storage backend is an error.
    pub fn open(mut storage: S, key: impl Into<String>) -> StoreResult<Self> {
        let key = key.into();

        let (doc, origin) = match storage.get(&key)? {
            None => {
                info!(key = %key, "No persisted content, starting from seed data");
                (ContentDocument::seed(), LoadOrigin::Seeded)
            }
            Some(raw) => match ContentDocument::from_bytes(&raw) {
                Ok(doc) => {
                    debug!(
                        posts = doc.posts.len(),
                        categories = doc.categories.len(),
                        "Loaded persisted content"
                    );
                    (doc, LoadOrigin::Restored)
                }
                Err(e) => {
                    let backup_key = format!("{}.corrupt", key);
                    warn!(
                        error = %e,
                        backup = %backup_key,
                        "Persisted content is corrupt, reseeding"
                    );
                    storage.set(&backup_key, &raw)?;
                    (ContentDocument::seed(), LoadOrigin::RecoveredFromCorrupt)
                }
            },
        };

        let mut store = Self {
            doc,
            storage,
            key,
            origin,
        };
        if store.origin != LoadOrigin::Restored {
            store.save()?;
        }
        Ok(store)
    }

    /// How the content was obtained when the store was opened
    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    /// The storage key of the document
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The storage backend
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The current document
    pub fn document(&self) -> &ContentDocument {
        &self.doc
    }

    // ==================== Post Operations ====================

    /// Create a post and put it at the front of the list
    ///
    /// Title and content must be non-blank and the category must exist.
    pub fn create_post(&mut self, draft: PostDraft) -> StoreResult<Post> {
        if draft.title.trim().is_empty() {
            return Err(StoreError::Validation("post title is required".to_string()));
        }
        if draft.content.trim().is_empty() {
            return Err(StoreError::Validation(
                "post content is required".to_string(),
            ));
        }
        self.require_category(&draft.category_id)?;

        let post = Post::from_draft(draft);
        self.commit(|doc| doc.posts.insert(0, post.clone()))?;

        info!(id = %post.id, category = %post.category_id, "Created post");
        Ok(post)
    }

    /// Merge `patch` into the post with `id`
    ///
    /// Returns `false` without touching storage when no post has that id,
    /// whatever the patch holds.
    pub fn update_post(&mut self, id: &str, patch: PostPatch) -> StoreResult<bool> {
        let Some(index) = self.doc.posts.iter().position(|p| p.id == id) else {
            debug!(id, "Update ignored, no such post");
            return Ok(false);
        };
        if let Some(category_id) = &patch.category_id {
            self.require_category(category_id)?;
        }

        self.commit(|doc| doc.posts[index].apply(patch))?;

        info!(id, "Updated post");
        Ok(true)
    }

    /// Remove the post with `id`
    ///
    /// Returns `false` when no post has that id.
    pub fn delete_post(&mut self, id: &str) -> StoreResult<bool> {
        let Some(index) = self.doc.posts.iter().position(|p| p.id == id) else {
            debug!(id, "Delete ignored, no such post");
            return Ok(false);
        };

        self.commit(|doc| {
            doc.posts.remove(index);
        })?;

        info!(id, "Deleted post");
        Ok(true)
    }

    /// Get a post by ID
    pub fn post(&self, id: &str) -> Option<&Post> {
        self.doc.posts.iter().find(|p| p.id == id)
    }

    /// All posts, newest insertion first
    pub fn posts(&self) -> &[Post] {
        &self.doc.posts
    }

    // ==================== Category Operations ====================

    /// Create a category at the end of the list
    pub fn create_category(&mut self, name: &str) -> StoreResult<Category> {
        if name.trim().is_empty() {
            return Err(StoreError::Validation(
                "category name is required".to_string(),
            ));
        }

        let category = Category::new(name.trim());
        self.commit(|doc| doc.categories.push(category.clone()))?;

        info!(id = %category.id, slug = %category.slug, "Created category");
        Ok(category)
    }

    /// Change a category's display name; the slug follows
    ///
    /// Returns `false` when no category has that id.
    pub fn rename_category(&mut self, id: &str, name: &str) -> StoreResult<bool> {
        if name.trim().is_empty() {
            return Err(StoreError::Validation(
                "category name is required".to_string(),
            ));
        }

        let Some(index) = self.doc.categories.iter().position(|c| c.id == id) else {
            debug!(id, "Rename ignored, no such category");
            return Ok(false);
        };
        self.commit(|doc| doc.categories[index].rename(name.trim()))?;

        info!(id, name = name.trim(), "Renamed category");
        Ok(true)
    }

    /// Delete a category, moving its posts to the fallback category
    ///
    /// The fallback is the first category remaining after the removal. The
    /// last category can never be deleted. Returns `false` when no category
    /// has that id.
    pub fn delete_category(&mut self, id: &str) -> StoreResult<bool> {
        let Some(index) = self.doc.categories.iter().position(|c| c.id == id) else {
            debug!(id, "Delete ignored, no such category");
            return Ok(false);
        };
        if self.doc.categories.len() == 1 {
            return Err(StoreError::InvalidOperation(
                "cannot delete the last remaining category".to_string(),
            ));
        }

        let (fallback, moved) = self.commit(|doc| {
            doc.categories.remove(index);
            let fallback = doc.categories[0].id.clone();
            let mut moved = 0;
            for post in doc.posts.iter_mut().filter(|p| p.category_id == id) {
                post.category_id = fallback.clone();
                moved += 1;
            }
            (fallback, moved)
        })?;

        info!(id, fallback = %fallback, moved, "Deleted category");
        Ok(true)
    }

    /// Get a category by ID
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.doc.categories.iter().find(|c| c.id == id)
    }

    /// All categories in display order
    pub fn categories(&self) -> &[Category] {
        &self.doc.categories
    }

    /// The category orphaned posts are moved to
    pub fn fallback_category(&self) -> &Category {
        // Non-empty by construction: loading rejects empty category lists and
        // deletion refuses to remove the last one
        &self.doc.categories[0]
    }

    /// Category name for a post, if the category resolves
    pub fn category_name(&self, post: &Post) -> Option<&str> {
        self.category(&post.category_id).map(|c| c.name.as_str())
    }

    // ==================== Tags ====================

    /// Hashtags of published posts with the number of posts carrying each
    ///
    /// Sorted by tag. A post listing a tag twice counts once.
    pub fn tags_with_counts(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for post in self.doc.posts.iter().filter(|p| p.published) {
            let mut seen: Vec<&str> = Vec::new();
            for tag in &post.hashtags {
                if !seen.contains(&tag.as_str()) {
                    seen.push(tag);
                    *counts.entry(tag).or_default() += 1;
                }
            }
        }
        counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect()
    }

    // ==================== Persistence ====================

    fn require_category(&self, id: &str) -> StoreResult<()> {
        if self.category(id).is_some() {
            Ok(())
        } else {
            Err(StoreError::UnknownCategory(id.to_string()))
        }
    }

    /// Apply `change` to a copy of the document, persist the copy, then adopt it
    ///
    /// On a failed write the live document is left as it was.
    fn commit<T>(&mut self, change: impl FnOnce(&mut ContentDocument) -> T) -> StoreResult<T> {
        let mut next = self.doc.clone();
        let out = change(&mut next);
        write_document(&mut self.storage, &self.key, &next)?;
        self.doc = next;
        Ok(out)
    }

    /// Write the current document to storage
    fn save(&mut self) -> StoreResult<()> {
        write_document(&mut self.storage, &self.key, &self.doc)
    }
}

fn write_document<S: Storage>(
    storage: &mut S,
    key: &str,
    doc: &ContentDocument,
) -> StoreResult<()> {
    let json = doc.to_json()?;
    storage.set(key, json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage, StorageError, StorageResult};
    use tempfile::TempDir;

    const KEY: &str = "khoborkuri_data";

    fn seeded_store() -> ContentStore<MemoryStorage> {
        ContentStore::open(MemoryStorage::new(), KEY).unwrap()
    }

    /// Store with the given category ids and no posts
    fn store_with_categories(ids: &[&str]) -> ContentStore<MemoryStorage> {
        let doc = ContentDocument {
            posts: Vec::new(),
            categories: ids
                .iter()
                .map(|id| Category::with_id(*id, format!("Cat {}", id), format!("cat-{}", id)))
                .collect(),
        };
        let storage = MemoryStorage::with_entry(KEY, doc.to_json().unwrap());
        ContentStore::open(storage, KEY).unwrap()
    }

    fn persisted(store: &ContentStore<MemoryStorage>) -> ContentDocument {
        let raw = store.storage().get(KEY).unwrap().unwrap();
        ContentDocument::from_bytes(&raw).unwrap()
    }

    /// Storage whose writes start failing once `fail_writes` is set
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_writes: bool,
    }

    impl Storage for FlakyStorage {
        fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &[u8]) -> StorageResult<()> {
            if self.fail_writes {
                return Err(StorageError::on_write(
                    std::io::Error::new(std::io::ErrorKind::Other, "No space left on device"),
                    format!("{}.json", key).into(),
                ));
            }
            self.inner.set(key, value)
        }
    }

    /// Seeded store whose every later write fails
    fn failing_store() -> ContentStore<FlakyStorage> {
        let mut store = ContentStore::open(FlakyStorage::default(), KEY).unwrap();
        store.storage.fail_writes = true;
        store
    }

    #[test]
    fn test_open_seeds_empty_storage() {
        let store = seeded_store();

        assert_eq!(store.origin(), LoadOrigin::Seeded);
        assert_eq!(store.categories().len(), 4);
        assert_eq!(store.posts().len(), 1);
        // Seed is written right away
        assert_eq!(persisted(&store), *store.document());
    }

    #[test]
    fn test_open_restores_persisted_document() {
        let store = store_with_categories(&["a", "b"]);

        assert_eq!(store.origin(), LoadOrigin::Restored);
        assert_eq!(store.categories().len(), 2);
        assert!(store.posts().is_empty());
    }

    #[test]
    fn test_open_recovers_from_corrupt_document() {
        let storage = MemoryStorage::with_entry(KEY, "{ definitely not json");
        let store = ContentStore::open(storage, KEY).unwrap();

        assert_eq!(store.origin(), LoadOrigin::RecoveredFromCorrupt);
        assert_eq!(store.categories().len(), 4);
        assert_eq!(
            store
                .storage()
                .get("khoborkuri_data.corrupt")
                .unwrap()
                .as_deref(),
            Some(b"{ definitely not json".as_slice())
        );
        assert_eq!(persisted(&store), *store.document());
    }

    #[test]
    fn test_open_recovers_from_binary_document() {
        let raw = [0xff, 0xfe, 0x00, 0x7b];
        let store = ContentStore::open(MemoryStorage::with_entry(KEY, raw.to_vec()), KEY).unwrap();

        assert_eq!(store.origin(), LoadOrigin::RecoveredFromCorrupt);
        assert_eq!(
            store.storage().get("khoborkuri_data.corrupt").unwrap(),
            Some(raw.to_vec())
        );
    }

    #[test]
    fn test_create_post_example() {
        let mut store = store_with_categories(&["1"]);

        let draft = PostDraft::new("T", "C", "1").with_hashtags(vec!["X".to_string()]);
        store.create_post(draft).unwrap();

        assert_eq!(store.posts().len(), 1);
        let post = &store.posts()[0];
        assert!(!post.id.is_empty());
        assert_eq!(post.category_id, "1");
        assert_eq!(post.hashtags, vec!["X"]);
        assert!(post.published);
    }

    #[test]
    fn test_create_post_prepends() {
        let mut store = seeded_store();

        let first = store.create_post(PostDraft::new("First", "C", "1")).unwrap();
        let second = store.create_post(PostDraft::new("Second", "C", "2")).unwrap();

        assert_eq!(store.posts()[0].id, second.id);
        assert_eq!(store.posts()[1].id, first.id);
        assert_eq!(store.posts()[2].id, "p1");
        assert_eq!(persisted(&store).posts.len(), 3);
    }

    #[test]
    fn test_create_post_ids_are_unique() {
        let mut store = seeded_store();
        let mut ids: Vec<String> = (0..50)
            .map(|i| {
                store
                    .create_post(PostDraft::new(format!("Post {}", i), "C", "1"))
                    .unwrap()
                    .id
            })
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_create_post_requires_title_and_content() {
        let mut store = seeded_store();

        assert!(matches!(
            store.create_post(PostDraft::new("  ", "C", "1")),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.create_post(PostDraft::new("T", "", "1")),
            Err(StoreError::Validation(_))
        ));
        assert_eq!(store.posts().len(), 1);
    }

    #[test]
    fn test_create_post_rejects_unknown_category() {
        let mut store = seeded_store();

        let result = store.create_post(PostDraft::new("T", "C", "nope"));
        assert!(matches!(result, Err(StoreError::UnknownCategory(id)) if id == "nope"));
        assert_eq!(store.posts().len(), 1);
    }

    #[test]
    fn test_update_post_merges_fields() {
        let mut store = seeded_store();
        let post = store.create_post(PostDraft::new("T", "C", "1")).unwrap();

        let changed = store
            .update_post(
                &post.id,
                PostPatch {
                    title: Some("Updated".to_string()),
                    hashtags: Some(vec!["Flood".to_string()]),
                    category_id: Some("3".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(changed);

        let updated = store.post(&post.id).unwrap();
        assert_eq!(updated.title, "Updated");
        assert_eq!(updated.content, "C");
        assert_eq!(updated.hashtags, vec!["Flood"]);
        assert_eq!(updated.category_id, "3");
        assert_eq!(updated.id, post.id);
        assert_eq!(updated.created_at, post.created_at);
        assert_eq!(persisted(&store).posts[0].title, "Updated");
    }

    #[test]
    fn test_update_post_never_changes_identity() {
        let mut store = seeded_store();
        let a = store.create_post(PostDraft::new("A", "C", "1")).unwrap();
        let b = store.create_post(PostDraft::new("B", "C", "2")).unwrap();

        let patches = [
            PostPatch {
                published: Some(false),
                ..Default::default()
            },
            PostPatch {
                content: Some("new body".to_string()),
                video_url: Some(Some("v".to_string())),
                ..Default::default()
            },
            PostPatch::default(),
        ];
        for patch in patches {
            store.update_post(&a.id, patch.clone()).unwrap();
            store.update_post(&b.id, patch).unwrap();
        }
        store.delete_post("p1").unwrap();

        for original in [&a, &b] {
            let current = store.post(&original.id).unwrap();
            assert_eq!(current.id, original.id);
            assert_eq!(current.created_at, original.created_at);
        }
    }

    #[test]
    fn test_update_missing_post_is_noop() {
        let mut store = seeded_store();
        let before = store.document().clone();

        let changed = store
            .update_post(
                "missing",
                PostPatch {
                    title: Some("x".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(!changed);
        assert_eq!(*store.document(), before);
    }

    #[test]
    fn test_update_missing_post_ignores_category_change() {
        let mut store = seeded_store();
        let before = store.document().clone();

        let changed = store
            .update_post(
                "missing",
                PostPatch {
                    category_id: Some("ghost".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(!changed);
        assert_eq!(*store.document(), before);
    }

    #[test]
    fn test_update_post_rejects_unknown_category() {
        let mut store = seeded_store();
        let result = store.update_post(
            "p1",
            PostPatch {
                category_id: Some("ghost".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(StoreError::UnknownCategory(_))));
        assert_eq!(store.post("p1").unwrap().category_id, "1");
    }

    #[test]
    fn test_delete_post() {
        let mut store = seeded_store();

        assert!(store.delete_post("p1").unwrap());
        assert!(store.post("p1").is_none());
        assert!(persisted(&store).posts.is_empty());

        assert!(!store.delete_post("p1").unwrap());
    }

    #[test]
    fn test_create_category_appends_with_slug() {
        let mut store = seeded_store();

        let cat = store.create_category("Sports  Desk").unwrap();
        assert_eq!(cat.slug, "sports-desk");
        assert_eq!(store.categories().last().unwrap().id, cat.id);
        assert_eq!(store.categories().len(), 5);
        assert_eq!(persisted(&store).categories.len(), 5);
    }

    #[test]
    fn test_create_category_requires_name() {
        let mut store = seeded_store();
        assert!(matches!(
            store.create_category("   "),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_rename_category() {
        let mut store = seeded_store();

        assert!(store.rename_category("3", "Storm Watch").unwrap());
        let cat = store.category("3").unwrap();
        assert_eq!(cat.name, "Storm Watch");
        assert_eq!(cat.slug, "storm-watch");

        assert!(!store.rename_category("missing", "X").unwrap());
    }

    #[test]
    fn test_delete_category_reassigns_posts() {
        let mut store = store_with_categories(&["1", "2"]);
        let post = store.create_post(PostDraft::new("T", "C", "2")).unwrap();

        assert!(store.delete_category("2").unwrap());

        let ids: Vec<_> = store.categories().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
        assert_eq!(store.post(&post.id).unwrap().category_id, "1");

        let saved = persisted(&store);
        assert_eq!(saved.categories.len(), 1);
        assert_eq!(saved.posts[0].category_id, "1");
    }

    #[test]
    fn test_delete_first_category_uses_next_as_fallback() {
        let mut store = store_with_categories(&["1", "2", "3"]);
        let post = store.create_post(PostDraft::new("T", "C", "1")).unwrap();

        store.delete_category("1").unwrap();

        assert_eq!(store.fallback_category().id, "2");
        assert_eq!(store.post(&post.id).unwrap().category_id, "2");
    }

    #[test]
    fn test_no_dangling_references_after_deletes() {
        let mut store = seeded_store();
        for cat in ["2", "3", "4"] {
            store.create_post(PostDraft::new("T", "C", cat)).unwrap();
        }

        for cat in ["3", "1", "4"] {
            store.delete_category(cat).unwrap();
            for post in store.posts() {
                assert!(store.category(&post.category_id).is_some());
            }
        }
        assert_eq!(store.categories().len(), 1);
        assert!(store.posts().iter().all(|p| p.category_id == "2"));
    }

    #[test]
    fn test_delete_last_category_is_rejected() {
        let mut store = store_with_categories(&["1"]);
        store.create_post(PostDraft::new("T", "C", "1")).unwrap();
        let before = store.document().clone();

        let result = store.delete_category("1");

        assert!(matches!(result, Err(StoreError::InvalidOperation(_))));
        assert_eq!(*store.document(), before);
        assert_eq!(persisted(&store), before);
    }

    #[test]
    fn test_delete_missing_category_is_noop() {
        let mut store = store_with_categories(&["1"]);
        assert!(!store.delete_category("ghost").unwrap());
        assert_eq!(store.categories().len(), 1);
    }

    #[test]
    fn test_tags_with_counts() {
        let mut store = store_with_categories(&["1"]);
        store
            .create_post(
                PostDraft::new("A", "C", "1")
                    .with_hashtags(vec!["Dhaka".into(), "Flood".into(), "Dhaka".into()]),
            )
            .unwrap();
        store
            .create_post(PostDraft::new("B", "C", "1").with_hashtags(vec!["Dhaka".into()]))
            .unwrap();
        store
            .create_post(
                PostDraft::new("Hidden", "C", "1")
                    .with_hashtags(vec!["Secret".into()])
                    .with_published(false),
            )
            .unwrap();

        let tags = store.tags_with_counts();
        assert_eq!(
            tags,
            vec![("Dhaka".to_string(), 2), ("Flood".to_string(), 1)]
        );
    }

    #[test]
    fn test_category_name() {
        let store = seeded_store();
        let post = store.post("p1").unwrap();
        assert_eq!(store.category_name(post), Some("General News"));
    }

    #[test]
    fn test_data_persists_across_reopens() {
        let temp_dir = TempDir::new().unwrap();

        let post_id;
        {
            let mut store = ContentStore::open(FileStorage::new(temp_dir.path()), KEY).unwrap();
            let cat = store.create_category("Sports").unwrap();
            post_id = store
                .create_post(PostDraft::new("Match report", "Line 1\nLine 2", &cat.id))
                .unwrap()
                .id;
            store.delete_post("p1").unwrap();
        }

        let store = ContentStore::open(FileStorage::new(temp_dir.path()), KEY).unwrap();
        assert_eq!(store.origin(), LoadOrigin::Restored);
        assert_eq!(store.categories().len(), 5);
        assert_eq!(store.posts().len(), 1);
        assert_eq!(store.posts()[0].id, post_id);
        assert_eq!(store.category_name(&store.posts()[0]), Some("Sports"));
    }

    #[test]
    fn test_corrupt_file_is_backed_up() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("khoborkuri_data.json"), "garbage").unwrap();

        let store = ContentStore::open(FileStorage::new(temp_dir.path()), KEY).unwrap();

        assert_eq!(store.origin(), LoadOrigin::RecoveredFromCorrupt);
        let backup = temp_dir.path().join("khoborkuri_data.corrupt.json");
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "garbage");
    }

    #[test]
    fn test_non_utf8_file_is_backed_up() {
        let temp_dir = TempDir::new().unwrap();
        let raw = [0xff, 0xfe, 0x00, 0x7b];
        std::fs::write(temp_dir.path().join("khoborkuri_data.json"), raw).unwrap();

        let store = ContentStore::open(FileStorage::new(temp_dir.path()), KEY).unwrap();

        assert_eq!(store.origin(), LoadOrigin::RecoveredFromCorrupt);
        assert_eq!(store.categories().len(), 4);
        let backup = temp_dir.path().join("khoborkuri_data.corrupt.json");
        assert_eq!(std::fs::read(backup).unwrap(), raw);

        // The seed replaced the unreadable file, so the next open restores it
        let reopened = ContentStore::open(FileStorage::new(temp_dir.path()), KEY).unwrap();
        assert_eq!(reopened.origin(), LoadOrigin::Restored);
    }

    #[test]
    fn test_failed_writes_leave_state_untouched() {
        let mut store = failing_store();
        let before = store.document().clone();

        let err = store.create_post(PostDraft::new("T", "C", "1")).unwrap_err();
        assert!(matches!(err, StoreError::Storage(StorageError::DiskFull { .. })));

        assert!(store
            .update_post(
                "p1",
                PostPatch {
                    title: Some("Changed".to_string()),
                    ..Default::default()
                },
            )
            .is_err());
        assert!(store.delete_post("p1").is_err());
        assert!(store.create_category("Sports").is_err());
        assert!(store.rename_category("2", "Renamed").is_err());
        assert!(store.delete_category("1").is_err());

        assert_eq!(*store.document(), before);
        assert_eq!(store.post("p1").unwrap().category_id, "1");
    }

    #[test]
    fn test_writes_succeed_again_after_failure() {
        let mut store = failing_store();
        assert!(store.delete_post("p1").is_err());

        store.storage.fail_writes = false;
        assert!(store.delete_post("p1").unwrap());
        assert!(persisted_flaky(&store).posts.is_empty());
    }

    fn persisted_flaky(store: &ContentStore<FlakyStorage>) -> ContentDocument {
        let raw = store.storage().get(KEY).unwrap().unwrap();
        ContentDocument::from_bytes(&raw).unwrap()
    }
}
