//! Data models for Khoborkuri
//!
//! Defines the core data structures: Post and Category, plus the draft and
//! patch types used to create and edit posts.
//!
//! Field names serialize in camelCase so the persisted document keeps the
//! `{ posts, categories }` layout with `categoryId`, `createdAt`, etc.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh identifier for a post or category
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time as epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A published (or draft) news article
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique identifier
    pub id: String,
    /// Headline
    pub title: String,
    /// Body text, paragraphs separated by newlines
    pub content: String,
    /// Optional cover image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Optional embedded video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Hashtags in the order they were entered (duplicates allowed)
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Owning category
    pub category_id: String,
    /// Creation time in epoch milliseconds, never changed after creation
    pub created_at: i64,
    /// Whether the post shows up on public pages
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

impl Post {
    /// Build a post from a draft, assigning a fresh id and timestamp
    pub fn from_draft(draft: PostDraft) -> Self {
        Self {
            id: generate_id(),
            title: draft.title,
            content: draft.content,
            image_url: draft.image_url,
            video_url: draft.video_url,
            hashtags: draft.hashtags,
            category_id: draft.category_id,
            created_at: now_millis(),
            published: draft.published,
        }
    }

    /// Content split into paragraphs, skipping blank lines
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content
            .split('\n')
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
    }

    /// Check for an exact (case-sensitive) hashtag match
    pub fn has_hashtag(&self, tag: &str) -> bool {
        self.hashtags.iter().any(|t| t == tag)
    }

    /// Merge a patch into this post
    ///
    /// `id` and `created_at` are not part of a patch and stay untouched.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(video_url) = patch.video_url {
            self.video_url = video_url;
        }
        if let Some(hashtags) = patch.hashtags {
            self.hashtags = hashtags;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(published) = patch.published {
            self.published = published;
        }
    }
}

/// Fields supplied by the admin surface when creating a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub hashtags: Vec<String>,
    pub category_id: String,
    pub published: bool,
}

impl PostDraft {
    /// Create a published draft with no media or hashtags
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image_url: None,
            video_url: None,
            hashtags: Vec::new(),
            category_id: category_id.into(),
            published: true,
        }
    }

    pub fn with_hashtags(mut self, hashtags: Vec<String>) -> Self {
        self.hashtags = hashtags;
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }
}

/// Partial update for a post
///
/// Each `Some` replaces the corresponding field. For the optional media
/// fields, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<Option<String>>,
    pub video_url: Option<Option<String>>,
    pub hashtags: Option<Vec<String>>,
    pub category_id: Option<String>,
    pub published: Option<bool>,
}

impl PostPatch {
    /// Check whether the patch would change nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A named grouping of posts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// URL-style name; not unique and not used for lookups
    pub slug: String,
}

impl Category {
    /// Create a category with a fresh id and a slug derived from the name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: generate_id(),
            slug: slugify(&name),
            name,
        }
    }

    /// Create a category with fixed id and slug (seed data)
    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
        }
    }

    /// Replace the display name, re-deriving the slug
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.slug = slugify(&self.name);
    }
}

/// Derive a slug: lowercase, whitespace runs collapsed to one hyphen
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Parse the comma-separated hashtag field of the admin form
///
/// Entries are trimmed, a leading `#` is dropped, and empty entries are
/// skipped. Order and duplicates are kept.
pub fn parse_hashtags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|t| t.trim())
        .map(|t| t.strip_prefix('#').unwrap_or(t).trim())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
