//! The persisted content document
//!
//! `ContentDocument` is everything that survives a restart: the ordered
//! posts and the ordered categories. View state never lands here.
//!
//! The JSON shape is `{ "posts": [...], "categories": [...] }`. Unknown
//! top-level fields are ignored on load so documents written with extra
//! UI state still parse.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{now_millis, Category, Post};

/// Errors that can occur while decoding or encoding a document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document is not UTF-8 text: {0}")]
    NotText(#[from] std::str::Utf8Error),

    #[error("Document has no categories")]
    NoCategories,
}

/// Seed category ids and names
const SEED_CATEGORIES: [(&str, &str, &str); 4] = [
    ("1", "General News", "news"),
    ("2", "Today's News", "today"),
    ("3", "Cyclone News", "cyclone"),
    ("4", "Election News", "election"),
];

const WELCOME_POST_ID: &str = "p1";
const WELCOME_TITLE: &str = "Welcome to Khoborkuri: Your Trusted News Partner";
const WELCOME_CONTENT: &str = "We are thrilled to launch our digital news platform catering to the most pressing news of today. Our team is dedicated to providing real-time updates on politics, environment, and social issues.";
const WELCOME_IMAGE: &str = "https://picsum.photos/seed/news1/800/450";
const WELCOME_TAGS: [&str; 3] = ["BreakingNews", "Khoborkuri", "Launch"];

/// Posts and categories as persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentDocument {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl ContentDocument {
    /// The first-run dataset: four categories and one welcome post
    pub fn seed() -> Self {
        let categories = SEED_CATEGORIES
            .iter()
            .map(|(id, name, slug)| Category::with_id(*id, *name, *slug))
            .collect();

        let welcome = Post {
            id: WELCOME_POST_ID.to_string(),
            title: WELCOME_TITLE.to_string(),
            content: WELCOME_CONTENT.to_string(),
            image_url: Some(WELCOME_IMAGE.to_string()),
            video_url: None,
            hashtags: WELCOME_TAGS.iter().map(|t| t.to_string()).collect(),
            category_id: SEED_CATEGORIES[0].0.to_string(),
            created_at: now_millis(),
            published: true,
        };

        Self {
            posts: vec![welcome],
            categories,
        }
    }

    /// Decode a document
    ///
    /// Fails on malformed JSON or when no category is left. Posts pointing at
    /// a missing category are moved to the first category.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let mut doc: Self = serde_json::from_str(json)?;
        if doc.categories.is_empty() {
            return Err(DocumentError::NoCategories);
        }
        let repaired = doc.repair_dangling();
        if repaired > 0 {
            tracing::warn!(repaired, "Reassigned posts with missing categories");
        }
        Ok(doc)
    }

    /// Decode a document from stored bytes
    pub fn from_bytes(raw: &[u8]) -> Result<Self, DocumentError> {
        Self::from_json(std::str::from_utf8(raw)?)
    }

    /// Encode the document as JSON
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Move posts whose category no longer exists to the first category
    ///
    /// Returns the number of posts moved.
    pub fn repair_dangling(&mut self) -> usize {
        let Some(fallback) = self.categories.first().map(|c| c.id.clone()) else {
            return 0;
        };
        let categories = &self.categories;
        let mut moved = 0;
        for post in &mut self.posts {
            if !categories.iter().any(|c| c.id == post.category_id) {
                post.category_id = fallback.clone();
                moved += 1;
            }
        }
        moved
    }
}
