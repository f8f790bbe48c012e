//! Khoborkuri Core Library
//!
//! This crate provides the core functionality for Khoborkuri, a small
//! local-first news publishing tool: a feed, category and hashtag pages,
//! post detail, and an admin surface.
//!
//! # Architecture
//!
//! - **ContentStore**: owns posts and categories, persists the whole
//!   document after every change
//! - **Router**: holds the current view and derives the page to show
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut store = ContentStore::open(config.storage(), &config.storage_key)?;
//!
//! store.create_post(PostDraft::new("Headline", "Body", "1"))?;
//!
//! let mut router = Router::new();
//! router.navigate(View::Tag { name: "Election".into() });
//! let page = router.page(&store);
//! ```
//!
//! # Modules
//!
//! - `store`: Content store (main entry point)
//! - `router`: Views and derived pages
//! - `models`: Posts, categories, drafts and patches
//! - `document`: Persisted document and seed data
//! - `storage`: Key-value persistence backends
//! - `config`: Application configuration

pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod router;
pub mod storage;
pub mod store;

pub use config::Config;
pub use document::{ContentDocument, DocumentError};
pub use error::{StoreError, StoreResult};
pub use models::{parse_hashtags, slugify, Category, Post, PostDraft, PostPatch};
pub use router::{Page, Router, View};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{ContentStore, LoadOrigin};
