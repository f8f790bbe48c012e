//! View routing
//!
//! `View` names the page being shown together with the parameters it needs.
//! `Router` holds the current view and derives its `Page` from the store on
//! demand. Nothing is cached: every call to `page` recomputes the slice.
//!
//! A view whose parameter no longer resolves (a deleted post, an unknown
//! category) produces an empty page, never an error.

use serde::{Deserialize, Serialize};

use crate::models::{Category, Post};
use crate::storage::Storage;
use crate::store::ContentStore;

/// The page being shown and its parameters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum View {
    /// Front page: every published post, newest first
    #[default]
    Home,
    /// Published posts in one category
    Category { id: String },
    /// Published posts carrying one hashtag
    Tag { name: String },
    /// A single post with its category
    PostDetail { id: String },
    /// Everything, for management
    Admin,
}

impl View {
    /// Short name of the view, e.g. `post-detail`
    pub fn name(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Category { .. } => "category",
            View::Tag { .. } => "tag",
            View::PostDetail { .. } => "post-detail",
            View::Admin => "admin",
        }
    }
}

/// Content derived for a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page<'a> {
    Home {
        /// Most recently created published post
        hero: Option<&'a Post>,
        /// Remaining published posts, newest first
        rest: Vec<&'a Post>,
    },
    Category {
        /// The selected category, if it still exists
        category: Option<&'a Category>,
        posts: Vec<&'a Post>,
    },
    Tag {
        tag: &'a str,
        posts: Vec<&'a Post>,
    },
    PostDetail {
        /// `None` when the post is gone
        post: Option<&'a Post>,
        category: Option<&'a Category>,
    },
    Admin {
        posts: &'a [Post],
        categories: &'a [Category],
    },
}

impl Page<'_> {
    /// Whether the page has nothing to show
    pub fn is_empty(&self) -> bool {
        match self {
            Page::Home { hero, .. } => hero.is_none(),
            Page::Category { posts, .. } | Page::Tag { posts, .. } => posts.is_empty(),
            Page::PostDetail { post, .. } => post.is_none(),
            Page::Admin { posts, categories } => posts.is_empty() && categories.is_empty(),
        }
    }
}

/// Holds the current view
///
/// Starts at `View::Home` on every load; the view is never persisted.
#[derive(Debug, Clone, Default)]
pub struct Router {
    current: View,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// The view currently selected
    pub fn current(&self) -> &View {
        &self.current
    }

    /// Switch to `view`, replacing any earlier selection
    pub fn navigate(&mut self, view: View) {
        tracing::debug!(view = view.name(), "Navigate");
        self.current = view;
    }

    /// Derive the content of the current view
    pub fn page<'a, S: Storage>(&'a self, store: &'a ContentStore<S>) -> Page<'a> {
        match &self.current {
            View::Home => home(store.posts()),
            View::Category { id } => Page::Category {
                category: store.category(id),
                posts: published(store.posts())
                    .filter(|p| &p.category_id == id)
                    .collect(),
            },
            View::Tag { name } => Page::Tag {
                tag: name.as_str(),
                posts: published(store.posts())
                    .filter(|p| p.has_hashtag(name))
                    .collect(),
            },
            View::PostDetail { id } => {
                let post = store.post(id);
                Page::PostDetail {
                    post,
                    category: post.and_then(|p| store.category(&p.category_id)),
                }
            }
            View::Admin => Page::Admin {
                posts: store.posts(),
                categories: store.categories(),
            },
        }
    }
}

fn published(posts: &[Post]) -> impl Iterator<Item = &Post> {
    posts.iter().filter(|p| p.published)
}

fn home(posts: &[Post]) -> Page<'_> {
    let mut latest: Vec<&Post> = published(posts).collect();
    // Stable sort keeps insertion order among equal timestamps
    latest.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut rest = latest.into_iter();
    let hero = rest.next();
    Page::Home {
        hero,
        rest: rest.collect(),
    }
}
