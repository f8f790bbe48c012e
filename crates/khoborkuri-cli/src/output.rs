//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use chrono::{DateTime, Utc};
use serde::Serialize;

use khoborkuri_core::{Category, Page, Post};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// JSON shape of a derived page
#[derive(Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
enum PageJson<'a> {
    Home {
        hero: Option<&'a Post>,
        rest: &'a [&'a Post],
    },
    Category {
        category: Option<&'a Category>,
        posts: &'a [&'a Post],
    },
    Tag {
        tag: &'a str,
        posts: &'a [&'a Post],
    },
    PostDetail {
        post: Option<&'a Post>,
        category: Option<&'a Category>,
    },
    Admin {
        posts: &'a [Post],
        categories: &'a [Category],
    },
}

impl<'a> From<&'a Page<'a>> for PageJson<'a> {
    fn from(page: &'a Page<'a>) -> Self {
        match page {
            Page::Home { hero, rest } => PageJson::Home {
                hero: *hero,
                rest: rest.as_slice(),
            },
            Page::Category { category, posts } => PageJson::Category {
                category: *category,
                posts: posts.as_slice(),
            },
            Page::Tag { tag, posts } => PageJson::Tag {
                tag: *tag,
                posts: posts.as_slice(),
            },
            Page::PostDetail { post, category } => PageJson::PostDetail {
                post: *post,
                category: *category,
            },
            Page::Admin { posts, categories } => PageJson::Admin {
                posts: *posts,
                categories: *categories,
            },
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print the page derived for a view
    ///
    /// `categories` resolves category names for post listings.
    pub fn print_page(&self, page: &Page<'_>, categories: &[Category]) {
        match self.format {
            OutputFormat::Json => {
                print_json(&PageJson::from(page));
                return;
            }
            OutputFormat::Quiet => {
                for id in page_post_ids(page) {
                    println!("{}", id);
                }
                return;
            }
            OutputFormat::Human => {}
        }

        match page {
            Page::Home { hero, rest } => {
                let Some(hero) = hero else {
                    println!("No news yet.");
                    return;
                };
                println!("LATEST HEADLINE");
                println!("===============");
                self.print_post(hero, categories);
                if !rest.is_empty() {
                    println!();
                    println!("── More stories ──");
                    print_post_rows(rest, categories);
                }
            }
            Page::Category { category, posts } => {
                match category {
                    Some(c) => println!("Category: {} ({})", c.name, c.slug),
                    None => println!("Category not found."),
                }
                println!();
                if posts.is_empty() {
                    println!("No posts in this category.");
                } else {
                    print_post_rows(posts, categories);
                }
            }
            Page::Tag { tag, posts } => {
                println!("#{}", tag);
                println!();
                if posts.is_empty() {
                    println!("No posts tagged #{}.", tag);
                } else {
                    print_post_rows(posts, categories);
                }
            }
            Page::PostDetail { post, .. } => match post {
                Some(post) => self.print_post(post, categories),
                None => println!("Post not found."),
            },
            Page::Admin { posts, categories } => {
                println!("── Posts ({}) ──", posts.len());
                let rows: Vec<&Post> = posts.iter().collect();
                print_post_rows(&rows, categories);
                println!();
                self.print_categories(categories);
            }
        }
    }

    /// Print a single post in full
    pub fn print_post(&self, post: &Post, categories: &[Category]) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", post.id);
                println!("Title:     {}", post.title);
                println!("Category:  {}", category_name(post, categories));
                println!("Created:   {}", format_millis(post.created_at));
                println!(
                    "Status:    {}",
                    if post.published { "published" } else { "draft" }
                );
                if let Some(ref url) = post.image_url {
                    println!("Image:     {}", url);
                }
                if let Some(ref url) = post.video_url {
                    println!("Video:     {}", url);
                }
                if !post.hashtags.is_empty() {
                    let tags: Vec<String> =
                        post.hashtags.iter().map(|t| format!("#{}", t)).collect();
                    println!("Hashtags:  {}", tags.join(" "));
                }
                println!();
                for paragraph in post.paragraphs() {
                    println!("{}", paragraph);
                    println!();
                }
            }
            OutputFormat::Json => print_json(post),
            OutputFormat::Quiet => println!("{}", post.id),
        }
    }

    /// Print all categories
    pub fn print_categories(&self, categories: &[Category]) {
        match self.format {
            OutputFormat::Human => {
                println!("── Categories ({}) ──", categories.len());
                for (i, c) in categories.iter().enumerate() {
                    let marker = if i == 0 { " (fallback)" } else { "" };
                    println!("{} | {} | {}{}", short_id(&c.id), c.name, c.slug, marker);
                }
            }
            OutputFormat::Json => print_json(&categories),
            OutputFormat::Quiet => {
                for c in categories {
                    println!("{}", c.id);
                }
            }
        }
    }

    /// Print a list of hashtags with usage counts
    pub fn print_tags(&self, tags: &[(String, usize)]) {
        match self.format {
            OutputFormat::Human => {
                if tags.is_empty() {
                    println!("No hashtags found.");
                    return;
                }
                for (name, count) in tags {
                    println!("#{} ({})", name, count);
                }
                println!("\n{} hashtag(s)", tags.len());
            }
            OutputFormat::Json => {
                let json_tags: Vec<_> = tags
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                print_json(&json_tags);
            }
            OutputFormat::Quiet => {
                for (name, _) in tags {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode JSON output: {}", e),
    }
}

/// One line per post: id, title, category, date, draft marker
fn print_post_rows(posts: &[&Post], categories: &[Category]) {
    for post in posts {
        let draft = if post.published { "" } else { " [draft]" };
        println!(
            "{} | {}{} | {} | {}",
            short_id(&post.id),
            truncate(&post.title, 40),
            draft,
            truncate(category_name(post, categories), 20),
            format_date(post.created_at)
        );
    }
    println!("\n{} post(s)", posts.len());
}

/// Ids of the posts shown on a page, in display order
fn page_post_ids<'a>(page: &'a Page<'a>) -> Vec<&'a str> {
    match page {
        Page::Home { hero, rest } => hero
            .iter()
            .chain(rest.iter())
            .map(|p| p.id.as_str())
            .collect(),
        Page::Category { posts, .. } | Page::Tag { posts, .. } => {
            posts.iter().map(|p| p.id.as_str()).collect()
        }
        Page::PostDetail { post, .. } => post.iter().map(|p| p.id.as_str()).collect(),
        Page::Admin { posts, .. } => posts.iter().map(|p| p.id.as_str()).collect(),
    }
}

fn category_name<'a>(post: &Post, categories: &'a [Category]) -> &'a str {
    categories
        .iter()
        .find(|c| c.id == post.category_id)
        .map(|c| c.name.as_str())
        .unwrap_or("(unknown)")
}

fn to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

fn format_millis(millis: i64) -> String {
    to_datetime(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn format_date(millis: i64) -> String {
    to_datetime(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| millis.to_string())
}

/// First 8 characters of an id
fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
