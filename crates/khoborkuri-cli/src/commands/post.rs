//! Post command handlers

use anyhow::{bail, Context, Result};

use khoborkuri_core::{parse_hashtags, PostDraft, PostPatch};

use super::{resolve_category_id, resolve_post_id, Store};
use crate::editor::{confirm, edit_post_body};
use crate::output::Output;

/// Fields for a new post as given on the command line
#[derive(Debug, Default)]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub video: Option<String>,
    pub draft: bool,
}

/// Field changes for an existing post
///
/// An empty string for `image` or `video` clears the field.
#[derive(Debug, Default)]
pub struct PostEdits {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
}

/// Create a new post
pub fn create(store: &mut Store, new: NewPost, output: &Output) -> Result<()> {
    let content = match new.content {
        Some(content) => content,
        None if output.should_prompt() => {
            let body = edit_post_body(&new.title, "")?;
            if body.is_empty() {
                bail!("Aborting: the post body is empty.");
            }
            body
        }
        None => bail!("Post content is required. Pass --content or run interactively."),
    };

    let category_id = match new.category {
        Some(ref c) => resolve_category_id(store, c)?,
        None => store.fallback_category().id.clone(),
    };

    let mut draft = PostDraft::new(new.title, content, category_id)
        .with_hashtags(parse_hashtags(&new.tags.join(",")))
        .with_published(!new.draft);
    draft.image_url = non_empty(new.image);
    draft.video_url = non_empty(new.video);

    let post = store.create_post(draft).context("Failed to create post")?;

    output.success(&format!("Created post: {}", post.id));
    output.print_post(&post, store.categories());

    Ok(())
}

/// Edit a post
///
/// With no field flags in human mode, prompts for each field instead.
pub fn edit(store: &mut Store, id: String, edits: PostEdits, output: &Output) -> Result<()> {
    let post_id = resolve_post_id(store, &id)?;

    let mut patch = build_patch(store, edits)?;
    if patch.is_empty() {
        if !output.should_prompt() {
            output.message("Nothing to change.");
            return Ok(());
        }
        patch = prompt_patch(store, &post_id)?;
    }

    store
        .update_post(&post_id, patch)
        .context("Failed to update post")?;

    output.success("Post updated");
    if let Some(post) = store.post(&post_id) {
        output.print_post(post, store.categories());
    }

    Ok(())
}

/// Mark a post as published or as a draft
pub fn set_published(
    store: &mut Store,
    id: String,
    published: bool,
    output: &Output,
) -> Result<()> {
    let post_id = resolve_post_id(store, &id)?;

    let patch = PostPatch {
        published: Some(published),
        ..Default::default()
    };
    store
        .update_post(&post_id, patch)
        .context("Failed to update post")?;

    let state = if published { "Published" } else { "Unpublished" };
    output.success(&format!("{} post: {}", state, post_id));
    Ok(())
}

/// Delete a post
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let post_id = resolve_post_id(store, &id)?;

    if output.should_prompt() {
        if let Some(post) = store.post(&post_id) {
            println!("Delete post: {} - {}", post.id, post.title);
        }
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store
        .delete_post(&post_id)
        .context("Failed to delete post")?;

    output.success(&format!("Deleted post: {}", post_id));

    Ok(())
}

fn build_patch(store: &Store, edits: PostEdits) -> Result<PostPatch> {
    let category_id = match edits.category {
        Some(ref c) => Some(resolve_category_id(store, c)?),
        None => None,
    };

    Ok(PostPatch {
        title: edits.title,
        content: edits.content,
        image_url: edits.image.map(|url| non_empty(Some(url))),
        video_url: edits.video.map(|url| non_empty(Some(url))),
        hashtags: edits.tags.as_deref().map(parse_hashtags),
        category_id,
        published: None,
    })
}

/// Interactive editing, one prompt per field
fn prompt_patch(store: &Store, post_id: &str) -> Result<PostPatch> {
    let post = store
        .post(post_id)
        .ok_or_else(|| anyhow::anyhow!("Post not found: {}", post_id))?;

    println!("Editing post: {}", post.id);
    println!("Press Enter to keep current value, or type new value.\n");

    let mut patch = PostPatch {
        title: prompt_with_default("Title", &post.title)?,
        ..Default::default()
    };

    let current_tags = post.hashtags.join(", ");
    if let Some(tags) = prompt_with_default("Hashtags (comma-separated)", &current_tags)? {
        patch.hashtags = Some(parse_hashtags(&tags));
    }

    let current_image = post.image_url.as_deref().unwrap_or("");
    if let Some(url) = prompt_with_default("Image URL", current_image)? {
        patch.image_url = Some(non_empty(Some(url)));
    }

    if confirm("Edit content in editor?")? {
        let content = edit_post_body(&post.title, &post.content)?;
        if !content.is_empty() && content != post.content {
            patch.content = Some(content);
        }
    }

    Ok(patch)
}

/// Prompt with a default value, returns None if user keeps default
fn prompt_with_default(prompt: &str, default: &str) -> Result<Option<String>> {
    use std::io::{self, Write};

    if default.is_empty() {
        print!("{}: ", prompt);
    } else {
        print!("{} [{}]: ", prompt, default);
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.to_string()))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
