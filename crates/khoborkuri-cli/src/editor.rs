//! Interactive editing support
//!
//! Post bodies are written in $EDITOR. The temp file ends with a cut line
//! followed by help text; everything from the cut line down is dropped.

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::process::Command;

use khoborkuri_core::slugify;

/// Lines from this one down are discarded when the file is read back
const CUT_LINE: &str = "# ------------------------ >8 ------------------------";

const HELP: &str = "\
# Write the post body above the line. Each line becomes a paragraph.
# Everything below the line is ignored. Leave the body empty to abort.";

/// Open a post body in the user's editor and return the edited text
///
/// The returned body has blank lines around it removed and trailing
/// whitespace trimmed on each line.
pub fn edit_post_body(title: &str, initial_body: &str) -> Result<String> {
    let editor = find_editor()?;

    let temp_path = env::temp_dir().join(format!(
        "khoborkuri_{}_{}.txt",
        file_stem(title),
        std::process::id()
    ));

    fs::write(&temp_path, compose(title, initial_body))
        .with_context(|| format!("Failed to create temp file: {:?}", temp_path))?;

    let status = Command::new(&editor)
        .arg(&temp_path)
        .status()
        .with_context(|| format!("Failed to run editor: {}", editor));

    let edited = match status {
        Ok(status) if status.success() => fs::read_to_string(&temp_path)
            .with_context(|| format!("Failed to read edited file: {:?}", temp_path)),
        Ok(_) => Err(anyhow::anyhow!(
            "Editor '{}' exited with non-zero status; the post was not changed.",
            editor
        )),
        Err(e) => Err(e),
    };
    let _ = fs::remove_file(&temp_path);

    Ok(extract_body(&edited?))
}

/// Initial temp file contents: the body, then the cut line and help
fn compose(title: &str, body: &str) -> String {
    let mut text = String::new();
    if !body.is_empty() {
        text.push_str(body);
        text.push('\n');
    }
    text.push('\n');
    text.push_str(CUT_LINE);
    text.push('\n');
    text.push_str(&format!("# Post: {}\n", title));
    text.push_str(HELP);
    text.push('\n');
    text
}

/// Body text above the cut line, normalized
fn extract_body(edited: &str) -> String {
    edited
        .lines()
        .take_while(|line| line.trim_end() != CUT_LINE)
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_matches('\n')
        .to_string()
}

/// Short file-name-safe form of a title
fn file_stem(title: &str) -> String {
    let slug: String = slugify(title)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(24)
        .collect();
    if slug.is_empty() {
        "post".to_string()
    } else {
        slug
    }
}

/// $EDITOR, then $VISUAL, then the first common editor on PATH
fn find_editor() -> Result<String> {
    let from_env = ["EDITOR", "VISUAL"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|editor| !editor.trim().is_empty());
    if let Some(editor) = from_env {
        return Ok(editor);
    }

    if let Some(editor) = ["nano", "vim", "vi"].into_iter().find(|e| command_exists(e)) {
        return Ok(editor.to_string());
    }

    bail!(
        "No editor found. Set $EDITOR or pass the body with --content.\n\
         Example: export EDITOR=nano"
    )
}

fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Ask a yes/no question; anything but "y"/"yes" is a no
///
/// Without a terminal on stdin the answer is always no.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
