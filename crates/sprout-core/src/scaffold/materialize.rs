//! Template tree copying and placeholder substitution

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Placeholder replaced with the app name
pub const APP_NAME_TOKEN: &str = "__APP_NAME__";

/// Placeholder replaced with the app title
pub const APP_TITLE_TOKEN: &str = "__APP_TITLE__";

/// Files (relative to the app directory) that receive substitutions
pub const SUBSTITUTED_FILES: &[&str] = &["src/index.html", "README.md"];

/// Template name of the ignore file; package registries drop dotfiles,
/// so the template ships it without the leading dot
pub const GITIGNORE_TEMPLATE: &str = "gitignore";

/// Ordered (pattern, replacement) pairs for an app
pub fn substitutions(app_name: &str, app_title: &str) -> Vec<(&'static str, String)> {
    vec![
        (APP_NAME_TOKEN, app_name.to_string()),
        (APP_TITLE_TOKEN, app_title.to_string()),
    ]
}

/// Apply each substitution in order to the whole content
pub fn apply_substitutions(content: &str, substitutions: &[(&str, String)]) -> String {
    substitutions
        .iter()
        .fold(content.to_string(), |acc, (pattern, replacement)| {
            acc.replace(pattern, replacement)
        })
}

/// Copy the template tree into the app directory, rename the ignore file
/// and substitute placeholders. Returns the copied paths relative to
/// `app_dir`, after renaming.
pub fn materialize(
    template_dir: &Path,
    app_dir: &Path,
    substitutions: &[(&str, String)],
) -> Result<Vec<PathBuf>> {
    let mut copied = copy_tree(template_dir, app_dir)?;

    let gitignore = app_dir.join(GITIGNORE_TEMPLATE);
    if gitignore.exists() {
        fs::rename(&gitignore, app_dir.join(".gitignore"))
            .with_context(|| format!("Failed to rename {}", gitignore.display()))?;
        for path in copied.iter_mut() {
            if path.as_path() == Path::new(GITIGNORE_TEMPLATE) {
                *path = PathBuf::from(".gitignore");
            }
        }
    }

    for file in SUBSTITUTED_FILES {
        substitute_file(&app_dir.join(file), substitutions)?;
    }

    Ok(copied)
}

/// Recursively copy `src` into `dst`, following symlinks
pub fn copy_tree(src: &Path, dst: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();

    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to read template tree {}", src.display()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .context("Template entry outside the template tree")?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to write file: {}", target.display()))?;
            copied.push(relative.to_path_buf());
        }
    }

    Ok(copied)
}

fn substitute_file(path: &Path, substitutions: &[(&str, String)]) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    fs::write(path, apply_substitutions(&content, substitutions))
        .with_context(|| format!("Failed to write {}", path.display()))
}
