//! Static assets copied into the build output

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use walkdir::WalkDir;

/// Copy `assets_dir` into `output_dir`, overwriting and following symlinks
///
/// The HTML entry is skipped wherever it appears: at its own path, or as a
/// same-named file at the top of `assets_dir`. The bundler writes its own.
/// Returns the number of files copied; a missing `assets_dir` copies nothing.
pub async fn copy_assets(assets_dir: &Path, output_dir: &Path, html_entry: &Path) -> Result<usize> {
    if !assets_dir.is_dir() {
        return Ok(0);
    }

    let html_name = html_entry.file_name();
    let mut copied = 0;

    for entry in WalkDir::new(assets_dir).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to read {}", assets_dir.display()))?;
        let relative = entry
            .path()
            .strip_prefix(assets_dir)
            .context("Asset outside the assets directory")?;
        let target = output_dir.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .await
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
            continue;
        }

        let is_top_level_entry =
            relative.parent() == Some(Path::new("")) && relative.file_name() == html_name;
        if entry.path() == html_entry || is_top_level_entry {
            continue;
        }

        fs::copy(entry.path(), &target)
            .await
            .with_context(|| format!("Failed to write file: {}", target.display()))?;
        copied += 1;
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_copies_tree_without_html_entry() {
        let root = tempfile::tempdir().unwrap();
        let public = root.path().join("public");
        write(&public, "robots.txt", "User-agent: *");
        write(&public, "index.html", "<html>stale</html>");
        write(&public, "img/logo.svg", "<svg/>");
        write(&public, "docs/index.html", "<html>docs</html>");
        let build = root.path().join("build");

        let copied = copy_assets(&public, &build, &root.path().join("src/index.html"))
            .await
            .unwrap();

        assert_eq!(copied, 3);
        assert!(build.join("robots.txt").is_file());
        assert!(build.join("img/logo.svg").is_file());
        assert!(build.join("docs/index.html").is_file());
        assert!(!build.join("index.html").exists());
    }

    #[tokio::test]
    async fn test_overwrites_existing_output() {
        let root = tempfile::tempdir().unwrap();
        let public = root.path().join("public");
        let build = root.path().join("build");
        write(&public, "robots.txt", "new");
        write(&build, "robots.txt", "old");

        copy_assets(&public, &build, &public.join("index.html"))
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(build.join("robots.txt")).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_missing_assets_dir_copies_nothing() {
        let root = tempfile::tempdir().unwrap();
        let copied = copy_assets(
            &root.path().join("public"),
            &root.path().join("build"),
            &root.path().join("src/index.html"),
        )
        .await
        .unwrap();

        assert_eq!(copied, 0);
        assert!(!root.path().join("build").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_follows_symlinks() {
        let root = tempfile::tempdir().unwrap();
        let public = root.path().join("public");
        write(root.path(), "shared/brand.css", "body{}");
        std::fs::create_dir_all(&public).unwrap();
        std::os::unix::fs::symlink(root.path().join("shared"), public.join("shared")).unwrap();
        let build = root.path().join("build");

        copy_assets(&public, &build, &root.path().join("src/index.html"))
            .await
            .unwrap();

        let copied = build.join("shared/brand.css");
        assert!(copied.is_file());
        assert!(!std::fs::symlink_metadata(&copied).unwrap().file_type().is_symlink());
    }
}
