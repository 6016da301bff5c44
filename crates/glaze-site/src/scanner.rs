//! Markdown source discovery.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A markdown file found under the source directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path relative to the source directory.
    pub relative: PathBuf,
    /// File stem, used as the OG image key.
    pub slug: String,
}

/// Recursively collect `.md` and `.mdx` files, sorted by relative path.
///
/// Hidden files and directories are skipped. A missing source directory
/// yields no files.
#[must_use]
pub fn scan(source_dir: &Path) -> Vec<SourceFile> {
    let mut files = Vec::new();
    if source_dir.exists() {
        scan_directory(source_dir, source_dir, &mut files);
    }
    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    warn_duplicate_slugs(&files);
    files
}

fn scan_directory(root: &Path, dir: &Path, files: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::warn!(path = %dir.display(), "Failed to read directory");
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(root, &path, files);
            continue;
        }

        let is_markdown = path
            .extension()
            .is_some_and(|ext| ext == "md" || ext == "mdx");
        if !is_markdown {
            continue;
        }
        let Some(slug) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        files.push(SourceFile {
            path,
            relative,
            slug,
        });
    }
}

/// OG images live in a flat directory, so equal stems share one image.
fn warn_duplicate_slugs(files: &[SourceFile]) {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for file in files {
        if let Some(first) = seen.insert(&file.slug, &file.relative) {
            tracing::warn!(
                slug = %file.slug,
                first = %first.display(),
                second = %file.relative.display(),
                "Documents share a slug and will share one OG image"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_scan() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "blog/second.md");
        touch(dir.path(), "blog/first.mdx");
        touch(dir.path(), "about.md");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), ".drafts/hidden.md");
        touch(dir.path(), "blog/.secret.md");

        let files = scan(dir.path());
        let relative: Vec<_> = files.iter().map(|f| f.relative.clone()).collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("about.md"),
                PathBuf::from("blog/first.mdx"),
                PathBuf::from("blog/second.md"),
            ]
        );
        assert_eq!(files[1].slug, "first");
        assert_eq!(files[1].path, dir.path().join("blog/first.mdx"));
    }

    #[test]
    fn test_missing_dir() {
        assert!(scan(Path::new("/nonexistent/glaze/content")).is_empty());
    }
}
