//! Project layout discovery.
//!
//! Locates the directory tree that holds a project's compilable Java sources
//! and enumerates the `.java` files underneath it. Uses the conventional
//! Maven/Gradle layout (`src/main/java`) when present and degrades gracefully
//! to `src` or the project root itself.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// Errors that can occur while locating a project.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("project root does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("project root is not readable: {path}")]
    RootNotReadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for project discovery operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

/// A discovered source file: path plus its full text, read once per run.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

/// Validate the project root and return it as an absolute, normalized path.
///
/// This is the only fatal failure point of an analysis run: a missing or
/// unreadable root aborts, everything downstream degrades per file.
pub fn canonical_root(path: &Path) -> ProjectResult<PathBuf> {
    let root = path
        .canonicalize()
        .map_err(|_| ProjectError::RootNotFound(path.to_path_buf()))?;

    // Canonicalize proves existence, not readability.
    fs::read_dir(&root).map_err(|e| ProjectError::RootNotReadable {
        path: root.clone(),
        source: e,
    })?;

    Ok(root)
}

/// Determine the source root for a project directory.
///
/// Prefers the conventional `src/main/java` layout, then a plain `src`
/// directory, then the project root itself. Never fails: a root with no
/// sources under it simply yields an empty analysis.
pub fn find_source_root(project_root: &Path) -> PathBuf {
    let maven = project_root.join("src").join("main").join("java");
    if maven.is_dir() {
        return maven;
    }
    let src = project_root.join("src");
    if src.is_dir() {
        return src;
    }
    project_root.to_path_buf()
}

/// Determine the source root starting from a single file.
///
/// Walks upward through ancestor directories looking for a `src/main/java`
/// tree, falling back to the file's parent directory if none is found.
pub fn source_root_for_file(file: &Path) -> PathBuf {
    for ancestor in file.ancestors().skip(1) {
        let maven = ancestor.join("src").join("main").join("java");
        if maven.is_dir() {
            return maven;
        }
    }
    file.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Enumerate all `.java` regular files under the source root.
///
/// Build output and VCS directories are skipped. Unreadable directory
/// entries are ignored; the walk itself never fails.
pub fn collect_java_files(source_root: &Path) -> Vec<PathBuf> {
    WalkDir::new(source_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().map(|ext| ext == "java").unwrap_or(false))
        .map(|e| e.path().to_path_buf())
        .collect()
}

/// Check if a directory should be ignored during traversal.
fn is_ignored_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    matches!(
        name.as_ref(),
        ".git" | "target" | "build" | "out" | ".gradle" | ".idea" | "node_modules"
    )
}
