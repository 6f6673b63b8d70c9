//! Entry-point discovery over an extracted course tree.
//!
//! Depth-first, explicit-stack traversal with a depth cap. Within each
//! directory, files are checked before subdirectories and both are visited in
//! lexicographic filename order, so the first-match tie-break is deterministic
//! across platforms. Symlinks are never followed.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Bound on traversal depth, against adversarial archive structures.
const MAX_SCAN_DEPTH: usize = 32;

/// Find the first file named `entry_name` (case-insensitive) under `root`.
/// Returns the path relative to `root` with a leading `/`, or `None`.
pub fn find_entry_document(root: &Path, entry_name: &str) -> io::Result<Option<String>> {
    let target = entry_name.to_lowercase();
    let mut stack: Vec<(PathBuf, usize)> = vec![(root.to_path_buf(), 0)];

    while let Some((dir, depth)) = stack.pop() {
        let mut files: Vec<OsString> = Vec::new();
        let mut subdirs: Vec<OsString> = Vec::new();

        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            if file_type.is_symlink() {
                continue;
            }
            if file_type.is_file() {
                files.push(entry.file_name());
            } else if file_type.is_dir() {
                subdirs.push(entry.file_name());
            }
        }

        files.sort();
        subdirs.sort();

        for name in &files {
            if name.to_string_lossy().to_lowercase() == target {
                let full = dir.join(name);
                if let Ok(relative) = full.strip_prefix(root) {
                    return Ok(Some(format!("/{}", relative.display())));
                }
            }
        }

        if depth < MAX_SCAN_DEPTH {
            // Reverse push so the stack pops subdirectories in sorted order.
            for name in subdirs.into_iter().rev() {
                stack.push((dir.join(name), depth + 1));
            }
        }
    }

    Ok(None)
}
