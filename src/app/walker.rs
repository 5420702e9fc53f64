use crate::app::models::{EntryKind, PathEntry};
use crate::app::rules::IgnoreRules;
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::path::{Path, PathBuf};

/// Read-only snapshot builder for the template tree.
pub struct Walker<'a> {
    root: PathBuf,
    rules: &'a IgnoreRules,
}

impl<'a> Walker<'a> {
    pub fn new(root: &Path, rules: &'a IgnoreRules) -> Self {
        Self {
            root: root.to_path_buf(),
            rules,
        }
    }

    /// Enumerates files, directories and symlinks under the root into an
    /// owned snapshot, dropping anything an ignore rule matches. The
    /// result is sorted by path, so every directory precedes its
    /// descendants; the rename pass relies on that order.
    pub fn scan(&self) -> Vec<PathEntry> {
        let mut entries = Vec::new();

        // Plain recursive walk: no gitignore handling, no hidden-file
        // filtering, symlinks not followed. The ignore semantics here are
        // the rule set's alone.
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    if let Some(processed) = self.process_entry(entry.path(), entry.file_type()) {
                        entries.push(processed);
                    }
                }
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }

    fn process_entry(
        &self,
        path: &Path,
        file_type: Option<std::fs::FileType>,
    ) -> Option<PathEntry> {
        // Skip the root folder itself from the list
        if path == self.root {
            return None;
        }

        let kind = match file_type {
            Some(t) if t.is_symlink() => EntryKind::Symlink,
            Some(t) if t.is_dir() => EntryKind::Dir,
            Some(t) if t.is_file() => EntryKind::File,
            // Sockets, FIFOs and the like are not part of a template.
            _ => return None,
        };

        // Rules match against the root-relative path. An ignored directory
        // does not prune its subtree: children are judged on their own
        // relative paths, which usually carry the parent's name anyway.
        let relative = diff_paths(path, &self.root)?;
        if self.rules.is_ignored(&relative) {
            return None;
        }

        Some(PathEntry {
            path: path.to_path_buf(),
            disk_path: path.to_path_buf(),
            kind,
        })
    }
}
