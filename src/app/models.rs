use std::path::PathBuf;

/// Validated per-run settings, immutable for the duration of the run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub project_name: String,
    pub exec_name: String,
    /// Always exactly six ASCII digits.
    pub project_id: String,
    pub dry_run: bool,
    pub self_destruct: bool,
}

/// The kind of filesystem object a snapshot entry refers to, cached at
/// walk time. Later passes never re-ask the disk: under dry-run the disk
/// no longer agrees with the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
}

/// A single path discovered during the walk.
#[derive(Debug, Clone)]
pub struct PathEntry {
    /// Live location: where the entry sits after every rename applied so
    /// far — real renames under a normal run, simulated ones under
    /// dry-run.
    pub path: PathBuf,
    /// Where the entry actually sits on disk. Identical to `path` except
    /// under dry-run, where renames only happen in `path`. File reads and
    /// writes always go through this one.
    pub disk_path: PathBuf,
    pub kind: EntryKind,
}
