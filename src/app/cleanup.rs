use std::fs;
use std::path::Path;

/// The tool's footprint inside the template checkout: the deployed binary
/// and the vendored crate source directory. Both sit at the template root.
pub const TOOL_PATHS: [&str; 2] = ["init", "template-init"];

/// Removes the tool's own files from the template root, directories
/// recursively. Strictly best-effort: a path that is already gone or
/// cannot be removed is skipped without comment.
pub fn self_destruct(root: &Path) {
    for name in TOOL_PATHS {
        let path = root.join(name);
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        if let Err(err) = removed {
            log::debug!("Could not remove {}: {}", path.display(), err);
        }
    }
}
