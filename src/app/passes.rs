use crate::app::models::{EntryKind, PathEntry, RunConfig};
use crate::app::rules::ReplacementRule;
use std::fs;
use std::path::Path;

/// Applies filename-token renames across the snapshot, in traversal order.
///
/// Rules cascade per entry: each applied rename updates the live filename
/// the next rule sees, so a name carrying several distinct tokens is fully
/// rewritten in one pass. Renames happen on disk unless `dry_run` is set,
/// but the live paths are updated either way so the substitution pass sees
/// post-rename locations.
pub fn rename_pass(entries: &mut [PathEntry], rules: &[ReplacementRule], config: &RunConfig) {
    for index in 0..entries.len() {
        for rule in rules {
            let old_path = entries[index].path.clone();
            let file_name = match old_path.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => continue,
            };
            if !rule.pattern.is_match(&file_name) {
                continue;
            }

            let new_name = rule
                .pattern
                .replace_all(&file_name, rule.replacement.as_str());
            let new_path = match old_path.parent() {
                Some(parent) => parent.join(new_name.as_ref()),
                None => continue,
            };

            if config.dry_run {
                println!("  {} ⇢ {}", old_path.display(), new_path.display());
            } else if let Err(err) = fs::rename(&old_path, &new_path) {
                // Leave the entry untouched so the snapshot keeps matching
                // the disk.
                log::warn!("Failed to rename {}: {}", old_path.display(), err);
                continue;
            }

            entries[index].path = new_path.clone();
            if !config.dry_run {
                entries[index].disk_path = new_path.clone();
            }

            // A directory rename moves everything beneath it; point the
            // rest of the snapshot at the new locations.
            if entries[index].kind == EntryKind::Dir {
                relocate_descendants(entries, index, &old_path, &new_path, !config.dry_run);
            }
        }
    }
}

fn relocate_descendants(
    entries: &mut [PathEntry],
    renamed: usize,
    old_path: &Path,
    new_path: &Path,
    moved_on_disk: bool,
) {
    for (i, entry) in entries.iter_mut().enumerate() {
        if i == renamed || !entry.path.starts_with(old_path) {
            continue;
        }
        if let Ok(relative) = entry.path.strip_prefix(old_path) {
            entry.path = new_path.join(relative);
            if moved_on_disk {
                entry.disk_path = entry.path.clone();
            }
        }
    }
}

/// Rewrites token occurrences inside regular files.
///
/// A dry-run reports the first matching rule per file and moves on;
/// otherwise every rule's matches are substituted before the file is
/// written back in one piece. Files that cannot be read or written are
/// reported and skipped, never fatal.
pub fn substitute_pass(entries: &[PathEntry], rules: &[ReplacementRule], config: &RunConfig) {
    for entry in entries {
        if entry.kind != EntryKind::File {
            continue;
        }
        substitute_file(&entry.disk_path, rules, config);
    }
}

fn substitute_file(path: &Path, rules: &[ReplacementRule], config: &RunConfig) {
    // Token substitution only makes sense in text; unreadable or
    // non-UTF-8 files are reported and left alone.
    let mut buffer = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            log::warn!("Failed to read {}: {}", path.display(), err);
            return;
        }
    };

    let mut hit = false;
    for rule in rules {
        if !rule.pattern.is_match(&buffer) {
            continue;
        }
        hit = true;
        // One hit is all a dry-run needs to know about.
        if config.dry_run {
            break;
        }
        buffer = rule
            .pattern
            .replace_all(&buffer, rule.replacement.as_str())
            .into_owned();
    }

    if !hit {
        return;
    }

    if config.dry_run {
        println!("  Applied changes to {}", path.display());
    } else if let Err(err) = fs::write(path, buffer.as_bytes()) {
        log::warn!("Failed to open for write {}: {}", path.display(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::rules::{replacement_rules, IgnoreRules};
    use crate::app::walker::Walker;
    use tempfile::TempDir;

    fn template_root() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".gitignore"), "").unwrap();
        dir
    }

    fn config(dry_run: bool) -> RunConfig {
        RunConfig {
            project_name: "myproj".to_string(),
            exec_name: "mytool".to_string(),
            project_id: "000042".to_string(),
            dry_run,
            self_destruct: !dry_run,
        }
    }

    fn snapshot(dir: &TempDir) -> Vec<PathEntry> {
        let rules = IgnoreRules::load(dir.path()).unwrap();
        Walker::new(dir.path(), &rules).scan()
    }

    #[test]
    fn renames_tokens_in_filenames() {
        let dir = template_root();
        fs::write(dir.path().join("<PROJ>.md"), "").unwrap();

        let config = config(false);
        let rules = replacement_rules(&config).unwrap();
        let mut entries = snapshot(&dir);
        rename_pass(&mut entries, &rules, &config);

        assert!(dir.path().join("myproj.md").exists());
        assert!(!dir.path().join("<PROJ>.md").exists());
    }

    #[test]
    fn rules_cascade_within_one_filename() {
        let dir = template_root();
        fs::write(dir.path().join("<PROJ>-__PROJID__.txt"), "").unwrap();

        let config = config(false);
        let rules = replacement_rules(&config).unwrap();
        let mut entries = snapshot(&dir);
        rename_pass(&mut entries, &rules, &config);

        assert!(dir.path().join("myproj-000042.txt").exists());
    }

    #[test]
    fn directory_rename_relocates_descendants_in_snapshot() {
        let dir = template_root();
        let subdir = dir.path().join("<EXEC>");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("main.c"), "run <EXEC> now").unwrap();

        let config = config(false);
        let rules = replacement_rules(&config).unwrap();
        let mut entries = snapshot(&dir);
        rename_pass(&mut entries, &rules, &config);

        let file = entries.iter().find(|e| e.kind == EntryKind::File).unwrap();
        assert_eq!(file.path, dir.path().join("mytool").join("main.c"));
        assert_eq!(file.disk_path, file.path);

        // The content pass must find the file at its relocated path.
        substitute_pass(&entries, &rules, &config);
        let contents = fs::read_to_string(&file.path).unwrap();
        assert_eq!(contents, "run mytool now");
    }

    #[test]
    fn dry_run_updates_snapshot_but_not_disk() {
        let dir = template_root();
        let subdir = dir.path().join("<PROJ>");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("<EXEC>.c"), "<PROJ>").unwrap();

        let config = config(true);
        let rules = replacement_rules(&config).unwrap();
        let mut entries = snapshot(&dir);
        rename_pass(&mut entries, &rules, &config);
        substitute_pass(&entries, &rules, &config);

        // Disk untouched
        assert!(subdir.exists());
        assert!(subdir.join("<EXEC>.c").exists());
        assert_eq!(
            fs::read_to_string(subdir.join("<EXEC>.c")).unwrap(),
            "<PROJ>"
        );

        // Live paths reflect the would-be state; disk paths still point
        // at reality.
        let file = entries.iter().find(|e| e.kind == EntryKind::File).unwrap();
        assert_eq!(file.path, dir.path().join("myproj").join("mytool.c"));
        assert_eq!(file.disk_path, subdir.join("<EXEC>.c"));
    }

    #[test]
    fn substitution_accumulates_all_rules() {
        let dir = template_root();
        let file = dir.path().join("CMakeLists.txt");
        fs::write(
            &file,
            "project(<PROJ> VERSION __PROJID__)\nadd_executable(<EXEC> main.c)\n",
        )
        .unwrap();

        let config = config(false);
        let rules = replacement_rules(&config).unwrap();
        let entries = snapshot(&dir);
        substitute_pass(&entries, &rules, &config);

        let contents = fs::read_to_string(&file).unwrap();
        assert_eq!(
            contents,
            "project(myproj VERSION 000042)\nadd_executable(mytool main.c)\n"
        );
    }

    #[test]
    fn substitution_replaces_every_occurrence() {
        let dir = template_root();
        let file = dir.path().join("notes.md");
        fs::write(&file, "<EXEC> calls <EXEC> which wraps <EXEC>").unwrap();

        let config = config(false);
        let rules = replacement_rules(&config).unwrap();
        let entries = snapshot(&dir);
        substitute_pass(&entries, &rules, &config);

        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "mytool calls mytool which wraps mytool"
        );
    }

    #[test]
    fn files_without_tokens_are_left_untouched() {
        let dir = template_root();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "nothing to see").unwrap();

        let config = config(false);
        let rules = replacement_rules(&config).unwrap();
        let entries = snapshot(&dir);
        substitute_pass(&entries, &rules, &config);

        assert_eq!(fs::read_to_string(&file).unwrap(), "nothing to see");
    }

    #[test]
    fn unreadable_files_are_skipped_not_fatal() {
        let dir = template_root();
        fs::write(dir.path().join("bin.dat"), [0u8, 159, 146, 150]).unwrap();
        fs::write(dir.path().join("ok.txt"), "<PROJ>").unwrap();

        let config = config(false);
        let rules = replacement_rules(&config).unwrap();
        let entries = snapshot(&dir);
        substitute_pass(&entries, &rules, &config);

        // The valid file is still processed after the bad one.
        assert_eq!(
            fs::read_to_string(dir.path().join("ok.txt")).unwrap(),
            "myproj"
        );
        assert_eq!(
            fs::read(dir.path().join("bin.dat")).unwrap(),
            vec![0u8, 159, 146, 150]
        );
    }
}
