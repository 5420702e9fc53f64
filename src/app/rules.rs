use crate::app::cleanup::TOOL_PATHS;
use crate::app::models::RunConfig;
use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Placeholder tokens recognised in filenames and file contents.
pub const ID_TOKEN: &str = "__PROJID__";
pub const NAME_TOKEN: &str = "<PROJ>";
pub const EXEC_TOKEN: &str = "<EXEC>";

/// Markers that must both be present at the template root.
pub const VCS_DIR: &str = ".git";
pub const IGNORE_FILE: &str = ".gitignore";

/// A failure while establishing the run's preconditions. All of these
/// happen before any filesystem mutation.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("must be executed from a template root containing both `.git` and `.gitignore`")]
    NotTemplateRoot,
    #[error("failed to read `.gitignore`: {0}")]
    IgnoreFileRead(#[from] std::io::Error),
    #[error("invalid ignore pattern `{pattern}`: {source}")]
    BadIgnorePattern {
        pattern: String,
        source: regex::Error,
    },
}

/// The ordered ignore-rule set: built-in exclusions first, then one rule
/// per non-blank, non-comment line of the ignore file, in file order.
pub struct IgnoreRules {
    rules: Vec<Regex>,
}

impl IgnoreRules {
    /// Loads the rule set from `root`, first checking that `root` really
    /// is a template checkout.
    pub fn load(root: &Path) -> Result<Self, SetupError> {
        if !root.join(VCS_DIR).exists() || !root.join(IGNORE_FILE).exists() {
            return Err(SetupError::NotTemplateRoot);
        }

        // The markers and the tool's own files are always excluded, so a
        // run never edits its own source while it is still on disk.
        let mut patterns: Vec<String> = [VCS_DIR, IGNORE_FILE]
            .iter()
            .chain(TOOL_PATHS.iter())
            .map(|name| name.to_string())
            .collect();

        let contents = fs::read_to_string(root.join(IGNORE_FILE))?;
        for line in contents.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            patterns.push(line.to_string());
        }

        let mut rules = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let rule = Regex::new(&pattern).map_err(|source| SetupError::BadIgnorePattern {
                pattern: pattern.clone(),
                source,
            })?;
            rules.push(rule);
        }

        Ok(Self { rules })
    }

    /// True if any rule finds a match anywhere in the root-relative path
    /// (search semantics, not an anchored full match).
    pub fn is_ignored(&self, relative: &Path) -> bool {
        let text = relative.to_string_lossy();
        self.rules.iter().any(|rule| rule.is_match(&text))
    }
}

/// A single token-substitution rule, applied to filenames and contents.
pub struct ReplacementRule {
    pub pattern: Regex,
    pub replacement: String,
}

/// The three fixed substitution rules in application order: project id,
/// project name, executable name.
pub fn replacement_rules(config: &RunConfig) -> Result<Vec<ReplacementRule>> {
    [
        (ID_TOKEN, config.project_id.as_str()),
        (NAME_TOKEN, config.project_name.as_str()),
        (EXEC_TOKEN, config.exec_name.as_str()),
    ]
    .into_iter()
    .map(|(token, value)| {
        let pattern = Regex::new(&regex::escape(token))
            .with_context(|| format!("Failed to compile token pattern `{}`", token))?;
        Ok(ReplacementRule {
            pattern,
            replacement: value.to_string(),
        })
    })
    .collect()
}
