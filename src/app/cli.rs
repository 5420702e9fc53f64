use clap::Parser;

const MAX_KEY_LEN: usize = 60;

#[derive(Parser, Debug)]
#[command(
    name = "init",
    author,
    version,
    about = "A simple project initialisation tool, finalises by removing its own files"
)]
pub struct Cli {
    /// The name of the project
    #[arg(value_parser = validate_key)]
    pub project_name: String,

    /// The name of the hello world default executable
    #[arg(value_parser = validate_key)]
    pub exec_name: String,

    /// Project number, assigned a random 6-digit number by default
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(0..=999_999))]
    pub num: Option<u32>,

    /// Perform a dry-run execution without making changes
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Do not remove the tool's binary and source after operation
    #[arg(short = 'q', long)]
    pub no_self_destruct: bool,
}

/// Checks that a name is usable as a build-system key: 1 to 60 characters,
/// starting with `a-z`, the rest drawn from `a-z`, `0-9`, `_` and `-`.
pub fn validate_key(s: &str) -> Result<String, String> {
    if s.is_empty() || s.len() > MAX_KEY_LEN {
        return Err(format!(
            "key must be between 1 and {} characters long",
            MAX_KEY_LEN
        ));
    }
    if !s.as_bytes()[0].is_ascii_lowercase() {
        return Err("first character of key must be [a-z]".to_string());
    }
    if !s
        .bytes()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == b'_' || c == b'-')
    {
        return Err("key characters must match a-z, 0-9, - or _".to_string());
    }
    Ok(s.to_string())
}
