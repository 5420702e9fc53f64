// Declare modules
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod models;
pub mod passes;
pub mod rules;
pub mod walker;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::Path;

use self::cli::Cli;
use self::config::resolve_config;
use self::models::RunConfig;
use self::rules::{replacement_rules, IgnoreRules};
use self::walker::Walker;

/// Initializes components and orchestrates the pipeline.
pub fn run() -> Result<()> {
    // 1. Parse Args (key and range validation happens in the parsers)
    let args = Cli::parse();

    // 2. Identify Template Root
    let root = env::current_dir().context("Failed to get current directory")?;

    // 3. Resolve Configuration
    let config = resolve_config(args);

    // 4. Walk, rename, substitute, clean up
    execute(&config, &root)?;

    // 5. Summarise
    println!(
        "Initiated project with project id {} name {} and executable name {}",
        config.project_id, config.project_name, config.exec_name
    );

    Ok(())
}

/// Runs the whole pipeline against `root`. Split out of [`run`] so tests
/// can drive it against a scratch directory instead of the process CWD.
pub fn execute(config: &RunConfig, root: &Path) -> Result<()> {
    // Sanity guard: refuses to run outside a template checkout.
    let ignore_rules = IgnoreRules::load(root)?;
    let rules = replacement_rules(config)?;

    // One snapshot, reused by both passes. The rename pass keeps it
    // consistent with disk (and, under dry-run, consistent with what disk
    // would have looked like).
    let mut entries = Walker::new(root, &ignore_rules).scan();

    if config.dry_run {
        println!("Running in dry-run mode:\n= Move operations    =");
    }

    passes::rename_pass(&mut entries, &rules, config);

    if config.dry_run {
        println!("\n= Replace operations =\n");
    }

    passes::substitute_pass(&entries, &rules, config);

    if config.dry_run {
        println!();
    }

    if !config.dry_run && config.self_destruct {
        cleanup::self_destruct(root);
    }

    Ok(())
}
