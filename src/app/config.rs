use crate::app::cli::Cli;
use crate::app::models::RunConfig;

/// Turns parsed CLI arguments into the immutable per-run configuration.
pub fn resolve_config(cli: Cli) -> RunConfig {
    // A dry-run must never delete the tool's own files.
    let self_destruct = !cli.no_self_destruct && !cli.dry_run;

    let num = cli.num.unwrap_or_else(|| fastrand::u32(0..1_000_000));

    RunConfig {
        project_name: cli.project_name,
        exec_name: cli.exec_name,
        project_id: format_project_id(num),
        dry_run: cli.dry_run,
        self_destruct,
    }
}

/// Zero-pads a project number into its canonical 6-digit form.
pub fn format_project_id(num: u32) -> String {
    format!("{:06}", num)
}
