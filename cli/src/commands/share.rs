use crate::Result;
use clap::Args;
use std::path::PathBuf;
use updraft_core::types::UpdateVersion;
use updraft_local::project::project;
use updraft_local::system::config::Config;

#[derive(Debug, Args)]
pub struct ShareArgs {
    /// Name of the project.
    pub name: String,

    /// Path of the archive to create.
    pub output: PathBuf,

    /// Only include the given version. May be repeated.
    /// All versions are included if omitted.
    #[arg(long = "version", value_name = "VERSION")]
    pub versions: Vec<UpdateVersion>,
}

/// Exports a project to an archive.
pub fn main(args: ShareArgs, config: &Config) -> Result {
    let versions = if args.versions.is_empty() {
        None
    } else {
        Some(args.versions)
    };

    let summary = project::share(config, &args.name, &args.output, versions)?;
    let versions = summary
        .versions
        .iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();

    println!(
        "Shared `{}` to {} (versions: {})",
        args.name,
        summary.archive.display(),
        if versions.is_empty() {
            "none".to_string()
        } else {
            versions.join(", ")
        }
    );

    Ok(())
}
