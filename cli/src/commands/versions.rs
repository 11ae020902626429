use crate::Result;
use clap::Args;
use updraft_local::project::project;
use updraft_local::system::config::Config;

#[derive(Debug, Args)]
pub struct VersionsArgs {
    /// Name of the project.
    pub name: String,
}

/// Prints a project's versions, oldest first.
pub fn main(args: VersionsArgs, config: &Config) -> Result {
    for version in project::versions(config, &args.name)? {
        println!("{version}");
    }

    Ok(())
}
