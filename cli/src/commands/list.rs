use crate::Result;
use clap::Args;
use updraft_local::project::project;
use updraft_local::system::config::Config;

#[derive(Debug, Args)]
pub struct ListArgs {}

/// Prints the registered projects, one per line.
pub fn main(_args: ListArgs, config: &Config) -> Result {
    let projects = project::registry(config)?;
    for project in projects.iter() {
        println!("{}\t{}", project.name, project.path.display());
    }

    Ok(())
}
