use crate::Result;
use clap::Args;
use updraft_local::project::project;
use updraft_local::system::config::Config;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Name of the project.
    pub name: String,
}

/// Creates a new Updraft project.
pub fn main(args: NewArgs, config: &Config) -> Result {
    let project = project::new(config, &args.name)?;
    println!("Created project `{}` at {}", project.name, project.path.display());
    Ok(())
}
