use crate::Result;
use clap::Args;
use updraft_local::project::project;
use updraft_local::system::config::Config;

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Name of the project.
    pub name: String,

    /// Also delete the project's files.
    #[arg(long)]
    pub delete: bool,
}

pub fn main(args: RemoveArgs, config: &Config) -> Result {
    let project = project::remove(config, &args.name, args.delete)?;
    if args.delete {
        tracing::info!(name = %project.name, "removed project and its files");
    }

    println!("Removed project `{}`", project.name);
    Ok(())
}
