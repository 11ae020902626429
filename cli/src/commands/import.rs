use crate::Result;
use clap::Args;
use std::path::PathBuf;
use updraft_local::project::project;
use updraft_local::system::config::Config;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Project archive to import.
    pub archive: PathBuf,

    /// Name to register the project under.
    #[arg(short, long)]
    pub name: String,

    /// Where to place the project's metadata file.
    #[arg(long)]
    pub project_file: Option<PathBuf>,
}

pub fn main(args: ImportArgs, config: &Config) -> Result {
    let project = project::import(config, &args.archive, &args.name, args.project_file)?;
    println!(
        "Imported project `{}` from {}",
        project.name,
        args.archive.display()
    );

    Ok(())
}
