//! Command line commands.
use crate::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use updraft_local::file_resource::SystemResource;
use updraft_local::system::common::config_dir_path;
use updraft_local::system::config::Config;

pub mod import;
pub mod list;
pub mod new;
pub mod remove;
pub mod share;
pub mod versions;

#[derive(Debug, Parser)]
#[command(name = "updraft")]
#[command(version)]
#[command(about = "Share, import, and manage Updraft projects.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug output to the console.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Keep the configuration, registry, and projects in this directory
    /// instead of the user's system directories.
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

impl Cli {
    /// Configuration selected by the arguments.
    pub fn config(&self) -> Result<Config> {
        match &self.root {
            Some(root) => Ok(Config::with_root(root)),
            None => Ok(Config::load_or_default()?),
        }
    }

    /// Directory log files are written to.
    pub fn log_dir(&self) -> Result<PathBuf> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => Ok(config_dir_path()?),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List registered projects.
    List(list::ListArgs),

    /// Create and register a new project.
    New(new::NewArgs),

    /// Import a shared project archive.
    Import(import::ImportArgs),

    /// Export a project to an archive.
    Share(share::ShareArgs),

    /// List the versions of a project.
    Versions(versions::VersionsArgs),

    /// Deregister a project.
    Remove(remove::RemoveArgs),
}

/// Runs a command.
pub fn run(command: Command, config: &Config) -> Result {
    tracing::debug!(config = ?config.path(), ?command, "running command");
    match command {
        Command::List(args) => list::main(args, config),
        Command::New(args) => new::main(args, config),
        Command::Import(args) => import::main(args, config),
        Command::Share(args) => share::main(args, config),
        Command::Versions(args) => versions::main(args, config),
        Command::Remove(args) => remove::main(args, config),
    }
}
