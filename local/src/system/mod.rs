/// System level functionality related to Updraft.
/// This includes handling system level resources such as the project registry,
/// as well as the local configuration.
pub mod collections;
pub mod common;
pub mod config;
pub mod settings_file;
