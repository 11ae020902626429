//! File system utilities.
pub mod temp_dir;

// Re-exports
pub use temp_dir::TempDir;
