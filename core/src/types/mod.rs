//! Common types.
pub mod update_version;

pub use update_version::{DevStage, UpdateVersion};
