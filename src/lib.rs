//! Build and version metadata for a binary, and its `version` report.

pub mod build_env;
pub mod version;

pub use build_env::{BuildEnv, Overrides};
pub use version::{Field, VersionInfo};
