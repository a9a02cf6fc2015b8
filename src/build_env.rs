//! Build-time metadata as an explicit value.
//!
//! The release tooling injects its values as environment variables while the
//! crate is compiled (see `build.rs`). [`BuildEnv::compiled`] reads them back,
//! and the binary builds one `BuildEnv` at startup and hands it to whatever
//! needs a [`VersionInfo`] snapshot.

use crate::version::VersionInfo;

/// Value vergen writes in place of anything it could not determine, e.g. the
/// git SHA when building outside a work tree.
const VERGEN_PLACEHOLDER: &str = "VERGEN_IDEMPOTENT_OUTPUT";

/// Drops vergen's placeholder so that unknown stays empty.
fn vergen_value(value: Option<&'static str>) -> Option<&'static str> {
    value.filter(|v| *v != VERGEN_PLACEHOLDER)
}

/// The values produced by the build pipeline. An empty string means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnv {
    pub version: String,
    pub build_id: String,
    pub build_time: String,
    pub change: String,
    pub commit_message: String,
    /// Source control commit the artifact was built from.
    pub current_commit: String,
    pub new_build_url: String,
    pub old_build_url: String,
    pub tag: String,
}

impl BuildEnv {
    /// Values baked into this binary at compile time.
    ///
    /// `version` falls back to the Cargo package version, `current_commit` to
    /// the git SHA and `build_time` to the build timestamp recorded by vergen.
    pub fn compiled() -> Self {
        Self {
            version: option_env!("BUILDINFO_VERSION")
                .unwrap_or(env!("CARGO_PKG_VERSION"))
                .to_string(),
            build_id: option_env!("BUILDINFO_BUILD_ID")
                .unwrap_or_default()
                .to_string(),
            build_time: option_env!("BUILDINFO_BUILD_TIME")
                .or(vergen_value(option_env!("VERGEN_BUILD_TIMESTAMP")))
                .unwrap_or_default()
                .to_string(),
            change: option_env!("BUILDINFO_CHANGE")
                .unwrap_or_default()
                .to_string(),
            commit_message: option_env!("BUILDINFO_COMMIT_MSG")
                .unwrap_or_default()
                .to_string(),
            current_commit: option_env!("BUILDINFO_CURRENT_COMMIT")
                .or(vergen_value(option_env!("VERGEN_GIT_SHA")))
                .unwrap_or_default()
                .to_string(),
            new_build_url: option_env!("BUILDINFO_NEW_BUILD_URL")
                .unwrap_or_default()
                .to_string(),
            old_build_url: option_env!("BUILDINFO_OLD_BUILD_URL")
                .unwrap_or_default()
                .to_string(),
            tag: option_env!("BUILDINFO_TAG").unwrap_or_default().to_string(),
        }
    }

    /// Replaces every field for which `overrides` carries a value.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        let Overrides {
            version,
            build_id,
            build_time,
            change,
            commit_message,
            current_commit,
            new_build_url,
            old_build_url,
            tag,
        } = overrides;

        let pairs = [
            (&mut self.version, version),
            (&mut self.build_id, build_id),
            (&mut self.build_time, build_time),
            (&mut self.change, change),
            (&mut self.commit_message, commit_message),
            (&mut self.current_commit, current_commit),
            (&mut self.new_build_url, new_build_url),
            (&mut self.old_build_url, old_build_url),
            (&mut self.tag, tag),
        ];
        for (field, value) in pairs {
            if let Some(value) = value {
                *field = value;
            }
        }
        self
    }

    /// Takes an independent snapshot of the current values.
    ///
    /// The snapshot's `revision` comes from `current_commit`.
    pub fn snapshot(&self) -> VersionInfo {
        tracing::trace!(
            version = %self.version,
            commit = %self.current_commit,
            "snapshotting build env"
        );
        VersionInfo {
            version: self.version.clone(),
            build_id: self.build_id.clone(),
            build_time: self.build_time.clone(),
            change: self.change.clone(),
            commit_message: self.commit_message.clone(),
            new_build_url: self.new_build_url.clone(),
            old_build_url: self.old_build_url.clone(),
            revision: self.current_commit.clone(),
            tag: self.tag.clone(),
        }
    }
}

/// Runtime replacements for individual [`BuildEnv`] fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub version: Option<String>,
    pub build_id: Option<String>,
    pub build_time: Option<String>,
    pub change: Option<String>,
    pub commit_message: Option<String>,
    pub current_commit: Option<String>,
    pub new_build_url: Option<String>,
    pub old_build_url: Option<String>,
    pub tag: Option<String>,
}
