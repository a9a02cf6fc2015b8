use std::fmt;

use crate::build_env::BuildEnv;

/// Snapshot of the build metadata of a binary.
///
/// Every field is optional; an empty string means the value was not set.
/// Obtain one with [`BuildEnv::snapshot`] or [`info`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionInfo {
    pub(crate) version: String,
    pub(crate) build_id: String,
    pub(crate) build_time: String,
    pub(crate) change: String,
    pub(crate) commit_message: String,
    pub(crate) new_build_url: String,
    pub(crate) old_build_url: String,
    pub(crate) revision: String,
    pub(crate) tag: String,
}

/// Snapshot of the values compiled into this binary.
pub fn info() -> VersionInfo {
    BuildEnv::compiled().snapshot()
}

/// Names a [`VersionInfo`] field. Variants are declared in report order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum Field {
    Version,
    BuildId,
    BuildTime,
    Change,
    CommitMessage,
    NewBuildUrl,
    OldBuildUrl,
    Revision,
    Tag,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Version,
        Field::BuildId,
        Field::BuildTime,
        Field::Change,
        Field::CommitMessage,
        Field::NewBuildUrl,
        Field::OldBuildUrl,
        Field::Revision,
        Field::Tag,
    ];

    /// Label used for the field in the rendered report.
    pub fn label(self) -> &'static str {
        match self {
            Field::Version => "Version",
            Field::BuildId => "Build ID",
            Field::BuildTime => "Build Time",
            Field::Change => "Change",
            Field::CommitMessage => "Commit Message",
            Field::NewBuildUrl => "New Build URL",
            Field::OldBuildUrl => "Old Build URL",
            Field::Revision => "Revision",
            Field::Tag => "Tag",
        }
    }
}

impl VersionInfo {
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Identifier of the CI job that produced the build.
    pub fn build_id(&self) -> &str {
        &self.build_id
    }

    /// When the artifact was built. Not parsed.
    pub fn build_time(&self) -> &str {
        &self.build_time
    }

    /// Changelist, PR or change-set identifier.
    pub fn change(&self) -> &str {
        &self.change
    }

    pub fn commit_message(&self) -> &str {
        &self.commit_message
    }

    pub fn new_build_url(&self) -> &str {
        &self.new_build_url
    }

    pub fn old_build_url(&self) -> &str {
        &self.old_build_url
    }

    /// Source control revision at build time.
    pub fn revision(&self) -> &str {
        &self.revision
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Version => self.version(),
            Field::BuildId => self.build_id(),
            Field::BuildTime => self.build_time(),
            Field::Change => self.change(),
            Field::CommitMessage => self.commit_message(),
            Field::NewBuildUrl => self.new_build_url(),
            Field::OldBuildUrl => self.old_build_url(),
            Field::Revision => self.revision(),
            Field::Tag => self.tag(),
        }
    }

    /// Multi-line report, same as the `Display` output.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// `Version` is always written. The other fields follow in [`Field::ALL`]
/// order, one line each, and only when set. Every line ends with a newline
/// except the `Tag` line.
impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", Field::Version.label(), self.version)?;

        for field in &Field::ALL[1..] {
            let value = self.get(*field);
            if value.is_empty() {
                continue;
            }
            match field {
                Field::Tag => write!(f, "{}: {}", field.label(), value)?,
                _ => writeln!(f, "{}: {}", field.label(), value)?,
            }
        }

        Ok(())
    }
}
