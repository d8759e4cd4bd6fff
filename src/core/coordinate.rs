//! Dependency coordinates and the buckets they are registered into.

use serde::{Deserialize, Serialize};

/// When and how a dependency is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Visible to the compiler only
    CompileOnly,
    /// Resolved onto the local runtime classpath
    RuntimeOnly,
    /// Downloaded and copied into the run directory before launch
    StagedInstall,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::CompileOnly, Bucket::RuntimeOnly, Bucket::StagedInstall];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::CompileOnly => "compile_only",
            Bucket::RuntimeOnly => "runtime_only",
            Bucket::StagedInstall => "staged_install",
        }
    }

    /// Suffix appended to a workspace naming root to name the host bucket.
    pub fn suffix(&self) -> &'static str {
        match self {
            Bucket::CompileOnly => "CompileOnly",
            Bucket::RuntimeOnly => "LocalRuntime",
            Bucket::StagedInstall => "ModDownloads",
        }
    }

    /// Whether the bucket is consumed through a remapped view on platforms
    /// that need one. Staged artifacts are copied verbatim.
    pub fn is_remappable(&self) -> bool {
        !matches!(self, Bucket::StagedInstall)
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An externally addressable dependency, `group:artifact:version`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coordinate(String);

impl Coordinate {
    pub fn new(value: impl Into<String>) -> Self {
        Coordinate(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `group:artifact` part, without the version.
    pub fn module(&self) -> &str {
        match self.0.rfind(':') {
            Some(idx) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
