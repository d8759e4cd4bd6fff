//! The host build-graph collaborator.
//!
//! The engine never touches the build graph directly. It describes what it
//! needs through the specs below and lets a [`BuildHost`] look up or create
//! the matching artifacts. Every host operation is get-or-create by name.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::core::{Bucket, Coordinate, Repository};
use crate::provision::run_profile::{RunProfile, RunProfileSpec};
use crate::provision::staging::StagingTask;

/// Name of the main build's source root that workspaces layer on.
pub const MAIN_SOURCE_ROOT: &str = "main";

/// Host identifier of a source/output root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SourceRootId(pub String);

/// Host identifier of a dependency bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BucketId(pub String);

impl std::fmt::Display for SourceRootId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for BucketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An isolated source/output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRootSpec {
    pub name: String,
    /// Source directories, relative to the project
    pub java_dirs: Vec<PathBuf>,
    /// Resource directories, relative to the project
    pub resource_dirs: Vec<PathBuf>,
    /// Root whose compiled output and classpaths are added to this one
    pub extends: String,
}

/// A build feature (variant) that publishes its own artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSpec {
    pub name: String,
    pub source_root: SourceRootId,
    /// Root whose packaged output also includes this feature's output
    pub layered_on: String,
    pub sources_artifact: bool,
    pub javadoc_artifact: bool,
}

/// A named dependency bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketSpec {
    pub name: String,
    pub kind: Bucket,
    pub source_root: SourceRootId,
    /// Whether the host may resolve the bucket into files
    pub resolvable: bool,
    /// Whether other projects may consume the bucket
    pub consumable: bool,
}

/// A remapped view over an existing bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemapSpec {
    pub name: String,
    /// The bucket being bridged
    pub source: BucketId,
    pub source_root: SourceRootId,
}

/// The operations the engine needs from the host build.
pub trait BuildHost {
    /// Look up or create a source root.
    fn source_root(&mut self, spec: &SourceRootSpec) -> Result<SourceRootId>;

    /// Register a feature variant; registering the same name again is a no-op.
    fn register_feature(&mut self, spec: &FeatureSpec) -> Result<()>;

    /// Look up or create a dependency bucket.
    fn bucket(&mut self, spec: &BucketSpec) -> Result<BucketId>;

    /// Look up or create a remapped view over a bucket.
    fn remapped_bucket(&mut self, spec: &RemapSpec) -> Result<BucketId>;

    /// Add a coordinate to a bucket.
    ///
    /// A coordinate for a module already in the bucket replaces the earlier
    /// one, so re-populating with updated versions never duplicates entries.
    fn add_coordinate(&mut self, bucket: &BucketId, coordinate: &Coordinate) -> Result<()>;

    /// Look up or create a run profile, returning its resolved working directory.
    fn run_profile(&mut self, spec: &RunProfileSpec) -> Result<RunProfile>;

    /// Register a staging task that must run before the resource step.
    fn register_staging(&mut self, task: &StagingTask) -> Result<()>;

    /// Declare an artifact repository.
    fn add_repository(&mut self, repository: &Repository) -> Result<()>;
}

impl<H: BuildHost + ?Sized> BuildHost for &mut H {
    fn source_root(&mut self, spec: &SourceRootSpec) -> Result<SourceRootId> {
        (**self).source_root(spec)
    }

    fn register_feature(&mut self, spec: &FeatureSpec) -> Result<()> {
        (**self).register_feature(spec)
    }

    fn bucket(&mut self, spec: &BucketSpec) -> Result<BucketId> {
        (**self).bucket(spec)
    }

    fn remapped_bucket(&mut self, spec: &RemapSpec) -> Result<BucketId> {
        (**self).remapped_bucket(spec)
    }

    fn add_coordinate(&mut self, bucket: &BucketId, coordinate: &Coordinate) -> Result<()> {
        (**self).add_coordinate(bucket, coordinate)
    }

    fn run_profile(&mut self, spec: &RunProfileSpec) -> Result<RunProfile> {
        (**self).run_profile(spec)
    }

    fn register_staging(&mut self, task: &StagingTask) -> Result<()> {
        (**self).register_staging(task)
    }

    fn add_repository(&mut self, repository: &Repository) -> Result<()> {
        (**self).add_repository(repository)
    }
}
