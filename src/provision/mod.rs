//! Workspace provisioning against a host build.

pub mod host;
pub mod plan;
pub mod provisioner;
pub mod run_profile;
pub mod staging;

pub use host::{BucketId, BuildHost, SourceRootId};
pub use plan::BuildPlan;
pub use provisioner::{BucketSet, RemappedBuckets, WorkspaceHandle, WorkspaceProvisioner};
pub use run_profile::{RunProfile, RunProfileSpec};
pub use staging::StagingTask;
