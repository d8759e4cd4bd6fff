//! Staging tasks: copy the staged-install bucket into a run's `mods` directory.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::Implementation;
use crate::provision::host::BucketId;
use crate::provision::run_profile::{self, RunProfile};

/// Subdirectory of a run's working directory the loader scans for mods.
pub const MODS_DIR: &str = "mods";

/// Host step the staging task must precede.
pub const BEFORE_STEP: &str = "processResources";

/// A registered copy task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagingTask {
    pub name: String,
    pub run: String,
    pub from: BucketId,
    pub into: PathBuf,
    pub before: String,
}

impl StagingTask {
    /// The staging task copying `from` into `run`'s mods directory.
    pub fn for_run(run: &RunProfile, from: BucketId, shared_by: Option<Implementation>) -> Self {
        StagingTask {
            name: run_profile::staging_task_name(run, shared_by),
            run: run.name.clone(),
            from,
            into: mods_dir(&run.working_dir),
            before: BEFORE_STEP.to_string(),
        }
    }
}

pub fn mods_dir(working_dir: &Path) -> PathBuf {
    working_dir.join(MODS_DIR)
}
