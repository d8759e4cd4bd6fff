//! Executing a staging task: copy resolved artifacts into a run's mods directory.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::ops::engine::Resolution;
use crate::provision::StagingTask;
use crate::util::fs;

/// Find the staging tasks that target `run`.
pub fn tasks_for_run<'a>(resolution: &'a Resolution, run: &str) -> Vec<&'a StagingTask> {
    resolution.staging_tasks().filter(|t| t.run == run).collect()
}

/// Copy `files` into the task's target directory under `project_dir`.
///
/// Returns the copied paths. Existing files of the same name are replaced.
pub fn stage_files(project_dir: &Path, task: &StagingTask, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if files.is_empty() {
        bail!("no files given to stage for `{}`", task.run);
    }

    let target = project_dir.join(&task.into);
    let mut staged = Vec::with_capacity(files.len());
    for file in files {
        let dst = fs::copy_into(file, &target)?;
        tracing::info!(
            "staged {} into {}",
            file.display(),
            fs::relative_path(project_dir, &dst).display()
        );
        staged.push(dst);
    }
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::BucketId;
    use tempfile::TempDir;

    fn task() -> StagingTask {
        StagingTask {
            name: "installModsClientWithEmbeddiumShaders".into(),
            run: "clientWithEmbeddiumShaders".into(),
            from: BucketId("neoforgeEmbeddiumModDownloads".into()),
            into: PathBuf::from("runs/client/embeddium-shader/mods"),
            before: "processResources".into(),
        }
    }

    #[test]
    fn test_stage_files() {
        let tmp = TempDir::new().unwrap();
        let jar = tmp.path().join("monocle-iris-0.1.6.jar");
        std::fs::write(&jar, b"jar").unwrap();

        let staged = stage_files(tmp.path(), &task(), &[jar]).unwrap();
        assert_eq!(
            staged,
            vec![tmp
                .path()
                .join("runs/client/embeddium-shader/mods/monocle-iris-0.1.6.jar")]
        );
    }

    #[test]
    fn test_stage_requires_files() {
        let tmp = TempDir::new().unwrap();
        assert!(stage_files(tmp.path(), &task(), &[]).is_err());
    }
}
