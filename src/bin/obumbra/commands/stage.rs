//! `obumbra stage` command

use anyhow::{bail, Result};

use obumbra::ops::{engine_from_config, stage_files, tasks_for_run};
use obumbra::provision::BuildPlan;
use obumbra::util::diagnostic::suggestions;

use super::{report, Session};
use crate::cli::StageArgs;

pub fn execute(session: &Session, args: StageArgs) -> Result<()> {
    let mut engine = engine_from_config(BuildPlan::new(), &session.config)?;
    let resolution = engine.finalize().map_err(|e| report(e, &session.ctx))?;

    let tasks = tasks_for_run(&resolution, &args.run);
    if tasks.is_empty() {
        bail!(
            "no staging task targets run `{}`\nhelp: {}",
            args.run,
            suggestions::UNKNOWN_RUN
        );
    }

    let files: Vec<_> = args.files.iter().map(|f| session.ctx.resolve(f)).collect();
    for task in tasks {
        let staged = stage_files(session.ctx.project_dir(), task, &files)?;
        eprintln!(
            "      Staged {} file(s) for `{}` into {}",
            staged.len(),
            task.run,
            task.into.display()
        );
    }

    Ok(())
}
