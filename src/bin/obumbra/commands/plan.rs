//! `obumbra plan` command

use anyhow::Result;

use obumbra::ops::engine_from_config;
use obumbra::provision::BuildPlan;
use obumbra::util::diagnostic;
use obumbra::util::fs::relative_path;

use super::{disabled_notice, report, Session};
use crate::cli::PlanArgs;

pub fn execute(session: &Session, args: PlanArgs) -> Result<()> {
    let color = session.ctx.color();
    let mut engine = engine_from_config(BuildPlan::new(), &session.config)?;
    let resolution = engine.finalize().map_err(|e| report(e, &session.ctx))?;
    let plan = engine.into_host();

    if args.json {
        println!("{}", plan.to_json()?);
        return Ok(());
    }

    if !resolution.enabled {
        diagnostic::emit(&disabled_notice(), color);
        return Ok(());
    }

    println!("Repositories:");
    for repo in &plan.repositories {
        if repo.exclusive_groups.is_empty() {
            println!("  {} ({})", repo.name, repo.url);
        } else {
            println!(
                "  {} ({}) only for {}",
                repo.name,
                repo.url,
                repo.exclusive_groups.join(", ")
            );
        }
    }

    for ws in &resolution.workspaces {
        println!();
        println!("Workspace {}:", ws.key);
        if let Some(root) = plan.source_roots.get(&ws.handle.source_root().0) {
            for dir in root.java_dirs.iter().chain(&root.resource_dirs) {
                println!("  source    {}", dir.display());
            }
        }
        for entry in &ws.coordinates {
            println!("  {:<14} {}", entry.bucket.as_str(), entry.coordinate);
        }
        if let Some(remapped) = ws.handle.remapped() {
            println!("  remapped  {}, {}", remapped.compile_only, remapped.runtime_only);
        }
        for run in &ws.runs {
            println!(
                "  run       {} in {}",
                run.name,
                relative_path(session.ctx.project_dir(), &session.ctx.resolve(&run.working_dir))
                    .display()
            );
        }
        for task in &ws.staging {
            println!(
                "  staging   {} -> {} (before {})",
                task.name,
                task.into.display(),
                task.before
            );
        }
    }

    Ok(())
}
