//! `obumbra check` command
//!
//! Reports every validation problem at once instead of stopping at the
//! first.

use anyhow::{bail, Result};

use obumbra::ops::engine_from_config;
use obumbra::provision::BuildPlan;
use obumbra::resolver::validate_all;
use obumbra::util::diagnostic;

use super::{disabled_notice, report, Session};
use crate::cli::CheckArgs;

pub fn execute(session: &Session, _args: CheckArgs) -> Result<()> {
    let color = session.ctx.color();
    let mut engine = engine_from_config(BuildPlan::new(), &session.config)?;

    let state = engine.selection_mut().finalize().clone();
    if !state.is_enabled() {
        diagnostic::emit(&disabled_notice(), color);
        return Ok(());
    }

    let errors = validate_all(&state);
    if !errors.is_empty() {
        let config_path = session.ctx.project_config_path();
        let diagnostics: Vec<_> = errors
            .iter()
            .map(|e| {
                let diag = e.to_diagnostic();
                if config_path.exists() {
                    diag.with_location(&config_path)
                } else {
                    diag
                }
            })
            .collect();
        diagnostic::emit_all(&diagnostics, color);
        bail!("found {} problem(s) in the shader compatibility configuration", errors.len());
    }

    let resolution = engine.finalize().map_err(|e| report(e, &session.ctx))?;
    for ws in &resolution.workspaces {
        eprintln!(
            "     Checked {} ({} coordinates, {} staging task(s))",
            ws.key,
            ws.coordinates.len(),
            ws.staging.len()
        );
    }

    Ok(())
}
