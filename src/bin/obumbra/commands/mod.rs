//! Command implementations

pub mod check;
pub mod completions;
pub mod coordinates;
pub mod plan;
pub mod stage;

use std::path::PathBuf;

use anyhow::Result;

use obumbra::resolver::ValidationError;
use obumbra::util::config::ShadersConfig;
use obumbra::util::diagnostic::{self, Diagnostic};
use obumbra::util::GlobalContext;

use crate::cli::SelectionArgs;

/// Context and merged configuration shared by every command.
pub struct Session {
    pub ctx: GlobalContext,
    pub config: ShadersConfig,
}

impl Session {
    pub fn load(
        project_dir: Option<PathBuf>,
        overrides: &SelectionArgs,
        verbose: bool,
        color: bool,
    ) -> Result<Self> {
        let mut ctx = match project_dir {
            Some(dir) => GlobalContext::with_project_dir(dir),
            None => GlobalContext::new()?,
        };
        ctx.set_verbose(verbose);
        ctx.set_color(color);

        let mut config = ctx.load_config().shaders;
        config.merge(overrides.to_config());
        tracing::debug!("merged selection config: {:?}", config);

        Ok(Session { ctx, config })
    }
}

/// Print a validation error as a diagnostic and turn it into a short
/// error for `main`; other errors pass through unchanged.
pub fn report(err: anyhow::Error, ctx: &GlobalContext) -> anyhow::Error {
    match err.downcast_ref::<ValidationError>() {
        Some(validation) => {
            let mut diag = validation.to_diagnostic();
            if !ctx.is_verbose() {
                diag = diag.with_suggestion(diagnostic::suggestions::VERBOSE);
            }
            diagnostic::emit(&diag, ctx.color());
            anyhow::anyhow!("invalid shader compatibility configuration")
        }
        None => err,
    }
}

/// Warning shown when the selection is disabled.
pub fn disabled_notice() -> Diagnostic {
    Diagnostic::warning("shader compatibility is disabled")
        .with_suggestion(diagnostic::suggestions::DISABLED)
}
