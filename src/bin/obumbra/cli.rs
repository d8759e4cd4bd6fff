//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use obumbra::core::{Implementation, Platform, VersionSlot};
use obumbra::util::config::ShadersConfig;

/// obumbra - shader compatibility build matrix for Minecraft mods
#[derive(Parser)]
#[command(name = "obumbra")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Selection overrides, applied on top of every config file.
#[derive(Args, Debug, Default)]
pub struct SelectionArgs {
    /// Target platform (fabric, neoforge)
    #[arg(long, global = true)]
    pub platform: Option<Platform>,

    /// Add an implementation (sodium, embeddium); repeatable
    #[arg(short, long = "implementation", global = true, value_name = "IMPL")]
    pub implementations: Vec<Implementation>,

    /// Enable shader compatibility
    #[arg(long, global = true, conflicts_with = "disable")]
    pub enable: bool,

    /// Disable shader compatibility
    #[arg(long, global = true)]
    pub disable: bool,

    /// Set a version slot, e.g. `iris.version=1.8.0` or `sodium.fabric_api=0.4.42`
    #[arg(long = "version-slot", global = true, value_name = "SLOT=VERSION", value_parser = parse_slot)]
    pub versions: Vec<(VersionSlot, String)>,
}

impl SelectionArgs {
    /// The overrides as the highest-precedence config layer.
    pub fn to_config(&self) -> ShadersConfig {
        let mut config = ShadersConfig {
            enabled: match (self.enable, self.disable) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            platform: self.platform,
            implementations: self.implementations.clone(),
            ..Default::default()
        };
        for (slot, value) in &self.versions {
            config.versions.set(*slot, value.clone());
        }
        config
    }
}

fn parse_slot(s: &str) -> Result<(VersionSlot, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected SLOT=VERSION, got `{}`", s))?;
    let slot: VersionSlot = key.trim().parse().map_err(|e| format!("{}", e))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("no version given for `{}`", slot.key()));
    }
    Ok((slot, value.to_string()))
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the selection and report every problem
    Check(CheckArgs),

    /// Show what would be provisioned in the host build
    Plan(PlanArgs),

    /// List dependency coordinates per bucket
    Coordinates(CoordinatesArgs),

    /// Copy resolved artifacts into a run's mods directory
    Stage(StageArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct CheckArgs {}

#[derive(Args)]
pub struct PlanArgs {
    /// Emit the plan as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CoordinatesArgs {
    /// Only show this implementation
    #[arg(long = "only", value_name = "IMPL")]
    pub only: Option<Implementation>,
}

#[derive(Args)]
pub struct StageArgs {
    /// Run profile to stage into, e.g. `clientWithEmbeddiumShaders`
    #[arg(long)]
    pub run: String,

    /// Artifact files to copy
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
