//! Applying merged configuration to an engine.

use anyhow::{Context, Result};

use crate::core::{Selection, SelectionListener};
use crate::ops::engine::{Engine, EngineOptions};
use crate::provision::BuildHost;
use crate::util::config::ShadersConfig;

/// Apply the selection part of a config.
///
/// Setters run in a fixed order: enabled, platform, implementations,
/// versions. The order only affects when pairs dispatch, not the outcome.
pub fn apply_selection<L: SelectionListener>(
    selection: &mut Selection<L>,
    config: &ShadersConfig,
) -> Result<()> {
    if let Some(enabled) = config.enabled {
        selection.set_enabled(enabled)?;
    }
    if let Some(platform) = config.platform {
        selection.set_platform(platform)?;
    }
    for implementation in &config.implementations {
        selection.add_implementation(*implementation)?;
    }
    selection.set_versions(&config.versions.to_version_set())?;
    Ok(())
}

/// Build an engine on `host` configured from `config`.
pub fn engine_from_config<H: BuildHost>(host: H, config: &ShadersConfig) -> Result<Engine<H>> {
    let options = EngineOptions {
        derive_run_profiles: config.derive_runs(),
        ..Default::default()
    };
    let mut engine = Engine::with_options(host, options)?;

    for run in &config.runs {
        engine.add_run_profile(run.name.clone(), run.working_dir.clone())?;
    }
    apply_selection(engine.selection_mut(), config).context("failed to apply configuration")?;

    Ok(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Implementation, Platform, VersionSlot};
    use crate::provision::BuildPlan;

    #[test]
    fn test_engine_from_config() {
        let mut config = ShadersConfig {
            enabled: Some(true),
            platform: Some(Platform::Fabric),
            implementations: vec![Implementation::Sodium],
            ..Default::default()
        };
        config.versions.set(VersionSlot::Minecraft, "1.21.1");
        config.versions.set(VersionSlot::Sodium, "0.6.0");

        let engine = engine_from_config(BuildPlan::new(), &config).unwrap();
        assert!(engine.selection().is_ready());
        assert_eq!(
            engine.host().coordinates("fabricSodiumCompileOnly")[0].as_str(),
            "maven.modrinth:sodium:mc1.21.1-0.6.0-fabric"
        );
    }

    #[test]
    fn test_disabled_config_provisions_nothing() {
        let config = ShadersConfig {
            enabled: Some(false),
            platform: Some(Platform::NeoForge),
            implementations: vec![Implementation::Embeddium],
            ..Default::default()
        };
        let engine = engine_from_config(BuildPlan::new(), &config).unwrap();
        assert_eq!(engine.host().creations(), 0);
    }
}
