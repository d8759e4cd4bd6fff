//! Configuration file support for obumbra.
//!
//! Selection settings come from four layers, lowest precedence first:
//! - Conventions: `gradle.properties` in the project directory
//! - Global: `~/.obumbra/config.toml`
//! - Project: `.obumbra/config.toml`
//! - Command-line flags (applied by the binary)
//!
//! Scalars from a higher layer replace lower ones. Implementations and run
//! profiles accumulate, since selecting is additive.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::{Implementation, Platform, VersionSet, VersionSlot};
use crate::util::diagnostic::ConfigParseError;
use crate::util::fs;
use crate::util::properties::Properties;

/// Property holding the enabled flag.
pub const ENABLED_PROPERTY: &str = "compat.shaders.enabled";

/// Property holding a comma-separated list of extra run profiles.
pub const RUNS_PROPERTY: &str = "compat.shaders.runs";

/// obumbra configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub shaders: ShadersConfig,
}

/// The `[shaders]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadersConfig {
    pub enabled: Option<bool>,

    pub platform: Option<Platform>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implementations: Vec<Implementation>,

    /// Derive a `clientWith<Impl>Shaders` profile per implementation (default true)
    pub derive_runs: Option<bool>,

    pub versions: VersionsConfig,

    /// Extra run profiles that receive staged artifacts
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub runs: Vec<RunConfig>,
}

/// The `[shaders.versions]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    pub minecraft: Option<String>,
    pub embeddium: Option<String>,
    pub monocle: Option<String>,
    pub sodium: SodiumVersions,
    pub iris: IrisVersions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SodiumVersions {
    pub version: Option<String>,
    pub fabric_api: Option<String>,
    pub fabric_renderer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrisVersions {
    pub version: Option<String>,
    pub antlr4_runtime: Option<String>,
    pub glsl_transformer: Option<String>,
    pub jcpp: Option<String>,
}

/// A `[[shaders.runs]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub name: String,
    /// Working directory; defaults to the host's choice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

impl VersionsConfig {
    fn slot_mut(&mut self, slot: VersionSlot) -> &mut Option<String> {
        match slot {
            VersionSlot::Minecraft => &mut self.minecraft,
            VersionSlot::Sodium => &mut self.sodium.version,
            VersionSlot::SodiumFabricApi => &mut self.sodium.fabric_api,
            VersionSlot::SodiumFabricRenderer => &mut self.sodium.fabric_renderer,
            VersionSlot::Embeddium => &mut self.embeddium,
            VersionSlot::Monocle => &mut self.monocle,
            VersionSlot::Iris => &mut self.iris.version,
            VersionSlot::IrisAntlr4Runtime => &mut self.iris.antlr4_runtime,
            VersionSlot::IrisGlslTransformer => &mut self.iris.glsl_transformer,
            VersionSlot::IrisJcpp => &mut self.iris.jcpp,
        }
    }

    pub fn get(&self, slot: VersionSlot) -> Option<&str> {
        let value = match slot {
            VersionSlot::Minecraft => &self.minecraft,
            VersionSlot::Sodium => &self.sodium.version,
            VersionSlot::SodiumFabricApi => &self.sodium.fabric_api,
            VersionSlot::SodiumFabricRenderer => &self.sodium.fabric_renderer,
            VersionSlot::Embeddium => &self.embeddium,
            VersionSlot::Monocle => &self.monocle,
            VersionSlot::Iris => &self.iris.version,
            VersionSlot::IrisAntlr4Runtime => &self.iris.antlr4_runtime,
            VersionSlot::IrisGlslTransformer => &self.iris.glsl_transformer,
            VersionSlot::IrisJcpp => &self.iris.jcpp,
        };
        value.as_deref()
    }

    pub fn set(&mut self, slot: VersionSlot, value: impl Into<String>) {
        *self.slot_mut(slot) = Some(value.into());
    }

    /// The configured values as a [`VersionSet`]; blank values count as absent.
    pub fn to_version_set(&self) -> VersionSet {
        let mut set = VersionSet::new();
        for slot in VersionSlot::ALL {
            if let Some(value) = self.get(slot) {
                set.set(slot, value);
            }
        }
        set
    }

    /// Merge another versions table into this one (other takes precedence).
    pub fn merge(&mut self, other: VersionsConfig) {
        for slot in VersionSlot::ALL {
            if let Some(value) = other.get(slot) {
                self.set(slot, value);
            }
        }
    }
}

impl ShadersConfig {
    /// Read the property conventions.
    ///
    /// `compat.shaders.enabled` is true only when it says `true` (any case);
    /// an absent property leaves the flag unset. Unrecognized keys are
    /// ignored.
    pub fn from_properties(props: &Properties) -> Self {
        let mut config = ShadersConfig {
            enabled: props
                .get(ENABLED_PROPERTY)
                .map(|v| v.trim().eq_ignore_ascii_case("true")),
            ..Default::default()
        };

        for slot in VersionSlot::ALL {
            if let Some(value) = props.get(slot.property_key()) {
                if !value.trim().is_empty() {
                    config.versions.set(slot, value.trim());
                }
            }
        }

        if let Some(runs) = props.get(RUNS_PROPERTY) {
            config.runs = runs
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| RunConfig {
                    name: name.to_string(),
                    working_dir: None,
                })
                .collect();
        }

        config
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: ShadersConfig) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        if other.platform.is_some() {
            self.platform = other.platform;
        }
        for implementation in other.implementations {
            if !self.implementations.contains(&implementation) {
                self.implementations.push(implementation);
            }
        }
        if other.derive_runs.is_some() {
            self.derive_runs = other.derive_runs;
        }
        self.versions.merge(other.versions);
        for run in other.runs {
            match self.runs.iter_mut().find(|r| r.name == run.name) {
                Some(existing) => {
                    if run.working_dir.is_some() {
                        existing.working_dir = run.working_dir;
                    }
                }
                None => self.runs.push(run),
            }
        }
    }

    /// Whether derived client profiles are requested.
    pub fn derive_runs(&self) -> bool {
        self.derive_runs.unwrap_or(true)
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents)
            .map_err(|e| anyhow::Error::new(ConfigParseError::new(path, &contents, &e)))
    }

    /// Load configuration with fallback to defaults if the file is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        self.shaders.merge(other.shaders);
    }
}

/// Load merged configuration from every file layer.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.obumbra/config.toml)
/// 2. Global config (~/.obumbra/config.toml)
/// 3. Property conventions (gradle.properties)
/// 4. Defaults
pub fn load_config(properties_path: &Path, global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    match Properties::load_if_exists(properties_path) {
        Ok(Some(props)) => config.shaders.merge(ShadersConfig::from_properties(&props)),
        Ok(None) => {}
        Err(e) => tracing::warn!("{:#}", e),
    }

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global obumbra config directory (~/.obumbra).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".obumbra"))
}

/// Get the global config path (~/.obumbra/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.obumbra/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".obumbra").join("config.toml")
}

/// Get the conventions file path (gradle.properties).
pub fn properties_path(project_root: &Path) -> PathBuf {
    project_root.join("gradle.properties")
}
