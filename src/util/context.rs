//! Global context for obumbra operations.
//!
//! Resolves the project directory and every config location from it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{self, Config};

/// Global context containing paths and output settings.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Directory holding `gradle.properties` and `.obumbra/`
    project_dir: PathBuf,

    /// Home directory for user-wide settings (~/.obumbra/)
    home: PathBuf,

    verbose: bool,

    color: bool,
}

impl GlobalContext {
    /// Create a context rooted at the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_project_dir(cwd))
    }

    /// Create a context for a specific project directory.
    pub fn with_project_dir(project_dir: PathBuf) -> Self {
        let home = config::global_config_dir().unwrap_or_else(|| PathBuf::from(".obumbra"));
        GlobalContext {
            project_dir,
            home,
            verbose: false,
            color: true,
        }
    }

    /// Override the home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Get the obumbra home directory (~/.obumbra/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        config::project_config_path(&self.project_dir)
    }

    /// Get the property conventions file path.
    pub fn properties_path(&self) -> PathBuf {
        config::properties_path(&self.project_dir)
    }

    /// Load every file layer of configuration.
    pub fn load_config(&self) -> Config {
        config::load_config(
            &self.properties_path(),
            &self.config_path(),
            &self.project_config_path(),
        )
    }

    /// Resolve a path given relative to the project.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir.join(path)
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn color(&self) -> bool {
        self.color
    }
}
