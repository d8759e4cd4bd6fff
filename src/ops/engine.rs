//! The shader compatibility engine.
//!
//! Wires a [`Selection`] to a [`BuildHost`]: each ready (platform,
//! implementation) pair gets a provisioned workspace, a derived run
//! profile and its dependency buckets filled from the coordinate
//! templates. [`Engine::finalize`] freezes the selection, validates it and
//! registers the staging tasks.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::repository::default_repositories;
use crate::core::{
    Bucket, Coordinate, Implementation, Platform, Selection, SelectionError, SelectionListener,
    SelectionState, VersionSet, WorkspaceKey,
};
use crate::provision::run_profile::{self, RunProfile, RunProfileSpec};
use crate::provision::{BuildHost, StagingTask, WorkspaceHandle, WorkspaceProvisioner};
use crate::resolver::errors::ValidationError;
use crate::resolver::{templates, validate};

/// Engine settings that are not part of the selection.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Derive a `clientWith<Impl>Shaders` profile for every workspace
    pub derive_run_profiles: bool,
    /// Declare the artifact repositories the templates resolve from
    pub declare_repositories: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            derive_run_profiles: true,
            declare_repositories: true,
        }
    }
}

/// The selection listener: provisions and populates each ready pair.
#[derive(Debug)]
pub struct Provisioning<H> {
    host: H,
    provisioner: WorkspaceProvisioner,
    runs: BTreeMap<WorkspaceKey, RunProfile>,
    derive_run_profiles: bool,
}

impl<H: BuildHost> Provisioning<H> {
    fn new(host: H, derive_run_profiles: bool) -> Self {
        Provisioning {
            host,
            provisioner: WorkspaceProvisioner::new(),
            runs: BTreeMap::new(),
            derive_run_profiles,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn provisioner(&self) -> &WorkspaceProvisioner {
        &self.provisioner
    }

    /// The run profile derived for a workspace, if any.
    pub fn derived_run(&self, key: &WorkspaceKey) -> Option<&RunProfile> {
        self.runs.get(key)
    }

    fn provision(
        &mut self,
        platform: Platform,
        implementation: Implementation,
    ) -> Result<Rc<WorkspaceHandle>> {
        let handle = self
            .provisioner
            .provision(&mut self.host, platform, implementation)?;

        if self.derive_run_profiles && !self.runs.contains_key(&handle.key()) {
            let run = self
                .host
                .run_profile(&run_profile::derive(&handle))
                .with_context(|| format!("failed to derive run profile for `{}`", handle.key()))?;
            tracing::debug!("derived run {} for {}", run.name, handle.key());
            self.runs.insert(handle.key(), run);
        }

        Ok(handle)
    }
}

impl<H: BuildHost> SelectionListener for Provisioning<H> {
    fn on_ready(&mut self, selection: &SelectionState, implementation: Implementation) -> Result<()> {
        let Some(platform) = selection.platform() else {
            return Ok(());
        };
        if !implementation.supported_on(platform) {
            tracing::debug!(
                "not provisioning {} on {}: unsupported pair",
                implementation,
                platform
            );
            return Ok(());
        }

        let handle = self.provision(platform, implementation)?;
        let added = populate(&mut self.host, &handle, selection.versions())?;
        tracing::debug!("populated {} with {} coordinates", handle.key(), added);
        Ok(())
    }
}

/// Add every coordinate the templates render for the workspace's pair.
///
/// Safe to repeat: the host replaces a coordinate of the same module, so a
/// version changed since the last call updates the bucket in place.
pub fn populate<H: BuildHost + ?Sized>(
    host: &mut H,
    handle: &WorkspaceHandle,
    versions: &VersionSet,
) -> Result<usize> {
    let key = handle.key();
    let entries = templates::coordinates(key.platform(), key.implementation(), versions);
    for (coordinate, bucket) in &entries {
        host.add_coordinate(handle.bucket(*bucket), coordinate)
            .with_context(|| format!("failed to add `{}` to `{}`", coordinate, key))?;
    }
    Ok(entries.len())
}

/// A coordinate and the bucket it was placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoordinateEntry {
    pub coordinate: Coordinate,
    pub bucket: Bucket,
}

/// What finalization produced for one workspace.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedWorkspace {
    pub key: WorkspaceKey,
    #[serde(skip)]
    pub handle: Rc<WorkspaceHandle>,
    pub runs: Vec<RunProfile>,
    pub coordinates: Vec<CoordinateEntry>,
    pub staging: Vec<StagingTask>,
}

/// The outcome of [`Engine::finalize`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct Resolution {
    pub enabled: bool,
    pub platform: Option<Platform>,
    pub workspaces: Vec<ResolvedWorkspace>,
}

impl Resolution {
    pub fn workspace(&self, implementation: Implementation) -> Option<&ResolvedWorkspace> {
        self.workspaces
            .iter()
            .find(|w| w.key.implementation() == implementation)
    }

    /// Every staging task across workspaces.
    pub fn staging_tasks(&self) -> impl Iterator<Item = &StagingTask> {
        self.workspaces.iter().flat_map(|w| w.staging.iter())
    }
}

/// A selection bound to a host build.
#[derive(Debug)]
pub struct Engine<H: BuildHost> {
    selection: Selection<Provisioning<H>>,
    extra_runs: Vec<RunProfileSpec>,
}

impl<H: BuildHost> Engine<H> {
    /// Create an engine with default options.
    pub fn new(host: H) -> Result<Self> {
        Self::with_options(host, EngineOptions::default())
    }

    pub fn with_options(mut host: H, options: EngineOptions) -> Result<Self> {
        if options.declare_repositories {
            for repository in default_repositories()? {
                host.add_repository(&repository)?;
            }
        }

        Ok(Engine {
            selection: Selection::new(Provisioning::new(host, options.derive_run_profiles)),
            extra_runs: Vec::new(),
        })
    }

    pub fn selection(&self) -> &Selection<Provisioning<H>> {
        &self.selection
    }

    /// Mutable access to the selection. Setters dispatch synchronously.
    pub fn selection_mut(&mut self) -> &mut Selection<Provisioning<H>> {
        &mut self.selection
    }

    pub fn host(&self) -> &H {
        self.selection.listener().host()
    }

    pub fn into_host(self) -> H {
        self.selection.into_parts().1.host
    }

    /// Register an extra run profile that receives staged artifacts.
    pub fn add_run_profile(
        &mut self,
        name: impl Into<String>,
        working_dir: Option<PathBuf>,
    ) -> Result<()> {
        if self.selection.is_finalized() {
            return Err(SelectionError::Finalized.into());
        }
        let spec = RunProfileSpec::named(name, working_dir);
        if !self.extra_runs.iter().any(|r| r.name == spec.name) {
            self.extra_runs.push(spec);
        }
        Ok(())
    }

    /// Freeze the selection, validate it and register staging tasks.
    ///
    /// A disabled selection skips validation and yields an empty
    /// resolution. Validation failures surface as a [`ValidationError`]
    /// inside the returned error.
    pub fn finalize(&mut self) -> Result<Resolution> {
        let state = self.selection.finalize().clone();
        if !state.is_enabled() {
            tracing::info!("shader compatibility is disabled, nothing to resolve");
            return Ok(Resolution::default());
        }

        validate(&state)?;
        let platform = state.platform().ok_or(ValidationError::PlatformMissing)?;

        let listener = self.selection.listener_mut();
        let mut workspaces = Vec::new();
        for implementation in state.implementations().iter().copied() {
            let handle = listener.provision(platform, implementation)?;
            populate(&mut listener.host, &handle, state.versions())?;

            let mut runs: Vec<(RunProfile, bool)> = Vec::new();
            if let Some(run) = listener.runs.get(&handle.key()) {
                runs.push((run.clone(), false));
            }
            for spec in &self.extra_runs {
                let run = listener
                    .host
                    .run_profile(spec)
                    .with_context(|| format!("failed to look up run profile `{}`", spec.name))?;
                runs.push((run, true));
            }

            let staged = templates::coordinates_in(
                platform,
                implementation,
                state.versions(),
                Bucket::StagedInstall,
            );
            let mut staging = Vec::new();
            if !staged.is_empty() {
                if runs.is_empty() {
                    return Err(ValidationError::RunProfilesMissing { implementation }.into());
                }
                for (run, shared) in &runs {
                    let task = StagingTask::for_run(
                        run,
                        handle.bucket(Bucket::StagedInstall).clone(),
                        shared.then_some(implementation),
                    );
                    listener.host.register_staging(&task)?;
                    tracing::debug!("registered {} into {}", task.name, task.into.display());
                    staging.push(task);
                }
            }

            let coordinates = templates::coordinates(platform, implementation, state.versions())
                .into_iter()
                .map(|(coordinate, bucket)| CoordinateEntry { coordinate, bucket })
                .collect();

            workspaces.push(ResolvedWorkspace {
                key: handle.key(),
                handle,
                runs: runs.into_iter().map(|(run, _)| run).collect(),
                coordinates,
                staging,
            });
        }

        tracing::info!(
            "resolved {} workspace(s) for {}",
            workspaces.len(),
            platform.display_name()
        );

        Ok(Resolution {
            enabled: true,
            platform: Some(platform),
            workspaces,
        })
    }
}
