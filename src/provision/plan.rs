//! In-memory build host.
//!
//! A BuildPlan records everything the engine asks the host build for:
//! repositories, source roots, features, buckets and their coordinates,
//! run profiles and staging tasks. It is what `obumbra plan` prints and
//! what the tests inspect.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::core::{Bucket, Coordinate, Repository};
use crate::provision::host::{
    BucketId, BucketSpec, BuildHost, FeatureSpec, RemapSpec, SourceRootId, SourceRootSpec,
};
use crate::provision::run_profile::{RunProfile, RunProfileSpec, BASE_PROFILE};
use crate::provision::staging::StagingTask;

/// Working directory of the client profile before anything relocates it.
pub const DEFAULT_CLIENT_DIR: &str = "run";

/// A bucket and what it holds.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedBucket {
    pub kind: Bucket,
    pub source_root: SourceRootId,
    pub resolvable: bool,
    pub consumable: bool,
    /// Set when this bucket is a remapped view of another
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaps: Option<BucketId>,
    pub coordinates: Vec<Coordinate>,
}

/// A run profile as planned.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedRun {
    pub working_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ide_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mod_sources: Vec<SourceRootId>,
}

/// A recording [`BuildHost`].
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    pub repositories: Vec<Repository>,
    pub source_roots: BTreeMap<String, SourceRootSpec>,
    pub features: BTreeMap<String, FeatureSpec>,
    pub buckets: BTreeMap<String, PlannedBucket>,
    pub runs: BTreeMap<String, PlannedRun>,
    pub staging: BTreeMap<String, StagingTask>,

    /// Number of artifacts created, excluding look-ups of existing ones
    #[serde(skip)]
    creations: usize,
}

impl Default for BuildPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildPlan {
    /// An empty plan with the host's stock client profile.
    pub fn new() -> Self {
        let mut runs = BTreeMap::new();
        runs.insert(
            BASE_PROFILE.to_string(),
            PlannedRun {
                working_dir: PathBuf::from(DEFAULT_CLIENT_DIR),
                inherits: None,
                ide_name: Some("Client".to_string()),
                mod_sources: Vec::new(),
            },
        );

        BuildPlan {
            repositories: Vec::new(),
            source_roots: BTreeMap::new(),
            features: BTreeMap::new(),
            buckets: BTreeMap::new(),
            runs,
            staging: BTreeMap::new(),
            creations: 0,
        }
    }

    /// How many artifacts have been created so far.
    pub fn creations(&self) -> usize {
        self.creations
    }

    pub fn coordinates(&self, bucket: &str) -> &[Coordinate] {
        self.buckets
            .get(bucket)
            .map(|b| b.coordinates.as_slice())
            .unwrap_or(&[])
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl BuildHost for BuildPlan {
    fn source_root(&mut self, spec: &SourceRootSpec) -> Result<SourceRootId> {
        if !self.source_roots.contains_key(&spec.name) {
            tracing::debug!("creating source root {}", spec.name);
            self.source_roots.insert(spec.name.clone(), spec.clone());
            self.creations += 1;
        }
        Ok(SourceRootId(spec.name.clone()))
    }

    fn register_feature(&mut self, spec: &FeatureSpec) -> Result<()> {
        if !self.source_roots.contains_key(&spec.source_root.0) {
            bail!(
                "feature `{}` refers to unknown source root `{}`",
                spec.name,
                spec.source_root
            );
        }
        if !self.features.contains_key(&spec.name) {
            self.features.insert(spec.name.clone(), spec.clone());
            self.creations += 1;
        }
        Ok(())
    }

    fn bucket(&mut self, spec: &BucketSpec) -> Result<BucketId> {
        if !self.buckets.contains_key(&spec.name) {
            tracing::debug!("creating bucket {}", spec.name);
            self.buckets.insert(
                spec.name.clone(),
                PlannedBucket {
                    kind: spec.kind,
                    source_root: spec.source_root.clone(),
                    resolvable: spec.resolvable,
                    consumable: spec.consumable,
                    remaps: None,
                    coordinates: Vec::new(),
                },
            );
            self.creations += 1;
        }
        Ok(BucketId(spec.name.clone()))
    }

    fn remapped_bucket(&mut self, spec: &RemapSpec) -> Result<BucketId> {
        let Some(source) = self.buckets.get(&spec.source.0) else {
            bail!(
                "cannot remap unknown bucket `{}` into `{}`",
                spec.source,
                spec.name
            );
        };
        let kind = source.kind;

        if !self.buckets.contains_key(&spec.name) {
            tracing::debug!("creating remapped bucket {} from {}", spec.name, spec.source);
            self.buckets.insert(
                spec.name.clone(),
                PlannedBucket {
                    kind,
                    source_root: spec.source_root.clone(),
                    resolvable: false,
                    consumable: false,
                    remaps: Some(spec.source.clone()),
                    coordinates: Vec::new(),
                },
            );
            self.creations += 1;
        }
        Ok(BucketId(spec.name.clone()))
    }

    fn add_coordinate(&mut self, bucket: &BucketId, coordinate: &Coordinate) -> Result<()> {
        let Some(planned) = self.buckets.get_mut(&bucket.0) else {
            bail!("unknown bucket `{}`", bucket);
        };

        match planned
            .coordinates
            .iter_mut()
            .find(|c| c.module() == coordinate.module())
        {
            Some(existing) => *existing = coordinate.clone(),
            None => planned.coordinates.push(coordinate.clone()),
        }
        Ok(())
    }

    fn run_profile(&mut self, spec: &RunProfileSpec) -> Result<RunProfile> {
        if let Some(existing) = self.runs.get(&spec.name) {
            return Ok(RunProfile {
                name: spec.name.clone(),
                working_dir: existing.working_dir.clone(),
            });
        }

        let parent = match &spec.inherits {
            Some(name) => match self.runs.get_mut(name) {
                Some(parent) => Some(parent),
                None => bail!("run `{}` inherits unknown run `{}`", spec.name, name),
            },
            None => None,
        };

        let (inherited_dir, inherited_ide, mut mod_sources) = match parent {
            Some(parent) => {
                let inherited = (
                    parent.working_dir.clone(),
                    parent.ide_name.clone(),
                    parent.mod_sources.clone(),
                );
                if let Some(relocated) = &spec.relocate_base {
                    parent.working_dir = relocated.clone();
                }
                inherited
            }
            None => (PathBuf::from("runs").join(&spec.name), None, Vec::new()),
        };

        if let Some(root) = &spec.source_root {
            mod_sources.push(root.clone());
        }
        let working_dir = spec.working_dir.clone().unwrap_or(inherited_dir);
        let ide_name = match (&spec.ide_name_suffix, inherited_ide) {
            (Some(suffix), Some(base)) => Some(format!("{}{}", base, suffix)),
            (_, inherited) => inherited,
        };

        tracing::debug!("creating run {} in {}", spec.name, working_dir.display());
        self.runs.insert(
            spec.name.clone(),
            PlannedRun {
                working_dir: working_dir.clone(),
                inherits: spec.inherits.clone(),
                ide_name,
                mod_sources,
            },
        );
        self.creations += 1;

        Ok(RunProfile {
            name: spec.name.clone(),
            working_dir,
        })
    }

    fn register_staging(&mut self, task: &StagingTask) -> Result<()> {
        if !self.buckets.contains_key(&task.from.0) {
            bail!("staging task `{}` copies unknown bucket `{}`", task.name, task.from);
        }
        if !self.staging.contains_key(&task.name) {
            self.staging.insert(task.name.clone(), task.clone());
            self.creations += 1;
        }
        Ok(())
    }

    fn add_repository(&mut self, repository: &Repository) -> Result<()> {
        if !self.repositories.iter().any(|r| r.name == repository.name) {
            self.repositories.push(repository.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket_spec(name: &str) -> BucketSpec {
        BucketSpec {
            name: name.into(),
            kind: Bucket::CompileOnly,
            source_root: SourceRootId("root".into()),
            resolvable: false,
            consumable: false,
        }
    }

    #[test]
    fn test_same_module_replaces_coordinate() {
        let mut plan = BuildPlan::new();
        let id = plan.bucket(&bucket_spec("rootCompileOnly")).unwrap();

        plan.add_coordinate(&id, &Coordinate::new("org.anarres:jcpp:1.4.13")).unwrap();
        plan.add_coordinate(&id, &Coordinate::new("org.anarres:jcpp:1.4.14")).unwrap();

        assert_eq!(
            plan.coordinates("rootCompileOnly"),
            &[Coordinate::new("org.anarres:jcpp:1.4.14")]
        );
    }

    #[test]
    fn test_unknown_bucket_is_error() {
        let mut plan = BuildPlan::new();
        let err = plan
            .add_coordinate(&BucketId("missing".into()), &Coordinate::new("a:b:1"))
            .unwrap_err();
        assert!(err.to_string().contains("unknown bucket"));
    }

    #[test]
    fn test_relocating_base_profile() {
        let mut plan = BuildPlan::new();
        let run = plan
            .run_profile(&RunProfileSpec {
                name: "clientWithSodiumShaders".into(),
                inherits: Some("client".into()),
                source_root: Some(SourceRootId("neoforgeSodium".into())),
                working_dir: Some(PathBuf::from("runs/client/sodium-shader")),
                ide_name_suffix: Some(" with Sodium shaders".into()),
                relocate_base: Some(PathBuf::from("runs/client/no-shader")),
            })
            .unwrap();

        assert_eq!(run.working_dir, PathBuf::from("runs/client/sodium-shader"));
        assert_eq!(plan.runs["client"].working_dir, PathBuf::from("runs/client/no-shader"));
        assert_eq!(
            plan.runs["clientWithSodiumShaders"].ide_name.as_deref(),
            Some("Client with Sodium shaders")
        );
    }

    #[test]
    fn test_named_profile_defaults_under_runs() {
        let mut plan = BuildPlan::new();
        let run = plan.run_profile(&RunProfileSpec::named("gametest", None)).unwrap();
        assert_eq!(run.working_dir, PathBuf::from("runs/gametest"));

        let again = plan
            .run_profile(&RunProfileSpec::named("gametest", Some(PathBuf::from("elsewhere"))))
            .unwrap();
        assert_eq!(again.working_dir, PathBuf::from("runs/gametest"));
    }
}
