//! Idempotent creation of per-pair workspaces.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{Bucket, Implementation, Platform, WorkspaceKey};
use crate::provision::host::{
    BucketId, BucketSpec, BuildHost, FeatureSpec, RemapSpec, SourceRootId, SourceRootSpec,
    MAIN_SOURCE_ROOT,
};

/// Root of every workspace's sources, relative to the project.
pub const SOURCES_DIR: &str = "src/shaders";

/// The three buckets of a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketSet {
    pub compile_only: BucketId,
    pub runtime_only: BucketId,
    pub staged_install: BucketId,
}

impl BucketSet {
    /// Bucket ids as the host names them by default.
    pub fn named(key: &WorkspaceKey) -> Self {
        BucketSet {
            compile_only: BucketId(key.bucket_name(Bucket::CompileOnly)),
            runtime_only: BucketId(key.bucket_name(Bucket::RuntimeOnly)),
            staged_install: BucketId(key.bucket_name(Bucket::StagedInstall)),
        }
    }

    pub fn get(&self, bucket: Bucket) -> &BucketId {
        match bucket {
            Bucket::CompileOnly => &self.compile_only,
            Bucket::RuntimeOnly => &self.runtime_only,
            Bucket::StagedInstall => &self.staged_install,
        }
    }
}

/// Remapped views of the remappable buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemappedBuckets {
    pub compile_only: BucketId,
    pub runtime_only: BucketId,
}

/// Everything the host created for one pair.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct WorkspaceHandle {
    key: WorkspaceKey,
    source_root: SourceRootId,
    buckets: BucketSet,
    remapped: Option<RemappedBuckets>,
}

impl WorkspaceHandle {
    pub fn new(
        key: WorkspaceKey,
        source_root: SourceRootId,
        buckets: BucketSet,
        remapped: Option<RemappedBuckets>,
    ) -> Self {
        WorkspaceHandle {
            key,
            source_root,
            buckets,
            remapped,
        }
    }

    pub fn key(&self) -> WorkspaceKey {
        self.key
    }

    pub fn source_root(&self) -> &SourceRootId {
        &self.source_root
    }

    pub fn buckets(&self) -> &BucketSet {
        &self.buckets
    }

    pub fn bucket(&self, bucket: Bucket) -> &BucketId {
        self.buckets.get(bucket)
    }

    pub fn remapped(&self) -> Option<&RemappedBuckets> {
        self.remapped.as_ref()
    }
}

/// Source directories of a workspace, e.g. `src/shaders/neoforge/embeddium/java`.
pub fn source_dirs(platform: Platform, implementation: Implementation) -> (PathBuf, PathBuf) {
    let base = PathBuf::from(SOURCES_DIR)
        .join(platform.as_str())
        .join(implementation.as_str());
    (base.join("java"), base.join("resources"))
}

/// Creates workspaces on a host, at most once per [`WorkspaceKey`].
#[derive(Debug, Default)]
pub struct WorkspaceProvisioner {
    workspaces: BTreeMap<WorkspaceKey, Rc<WorkspaceHandle>>,
}

impl WorkspaceProvisioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the workspace for a pair, creating it on first request.
    ///
    /// Later calls with the same pair return the cached handle without
    /// touching the host.
    pub fn provision<H: BuildHost + ?Sized>(
        &mut self,
        host: &mut H,
        platform: Platform,
        implementation: Implementation,
    ) -> Result<Rc<WorkspaceHandle>> {
        let key = WorkspaceKey::new(platform, implementation);
        if let Some(existing) = self.workspaces.get(&key) {
            tracing::debug!("workspace {} already provisioned", key);
            return Ok(Rc::clone(existing));
        }

        let handle = Rc::new(
            create(host, key).with_context(|| format!("failed to provision workspace `{}`", key))?,
        );
        tracing::info!("provisioned workspace {}", key);
        self.workspaces.insert(key, Rc::clone(&handle));
        Ok(handle)
    }

    pub fn get(&self, key: &WorkspaceKey) -> Option<Rc<WorkspaceHandle>> {
        self.workspaces.get(key).cloned()
    }

    /// Provisioned workspaces in key order.
    pub fn workspaces(&self) -> impl Iterator<Item = &Rc<WorkspaceHandle>> {
        self.workspaces.values()
    }

    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }
}

fn create<H: BuildHost + ?Sized>(host: &mut H, key: WorkspaceKey) -> Result<WorkspaceHandle> {
    let root_name = key.naming_root();
    let (java_dir, resources_dir) = source_dirs(key.platform(), key.implementation());

    let source_root = host.source_root(&SourceRootSpec {
        name: root_name.clone(),
        java_dirs: vec![java_dir],
        resource_dirs: vec![resources_dir],
        extends: MAIN_SOURCE_ROOT.to_string(),
    })?;

    host.register_feature(&FeatureSpec {
        name: root_name,
        source_root: source_root.clone(),
        layered_on: MAIN_SOURCE_ROOT.to_string(),
        sources_artifact: true,
        javadoc_artifact: true,
    })?;

    let mut make_bucket = |kind: Bucket| {
        host.bucket(&BucketSpec {
            name: key.bucket_name(kind),
            kind,
            source_root: source_root.clone(),
            resolvable: kind == Bucket::StagedInstall,
            consumable: false,
        })
    };
    let buckets = BucketSet {
        compile_only: make_bucket(Bucket::CompileOnly)?,
        runtime_only: make_bucket(Bucket::RuntimeOnly)?,
        staged_install: make_bucket(Bucket::StagedInstall)?,
    };

    let remapped = if key.platform().requires_remapping() {
        let mut remap = |kind: Bucket| {
            host.remapped_bucket(&RemapSpec {
                name: key.remapped_bucket_name(kind),
                source: buckets.get(kind).clone(),
                source_root: source_root.clone(),
            })
        };
        Some(RemappedBuckets {
            compile_only: remap(Bucket::CompileOnly)?,
            runtime_only: remap(Bucket::RuntimeOnly)?,
        })
    } else {
        None
    };

    Ok(WorkspaceHandle::new(key, source_root, buckets, remapped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::BuildPlan;

    #[test]
    fn test_provision_is_idempotent() {
        let mut plan = BuildPlan::new();
        let mut provisioner = WorkspaceProvisioner::new();

        let first = provisioner
            .provision(&mut plan, Platform::NeoForge, Implementation::Embeddium)
            .unwrap();
        let created = plan.creations();
        let second = provisioner
            .provision(&mut plan, Platform::NeoForge, Implementation::Embeddium)
            .unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(plan.creations(), created);
        assert_eq!(provisioner.len(), 1);
    }

    #[test]
    fn test_neoforge_workspace_layout() {
        let mut plan = BuildPlan::new();
        let handle = WorkspaceProvisioner::new()
            .provision(&mut plan, Platform::NeoForge, Implementation::Embeddium)
            .unwrap();

        assert_eq!(handle.source_root().0, "neoforgeEmbeddium");
        assert_eq!(handle.bucket(Bucket::StagedInstall).0, "neoforgeEmbeddiumModDownloads");
        assert!(handle.remapped().is_none());

        let root = &plan.source_roots["neoforgeEmbeddium"];
        assert_eq!(
            root.java_dirs,
            vec![PathBuf::from("src/shaders/neoforge/embeddium/java")]
        );
        assert!(plan.features.contains_key("neoforgeEmbeddium"));
    }

    #[test]
    fn test_fabric_workspace_is_remapped() {
        let mut plan = BuildPlan::new();
        let handle = WorkspaceProvisioner::new()
            .provision(&mut plan, Platform::Fabric, Implementation::Sodium)
            .unwrap();

        let remapped = handle.remapped().unwrap();
        assert_eq!(remapped.compile_only.0, "modFabricSodiumCompileOnly");
        assert_eq!(remapped.runtime_only.0, "modFabricSodiumLocalRuntime");
        assert_eq!(
            plan.buckets["modFabricSodiumLocalRuntime"].remaps.as_ref().unwrap().0,
            "fabricSodiumLocalRuntime"
        );
    }
}
