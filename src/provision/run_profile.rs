//! Launch/run profile derivation.
//!
//! Each workspace gets a client profile that launches the game with its
//! renderer and shader loader on board. The engine only names working
//! directories; creating them is up to the host.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::workspace_key::capitalize;
use crate::core::{Implementation, Platform};
use crate::provision::host::SourceRootId;
use crate::provision::WorkspaceHandle;

/// Profile every derived profile inherits from.
pub const BASE_PROFILE: &str = "client";

/// A request to look up or create a run profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunProfileSpec {
    pub name: String,
    /// Profile whose settings are copied
    pub inherits: Option<String>,
    /// Source root added to the profile's mod sources
    pub source_root: Option<SourceRootId>,
    /// Working directory; `None` keeps the inherited or default one
    pub working_dir: Option<PathBuf>,
    /// Suffix appended to the inherited IDE run name
    pub ide_name_suffix: Option<String>,
    /// New working directory for the inherited profile, so the plain client
    /// and the shader client do not share a run directory
    pub relocate_base: Option<PathBuf>,
}

impl RunProfileSpec {
    /// A reference to a plain, user-named profile.
    pub fn named(name: impl Into<String>, working_dir: Option<PathBuf>) -> Self {
        RunProfileSpec {
            name: name.into(),
            inherits: None,
            source_root: None,
            working_dir,
            ide_name_suffix: None,
            relocate_base: None,
        }
    }
}

/// A run profile as known to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProfile {
    pub name: String,
    pub working_dir: PathBuf,
}

/// Name of the profile derived for a workspace, e.g. `clientWithSodiumShaders`.
pub fn profile_name(handle: &WorkspaceHandle) -> String {
    format!(
        "{}With{}Shaders",
        BASE_PROFILE,
        handle.key().implementation().display_name()
    )
}

/// Derive the client profile for a workspace.
///
/// On NeoForge every shader profile gets its own directory under
/// `runs/client`, and the plain client moves to `runs/client/no-shader`.
/// On Fabric the profile shares the inherited client directory.
pub fn derive(handle: &WorkspaceHandle) -> RunProfileSpec {
    let implementation = handle.key().implementation();
    let mut spec = RunProfileSpec {
        name: profile_name(handle),
        inherits: Some(BASE_PROFILE.to_string()),
        source_root: Some(handle.source_root().clone()),
        working_dir: None,
        ide_name_suffix: None,
        relocate_base: None,
    };

    match handle.key().platform() {
        Platform::Fabric => {}
        Platform::NeoForge => {
            spec.working_dir = Some(
                PathBuf::from("runs")
                    .join(BASE_PROFILE)
                    .join(format!("{}-shader", implementation.as_str())),
            );
            spec.relocate_base = Some(PathBuf::from("runs").join(BASE_PROFILE).join("no-shader"));
            spec.ide_name_suffix = Some(format!(" with {} shaders", implementation.display_name()));
        }
    }

    spec
}

/// Name of the staging task for a run, e.g. `installModsClientWithEmbeddiumShaders`.
///
/// Runs shared by several implementations pass the implementation, which
/// becomes a suffix: `installModsGametestForEmbeddium`.
pub fn staging_task_name(run: &RunProfile, shared_by: Option<Implementation>) -> String {
    match shared_by {
        Some(implementation) => format!(
            "installMods{}For{}",
            capitalize(&run.name),
            implementation.display_name()
        ),
        None => format!("installMods{}", capitalize(&run.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WorkspaceKey;
    use crate::provision::BucketSet;

    fn handle(platform: Platform, implementation: Implementation) -> WorkspaceHandle {
        let key = WorkspaceKey::new(platform, implementation);
        WorkspaceHandle::new(
            key,
            SourceRootId(key.naming_root()),
            BucketSet::named(&key),
            None,
        )
    }

    #[test]
    fn test_neoforge_profile_gets_own_directory() {
        let spec = derive(&handle(Platform::NeoForge, Implementation::Embeddium));

        assert_eq!(spec.name, "clientWithEmbeddiumShaders");
        assert_eq!(spec.inherits.as_deref(), Some("client"));
        assert_eq!(
            spec.working_dir,
            Some(PathBuf::from("runs/client/embeddium-shader"))
        );
        assert_eq!(spec.relocate_base, Some(PathBuf::from("runs/client/no-shader")));
        assert_eq!(spec.ide_name_suffix.as_deref(), Some(" with Embeddium shaders"));
    }

    #[test]
    fn test_fabric_profile_inherits_directory() {
        let spec = derive(&handle(Platform::Fabric, Implementation::Sodium));

        assert_eq!(spec.name, "clientWithSodiumShaders");
        assert!(spec.working_dir.is_none());
        assert!(spec.relocate_base.is_none());
        assert_eq!(spec.source_root, Some(SourceRootId("fabricSodium".into())));
    }

    #[test]
    fn test_staging_task_name() {
        let run = RunProfile {
            name: "clientWithEmbeddiumShaders".into(),
            working_dir: PathBuf::from("runs/client/embeddium-shader"),
        };
        assert_eq!(
            staging_task_name(&run, None),
            "installModsClientWithEmbeddiumShaders"
        );

        let shared = RunProfile {
            name: "gametest".into(),
            working_dir: PathBuf::from("runs/gametest"),
        };
        assert_eq!(
            staging_task_name(&shared, Some(Implementation::Embeddium)),
            "installModsGametestForEmbeddium"
        );
    }
}
