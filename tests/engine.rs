//! Behavioural tests for the selection, validation and provisioning
//! pipeline, driven through the public library API.

use std::rc::Rc;

use anyhow::Result;

use obumbra::core::{
    Bucket, Coordinate, Implementation, Platform, Selection, SelectionListener, SelectionState,
    VersionSet, VersionSlot, WorkspaceKey,
};
use obumbra::provision::{BuildPlan, WorkspaceProvisioner};
use obumbra::resolver::templates;
use obumbra::resolver::{validate, ValidationError};
use obumbra::Engine;

#[derive(Default)]
struct Recorder {
    calls: Vec<WorkspaceKey>,
}

impl SelectionListener for Recorder {
    fn on_ready(&mut self, state: &SelectionState, implementation: Implementation) -> Result<()> {
        let platform = state.platform().expect("dispatched without a platform");
        self.calls.push(WorkspaceKey::new(platform, implementation));
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
enum Step {
    Enable,
    Platform,
    Implementation,
}

fn apply(selection: &mut Selection<Recorder>, step: Step) {
    match step {
        Step::Enable => selection.enable().unwrap(),
        Step::Platform => selection.neoforge().unwrap(),
        Step::Implementation => selection.embeddium().unwrap(),
    }
}

fn full_versions() -> VersionSet {
    VersionSet::new()
        .with(VersionSlot::Minecraft, "1.21.1")
        .with(VersionSlot::Sodium, "0.6.0")
        .with(VersionSlot::SodiumFabricApi, "0.4.42")
        .with(VersionSlot::SodiumFabricRenderer, "3.4.0")
        .with(VersionSlot::Embeddium, "1.0.11")
        .with(VersionSlot::Monocle, "0.1.6")
        .with(VersionSlot::Iris, "1.8.0")
        .with(VersionSlot::IrisAntlr4Runtime, "4.13.1")
        .with(VersionSlot::IrisGlslTransformer, "2.0.1")
        .with(VersionSlot::IrisJcpp, "1.4.14")
}

fn validation_error(err: anyhow::Error) -> ValidationError {
    err.downcast::<ValidationError>()
        .expect("expected a validation error")
}

#[test]
fn test_every_mutation_order_dispatches_once() {
    use Step::*;
    let orders = [
        [Enable, Platform, Implementation],
        [Enable, Implementation, Platform],
        [Platform, Enable, Implementation],
        [Platform, Implementation, Enable],
        [Implementation, Enable, Platform],
        [Implementation, Platform, Enable],
    ];

    for order in orders {
        let mut selection = Selection::new(Recorder::default());
        for step in order {
            apply(&mut selection, step);
        }
        // Repeating a setter after readiness must not dispatch again.
        apply(&mut selection, order[0]);

        assert_eq!(
            selection.listener().calls,
            vec![WorkspaceKey::new(obumbra::core::Platform::NeoForge, obumbra::core::Implementation::Embeddium)],
            "order {:?}",
            order
        );
    }
}

#[test]
fn test_not_ready_never_dispatches() {
    let mut selection = Selection::new(Recorder::default());
    selection.neoforge().unwrap();
    selection.embeddium().unwrap();
    selection.sodium().unwrap();
    assert!(selection.listener().calls.is_empty());

    selection.enable().unwrap();
    assert_eq!(selection.listener().calls.len(), 2);
}

#[test]
fn test_provision_returns_same_handle() {
    let mut plan = BuildPlan::new();
    let mut provisioner = WorkspaceProvisioner::new();

    let first = provisioner
        .provision(&mut plan, Platform::Fabric, Implementation::Sodium)
        .unwrap();
    let creations = plan.creations();
    let second = provisioner
        .provision(&mut plan, Platform::Fabric, Implementation::Sodium)
        .unwrap();

    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(plan.creations(), creations);
    assert_eq!(provisioner.len(), 1);
}

#[test]
fn test_unsupported_pair_reports_no_version_errors() {
    let mut selection = Selection::new(Recorder::default());
    selection.enable().unwrap();
    selection.fabric().unwrap();
    selection.embeddium().unwrap();

    assert_eq!(
        validate(selection.finalize()),
        Err(ValidationError::ImplementationUnsupported {
            implementation: Implementation::Embeddium,
            platform: Platform::Fabric,
        })
    );
}

#[test]
fn test_platform_wide_slot_reported_before_own_slot() {
    let mut selection = Selection::new(Recorder::default());
    selection.enable().unwrap();
    selection.neoforge().unwrap();
    selection.sodium().unwrap();
    selection
        .set_version(VersionSlot::Minecraft, "1.21.1")
        .unwrap();

    assert_eq!(
        validate(selection.finalize()),
        Err(ValidationError::RequiredVersionMissing {
            slot: VersionSlot::Iris,
            platform: Platform::NeoForge,
            implementation: None,
        })
    );
}

#[test]
fn test_templates_do_not_depend_on_call_history() {
    let versions = full_versions();
    let before = templates::coordinates(Platform::Fabric, Implementation::Sodium, &versions);
    let _ = templates::coordinates(Platform::NeoForge, Implementation::Embeddium, &versions);
    let after = templates::coordinates(Platform::Fabric, Implementation::Sodium, &versions);
    assert_eq!(before, after);
}

#[test]
fn test_staged_implementation_keeps_loader_off_runtime_classpath() {
    let entries = templates::coordinates(
        Platform::NeoForge,
        Implementation::Embeddium,
        &full_versions(),
    );

    let iris: Vec<Bucket> = entries
        .iter()
        .filter(|(c, _)| c.module() == "maven.modrinth:iris")
        .map(|(_, b)| *b)
        .collect();
    assert!(iris.contains(&Bucket::StagedInstall));
    assert!(!iris.contains(&Bucket::RuntimeOnly));

    let sodium = templates::coordinates(Platform::NeoForge, Implementation::Sodium, &full_versions());
    assert!(sodium
        .iter()
        .all(|(_, b)| *b != Bucket::StagedInstall));
}

#[test]
fn test_disabled_selection_provisions_nothing() {
    let mut engine = Engine::new(BuildPlan::new()).unwrap();
    {
        let selection = engine.selection_mut();
        selection.neoforge().unwrap();
        selection.embeddium().unwrap();
        selection.set_versions(&full_versions()).unwrap();
    }

    let resolution = engine.finalize().unwrap();
    assert!(!resolution.enabled);
    assert!(resolution.workspaces.is_empty());
    assert_eq!(engine.host().creations(), 0);
    assert!(engine.host().buckets.is_empty());
    assert_eq!(engine.selection().dispatched().count(), 0);
}

#[test]
fn test_two_implementations_stay_isolated() {
    let mut engine = Engine::new(BuildPlan::new()).unwrap();
    {
        let selection = engine.selection_mut();
        selection.set_versions(&full_versions()).unwrap();
        selection.enable().unwrap();
        selection.neoforge().unwrap();
        selection.sodium().unwrap();
        selection.embeddium().unwrap();
    }

    let resolution = engine.finalize().unwrap();
    let keys: Vec<String> = resolution
        .workspaces
        .iter()
        .map(|ws| ws.key.canonical())
        .collect();
    assert_eq!(keys, vec!["neoforge-sodium", "neoforge-embeddium"]);

    let plan = engine.host();
    let monocle = Coordinate::new("maven.modrinth:monocle-iris:0.1.6");
    assert!(plan.coordinates("neoforgeEmbeddiumModDownloads").contains(&monocle));
    assert!(plan.coordinates("neoforgeSodiumModDownloads").is_empty());
    assert!(!plan
        .coordinates("neoforgeSodiumCompileOnly")
        .iter()
        .any(|c| c.module() == "maven.modrinth:embeddium"));
    assert!(!plan
        .coordinates("neoforgeEmbeddiumCompileOnly")
        .iter()
        .any(|c| c.module() == "maven.modrinth:sodium"));

    assert!(resolution
        .workspace(Implementation::Sodium)
        .unwrap()
        .staging
        .is_empty());
    assert_eq!(
        resolution
            .workspace(Implementation::Embeddium)
            .unwrap()
            .staging
            .len(),
        1
    );
}

#[test]
fn test_finalize_surfaces_first_validation_error() {
    let mut engine = Engine::new(BuildPlan::new()).unwrap();
    {
        let selection = engine.selection_mut();
        selection.enable().unwrap();
        selection.fabric().unwrap();
        selection.sodium().unwrap();
        selection.embeddium().unwrap();
    }

    let err = validation_error(engine.finalize().unwrap_err());
    assert_eq!(
        err,
        ValidationError::RequiredVersionMissing {
            slot: VersionSlot::Minecraft,
            platform: Platform::Fabric,
            implementation: None,
        }
    );
    assert!(engine.selection_mut().sodium().is_err());
}
