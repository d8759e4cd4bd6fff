//! Selection state - the user's accumulated shader configuration.
//!
//! Mutations arrive in any order (from property conventions, config files and
//! command-line flags). Every setter funnels into a single transition,
//! `reconcile`, which notifies the listener the moment the
//! selection becomes ready:
//!
//! ```text
//! ready = enabled && platform.is_some() && !implementations.is_empty()
//! ```
//!
//! Each (platform, implementation) pair is dispatched exactly once. Dispatch
//! is synchronous and completes before the setter returns.
//!
//! Switching platform after pairs were dispatched dispatches the new pairs
//! but does not retract anything already provisioned for the old platform.

use std::collections::BTreeSet;

use anyhow::Result;
use thiserror::Error;

use crate::core::{Implementation, Platform, VersionSet, VersionSlot, WorkspaceKey};

/// Errors raised by selection setters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("selection is finalized and can no longer be changed")]
    Finalized,
}

/// Receives a notification for every pair that becomes ready.
pub trait SelectionListener {
    /// Called once per (platform, implementation) pair.
    fn on_ready(&mut self, selection: &SelectionState, implementation: Implementation)
        -> Result<()>;
}

impl<F> SelectionListener for F
where
    F: FnMut(&SelectionState, Implementation) -> Result<()>,
{
    fn on_ready(
        &mut self,
        selection: &SelectionState,
        implementation: Implementation,
    ) -> Result<()> {
        self(selection, implementation)
    }
}

/// The plain data behind a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    enabled: bool,
    platform: Option<Platform>,
    implementations: BTreeSet<Implementation>,
    versions: VersionSet,
}

impl SelectionState {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn platform(&self) -> Option<Platform> {
        self.platform
    }

    /// Selected implementations, Sodium before Embeddium.
    pub fn implementations(&self) -> &BTreeSet<Implementation> {
        &self.implementations
    }

    pub fn versions(&self) -> &VersionSet {
        &self.versions
    }

    /// The readiness predicate.
    pub fn is_ready(&self) -> bool {
        self.enabled && self.platform.is_some() && !self.implementations.is_empty()
    }
}

/// A selection with readiness-gated dispatch to a listener.
pub struct Selection<L> {
    state: SelectionState,
    listener: L,
    dispatched: BTreeSet<WorkspaceKey>,
    finalized: bool,
}

impl<L: SelectionListener> Selection<L> {
    /// Create an empty, disabled selection.
    pub fn new(listener: L) -> Self {
        Selection {
            state: SelectionState::default(),
            listener,
            dispatched: BTreeSet::new(),
            finalized: false,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Consume the selection, returning its state and listener.
    pub fn into_parts(self) -> (SelectionState, L) {
        (self.state, self.listener)
    }

    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Pairs that have already been dispatched.
    pub fn dispatched(&self) -> impl Iterator<Item = &WorkspaceKey> {
        self.dispatched.iter()
    }

    pub fn set_enabled(&mut self, enabled: bool) -> Result<()> {
        self.ensure_mutable()?;
        self.state.enabled = enabled;
        self.reconcile()
    }

    pub fn enable(&mut self) -> Result<()> {
        self.set_enabled(true)
    }

    /// Disable the selection. Nothing already dispatched is retracted.
    pub fn disable(&mut self) -> Result<()> {
        self.set_enabled(false)
    }

    pub fn set_platform(&mut self, platform: Platform) -> Result<()> {
        self.ensure_mutable()?;

        if let Some(previous) = self.state.platform {
            let stale = self.dispatched.iter().any(|k| k.platform() == previous);
            if previous != platform && stale {
                tracing::warn!(
                    "platform changed from {} to {} after workspaces were provisioned; \
                     existing {} workspaces are kept",
                    previous,
                    platform,
                    previous
                );
            }
        }

        self.state.platform = Some(platform);
        self.reconcile()
    }

    pub fn fabric(&mut self) -> Result<()> {
        self.set_platform(Platform::Fabric)
    }

    pub fn neoforge(&mut self) -> Result<()> {
        self.set_platform(Platform::NeoForge)
    }

    /// Add an implementation. Adding one that is already selected is a no-op.
    pub fn add_implementation(&mut self, implementation: Implementation) -> Result<()> {
        self.ensure_mutable()?;
        self.state.implementations.insert(implementation);
        self.reconcile()
    }

    pub fn sodium(&mut self) -> Result<()> {
        self.add_implementation(Implementation::Sodium)
    }

    pub fn embeddium(&mut self) -> Result<()> {
        self.add_implementation(Implementation::Embeddium)
    }

    pub fn set_version(&mut self, slot: VersionSlot, value: impl Into<String>) -> Result<()> {
        self.ensure_mutable()?;
        self.state.versions.set(slot, value);
        self.reconcile()
    }

    pub fn clear_version(&mut self, slot: VersionSlot) -> Result<()> {
        self.ensure_mutable()?;
        self.state.versions.clear(slot);
        self.reconcile()
    }

    /// Apply every present slot of `versions`.
    pub fn set_versions(&mut self, versions: &VersionSet) -> Result<()> {
        self.ensure_mutable()?;
        self.state.versions.merge(versions);
        self.reconcile()
    }

    /// Freeze the selection and hand out its final state.
    ///
    /// Further mutation fails with [`SelectionError::Finalized`].
    pub fn finalize(&mut self) -> &SelectionState {
        self.finalized = true;
        &self.state
    }

    /// Dispatch every ready pair that has not been dispatched yet.
    ///
    /// No-op while the selection is not ready. A pair is recorded before its
    /// listener call, so a failing listener is never retried for that pair.
    fn reconcile(&mut self) -> Result<()> {
        if !self.state.is_ready() {
            return Ok(());
        }
        let Some(platform) = self.state.platform else {
            return Ok(());
        };

        let pending: Vec<Implementation> = self
            .state
            .implementations
            .iter()
            .copied()
            .filter(|i| !self.dispatched.contains(&WorkspaceKey::new(platform, *i)))
            .collect();

        for implementation in pending {
            let key = WorkspaceKey::new(platform, implementation);
            self.dispatched.insert(key);
            tracing::debug!("selection ready, dispatching {}", key);
            self.listener.on_ready(&self.state, implementation)?;
        }

        Ok(())
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.finalized {
            return Err(SelectionError::Finalized.into());
        }
        Ok(())
    }
}

impl<L> std::fmt::Debug for Selection<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selection")
            .field("state", &self.state)
            .field("dispatched", &self.dispatched)
            .field("finalized", &self.finalized)
            .finish()
    }
}
