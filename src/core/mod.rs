//! Core data structures for obumbra.
//!
//! This module contains the foundational types used throughout obumbra:
//! - Platforms and renderer implementations
//! - Version slots and their values
//! - Coordinates and dependency buckets
//! - The selection state machine
//! - Workspace keys

pub mod coordinate;
pub mod implementation;
pub mod platform;
pub mod repository;
pub mod selection;
pub mod versions;
pub mod workspace_key;

pub use coordinate::{Bucket, Coordinate};
pub use implementation::Implementation;
pub use platform::Platform;
pub use repository::Repository;
pub use selection::{Selection, SelectionError, SelectionListener, SelectionState};
pub use versions::{VersionSet, VersionSlot};
pub use workspace_key::WorkspaceKey;
