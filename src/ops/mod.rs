//! High-level operations.
//!
//! This module contains the engine and the operations behind the obumbra
//! commands.

pub mod configure;
pub mod engine;
pub mod stage;

pub use configure::{apply_selection, engine_from_config};
pub use engine::{CoordinateEntry, Engine, EngineOptions, Provisioning, Resolution, ResolvedWorkspace};
pub use stage::{stage_files, tasks_for_run};
