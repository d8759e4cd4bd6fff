//! obumbra - shader compatibility build matrix for Minecraft mods
//!
//! Resolves a (platform, renderer implementation) selection into isolated
//! build workspaces, their dependency coordinates, run profiles and
//! staging tasks, and validates the selection against the compatibility
//! matrix.

pub mod core;
pub mod ops;
pub mod provision;
pub mod resolver;
pub mod util;

pub use core::{Implementation, Platform, Selection, VersionSet, VersionSlot, WorkspaceKey};
pub use ops::{Engine, Resolution};
pub use provision::{BuildHost, BuildPlan};
pub use resolver::ValidationError;
pub use util::context::GlobalContext;
