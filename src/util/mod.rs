//! Shared utilities

pub mod config;
pub mod context;
pub mod diagnostic;
pub mod fs;
pub mod properties;

pub use config::Config;
pub use context::GlobalContext;
pub use diagnostic::Diagnostic;
pub use properties::Properties;
