//! Compatibility resolution.
//!
//! The requirement matrix, the validator that walks it, and the coordinate
//! templates that turn a valid pair into dependency coordinates.

pub mod errors;
pub mod matrix;
pub mod templates;
pub mod validate;

pub use errors::ValidationError;
pub use templates::coordinates;
pub use validate::{validate, validate_all};
