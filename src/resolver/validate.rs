//! Finalization-time validation of a selection against the matrix.
//!
//! Checks run in a fixed priority order:
//!
//! 1. platform set (terminal)
//! 2. at least one implementation (terminal)
//! 3. per implementation, stopping at its first problem:
//!    supported on the platform, then platform-wide slots, then the
//!    implementation's own slots in declared order.
//!
//! The enabled flag is not consulted here; callers skip validation for a
//! disabled selection.

use crate::core::{Implementation, Platform, SelectionState, VersionSet, VersionSlot};
use crate::resolver::errors::ValidationError;
use crate::resolver::matrix;

/// Validate a selection, returning the first error encountered.
pub fn validate(state: &SelectionState) -> Result<(), ValidationError> {
    let platform = selected_platform(state)?;

    for implementation in state.implementations() {
        check_implementation(platform, *implementation, state.versions())?;
    }

    Ok(())
}

/// Validate a selection, collecting at most one error per implementation.
///
/// The first element is always the error [`validate`] would return. A
/// platform-wide problem is reported once even if several implementations
/// hit it.
pub fn validate_all(state: &SelectionState) -> Vec<ValidationError> {
    let platform = match selected_platform(state) {
        Ok(platform) => platform,
        Err(e) => return vec![e],
    };

    let mut errors: Vec<ValidationError> = Vec::new();
    for implementation in state.implementations() {
        if let Err(e) = check_implementation(platform, *implementation, state.versions()) {
            if !errors.contains(&e) {
                errors.push(e);
            }
        }
    }
    errors
}

/// Steps 1 and 2: the terminal checks.
fn selected_platform(state: &SelectionState) -> Result<Platform, ValidationError> {
    let platform = state.platform().ok_or(ValidationError::PlatformMissing)?;
    if state.implementations().is_empty() {
        return Err(ValidationError::ImplementationMissing);
    }
    Ok(platform)
}

/// Step 3 for a single implementation.
pub fn check_implementation(
    platform: Platform,
    implementation: Implementation,
    versions: &VersionSet,
) -> Result<(), ValidationError> {
    let Some(own) = matrix::implementation_requirements(platform, implementation) else {
        return Err(ValidationError::ImplementationUnsupported {
            implementation,
            platform,
        });
    };

    if let Some(slot) = first_missing(matrix::platform_requirements(platform), versions) {
        return Err(ValidationError::RequiredVersionMissing {
            slot,
            platform,
            implementation: None,
        });
    }

    if let Some(slot) = first_missing(own, versions) {
        return Err(ValidationError::RequiredVersionMissing {
            slot,
            platform,
            implementation: Some(implementation),
        });
    }

    Ok(())
}

fn first_missing(slots: &[VersionSlot], versions: &VersionSet) -> Option<VersionSlot> {
    slots.iter().copied().find(|slot| !versions.is_present(*slot))
}
