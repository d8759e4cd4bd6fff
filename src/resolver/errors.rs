//! Validation error types and diagnostics.

use std::fmt::Display;

use thiserror::Error;

use crate::core::{Implementation, Platform, VersionSlot};
use crate::util::diagnostic::Diagnostic;

/// A configuration problem found at finalization.
///
/// Every variant is fatal. Each carries a stable machine-readable code, a
/// human message (its `Display`) and a remediation hint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("platform is required to be set")]
    PlatformMissing,

    #[error("at least one implementation is required to be set")]
    ImplementationMissing,

    #[error("{} is not supported on {}", .implementation.display_name(), .platform.display_name())]
    ImplementationUnsupported {
        implementation: Implementation,
        platform: Platform,
    },

    #[error("{} is required to be set", .slot.label())]
    RequiredVersionMissing {
        slot: VersionSlot,
        platform: Platform,
        /// `None` when the slot is a platform-wide requirement
        implementation: Option<Implementation>,
    },

    #[error("run profiles are required to stage {} artifacts", .implementation.display_name())]
    RunProfilesMissing { implementation: Implementation },
}

impl ValidationError {
    /// Stable machine-readable code.
    pub fn code(&self) -> String {
        match self {
            ValidationError::PlatformMissing => "shaders.platform.missing".to_string(),
            ValidationError::ImplementationMissing => "shaders.implementation.missing".to_string(),
            ValidationError::ImplementationUnsupported { .. } => {
                "shaders.implementation.unsupported".to_string()
            }
            ValidationError::RequiredVersionMissing { slot, .. } => {
                format!("shaders.versions.{}.missing", slot.key())
            }
            ValidationError::RunProfilesMissing { .. } => "shaders.runs.missing".to_string(),
        }
    }

    /// Human message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// What the user should change to fix the problem.
    pub fn remediation(&self) -> String {
        match self {
            ValidationError::PlatformMissing => {
                "Set `shaders.platform` to `fabric` or `neoforge`, or pass `--platform`".to_string()
            }
            ValidationError::ImplementationMissing => {
                "Add an implementation to `shaders.implementations`, or pass `--implementation`"
                    .to_string()
            }
            ValidationError::ImplementationUnsupported {
                implementation,
                platform,
            } => {
                let supported: Vec<_> = Implementation::ALL
                    .iter()
                    .filter(|i| i.supported_on(*platform))
                    .map(|i| i.as_str())
                    .collect();
                format!(
                    "Remove `{}` or select a supported implementation ({})",
                    implementation,
                    supported.join(", ")
                )
            }
            ValidationError::RequiredVersionMissing { slot, .. } => format!(
                "Set `shaders.versions.{}`, the `{}` property, or pass `--version-slot {}=<version>`",
                slot.key(),
                slot.property_key(),
                slot.key()
            ),
            ValidationError::RunProfilesMissing { .. } => {
                "Add a run profile under `[[shaders.runs]]` or the `compat.shaders.runs` property"
                    .to_string()
            }
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.message()).with_code(self.code());

        match self {
            ValidationError::ImplementationUnsupported {
                implementation,
                platform,
            } => {
                let platforms: Vec<_> = implementation
                    .supported_platforms()
                    .iter()
                    .map(|p| p.display_name())
                    .collect();
                diag = diag.with_context(format!(
                    "{} supports: {}",
                    implementation.display_name(),
                    platforms.join(", ")
                ));
                diag = diag.with_context(format!("selected platform: {}", platform.display_name()));
            }
            ValidationError::RequiredVersionMissing {
                platform,
                implementation,
                ..
            } => {
                let scope = match implementation {
                    Some(i) => format!("required by {} on {}", i.display_name(), platform.display_name()),
                    None => format!("required by every implementation on {}", platform.display_name()),
                };
                diag = diag.with_context(scope);
            }
            _ => {}
        }

        diag.with_suggestion(self.remediation())
    }
}

impl miette::Diagnostic for ValidationError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(ValidationError::code(self)))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.remediation()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ValidationError::PlatformMissing.code(), "shaders.platform.missing");
        assert_eq!(
            ValidationError::RequiredVersionMissing {
                slot: VersionSlot::SodiumFabricApi,
                platform: Platform::NeoForge,
                implementation: Some(Implementation::Sodium),
            }
            .code(),
            "shaders.versions.sodium.fabric_api.missing"
        );
    }

    #[test]
    fn test_unsupported_message() {
        let err = ValidationError::ImplementationUnsupported {
            implementation: Implementation::Embeddium,
            platform: Platform::Fabric,
        };
        assert_eq!(err.to_string(), "Embeddium is not supported on Fabric");
        assert!(err.remediation().contains("sodium"));

        let out = err.to_diagnostic().format(false);
        assert!(out.contains("Embeddium supports: NeoForge"));
        assert!(out.contains("[shaders.implementation.unsupported]"));
    }

    #[test]
    fn test_missing_version_remediation_names_all_surfaces() {
        let err = ValidationError::RequiredVersionMissing {
            slot: VersionSlot::IrisJcpp,
            platform: Platform::Fabric,
            implementation: None,
        };
        let hint = err.remediation();
        assert!(hint.contains("shaders.versions.iris.jcpp"));
        assert!(hint.contains("compat.shaders.versions.iris.jcpp"));
        assert!(hint.contains("--version-slot iris.jcpp=<version>"));
    }

    #[test]
    fn test_miette_diagnostic() {
        let err = ValidationError::ImplementationMissing;
        let code = miette::Diagnostic::code(&err).map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("shaders.implementation.missing"));
        assert!(miette::Diagnostic::help(&err).is_some());
    }
}
