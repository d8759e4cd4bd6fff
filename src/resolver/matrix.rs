//! The platform × implementation requirement matrix.
//!
//! A row keyed by `(platform, None)` lists requirements shared by every
//! implementation on that platform. A row keyed by
//! `(platform, Some(implementation))` lists the implementation's own
//! requirements, in the order they are checked. A pair without a row is
//! unsupported.

use crate::core::{Implementation, Platform, VersionSlot};

/// One row of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MatrixRow {
    platform: Platform,
    /// `None` for the platform-wide row
    implementation: Option<Implementation>,
    required: &'static [VersionSlot],
}

const MATRIX: &[MatrixRow] = &[
    MatrixRow {
        platform: Platform::Fabric,
        implementation: None,
        required: &[
            VersionSlot::Minecraft,
            VersionSlot::Iris,
            VersionSlot::IrisAntlr4Runtime,
            VersionSlot::IrisGlslTransformer,
            VersionSlot::IrisJcpp,
        ],
    },
    MatrixRow {
        platform: Platform::NeoForge,
        implementation: None,
        required: &[VersionSlot::Minecraft, VersionSlot::Iris],
    },
    MatrixRow {
        platform: Platform::Fabric,
        implementation: Some(Implementation::Sodium),
        required: &[VersionSlot::Sodium],
    },
    MatrixRow {
        platform: Platform::NeoForge,
        implementation: Some(Implementation::Sodium),
        required: &[
            VersionSlot::Sodium,
            VersionSlot::SodiumFabricApi,
            VersionSlot::SodiumFabricRenderer,
        ],
    },
    MatrixRow {
        platform: Platform::NeoForge,
        implementation: Some(Implementation::Embeddium),
        required: &[VersionSlot::Embeddium, VersionSlot::Monocle],
    },
];

/// Slots every implementation on `platform` requires.
pub fn platform_requirements(platform: Platform) -> &'static [VersionSlot] {
    MATRIX
        .iter()
        .find(|row| row.platform == platform && row.implementation.is_none())
        .map(|row| row.required)
        .unwrap_or(&[])
}

/// Slots the pair requires on top of the platform-wide ones.
///
/// Returns `None` when the pair has no row, i.e. is unsupported.
pub fn implementation_requirements(
    platform: Platform,
    implementation: Implementation,
) -> Option<&'static [VersionSlot]> {
    MATRIX
        .iter()
        .find(|row| row.platform == platform && row.implementation == Some(implementation))
        .map(|row| row.required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_agree_with_implementation_support() {
        for platform in Platform::ALL {
            for implementation in Implementation::ALL {
                assert_eq!(
                    implementation_requirements(platform, implementation).is_some(),
                    implementation.supported_on(platform),
                    "{} on {}",
                    implementation,
                    platform
                );
            }
        }
    }

    #[test]
    fn test_every_platform_has_a_wide_row() {
        for platform in Platform::ALL {
            assert_eq!(platform_requirements(platform)[0], VersionSlot::Minecraft);
        }
    }

    #[test]
    fn test_embeddium_requirements_order() {
        assert_eq!(
            platform_requirements(Platform::NeoForge),
            &[VersionSlot::Minecraft, VersionSlot::Iris]
        );
        assert_eq!(
            implementation_requirements(Platform::NeoForge, Implementation::Embeddium),
            Some(&[VersionSlot::Embeddium, VersionSlot::Monocle][..])
        );
    }

    #[test]
    fn test_unsupported_pair_has_no_row() {
        assert!(implementation_requirements(Platform::Fabric, Implementation::Embeddium).is_none());
    }
}
