//! Optional renderer implementations that shader support can be built against.

use serde::{Deserialize, Serialize};

use crate::core::Platform;

/// A renderer implementation.
///
/// Each variant carries its own platform support and staging rules; the
/// compatibility matrix and coordinate templates dispatch on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Implementation {
    /// Sodium, available on every platform
    Sodium,
    /// Embeddium, a NeoForge-only Sodium fork
    Embeddium,
}

impl Implementation {
    /// All implementations, in declaration order.
    pub const ALL: [Implementation; 2] = [Implementation::Sodium, Implementation::Embeddium];

    /// Get the implementation name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Implementation::Sodium => "sodium",
            Implementation::Embeddium => "embeddium",
        }
    }

    /// Human-readable implementation name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Implementation::Sodium => "Sodium",
            Implementation::Embeddium => "Embeddium",
        }
    }

    /// Check whether this implementation can be used on a platform.
    pub fn supported_on(&self, platform: Platform) -> bool {
        match self {
            Implementation::Sodium => true,
            Implementation::Embeddium => platform.is_neoforge(),
        }
    }

    /// Whether the shader loader must be staged into the run directory
    /// instead of resolved onto the runtime classpath.
    ///
    /// Embeddium is paired with Monocle, whose transformer only works when
    /// Iris is loaded from the mods directory.
    pub fn requires_staged_install(&self) -> bool {
        matches!(self, Implementation::Embeddium)
    }

    /// Platforms this implementation supports.
    pub fn supported_platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.supported_on(*p))
            .collect()
    }
}

impl std::fmt::Display for Implementation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Implementation {
    type Err = ImplementationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sodium" => Ok(Implementation::Sodium),
            "embeddium" => Ok(Implementation::Embeddium),
            _ => Err(ImplementationParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown implementation name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid implementation '{0}', valid values: sodium, embeddium")]
pub struct ImplementationParseError(pub String);
