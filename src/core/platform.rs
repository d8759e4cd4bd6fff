//! Supported mod-loader platforms.

use serde::{Deserialize, Serialize};

/// A build target platform.
///
/// Platforms are a closed set: every platform knows how its run profiles are
/// laid out and whether its toolchain needs remapped dependency buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Fabric, built with Loom
    Fabric,
    /// NeoForge, built with NeoGradle
    NeoForge,
}

impl Platform {
    /// All platforms, in declaration order.
    pub const ALL: [Platform; 2] = [Platform::Fabric, Platform::NeoForge];

    /// Get the platform name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Fabric => "fabric",
            Platform::NeoForge => "neoforge",
        }
    }

    /// Human-readable platform name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Fabric => "Fabric",
            Platform::NeoForge => "NeoForge",
        }
    }

    pub fn is_fabric(&self) -> bool {
        matches!(self, Platform::Fabric)
    }

    pub fn is_neoforge(&self) -> bool {
        matches!(self, Platform::NeoForge)
    }

    /// Whether dependency buckets need a remapped view.
    ///
    /// Loom consumes mod dependencies through remap configurations, so on
    /// Fabric every compile and runtime bucket gets a bridged counterpart.
    pub fn requires_remapping(&self) -> bool {
        self.is_fabric()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fabric" => Ok(Platform::Fabric),
            "neoforge" | "neo-forge" => Ok(Platform::NeoForge),
            _ => Err(PlatformParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown platform name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid platform '{0}', valid values: fabric, neoforge")]
pub struct PlatformParseError(pub String);
