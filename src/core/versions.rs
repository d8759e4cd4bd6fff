//! Named version slots and the opaque values assigned to them.
//!
//! Version strings are never interpreted. A slot is either present (holds a
//! non-blank string) or absent; that is the only property the rest of the
//! crate relies on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named version parameter.
///
/// The set of slots is fixed by the compatibility matrix; users cannot add
/// their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VersionSlot {
    #[serde(rename = "minecraft")]
    Minecraft,
    #[serde(rename = "sodium.version")]
    Sodium,
    #[serde(rename = "sodium.fabric_api")]
    SodiumFabricApi,
    #[serde(rename = "sodium.fabric_renderer")]
    SodiumFabricRenderer,
    #[serde(rename = "embeddium")]
    Embeddium,
    #[serde(rename = "monocle")]
    Monocle,
    #[serde(rename = "iris.version")]
    Iris,
    #[serde(rename = "iris.antlr4_runtime")]
    IrisAntlr4Runtime,
    #[serde(rename = "iris.glsl_transformer")]
    IrisGlslTransformer,
    #[serde(rename = "iris.jcpp")]
    IrisJcpp,
}

impl VersionSlot {
    pub const ALL: [VersionSlot; 10] = [
        VersionSlot::Minecraft,
        VersionSlot::Sodium,
        VersionSlot::SodiumFabricApi,
        VersionSlot::SodiumFabricRenderer,
        VersionSlot::Embeddium,
        VersionSlot::Monocle,
        VersionSlot::Iris,
        VersionSlot::IrisAntlr4Runtime,
        VersionSlot::IrisGlslTransformer,
        VersionSlot::IrisJcpp,
    ];

    /// Stable dotted key, used on the command line and in diagnostics.
    pub fn key(&self) -> &'static str {
        match self {
            VersionSlot::Minecraft => "minecraft",
            VersionSlot::Sodium => "sodium.version",
            VersionSlot::SodiumFabricApi => "sodium.fabric_api",
            VersionSlot::SodiumFabricRenderer => "sodium.fabric_renderer",
            VersionSlot::Embeddium => "embeddium",
            VersionSlot::Monocle => "monocle",
            VersionSlot::Iris => "iris.version",
            VersionSlot::IrisAntlr4Runtime => "iris.antlr4_runtime",
            VersionSlot::IrisGlslTransformer => "iris.glsl_transformer",
            VersionSlot::IrisJcpp => "iris.jcpp",
        }
    }

    /// Project property that supplies the slot's conventional value.
    pub fn property_key(&self) -> &'static str {
        match self {
            VersionSlot::Minecraft => "minecraft.version",
            VersionSlot::Sodium => "compat.shaders.versions.sodium.version",
            VersionSlot::SodiumFabricApi => "compat.shaders.versions.sodium.fabric.api",
            VersionSlot::SodiumFabricRenderer => "compat.shaders.versions.sodium.fabric.renderer",
            VersionSlot::Embeddium => "compat.shaders.versions.embeddium",
            VersionSlot::Monocle => "compat.shaders.versions.monocle",
            VersionSlot::Iris => "compat.shaders.versions.iris.version",
            VersionSlot::IrisAntlr4Runtime => "compat.shaders.versions.iris.antlr4.runtime",
            VersionSlot::IrisGlslTransformer => "compat.shaders.versions.iris.glsl.transformer",
            VersionSlot::IrisJcpp => "compat.shaders.versions.iris.jcpp",
        }
    }

    /// Human-readable label for messages.
    pub fn label(&self) -> &'static str {
        match self {
            VersionSlot::Minecraft => "Minecraft version",
            VersionSlot::Sodium => "Sodium version",
            VersionSlot::SodiumFabricApi => "Sodium Fabric API version",
            VersionSlot::SodiumFabricRenderer => "Sodium Fabric Renderer version",
            VersionSlot::Embeddium => "Embeddium version",
            VersionSlot::Monocle => "Monocle version",
            VersionSlot::Iris => "Iris version",
            VersionSlot::IrisAntlr4Runtime => "Iris Antlr4 Runtime version",
            VersionSlot::IrisGlslTransformer => "Iris GLSL Transformer version",
            VersionSlot::IrisJcpp => "Iris JCpp version",
        }
    }
}

impl std::fmt::Display for VersionSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for VersionSlot {
    type Err = VersionSlotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        VersionSlot::ALL
            .into_iter()
            .find(|slot| slot.key() == needle || slot.property_key() == needle)
            .ok_or_else(|| VersionSlotParseError(s.to_string()))
    }
}

/// Error returned when a version slot name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown version slot '{0}'")]
pub struct VersionSlotParseError(pub String);

/// Values assigned to version slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionSet {
    values: BTreeMap<VersionSlot, String>,
}

impl VersionSet {
    pub fn new() -> Self {
        VersionSet {
            values: BTreeMap::new(),
        }
    }

    /// Assign a slot. Blank values clear it; anything else is stored as given.
    pub fn set(&mut self, slot: VersionSlot, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.values.remove(&slot);
        } else {
            self.values.insert(slot, value);
        }
    }

    /// Builder form of [`VersionSet::set`].
    pub fn with(mut self, slot: VersionSlot, value: impl Into<String>) -> Self {
        self.set(slot, value);
        self
    }

    pub fn clear(&mut self, slot: VersionSlot) {
        self.values.remove(&slot);
    }

    pub fn get(&self, slot: VersionSlot) -> Option<&str> {
        self.values.get(&slot).map(String::as_str)
    }

    pub fn is_present(&self, slot: VersionSlot) -> bool {
        self.values.contains_key(&slot)
    }

    /// Present slots in key order.
    pub fn iter(&self) -> impl Iterator<Item = (VersionSlot, &str)> {
        self.values.iter().map(|(slot, v)| (*slot, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay another set onto this one (other takes precedence).
    pub fn merge(&mut self, other: &VersionSet) {
        for (slot, value) in other.iter() {
            self.set(slot, value);
        }
    }
}
