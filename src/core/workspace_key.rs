//! Canonical identity of a (platform, implementation) workspace.

use serde::{Serialize, Serializer};

use crate::core::{Bucket, Implementation, Platform};

/// Identifies everything provisioned for one platform/implementation pair.
///
/// The key is both the idempotency key of the provisioner and the naming
/// root for every bucket, feature and directory created for the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkspaceKey {
    platform: Platform,
    implementation: Implementation,
}

impl WorkspaceKey {
    pub fn new(platform: Platform, implementation: Implementation) -> Self {
        WorkspaceKey {
            platform,
            implementation,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn implementation(&self) -> Implementation {
        self.implementation
    }

    /// Canonical string form, e.g. `neoforge-embeddium`.
    pub fn canonical(&self) -> String {
        format!("{}-{}", self.platform.as_str(), self.implementation.as_str())
    }

    /// camelCase naming root, e.g. `neoforgeEmbeddium`.
    pub fn naming_root(&self) -> String {
        format!(
            "{}{}",
            self.platform.as_str(),
            capitalize(self.implementation.as_str())
        )
    }

    /// Name of the host bucket holding `bucket` for this workspace.
    pub fn bucket_name(&self, bucket: Bucket) -> String {
        format!("{}{}", self.naming_root(), bucket.suffix())
    }

    /// Name of the remapped view of `bucket`.
    pub fn remapped_bucket_name(&self, bucket: Bucket) -> String {
        format!("mod{}{}", capitalize(&self.naming_root()), bucket.suffix())
    }
}

impl std::fmt::Display for WorkspaceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.platform, self.implementation)
    }
}

impl Serialize for WorkspaceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

/// Upper-case the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
