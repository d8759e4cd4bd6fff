//! Artifact repositories that the generated coordinates resolve from.
//!
//! Resolving coordinates is the host's job; the engine only declares where
//! they live so the host can configure its repository list.

use anyhow::{Context, Result};
use serde::Serialize;
use url::Url;

/// A maven repository declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    /// Display name
    pub name: String,
    /// Repository root
    pub url: Url,
    /// When non-empty, the repository is used exclusively for these groups
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclusive_groups: Vec<String>,
}

impl Repository {
    pub fn new(name: impl Into<String>, url: &str) -> Result<Self> {
        let url = Url::parse(url).with_context(|| format!("invalid repository url: {}", url))?;
        Ok(Repository {
            name: name.into(),
            url,
            exclusive_groups: Vec::new(),
        })
    }

    /// Restrict the repository to the given group.
    pub fn exclusive_for(mut self, group: impl Into<String>) -> Self {
        self.exclusive_groups.push(group.into());
        self
    }
}

/// Repositories required by the built-in coordinate templates.
pub fn default_repositories() -> Result<Vec<Repository>> {
    Ok(vec![
        Repository::new("LDTTeam - Modding", "https://ldtteam.jfrog.io/ldtteam/modding/")?,
        Repository::new("Modrinth", "https://api.modrinth.com/maven")?
            .exclusive_for("maven.modrinth"),
        Repository::new("Su5ed", "https://maven.su5ed.dev/releases")?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_repositories() {
        let repos = default_repositories().unwrap();
        assert_eq!(repos.len(), 3);

        let modrinth = repos.iter().find(|r| r.name == "Modrinth").unwrap();
        assert_eq!(modrinth.exclusive_groups, vec!["maven.modrinth".to_string()]);
        assert_eq!(modrinth.url.host_str(), Some("api.modrinth.com"));
    }

    #[test]
    fn test_serializes_url_as_string() {
        let repo = Repository::new("Su5ed", "https://maven.su5ed.dev/releases").unwrap();
        let json = serde_json::to_value(&repo).unwrap();

        assert_eq!(json["url"], "https://maven.su5ed.dev/releases");
        assert!(json.get("exclusive_groups").is_none());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = Repository::new("broken", "not a url").unwrap_err();
        assert!(err.to_string().contains("invalid repository url"));
    }
}
