use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::maven::layout::Layout;
use crate::maven::repository_content::RepositoryContent;
use crate::storage::FsRepositoryStorage;

/// A managed repository on the local file system, e.g.
///
/// ```json
/// { "id": "internal", "root": "/var/repositories/internal", "layout": "legacy" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub id: String,
    pub root: PathBuf,
    #[serde(default)]
    pub layout: Layout,
}

impl RepositoryConfig {
    pub fn from_json(json: &str) -> anyhow::Result<RepositoryConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn load(path: &Path) -> anyhow::Result<RepositoryConfig> {
        let json = tokio::fs::read_to_string(path).await
            .map_err(|e| anyhow::anyhow!("failed to read repository configuration {}: {}", path.display(), e))?;
        RepositoryConfig::from_json(&json)
    }

    pub fn open(&self) -> RepositoryContent<FsRepositoryStorage> {
        RepositoryContent::new(self.id.clone(), self.layout, Arc::new(FsRepositoryStorage::new(&self.root)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_json() {
        let config = RepositoryConfig::from_json(r#"{"id": "internal", "root": "/var/repo", "layout": "legacy"}"#).unwrap();
        assert_eq!(config, RepositoryConfig {
            id: "internal".to_string(),
            root: PathBuf::from("/var/repo"),
            layout: Layout::Legacy,
        });
    }

    #[test]
    fn test_layout_defaults_to_default() {
        let config = RepositoryConfig::from_json(r#"{"id": "central", "root": "repo"}"#).unwrap();
        assert_eq!(config.layout, Layout::Default);
    }

    #[test]
    fn test_unknown_layout() {
        assert!(RepositoryConfig::from_json(r#"{"id": "x", "root": "repo", "layout": "maven3"}"#).is_err());
    }

    #[tokio::test]
    async fn test_load_and_open() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("repository.json");
        let json = serde_json::to_string(&RepositoryConfig {
            id: "internal".to_string(),
            root: dir.path().join("repo"),
            layout: Layout::Default,
        }).unwrap();
        tokio::fs::write(&config_path, json).await.unwrap();

        let repo = RepositoryConfig::load(&config_path).await.unwrap().open();
        assert_eq!(repo.id(), "internal");
        assert_eq!(repo.storage().root(), dir.path().join("repo"));
        assert!(repo.discover_artifacts().await.unwrap().is_empty());

        assert!(RepositoryConfig::load(&dir.path().join("missing.json")).await.is_err());
    }
}
