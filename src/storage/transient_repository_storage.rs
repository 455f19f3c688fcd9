use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use futures::StreamExt;

use crate::relative_path::RelativePath;
use crate::storage::repository_storage::RepositoryStorage;
use crate::util::blob::{single_chunk, ByteStream};
use crate::util::checksums::{ChecksumAccumulator, Checksums};

/// in-memory repository storage, neither optimized nor particularly robust - for testing purposes
///
/// Only files are stored, containers exist implicitly as long as they have descendants.
pub struct TransientRepositoryStorage {
    files: Arc<Mutex<BTreeMap<RelativePath, Vec<u8>>>>,
}
impl TransientRepositoryStorage {
    pub fn new() -> TransientRepositoryStorage {
        TransientRepositoryStorage {
            files: Default::default(),
        }
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, BTreeMap<RelativePath, Vec<u8>>>> {
        self.files.lock()
            .map_err(|_| anyhow::anyhow!("transient storage is poisoned"))
    }
}

impl Default for TransientRepositoryStorage {
    fn default() -> Self {
        TransientRepositoryStorage::new()
    }
}

/// Whether `candidate` is strictly below `container`
fn is_descendant(container: &RelativePath, candidate: &RelativePath) -> bool {
    if container.is_root() {
        return !candidate.is_root();
    }
    candidate.as_str().len() > container.as_str().len()
        && candidate.as_str().starts_with(container.as_str())
        && candidate.as_str().as_bytes()[container.as_str().len()] == b'/'
}

#[async_trait]
impl RepositoryStorage for TransientRepositoryStorage {
    async fn exists(&self, path: &RelativePath) -> anyhow::Result<bool> {
        let is_file = self.lock()?.contains_key(path);
        Ok(is_file || self.is_container(path).await?)
    }

    async fn is_container(&self, path: &RelativePath) -> anyhow::Result<bool> {
        Ok(self.lock()?.keys().any(|p| is_descendant(path, p)))
    }

    async fn list(&self, path: &RelativePath) -> anyhow::Result<Vec<RelativePath>> {
        let files = self.lock()?;

        let prefix_len = if path.is_root() { 0 } else { path.as_str().len() + 1 };
        let mut names: Vec<&str> = files.keys()
            .filter(|p| is_descendant(path, p))
            .map(|p| {
                let relative = &p.as_str()[prefix_len..];
                relative.split('/').next().unwrap_or(relative)
            })
            .collect();
        names.sort();
        names.dedup();

        names.into_iter()
            .map(|name| path.join(name).map_err(anyhow::Error::from))
            .collect()
    }

    async fn read(&self, path: &RelativePath) -> anyhow::Result<Option<ByteStream>> {
        Ok(self.lock()?
            .get(path)
            .map(|data| single_chunk(data.clone())))
    }

    async fn write(&self, path: &RelativePath, data: ByteStream) -> anyhow::Result<Checksums> {
        if path.is_root() {
            return Err(anyhow::anyhow!("can not write to the repository root"));
        }

        let mut data = data;
        let mut data_vec = Vec::new();
        let mut checksums = ChecksumAccumulator::new();
        while let Some(bytes) = data.next().await {
            let bytes = bytes?;
            checksums.add_data(&bytes);
            data_vec.extend_from_slice(&bytes);
        }

        self.lock()?.insert(path.clone(), data_vec);
        Ok(checksums.finish())
    }

    async fn delete(&self, path: &RelativePath) -> anyhow::Result<bool> {
        let mut files = self.lock()?;
        let removed_file = files.remove(path).is_some();

        let before = files.len();
        files.retain(|p, _| !is_descendant(path, p));
        Ok(removed_file || files.len() != before)
    }
}
