use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use tokio::fs::{create_dir_all, metadata, OpenOptions, read_dir, remove_dir_all, remove_file, rename, try_exists};
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::{error, trace, warn};
use uuid::Uuid;

use crate::relative_path::RelativePath;
use crate::storage::repository_storage::RepositoryStorage;
use crate::util::blob::ByteStream;
use crate::util::checksums::{ChecksumAccumulator, Checksums};

/// Repository storage in a directory of the local file system
pub struct FsRepositoryStorage {
    root: PathBuf,
}
impl FsRepositoryStorage {
    pub fn new(root: impl Into<PathBuf>) -> FsRepositoryStorage {
        FsRepositoryStorage {
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn physical_path(&self, path: &RelativePath) -> PathBuf {
        let mut result = self.root.clone();
        for segment in path.segments() {
            result.push(segment);
        }
        result
    }

    async fn do_write(file_path: &Path, data: ByteStream) -> anyhow::Result<Checksums> {
        let mut data = data;

        let mut file = OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(file_path)
            .await?;

        let mut checksums = ChecksumAccumulator::new();
        while let Some(bytes) = data.next().await {
            let bytes = bytes?;
            checksums.add_data(&bytes);
            file.write_all(&bytes).await?;
        }
        file.flush().await?;

        Ok(checksums.finish())
    }
}

#[async_trait]
impl RepositoryStorage for FsRepositoryStorage {
    async fn exists(&self, path: &RelativePath) -> anyhow::Result<bool> {
        Ok(try_exists(self.physical_path(path)).await?)
    }

    async fn is_container(&self, path: &RelativePath) -> anyhow::Result<bool> {
        match metadata(self.physical_path(path)).await {
            Ok(m) => Ok(m.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self, path: &RelativePath) -> anyhow::Result<Vec<RelativePath>> {
        if !self.is_container(path).await? {
            return Ok(vec![]);
        }

        let directory_path = self.physical_path(path);
        trace!("listing {}", directory_path.display());

        let mut names = Vec::new();
        let mut entries = read_dir(&directory_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => warn!("skipping non-UTF-8 file name {:?} in {}", name, directory_path.display()),
            }
        }
        names.sort();

        names.iter()
            .map(|name| path.join(name).map_err(anyhow::Error::from))
            .collect()
    }

    async fn read(&self, path: &RelativePath) -> anyhow::Result<Option<ByteStream>> {
        let file_path = self.physical_path(path);
        trace!("reading {}", file_path.display());

        let file = match OpenOptions::new().read(true).open(&file_path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if file.metadata().await?.is_dir() {
            return Ok(None);
        }

        let stream = ReaderStream::new(file)
            .map(|chunk| chunk.map_err(anyhow::Error::from));
        Ok(Some(Box::pin(stream)))
    }

    async fn write(&self, path: &RelativePath, data: ByteStream) -> anyhow::Result<Checksums> {
        let file_path = self.physical_path(path);
        let parent = match file_path.parent() {
            Some(parent) if !path.is_root() => parent.to_path_buf(),
            _ => return Err(anyhow::anyhow!("can not write to the repository root")),
        };
        create_dir_all(&parent).await?;

        // write to a hidden sibling first so that readers never see a partial file
        let temp_path = parent.join(format!(".{}.{}.inserting", path.file_name(), Uuid::new_v4().as_hyphenated()));
        trace!("writing {} via {}", file_path.display(), temp_path.display());

        match Self::do_write(&temp_path, data).await {
            Ok(checksums) => {
                rename(&temp_path, &file_path).await?;
                Ok(checksums)
            }
            Err(e) => {
                if let Err(cleanup_error) = remove_file(&temp_path).await {
                    if cleanup_error.kind() != ErrorKind::NotFound {
                        error!("error cleaning up {} after failed attempt to write: {}", temp_path.display(), cleanup_error);
                    }
                }
                Err(e)
            }
        }
    }

    async fn delete(&self, path: &RelativePath) -> anyhow::Result<bool> {
        let physical_path = self.physical_path(path);
        trace!("deleting {}", physical_path.display());

        match metadata(&physical_path).await {
            Ok(m) if m.is_dir() => {
                remove_dir_all(&physical_path).await?;
                Ok(true)
            }
            Ok(_) => {
                remove_file(&physical_path).await?;
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::blob::{collect_bytes, single_chunk};

    fn path(s: &str) -> RelativePath {
        RelativePath::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_write_read_list_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsRepositoryStorage::new(dir.path());

        let checksums = storage.write(&path("org/apache/foo/1.0/foo-1.0.jar"), single_chunk("hello world")).await.unwrap();
        assert_eq!(checksums.sha1_hex(), "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
        storage.write(&path("org/apache/foo/1.0/foo-1.0.pom"), single_chunk("<project/>")).await.unwrap();

        assert!(storage.exists(&path("org/apache/foo/1.0/foo-1.0.jar")).await.unwrap());
        assert!(storage.is_container(&path("org/apache/foo/1.0")).await.unwrap());
        assert!(!storage.is_container(&path("org/apache/foo/1.0/foo-1.0.jar")).await.unwrap());
        assert!(!storage.exists(&path("org/apache/bar")).await.unwrap());

        assert_eq!(
            storage.list(&path("org/apache/foo/1.0")).await.unwrap(),
            vec![path("org/apache/foo/1.0/foo-1.0.jar"), path("org/apache/foo/1.0/foo-1.0.pom")]
        );
        assert_eq!(storage.list(&RelativePath::root()).await.unwrap(), vec![path("org")]);
        assert!(storage.list(&path("does/not/exist")).await.unwrap().is_empty());

        let data = storage.read(&path("org/apache/foo/1.0/foo-1.0.jar")).await.unwrap().unwrap();
        assert_eq!(collect_bytes(data).await.unwrap(), b"hello world");
        assert!(storage.read(&path("org/apache/foo/1.0/missing.jar")).await.unwrap().is_none());
        assert!(storage.read(&path("org/apache/foo/1.0")).await.unwrap().is_none());

        assert!(storage.delete(&path("org/apache/foo/1.0")).await.unwrap());
        assert!(!storage.exists(&path("org/apache/foo/1.0/foo-1.0.pom")).await.unwrap());
        assert!(!storage.delete(&path("org/apache/foo/1.0")).await.unwrap());
    }

    #[tokio::test]
    async fn test_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsRepositoryStorage::new(dir.path());
        let p = path("g/a/1/a-1.jar");

        storage.write(&p, single_chunk("first")).await.unwrap();
        storage.write(&p, single_chunk("second")).await.unwrap();

        let data = storage.read(&p).await.unwrap().unwrap();
        assert_eq!(collect_bytes(data).await.unwrap(), b"second");
        // no temporary files left behind
        assert_eq!(storage.list(&path("g/a/1")).await.unwrap(), vec![p]);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsRepositoryStorage::new(dir.path());
        let p = path("g/a/1/a-1.jar");

        let failing: ByteStream = Box::pin(futures::stream::iter(vec![
            Ok(bytes::Bytes::from("partial")),
            Err(anyhow::anyhow!("connection reset")),
        ]));
        assert!(storage.write(&p, failing).await.is_err());
        assert!(storage.list(&path("g/a/1")).await.unwrap().is_empty());
    }
}
