use async_trait::async_trait;

use crate::relative_path::RelativePath;
use crate::util::blob::ByteStream;
use crate::util::checksums::Checksums;

/// The physical side of a repository: a tree of containers (directories) and files addressed
///  by paths relative to the repository root.
///
/// Implementations provide at least read-after-write consistency for listings. They do no
///  retries, errors are returned to the caller.
#[async_trait]
pub trait RepositoryStorage: Send + Sync {
    /// true for both files and containers
    async fn exists(&self, path: &RelativePath) -> anyhow::Result<bool>;

    async fn is_container(&self, path: &RelativePath) -> anyhow::Result<bool>;

    /// The immediate children of a container, ordered by name. Listing something that does not
    ///  exist or is not a container returns an empty list.
    async fn list(&self, path: &RelativePath) -> anyhow::Result<Vec<RelativePath>>;

    /// `None` if there is no file at `path`
    async fn read(&self, path: &RelativePath) -> anyhow::Result<Option<ByteStream>>;

    /// Stores a file, replacing an existing one and creating parent containers as needed.
    ///  Returns the checksums of the data as it was written.
    async fn write(&self, path: &RelativePath, data: ByteStream) -> anyhow::Result<Checksums>;

    /// Removes a file, or a container with everything in it. Returns false if nothing existed
    ///  at `path`.
    async fn delete(&self, path: &RelativePath) -> anyhow::Result<bool>;
}
