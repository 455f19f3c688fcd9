use std::collections::BTreeSet;
use std::sync::Arc;

use async_recursion::async_recursion;
use bytes::Bytes;
use tracing::{debug, info, trace, warn};

use crate::error::Result;
use crate::maven::coordinates::{ArtifactCoordinate, ProjectCoordinate, VersionCoordinate};
use crate::maven::file_types::is_artifact_file_name;
use crate::maven::layout::Layout;
use crate::maven::paths::{project_directory, version_directory};
use crate::relative_path::RelativePath;
use crate::storage::RepositoryStorage;
use crate::util::blob::{collect_bytes, single_chunk, Blob, ByteStream};
use crate::util::checksums::{parse_checksum_file, Checksums};

const SHA1_SUFFIX: &str = ".sha1";
const MD5_SUFFIX: &str = ".md5";

/// The content of one managed repository: binds a layout to a storage backend and answers
///  questions about the artifacts in it.
///
/// Holds no state besides its configuration. Every call awaits one storage operation at a
///  time; concurrent callers modifying the same version get whatever consistency the storage
///  provides.
pub struct RepositoryContent<S: RepositoryStorage> {
    id: String,
    layout: Layout,
    storage: Arc<S>,
}

impl <S: RepositoryStorage> RepositoryContent<S> {
    pub fn new(id: impl Into<String>, layout: Layout, storage: Arc<S>) -> RepositoryContent<S> {
        RepositoryContent {
            id: id.into(),
            layout,
            storage,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    pub fn to_path(&self, artifact: &ArtifactCoordinate) -> RelativePath {
        self.layout.encode(artifact)
    }

    pub fn to_artifact(&self, path: &str) -> Result<ArtifactCoordinate> {
        self.layout.decode(path)
    }

    /// Whether the artifact's file exists (as a file, not a container)
    pub async fn has_content(&self, artifact: &ArtifactCoordinate) -> Result<bool> {
        let path = self.to_path(artifact);
        Ok(self.storage.exists(&path).await? && !self.storage.is_container(&path).await?)
    }

    /// All versions of a project that have at least one artifact. For snapshots, this is the
    ///  base version ("1.0-SNAPSHOT"), not the individual timestamped builds.
    pub async fn get_project_versions(&self, project: &ProjectCoordinate) -> Result<BTreeSet<String>> {
        let mut result = BTreeSet::new();

        match self.layout {
            Layout::Default => {
                for version_dir in self.storage.list(&project_directory(project)).await? {
                    if !self.storage.is_container(&version_dir).await? {
                        continue;
                    }
                    let has_artifact = self.decode_files_in(&version_dir).await?
                        .iter()
                        .any(|(_, artifact)| artifact.group_id() == project.group_id() && artifact.artifact_id() == project.artifact_id());
                    if has_artifact {
                        result.insert(version_dir.file_name().to_string());
                    }
                    else {
                        trace!("{}: no artifacts in {}", self.id, version_dir);
                    }
                }
            }
            Layout::Legacy => {
                for (_, artifact) in self.legacy_group_artifacts(project.group_id()).await? {
                    if artifact.artifact_id() == project.artifact_id() {
                        result.insert(artifact.base_version());
                    }
                }
            }
        }

        debug!("{}: {} versions of {}:{}", self.id, result.len(), project.group_id(), project.artifact_id());
        Ok(result)
    }

    /// The distinct versions of all artifacts stored for a version. For a snapshot, these are
    ///  the timestamped builds (and the literal snapshot version if artifacts were stored
    ///  under it).
    pub async fn get_versions(&self, version: &VersionCoordinate) -> Result<BTreeSet<String>> {
        Ok(self.version_artifacts(version).await?
            .into_iter()
            .map(|(_, artifact)| artifact.version().to_string())
            .collect())
    }

    /// All artifacts with the same group, artifact and version as the reference, i.e. its
    ///  classifier and type variants such as sources, javadoc and pom. The reference itself
    ///  is included if it exists.
    pub async fn get_related_artifacts(&self, reference: &ArtifactCoordinate) -> Result<BTreeSet<ArtifactCoordinate>> {
        Ok(self.version_artifacts(&reference.version_coordinate()).await?
            .into_iter()
            .map(|(_, artifact)| artifact)
            .filter(|artifact| artifact.is_same_version(reference))
            .collect())
    }

    /// Removes everything stored for a version, including checksum files
    pub async fn delete_version(&self, version: &VersionCoordinate) -> Result<()> {
        match self.layout {
            Layout::Default => {
                let directory = version_directory(version);
                info!("{}: deleting {}", self.id, directory);
                self.storage.delete(&directory).await?;
            }
            Layout::Legacy => {
                for (path, artifact) in self.version_artifacts(version).await? {
                    info!("{}: deleting {}", self.id, artifact);
                    self.storage.delete(&path).await?;
                    self.storage.delete(&path.with_suffix(SHA1_SUFFIX)?).await?;
                    self.storage.delete(&path.with_suffix(MD5_SUFFIX)?).await?;
                }
            }
        }
        Ok(())
    }

    /// Walks the entire repository and returns every artifact found, in path order
    pub async fn discover_artifacts(&self) -> Result<Vec<ArtifactCoordinate>> {
        let mut found = Vec::new();
        self.discover_in(RelativePath::root(), &mut found).await?;
        debug!("{}: discovered {} artifacts", self.id, found.len());
        Ok(found)
    }

    /// Stores an artifact's file together with '.sha1' and '.md5' checksum files
    pub async fn store_artifact(&self, artifact: &ArtifactCoordinate, data: ByteStream) -> Result<Checksums> {
        let path = self.to_path(artifact);
        info!("{}: storing {} at {}", self.id, artifact, path);

        let checksums = self.storage.write(&path, data).await?;
        self.storage.write(&path.with_suffix(SHA1_SUFFIX)?, single_chunk(Bytes::from(checksums.sha1_hex()))).await?;
        self.storage.write(&path.with_suffix(MD5_SUFFIX)?, single_chunk(Bytes::from(checksums.md5_hex()))).await?;
        Ok(checksums)
    }

    /// The artifact's data along with its published checksums. Checksum files that are missing
    ///  or unreadable leave the respective checksum empty.
    pub async fn read_artifact(&self, artifact: &ArtifactCoordinate) -> Result<Option<Blob>> {
        let path = self.to_path(artifact);
        let data = match self.storage.read(&path).await? {
            Some(data) => data,
            None => return Ok(None),
        };

        Ok(Some(Blob {
            data,
            md5: self.read_checksum(&path.with_suffix(MD5_SUFFIX)?).await?,
            sha1: self.read_checksum(&path.with_suffix(SHA1_SUFFIX)?).await?,
        }))
    }

    async fn read_checksum<const N: usize>(&self, path: &RelativePath) -> Result<Option<[u8;N]>>
        where [u8;N]: hex::FromHex<Error = hex::FromHexError>
    {
        let data = match self.storage.read(path).await? {
            Some(data) => collect_bytes(data).await?,
            None => return Ok(None),
        };

        match std::str::from_utf8(&data).map_err(anyhow::Error::from).and_then(parse_checksum_file::<N>) {
            Ok(checksum) => Ok(Some(checksum)),
            Err(e) => {
                warn!("{}: ignoring unreadable checksum file {}: {}", self.id, path, e);
                Ok(None)
            }
        }
    }

    /// All artifacts stored for a version (same group and artifact id, same base version),
    ///  with their paths
    async fn version_artifacts(&self, version: &VersionCoordinate) -> Result<Vec<(RelativePath, ArtifactCoordinate)>> {
        let candidates = match self.layout {
            Layout::Default => self.decode_files_in(&version_directory(version)).await?,
            Layout::Legacy => self.legacy_group_artifacts(version.group_id()).await?,
        };

        let base_version = version.base_version();
        Ok(candidates.into_iter()
            .filter(|(_, artifact)| {
                artifact.group_id() == version.group_id()
                    && artifact.artifact_id() == version.artifact_id()
                    && artifact.base_version() == base_version
            })
            .collect())
    }

    /// all artifacts in all type directories of a group in a legacy repository
    async fn legacy_group_artifacts(&self, group_id: &str) -> Result<Vec<(RelativePath, ArtifactCoordinate)>> {
        let mut result = Vec::new();
        for type_dir in self.storage.list(&RelativePath::parse(group_id)?).await? {
            if type_dir.file_name().ends_with('s') && self.storage.is_container(&type_dir).await? {
                result.extend(self.decode_files_in(&type_dir).await?);
            }
        }
        Ok(result)
    }

    /// Decodes the files directly inside a container. Anything that is not an artifact is
    ///  skipped.
    async fn decode_files_in(&self, directory: &RelativePath) -> Result<Vec<(RelativePath, ArtifactCoordinate)>> {
        let mut result = Vec::new();
        for path in self.storage.list(directory).await? {
            if let Some(artifact) = self.decode_file(&path).await? {
                result.push((path, artifact));
            }
        }
        Ok(result)
    }

    async fn decode_file(&self, path: &RelativePath) -> Result<Option<ArtifactCoordinate>> {
        if !is_artifact_file_name(path.file_name()) || self.storage.is_container(path).await? {
            return Ok(None);
        }

        match self.layout.decode(path.as_str()) {
            Ok(artifact) => Ok(Some(artifact)),
            Err(e) if e.is_invalid_path() => {
                trace!("{}: skipping {}: {}", self.id, path, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    #[async_recursion]
    async fn discover_in(&self, directory: RelativePath, found: &mut Vec<ArtifactCoordinate>) -> Result<()> {
        for path in self.storage.list(&directory).await? {
            if self.storage.is_container(&path).await? {
                self.discover_in(path, found).await?;
            }
            else if let Some(artifact) = self.decode_file(&path).await? {
                found.push(artifact);
            }
        }
        Ok(())
    }
}
