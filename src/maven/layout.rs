use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, Result};
use crate::maven::coordinates::{ArtifactCoordinate, ProjectCoordinate, VersionCoordinate};
use crate::maven::legacy_paths::{as_legacy_path, parse_legacy_path};
use crate::maven::paths::{as_maven_path, parse_maven_path, project_metadata_path, version_metadata_path};
use crate::relative_path::RelativePath;

/// How coordinates map to paths inside a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Maven 2 and later
    #[default]
    Default,
    /// Maven 1
    Legacy,
}

impl Layout {
    pub fn name(&self) -> &'static str {
        match self {
            Layout::Default => "default",
            Layout::Legacy => "legacy",
        }
    }

    pub fn encode(&self, artifact: &ArtifactCoordinate) -> RelativePath {
        match self {
            Layout::Default => as_maven_path(artifact),
            Layout::Legacy => as_legacy_path(artifact),
        }
    }

    pub fn decode(&self, path: &str) -> Result<ArtifactCoordinate> {
        match self {
            Layout::Default => parse_maven_path(path),
            Layout::Legacy => parse_legacy_path(path),
        }
    }

    pub fn project_metadata_path(&self, project: &ProjectCoordinate) -> Result<RelativePath> {
        match self {
            Layout::Default => Ok(project_metadata_path(project)),
            Layout::Legacy => Err(ContentError::Unsupported { layout: self.name(), operation: "repository metadata" }),
        }
    }

    pub fn version_metadata_path(&self, version: &VersionCoordinate) -> Result<RelativePath> {
        match self {
            Layout::Default => Ok(version_metadata_path(version)),
            Layout::Legacy => Err(ContentError::Unsupported { layout: self.name(), operation: "repository metadata" }),
        }
    }

    /// Determines which layout an artifact path is written in, if any. Legacy paths have
    ///  exactly three segments and default paths at least four, so at most one layout applies.
    pub fn guess(path: &str) -> Option<Layout> {
        if parse_legacy_path(path).is_ok() {
            Some(Layout::Legacy)
        }
        else if parse_maven_path(path).is_ok() {
            Some(Layout::Default)
        }
        else {
            None
        }
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layout {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Layout> {
        match s {
            "default" => Ok(Layout::Default),
            "legacy" => Ok(Layout::Legacy),
            other => Err(ContentError::UnknownLayout(other.to_string())),
        }
    }
}
