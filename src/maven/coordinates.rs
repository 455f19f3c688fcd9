use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::{ContentError, Result};
use crate::maven::version::{base_version, is_snapshot};

#[derive(PartialEq, Eq, Hash, Clone, Debug, PartialOrd, Ord)]
pub enum MavenClassifier {
    Unclassified,
    Classified(String),
}

impl MavenClassifier {
    /// the empty string means 'no classifier'
    pub fn parse(classifier: &str) -> MavenClassifier {
        if classifier.is_empty() {
            MavenClassifier::Unclassified
        }
        else {
            MavenClassifier::Classified(classifier.to_string())
        }
    }

    pub fn as_option(&self) -> Option<&str> {
        match self {
            MavenClassifier::Unclassified => None,
            MavenClassifier::Classified(c) => Some(c),
        }
    }

    pub fn as_str(&self) -> &str {
        self.as_option().unwrap_or("")
    }
}

/// Identifies all versions of a project.
#[derive(PartialEq, Eq, Hash, Clone, Debug, PartialOrd, Ord)]
pub struct ProjectCoordinate {
    group_id: String,
    artifact_id: String,
}

impl ProjectCoordinate {
    pub fn new(group_id: &str, artifact_id: &str) -> Result<ProjectCoordinate> {
        require_group_id(group_id)?;
        require_segment("artifactId", artifact_id)?;
        Ok(ProjectCoordinate {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
        })
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }
}

/// Identifies all artifacts (classifier and type variants) of one version of a project.
#[derive(PartialEq, Eq, Hash, Clone, Debug, PartialOrd, Ord)]
pub struct VersionCoordinate {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl VersionCoordinate {
    pub fn new(group_id: &str, artifact_id: &str, version: &str) -> Result<VersionCoordinate> {
        require_group_id(group_id)?;
        require_segment("artifactId", artifact_id)?;
        require_segment("version", version)?;
        Ok(VersionCoordinate {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
        })
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn base_version(&self) -> String {
        base_version(&self.version)
    }

    pub fn project(&self) -> ProjectCoordinate {
        ProjectCoordinate {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
        }
    }
}

/// Identifies a single artifact file. Two coordinates are equal iff all five fields are equal
///  (case-sensitive).
#[derive(PartialEq, Eq, Hash, Clone, Debug, PartialOrd, Ord)]
pub struct ArtifactCoordinate {
    group_id: String,
    artifact_id: String,
    version: String,
    classifier: MavenClassifier,
    artifact_type: String,
}

impl ArtifactCoordinate {
    pub fn new(group_id: &str, artifact_id: &str, version: &str, artifact_type: &str) -> Result<ArtifactCoordinate> {
        ArtifactCoordinate::with_classifier(group_id, artifact_id, version, "", artifact_type)
    }

    /// An empty `classifier` is the same as no classifier.
    pub fn with_classifier(group_id: &str, artifact_id: &str, version: &str, classifier: &str, artifact_type: &str) -> Result<ArtifactCoordinate> {
        require_group_id(group_id)?;
        require_segment("artifactId", artifact_id)?;
        require_segment("version", version)?;
        require_segment("type", artifact_type)?;
        if !classifier.is_empty() {
            require_segment("classifier", classifier)?;
        }

        Ok(ArtifactCoordinate {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            classifier: MavenClassifier::parse(classifier),
            artifact_type: artifact_type.to_string(),
        })
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn classifier(&self) -> &MavenClassifier {
        &self.classifier
    }

    pub fn artifact_type(&self) -> &str {
        &self.artifact_type
    }

    pub fn base_version(&self) -> String {
        base_version(&self.version)
    }

    pub fn is_snapshot(&self) -> bool {
        is_snapshot(&self.version)
    }

    pub fn project(&self) -> ProjectCoordinate {
        ProjectCoordinate {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
        }
    }

    pub fn version_coordinate(&self) -> VersionCoordinate {
        VersionCoordinate {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            version: self.version.clone(),
        }
    }

    /// same group, artifact and version, i.e. possibly a different classifier or type
    pub fn is_same_version(&self, other: &ArtifactCoordinate) -> bool {
        self.group_id == other.group_id
            && self.artifact_id == other.artifact_id
            && self.version == other.version
    }
}

/// `group:artifact:version[:classifier]:type`
impl Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.classifier {
            MavenClassifier::Unclassified =>
                write!(f, "{}:{}:{}:{}", self.group_id, self.artifact_id, self.version, self.artifact_type),
            MavenClassifier::Classified(c) =>
                write!(f, "{}:{}:{}:{}:{}", self.group_id, self.artifact_id, self.version, c, self.artifact_type),
        }
    }
}

impl FromStr for ArtifactCoordinate {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<ArtifactCoordinate> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [group_id, artifact_id, version, artifact_type] =>
                ArtifactCoordinate::new(group_id, artifact_id, version, artifact_type),
            [group_id, artifact_id, version, classifier, artifact_type] =>
                ArtifactCoordinate::with_classifier(group_id, artifact_id, version, classifier, artifact_type),
            _ => Err(ContentError::InvalidCoordinate {
                field: "coordinate",
                reason: format!("{:?} is not of the form group:artifact:version[:classifier]:type", s),
            }),
        }
    }
}

fn require_group_id(group_id: &str) -> Result<()> {
    require_segment("groupId", group_id)?;
    if group_id.split('.').any(|component| component.is_empty()) {
        return Err(ContentError::InvalidCoordinate {
            field: "groupId",
            reason: format!("{:?} has an empty dot-separated component", group_id),
        });
    }
    Ok(())
}

/// Every field becomes (part of) a path segment, so it must be non-empty and must not be able
///  to change the path's structure.
fn require_segment(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ContentError::InvalidCoordinate { field, reason: "must not be empty".to_string() });
    }
    if value.contains('/') || value.contains('\\') {
        return Err(ContentError::InvalidCoordinate { field, reason: format!("{:?} must not contain path separators", value) });
    }
    if value == "." || value == ".." {
        return Err(ContentError::InvalidCoordinate { field, reason: format!("{:?} is not a valid path segment", value) });
    }
    Ok(())
}
