use crate::error::{ContentError, Result};
use crate::maven::coordinates::*;
use crate::maven::type_mapping::{default_extension_and_classifier, type_for_extension};
use crate::maven::version::{MavenVersion, SNAPSHOT_SUFFIX, TIMESTAMP_PREFIX_REGEX};
use crate::relative_path::RelativePath;

pub const METADATA_FILE_NAME: &str = "maven-metadata.xml";

/// `{group/as/path}/{artifactId}/{baseVersion}/{artifactId}-{version}[-{classifier}].{extension}`
pub fn as_maven_path(artifact: &ArtifactCoordinate) -> RelativePath {
    RelativePath::from_normalized(format!(
        "{}/{}/{}/{}",
        group_path(artifact.group_id()),
        artifact.artifact_id(),
        artifact.base_version(),
        maven_file_name(artifact),
    ))
}

pub fn project_directory(project: &ProjectCoordinate) -> RelativePath {
    RelativePath::from_normalized(format!("{}/{}", group_path(project.group_id()), project.artifact_id()))
}

/// NB: all timestamped builds of a snapshot share the directory of their base version
pub fn version_directory(version: &VersionCoordinate) -> RelativePath {
    RelativePath::from_normalized(format!(
        "{}/{}/{}",
        group_path(version.group_id()),
        version.artifact_id(),
        version.base_version(),
    ))
}

pub fn project_metadata_path(project: &ProjectCoordinate) -> RelativePath {
    RelativePath::from_normalized(format!("{}/{}", project_directory(project), METADATA_FILE_NAME))
}

pub fn version_metadata_path(version: &VersionCoordinate) -> RelativePath {
    RelativePath::from_normalized(format!("{}/{}", version_directory(version), METADATA_FILE_NAME))
}

fn group_path(group_id: &str) -> String {
    group_id.replace('.', "/")
}

fn maven_file_name(artifact: &ArtifactCoordinate) -> String {
    let (extension, classifier) = default_extension_and_classifier(artifact.artifact_type(), artifact.classifier());
    let classifier_string = match classifier {
        None => "".to_string(),
        Some(c) => format!("-{}", c),
    };

    format!("{}-{}{}.{}", artifact.artifact_id(), artifact.version(), classifier_string, extension)
}

/// path is the relative path inside a maven repository, i.e. it starts with something like
///  "org/..." or "com/..."
pub fn parse_maven_path(path: &str) -> Result<ArtifactCoordinate> {
    let normalized = RelativePath::parse(path)?;
    let parts: Vec<&str> = normalized.segments().collect();
    if parts.len() < 4 {
        return Err(ContentError::invalid_path(path, format!(
            "expected at least 4 segments (group path, artifactId, version, file name), found {}", parts.len()
        )));
    }

    let file_name = parts[parts.len() - 1];
    let base_version = parts[parts.len() - 2];
    let artifact_id = parts[parts.len() - 3];
    let group_id = parts[..parts.len() - 3].join(".");

    let parsed = parse_maven_filename(path, file_name, artifact_id, base_version)?;

    ArtifactCoordinate::with_classifier(
        &group_id,
        artifact_id,
        &parsed.version,
        parsed.classifier.unwrap_or(""),
        type_for_extension(parsed.extension),
    ).map_err(|e| ContentError::invalid_path(path, e.to_string()))
}

#[derive(Debug, Eq, PartialEq)]
struct ParseFilenameResult<'a> {
    version: String,
    classifier: Option<&'a str>,
    extension: &'a str, // without leading '.', e.g. "jar"
}

/// `<artifactId>-<version>[-<classifier>].<extension>` where version is either the directory's
///  base version or, in a snapshot directory, `<mainVersion>-<timestamp>-<buildNumber>`
fn parse_maven_filename<'a>(path: &str, file_name: &'a str, artifact_id: &str, base_version: &str) -> Result<ParseFilenameResult<'a>> {
    let rest = file_name.strip_prefix(artifact_id)
        .and_then(|s| s.strip_prefix('-'))
        .ok_or_else(|| ContentError::invalid_path(path, format!(
            "file name {} is expected to start with artifact id {} followed by '-'", file_name, artifact_id
        )))?;

    let (version, rest) = split_version(path, rest, base_version)?;

    let (raw_classifier, extension) = split_extension(rest)
        .ok_or_else(|| ContentError::invalid_path(path, format!("file name {} has no extension", file_name)))?;

    let classifier = if raw_classifier.is_empty() {
        None
    }
    else {
        match raw_classifier.strip_prefix('-') {
            Some(c) if !c.is_empty() => Some(c),
            _ => return Err(ContentError::invalid_path(path, format!(
                "invalid classifier format {:?} in file name {}", raw_classifier, file_name
            ))),
        }
    };

    Ok(ParseFilenameResult {
        version,
        classifier,
        extension,
    })
}

fn split_version<'a>(path: &str, rest: &'a str, base_version: &str) -> Result<(String, &'a str)> {
    let (version, after) = find_version(rest, base_version)
        .ok_or_else(|| ContentError::invalid_path(path, format!(
            "version in file name does not match version directory {}", base_version
        )))?;

    // e.g. a build number of 0, or a directory named after a timestamped build
    if MavenVersion::parse(&version).base_version() != base_version {
        return Err(ContentError::invalid_path(path, format!(
            "version {} does not belong in version directory {}", version, base_version
        )));
    }
    Ok((version, after))
}

fn find_version<'a>(rest: &'a str, base_version: &str) -> Option<(String, &'a str)> {
    if let Some(after) = rest.strip_prefix(base_version) {
        return Some((base_version.to_string(), after));
    }

    // "1.0-SNAPSHOT" directory -> "1.0-" followed by timestamp and build number
    if let Some(main_version) = base_version.strip_suffix(&SNAPSHOT_SUFFIX[1..]) {
        if let Some(after_main) = rest.strip_prefix(main_version) {
            if let Some(m) = TIMESTAMP_PREFIX_REGEX.find(after_main) {
                let version = format!("{}{}", main_version, m.as_str());
                return Some((version, &after_main[m.end()..]));
            }
        }
    }
    None
}

/// splits off the extension, treating "tar.gz" as one extension
fn split_extension(s: &str) -> Option<(&str, &str)> {
    if let Some(stem) = s.strip_suffix(".tar.gz") {
        return Some((stem, "tar.gz"));
    }

    let last_dot = s.rfind('.')?;
    let extension = &s[last_dot + 1..];
    if extension.is_empty() {
        None
    }
    else {
        Some((&s[..last_dot], extension))
    }
}

#[cfg(test)]
mod test {
    use rstest::*;
    use super::*;

    fn parsed<'a>(version: &str, classifier: Option<&'a str>, extension: &'a str) -> Option<ParseFilenameResult<'a>> {
        Some(ParseFilenameResult { version: version.to_string(), classifier, extension })
    }

    #[rstest]
    #[case::release("a-1.0.0.jar", "a", "1.0.0", parsed("1.0.0", None, "jar"))]
    #[case::release_with_dash("x-y-1.0.0.jar", "x-y", "1.0.0", parsed("1.0.0", None, "jar"))]
    #[case::release_version_with_dash_prefix("x-y-1.0.0.jar", "x", "y-1.0.0", parsed("y-1.0.0", None, "jar"))]
    #[case::release_version_with_dash_suffix("x-1.0.0-y.jar", "x", "1.0.0-y", parsed("1.0.0-y", None, "jar"))]
    #[case::release_extension("q-1.0.0.abc", "q", "1.0.0", parsed("1.0.0", None, "abc"))]
    #[case::release_classifier("a-1.0.0-cla.jar", "a", "1.0.0", parsed("1.0.0", Some("cla"), "jar"))]
    #[case::release_classifier_with_dash("a-1.0.0-cla-rst.jar", "a", "1.0.0", parsed("1.0.0", Some("cla-rst"), "jar"))]
    #[case::release_classifier_with_dash_suffix("a-1.0.0-cla-rst.jar", "a", "1.0.0-cla", parsed("1.0.0-cla", Some("rst"), "jar"))]
    #[case::release_classifier_with_dot("a-1.0-jdk1.5.jar", "a", "1.0", parsed("1.0", Some("jdk1.5"), "jar"))]
    #[case::release_tar_gz("a-1.0-bin.tar.gz", "a", "1.0", parsed("1.0", Some("bin"), "tar.gz"))]
    #[case::release_invalid_too_short_1("xxxxxx", "a", "1.0.0", None)]
    #[case::release_invalid_too_short_2("", "a", "1.0.0", None)]
    #[case::release_invalid_wrong_artifact("a-1.0.0.jar", "b", "1.0.0", None)]
    #[case::release_invalid_no_dash_after_artifact("a1.0.0.jar", "a", "1.0.0", None)]
    #[case::release_invalid_wrong_version("a-1.0.0.jar", "a", "1.0.1", None)]
    #[case::release_invalid_longer_version("a-1.0.1.jar", "a", "1.0", None)]
    #[case::release_invalid_no_version("a.jar", "a", "1.0.0", None)]
    #[case::release_invalid_no_dash_before_classifier("a-1.0.0xyz.jar", "a", "1.0.0", None)]
    #[case::release_invalid_empty_classifier("a-1.0.0-.jar", "a", "1.0.0", None)]
    #[case::release_invalid_no_extension("a-1.0.0", "a", "1.0.0", None)]
    #[case::release_invalid_empty_extension("a-1.0.0.", "a", "1.0.0", None)]

    #[case::snapshot_literal("a-1.0.0-SNAPSHOT.jar", "a", "1.0.0-SNAPSHOT", parsed("1.0.0-SNAPSHOT", None, "jar"))]
    #[case::snapshot_literal_classifier("a-1.0.0-SNAPSHOT-sources.jar", "a", "1.0.0-SNAPSHOT", parsed("1.0.0-SNAPSHOT", Some("sources"), "jar"))]
    #[case::snapshot_timestamp("a-1.0.0-20090101.120000-3.jar", "a", "1.0.0-SNAPSHOT", parsed("1.0.0-20090101.120000-3", None, "jar"))]
    #[case::snapshot_timestamp_classifier("a-1.0.0-20090101.120000-3-cla.jar", "a", "1.0.0-SNAPSHOT", parsed("1.0.0-20090101.120000-3", Some("cla"), "jar"))]
    #[case::snapshot_timestamp_classifier_with_dash("a-1.0.0-20090101.120000-12-a-b-c.pom", "a", "1.0.0-SNAPSHOT", parsed("1.0.0-20090101.120000-12", Some("a-b-c"), "pom"))]
    #[case::snapshot_invalid_no_build_number("a-1.0.0-20090101.120000.jar", "a", "1.0.0-SNAPSHOT", None)]
    #[case::snapshot_invalid_short_timestamp("a-1.0.0-2009011.120000-1.jar", "a", "1.0.0-SNAPSHOT", None)]
    #[case::snapshot_invalid_wrong_main_version("a-1.0.1-20090101.120000-3.jar", "a", "1.0.0-SNAPSHOT", None)]
    #[case::snapshot_invalid_build_number("a-1.0.0-20090101.120000-a.jar", "a", "1.0.0-SNAPSHOT", None)]
    #[case::release_directory_timestamp_file("a-1.0.0-20090101.120000-3.jar", "a", "1.0.0", parsed("1.0.0", Some("20090101.120000-3"), "jar"))]
    #[case::snapshot_invalid_build_number_zero("a-1.0.0-20090101.120000-0.jar", "a", "1.0.0-SNAPSHOT", None)]
    #[case::snapshot_invalid_build_number_overflow("a-1.0.0-20090101.120000-99999999999.jar", "a", "1.0.0-SNAPSHOT", None)]
    #[case::timestamped_directory("a-1.0.0-20090101.120000-3.jar", "a", "1.0.0-20090101.120000-3", None)]
    #[case::lowercase_snapshot("a-1.0.0-20090101.120000-3.jar", "a", "1.0.0-snapshot", None)]
    fn test_parse_filename(#[case] file_name: &str, #[case] artifact_id: &str, #[case] version_string: &str, #[case] expected: Option<ParseFilenameResult>) {
        let actual = parse_maven_filename(file_name, file_name, artifact_id, version_string);

        if let Some(expected) = expected {
            let actual = actual.unwrap();
            assert_eq!(actual, expected);
        }
        else {
            assert!(actual.unwrap_err().is_invalid_path());
        }
    }

    #[test]
    fn test_parse_path() {
        let artifact = parse_maven_path("org/apache/archiva/archiva-core/1.0/archiva-core-1.0.pom").unwrap();
        assert_eq!(artifact, ArtifactCoordinate::new("org.apache.archiva", "archiva-core", "1.0", "pom").unwrap());
    }

    #[test]
    fn test_parse_path_timestamped_snapshot() {
        let artifact = parse_maven_path("org/apache/archiva/archiva-core/1.0-SNAPSHOT/archiva-core-1.0-20090101.120000-3.jar").unwrap();
        assert_eq!(artifact.version(), "1.0-20090101.120000-3");
        assert_eq!(artifact.base_version(), "1.0-SNAPSHOT");
        assert_eq!(artifact.artifact_type(), "jar");
        assert_eq!(artifact.classifier(), &MavenClassifier::Unclassified);
    }

    #[test]
    fn test_parse_path_tar_gz() {
        let artifact = parse_maven_path("org/example/app/1.2/app-1.2-bin.tar.gz").unwrap();
        assert_eq!(artifact, ArtifactCoordinate::with_classifier("org.example", "app", "1.2", "bin", "distribution-tgz").unwrap());
    }

    #[rstest]
    #[case::too_few_segments("archiva-core/1.0/archiva-core-1.0.pom")]
    #[case::artifact_mismatch("org/apache/archiva-core/1.0/archiva-web-1.0.pom")]
    #[case::version_mismatch("org/apache/archiva-core/1.0/archiva-core-1.1.pom")]
    #[case::metadata("org/apache/archiva-core/1.0/maven-metadata.xml")]
    #[case::escaping("org/../archiva-core/1.0/archiva-core-1.0.pom")]
    #[case::build_number_zero("org/apache/core/1.0-SNAPSHOT/core-1.0-20090101.120000-0.jar")]
    #[case::build_number_overflow("org/apache/core/1.0-SNAPSHOT/core-1.0-20090101.120000-99999999999.jar")]
    #[case::timestamped_directory("org/apache/core/1.0-20090101.120000-3/core-1.0-20090101.120000-3.jar")]
    fn test_parse_path_invalid(#[case] path: &str) {
        assert!(parse_maven_path(path).unwrap_err().is_invalid_path());
    }

    #[rstest]
    #[case::plain(ArtifactCoordinate::new("org.apache.archiva", "archiva-core", "1.0", "pom").unwrap(), "org/apache/archiva/archiva-core/1.0/archiva-core-1.0.pom")]
    #[case::classifier(ArtifactCoordinate::with_classifier("org.apache", "core", "1.0", "jdk5", "jar").unwrap(), "org/apache/core/1.0/core-1.0-jdk5.jar")]
    #[case::sources(ArtifactCoordinate::new("org.apache", "core", "1.0", "java-source").unwrap(), "org/apache/core/1.0/core-1.0-sources.jar")]
    #[case::snapshot(ArtifactCoordinate::new("org.apache", "core", "1.0-SNAPSHOT", "jar").unwrap(), "org/apache/core/1.0-SNAPSHOT/core-1.0-SNAPSHOT.jar")]
    #[case::timestamped(ArtifactCoordinate::new("org.apache", "core", "1.0-20090101.120000-3", "jar").unwrap(), "org/apache/core/1.0-SNAPSHOT/core-1.0-20090101.120000-3.jar")]
    #[case::tgz(ArtifactCoordinate::new("org.apache", "core", "1.0", "distribution-tgz").unwrap(), "org/apache/core/1.0/core-1.0.tar.gz")]
    fn test_as_maven_path(#[case] artifact: ArtifactCoordinate, #[case] expected: &str) {
        assert_eq!(as_maven_path(&artifact).as_str(), expected);
    }

    #[rstest]
    #[case::jar(ArtifactCoordinate::new("org.apache", "core", "1.0", "jar").unwrap())]
    #[case::pom(ArtifactCoordinate::new("com.example.deep.group", "my-lib", "2.3.1-beta-1", "pom").unwrap())]
    #[case::classified(ArtifactCoordinate::with_classifier("org.apache", "core", "1.0", "sources", "jar").unwrap())]
    #[case::classifier_with_dash(ArtifactCoordinate::with_classifier("org.apache", "core", "1.0", "linux-x86_64", "so").unwrap())]
    #[case::tgz(ArtifactCoordinate::new("org.apache", "core", "1.0", "distribution-tgz").unwrap())]
    #[case::timestamped(ArtifactCoordinate::new("org.apache", "core", "1.0-20090101.120000-3", "jar").unwrap())]
    fn test_round_trip(#[case] artifact: ArtifactCoordinate) {
        let path = as_maven_path(&artifact);
        assert_eq!(parse_maven_path(path.as_str()).unwrap(), artifact);
    }

    #[test]
    fn test_directories() {
        let version = VersionCoordinate::new("org.apache", "core", "1.0-20090101.120000-3").unwrap();
        assert_eq!(version_directory(&version).as_str(), "org/apache/core/1.0-SNAPSHOT");
        assert_eq!(project_directory(&version.project()).as_str(), "org/apache/core");
        assert_eq!(project_metadata_path(&version.project()).as_str(), "org/apache/core/maven-metadata.xml");
        assert_eq!(version_metadata_path(&version).as_str(), "org/apache/core/1.0-SNAPSHOT/maven-metadata.xml");
    }
}
