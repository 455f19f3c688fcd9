//! The Maven 1 repository layout: `{groupId}/{type}s/{artifactId}-{version}[-{classifier}].{extension}`.
//!
//! Going from a file name back to a coordinate is ambiguous because artifact id, version and
//!  classifier are all joined by '-' and may contain '-' themselves. Parsing is a greedy
//!  heuristic based on which tokens 'look like' version parts. It does not invert `as_legacy_path`
//!  for artifact ids or classifiers containing version-like tokens, and existing repositories
//!  rely on exactly this behavior for lookups.

use crate::error::{ContentError, Result};
use crate::maven::coordinates::ArtifactCoordinate;
use crate::maven::type_mapping::legacy_extension_and_classifier;
use crate::maven::version::is_version_token;
use crate::relative_path::RelativePath;

pub fn as_legacy_path(artifact: &ArtifactCoordinate) -> RelativePath {
    let (extension, classifier) = legacy_extension_and_classifier(artifact.artifact_type(), artifact.classifier());
    let classifier_string = match classifier {
        None => "".to_string(),
        Some(c) => format!("-{}", c),
    };

    RelativePath::from_normalized(format!(
        "{}/{}s/{}-{}{}.{}",
        artifact.group_id(),
        artifact.artifact_type(),
        artifact.artifact_id(),
        artifact.version(),
        classifier_string,
        extension,
    ))
}

pub fn parse_legacy_path(path: &str) -> Result<ArtifactCoordinate> {
    let segments: Vec<&str> = path.split(|c: char| c == '/' || c == '\\')
        .filter(|s| !s.is_empty())
        .collect();
    if segments.len() != 3 {
        return Err(ContentError::invalid_path(path, format!(
            "not a legacy artifact path - expected group/types/file, found {} segments", segments.len()
        )));
    }
    let group_id = segments[0];

    let mut artifact_type = segments[1].strip_suffix('s')
        .ok_or_else(|| ContentError::invalid_path(path, format!(
            "directory {:?} does not correspond to an artifact type", segments[1]
        )))?
        .to_string();

    // artifactId-version-classifier-extension
    let mut tokens: Vec<&str> = segments[2].split('-')
        .filter(|t| !t.is_empty())
        .collect();
    let last_token = tokens.pop()
        .ok_or_else(|| ContentError::invalid_path(path, "file name has no tokens"))?;

    let (type_override, last_token) = split_extension(path, last_token, &artifact_type)?;
    if let Some(t) = type_override {
        artifact_type = t.to_string();
    }
    tokens.push(last_token);

    let (split, classifier) = split_version_and_classifier(&tokens);

    let artifact_id = split.artifact_tokens.join("-");
    if artifact_id.is_empty() {
        return Err(ContentError::invalid_path(path, "artifactId is empty"));
    }

    let mut version_string = split.version;
    if version_string.ends_with('-') {
        version_string.pop();
    }
    if version_string.is_empty() {
        return Err(ContentError::invalid_path(path, "version is empty"));
    }

    ArtifactCoordinate::with_classifier(group_id, &artifact_id, &version_string, &classifier, &artifact_type)
        .map_err(|e| ContentError::invalid_path(path, e.to_string()))
}

/// Strips the extension from the last token of a file name. Some extensions determine the
///  artifact type, for all others the extension must match the type directory.
fn split_extension<'a>(path: &str, last_token: &'a str, artifact_type: &str) -> Result<(Option<&'static str>, &'a str)> {
    if let Some(stripped) = last_token.strip_suffix(".tar.gz") {
        return Ok((Some("distribution-tgz"), stripped));
    }
    if last_token.ends_with("sources.jar") {
        return Ok((Some("java-source"), &last_token[..last_token.len() - ".jar".len()]));
    }
    if last_token.ends_with("javadoc.jar") {
        return Ok((Some("javadoc.jar"), &last_token[..last_token.len() - ".jar".len()]));
    }
    if let Some(stripped) = last_token.strip_suffix(".zip") {
        return Ok((Some("distribution-zip"), stripped));
    }

    match last_token.rfind('.') {
        Some(ext_pos) if ext_pos > 0 => {
            let extension = &last_token[ext_pos + 1..];
            if extension == artifact_type || artifact_type == "plugin" {
                Ok((None, &last_token[..ext_pos]))
            }
            else {
                Err(ContentError::invalid_path(path, format!(
                    "type {:?} does not match extension {:?}", artifact_type, extension
                )))
            }
        }
        _ => Err(ContentError::invalid_path(path, "unable to determine extension")),
    }
}

struct VersionSplit<'t, 'a> {
    artifact_tokens: &'t [&'a str],
    version: String,
}

/// Walks the tokens from the end. Tokens before the first version-like token are the
///  classifier, the contiguous run of version-like tokens is the version, and everything in
///  front of that is the artifact id. If no token looks like a version, the last token is the
///  version and there is no classifier.
fn split_version_and_classifier<'t, 'a>(tokens: &'t [&'a str]) -> (VersionSplit<'t, 'a>, String) {
    let mut classifier = String::new();
    let mut version = String::new();

    let mut version_token_found = false;
    // NB: shared between both buffers, so the version gets a trailing '-' if a classifier
    //  token came first
    let mut first_token = true;
    let mut tokens_consumed = 0;

    for token in tokens.iter().rev() {
        let buffer = if is_version_token(token) {
            version_token_found = true;
            &mut version
        }
        else if version_token_found {
            break;
        }
        else {
            &mut classifier
        };

        if first_token {
            first_token = false;
        }
        else {
            buffer.insert(0, '-');
        }
        buffer.insert_str(0, token);

        tokens_consumed += 1;
    }

    if version.is_empty() {
        classifier.clear();
        let artifact_tokens = match tokens.split_last() {
            Some((last, rest)) if !rest.is_empty() => {
                version.push_str(last);
                rest
            }
            _ => tokens,
        };
        (VersionSplit { artifact_tokens, version }, classifier)
    }
    else {
        (VersionSplit { artifact_tokens: &tokens[..tokens.len() - tokens_consumed], version }, classifier)
    }
}
