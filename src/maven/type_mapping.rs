use crate::maven::coordinates::MavenClassifier;

/// Artifact types whose file extension differs from the type name. A mapping with a classifier
///  forces that classifier into the file name regardless of the coordinate's classifier.
struct TypeMapping {
    artifact_type: &'static str,
    extension: &'static str,
    classifier: Option<&'static str>,
}

const LEGACY_TYPE_MAPPINGS: &[TypeMapping] = &[
    TypeMapping { artifact_type: "distribution-tgz", extension: "tar.gz", classifier: None },
    TypeMapping { artifact_type: "distribution-zip", extension: "zip", classifier: None },
    TypeMapping { artifact_type: "java-source", extension: "jar", classifier: Some("sources") },
    TypeMapping { artifact_type: "javadoc.jar", extension: "jar", classifier: Some("javadoc") },
];

const DEFAULT_TYPE_MAPPINGS: &[TypeMapping] = &[
    TypeMapping { artifact_type: "distribution-tgz", extension: "tar.gz", classifier: None },
    TypeMapping { artifact_type: "distribution-zip", extension: "zip", classifier: None },
    TypeMapping { artifact_type: "java-source", extension: "jar", classifier: Some("sources") },
    TypeMapping { artifact_type: "javadoc.jar", extension: "jar", classifier: Some("javadoc") },
    TypeMapping { artifact_type: "javadoc", extension: "jar", classifier: Some("javadoc") },
    TypeMapping { artifact_type: "ejb-client", extension: "jar", classifier: Some("client") },
    TypeMapping { artifact_type: "test-jar", extension: "jar", classifier: Some("tests") },
    TypeMapping { artifact_type: "ejb", extension: "jar", classifier: None },
    TypeMapping { artifact_type: "maven-plugin", extension: "jar", classifier: None },
    TypeMapping { artifact_type: "maven-archetype", extension: "jar", classifier: None },
];

fn resolve<'a>(mappings: &[TypeMapping], artifact_type: &'a str, classifier: &'a MavenClassifier) -> (&'a str, Option<&'a str>) {
    match mappings.iter().find(|m| m.artifact_type == artifact_type) {
        Some(mapping) => (mapping.extension, mapping.classifier.or(classifier.as_option())),
        None => (artifact_type, classifier.as_option()),
    }
}

/// (extension, classifier) in a legacy layout file name
pub fn legacy_extension_and_classifier<'a>(artifact_type: &'a str, classifier: &'a MavenClassifier) -> (&'a str, Option<&'a str>) {
    resolve(LEGACY_TYPE_MAPPINGS, artifact_type, classifier)
}

/// (extension, classifier) in a default layout file name
pub fn default_extension_and_classifier<'a>(artifact_type: &'a str, classifier: &'a MavenClassifier) -> (&'a str, Option<&'a str>) {
    resolve(DEFAULT_TYPE_MAPPINGS, artifact_type, classifier)
}

/// The type of an artifact found in a default layout repository. Only compound extensions are
///  mapped, everything else is its own type.
pub fn type_for_extension(extension: &str) -> &str {
    match extension {
        "tar.gz" => "distribution-tgz",
        other => other,
    }
}
