/// Files that live next to artifacts in a repository without being artifacts themselves
const NON_ARTIFACT_SUFFIXES: &[&str] = &[".sha1", ".md5", ".sha256", ".sha512", ".asc"];

/// Whether a file name can be an artifact, i.e. is neither a checksum, signature, repository
///  metadata nor a hidden / temporary file. This is a cheap pre-filter; a name passing it may
///  still fail to decode.
pub fn is_artifact_file_name(file_name: &str) -> bool {
    if file_name.is_empty() || file_name.starts_with('.') {
        return false;
    }
    if file_name.starts_with("maven-metadata") && file_name.ends_with(".xml") {
        return false;
    }
    !NON_ARTIFACT_SUFFIXES.iter().any(|suffix| file_name.ends_with(suffix))
}

#[cfg(test)]
mod test {
    use rstest::*;
    use super::*;

    #[rstest]
    #[case::jar("foo-1.0.jar", true)]
    #[case::pom("foo-1.0.pom", true)]
    #[case::sha1("foo-1.0.jar.sha1", false)]
    #[case::md5("foo-1.0.pom.md5", false)]
    #[case::signature("foo-1.0.jar.asc", false)]
    #[case::metadata("maven-metadata.xml", false)]
    #[case::proxy_metadata("maven-metadata-central.xml", false)]
    #[case::hidden(".foo-1.0.jar.2d1c.inserting", false)]
    fn test_is_artifact_file_name(#[case] file_name: &str, #[case] expected: bool) {
        assert_eq!(is_artifact_file_name(file_name), expected);
    }
}
