use std::fmt::{Display, Formatter};

use crate::error::{ContentError, Result};

/// A path inside a repository, relative to its root. It is stored normalized: segments are
///  separated by '/', there are no empty, "." or ".." segments, and no leading separator. The
///  repository root is the empty path.
#[derive(PartialEq, Eq, Hash, Clone, Debug, PartialOrd, Ord, Default)]
pub struct RelativePath(String);

impl RelativePath {
    /// Accepts both '/' and '\' as separators. Absolute paths and paths escaping the root
    ///  via ".." are rejected.
    pub fn parse(raw: &str) -> Result<RelativePath> {
        if raw.starts_with('/') || raw.starts_with('\\') {
            return Err(ContentError::invalid_path(raw, "must be relative, not absolute"));
        }
        let mut chars = raw.chars();
        if let (Some(drive), Some(':')) = (chars.next(), chars.next()) {
            if drive.is_ascii_alphabetic() {
                return Err(ContentError::invalid_path(raw, "must be relative, not absolute"));
            }
        }

        let mut segments = Vec::new();
        for segment in raw.split(|c: char| c == '/' || c == '\\') {
            match segment {
                "" | "." => continue,
                ".." => return Err(ContentError::invalid_path(raw, "must not contain '..' segments")),
                s => segments.push(s),
            }
        }
        Ok(RelativePath(segments.join("/")))
    }

    /// For strings that are normalized by construction, i.e. built from validated coordinates
    pub(crate) fn from_normalized(path: String) -> RelativePath {
        debug_assert!(RelativePath::parse(&path).map(|p| p.0 == path).unwrap_or(false), "not normalized: {:?}", path);
        RelativePath(path)
    }

    pub fn root() -> RelativePath {
        RelativePath(String::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item=&str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// the last segment, or "" for the root
    pub fn file_name(&self) -> &str {
        match self.0.rfind('/') {
            Some(last_slash) => &self.0[last_slash + 1..],
            None => &self.0,
        }
    }

    /// Appends one or more segments. `child` is normalized like in `parse`.
    pub fn join(&self, child: &str) -> Result<RelativePath> {
        if self.is_root() {
            RelativePath::parse(child)
        }
        else {
            RelativePath::parse(&format!("{}/{}", self.0, child))
        }
    }

    /// Appends a suffix to the last segment, e.g. ".sha1" for a checksum file
    pub fn with_suffix(&self, suffix: &str) -> Result<RelativePath> {
        if self.is_root() {
            return Err(ContentError::invalid_path(suffix, "the repository root has no file name to extend"));
        }
        RelativePath::parse(&format!("{}{}", self.0, suffix))
    }
}

impl Display for RelativePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
