use lazy_static::lazy_static;
use regex::Regex;

pub const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

lazy_static! {
    /// Lexical shapes a hyphen-delimited token of a legacy file name may have if it is part of
    ///  a version, matched case-insensitively.
    static ref VERSION_TOKEN_REGEX: Regex = Regex::new(concat!(
        "(?i)^(?:",
        "(dev[_.0-9]*)|",
        "(snapshot)|",
        "([0-9][_.0-9a-z]*)|",
        "(g?[_.0-9ab]*(pre|rc|g|m)[_.0-9]*)|",
        "(alpha[_.0-9]*)|",
        "(beta[_.0-9]*)|",
        "(rc[_.0-9]*)|",
        "(test[_.0-9]*)|",
        "(debug[_.0-9]*)|",
        "(unofficial[_.0-9]*)|",
        "(current)|",
        "(latest)|",
        "(fcs)|",
        "(release[_.0-9]*)|",
        "(nightly)|",
        "(final)|",
        "([ab][_.0-9]*)",
        ")$",
    )).unwrap();

    static ref TIMESTAMPED_SNAPSHOT_REGEX: Regex = Regex::new(r"^(.*)-([0-9]{8}\.[0-9]{6})-([0-9]+)$").unwrap();

    /// timestamp and build number at the start of a file name's remainder, e.g. "20090101.120000-3"
    pub(crate) static ref TIMESTAMP_PREFIX_REGEX: Regex = Regex::new(r"^[0-9]{8}\.[0-9]{6}-[0-9]+").unwrap();
}

/// Whether a token of a legacy file name 'looks like' part of a version, e.g. "1.0", "RC1",
///  "SNAPSHOT" or "beta2", as opposed to a piece of an artifact id or classifier.
pub fn is_version_token(token: &str) -> bool {
    VERSION_TOKEN_REGEX.is_match(token)
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub enum MavenVersion {
    Release(String),
    /// a version ending in '-SNAPSHOT'
    Snapshot(String),
    /// a deployed snapshot, e.g. "1.0-20090101.120000-3" for "1.0-SNAPSHOT"
    TimestampedSnapshot {
        main_version: String,
        timestamp: String,
        build_number: u32,
    },
}

impl MavenVersion {
    pub fn parse(version: &str) -> MavenVersion {
        if version.ends_with(SNAPSHOT_SUFFIX) {
            return MavenVersion::Snapshot(version.to_string());
        }

        if let Some(captures) = TIMESTAMPED_SNAPSHOT_REGEX.captures(version) {
            // build numbers start at 1; too large for u32 is not something a deployment would produce
            if let Some(build_number) = captures[3].parse::<u32>().ok().filter(|n| *n > 0) {
                return MavenVersion::TimestampedSnapshot {
                    main_version: captures[1].to_string(),
                    timestamp: captures[2].to_string(),
                    build_number,
                };
            }
        }

        MavenVersion::Release(version.to_string())
    }

    pub fn is_snapshot(&self) -> bool {
        !matches!(self, MavenVersion::Release(_))
    }

    pub fn base_version(&self) -> String {
        match self {
            MavenVersion::Release(v) => v.clone(),
            MavenVersion::Snapshot(v) => v.clone(),
            MavenVersion::TimestampedSnapshot { main_version, .. } => format!("{}{}", main_version, SNAPSHOT_SUFFIX),
        }
    }
}

impl std::fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MavenVersion::Release(v) | MavenVersion::Snapshot(v) => f.write_str(v),
            MavenVersion::TimestampedSnapshot { main_version, timestamp, build_number } =>
                write!(f, "{}-{}-{}", main_version, timestamp, build_number),
        }
    }
}

pub fn base_version(version: &str) -> String {
    MavenVersion::parse(version).base_version()
}

pub fn is_snapshot(version: &str) -> bool {
    MavenVersion::parse(version).is_snapshot()
}
