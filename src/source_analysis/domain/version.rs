use std::cmp::Ordering;

/// Sentinel used by OSV ranges for "every version since the beginning".
pub const INTRODUCED_AT_START: &str = "0";

/// NewType wrapper for an OSV semantic version (no leading "v").
///
/// Ordering follows Go module semver rules:
/// - `1` and `1.2` are shorthands for `1.0.0` and `1.2.0`
/// - build metadata is ignored
/// - pre-release identifiers order per SemVer 2.0.0, which puts
///   pseudo-versions (`0.0.0-20220824120805-abc`) in timestamp order
/// - the empty string, the `"0"` sentinel and anything unparseable sort
///   before every valid version and compare equal to each other
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this is the "0" marker of an open-ended range.
    pub fn is_start_sentinel(&self) -> bool {
        self.0 == INTRODUCED_AT_START
    }

    /// Parses the version, returning `None` for anything that is not a valid
    /// semantic version (including the "0" sentinel).
    pub fn parsed(&self) -> Option<semver::Version> {
        if self.is_start_sentinel() {
            return None;
        }
        let mut version = semver::Version::parse(&canonical(&self.0)?).ok()?;
        version.build = semver::BuildMetadata::EMPTY;
        Some(version)
    }

    /// Reports whether `self` strictly precedes `other`.
    pub fn before(&self, other: &Version) -> bool {
        self.compare(other) == Ordering::Less
    }

    pub fn compare(&self, other: &Version) -> Ordering {
        self.parsed().cmp(&other.parsed())
    }
}

impl From<&str> for Version {
    fn from(version: &str) -> Self {
        Self::new(version)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Expands `MAJOR` and `MAJOR.MINOR` shorthands. Shorthands are only accepted
/// without pre-release or build suffixes.
fn canonical(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    if raw.contains(['-', '+']) {
        return Some(raw.to_string());
    }
    match raw.split('.').count() {
        1 => Some(format!("{}.0.0", raw)),
        2 => Some(format!("{}.0", raw)),
        _ => Some(raw.to_string()),
    }
}
