//! Version parsing, ordering and incrementing

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::identifier::{self, compare_lists, Identifier};
use crate::Level;

/// Error type for version parsing and comparison
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version \"{version}\": {reason}")]
    InvalidVersion { version: String, reason: String },
    #[error("Unknown increment level \"{0}\"")]
    InvalidLevel(String),
    #[error("{0} is not a version")]
    TypeMismatch(String),
}

impl VersionError {
    pub(crate) fn invalid(version: &str, reason: impl Into<String>) -> Self {
        VersionError::InvalidVersion {
            version: version.to_string(),
            reason: reason.into(),
        }
    }
}

lazy_static! {
    static ref CORE_RE: Regex = Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)(.*)$").unwrap();
}

/// A semantic version.
///
/// Equality, ordering and hashing cover `major.minor.patch`, the pre-release
/// identifiers and the build identifiers. The `loose` flag and the raw input
/// text never take part.
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    pre_release: Vec<Identifier>,
    build: Vec<Identifier>,
    loose: bool,
    raw: String,
}

impl Version {
    /// Parse a version string.
    ///
    /// Loose mode accepts leading whitespace, a leading `v` or `=`, leading
    /// zeros and a pre-release without its dash (`1.2.3foo`).
    pub fn parse(text: &str, loose: bool) -> Result<Self, VersionError> {
        if text.is_empty() {
            return Err(VersionError::invalid(text, "empty version"));
        }

        let mut v = text;
        if loose {
            v = v.trim_start();
            if let Some(rest) = v.strip_prefix(|c: char| c == 'v' || c == '=') {
                v = rest.trim_start();
            }
        }

        let caps = CORE_RE.captures(v).ok_or_else(|| {
            VersionError::invalid(text, "does not contain numeric major, minor and patch versions")
        })?;

        let major = parse_number(text, "major", &caps[1], loose)?;
        let minor = parse_number(text, "minor", &caps[2], loose)?;
        let patch = parse_number(text, "patch", &caps[3], loose)?;
        let (pre_release, build) = parse_suffix(text, &caps[4], loose)?;

        Ok(Version {
            major,
            minor,
            patch,
            pre_release,
            build,
            loose,
            raw: text.to_string(),
        })
    }

    /// Build a strict version from its components
    pub fn from_tuple(
        major: u64,
        minor: u64,
        patch: u64,
        pre_release: Option<&str>,
        build: Option<&str>,
    ) -> Result<Self, VersionError> {
        let mut text = format!("{}.{}.{}", major, minor, patch);
        if let Some(pre) = pre_release {
            text.push('-');
            text.push_str(pre);
        }
        if let Some(build) = build {
            text.push('+');
            text.push_str(build);
        }
        Version::parse(&text, false)
    }

    pub(crate) fn from_parts(major: u64, minor: u64, patch: u64, pre_release: Vec<Identifier>, loose: bool) -> Self {
        let mut version = Version {
            major,
            minor,
            patch,
            pre_release,
            build: Vec::new(),
            loose,
            raw: String::new(),
        };
        version.raw = version.to_string();
        version
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn pre_release(&self) -> &[Identifier] {
        &self.pre_release
    }

    pub fn build(&self) -> &[Identifier] {
        &self.build
    }

    pub fn is_loose(&self) -> bool {
        self.loose
    }

    /// The text this version was parsed from
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_pre_release(&self) -> bool {
        !self.pre_release.is_empty()
    }

    /// Versions from 1.0.0 on are considered stable
    pub fn is_stable(&self) -> bool {
        self.major > 0
    }

    fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    /// Compare by precedence: `major.minor.patch`, then pre-release. Build
    /// metadata is ignored.
    pub fn cmp_precedence(&self, other: &Version) -> Ordering {
        self.triple()
            .cmp(&other.triple())
            .then_with(|| compare_lists(&self.pre_release, &other.pre_release))
    }

    /// Strict comparison against a version or a version string
    pub fn compare<C: Comparand + ?Sized>(&self, other: &C) -> Result<Ordering, VersionError> {
        let other = other.to_version(self.loose)?;
        Ok(self.cmp(&other))
    }

    /// Strict equality, build metadata included
    pub fn equals<C: Comparand + ?Sized>(&self, other: &C) -> Result<bool, VersionError> {
        let other = other.to_version(self.loose)?;
        Ok(*self == *other)
    }

    /// Same `major.minor.patch` and both or neither carrying a pre-release
    pub fn has_same_precedence<C: Comparand + ?Sized>(&self, other: &C) -> Result<bool, VersionError> {
        let other = other.to_version(self.loose)?;
        Ok(self.triple() == other.triple() && self.is_pre_release() == other.is_pre_release())
    }

    /// Lower `major.minor.patch`, or the same one as a pre-release of a release
    pub fn precedes<C: Comparand + ?Sized>(&self, other: &C) -> Result<bool, VersionError> {
        let other = other.to_version(self.loose)?;
        Ok(match self.triple().cmp(&other.triple()) {
            Ordering::Less => true,
            Ordering::Equal => self.is_pre_release() && !other.is_pre_release(),
            Ordering::Greater => false,
        })
    }

    /// Produce the next version at the given level. Build metadata is dropped.
    pub fn increment(&self, level: Level) -> Result<Version, VersionError> {
        self.increment_with(level, None)
    }

    /// Like [`Version::increment`], naming the pre-release (`dev`, `alpha`, ...)
    /// used by the `pre*` levels.
    pub fn increment_with(&self, level: Level, identifier: Option<&str>) -> Result<Version, VersionError> {
        let identifier = identifier
            .map(|id| Identifier::parse_pre_release(id, false).map_err(|reason| VersionError::invalid(id, reason)))
            .transpose()?;
        let fresh = || match &identifier {
            Some(id) => vec![id.clone(), Identifier::Numeric(0)],
            None => vec![Identifier::Numeric(0)],
        };
        let (major, minor, patch) = self.triple();
        let has_pre = self.is_pre_release();

        let next = match level {
            // A pre-release of X.Y.0 already sorts below X.Y.0
            Level::Major | Level::Minor if has_pre && patch == 0 => self.release(major, minor, patch),
            Level::Major => self.release(self.bump(major)?, 0, 0),
            Level::Minor => self.release(major, self.bump(minor)?, 0),
            Level::Patch if has_pre => self.release(major, minor, patch),
            Level::Patch => self.release(major, minor, self.bump(patch)?),
            Level::PreMajor => Version::from_parts(self.bump(major)?, 0, 0, fresh(), self.loose),
            Level::PreMinor => Version::from_parts(major, self.bump(minor)?, 0, fresh(), self.loose),
            Level::PreRelease if has_pre => {
                let mut pre = self.pre_release.clone();
                match pre.iter().rposition(Identifier::is_numeric) {
                    Some(pos) => {
                        if let Some(next) = pre[pos].successor() {
                            pre[pos] = next;
                        }
                    }
                    None => pre.push(Identifier::Numeric(0)),
                }
                if let Some(id) = &identifier {
                    let keep = pre.first() == Some(id) && pre.get(1).map_or(false, Identifier::is_numeric);
                    if !keep {
                        pre = fresh();
                    }
                }
                Version::from_parts(major, minor, patch, pre, self.loose)
            }
            Level::PrePatch | Level::PreRelease => {
                Version::from_parts(major, minor, self.bump(patch)?, fresh(), self.loose)
            }
        };

        Ok(next)
    }

    fn release(&self, major: u64, minor: u64, patch: u64) -> Version {
        Version::from_parts(major, minor, patch, Vec::new(), self.loose)
    }

    fn bump(&self, n: u64) -> Result<u64, VersionError> {
        n.checked_add(1)
            .ok_or_else(|| VersionError::invalid(&self.to_string(), "component overflows"))
    }
}

fn parse_number(text: &str, name: &str, digits: &str, loose: bool) -> Result<u64, VersionError> {
    if !loose && digits.len() > 1 && digits.starts_with('0') {
        return Err(VersionError::invalid(text, format!("{} has leading zeros", name)));
    }
    digits
        .parse::<u64>()
        .map_err(|_| VersionError::invalid(text, format!("{} is too large", name)))
}

/// Split whatever follows `major.minor.patch` into pre-release and build
fn parse_suffix(text: &str, etc: &str, loose: bool) -> Result<(Vec<Identifier>, Vec<Identifier>), VersionError> {
    if etc.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }

    let pre_body = match etc.strip_prefix('-') {
        Some(body) => Some(body),
        None if loose && !etc.starts_with('+') => Some(etc),
        None => None,
    };

    let (pre_segment, rest) = match pre_body {
        Some(body) => match body.find('+') {
            Some(pos) => (Some(&body[..pos]), &body[pos..]),
            None => (Some(body), ""),
        },
        None => (None, etc),
    };

    let pre_release = match pre_segment {
        Some(segment) => identifier::parse_list(segment, |part| Identifier::parse_pre_release(part, loose))
            .map_err(|reason| VersionError::invalid(text, format!("pre-release \"{}\": {}", segment, reason)))?,
        None => Vec::new(),
    };

    let build = match rest.strip_prefix('+') {
        Some(segment) => identifier::parse_list(segment, Identifier::parse_build)
            .map_err(|reason| VersionError::invalid(text, format!("build \"{}\": {}", segment, reason)))?,
        None if rest.is_empty() => Vec::new(),
        None => return Err(VersionError::invalid(text, format!("unexpected \"{}\"", rest))),
    };

    Ok((pre_release, build))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", identifier::join(&self.pre_release))?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", identifier::join(&self.build))?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s, false)
    }
}

impl Ord for Version {
    /// Precedence first, then build metadata with the same list rule as
    /// pre-releases.
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_precedence(other)
            .then_with(|| compare_lists(&self.build, &other.build))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialEq<str> for Version {
    fn eq(&self, other: &str) -> bool {
        Version::parse(other, self.loose).map_or(false, |other| *self == other)
    }
}

impl PartialEq<&str> for Version {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.triple().hash(state);
        self.pre_release.hash(state);
        self.build.hash(state);
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Version::parse(&text, false).map_err(serde::de::Error::custom)
    }
}

/// Anything a version can be compared against.
///
/// Strings are parsed with the loose flag of the version they are compared
/// to. JSON values must be strings.
pub trait Comparand {
    fn to_version(&self, loose: bool) -> Result<Cow<'_, Version>, VersionError>;
}

impl Comparand for Version {
    fn to_version(&self, _loose: bool) -> Result<Cow<'_, Version>, VersionError> {
        Ok(Cow::Borrowed(self))
    }
}

impl Comparand for str {
    fn to_version(&self, loose: bool) -> Result<Cow<'_, Version>, VersionError> {
        Version::parse(self, loose).map(Cow::Owned)
    }
}

impl Comparand for String {
    fn to_version(&self, loose: bool) -> Result<Cow<'_, Version>, VersionError> {
        self.as_str().to_version(loose)
    }
}

impl Comparand for serde_json::Value {
    fn to_version(&self, loose: bool) -> Result<Cow<'_, Version>, VersionError> {
        match self {
            serde_json::Value::String(s) => s.to_version(loose),
            other => Err(VersionError::TypeMismatch(other.to_string())),
        }
    }
}
