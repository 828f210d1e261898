//! Range - OR of AND comparator sets

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::operator::Prefix;
use super::partial::Partial;
use super::Comparator;
use crate::{Comparand, Version, VersionError};

/// Error type for range parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Unsupported range operator \"{0}\"")]
    UnsupportedOperator(String),
    #[error("Invalid comparator \"{0}\"")]
    InvalidComparator(String),
    #[error("{0}")]
    Version(VersionError),
}

impl From<VersionError> for RangeError {
    fn from(err: VersionError) -> Self {
        RangeError::Version(err)
    }
}

lazy_static! {
    static ref HYPHEN_RE: Regex = Regex::new(r"^\s*(\S+)\s+-\s+(\S+)\s*$").unwrap();

    // Glue an operator to the version that follows it (`>= 1.2` -> `>=1.2`).
    // A second operator is left apart so `> =1.2` fails.
    static ref OPERATOR_TRIM_RE: Regex = Regex::new(r"([<>=!~^]+)\s+([^<>=!~^\s])").unwrap();

    static ref CLAUSE_RE: Regex = Regex::new(r"^([<>=!~^]*)(.*)$").unwrap();
}

/// A node-style version range.
///
/// ```text
/// range-set  ::= range ( '||' range ) *
/// range      ::= hyphen | simple ( ' ' simple ) * | ''
/// hyphen     ::= partial ' - ' partial
/// simple     ::= ( '<' | '>' | '>=' | '<=' | '=' | '~' | '~>' | '^' )? partial
/// partial    ::= xr ( '.' xr ( '.' xr qualifier ? )? )?
/// xr         ::= 'x' | 'X' | '*' | nr
/// ```
///
/// Each group is desugared into comparators on parse, so matching never looks
/// at the pattern again.
#[derive(Debug, Clone)]
pub struct Range {
    pattern: String,
    loose: bool,
    groups: Vec<Vec<Comparator>>,
}

impl Range {
    /// Parse a range pattern
    pub fn parse(pattern: &str, loose: bool) -> Result<Self, RangeError> {
        let groups = pattern
            .split("||")
            .map(|group| parse_group(group, loose))
            .collect::<Result<Vec<_>, _>>()?;

        let range = Range {
            pattern: pattern.to_string(),
            loose,
            groups,
        };
        log::debug!("Range \"{}\" desugars to {}", range.pattern, range);
        Ok(range)
    }

    /// The pattern this range was parsed from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_loose(&self) -> bool {
        self.loose
    }

    /// Desugared comparator sets, one per `||` group. An empty set matches
    /// everything.
    pub fn groups(&self) -> &[Vec<Comparator>] {
        &self.groups
    }

    /// Check whether a parsed version satisfies any group
    pub fn matches(&self, version: &Version) -> bool {
        self.groups.iter().any(|group| test_group(group, version))
    }

    /// Like [`Range::matches`], parsing strings with this range's loose flag
    pub fn contains<C: Comparand + ?Sized>(&self, version: &C) -> Result<bool, VersionError> {
        let version = version.to_version(self.loose)?;
        Ok(self.matches(&version))
    }

    /// Highest candidate in the range by strict ordering, `None` if nothing
    /// matches. Any unparseable candidate is an error.
    pub fn highest_version<I, S>(&self, candidates: I) -> Result<Option<Version>, VersionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut highest: Option<Version> = None;
        for candidate in candidates {
            let version = Version::parse(candidate.as_ref(), self.loose)?;
            if !self.matches(&version) {
                log::trace!("{} is not in range {}", version, self);
                continue;
            }
            if highest.as_ref().map_or(true, |best| version > *best) {
                highest = Some(version);
            }
        }
        Ok(highest)
    }
}

fn parse_group(group: &str, loose: bool) -> Result<Vec<Comparator>, RangeError> {
    if let Some(caps) = HYPHEN_RE.captures(group) {
        let from = Partial::parse(&caps[1], loose)?;
        let to = Partial::parse(&caps[2], loose)?;
        return Partial::hyphen(&from, &to, group.trim());
    }

    let glued = OPERATOR_TRIM_RE.replace_all(group.trim(), "${1}${2}");
    let mut comparators = Vec::new();
    for clause in glued.split_whitespace() {
        let caps = CLAUSE_RE
            .captures(clause)
            .ok_or_else(|| RangeError::InvalidComparator(clause.to_string()))?;
        let prefix = Prefix::parse(&caps[1])?;
        let partial = Partial::parse(&caps[2], loose)?;
        comparators.extend(partial.desugar(prefix, clause)?);
    }
    Ok(comparators)
}

/// Every comparator must hold. A pre-release version additionally needs a
/// comparator that names a pre-release of the same `major.minor.patch`.
fn test_group(group: &[Comparator], version: &Version) -> bool {
    if !group.iter().all(|c| c.test(version)) {
        return false;
    }
    if !version.is_pre_release() {
        return true;
    }
    group.iter().any(|c| {
        let bound = c.version();
        bound.is_pre_release()
            && bound.major() == version.major()
            && bound.minor() == version.minor()
            && bound.patch() == version.patch()
    })
}

impl FromStr for Range {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::parse(s, false)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<String> = self
            .groups
            .iter()
            .map(|group| {
                if group.is_empty() {
                    "*".to_string()
                } else {
                    group.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
                }
            })
            .collect();
        write!(f, "{}", groups.join(" || "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(pattern: &str) -> Range {
        Range::parse(pattern, false).unwrap()
    }

    #[test]
    fn test_range_matches() {
        let data = [
            ("1.0.0 - 2.0.0", "1.2.3"),
            ("^1.2.3+build", "1.2.3"),
            ("^1.2.3+build", "1.3.0"),
            ("1.2.3-pre+asdf - 2.4.3-pre+asdf", "1.2.3"),
            ("1.2.3-pre+asdf - 2.4.3-pre+asdf", "1.2.3-pre.2"),
            ("1.2.3-pre+asdf - 2.4.3-pre+asdf", "2.4.3-alpha"),
            ("1.2.3+asdf - 2.4.3+asdf", "1.2.3"),
            ("1.0.0", "1.0.0"),
            (">=*", "0.2.4"),
            ("", "1.0.0"),
            ("*", "1.2.3"),
            (">=1.0.0", "1.0.0"),
            (">=1.0.0", "1.0.1"),
            (">=1.0.0", "1.1.0"),
            (">1.0.0", "1.0.1"),
            (">1.0.0", "1.1.0"),
            ("<=2.0.0", "2.0.0"),
            ("<=2.0.0", "1.9999.9999"),
            ("<=2.0.0", "0.2.9"),
            ("<2.0.0", "1.9999.9999"),
            ("<2.0.0", "0.2.9"),
            (">= 1.0.0", "1.0.0"),
            (">=  1.0.0", "1.0.1"),
            (">=   1.0.0", "1.1.0"),
            ("> 1.0.0", "1.0.1"),
            (">  1.0.0", "1.1.0"),
            ("<=   2.0.0", "2.0.0"),
            ("<= 2.0.0", "1.9999.9999"),
            ("<=  2.0.0", "0.2.9"),
            ("<    2.0.0", "1.9999.9999"),
            ("<\t2.0.0", "0.2.9"),
            (">=0.1.97", "0.1.97"),
            ("0.1.20 || 1.2.4", "1.2.4"),
            (">=0.2.3 || <0.0.1", "0.0.0"),
            (">=0.2.3 || <0.0.1", "0.2.3"),
            (">=0.2.3 || <0.0.1", "0.2.4"),
            ("||", "1.3.4"),
            ("2.x.x", "2.1.3"),
            ("1.2.x", "1.2.3"),
            ("1.2.x || 2.x", "2.1.3"),
            ("1.2.x || 2.x", "1.2.3"),
            ("x", "1.2.3"),
            ("2.*.*", "2.1.3"),
            ("1.2.*", "1.2.3"),
            ("1.2.* || 2.*", "2.1.3"),
            ("1.2.* || 2.*", "1.2.3"),
            ("2", "2.1.2"),
            ("2.3", "2.3.1"),
            ("~2.4", "2.4.0"),
            ("~2.4", "2.4.5"),
            ("~>3.2.1", "3.2.2"),
            ("~1", "1.2.3"),
            ("~>1", "1.2.3"),
            ("~> 1", "1.2.3"),
            ("~1.0", "1.0.2"),
            ("~ 1.0", "1.0.2"),
            ("~ 1.0.3", "1.0.12"),
            (">=1", "1.0.0"),
            (">= 1", "1.0.0"),
            ("<1.2", "1.1.1"),
            ("< 1.2", "1.1.1"),
            ("~v0.5.4-pre", "0.5.5"),
            ("~v0.5.4-pre", "0.5.4"),
            ("=0.7.x", "0.7.2"),
            ("<=0.7.x", "0.7.2"),
            (">=0.7.x", "0.7.2"),
            ("<=0.7.x", "0.6.2"),
            ("~1.2.1 >=1.2.3", "1.2.3"),
            ("~1.2.1 =1.2.3", "1.2.3"),
            ("~1.2.1 1.2.3", "1.2.3"),
            ("~1.2.1 >=1.2.3 1.2.3", "1.2.3"),
            ("~1.2.1 1.2.3 >=1.2.3", "1.2.3"),
            (">=1.2.1 1.2.3", "1.2.3"),
            ("1.2.3 >=1.2.1", "1.2.3"),
            (">=1.2.3 >=1.2.1", "1.2.3"),
            (">=1.2.1 >=1.2.3", "1.2.3"),
            (">=1.2", "1.2.8"),
            ("^1.2.3", "1.8.1"),
            ("^0.1.2", "0.1.2"),
            ("^0.1", "0.1.2"),
            ("^1.2", "1.4.2"),
            ("^1.2 ^1", "1.4.2"),
            ("^1.2.3-alpha", "1.2.3-pre"),
            ("^1.2.0-alpha", "1.2.0-pre"),
            ("^0.0.1-alpha", "0.0.1-beta"),
        ];
        for (pattern, version) in data {
            assert!(
                range(pattern).contains(version).unwrap(),
                "{} should contain {} (desugared: {})",
                pattern,
                version,
                range(pattern)
            );
        }
    }

    #[test]
    fn test_range_rejects() {
        let data = [
            ("1.0.0 - 2.0.0", "2.2.3"),
            ("1.2.3+asdf - 2.4.3+asdf", "2.4.3-alpha"),
            ("^1.2.3+build", "2.0.0"),
            ("^1.2.3+build", "1.2.0"),
            ("^1.2.3", "1.2.3-pre"),
            ("^1.2", "1.2.0-pre"),
            (">1.2", "1.3.0-beta"),
            ("<=1.2.3", "1.2.3-beta"),
            ("^1.2.3", "2.0.0-alpha"),
            ("1.0.0", "1.0.1"),
            (">=1.0.0", "0.0.0"),
            (">=1.0.0", "0.1.0"),
            (">1.0.0", "0.0.1"),
            ("<=2.0.0", "3.0.0"),
            ("<=2.0.0", "2.9999.9999"),
            ("<2.0.0", "2.2.9"),
            (">=0.1.97", "0.1.93"),
            ("0.1.20 || 1.2.4", "1.2.3"),
            (">=0.2.3 || <0.0.1", "0.0.3"),
            (">=0.2.3 || <0.0.1", "0.2.2"),
            ("2.x.x", "1.1.3"),
            ("2.x.x", "3.1.3"),
            ("1.2.x", "1.3.3"),
            ("1.2.x || 2.x", "3.1.3"),
            ("1.2.x || 2.x", "1.1.3"),
            ("2", "1.1.2"),
            ("2.3", "2.4.1"),
            ("~2.4", "2.5.0"),
            ("~2.4", "2.3.9"),
            ("~>3.2.1", "3.3.2"),
            ("~>3.2.1", "3.2.0"),
            ("~1", "0.2.3"),
            ("~>1", "2.2.3"),
            ("~1.0", "1.1.0"),
            ("<1", "1.0.0"),
            (">=1.2", "1.1.1"),
            ("~v0.5.4-beta", "0.5.4-alpha"),
            ("=0.7.x", "0.8.2"),
            (">=0.7.x", "0.6.2"),
            ("<0.7.x", "0.7.2"),
            ("<1.2.3", "1.2.3-beta"),
            ("=1.2.3", "1.2.3-beta"),
            (">1.2", "1.2.8"),
            ("^0.0.1", "0.0.2"),
            ("^1.2.3", "2.0.0"),
            ("^1.2.3", "1.2.2"),
            ("^1.2", "1.1.9"),
            (">*", "1.0.0"),
            ("<*", "0.0.0"),
        ];
        for (pattern, version) in data {
            assert!(
                !range(pattern).contains(version).unwrap(),
                "{} should not contain {} (desugared: {})",
                pattern,
                version,
                range(pattern)
            );
        }
    }

    #[test]
    fn test_loose_range_matches() {
        let data = [
            ("1.2.3pre+asdf - 2.4.3-pre+asdf", "1.2.3"),
            ("1.2.3-pre+asdf - 2.4.3pre+asdf", "1.2.3"),
            ("1.2.3pre+asdf - 2.4.3pre+asdf", "1.2.3"),
            ("*", "v1.2.3"),
            (">=0.1.97", "v0.1.97"),
            (">=01.02.03", "1.2.3"),
        ];
        for (pattern, version) in data {
            let range = Range::parse(pattern, true).unwrap();
            assert!(range.contains(version).unwrap(), "{} should contain {}", pattern, version);
        }
        assert!(Range::parse("1.2.3pre - 2.4.3", false).is_err());
    }

    #[test]
    fn test_unsupported_operators() {
        for pattern in ["!=1.2.3", "==1.2.3", "<>1.0", "~=1.2", ">=1.0.0 != 1.2.0"] {
            assert!(
                matches!(Range::parse(pattern, false), Err(RangeError::UnsupportedOperator(_))),
                "{} should fail with an unsupported operator",
                pattern
            );
        }
    }

    #[test]
    fn test_invalid_comparators() {
        for pattern in ["blerg", "1.2.3.4", ">=", "1.2.3 -2.0.0", "01.2.3"] {
            assert!(
                matches!(Range::parse(pattern, false), Err(RangeError::InvalidComparator(_))),
                "{} should fail with an invalid comparator",
                pattern
            );
        }
    }

    #[test]
    fn test_split_operators_are_rejected() {
        for pattern in ["> =1.0.0", "< =2.0.0", ">= ~1.2"] {
            assert!(Range::parse(pattern, false).is_err(), "{} should not parse", pattern);
        }
        assert_eq!(range(">=  1.0.0 <   2.0.0").to_string(), ">=1.0.0 <2.0.0");
        assert_eq!(range("~> 1.2").to_string(), ">=1.2.0 <1.3.0-0");
    }

    #[test]
    fn test_loose_trailing_dash_is_rejected() {
        assert!(matches!(Range::parse("1.2.3-", true), Err(RangeError::InvalidComparator(_))));
        assert!(Version::parse("1.2.3-", true).is_err());
        assert_eq!(Range::parse("1.2.3--", true).unwrap().to_string(), "1.2.3--");
        assert_eq!(Range::parse("1.2.3beta", true).unwrap().to_string(), "1.2.3-beta");
    }

    #[test]
    fn test_non_ascii_digits_are_rejected() {
        for loose in [false, true] {
            assert!(matches!(Range::parse("1.2.\u{663}", loose), Err(RangeError::InvalidComparator(_))));
            assert!(matches!(Range::parse("^\u{661}", loose), Err(RangeError::InvalidComparator(_))));
        }
    }

    #[test]
    fn test_contains_surfaces_bad_versions() {
        let range = range("^1.0.0");
        assert!(matches!(range.contains("nope"), Err(VersionError::InvalidVersion { .. })));
        assert!(matches!(range.contains(&serde_json::json!(1)), Err(VersionError::TypeMismatch(_))));
        assert!(range.contains(&Version::parse("1.5.0", false).unwrap()).unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(range("^1.2.3 || 2.x").to_string(), ">=1.2.3 <2.0.0-0 || >=2.0.0 <3.0.0-0");
        assert_eq!(range("").to_string(), "*");
        assert_eq!(range("1.2.3 - 2.3").to_string(), ">=1.2.3 <2.4.0-0");
        assert_eq!(range(">= 1.2.3").pattern(), ">= 1.2.3");
    }

    #[test]
    fn test_highest_version() {
        let any = range("*");
        let best = any.highest_version(["1.0.0", "1.2.0", "0.9.0"]).unwrap();
        assert_eq!(best.unwrap(), "1.2.0");

        let caret = range("^1.0.0");
        let best = caret.highest_version(vec!["1.0.0", "2.0.0", "1.9.3", "1.10.0-beta"]).unwrap();
        assert_eq!(best.unwrap().to_string(), "1.9.3");

        assert_eq!(range(">=3.0.0").highest_version(["1.0.0"]).unwrap(), None);
        assert!(any.highest_version(["1.0.0", "garbage"]).is_err());
    }

    #[test]
    fn test_highest_version_breaks_ties_on_build() {
        let best = range("1.2.3").highest_version(["1.2.3+b", "1.2.3", "1.2.3+a"]).unwrap();
        assert_eq!(best.unwrap().to_string(), "1.2.3");
    }
}
