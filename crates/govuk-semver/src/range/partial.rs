//! Partial versions and their desugaring into comparators

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::operator::Prefix;
use super::{Comparator, Operator, RangeError};
use crate::identifier::{self, Identifier};
use crate::Version;

lazy_static! {
    static ref PARTIAL_RE: Regex = Regex::new(
        r"^v?(0|[1-9][0-9]*|[xX*])(?:\.(0|[1-9][0-9]*|[xX*])(?:\.(0|[1-9][0-9]*|[xX*])(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?)?)?$"
    ).unwrap();

    // The pre-release is either `-` and identifiers, or identifiers that
    // start with a letter and no dash (`1.2.3beta`)
    static ref LOOSE_PARTIAL_RE: Regex = Regex::new(
        r"^v?([0-9]+|[xX*])(?:\.([0-9]+|[xX*])(?:\.([0-9]+|[xX*])(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)|([A-Za-z][0-9A-Za-z-]*(?:\.[0-9A-Za-z-]+)*))?(?:\+[0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*)?)?)?$"
    ).unwrap();
}

/// A version that may stop early or use `x`/`*` wildcards. Once a component
/// is a wildcard every later one is too. Build metadata is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre_release: Vec<Identifier>,
}

impl Partial {
    pub(crate) fn parse(text: &str, loose: bool) -> Result<Self, RangeError> {
        let re = if loose { &*LOOSE_PARTIAL_RE } else { &*PARTIAL_RE };
        let caps = re
            .captures(text)
            .ok_or_else(|| RangeError::InvalidComparator(text.to_string()))?;

        let major = component(&caps, 1, text)?;
        let minor = match major {
            Some(_) => component(&caps, 2, text)?,
            None => None,
        };
        let patch = match minor {
            Some(_) => component(&caps, 3, text)?,
            None => None,
        };
        let pre_release = match (patch, caps.get(4).or_else(|| caps.get(5))) {
            (Some(_), Some(m)) => {
                identifier::parse_list(m.as_str(), |part| Identifier::parse_pre_release(part, loose))
                    .map_err(|_| RangeError::InvalidComparator(text.to_string()))?
            }
            _ => Vec::new(),
        };

        Ok(Partial {
            major,
            minor,
            patch,
            pre_release,
        })
    }

    /// Expand a clause written with `prefix` into its comparators. An empty
    /// result matches every version.
    pub(crate) fn desugar(&self, prefix: Prefix, text: &str) -> Result<Vec<Comparator>, RangeError> {
        match prefix {
            Prefix::Exact => self.x_range(None, text),
            Prefix::Primitive(op) => self.x_range(Some(op), text),
            Prefix::Tilde => self.tilde(text),
            Prefix::Caret => self.caret(text),
        }
    }

    fn x_range(&self, op: Option<Operator>, text: &str) -> Result<Vec<Comparator>, RangeError> {
        let (major, minor) = match (self.major, self.minor, self.patch) {
            (Some(major), Some(minor), Some(patch)) => {
                let version = at(major, minor, patch, self.pre_release.clone());
                return Ok(vec![Comparator::new(op.unwrap_or(Operator::Equal), version)]);
            }
            (None, _, _) => {
                return Ok(match op {
                    Some(Operator::LessThan) | Some(Operator::GreaterThan) => {
                        vec![Comparator::new(Operator::LessThan, at(0, 0, 0, zero()))]
                    }
                    _ => Vec::new(),
                });
            }
            (Some(major), minor, _) => (major, minor),
        };

        let comparators = match (op, minor) {
            (None | Some(Operator::Equal), Some(minor)) => vec![
                gte(at(major, minor, 0, Vec::new())),
                lt(at(major, next(minor, text)?, 0, zero())),
            ],
            (None | Some(Operator::Equal), None) => vec![
                gte(at(major, 0, 0, Vec::new())),
                lt(at(next(major, text)?, 0, 0, zero())),
            ],
            (Some(Operator::GreaterThan), Some(minor)) => vec![gte(at(major, next(minor, text)?, 0, Vec::new()))],
            (Some(Operator::GreaterThan), None) => vec![gte(at(next(major, text)?, 0, 0, Vec::new()))],
            (Some(Operator::GreaterThanOrEqual), minor) => vec![gte(at(major, minor.unwrap_or(0), 0, Vec::new()))],
            (Some(Operator::LessThanOrEqual), Some(minor)) => vec![lt(at(major, next(minor, text)?, 0, zero()))],
            (Some(Operator::LessThanOrEqual), None) => vec![lt(at(next(major, text)?, 0, 0, zero()))],
            (Some(Operator::LessThan), minor) => vec![lt(at(major, minor.unwrap_or(0), 0, zero()))],
        };
        Ok(comparators)
    }

    fn tilde(&self, text: &str) -> Result<Vec<Comparator>, RangeError> {
        Ok(match (self.major, self.minor, self.patch) {
            (None, _, _) => Vec::new(),
            (Some(major), None, _) => vec![
                gte(at(major, 0, 0, Vec::new())),
                lt(at(next(major, text)?, 0, 0, zero())),
            ],
            (Some(major), Some(minor), patch) => vec![
                gte(at(major, minor, patch.unwrap_or(0), self.pre_release.clone())),
                lt(at(major, next(minor, text)?, 0, zero())),
            ],
        })
    }

    fn caret(&self, text: &str) -> Result<Vec<Comparator>, RangeError> {
        Ok(match (self.major, self.minor, self.patch) {
            (None, _, _) => Vec::new(),
            (Some(major), None, _) => vec![
                gte(at(major, 0, 0, Vec::new())),
                lt(at(next(major, text)?, 0, 0, zero())),
            ],
            (Some(0), Some(minor), None) => vec![
                gte(at(0, minor, 0, Vec::new())),
                lt(at(0, next(minor, text)?, 0, zero())),
            ],
            (Some(major), Some(minor), None) => vec![
                gte(at(major, minor, 0, Vec::new())),
                lt(at(next(major, text)?, 0, 0, zero())),
            ],
            (Some(major), Some(minor), Some(patch)) => {
                let upper = match (major, minor) {
                    (0, 0) => at(0, 0, next(patch, text)?, zero()),
                    (0, _) => at(0, next(minor, text)?, 0, zero()),
                    _ => at(next(major, text)?, 0, 0, zero()),
                };
                vec![gte(at(major, minor, patch, self.pre_release.clone())), lt(upper)]
            }
        })
    }

    /// `from - to`: a short lower bound is padded with zeros, a short upper
    /// bound becomes exclusive at the next minor or major.
    pub(crate) fn hyphen(from: &Partial, to: &Partial, text: &str) -> Result<Vec<Comparator>, RangeError> {
        let mut comparators = Vec::with_capacity(2);

        if let Some(major) = from.major {
            let version = match (from.minor, from.patch) {
                (Some(minor), Some(patch)) => at(major, minor, patch, from.pre_release.clone()),
                (minor, _) => at(major, minor.unwrap_or(0), 0, Vec::new()),
            };
            comparators.push(gte(version));
        }

        if let Some(major) = to.major {
            comparators.push(match (to.minor, to.patch) {
                (None, _) => lt(at(next(major, text)?, 0, 0, zero())),
                (Some(minor), None) => lt(at(major, next(minor, text)?, 0, zero())),
                (Some(minor), Some(patch)) => Comparator::new(
                    Operator::LessThanOrEqual,
                    at(major, minor, patch, to.pre_release.clone()),
                ),
            });
        }

        Ok(comparators)
    }
}

fn component(caps: &Captures<'_>, index: usize, text: &str) -> Result<Option<u64>, RangeError> {
    match caps.get(index).map(|m| m.as_str()) {
        None | Some("x") | Some("X") | Some("*") => Ok(None),
        Some(digits) => digits
            .parse::<u64>()
            .map(Some)
            .map_err(|_| RangeError::InvalidComparator(text.to_string())),
    }
}

fn next(n: u64, text: &str) -> Result<u64, RangeError> {
    n.checked_add(1)
        .ok_or_else(|| RangeError::InvalidComparator(text.to_string()))
}

fn at(major: u64, minor: u64, patch: u64, pre_release: Vec<Identifier>) -> Version {
    Version::from_parts(major, minor, patch, pre_release, false)
}

/// The `-0` pre-release: the lowest version of a given `major.minor.patch`
fn zero() -> Vec<Identifier> {
    vec![Identifier::Numeric(0)]
}

fn gte(version: Version) -> Comparator {
    Comparator::new(Operator::GreaterThanOrEqual, version)
}

fn lt(version: Version) -> Comparator {
    Comparator::new(Operator::LessThan, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(prefix: &str, partial: &str) -> String {
        let prefix = Prefix::parse(prefix).unwrap();
        let partial = Partial::parse(partial, false).unwrap();
        partial
            .desugar(prefix, "test")
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_parse_partial() {
        let p = Partial::parse("1.x.3", false).unwrap();
        assert_eq!((p.major, p.minor, p.patch), (Some(1), None, None));
        let p = Partial::parse("v1.2.3-beta.1+build", false).unwrap();
        assert_eq!((p.major, p.minor, p.patch), (Some(1), Some(2), Some(3)));
        assert_eq!(p.pre_release.len(), 2);
        let p = Partial::parse("*", false).unwrap();
        assert_eq!(p.major, None);
    }

    #[test]
    fn test_parse_partial_strictness() {
        assert!(Partial::parse("01.2.3", false).is_err());
        assert!(Partial::parse("1.2.3pre", false).is_err());
        assert!(Partial::parse("1.2.3-01", false).is_err());
        assert!(Partial::parse("01.2.3", true).is_ok());
        assert_eq!(Partial::parse("1.2.3pre", true).unwrap().pre_release.len(), 1);
        assert!(Partial::parse("", false).is_err());
        assert!(Partial::parse("1.2.3.4", false).is_err());
    }

    #[test]
    fn test_x_ranges() {
        assert_eq!(expand("", "*"), "");
        assert_eq!(expand("", "1"), ">=1.0.0 <2.0.0-0");
        assert_eq!(expand("", "1.2"), ">=1.2.0 <1.3.0-0");
        assert_eq!(expand("", "1.2.3"), "1.2.3");
        assert_eq!(expand("=", "0.7.x"), ">=0.7.0 <0.8.0-0");
        assert_eq!(expand(">", "1"), ">=2.0.0");
        assert_eq!(expand(">", "1.2"), ">=1.3.0");
        assert_eq!(expand(">=", "1.2"), ">=1.2.0");
        assert_eq!(expand("<=", "1.2"), "<1.3.0-0");
        assert_eq!(expand("<=", "1"), "<2.0.0-0");
        assert_eq!(expand("<", "1.x"), "<1.0.0-0");
        assert_eq!(expand(">", "*"), "<0.0.0-0");
        assert_eq!(expand("<", "*"), "<0.0.0-0");
        assert_eq!(expand(">=", "*"), "");
        assert_eq!(expand(">", "1.2.3"), ">1.2.3");
    }

    #[test]
    fn test_tilde() {
        assert_eq!(expand("~", "1"), ">=1.0.0 <2.0.0-0");
        assert_eq!(expand("~", "1.2"), ">=1.2.0 <1.3.0-0");
        assert_eq!(expand("~", "1.2.3"), ">=1.2.3 <1.3.0-0");
        assert_eq!(expand("~>", "0.5.4-pre"), ">=0.5.4-pre <0.6.0-0");
        assert_eq!(expand("~", "x"), "");
    }

    #[test]
    fn test_caret() {
        assert_eq!(expand("^", "1.2.3"), ">=1.2.3 <2.0.0-0");
        assert_eq!(expand("^", "0.2.3"), ">=0.2.3 <0.3.0-0");
        assert_eq!(expand("^", "0.0.3"), ">=0.0.3 <0.0.4-0");
        assert_eq!(expand("^", "1.x"), ">=1.0.0 <2.0.0-0");
        assert_eq!(expand("^", "0.x"), ">=0.0.0 <1.0.0-0");
        assert_eq!(expand("^", "0.0"), ">=0.0.0 <0.1.0-0");
        assert_eq!(expand("^", "1.2"), ">=1.2.0 <2.0.0-0");
        assert_eq!(expand("^", "0.0.1-alpha"), ">=0.0.1-alpha <0.0.2-0");
    }

    #[test]
    fn test_hyphen() {
        let show = |from: &str, to: &str| {
            let from = Partial::parse(from, false).unwrap();
            let to = Partial::parse(to, false).unwrap();
            Partial::hyphen(&from, &to, "test")
                .unwrap()
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        assert_eq!(show("1.2.3", "2.3.4"), ">=1.2.3 <=2.3.4");
        assert_eq!(show("1.2", "2.3.4"), ">=1.2.0 <=2.3.4");
        assert_eq!(show("1.2.3", "2.3"), ">=1.2.3 <2.4.0-0");
        assert_eq!(show("1.2.3", "2"), ">=1.2.3 <3.0.0-0");
        assert_eq!(show("*", "2.3.4"), "<=2.3.4");
        assert_eq!(show("1.2.3", "x"), ">=1.2.3");
        assert_eq!(show("1.2.3-pre+asdf", "2.4.3-pre+asdf"), ">=1.2.3-pre <=2.4.3-pre");
    }
}
