//! Pre-release and build identifiers

use std::cmp::Ordering;
use std::fmt;

/// A single dot-separated identifier of a pre-release or build segment.
///
/// Numeric identifiers too large for a `u64` keep their digits as text and
/// still rank as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Numeric(u64),
    LargeNumeric(String),
    AlphaNumeric(String),
}

impl Identifier {
    /// Check that `part` only holds `[0-9A-Za-z-]` and is not empty
    pub(crate) fn is_valid(part: &str) -> bool {
        !part.is_empty() && part.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    }

    /// Parse a pre-release identifier.
    ///
    /// Digit-only identifiers are numeric. Leading zeros are an error unless
    /// `loose` is set, in which case they are dropped.
    pub(crate) fn parse_pre_release(part: &str, loose: bool) -> Result<Self, String> {
        if !Self::is_valid(part) {
            return Err(format!("invalid identifier \"{}\"", part));
        }
        if !part.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Identifier::AlphaNumeric(part.to_string()));
        }
        if !loose && part.len() > 1 && part.starts_with('0') {
            return Err(format!("numeric identifier \"{}\" has leading zeros", part));
        }
        let digits = part.trim_start_matches('0');
        Ok(Self::from_digits(if digits.is_empty() { "0" } else { digits }))
    }

    /// Parse a build identifier. Leading zeros keep it alphanumeric so the
    /// original text survives.
    pub(crate) fn parse_build(part: &str) -> Result<Self, String> {
        if !Self::is_valid(part) {
            return Err(format!("invalid identifier \"{}\"", part));
        }
        let numeric = part.bytes().all(|b| b.is_ascii_digit()) && (part.len() == 1 || !part.starts_with('0'));
        if numeric {
            return Ok(Self::from_digits(part));
        }
        Ok(Identifier::AlphaNumeric(part.to_string()))
    }

    // `digits` is ASCII digits without leading zeros
    fn from_digits(digits: &str) -> Self {
        match digits.parse::<u64>() {
            Ok(value) => Identifier::Numeric(value),
            Err(_) => Identifier::LargeNumeric(digits.to_string()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Identifier::Numeric(_) | Identifier::LargeNumeric(_))
    }

    /// The next numeric identifier, `None` for alphanumeric ones
    pub(crate) fn successor(&self) -> Option<Identifier> {
        match self {
            Identifier::Numeric(n) => Some(match n.checked_add(1) {
                Some(next) => Identifier::Numeric(next),
                None => Identifier::LargeNumeric(increment_digits(&n.to_string())),
            }),
            Identifier::LargeNumeric(digits) => Some(Identifier::LargeNumeric(increment_digits(digits))),
            Identifier::AlphaNumeric(_) => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Identifier::Numeric(_) => 0,
            Identifier::LargeNumeric(_) => 1,
            Identifier::AlphaNumeric(_) => 2,
        }
    }
}

/// Numeric identifiers rank below alphanumeric ones and compare by value.
/// Alphanumeric identifiers compare byte-wise.
impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => a.cmp(b),
            (Identifier::LargeNumeric(a), Identifier::LargeNumeric(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Identifier::AlphaNumeric(a), Identifier::AlphaNumeric(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn increment_digits(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for b in bytes.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }
    format!("1{}", String::from_utf8_lossy(&bytes))
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::LargeNumeric(s) | Identifier::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

/// Split a dot-separated segment with the given identifier parser
pub(crate) fn parse_list<F>(segment: &str, parse: F) -> Result<Vec<Identifier>, String>
where
    F: Fn(&str) -> Result<Identifier, String>,
{
    segment.split('.').map(parse).collect()
}

/// Compare two identifier lists.
///
/// An empty list ranks above a non-empty one (a release outranks its
/// pre-releases). Otherwise lists compare element-wise and a strict prefix
/// ranks below the longer list.
pub fn compare_lists(a: &[Identifier], b: &[Identifier]) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

pub(crate) fn join(list: &[Identifier]) -> String {
    list.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(".")
}
