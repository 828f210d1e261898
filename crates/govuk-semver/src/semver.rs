//! Semver facade providing forgiving string-level operations

use crate::{Range, Version};

/// Facade over [`Version`] and [`Range`] that treats invalid input as "no
/// match" instead of an error
#[derive(Debug, Clone, Copy, Default)]
pub struct Semver {
    loose: bool,
}

impl Semver {
    /// Strict parsing
    pub fn strict() -> Self {
        Semver { loose: false }
    }

    /// Loose parsing (`v1.2.3`, `01.2.3`, `1.2.3beta`)
    pub fn loose() -> Self {
        Semver { loose: true }
    }

    pub fn is_loose(&self) -> bool {
        self.loose
    }

    /// Canonical form of a version, if it parses
    pub fn valid(&self, version: &str) -> Option<String> {
        Version::parse(version, self.loose).ok().map(|v| v.to_string())
    }

    /// Check if a version satisfies a range
    pub fn satisfies(&self, version: &str, range: &str) -> bool {
        let range = match Range::parse(range, self.loose) {
            Ok(r) => r,
            Err(_) => return false,
        };
        range.contains(version).unwrap_or(false)
    }

    /// Return all versions that satisfy the range, in input order
    pub fn satisfied_by(&self, versions: &[&str], range: &str) -> Vec<String> {
        let range = match Range::parse(range, self.loose) {
            Ok(r) => r,
            Err(_) => return Vec::new(),
        };

        versions
            .iter()
            .filter(|v| range.contains(**v).unwrap_or(false))
            .map(|v| v.to_string())
            .collect()
    }

    /// The highest version satisfying the range, as it was written
    pub fn max_satisfying(&self, versions: &[&str], range: &str) -> Option<String> {
        let range = Range::parse(range, self.loose).ok()?;

        versions
            .iter()
            .filter_map(|v| Some((Version::parse(v, self.loose).ok()?, *v)))
            .filter(|(version, _)| range.matches(version))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, original)| original.to_string())
    }

    /// Sort versions in ascending order, dropping invalid ones
    pub fn sort(&self, versions: &[&str]) -> Vec<String> {
        self.usort(versions, true)
    }

    /// Sort versions in descending order, dropping invalid ones
    pub fn rsort(&self, versions: &[&str]) -> Vec<String> {
        self.usort(versions, false)
    }

    fn usort(&self, versions: &[&str], ascending: bool) -> Vec<String> {
        let mut parsed: Vec<(Version, &str)> = versions
            .iter()
            .filter_map(|v| Some((Version::parse(v, self.loose).ok()?, *v)))
            .collect();

        // Stable sort keeps input order between equal versions
        parsed.sort_by(|(a, _), (b, _)| if ascending { a.cmp(b) } else { b.cmp(a) });

        parsed.into_iter().map(|(_, original)| original.to_string()).collect()
    }
}
