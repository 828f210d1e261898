//! A single desugared range clause

use std::fmt;

use super::Operator;
use crate::Version;

/// An operator paired with a bound version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    operator: Operator,
    version: Version,
}

impl Comparator {
    pub fn new(operator: Operator, version: Version) -> Self {
        Comparator { operator, version }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Test a version against this clause. Build metadata is ignored.
    pub fn test(&self, version: &Version) -> bool {
        self.operator.accepts(version.cmp_precedence(&self.version))
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator {
            Operator::Equal => write!(f, "{}", self.version),
            op => write!(f, "{}{}", op, self.version),
        }
    }
}
