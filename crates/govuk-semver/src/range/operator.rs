//! Operator types for range comparators

use std::cmp::Ordering;
use std::fmt;

use super::RangeError;

/// Comparison operators a desugared comparator can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (=)
    Equal,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
}

impl Operator {
    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
        }
    }

    /// Whether `ordering` (candidate compared to bound) satisfies the operator
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Operator::Equal => ordering == Ordering::Equal,
            Operator::LessThan => ordering == Ordering::Less,
            Operator::LessThanOrEqual => ordering != Ordering::Greater,
            Operator::GreaterThan => ordering == Ordering::Greater,
            Operator::GreaterThanOrEqual => ordering != Ordering::Less,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The operator written in front of a range clause, before desugaring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Prefix {
    /// No operator or `=`
    Exact,
    Primitive(Operator),
    /// `~` or `~>`
    Tilde,
    /// `^`
    Caret,
}

impl Prefix {
    pub(crate) fn parse(s: &str) -> Result<Self, RangeError> {
        match s {
            "" | "=" => Ok(Prefix::Exact),
            "<" => Ok(Prefix::Primitive(Operator::LessThan)),
            "<=" => Ok(Prefix::Primitive(Operator::LessThanOrEqual)),
            ">" => Ok(Prefix::Primitive(Operator::GreaterThan)),
            ">=" => Ok(Prefix::Primitive(Operator::GreaterThanOrEqual)),
            "~" | "~>" => Ok(Prefix::Tilde),
            "^" => Ok(Prefix::Caret),
            _ => Err(RangeError::UnsupportedOperator(s.to_string())),
        }
    }
}
