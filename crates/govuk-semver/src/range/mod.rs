//! Range types for version matching

mod comparator;
mod operator;
mod partial;
#[allow(clippy::module_inception)]
mod range;

pub use comparator::Comparator;
pub use operator::Operator;
pub use range::{Range, RangeError};
