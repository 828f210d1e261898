//! Semantic version parsing, ordering and range matching
//!
//! Versions follow Semantic Versioning 2.0.0, with an optional loose mode
//! for the sloppier strings found in the wild. Ranges use the npm range
//! grammar (hyphen ranges, x-ranges, `~` and `^`, `||` alternatives).

pub mod identifier;
mod level;
pub mod range;
pub mod registry;
mod semver;
mod version;

pub use identifier::Identifier;
pub use level::Level;
pub use range::{Comparator, Operator, Range, RangeError};
pub use semver::Semver;
pub use version::{Comparand, Version, VersionError};
