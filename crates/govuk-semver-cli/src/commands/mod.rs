//! Subcommands of the govuk-semver binary.

mod compare;
mod inc;
mod resolve;
mod satisfies;
mod sort;
mod valid;

use anyhow::{anyhow, bail, Result};
use clap::Subcommand;
use std::cmp::Ordering;

use crate::config::SemverConfig;

pub use compare::CompareArgs;
pub use inc::IncArgs;
pub use resolve::ResolveArgs;
pub use satisfies::SatisfiesArgs;
pub use sort::SortArgs;
pub use valid::ValidArgs;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the canonical form of a version
    Valid(ValidArgs),

    /// Compare two versions, printing -1, 0 or 1
    Compare(CompareArgs),

    /// Check whether a version satisfies a range
    Satisfies(SatisfiesArgs),

    /// Pick the highest version that satisfies a range
    #[command(alias = "max-satisfying")]
    Resolve(ResolveArgs),

    /// Increment a version (major, minor, patch, premajor, preminor, prepatch, prerelease)
    #[command(alias = "increment")]
    Inc(IncArgs),

    /// Sort versions in ascending order
    Sort(SortArgs),
}

/// Execute a subcommand
pub fn execute(command: Commands, config: &SemverConfig) -> Result<i32> {
    match command {
        Commands::Valid(args) => valid::execute(args, config),
        Commands::Compare(args) => compare::execute(args, config),
        Commands::Satisfies(args) => satisfies::execute(args, config),
        Commands::Resolve(args) => resolve::execute(args, config),
        Commands::Inc(args) => inc::execute(args, config),
        Commands::Sort(args) => sort::execute(args, config),
    }
}

/// Loose parsing from `--loose`/`--strict`, falling back to the config file
fn loose_mode(loose: bool, strict: bool, config: &SemverConfig) -> bool {
    if strict {
        false
    } else {
        loose || config.loose
    }
}

/// Output format chosen on the command line, falling back to the config file
fn output_format<'a>(flag: Option<&'a str>, config: &'a SemverConfig) -> Result<&'a str> {
    let format = flag.or(config.format.as_deref()).unwrap_or("text");
    match format {
        "text" | "json" => Ok(format),
        other => bail!("Unknown output format \"{}\" (expected text or json)", other),
    }
}

/// Expand `@name` to the named range from the config file
fn range_pattern<'a>(range: &'a str, config: &'a SemverConfig) -> Result<&'a str> {
    match range.strip_prefix('@') {
        Some(name) => config
            .named_range(name)
            .ok_or_else(|| anyhow!("No range named \"{}\" in {}", name, crate::config::CONFIG_FILE)),
        None => Ok(range),
    }
}

fn ordering_code(ordering: Ordering) -> i32 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}
