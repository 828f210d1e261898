//! Satisfies command - checks a version against a range.

use anyhow::{Context, Result};
use clap::Args;
use govuk_semver::{Range, Version};

use super::{loose_mode, range_pattern};
use crate::config::SemverConfig;

#[derive(Args, Debug)]
pub struct SatisfiesArgs {
    /// Version to test
    pub version: String,

    /// Range to test against, or @name for a range from govuk-semver.toml
    pub range: String,

    /// Accept loosely formatted versions and ranges
    #[arg(short = 'l', long)]
    pub loose: bool,

    /// Parse strictly even when govuk-semver.toml sets loose = true
    #[arg(short = 's', long, conflicts_with = "loose")]
    pub strict: bool,
}

pub fn execute(args: SatisfiesArgs, config: &SemverConfig) -> Result<i32> {
    let satisfied = satisfies(&args, config)?;
    println!("{}", satisfied);

    Ok(if satisfied { 0 } else { 1 })
}

fn satisfies(args: &SatisfiesArgs, config: &SemverConfig) -> Result<bool> {
    let loose = loose_mode(args.loose, args.strict, config);
    let pattern = range_pattern(&args.range, config)?;
    let range = Range::parse(pattern, loose).with_context(|| format!("Invalid range \"{}\"", pattern))?;
    let version = Version::parse(&args.version, loose).context("Invalid version")?;

    let satisfied = range.matches(&version);
    log::info!("{} satisfies {}: {}", version, range, satisfied);
    Ok(satisfied)
}
