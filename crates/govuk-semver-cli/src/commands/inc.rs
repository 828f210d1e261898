//! Inc command - prints the next version at a given level.

use anyhow::{Context, Result};
use clap::Args;
use govuk_semver::{Level, Version};

use super::loose_mode;
use crate::config::SemverConfig;

#[derive(Args, Debug)]
pub struct IncArgs {
    /// Version to increment
    pub version: String,

    /// Level to increment
    #[arg(default_value = "patch")]
    pub level: String,

    /// Pre-release identifier for the pre* levels (alpha, beta, rc, ...)
    #[arg(long, value_name = "ID")]
    pub preid: Option<String>,

    /// Accept loosely formatted versions
    #[arg(short = 'l', long)]
    pub loose: bool,

    /// Parse strictly even when govuk-semver.toml sets loose = true
    #[arg(short = 's', long, conflicts_with = "loose")]
    pub strict: bool,
}

pub fn execute(args: IncArgs, config: &SemverConfig) -> Result<i32> {
    println!("{}", next_version(&args, config)?);
    Ok(0)
}

fn next_version(args: &IncArgs, config: &SemverConfig) -> Result<Version> {
    let level: Level = args.level.parse()?;
    let loose = loose_mode(args.loose, args.strict, config);
    let version = Version::parse(&args.version, loose).context("Invalid version")?;

    log::debug!("Incrementing {}: {}", version, level.description());
    Ok(version.increment_with(level, args.preid.as_deref())?)
}
