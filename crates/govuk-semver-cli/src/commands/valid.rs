//! Valid command - prints the canonical form of a version.

use anyhow::Result;
use clap::Args;
use console::style;
use govuk_semver::{Version, VersionError};

use super::loose_mode;
use crate::config::SemverConfig;

#[derive(Args, Debug)]
pub struct ValidArgs {
    /// Version to check
    pub version: String,

    /// Accept loosely formatted versions (v1.2.3, 01.2.3, 1.2.3beta)
    #[arg(short = 'l', long)]
    pub loose: bool,

    /// Parse strictly even when govuk-semver.toml sets loose = true
    #[arg(short = 's', long, conflicts_with = "loose")]
    pub strict: bool,
}

pub fn execute(args: ValidArgs, config: &SemverConfig) -> Result<i32> {
    match canonical(&args, config) {
        Ok(version) => {
            println!("{}", version);
            Ok(0)
        }
        Err(e) => {
            eprintln!("{} {}", style("Invalid:").red().bold(), e);
            Ok(1)
        }
    }
}

fn canonical(args: &ValidArgs, config: &SemverConfig) -> Result<String, VersionError> {
    let loose = loose_mode(args.loose, args.strict, config);
    Version::parse(&args.version, loose).map(|version| version.to_string())
}
