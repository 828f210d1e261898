//! Compare command - orders two versions.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use govuk_semver::Version;

use super::{loose_mode, ordering_code};
use crate::config::SemverConfig;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Left-hand version
    pub left: String,

    /// Right-hand version
    pub right: String,

    /// Compare by precedence, ignoring build metadata
    #[arg(short = 'p', long)]
    pub precedence: bool,

    /// Accept loosely formatted versions
    #[arg(short = 'l', long)]
    pub loose: bool,

    /// Parse strictly even when govuk-semver.toml sets loose = true
    #[arg(short = 's', long, conflicts_with = "loose")]
    pub strict: bool,
}

/// Outcome of a comparison
#[derive(Debug, PartialEq, Eq)]
struct Comparison {
    code: i32,
    same_precedence: Option<bool>,
    precedes: Option<bool>,
}

pub fn execute(args: CompareArgs, config: &SemverConfig) -> Result<i32> {
    let comparison = compare(&args, config)?;

    println!("{}", comparison.code);
    if let Some(same) = comparison.same_precedence {
        println!("{} {}", style("Same precedence:").dim(), same);
    }
    if let Some(precedes) = comparison.precedes {
        println!("{} {}", style("Precedes:").dim(), precedes);
    }

    Ok(0)
}

fn compare(args: &CompareArgs, config: &SemverConfig) -> Result<Comparison> {
    let loose = loose_mode(args.loose, args.strict, config);
    let left = Version::parse(&args.left, loose).context("Invalid left-hand version")?;
    let right = Version::parse(&args.right, loose).context("Invalid right-hand version")?;

    if !args.precedence {
        return Ok(Comparison {
            code: ordering_code(left.compare(&right)?),
            same_precedence: None,
            precedes: None,
        });
    }

    Ok(Comparison {
        code: ordering_code(left.cmp_precedence(&right)),
        same_precedence: Some(left.has_same_precedence(&right)?),
        precedes: Some(left.precedes(&right)?),
    })
}
