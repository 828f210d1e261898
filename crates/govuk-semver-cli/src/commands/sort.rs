//! Sort command - orders a list of versions.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use govuk_semver::Semver;
use std::io::BufRead;

use super::{loose_mode, output_format};
use crate::config::SemverConfig;

#[derive(Args, Debug)]
pub struct SortArgs {
    /// Versions to sort (read one per line from stdin when omitted)
    #[arg(value_name = "VERSIONS")]
    pub versions: Vec<String>,

    /// Sort in descending order
    #[arg(short = 'r', long)]
    pub reverse: bool,

    /// Output format: text or json
    #[arg(short = 'f', long)]
    pub format: Option<String>,

    /// Accept loosely formatted versions
    #[arg(short = 'l', long)]
    pub loose: bool,

    /// Parse strictly even when govuk-semver.toml sets loose = true
    #[arg(short = 's', long, conflicts_with = "loose")]
    pub strict: bool,
}

pub fn execute(args: SortArgs, config: &SemverConfig) -> Result<i32> {
    let format = output_format(args.format.as_deref(), config)?;
    let semver = if loose_mode(args.loose, args.strict, config) { Semver::loose() } else { Semver::strict() };

    let input = if args.versions.is_empty() {
        read_lines()?
    } else {
        args.versions.clone()
    };
    let versions: Vec<&str> = input.iter().map(String::as_str).collect();

    let (sorted, invalid) = sort_versions(&versions, semver, args.reverse);
    for version in &invalid {
        eprintln!(
            "{} Skipping invalid version {}",
            style("Warning:").yellow().bold(),
            style(version).yellow()
        );
    }
    println!("{}", render(&sorted, format)?);

    Ok(0)
}

/// Sorted versions as written, plus the inputs that did not parse
fn sort_versions<'a>(versions: &[&'a str], semver: Semver, reverse: bool) -> (Vec<String>, Vec<&'a str>) {
    let invalid = versions
        .iter()
        .copied()
        .filter(|version| semver.valid(version).is_none())
        .collect();
    let sorted = if reverse { semver.rsort(versions) } else { semver.sort(versions) };
    (sorted, invalid)
}

fn render(sorted: &[String], format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(sorted)?),
        _ => Ok(sorted.join("\n")),
    }
}

fn read_lines() -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read versions from stdin")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }
    Ok(lines)
}
