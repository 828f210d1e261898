//! Resolve command - picks the highest version satisfying a range.
//!
//! Candidates come from the command line, a registry document, or both.

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use govuk_semver::{registry, Range, Version};
use serde_json::Value;
use std::io::Read;

use super::{loose_mode, output_format, range_pattern};
use crate::config::SemverConfig;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Range to satisfy, or @name for a range from govuk-semver.toml
    pub range: String,

    /// Candidate versions
    #[arg(value_name = "VERSIONS")]
    pub versions: Vec<String>,

    /// Registry document to read candidates from ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub registry: Option<String>,

    /// Only consider the version a dist-tag points at (latest, next, ...)
    #[arg(long, value_name = "TAG")]
    pub dist_tag: Option<String>,

    /// Output format: text or json
    #[arg(short = 'f', long)]
    pub format: Option<String>,

    /// Accept loosely formatted versions and ranges
    #[arg(short = 'l', long)]
    pub loose: bool,

    /// Parse strictly even when govuk-semver.toml sets loose = true
    #[arg(short = 's', long, conflicts_with = "loose")]
    pub strict: bool,
}

/// The range that was resolved and the version it picked
#[derive(Debug)]
struct Resolution {
    pattern: String,
    version: Option<Version>,
}

pub fn execute(args: ResolveArgs, config: &SemverConfig) -> Result<i32> {
    let format = output_format(args.format.as_deref(), config)?;
    let resolution = resolve(&args, config)?;

    match render(&resolution, format)? {
        Some(output) => println!("{}", output),
        None => eprintln!(
            "{} No version satisfies {}",
            style("Warning:").yellow().bold(),
            style(&resolution.pattern).cyan()
        ),
    }

    Ok(if resolution.version.is_some() { 0 } else { 1 })
}

fn resolve(args: &ResolveArgs, config: &SemverConfig) -> Result<Resolution> {
    let loose = loose_mode(args.loose, args.strict, config);
    let pattern = range_pattern(&args.range, config)?;
    let range = Range::parse(pattern, loose).with_context(|| format!("Invalid range \"{}\"", pattern))?;

    let registry_file = args.registry.as_deref().or(config.registry.file.as_deref());
    let document = match registry_file {
        Some(path) => Some(load_document(path)?),
        None => None,
    };

    let candidates = match &args.dist_tag {
        Some(tag) => {
            let Some(document) = &document else {
                bail!("--dist-tag needs a registry document");
            };
            let version = registry::dist_tag(document, tag)
                .with_context(|| format!("No dist-tag \"{}\" in registry document", tag))?;
            log::info!("dist-tag {} points at {}", tag, version);
            vec![version.to_string()]
        }
        None => {
            let mut candidates = args.versions.clone();
            if let Some(document) = &document {
                candidates.extend(registry::candidates(document).context("Unreadable registry document")?);
            }
            candidates
        }
    };

    if candidates.is_empty() {
        bail!("No candidate versions given");
    }

    log::info!("Resolving {} against {} candidate(s)", range, candidates.len());
    let version = range
        .highest_version(&candidates)
        .context("Invalid candidate version")?;

    Ok(Resolution {
        pattern: pattern.to_string(),
        version,
    })
}

/// Text output is the bare version, or nothing when no version matched
fn render(resolution: &Resolution, format: &str) -> Result<Option<String>> {
    match format {
        "json" => {
            let output = serde_json::json!({
                "range": resolution.pattern,
                "version": resolution.version.as_ref().map(|v| v.to_string()),
            });
            Ok(Some(serde_json::to_string_pretty(&output)?))
        }
        _ => Ok(resolution.version.as_ref().map(|v| v.to_string())),
    }
}

fn load_document(path: &str) -> Result<Value> {
    let content = if path == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read registry document from stdin")?;
        content
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?
    };

    serde_json::from_str(&content).with_context(|| format!("Failed to parse registry document {}", path))
}
